//! Catalog sync logging
//!
//! Timestamped, level-prefixed lines on the console, optionally mirrored
//! to a log file, with a run header written at startup.

use chrono::Local;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};

static LOGGER: OnceLock<Arc<Mutex<SyncLogger>>> = OnceLock::new();

// ============================================================================
// Run Information
// ============================================================================

#[derive(Debug, Clone)]
pub struct RunInfo {
    pub app_version: String,
    pub config_path: PathBuf,
    pub store: String,
    pub dry_run: bool,
}

impl RunInfo {
    pub fn new(config_path: &Path, store: String, dry_run: bool) -> Self {
        Self {
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            config_path: config_path.to_path_buf(),
            store,
            dry_run,
        }
    }

    pub fn to_log_header(&self) -> String {
        format!(
r#"================================================================================
Catalog Sync - {}
================================================================================
Application:   catalog-sync v{}
Config:        {}
Store:         {}
Mode:          {}
================================================================================"#,
            Local::now().format("%Y-%m-%d %H:%M:%S"),
            self.app_version,
            self.config_path.display(),
            self.store,
            if self.dry_run { "dry run" } else { "publish" },
        )
    }
}

// ============================================================================
// Log Levels
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LogLevel {
    Info,
    Fetch, // Upstream release lookups
    Publish,
    Warning,
    Error,
}

impl LogLevel {
    pub fn prefix(&self) -> &'static str {
        match self {
            LogLevel::Info => "[INFO]",
            LogLevel::Fetch => "[FETCH]",
            LogLevel::Publish => "[PUBLISH]",
            LogLevel::Warning => "[WARNING]",
            LogLevel::Error => "[ERROR]",
        }
    }

    fn is_problem(&self) -> bool {
        matches!(self, LogLevel::Warning | LogLevel::Error)
    }
}

// ============================================================================
// Sync Logger
// ============================================================================

pub struct SyncLogger {
    log_file: Option<File>,
}

impl SyncLogger {
    /// Console-only logger
    pub fn new() -> Self {
        Self { log_file: None }
    }

    /// Logger that also appends to `path`
    pub fn with_file(path: &Path) -> Self {
        if let Some(parent) = path.parent() {
            let _ = fs::create_dir_all(parent);
        }

        let log_file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .ok();

        Self { log_file }
    }

    fn write_raw(&mut self, msg: &str, to_stderr: bool) {
        if let Some(ref mut file) = self.log_file {
            let _ = writeln!(file, "{}", msg);
            let _ = file.flush();
        }

        if to_stderr {
            eprintln!("{}", msg);
        } else {
            println!("{}", msg);
        }
    }

    pub fn log(&mut self, level: LogLevel, message: &str) {
        self.write_raw(&format_line(level, message), level.is_problem());
    }
}

impl Default for SyncLogger {
    fn default() -> Self {
        Self::new()
    }
}

fn format_line(level: LogLevel, message: &str) -> String {
    let timestamp = Local::now().format("%H:%M:%S");
    format!("[{}] {} {}", timestamp, level.prefix(), message)
}

// ============================================================================
// Global Logger Access
// ============================================================================

/// Initialize the global logger and write the run header (call once at startup)
pub fn init_logger(log_file: Option<&Path>, run: &RunInfo) {
    let logger = LOGGER.get_or_init(|| {
        let logger = match log_file {
            Some(path) => SyncLogger::with_file(path),
            None => SyncLogger::new(),
        };
        Arc::new(Mutex::new(logger))
    });

    if let Ok(mut log) = logger.lock() {
        log.write_raw(&run.to_log_header(), false);
    }
}

/// Get the global logger instance
fn logger() -> Arc<Mutex<SyncLogger>> {
    LOGGER
        .get_or_init(|| Arc::new(Mutex::new(SyncLogger::new())))
        .clone()
}

// ============================================================================
// Convenience Logging Functions
// ============================================================================

pub fn log_info(message: &str) {
    if let Ok(mut log) = logger().lock() {
        log.log(LogLevel::Info, message);
    }
}

pub fn log_fetch(message: &str) {
    if let Ok(mut log) = logger().lock() {
        log.log(LogLevel::Fetch, message);
    }
}

pub fn log_publish(message: &str) {
    if let Ok(mut log) = logger().lock() {
        log.log(LogLevel::Publish, message);
    }
}

pub fn log_warning(message: &str) {
    if let Ok(mut log) = logger().lock() {
        log.log(LogLevel::Warning, message);
    }
}

pub fn log_error(message: &str) {
    if let Ok(mut log) = logger().lock() {
        log.log(LogLevel::Error, message);
    }
}
