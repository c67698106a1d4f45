//! catalog-sync - publish the localization catalog
//!
//! Resolves every project in the config file to its latest release and
//! updates the catalog gist when anything changed.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use catalog_sync::config::{RunConfig, StoreSettings, TrackedEntries, DEFAULT_API_URL, DEFAULT_FILE_NAME};
use catalog_sync::error::SyncError;
use catalog_sync::github::GithubApi;
use catalog_sync::logging::{init_logger, log_error, log_info, RunInfo};
use catalog_sync::store::{self, GistStore};
use catalog_sync::sync::{self, SyncOutcome};

#[derive(Parser, Debug)]
#[command(name = "catalog-sync", version, about = "Sync the localization catalog with upstream releases")]
struct Cli {
    /// Tracked localizations file
    #[arg(short, long, default_value = "localizations.toml")]
    config: PathBuf,

    #[arg(long, env = "GITHUB_GIST_ID")]
    gist_id: String,

    #[arg(long, env = "GITHUB_GIST_OWNER")]
    gist_owner: String,

    /// Token used to update the gist
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true, required_unless_present = "dry_run")]
    token: Option<String>,

    /// Name of the catalog file inside the gist
    #[arg(long, default_value = DEFAULT_FILE_NAME)]
    file_name: String,

    #[arg(long, default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Build the catalog and print it without publishing
    #[arg(long)]
    dry_run: bool,

    /// Also append log lines to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn into_run_config(self) -> (RunConfig, Option<PathBuf>) {
        let mut store = StoreSettings::new(self.gist_id, self.gist_owner);
        store.token = self.token;
        store.file_name = self.file_name;
        store.api_url = self.api_url;

        let run = RunConfig {
            config_path: self.config,
            store,
            dry_run: self.dry_run,
        };
        (run, self.log_file)
    }
}

fn execute(config: RunConfig) -> Result<SyncOutcome, SyncError> {
    let tracked = TrackedEntries::load(&config.config_path)?;
    log_info(&format!("Loaded {} tracked localizations", tracked.len()));

    let feed = GithubApi::new(config.store.api_url.clone());
    let store = GistStore::new(config.store);
    sync::run(&tracked, &store, &feed, config.dry_run)
}

fn main() -> ExitCode {
    let (config, log_file) = Cli::parse().into_run_config();

    let run_info = RunInfo::new(&config.config_path, store::describe(&config.store), config.dry_run);
    init_logger(log_file.as_deref(), &run_info);

    match execute(config) {
        Ok(SyncOutcome::Skipped { catalog, changed }) => {
            match catalog.to_json() {
                Ok(json) => println!("{}", json),
                Err(e) => {
                    log_error(&format!("Failed to encode catalog: {}", e));
                    return ExitCode::from(2);
                }
            }
            if changed {
                log_info("Dry run: catalog differs from the published one, not publishing");
            } else {
                log_info("Dry run: no changes to the localizations");
            }
            ExitCode::SUCCESS
        }
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            log_error(&e.to_string());
            ExitCode::from(e.exit_code())
        }
    }
}
