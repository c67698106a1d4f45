//! Localization catalog sync
//!
//! Library crate for resolving tracked localization projects to their latest
//! GitHub releases and merging them into the published catalog.
//! Note: network clients are only available with the "remote" feature.

pub mod catalog;
pub mod config;
pub mod error;
pub mod github;
pub mod logging;
pub mod pipeline;
pub mod resolver;
pub mod store;
pub mod sync;

#[cfg(test)]
mod testing;
