//! Subcommand implementations.

pub mod analyze;
pub mod config;
pub mod serve;

use palm_relay_core::Config;
use std::path::Path;

/// Load configuration for a command.
///
/// An explicit `--config` path must load cleanly. A broken file at the default
/// location only produces a warning and the built-in defaults.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    if let Some(path) = path {
        return Config::load_from(path)
            .map_err(|e| anyhow::anyhow!("Failed to load {}: {e}", path.display()));
    }

    match Config::load() {
        Ok(config) => Ok(config),
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `palm-relay config path`."
            );
            Ok(Config::default())
        }
    }
}
