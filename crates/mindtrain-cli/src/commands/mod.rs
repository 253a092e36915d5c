pub mod calendar;
pub mod config;
pub mod exercises;
pub mod quiz;
pub mod session;
pub mod stats;

use std::path::Path;

use mindtrain_core::{Config, ConfigError};

/// Read the config at `path`, falling back to defaults when it does not exist.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if path.exists() {
        Config::load_from(path)
    } else {
        Ok(Config::default())
    }
}

/// One JSON document per line.
pub fn print_json_line<T: serde::Serialize>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string(value)?);
    Ok(())
}
