//! Runtime settings, layered from defaults, an optional `syllogy.toml` (or any
//! other format the `config` crate recognises) and `SYLLOGY_*` environment
//! variables, in that order.

use std::path::PathBuf;

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::Result;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Directory holding saved knowledge.
    pub store: PathBuf,
    /// File extension for saved knowledge.
    pub extension: String,
    pub prompt: String,
    /// Log filter used when `RUST_LOG` is not set.
    pub log: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            store: PathBuf::from("."),
            extension: "syl".to_string(),
            prompt: "> ".to_string(),
            log: "warn".to_string(),
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self> {
        Self::from_file("syllogy")
    }
    /// Reads settings from the config file `name` (extension optional, may be
    /// absent) and the environment.
    pub fn from_file(name: &str) -> Result<Self> {
        let defaults = Settings::default();
        let settings = Config::builder()
            .set_default("store", defaults.store.to_string_lossy().as_ref())?
            .set_default("extension", defaults.extension)?
            .set_default("prompt", defaults.prompt)?
            .set_default("log", defaults.log)?
            .add_source(File::with_name(name).required(false))
            .add_source(Environment::with_prefix("SYLLOGY"))
            .build()?;
        Ok(settings.try_deserialize()?)
    }
}
