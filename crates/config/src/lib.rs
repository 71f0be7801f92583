#![forbid(unsafe_code)]

mod engine;
mod error;
mod rules;

pub use engine::Engine;
pub use error::Error;
pub use rules::{ProcessSpec, ReportRule, RuleKind};

use figment::Figment;
use figment::providers::{Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Config {
    pub engine: Engine,

    /// Process checks to evaluate each cycle.
    pub checks: Vec<ProcessSpec>,
}

impl Config {
    /// Default configuration with no checks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file, merged over the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::InvalidPath(path.to_owned()));
        }
        let config = Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(path))
            .extract()?;
        Ok(config)
    }
}
