//! Layered CLI settings: optional TOML file, then `FOLIO__*` environment
//! variables. Command-line flags are applied on top by the caller.

use std::path::Path;

use folio_core::{EngineConfig, Timeframe};
use serde::Deserialize;

use crate::error::CliError;

const ENV_PREFIX: &str = "FOLIO";
const ENV_SEPARATOR: &str = "__";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub timeframe: Timeframe,
    /// Calendar days of history requested per ticker.
    pub lookback_days: u32,
    pub engine: EngineConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            timeframe: Timeframe::default(),
            lookback_days: 365,
            engine: EngineConfig::default(),
        }
    }
}

impl Settings {
    pub fn load(path: Option<&Path>) -> Result<Self, CliError> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(
                config::File::from(path)
                    .format(config::FileFormat::Toml)
                    .required(true),
            );
        }

        let settings = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<Settings>()?;

        Ok(settings)
    }
}
