use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Serialize, PartialEq)]
pub struct Config {
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Config {
    /// Loads configuration from `portfolio.toml` in the working directory (if any),
    /// then the explicit file, then `PORTFOLIO_*` environment variables.
    pub fn load(file: Option<&Path>) -> anyhow::Result<Self> {
        let mut builder = config::Config::builder()
            .add_source(config::File::with_name("portfolio").required(false));
        if let Some(path) = file {
            builder = builder.add_source(config::File::from(path).required(true));
        }
        Self::build(builder.add_source(config::Environment::with_prefix("PORTFOLIO")))
    }

    fn build(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> anyhow::Result<Self> {
        let settings = builder.build()?;
        Ok(settings.try_deserialize()?)
    }

    pub fn log_level(&self) -> anyhow::Result<tracing::Level> {
        self.log_level
            .parse()
            .map_err(|_| anyhow::anyhow!("invalid log level `{}`", self.log_level))
    }
}

fn default_store_path() -> PathBuf {
    PathBuf::from("portfolio.json")
}

fn default_log_level() -> String {
    "info".to_string()
}
