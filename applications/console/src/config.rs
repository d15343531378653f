/// Console configuration
use anyhow::Context;
use roster_client::ClientConfig;
use roster_view::ViewConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming an alternative config file
pub const CONFIG_PATH_ENV: &str = "ROSTER_CONFIG";

const DEFAULT_CONFIG_FILE: &str = "roster.toml";
const ENV_PREFIX: &str = "ROSTER";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub client: ClientConfig,

    #[serde(default)]
    pub view: ViewConfig,
}

impl AppConfig {
    /// Load configuration from file and environment
    ///
    /// The file is optional. Environment variables use the `ROSTER_` prefix
    /// and `__` between sections, e.g. `ROSTER_CLIENT__BASE_URL`.
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE));

        Self::load_from(&path, environment())
    }

    fn load_from(path: &Path, env: config::Environment) -> anyhow::Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path).required(false))
            .add_source(env)
            .build()
            .with_context(|| format!("failed to read configuration from {}", path.display()))?;

        settings
            .try_deserialize()
            .context("invalid configuration")
    }
}

fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}
