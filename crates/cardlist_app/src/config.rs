//! Run configuration: an optional RON file overridden by command line flags.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use cardlist_engine::{
    FetchSettings, PipelineConfig, DEFAULT_OUTPUT, DEFAULT_TABLE_CLASS, DEFAULT_URL,
};
use cardlist_logging::engine_info;
use serde::{Deserialize, Serialize};

use crate::cli::Cli;

pub const DEFAULT_CONFIG_FILENAME: &str = "cardlist.ron";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub redirect_limit: usize,
    pub max_bytes: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        let settings = FetchSettings::default();
        Self {
            connect_timeout_secs: settings.connect_timeout.as_secs(),
            request_timeout_secs: settings.request_timeout.as_secs(),
            redirect_limit: settings.redirect_limit,
            max_bytes: settings.max_bytes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub url: String,
    pub table_class: String,
    pub output: PathBuf,
    pub create_dirs: bool,
    pub fetch: FetchConfig,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            table_class: DEFAULT_TABLE_CLASS.to_string(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            create_dirs: false,
            fetch: FetchConfig::default(),
        }
    }
}

impl RunConfig {
    /// Load `explicit` if given (it must exist), else `cardlist.ron` in the
    /// working directory if present, else the defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_FILENAME);
                if fallback.is_file() {
                    Self::from_file(fallback)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let config = ron::from_str(&text)
            .with_context(|| format!("parsing config file {}", path.display()))?;
        engine_info!("Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn apply_overrides(&mut self, cli: &Cli) {
        if let Some(url) = &cli.url {
            self.url = url.clone();
        }
        if let Some(class) = &cli.table_class {
            self.table_class = class.clone();
        }
        if let Some(output) = &cli.output {
            self.output = output.clone();
        }
        if cli.create_dirs {
            self.create_dirs = true;
        }
    }

    pub fn into_pipeline_config(self) -> PipelineConfig {
        let fetch = FetchSettings {
            connect_timeout: Duration::from_secs(self.fetch.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.fetch.request_timeout_secs),
            redirect_limit: self.fetch.redirect_limit,
            max_bytes: self.fetch.max_bytes,
            ..FetchSettings::default()
        };
        PipelineConfig {
            url: self.url,
            table_class: self.table_class,
            output: self.output,
            create_dirs: self.create_dirs,
            fetch,
        }
    }
}
