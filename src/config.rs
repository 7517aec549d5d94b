//! This module resolves the runtime configuration from defaults, an optional
//! JSON file and command-line flags, in that order of precedence.
use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::app::AppArgs;

pub const DEFAULT_NAMESPACE: &str = "default";
pub const DEFAULT_REFRESH_PERIOD: Duration = Duration::from_secs(5);
pub const DEFAULT_LAYOUT_PERIOD: Duration = Duration::from_millis(1000);
/// Upper bound for both periods. Timers are scheduled at `now + period`, so
/// the value has to stay far from `Instant` overflow.
pub const MAX_PERIOD: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Namespace whose pods are listed and deleted.
    pub namespace: String,
    /// How often the pod list is re-fetched.
    pub refresh_period: Duration,
    /// How often the labels are scrambled.
    pub layout_period: Duration,
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            refresh_period: DEFAULT_REFRESH_PERIOD,
            layout_period: DEFAULT_LAYOUT_PERIOD,
            seed: None,
        }
    }
}

/// The on-disk form; every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    namespace: Option<String>,
    refresh_secs: Option<u64>,
    layout_ms: Option<u64>,
    seed: Option<u64>,
}

impl Config {
    /// Builds the configuration for a run.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed, or if
    /// the merged result is invalid.
    pub fn resolve(args: &AppArgs) -> Result<Self> {
        let file = match &args.config {
            Some(path) => load_file(path)?,
            None => FileConfig::default(),
        };
        Self::merge(file, args)
    }

    fn merge(file: FileConfig, args: &AppArgs) -> Result<Self> {
        let mut config = Config::default();

        if let Some(namespace) = file.namespace {
            config.namespace = namespace;
        }
        if let Some(secs) = file.refresh_secs {
            config.refresh_period = Duration::from_secs(secs);
        }
        if let Some(ms) = file.layout_ms {
            config.layout_period = Duration::from_millis(ms);
        }
        config.seed = file.seed;

        if let Some(namespace) = &args.namespace {
            config.namespace = namespace.clone();
        }
        if let Some(secs) = args.refresh_secs {
            config.refresh_period = Duration::from_secs(secs);
        }
        if let Some(ms) = args.layout_ms {
            config.layout_period = Duration::from_millis(ms);
        }
        if args.seed.is_some() {
            config.seed = args.seed;
        }

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.namespace.trim().is_empty() {
            bail!("namespace must not be empty");
        }
        if self.refresh_period.is_zero() {
            bail!("refresh period must be greater than zero");
        }
        if self.layout_period.is_zero() {
            bail!("layout period must be greater than zero");
        }
        if self.refresh_period > MAX_PERIOD {
            bail!("refresh period must be at most {:?}", MAX_PERIOD);
        }
        if self.layout_period > MAX_PERIOD {
            bail!("layout period must be at most {:?}", MAX_PERIOD);
        }
        Ok(())
    }
}

fn load_file(path: &Path) -> Result<FileConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse config file {}", path.display()))
}
