//! File configuration for the command line tool

use std::path::{Path, PathBuf};

use anyhow::Context;
use calmmap_core::loading::NetworkConfig;
use serde::Deserialize;

/// Contents of the `--config` TOML file. Command line flags take precedence.
///
/// ```toml
/// segments = "centrelines.geojson"
/// requests = "requests.tsv"
/// overrides = "overrides"
///
/// [network]
/// tolerance = 1.0
/// metric = "haversine"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub segments: Option<PathBuf>,
    pub requests: Option<PathBuf>,
    /// Directory of `<rank>.<stage>` override files
    pub overrides: Option<PathBuf>,
    pub network: NetworkConfig,
}

impl AppConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let mut config: Self = toml::from_str(&text)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;

        // Paths in the file are relative to the file itself
        if let Some(base) = path.parent() {
            for p in [&mut config.segments, &mut config.requests, &mut config.overrides]
                .into_iter()
                .flatten()
            {
                if p.is_relative() {
                    *p = base.join(&*p);
                }
            }
        }
        Ok(config)
    }
}
