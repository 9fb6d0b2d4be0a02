//! Configuration file support for cleaning pipelines

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tabclean_core::{PipelinePaths, PipelineSettings, SortConfig};
use tabclean_filters::ChineseFilterConfig;
use tabclean_formats::CsvConfig;

/// Complete pipeline configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub paths: PipelinePaths,
    #[serde(default)]
    pub csv: CsvConfig,
    #[serde(default)]
    pub filter: ChineseFilterConfig,
    #[serde(default)]
    pub sort: SortConfig,
}

impl PipelineConfig {
    /// Load configuration from a file (YAML or TOML)
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let extension = path.extension().and_then(|s| s.to_str()).unwrap_or("");

        match extension {
            "yaml" | "yml" => serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse YAML config: {}", path.display())),
            "toml" => toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display())),
            _ => Err(anyhow::anyhow!(
                "Unsupported config file format: {}. Use .yaml, .yml, or .toml",
                extension
            )),
        }
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let extension = path.extension().and_then(|s| s.to_str()).unwrap_or("");

        let content = match extension {
            "yaml" | "yml" => serde_yaml::to_string(self)?,
            "toml" => toml::to_string_pretty(self)?,
            _ => {
                return Err(anyhow::anyhow!(
                    "Unsupported config file format: {}. Use .yaml, .yml, or .toml",
                    extension
                ))
            }
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Stage settings for the pipeline runner
    pub fn settings(&self) -> PipelineSettings {
        PipelineSettings {
            csv: self.csv.clone(),
            filter: self.filter.clone(),
            sort: self.sort.clone(),
        }
    }
}
