//! Startup configuration.
//!
//! Tables and options are read once, validated, and then only shared
//! read-only. Example:
//!
//! ```toml
//! languages = ["en-US", "de", "pt-BR"]
//!
//! [options]
//! default_language = "en-US"
//! apps = ["firefox"]
//!
//! [[regions]]
//! slug = "worldwide"
//! name = "worldwide"
//! default_language = "en-US"
//! worldwide = true
//!
//! [[regions]]
//! slug = "br"
//! name = "br"
//! default_language = "pt-BR"
//! ordering = 1
//! ```

use crate::chain::InterceptorChain;
use crate::options::{ChainOptions, ValidationError};
use crate::tables::{LanguageTable, Region, RegionTable};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read `{path}`: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid configuration: {0}")]
    Validation(#[from] ValidationError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionConfig {
    pub slug: String,
    pub name: String,
    pub default_language: String,
    #[serde(default)]
    pub ordering: i32,
    #[serde(default)]
    pub worldwide: bool,
}

impl From<RegionConfig> for Region {
    fn from(config: RegionConfig) -> Self {
        Region::new(config.slug, config.name, config.default_language, config.ordering)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainConfig {
    pub languages: Vec<String>,
    #[serde(default)]
    pub options: ChainOptions,
    pub regions: Vec<RegionConfig>,
}

impl ChainConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Validated options and lookup tables.
    pub fn into_parts(self) -> Result<(ChainOptions, LanguageTable, RegionTable), ConfigError> {
        let languages = LanguageTable::new(self.languages);
        self.options.validate(&languages)?;

        let (mut worldwide, others): (Vec<RegionConfig>, Vec<RegionConfig>) =
            self.regions.into_iter().partition(|region| region.worldwide);
        let worldwide = match worldwide.len() {
            1 => worldwide.remove(0),
            count => return Err(ValidationError::WorldwideRegionCount(count).into()),
        };
        let regions = RegionTable::new(
            Region::from(worldwide),
            others.into_iter().map(Region::from),
        )?;

        Ok((self.options, languages, regions))
    }

    pub fn build_chain(self) -> Result<InterceptorChain, ConfigError> {
        let (options, languages, regions) = self.into_parts()?;
        Ok(InterceptorChain::new(options, languages, regions)?)
    }
}

/// Load configuration from a TOML file. Tables are validated by
/// [`ChainConfig::into_parts`].
pub fn load_config(path: &Path) -> Result<ChainConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config = ChainConfig::from_toml_str(&content)?;
    info!(
        path = %path.display(),
        languages = config.languages.len(),
        regions = config.regions.len(),
        "loaded interceptor configuration"
    );
    Ok(config)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
