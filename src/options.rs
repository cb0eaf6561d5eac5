use crate::constants::device;
use crate::tables::LanguageTable;
use crate::util::is_http_token;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainOptions {
    /// Language used when no request signal is usable.
    pub default_language: String,
    /// Application names recognised as path prefixes (`/firefox/...`).
    pub apps: Vec<String>,
    /// Device classes persisted through cookies.
    pub devices: Vec<String>,
    /// Answer prefix redirects with 301 instead of 302.
    pub permanent_redirects: bool,
}

impl Default for ChainOptions {
    fn default() -> Self {
        Self {
            default_language: "en-US".to_string(),
            apps: vec!["firefox".to_string()],
            devices: vec![
                device::MOBILE.to_string(),
                device::GAIA.to_string(),
                device::TABLET.to_string(),
            ],
            permanent_redirects: false,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("language table is empty")]
    EmptyLanguageTable,
    #[error("default language `{0}` is not present in the language table")]
    UnknownDefaultLanguage(String),
    #[error("region slug cannot be empty")]
    EmptyRegionSlug,
    #[error("region `{0}` is declared more than once")]
    DuplicateRegion(String),
    #[error("exactly one worldwide region must be declared, found {0}")]
    WorldwideRegionCount(usize),
    #[error("device class `{0}` is not a valid cookie name")]
    InvalidDeviceClass(String),
    #[error("app prefix `{0}` is not a valid path segment")]
    InvalidAppPrefix(String),
}

impl ChainOptions {
    pub fn validate(&self, languages: &LanguageTable) -> Result<(), ValidationError> {
        if languages.is_empty() {
            return Err(ValidationError::EmptyLanguageTable);
        }

        if !languages.contains(&self.default_language) {
            return Err(ValidationError::UnknownDefaultLanguage(
                self.default_language.clone(),
            ));
        }

        if let Some(invalid) = self.devices.iter().find(|name| !is_http_token(name)) {
            return Err(ValidationError::InvalidDeviceClass(invalid.clone()));
        }

        if let Some(invalid) = self.apps.iter().find(|name| !is_http_token(name)) {
            return Err(ValidationError::InvalidAppPrefix(invalid.clone()));
        }

        Ok(())
    }

    /// Whether `segment` names a known app prefix. Matching is case-sensitive.
    pub fn is_app(&self, segment: &str) -> bool {
        !segment.is_empty() && self.apps.iter().any(|app| app == segment)
    }
}

#[cfg(test)]
#[path = "options_test.rs"]
mod options_test;
