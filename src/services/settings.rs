use crate::services::summary::DEFAULT_TOP_PRODUCTS;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_BASE_URL: &str = "https://vis.anyargroup.co.id";
pub const DEFAULT_VENDOR_ID: &str = "VL0000446";

#[derive(thiserror::Error, Debug)]
pub enum SettingsError {
    #[error("failed to read settings file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid setting {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct Settings {
    #[serde(default)]
    pub portal: PortalSettings,
    #[serde(default)]
    pub ingest: IngestSettings,
    #[serde(default)]
    pub summary: SummarySettings,
}

/// Endpoint constants for the `detailpo` lookup. Only the document id varies per request.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct PortalSettings {
    pub base_url: String,
    pub vendor_id: String,
    pub status: String,
    pub order: String,
    pub user_agent: String,
    pub timeout_ms: u64,
}

impl Default for PortalSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            vendor_id: DEFAULT_VENDOR_ID.to_string(),
            status: "O".to_string(),
            order: "22".to_string(),
            user_agent: "Mozilla/5.0".to_string(),
            timeout_ms: 30_000,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct IngestSettings {
    /// Pause after each answered request, in milliseconds.
    pub delay_ms: u64,
}

impl Default for IngestSettings {
    fn default() -> Self {
        Self { delay_ms: 500 }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct SummarySettings {
    pub top_products: usize,
}

impl Default for SummarySettings {
    fn default() -> Self {
        Self {
            top_products: DEFAULT_TOP_PRODUCTS,
        }
    }
}

pub fn default_settings_path() -> Option<PathBuf> {
    let home = std::env::var("HOME").ok()?;
    Some(PathBuf::from(home).join(".config/po-harvest/config.toml"))
}

/// Loads settings from `explicit`, or from the default location when it exists.
///
/// An explicit path must exist; a missing default file just means built-in defaults.
pub fn load_settings(explicit: Option<&Path>) -> Result<Settings, SettingsError> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => match default_settings_path() {
            Some(p) if p.exists() => p,
            _ => return Ok(Settings::default()),
        },
    };
    let raw = std::fs::read_to_string(&path).map_err(|source| SettingsError::Read {
        path: path.clone(),
        source,
    })?;
    let settings = parse_settings(&raw).map_err(|source| SettingsError::Parse {
        path: path.clone(),
        source,
    })?;
    settings.validate()?;
    tracing::debug!(path = %path.display(), "loaded settings");
    Ok(settings)
}

pub fn parse_settings(raw: &str) -> Result<Settings, toml::de::Error> {
    toml::from_str(raw)
}

impl Settings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        let base = self.portal.base_url.trim();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(SettingsError::Invalid {
                key: "portal.base_url",
                reason: format!("expected an http(s) url, got {:?}", self.portal.base_url),
            });
        }
        if self.portal.vendor_id.trim().is_empty() {
            return Err(SettingsError::Invalid {
                key: "portal.vendor_id",
                reason: "must not be empty".to_string(),
            });
        }
        if self.portal.timeout_ms == 0 {
            return Err(SettingsError::Invalid {
                key: "portal.timeout_ms",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.summary.top_products == 0 {
            return Err(SettingsError::Invalid {
                key: "summary.top_products",
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}
