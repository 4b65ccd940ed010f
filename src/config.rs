//! Settings file handling.
//!
//! Settings are a small JSON document. Every field has a default so an empty
//! object (or no file at all) is a valid configuration. CLI flags are layered
//! on top with [`Settings::apply_overrides`].

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_SERVICE_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_PAIR_PATH: &str = "/pair";
pub const DEFAULT_REFERENCE_URL: &str = "https://youtu.be/a4qN3vdmrTY";

/// Upper bound for either timeout, in seconds
pub const MAX_TIMEOUT_SECS: u64 = 300;

/// Whether `url` has an `http://` or `https://` scheme
pub fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// Runtime settings for the wizard and its pairing client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Base URL of the pairing service
    pub service_url: String,
    /// Path of the pairing endpoint on that service
    pub pair_path: String,
    /// Total request timeout; expiry counts as a failed submission
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
    /// Opened by the "I don't know" entry on the palette step
    pub reference_url: String,
    /// Where the TUI writes its log (stdout belongs to the terminal UI)
    pub log_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            service_url: DEFAULT_SERVICE_URL.to_string(),
            pair_path: DEFAULT_PAIR_PATH.to_string(),
            timeout_secs: 15,
            connect_timeout_secs: 5,
            reference_url: DEFAULT_REFERENCE_URL.to_string(),
            log_file: None,
        }
    }
}

/// Values given on the command line; `None` keeps the file's value
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub service_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub log_file: Option<PathBuf>,
}

impl Settings {
    /// Save settings to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json =
            serde_json::to_string_pretty(self).context("Failed to serialize settings to JSON")?;

        fs::write(&path, json)
            .with_context(|| format!("Failed to write settings to {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Load settings from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read settings from {:?}", path.as_ref()))?;

        let settings: Self =
            serde_json::from_str(&content).context("Failed to parse settings JSON")?;

        Ok(settings)
    }

    /// Load from `path` when given, defaults otherwise, then apply overrides.
    pub fn resolve(path: Option<&Path>, overrides: &SettingsOverrides) -> Result<Self> {
        let mut settings = match path {
            Some(p) => Self::load_from_file(p)?,
            None => Self::default(),
        };
        settings.apply_overrides(overrides);
        settings.validate()?;
        Ok(settings)
    }

    pub fn apply_overrides(&mut self, overrides: &SettingsOverrides) {
        if let Some(ref url) = overrides.service_url {
            self.service_url = url.clone();
        }
        if let Some(timeout) = overrides.timeout_secs {
            self.timeout_secs = timeout;
        }
        if let Some(ref log_file) = overrides.log_file {
            self.log_file = Some(log_file.clone());
        }
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        let url = self.service_url.trim();
        if url.is_empty() {
            anyhow::bail!("Service URL must be specified");
        }
        if !is_http_url(url) {
            anyhow::bail!("Service URL must start with http:// or https:// (got {:?})", url);
        }

        if self.pair_path.trim().is_empty() {
            anyhow::bail!("Pair path must not be empty");
        }

        for (name, value) in [
            ("timeout_secs", self.timeout_secs),
            ("connect_timeout_secs", self.connect_timeout_secs),
        ] {
            if value == 0 || value > MAX_TIMEOUT_SECS {
                anyhow::bail!(
                    "{} must be between 1 and {} seconds (got {})",
                    name,
                    MAX_TIMEOUT_SECS,
                    value
                );
            }
        }

        let reference = self.reference_url.trim();
        if reference.is_empty() {
            anyhow::bail!("Reference URL must not be empty");
        }
        if !is_http_url(reference) {
            anyhow::bail!(
                "Reference URL must start with http:// or https:// (got {:?})",
                reference
            );
        }

        Ok(())
    }

    /// Full URL of the pairing endpoint, with exactly one slash at the join.
    pub fn pair_endpoint(&self) -> String {
        let base = self.service_url.trim().trim_end_matches('/');
        let path = self.pair_path.trim().trim_start_matches('/');
        format!("{}/{}", base, path)
    }

    /// Log file to use in TUI mode
    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("colorwise.log"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.pair_endpoint(), "http://127.0.0.1:5000/pair");
    }

    #[test]
    fn test_empty_object_uses_defaults() {
        let settings: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_rejects_bad_url() {
        let settings = Settings {
            service_url: "ftp://example.com".to_string(),
            ..Settings::default()
        };
        assert!(settings.validate().is_err());

        let settings = Settings {
            service_url: "   ".to_string(),
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_rejects_timeouts_out_of_range() {
        let zero = Settings {
            timeout_secs: 0,
            ..Settings::default()
        };
        assert!(zero.validate().is_err());

        let huge = Settings {
            connect_timeout_secs: MAX_TIMEOUT_SECS + 1,
            ..Settings::default()
        };
        assert!(huge.validate().is_err());
    }

    #[test]
    fn test_overrides_win() {
        let mut settings = Settings::default();
        settings.apply_overrides(&SettingsOverrides {
            service_url: Some("https://pair.example.com".to_string()),
            timeout_secs: Some(30),
            log_file: None,
        });
        assert_eq!(settings.service_url, "https://pair.example.com");
        assert_eq!(settings.timeout_secs, 30);
        assert_eq!(settings.log_file, None);
    }

    #[test]
    fn test_endpoint_slashes() {
        let settings = Settings {
            service_url: "https://svc.example.com/api/".to_string(),
            pair_path: "/pair".to_string(),
            ..Settings::default()
        };
        assert_eq!(settings.pair_endpoint(), "https://svc.example.com/api/pair");
    }
}
