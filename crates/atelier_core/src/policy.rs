//! Staging policy configuration.

use atelier_error::{AtelierError, AtelierResult, ConfigError};
use config::{Config, File};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Bounds enforced on a form's staged assets.
///
/// Limits are module-specific: a news gallery might allow 10 images at
/// 5 MiB each while a product gallery allows 12 at 20 MiB. The bound is
/// enforced at staging time so the user gets immediate feedback, never at
/// submission time.
///
/// # Example
///
/// ```
/// use atelier_core::StagingPolicy;
///
/// let policy = StagingPolicy::builder()
///     .max_assets(12usize)
///     .max_file_bytes(20 * 1024 * 1024)
///     .build()
///     .unwrap();
/// assert_eq!(*policy.max_assets(), 12);
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Getters,
    derive_setters::Setters,
    derive_builder::Builder,
)]
#[setters(prefix = "with_")]
#[builder(default)]
pub struct StagingPolicy {
    /// Maximum staged assets per form (existing plus pending)
    #[serde(default = "default_max_assets")]
    max_assets: usize,

    /// Maximum size of a single staged file in bytes
    #[serde(default = "default_max_file_bytes")]
    max_file_bytes: usize,

    /// Accepted MIME type prefixes (e.g. "image/")
    #[serde(default = "default_accepted_types")]
    accepted_types: Vec<String>,
}

fn default_max_assets() -> usize {
    10
}

fn default_max_file_bytes() -> usize {
    5 * 1024 * 1024 // 5 MiB
}

fn default_accepted_types() -> Vec<String> {
    vec!["image/".to_string()]
}

impl Default for StagingPolicy {
    fn default() -> Self {
        Self {
            max_assets: default_max_assets(),
            max_file_bytes: default_max_file_bytes(),
            accepted_types: default_accepted_types(),
        }
    }
}

impl StagingPolicy {
    /// Start building a policy from the defaults.
    pub fn builder() -> StagingPolicyBuilder {
        StagingPolicyBuilder::default()
    }

    /// Whether the given MIME type is accepted.
    pub fn accepts_type(&self, content_type: &str) -> bool {
        self.accepted_types
            .iter()
            .any(|prefix| content_type.starts_with(prefix.as_str()))
    }

    /// Load a policy from a specific TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[tracing::instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> AtelierResult<Self> {
        tracing::debug!("Loading staging policy from file");

        Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .map_err(|e| {
                AtelierError::from(ConfigError::new(format!(
                    "Failed to read staging policy from {}: {}",
                    path.as_ref().display(),
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                AtelierError::from(ConfigError::new(format!(
                    "Failed to parse staging policy: {}",
                    e
                )))
            })
    }

    /// Load a policy, merging an optional `./atelier.toml` over the
    /// built-in defaults.
    #[tracing::instrument]
    pub fn load() -> AtelierResult<Self> {
        tracing::debug!("Loading staging policy: current dir > built-in defaults");

        Config::builder()
            .add_source(File::with_name("atelier").required(false))
            .build()
            .map_err(|e| {
                AtelierError::from(ConfigError::new(format!(
                    "Failed to build staging policy: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                AtelierError::from(ConfigError::new(format!(
                    "Failed to parse staging policy: {}",
                    e
                )))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_observed_common_case() {
        let policy = StagingPolicy::default();
        assert_eq!(*policy.max_assets(), 10);
        assert_eq!(*policy.max_file_bytes(), 5 * 1024 * 1024);
        assert!(policy.accepts_type("image/png"));
        assert!(!policy.accepts_type("video/mp4"));
    }

    #[test]
    fn setters_override_defaults() {
        let policy = StagingPolicy::default()
            .with_max_assets(12)
            .with_max_file_bytes(20 * 1024 * 1024);
        assert_eq!(*policy.max_assets(), 12);
        assert_eq!(*policy.max_file_bytes(), 20 * 1024 * 1024);
    }

    #[test]
    fn from_file_fills_missing_fields_with_defaults() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        writeln!(file, "max_assets = 12").unwrap();

        let policy = StagingPolicy::from_file(file.path()).unwrap();
        assert_eq!(*policy.max_assets(), 12);
        assert_eq!(*policy.max_file_bytes(), 5 * 1024 * 1024);
    }

    #[test]
    fn from_file_rejects_malformed_toml() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        writeln!(file, "max_assets = [not toml").unwrap();

        assert!(StagingPolicy::from_file(file.path()).is_err());
    }
}
