//! Configuration management for personfinder.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults. It
//! stands in for the per-repository settings the binder and record filter
//! consume: the default schema version, the referrer allow-list and any
//! extra sensitive fields.

use std::path::PathBuf;
use std::sync::OnceLock;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::records::{NOTE_RECORD_ID, PERSON_RECORD_ID};
use crate::validators::SchemaVersion;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default configuration directory name.
const CONFIG_DIR_NAME: &str = "personfinder";

/// Environment variable prefix.
const ENV_PREFIX: &str = "PERSONFINDER_";

/// Shape of a configurable sensitive field name.
const FIELD_NAME_PATTERN: &str = r"^[a-z0-9_]+$";

fn field_name_regex() -> &'static Regex {
    static FIELD_NAME: OnceLock<Regex> = OnceLock::new();
    FIELD_NAME.get_or_init(|| Regex::new(FIELD_NAME_PATTERN).expect("field name pattern is valid"))
}

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `PERSONFINDER_`, sections split on `__`)
/// 2. TOML config file at `~/.config/personfinder/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Request parameter configuration.
    pub params: ParamsConfig,
    /// Privacy configuration.
    pub privacy: PrivacyConfig,
}

/// Request parameter configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParamsConfig {
    /// Schema version selected when a request leaves `version` empty.
    pub default_schema_version: SchemaVersion,
    /// Referrers accepted in the `referrer` parameter.
    /// Anything else binds as empty.
    pub referrer_allow_list: Vec<String>,
}

/// Privacy-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrivacyConfig {
    /// Field names redacted in addition to the built-in sensitive fields.
    pub extra_sensitive_fields: Vec<String>,
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// A missing file is not an error; defaults apply.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading, parsing or validation fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        for referrer in &self.params.referrer_allow_list {
            if referrer.trim().is_empty() {
                return Err(Error::ConfigValidation {
                    message: "referrer_allow_list entries must not be empty".to_string(),
                });
            }
        }

        for field in &self.privacy.extra_sensitive_fields {
            if !field_name_regex().is_match(field) {
                return Err(Error::ConfigValidation {
                    message: format!("invalid sensitive field name: {field:?}"),
                });
            }
            if field == PERSON_RECORD_ID || field == NOTE_RECORD_ID {
                return Err(Error::ConfigValidation {
                    message: format!("record identifier {field} cannot be redacted"),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.params.default_schema_version, SchemaVersion::V1_4);
        assert!(config.params.referrer_allow_list.is_empty());
        assert!(config.privacy.extra_sensitive_fields.is_empty());
    }

    #[test]
    fn test_validate_valid_config() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_referrer() {
        let mut config = Config::default();
        config.params.referrer_allow_list = vec!["a.org".to_string(), "  ".to_string()];

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("referrer_allow_list"));
    }

    #[test]
    fn test_validate_bad_sensitive_field() {
        let mut config = Config::default();
        config.privacy.extra_sensitive_fields = vec!["Home Address".to_string()];

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("invalid sensitive field name"));
    }

    #[test]
    fn test_validate_sensitive_field_shapes() {
        let mut config = Config::default();
        for good in ["home_street", "phone2", "_"] {
            config.privacy.extra_sensitive_fields = vec![good.to_string()];
            assert!(config.validate().is_ok(), "{good} should be accepted");
        }
        for bad in ["", "Home", "home-street", "home_street\n", "stra\u{df}e"] {
            config.privacy.extra_sensitive_fields = vec![bad.to_string()];
            assert!(config.validate().is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn test_validate_record_id_not_redactable() {
        let mut config = Config::default();
        config.privacy.extra_sensitive_fields = vec!["person_record_id".to_string()];

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("cannot be redacted"));
    }

    #[test]
    fn test_default_config_path() {
        let path = Config::default_config_path();
        assert!(path.to_string_lossy().contains("personfinder"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }

    #[test]
    fn test_load_nonexistent_config() {
        // Runs jailed so environment overrides from other tests never leak in.
        figment::Jail::expect_with(|_jail| {
            let result = Config::load_from(Some(PathBuf::from("/nonexistent/config.toml")));
            assert!(result.is_ok());
            assert_eq!(result.unwrap(), Config::default());
            Ok(())
        });
    }

    #[test]
    fn test_load_from_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[params]
default_schema_version = "1.2"
referrer_allow_list = ["a.org", "b.org"]

[privacy]
extra_sensitive_fields = ["home_street"]
"#
        )
        .unwrap();

        figment::Jail::expect_with(|_jail| {
            let config = Config::load_from(Some(file.path().to_path_buf())).unwrap();
            assert_eq!(config.params.default_schema_version, SchemaVersion::V1_2);
            assert_eq!(config.params.referrer_allow_list, vec!["a.org", "b.org"]);
            assert_eq!(config.privacy.extra_sensitive_fields, vec!["home_street"]);
            Ok(())
        });
    }

    #[test]
    fn test_load_rejects_unknown_version() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[params]\ndefault_schema_version = \"1.0\"").unwrap();

        figment::Jail::expect_with(|_jail| {
            let result = Config::load_from(Some(file.path().to_path_buf()));
            assert!(matches!(result, Err(Error::ConfigLoad(_))));
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_schema_version() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("PERSONFINDER_PARAMS__DEFAULT_SCHEMA_VERSION", "1.2");
            let config = Config::load_from(Some(PathBuf::from("missing.toml")))
                .map_err(|e| e.to_string())?;
            assert_eq!(config.params.default_schema_version, SchemaVersion::V1_2);
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_toml_schema_version() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("config.toml", "[params]\ndefault_schema_version = \"1.1\"")?;
            jail.set_env("PERSONFINDER_PARAMS__DEFAULT_SCHEMA_VERSION", "1.3");
            let config = Config::load_from(Some(PathBuf::from("config.toml")))
                .map_err(|e| e.to_string())?;
            assert_eq!(config.params.default_schema_version, SchemaVersion::V1_3);
            Ok(())
        });
    }

    #[test]
    fn test_env_rejects_unknown_schema_version() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("PERSONFINDER_PARAMS__DEFAULT_SCHEMA_VERSION", "1.0");
            let result = Config::load_from(Some(PathBuf::from("missing.toml")));
            assert!(matches!(result, Err(Error::ConfigLoad(_))));
            Ok(())
        });
    }

    #[test]
    fn test_config_serialize() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("default_schema_version"));
        assert!(json.contains("\"1.4\""));
    }

    #[test]
    fn test_config_clone() {
        let config = Config::default();
        let cloned = config.clone();
        assert_eq!(config, cloned);
    }
}
