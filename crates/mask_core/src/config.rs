//! Mask configuration loaded from TOML.
//!
//! ```toml
//! default = "us_phone_dotted"
//!
//! [[mask]]
//! name = "us_phone_dotted"
//! pattern = "###.###.####"
//! ```
//!
//! The built-in `us_phone` mask is always available and cannot be
//! redefined.

use crate::template::{MaskTemplate, MaskTemplateError};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;

/// Name of the built-in `(XXX) XXX-XXXX` mask.
pub const US_PHONE: &str = "us_phone";

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct MaskConfig {
    /// Mask used when a field does not name one.
    #[serde(default)]
    pub default: Option<String>,
    #[serde(default, rename = "mask")]
    pub masks: Vec<MaskEntry>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct MaskEntry {
    pub name: String,
    pub pattern: String,
}

#[derive(Debug)]
pub enum ConfigError {
    Parse(toml::de::Error),
    Template {
        name: String,
        source: MaskTemplateError,
    },
    Duplicate {
        name: String,
    },
    UnknownDefault {
        name: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(err) => write!(f, "invalid mask config: {err}"),
            ConfigError::Template { name, source } => {
                write!(f, "mask '{name}': {source}")
            }
            ConfigError::Duplicate { name } => write!(f, "mask '{name}' is defined twice"),
            ConfigError::UnknownDefault { name } => {
                write!(f, "default mask '{name}' is not defined")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Parse(err) => Some(err),
            ConfigError::Template { source, .. } => Some(source),
            ConfigError::Duplicate { .. } | ConfigError::UnknownDefault { .. } => None,
        }
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Parse(err)
    }
}

/// Named mask templates with a default.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MaskRegistry {
    masks: BTreeMap<String, MaskTemplate>,
    default: String,
}

impl Default for MaskRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl MaskRegistry {
    /// Only the built-in `us_phone` mask.
    pub fn builtin() -> Self {
        let mut masks = BTreeMap::new();
        masks.insert(US_PHONE.to_string(), MaskTemplate::us_phone());
        Self {
            masks,
            default: US_PHONE.to_string(),
        }
    }

    /// # Errors
    ///
    /// Fails on a malformed pattern, a name defined twice (including
    /// `us_phone`), or a default that names no mask.
    pub fn from_config(config: &MaskConfig) -> Result<Self, ConfigError> {
        let mut registry = Self::builtin();
        for entry in &config.masks {
            if registry.masks.contains_key(&entry.name) {
                return Err(ConfigError::Duplicate {
                    name: entry.name.clone(),
                });
            }
            let template =
                MaskTemplate::from_pattern(&entry.pattern).map_err(|source| {
                    ConfigError::Template {
                        name: entry.name.clone(),
                        source,
                    }
                })?;
            log::debug!(
                target: "mask.config",
                "mask '{}': {} slots",
                entry.name,
                template.slot_count()
            );
            registry.masks.insert(entry.name.clone(), template);
        }

        if let Some(name) = &config.default {
            if !registry.masks.contains_key(name) {
                return Err(ConfigError::UnknownDefault { name: name.clone() });
            }
            registry.default = name.clone();
        }
        Ok(registry)
    }

    /// # Errors
    ///
    /// See [`MaskRegistry::from_config`]; TOML syntax errors are reported as
    /// [`ConfigError::Parse`].
    pub fn from_toml_str(src: &str) -> Result<Self, ConfigError> {
        let config: MaskConfig = toml::from_str(src)?;
        Self::from_config(&config)
    }

    pub fn get(&self, name: &str) -> Option<&MaskTemplate> {
        self.masks.get(name)
    }

    pub fn default_name(&self) -> &str {
        &self.default
    }

    pub fn default_mask(&self) -> &MaskTemplate {
        // `default` always names an inserted mask.
        &self.masks[&self.default]
    }

    /// Mask names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.masks.keys().map(String::as_str)
    }
}
