//! Bridge configuration, loadable from TOML or RON.
//!
//! ```toml
//! tie_break = "first-registered"
//!
//! [globals]
//! expose_subsystems = true
//! graphics = "graphics"
//! renderer = "renderer"
//! ```

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use scriptbridge_registry::TieBreak;

/// Configuration file support, keyed on the file extension.
pub trait Config: Serialize + DeserializeOwned + Default {
    /// Load from a `.toml` or `.ron` file.
    fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let extension = path.extension().and_then(|e| e.to_str());
        if !matches!(extension, Some("toml" | "ron")) {
            return Err(ConfigError::UnsupportedFormat(path.display().to_string()));
        }
        let contents = std::fs::read_to_string(path)?;
        if extension == Some("toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        }
    }

    /// Save to a `.toml` or `.ron` file.
    fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => {
                toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
            }
            Some("ron") => ron::ser::to_string_pretty(self, Default::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?,
            _ => return Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        };
        std::fs::write(path, contents)?;
        Ok(())
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Names under which the subsystem singletons are exposed as globals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalsConfig {
    /// Set the `graphics` and `renderer` globals at all
    pub expose_subsystems: bool,
    /// Global name of the graphics subsystem
    pub graphics: String,
    /// Global name of the renderer subsystem
    pub renderer: String,
}

impl Default for GlobalsConfig {
    fn default() -> Self {
        Self {
            expose_subsystems: true,
            graphics: String::from("graphics"),
            renderer: String::from("renderer"),
        }
    }
}

/// Runtime configuration for a [`ScriptState`](crate::ScriptState).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// What happens when several overloads accept a call
    pub tie_break: TieBreak,
    /// Subsystem globals
    pub globals: GlobalsConfig,
}

impl BridgeConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        toml::from_str(source).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        ron::from_str(source).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}

impl Config for BridgeConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_gives_defaults() {
        let config = BridgeConfig::from_toml_str("").unwrap();
        assert_eq!(config, BridgeConfig::default());
        assert_eq!(config.tie_break, TieBreak::FirstRegistered);
        assert!(config.globals.expose_subsystems);
    }

    #[test]
    fn tie_break_is_kebab_case() {
        let config = BridgeConfig::from_toml_str("tie_break = \"reject\"").unwrap();
        assert_eq!(config.tie_break, TieBreak::Reject);
        assert!(BridgeConfig::from_toml_str("tie_break = \"Reject\"").is_err());
    }

    #[test]
    fn partial_globals_keep_other_defaults() {
        let config = BridgeConfig::from_toml_str("[globals]\nrenderer = \"gfx\"").unwrap();
        assert_eq!(config.globals.renderer, "gfx");
        assert_eq!(config.globals.graphics, "graphics");
    }

    #[test]
    fn unknown_extension_is_rejected() {
        assert!(matches!(
            BridgeConfig::load("bridge.yaml"),
            Err(ConfigError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            BridgeConfig::load("does-not-exist.toml"),
            Err(ConfigError::Io(_))
        ));
    }
}
