//! Render configuration: which template files make up a page, in paint order.
//!
//! The configuration file carries one section per environment:
//!
//! ```json
//! {
//!   "DEV":  { "layers": [{ "kind": "graphic", "path": "frame.json" }] },
//!   "PROD": { "layers": [...], "reference": { "prefix": "RF", "check_suffix": "2715" } }
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::ConfigError;
use super::content::ContentKind;
use crate::reference::ReferenceScheme;

/// Environment variable selecting the configuration section.
pub const ENV_VAR: &str = "ENV";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Dev,
    Prod,
}

impl Environment {
    /// `Prod` when `ENV=PROD`, `Dev` otherwise.
    pub fn from_env() -> Self {
        Self::from_value(std::env::var(ENV_VAR).ok().as_deref())
    }

    /// `Prod` for exactly `"PROD"`; unset or any other value is `Dev`.
    pub fn from_value(value: Option<&str>) -> Self {
        match value {
            Some("PROD") => Self::Prod,
            _ => Self::Dev,
        }
    }

    pub fn section(&self) -> &'static str {
        match self {
            Self::Dev => "DEV",
            Self::Prod => "PROD",
        }
    }
}

/// One template file and the kind of content it holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layer {
    pub kind: ContentKind,
    pub path: PathBuf,
}

/// Everything needed to lay out invoices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Painted first to last.
    pub layers: Vec<Layer>,
    #[serde(default)]
    pub reference: ReferenceScheme,
}

#[derive(Deserialize)]
struct ConfigFile {
    #[serde(rename = "DEV")]
    dev: Option<RenderConfig>,
    #[serde(rename = "PROD")]
    prod: Option<RenderConfig>,
}

impl RenderConfig {
    /// Load the section for the environment named by `ENV`.
    pub fn from_env_file(path: &Path) -> Result<Self, ConfigError> {
        Self::load(path, Environment::from_env())
    }

    /// Load the section for `env`. Relative layer paths are resolved
    /// against the configuration file's directory.
    pub fn load(path: &Path, env: Environment) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let file: ConfigFile = serde_json::from_str(&json).map_err(|source| {
            ConfigError::Malformed {
                path: path.to_path_buf(),
                source,
            }
        })?;
        let section = match env {
            Environment::Dev => file.dev,
            Environment::Prod => file.prod,
        };
        let mut config = section.ok_or_else(|| ConfigError::Environment {
            name: env.section().to_string(),
        })?;
        if let Some(base) = path.parent() {
            config.resolve_paths(base);
        }
        log::debug!(
            "{} configuration from {}: {} layer(s)",
            env.section(),
            path.display(),
            config.layers.len()
        );
        Ok(config)
    }

    /// Prefix every relative layer path with `base`.
    pub fn resolve_paths(&mut self, base: &Path) {
        for layer in &mut self.layers {
            if layer.path.is_relative() {
                layer.path = base.join(&layer.path);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_names() {
        assert_eq!(Environment::Dev.section(), "DEV");
        assert_eq!(Environment::Prod.section(), "PROD");
    }

    #[test]
    fn env_value_selects_section() {
        assert_eq!(Environment::from_value(Some("PROD")), Environment::Prod);
        assert_eq!(Environment::from_value(Some("DEV")), Environment::Dev);
        assert_eq!(Environment::from_value(Some("prod")), Environment::Dev);
        assert_eq!(Environment::from_value(Some("")), Environment::Dev);
        assert_eq!(Environment::from_value(None), Environment::Dev);
    }

    #[test]
    fn reference_scheme_defaults() {
        let config: RenderConfig =
            serde_json::from_str(r#"{"layers": [{"kind": "text", "path": "a.json"}]}"#).unwrap();
        assert_eq!(config.reference, ReferenceScheme::default());
        assert_eq!(config.layers[0].kind, ContentKind::Text);
    }

    #[test]
    fn relative_paths_resolve() {
        let mut config = RenderConfig {
            layers: vec![
                Layer { kind: ContentKind::Text, path: "a.json".into() },
                Layer { kind: ContentKind::Graphic, path: "/abs/b.json".into() },
            ],
            reference: ReferenceScheme::default(),
        };
        config.resolve_paths(Path::new("/etc/facture"));
        assert_eq!(config.layers[0].path, PathBuf::from("/etc/facture/a.json"));
        assert_eq!(config.layers[1].path, PathBuf::from("/abs/b.json"));
    }
}
