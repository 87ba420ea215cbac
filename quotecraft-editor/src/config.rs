//! Editor configuration, loaded with Figment.
//!
//! Sources, later overriding earlier:
//! 1. Built-in defaults
//! 2. An optional configuration file (`.yaml`/`.yml`, `.toml`, `.json`)
//! 3. Environment variables prefixed `QUOTECRAFT_`; nested keys use `__`
//!    (`QUOTECRAFT_KIND_LABELS__TEXT="Short Answer"`)

use std::path::Path;

use figment::{
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use quotecraft_fields::KindLabels;

use crate::document::DocumentFormat;
use crate::error::{EditorError, Result};

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "QUOTECRAFT_";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Labels new fields start with, per kind. Unnamed kinds keep their defaults.
    pub kind_labels: KindLabels,
    /// Queue a snapshot for the save sink after every committed change.
    pub autosave: bool,
    /// Encoding used when a document path does not dictate one.
    pub document_format: DocumentFormat,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            kind_labels: KindLabels::default(),
            autosave: true,
            document_format: DocumentFormat::Yaml,
        }
    }
}

impl EditorConfig {
    /// Load configuration from defaults, `file` (if given) and the environment.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let config: EditorConfig = Self::figment(file)?.extract()?;
        debug!(
            autosave = config.autosave,
            format = ?config.document_format,
            "editor configuration loaded"
        );
        Ok(config)
    }

    /// The layered figment behind [`EditorConfig::load`].
    pub fn figment(file: Option<&Path>) -> Result<Figment> {
        let mut figment = Figment::from(Serialized::defaults(EditorConfig::default()));
        if let Some(path) = file {
            figment = figment.merge(file_provider(path)?);
        }
        Ok(figment.merge(Env::prefixed(ENV_PREFIX).split("__")))
    }
}

fn file_provider(path: &Path) -> Result<Figment> {
    if !path.exists() {
        return Err(EditorError::ConfigNotFound {
            path: path.to_path_buf(),
        });
    }
    match path.extension().and_then(|e| e.to_str()) {
        Some("yaml") | Some("yml") => Ok(Figment::from(Yaml::file(path))),
        Some("toml") => Ok(Figment::from(Toml::file(path))),
        Some("json") => Ok(Figment::from(Json::file(path))),
        _ => Err(EditorError::unsupported_format(path)),
    }
}
