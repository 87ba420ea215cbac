//! Calculator documents: the unit that gets saved.
//!
//! A document is the calculator's id and title plus its ordered field list.
//! Order in `fields` is the persisted sort order.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::debug;
use ulid::Ulid;

use quotecraft_fields::FieldConfig;

use crate::error::{EditorError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatorDocument {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub fields: Vec<FieldConfig>,
}

impl CalculatorDocument {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            fields: Vec::new(),
        }
    }

    pub fn with_fields(mut self, fields: Vec<FieldConfig>) -> Self {
        self.fields = fields;
        self
    }

    pub fn to_text(&self, format: DocumentFormat) -> Result<String> {
        Ok(match format {
            DocumentFormat::Yaml => serde_yaml_ng::to_string(self)?,
            DocumentFormat::Json => serde_json::to_string_pretty(self)?,
        })
    }

    pub fn from_text(text: &str, format: DocumentFormat) -> Result<Self> {
        Ok(match format {
            DocumentFormat::Yaml => serde_yaml_ng::from_str(text)?,
            DocumentFormat::Json => serde_json::from_str(text)?,
        })
    }

    /// Read a document, picking the format from the file extension.
    pub async fn load(path: &Path) -> Result<Self> {
        let format = DocumentFormat::from_path(path)?;
        let text = fs::read_to_string(path).await?;
        let doc = Self::from_text(&text, format)?;
        debug!(path = %path.display(), fields = doc.fields.len(), "loaded calculator document");
        Ok(doc)
    }

    /// Write a document atomically in `format`.
    pub async fn save(&self, path: &Path, format: DocumentFormat) -> Result<()> {
        let text = self.to_text(format)?;
        atomic_write(path, text.as_bytes()).await?;
        debug!(path = %path.display(), fields = self.fields.len(), "saved calculator document");
        Ok(())
    }
}

/// On-disk encoding of a calculator document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    #[default]
    Yaml,
    Json,
}

impl DocumentFormat {
    /// Format implied by the file extension (`.yaml`, `.yml`, `.json`).
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Ok(Self::Yaml),
            Some("json") => Ok(Self::Json),
            _ => Err(EditorError::unsupported_format(path)),
        }
    }
}

/// Write to a uniquely named temp file in the target's directory, then
/// rename over the target. Concurrent writers never share a temp file.
pub(crate) async fn atomic_write(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    fs::create_dir_all(dir).await?;
    let tmp = dir.join(format!(".tmp_{}", Ulid::new()));
    fs::write(&tmp, bytes).await?;
    if let Err(e) = fs::rename(&tmp, path).await {
        let _ = fs::remove_file(&tmp).await;
        return Err(e.into());
    }
    Ok(())
}
