use crate::error::ConfigError;
use crate::formatter::Dialect;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// The format the user asks for. The converter may be asked for a different
/// one (see [`OutputFormat::converter_target`]) that is post-processed later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Pdf,
    Html,
}

impl OutputFormat {
    #[must_use]
    pub fn converter_target(self) -> &'static str {
        match self {
            OutputFormat::Html => "html",
            OutputFormat::Pdf => "latex",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Remove the session directory when the session ends.
    pub clean_session_dir: bool,
    /// Where session directories are created. Defaults to the system temp dir.
    pub base_dir: Option<PathBuf>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            clean_session_dir: true,
            base_dir: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    /// Converter executable; `pandoc` from `PATH` when unset.
    pub converter_path: Option<PathBuf>,
    pub output_format: OutputFormat,
    pub dialect: Dialect,
    pub session: SessionConfig,
}

impl ConvertConfig {
    /// # Errors
    /// Returns `ConfigError::Yaml` if the document does not describe a config.
    pub fn from_yaml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(source)?)
    }

    /// # Errors
    /// Returns `ConfigError::Json` if the document does not describe a config.
    pub fn from_json_str(source: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(source)?)
    }
}
