use crate::config::ConvertConfig;
use crate::error::ConvertError;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Used when no converter path is configured; resolved through `PATH`.
pub const DEFAULT_CONVERTER: &str = "pandoc";

/// Runs the external document converter over an intermediate file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Converter {
    executable: PathBuf,
}

impl Default for Converter {
    fn default() -> Self {
        Converter::new(DEFAULT_CONVERTER)
    }
}

impl Converter {
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Converter {
            executable: executable.into(),
        }
    }

    pub fn from_config(config: &ConvertConfig) -> Self {
        match &config.converter_path {
            Some(path) => Converter::new(path),
            None => Converter::default(),
        }
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    /// `<exe> <src> --from <from> --to <to> --output <dst>`
    pub fn command(&self, from: &str, to: &str, src: &Path, dst: &Path) -> Command {
        let mut command = Command::new(&self.executable);
        command
            .arg(src)
            .args(["--from", from, "--to", to, "--output"])
            .arg(dst);
        command
    }

    /// Converts `src` (in format `from`) to `dst` (in format `to`) and waits
    /// for the converter to finish.
    ///
    /// # Errors
    /// Returns `ConvertError::Spawn` if the converter cannot be started and
    /// `ConvertError::ConversionFailed` if it exits unsuccessfully.
    pub fn execute(&self, from: &str, to: &str, src: &Path, dst: &Path) -> Result<(), ConvertError> {
        let mut command = self.command(from, to, src, dst);
        log::info!("running {command:?}");

        let output = command.output().map_err(|source| {
            log::warn!("could not start {}: {source}", self.executable.display());
            ConvertError::Spawn {
                program: self.executable.display().to_string(),
                source,
            }
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            log::warn!("{} exited with {}", self.executable.display(), output.status);
            return Err(ConvertError::ConversionFailed {
                status: output.status,
                stderr,
            });
        }
        Ok(())
    }
}
