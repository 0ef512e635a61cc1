use crate::config::SessionConfig;
use crate::error::ConvertError;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use uuid::Uuid;

#[derive(Debug)]
enum SessionDir {
    Temporary(TempDir),
    Kept(PathBuf),
}

/// A working directory for one conversion. Intermediate files are written
/// here before the converter runs.
///
/// With `clean_session_dir` set the directory is removed on [`Session::close`]
/// or when the session is dropped; otherwise it stays on disk for inspection.
#[derive(Debug)]
pub struct Session {
    id: String,
    dir: SessionDir,
}

impl Session {
    /// # Errors
    /// Returns `ConvertError::Io` if the base or session directory cannot be
    /// created.
    pub fn open(config: &SessionConfig) -> Result<Self, ConvertError> {
        let id = Uuid::new_v4().simple().to_string();
        let base = config.base_dir.clone().unwrap_or_else(std::env::temp_dir);
        fs::create_dir_all(&base).map_err(|source| ConvertError::Io {
            path: base.clone(),
            source,
        })?;

        let temp = tempfile::Builder::new()
            .prefix(&format!("quill-{id}-"))
            .tempdir_in(&base)
            .map_err(|source| ConvertError::Io {
                path: base.clone(),
                source,
            })?;

        let dir = if config.clean_session_dir {
            SessionDir::Temporary(temp)
        } else {
            SessionDir::Kept(temp.keep())
        };
        let session = Session { id, dir };
        log::debug!("opened session {} in {}", session.id, session.path().display());
        Ok(session)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn path(&self) -> &Path {
        match &self.dir {
            SessionDir::Temporary(dir) => dir.path(),
            SessionDir::Kept(path) => path,
        }
    }

    /// Writes `contents` to `<session dir>/<id>.<extension>` and returns the path.
    ///
    /// # Errors
    /// Returns `ConvertError::Io` if the file cannot be written.
    pub fn write_intermediate(&self, contents: &str, extension: &str) -> Result<PathBuf, ConvertError> {
        let path = self.path().join(format!("{}.{extension}", self.id));
        fs::write(&path, contents).map_err(|source| ConvertError::Io {
            path: path.clone(),
            source,
        })?;
        log::trace!("wrote {} bytes to {}", contents.len(), path.display());
        Ok(path)
    }

    /// Ends the session, removing its directory unless it is kept.
    ///
    /// # Errors
    /// Returns `ConvertError::Io` if the directory cannot be removed.
    pub fn close(self) -> Result<(), ConvertError> {
        match self.dir {
            SessionDir::Temporary(dir) => {
                let path = dir.path().to_path_buf();
                dir.close()
                    .map_err(|source| ConvertError::Io { path, source })
            }
            SessionDir::Kept(path) => {
                log::info!("keeping session directory {}", path.display());
                Ok(())
            }
        }
    }
}
