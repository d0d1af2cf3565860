use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("output directory {path:?} unusable: {reason}")]
    OutputDir { path: PathBuf, reason: String },
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

impl PersistError {
    fn output_dir(path: &Path, reason: impl ToString) -> Self {
        Self::OutputDir {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }
}

/// Check that `dir` is an existing directory, creating it first when `create` is set.
pub fn ensure_output_dir(dir: &Path, create: bool) -> Result<(), PersistError> {
    match fs::metadata(dir) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(PersistError::output_dir(dir, "path is not a directory")),
        Err(err) if err.kind() == io::ErrorKind::NotFound && create => {
            fs::create_dir_all(dir).map_err(|e| PersistError::output_dir(dir, e))
        }
        Err(err) => Err(PersistError::output_dir(dir, err)),
    }
}

/// Replaces a single file atomically: content goes to a temp file next to
/// the target, which is then renamed over it.
#[derive(Debug, Clone)]
pub struct AtomicFileWriter {
    target: PathBuf,
    create_dirs: bool,
}

impl AtomicFileWriter {
    pub fn new(target: impl Into<PathBuf>) -> Self {
        Self {
            target: target.into(),
            create_dirs: false,
        }
    }

    pub fn create_dirs(mut self, create: bool) -> Self {
        self.create_dirs = create;
        self
    }

    pub fn write(&self, content: &[u8]) -> Result<u64, PersistError> {
        let dir = match self.target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        ensure_output_dir(dir, self.create_dirs)?;

        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| PersistError::output_dir(dir, e))?;
        tmp.write_all(content)?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;
        tmp.persist(&self.target).map_err(|e| PersistError::Io(e.error))?;
        Ok(content.len() as u64)
    }
}
