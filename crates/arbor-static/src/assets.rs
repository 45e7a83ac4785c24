//! File-system side effects of a build: writing generated text and
//! copying referenced assets into the output directory.

use std::fs;
use std::path::{Path, PathBuf};

use crate::builder::BuildError;

/// Scoped write and copy primitives.
pub struct AssetWriter;

impl AssetWriter {
    /// Write `content` to `dir/name`, creating `dir` if needed.
    ///
    /// Existing files are overwritten, never appended to.
    pub fn write_text(content: &str, dir: &Path, name: &str) -> Result<PathBuf, BuildError> {
        Self::ensure_dir(dir)?;

        let path = dir.join(name);
        fs::write(&path, content).map_err(|source| BuildError::WriteError {
            path: path.clone(),
            source,
        })?;

        tracing::debug!("Wrote {} ({} bytes)", path.display(), content.len());

        Ok(path)
    }

    /// Copy `source` into `dest_dir`, keeping its base file name.
    pub fn copy_file(source: &Path, dest_dir: &Path) -> Result<PathBuf, BuildError> {
        let Some(file_name) = source.file_name().filter(|_| source.is_file()) else {
            return Err(BuildError::MissingSource {
                path: source.to_path_buf(),
            });
        };

        Self::ensure_dir(dest_dir)?;

        let dest = dest_dir.join(file_name);
        fs::copy(source, &dest).map_err(|e| BuildError::CopyError {
            from: source.to_path_buf(),
            to: dest.clone(),
            source: e,
        })?;

        tracing::debug!("Copied {} to {}", source.display(), dest.display());

        Ok(dest)
    }

    /// Read a UTF-8 source file referenced by the tree.
    pub fn read_text(path: &Path) -> Result<String, BuildError> {
        if !path.is_file() {
            return Err(BuildError::MissingSource {
                path: path.to_path_buf(),
            });
        }

        fs::read_to_string(path).map_err(|source| BuildError::ReadError {
            path: path.to_path_buf(),
            source,
        })
    }

    fn ensure_dir(dir: &Path) -> Result<(), BuildError> {
        if dir.is_dir() {
            return Ok(());
        }

        fs::create_dir_all(dir).map_err(|source| BuildError::WriteError {
            path: dir.to_path_buf(),
            source,
        })
    }
}

/// Base file name of a referenced asset, as it lands in the output directory.
pub(crate) fn output_name(source: &Path) -> String {
    source
        .file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_else(|| source.display().to_string())
}
