//! Writes rendered footprints into a library directory.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::footprint::{FootprintError, FootprintResult, GeometryDocument};
use crate::kicad::{render, EXTENSION};

/// Writes one `.kicad_mod` file per footprint into a directory.
#[derive(Debug, Clone)]
pub struct ModuleWriter {
    dir: PathBuf,
}

impl ModuleWriter {
    /// Creates a writer for `dir`, creating the directory if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`FootprintError::DirectoryCreate`] if the directory cannot be
    /// created.
    pub fn new(dir: impl Into<PathBuf>) -> FootprintResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| FootprintError::directory_create(&dir, e))?;
        debug!(dir = %dir.display(), "Output directory ready");
        Ok(Self { dir })
    }

    /// Output directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path a document will be written to.
    #[must_use]
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.{EXTENSION}"))
    }

    /// Renders and writes a document, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns [`FootprintError::FileWrite`] if the file cannot be written.
    pub fn write(&self, doc: &GeometryDocument) -> FootprintResult<PathBuf> {
        let path = self.path_for(doc.name());
        fs::write(&path, render(doc)).map_err(|e| FootprintError::file_write(&path, e))?;
        info!(path = %path.display(), pads = doc.pads().count(), "Footprint written");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::footprint::{two_pad, TwoPadParams};

    #[test]
    fn creates_nested_directory() {
        let temp = tempfile::tempdir().unwrap();
        let dir = temp.path().join("lib").join("footprints.pretty");
        let writer = ModuleWriter::new(&dir).unwrap();
        assert!(dir.is_dir());
        assert_eq!(writer.dir(), dir.as_path());

        // Idempotent
        assert!(ModuleWriter::new(&dir).is_ok());
    }

    #[test]
    fn writes_named_file() {
        let temp = tempfile::tempdir().unwrap();
        let writer = ModuleWriter::new(temp.path()).unwrap();
        let params = TwoPadParams::new("R_0603", 1.6, 0.8, 0.9, 0.8, 0.8).unwrap();
        let doc = two_pad::generate(&params).unwrap();

        let path = writer.write(&doc).unwrap();
        assert_eq!(path, temp.path().join("R_0603.kicad_mod"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), render(&doc));
    }

    #[test]
    fn directory_over_file_fails() {
        let temp = tempfile::tempdir().unwrap();
        let file = temp.path().join("taken");
        std::fs::write(&file, "x").unwrap();

        let err = ModuleWriter::new(&file).unwrap_err();
        assert!(matches!(err, FootprintError::DirectoryCreate { .. }));
    }
}
