//! Hand-off of rendered documents to the user: either opened in a viewer or
//! saved as a download.

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

/// Errors raised by the rendering collaborators. They are never recovered
/// locally and always reach the caller of the action.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PDF rendering failed: {0}")]
    Pdf(String),

    #[error("Spreadsheet rendering failed: {0}")]
    Spreadsheet(#[from] rust_xlsxwriter::XlsxError),

    #[error("Could not write {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not open {path:?} in a viewer: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A document ready to be delivered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedFile {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PresentMode {
    /// Show the document interactively.
    Open,
    /// Deliver the document as a download.
    Save,
}

pub trait Presenter {
    /// Deliver the file and return where it ended up.
    fn present(&self, file: RenderedFile, mode: PresentMode) -> Result<PathBuf, RenderError>;
}

/// Writes every delivered file into `output_dir`. Files presented with
/// [`PresentMode::Open`] are also launched in the system viewer when
/// `open_reports` is set.
pub struct FileDelivery {
    output_dir: PathBuf,
    open_reports: bool,
}

impl FileDelivery {
    pub fn new<P: Into<PathBuf>>(output_dir: P, open_reports: bool) -> Self {
        FileDelivery {
            output_dir: output_dir.into(),
            open_reports,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    fn open_in_viewer(&self, path: &Path) -> Result<(), RenderError> {
        if cfg!(feature = "no_open") {
            warn!("Viewer disabled at build time, {:?} was only saved", path);
            return Ok(());
        }
        open::that(path).map_err(|source| RenderError::Open {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl Presenter for FileDelivery {
    fn present(&self, file: RenderedFile, mode: PresentMode) -> Result<PathBuf, RenderError> {
        std::fs::create_dir_all(&self.output_dir).map_err(|source| RenderError::Write {
            path: self.output_dir.clone(),
            source,
        })?;

        let path = self.output_dir.join(&file.file_name);
        std::fs::write(&path, &file.bytes).map_err(|source| RenderError::Write {
            path: path.clone(),
            source,
        })?;
        info!(
            "Saved {} ({}, {} bytes) to {:?}",
            file.file_name,
            file.mime_type,
            file.bytes.len(),
            path
        );

        if mode == PresentMode::Open && self.open_reports {
            self.open_in_viewer(&path)?;
        }
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str) -> RenderedFile {
        RenderedFile {
            file_name: name.to_string(),
            mime_type: "text/plain".to_string(),
            bytes: b"hello".to_vec(),
        }
    }

    #[test]
    fn saves_into_output_dir_creating_it() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested").join("out");
        let delivery = FileDelivery::new(&out, false);

        let path = delivery.present(file("a.txt"), PresentMode::Save).unwrap();
        assert_eq!(path, out.join("a.txt"));
        assert_eq!(std::fs::read(&path).unwrap(), b"hello");
    }

    #[test]
    fn open_mode_without_viewer_only_saves() {
        let dir = tempfile::tempdir().unwrap();
        let delivery = FileDelivery::new(dir.path(), false);
        let path = delivery.present(file("b.txt"), PresentMode::Open).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn presenting_twice_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let delivery = FileDelivery::new(dir.path(), false);
        delivery.present(file("c.txt"), PresentMode::Save).unwrap();

        let mut second = file("c.txt");
        second.bytes = b"bye".to_vec();
        let path = delivery.present(second, PresentMode::Save).unwrap();
        assert_eq!(std::fs::read(path).unwrap(), b"bye");
    }

    #[test]
    fn unwritable_output_dir_is_a_render_failure() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"x").unwrap();
        let delivery = FileDelivery::new(blocker.join("out"), false);
        let result = delivery.present(file("d.txt"), PresentMode::Save);
        assert!(matches!(result, Err(RenderError::Write { .. })));
    }
}
