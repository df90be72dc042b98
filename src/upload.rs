use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::api::ApiClient;
use crate::error::{FaturasError, Result};

/// The only MIME type the backend accepts for invoice uploads.
pub const PDF_MIME: &str = "application/pdf";

/// MIME type implied by the file extension, for the types the upload cares about.
pub fn mime_type(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?;
    ext.eq_ignore_ascii_case("pdf").then_some(PDF_MIME)
}

/// A file queued for upload.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingFile {
    pub path: PathBuf,
    pub name: String,
    pub size: u64,
}

/// Files selected for the next upload. Only PDFs are admitted.
#[derive(Debug, Default)]
pub struct PendingUpload {
    files: Vec<PendingFile>,
}

impl PendingUpload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn files(&self) -> &[PendingFile] {
        &self.files
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Queue `paths`, silently skipping anything that is not a PDF.
    /// Returns how many files were added.
    pub fn add_files<P: AsRef<Path>>(&mut self, paths: &[P]) -> Result<usize> {
        let before = self.files.len();

        for path in paths {
            let path = path.as_ref();
            if mime_type(path) != Some(PDF_MIME) {
                warn!(path = %path.display(), "skipping non-PDF file");
                continue;
            }
            let size = fs::metadata(path)?.len();
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            debug!(%name, size, "queued for upload");
            self.files.push(PendingFile {
                path: path.to_path_buf(),
                name,
                size,
            });
        }

        Ok(self.files.len() - before)
    }

    /// Drop the file at `index` from the queue.
    pub fn remove(&mut self, index: usize) -> Option<PendingFile> {
        (index < self.files.len()).then(|| self.files.remove(index))
    }

    /// Send every queued file in one request. The queue is emptied whether or
    /// not the upload succeeds; nothing is retried.
    pub fn submit(&mut self, api: &ApiClient) -> Result<Vec<PendingFile>> {
        let files = std::mem::take(&mut self.files);
        if files.is_empty() {
            return Err(FaturasError::NoPdfFiles);
        }

        match api.upload_invoice_files(&files) {
            Ok(()) => Ok(files),
            Err(e) => {
                warn!(error = %e, files = files.len(), "upload failed");
                Err(e)
            }
        }
    }
}
