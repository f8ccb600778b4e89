//! Source text ingestion.
//!
//! Plain text is read as is and PDFs are reduced to their text, one page per
//! line group. Images are recognised so they can be rejected with a clear
//! message rather than read as garbage.

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Kind of input file, by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Text,
    Json,
    Pdf,
    Image,
    Unknown,
}

impl SourceKind {
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match ext.as_str() {
            "txt" | "text" | "md" => SourceKind::Text,
            "json" => SourceKind::Json,
            "pdf" => SourceKind::Pdf,
            "png" | "jpg" | "jpeg" | "gif" | "bmp" | "tiff" | "webp" => SourceKind::Image,
            _ => SourceKind::Unknown,
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::Text => write!(f, "text"),
            SourceKind::Json => write!(f, "json"),
            SourceKind::Pdf => write!(f, "pdf"),
            SourceKind::Image => write!(f, "image"),
            SourceKind::Unknown => write!(f, "unknown"),
        }
    }
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("{kind} input is not supported: {path}")]
    Unsupported { kind: SourceKind, path: PathBuf },

    #[error("unsupported file type: {0}")]
    UnknownType(PathBuf),

    #[error("no text found in {0}")]
    Empty(PathBuf),

    #[error("failed to extract text from {path}: {message}")]
    Pdf { path: PathBuf, message: String },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Read the text content of a supported source file.
pub fn load_source_text(path: &Path) -> Result<String, SourceError> {
    let kind = SourceKind::from_path(path);
    let content = match kind {
        SourceKind::Text | SourceKind::Json => {
            std::fs::read_to_string(path).map_err(|source| io_error(path, source))?
        }
        SourceKind::Pdf => extract_pdf_text(path)?,
        SourceKind::Image => {
            return Err(SourceError::Unsupported {
                kind,
                path: path.to_path_buf(),
            })
        }
        SourceKind::Unknown => return Err(SourceError::UnknownType(path.to_path_buf())),
    };

    if content.trim().is_empty() {
        return Err(SourceError::Empty(path.to_path_buf()));
    }

    tracing::debug!(path = %path.display(), %kind, bytes = content.len(), "loaded source text");
    Ok(content)
}

/// Text of every page, pages joined with a newline.
fn extract_pdf_text(path: &Path) -> Result<String, SourceError> {
    let bytes = std::fs::read(path).map_err(|source| io_error(path, source))?;
    let pages =
        pdf_extract::extract_text_from_mem_by_pages(&bytes).map_err(|e| SourceError::Pdf {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    tracing::debug!(path = %path.display(), pages = pages.len(), "extracted pdf text");
    Ok(pages
        .iter()
        .map(|page| page.trim())
        .collect::<Vec<_>>()
        .join("\n"))
}

fn io_error(path: &Path, source: std::io::Error) -> SourceError {
    SourceError::Io {
        path: path.to_path_buf(),
        source,
    }
}
