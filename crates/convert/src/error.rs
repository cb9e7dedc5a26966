use std::path::PathBuf;
use tabella_pdf::PdfError;
use tabella_sheet::SheetError;
use thiserror::Error;

/// Errors a whole conversion can fail with.
///
/// The Normalizer never contributes here: malformed tables degrade to
/// placeholders rather than failing the conversion.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("input file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("invalid input file: {}", .0.display())]
    InvalidFormat(PathBuf),

    #[error("extraction failed: {0}")]
    Extraction(#[source] PdfError),

    #[error("failed to write workbook: {0}")]
    Write(#[from] SheetError),
}

impl ConvertError {
    /// True for failures caused by the caller's input rather than the
    /// conversion itself. Drives 4xx vs 5xx at the HTTP boundary.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ConvertError::NotFound(_) | ConvertError::InvalidFormat(_)
        )
    }
}

impl From<PdfError> for ConvertError {
    fn from(e: PdfError) -> Self {
        match e {
            PdfError::NotFound(path) => ConvertError::NotFound(path),
            PdfError::InvalidFormat(path) => ConvertError::InvalidFormat(path),
            other => ConvertError::Extraction(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;
