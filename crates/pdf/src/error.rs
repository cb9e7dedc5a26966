use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("PDF file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("not a PDF file: {}", .0.display())]
    InvalidFormat(PathBuf),

    #[error("Failed to parse PDF: {0}")]
    Parse(String),

    #[error("PDF extraction error: {0}")]
    Extraction(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PdfError>;
