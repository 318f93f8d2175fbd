// Error types for the tag subsystem

use std::path::PathBuf;

use thiserror::Error;

use crate::format::TagFormat;

#[derive(Error, Debug)]
pub enum TagError {
    /// The path does not exist or is not a regular file.
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Magic mismatch, wrong fixed size or a malformed atom.
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A write was requested for a format that has no writer.
    #[error("Unsupported tag format for writing: {0}")]
    Unsupported(TagFormat),
}

pub type Result<T> = std::result::Result<T, TagError>;
