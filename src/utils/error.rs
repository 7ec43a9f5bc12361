// src/utils/error.rs
#![allow(dead_code)]
use thiserror::Error;

// Define specific error types for different parts of the application
#[derive(Error, Debug, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("No contract month abbreviation for month {0} (expected 1-12)")]
    MonthOutOfRange(u32),

    #[error("Invalid month value: {0}")]
    InvalidMonth(String),

    #[error("Invalid year value: {0}")]
    InvalidYear(String),

    #[error("Invalid trade date: {0}")]
    InvalidTradeDate(String),

    #[error("Invalid quantity: {0}")]
    InvalidQuantity(String),

    #[error("Invalid gross P&L: {0}")]
    InvalidGrossPl(String),
}

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF text extraction failed for {path}: {reason}")]
    PdfExtract { path: String, reason: String },
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Corrupt ledger entry on line {line}: {reason}")]
    CorruptEntry { line: usize, reason: String },

    #[error("Ledger backend error: {0}")]
    Backend(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("No existing items in table '{0}' and --user-id not provided")]
    OwnerUnresolved(String),

    #[error("Document processing failed: {0}")]
    Document(#[from] DocumentError),

    #[error("Record normalization failed in {file}: {source}")]
    Normalize {
        file: String,
        #[source]
        source: NormalizeError,
    },

    #[error("Storage error after {written} successful writes: {source}")]
    Write {
        written: usize,
        #[source]
        source: StorageError,
    },

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}
