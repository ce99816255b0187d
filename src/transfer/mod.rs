//! JSON import and export of the word list

pub mod export;
pub mod import;

use thiserror::Error;

pub use export::{export_file_name, export_json, write_export, ExportedWord};
pub use import::{merge_words, parse_import, read_import_file, ImportedWord, MergeSummary};

#[derive(Error, Debug)]
pub enum TransferError {
    #[error("Invalid format: {0}")]
    InvalidFormat(serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No words to export")]
    NothingToExport,
}

pub type Result<T> = std::result::Result<T, TransferError>;
