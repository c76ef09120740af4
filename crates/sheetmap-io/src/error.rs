use thiserror::Error;

use sheetmap_model::DocumentError;

/// Codec and file-level failures. Fatal and never retried here — retry
/// policy, if any, belongs to the caller.
#[derive(Debug, Error)]
pub enum IoError {
    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "json")]
    #[error("JSON codec failure: {0}")]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "umya")]
    #[error("XLSX codec failure: {0}")]
    Xlsx(#[from] umya_spreadsheet::XlsxError),

    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error("corrupt document payload: {0}")]
    Corrupt(String),
}
