use std::path::PathBuf;

use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, MapError>;

/// Error type covering the different failure cases that can occur when the
/// tool reads the input sheets, reshapes them, or writes the map file.
#[derive(Debug, Error)]
pub enum MapError {
    /// Wrapper for IO failures such as reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raised when an input stream is not valid comma-separated UTF-8 text.
    #[error("malformed input in {source_name}: {source}")]
    MalformedInput {
        source_name: String,
        #[source]
        source: csv::Error,
    },

    /// Errors bubbled up from the CSV writer.
    #[error("CSV write error: {0}")]
    CsvWrite(#[from] csv::Error),

    /// Raised when JSON parsing or serialization fails.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Errors bubbled up from the Excel writer implementation.
    #[error("Excel write error: {0}")]
    ExcelWrite(#[from] rust_xlsxwriter::XlsxError),

    /// Errors bubbled up from the Excel reader implementation.
    #[error("Excel read error: {0}")]
    ExcelRead(#[from] calamine::XlsxError),

    /// Raised when a workbook has no worksheet to read from.
    #[error("invalid workbook structure: {0}")]
    InvalidWorkbook(String),

    /// Raised when a required column is absent after header normalisation.
    #[error("missing column '{column}' in {source_name}")]
    MissingColumn { column: String, source_name: String },

    /// Raised when none of the skill, education, or license tables is supplied.
    #[error("no competence data supplied: provide at least one skill, education, or license file")]
    NoInputData,

    /// Raised when a required metadata field is empty.
    #[error("missing metadata value: {0}")]
    MissingMetadata(String),

    /// Raised when the user provides a path that does not exist.
    #[error("input file not found: {0}")]
    MissingInput(PathBuf),

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}
