use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Spreadsheet read error: {0}")]
    SpreadsheetError(#[from] calamine::XlsxError),

    #[error("Workbook write error: {0}")]
    WorkbookError(#[from] rust_xlsxwriter::XlsxError),

    #[error("Unsupported input file: {path} (expected .xlsx or .csv)")]
    UnsupportedInputError { path: String },

    #[error("Input error: {message}")]
    InputError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, EtlError>;
