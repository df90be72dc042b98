use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FaturasError {
    #[error("Config directory not found at {0}. Run 'faturas init' to create it.")]
    ConfigNotFound(PathBuf),

    #[error("Config file not found: {0}")]
    ConfigFileNotFound(PathBuf),

    #[error("Failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to write state file: {0}")]
    StateWrite(#[from] toml::ser::Error),

    #[error("Config directory already exists at {0}")]
    AlreadyInitialized(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: ureq::Error,
    },

    #[error("Request to {url} failed: {source}")]
    Upload {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Invalid response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode record: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Invalid page size '{0}'. Use 5, 10, 20 or 50.")]
    InvalidPageSize(String),

    #[error("Invalid sort key '{0}'. Use clientNumber, month, year, electricEnergyR, energySCEER or publicLightingR.")]
    InvalidSortKey(String),

    #[error("Invalid sort direction '{0}'. Use 'asc' or 'desc'.")]
    InvalidSortDirection(String),

    #[error("Invalid year '{0}'. Use a year like 2024 or 'all'.")]
    InvalidYear(String),

    #[error("Page {page} is out of range (1-{total_pages})")]
    PageOutOfRange { page: u32, total_pages: u32 },

    #[error("Invoice '{0}' not found")]
    InvoiceNotFound(String),

    #[error("No row selected. Use 'faturas list --select <id>' first.")]
    NoSelection,

    #[error("No PDF files to upload. Only application/pdf files are accepted.")]
    NoPdfFiles,
}

pub type Result<T> = std::result::Result<T, FaturasError>;
