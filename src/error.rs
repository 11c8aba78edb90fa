use reqwest::StatusCode;
use thiserror::Error;

use crate::bundle::Slot;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Row {index} of the {table} table is not a list")]
    MalformedRow { table: &'static str, index: usize },
}

/// Every variant displays as the notification shown to the user.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Please upload all 4 files (2 PDFs + 2 CSVs)")]
    MissingFiles(Vec<Slot>),

    #[error("Upload failed. Backend error.")]
    Rejected(StatusCode),

    #[error("{0}")]
    Backend(String),

    #[error("Unexpected upload error.")]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected upload error.")]
    Decode(#[from] serde_json::Error),

    #[error("Unexpected upload error.")]
    Render(#[from] RenderError),
}
