use axum::{
    Json,
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

use crate::config::ConfigError;

#[derive(Error, Debug)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to build backend client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("Server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("No files received")]
    NoFiles,

    #[error("Unexpected field: {0}")]
    UnexpectedField(String),

    #[error("Malformed upload")]
    MalformedUpload(#[from] MultipartError),

    #[error("Backend connection failed")]
    Backend(#[from] reqwest::Error),

    #[error("Backend connection failed")]
    BackendStatus(reqwest::StatusCode),

    #[error("Backend connection failed")]
    Staging(#[from] std::io::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NoFiles | AppError::UnexpectedField(_) => StatusCode::BAD_REQUEST,
            AppError::MalformedUpload(e) => e.status(),
            AppError::Backend(_) | AppError::BackendStatus(_) | AppError::Staging(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        match &self {
            AppError::Backend(e) => error!("Upload error: {e}"),
            AppError::BackendStatus(code) => error!("Upload error: backend answered {code}"),
            AppError::Staging(e) => error!("Upload error: staging failed: {e}"),
            AppError::MalformedUpload(e) => warn!("Rejected upload: {}", e.body_text()),
            AppError::NoFiles | AppError::UnexpectedField(_) => warn!("Rejected upload: {self}"),
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
