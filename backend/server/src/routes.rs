use std::sync::Arc;

use axum::{
    extract::{Multipart, State, multipart::MultipartRejection},
    http::header::CONTENT_TYPE,
    response::IntoResponse,
};
use tracing::{info, warn};

use crate::{error::AppError, relay::forward, state::AppState, upload::stage_upload};

pub async fn upload_handler(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, AppError> {
    let multipart = multipart.map_err(|e| {
        warn!("Upload is not multipart: {e}");
        AppError::NoFiles
    })?;

    let upload = stage_upload(multipart, &state.config.upload_dir).await?;
    info!("Files received: {:?}", upload.field_names());

    let body = forward(&state.client, &state.config.backend_url, &upload).await?;
    info!("Backend answered with {} bytes", body.len());

    Ok(([(CONTENT_TYPE, "application/json")], body))
}
