//! # Analysis Backend
//!
//! The relay never looks inside the reports or CSVs. The analysis backend
//! does the actual work and answers with JSON.
//!
//!
//!
//! ## Proxy
//! The browser could post straight to the analysis backend. Instead the page
//! talks to this server which forwards the same four fields and hands the
//! backend's answer back untouched.
//!
//! - One attempt per upload, no retry
//! - Backend body is returned byte-for-byte on 2xx
//! - Anything else (refused connection, timeout, non-2xx) is reported to the
//!   browser as a generic backend failure, details stay in the logs
//!
//!
//!
//! ## Commands
//!
//! Poke the relay by hand.
//! ```sh
//! curl -F pre_report=@pre.pdf -F post_report=@post.pdf \
//!      -F pre_csv=@pre.csv -F post_csv=@post.csv http://localhost:3000/upload
//! ```
use axum::body::Bytes;
use reqwest::{
    Client,
    multipart::{Form, Part},
};
use tokio::fs::File;

use crate::{error::AppError, upload::StagedUpload};

pub async fn build_form(upload: &StagedUpload) -> Result<Form, AppError> {
    let mut form = Form::new();

    for staged in upload.files() {
        let file = File::open(&staged.path).await?;
        let mut part = Part::stream_with_length(file, staged.len).file_name(staged.file_name.clone());

        if let Some(content_type) = &staged.content_type {
            part = part.mime_str(content_type)?;
        }

        form = form.part(staged.field, part);
    }

    Ok(form)
}

pub async fn forward(client: &Client, url: &str, upload: &StagedUpload) -> Result<Bytes, AppError> {
    let form = build_form(upload).await?;

    let response = client.post(url).multipart(form).send().await?;
    let status = response.status();

    if !status.is_success() {
        return Err(AppError::BackendStatus(status));
    }

    Ok(response.bytes().await?)
}
