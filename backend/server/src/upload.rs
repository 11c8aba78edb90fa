//! # Upload Staging
//!
//! Incoming multipart bodies are written to disk before being relayed.
//!
//! ## Lifecycle
//! - Each request gets its own directory under the configured upload root
//! - One file per accepted field, named after the field
//! - The directory is owned by [`StagedUpload`] and removed when it drops,
//!   whether the relay succeeded, the backend failed, or staging bailed early
//!
//! ## Accepted Fields
//! - `pre_report`, `post_report`, `pre_csv`, `post_csv`
//! - At most one file each
//! - Parts without a filename are plain form values and are skipped
//! - An empty filename is an unfilled file input and is skipped too
use std::path::{Path, PathBuf};

use axum::extract::Multipart;
use tempfile::{Builder, TempDir};
use tokio::{fs::File, io::AsyncWriteExt};

use crate::error::AppError;

pub const UPLOAD_FIELDS: [&str; 4] = ["pre_report", "post_report", "pre_csv", "post_csv"];

const DIR_PREFIX: &str = "gait-upload-";

#[derive(Debug)]
pub struct StagedFile {
    pub field: &'static str,
    pub file_name: String,
    pub content_type: Option<String>,
    pub path: PathBuf,
    pub len: u64,
}

#[derive(Debug)]
pub struct StagedUpload {
    dir: TempDir,
    files: Vec<StagedFile>,
}

impl StagedUpload {
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn files(&self) -> &[StagedFile] {
        &self.files
    }

    pub fn field_names(&self) -> Vec<&'static str> {
        self.files.iter().map(|file| file.field).collect()
    }
}

pub fn accepted_field(name: &str) -> Option<&'static str> {
    UPLOAD_FIELDS.iter().copied().find(|field| *field == name)
}

pub async fn stage_upload(
    mut multipart: Multipart,
    upload_root: &Path,
) -> Result<StagedUpload, AppError> {
    let dir = Builder::new().prefix(DIR_PREFIX).tempdir_in(upload_root)?;
    let mut files: Vec<StagedFile> = Vec::new();

    while let Some(mut field) = multipart.next_field().await? {
        let Some(file_name) = field
            .file_name()
            .filter(|name| !name.is_empty())
            .map(str::to_owned)
        else {
            continue;
        };

        let name = field.name().unwrap_or_default().to_owned();
        let slot = accepted_field(&name).ok_or_else(|| AppError::UnexpectedField(name.clone()))?;

        if files.iter().any(|staged| staged.field == slot) {
            return Err(AppError::UnexpectedField(name));
        }

        let content_type = field.content_type().map(str::to_owned);
        let path = dir.path().join(slot);

        let mut file = File::create(&path).await?;
        let mut len = 0u64;

        while let Some(chunk) = field.chunk().await? {
            len += chunk.len() as u64;
            file.write_all(&chunk).await?;
        }
        file.flush().await?;

        files.push(StagedFile {
            field: slot,
            file_name,
            content_type,
            path,
            len,
        });
    }

    if files.is_empty() {
        return Err(AppError::NoFiles);
    }

    Ok(StagedUpload { dir, files })
}
