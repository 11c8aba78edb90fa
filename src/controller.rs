//! # Page Controller
//!
//! Owns the one piece of page state, the last analysis that came back clean.
//!
//! ## Upload
//! - Validate the bundle, no request unless all four files are there
//! - One multipart POST to the relay, no retry
//! - Non-2xx: [`ClientError::Rejected`]
//! - `error` in the body: [`ClientError::Backend`], kept state untouched
//! - Body that is not JSON or a row that is not a list: generic failure
//!
//! ## Re-rendering
//! [`PageController::show_patient`] and [`PageController::view`] work off the
//! kept result, switching phase never goes back to the network.
use reqwest::Client;
use tracing::{error, info, warn};

use crate::{
    bundle::UploadBundle,
    error::{ClientError, RenderError},
    render::{PatientView, ResultView, patient_view, render},
    result::{AnalysisResult, Phase},
};

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:3000/upload";

pub struct PageController {
    client: Client,
    endpoint: String,
    result: Option<AnalysisResult>,
    phase: Phase,
}

impl PageController {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(Client::new(), endpoint)
    }

    pub fn with_client(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            result: None,
            phase: Phase::default(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub async fn upload(&mut self, bundle: &UploadBundle) -> Result<ResultView, ClientError> {
        if let Err(e) = bundle.validate() {
            warn!("Upload blocked, missing files: {e:?}");
            return Err(e);
        }

        self.submit(bundle).await.inspect_err(|e| match e {
            ClientError::Transport(inner) => error!("Upload error: {inner}"),
            ClientError::Decode(inner) => error!("Upload error: malformed response: {inner}"),
            ClientError::Render(inner) => error!("Upload error: {inner}"),
            other => warn!("Upload failed: {other}"),
        })
    }

    async fn submit(&mut self, bundle: &UploadBundle) -> Result<ResultView, ClientError> {
        let form = bundle.to_form()?;

        let response = self.client.post(&self.endpoint).multipart(form).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(ClientError::Rejected(status));
        }

        let body = response.bytes().await?;
        let result = AnalysisResult::from_slice(&body)?;

        if let Some(message) = result.error_message() {
            return Err(ClientError::Backend(message));
        }

        let view = render(&result, Phase::Pre)?;
        info!("Analysis received, showing {} phase", view.phase);

        self.result = Some(result);
        self.phase = Phase::Pre;

        Ok(view)
    }

    /// `None` until an upload has succeeded.
    pub fn show_patient(&mut self, phase: Phase) -> Option<PatientView> {
        let result = self.result.as_ref()?;
        self.phase = phase;

        Some(patient_view(result, phase))
    }

    pub fn view(&self) -> Option<Result<ResultView, RenderError>> {
        self.result
            .as_ref()
            .map(|result| render(result, self.phase))
    }
}
