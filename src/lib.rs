//! # Gait Page
//!
//! Client logic for the gait report comparison page.
//!
//! ## Overall Payloads
//!
//! Requests/responses between the page and the relay.
//!
//! ### Upload
//! Multipart form, one file per field
//! - `pre_report`: PDF report before treatment
//! - `post_report`: PDF report after treatment
//! - `pre_csv`: CSV export before treatment
//! - `post_csv`: CSV export after treatment
//!
//! ### Analysis
//! JSON from the analysis backend, relayed untouched
//! - `error`: string, present when the backend could not process the upload
//! - `pre_patient` / `post_patient`: flat mapping of patient details
//! - `temporal`: rows of `Description, Unit, Side, Pre, Post`
//! - `kinematic`: rows of `Joint, Pre Min, Pre Max, Post Min, Post Max`
//!
//!
//!
//! ## Flow
//!
//! - All four inputs must hold a file, otherwise warn and stop before any request
//! - Post the form to `/upload`
//! - Non-2xx from the relay: generic failure
//! - `error` in the body: show it as is
//! - Otherwise keep the result, show `pre` patient details and both tables
//! - Switching to `post` re-renders from the kept result, no new request
//!
//!
//!
//! ## Rendering
//!
//! - Missing or null values are shown as `N/A`
//! - Empty or absent tables get a single row spanning all columns
//! - Every render is all-or-nothing, a malformed row fails the whole view

pub mod bundle;
pub mod controller;
pub mod error;
pub mod render;
pub mod result;

pub use bundle::{FilePart, Slot, UploadBundle};
pub use controller::PageController;
pub use error::{ClientError, RenderError};
pub use result::{AnalysisResult, Phase};
