//! Report Refresh Commands
//!
//! Status polling and manual refresh of the report job.

use gloo_net::http::Request;

use super::{decode, ApiError};
use crate::models::{JobStatus, RefreshResponse};

/// Query the current job status
pub async fn fetch_status(url: &str) -> Result<JobStatus, ApiError> {
    let resp = Request::get(url).send().await?;
    decode(resp).await
}

/// Ask the backend to start recomputing the report
pub async fn start_refresh(url: &str) -> Result<RefreshResponse, ApiError> {
    let resp = Request::post(url).send().await?;
    decode(resp).await
}
