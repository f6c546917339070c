//! Backend API Wrappers
//!
//! HTTP bindings to the report backend, organized by domain.
//!
//! Transport failures and non-success responses are both surfaced as
//! `ApiError`; nothing here retries.

mod comments;
mod report;

use gloo_net::http::Response;
use thiserror::Error;

use crate::models::ErrorDetail;

pub use comments::*;
pub use report::*;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// No response was obtained
    #[error("network error: {0}")]
    Transport(String),
    /// Response obtained with a non-success status
    #[error("{}", rejected_message(*status, detail.as_deref()))]
    Rejected { status: u16, detail: Option<String> },
    /// Success status but the body did not decode
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl From<gloo_net::Error> for ApiError {
    fn from(err: gloo_net::Error) -> Self {
        match err {
            gloo_net::Error::SerdeError(e) => ApiError::Decode(e.to_string()),
            other => ApiError::Transport(other.to_string()),
        }
    }
}

fn rejected_message(status: u16, detail: Option<&str>) -> String {
    match detail {
        Some(detail) if !detail.trim().is_empty() => detail.to_string(),
        _ => format!("request failed with status {}", status),
    }
}

/// Turn a non-success response into `ApiError::Rejected`, reading `{detail}` if present
async fn rejection(resp: Response) -> ApiError {
    let status = resp.status();
    let detail = resp.json::<ErrorDetail>().await.ok().and_then(|body| body.detail);
    ApiError::Rejected { status, detail }
}

/// Decode a success body, or convert the response into a rejection
async fn decode<T: serde::de::DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
    if !resp.ok() {
        return Err(rejection(resp).await);
    }
    resp.json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}
