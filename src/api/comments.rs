//! Comment Commands

use gloo_net::http::Request;

use super::{rejection, ApiError};
use crate::models::CommentUpdate;

/// Persist a vacancy comment. Any success body is accepted.
pub async fn update_comment(url: &str, vacancy_name: &str, comment: &str) -> Result<(), ApiError> {
    let resp = Request::post(url)
        .json(&CommentUpdate { vacancy_name, comment })?
        .send()
        .await?;
    if !resp.ok() {
        return Err(rejection(resp).await);
    }
    Ok(())
}
