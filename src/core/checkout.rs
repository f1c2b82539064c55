//! Interpreting the purchase endpoint's reply.
//!
//! The endpoint answers a POST with `{"url": "..."}`; the page then navigates
//! there. Anything else is reported and the purchase is abandoned (no retry).

use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum CheckoutError {
    #[error("checkout request failed with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("expected JSON but received `{content_type}`: {body}")]
    NotJson { content_type: String, body: String },
    #[error("malformed checkout response: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("checkout response has no redirect url")]
    MissingUrl,
    #[error("checkout transport error: {0}")]
    Transport(String),
}

#[derive(Debug, Deserialize)]
struct CheckoutSession {
    url: Option<String>,
}

/// Redirect URL from a checkout response, or why there isn't one.
pub fn redirect_target(status: u16, content_type: &str, body: &str) -> Result<String, CheckoutError> {
    if !(200..300).contains(&status) {
        return Err(CheckoutError::Status {
            status,
            body: body.to_string(),
        });
    }
    if !content_type.contains("application/json") {
        return Err(CheckoutError::NotJson {
            content_type: content_type.to_string(),
            body: body.to_string(),
        });
    }
    let session: CheckoutSession = serde_json::from_str(body)?;
    session
        .url
        .filter(|u| !u.is_empty())
        .ok_or(CheckoutError::MissingUrl)
}
