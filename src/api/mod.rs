//! HTTP clients for the flashcard generation and explanation backend.

pub mod explanation;
pub mod generation;

#[cfg(test)]
pub(crate) mod test_server;

pub use explanation::ExplanationClient;
pub use generation::GenerationClient;

use crate::config::Config;
use crate::error::FlashcardError;
use reqwest::{Client, Response};
use serde::Deserialize;

pub fn http_client(config: &Config) -> Result<Client, FlashcardError> {
    Client::builder()
        .timeout(config.request_timeout)
        .build()
        .map_err(FlashcardError::from)
}

pub(crate) fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

/// FastAPI error body.
#[derive(Deserialize)]
struct ErrorBody {
    detail: serde_json::Value,
}

/// Turns a non-2xx response into `FlashcardError::Server`, keeping the `detail` text.
pub(crate) async fn ensure_success(response: Response) -> Result<Response, FlashcardError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let detail = match serde_json::from_str::<ErrorBody>(&body) {
        Ok(ErrorBody {
            detail: serde_json::Value::String(text),
        }) => text,
        Ok(ErrorBody { detail }) => detail.to_string(),
        Err(_) if body.trim().is_empty() => status
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_string(),
        Err(_) => body,
    };

    Err(FlashcardError::Server {
        status: status.as_u16(),
        detail,
    })
}
