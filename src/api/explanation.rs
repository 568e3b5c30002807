//! Client for the detailed / simplified / examples explanation endpoints.

use super::{endpoint, ensure_success, http_client};
use crate::config::Config;
use crate::error::FlashcardError;
use crate::models::explanation::WireExplanation;
use crate::models::{ExplanationKind, ExplanationRequest, ExplanationResponse};
use log::{debug, warn};
use reqwest::Client;

#[derive(Clone)]
pub struct ExplanationClient {
    client: Client,
    base_url: String,
}

impl ExplanationClient {
    pub fn new(config: &Config) -> Result<Self, FlashcardError> {
        Ok(Self::with_client(http_client(config)?, &config.api_url))
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.to_string(),
        }
    }

    /// Asks for an explanation of one card. Makes exactly one attempt and never
    /// fails: errors come back as `ExplanationResponse::Failure`.
    pub async fn request(
        &self,
        kind: ExplanationKind,
        question: &str,
        answer: &str,
        context: Option<&str>,
    ) -> ExplanationResponse {
        let request = ExplanationRequest::new(kind, question, answer, context);

        match self.send(kind, &request).await {
            Ok(response) => response,
            Err(e) => {
                warn!("Error getting {:?} explanation: {}", kind, e);
                ExplanationResponse::fallback(question, answer, e.short_diagnostic())
            }
        }
    }

    async fn send(
        &self,
        kind: ExplanationKind,
        request: &ExplanationRequest,
    ) -> Result<ExplanationResponse, FlashcardError> {
        let url = endpoint(&self.base_url, kind.endpoint());
        debug!("POST {}", url);

        let response = self.client.post(&url).json(request).send().await?;
        let body = ensure_success(response).await?.text().await?;

        let wire: WireExplanation = serde_json::from_str(&body)
            .map_err(|e| FlashcardError::MalformedResponse(e.to_string()))?;
        Ok(wire.into_response(request))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_server::{serve_once, unreachable_url};

    fn client(base_url: &str) -> ExplanationClient {
        ExplanationClient::with_client(Client::new(), base_url)
    }

    #[tokio::test]
    async fn test_simplified_request() {
        let (base_url, server) = serve_once(
            200,
            r#"{"success": true, "explanation": "Short version.", "type": "simplified",
                "original_question": "Q1", "original_answer": "A1"}"#,
        );

        let response = client(&base_url)
            .request(ExplanationKind::Simplified, "Q1", "A1", Some("ignored"))
            .await;
        let raw_request = server.join().unwrap();

        assert!(raw_request.starts_with("POST /explanations/simplified-explanation "));
        assert!(raw_request.contains(r#""current_answer":"A1""#));
        assert!(!raw_request.contains("context"));

        assert!(response.is_success());
        assert_eq!(response.explanation(), "Short version.");
        assert_eq!(response.kind(), Some(ExplanationKind::Simplified));
    }

    #[tokio::test]
    async fn test_detailed_request_sends_context() {
        let (base_url, server) = serve_once(
            200,
            r#"{"success": true, "explanation": "Long version."}"#,
        );

        let response = client(&base_url)
            .request(ExplanationKind::Detailed, "Q1", "A1", Some("Study material: notes.pdf"))
            .await;
        let raw_request = server.join().unwrap();

        assert!(raw_request.starts_with("POST /explanations/additional-explanation "));
        assert!(raw_request.contains(r#""context":"Study material: notes.pdf""#));
        assert_eq!(response.original_question(), "Q1");
        assert_eq!(response.kind(), None);
    }

    #[tokio::test]
    async fn test_network_failure_becomes_fallback() {
        let response = client(&unreachable_url())
            .request(ExplanationKind::Examples, "Q1", "A1", None)
            .await;

        assert!(!response.is_success());
        assert!(response.explanation().contains("Sorry"));
        assert!(response.explanation().contains("try again"));
        assert_eq!(response.error(), Some("Network error"));
        assert_eq!(response.original_question(), "Q1");
        assert_eq!(response.original_answer(), "A1");
    }

    #[tokio::test]
    async fn test_server_error_becomes_fallback() {
        let (base_url, server) = serve_once(
            500,
            r#"{"detail": "Error generating examples: quota exceeded"}"#,
        );

        let response = client(&base_url)
            .request(ExplanationKind::Examples, "Q1", "A1", None)
            .await;
        server.join().unwrap();

        assert!(!response.is_success());
        assert_eq!(response.error(), Some("Server error (500)"));
        assert!(!response.explanation().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_body_becomes_fallback() {
        let (base_url, server) = serve_once(200, "<html>gateway</html>");

        let response = client(&base_url)
            .request(ExplanationKind::Detailed, "Q1", "A1", None)
            .await;
        server.join().unwrap();

        assert_eq!(response.error(), Some("Malformed response"));
    }
}
