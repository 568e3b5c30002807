//! Uploads a study document and returns the generated deck.

use super::{endpoint, ensure_success, http_client};
use crate::config::Config;
use crate::error::FlashcardError;
use crate::models::{Deck, Flashcard};
use log::{debug, info};
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use std::path::Path;

pub const GENERATE_PATH: &str = "/flashcards/generate-flashcards";

/// Extensions the backend can extract text from.
pub const SUPPORTED_EXTENSIONS: [&str; 4] = ["pdf", "docx", "pptx", "txt"];

#[derive(Deserialize)]
struct GenerateResponse {
    flashcards: Vec<Flashcard>,
}

#[derive(Clone)]
pub struct GenerationClient {
    client: Client,
    base_url: String,
}

impl GenerationClient {
    pub fn new(config: &Config) -> Result<Self, FlashcardError> {
        Ok(Self::with_client(http_client(config)?, &config.api_url))
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.to_string(),
        }
    }

    /// Sends the file as multipart field `file` and builds a deck from the reply.
    pub async fn generate(&self, path: &Path) -> Result<Deck, FlashcardError> {
        let file_name = checked_file_name(path)?;
        let bytes = tokio::fs::read(path).await?;
        debug!("Read {} bytes from {}", bytes.len(), path.display());

        let part = Part::bytes(bytes).file_name(file_name.clone());
        let form = Form::new().part("file", part);

        let url = endpoint(&self.base_url, GENERATE_PATH);
        let response = self.client.post(&url).multipart(form).send().await?;
        let body = ensure_success(response).await?.text().await?;

        let parsed: GenerateResponse = serde_json::from_str(&body)
            .map_err(|e| FlashcardError::MalformedResponse(e.to_string()))?;
        if parsed.flashcards.is_empty() {
            return Err(FlashcardError::EmptyDeck);
        }

        info!(
            "Received {} flashcards for {}",
            parsed.flashcards.len(),
            file_name
        );
        Ok(Deck::new(Some(file_name), parsed.flashcards))
    }
}

fn checked_file_name(path: &Path) -> Result<String, FlashcardError> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| FlashcardError::UnsupportedFileType(path.display().to_string()))?;

    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    if !SUPPORTED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(FlashcardError::UnsupportedFileType(file_name));
    }
    Ok(file_name)
}
