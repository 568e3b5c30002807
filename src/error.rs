//! Error type shared by the HTTP clients, the study session and deck export.
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FlashcardError {
    #[error("Network error: {0}")]
    Network(Box<reqwest::Error>),

    #[error("Server returned {status}: {detail}")]
    Server { status: u16, detail: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("No file selected")]
    NoFileSelected,

    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error("The deck contains no flashcards")]
    EmptyDeck,

    #[error("I/O error: {0}")]
    Io(Box<std::io::Error>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to start background runtime: {0}")]
    Runtime(String),
}

impl FlashcardError {
    /// Short text suitable for the `error` field of a failed explanation.
    pub fn short_diagnostic(&self) -> String {
        match self {
            FlashcardError::Network(_) => "Network error".to_string(),
            FlashcardError::Server { status, .. } => format!("Server error ({})", status),
            FlashcardError::MalformedResponse(_) | FlashcardError::Json(_) => {
                "Malformed response".to_string()
            }
            FlashcardError::NoFileSelected | FlashcardError::UnsupportedFileType(_) => {
                "Invalid input".to_string()
            }
            FlashcardError::EmptyDeck => "Empty deck".to_string(),
            FlashcardError::Io(_) => "I/O error".to_string(),
            FlashcardError::Runtime(_) => "Runtime error".to_string(),
        }
    }
}

impl From<reqwest::Error> for FlashcardError {
    fn from(error: reqwest::Error) -> Self {
        FlashcardError::Network(Box::new(error))
    }
}

impl From<std::io::Error> for FlashcardError {
    fn from(error: std::io::Error) -> Self {
        FlashcardError::Io(Box::new(error))
    }
}
