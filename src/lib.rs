pub mod api;
pub mod config;
pub mod error;
pub mod export;
pub mod markdown;
pub mod models;
pub mod tasks;

pub use error::FlashcardError;
pub use models::{CardView, Deck, ExplanationKind, ExplanationResponse, Flashcard, StudySession};
