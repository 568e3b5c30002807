//! Deck is the ordered set of flashcards from one generation, plus the study position.
use super::Flashcard;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Deck {
    /// File name of the document the deck was generated from.
    #[serde(default)]
    pub source_name: Option<String>,
    #[serde(default)]
    pub generated_at: Option<DateTime<Local>>,
    pub flashcards: Vec<Flashcard>,
    #[serde(skip)]
    current_index: usize,
}

impl Deck {
    /// Creates a deck positioned on its first card.
    pub fn new(source_name: Option<String>, flashcards: Vec<Flashcard>) -> Self {
        Self {
            source_name,
            generated_at: Some(Local::now()),
            flashcards,
            current_index: 0,
        }
    }

    /// Number of cards in the deck.
    pub fn len(&self) -> usize {
        self.flashcards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flashcards.is_empty()
    }

    /// Zero-based index of the card on screen.
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Card on screen, `None` for an empty deck.
    pub fn current(&self) -> Option<&Flashcard> {
        self.flashcards.get(self.current_index)
    }

    /// True unless the current card is the last one.
    pub fn has_next(&self) -> bool {
        self.current_index + 1 < self.flashcards.len()
    }

    /// True unless the current card is the first one.
    pub fn has_previous(&self) -> bool {
        self.current_index > 0
    }

    /// Moves forward one card. Returns false at the last card.
    pub fn next(&mut self) -> bool {
        if self.has_next() {
            self.current_index += 1;
            true
        } else {
            false
        }
    }

    /// Moves back one card. Returns false at the first card.
    pub fn previous(&mut self) -> bool {
        if self.has_previous() {
            self.current_index -= 1;
            true
        } else {
            false
        }
    }

    /// "3 / 10" style position, empty string for an empty deck.
    pub fn position_label(&self) -> String {
        if self.is_empty() {
            String::new()
        } else {
            format!("{} / {}", self.current_index + 1, self.len())
        }
    }
}
