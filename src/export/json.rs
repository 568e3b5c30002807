//! JSON save/load for generated decks.
//! The study position is not stored; an imported deck starts at its first card.

use crate::error::FlashcardError;
use crate::models::Deck;
use log::info;
use std::fs;
use std::path::Path;

/// Writes the deck as pretty-printed JSON.
pub fn export_deck_to_path(deck: &Deck, path: &Path) -> Result<(), FlashcardError> {
    let json_string = serde_json::to_string_pretty(deck)?;
    fs::write(path, json_string)?;
    info!("Deck with {} cards exported to '{}'", deck.len(), path.display());
    Ok(())
}

/// Reads a deck written by `export_deck_to_path`. A deck without cards is rejected.
pub fn import_deck(path: &Path) -> Result<Deck, FlashcardError> {
    let contents = fs::read_to_string(path)?;
    let deck: Deck = serde_json::from_str(&contents)?;

    if deck.is_empty() {
        return Err(FlashcardError::EmptyDeck);
    }

    info!("Deck with {} cards imported from '{}'", deck.len(), path.display());
    Ok(deck)
}

/// Suggested file name for saving, e.g. `notes-flashcards.json`.
pub fn default_export_name(deck: &Deck) -> String {
    let stem = deck
        .source_name
        .as_deref()
        .and_then(|name| Path::new(name).file_stem())
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "deck".to_string());
    match deck.generated_at {
        Some(at) => format!("{}-flashcards-{}.json", stem, at.format("%Y-%m-%d")),
        None => format!("{}-flashcards.json", stem),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Flashcard;
    use tempfile::TempDir;

    fn create_test_deck() -> Deck {
        Deck::new(
            Some("biology.pdf".to_string()),
            vec![
                Flashcard::new("What is osmosis?", "Diffusion of water across a membrane"),
                Flashcard::new("What is ATP?", "The cell's energy currency"),
            ],
        )
    }

    #[test]
    fn test_export_writes_questions() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("deck.json");

        export_deck_to_path(&create_test_deck(), &path).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("\"source_name\": \"biology.pdf\""));
        assert!(written.contains("What is osmosis?"));
        assert!(!written.contains("current_index"));
    }

    #[test]
    fn test_import_starts_at_first_card() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("deck.json");
        let mut deck = create_test_deck();
        deck.next();

        export_deck_to_path(&deck, &path).unwrap();
        let imported = import_deck(&path).unwrap();

        assert_eq!(imported.len(), 2);
        assert_eq!(imported.current_index(), 0);
        assert_eq!(imported.flashcards, deck.flashcards);
        assert_eq!(imported.source_name.as_deref(), Some("biology.pdf"));
    }

    #[test]
    fn test_import_minimal_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("minimal.json");
        fs::write(
            &path,
            r#"{"flashcards": [{"question": "test question", "answer": "test answer"}]}"#,
        )
        .unwrap();

        let deck = import_deck(&path).unwrap();
        assert_eq!(deck.flashcards[0].question, "test question");
        assert!(deck.source_name.is_none());
        assert!(deck.generated_at.is_none());
    }

    #[test]
    fn test_import_empty_deck_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.json");
        fs::write(&path, r#"{"flashcards": []}"#).unwrap();

        assert!(matches!(import_deck(&path), Err(FlashcardError::EmptyDeck)));
    }

    #[test]
    fn test_import_nonexistent_file() {
        let dir = TempDir::new().unwrap();
        let result = import_deck(&dir.path().join("nonexistent.json"));
        assert!(matches!(result, Err(FlashcardError::Io(_))));
    }

    #[test]
    fn test_import_invalid_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("invalid.json");
        fs::write(&path, "{ this is not valid json }").unwrap();

        assert!(matches!(import_deck(&path), Err(FlashcardError::Json(_))));
    }

    #[test]
    fn test_default_export_name() {
        let deck = create_test_deck();
        let name = default_export_name(&deck);
        assert!(name.starts_with("biology-flashcards-"));
        assert!(name.ends_with(".json"));

        assert_eq!(default_export_name(&Deck::default()), "deck-flashcards.json");
    }
}
