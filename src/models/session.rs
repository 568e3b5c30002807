//! Study session: file selection, deck generation lifecycle and navigation.
//!
//! The session never performs I/O itself. It hands out tickets for uploads and
//! explanation requests, and the results come back through `finish_upload` and
//! `finish_explanation` together with the ticket's sequence number. Results
//! belonging to a superseded ticket are dropped.

use super::{CardView, Deck, ExplanationKind, ExplanationResponse};
use crate::error::FlashcardError;
use log::{debug, error, info};
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadTicket {
    pub seq: u64,
    pub path: PathBuf,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExplanationTicket {
    pub seq: u64,
    pub kind: ExplanationKind,
    pub question: String,
    pub answer: String,
    pub context: Option<String>,
}

#[derive(Default)]
pub struct StudySession {
    selected_file: Option<PathBuf>,
    deck: Deck,
    card_view: CardView,
    loading: bool,
    upload_seq: u64,
    explanation_seq: u64,
    view_seq: u64,
    last_error: Option<String>,
}

impl StudySession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remembers the file to upload next. Does not start an upload.
    pub fn select_file(&mut self, path: PathBuf) {
        self.selected_file = Some(path);
    }

    pub fn selected_file(&self) -> Option<&Path> {
        self.selected_file.as_deref()
    }

    /// Deck being studied, empty until the first successful load.
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// Flip and explanation state of the card on screen.
    pub fn card_view(&self) -> &CardView {
        &self.card_view
    }

    /// Mutable card view, used by the UI for animation and typing updates.
    pub fn card_view_mut(&mut self) -> &mut CardView {
        &mut self.card_view
    }

    /// True while the latest upload has not finished.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// A file is selected and no upload is running.
    pub fn can_upload(&self) -> bool {
        self.selected_file.is_some() && !self.loading
    }

    /// Message of the last failed upload, cleared by the next successful load.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Starts an upload of the selected file. A newer upload supersedes any in flight.
    pub fn begin_upload(&mut self) -> Result<UploadTicket, FlashcardError> {
        let path = self
            .selected_file
            .clone()
            .ok_or(FlashcardError::NoFileSelected)?;
        self.upload_seq += 1;
        self.loading = true;
        info!("Uploading {} (request #{})", path.display(), self.upload_seq);
        Ok(UploadTicket {
            seq: self.upload_seq,
            path,
        })
    }

    /// Applies the outcome of upload `seq`. Returns false when the result was stale.
    pub fn finish_upload(&mut self, seq: u64, result: Result<Deck, FlashcardError>) -> bool {
        if seq != self.upload_seq {
            debug!("Dropping stale upload result #{} (latest #{})", seq, self.upload_seq);
            return false;
        }
        self.loading = false;

        match result {
            Ok(deck) => {
                info!("Generated {} flashcards", deck.len());
                self.install_deck(deck);
            }
            Err(e) => {
                error!("Error generating flashcards: {}", e);
                self.last_error = Some(e.to_string());
            }
        }
        true
    }

    /// Installs a deck loaded from disk. Supersedes any upload still in flight.
    pub fn load_deck(&mut self, deck: Deck) {
        self.upload_seq += 1;
        self.loading = false;
        info!("Loaded deck with {} flashcards", deck.len());
        self.install_deck(deck);
    }

    fn install_deck(&mut self, deck: Deck) {
        self.deck = deck;
        self.last_error = None;
        self.reset_card_view();
    }

    fn reset_card_view(&mut self) {
        self.view_seq += 1;
        self.card_view = CardView::new(self.view_seq);
    }

    /// Moves to the next card with a fresh, unflipped view. Returns false at the end.
    pub fn next_card(&mut self) -> bool {
        let moved = self.deck.next();
        if moved {
            self.reset_card_view();
        }
        moved
    }

    /// Moves to the previous card with a fresh, unflipped view. Returns false at the start.
    pub fn previous_card(&mut self) -> bool {
        let moved = self.deck.previous();
        if moved {
            self.reset_card_view();
        }
        moved
    }

    /// Flips the current card. Returns false with no card or while the flip animation runs.
    pub fn flip_card(&mut self) -> bool {
        self.deck.current().is_some() && self.card_view.flip()
    }

    /// Opens the explanation modal for the current card and returns the request to send.
    pub fn request_explanation(&mut self, kind: ExplanationKind) -> Option<ExplanationTicket> {
        let card = self.deck.current()?.clone();
        let seq = self.explanation_seq + 1;
        if !self.card_view.begin_explanation(kind, seq) {
            return None;
        }
        self.explanation_seq = seq;

        let context = match kind {
            ExplanationKind::Detailed => self
                .deck
                .source_name
                .as_ref()
                .map(|name| format!("Study material: {}", name)),
            _ => None,
        };
        Some(ExplanationTicket {
            seq,
            kind,
            question: card.question,
            answer: card.answer,
            context,
        })
    }

    /// Returns false when the response no longer belongs to the card on screen.
    pub fn finish_explanation(&mut self, seq: u64, response: ExplanationResponse) -> bool {
        let applied = self.card_view.complete_explanation(seq, response);
        if !applied {
            debug!("Dropping stale explanation #{}", seq);
        }
        applied
    }
}
