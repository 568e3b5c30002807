//! Interaction state of the card on screen: flip, animation lock and the
//! explanation modal.
//!
//! A `CardView` lives exactly as long as one card is shown. The session builds
//! a fresh one on every navigation or deck load, so flip state and explanation
//! responses can never carry over to another card.

use super::{ExplanationKind, ExplanationResponse};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CardFace {
    /// Question side
    #[default]
    Front,
    /// Answer side
    Back,
}

/// Incremental reveal of an explanation text.
#[derive(Clone, Debug, PartialEq)]
pub struct TypingReveal {
    text: String,
    revealed_chars: usize,
    total_chars: usize,
}

impl TypingReveal {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let total_chars = text.chars().count();
        Self {
            text,
            revealed_chars: 0,
            total_chars,
        }
    }

    pub fn advance(&mut self, chars: usize) {
        self.revealed_chars = self.revealed_chars.saturating_add(chars).min(self.total_chars);
    }

    pub fn finish(&mut self) {
        self.revealed_chars = self.total_chars;
    }

    pub fn is_complete(&self) -> bool {
        self.revealed_chars >= self.total_chars
    }

    /// Revealed part of the text, always a prefix ending on a char boundary.
    pub fn visible(&self) -> &str {
        match self.text.char_indices().nth(self.revealed_chars) {
            Some((byte_idx, _)) => &self.text[..byte_idx],
            None => &self.text,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum ExplanationState {
    #[default]
    Idle,
    Loading {
        kind: ExplanationKind,
    },
    Displaying {
        kind: ExplanationKind,
        response: ExplanationResponse,
        typing: TypingReveal,
    },
    Error {
        kind: ExplanationKind,
        response: ExplanationResponse,
    },
}

#[derive(Clone, Debug, Default)]
pub struct CardView {
    id: u64,
    face: CardFace,
    animating: bool,
    explanation: ExplanationState,
    pending_seq: Option<u64>,
}

impl CardView {
    /// `id` identifies this view instance; the UI keys its flip animation on it.
    pub fn new(id: u64) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn face(&self) -> CardFace {
        self.face
    }

    pub fn is_flipped(&self) -> bool {
        self.face == CardFace::Back
    }

    pub fn is_animating(&self) -> bool {
        self.animating
    }

    /// Starts a flip. Ignored while a previous flip is still animating.
    pub fn flip(&mut self) -> bool {
        if self.animating {
            return false;
        }
        self.animating = true;
        self.face = match self.face {
            CardFace::Front => CardFace::Back,
            CardFace::Back => CardFace::Front,
        };
        true
    }

    pub fn finish_animation(&mut self) {
        self.animating = false;
    }

    pub fn explanation(&self) -> &ExplanationState {
        &self.explanation
    }

    pub fn is_modal_open(&self) -> bool {
        self.explanation != ExplanationState::Idle
    }

    pub fn is_loading_explanation(&self) -> bool {
        matches!(self.explanation, ExplanationState::Loading { .. })
    }

    /// Opens the modal in `Loading` for request `seq`, superseding any earlier one.
    /// Only possible once the answer is showing.
    pub fn begin_explanation(&mut self, kind: ExplanationKind, seq: u64) -> bool {
        if self.face != CardFace::Back {
            return false;
        }
        self.explanation = ExplanationState::Loading { kind };
        self.pending_seq = Some(seq);
        true
    }

    /// Applies a response if it belongs to the latest request. Returns false if discarded.
    pub fn complete_explanation(&mut self, seq: u64, response: ExplanationResponse) -> bool {
        if self.pending_seq != Some(seq) {
            return false;
        }
        let ExplanationState::Loading { kind } = self.explanation else {
            return false;
        };
        self.pending_seq = None;

        let kind = response.kind().unwrap_or(kind);
        self.explanation = if response.is_success() {
            let typing = TypingReveal::new(response.explanation());
            ExplanationState::Displaying {
                kind,
                response,
                typing,
            }
        } else {
            ExplanationState::Error { kind, response }
        };
        true
    }

    pub fn advance_typing(&mut self, chars: usize) {
        if let ExplanationState::Displaying { typing, .. } = &mut self.explanation {
            typing.advance(chars);
        }
    }

    pub fn skip_typing(&mut self) {
        if let ExplanationState::Displaying { typing, .. } = &mut self.explanation {
            typing.finish();
        }
    }

    pub fn is_typing(&self) -> bool {
        matches!(&self.explanation, ExplanationState::Displaying { typing, .. } if !typing.is_complete())
    }

    pub fn close_explanation(&mut self) {
        self.explanation = ExplanationState::Idle;
        self.pending_seq = None;
    }
}
