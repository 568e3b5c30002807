pub mod card_view;
pub mod deck;
pub mod explanation;
pub mod flashcard;
pub mod session;

pub use card_view::{CardFace, CardView, ExplanationState, TypingReveal};
pub use deck::Deck;
pub use explanation::{ExplanationKind, ExplanationRequest, ExplanationResponse};
pub use flashcard::Flashcard;
pub use session::{ExplanationTicket, StudySession, UploadTicket};
