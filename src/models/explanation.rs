//! Explanation requests and responses exchanged with the explanation endpoints.

use serde::{Deserialize, Serialize};

pub const FALLBACK_EXPLANATION: &str =
    "Sorry, I could not generate an explanation at this time. Please try again.";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExplanationKind {
    Detailed,
    Simplified,
    Examples,
}

impl ExplanationKind {
    pub const ALL: [ExplanationKind; 3] = [
        ExplanationKind::Detailed,
        ExplanationKind::Simplified,
        ExplanationKind::Examples,
    ];

    /// Maps the server's `type` field; unknown values yield `None`.
    pub fn from_wire(raw: &str) -> Option<Self> {
        match raw {
            "detailed" => Some(ExplanationKind::Detailed),
            "simplified" => Some(ExplanationKind::Simplified),
            "examples" => Some(ExplanationKind::Examples),
            _ => None,
        }
    }

    /// Path of the endpoint relative to the API base URL.
    pub fn endpoint(&self) -> &'static str {
        match self {
            ExplanationKind::Detailed => "/explanations/additional-explanation",
            ExplanationKind::Simplified => "/explanations/simplified-explanation",
            ExplanationKind::Examples => "/explanations/examples",
        }
    }

    pub fn button_label(&self) -> &'static str {
        match self {
            ExplanationKind::Detailed => "📚 More Detail",
            ExplanationKind::Simplified => "🔍 Simplify",
            ExplanationKind::Examples => "🌟 Examples",
        }
    }

    pub fn heading(&self) -> &'static str {
        match self {
            ExplanationKind::Detailed => "Detailed Explanation",
            ExplanationKind::Simplified => "Simplified Explanation",
            ExplanationKind::Examples => "Examples & Applications",
        }
    }

    /// Modal title: heading with the same icon as the button.
    pub fn title(&self) -> String {
        let icon = match self {
            ExplanationKind::Detailed => "📚",
            ExplanationKind::Simplified => "🔍",
            ExplanationKind::Examples => "🌟",
        };
        format!("{} {}", icon, self.heading())
    }
}

/// JSON body sent to the explanation endpoints.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ExplanationRequest {
    pub question: String,
    pub current_answer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

impl ExplanationRequest {
    /// Context is only meaningful to the detailed endpoint and dropped otherwise.
    pub fn new(
        kind: ExplanationKind,
        question: &str,
        answer: &str,
        context: Option<&str>,
    ) -> Self {
        let context = match kind {
            ExplanationKind::Detailed => context.map(str::to_string),
            _ => None,
        };
        Self {
            question: question.to_string(),
            current_answer: answer.to_string(),
            context,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ExplanationResponse {
    Success {
        explanation: String,
        kind: Option<ExplanationKind>,
        original_question: String,
        original_answer: String,
    },
    Failure {
        explanation: String,
        error: String,
        original_question: String,
        original_answer: String,
    },
}

impl ExplanationResponse {
    /// Failure shown when the backend could not be reached or answered badly.
    pub fn fallback(question: &str, answer: &str, error: impl Into<String>) -> Self {
        ExplanationResponse::Failure {
            explanation: FALLBACK_EXPLANATION.to_string(),
            error: error.into(),
            original_question: question.to_string(),
            original_answer: answer.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ExplanationResponse::Success { .. })
    }

    pub fn explanation(&self) -> &str {
        match self {
            ExplanationResponse::Success { explanation, .. }
            | ExplanationResponse::Failure { explanation, .. } => explanation,
        }
    }

    pub fn original_question(&self) -> &str {
        match self {
            ExplanationResponse::Success {
                original_question, ..
            }
            | ExplanationResponse::Failure {
                original_question, ..
            } => original_question,
        }
    }

    pub fn original_answer(&self) -> &str {
        match self {
            ExplanationResponse::Success {
                original_answer, ..
            }
            | ExplanationResponse::Failure {
                original_answer, ..
            } => original_answer,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ExplanationResponse::Success { .. } => None,
            ExplanationResponse::Failure { error, .. } => Some(error),
        }
    }

    /// Kind reported by the server, if any.
    pub fn kind(&self) -> Option<ExplanationKind> {
        match self {
            ExplanationResponse::Success { kind, .. } => *kind,
            ExplanationResponse::Failure { .. } => None,
        }
    }
}

/// Response body as the server sends it; every field but `success` is optional.
#[derive(Debug, Deserialize)]
pub struct WireExplanation {
    pub success: bool,
    #[serde(default)]
    pub explanation: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub original_question: Option<String>,
    #[serde(default)]
    pub original_answer: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl WireExplanation {
    /// Closes the loose wire shape into a response. Missing echoes fall back to the request.
    pub fn into_response(self, request: &ExplanationRequest) -> ExplanationResponse {
        let original_question = self
            .original_question
            .unwrap_or_else(|| request.question.clone());
        let original_answer = self
            .original_answer
            .unwrap_or_else(|| request.current_answer.clone());

        if self.success {
            let kind = self.kind.as_deref().and_then(ExplanationKind::from_wire);
            ExplanationResponse::Success {
                explanation: self.explanation.unwrap_or_default(),
                kind,
                original_question,
                original_answer,
            }
        } else {
            let explanation = self
                .explanation
                .filter(|text| !text.trim().is_empty())
                .unwrap_or_else(|| FALLBACK_EXPLANATION.to_string());
            ExplanationResponse::Failure {
                explanation,
                error: self.error.unwrap_or_else(|| "Unknown error".to_string()),
                original_question,
                original_answer,
            }
        }
    }
}
