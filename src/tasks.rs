//! Background network tasks. Results are collected by the UI thread with `poll_results`.

use crate::api::{ExplanationClient, GenerationClient};
use crate::config::Config;
use crate::error::FlashcardError;
use crate::models::{Deck, ExplanationResponse, ExplanationTicket, UploadTicket};
use log::debug;
use std::sync::{Arc, mpsc};
use tokio::runtime::Runtime;

pub enum TaskResult {
    FlashcardsGenerated {
        seq: u64,
        result: Result<Deck, FlashcardError>,
    },
    ExplanationReady {
        seq: u64,
        response: ExplanationResponse,
    },
}

type Waker = Arc<dyn Fn() + Send + Sync>;

/// Queues a finished task's result and wakes the UI. Returns false when the
/// receiving side is gone, in which case the result is dropped.
fn deliver(sender: &mpsc::Sender<TaskResult>, result: TaskResult, waker: &Waker) -> bool {
    match sender.send(result) {
        Ok(()) => {
            waker();
            true
        }
        Err(mpsc::SendError(result)) => {
            let (label, seq) = match result {
                TaskResult::FlashcardsGenerated { seq, .. } => ("flashcard generation", seq),
                TaskResult::ExplanationReady { seq, .. } => ("explanation", seq),
            };
            debug!("Dropping {} result #{}: receiver closed", label, seq);
            false
        }
    }
}

pub struct TaskManager {
    runtime: Runtime,
    receiver: mpsc::Receiver<TaskResult>,
    sender: mpsc::Sender<TaskResult>,
    generation: GenerationClient,
    explanations: ExplanationClient,
    waker: Waker,
}

impl TaskManager {
    /// `waker` is called after each result is queued, e.g. to request a repaint.
    pub fn new(
        config: &Config,
        waker: impl Fn() + Send + Sync + 'static,
    ) -> Result<Self, FlashcardError> {
        let runtime = Runtime::new().map_err(|e| FlashcardError::Runtime(e.to_string()))?;
        let (sender, receiver) = mpsc::channel();

        Ok(Self {
            runtime,
            receiver,
            sender,
            generation: GenerationClient::new(config)?,
            explanations: ExplanationClient::new(config)?,
            waker: Arc::new(waker),
        })
    }

    pub fn poll_results(&mut self) -> Vec<TaskResult> {
        let mut results = Vec::new();

        while let Ok(result) = self.receiver.try_recv() {
            results.push(result);
        }

        results
    }

    fn task_context(&self) -> (mpsc::Sender<TaskResult>, Waker) {
        (self.sender.clone(), self.waker.clone())
    }

    pub fn generate_flashcards(&self, ticket: UploadTicket) {
        let (sender, waker) = self.task_context();
        let client = self.generation.clone();

        self.runtime.spawn(async move {
            let result = client.generate(&ticket.path).await;
            deliver(
                &sender,
                TaskResult::FlashcardsGenerated {
                    seq: ticket.seq,
                    result,
                },
                &waker,
            );
        });
    }

    pub fn request_explanation(&self, ticket: ExplanationTicket) {
        let (sender, waker) = self.task_context();
        let client = self.explanations.clone();

        self.runtime.spawn(async move {
            let response = client
                .request(
                    ticket.kind,
                    &ticket.question,
                    &ticket.answer,
                    ticket.context.as_deref(),
                )
                .await;
            deliver(
                &sender,
                TaskResult::ExplanationReady {
                    seq: ticket.seq,
                    response,
                },
                &waker,
            );
        });
    }
}
