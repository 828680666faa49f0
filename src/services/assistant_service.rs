//! The assistant facade: one session-scoped object coordinating the
//! conversation store, quiz state machine, and the external ingestion and
//! inference collaborators.
//!
//! Error policy follows the surrounding error taxonomy: inference failures
//! are wrapped into fixed user-facing replies (the cause lands in the
//! diagnostic sink and `last_error`), parse shortfalls become a quiz
//! generation failure, and out-of-state quiz calls come back as explicit
//! negative results rather than errors.

use std::path::Path;
use std::sync::Arc;

use crate::constants::prompts::{
    self, FAREWELL_REPLY, INFERENCE_FAILURE_REPLY, INVALID_QUESTION_REPLY, QUIZ_SYSTEM_PROMPT,
};
use crate::diagnostics::DiagnosticSink;
use crate::errors::AppResult;
use crate::models::domain::conversation::{ChatMessage, Conversation, LoadedDocument};
use crate::models::domain::quiz_question::QuizQuestion;
use crate::models::domain::quiz_session::{AnswerOutcome, QuizSession, QuizStatusReport};
use crate::services::context_assembler;
use crate::services::ingestion_service::DocumentIngestor;
use crate::services::model_service::{InferenceClient, SamplingOptions};
use crate::services::quiz_parser::parse_quiz_response;

/// User-facing answer feedback: whether the submission was correct and the
/// text to show for it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnswerFeedback {
    pub is_correct: bool,
    pub feedback: String,
}

pub struct Assistant {
    model: String,
    conversation: Conversation,
    quiz: Option<QuizSession>,
    last_error: Option<String>,
    ingestor: Arc<dyn DocumentIngestor>,
    inference: Arc<dyn InferenceClient>,
    diagnostics: DiagnosticSink,
}

impl Assistant {
    pub fn new(
        model: impl Into<String>,
        ingestor: Arc<dyn DocumentIngestor>,
        inference: Arc<dyn InferenceClient>,
        diagnostics: DiagnosticSink,
    ) -> Self {
        Self {
            model: model.into(),
            conversation: Conversation::new(),
            quiz: None,
            last_error: None,
            ingestor,
            inference,
            diagnostics,
        }
    }

    /// Ingests a document and installs it as the conversation context,
    /// replacing any previously loaded one. Nothing is installed on failure.
    pub fn load_document(&mut self, path: &Path) -> AppResult<&LoadedDocument> {
        match self.ingestor.ingest(path) {
            Ok(ingested) => {
                self.last_error = None;
                Ok(self
                    .conversation
                    .set_document(LoadedDocument::new(ingested.name, ingested.text)))
            }
            Err(err) => {
                self.record_error(format!("Error loading document: {}", err));
                Err(err)
            }
        }
    }

    /// Answers one chat question. Blank input and end phrases short-circuit
    /// before any model call; inference failures surface as a fixed apology.
    pub async fn ask(&mut self, question: &str) -> String {
        if question.trim().is_empty() {
            return INVALID_QUESTION_REPLY.to_string();
        }

        if context_assembler::is_end_phrase(question) {
            self.conversation.mark_ended();
            self.diagnostics.info("Conversation ended by end phrase");
            return FAREWELL_REPLY.to_string();
        }

        let messages = context_assembler::assemble(&self.conversation, question);
        match self
            .inference
            .complete(&self.model, &messages, &SamplingOptions::chat())
            .await
        {
            Ok(response) => {
                self.conversation.append_exchange(question, &response);
                response
            }
            Err(err) => {
                self.record_error(format!("Error generating response: {}", err));
                INFERENCE_FAILURE_REPLY.to_string()
            }
        }
    }

    /// Generates a fresh quiz over the loaded document. `true` on success;
    /// on any failure the reason is recorded and no session is started.
    pub async fn generate_quiz(&mut self, question_count: usize) -> bool {
        if question_count == 0 {
            self.record_error(
                "Quiz generation error: question count must be at least 1".to_string(),
            );
            return false;
        }
        let prompt = match self.conversation.document() {
            Some(document) => prompts::quiz_generation_prompt(question_count, &document.text),
            None => {
                self.record_error("No document loaded for quiz generation".to_string());
                return false;
            }
        };

        let messages = [
            ChatMessage::system(QUIZ_SYSTEM_PROMPT),
            ChatMessage::user(prompt),
        ];

        let response = match self
            .inference
            .complete(&self.model, &messages, &SamplingOptions::quiz_generation())
            .await
        {
            Ok(response) => response,
            Err(err) => {
                self.record_error(format!("Quiz generation error: {}", err));
                return false;
            }
        };

        let questions = parse_quiz_response(&response);
        match QuizSession::start(questions) {
            Ok(session) => {
                self.diagnostics.info(format!(
                    "Started quiz with {} questions (requested {})",
                    session.total(),
                    question_count
                ));
                self.quiz = Some(session);
                self.last_error = None;
                true
            }
            Err(_) => {
                self.record_error("Failed to generate valid quiz questions".to_string());
                false
            }
        }
    }

    pub fn current_question(&self) -> Option<&QuizQuestion> {
        self.quiz.as_ref().and_then(QuizSession::current)
    }

    pub fn submit_answer(&mut self, answer: &str) -> AnswerFeedback {
        let Some(quiz) = self.quiz.as_mut() else {
            return AnswerFeedback {
                is_correct: false,
                feedback: "No quiz is active".to_string(),
            };
        };

        match quiz.submit(answer) {
            AnswerOutcome::NotActive => AnswerFeedback {
                is_correct: false,
                feedback: "No quiz is active".to_string(),
            },
            AnswerOutcome::InvalidOption => AnswerFeedback {
                is_correct: false,
                feedback: "Invalid answer option".to_string(),
            },
            AnswerOutcome::Answered {
                correct,
                correct_label,
                explanation,
            } => {
                let feedback = if correct {
                    format!("✅ Correct! {}", explanation)
                } else {
                    format!(
                        "❌ Incorrect. The correct answer was {}. {}",
                        correct_label, explanation
                    )
                };
                AnswerFeedback {
                    is_correct: correct,
                    feedback,
                }
            }
        }
    }

    pub fn quiz_status(&self) -> QuizStatusReport {
        self.quiz
            .as_ref()
            .map(QuizSession::status)
            .unwrap_or_else(QuizStatusReport::idle)
    }

    /// Clears conversation history, the loaded document, any quiz session,
    /// and the last-error state.
    pub fn reset_session(&mut self) {
        self.conversation.reset();
        if let Some(quiz) = self.quiz.as_mut() {
            quiz.end();
        }
        self.quiz = None;
        self.last_error = None;
        self.diagnostics.info("Session reset");
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    fn record_error(&mut self, message: String) {
        self.diagnostics.error(message.clone());
        self.last_error = Some(message);
    }
}
