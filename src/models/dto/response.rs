use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::domain::conversation::LoadedDocument;
use crate::models::domain::quiz_question::{OptionLabel, QuizQuestion};
use crate::models::domain::quiz_session::QuizStatusReport;
use crate::services::assistant_service::AnswerFeedback;

#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DocumentDto {
    pub name: String,
    pub characters: usize,
    pub loaded_at: DateTime<Utc>,
}

impl From<&LoadedDocument> for DocumentDto {
    fn from(document: &LoadedDocument) -> Self {
        DocumentDto {
            name: document.name.clone(),
            characters: document.text.chars().count(),
            loaded_at: document.loaded_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AskResponse {
    pub answer: String,
    pub conversation_active: bool,
}

/// The question as shown to the quiz taker. The correct label and the
/// explanation are withheld until the answer is submitted.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionDto {
    pub number: usize,
    pub prompt: String,
    pub options: BTreeMap<OptionLabel, String>,
}

impl QuestionDto {
    pub fn from_question(question: &QuizQuestion, progress: usize) -> Self {
        QuestionDto {
            number: progress + 1,
            prompt: question.prompt.clone(),
            options: question.options.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CurrentQuestionResponse {
    pub question: Option<QuestionDto>,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuizStatusDto {
    pub active: bool,
    pub progress: usize,
    pub total_questions: usize,
    pub score: usize,
    pub percentage: f64,
    pub remaining: usize,
    pub current_streak: usize,
}

impl From<QuizStatusReport> for QuizStatusDto {
    fn from(status: QuizStatusReport) -> Self {
        QuizStatusDto {
            active: status.active,
            progress: status.progress,
            total_questions: status.total,
            score: status.score,
            percentage: status.percentage,
            remaining: status.remaining,
            current_streak: status.current_streak,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerateQuizResponse {
    pub generated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub status: QuizStatusDto,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnswerFeedbackDto {
    pub is_correct: bool,
    pub feedback: String,
    pub status: QuizStatusDto,
}

impl AnswerFeedbackDto {
    pub fn new(feedback: AnswerFeedback, status: QuizStatusReport) -> Self {
        AnswerFeedbackDto {
            is_correct: feedback.is_correct,
            feedback: feedback.feedback,
            status: status.into(),
        }
    }
}
