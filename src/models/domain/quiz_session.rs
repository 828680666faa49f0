use serde::Serialize;

use crate::errors::{AppError, AppResult};
use crate::models::domain::quiz_question::{OptionLabel, QuizQuestion};

/// Result of submitting an answer to the state machine.
///
/// Out-of-state submissions are ordinary values, not errors; the caller is
/// expected to poll session state across independent render passes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AnswerOutcome {
    /// No question is currently accepting answers.
    NotActive,
    /// The submitted text did not normalize to one of the four labels.
    /// Session state is unchanged.
    InvalidOption,
    Answered {
        correct: bool,
        correct_label: OptionLabel,
        explanation: String,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct QuizStatusReport {
    pub active: bool,
    pub progress: usize,
    pub total: usize,
    pub score: usize,
    pub percentage: f64,
    pub remaining: usize,
    pub current_streak: usize,
}

impl QuizStatusReport {
    /// The all-zero report used when no quiz session exists.
    pub fn idle() -> Self {
        Self {
            active: false,
            progress: 0,
            total: 0,
            score: 0,
            percentage: 0.0,
            remaining: 0,
            current_streak: 0,
        }
    }
}

/// One quiz attempt over a fixed, ordered question sequence.
///
/// Invariants: `progress <= questions.len()`, `score <= progress`,
/// `history.len() == progress`. The session deactivates exactly when the
/// cursor first reaches the end, or when `end()` is called.
#[derive(Clone, Debug)]
pub struct QuizSession {
    questions: Vec<QuizQuestion>,
    progress: usize,
    score: usize,
    history: Vec<bool>,
    active: bool,
}

impl QuizSession {
    /// Starts a session over a non-empty sequence of well-formed questions.
    pub fn start(questions: Vec<QuizQuestion>) -> AppResult<Self> {
        if questions.is_empty() {
            return Err(AppError::Validation(
                "Cannot start a quiz with no questions".to_string(),
            ));
        }
        Ok(Self {
            questions,
            progress: 0,
            score: 0,
            history: Vec::new(),
            active: true,
        })
    }

    /// The question at the cursor, or `None` once the session is over.
    pub fn current(&self) -> Option<&QuizQuestion> {
        if !self.active {
            return None;
        }
        self.questions.get(self.progress)
    }

    pub fn submit(&mut self, answer: &str) -> AnswerOutcome {
        if !self.active || self.progress >= self.questions.len() {
            return AnswerOutcome::NotActive;
        }
        let Some(label) = OptionLabel::from_input(answer) else {
            return AnswerOutcome::InvalidOption;
        };

        let question = &self.questions[self.progress];
        let correct = label == question.correct;
        let outcome = AnswerOutcome::Answered {
            correct,
            correct_label: question.correct,
            explanation: question.explanation.clone(),
        };

        if correct {
            self.score += 1;
        }
        self.history.push(correct);
        self.progress += 1;
        if self.progress == self.questions.len() {
            self.active = false;
        }

        outcome
    }

    pub fn status(&self) -> QuizStatusReport {
        let total = self.questions.len();
        let percentage = if total == 0 {
            0.0
        } else {
            (self.score as f64 / total as f64 * 1000.0).round() / 10.0
        };
        QuizStatusReport {
            active: self.active,
            progress: self.progress,
            total,
            score: self.score,
            percentage,
            remaining: if self.active { total - self.progress } else { 0 },
            current_streak: self.current_streak(),
        }
    }

    /// Forces the session inactive regardless of progress.
    pub fn end(&mut self) {
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn progress(&self) -> usize {
        self.progress
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn score(&self) -> usize {
        self.score
    }

    /// Length of the trailing run of correct answers in the history.
    fn current_streak(&self) -> usize {
        self.history.iter().rev().take_while(|&&correct| correct).count()
    }
}
