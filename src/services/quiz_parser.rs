//! Line-oriented parser for quiz-generation model output.
//!
//! The expected format (pinned by `constants::prompts::quiz_generation_prompt`)
//! is a loose convention, not a contract. The parser makes one forward pass,
//! accumulates candidates, and keeps only those passing the well-formedness
//! gate; malformed or partial entries are dropped without failing the batch.
//! Partial success is a normal outcome.

use std::collections::BTreeMap;

use crate::models::domain::quiz_question::{OptionLabel, QuizQuestion};

/// An in-progress, partially-parsed question.
#[derive(Debug, Default)]
struct Accumulator {
    prompt: String,
    options: BTreeMap<OptionLabel, String>,
    correct: Option<String>,
    explanation: Option<String>,
}

impl Accumulator {
    fn new(prompt: &str) -> Self {
        Self {
            prompt: prompt.to_string(),
            ..Self::default()
        }
    }

    /// The well-formedness gate: all four labels present, the correct label
    /// one of them, prompt and explanation non-empty after trimming.
    fn into_question(self) -> Option<QuizQuestion> {
        let correct = OptionLabel::from_input(self.correct.as_deref()?)?;
        let explanation = self.explanation?;
        if self.prompt.trim().is_empty() || explanation.trim().is_empty() {
            return None;
        }
        if !OptionLabel::ALL
            .iter()
            .all(|label| self.options.contains_key(label))
        {
            return None;
        }
        Some(QuizQuestion {
            prompt: self.prompt,
            options: self.options,
            correct,
            explanation,
        })
    }
}

/// Parser position: between questions, or inside one.
#[derive(Debug)]
enum ParserState {
    Idle,
    Open(Accumulator),
}

impl ParserState {
    /// Pushes an open accumulator onto the candidate list and returns to
    /// `Idle`. The candidate may still be incomplete; the gate decides later.
    fn flush_into(&mut self, candidates: &mut Vec<Accumulator>) {
        if let ParserState::Open(accumulator) = std::mem::replace(self, ParserState::Idle) {
            candidates.push(accumulator);
        }
    }
}

/// Parses a raw completion into zero or more well-formed questions.
pub fn parse_quiz_response(response_text: &str) -> Vec<QuizQuestion> {
    let mut state = ParserState::Idle;
    let mut candidates: Vec<Accumulator> = Vec::new();

    for raw_line in response_text.lines() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        if is_question_start(line) {
            state.flush_into(&mut candidates);
            if let Some((_, prompt)) = line.split_once(". ") {
                state = ParserState::Open(Accumulator::new(prompt));
            }
        } else if let Some((label, text)) = split_option_line(line) {
            if let ParserState::Open(accumulator) = &mut state {
                accumulator.options.insert(label, text.trim().to_string());
            }
        } else if let Some(rest) = line.strip_prefix("CORRECT:") {
            if let ParserState::Open(accumulator) = &mut state {
                accumulator.correct = Some(rest.trim().to_string());
            }
        } else if let Some(rest) = line.strip_prefix("EXPLANATION:") {
            if let ParserState::Open(accumulator) = &mut state {
                // EXPLANATION is the last field of a question in the expected
                // format, so the accumulator is finalized immediately.
                accumulator.explanation = Some(rest.trim().to_string());
                state.flush_into(&mut candidates);
            }
        }
    }

    // A response missing its trailing blank line can leave the final question
    // open; it is kept only when both closing fields already arrived. A
    // well-formed final question lacking its EXPLANATION line is lost here —
    // known lossy edge case, kept as-is.
    if let ParserState::Open(accumulator) = &state {
        if accumulator.correct.is_some() && accumulator.explanation.is_some() {
            state.flush_into(&mut candidates);
        }
    }

    candidates
        .into_iter()
        .filter_map(Accumulator::into_question)
        .collect()
}

/// A question line starts with a decimal digit and carries a `". "` separator.
fn is_question_start(line: &str) -> bool {
    line.chars().next().is_some_and(|c| c.is_ascii_digit()) && line.contains(". ")
}

/// Splits an `"A) text"`-style option line; `None` when the label part is not
/// one of the four labels.
fn split_option_line(line: &str) -> Option<(OptionLabel, &str)> {
    if !line.starts_with(['A', 'B', 'C', 'D']) {
        return None;
    }
    let (label_part, text) = line.split_once(") ")?;
    Some((OptionLabel::from_input(label_part)?, text))
}
