use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// The four fixed option labels of a multiple-choice question.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
pub enum OptionLabel {
    A,
    B,
    C,
    D,
}

impl OptionLabel {
    pub const ALL: [OptionLabel; 4] = [
        OptionLabel::A,
        OptionLabel::B,
        OptionLabel::C,
        OptionLabel::D,
    ];

    /// Normalizes free-form input (answer submissions, `CORRECT:` values) to
    /// a canonical label. Trims and ignores ASCII case; anything else is
    /// `None`.
    pub fn from_input(input: &str) -> Option<Self> {
        match input.trim() {
            s if s.eq_ignore_ascii_case("a") => Some(OptionLabel::A),
            s if s.eq_ignore_ascii_case("b") => Some(OptionLabel::B),
            s if s.eq_ignore_ascii_case("c") => Some(OptionLabel::C),
            s if s.eq_ignore_ascii_case("d") => Some(OptionLabel::D),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OptionLabel::A => "A",
            OptionLabel::B => "B",
            OptionLabel::C => "C",
            OptionLabel::D => "D",
        }
    }
}

impl fmt::Display for OptionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A well-formed multiple-choice question.
///
/// Instances only exist when all four option labels are present, the correct
/// label is one of them, and prompt and explanation are non-empty after
/// trimming. The quiz-response parser is the gate; malformed candidates are
/// discarded there and never reach this type.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuizQuestion {
    pub prompt: String,
    pub options: BTreeMap<OptionLabel, String>,
    pub correct: OptionLabel,
    pub explanation: String,
}
