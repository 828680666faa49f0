#[cfg(test)]
pub mod fixtures {
    use std::collections::BTreeMap;

    use crate::models::domain::quiz_question::{OptionLabel, QuizQuestion};

    /// A canned model completion in the expected quiz format: three
    /// well-formed questions with correct labels B, A and C.
    pub const SAMPLE_QUIZ_RESPONSE: &str = "\
1. What is 2+2?
A) 3
B) 4
C) 5
D) 6
CORRECT: B
EXPLANATION: Basic arithmetic.

2. Which planet is closest to the sun?
A) Mercury
B) Venus
C) Earth
D) Mars
CORRECT: A
EXPLANATION: Mercury orbits closest to the sun.

3. What does DNA stand for?
A) Dynamic nuclear assembly
B) Dual nitrogen array
C) Deoxyribonucleic acid
D) Diatomic nucleic acid
CORRECT: C
EXPLANATION: DNA is short for deoxyribonucleic acid.
";

    /// The single-question example used throughout the quiz tests:
    /// "What is 2+2?", correct label B, explanation "Basic arithmetic.".
    pub fn sample_question() -> QuizQuestion {
        question_with_correct(
            "What is 2+2?",
            ["3", "4", "5", "6"],
            OptionLabel::B,
            "Basic arithmetic.",
        )
    }

    /// `count` distinct well-formed questions with correct labels cycling
    /// through A, B, C, D.
    pub fn sample_questions(count: usize) -> Vec<QuizQuestion> {
        (0..count)
            .map(|i| {
                question_with_correct(
                    &format!("Sample question {}?", i + 1),
                    ["first", "second", "third", "fourth"],
                    OptionLabel::ALL[i % 4],
                    &format!("Explanation {}.", i + 1),
                )
            })
            .collect()
    }

    pub fn question_with_correct(
        prompt: &str,
        option_texts: [&str; 4],
        correct: OptionLabel,
        explanation: &str,
    ) -> QuizQuestion {
        let options: BTreeMap<OptionLabel, String> = OptionLabel::ALL
            .iter()
            .zip(option_texts)
            .map(|(label, text)| (*label, text.to_string()))
            .collect();

        QuizQuestion {
            prompt: prompt.to_string(),
            options,
            correct,
            explanation: explanation.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use crate::models::domain::quiz_question::OptionLabel;

    #[test]
    fn test_sample_question_shape() {
        let question = sample_question();
        assert_eq!(question.correct, OptionLabel::B);
        assert_eq!(question.options.len(), 4);
        assert_eq!(question.explanation, "Basic arithmetic.");
    }

    #[test]
    fn test_sample_questions_cycle_correct_labels() {
        let questions = sample_questions(5);
        assert_eq!(questions.len(), 5);
        assert_eq!(questions[0].correct, OptionLabel::A);
        assert_eq!(questions[3].correct, OptionLabel::D);
        assert_eq!(questions[4].correct, OptionLabel::A);
    }
}
