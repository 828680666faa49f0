//! Prompt constants and fixed user-facing replies.
//!
//! The quiz output format described in [`quiz_generation_prompt`] is a loose
//! convention with the model, not a guaranteed contract; the parser in
//! `services::quiz_parser` is the component that enforces what actually gets
//! accepted.

pub const CHAT_SYSTEM_PROMPT: &str = "You are ASTRA AI, a helpful study assistant. Keep responses concise and relevant. If a document is loaded, use its content to provide accurate answers. Maintain a friendly and educational tone while being precise and informative.";

pub const QUIZ_SYSTEM_PROMPT: &str = "You are a quiz generator. Generate clear, focused questions with exactly four options (A, B, C, D). Provide the correct answer and explanation for each question.";

pub const INVALID_QUESTION_REPLY: &str = "Please ask a valid question.";

pub const FAREWELL_REPLY: &str =
    "Goodbye! Feel free to start a new conversation when you need help!";

pub const INFERENCE_FAILURE_REPLY: &str =
    "I apologize, but I encountered an error processing your question. Please try again.";

/// How much of the loaded document is quoted in the quiz-generation prompt.
pub const QUIZ_CONTEXT_CHARS: usize = 2000;

/// Builds the quiz-generation user prompt over the first
/// [`QUIZ_CONTEXT_CHARS`] characters of the document text.
pub fn quiz_generation_prompt(question_count: usize, document_text: &str) -> String {
    let context: String = document_text.chars().take(QUIZ_CONTEXT_CHARS).collect();

    format!(
        "Generate {count} multiple choice questions based on this text. \
Make questions that test understanding of key concepts.\n\n\
Text for quiz: {context}...\n\n\
Format each question exactly like this example:\n\n\
1. Question text goes here?\n\
A) First option\n\
B) Second option\n\
C) Third option\n\
D) Fourth option\n\
CORRECT: B\n\
EXPLANATION: Explanation of why B is correct goes here.\n\n\
Generate {count} questions in exactly this format, numbered from 1 to {count}.",
        count = question_count,
        context = context,
    )
}
