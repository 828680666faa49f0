pub mod conversation;
pub mod quiz_question;
pub mod quiz_session;

pub use conversation::{ChatMessage, Conversation, LoadedDocument, Role};
pub use quiz_question::{OptionLabel, QuizQuestion};
pub use quiz_session::{AnswerOutcome, QuizSession, QuizStatusReport};
