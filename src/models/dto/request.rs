use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct LoadDocumentRequest {
    pub path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AskRequest {
    pub question: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerateQuizRequest {
    #[serde(default = "default_question_count")]
    pub question_count: usize,
}

fn default_question_count() -> usize {
    5
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubmitAnswerRequest {
    pub answer: String,
}
