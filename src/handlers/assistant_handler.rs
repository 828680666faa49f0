use std::path::Path;

use actix_web::{get, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    errors::AppError,
    models::dto::{
        request::{AskRequest, GenerateQuizRequest, LoadDocumentRequest, SubmitAnswerRequest},
        response::{
            AnswerFeedbackDto, AskResponse, CurrentQuestionResponse, DocumentDto,
            GenerateQuizResponse, MessageResponse, QuestionDto, QuizStatusDto,
        },
    },
};

#[post("/api/documents")]
pub async fn load_document(
    state: web::Data<AppState>,
    request: web::Json<LoadDocumentRequest>,
) -> Result<HttpResponse, AppError> {
    let mut assistant = state.assistant.write().await;
    let document = assistant.load_document(Path::new(&request.path))?;
    Ok(HttpResponse::Created().json(DocumentDto::from(document)))
}

#[post("/api/chat")]
pub async fn ask(
    state: web::Data<AppState>,
    request: web::Json<AskRequest>,
) -> Result<HttpResponse, AppError> {
    let mut assistant = state.assistant.write().await;
    let answer = assistant.ask(&request.question).await;
    Ok(HttpResponse::Ok().json(AskResponse {
        answer,
        conversation_active: assistant.conversation().is_active(),
    }))
}

#[post("/api/session/reset")]
pub async fn reset_session(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let mut assistant = state.assistant.write().await;
    assistant.reset_session();
    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Session reset".to_string(),
    }))
}

#[post("/api/quiz")]
pub async fn generate_quiz(
    state: web::Data<AppState>,
    request: web::Json<GenerateQuizRequest>,
) -> Result<HttpResponse, AppError> {
    let mut assistant = state.assistant.write().await;
    let generated = assistant.generate_quiz(request.question_count).await;

    let body = GenerateQuizResponse {
        generated,
        error: if generated {
            None
        } else {
            assistant.last_error().map(str::to_string)
        },
        status: assistant.quiz_status().into(),
    };

    if generated {
        Ok(HttpResponse::Created().json(body))
    } else {
        Ok(HttpResponse::UnprocessableEntity().json(body))
    }
}

#[get("/api/quiz/current")]
pub async fn current_question(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let assistant = state.assistant.read().await;
    let progress = assistant.quiz_status().progress;
    let question = assistant
        .current_question()
        .map(|question| QuestionDto::from_question(question, progress));
    Ok(HttpResponse::Ok().json(CurrentQuestionResponse { question }))
}

#[post("/api/quiz/answers")]
pub async fn submit_answer(
    state: web::Data<AppState>,
    request: web::Json<SubmitAnswerRequest>,
) -> Result<HttpResponse, AppError> {
    let mut assistant = state.assistant.write().await;
    let feedback = assistant.submit_answer(&request.answer);
    let status = assistant.quiz_status();
    Ok(HttpResponse::Ok().json(AnswerFeedbackDto::new(feedback, status)))
}

#[get("/api/quiz/status")]
pub async fn quiz_status(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let assistant = state.assistant.read().await;
    Ok(HttpResponse::Ok().json(QuizStatusDto::from(assistant.quiz_status())))
}
