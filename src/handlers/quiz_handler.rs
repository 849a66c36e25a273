use actix_web::{post, web, HttpRequest, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    errors::{AppError, QuizError},
    middleware::get_request_id,
    models::dto::{request::GenerateQuizRequestDto, response::QuizResponse},
};

#[post("/quiz")]
pub async fn generate_quiz(
    req: HttpRequest,
    state: web::Data<AppState>,
    request: web::Json<GenerateQuizRequestDto>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request
        .validate()
        .map_err(|e| QuizError::InvalidRequest(e.to_string()))?;

    let quiz = state
        .quiz_service
        .generate(
            &request.topic,
            request.difficulty.as_deref(),
            state.config.web_question_count,
        )
        .await
        .map_err(|err| {
            log::warn!(
                "Quiz request {} failed: {}",
                get_request_id(&req).unwrap_or_else(|| "-".to_string()),
                err
            );
            if state.config.expose_raw_model_output {
                err
            } else {
                err.without_raw()
            }
        })?;

    Ok(HttpResponse::Ok().json(QuizResponse::from(quiz)))
}
