use actix_web::{post, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    errors::AppError,
    models::dto::{request::ChatRequestDto, response::ChatResponse},
};

#[post("/chat")]
pub async fn chat(
    state: web::Data<AppState>,
    request: web::Json<ChatRequestDto>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let reply = state.chat_service.ask(&request.message).await?;
    Ok(HttpResponse::Ok().json(ChatResponse::new(reply)))
}
