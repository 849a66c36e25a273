use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct GenerateQuizRequestDto {
    // Blank topics are rejected by the pipeline, not here, so the caller
    // gets the "Missing topic" message.
    #[serde(default)]
    #[validate(length(max = 200))]
    pub topic: String,

    #[validate(length(max = 50))]
    pub difficulty: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ChatRequestDto {
    #[serde(default)]
    #[validate(length(max = 10000))]
    pub message: String,
}
