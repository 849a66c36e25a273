use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequest, CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

use crate::{
    config::Config,
    errors::{AppResult, ModelError},
};

/// Opaque text-in, text-out capability. The cloud quiz model and the local
/// chat assistant both sit behind it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextModel: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, ModelError>;
}

/// Cloud model reached through an OpenAI-compatible chat completions API.
pub struct OpenAiCompatibleModel {
    client: Client<OpenAIConfig>,
    model_name: String,
}

impl OpenAiCompatibleModel {
    pub fn new(api_key: &SecretString, api_base_url: &str, model_name: &str) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(api_key.expose_secret())
            .with_api_base(api_base_url);

        Self {
            client: Client::with_config(openai_config),
            model_name: model_name.to_string(),
        }
    }

    pub fn from_config(config: &Config) -> AppResult<Self> {
        let api_key = config.require_api_key()?;
        Ok(Self::new(
            api_key,
            &config.llm_api_base_url,
            &config.llm_model_name,
        ))
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    fn build_request(&self, prompt: &str) -> Result<CreateChatCompletionRequest, ModelError> {
        let user_message = ChatCompletionRequestUserMessageArgs::default()
            .content(prompt)
            .build()
            .map_err(|e| ModelError::Request(e.to_string()))?;

        CreateChatCompletionRequestArgs::default()
            .model(&self.model_name)
            .messages(vec![ChatCompletionRequestMessage::User(user_message)])
            .build()
            .map_err(|e| ModelError::Request(e.to_string()))
    }
}

#[async_trait]
impl TextModel for OpenAiCompatibleModel {
    async fn generate(&self, prompt: &str) -> Result<String, ModelError> {
        log::debug!("Calling model {} ({} prompt chars)", self.model_name, prompt.len());

        let request = self.build_request(prompt)?;
        let response = self.client.chat().create(request).await.map_err(|e| {
            log::warn!("Model {} request failed: {}", self.model_name, e);
            ModelError::Request(e.to_string())
        })?;

        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(ModelError::EmptyResponse)?;

        Ok(content.trim().to_string())
    }
}
