use async_trait::async_trait;
use serde_json::Value;
use tokio::process::Command;

use crate::{config::Config, errors::ModelError, services::model_service::TextModel};

/// Local chat assistant run as `<path> run <model> -- <message>`.
pub struct OllamaModel {
    executable: String,
    model: String,
}

impl OllamaModel {
    pub fn new(executable: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            executable: executable.into(),
            model: model.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.ollama_path, &config.ollama_model)
    }
}

#[async_trait]
impl TextModel for OllamaModel {
    async fn generate(&self, prompt: &str) -> Result<String, ModelError> {
        log::debug!("Running {} run {}", self.executable, self.model);

        let output = Command::new(&self.executable)
            .arg("run")
            .arg(&self.model)
            .arg("--")
            .arg(prompt)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| {
                ModelError::Process(format!("failed to start {}: {}", self.executable, e))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ModelError::Process(format!(
                "{} exited with {}: {}",
                self.executable,
                output.status,
                stderr.trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let reply = parse_ollama_output(&stdout);
        if reply.is_empty() {
            return Err(ModelError::EmptyResponse);
        }
        Ok(reply)
    }
}

/// Some runtimes wrap the reply in a JSON object; unwrap `response` or
/// `completion` when present, otherwise keep the text as printed.
pub fn parse_ollama_output(stdout: &str) -> String {
    let trimmed = stdout.trim();

    serde_json::from_str::<Value>(trimmed)
        .ok()
        .and_then(|value| {
            ["response", "completion"]
                .iter()
                .find_map(|key| value.get(*key).and_then(Value::as_str).map(str::to_string))
        })
        .filter(|reply| !reply.is_empty())
        .unwrap_or_else(|| trimmed.to_string())
}
