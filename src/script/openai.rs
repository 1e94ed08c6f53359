//! OpenAI chat completion script writer.

use super::ScriptWriter;
use crate::config::{Prompts, Settings};
use crate::error::{ReelError, Result};
use crate::openai::create_client;
use async_openai::config::OpenAIConfig;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
};
use async_openai::Client;
use async_trait::async_trait;
use std::collections::HashMap;
use tracing::{debug, instrument};

/// Script writer backed by the OpenAI chat API.
pub struct OpenAIScriptWriter {
    client: Client<OpenAIConfig>,
    model: String,
    duration_seconds: u32,
    temperature: Option<f32>,
    prompts: Prompts,
}

impl OpenAIScriptWriter {
    /// Create a script writer from settings.
    pub fn from_settings(settings: &Settings, prompts: Prompts) -> Result<Self> {
        let client = create_client(&settings.openai, None)?;
        Ok(Self::with_client(
            client,
            &settings.script.model,
            settings.script.duration_seconds,
            prompts,
        )
        .with_temperature(settings.script.temperature))
    }

    /// Create a script writer around an existing client.
    pub fn with_client(
        client: Client<OpenAIConfig>,
        model: &str,
        duration_seconds: u32,
        prompts: Prompts,
    ) -> Self {
        Self {
            client,
            model: model.to_string(),
            duration_seconds,
            temperature: None,
            prompts,
        }
    }

    pub fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        self.temperature = temperature;
        self
    }

    /// Render the user prompt for a topic.
    pub fn build_prompt(&self, topic: &str) -> String {
        let mut vars = HashMap::new();
        vars.insert("topic".to_string(), topic.to_string());
        vars.insert("duration".to_string(), self.duration_seconds.to_string());
        self.prompts.render_with_custom(&self.prompts.script.user, &vars)
    }

    fn build_messages(&self, topic: &str) -> Result<Vec<ChatCompletionRequestMessage>> {
        let mut messages = Vec::with_capacity(2);

        if !self.prompts.script.system.is_empty() {
            messages.push(
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(self.prompts.script.system.clone())
                    .build()
                    .map_err(|e| ReelError::Script(e.to_string()))?
                    .into(),
            );
        }

        messages.push(
            ChatCompletionRequestUserMessageArgs::default()
                .content(self.build_prompt(topic))
                .build()
                .map_err(|e| ReelError::Script(e.to_string()))?
                .into(),
        );

        Ok(messages)
    }
}

#[async_trait]
impl ScriptWriter for OpenAIScriptWriter {
    #[instrument(skip(self), fields(model = %self.model))]
    async fn write_script(&self, topic: &str) -> Result<String> {
        let mut request = CreateChatCompletionRequestArgs::default();
        request
            .model(&self.model)
            .messages(self.build_messages(topic)?);

        if let Some(temperature) = self.temperature {
            request.temperature(temperature);
        }

        let request = request
            .build()
            .map_err(|e| ReelError::Script(format!("Failed to build request: {}", e)))?;

        let response = self.client.chat().create(request).await.map_err(|e| {
            ReelError::OpenAI(format!("Failed to generate script: {}", e))
        })?;

        let script = response
            .choices
            .first()
            .and_then(|c| c.message.content.as_ref())
            .ok_or_else(|| ReelError::Script("Empty response from LLM".to_string()))?
            .clone();

        debug!("Generated script of {} characters", script.len());
        Ok(script)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OpenAISettings;
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn writer_for(server: &MockServer) -> OpenAIScriptWriter {
        let settings = OpenAISettings {
            api_base: Some(server.uri()),
            timeout_seconds: 10,
        };
        let client = create_client(&settings, Some("test-key")).unwrap();
        OpenAIScriptWriter::with_client(client, "gpt-4", 45, Prompts::default())
    }

    fn completion(content: &str) -> serde_json::Value {
        serde_json::json!({
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "created": 1700000000,
            "model": "gpt-4",
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop",
                "logprobs": null
            }]
        })
    }

    #[test]
    fn test_prompt_includes_topic_and_duration() {
        let client = create_client(&OpenAISettings::default(), Some("unused")).unwrap();
        let writer = OpenAIScriptWriter::with_client(client, "gpt-4", 30, Prompts::default());
        assert_eq!(writer.build_prompt("Le café"), "Write a 30-second script about: Le café");
    }

    #[test]
    fn test_placeholder_in_topic_sent_literally() {
        let client = create_client(&OpenAISettings::default(), Some("unused")).unwrap();
        let writer = OpenAIScriptWriter::with_client(client, "gpt-4", 45, Prompts::default());
        for _ in 0..50 {
            assert_eq!(
                writer.build_prompt("Why {{duration}} matters"),
                "Write a 45-second script about: Why {{duration}} matters"
            );
        }
    }

    #[tokio::test]
    async fn test_returns_generated_text_verbatim() {
        let server = MockServer::start().await;
        let text = "  Coffee arrived in Paris in 1669.\n\nIt never left.  ";

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer test-key"))
            .and(body_string_contains("Le café"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion(text)))
            .expect(1)
            .mount(&server)
            .await;

        let script = writer_for(&server).write_script("Le café").await.unwrap();
        assert_eq!(script, text);
    }

    #[tokio::test]
    async fn test_service_error_surfaces() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "error": {
                    "message": "Incorrect API key provided",
                    "type": "invalid_request_error",
                    "param": null,
                    "code": "invalid_api_key"
                }
            })))
            .mount(&server)
            .await;

        let err = writer_for(&server).write_script("Le café").await.unwrap_err();
        assert!(matches!(err, ReelError::OpenAI(_)), "unexpected error: {:?}", err);
    }

    #[tokio::test]
    async fn test_empty_choices_is_an_error() {
        let server = MockServer::start().await;
        let mut body = completion("unused");
        body["choices"] = serde_json::json!([]);

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&server)
            .await;

        let err = writer_for(&server).write_script("Le café").await.unwrap_err();
        assert!(matches!(err, ReelError::Script(_)));
    }
}
