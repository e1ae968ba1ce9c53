//! Presentation outline generation

use super::require_input;
use crate::{
    client::Client,
    error::{Error, Result},
    types::{GenerateContentRequest, GeneratedPresentation, GenerationConfig},
};
use serde_json::json;
use tracing::error;
use vellum_core::retry::BackoffStrategy;

/// Presentation generation resource.
#[derive(Debug, Clone, Copy)]
pub struct Presentations<'a> {
    client: &'a Client,
}

impl<'a> Presentations<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Generate a five-slide outline about `topic`.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidInput`] for a blank topic
    /// - [`Error::EmptyResponse`] when the model returns no text
    /// - [`Error::ResponseValidation`] when the text is not the expected JSON
    /// - the last upstream error once retries are spent
    #[tracing::instrument(skip(self), fields(model = %self.client.models().presentation))]
    pub async fn generate(&self, topic: &str) -> Result<GeneratedPresentation> {
        let topic = require_input("topic", topic)?;
        let request = GenerateContentRequest::user_text(format!(
            "Create a 5-slide presentation about: {}. Return JSON.",
            topic
        ))
        .with_config(GenerationConfig::json(presentation_schema()));

        self.client
            .retry_policy()
            .execute(|| self.attempt(&request))
            .await
    }

    async fn attempt(&self, request: &GenerateContentRequest) -> Result<GeneratedPresentation> {
        let result = self
            .client
            .generate_content(&self.client.models().presentation, request)
            .await
            .and_then(|response| {
                let text = response.text().ok_or(Error::EmptyResponse)?;
                serde_json::from_str::<GeneratedPresentation>(&text)
                    .map_err(|e| Error::ResponseValidation(format!("presentation: {}", e)))
            });

        if let Err(e) = &result {
            error!(error = %e, "Presentation generation failed");
        }
        result
    }
}

fn presentation_schema() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "title": {"type": "STRING"},
            "slides": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "title": {"type": "STRING"},
                        "content": {"type": "ARRAY", "items": {"type": "STRING"}}
                    }
                }
            }
        }
    })
}
