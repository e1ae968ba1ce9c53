//! Article generation

use super::require_input;
use crate::{
    client::Client,
    error::{Error, Result},
    types::{GenerateContentRequest, GeneratedArticle, GenerationConfig},
};
use serde_json::json;
use tracing::error;
use vellum_core::retry::BackoffStrategy;

/// Article generation resource.
#[derive(Debug, Clone, Copy)]
pub struct Articles<'a> {
    client: &'a Client,
}

impl<'a> Articles<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Generate a Markdown blog post about `topic`.
    ///
    /// The response is constrained to a JSON object with required `title`
    /// and `content` strings. Escaped `\n` sequences the model leaves in the
    /// content are turned into real line breaks.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidInput`] for a blank topic
    /// - [`Error::EmptyResponse`] when the model returns no text
    /// - [`Error::ResponseValidation`] when the text is not the expected JSON
    /// - the last upstream error once retries are spent
    #[tracing::instrument(skip(self), fields(model = %self.client.models().article))]
    pub async fn generate(&self, topic: &str) -> Result<GeneratedArticle> {
        let topic = require_input("topic", topic)?;
        let request = GenerateContentRequest::user_text(format!(
            "Write a blog post about: {}. Format the response as JSON with \"title\" and \"content\" fields. The content should be in Markdown format.",
            topic
        ))
        .with_config(GenerationConfig::json(article_schema()));

        self.client
            .retry_policy()
            .execute(|| self.attempt(&request))
            .await
    }

    async fn attempt(&self, request: &GenerateContentRequest) -> Result<GeneratedArticle> {
        let result = self
            .client
            .generate_content(&self.client.models().article, request)
            .await
            .and_then(|response| {
                let text = response.text().ok_or(Error::EmptyResponse)?;
                parse_article(&text)
            });

        if let Err(e) = &result {
            error!(error = %e, "Article generation failed");
        }
        result
    }
}

fn article_schema() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "title": {"type": "STRING"},
            "content": {"type": "STRING"}
        },
        "required": ["title", "content"]
    })
}

fn parse_article(text: &str) -> Result<GeneratedArticle> {
    let mut article: GeneratedArticle = serde_json::from_str(text)
        .map_err(|e| Error::ResponseValidation(format!("article: {}", e)))?;
    article.content = article.content.replace("\\n", "\n");
    Ok(article)
}
