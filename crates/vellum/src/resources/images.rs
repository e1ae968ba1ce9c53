//! Image generation

use super::require_input;
use crate::{
    client::Client,
    error::{Error, Result},
    types::{GenerateContentRequest, GeneratedImage, GenerationConfig},
};
use tracing::{debug, error};
use vellum_core::retry::BackoffStrategy;

/// Image generation resource.
#[derive(Debug, Clone, Copy)]
pub struct Images<'a> {
    client: &'a Client,
}

impl<'a> Images<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Generate an image from a text prompt.
    ///
    /// The model is asked for both text and image output; the first inline
    /// image part is returned as a `data:` URL.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidInput`] for a blank prompt
    /// - [`Error::NoImageData`] when the model answers without an image
    /// - the last upstream error once retries are spent
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// # async fn example(client: vellum::Client) -> vellum::Result<()> {
    /// let image = client.images().generate("a lighthouse at dusk").await?;
    /// assert!(image.url.starts_with("data:"));
    /// # Ok(())
    /// # }
    /// ```
    #[tracing::instrument(skip(self), fields(model = %self.client.models().image))]
    pub async fn generate(&self, prompt: &str) -> Result<GeneratedImage> {
        let prompt = require_input("prompt", prompt)?;
        let request = GenerateContentRequest::user_text(format!(
            "Generate an image of: {}",
            prompt
        ))
        .with_config(GenerationConfig {
            response_modalities: vec!["TEXT".to_string(), "IMAGE".to_string()],
            ..Default::default()
        });

        self.client
            .retry_policy()
            .execute(|| self.attempt(&request))
            .await
    }

    async fn attempt(&self, request: &GenerateContentRequest) -> Result<GeneratedImage> {
        let result = self
            .client
            .generate_content(&self.client.models().image, request)
            .await
            .and_then(|response| {
                let data = response.inline_data().ok_or(Error::NoImageData)?;
                debug!(mime_type = %data.mime_type, bytes = data.data.len(), "Image received");
                Ok(GeneratedImage {
                    url: data.to_data_url(),
                    mime_type: data.mime_type.clone(),
                })
            });

        if let Err(e) = &result {
            error!(error = %e, "Image generation failed");
        }
        result
    }
}
