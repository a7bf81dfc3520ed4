//! HazCat client

use crate::backend::{HttpBackend, ModelBackend};
use crate::config::HazCatConfig;
use crate::envelope::extract_output_text;
use crate::error::{Result, VerdictError};
use crate::media::{ImageSubmission, MediaType};
use crate::prompt::PromptBuilder;
use crate::verdict::{Verdict, parse_verdict};
use std::sync::Arc;
use tracing::{debug, warn};

/// Asks a multimodal model whether an image contains a cat.
///
/// Each call validates the image, builds the request, makes one call to
/// the backend and parses the reply. Nothing is shared between calls
/// except the immutable prompt and the backend, so a single client can
/// be used concurrently.
#[derive(Clone)]
pub struct HazCat {
    backend: Arc<dyn ModelBackend>,
    model: String,
    prompt: PromptBuilder,
}

impl HazCat {
    /// Create a client that talks to the configured HTTP endpoint
    pub fn new(config: HazCatConfig) -> Result<Self> {
        let backend = HttpBackend::new(&config)?;
        Ok(Self {
            backend: Arc::new(backend),
            model: config.model,
            prompt: PromptBuilder::new().with_detail(config.detail),
        })
    }

    /// Create a client over a custom backend
    pub fn with_backend(model: impl Into<String>, backend: Arc<dyn ModelBackend>) -> Self {
        Self {
            backend,
            model: model.into(),
            prompt: PromptBuilder::new(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Check a base64-encoded image
    pub async fn check(&self, image: impl Into<String>, media_type: MediaType) -> Result<Verdict> {
        let submission = ImageSubmission::new(image, media_type)?;
        self.check_submission(&submission).await
    }

    /// Check an image whose media type is still a raw MIME string
    pub async fn check_raw(&self, image: impl Into<String>, media_type: &str) -> Result<Verdict> {
        let submission = ImageSubmission::parse(image, media_type)?;
        self.check_submission(&submission).await
    }

    /// Check an already validated submission
    pub async fn check_submission(&self, submission: &ImageSubmission) -> Result<Verdict> {
        debug!(
            model = %self.model,
            media_type = %submission.media_type(),
            decoded_bytes = submission.decoded_len(),
            "checking image"
        );

        let request = self.prompt.build(submission);
        let envelope = self.backend.respond(&self.model, &request).await?;

        let verdict = extract_output_text(envelope.as_ref())
            .map_err(VerdictError::from)
            .and_then(parse_verdict)
            .inspect_err(|e| warn!(error = %e, "model reply rejected"))?;

        debug!(contains_cat = verdict.contains_cat, "verdict parsed");
        Ok(verdict)
    }
}

impl std::fmt::Debug for HazCat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HazCat")
            .field("model", &self.model)
            .field("prompt", &self.prompt)
            .finish_non_exhaustive()
    }
}
