// Outbound call to the remote model

use crate::config::HazCatConfig;
use crate::envelope::ResponseEnvelope;
use crate::error::{EnvelopeDefect, Result, VerdictError};
use crate::prompt::VerdictRequest;
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use tracing::{debug, warn};

const USER_AGENT_VALUE: &str = concat!("hazcat/", env!("CARGO_PKG_VERSION"));

/// Anything that can send a verdict request to a model and hand back
/// its reply envelope.
///
/// `Ok(None)` means the collaborator returned no response object at all.
#[async_trait]
pub trait ModelBackend: Send + Sync {
    async fn respond(&self, model: &str, request: &VerdictRequest)
    -> Result<Option<ResponseEnvelope>>;
}

/// Responses API over HTTP
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    url: String,
}

impl HttpBackend {
    pub fn new(config: &HazCatConfig) -> Result<Self> {
        config.validate()?;

        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        let mut auth = HeaderValue::from_str(&config.bearer())
            .map_err(|_| VerdictError::Config("api key is not a valid header value".to_string()))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| VerdictError::Config(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: config.responses_url(),
        })
    }
}

#[async_trait]
impl ModelBackend for HttpBackend {
    async fn respond(
        &self,
        model: &str,
        request: &VerdictRequest,
    ) -> Result<Option<ResponseEnvelope>> {
        debug!(url = %self.url, model, "sending verdict request");

        let response = self
            .client
            .post(&self.url)
            .json(&request.to_body(model))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        debug!(status = status.as_u16(), bytes = body.len(), "model replied");

        if !status.is_success() {
            warn!(status = status.as_u16(), "model endpoint returned an error");
            return Err(VerdictError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: Option<ResponseEnvelope> = serde_json::from_str(&body)
            .map_err(|e| EnvelopeDefect::Undecodable(e.to_string()))?;

        Ok(envelope.map(ResponseEnvelope::with_flattened_text))
    }
}
