use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use async_trait::async_trait;
use futures::FutureExt;

use crate::{
    config::ProviderConfig,
    error::{ErrorEnvelope, LogoGenError, Result},
    logger,
    models::{GeneratedLogo, GenerationRequest, ProviderImageRequest, RelayResponse},
    provider::ImageProvider,
};

pub const MISSING_CREDENTIAL: &str = "OpenAI API key not set.";
pub const MISSING_PROMPT: &str = "Prompt is required.";

/// Anything that can turn a request into a logo: the relay itself, or a
/// client talking to a relay over HTTP.
#[async_trait]
pub trait LogoGenerator: Send + Sync {
    async fn generate(&self, request: GenerationRequest) -> Result<GeneratedLogo>;
}

/// Forwards one prompt to the image provider and normalizes whatever comes
/// back. Holds no per-request state, so one instance serves every caller.
#[derive(Clone)]
pub struct GenerationRelay {
    provider: Arc<dyn ImageProvider>,
    config: ProviderConfig,
}

impl GenerationRelay {
    pub fn new(provider: Arc<dyn ImageProvider>, config: ProviderConfig) -> Self {
        Self { provider, config }
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    pub fn has_credential(&self) -> bool {
        self.config.credential().is_some()
    }

    fn provider_request(&self, request: &GenerationRequest) -> ProviderImageRequest {
        ProviderImageRequest {
            prompt: request.provider_prompt(),
            n: self.config.num_images,
            size: self.config.size.clone(),
            model: self.config.model.clone(),
        }
    }

    /// Exactly one upstream attempt. Credential and prompt are checked
    /// first; neither failure reaches the provider.
    pub async fn generate(&self, request: GenerationRequest) -> Result<GeneratedLogo> {
        let api_key = self
            .config
            .credential()
            .ok_or_else(|| LogoGenError::Config(MISSING_CREDENTIAL.into()))?;

        if request.prompt.trim().is_empty() {
            return Err(LogoGenError::Validation(MISSING_PROMPT.into()));
        }

        let upstream = self.provider_request(&request);
        let _timer = logger::timer("image generation");

        let response = self.provider.generate_image(api_key, &upstream).await?;
        let url = response.first_url().ok_or_else(|| {
            LogoGenError::transport("Image provider returned no image URL")
        })?;

        Ok(GeneratedLogo {
            url: url.to_string(),
        })
    }

    /// `generate`, flattened into the wire envelope. A panic inside the
    /// provider is caught here and reported like any other failure.
    pub async fn respond(&self, request: GenerationRequest) -> RelayResponse {
        match AssertUnwindSafe(self.generate(request)).catch_unwind().await {
            Ok(Ok(logo)) => RelayResponse::ok(logo.url),
            Ok(Err(err)) => {
                let envelope = ErrorEnvelope::from(&err);
                log::warn!("Logo generation failed ({}): {}", envelope.status, envelope.message);
                RelayResponse::error(envelope.status, envelope.message)
            }
            Err(payload) => {
                let envelope = ErrorEnvelope::from_panic(&*payload);
                log::error!("Logo generation panicked: {}", envelope.message);
                RelayResponse::error(envelope.status, envelope.message)
            }
        }
    }
}

#[async_trait]
impl LogoGenerator for GenerationRelay {
    async fn generate(&self, request: GenerationRequest) -> Result<GeneratedLogo> {
        GenerationRelay::generate(self, request).await
    }
}
