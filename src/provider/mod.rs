pub mod openai_client;

use crate::{
    error::Result,
    models::{ProviderImageRequest, ProviderImageResponse},
};
use async_trait::async_trait;

pub use openai_client::OpenAiImageClient;

/// An upstream image-generation service. One call, one answer: no retries,
/// no timeout beyond what the transport imposes.
#[async_trait]
pub trait ImageProvider: Send + Sync {
    async fn generate_image(
        &self,
        api_key: &str,
        request: &ProviderImageRequest,
    ) -> Result<ProviderImageResponse>;
}
