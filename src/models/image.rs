use serde::{Deserialize, Serialize};

use super::common::GenerationDefaults;

/// What the relay accepts on `POST /generate-logo`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    #[serde(default)]
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub palette: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<String>,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Default::default()
        }
    }

    pub fn with_defaults(mut self, defaults: &GenerationDefaults) -> Self {
        self.style = Some(defaults.style.as_str().to_string());
        self.palette = Some(defaults.palette.as_str().to_string());
        self.aspect_ratio = Some(defaults.aspect_ratio.as_str().to_string());
        self
    }

    /// The text sent upstream. Style metadata is folded into the prompt as
    /// trailing sentences; blank fields are left out.
    pub fn provider_prompt(&self) -> String {
        let mut prompt = self.prompt.trim().to_string();
        let clauses = [
            ("Style", &self.style),
            ("Color palette", &self.palette),
            ("Aspect ratio", &self.aspect_ratio),
        ];
        for (label, value) in clauses {
            if let Some(value) = value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
                if !prompt.ends_with('.') {
                    prompt.push('.');
                }
                prompt.push_str(&format!(" {}: {}.", label, value));
            }
        }
        prompt
    }
}

/// A successful generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedLogo {
    /// Provider-hosted and time-limited; the provider decides when it expires.
    pub url: String,
}

/// Body sent to the provider's image endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ProviderImageRequest {
    pub prompt: String,
    pub n: u32,
    pub size: String,
    pub model: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProviderImage {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub revised_prompt: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProviderImageResponse {
    #[serde(default)]
    pub data: Vec<ProviderImage>,
}

impl ProviderImageResponse {
    pub fn first_url(&self) -> Option<&str> {
        self.data.first().and_then(|image| image.url.as_deref())
    }
}

/// Wire envelope of every relay answer: either `{ "url": … }` or
/// `{ "error": … }`, never both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RelayBody {
    Url { url: String },
    Error { error: String },
}

/// A relay answer with the HTTP status it goes out under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayResponse {
    pub status: u16,
    pub body: RelayBody,
}

impl RelayResponse {
    pub fn ok(url: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: RelayBody::Url { url: url.into() },
        }
    }

    pub fn error(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            body: RelayBody::Error {
                error: message.into(),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.body, RelayBody::Url { .. })
    }
}
