pub mod client;
pub mod config;
pub mod error;
pub mod history;
pub mod logger;
pub mod models;
pub mod onboarding;
pub mod provider;
pub mod relay;
#[cfg(feature = "server")]
pub mod server;
pub mod studio;

pub use client::RelayHttpClient;
pub use config::{Config, ProviderConfig};
pub use error::{ErrorEnvelope, LogoGenError, Result};
pub use history::{FileStore, HistoryStore, KeyValueStore, MemoryStore};
pub use models::*;
pub use onboarding::{FlowState, OnboardingFlow, OnboardingOutcome, OnboardingSelection};
pub use provider::{ImageProvider, OpenAiImageClient};
pub use relay::{GenerationRelay, LogoGenerator};
pub use studio::Studio;
