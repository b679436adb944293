use async_trait::async_trait;
use reqwest::Client;

use crate::{
    error::{LogoGenError, Result},
    models::{GeneratedLogo, GenerationRequest, RelayBody},
    relay::LogoGenerator,
};

/// Shown when a relay answers with an error status but no message.
pub const GENERIC_FAILURE: &str = "Failed to generate logo";

pub const GENERATE_PATH: &str = "/generate-logo";

/// Calls a running relay over HTTP, the way the browser front-end does.
#[derive(Clone)]
pub struct RelayHttpClient {
    client: Client,
    base_url: String,
}

impl RelayHttpClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, GENERATE_PATH)
    }
}

#[async_trait]
impl LogoGenerator for RelayHttpClient {
    async fn generate(&self, request: GenerationRequest) -> Result<GeneratedLogo> {
        let response = self
            .client
            .post(self.endpoint())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        let body = serde_json::from_str::<RelayBody>(&text).ok();

        match body {
            Some(RelayBody::Url { url }) if status.is_success() => Ok(GeneratedLogo { url }),
            Some(RelayBody::Error { error }) if !error.trim().is_empty() => {
                Err(LogoGenError::Upstream {
                    status: status.as_u16(),
                    body: error,
                })
            }
            _ if status.is_success() => Err(LogoGenError::transport(format!(
                "Unexpected relay response: {}",
                text
            ))),
            _ => Err(LogoGenError::Upstream {
                status: status.as_u16(),
                body: GENERIC_FAILURE.to_string(),
            }),
        }
    }
}

#[cfg(all(test, feature = "server"))]
mod tests {
    use super::*;
    use actix_web::{web, App, HttpResponse, HttpServer};

    fn spawn_relay_stub(status: u16, body: &'static str) -> String {
        let server = HttpServer::new(move || {
            App::new().route(
                GENERATE_PATH,
                web::post().to(move || async move {
                    HttpResponse::build(
                        actix_web::http::StatusCode::from_u16(status).expect("valid status"),
                    )
                    .content_type("application/json")
                    .body(body)
                }),
            )
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .expect("bind stub relay");
        let addr = server.addrs()[0];
        actix_web::rt::spawn(server.run());
        format!("http://{}", addr)
    }

    #[actix_web::test]
    async fn test_success_yields_url() {
        let base = spawn_relay_stub(200, r#"{"url":"https://x/img.png"}"#);
        let logo = RelayHttpClient::new(base)
            .generate(GenerationRequest::new("a blue fox"))
            .await
            .unwrap();
        assert_eq!(logo.url, "https://x/img.png");
    }

    #[actix_web::test]
    async fn test_error_body_message_is_surfaced() {
        let base = spawn_relay_stub(429, r#"{"error":"rate limited"}"#);
        let err = RelayHttpClient::new(base)
            .generate(GenerationRequest::new("a blue fox"))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 429);
        assert_eq!(err.to_string(), "rate limited");
    }

    #[actix_web::test]
    async fn test_error_without_message_uses_generic_text() {
        let base = spawn_relay_stub(502, "{}");
        let err = RelayHttpClient::new(base)
            .generate(GenerationRequest::new("a blue fox"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), GENERIC_FAILURE);
    }
}
