use crate::{
    config::ProviderConfig,
    error::{LogoGenError, Result},
    models::{ProviderImageRequest, ProviderImageResponse},
    provider::ImageProvider,
};
use async_trait::async_trait;
use reqwest::Client;

const GENERATIONS_PATH: &str = "/v1/images/generations";

#[derive(Clone)]
pub struct OpenAiImageClient {
    client: Client,
    base_url: String,
}

impl OpenAiImageClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &ProviderConfig) -> Self {
        Self::new(config.base_url.clone())
    }

    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, GENERATIONS_PATH)
    }
}

#[async_trait]
impl ImageProvider for OpenAiImageClient {
    async fn generate_image(
        &self,
        api_key: &str,
        request: &ProviderImageRequest,
    ) -> Result<ProviderImageResponse> {
        log::info!(
            "Generating image with model: {} ({})",
            request.model,
            request.size
        );
        log::debug!("Image generation prompt: {}", request.prompt);

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                log::error!("Image provider request failed: {}", e);
                LogoGenError::from(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::warn!("Image provider answered {}: {}", status, body);
            return Err(LogoGenError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            LogoGenError::transport(format!("Unexpected image provider response: {}", e))
        })
    }
}

#[cfg(all(test, feature = "server"))]
mod tests {
    use super::*;
    use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
    use serde_json::{json, Value};

    /// Serves `handler` on an ephemeral port and returns its base URL.
    fn spawn_stub<F>(handler: F) -> String
    where
        F: Fn(HttpRequest, web::Json<Value>) -> HttpResponse + Clone + Send + 'static,
    {
        let server = HttpServer::new(move || {
            let handler = handler.clone();
            App::new().route(
                GENERATIONS_PATH,
                web::post().to(move |req: HttpRequest, body: web::Json<Value>| {
                    let handler = handler.clone();
                    async move { handler(req, body) }
                }),
            )
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .expect("bind stub provider");
        let addr = server.addrs()[0];
        actix_web::rt::spawn(server.run());
        format!("http://{}", addr)
    }

    fn request() -> ProviderImageRequest {
        ProviderImageRequest {
            prompt: "a blue fox".into(),
            n: 1,
            size: "1024x1024".into(),
            model: "dall-e-3".into(),
        }
    }

    #[actix_web::test]
    async fn test_success_sends_fixed_parameters() {
        let base = spawn_stub(|req, body| {
            let auth = req
                .headers()
                .get("authorization")
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default();
            if auth != "Bearer sk-test"
                || body["n"] != 1
                || body["size"] != "1024x1024"
                || body["model"] != "dall-e-3"
                || body["prompt"] != "a blue fox"
            {
                return HttpResponse::BadRequest().body("unexpected request");
            }
            HttpResponse::Ok().json(json!({ "data": [{ "url": "https://x/img.png" }] }))
        });

        let client = OpenAiImageClient::new(base);
        let response = client.generate_image("sk-test", &request()).await.unwrap();
        assert_eq!(response.first_url(), Some("https://x/img.png"));
    }

    #[actix_web::test]
    async fn test_non_success_keeps_status_and_raw_body() {
        let base = spawn_stub(|_, _| HttpResponse::TooManyRequests().body("rate limited"));

        let client = OpenAiImageClient::new(base);
        match client.generate_image("sk-test", &request()).await {
            Err(LogoGenError::Upstream { status, body }) => {
                assert_eq!(status, 429);
                assert_eq!(body, "rate limited");
            }
            other => panic!("expected upstream error, got {:?}", other),
        }
    }

    #[actix_web::test]
    async fn test_unparseable_success_body_is_transport_error() {
        let base = spawn_stub(|_, _| HttpResponse::Ok().body("not json"));

        let client = OpenAiImageClient::new(base);
        let err = client.generate_image("sk-test", &request()).await.unwrap_err();
        assert!(matches!(err, LogoGenError::Transport { message: Some(_) }));
    }

    #[actix_web::test]
    async fn test_unreachable_provider_is_transport_error() {
        let client = OpenAiImageClient::new("http://127.0.0.1:9");
        let err = client.generate_image("sk-test", &request()).await.unwrap_err();
        assert_eq!(err.status_code(), 500);
        assert!(matches!(err, LogoGenError::Transport { .. }));
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let client = OpenAiImageClient::new("https://api.openai.com/");
        assert_eq!(client.endpoint(), "https://api.openai.com/v1/images/generations");
    }
}
