//! HTTP surface of the relay.

use actix_web::{
    error::InternalError, http::StatusCode, web, App, HttpResponse, HttpServer,
};
use serde_json::json;

use crate::{
    client::GENERATE_PATH,
    config::Config,
    models::{GenerationRequest, RelayResponse},
    relay::GenerationRelay,
};

/// Path the original browser front-end posts to.
pub const LEGACY_GENERATE_PATH: &str = "/api/generate-logo";

fn to_http(response: RelayResponse) -> HttpResponse {
    let status = StatusCode::from_u16(response.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    HttpResponse::build(status).json(response.body)
}

async fn generate_logo(
    relay: web::Data<GenerationRelay>,
    request: web::Json<GenerationRequest>,
) -> HttpResponse {
    let request = request.into_inner();
    log::info!(
        "POST {} prompt={:?} style={:?} palette={:?} aspect={:?}",
        GENERATE_PATH,
        request.prompt,
        request.style,
        request.palette,
        request.aspect_ratio
    );
    to_http(relay.respond(request).await)
}

async fn health(relay: web::Data<GenerationRelay>) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "credential_configured": relay.has_credential(),
    }))
}

/// Rejected request bodies get the same `{ error }` envelope as everything
/// else instead of actix's plain-text default.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let message = err.to_string();
        log::warn!("Rejected generation request body: {}", message);
        let response = to_http(RelayResponse::error(400, message.clone()));
        InternalError::from_response(message, response).into()
    })
}

/// Registers the relay routes. Shared by `run` and the tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .route(GENERATE_PATH, web::post().to(generate_logo))
        .route(LEGACY_GENERATE_PATH, web::post().to(generate_logo))
        .route("/health", web::get().to(health));
}

pub async fn run(config: &Config, relay: GenerationRelay) -> std::io::Result<()> {
    let relay = web::Data::new(relay);
    let bind = (config.host.clone(), config.port_or_default());

    HttpServer::new(move || App::new().app_data(relay.clone()).configure(configure))
        .bind(bind)?
        .run()
        .await
}
