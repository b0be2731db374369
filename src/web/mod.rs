// src/web/mod.rs
//! Rocket server that relays suggestion prompts to the Gemini API.
//!
//! The browser-facing contract is a single `POST /api/gemini` endpoint that
//! keeps the API key on the server side. Error bodies always carry an
//! `error` string and, when the upstream supplied one, a `details` value.

pub mod handlers;
pub mod types;
pub mod upstream;

pub use types::*;
pub use upstream::{GeminiClient, GEMINI_API_BASE};

use anyhow::{bail, Result};
use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::{Header, Status};
use rocket::serde::json::Json;
use rocket::{catchers, get, options, post, routes, Build, Request, Response, Rocket, State};
use tracing::info;

// ===== CORS =====

pub struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "POST, GET, OPTIONS",
        ));
        response.set_header(Header::new("Access-Control-Allow-Headers", "*"));
    }
}

// ===== Routes =====

#[post("/gemini", data = "<request>")]
pub async fn relay_gemini(
    request: Json<RelayRequest>,
    gemini: &State<GeminiClient>,
) -> Result<Json<RelayResponse>, handlers::RelayError> {
    handlers::relay_gemini_handler(request, gemini).await
}

#[get("/health")]
pub async fn health() -> Json<HealthResponse> {
    handlers::health_handler().await
}

#[options("/<_..>")]
pub async fn options() -> Status {
    Status::Ok
}

// ===== Error catchers =====

#[rocket::catch(400)]
pub fn bad_request() -> Json<RelayErrorBody> {
    Json(RelayErrorBody::new("Invalid request format"))
}

#[rocket::catch(422)]
pub fn unprocessable_entity() -> Json<RelayErrorBody> {
    Json(RelayErrorBody::new("Invalid request format"))
}

#[rocket::catch(500)]
pub fn internal_error() -> Json<RelayErrorBody> {
    Json(RelayErrorBody::new("Internal server error"))
}

// ===== Server =====

/// Assemble the relay rocket without launching it. Tests drive this
/// directly through `rocket::local`.
pub fn build_relay(gemini: GeminiClient) -> Rocket<Build> {
    rocket::build()
        .attach(Cors)
        .manage(gemini)
        .register(
            "/api",
            catchers![bad_request, unprocessable_entity, internal_error],
        )
        .mount("/api", routes![relay_gemini, health, options])
}

pub async fn start_relay_server(upstream_url: String, api_key: String, port: u16) -> Result<()> {
    if api_key.is_empty() {
        bail!("GEMINI_API_KEY is not set. Export it before starting the relay server.");
    }

    let gemini = GeminiClient::new(upstream_url, api_key)?;

    info!("Starting suggestion relay on port {}", port);
    info!("Relay endpoint: POST /api/gemini");

    let figment = rocket::Config::figment()
        .merge(("port", port))
        .merge(("address", "0.0.0.0"));

    let _rocket = build_relay(gemini).configure(figment).launch().await?;

    Ok(())
}
