// src/web/handlers.rs
//! Request handlers for the suggestion relay API.

use crate::ai::DEFAULT_MODEL;
use crate::web::types::{HealthResponse, RelayErrorBody, RelayRequest, RelayResponse};
use crate::web::upstream::{GeminiClient, UpstreamError};

use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::State;
use tracing::{error, info, warn};
use uuid::Uuid;

pub type RelayError = (Status, Json<RelayErrorBody>);

pub async fn relay_gemini_handler(
    request: Json<RelayRequest>,
    gemini: &State<GeminiClient>,
) -> Result<Json<RelayResponse>, RelayError> {
    let request_id = Uuid::new_v4();

    // Prompt validation runs before the credential check.
    let prompt = match request.prompt.as_deref() {
        Some(prompt) if !prompt.is_empty() => prompt,
        _ => {
            warn!("[{}] Rejected relay request without a prompt", request_id);
            return Err((
                Status::BadRequest,
                Json(RelayErrorBody::new("Prompt is required")),
            ));
        }
    };

    if !gemini.has_credential() {
        error!(
            "[{}] Relay request received but no Gemini API key is configured",
            request_id
        );
        return Err((
            Status::InternalServerError,
            Json(RelayErrorBody::new("Gemini API key is missing")),
        ));
    }

    let model = request.model.as_deref().unwrap_or(DEFAULT_MODEL);
    info!(
        "[{}] Forwarding prompt to {} ({} chars)",
        request_id,
        model,
        prompt.len()
    );

    match gemini.generate_content(prompt, model).await {
        Ok(content) => {
            info!(
                "[{}] Received {} chars from {}",
                request_id,
                content.len(),
                model
            );
            Ok(Json(RelayResponse {
                content,
                model: model.to_string(),
            }))
        }
        Err(UpstreamError::Api {
            status,
            message,
            details,
        }) => {
            error!("[{}] Gemini returned {}: {}", request_id, status, message);
            let status = Status::from_code(status).unwrap_or(Status::InternalServerError);
            let body = match details {
                Some(details) => RelayErrorBody::with_details(message, details),
                None => RelayErrorBody::new(message),
            };
            Err((status, Json(body)))
        }
        Err(err) => {
            error!("[{}] Relay request failed: {}", request_id, err);
            Err((
                Status::InternalServerError,
                Json(RelayErrorBody::new(err.to_string())),
            ))
        }
    }
}

pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: "resumake-relay".to_string(),
    })
}
