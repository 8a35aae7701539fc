use axum::Json;
use axum::Router;
use axum::body::Bytes;
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, put};
use monsvc_registry::RegistryError;
use monsvc_types::{
    MachineId, MachineList, MachinePayload, MessageResponse, Status, StatusPayload,
};
use thiserror::Error;
use utoipa::OpenApi;

use crate::http::HttpState;

pub fn router() -> Router<HttpState> {
    Router::new()
        .route("/machines", get(list_machines).post(create_machine))
        .route("/machines/{mid}/status", put(update_status))
}

#[derive(OpenApi)]
#[openapi(
    paths(list_machines, create_machine, update_status),
    components(schemas(MachinePayload, StatusPayload, MachineList, MessageResponse, Status)),
    tags((name = "machines", description = "Machine provisioning status"))
)]
struct ApiDoc;

pub fn openapi() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid payload: {0}")]
    Payload(String),
    #[error("invalid uri: {0}")]
    Uri(String),
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Payload(_) | ApiError::Uri(_) => StatusCode::BAD_REQUEST,
            ApiError::Registry(RegistryError::AlreadyExists(_)) => StatusCode::BAD_REQUEST,
            ApiError::Registry(RegistryError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Registry(RegistryError::Transition(_)) => StatusCode::CONFLICT,
        }
    }

    /// Client-facing message; details stay in the service log.
    pub fn message(&self) -> &'static str {
        match self {
            ApiError::Payload(_) => "Payload validation error",
            ApiError::Uri(_) => "URI validation error",
            ApiError::Registry(RegistryError::AlreadyExists(_)) => "Machine already exists",
            ApiError::Registry(RegistryError::NotFound(_)) => "Unknown machine Id",
            ApiError::Registry(RegistryError::Transition(_)) => "Status transition rejected",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(MessageResponse::new(self.message()))).into_response()
    }
}

#[utoipa::path(
    get,
    path = "/machines",
    tag = "machines",
    responses((status = 200, description = "Every registered machine", body = MachineList))
)]
async fn list_machines(State(state): State<HttpState>) -> Json<MachineList> {
    tracing::trace!("entry checkpoint");
    let list: MachineList = state.registry.get_all().into_iter().collect();
    tracing::info!("found {} machine(s)", list.items.len());
    Json(list)
}

#[utoipa::path(
    post,
    path = "/machines",
    tag = "machines",
    request_body = MachinePayload,
    responses(
        (status = 201, description = "Machine registered", body = MessageResponse),
        (status = 400, description = "Invalid payload or id already registered", body = MessageResponse)
    )
)]
async fn create_machine(
    State(state): State<HttpState>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    tracing::trace!("entry checkpoint");
    let payload: MachinePayload = parse_body(&body)
        .inspect_err(|err| tracing::info!("new machine payload binding failed: {err}"))?;
    let id = payload.id.clone();
    state.registry.create(payload.into()).inspect_err(|_| {
        tracing::info!("a machine with specified id ({id}) is already registered")
    })?;
    tracing::info!("registered a new machine ({id})");
    Ok((StatusCode::CREATED, Json(MessageResponse::ok())))
}

#[utoipa::path(
    put,
    path = "/machines/{mid}/status",
    tag = "machines",
    params(("mid" = String, Path, description = "Alphanumeric machine id")),
    request_body = StatusPayload,
    responses(
        (status = 200, description = "Status recorded", body = MessageResponse),
        (status = 400, description = "Invalid uri or payload", body = MessageResponse),
        (status = 404, description = "Unknown machine id", body = MessageResponse),
        (status = 409, description = "Transition rejected by the progression policy", body = MessageResponse)
    )
)]
async fn update_status(
    State(state): State<HttpState>,
    mid: Result<Path<String>, PathRejection>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    tracing::trace!("entry checkpoint");
    let id = mid
        .map_err(|err| ApiError::Uri(err.body_text()))
        .and_then(|Path(mid)| MachineId::new(mid).map_err(|err| ApiError::Uri(err.to_string())))
        .inspect_err(|err| tracing::info!("uri binding failed: {err}"))?;
    let payload: StatusPayload = parse_body(&body)
        .inspect_err(|err| tracing::info!("machine status binding failed: {err}"))?;

    let change = state
        .registry
        .update_status(&id, payload.status, payload.ip)
        .inspect_err(|err| match err {
            RegistryError::NotFound(_) => {
                tracing::info!("a machine with specified id ({id}) was not found")
            }
            other => tracing::info!("status report for machine ({id}) rejected: {other}"),
        })?;

    tracing::info!(
        "changed machine ({id}) status from '{}' to '{}'",
        change.previous,
        change.current
    );
    if change.current.is_failure() {
        tracing::warn!("machine ({id}) reported '{}'", change.current);
    } else if change.current.is_terminal() {
        tracing::info!("machine ({id}) finished provisioning");
    }
    Ok(Json(MessageResponse::ok()))
}

// Bodies are decoded regardless of Content-Type so that every malformed
// request gets the same 400 response.
fn parse_body<T: serde::de::DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|e| ApiError::Payload(format!("decode json: {e}")))
}
