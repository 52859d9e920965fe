//! REST surface over the game service.

use std::str::FromStr;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, Request, State};
use axum::http::{HeaderValue, Method, StatusCode, header};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use derive_new::new;
use serde::de::DeserializeOwned;
use serde_json::json;
use tictactoe_core::Minimax;
use tower::ServiceBuilder;
use tracing::{debug, error, info, instrument, warn};

use crate::service::{GameService, ServiceError};
use crate::store::{GameId, MemoryRepository, StoreErrorKind};
use crate::wire::{CreateGameRequest, ErrorResponse, GameResponse, MoveRequest, validate_field};

/// Service type wired into the HTTP server.
pub type AppService = GameService<MemoryRepository, Minimax>;

/// Shared handler state.
#[derive(Clone, new)]
pub struct AppState {
    service: Arc<AppService>,
    default_size: usize,
}

/// Error rendered as `{"error": "..."}` with a status code.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        let status = match &err {
            ServiceError::Store(e) if e.kind == StoreErrorKind::NotFound => StatusCode::NOT_FOUND,
            ServiceError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServiceError::InvalidSize(_)
            | ServiceError::InvalidField(_)
            | ServiceError::InvalidMove(_)
            | ServiceError::GameFinished(_)
            | ServiceError::WrongTurn(_)
            | ServiceError::Board(_) => StatusCode::BAD_REQUEST,
        };
        Self::new(status, err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = %self.status, message = %self.message, "Request failed");
        } else {
            warn!(status = %self.status, message = %self.message, "Request rejected");
        }
        (self.status, Json(ErrorResponse { error: self.message })).into_response()
    }
}

/// Builds the application router.
#[instrument(skip(state), fields(default_size = state.default_size))]
pub fn router(state: AppState) -> Router {
    info!("Building router");
    Router::new()
        .route("/health", get(health))
        .route("/game", axum::routing::post(create_game))
        .route("/game/{id}", get(get_game).post(make_move))
        .fallback(not_found)
        .with_state(state)
        .layer(middleware::from_fn(cors))
        .layer(ServiceBuilder::new().map_request(|req: Request| {
            info!(method = %req.method(), uri = %req.uri(), "Incoming HTTP request");
            req
        }))
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok", "service": "tictactoe" }))
}

async fn not_found() -> ApiError {
    ApiError::new(StatusCode::NOT_FOUND, "endpoint not found")
}

#[instrument(skip_all)]
async fn create_game(State(state): State<AppState>, body: Bytes) -> Result<Response, ApiError> {
    let req: CreateGameRequest = if body.is_empty() {
        CreateGameRequest::default()
    } else {
        parse_json(&body)?
    };
    let size = req.size.unwrap_or(state.default_size);

    let service = state.service.clone();
    let game = run_blocking(move || service.create_game(size)).await?;

    info!(id = %game.id(), size, "Game created");
    Ok((StatusCode::CREATED, Json(GameResponse::from(&game))).into_response())
}

#[instrument(skip(state))]
async fn get_game(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<GameResponse>, ApiError> {
    let id = parse_id(&id)?;
    let game = state.service.get_game(&id)?;
    Ok(Json(GameResponse::from(&game)))
}

#[instrument(skip(state, body))]
async fn make_move(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<GameResponse>, ApiError> {
    let id = parse_id(&id)?;
    let req: MoveRequest = parse_json(&body)?;

    let current = state.service.get_game(&id)?;
    let field = validate_field(&req.field, current.board().size())?;

    let service = state.service.clone();
    let game = run_blocking(move || service.play_turn(&id, &field)).await?;

    debug!(status = %game.status(), "Move processed");
    Ok(Json(GameResponse::from(&game)))
}

/// Short-circuits preflight requests and adds CORS headers to every response.
async fn cors(req: Request, next: Next) -> Response {
    let mut response = if req.method() == Method::OPTIONS {
        StatusCode::OK.into_response()
    } else {
        next.run(req).await
    };

    let headers = response.headers_mut();
    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    );
    response
}

fn parse_id(raw: &str) -> Result<GameId, ApiError> {
    GameId::from_str(raw)
        .map_err(|e| ApiError::new(StatusCode::BAD_REQUEST, format!("invalid game UUID: {}", e)))
}

fn parse_json<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body)
        .map_err(|e| ApiError::new(StatusCode::BAD_REQUEST, format!("invalid JSON: {}", e)))
}

/// Runs service work off the async runtime; searches can be long.
async fn run_blocking<T, F>(work: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, ServiceError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, format!("worker failed: {}", e)))?
        .map_err(ApiError::from)
}
