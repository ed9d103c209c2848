//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use tower_http::trace::TraceLayer;

use crate::domain::DomainError;
use crate::engine::{DepartureBoard, QueryError};
use crate::timetable::TimetableStore;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/routes", get(list_routes))
        .route("/board", get(board))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// The route catalogue.
async fn list_routes(State(state): State<AppState>) -> Json<RoutesResponse> {
    let routes = state
        .data
        .store
        .routes()
        .into_iter()
        .map(RouteResult::from_route)
        .collect();

    Json(RoutesResponse { routes })
}

/// Countdown and upcoming departures for one route and direction.
async fn board(
    State(state): State<AppState>,
    Query(req): Query<BoardRequest>,
) -> Result<Json<BoardResponse>, AppError> {
    let selection = req.selection()?;
    let now = match req.at() {
        Ok(Some(at)) => at,
        Ok(None) => state.now(),
        Err(e) => {
            return Err(AppError::BadRequest {
                message: format!("invalid at {:?}: {e}", req.at.as_deref().unwrap_or("")),
            });
        }
    };

    let data = &state.data;
    let snapshot = DepartureBoard::new(&data.store, &data.calendar, &data.rules, &state.engine)
        .evaluate(now, &selection)?;

    Ok(Json(BoardResponse::from_snapshot(&selection, &snapshot)))
}

/// Application error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    BadRequest { message: String },

    #[error("{message}")]
    NotFound { message: String },
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl From<QueryError> for AppError {
    fn from(e: QueryError) -> Self {
        AppError::NotFound {
            message: e.to_string(),
        }
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        tracing::warn!(%status, error = %self, "request failed");

        let body = Json(ErrorResponse {
            error: self.to_string(),
        });
        (status, body).into_response()
    }
}
