//! Web layer for the departure board.
//!
//! Provides JSON endpoints for the route catalogue and board evaluation.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
