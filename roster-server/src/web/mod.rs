//! Web layer for the roster parser.
//!
//! Exposes roster parsing and airport lookup over HTTP.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
