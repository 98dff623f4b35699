//! Krishi Mitra Server
//!
//! HTTP adapter around the dialogue engine: one session per client,
//! one `/ask` call per turn.

pub mod http;
pub mod session;
pub mod state;
pub mod weather;

pub use http::create_router;
pub use session::{InMemorySessionStore, SessionStore};
pub use state::AppState;
pub use weather::OpenWeatherClient;

use thiserror::Error;

/// Server errors
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Session error: {0}")]
    Session(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
