//! Application state
//!
//! Shared across all handlers. Everything behind `Arc` is immutable
//! after startup except the per-session contexts inside the store.

use std::sync::Arc;

use krishi_config::Settings;
use krishi_dialogue::TurnResolver;

use crate::session::SessionStore;

#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub resolver: Arc<TurnResolver>,
    pub sessions: Arc<dyn SessionStore>,
}

impl AppState {
    pub fn new(
        settings: Arc<Settings>,
        resolver: Arc<TurnResolver>,
        sessions: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            settings,
            resolver,
            sessions,
        }
    }
}
