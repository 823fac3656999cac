//! Application state shared across handlers

use std::sync::Arc;

use sqlx::PgPool;

use crate::ai::LanguageModel;
use crate::baas::{AuthProvider, ObjectStore};

/// Shared application state
///
/// Immutable after startup; handlers receive it as `State<Arc<AppState>>`.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub auth: Arc<dyn AuthProvider>,
    pub storage: Arc<dyn ObjectStore>,
    pub model: Arc<dyn LanguageModel>,
    /// Demo reset secret; `None` disables the endpoint
    pub reset_secret: Option<String>,
}

impl AppState {
    pub fn new(
        pool: PgPool,
        auth: Arc<dyn AuthProvider>,
        storage: Arc<dyn ObjectStore>,
        model: Arc<dyn LanguageModel>,
    ) -> Self {
        Self {
            pool,
            auth,
            storage,
            model,
            reset_secret: None,
        }
    }

    pub fn with_reset_secret(mut self, secret: Option<String>) -> Self {
        self.reset_secret = secret;
        self
    }
}
