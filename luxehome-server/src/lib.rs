//! luxehome-server: HTTP API for the LuxeHome back office
//!
//! Public listing search and detail pages, lead capture, and the
//! agent-only inventory, lead pipeline, profile and AI assist endpoints.
//! Postgres is reached directly through sqlx; auth and file storage go
//! through the hosted backend's REST API; text and vision through Gemini.

pub mod ai;
pub mod baas;
pub mod db;
pub mod http;
pub mod state;

#[cfg(test)]
pub(crate) mod test_support;

pub use db::{create_pool, create_pool_with_options};
pub use http::{build_router, run_server, ApiError, ServerConfig};
pub use state::AppState;
