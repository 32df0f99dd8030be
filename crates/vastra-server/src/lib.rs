//! VastraVaani HTTP API: the axum router, shared state and the handlers
//! that glue the feature crates to their JSON endpoints.

pub mod advisor;
pub mod auth;
pub mod error;
pub mod palette;
pub mod routes;
pub mod state;
pub mod upload;

pub use routes::build_router;
pub use state::{AppState, Endpoints};
