//! userstore HTTP API.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod handlers;
pub mod server;

pub use config::Config;
pub use error::{ApiError, ErrorDetail, ErrorResponse};
pub use server::{create_router, create_router_with_timeout, start_server};
use userstore_core::UserService;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    /// User operations over the shared database pool
    pub users: UserService,
}

impl AppState {
    /// Wraps a user service as router state.
    pub fn new(users: UserService) -> Self {
        Self { users }
    }
}
