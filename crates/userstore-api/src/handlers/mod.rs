//! HTTP request handlers.
//!
//! - `users` - create and lookup endpoints
//! - `health` - database-backed health probe
//!
//! Failures are returned as `ApiError`, which renders a coded JSON body with
//! a fixed message per error kind.

pub mod health;
pub mod users;

pub use health::health_check;
pub use users::{create_user, get_user_by_id};
