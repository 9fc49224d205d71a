//! Core domain models, validation and persistence.
//!
//! Provides the strongly-typed `User` record, the identifier and URL
//! validators, the error taxonomy shared with the HTTP layer, and the
//! SQLite-backed repository. The API crate builds on `UserService` and never
//! touches SQL directly.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod models;
pub mod service;
pub mod storage;
pub mod validation;

pub use error::{CoreError, Result, UserError};
pub use models::{CreateUserRequest, User, UserId};
pub use service::UserService;
pub use storage::Storage;
pub use validation::{is_valid_id, is_valid_url};
