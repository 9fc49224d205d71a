//! Error types and result handling for user operations.
//!
//! `CoreError` classifies storage failures. `UserError` is the coded taxonomy
//! the HTTP layer maps to status codes; its `Display` output is the fixed,
//! client-safe message for each kind, while the underlying cause is kept in
//! the variant for server-side logging.

use thiserror::Error;

/// Result type alias using `CoreError`.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error type for storage operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(String),

    /// Entity not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Constraint violation.
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),
}

impl From<sqlx::Error> for CoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => Self::NotFound("requested entity not found".to_string()),
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                Self::ConstraintViolation(format!("unique constraint violation: {db_err}"))
            },
            sqlx::Error::Database(db_err) if db_err.is_check_violation() => {
                Self::ConstraintViolation(format!("check constraint violation: {db_err}"))
            },
            _ => Self::Database(err.to_string()),
        }
    }
}

/// User operation errors with stable codes.
#[derive(Debug, Error)]
pub enum UserError {
    // Request errors (E1001-E1005)
    /// Request body could not be decoded into a user (E1001).
    #[error("[E1001] Malformed request body")]
    MalformedBody {
        /// Decoder diagnostic, for logs only
        reason: String,
    },

    /// Identifier is not a positive integer (E1002).
    #[error("[E1002] Not a valid ID")]
    InvalidId {
        /// The rejected identifier
        id: String,
    },

    /// Blog is not an absolute http or https URL (E1003).
    #[error("[E1003] Not a valid blog URL")]
    InvalidBlogUrl {
        /// The rejected URL
        url: String,
    },

    /// No user exists with the identifier (E1004).
    #[error("[E1004] User not found")]
    UserNotFound {
        /// The identifier that was looked up
        id: String,
    },

    /// A user with the identifier already exists (E1005).
    #[error("[E1005] User already exists")]
    DuplicateUser {
        /// The conflicting identifier
        id: String,
    },

    // Storage errors (E2001-E2002)
    /// Insert failed for a reason other than a duplicate key (E2001).
    #[error("[E2001] Failed to create user")]
    CreateFailed(#[source] CoreError),

    /// Lookup failed (E2002).
    #[error("[E2002] Failed to fetch user")]
    FetchFailed(#[source] CoreError),
}

impl UserError {
    /// Returns the error code (E1001-E2002).
    pub const fn code(&self) -> &'static str {
        match self {
            Self::MalformedBody { .. } => "E1001",
            Self::InvalidId { .. } => "E1002",
            Self::InvalidBlogUrl { .. } => "E1003",
            Self::UserNotFound { .. } => "E1004",
            Self::DuplicateUser { .. } => "E1005",
            Self::CreateFailed(_) => "E2001",
            Self::FetchFailed(_) => "E2002",
        }
    }

    /// Returns the client-facing message without the code prefix.
    pub const fn message(&self) -> &'static str {
        match self {
            Self::MalformedBody { .. } => "Malformed request body",
            Self::InvalidId { .. } => "Not a valid ID",
            Self::InvalidBlogUrl { .. } => "Not a valid blog URL",
            Self::UserNotFound { .. } => "User not found",
            Self::DuplicateUser { .. } => "User already exists",
            Self::CreateFailed(_) => "Failed to create user",
            Self::FetchFailed(_) => "Failed to fetch user",
        }
    }

    /// Returns whether the error was caused by the request rather than the
    /// store.
    pub const fn is_client_error(&self) -> bool {
        !matches!(self, Self::CreateFailed(_) | Self::FetchFailed(_))
    }
}
