//! User record and its strongly-typed identifier.
//!
//! `UserId` can only be constructed from a string that passes
//! [`is_valid_id`](crate::validation::is_valid_id), including when it is
//! deserialized. It is stored as TEXT with the caller's original spelling so
//! a fetched record echoes exactly what was created.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{error::UserError, validation::is_valid_id};

type SqliteDb = sqlx::Sqlite;
type SqliteTypeInfo = sqlx::sqlite::SqliteTypeInfo;
type SqliteValueRef<'r> = sqlx::sqlite::SqliteValueRef<'r>;
type SqliteArgumentBuffer<'q> = <sqlx::Sqlite as sqlx::Database>::ArgumentBuffer<'q>;
type EncodeResult = Result<sqlx::encode::IsNull, sqlx::error::BoxDynError>;
type BoxDynError = sqlx::error::BoxDynError;

/// Validated user identifier.
///
/// # Example
///
/// ```
/// use userstore_core::UserId;
///
/// let id = UserId::parse("1111").unwrap();
/// assert_eq!(id.as_str(), "1111");
/// assert!(UserId::parse("s1111").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Parses an identifier, rejecting anything that is not a positive
    /// integer.
    ///
    /// # Errors
    ///
    /// Returns `UserError::InvalidId` if the string fails the format check.
    pub fn parse(raw: impl Into<String>) -> Result<Self, UserError> {
        let raw = raw.into();
        if is_valid_id(&raw) {
            Ok(Self(raw))
        } else {
            Err(UserError::InvalidId { id: raw })
        }
    }

    /// Returns the identifier as originally supplied.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for UserId {
    type Error = UserError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::parse(raw)
    }
}

impl From<UserId> for String {
    fn from(id: UserId) -> Self {
        id.0
    }
}

impl sqlx::Type<SqliteDb> for UserId {
    fn type_info() -> SqliteTypeInfo {
        <String as sqlx::Type<SqliteDb>>::type_info()
    }

    fn compatible(ty: &SqliteTypeInfo) -> bool {
        <String as sqlx::Type<SqliteDb>>::compatible(ty)
    }
}

impl<'r> sqlx::Decode<'r, SqliteDb> for UserId {
    fn decode(value: SqliteValueRef<'r>) -> Result<Self, BoxDynError> {
        let raw = <String as sqlx::Decode<SqliteDb>>::decode(value)?;
        Ok(Self(raw))
    }
}

impl<'q> sqlx::Encode<'q, SqliteDb> for UserId {
    fn encode_by_ref(&self, buf: &mut SqliteArgumentBuffer<'q>) -> EncodeResult {
        <String as sqlx::Encode<SqliteDb>>::encode_by_ref(&self.0, buf)
    }
}

/// A persisted user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Primary key
    pub id: UserId,
    /// Display name, free text
    pub name: String,
    /// Contact address, stored as supplied
    pub email: String,
    /// Personal site, always an absolute http(s) URL when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blog: Option<String>,
}

/// Unvalidated create payload as decoded from a request body.
///
/// Kept separate from `User` so that a bad identifier is reported as a
/// validation failure rather than a decoding failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateUserRequest {
    /// Requested identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Contact address
    pub email: String,
    /// Optional personal site
    #[serde(default)]
    pub blog: Option<String>,
}

impl From<User> for CreateUserRequest {
    fn from(user: User) -> Self {
        Self { id: user.id.into(), name: user.name, email: user.email, blog: user.blog }
    }
}
