//! User service: validation in front of the repository.
//!
//! `UserService` is constructed once at startup from a `Storage` and shared
//! by every request. It applies the same identifier check on create and on
//! lookup, rejects malformed blog URLs, and turns storage failures into coded
//! `UserError`s without losing the underlying cause.

use tracing::{debug, instrument};

use crate::{
    error::{CoreError, UserError},
    models::{CreateUserRequest, User, UserId},
    storage::Storage,
    validation::is_valid_url,
};

/// Create and lookup operations for user records.
#[derive(Clone)]
pub struct UserService {
    storage: Storage,
}

impl UserService {
    /// Creates a service backed by `storage`.
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    /// Returns the storage this service writes to.
    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Validates and persists a new user.
    ///
    /// # Errors
    ///
    /// - `InvalidId` if the identifier is not a positive integer
    /// - `InvalidBlogUrl` if a blog is given and is not an http(s) URL
    /// - `DuplicateUser` if the identifier is already taken
    /// - `CreateFailed` for any other storage failure
    #[instrument(name = "create_user", skip(self, request), fields(user_id = %request.id))]
    pub async fn create(&self, request: CreateUserRequest) -> Result<User, UserError> {
        let id = UserId::parse(request.id)?;

        if let Some(blog) = &request.blog {
            if !is_valid_url(blog) {
                return Err(UserError::InvalidBlogUrl { url: blog.clone() });
            }
        }

        let user = User { id, name: request.name, email: request.email, blog: request.blog };

        match self.storage.users.insert(&user).await {
            Ok(()) => {
                debug!("user inserted");
                Ok(user)
            },
            Err(CoreError::ConstraintViolation(_)) => {
                Err(UserError::DuplicateUser { id: user.id.into() })
            },
            Err(e) => Err(UserError::CreateFailed(e)),
        }
    }

    /// Looks up a user by its raw identifier.
    ///
    /// The identifier is validated before the store is queried.
    ///
    /// # Errors
    ///
    /// - `InvalidId` if the identifier is not a positive integer
    /// - `UserNotFound` if no row matches
    /// - `FetchFailed` if the query fails
    #[instrument(name = "find_user", skip(self))]
    pub async fn find(&self, raw_id: &str) -> Result<User, UserError> {
        let id = UserId::parse(raw_id)?;

        match self.storage.users.find_by_id(&id).await {
            Ok(Some(user)) => Ok(user),
            Ok(None) => Err(UserError::UserNotFound { id: id.into() }),
            Err(e) => Err(UserError::FetchFailed(e)),
        }
    }
}
