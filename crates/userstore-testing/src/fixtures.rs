//! Test data builders for user payloads.

use serde_json::{json, Value};
use userstore_core::CreateUserRequest;

/// Builder for create-user payloads.
///
/// Defaults match the canonical fixture used throughout the test suite.
#[derive(Debug, Clone)]
pub struct UserBuilder {
    id: String,
    name: String,
    email: String,
    blog: Option<String>,
}

impl Default for UserBuilder {
    fn default() -> Self {
        Self {
            id: "1111".to_string(),
            name: "kondukto".to_string(),
            email: "helo@kondukto.io".to_string(),
            blog: None,
        }
    }
}

impl UserBuilder {
    /// Creates a builder with the canonical defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the identifier.
    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Sets the display name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the email address.
    #[must_use]
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    /// Sets the blog URL.
    #[must_use]
    pub fn blog(mut self, blog: impl Into<String>) -> Self {
        self.blog = Some(blog.into());
        self
    }

    /// Builds the typed request.
    pub fn build(self) -> CreateUserRequest {
        CreateUserRequest { id: self.id, name: self.name, email: self.email, blog: self.blog }
    }

    /// Builds the JSON body a client would send.
    pub fn json(self) -> Value {
        let mut body = json!({
            "id": self.id,
            "name": self.name,
            "email": self.email,
        });
        if let Some(blog) = self.blog {
            body["blog"] = Value::String(blog);
        }
        body
    }
}
