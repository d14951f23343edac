//! Authorization port: policy checks over (principal, post).

use async_trait::async_trait;

use crate::domain::Post;

/// Names of the policies the service evaluates.
pub mod policies {
    /// Caller may modify or remove the post.
    pub const CAN_EDIT: &str = "CanEdit";
}

/// An authenticated caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Principal {
    pub user_id: String,
    pub name: Option<String>,
    pub roles: Vec<String>,
}

impl Principal {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            name: None,
            roles: Vec::new(),
        }
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.roles.push(role.into());
        self
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    /// A principal without a user id carries no usable identity.
    pub fn is_authenticated(&self) -> bool {
        !self.user_id.trim().is_empty()
    }
}

/// Outcome of a policy evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationResult {
    succeeded: bool,
    failure_reason: Option<String>,
}

impl AuthorizationResult {
    pub fn success() -> Self {
        Self {
            succeeded: true,
            failure_reason: None,
        }
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        Self {
            succeeded: false,
            failure_reason: Some(reason.into()),
        }
    }

    pub fn succeeded(&self) -> bool {
        self.succeeded
    }

    pub fn failure_reason(&self) -> Option<&str> {
        self.failure_reason.as_deref()
    }
}

/// Resolves whether a principal may act on a post under a named policy.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthorizationService: Send + Sync {
    async fn authorize(
        &self,
        principal: &Principal,
        resource: &Post,
        policy: &str,
    ) -> AuthorizationResult;
}
