//! Named-policy authorization evaluator.

use std::collections::HashMap;

use async_trait::async_trait;

use blog_core::domain::Post;
use blog_core::ports::{AuthorizationResult, AuthorizationService, Principal, policies};

/// Role that may edit any post.
pub const ADMIN_ROLE: &str = "Admin";

type PolicyRule = Box<dyn Fn(&Principal, &Post) -> bool + Send + Sync>;

/// Evaluates policies registered by name. Unknown policies always fail.
pub struct PolicyAuthorizationService {
    policies: HashMap<String, PolicyRule>,
}

impl PolicyAuthorizationService {
    /// An evaluator with no policies registered.
    pub fn empty() -> Self {
        Self {
            policies: HashMap::new(),
        }
    }

    /// `CanEdit`: the caller owns the post or is an admin.
    pub fn new() -> Self {
        Self::empty().with_policy(policies::CAN_EDIT, |principal, post| {
            post.is_owned_by(&principal.user_id) || principal.has_role(ADMIN_ROLE)
        })
    }

    pub fn with_policy<F>(mut self, name: impl Into<String>, rule: F) -> Self
    where
        F: Fn(&Principal, &Post) -> bool + Send + Sync + 'static,
    {
        self.policies.insert(name.into(), Box::new(rule));
        self
    }
}

impl Default for PolicyAuthorizationService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuthorizationService for PolicyAuthorizationService {
    async fn authorize(
        &self,
        principal: &Principal,
        resource: &Post,
        policy: &str,
    ) -> AuthorizationResult {
        let Some(rule) = self.policies.get(policy) else {
            tracing::warn!(%policy, "Authorization requested for unknown policy");
            return AuthorizationResult::failed(format!("Unknown policy '{policy}'"));
        };

        if rule(principal, resource) {
            AuthorizationResult::success()
        } else {
            AuthorizationResult::failed(format!(
                "User '{}' does not satisfy policy '{policy}' for post {}",
                principal.user_id, resource.id
            ))
        }
    }
}
