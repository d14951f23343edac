use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ApplicationUser;

/// A comment left on a post.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i32,
    pub post_id: i32,
    pub content: String,
    pub user_id: String,
    pub user: Option<ApplicationUser>,
    pub created: DateTime<Utc>,
}
