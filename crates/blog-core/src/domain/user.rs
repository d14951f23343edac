use serde::{Deserialize, Serialize};

/// A registered user, referenced as the owner of posts and comments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationUser {
    pub id: String,
    pub name: String,
    pub profile_picture: Option<String>,
}

impl ApplicationUser {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            profile_picture: None,
        }
    }
}
