use serde::{Deserialize, Serialize};

use super::user::{Role, User};

/// Bearer token plus the account it belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: User,
}

impl Session {
    pub fn new(token: impl Into<String>, user: User) -> Self {
        Self {
            token: token.into(),
            user,
        }
    }

    pub fn role(&self) -> Role {
        self.user.role
    }
}
