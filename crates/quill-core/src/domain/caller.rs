use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role of an authenticated caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

/// The identity on whose behalf a use case executes.
///
/// There is no ambient "current user" anywhere in the core; every use case
/// takes the caller explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Caller {
    Anonymous,
    Authenticated { id: Uuid, role: Role },
}

impl Caller {
    pub fn user(id: Uuid) -> Self {
        Caller::Authenticated {
            id,
            role: Role::User,
        }
    }

    pub fn admin(id: Uuid) -> Self {
        Caller::Authenticated {
            id,
            role: Role::Admin,
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(
            self,
            Caller::Authenticated {
                role: Role::Admin,
                ..
            }
        )
    }

    /// The authenticated user id, if any.
    pub fn id(&self) -> Option<Uuid> {
        match self {
            Caller::Anonymous => None,
            Caller::Authenticated { id, .. } => Some(*id),
        }
    }
}
