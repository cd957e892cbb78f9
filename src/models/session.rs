use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::user::Role;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Session {
    pub id: Uuid,
    pub user_id: i64,
    pub token_hash: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewSession {
    pub user_id: i64,
    pub token_hash: String,
    pub expires_at: DateTime<Utc>,
}

/// Identity carried by an active session. The role always comes from the
/// users table, never from the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct SessionIdentity {
    pub user_id: i64,
    pub username: String,
    #[sqlx(try_from = "String")]
    pub role: Role,
    pub full_name: String,
}

/// Request-scoped caller context handed to every service operation.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    session: Option<SessionIdentity>,
}

impl RequestContext {
    pub fn anonymous() -> Self {
        Self { session: None }
    }

    pub fn authenticated(identity: SessionIdentity) -> Self {
        Self {
            session: Some(identity),
        }
    }

    pub fn session(&self) -> Option<&SessionIdentity> {
        self.session.as_ref()
    }

    pub fn require_session(&self) -> Result<&SessionIdentity> {
        self.session.as_ref().ok_or(Error::Unauthenticated)
    }

    pub fn require_privileged(&self) -> Result<&SessionIdentity> {
        let identity = self.require_session()?;
        if !identity.role.is_privileged() {
            return Err(Error::Unauthorized(
                "This operation is restricted to HR and admin users".to_string(),
            ));
        }
        Ok(identity)
    }

    pub fn require_role(&self, role: Role) -> Result<&SessionIdentity> {
        let identity = self.require_session()?;
        if identity.role != role {
            return Err(Error::Unauthorized(format!(
                "This operation is restricted to {} users",
                role
            )));
        }
        Ok(identity)
    }
}
