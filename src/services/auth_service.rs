use chrono::Duration;
use std::sync::Arc;
use tracing::info;

use crate::config::MAX_SESSION_TTL_HOURS;
use crate::database::Store;
use crate::dto::auth_dto::{LoginPayload, RegisterPayload};
use crate::error::{Error, Result};
use crate::models::session::{NewSession, RequestContext, Session, SessionIdentity};
use crate::models::user::{NewUser, Role, User};
use crate::utils::crypto::{hash_password, verify_password};
use crate::utils::time::now;
use crate::utils::token::{generate_session_token, hash_token};
use crate::utils::validation::{non_blank, require_text, validate};

#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn Store>,
    session_ttl: Duration,
}

pub struct IssuedSession {
    pub token: String,
    pub session: Session,
    pub user: User,
}

impl AuthService {
    pub fn new(store: Arc<dyn Store>, session_ttl_hours: i64) -> Self {
        Self {
            store,
            session_ttl: Duration::hours(session_ttl_hours.clamp(1, MAX_SESSION_TTL_HOURS)),
        }
    }

    /// Self-service sign-up always yields a candidate account.
    pub async fn register(&self, payload: RegisterPayload) -> Result<User> {
        validate(&payload)?;
        let username = require_text(payload.username, "username")?;
        let email = require_text(payload.email, "email")?;
        let password = require_text(payload.password, "password")?;
        let full_name = require_text(payload.full_name, "full_name")?;

        self.create_user(
            username,
            email,
            &password,
            full_name,
            non_blank(payload.phone),
            Role::Candidate,
        )
        .await
    }

    /// Creates an HR or admin account unless the username already exists.
    pub async fn ensure_user(
        &self,
        username: &str,
        email: &str,
        password: &str,
        full_name: &str,
        role: Role,
    ) -> Result<User> {
        if let Some(existing) = self.store.find_user_by_login(username).await? {
            return Ok(existing);
        }
        self.create_user(
            username.to_string(),
            email.to_string(),
            password,
            full_name.to_string(),
            None,
            role,
        )
        .await
    }

    async fn create_user(
        &self,
        username: String,
        email: String,
        password: &str,
        full_name: String,
        phone: Option<String>,
        role: Role,
    ) -> Result<User> {
        let password_hash = hash_password(password)?;
        let user = self
            .store
            .insert_user(NewUser {
                username,
                email,
                password_hash,
                full_name,
                phone,
                role,
            })
            .await?;
        info!(user_id = user.id, role = %user.role, "user registered");
        Ok(user)
    }

    pub async fn login(&self, payload: LoginPayload) -> Result<IssuedSession> {
        let login = require_text(payload.username, "username")?;
        let password = require_text(payload.password, "password")?;

        let user = self
            .store
            .find_user_by_login(login.trim())
            .await?
            .ok_or(Error::InvalidCredentials)?;
        if !verify_password(&password, &user.password_hash) {
            info!(user_id = user.id, "login rejected");
            return Err(Error::InvalidCredentials);
        }

        let token = generate_session_token();
        let session = self
            .store
            .insert_session(NewSession {
                user_id: user.id,
                token_hash: hash_token(&token),
                expires_at: now() + self.session_ttl,
            })
            .await?;
        info!(user_id = user.id, session_id = %session.id, "session opened");

        Ok(IssuedSession {
            token,
            session,
            user,
        })
    }

    pub async fn logout(&self, token: &str) -> Result<()> {
        self.store.delete_session(&hash_token(token)).await
    }

    /// Maps a bearer token to a request context. Unknown or expired tokens
    /// yield an anonymous context.
    pub async fn resolve(&self, token: Option<&str>) -> Result<RequestContext> {
        let Some(token) = token else {
            return Ok(RequestContext::anonymous());
        };
        let identity: Option<SessionIdentity> = self
            .store
            .find_session_identity(&hash_token(token), now())
            .await?;
        Ok(identity
            .map(RequestContext::authenticated)
            .unwrap_or_else(RequestContext::anonymous))
    }

    /// The identity behind the current request, if any.
    pub fn check(&self, ctx: &RequestContext) -> Option<SessionIdentity> {
        ctx.session().cloned()
    }

    pub async fn sweep_expired(&self) -> Result<u64> {
        let removed = self.store.delete_expired_sessions(now()).await?;
        if removed > 0 {
            info!(removed, "expired sessions removed");
        }
        Ok(removed)
    }
}
