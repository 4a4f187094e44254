//! Administrator login and session handling

use chrono::Utc;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::session::SessionClaims,
    repository::Repository,
};

#[derive(Clone)]
pub struct AuthService {
    repository: Repository,
    config: AuthConfig,
}

impl AuthService {
    pub fn new(repository: Repository, config: AuthConfig) -> Self {
        Self { repository, config }
    }

    /// Check the credential pair and open a session.
    ///
    /// On failure nothing is changed: no session is opened and the
    /// remembered user is left as it was.
    pub async fn login(&self, username: &str, password: &str, remember_me: bool) -> AppResult<String> {
        if username != self.config.admin_username || password != self.config.admin_password {
            tracing::warn!("Rejected login attempt for {:?}", username);
            return Err(AppError::Authentication("Invalid username or password".to_string()));
        }

        let now = Utc::now().timestamp();
        let exp = now + (self.config.jwt_expiration_hours as i64 * 3600);
        let sid = self.repository.sessions.open(exp, now).await;

        let claims = SessionClaims {
            sub: username.to_string(),
            sid,
            exp,
            iat: now,
        };

        let token = match claims.create_token(&self.config.jwt_secret) {
            Ok(token) => token,
            Err(e) => {
                self.repository.sessions.close(&sid).await;
                return Err(AppError::Internal(format!("Failed to create token: {}", e)));
            }
        };

        self.repository
            .preferences
            .set_remembered_user(remember_me.then(|| username.to_string()))
            .await;

        tracing::info!("{} logged in (session {})", username, sid);
        Ok(token)
    }

    /// Decode a bearer token and make sure its session is still open
    pub async fn verify(&self, token: &str) -> AppResult<SessionClaims> {
        let claims = SessionClaims::from_token(token, &self.config.jwt_secret)
            .map_err(|e| AppError::Authentication(e.to_string()))?;

        if !self.repository.sessions.is_open(&claims.sid, Utc::now().timestamp()).await {
            return Err(AppError::Authentication("Session is closed".to_string()));
        }
        Ok(claims)
    }

    pub async fn logout(&self, claims: &SessionClaims) {
        if self.repository.sessions.close(&claims.sid).await {
            tracing::info!("{} logged out (session {})", claims.sub, claims.sid);
        }
    }

    /// Username to pre-fill on the login form
    pub async fn remembered(&self) -> Option<String> {
        self.repository.preferences.get().await.remembered_user
    }

    pub fn expiration_hours(&self) -> u64 {
        self.config.jwt_expiration_hours
    }
}
