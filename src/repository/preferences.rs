//! Client preferences and open login sessions

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{enums::Theme, session::Preferences};

#[derive(Clone, Default)]
pub struct PreferencesRepository {
    preferences: Arc<RwLock<Preferences>>,
}

impl PreferencesRepository {
    pub async fn get(&self) -> Preferences {
        self.preferences.read().await.clone()
    }

    pub async fn set_theme(&self, theme: Theme) -> Preferences {
        let mut preferences = self.preferences.write().await;
        preferences.theme = theme;
        preferences.clone()
    }

    /// Store or clear the username pre-filled on the login form
    pub async fn set_remembered_user(&self, username: Option<String>) {
        self.preferences.write().await.remembered_user = username;
    }
}

/// Open sessions with their expiry (unix seconds)
#[derive(Clone, Default)]
pub struct SessionsRepository {
    active: Arc<RwLock<HashMap<Uuid, i64>>>,
}

impl SessionsRepository {
    /// Open a session valid until `exp`, dropping any that expired by `now`
    pub async fn open(&self, exp: i64, now: i64) -> Uuid {
        let sid = Uuid::new_v4();
        let mut active = self.active.write().await;
        active.retain(|_, session_exp| *session_exp > now);
        active.insert(sid, exp);
        sid
    }

    pub async fn is_open(&self, sid: &Uuid, now: i64) -> bool {
        self.active.read().await.get(sid).is_some_and(|exp| *exp > now)
    }

    /// Returns false when the session was not open
    pub async fn close(&self, sid: &Uuid) -> bool {
        self.active.write().await.remove(sid).is_some()
    }

    pub async fn len(&self) -> usize {
        self.active.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn expired_sessions_are_not_open_and_get_dropped() {
        let sessions = SessionsRepository::default();
        let stale = sessions.open(100, 0).await;
        assert!(sessions.is_open(&stale, 99).await);
        assert!(!sessions.is_open(&stale, 100).await);

        let fresh = sessions.open(500, 200).await;
        assert_eq!(sessions.len().await, 1);
        assert!(sessions.is_open(&fresh, 200).await);
        assert!(!sessions.close(&stale).await);
    }

    #[tokio::test]
    async fn closing_a_session_revokes_it() {
        let sessions = SessionsRepository::default();
        let sid = sessions.open(100, 0).await;
        assert!(sessions.close(&sid).await);
        assert!(!sessions.is_open(&sid, 1).await);
    }
}
