//! Settings service

use crate::{
    models::{enums::Theme, session::Preferences},
    repository::Repository,
};

#[derive(Clone)]
pub struct SettingsService {
    repository: Repository,
}

impl SettingsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Get current settings
    pub async fn get_settings(&self) -> Preferences {
        self.repository.preferences.get().await
    }

    /// Update settings
    pub async fn update_theme(&self, theme: Theme) -> Preferences {
        let preferences = self.repository.preferences.set_theme(theme).await;
        tracing::debug!("Theme set to {:?}", theme);
        preferences
    }

    /// Clear the username remembered by the login form
    pub async fn forget_user(&self) -> Preferences {
        self.repository.preferences.set_remembered_user(None).await;
        self.repository.preferences.get().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn theme_defaults_to_light_and_persists() {
        let settings = SettingsService::new(Repository::new());
        assert_eq!(settings.get_settings().await.theme, Theme::Light);

        settings.update_theme(Theme::Dark).await;
        assert_eq!(settings.get_settings().await.theme, Theme::Dark);
    }

    #[tokio::test]
    async fn forget_user_keeps_the_theme() {
        let repository = Repository::new();
        repository
            .preferences
            .set_remembered_user(Some("admin".to_string()))
            .await;
        let settings = SettingsService::new(repository);
        settings.update_theme(Theme::Dark).await;

        let preferences = settings.forget_user().await;
        assert_eq!(preferences.remembered_user, None);
        assert_eq!(preferences.theme, Theme::Dark);
    }
}
