use super::Language;
use async_trait::async_trait;
use poise::serenity_prelude::UserId;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Key-value storage for user language preferences
#[async_trait]
pub trait LanguageStore: Send + Sync {
    /// Get the stored language for a user, if any
    async fn get(&self, user: UserId) -> Option<Language>;

    /// Insert or replace the language for a user
    async fn set(&self, user: UserId, language: Language);
}

/// Process-local store; entries are lost on restart
#[derive(Debug, Default)]
pub struct InMemoryLanguageStore {
    entries: RwLock<HashMap<UserId, Language>>,
}

impl InMemoryLanguageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of users with a stored preference.
    ///
    /// Read-only inspection; lookups and writes go through [`LanguageStore`].
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether no user has stored a preference yet
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl LanguageStore for InMemoryLanguageStore {
    async fn get(&self, user: UserId) -> Option<Language> {
        self.entries.read().await.get(&user).copied()
    }

    async fn set(&self, user: UserId, language: Language) {
        self.entries.write().await.insert(user, language);
    }
}
