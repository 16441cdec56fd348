mod store;

pub use store::{InMemoryLanguageStore, LanguageStore};

use poise::serenity_prelude::UserId;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Languages the bot can reply in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    En,
    Fr,
}

impl Language {
    /// Every supported language
    pub const ALL: [Language; 2] = [Language::En, Language::Fr];

    /// Two-letter code, also used as the locale name
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Fr => "fr",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A language code outside the supported set
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported language code `{0}`")]
pub struct UnsupportedLanguage(pub String);

impl FromStr for Language {
    type Err = UnsupportedLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Language::En),
            "fr" => Ok(Language::Fr),
            _ => Err(UnsupportedLanguage(s.trim().to_string())),
        }
    }
}

/// Per-user language preferences backed by an injected store
#[derive(Clone)]
pub struct LanguagePreferences {
    store: Arc<dyn LanguageStore>,
    default: Language,
}

impl fmt::Debug for LanguagePreferences {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LanguagePreferences")
            .field("default", &self.default)
            .finish()
    }
}

impl LanguagePreferences {
    pub fn new(store: Arc<dyn LanguageStore>, default: Language) -> Self {
        Self { store, default }
    }

    /// Language used when a user has no stored preference
    pub fn default_language(&self) -> Language {
        self.default
    }

    /// Resolve the language to reply to `user` in
    pub async fn language_for(&self, user: UserId) -> Language {
        self.store.get(user).await.unwrap_or(self.default)
    }

    /// Parse `code` and store it for `user`.
    ///
    /// An unsupported code leaves the stored preference untouched.
    pub async fn set_from_code(
        &self,
        user: UserId,
        code: &str,
    ) -> Result<Language, UnsupportedLanguage> {
        let language = code.parse::<Language>()?;
        self.store.set(user, language).await;
        debug!("User {} switched language to {}", user, language);
        Ok(language)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_codes_case_insensitively() {
        assert_eq!("EN".parse::<Language>(), Ok(Language::En));
        assert_eq!(" fr ".parse::<Language>(), Ok(Language::Fr));
        assert_eq!("Fr".parse::<Language>(), Ok(Language::Fr));
    }

    #[test]
    fn rejects_unknown_codes() {
        assert_eq!(
            "de".parse::<Language>(),
            Err(UnsupportedLanguage("de".to_string()))
        );
        assert!("".parse::<Language>().is_err());
        assert!("english".parse::<Language>().is_err());
    }

    #[test]
    fn default_is_english() {
        assert_eq!(Language::default(), Language::En);
        assert_eq!(Language::default().code(), "en");
    }
}
