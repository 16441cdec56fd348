use super::replies::{BanReport, CheckReply, LanguageReply};
use crate::components::ban_api::{BanLookup, Uid};
use crate::components::language::{Language, LanguagePreferences};
use crate::config::PeriodUnit;
use crate::error::BotResult;
use poise::serenity_prelude::UserId;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use tracing::debug;

/// Runs the `check` and `lang` commands independently of Discord
#[derive(Clone)]
pub struct BanChecker {
    lookup: Arc<dyn BanLookup>,
    preferences: LanguagePreferences,
    period_unit: PeriodUnit,
}

impl fmt::Debug for BanChecker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BanChecker")
            .field("preferences", &self.preferences)
            .field("period_unit", &self.period_unit)
            .finish()
    }
}

impl BanChecker {
    pub fn new(
        lookup: Arc<dyn BanLookup>,
        preferences: LanguagePreferences,
        period_unit: PeriodUnit,
    ) -> Self {
        Self {
            lookup,
            preferences,
            period_unit,
        }
    }

    pub fn preferences(&self) -> &LanguagePreferences {
        &self.preferences
    }

    /// Validate `raw_uid`, then look it up in the invoking user's language.
    ///
    /// `before_lookup` runs only for valid identifiers, right before the
    /// network call; the command uses it to defer the interaction.
    pub async fn check<F, Fut>(
        &self,
        user: UserId,
        raw_uid: &str,
        before_lookup: F,
    ) -> BotResult<CheckReply>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = BotResult<()>>,
    {
        let language = self.preferences.language_for(user).await;

        let uid = match Uid::parse(raw_uid) {
            Ok(uid) => uid,
            Err(e) => {
                debug!("Rejected check from {}: {}", user, e);
                return Ok(CheckReply::InvalidUid(language));
            }
        };

        before_lookup().await?;

        Ok(self.lookup(&uid, language).await)
    }

    /// Look up an already validated identifier
    pub async fn lookup(&self, uid: &Uid, language: Language) -> CheckReply {
        match self.lookup.check_ban(uid).await {
            Some(result) => {
                CheckReply::Report(BanReport::new(uid, &result, language, self.period_unit))
            }
            None => CheckReply::Unavailable(language),
        }
    }

    /// Store a new language preference for `user`
    pub async fn set_language(&self, user: UserId, code: &str) -> LanguageReply {
        match self.preferences.set_from_code(user, code).await {
            Ok(language) => LanguageReply::Set(language),
            Err(e) => LanguageReply::Invalid {
                current: self.preferences.language_for(user).await,
                code: e.0,
            },
        }
    }
}
