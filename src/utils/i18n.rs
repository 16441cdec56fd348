use crate::components::language::Language;
use crate::error::{config_error, BotResult};
use rust_i18n::t;
use std::borrow::Cow;

/// Every translatable message the bot sends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Message {
    InvalidUid,
    Unavailable,
    BannedTitle,
    BannedDescription,
    CleanTitle,
    CleanDescription,
    FieldUid,
    FieldNickname,
    FieldRegion,
    FieldPeriod,
    PeriodDays,
    PeriodMonths,
    PeriodUnavailable,
    LanguageName,
    LanguageSet,
    LanguageInvalid,
    ErrorTitle,
    ErrorGeneric,
}

impl Message {
    pub const ALL: [Message; 18] = [
        Message::InvalidUid,
        Message::Unavailable,
        Message::BannedTitle,
        Message::BannedDescription,
        Message::CleanTitle,
        Message::CleanDescription,
        Message::FieldUid,
        Message::FieldNickname,
        Message::FieldRegion,
        Message::FieldPeriod,
        Message::PeriodDays,
        Message::PeriodMonths,
        Message::PeriodUnavailable,
        Message::LanguageName,
        Message::LanguageSet,
        Message::LanguageInvalid,
        Message::ErrorTitle,
        Message::ErrorGeneric,
    ];

    /// Key in the locale files
    pub fn key(self) -> &'static str {
        match self {
            Message::InvalidUid => "check_invalid_uid",
            Message::Unavailable => "check_unavailable",
            Message::BannedTitle => "check_banned_title",
            Message::BannedDescription => "check_banned_description",
            Message::CleanTitle => "check_clean_title",
            Message::CleanDescription => "check_clean_description",
            Message::FieldUid => "field_uid",
            Message::FieldNickname => "field_nickname",
            Message::FieldRegion => "field_region",
            Message::FieldPeriod => "field_period",
            Message::PeriodDays => "period_days",
            Message::PeriodMonths => "period_months",
            Message::PeriodUnavailable => "period_unavailable",
            Message::LanguageName => "language_name",
            Message::LanguageSet => "language_set",
            Message::LanguageInvalid => "language_invalid",
            Message::ErrorTitle => "error_title",
            Message::ErrorGeneric => "error_generic",
        }
    }
}

/// Translate a message without arguments
pub fn text(language: Language, message: Message) -> String {
    t!(message.key(), locale = language.code()).into_owned()
}

/// Translate a message, substituting `%{name}` placeholders
pub fn format(language: Language, message: Message, args: &[(&str, &str)]) -> String {
    let template = text(language, message);
    let (names, values): (Vec<&str>, Vec<String>) = args
        .iter()
        .map(|(name, value)| (*name, value.to_string()))
        .unzip();
    rust_i18n::replace_patterns(&template, &names, &values)
}

/// Whether `message` resolves to a real translation in `language`
fn is_translated(language: Language, message: Message) -> bool {
    let translated: Cow<'_, str> = t!(message.key(), locale = language.code());
    let qualified = format!("{}.{}", language.code(), message.key());
    translated != message.key() && translated != qualified.as_str()
}

/// Check that every message has a translation in every language
pub fn verify_translations() -> BotResult<()> {
    let missing: Vec<String> = Language::ALL
        .iter()
        .flat_map(|&language| {
            Message::ALL
                .iter()
                .filter(move |&&message| !is_translated(language, message))
                .map(move |message| format!("{}.{}", language.code(), message.key()))
        })
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(config_error(&format!(
            "Missing translations: {}",
            missing.join(", ")
        )))
    }
}
