use crate::components::ban_api::{BanPeriod, BanQueryResult, Uid};
use crate::components::language::Language;
use crate::config::{EmbedAssets, PeriodUnit};
use crate::utils::i18n::{self, Message};
use poise::serenity_prelude as serenity;

/// Embed colour for banned accounts
pub const BANNED_COLOR: u32 = 0xE7_4C_3C;
/// Embed colour for accounts without a ban
pub const CLEAN_COLOR: u32 = 0x2E_CC_71;
/// Embed colour for validation and availability errors
pub const ERROR_COLOR: u32 = 0xFF_00_00;
/// Embed colour for confirmations
pub const SUCCESS_COLOR: u32 = 0x00_99_FF;

/// Localized description of a successful lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BanReport {
    pub language: Language,
    pub banned: bool,
    pub title: String,
    pub description: String,
    /// Label and value pairs, in display order
    pub fields: Vec<(String, String)>,
}

impl BanReport {
    pub fn new(uid: &Uid, result: &BanQueryResult, language: Language, unit: PeriodUnit) -> Self {
        let (title, description) = if result.is_banned {
            (Message::BannedTitle, Message::BannedDescription)
        } else {
            (Message::CleanTitle, Message::CleanDescription)
        };

        let mut fields = vec![
            (i18n::text(language, Message::FieldUid), uid.to_string()),
            (
                i18n::text(language, Message::FieldNickname),
                result.nickname.clone(),
            ),
            (
                i18n::text(language, Message::FieldRegion),
                result.region.clone(),
            ),
        ];

        if result.is_banned {
            fields.push((
                i18n::text(language, Message::FieldPeriod),
                period_phrase(&result.period, language, unit),
            ));
        }

        Self {
            language,
            banned: result.is_banned,
            title: i18n::text(language, title),
            description: i18n::text(language, description),
            fields,
        }
    }
}

/// Render a ban period such as "6 months"
pub fn period_phrase(period: &BanPeriod, language: Language, unit: PeriodUnit) -> String {
    match period {
        BanPeriod::Known(count) => {
            let message = match unit {
                PeriodUnit::Days => Message::PeriodDays,
                PeriodUnit::Months => Message::PeriodMonths,
            };
            i18n::format(language, message, &[("count", &count.to_string())])
        }
        BanPeriod::Unavailable => i18n::text(language, Message::PeriodUnavailable),
    }
}

/// Outcome of one `check` invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckReply {
    /// The identifier was not numeric; no lookup happened
    InvalidUid(Language),
    /// The lookup produced no result
    Unavailable(Language),
    Report(BanReport),
}

impl CheckReply {
    pub fn language(&self) -> Language {
        match self {
            CheckReply::InvalidUid(language) | CheckReply::Unavailable(language) => *language,
            CheckReply::Report(report) => report.language,
        }
    }

    /// Whether this reply only concerns the invoking user
    pub fn is_ephemeral(&self) -> bool {
        matches!(self, CheckReply::InvalidUid(_))
    }

    /// Plain-text rendering
    pub fn to_text(&self) -> String {
        match self {
            CheckReply::InvalidUid(language) => i18n::text(*language, Message::InvalidUid),
            CheckReply::Unavailable(language) => i18n::text(*language, Message::Unavailable),
            CheckReply::Report(report) => {
                let mut lines = vec![format!("**{}**", report.title)];
                lines.extend(
                    report
                        .fields
                        .iter()
                        .map(|(label, value)| format!("**{}:** {}", label, value)),
                );
                lines.join("\n")
            }
        }
    }

    /// Embed rendering with the configured decoration
    pub fn to_embed(&self, assets: &EmbedAssets) -> serenity::CreateEmbed {
        let embed = match self {
            CheckReply::InvalidUid(language) => {
                error_embed(*language, &i18n::text(*language, Message::InvalidUid))
            }
            CheckReply::Unavailable(language) => {
                error_embed(*language, &i18n::text(*language, Message::Unavailable))
            }
            CheckReply::Report(report) => {
                let (color, image) = if report.banned {
                    (BANNED_COLOR, assets.banned_image_url.as_ref())
                } else {
                    (CLEAN_COLOR, assets.clean_image_url.as_ref())
                };

                let mut embed = serenity::CreateEmbed::new()
                    .title(&report.title)
                    .description(&report.description)
                    .color(color)
                    .fields(
                        report
                            .fields
                            .iter()
                            .map(|(label, value)| (label.clone(), value.clone(), true)),
                    );

                if let Some(image) = image {
                    embed = embed.image(image);
                }
                if let Some(thumbnail) = &assets.thumbnail_url {
                    embed = embed.thumbnail(thumbnail);
                }
                embed
            }
        };

        embed.footer(serenity::CreateEmbedFooter::new(&assets.footer_text))
    }
}

/// Outcome of one `lang` invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LanguageReply {
    Set(Language),
    /// `code` was rejected; `current` is the language still in effect
    Invalid { current: Language, code: String },
}

impl LanguageReply {
    pub fn language(&self) -> Language {
        match self {
            LanguageReply::Set(language) => *language,
            LanguageReply::Invalid { current, .. } => *current,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, LanguageReply::Invalid { .. })
    }

    /// Confirmation or error embed in the language now in effect
    pub fn to_embed(&self) -> serenity::CreateEmbed {
        let language = self.language();
        if self.is_error() {
            error_embed(language, &self.to_text())
        } else {
            success_embed(&i18n::text(language, Message::LanguageName), &self.to_text())
        }
    }

    pub fn to_text(&self) -> String {
        match self {
            LanguageReply::Set(language) => i18n::format(
                *language,
                Message::LanguageSet,
                &[("language", &i18n::text(*language, Message::LanguageName))],
            ),
            LanguageReply::Invalid { current, code } => {
                i18n::format(*current, Message::LanguageInvalid, &[("code", code)])
            }
        }
    }
}

/// Red embed under the localized error heading
pub fn error_embed(language: Language, description: &str) -> serenity::CreateEmbed {
    serenity::CreateEmbed::new()
        .title(i18n::text(language, Message::ErrorTitle))
        .description(description)
        .color(ERROR_COLOR)
}

/// Embed for a successful operation
fn success_embed(title: &str, description: &str) -> serenity::CreateEmbed {
    serenity::CreateEmbed::new()
        .title(title)
        .description(description)
        .color(SUCCESS_COLOR)
}
