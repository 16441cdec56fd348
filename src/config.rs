use crate::components::language::Language;
use crate::error::{config_error, env_error, BotResult, Error};
use dotenvy::dotenv;
use serde::Deserialize;
use std::env;
use std::fs;
use std::str::FromStr;
use url::Url;

/// Default activity text for the bot
pub const DEFAULT_ACTIVITY: &str = "Checking bans";
/// Default base URL of the ban-status API
pub const DEFAULT_BAN_API_URL: &str = "https://api-check-ban.up.railway.app";
/// Default timeout for a ban-status request, in seconds
pub const DEFAULT_BAN_API_TIMEOUT_SECS: u64 = 300;
/// Default bind host for the liveness endpoint
pub const DEFAULT_LIVENESS_HOST: &str = "0.0.0.0";
/// Default bind port for the liveness endpoint
pub const DEFAULT_LIVENESS_PORT: u16 = 10000;
/// Default location of the embed assets file
pub const DEFAULT_ASSETS_FILE: &str = "config/assets.toml";

/// Unit the upstream `period` value is expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PeriodUnit {
    Days,
    #[default]
    Months,
}

impl FromStr for PeriodUnit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "days" | "day" => Ok(PeriodUnit::Days),
            "months" | "month" => Ok(PeriodUnit::Months),
            other => Err(config_error(&format!(
                "Invalid BAN_PERIOD_UNIT `{}`, expected `days` or `months`",
                other
            ))),
        }
    }
}

/// How check results are presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReplyStyle {
    #[default]
    Embed,
    Text,
}

impl FromStr for ReplyStyle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "embed" => Ok(ReplyStyle::Embed),
            "text" | "plain" => Ok(ReplyStyle::Text),
            other => Err(config_error(&format!(
                "Invalid REPLY_STYLE `{}`, expected `embed` or `text`",
                other
            ))),
        }
    }
}

/// Static decoration attached to embed replies
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EmbedAssets {
    pub thumbnail_url: Option<String>,
    pub banned_image_url: Option<String>,
    pub clean_image_url: Option<String>,
    pub footer_text: String,
}

impl Default for EmbedAssets {
    fn default() -> Self {
        Self {
            thumbnail_url: None,
            banned_image_url: None,
            clean_image_url: None,
            footer_text: "Ban Checker".to_string(),
        }
    }
}

/// Main configuration structure for the bot
#[derive(Debug, Clone)]
pub struct Config {
    /// Discord bot token
    pub discord_token: String,
    /// Guild to register commands in; global registration when unset
    pub guild_id: Option<u64>,
    /// Bot activity status text
    pub activity: String,
    /// Base URL of the ban-status API
    pub ban_api_url: String,
    pub ban_api_timeout_secs: u64,
    pub liveness_host: String,
    pub liveness_port: u16,
    /// Language for users without a stored preference
    pub default_language: Language,
    pub period_unit: PeriodUnit,
    pub reply_style: ReplyStyle,
    pub assets: EmbedAssets,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            discord_token: String::new(),
            guild_id: None,
            activity: DEFAULT_ACTIVITY.to_string(),
            ban_api_url: DEFAULT_BAN_API_URL.to_string(),
            ban_api_timeout_secs: DEFAULT_BAN_API_TIMEOUT_SECS,
            liveness_host: DEFAULT_LIVENESS_HOST.to_string(),
            liveness_port: DEFAULT_LIVENESS_PORT,
            default_language: Language::default(),
            period_unit: PeriodUnit::default(),
            reply_style: ReplyStyle::default(),
            assets: EmbedAssets::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment and config file
    pub fn load() -> BotResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> BotResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let discord_token = var("DISCORD_TOKEN")
            .or_else(|| var("TOKEN"))
            .ok_or_else(|| env_error("DISCORD_TOKEN"))?;

        let guild_id = match var("GUILD_ID") {
            Some(raw) => Some(
                raw.trim()
                    .parse::<u64>()
                    .ok()
                    .filter(|id| *id != 0)
                    .ok_or_else(|| Error::Environment("Invalid GUILD_ID format".to_string()))?,
            ),
            None => None,
        };

        let activity = var("BOT_ACTIVITY").unwrap_or_else(|| DEFAULT_ACTIVITY.to_string());

        let ban_api_url = var("BAN_API_URL").unwrap_or_else(|| DEFAULT_BAN_API_URL.to_string());
        Url::parse(&ban_api_url)
            .map_err(|e| config_error(&format!("Invalid BAN_API_URL `{}`: {}", ban_api_url, e)))?;

        let ban_api_timeout_secs = match var("BAN_API_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|_| config_error("Invalid BAN_API_TIMEOUT_SECS format"))?,
            None => DEFAULT_BAN_API_TIMEOUT_SECS,
        };

        let liveness_host =
            var("LIVENESS_HOST").unwrap_or_else(|| DEFAULT_LIVENESS_HOST.to_string());

        let liveness_port = match var("LIVENESS_PORT").or_else(|| var("PORT")) {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| config_error("Invalid LIVENESS_PORT format"))?,
            None => DEFAULT_LIVENESS_PORT,
        };

        let default_language = match var("DEFAULT_LANGUAGE") {
            Some(raw) => raw
                .parse::<Language>()
                .map_err(|e| config_error(&format!("Invalid DEFAULT_LANGUAGE: {}", e)))?,
            None => Language::default(),
        };

        let period_unit = match var("BAN_PERIOD_UNIT") {
            Some(raw) => raw.parse::<PeriodUnit>()?,
            None => PeriodUnit::default(),
        };

        let reply_style = match var("REPLY_STYLE") {
            Some(raw) => raw.parse::<ReplyStyle>()?,
            None => ReplyStyle::default(),
        };

        let assets_file = var("ASSETS_FILE").unwrap_or_else(|| DEFAULT_ASSETS_FILE.to_string());
        let assets = load_assets(&assets_file)?;

        Ok(Config {
            discord_token,
            guild_id,
            activity,
            ban_api_url,
            ban_api_timeout_secs,
            liveness_host,
            liveness_port,
            default_language,
            period_unit,
            reply_style,
            assets,
        })
    }

    /// Address the liveness endpoint binds to
    pub fn liveness_addr(&self) -> String {
        format!("{}:{}", self.liveness_host, self.liveness_port)
    }
}

/// Read embed assets from a TOML file, falling back to defaults when absent
fn load_assets(path: &str) -> BotResult<EmbedAssets> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(toml::from_str::<EmbedAssets>(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(EmbedAssets::default()),
        Err(e) => Err(e.into()),
    }
}
