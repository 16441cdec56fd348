mod client;
pub mod models;

pub use client::BanApiClient;
pub use models::{BanPeriod, BanQueryResult, PayloadError};

use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

/// A game account identifier made only of ASCII digits
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Uid(String);

/// Identifier rejected before any network call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("`{0}` is not a numeric UID")]
pub struct InvalidUid(pub String);

impl Uid {
    /// Validate user input, ignoring surrounding whitespace
    pub fn parse(raw: &str) -> Result<Self, InvalidUid> {
        let trimmed = raw.trim();
        if !trimmed.is_empty() && trimmed.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Self(trimmed.to_string()))
        } else {
            Err(InvalidUid(raw.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Uid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Failures talking to the ban-status API
#[derive(Debug, Error)]
pub enum BanApiError {
    #[error("API returned HTTP status {0}")]
    Status(reqwest::StatusCode),

    #[error("API rejected the query: {0}")]
    Rejected(PayloadError),

    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to decode API response: {0}")]
    Decode(String),

    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),
}

/// Source of ban-status answers
#[async_trait]
pub trait BanLookup: Send + Sync {
    /// Look up `uid`; every failure collapses into `None`
    async fn check_ban(&self, uid: &Uid) -> Option<BanQueryResult>;
}
