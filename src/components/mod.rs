// Export components
pub mod ban_api;
pub mod ban_check;
pub mod language;
pub mod liveness;

pub use ban_api::{BanApiClient, BanLookup};
pub use ban_check::BanChecker;
pub use language::{InMemoryLanguageStore, Language, LanguagePreferences, LanguageStore};
pub use liveness::{BotStatus, LivenessServer};
