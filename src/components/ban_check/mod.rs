mod checker;
pub mod replies;

pub use checker::BanChecker;
pub use replies::{BanReport, CheckReply, LanguageReply};
