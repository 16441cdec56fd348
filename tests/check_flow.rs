use async_trait::async_trait;
use bancheck::components::ban_api::{BanPeriod, BanQueryResult, Uid};
use bancheck::components::ban_check::{CheckReply, LanguageReply};
use bancheck::components::{
    BanChecker, BanLookup, InMemoryLanguageStore, Language, LanguagePreferences,
};
use bancheck::config::PeriodUnit;
use poise::serenity_prelude::UserId;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Lookup that returns a fixed answer and records every call
#[derive(Default)]
struct MockLookup {
    answer: Option<BanQueryResult>,
    calls: Mutex<Vec<String>>,
}

impl MockLookup {
    fn answering(answer: Option<BanQueryResult>) -> Arc<Self> {
        Arc::new(Self {
            answer,
            calls: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl BanLookup for MockLookup {
    async fn check_ban(&self, uid: &Uid) -> Option<BanQueryResult> {
        self.calls.lock().unwrap().push(uid.to_string());
        self.answer.clone()
    }
}

fn banned() -> BanQueryResult {
    BanQueryResult {
        is_banned: true,
        nickname: "Foo".to_string(),
        period: BanPeriod::Known(6),
        region: "EU".to_string(),
    }
}

fn checker(lookup: Arc<MockLookup>, default: Language) -> BanChecker {
    let preferences = LanguagePreferences::new(Arc::new(InMemoryLanguageStore::new()), default);
    BanChecker::new(lookup, preferences, PeriodUnit::Months)
}

/// Non-numeric input never reaches the lookup or the defer hook
#[tokio::test]
async fn test_invalid_uid_skips_lookup() {
    let lookup = MockLookup::answering(Some(banned()));
    let checker = checker(lookup.clone(), Language::En);
    let deferred = AtomicUsize::new(0);

    for raw in ["abc", "", "12x", "-1", "1 2"] {
        let reply = checker
            .check(UserId::new(1), raw, || async {
                deferred.fetch_add(1, Ordering::SeqCst);
                Ok(())
            })
            .await
            .unwrap();

        assert_eq!(reply, CheckReply::InvalidUid(Language::En));
        assert_eq!(reply.to_text(), "❌ Invalid UID. Please enter numbers only.");
    }

    assert!(lookup.calls().is_empty());
    assert_eq!(deferred.load(Ordering::SeqCst), 0);
}

/// Numeric input defers once and looks up once
#[tokio::test]
async fn test_valid_uid_defers_then_looks_up_once() {
    let lookup = MockLookup::answering(Some(banned()));
    let checker = checker(lookup.clone(), Language::En);
    let deferred = AtomicUsize::new(0);

    let reply = checker
        .check(UserId::new(1), "123456", || async {
            deferred.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
        .await
        .unwrap();

    assert_eq!(deferred.load(Ordering::SeqCst), 1);
    assert_eq!(lookup.calls(), vec!["123456".to_string()]);

    let text = reply.to_text();
    assert!(text.contains("BANNED"));
    assert!(text.contains("Foo"));
    assert!(text.contains("EU"));
    assert!(text.contains("6"));
}

/// A failing defer aborts before the lookup
#[tokio::test]
async fn test_failed_defer_aborts() {
    let lookup = MockLookup::answering(Some(banned()));
    let checker = checker(lookup.clone(), Language::En);

    let result = checker
        .check(UserId::new(1), "123", || async {
            Err(bancheck::error::other_error("interaction expired"))
        })
        .await;

    assert!(result.is_err());
    assert!(lookup.calls().is_empty());
}

/// No result from the lookup becomes the generic unavailable reply
#[tokio::test]
async fn test_missing_result_is_unavailable() {
    let lookup = MockLookup::answering(None);
    let checker = checker(lookup.clone(), Language::En);

    let reply = checker
        .check(UserId::new(1), "42", || async { Ok(()) })
        .await
        .unwrap();

    assert_eq!(reply, CheckReply::Unavailable(Language::En));
    assert!(reply.to_text().contains("try again later"));
    assert_eq!(lookup.calls().len(), 1);
}

/// A language preference applies to its user only
#[tokio::test]
async fn test_language_preference_is_per_user() {
    let lookup = MockLookup::answering(Some(banned()));
    let checker = checker(lookup, Language::En);
    let french_user = UserId::new(10);
    let other_user = UserId::new(20);

    assert_eq!(
        checker.set_language(french_user, "FR").await,
        LanguageReply::Set(Language::Fr)
    );

    let french = checker
        .check(french_user, "42", || async { Ok(()) })
        .await
        .unwrap();
    let english = checker
        .check(other_user, "42", || async { Ok(()) })
        .await
        .unwrap();

    assert_eq!(french.language(), Language::Fr);
    assert!(french.to_text().contains("Compte BANNI"));
    assert!(french.to_text().contains("6 mois"));

    assert_eq!(english.language(), Language::En);
    assert!(english.to_text().contains("Account is BANNED"));
}

/// Unsupported codes are rejected in the language still in effect
#[tokio::test]
async fn test_unsupported_language_keeps_preference() {
    let lookup = MockLookup::answering(None);
    let checker = checker(lookup, Language::En);
    let user = UserId::new(5);

    checker.set_language(user, "fr").await;
    let reply = checker.set_language(user, "es").await;

    assert_eq!(
        reply,
        LanguageReply::Invalid {
            current: Language::Fr,
            code: "es".to_string()
        }
    );
    assert!(reply.to_text().contains("non prise en charge"));
    assert_eq!(
        checker.preferences().language_for(user).await,
        Language::Fr
    );
}

/// The configured default applies to users without a preference
#[tokio::test]
async fn test_configured_default_language() {
    let lookup = MockLookup::answering(None);
    let checker = checker(lookup, Language::Fr);

    let reply = checker
        .check(UserId::new(99), "nope", || async { Ok(()) })
        .await
        .unwrap();

    assert_eq!(reply, CheckReply::InvalidUid(Language::Fr));
    assert_eq!(checker.preferences().default_language(), Language::Fr);
}
