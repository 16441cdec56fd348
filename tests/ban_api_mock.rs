use bancheck::components::ban_api::{BanApiError, BanPeriod, Uid};
use bancheck::components::{
    BanApiClient, BanChecker, BanLookup, InMemoryLanguageStore, Language, LanguagePreferences,
};
use bancheck::config::PeriodUnit;
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tiny_http::{Header, Response, Server};

/// Local stand-in for the ban API that answers every request the same way
struct MockBanApi {
    server: Arc<Server>,
    base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
    thread: Option<JoinHandle<()>>,
}

impl MockBanApi {
    fn start(status: u16, body: &str) -> Self {
        Self::start_with_delay(status, body, Duration::ZERO)
    }

    fn start_with_delay(status: u16, body: &str, delay: Duration) -> Self {
        let server = Arc::new(Server::http("127.0.0.1:0").unwrap());
        let addr = server.server_addr().to_ip().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));

        let thread = {
            let server = Arc::clone(&server);
            let requests = Arc::clone(&requests);
            let body = body.to_string();
            thread::spawn(move || {
                for request in server.incoming_requests() {
                    requests.lock().unwrap().push(request.url().to_string());
                    thread::sleep(delay);
                    let header = "Content-Type: application/json".parse::<Header>().unwrap();
                    let response = Response::from_string(body.clone())
                        .with_status_code(status)
                        .with_header(header);
                    let _ = request.respond(response);
                }
            })
        };

        Self {
            server,
            base_url: format!("http://{}", addr),
            requests,
            thread: Some(thread),
        }
    }

    fn client(&self) -> BanApiClient {
        BanApiClient::new(&self.base_url, Duration::from_secs(5)).unwrap()
    }

    fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl Drop for MockBanApi {
    fn drop(&mut self) {
        self.server.unblock();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

const BANNED_BODY: &str =
    r#"{"status":200,"data":{"is_banned":1,"nickname":"Foo","period":6,"region":"EU"}}"#;

fn uid(raw: &str) -> Uid {
    Uid::parse(raw).unwrap()
}

/// A banned account is normalized from the nested data object
#[tokio::test]
async fn test_banned_response_is_normalized() {
    let api = MockBanApi::start(200, BANNED_BODY);

    let result = api.client().check_ban(&uid("123456")).await.unwrap();

    assert!(result.is_banned);
    assert_eq!(result.nickname, "Foo");
    assert_eq!(result.region, "EU");
    assert_eq!(result.period, BanPeriod::Known(6));
    assert_eq!(api.requests(), vec!["/check_ban/123456".to_string()]);
}

/// A clean account with missing fields uses the defaults
#[tokio::test]
async fn test_clean_response_with_defaults() {
    let api = MockBanApi::start(200, r#"{"status":200,"data":{"is_banned":0}}"#);

    let result = api.client().check_ban(&uid("1")).await.unwrap();

    assert!(!result.is_banned);
    assert_eq!(result.nickname, "");
    assert_eq!(result.region, "0");
    assert_eq!(result.period, BanPeriod::Known(0));
}

/// A logical error status yields no result
#[tokio::test]
async fn test_logical_error_status() {
    let api = MockBanApi::start(200, r#"{"status":500,"message":"UID not found"}"#);
    let client = api.client();

    assert!(client.check_ban(&uid("42")).await.is_none());
    assert!(matches!(
        client.fetch(&uid("42")).await,
        Err(BanApiError::Rejected(_))
    ));
}

/// Any HTTP status other than 200 yields no result
#[tokio::test]
async fn test_non_200_http_status() {
    for status in [201, 404, 500, 503] {
        let api = MockBanApi::start(status, BANNED_BODY);
        let client = api.client();

        assert!(client.check_ban(&uid("42")).await.is_none(), "{status}");
        match client.fetch(&uid("42")).await {
            Err(BanApiError::Status(code)) => assert_eq!(code.as_u16(), status),
            other => panic!("unexpected result for {status}: {other:?}"),
        }
    }
}

/// A body that is not JSON yields no result
#[tokio::test]
async fn test_malformed_body() {
    let api = MockBanApi::start(200, "<html>Bad Gateway</html>");

    assert!(api.client().check_ban(&uid("42")).await.is_none());
    assert!(matches!(
        api.client().fetch(&uid("42")).await,
        Err(BanApiError::Decode(_))
    ));
}

/// A `data` member that is not an object yields no result
#[tokio::test]
async fn test_non_object_data() {
    let api = MockBanApi::start(200, r#"{"status":200,"data":null}"#);
    let client = api.client();

    assert!(client.check_ban(&uid("42")).await.is_none());
    assert!(matches!(
        client.fetch(&uid("42")).await,
        Err(BanApiError::Decode(_))
    ));
}

/// A refused connection yields no result instead of an error
#[tokio::test]
async fn test_connection_refused() {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let client =
        BanApiClient::new(&format!("http://127.0.0.1:{}", port), Duration::from_secs(5)).unwrap();

    assert!(client.check_ban(&uid("42")).await.is_none());
    assert!(matches!(
        client.fetch(&uid("42")).await,
        Err(BanApiError::Transport(_))
    ));
}

/// A slow upstream is cut off by the transport timeout
#[tokio::test]
async fn test_timeout() {
    let api = MockBanApi::start_with_delay(200, BANNED_BODY, Duration::from_millis(1500));
    let client = BanApiClient::new(&api.base_url, Duration::from_millis(200)).unwrap();

    assert!(client.check_ban(&uid("42")).await.is_none());
}

/// Repeated lookups hit the API each time and render identically
#[tokio::test]
async fn test_repeated_lookups_are_identical() {
    let api = MockBanApi::start(200, BANNED_BODY);
    let preferences =
        LanguagePreferences::new(Arc::new(InMemoryLanguageStore::new()), Language::En);
    let checker = BanChecker::new(Arc::new(api.client()), preferences, PeriodUnit::Months);

    let first = checker.lookup(&uid("777"), Language::En).await;
    let second = checker.lookup(&uid("777"), Language::En).await;

    assert_eq!(first, second);
    assert_eq!(first.to_text(), second.to_text());
    assert_eq!(api.requests().len(), 2);
}
