use super::{BanApiError, BanLookup, BanQueryResult, PayloadError, Uid};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, error, info, warn};
use url::Url;

/// HTTP client for the remote `/check_ban/{uid}` endpoint
#[derive(Debug, Clone)]
pub struct BanApiClient {
    client: Client,
    base_url: Url,
}

impl BanApiClient {
    /// Create a client for the API rooted at `base_url`
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, BanApiError> {
        let base_url =
            Url::parse(base_url).map_err(|e| BanApiError::InvalidUrl(format!("{}: {}", base_url, e)))?;

        if base_url.cannot_be_a_base() {
            return Err(BanApiError::InvalidUrl(base_url.to_string()));
        }

        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self { client, base_url })
    }

    /// Full request URL for `uid`
    pub fn endpoint(&self, uid: &Uid) -> Result<Url, BanApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| BanApiError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .push("check_ban")
            .push(uid.as_str());
        Ok(url)
    }

    /// Query the API, keeping the failure detail
    pub async fn fetch(&self, uid: &Uid) -> Result<BanQueryResult, BanApiError> {
        let url = self.endpoint(uid)?;
        debug!("Checking ban status at {}", url);

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(BanApiError::Status(status));
        }

        let body = response.text().await?;
        let payload: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| BanApiError::Decode(e.to_string()))?;

        BanQueryResult::from_payload(&payload).map_err(|e| match e {
            PayloadError::NotAnObject | PayloadError::DataNotAnObject => {
                BanApiError::Decode(e.to_string())
            }
            rejected => BanApiError::Rejected(rejected),
        })
    }
}

#[async_trait]
impl BanLookup for BanApiClient {
    async fn check_ban(&self, uid: &Uid) -> Option<BanQueryResult> {
        match self.fetch(uid).await {
            Ok(result) => Some(result),
            Err(BanApiError::Status(status)) => {
                warn!("Ban API returned status code {} for UID {}", status, uid);
                None
            }
            Err(BanApiError::Rejected(reason)) => {
                info!("Ban API error for UID {}: {}", uid, reason);
                None
            }
            Err(e) => {
                error!("Ban lookup for UID {} failed: {}", uid, e);
                None
            }
        }
    }
}
