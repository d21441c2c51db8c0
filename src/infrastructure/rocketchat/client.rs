//! Rocket.Chat REST client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{self, HeaderMap};
use reqwest::{Client, RequestBuilder, StatusCode};
use tracing::{debug, warn};

use super::dto::{CreateDiscussionResponse, ErrorResponse, SpotlightResponse};
use crate::domain::discussion::CreateDiscussionRequest;
use crate::domain::entities::Credentials;
use crate::domain::errors::ClientError;
use crate::domain::ports::{DirectoryPort, DiscussionPort};
use crate::domain::search::{SearchQuery, SearchRecord};

const API_PREFIX: &str = "api/v1";
const USER_AGENT: &str = concat!("rcdiscuss/", env!("CARGO_PKG_VERSION"));
const DEFAULT_RETRY_AFTER_MS: u64 = 5000;

/// REST client implementing the directory and discussion ports.
pub struct RocketChatClient {
    client: Client,
    base_url: String,
    credentials: Credentials,
}

impl RocketChatClient {
    /// Creates client for `server_url`.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn new(
        server_url: impl Into<String>,
        credentials: Credentials,
        timeout: Option<Duration>,
    ) -> Result<Self, ClientError> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ClientError::unexpected(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: server_url.into().trim_end_matches('/').to_string(),
            credentials,
        })
    }

    fn endpoint(&self, method: &str) -> String {
        format!("{}/{API_PREFIX}/{method}", self.base_url)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("X-User-Id", &self.credentials.user_id)
            .header("X-Auth-Token", self.credentials.token.as_str())
    }

    async fn handle_error_response(status: StatusCode, response: reqwest::Response) -> ClientError {
        let retry_after_ms = retry_after_ms(response.headers());

        let error_message = match response.json::<ErrorResponse>().await {
            Ok(error) => error.into_message().unwrap_or_else(|| format!("HTTP {status}")),
            Err(_) => format!("HTTP {status}"),
        };

        match status {
            StatusCode::UNAUTHORIZED => ClientError::Unauthorized,
            StatusCode::BAD_REQUEST | StatusCode::FORBIDDEN => ClientError::rejected(error_message),
            StatusCode::TOO_MANY_REQUESTS => ClientError::RateLimited { retry_after_ms },
            StatusCode::SERVICE_UNAVAILABLE | StatusCode::GATEWAY_TIMEOUT => {
                ClientError::network("server is temporarily unavailable")
            }
            _ => ClientError::unexpected(format!(
                "unexpected response: {status} - {error_message}"
            )),
        }
    }
}

/// `Retry-After` in milliseconds. Huge values saturate.
fn retry_after_ms(headers: &HeaderMap) -> u64 {
    headers
        .get(header::RETRY_AFTER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<u64>().ok())
        .map_or(DEFAULT_RETRY_AFTER_MS, |secs| secs.saturating_mul(1000))
}

fn map_send_error(e: &reqwest::Error) -> ClientError {
    warn!(error = %e, "Request to chat server failed");
    if e.is_timeout() {
        ClientError::network("request timed out")
    } else if e.is_connect() {
        ClientError::network("failed to connect to server")
    } else {
        ClientError::network(e.to_string())
    }
}

/// Spotlight narrows its search with a `@` (users) or `#` (rooms) prefix.
fn spotlight_text(query: &SearchQuery) -> String {
    match (query.filter_users, query.filter_rooms) {
        (true, false) => format!("@{}", query.text),
        (false, true) => format!("#{}", query.text),
        _ => query.text.clone(),
    }
}

#[async_trait]
impl DirectoryPort for RocketChatClient {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<SearchRecord>, ClientError> {
        if !query.filter_users && !query.filter_rooms {
            return Ok(Vec::new());
        }

        let text = spotlight_text(query);
        debug!(query = %text, "Calling spotlight");

        let response = self
            .authorized(self.client.get(self.endpoint("spotlight")))
            .query(&[("query", text.as_str())])
            .send()
            .await
            .map_err(|e| map_send_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::handle_error_response(status, response).await);
        }

        let spotlight: SpotlightResponse = response.json().await.map_err(|e| {
            warn!(error = %e, "Failed to parse spotlight response");
            ClientError::invalid_response(e.to_string())
        })?;

        Ok(spotlight
            .into_records()
            .into_iter()
            .filter(|record| match record {
                SearchRecord::User(_) => query.filter_users,
                SearchRecord::Room(_) => query.filter_rooms,
            })
            .collect())
    }
}

#[async_trait]
impl DiscussionPort for RocketChatClient {
    async fn create_discussion(&self, request: CreateDiscussionRequest) -> Result<(), ClientError> {
        let response = self
            .authorized(self.client.post(self.endpoint("rooms.createDiscussion")))
            .json(&request)
            .send()
            .await
            .map_err(|e| map_send_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::handle_error_response(status, response).await);
        }

        let body: CreateDiscussionResponse = response.json().await.map_err(|e| {
            warn!(error = %e, "Failed to parse createDiscussion response");
            ClientError::invalid_response(e.to_string())
        })?;

        if body.success {
            Ok(())
        } else {
            Err(ClientError::rejected(
                body.error.unwrap_or_else(|| "discussion was not created".to_string()),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::AuthToken;
    use reqwest::header::HeaderValue;
    use test_case::test_case;

    fn client(server: &str) -> RocketChatClient {
        let token = AuthToken::new("9HqLlyZOugoStsXCUfD_0YdwnNnunAJF8V47U3QHXSq").unwrap();
        RocketChatClient::new(server, Credentials::new("u1", token), None).unwrap()
    }

    #[test_case(SearchQuery::new("gen").without_users(), "#gen" ; "rooms_only")]
    #[test_case(SearchQuery::new("bo").without_rooms(), "@bo" ; "users_only")]
    #[test_case(SearchQuery::new("x"), "x" ; "both")]
    fn test_spotlight_text(query: SearchQuery, expected: &str) {
        assert_eq!(spotlight_text(&query), expected);
    }

    #[test]
    fn test_endpoint_strips_trailing_slash() {
        let client = client("https://open.rocket.chat/");
        assert_eq!(
            client.endpoint("spotlight"),
            "https://open.rocket.chat/api/v1/spotlight"
        );
    }

    #[test_case(Some("3"), 3_000 ; "seconds")]
    #[test_case(Some("18446744073709551615"), u64::MAX ; "saturates")]
    #[test_case(Some("soon"), DEFAULT_RETRY_AFTER_MS ; "unparseable")]
    #[test_case(None, DEFAULT_RETRY_AFTER_MS ; "missing")]
    fn test_retry_after_ms(value: Option<&'static str>, expected: u64) {
        let mut headers = HeaderMap::new();
        if let Some(value) = value {
            headers.insert(header::RETRY_AFTER, HeaderValue::from_static(value));
        }
        assert_eq!(retry_after_ms(&headers), expected);
    }

    #[tokio::test]
    async fn test_search_without_targets_is_empty() {
        let client = client("http://127.0.0.1:9");
        let query = SearchQuery::new("x").without_users().without_rooms();

        let records = client.search(&query).await.unwrap();
        assert!(records.is_empty());
    }
}
