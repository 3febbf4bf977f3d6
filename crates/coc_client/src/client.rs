use crate::{CocError, LookupResult, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::StatusCode;
use serde_json::Value;

pub const BASE_URL: &str = "https://api.clashofclans.com/v1/";

/// Whether the client must release its transport session on teardown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOwnership {
    /// Created by the client; released by [`CocClient::close`].
    Owned,
    /// Supplied by the caller, who keeps it after the client is closed.
    Borrowed,
}

/// Authenticated handle to the Clash of Clans API.
///
/// All lookups take `&self`, so one client can serve many concurrent calls. Share it
/// behind an `Arc` and call [`CocClient::close`] once the last user is done.
#[derive(Debug)]
pub struct CocClient {
    http_client: reqwest::Client,
    ownership: SessionOwnership,
    base_url: String,
    headers: HeaderMap,
}

impl CocClient {
    /// Creates a client with its own transport session.
    pub fn new(token: &str) -> Result<Self> {
        let http_client = reqwest::Client::builder().build()?;
        Self::build(token, http_client, SessionOwnership::Owned, BASE_URL)
    }

    /// Creates a client on top of a session the caller continues to own.
    pub fn with_session(token: &str, session: reqwest::Client) -> Result<Self> {
        Self::build(token, session, SessionOwnership::Borrowed, BASE_URL)
    }

    fn build(
        token: &str,
        http_client: reqwest::Client,
        ownership: SessionOwnership,
        base_url: &str,
    ) -> Result<Self> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|_| CocError::InvalidToken("token is not a valid header value".into()))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        Ok(Self {
            http_client,
            ownership,
            base_url: base_url.to_string(),
            headers,
        })
    }

    #[cfg(test)]
    pub(crate) fn for_base_url(base_url: &str) -> Self {
        Self::build(
            "test-token",
            reqwest::Client::new(),
            SessionOwnership::Owned,
            base_url,
        )
        .unwrap()
    }

    /// Performs one GET against `base_url + path` and maps the response.
    ///
    /// `path` must already be normalized (see [`crate::tag::endpoint_path`]).
    pub(crate) async fn get(&self, path: &str) -> Result<LookupResult> {
        let url = format!("{}{}", self.base_url, path);

        tracing::debug!("Sending API request: path={}", path);

        let response = self
            .http_client
            .get(&url)
            .headers(self.headers.clone())
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            tracing::warn!("API error: status={}, path={}", status.as_u16(), path);
            return Err(CocError::api(status.as_u16()));
        }

        let body = response.bytes().await?;
        match decode_body(&body) {
            Ok(result) => {
                tracing::debug!("API request successful: path={}", path);
                Ok(result)
            }
            Err(e) => {
                tracing::warn!("Failed to decode API response: path={}, error={}", path, e);
                Err(e)
            }
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn ownership(&self) -> SessionOwnership {
        self.ownership
    }

    pub fn owns_session(&self) -> bool {
        self.ownership == SessionOwnership::Owned
    }

    /// Tears the client down. An owned session is released; a borrowed one stays
    /// usable by its owner.
    pub fn close(self) {
        match self.ownership {
            SessionOwnership::Owned => {
                tracing::debug!("Releasing owned HTTP session");
                drop(self.http_client);
            }
            SessionOwnership::Borrowed => {
                tracing::debug!("Leaving borrowed HTTP session to its owner");
            }
        }
    }
}

fn decode_body(body: &[u8]) -> Result<LookupResult> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(CocError::decode("empty response body"));
    }

    let value: Value =
        serde_json::from_slice(body).map_err(|e| CocError::decode(e.to_string()))?;

    LookupResult::from_value(value).ok_or_else(|| CocError::decode("expected a JSON object"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn mock_client(server: &MockServer) -> CocClient {
        CocClient::for_base_url(&format!("{}/v1/", server.base_url()))
    }

    #[test]
    fn test_client_creation() {
        let client = CocClient::new("secret").unwrap();
        assert_eq!(client.base_url(), BASE_URL);
        assert_eq!(client.ownership(), SessionOwnership::Owned);
        assert!(client.owns_session());
        assert_eq!(
            client.headers.get(AUTHORIZATION).unwrap().to_str().unwrap(),
            "Bearer secret"
        );
        client.close();
    }

    #[test]
    fn test_client_with_borrowed_session() {
        let session = reqwest::Client::new();
        let client = CocClient::with_session("secret", session.clone()).unwrap();
        assert_eq!(client.ownership(), SessionOwnership::Borrowed);
        assert!(!client.owns_session());
        assert_eq!(client.base_url(), "https://api.clashofclans.com/v1/");
        client.close();
    }

    #[test]
    fn test_client_is_shareable_across_tasks() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CocClient>();
    }

    #[test]
    fn test_invalid_token_rejected() {
        let err = CocClient::new("bad\ntoken").unwrap_err();
        assert!(matches!(err, CocError::InvalidToken(_)));
        assert!(err.is_domain());
    }

    #[test]
    fn test_decode_body() {
        assert!(matches!(decode_body(b""), Err(CocError::Decode { .. })));
        assert!(matches!(decode_body(b"  \n"), Err(CocError::Decode { .. })));
        assert!(matches!(decode_body(b"<html>"), Err(CocError::Decode { .. })));
        assert!(matches!(decode_body(b"[1,2]"), Err(CocError::Decode { .. })));
        assert_eq!(
            decode_body(br#"{"name":"x"}"#).unwrap().get_str("name"),
            Some("x")
        );
    }

    #[tokio::test]
    async fn test_get_success_sends_bearer_token() {
        let server = MockServer::start();
        let m = server.mock(|when, then| {
            when.method(GET)
                .path("/v1/locations")
                .header("authorization", "Bearer test-token");
            then.status(200)
                .json_body(json!({"items": [{"id": 32000006, "name": "International"}]}));
        });

        let client = mock_client(&server);
        let result = client.get("locations").await.unwrap();

        m.assert();
        assert_eq!(result.get_str("items.0.name"), Some("International"));
        assert_eq!(result.get_i64("items.0.id"), Some(32000006));
    }

    #[tokio::test]
    async fn test_get_preserves_json_shape() {
        let payload = json!({
            "tag": "#2PP",
            "name": "Test Clan",
            "clanLevel": 10,
            "isFamilyFriendly": false,
            "location": {"id": 1, "name": "Europe"},
            "labels": [],
            "description": null
        });

        let server = MockServer::start();
        let _m = server.mock(|when, then| {
            when.method(GET).path("/v1/shape");
            then.status(200).json_body(payload.clone());
        });

        let result = mock_client(&server).get("shape").await.unwrap();
        assert_eq!(result.into_value(), payload);
    }

    #[tokio::test]
    async fn test_mapped_statuses_raise_api_error() {
        let expected = [
            (400, "Client provided incorrect parameters for the request."),
            (403, "Access denied, either because of missing/incorrect credentials or used API token does not grant access to the requested resource."),
            (404, "Resource was not found."),
            (429, "Request was throttled, because amount of requests was above the threshold defined for the used API token."),
            (500, "Unknown error happened when handling the request."),
            (503, "Service is temprorarily unavailable because of maintenance."),
        ];

        let server = MockServer::start();
        for (status, _) in expected {
            server.mock(|when, then| {
                when.method(GET).path(format!("/v1/status/{}", status));
                then.status(status).json_body(json!({"reason": "whatever"}));
            });
        }

        let client = mock_client(&server);
        for (status, text) in expected {
            let err = client.get(&format!("status/{}", status)).await.unwrap_err();
            let message = err.to_string();
            assert!(message.contains(&status.to_string()), "{message}");
            assert!(message.contains(text), "{message}");
            assert_eq!(err.status(), Some(status));
            assert!(err.is_domain());
        }
    }

    #[tokio::test]
    async fn test_unmapped_status_uses_fallback() {
        let server = MockServer::start();
        let _m = server.mock(|when, then| {
            when.method(GET).path("/v1/teapot");
            then.status(418);
        });

        let err = mock_client(&server).get("teapot").await.unwrap_err();
        match err {
            CocError::Api { status, message } => {
                assert_eq!(status, 418);
                assert_eq!(message, "Unexpected response status returned by the API.");
            }
            other => panic!("Expected Api error, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_ok_with_bad_body_is_decode_error() {
        let server = MockServer::start();
        let _empty = server.mock(|when, then| {
            when.method(GET).path("/v1/empty");
            then.status(200);
        });
        let _malformed = server.mock(|when, then| {
            when.method(GET).path("/v1/malformed");
            then.status(200).body("{\"name\": ");
        });
        let _array = server.mock(|when, then| {
            when.method(GET).path("/v1/array");
            then.status(200).json_body(json!([1, 2, 3]));
        });

        let client = mock_client(&server);
        for path in ["empty", "malformed", "array"] {
            let err = client.get(path).await.unwrap_err();
            assert!(
                matches!(err, CocError::Decode { status: 200, .. }),
                "{path}: {err:?}"
            );
        }
    }

    #[tokio::test]
    async fn test_transport_failure_is_not_remapped() {
        let client = CocClient::for_base_url("http://127.0.0.1:1/v1/");
        let err = client.get("players/%232PP").await.unwrap_err();
        assert!(matches!(err, CocError::Transport(_)));
        assert!(!err.is_domain());
        assert_eq!(err.status(), None);
    }

    #[tokio::test]
    async fn test_borrowed_session_survives_close() {
        let server = MockServer::start();
        let _m = server.mock(|when, then| {
            when.method(GET).path("/v1/ping");
            then.status(200).json_body(json!({"ok": true}));
        });

        let session = reqwest::Client::new();
        let client = CocClient::with_session("secret", session.clone()).unwrap();
        client.close();

        let resp = session
            .get(format!("{}/v1/ping", server.base_url()))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }
}
