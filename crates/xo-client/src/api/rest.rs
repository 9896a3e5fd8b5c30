//! REST gateway client.

use crate::address::StateAddress;
use crate::api::gateway::Gateway;
use crate::api::response::{BatchStatusResponse, StateListResponse, StateResponse};
use crate::config::XoConfig;
use crate::error::{XoError, XoResult};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, RequestBuilder};
use std::time::Duration;
use tracing::debug;
use url::Url;

const OCTET_STREAM_CONTENT_TYPE: &str = "application/octet-stream";

/// Client for a ledger node's REST gateway.
///
/// Requests are never retried: a transport failure or a non-2xx answer is
/// returned to the caller as an [`XoError`].
///
/// # Example
///
/// ```rust,no_run
/// use xo_client::api::{Gateway, RestGateway};
/// use xo_client::address::xo_prefix;
/// use xo_client::XoConfig;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let gateway = RestGateway::new(XoConfig::new("localhost:8008")?)?;
///     let games = gateway.state_by_prefix(&xo_prefix()).await?;
///     println!("{} games", games.data.len());
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RestGateway {
    config: XoConfig,
    client: Client,
}

impl RestGateway {
    /// Creates a new gateway client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build (e.g., invalid TLS configuration).
    pub fn new(config: XoConfig) -> XoResult<Self> {
        let pool = config.pool_config();

        let mut builder = Client::builder()
            .timeout(config.timeout())
            .pool_max_idle_per_host(pool.max_idle_per_host.unwrap_or(usize::MAX))
            .pool_idle_timeout(pool.idle_timeout)
            .tcp_nodelay(pool.tcp_nodelay);

        if let Some(keepalive) = pool.tcp_keepalive {
            builder = builder.tcp_keepalive(keepalive);
        }

        let client = builder.build().map_err(XoError::Http)?;

        Ok(Self { config, client })
    }

    /// Creates a gateway client around an existing `reqwest` client.
    pub fn from_client(config: XoConfig, client: Client) -> Self {
        Self { config, client }
    }

    /// Returns the base URL of the gateway.
    pub fn base_url(&self) -> &Url {
        self.config.base_url()
    }

    /// Returns the configuration.
    pub fn config(&self) -> &XoConfig {
        &self.config
    }

    fn build_url(&self, path: &str) -> Url {
        let mut url = self.config.base_url().clone();
        if !path.is_empty() {
            // Ensure base path ends with /
            if !url.path().ends_with('/') {
                url.set_path(&format!("{}/", url.path()));
            }
            url.set_path(&format!("{}{}", url.path(), path));
        }
        url
    }

    async fn get_text(&self, url: Url) -> XoResult<String> {
        debug!(%url, "GET");
        Self::send(self.client.get(url)).await
    }

    async fn send(request: RequestBuilder) -> XoResult<String> {
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    async fn handle_response(response: reqwest::Response) -> XoResult<String> {
        let status = response.status();
        if status.is_success() {
            Ok(response.text().await?)
        } else {
            let reason = status.canonical_reason().unwrap_or("Unknown error");
            let body = response.text().await.unwrap_or_default();
            let message = if body.trim().is_empty() {
                reason.to_string()
            } else {
                format!("{reason}: {}", body.trim())
            };
            Err(XoError::api(status.as_u16(), message))
        }
    }
}

#[async_trait]
impl Gateway for RestGateway {
    async fn submit_batches(&self, body: Vec<u8>) -> XoResult<String> {
        let url = self.build_url("batches");
        debug!(%url, bytes = body.len(), "POST batches");
        let request = self
            .client
            .post(url)
            .header(CONTENT_TYPE, OCTET_STREAM_CONTENT_TYPE)
            .body(body);
        Self::send(request).await
    }

    async fn batch_status(&self, batch_id: &str, wait: Duration) -> XoResult<BatchStatusResponse> {
        let mut url = self.build_url("batch_status");
        url.query_pairs_mut()
            .append_pair("id", batch_id)
            .append_pair("wait", &wait.as_secs().to_string());
        debug!(%url, ?wait, "GET");
        // The gateway may hold the request for `wait` before answering
        let request = self
            .client
            .get(url)
            .timeout(wait + self.config.timeout());
        let document = Self::send(request).await?;
        BatchStatusResponse::from_document(&document)
    }

    async fn state(&self, address: &StateAddress) -> XoResult<StateResponse> {
        let url = self.build_url(&format!("state/{address}"));
        let document = self.get_text(url).await?;
        StateResponse::from_document(&document)
    }

    async fn state_by_prefix(&self, prefix: &str) -> XoResult<StateListResponse> {
        let mut url = self.build_url("state");
        url.query_pairs_mut().append_pair("address", prefix);
        let document = self.get_text(url).await?;
        StateListResponse::from_document(&document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::{xo_address, xo_prefix};
    use crate::api::response::BatchStatus;
    use wiremock::{
        matchers::{body_bytes, header, method, path, query_param},
        Mock, MockServer, ResponseTemplate,
    };

    fn create_mock_gateway(server: &MockServer) -> RestGateway {
        RestGateway::new(XoConfig::new(&server.uri()).unwrap()).unwrap()
    }

    #[test]
    fn test_build_url() {
        let gateway = RestGateway::new(XoConfig::new("localhost:8008").unwrap()).unwrap();
        assert_eq!(
            gateway.build_url("batches").as_str(),
            "http://localhost:8008/batches"
        );

        let gateway = RestGateway::new(XoConfig::new("http://proxy/ledger").unwrap()).unwrap();
        assert_eq!(
            gateway.build_url("state").as_str(),
            "http://proxy/ledger/state"
        );
    }

    #[tokio::test]
    async fn test_submit_batches_posts_octet_stream() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/batches"))
            .and(header("content-type", "application/octet-stream"))
            .and(body_bytes(vec![0x0a, 0x00]))
            .respond_with(ResponseTemplate::new(202).set_body_string(
                r#"{"link": "http://localhost:8008/batch_status?id=abc"}"#,
            ))
            .expect(1)
            .mount(&server)
            .await;

        let gateway = create_mock_gateway(&server);
        let body = gateway.submit_batches(vec![0x0a, 0x00]).await.unwrap();
        assert!(body.contains("batch_status?id=abc"));
    }

    #[tokio::test]
    async fn test_submit_batches_non_2xx_is_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/batches"))
            .respond_with(ResponseTemplate::new(400).set_body_string("malformed batch list"))
            .expect(1)
            .mount(&server)
            .await;

        let gateway = create_mock_gateway(&server);
        let err = gateway.submit_batches(vec![1, 2, 3]).await.unwrap_err();
        match err {
            XoError::Api {
                status_code,
                message,
            } => {
                assert_eq!(status_code, 400);
                assert!(message.contains("Bad Request"));
                assert!(message.contains("malformed batch list"));
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_batch_status_query() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/batch_status"))
            .and(query_param("id", "abc"))
            .and(query_param("wait", "4"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string("data:\n  abc: COMMITTED\n"),
            )
            .expect(1)
            .mount(&server)
            .await;

        let gateway = create_mock_gateway(&server);
        let response = gateway
            .batch_status("abc", Duration::from_millis(4900))
            .await
            .unwrap();
        assert_eq!(response.status_of("abc"), Some(BatchStatus::Committed));
    }

    #[tokio::test]
    async fn test_batch_status_held_longer_than_request_timeout() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/batch_status"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("data:\n  abc: PENDING\n")
                    .set_delay(Duration::from_millis(1500)),
            )
            .expect(1)
            .mount(&server)
            .await;

        let gateway = RestGateway::new(
            XoConfig::new(&server.uri())
                .unwrap()
                .with_timeout(Duration::from_secs(1)),
        )
        .unwrap();
        let response = gateway
            .batch_status("abc", Duration::from_secs(3))
            .await
            .unwrap();
        assert_eq!(response.status_of("abc"), Some(BatchStatus::Pending));
    }

    #[tokio::test]
    async fn test_batch_status_malformed_document() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/batch_status"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let gateway = create_mock_gateway(&server);
        let err = gateway
            .batch_status("abc", Duration::from_secs(1))
            .await
            .unwrap_err();
        assert!(matches!(err, XoError::Yaml(_)));
    }

    #[tokio::test]
    async fn test_state_by_address() {
        let server = MockServer::start().await;
        let address = xo_address("game1");

        Mock::given(method("GET"))
            .and(path(format!("/state/{address}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": "Z2FtZTEsLS0tLS0tLS0tLFAxLU5FWFQsLA==",
                "head": "f00"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let gateway = create_mock_gateway(&server);
        let response = gateway.state(&address).await.unwrap();
        assert_eq!(response.decode().unwrap(), b"game1,---------,P1-NEXT,,");
    }

    #[tokio::test]
    async fn test_state_not_found() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(format!("/state/{}", xo_address("missing"))))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;

        let gateway = create_mock_gateway(&server);
        let err = gateway.state(&xo_address("missing")).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_state_by_prefix() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/state"))
            .and(query_param("address", xo_prefix()))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [
                    {"address": xo_address("a").to_string(), "data": "YQ=="},
                    {"address": xo_address("b").to_string(), "data": "Yg=="}
                ],
                "head": "f00",
                "link": "http://localhost:8008/state?head=f00"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let gateway = create_mock_gateway(&server);
        let response = gateway.state_by_prefix(&xo_prefix()).await.unwrap();
        assert_eq!(response.data.len(), 2);
        assert_eq!(response.decode_all().unwrap()[1], b"b");
    }

    #[tokio::test]
    async fn test_connection_refused_is_http_error() {
        // Nothing listens on port 9 locally
        let gateway = RestGateway::new(
            XoConfig::new("127.0.0.1:9")
                .unwrap()
                .with_timeout(Duration::from_secs(2)),
        )
        .unwrap();
        let err = gateway.submit_batches(vec![]).await.unwrap_err();
        assert!(matches!(err, XoError::Http(_)));
        assert!(err.is_transport());
    }
}
