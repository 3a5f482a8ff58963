//! HTTP plumbing shared by every endpoint

use bytes::Bytes;
use colornav_core::config::ClientConfig;
use colornav_core::models::ApiErrorBody;
use colornav_core::{Error, Result};
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use reqwest::{Method, RequestBuilder, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Client for a single ColorNavigator API server
#[derive(Debug, Clone)]
pub struct ColorNavigatorClient {
    base_url: Url,
    http: reqwest::Client,
}

impl ColorNavigatorClient {
    /// Build a client from connection settings
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url())
            .map_err(|e| Error::Config(format!("Invalid API address {}: {}", config.base_url(), e)))?;
        if base_url.cannot_be_a_base() {
            return Err(Error::Config(format!("{} cannot be used as a base URL", base_url)));
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if config.bypass_proxy {
            // The API server is local; corporate proxies must not see it.
            builder = builder.no_proxy();
        }
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;

        tracing::debug!("ColorNavigator API at {}", base_url);
        Ok(Self { base_url, http })
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Append percent-encoded path segments to the base URL
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// `/monitors/{monitor_id}/...`
    pub(crate) fn monitor_endpoint(&self, monitor_id: &str, rest: &[&str]) -> Url {
        let mut segments = vec!["monitors", monitor_id];
        segments.extend_from_slice(rest);
        self.endpoint(&segments)
    }

    pub(crate) fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.http.request(method, url)
    }

    /// GET and decode a JSON body
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        let body = self.execute(self.request(Method::GET, url)).await?;
        decode(&body)
    }

    /// Send a JSON body; the response body is returned undecoded
    pub(crate) async fn send_json<B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: Url,
        body: &B,
    ) -> Result<Bytes> {
        self.execute(self.request(method, url).json(body)).await
    }

    /// Send one request; any non-2xx status becomes [`Error::Api`]
    pub(crate) async fn execute(&self, request: RequestBuilder) -> Result<Bytes> {
        let request = request
            .build()
            .map_err(|e| Error::InvalidInput(format!("Failed to build request: {}", e)))?;
        let method = request.method().clone();
        let url = request.url().clone();
        tracing::debug!("➡️ {} {}", method, url);

        let response = self
            .http
            .execute(request)
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;
        tracing::debug!("⬅️ {} {} -> {}", method, url, status);

        if status.is_success() {
            return Ok(body);
        }

        let message = serde_json::from_slice::<ApiErrorBody>(&body)
            .map(|b| b.message)
            .unwrap_or_else(|_| String::from_utf8_lossy(&body).trim().to_string());
        tracing::warn!("{} {} failed with {}: {}", method, url, status, message);

        Err(Error::Api {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            message,
        })
    }
}

/// Decode a success body
pub(crate) fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    serde_json::from_slice(body).map_err(|e| Error::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(config: ClientConfig) -> ColorNavigatorClient {
        ColorNavigatorClient::new(&config).unwrap()
    }

    #[test]
    fn test_endpoint_join() {
        let c = client(ClientConfig::default());
        assert_eq!(
            c.monitor_endpoint("A1", &["color-modes", "3"]).as_str(),
            "http://127.0.0.1:50005/monitors/A1/color-modes/3"
        );
        assert_eq!(c.endpoint(&["monitors"]).as_str(), "http://127.0.0.1:50005/monitors");
    }

    #[test]
    fn test_monitor_id_is_encoded() {
        let c = client(ClientConfig::default());
        let url = c.monitor_endpoint("a/b c", &["key-lock"]);
        assert_eq!(url.path(), "/monitors/a%2Fb%20c/key-lock");
    }

    #[test]
    fn test_invalid_host_is_a_config_error() {
        let config = ClientConfig {
            host: "bad host".to_string(),
            ..ClientConfig::default()
        };
        assert!(matches!(ColorNavigatorClient::new(&config), Err(Error::Config(_))));
    }

    #[test]
    fn test_decode_error() {
        let result: Result<colornav_core::models::MonitorList> = decode(b"<html>");
        assert!(matches!(result, Err(Error::Decode(_))));
    }
}
