//! Executes `HttpRequest` values and hands back `HttpResponse` values.
//!
//! Status interpretation stays in `MunchiesClient`; a transport only fails
//! when no response arrived at all.

use async_trait::async_trait;

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};

#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

#[cfg(feature = "reqwest")]
pub use self::reqwest_transport::ReqwestTransport;

#[cfg(feature = "reqwest")]
mod reqwest_transport {
    use async_trait::async_trait;
    use log::debug;

    use super::HttpTransport;
    use crate::config::ClientConfig;
    use crate::error::ApiError;
    use crate::http::{HttpMethod, HttpRequest, HttpResponse};

    /// `HttpTransport` backed by a shared `reqwest::Client`.
    #[derive(Debug, Clone)]
    pub struct ReqwestTransport {
        client: reqwest::Client,
    }

    impl ReqwestTransport {
        pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
            let mut builder = reqwest::Client::builder()
                .user_agent(concat!("munchies/", env!("CARGO_PKG_VERSION")));
            if let Some(timeout) = config.timeout() {
                builder = builder.timeout(timeout);
            }
            let client = builder
                .build()
                .map_err(|e| ApiError::Transport(e.to_string()))?;
            Ok(Self { client })
        }

        pub fn with_client(client: reqwest::Client) -> Self {
            Self { client }
        }
    }

    #[async_trait]
    impl HttpTransport for ReqwestTransport {
        async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
            debug!("{} {}", request.method.as_str(), request.url);

            let mut builder = match request.method {
                HttpMethod::Get => self.client.get(&request.url),
            };
            for (key, value) in &request.headers {
                builder = builder.header(key.as_str(), value.as_str());
            }

            let response = builder
                .send()
                .await
                .map_err(|e| ApiError::Transport(e.to_string()))?;

            let status = response.status().as_u16();
            let headers = response
                .headers()
                .iter()
                .filter_map(|(k, v)| {
                    v.to_str()
                        .ok()
                        .map(|v| (k.as_str().to_string(), v.to_string()))
                })
                .collect();
            let body = response
                .text()
                .await
                .map_err(|e| ApiError::Transport(e.to_string()))?;

            debug!("{} -> {status} ({} bytes)", request.url, body.len());
            Ok(HttpResponse {
                status,
                headers,
                body,
            })
        }
    }
}
