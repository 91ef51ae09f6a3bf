use std::future::Future;
use std::time::Duration;

use bytes::Bytes;
use reqwest::Client;
use url::Url;

use crate::error::{RpcClientError, TransportError};
use crate::form::RpcForm;

/// Sends one form-encoded call and returns the raw response body.
///
/// Implementations must resolve with `Ok` only for a successful (2xx)
/// exchange. Any timeout is the implementation's concern.
pub trait Transport: Send + Sync + 'static {
    fn post_form(
        &self,
        endpoint: &Url,
        form: RpcForm,
    ) -> impl Future<Output = Result<Bytes, TransportError>> + Send;
}

/// HTTP transport backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Build a transport, optionally bounding each exchange by `timeout`.
    pub fn new(timeout: Option<Duration>) -> Result<Self, RpcClientError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(RpcClientError::HttpClient)?;
        Ok(Self { client })
    }

    /// Wrap an already configured client.
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

impl Transport for HttpTransport {
    async fn post_form(&self, endpoint: &Url, form: RpcForm) -> Result<Bytes, TransportError> {
        let response = self
            .client
            .post(endpoint.clone())
            .form(&form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            // The body is diagnostic only; a failed read leaves it empty.
            let body = response.bytes().await.unwrap_or_default();
            return Err(TransportError::Status { status, body });
        }

        Ok(response.bytes().await?)
    }
}
