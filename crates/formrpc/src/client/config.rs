use std::time::Duration;

use url::Url;

use crate::codec::TextAlphabet;
use crate::error::RpcClientError;

/// Configuration for the RPC client.
#[derive(Debug, Clone)]
pub struct RpcClientConfig {
    /// The single service endpoint every procedure is posted to.
    pub endpoint: Url,

    /// Upper bound on one HTTP exchange. `None` leaves the exchange unbounded.
    pub timeout: Option<Duration>,

    /// Alphabet used for the base64 text form of request messages.
    pub text_alphabet: TextAlphabet,
}

impl RpcClientConfig {
    /// Create a new config for the given endpoint.
    pub fn new(endpoint: Url) -> Self {
        Self {
            endpoint,
            timeout: None,
            text_alphabet: TextAlphabet::default(),
        }
    }

    /// Create a new config from an endpoint string.
    pub fn parse(endpoint: &str) -> Result<Self, RpcClientError> {
        Ok(Self::new(endpoint.parse::<Url>()?))
    }

    /// Set the timeout for each HTTP exchange.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the text alphabet for encoded arguments.
    pub fn with_text_alphabet(mut self, alphabet: TextAlphabet) -> Self {
        self.text_alphabet = alphabet;
        self
    }
}
