use bytes::Bytes;
use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur while turning raw bytes or text back into a message.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CodecError {
    /// The bytes do not match the declared message schema.
    #[error("protobuf decode error: {0}")]
    Decode(#[from] prost::DecodeError),

    /// The text form is not valid base64.
    #[error("invalid message text encoding: {0}")]
    Text(#[from] base64::DecodeError),
}

/// Errors reported by the HTTP exchange itself.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TransportError {
    /// The server answered with a non-success status.
    #[error("server responded with status {status}")]
    Status { status: StatusCode, body: Bytes },

    /// The request could not be sent or the response could not be read.
    #[error("HTTP request failed")]
    Http(#[from] reqwest::Error),

    /// The exchange ended without producing a response.
    #[error("transport unavailable: {0}")]
    Unavailable(String),
}

impl TransportError {
    /// The HTTP status of the response, if one was received.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            TransportError::Status { status, .. } => Some(*status),
            TransportError::Http(e) => e.status(),
            TransportError::Unavailable(_) => None,
        }
    }
}

/// The outcome of a failed remote procedure call, as seen by the caller.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RpcCallError {
    /// The request was rejected locally; nothing was sent.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The HTTP exchange failed.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The response body does not match the expected response schema.
    #[error("failed to decode response: {0}")]
    Decode(#[from] CodecError),
}

/// Errors that can occur while building an RPC client.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RpcClientError {
    /// The service endpoint is not a valid URL.
    #[error("invalid service endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),

    /// The underlying HTTP client could not be built.
    #[error("failed to build HTTP client")]
    HttpClient(#[source] reqwest::Error),
}

/// Errors that can occur while dispatching a call on the service side.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RpcServerError {
    /// No handler registered for the requested method.
    #[error("no handler registered for method: {0}")]
    NoHandler(String),

    /// The method argument could not be decoded into the request type.
    #[error("malformed argument for '{method}': {source}")]
    MalformedArgument {
        method: String,
        #[source]
        source: CodecError,
    },

    /// The decoded request was rejected by the procedure's checks.
    #[error("invalid argument for '{method}': {reason}")]
    InvalidArgument { method: String, reason: String },

    /// The handler returned an error status.
    #[error("handler for '{method}' failed: {status}")]
    Handler {
        method: String,
        status: tonic::Status,
    },
}
