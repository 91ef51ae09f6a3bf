use crate::codec::TextAlphabet;

/// Configuration for the RPC service.
#[derive(Debug, Clone)]
pub struct RpcServiceConfig {
    /// Route the service answers on (e.g., "/greeter").
    /// Every procedure is posted to this one path.
    pub path: String,

    /// Largest accepted request body, in bytes.
    pub body_limit: usize,

    /// Alphabet expected in `rpc_method_argument`.
    pub text_alphabet: TextAlphabet,
}

impl Default for RpcServiceConfig {
    fn default() -> Self {
        Self {
            path: "/rpc".to_string(),
            body_limit: 2 * 1024 * 1024,
            text_alphabet: TextAlphabet::default(),
        }
    }
}

impl RpcServiceConfig {
    /// Create a new config serving on the given path.
    ///
    /// A missing leading `/` is added.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: rooted(path.into()),
            ..Default::default()
        }
    }

    /// The configured path as an axum route, always starting with `/`.
    pub fn route_path(&self) -> String {
        rooted(self.path.clone())
    }

    /// Set the request body limit.
    pub fn with_body_limit(mut self, limit: usize) -> Self {
        self.body_limit = limit;
        self
    }

    /// Set the text alphabet for encoded arguments.
    pub fn with_text_alphabet(mut self, alphabet: TextAlphabet) -> Self {
        self.text_alphabet = alphabet;
        self
    }
}

fn rooted(path: String) -> String {
    if path.starts_with('/') {
        path
    } else {
        format!("/{path}")
    }
}
