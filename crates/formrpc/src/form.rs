use serde::{Deserialize, Serialize};

/// Form field carrying the procedure name.
pub const METHOD_TYPE_FIELD: &str = "rpc_method_type";

/// Form field carrying the base64-encoded request message.
pub const METHOD_ARGUMENT_FIELD: &str = "rpc_method_argument";

/// The `application/x-www-form-urlencoded` body of one call.
///
/// Field names are part of the wire protocol and must not change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcForm {
    pub rpc_method_type: String,
    pub rpc_method_argument: String,
}

impl RpcForm {
    pub fn new(method: impl Into<String>, argument: impl Into<String>) -> Self {
        Self {
            rpc_method_type: method.into(),
            rpc_method_argument: argument.into(),
        }
    }

    pub fn method(&self) -> &str {
        &self.rpc_method_type
    }

    pub fn argument(&self) -> &str {
        &self.rpc_method_argument
    }
}
