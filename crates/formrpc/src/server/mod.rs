//! Service side of the form-encoded RPC protocol.
//!
//! This module contains the `RpcService` dispatcher, which routes posted
//! calls to registered handlers by their `rpc_method_type`, and the axum
//! router that serves it.

mod config;
mod handler;
mod service;

pub use config::RpcServiceConfig;
pub use handler::{HandlerFn, make_handler};
pub use service::RpcService;
