//! Client side of the form-encoded RPC protocol.
//!
//! # Example
//!
//! ```ignore
//! use formrpc::client::{RpcClient, RpcClientConfig};
//!
//! let config = RpcClientConfig::parse("http://localhost:8080/greeter")?
//!     .with_timeout(Duration::from_secs(10));
//! let client = RpcClient::new(config, ProcedureTable::new().with(&SAY_HELLO))?;
//!
//! // Await the call directly
//! let reply = client.invoke(&SAY_HELLO, &request).await?;
//!
//! // Or spawn it and keep the handle
//! let pending = client.call(&SAY_HELLO, request);
//! let reply = pending.await?;
//! ```

mod config;
mod pending;
mod rpc_client;

pub use config::RpcClientConfig;
pub use pending::PendingCall;
pub use rpc_client::RpcClient;
