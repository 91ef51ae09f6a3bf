//! Protobuf remote procedure calls over a single HTTP endpoint.
//!
//! Every call is one `POST` of an `application/x-www-form-urlencoded` body
//! with two fields: `rpc_method_type` names the procedure and
//! `rpc_method_argument` carries the base64 text of the encoded request
//! message. The response body is the encoded response message itself; the
//! HTTP status is the only status channel.
//!
//! - [`client`] invokes procedures and hands back decoded responses.
//! - [`server`] dispatches posted calls to registered handlers.
//! - [`codec`] moves messages across the byte and text boundaries.

pub mod client;
pub mod codec;
pub mod error;
pub mod form;
pub mod procedure;
pub mod server;
pub mod transport;

pub use client::{PendingCall, RpcClient, RpcClientConfig};
pub use codec::{MessageCodec, TextAlphabet};
pub use error::{CodecError, RpcCallError, RpcClientError, RpcServerError, TransportError};
pub use form::RpcForm;
pub use procedure::{Procedure, ProcedureSchema, ProcedureTable};
pub use server::{RpcService, RpcServiceConfig};
pub use transport::{HttpTransport, Transport};

#[cfg(test)]
pub(crate) mod test_support {
    use crate::procedure::{Procedure, ProcedureTable};

    #[derive(Clone, PartialEq, Eq, prost::Message)]
    pub struct HelloRequest {
        #[prost(string, tag = "1")]
        pub name: String,
    }

    #[derive(Clone, PartialEq, Eq, prost::Message)]
    pub struct HelloReply {
        #[prost(string, tag = "1")]
        pub greeting: String,
    }

    #[derive(Clone, PartialEq, Eq, prost::Message)]
    pub struct GoodbyeRequest {
        #[prost(string, tag = "1")]
        pub name: String,
    }

    #[derive(Clone, PartialEq, Eq, prost::Message)]
    pub struct GoodbyeReply {
        #[prost(string, tag = "1")]
        pub farewell: String,
    }

    macro_rules! impl_name {
        ($($ty:ident),*) => {
            $(impl prost::Name for $ty {
                const NAME: &'static str = stringify!($ty);
                const PACKAGE: &'static str = "formrpc.test";
            })*
        };
    }

    impl_name!(HelloRequest, HelloReply, GoodbyeRequest, GoodbyeReply);

    fn require_name(req: &HelloRequest) -> Result<(), String> {
        if req.name.is_empty() {
            return Err("name must not be empty".to_string());
        }
        Ok(())
    }

    pub const SAY_HELLO: Procedure<HelloRequest, HelloReply> =
        Procedure::new("SayHello").with_conformance(require_name);

    pub const SAY_BYE: Procedure<GoodbyeRequest, GoodbyeReply> = Procedure::new("SayBye");

    pub fn procedures() -> ProcedureTable {
        ProcedureTable::new().with(&SAY_HELLO).with(&SAY_BYE)
    }
}
