use std::future::Future;
use std::sync::Arc;

use bytes::Bytes;
use futures::FutureExt;
use futures::future::{self, BoxFuture};
use tonic::Status;

use crate::codec::MessageCodec;
use crate::error::RpcServerError;
use crate::procedure::Procedure;

/// A type-erased handler that can be stored in a HashMap.
///
/// This trait allows us to store handlers with different request and
/// response types in a single registry.
pub(crate) trait ErasedHandler: Send + Sync {
    /// Decode the text argument, run the handler and encode its response.
    fn handle(
        &self,
        argument: &str,
        codec: &MessageCodec,
    ) -> BoxFuture<'static, Result<Bytes, RpcServerError>>;
}

/// A handler function for one procedure.
///
/// It receives the decoded request and resolves with the response message or
/// a status describing why the call failed.
pub type HandlerFn<Req, Resp> =
    Arc<dyn Fn(Req) -> BoxFuture<'static, Result<Resp, Status>> + Send + Sync + 'static>;

/// A typed handler bound to its procedure descriptor.
pub(crate) struct TypedHandler<Req, Resp> {
    procedure: Procedure<Req, Resp>,
    handler: HandlerFn<Req, Resp>,
}

impl<Req, Resp> TypedHandler<Req, Resp> {
    pub fn new(procedure: Procedure<Req, Resp>, handler: HandlerFn<Req, Resp>) -> Self {
        Self { procedure, handler }
    }
}

impl<Req, Resp> ErasedHandler for TypedHandler<Req, Resp>
where
    Req: prost::Message + Default + 'static,
    Resp: prost::Message + 'static,
{
    fn handle(
        &self,
        argument: &str,
        codec: &MessageCodec,
    ) -> BoxFuture<'static, Result<Bytes, RpcServerError>> {
        let method = self.procedure.name();

        let request: Req = match codec.decode_from_text(argument) {
            Ok(request) => request,
            Err(source) => {
                return future::ready(Err(RpcServerError::MalformedArgument {
                    method: method.to_string(),
                    source,
                }))
                .boxed();
            }
        };

        if let Err(reason) = self.procedure.check(&request) {
            return future::ready(Err(RpcServerError::InvalidArgument {
                method: method.to_string(),
                reason,
            }))
            .boxed();
        }

        let response = (self.handler)(request);
        let codec = *codec;

        async move {
            let response = response.await.map_err(|status| RpcServerError::Handler {
                method: method.to_string(),
                status,
            })?;
            Ok(codec.encode(&response))
        }
        .boxed()
    }
}

/// Helper to create a boxed handler from an async closure.
pub fn make_handler<Req, Resp, F, Fut>(f: F) -> HandlerFn<Req, Resp>
where
    F: Fn(Req) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Resp, Status>> + Send + 'static,
{
    Arc::new(move |request: Req| f(request).boxed())
}
