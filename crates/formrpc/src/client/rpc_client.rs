use std::sync::Arc;

use prost::{Message, Name};
use tokio::sync::oneshot;
use tracing::debug;
use url::Url;

use crate::client::config::RpcClientConfig;
use crate::client::pending::PendingCall;
use crate::codec::MessageCodec;
use crate::error::{RpcCallError, RpcClientError};
use crate::form::RpcForm;
use crate::procedure::{Procedure, ProcedureTable};
use crate::transport::{HttpTransport, Transport};

/// Invokes procedures on one remote service endpoint.
///
/// The client holds only immutable configuration, so clones are cheap and
/// any number of calls may be in flight at once.
pub struct RpcClient<T = HttpTransport> {
    inner: Arc<ClientInner<T>>,
}

struct ClientInner<T> {
    endpoint: Url,
    procedures: ProcedureTable,
    codec: MessageCodec,
    transport: T,
}

impl<T> Clone for RpcClient<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl RpcClient<HttpTransport> {
    /// Create a client that talks HTTP to `config.endpoint`.
    pub fn new(config: RpcClientConfig, procedures: ProcedureTable) -> Result<Self, RpcClientError> {
        let transport = HttpTransport::new(config.timeout)?;
        let codec = MessageCodec::new(config.text_alphabet);
        Ok(Self::from_parts(config.endpoint, procedures, codec, transport))
    }
}

impl<T: Transport> RpcClient<T> {
    /// Create a client from explicitly supplied parts.
    pub fn from_parts(
        endpoint: Url,
        procedures: ProcedureTable,
        codec: MessageCodec,
        transport: T,
    ) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                endpoint,
                procedures,
                codec,
                transport,
            }),
        }
    }

    pub fn endpoint(&self) -> &Url {
        &self.inner.endpoint
    }

    pub fn procedures(&self) -> &ProcedureTable {
        &self.inner.procedures
    }

    /// Invoke `procedure` with `request` and wait for the decoded response.
    ///
    /// The request is checked against the procedure table before anything is
    /// sent; a rejected request fails with [`RpcCallError::InvalidArgument`]
    /// and no HTTP request is made. Exactly one exchange is attempted.
    pub async fn invoke<Req, Resp>(
        &self,
        procedure: &Procedure<Req, Resp>,
        request: &Req,
    ) -> Result<Resp, RpcCallError>
    where
        Req: Message + Name,
        Resp: Message + Name + Default,
    {
        let inner = &self.inner;

        inner
            .procedures
            .conform(procedure, request)
            .map_err(RpcCallError::InvalidArgument)?;

        let form = RpcForm::new(procedure.name(), inner.codec.encode_to_text(request));

        debug!(
            procedure = procedure.name(),
            endpoint = %inner.endpoint,
            "Invoking remote procedure"
        );

        let body = inner.transport.post_form(&inner.endpoint, form).await?;
        let response = inner.codec.decode(body)?;

        debug!(procedure = procedure.name(), "Remote procedure completed");

        Ok(response)
    }

    /// Start `procedure` on the runtime and return its handle immediately.
    ///
    /// Must be called from within a tokio runtime.
    pub fn call<Req, Resp>(&self, procedure: &Procedure<Req, Resp>, request: Req) -> PendingCall<Resp>
    where
        Req: Message + Name + 'static,
        Resp: Message + Name + Default + 'static,
    {
        let (tx, rx) = oneshot::channel();
        let client = self.clone();
        let procedure = *procedure;

        tokio::spawn(async move {
            let result = client.invoke(&procedure, &request).await;
            // The caller may have dropped the handle; the result is discarded then.
            let _ = tx.send(result);
        });

        PendingCall::new(procedure.name(), rx)
    }
}
