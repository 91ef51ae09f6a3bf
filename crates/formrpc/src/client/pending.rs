use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::sync::oneshot;

use crate::error::{RpcCallError, TransportError};

/// One in-flight invocation.
///
/// Resolves exactly once with the decoded response or the call's failure.
/// Dropping the handle does not stop the underlying exchange.
#[derive(Debug)]
pub struct PendingCall<Resp> {
    procedure: &'static str,
    receiver: oneshot::Receiver<Result<Resp, RpcCallError>>,
}

impl<Resp> PendingCall<Resp> {
    pub(crate) fn new(
        procedure: &'static str,
        receiver: oneshot::Receiver<Result<Resp, RpcCallError>>,
    ) -> Self {
        Self {
            procedure,
            receiver,
        }
    }

    /// Name of the procedure this call invoked.
    pub fn procedure(&self) -> &'static str {
        self.procedure
    }
}

impl<Resp> Future for PendingCall<Resp> {
    type Output = Result<Resp, RpcCallError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let procedure = self.procedure;
        match Pin::new(&mut self.receiver).poll(cx) {
            Poll::Ready(Ok(result)) => Poll::Ready(result),
            // The task running the exchange went away without reporting back
            Poll::Ready(Err(_)) => Poll::Ready(Err(RpcCallError::Transport(
                TransportError::Unavailable(format!(
                    "call to '{procedure}' ended before completing"
                )),
            ))),
            Poll::Pending => Poll::Pending,
        }
    }
}
