use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use axum::Router;
use axum::extract::{DefaultBodyLimit, Form, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use bytes::Bytes;
use tonic::{Code, Status};
use tracing::{debug, info, warn};

use crate::codec::MessageCodec;
use crate::error::RpcServerError;
use crate::form::RpcForm;
use crate::procedure::{Procedure, ProcedureTable};
use crate::server::config::RpcServiceConfig;
use crate::server::handler::{ErasedHandler, TypedHandler, make_handler};

/// Dispatches posted calls to the handler registered for their method.
pub struct RpcService {
    handlers: HashMap<String, Arc<dyn ErasedHandler>>,
    procedures: ProcedureTable,
    codec: MessageCodec,
    config: RpcServiceConfig,
}

impl RpcService {
    /// Create a new RPC service with no handlers.
    pub fn new(config: RpcServiceConfig) -> Self {
        Self {
            handlers: HashMap::new(),
            procedures: ProcedureTable::new(),
            codec: MessageCodec::new(config.text_alphabet),
            config,
        }
    }

    /// Register a handler for a procedure.
    ///
    /// Registering the same procedure name again replaces the earlier handler.
    ///
    /// # Example
    /// ```ignore
    /// service.register(&SAY_HELLO, |req: ServiceRequest| async move {
    ///     Ok(ServiceResponse {
    ///         message: format!("Hello, {}!", req.name),
    ///     })
    /// });
    /// ```
    pub fn register<Req, Resp, F, Fut>(&mut self, procedure: &Procedure<Req, Resp>, handler: F)
    where
        Req: prost::Message + prost::Name + Default + 'static,
        Resp: prost::Message + prost::Name + 'static,
        F: Fn(Req) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Resp, Status>> + Send + 'static,
    {
        let method = procedure.name();
        let handler = TypedHandler::new(*procedure, make_handler(handler));

        if self
            .handlers
            .insert(method.to_owned(), Arc::new(handler))
            .is_some()
        {
            warn!(method, "Replaced existing RPC handler");
        }
        self.procedures.insert(procedure);

        info!(method, path = %self.config.path, "Registered RPC handler");
    }

    /// Decode, run and encode one call.
    pub async fn dispatch(&self, form: RpcForm) -> Result<Bytes, RpcServerError> {
        let method = form.method();

        let handler = self.handlers.get(method).ok_or_else(|| {
            warn!(method, "No handler registered for method");
            RpcServerError::NoHandler(method.to_owned())
        })?;

        debug!(method, "Dispatching RPC call");

        let result = handler.handle(form.argument(), &self.codec).await;
        if let Err(e) = &result {
            warn!(method, error = %e, "RPC call failed");
        }
        result
    }

    /// Check if a handler is registered for the given method.
    pub fn has_handler(&self, method: &str) -> bool {
        self.handlers.contains_key(method)
    }

    /// The procedures this service currently answers.
    pub fn procedures(&self) -> &ProcedureTable {
        &self.procedures
    }

    pub fn config(&self) -> &RpcServiceConfig {
        &self.config
    }

    /// Build an axum router serving this service on the configured path.
    pub fn into_router(self) -> Router {
        let path = self.config.route_path();
        let body_limit = self.config.body_limit;

        Router::new()
            .route(&path, post(handle_rpc))
            .layer(DefaultBodyLimit::max(body_limit))
            .with_state(Arc::new(self))
    }
}

async fn handle_rpc(
    State(service): State<Arc<RpcService>>,
    Form(form): Form<RpcForm>,
) -> Result<Response, RpcServerError> {
    let body = service.dispatch(form).await?;
    Ok(([(header::CONTENT_TYPE, "application/octet-stream")], body).into_response())
}

impl RpcServerError {
    /// The HTTP status this error is reported with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            RpcServerError::NoHandler(_) => StatusCode::NOT_FOUND,
            RpcServerError::MalformedArgument { .. } => StatusCode::BAD_REQUEST,
            RpcServerError::InvalidArgument { .. } => StatusCode::BAD_REQUEST,
            RpcServerError::Handler { status, .. } => status_for_code(status.code()),
        }
    }
}

impl IntoResponse for RpcServerError {
    fn into_response(self) -> Response {
        (self.status_code(), self.to_string()).into_response()
    }
}

fn status_for_code(code: Code) -> StatusCode {
    match code {
        Code::InvalidArgument | Code::FailedPrecondition | Code::OutOfRange => {
            StatusCode::BAD_REQUEST
        }
        Code::Unauthenticated => StatusCode::UNAUTHORIZED,
        Code::PermissionDenied => StatusCode::FORBIDDEN,
        Code::NotFound => StatusCode::NOT_FOUND,
        Code::AlreadyExists | Code::Aborted => StatusCode::CONFLICT,
        Code::ResourceExhausted => StatusCode::TOO_MANY_REQUESTS,
        Code::Unimplemented => StatusCode::NOT_IMPLEMENTED,
        Code::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
        Code::DeadlineExceeded => StatusCode::GATEWAY_TIMEOUT,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
