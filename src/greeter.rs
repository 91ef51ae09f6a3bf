use formrpc::{
    HttpTransport, PendingCall, Procedure, ProcedureTable, RpcCallError, RpcClient,
    RpcClientConfig, RpcClientError, RpcService, RpcServiceConfig, Transport,
};
use tonic::Status;
use tracing::info;

use crate::greeter_proto::{ServiceRequest, ServiceResponse};

/// Route the Greeter service is served on.
pub const GREETER_RPC_PATH: &str = "/greeter";

pub const SAY_HELLO: Procedure<ServiceRequest, ServiceResponse> =
    Procedure::new("SayHello").with_conformance(require_name);

pub const SAY_BYE: Procedure<ServiceRequest, ServiceResponse> =
    Procedure::new("SayBye").with_conformance(require_name);

fn require_name(request: &ServiceRequest) -> Result<(), String> {
    if request.name.trim().is_empty() {
        return Err("ServiceRequest.name must not be empty".to_string());
    }
    Ok(())
}

/// Every procedure the Greeter service exposes.
pub fn procedures() -> ProcedureTable {
    ProcedureTable::new().with(&SAY_HELLO).with(&SAY_BYE)
}

/// Typed client for the Greeter service.
#[derive(Clone)]
pub struct GreeterClient<T = HttpTransport> {
    inner: RpcClient<T>,
}

impl GreeterClient<HttpTransport> {
    pub fn new(config: RpcClientConfig) -> Result<Self, RpcClientError> {
        Ok(Self {
            inner: RpcClient::new(config, procedures())?,
        })
    }
}

impl<T: Transport> GreeterClient<T> {
    pub fn from_client(inner: RpcClient<T>) -> Self {
        Self { inner }
    }

    pub async fn say_hello(
        &self,
        request: &ServiceRequest,
    ) -> Result<ServiceResponse, RpcCallError> {
        self.inner.invoke(&SAY_HELLO, request).await
    }

    pub async fn say_bye(&self, request: &ServiceRequest) -> Result<ServiceResponse, RpcCallError> {
        self.inner.invoke(&SAY_BYE, request).await
    }

    /// Start a `SayHello` call without waiting for it.
    pub fn spawn_say_hello(&self, request: ServiceRequest) -> PendingCall<ServiceResponse> {
        self.inner.call(&SAY_HELLO, request)
    }

    /// Start a `SayBye` call without waiting for it.
    pub fn spawn_say_bye(&self, request: ServiceRequest) -> PendingCall<ServiceResponse> {
        self.inner.call(&SAY_BYE, request)
    }
}

/// Build the Greeter service with the sample handlers registered.
pub fn greeter_service(config: RpcServiceConfig) -> RpcService {
    let mut service = RpcService::new(config);
    service.register(&SAY_HELLO, say_hello);
    service.register(&SAY_BYE, say_bye);
    service
}

async fn say_hello(request: ServiceRequest) -> Result<ServiceResponse, Status> {
    info!(name = %request.name, "SayHello");
    Ok(ServiceResponse {
        message: format!("Hello, {}!", request.name),
    })
}

async fn say_bye(request: ServiceRequest) -> Result<ServiceResponse, Status> {
    info!(name = %request.name, "SayBye");
    Ok(ServiceResponse {
        message: format!("Goodbye, {}!", request.name),
    })
}
