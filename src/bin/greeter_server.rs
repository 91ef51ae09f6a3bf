use anyhow::Result;
use formrpc::RpcServiceConfig;
use greeter_web::{DEFAULT_GREETER_ADDR, GREETER_RPC_PATH, greeter_service, init_tracing};
use std::net::SocketAddr;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let addr: SocketAddr = std::env::var("GREETER_ADDR")
        .unwrap_or_else(|_| DEFAULT_GREETER_ADDR.to_string())
        .parse()?;

    let service = greeter_service(RpcServiceConfig::new(GREETER_RPC_PATH));
    let router = service.into_router();

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, path = GREETER_RPC_PATH, "Greeter server listening");

    axum::serve(listener, router).await?;

    Ok(())
}
