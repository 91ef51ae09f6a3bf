use std::time::Duration;

use anyhow::Result;
use formrpc::RpcClientConfig;
use greeter_web::greeter_proto::ServiceRequest;
use greeter_web::{DEFAULT_GREETER_ADDR, GREETER_RPC_PATH, GreeterClient, init_tracing};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let url = std::env::var("GREETER_URL")
        .unwrap_or_else(|_| format!("http://{DEFAULT_GREETER_ADDR}{GREETER_RPC_PATH}"));
    let name = std::env::var("GREETER_NAME").unwrap_or_else(|_| "testName".to_string());

    let config = RpcClientConfig::parse(&url)?.with_timeout(Duration::from_secs(10));
    let client = GreeterClient::new(config)?;

    info!(%url, %name, "Testing RPC calls");

    let request = ServiceRequest { name };
    let hello = client.spawn_say_hello(request.clone());
    let bye = client.spawn_say_bye(request);

    for (procedure, outcome) in [("SayHello", hello.await), ("SayBye", bye.await)] {
        match outcome {
            Ok(response) => info!(procedure, message = %response.message, "RPC call succeeded"),
            Err(e) => error!(procedure, error = %e, "RPC call failed"),
        }
    }

    Ok(())
}
