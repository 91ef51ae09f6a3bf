use std::net::SocketAddr;
use std::time::Duration;

use formrpc::form::{METHOD_ARGUMENT_FIELD, METHOD_TYPE_FIELD};
use formrpc::{
    MessageCodec, Procedure, ProcedureTable, RpcCallError, RpcClient, RpcClientConfig, RpcService,
    RpcServiceConfig, TransportError,
};
use reqwest::StatusCode;
use tonic::{Code, Status};

#[derive(Clone, PartialEq, Eq, prost::Message)]
pub struct HelloRequest {
    #[prost(string, tag = "1")]
    pub name: String,
}

impl prost::Name for HelloRequest {
    const NAME: &'static str = "HelloRequest";
    const PACKAGE: &'static str = "formrpc.it";
}

#[derive(Clone, PartialEq, Eq, prost::Message)]
pub struct HelloReply {
    #[prost(string, tag = "1")]
    pub greeting: String,
}

impl prost::Name for HelloReply {
    const NAME: &'static str = "HelloReply";
    const PACKAGE: &'static str = "formrpc.it";
}

const SAY_HELLO: Procedure<HelloRequest, HelloReply> = Procedure::new("SayHello");
const SAY_BYE: Procedure<HelloRequest, HelloReply> = Procedure::new("SayBye");
const SAY_NOTHING: Procedure<HelloRequest, HelloReply> = Procedure::new("SayNothing");
const SAY_OK: Procedure<HelloRequest, HelloReply> = Procedure::new("SayOk");

const PATH: &str = "/greeter";

/// Serve a greeter on an ephemeral port and return its address.
async fn spawn_server() -> SocketAddr {
    let mut service = RpcService::new(RpcServiceConfig::new(PATH));
    service.register(&SAY_HELLO, |req: HelloRequest| async move {
        Ok(HelloReply {
            greeting: format!("Hello, {}", req.name),
        })
    });
    service.register(&SAY_BYE, |req: HelloRequest| async move {
        if req.name == "later" {
            tokio::time::sleep(Duration::from_millis(500)).await;
        }
        if req.name == "nobody" {
            return Err(Status::unavailable("goodbyes are paused"));
        }
        Ok(HelloReply {
            greeting: format!("Goodbye, {}", req.name),
        })
    });

    service.register(&SAY_OK, |_req: HelloRequest| async move {
        Err::<HelloReply, _>(Status::new(Code::Ok, "boom"))
    });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Should bind to an ephemeral port");
    let addr = listener.local_addr().expect("Should have a local address");
    let router = service.into_router();

    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("HTTP server should run");
    });

    addr
}

fn client(addr: SocketAddr) -> RpcClient {
    let config = RpcClientConfig::parse(&format!("http://{addr}{PATH}"))
        .unwrap()
        .with_timeout(Duration::from_secs(10));
    let procedures = ProcedureTable::new()
        .with(&SAY_HELLO)
        .with(&SAY_BYE)
        .with(&SAY_NOTHING)
        .with(&SAY_OK);
    RpcClient::new(config, procedures).unwrap()
}

fn hello(name: &str) -> HelloRequest {
    HelloRequest {
        name: name.to_string(),
    }
}

#[tokio::test]
async fn test_say_hello_end_to_end() {
    let addr = spawn_server().await;
    let client = client(addr);

    let reply = client.invoke(&SAY_HELLO, &hello("Ada")).await.unwrap();
    assert_eq!(
        reply,
        HelloReply {
            greeting: "Hello, Ada".to_string()
        }
    );
}

#[tokio::test]
async fn test_argument_survives_form_encoding() {
    let addr = spawn_server().await;
    let client = client(addr);

    // Encodes to base64 containing '+', '/' and '='.
    let name = "~~~>>>???";
    assert!(
        MessageCodec::default()
            .encode_to_text(&hello(name))
            .contains('+')
    );

    let reply = client.invoke(&SAY_HELLO, &hello(name)).await.unwrap();
    assert_eq!(reply.greeting, format!("Hello, {name}"));
}

#[tokio::test]
async fn test_unregistered_method_is_not_found() {
    let addr = spawn_server().await;
    let client = client(addr);

    let err = client
        .invoke(&SAY_NOTHING, &hello("Ada"))
        .await
        .unwrap_err();
    match err {
        RpcCallError::Transport(TransportError::Status { status, body }) => {
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert_eq!(
                String::from_utf8_lossy(&body),
                "no handler registered for method: SayNothing"
            );
        }
        other => panic!("expected a 404, got {other:?}"),
    }
}

#[tokio::test]
async fn test_handler_status_is_transport_error() {
    let addr = spawn_server().await;
    let client = client(addr);

    let err = client.invoke(&SAY_BYE, &hello("nobody")).await.unwrap_err();
    match err {
        RpcCallError::Transport(e) => assert_eq!(e.status(), Some(StatusCode::SERVICE_UNAVAILABLE)),
        other => panic!("expected a transport error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_handler_error_with_ok_code_is_transport_error() {
    let addr = spawn_server().await;
    let client = client(addr);

    let err = client.invoke(&SAY_OK, &hello("Ada")).await.unwrap_err();
    match err {
        RpcCallError::Transport(TransportError::Status { status, .. }) => {
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        }
        other => panic!("expected a transport error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_argument_is_bad_request() {
    let addr = spawn_server().await;

    let response = reqwest::Client::new()
        .post(format!("http://{addr}{PATH}"))
        .form(&[
            (METHOD_TYPE_FIELD, "SayHello"),
            (METHOD_ARGUMENT_FIELD, "not base64!"),
        ])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    // Bind and drop to get a port nothing listens on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client(addr)
        .invoke(&SAY_HELLO, &hello("Ada"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        RpcCallError::Transport(TransportError::Http(_))
    ));
}

#[tokio::test]
async fn test_slow_call_does_not_hold_back_fast_call() {
    let addr = spawn_server().await;
    let client = client(addr);

    let slow = client.call(&SAY_BYE, hello("later"));
    let fast = client.call(&SAY_HELLO, hello("Ada"));

    // The slow handler sleeps 500ms; the fast call must finish well before.
    let fast = tokio::time::timeout(Duration::from_millis(250), fast)
        .await
        .expect("fast call should not wait for the slow one")
        .unwrap();
    assert_eq!(fast.greeting, "Hello, Ada");

    let slow = slow.await.unwrap();
    assert_eq!(slow.greeting, "Goodbye, later");
}
