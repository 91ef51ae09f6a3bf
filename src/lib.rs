pub mod greeter;
pub mod greeter_proto;

pub use greeter::{GREETER_RPC_PATH, GreeterClient, SAY_BYE, SAY_HELLO, greeter_service};

/// Address the greeter server binds when `GREETER_ADDR` is unset.
pub const DEFAULT_GREETER_ADDR: &str = "127.0.0.1:8080";

/// Install the fmt subscriber used by the binaries.
pub fn init_tracing() {
    tracing_subscriber::fmt().with_target(false).init();
}
