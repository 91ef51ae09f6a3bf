//! Messages of the `spine3.sample` Greeter service.
//!
//! Mirrors `proto/greeter.proto`:
//!
//! ```proto
//! message ServiceRequest { string name = 1; }
//! message ServiceResponse { string message = 1; }
//!
//! service Greeter {
//!   rpc SayHello (ServiceRequest) returns (ServiceResponse);
//!   rpc SayBye (ServiceRequest) returns (ServiceResponse);
//! }
//! ```

#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct ServiceRequest {
    #[prost(string, tag = "1")]
    pub name: ::prost::alloc::string::String,
}

impl ::prost::Name for ServiceRequest {
    const NAME: &'static str = "ServiceRequest";
    const PACKAGE: &'static str = "spine3.sample";
}

#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct ServiceResponse {
    #[prost(string, tag = "1")]
    pub message: ::prost::alloc::string::String,
}

impl ::prost::Name for ServiceResponse {
    const NAME: &'static str = "ServiceResponse";
    const PACKAGE: &'static str = "spine3.sample";
}
