use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;

use prost::Name;

/// Checks that a request value conforms to what the procedure accepts.
pub type ConformanceFn<Req> = fn(&Req) -> Result<(), String>;

/// A named remote procedure with a fixed request/response schema pair.
///
/// Descriptors are `const`-constructible so a service can declare its
/// procedures as constants:
///
/// ```ignore
/// pub const SAY_HELLO: Procedure<HelloRequest, HelloReply> =
///     Procedure::new("SayHello").with_conformance(require_name);
/// ```
pub struct Procedure<Req, Resp> {
    name: &'static str,
    conformance: Option<ConformanceFn<Req>>,
    _marker: PhantomData<fn(Req) -> Resp>,
}

impl<Req, Resp> Procedure<Req, Resp> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            conformance: None,
            _marker: PhantomData,
        }
    }

    /// Attach a predicate the request must satisfy before it is sent.
    pub const fn with_conformance(self, check: ConformanceFn<Req>) -> Self {
        Self {
            name: self.name,
            conformance: Some(check),
            _marker: PhantomData,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Run the conformance predicate, if any.
    pub fn check(&self, request: &Req) -> Result<(), String> {
        match self.conformance {
            Some(check) => check(request),
            None => Ok(()),
        }
    }
}

impl<Req, Resp> Clone for Procedure<Req, Resp> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Req, Resp> Copy for Procedure<Req, Resp> {}

impl<Req, Resp> fmt::Debug for Procedure<Req, Resp> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Procedure")
            .field("name", &self.name)
            .field("conformance", &self.conformance.is_some())
            .finish()
    }
}

/// The request and response message types of one procedure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcedureSchema {
    pub request_type: String,
    pub response_type: String,
}

impl ProcedureSchema {
    pub fn of<Req: Name, Resp: Name>() -> Self {
        Self {
            request_type: Req::full_name(),
            response_type: Resp::full_name(),
        }
    }
}

/// The fixed set of procedures exposed by one service endpoint.
#[derive(Debug, Clone, Default)]
pub struct ProcedureTable {
    procedures: HashMap<String, ProcedureSchema>,
}

impl ProcedureTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a procedure to the table, replacing any entry with the same name.
    pub fn with<Req: Name, Resp: Name>(mut self, procedure: &Procedure<Req, Resp>) -> Self {
        self.insert(procedure);
        self
    }

    pub fn insert<Req: Name, Resp: Name>(&mut self, procedure: &Procedure<Req, Resp>) {
        self.procedures
            .insert(procedure.name().to_owned(), ProcedureSchema::of::<Req, Resp>());
    }

    pub fn get(&self, name: &str) -> Option<&ProcedureSchema> {
        self.procedures.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.procedures.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.procedures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.procedures.is_empty()
    }

    /// Procedure names, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.procedures.keys().map(String::as_str)
    }

    /// Verify that `request` may be sent as a call to `procedure`.
    ///
    /// The procedure must be listed, its listed schema must match the types
    /// the caller is using, and the request must pass the procedure's
    /// conformance predicate.
    pub fn conform<Req: Name, Resp: Name>(
        &self,
        procedure: &Procedure<Req, Resp>,
        request: &Req,
    ) -> Result<(), String> {
        let schema = self.get(procedure.name()).ok_or_else(|| {
            format!(
                "procedure '{}' is not exposed by this service",
                procedure.name()
            )
        })?;

        let request_type = Req::full_name();
        if schema.request_type != request_type {
            return Err(format!(
                "procedure '{}' expects a {} request, got {}",
                procedure.name(),
                schema.request_type,
                request_type
            ));
        }

        let response_type = Resp::full_name();
        if schema.response_type != response_type {
            return Err(format!(
                "procedure '{}' returns {}, not {}",
                procedure.name(),
                schema.response_type,
                response_type
            ));
        }

        procedure.check(request)
    }
}
