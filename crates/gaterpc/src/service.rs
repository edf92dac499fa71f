//! # Service Descriptors
//!
//! Static metadata for unary services: which methods exist and which message
//! types they exchange.
//!
//! A method can be named three ways, all of which resolve to the same entry:
//! - bare: `SubmitTransaction`
//! - qualified: `Gateway.SubmitTransaction`
//! - path: `/gateway.Gateway/SubmitTransaction`

use gatepack::MessageDescriptor;
use gatepack::gateway::RESPONSE;
use gatepack::gateway::TRANSACTION;

pub const SUBMIT_TRANSACTION: &str = "SubmitTransaction";
pub const EVALUATE_TRANSACTION: &str = "EvaluateTransaction";

/// The Gateway service: submit or evaluate a transaction, get a response back.
pub static GATEWAY: ServiceDescriptor = ServiceDescriptor {
    package: "gateway",
    name: "Gateway",
    methods: &[
        MethodDescriptor { name: SUBMIT_TRANSACTION, request: &TRANSACTION, response: &RESPONSE },
        MethodDescriptor { name: EVALUATE_TRANSACTION, request: &TRANSACTION, response: &RESPONSE },
    ],
};

/// A single unary method.
#[derive(Debug)]
pub struct MethodDescriptor {
    pub name: &'static str,
    pub request: &'static MessageDescriptor,
    pub response: &'static MessageDescriptor,
}

/// A named set of unary methods.
#[derive(Debug)]
pub struct ServiceDescriptor {
    pub package: &'static str,
    pub name: &'static str,
    pub methods: &'static [MethodDescriptor],
}

impl ServiceDescriptor {
    /// Looks up a method by its bare name.
    pub fn method(&self, name: &str) -> Option<&'static MethodDescriptor> {
        self.methods.iter().find(|m| m.name == name)
    }

    /// Looks up a method by bare, qualified, or path name.
    pub fn resolve(&self, ident: &str) -> Option<&'static MethodDescriptor> {
        let bare = self.strip_path(ident)
            .or_else(|| self.strip_qualifier(ident))
            .unwrap_or(ident);
        self.method(bare)
    }

    /// `Gateway.SubmitTransaction`
    pub fn qualified(&self, method: &str) -> String {
        format!("{}.{}", self.name, method)
    }

    /// `/gateway.Gateway/SubmitTransaction`
    pub fn path(&self, method: &str) -> String {
        format!("/{}.{}/{}", self.package, self.name, method)
    }

    fn strip_path<'a>(&self, ident: &'a str) -> Option<&'a str> {
        ident.strip_prefix('/')?
            .strip_prefix(self.package)?
            .strip_prefix('.')?
            .strip_prefix(self.name)?
            .strip_prefix('/')
    }

    fn strip_qualifier<'a>(&self, ident: &'a str) -> Option<&'a str> {
        let rest = ident.strip_prefix(self.package)
            .and_then(|r| r.strip_prefix('.'))
            .unwrap_or(ident);
        rest.strip_prefix(self.name)?.strip_prefix('.')
    }
}
