//! # Dispatcher Builder
//!
//! Collects handlers and interceptors at startup, then freezes them into an
//! immutable `Dispatcher`.
//!
//! Registration is one-shot. Naming a method the service does not declare, or
//! registering the same method twice (under any of its names), fails `build()`
//! instead of silently overwriting.

use std::collections::HashMap;
use std::sync::Arc;

use gatepack::gateway::RESPONSE;
use gatepack::gateway::TRANSACTION;

use crate::dispatcher::Dispatcher;
use crate::gateway::Evaluate;
use crate::gateway::GatewayService;
use crate::gateway::Submit;
use crate::handler::Handler;
use crate::interceptor::Interceptor;
use crate::service::EVALUATE_TRANSACTION;
use crate::service::GATEWAY;
use crate::service::SUBMIT_TRANSACTION;
use crate::service::ServiceDescriptor;

/// Registration failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// The service does not declare this method.
    UnknownMethod(String),
    /// A handler is already registered for this method.
    DuplicateHandler(&'static str),
    /// The method exchanges message types this dispatcher cannot decode or encode.
    UnsupportedSignature(&'static str),
}

impl std::fmt::Display for BuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownMethod(name) => write!(f, "method '{}' is not declared by the service", name),
            Self::DuplicateHandler(name) => write!(f, "method '{}' already has a handler", name),
            Self::UnsupportedSignature(name) => {
                write!(f, "method '{}' does not exchange Transaction for Response", name)
            }
        }
    }
}

impl std::error::Error for BuildError {}

pub type Result<T> = std::result::Result<T, BuildError>;

/// Fluent builder for a `Dispatcher`.
pub struct DispatcherBuilder {
    service: &'static ServiceDescriptor,
    handlers: Vec<(String, Arc<dyn Handler>)>,
    interceptors: Vec<Arc<dyn Interceptor>>,
}

impl Default for DispatcherBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DispatcherBuilder {
    /// A builder for the Gateway service.
    pub fn new() -> Self {
        Self::for_service(&GATEWAY)
    }

    pub fn for_service(service: &'static ServiceDescriptor) -> Self {
        Self {
            service,
            handlers: Vec::new(),
            interceptors: Vec::new(),
        }
    }

    /// Binds `handler` to `method` (bare, qualified, or path form).
    pub fn handler(mut self, method: impl Into<String>, handler: impl Handler) -> Self {
        self.handlers.push((method.into(), Arc::new(handler)));
        self
    }

    /// Binds both Gateway methods to one service implementation.
    pub fn gateway(self, service: impl GatewayService) -> Self {
        let service = Arc::new(service);
        self.handler(SUBMIT_TRANSACTION, Submit(Arc::clone(&service)))
            .handler(EVALUATE_TRANSACTION, Evaluate(service))
    }

    /// Appends an interceptor. The first one appended runs outermost.
    pub fn interceptor(mut self, interceptor: impl Interceptor) -> Self {
        self.interceptors.push(Arc::new(interceptor));
        self
    }

    /// Validates registrations and freezes them.
    pub fn build(self) -> Result<Dispatcher> {
        let mut handlers: HashMap<&'static str, Arc<dyn Handler>> = HashMap::new();

        for (ident, handler) in self.handlers {
            let method = self.service.resolve(&ident).ok_or(BuildError::UnknownMethod(ident))?;
            if !std::ptr::eq(method.request, &TRANSACTION) || !std::ptr::eq(method.response, &RESPONSE) {
                return Err(BuildError::UnsupportedSignature(method.name));
            }
            if handlers.insert(method.name, handler).is_some() {
                return Err(BuildError::DuplicateHandler(method.name));
            }
        }

        Ok(Dispatcher::new(self.service, handlers, self.interceptors))
    }
}
