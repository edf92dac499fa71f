//! # Dispatcher
//!
//! Routes an encoded request to its handler and returns the encoded reply.
//!
//! ## Flow
//!
//! 1. Resolve the method name. Unknown or unregistered: `Unimplemented`.
//! 2. Decode the request. Malformed: `InvalidArgument`.
//! 3. Run the interceptor chain around the handler.
//! 4. Encode the response. Failure: `Internal`.
//!
//! Statuses produced by handlers or interceptors pass through unchanged.
//!
//! ## Invariants
//!
//! - The routing table is frozen at `build()` time. Dispatch only reads it,
//!   so one `Dispatcher` can serve any number of concurrent calls.

use std::collections::HashMap;
use std::sync::Arc;

use gatepack::Transaction;
use tracing::debug;
use tracing::warn;

use crate::builder::DispatcherBuilder;
use crate::context::CallContext;
use crate::context::Cancellation;
use crate::handler::Handler;
use crate::interceptor::Interceptor;
use crate::interceptor::Next;
use crate::service::ServiceDescriptor;
use crate::status::Status;

/// A frozen routing table. Cheap to clone.
#[derive(Clone)]
pub struct Dispatcher {
    inner: Arc<Inner>,
}

struct Inner {
    service: &'static ServiceDescriptor,
    handlers: HashMap<&'static str, Arc<dyn Handler>>,
    interceptors: Vec<Arc<dyn Interceptor>>,
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut methods: Vec<_> = self.inner.handlers.keys().collect();
        methods.sort();
        f.debug_struct("Dispatcher")
            .field("service", &self.inner.service.name)
            .field("methods", &methods)
            .field("interceptors", &self.inner.interceptors.len())
            .finish()
    }
}

impl Dispatcher {
    pub fn builder() -> DispatcherBuilder {
        DispatcherBuilder::new()
    }

    pub(crate) fn new(
        service: &'static ServiceDescriptor,
        handlers: HashMap<&'static str, Arc<dyn Handler>>,
        interceptors: Vec<Arc<dyn Interceptor>>,
    ) -> Self {
        Self { inner: Arc::new(Inner { service, handlers, interceptors }) }
    }

    pub fn service(&self) -> &'static ServiceDescriptor {
        self.inner.service
    }

    /// True if a handler is bound to `method` (any naming form).
    pub fn serves(&self, method: &str) -> bool {
        self.inner.service.resolve(method)
            .is_some_and(|m| self.inner.handlers.contains_key(m.name))
    }

    /// Dispatches one call that cannot be cancelled.
    pub async fn dispatch(&self, method: &str, request: &[u8]) -> Result<Vec<u8>, Status> {
        self.dispatch_with(&Cancellation::new(), method, request).await
    }

    /// Dispatches one call, observing `cancellation` between chain steps.
    pub async fn dispatch_with(
        &self,
        cancellation: &Cancellation,
        method: &str,
        request: &[u8],
    ) -> Result<Vec<u8>, Status> {
        let inner = &self.inner;

        let (descriptor, handler) = match inner.service.resolve(method)
            .and_then(|m| inner.handlers.get(m.name).map(|h| (m, h)))
        {
            Some(found) => found,
            None => {
                debug!(method, "no handler registered");
                return Err(Status::unimplemented(format!("method {} not implemented", method)));
            }
        };

        let request: Transaction = gatepack::decode(request).map_err(|e| {
            warn!(method = descriptor.name, error = %e, "rejecting malformed request");
            Status::invalid_argument(format!("malformed {} request: {}", descriptor.request.name, e))
        })?;

        let ctx = CallContext::new(inner.service, descriptor, cancellation.clone());
        debug!(method = %ctx.full_method(), "dispatching");

        let response = Next::new(&inner.interceptors, handler.as_ref()).run(&ctx, request).await?;

        gatepack::encode(&response).map_err(|e| {
            warn!(method = descriptor.name, error = %e, "failed to encode response");
            Status::internal(format!("failed to encode {} response: {}", descriptor.response.name, e))
        })
    }
}
