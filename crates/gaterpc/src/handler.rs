//! # Handlers
//!
//! The boundary with business logic. A handler receives a decoded request and
//! returns a response or a status; the dispatcher never looks inside either.

use std::future::Future;
use std::sync::Arc;

use gatepack::Response;
use gatepack::Transaction;

use crate::context::CallContext;
use crate::status::Status;

/// Serves one unary method.
#[async_trait::async_trait]
pub trait Handler: Send + Sync + 'static {
    async fn handle(&self, ctx: &CallContext, request: Transaction) -> Result<Response, Status>;
}

#[async_trait::async_trait]
impl<H: Handler + ?Sized> Handler for Arc<H> {
    async fn handle(&self, ctx: &CallContext, request: Transaction) -> Result<Response, Status> {
        (**self).handle(ctx, request).await
    }
}

/// Adapts an async closure into a `Handler`.
pub struct HandlerFn<F> {
    f: F,
}

/// Wraps `f` as a handler. The context is cloned into each invocation.
pub fn handler_fn<F, Fut>(f: F) -> HandlerFn<F>
where
    F: Fn(CallContext, Transaction) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Response, Status>> + Send + 'static,
{
    HandlerFn { f }
}

#[async_trait::async_trait]
impl<F, Fut> Handler for HandlerFn<F>
where
    F: Fn(CallContext, Transaction) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Response, Status>> + Send + 'static,
{
    async fn handle(&self, ctx: &CallContext, request: Transaction) -> Result<Response, Status> {
        (self.f)(ctx.clone(), request).await
    }
}
