//! # Interceptors
//!
//! Wrappers that run between request decoding and the handler.
//!
//! Interceptors compose in registration order: the first one registered is
//! the outermost scope. Each receives an explicit `Next` continuation and may
//! - call it and return its result (pass-through),
//! - call it and transform the result,
//! - never call it and return a status of its own (short-circuit).

use std::sync::Arc;

use gatepack::Response;
use gatepack::Transaction;

use crate::context::CallContext;
use crate::handler::Handler;
use crate::status::Status;

/// A request/response wrapper around the rest of the chain.
#[async_trait::async_trait]
pub trait Interceptor: Send + Sync + 'static {
    async fn intercept(
        &self,
        ctx: &CallContext,
        request: Transaction,
        next: Next<'_>,
    ) -> Result<Response, Status>;
}

/// The remainder of the chain: zero or more interceptors, then the handler.
pub struct Next<'a> {
    interceptors: &'a [Arc<dyn Interceptor>],
    handler: &'a dyn Handler,
}

impl<'a> Next<'a> {
    pub(crate) fn new(interceptors: &'a [Arc<dyn Interceptor>], handler: &'a dyn Handler) -> Self {
        Self { interceptors, handler }
    }

    /// Runs the rest of the chain.
    ///
    /// A cancelled call stops here with `Code::Cancelled` instead of going deeper.
    pub async fn run(self, ctx: &CallContext, request: Transaction) -> Result<Response, Status> {
        if ctx.is_cancelled() {
            return Err(Status::cancelled(format!("{} cancelled by caller", ctx.full_method())));
        }

        match self.interceptors.split_first() {
            Some((first, rest)) => {
                let next = Next { interceptors: rest, handler: self.handler };
                first.intercept(ctx, request, next).await
            }
            None => self.handler.handle(ctx, request).await,
        }
    }
}
