//! # Gateway Service Trait
//!
//! The server-side shape of the Gateway service. Implementors override the
//! methods they support; the rest answer `Unimplemented`, so a server built
//! against an older version of this trait keeps compiling as methods are added.

use std::sync::Arc;

use gatepack::Response;
use gatepack::Transaction;

use crate::context::CallContext;
use crate::handler::Handler;
use crate::service::EVALUATE_TRANSACTION;
use crate::service::SUBMIT_TRANSACTION;
use crate::status::Status;

#[async_trait::async_trait]
pub trait GatewayService: Send + Sync + 'static {
    /// Endorses and commits a transaction.
    async fn submit_transaction(&self, _ctx: &CallContext, _request: Transaction) -> Result<Response, Status> {
        Err(Status::unimplemented(format!("method {} not implemented", SUBMIT_TRANSACTION)))
    }

    /// Runs a transaction without committing it.
    async fn evaluate_transaction(&self, _ctx: &CallContext, _request: Transaction) -> Result<Response, Status> {
        Err(Status::unimplemented(format!("method {} not implemented", EVALUATE_TRANSACTION)))
    }
}

pub(crate) struct Submit<S>(pub(crate) Arc<S>);

pub(crate) struct Evaluate<S>(pub(crate) Arc<S>);

#[async_trait::async_trait]
impl<S: GatewayService> Handler for Submit<S> {
    async fn handle(&self, ctx: &CallContext, request: Transaction) -> Result<Response, Status> {
        self.0.submit_transaction(ctx, request).await
    }
}

#[async_trait::async_trait]
impl<S: GatewayService> Handler for Evaluate<S> {
    async fn handle(&self, ctx: &CallContext, request: Transaction) -> Result<Response, Status> {
        self.0.evaluate_transaction(ctx, request).await
    }
}
