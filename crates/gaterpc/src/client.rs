//! # Gateway Client
//!
//! A typed stub over a `Transport`: encodes the request, sends it under the
//! method's qualified name, and decodes the reply.
//!
//! The client adds no retries and no deadlines. Whatever the transport
//! reports, including a server status, reaches the caller unchanged.

use std::sync::Arc;

use gatepack::Response;
use gatepack::Transaction;
use tracing::debug;

use crate::context::Cancellation;
use crate::service::EVALUATE_TRANSACTION;
use crate::service::GATEWAY;
use crate::service::SUBMIT_TRANSACTION;
use crate::service::ServiceDescriptor;
use crate::status::Code;
use crate::status::Status;
use crate::transport::Transport;
use crate::transport::TransportError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// The request could not be encoded.
    Encode(gatepack::Error),
    /// The reply could not be decoded.
    Decode(gatepack::Error),
    Transport(TransportError),
}

impl ClientError {
    /// The server status, if the call reached a server that refused it.
    pub fn status(&self) -> Option<&Status> {
        match self {
            Self::Transport(TransportError::Status(status)) => Some(status),
            _ => None,
        }
    }

    pub fn code(&self) -> Option<Code> {
        self.status().map(Status::code)
    }
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Encode(e) => write!(f, "Encode error: {}", e),
            Self::Decode(e) => write!(f, "Decode error: {}", e),
            Self::Transport(e) => write!(f, "Transport error: {}", e),
        }
    }
}

impl std::error::Error for ClientError {}

impl From<TransportError> for ClientError {
    fn from(e: TransportError) -> Self {
        Self::Transport(e)
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;

/// Client stub for the Gateway service.
#[derive(Clone)]
pub struct GatewayClient {
    transport: Arc<dyn Transport>,
    service: &'static ServiceDescriptor,
}

impl GatewayClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport, service: &GATEWAY }
    }

    pub async fn submit_transaction(&self, request: &Transaction) -> Result<Response> {
        self.call(SUBMIT_TRANSACTION, request).await
    }

    pub async fn evaluate_transaction(&self, request: &Transaction) -> Result<Response> {
        self.call(EVALUATE_TRANSACTION, request).await
    }

    /// Calls `method` (bare, qualified, or path form) with a fresh cancellation signal.
    pub async fn call(&self, method: &str, request: &Transaction) -> Result<Response> {
        self.call_with(&Cancellation::new(), method, request).await
    }

    pub async fn call_with(
        &self,
        cancellation: &Cancellation,
        method: &str,
        request: &Transaction,
    ) -> Result<Response> {
        let payload = gatepack::encode(request).map_err(ClientError::Encode)?;
        // unresolved names go out as given
        let target = match self.service.resolve(method) {
            Some(m) => self.service.qualified(m.name),
            None => self.service.qualified(method),
        };
        debug!(method = %target, bytes = payload.len(), "sending request");

        let reply = self.transport.call(cancellation, &target, &payload).await?;
        gatepack::decode(&reply).map_err(ClientError::Decode)
    }
}
