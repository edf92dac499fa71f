//! In-process transport.
//!
//! Hands payloads straight to a `Dispatcher` on the same runtime. The bytes
//! still go through the full encode/decode path, so behavior matches a remote
//! peer minus the network.

use crate::context::Cancellation;
use crate::dispatcher::Dispatcher;
use crate::transport;
use crate::transport::Transport;

#[derive(Debug, Clone)]
pub struct LocalTransport {
    dispatcher: Dispatcher,
}

impl LocalTransport {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }
}

#[async_trait::async_trait]
impl Transport for LocalTransport {
    async fn call(&self, cancellation: &Cancellation, method: &str, payload: &[u8]) -> transport::Result<Vec<u8>> {
        Ok(self.dispatcher.dispatch_with(cancellation, method, payload).await?)
    }
}
