//! # Transport Abstraction
//!
//! An async interface for moving one encoded request to a server and its
//! encoded reply back.
//!
//! ## Philosophy
//!
//! - **Byte-Oriented**: A transport knows nothing about messages or descriptors.
//!   It moves opaque buffers, addressed by method name.
//! - **Status-Preserving**: A status raised on the far side comes back as
//!   `TransportError::Status`, code and message intact.

use std::fmt;

use crate::context::Cancellation;
use crate::status::Status;

/// Errors that occur below the message layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The peer is unreachable or the connection was dropped.
    ConnectionLost(String),
    /// Generic I/O error or internal transport failure.
    Io(String),
    /// The server answered with a failure status.
    Status(Status),
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConnectionLost(msg) => write!(f, "Connection lost: {}", msg),
            Self::Io(msg) => write!(f, "I/O error: {}", msg),
            Self::Status(status) => write!(f, "{}", status),
        }
    }
}

impl std::error::Error for TransportError {}

impl From<Status> for TransportError {
    fn from(status: Status) -> Self {
        Self::Status(status)
    }
}

pub type Result<T> = std::result::Result<T, TransportError>;

/// Sends a request and waits for the reply.
///
/// Object-safe, so clients hold an `Arc<dyn Transport>`.
#[async_trait::async_trait]
pub trait Transport: Send + Sync + 'static {
    /// # Invariants
    /// - Returns the raw reply bytes on success.
    /// - Never interprets `payload`.
    /// - Observes `cancellation` on a best-effort basis.
    async fn call(&self, cancellation: &Cancellation, method: &str, payload: &[u8]) -> Result<Vec<u8>>;
}

#[async_trait::async_trait]
impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    async fn call(&self, cancellation: &Cancellation, method: &str, payload: &[u8]) -> Result<Vec<u8>> {
        (**self).call(cancellation, method, payload).await
    }
}
