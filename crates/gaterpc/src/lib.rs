//! # Gaterpc
//!
//! Unary request/response plumbing for the Gateway service, on top of `gatepack`.
//!
//! ## Philosophy
//!
//! - **Frozen Routing**: Handlers and interceptors are registered once through
//!   a builder. The resulting `Dispatcher` is immutable and shared freely.
//! - **Explicit Chains**: Interceptors receive a `Next` continuation. Nothing
//!   runs implicitly around a handler.
//! - **Status, Not Panics**: Every failure a caller can observe is a `Status`
//!   with a stable `Code`.
//!
//! ## Layers
//!
//! - `GatewayClient` encodes a `Transaction` and hands bytes to a `Transport`.
//! - A `Transport` carries bytes to a `Dispatcher` (in process: `LocalTransport`).
//! - The `Dispatcher` decodes, runs interceptors, calls the handler, encodes.

pub mod status;
pub mod service;
pub mod context;
pub mod handler;
pub mod interceptor;
pub mod gateway;
pub mod dispatcher;
pub mod builder;
pub mod transport;
pub mod local;
pub mod client;

pub use status::Code;
pub use status::Status;

pub use service::GATEWAY;
pub use service::MethodDescriptor;
pub use service::ServiceDescriptor;

pub use context::CallContext;
pub use context::Cancellation;

pub use handler::Handler;
pub use handler::HandlerFn;
pub use handler::handler_fn;

pub use interceptor::Interceptor;
pub use interceptor::Next;

pub use gateway::GatewayService;

pub use dispatcher::Dispatcher;

pub use builder::BuildError;
pub use builder::DispatcherBuilder;

pub use transport::Transport;
pub use transport::TransportError;

pub use local::LocalTransport;

pub use client::ClientError;
pub use client::GatewayClient;

#[cfg(test)]
mod tests;
