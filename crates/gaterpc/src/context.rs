//! # Call Context
//!
//! Per-call state handed to interceptors and handlers: which method is running,
//! and whether the caller has given up on it.

use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;

use tokio::sync::Notify;

use crate::service::MethodDescriptor;
use crate::service::ServiceDescriptor;

/// A cloneable, one-way cancellation signal.
///
/// All clones observe the same signal. Once cancelled it stays cancelled.
#[derive(Debug, Clone, Default)]
pub struct Cancellation {
    inner: Arc<Signal>,
}

#[derive(Debug, Default)]
struct Signal {
    cancelled: AtomicBool,
    notify: Notify,
}

impl Cancellation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancels the call and wakes everyone waiting in `cancelled()`.
    pub fn cancel(&self) {
        self.inner.cancelled.store(true, Ordering::Release);
        self.inner.notify.notify_waiters();
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::Acquire)
    }

    /// Resolves once the signal fires.
    pub async fn cancelled(&self) {
        let notified = self.inner.notify.notified();
        tokio::pin!(notified);
        // Register before checking the flag so a concurrent cancel is not missed.
        notified.as_mut().enable();
        if self.is_cancelled() {
            return;
        }
        notified.await;
    }
}

/// Everything a handler or interceptor knows about the call in flight.
#[derive(Debug, Clone)]
pub struct CallContext {
    service: &'static ServiceDescriptor,
    method: &'static MethodDescriptor,
    cancellation: Cancellation,
}

impl CallContext {
    pub fn new(
        service: &'static ServiceDescriptor,
        method: &'static MethodDescriptor,
        cancellation: Cancellation,
    ) -> Self {
        Self { service, method, cancellation }
    }

    pub fn service(&self) -> &'static ServiceDescriptor {
        self.service
    }

    pub fn method(&self) -> &'static MethodDescriptor {
        self.method
    }

    /// The path form of the method, e.g. `/gateway.Gateway/SubmitTransaction`.
    pub fn full_method(&self) -> String {
        self.service.path(self.method.name)
    }

    pub fn cancellation(&self) -> &Cancellation {
        &self.cancellation
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }
}
