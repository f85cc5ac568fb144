//! Timers
//!
//! The dispatch timeout races the request against a sleep. The sleep source
//! differs per platform, so it sits behind a trait.

use std::time::Duration;

use futures::future::LocalBoxFuture;

/// Source of sleep futures
pub trait Timer {
    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()>;
}

/// Tokio-backed timer for native builds
#[cfg(not(target_arch = "wasm32"))]
#[derive(Clone, Copy, Debug, Default)]
pub struct TokioTimer;

#[cfg(not(target_arch = "wasm32"))]
impl Timer for TokioTimer {
    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()> {
        Box::pin(tokio::time::sleep(duration))
    }
}
