//! Asynchronous worker pool servicing gRPC calls.
//!
//! - [`manager`] - round-robin dispatch over worker channels and graceful,
//!   cancellable shutdown.
//! - [`worker`] - the per-worker task loop.

pub mod manager;
pub mod worker;
