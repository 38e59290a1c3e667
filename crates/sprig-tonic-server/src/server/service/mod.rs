//! gRPC service implementation and the sink observer seam.
//!
//! This module contains the entry points for client-facing gRPC requests and
//! delegates work to background worker tasks.
//!
//! ## Structure
//!
//! - [`handler`] - gRPC service entry point (`SprigService`).
//! - [`observer`] - observation hook for reports received by the sink.

pub mod handler;
pub mod observer;
