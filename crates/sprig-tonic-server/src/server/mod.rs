//! Server internals: configuration, telemetry, the worker pool, and the gRPC
//! service implementations.
//!
//! ## Structure
//!
//! - [`config`] - CLI/env argument parsing and validated runtime config.
//! - [`pool`] - bounded worker pool: dispatch and graceful shutdown.
//! - [`service`] - gRPC service entry points and the sink observer seam.
//! - [`streaming`] - work request definitions and in-worker call execution.
//! - [`telemetry`] - logging setup.

pub mod config;
pub mod pool;
pub mod service;
pub mod streaming;
pub mod telemetry;

#[cfg(test)]
mod tests;
