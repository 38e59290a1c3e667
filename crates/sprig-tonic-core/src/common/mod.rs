//! Shared types and error definitions used across the sprig services.
//!
//! The `common` module defines reusable abstractions that are shared across
//! the gRPC service layer, worker pool, and both binaries.
//!
//! ## Submodules
//!
//! - [`error`] - Centralized service error type used throughout request
//!   handling.
//! - [`types`] - Domain logic on the generated message types and the canned
//!   report sequence.
//!
//! These definitions are not tied to any specific layer and are imported
//! throughout the server and client for error propagation and message
//! construction.

pub mod error;
pub mod types;

pub use error::{Error, Result};

pub mod proto {
    tonic::include_proto!("sprig");

    pub const FILE_DESCRIPTOR_SET: &[u8] =
        tonic::include_file_descriptor_set!("sprig_descriptor");
}
