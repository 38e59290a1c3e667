//! Error types for the sprig station services.
//!
//! This module defines the central `Error` enum, which captures all
//! reportable error cases within the system. It implements `From<Error>` for
//! `tonic::Status` to enable seamless gRPC error propagation to clients with
//! appropriate status codes and messages.
//!
//! ## Error Cases
//! - `ChannelError`: An internal communication failure between tasks or
//!   workers.
//! - `RequestCancelled`: The client abandoned the call mid-flight.
//! - `ServiceShutdown`: A request arrived while the service was shutting
//!   down.

use tonic::Status;

pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for the sprig station services.
#[derive(Clone, thiserror::Error, Debug)]
pub enum Error {
    /// Internal channel send/receive failure (e.g., closed or full channel).
    #[error("Channel error: {context}")]
    ChannelError { context: String },

    /// The client aborted the request.
    #[error("Request cancelled by client")]
    RequestCancelled,

    /// The service is in the process of shutting down.
    #[error("Service is shutting down")]
    ServiceShutdown,
}

impl From<Error> for Status {
    fn from(err: Error) -> Self {
        match err {
            Error::ChannelError { context } => {
                Status::internal(format!("Channel error: {}", context))
            }
            Error::RequestCancelled => Status::cancelled("Request was cancelled"),
            Error::ServiceShutdown => Status::unavailable("Service is shutting down"),
        }
    }
}
