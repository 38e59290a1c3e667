//! Work request definitions and in-worker call execution.
//!
//! - [`request`] - the [`WorkRequest`](request::WorkRequest) enum dispatched
//!   to workers, one variant per service contract plus shutdown.
//! - [`processor`] - the routines a worker runs for the two streaming
//!   contracts.

pub mod processor;
pub mod request;
