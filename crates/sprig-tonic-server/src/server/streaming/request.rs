use sprig_tonic_core::proto::{Data, Displacement, DisplacementResponse};
use tokio::sync::{mpsc, oneshot};
use tonic::{Status, Streaming};

/// A unit of work dispatched to a pool worker.
///
/// One variant per service contract, plus a shutdown signal. Each variant
/// carries the channel the worker uses to hand its result back to the gRPC
/// layer; the worker is occupied until that exchange completes.
pub enum WorkRequest {
    /// Unary displacement computation. The worker replies exactly once on
    /// `response`.
    Displacement {
        request: Displacement,
        response: oneshot::Sender<DisplacementResponse>,
    },

    /// Server-streaming status feed. The worker emits the canned report
    /// sequence on `reports_tx` and then drops it to end the stream.
    Feed {
        reports_tx: mpsc::Sender<Result<Data, Status>>,
    },

    /// Client-streaming status sink. The worker drains `inbound` to
    /// end-of-stream and acknowledges on `ack` with the number of reports
    /// observed.
    Sink {
        inbound: Streaming<Data>,
        ack: oneshot::Sender<sprig_tonic_core::Result<u64>>,
    },

    /// Signals the worker to stop and acknowledge shutdown.
    Shutdown { response: oneshot::Sender<()> },
}
