use crate::server::{
    service::observer::StateObserver,
    streaming::{
        processor::{drain_state_stream, run_status_feed},
        request::WorkRequest,
    },
};
use sprig_tonic_core::proto::DisplacementResponse;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Worker task responsible for processing [`WorkRequest`] messages.
///
/// The worker listens on an MPSC channel and services one call at a time
/// until a shutdown signal is received. A streaming call occupies the worker
/// for the lifetime of its stream.
///
/// This function is designed to be spawned as a Tokio task and runs in an
/// infinite loop until explicitly shut down.
///
/// # Arguments
///
/// - `worker_id`: Unique numeric identifier for this worker (used for logs).
/// - `rx`: Receiver through which [`WorkRequest`]s are received.
/// - `observer`: Shared observer notified for every report the sink
///   receives.
///
/// # Request Types
///
/// - [`WorkRequest::Displacement`] — Computes the distance and replies on
///   the oneshot channel.
/// - [`WorkRequest::Feed`] — Emits the canned report sequence via
///   [`run_status_feed`].
/// - [`WorkRequest::Sink`] — Drains the inbound stream via
///   [`drain_state_stream`].
/// - [`WorkRequest::Shutdown`] — Signals the worker to stop and acknowledge
///   shutdown.
pub async fn worker_loop(
    worker_id: usize,
    mut rx: mpsc::Receiver<WorkRequest>,
    observer: Arc<dyn StateObserver>,
) {
    tracing::trace!("Worker {worker_id} started");

    while let Some(work) = rx.recv().await {
        match work {
            WorkRequest::Displacement { request, response } => {
                let reply = DisplacementResponse {
                    distance: request.distance(),
                };
                if response.send(reply).is_err() {
                    tracing::debug!("Worker {worker_id} caller went away before unary reply");
                }
            }
            WorkRequest::Feed { reports_tx } => {
                run_status_feed(worker_id, reports_tx).await;
            }
            WorkRequest::Sink { inbound, ack } => {
                drain_state_stream(worker_id, inbound, observer.as_ref(), ack).await;
            }
            WorkRequest::Shutdown { response } => {
                tracing::debug!("Worker {worker_id} received shutdown signal");

                if response.send(()).is_err() {
                    tracing::error!("Worker {worker_id} failed to acknowledge shutdown");
                }
                break;
            }
        }
    }

    tracing::trace!("Worker {worker_id} stopped");
}
