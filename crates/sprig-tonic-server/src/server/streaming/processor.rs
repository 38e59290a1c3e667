use crate::server::service::handler::decrement_calls_inflight;
use crate::server::service::observer::StateObserver;
use sprig_tonic_core::{Error, proto::Data, types::status_reports};
use tokio::sync::{mpsc, oneshot};
use tonic::{Status, Streaming};

/// Emits the canned status report sequence for one `FetchStatus` call.
///
/// The sequence is replayed from the start on every call. Reports are sent
/// through the bounded response channel, so a slow client applies
/// backpressure to the worker rather than forcing buffering. If the client
/// disconnects mid-stream the remaining reports are skipped and the call
/// simply ends.
///
/// The in-flight gauge is decremented on every exit path; the feed is the
/// one call whose lifetime outlives its gRPC handler.
pub async fn run_status_feed(worker_id: usize, reports_tx: mpsc::Sender<Result<Data, Status>>) {
    for report in status_reports() {
        if reports_tx.is_closed() {
            tracing::debug!("Worker {worker_id} feed caller went away mid-stream");
            break;
        }

        if let Err(e) = reports_tx.send(Ok(report)).await {
            tracing::debug!("Worker {worker_id} failed to send report: {e}");
            break;
        }
    }

    decrement_calls_inflight();
}

/// Drains one `StreamState` inbound stream to completion.
///
/// Every report is observed in send order. When the client half-closes the
/// stream, the total count is acknowledged back to the handler, which then
/// replies with `Empty`. A transport error on the inbound stream aborts the
/// call as cancelled.
pub async fn drain_state_stream(
    worker_id: usize,
    mut inbound: Streaming<Data>,
    observer: &dyn StateObserver,
    ack: oneshot::Sender<sprig_tonic_core::Result<u64>>,
) {
    let mut received: u64 = 0;

    let result = loop {
        match inbound.message().await {
            Ok(Some(report)) => {
                observer.observe(&report);
                received += 1;
            }
            Ok(None) => break Ok(received),
            Err(status) => {
                tracing::debug!("Worker {worker_id} inbound stream failed: {status}");
                break Err(Error::RequestCancelled);
            }
        }
    };

    if ack.send(result).is_err() {
        tracing::debug!("Worker {worker_id} caller went away before sink ack");
    }
}
