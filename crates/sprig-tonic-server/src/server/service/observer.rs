use sprig_tonic_core::proto::Data;

/// Observation hook for reports received by the `StreamState` sink.
///
/// The sink's contract is to consume every element of the inbound stream in
/// send order and observe each one. The observer is the seam where that
/// observation happens: production wires in [`LogObserver`], tests wire in a
/// recording implementation to assert on received elements.
pub trait StateObserver: Send + Sync {
    /// Called once per received report, in send order.
    fn observe(&self, report: &Data);
}

/// Default observer: logs every received `(status, info)` pair.
#[derive(Debug, Default)]
pub struct LogObserver;

impl StateObserver for LogObserver {
    fn observe(&self, report: &Data) {
        tracing::info!(
            status = ?report.status(),
            info = %report.info,
            "state report received"
        );
    }
}
