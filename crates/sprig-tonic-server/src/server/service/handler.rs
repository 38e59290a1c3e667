//! gRPC service implementation for the sprig station.
//!
//! This module defines [`SprigService`], the concrete implementation of the
//! three service contracts defined in the protobuf specification: the unary
//! displacement computation, the server-streaming status feed, and the
//! client-streaming status sink.
//!
//! ## Responsibilities
//!
//! - Spawn and manage the background worker pool.
//! - Dispatch every incoming call to a worker; a call occupies its worker
//!   for its full duration, so the pool size bounds concurrency and excess
//!   calls queue.
//! - Track in-flight calls for the graceful shutdown drain and refuse new
//!   calls once shutdown begins.

use crate::server::{
    config::ServerConfig,
    pool::{manager::WorkerPool, worker::worker_loop},
    service::observer::{LogObserver, StateObserver},
    streaming::request::WorkRequest,
};
use core::pin::Pin;
use portable_atomic::{AtomicBool, AtomicUsize, Ordering};
use sprig_tonic_core::{
    Error,
    proto::{
        Data, Displacement, DisplacementResponse, Empty,
        displacement_service_server::DisplacementService, status_feed_server::StatusFeed,
        status_sink_server::StatusSink,
    },
};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio_stream::{Stream, wrappers::ReceiverStream};
use tokio_util::sync::CancellationToken;
use tonic::{Request, Response, Status, Streaming};

static CALLS_INFLIGHT: AtomicUsize = AtomicUsize::new(0);
static GLOBAL_SHUTDOWN: AtomicBool = AtomicBool::new(false);

pub(crate) fn increment_calls_inflight() {
    CALLS_INFLIGHT.fetch_add(1, Ordering::Relaxed);
}

pub(crate) fn decrement_calls_inflight() {
    CALLS_INFLIGHT.fetch_sub(1, Ordering::Relaxed);
}

pub(crate) fn get_calls_inflight() -> usize {
    CALLS_INFLIGHT.load(Ordering::Relaxed)
}

pub(crate) fn set_global_shutdown() {
    GLOBAL_SHUTDOWN.store(true, Ordering::Relaxed);
}

fn is_shutting_down() -> bool {
    GLOBAL_SHUTDOWN.load(Ordering::Relaxed)
}

/// gRPC service for the sprig station.
///
/// Implements all three generated service traits over a single shared worker
/// pool. Internally, each accepted call becomes one [`WorkRequest`] handed to
/// the pool; workers service one call at a time, so streaming calls hold
/// their worker until the stream ends.
#[derive(Clone)]
pub struct SprigService {
    config: ServerConfig,
    worker_pool: Arc<WorkerPool>,
}

impl SprigService {
    /// Creates a new `SprigService` and spawns the worker pool, logging each
    /// report the sink receives.
    pub fn new(config: ServerConfig) -> Self {
        Self::with_observer(config, Arc::new(LogObserver))
    }

    /// Creates the service with a caller-supplied sink observer.
    ///
    /// Tests use this to record received reports and assert on their order.
    pub fn with_observer(config: ServerConfig, observer: Arc<dyn StateObserver>) -> Self {
        let mut workers = Vec::with_capacity(config.num_workers);
        let shutdown_token = CancellationToken::new();

        for worker_id in 0..config.num_workers {
            // Capacity 1: at most one call is queued behind a busy worker.
            // Further dispatches wait on the channel send, so saturating the
            // pool queues calls instead of dropping them.
            let (tx, rx) = mpsc::channel(1);
            workers.push(tx);

            tokio::spawn(worker_loop(worker_id, rx, Arc::clone(&observer)));
        }

        let worker_pool = WorkerPool::new(workers, shutdown_token, config.shutdown_timeout_secs);

        Self {
            config,
            worker_pool: Arc::new(worker_pool),
        }
    }

    /// Initiates a graceful shutdown of the worker pool.
    ///
    /// New calls are refused, in-flight calls are drained up to the
    /// configured timeout, and the shutdown blocks until each worker
    /// acknowledges termination.
    pub async fn shutdown(&self) -> Result<(), Error> {
        self.worker_pool.shutdown().await
    }
}

#[tonic::async_trait]
impl DisplacementService for SprigService {
    /// Handles the unary displacement computation.
    ///
    /// The request is dispatched to a pool worker, which computes the
    /// Euclidean distance between the two points and replies once.
    #[tracing::instrument(skip_all)]
    async fn compute_displacement(
        &self,
        req: Request<Displacement>,
    ) -> Result<Response<DisplacementResponse>, Status> {
        if is_shutting_down() {
            return Err(Error::ServiceShutdown.into());
        }
        increment_calls_inflight();

        let (resp_tx, resp_rx) = oneshot::channel();
        let dispatched = self
            .worker_pool
            .send_to_next_worker(WorkRequest::Displacement {
                request: req.into_inner(),
                response: resp_tx,
            })
            .await;

        if let Err(e) = dispatched {
            decrement_calls_inflight();
            return Err(e.into());
        }

        let reply = resp_rx.await.map_err(|_| Error::ChannelError {
            context: "Worker dropped the unary response channel".to_string(),
        });
        decrement_calls_inflight();

        Ok(Response::new(reply?))
    }
}

#[tonic::async_trait]
impl StatusFeed for SprigService {
    type FetchStatusStream = Pin<Box<dyn Stream<Item = Result<Data, Status>> + Send>>;

    /// Handles a server-streaming status request.
    ///
    /// The request payload is ignored per the contract. A worker replays the
    /// canned report sequence into a bounded channel, which is returned to
    /// the client as the response stream. Every call reproduces the same
    /// sequence from the start.
    #[tracing::instrument(skip_all)]
    async fn fetch_status(
        &self,
        _req: Request<Empty>,
    ) -> Result<Response<Self::FetchStatusStream>, Status> {
        if is_shutting_down() {
            return Err(Error::ServiceShutdown.into());
        }
        increment_calls_inflight();

        let (reports_tx, reports_rx) = mpsc::channel(self.config.stream_buffer_size);

        if let Err(e) = self
            .worker_pool
            .send_to_next_worker(WorkRequest::Feed { reports_tx })
            .await
        {
            decrement_calls_inflight();
            return Err(e.into());
        }

        // The worker decrements the in-flight gauge when the feed completes.
        let stream = ReceiverStream::new(reports_rx);
        Ok(Response::new(Box::pin(stream)))
    }
}

#[tonic::async_trait]
impl StatusSink for SprigService {
    /// Handles a client-streaming state report.
    ///
    /// The inbound stream is handed to a worker, which observes every report
    /// in send order. Once the client half-closes the stream, the worker
    /// acknowledges and the call replies with `Empty`. An empty inbound
    /// stream is still acknowledged.
    #[tracing::instrument(skip_all)]
    async fn stream_state(
        &self,
        req: Request<Streaming<Data>>,
    ) -> Result<Response<Empty>, Status> {
        if is_shutting_down() {
            return Err(Error::ServiceShutdown.into());
        }
        increment_calls_inflight();

        let (ack_tx, ack_rx) = oneshot::channel();
        let dispatched = self
            .worker_pool
            .send_to_next_worker(WorkRequest::Sink {
                inbound: req.into_inner(),
                ack: ack_tx,
            })
            .await;

        if let Err(e) = dispatched {
            decrement_calls_inflight();
            return Err(e.into());
        }

        let acked = match ack_rx.await {
            Ok(result) => result,
            Err(_) => Err(Error::ChannelError {
                context: "Worker dropped the sink ack channel".to_string(),
            }),
        };
        decrement_calls_inflight();

        let received = acked?;
        tracing::debug!(reports = received, "state stream drained");
        Ok(Response::new(Empty {}))
    }
}
