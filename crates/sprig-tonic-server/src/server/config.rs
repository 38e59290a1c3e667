use anyhow::bail;
use clap::Parser;

/// Runtime configuration for the `sprig-tonic-server` binary.
///
/// These settings control the concurrency, buffering, and shutdown behavior
/// of the station services. All values are parsed from CLI arguments or
/// environment variables, with defaults suitable for the reference
/// deployment.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "sprig-tonic-server",
    version,
    about = "A gRPC station service: unary displacement plus streaming status reports"
)]
pub struct CliArgs {
    /// Number of worker tasks servicing calls concurrently.
    ///
    /// Every call occupies one worker for its duration; a streaming call
    /// holds its worker until the stream ends. This value therefore bounds
    /// the number of concurrent in-flight calls. Excess calls queue on the
    /// worker channels and are never dropped.
    ///
    /// Environment variable: `NUM_WORKERS`
    #[arg(long, env = "NUM_WORKERS", default_value_t = 10)]
    pub num_workers: usize,

    /// Capacity of the response buffer between a worker and a gRPC stream.
    ///
    /// This affects how many status reports can be buffered before the
    /// worker must wait for the client to consume more data. Lower values
    /// increase backpressure responsiveness; higher values enable deeper
    /// pipelining.
    ///
    /// Environment variable: `STREAM_BUFFER_SIZE`
    #[arg(long, env = "STREAM_BUFFER_SIZE", default_value_t = 8)]
    pub stream_buffer_size: usize,

    /// Seconds to wait for in-flight calls to drain during graceful
    /// shutdown before cancelling the remaining work.
    ///
    /// Environment variable: `SHUTDOWN_TIMEOUT_SECS`
    #[arg(long, env = "SHUTDOWN_TIMEOUT_SECS", default_value_t = 3)]
    pub shutdown_timeout_secs: usize,

    /// Address to listen on (TCP or Unix socket path; use --uds for Unix socket).
    ///
    /// Example: "[::]:50051" or "/tmp/sprig-uds.sock"
    ///
    /// Environment variable: `SERVER_ADDR`
    #[arg(long, env = "SERVER_ADDR", default_value_t = String::from("[::]:50051"))]
    pub server_addr: String,

    /// Listen on a Unix socket instead of TCP. If set, `SERVER_ADDR` must be a file path.
    #[arg(short, long, default_value_t = false)]
    pub uds: bool,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub num_workers: usize,
    pub stream_buffer_size: usize,
    pub shutdown_timeout_secs: usize,
    pub server_addr: String,
    pub uds: bool,
}

impl TryFrom<CliArgs> for ServerConfig {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        if args.num_workers == 0 {
            bail!("NUM_WORKERS must be greater than 0");
        }

        if args.stream_buffer_size == 0 {
            bail!("STREAM_BUFFER_SIZE must be greater than 0");
        }

        Ok(Self {
            num_workers: args.num_workers,
            stream_buffer_size: args.stream_buffer_size,
            shutdown_timeout_secs: args.shutdown_timeout_secs,
            server_addr: args.server_addr,
            uds: args.uds,
        })
    }
}
