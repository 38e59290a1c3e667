#![doc = include_str!("../README.md")]

use clap::{Parser, Subcommand};
use sprig_tonic_core::proto::{
    Displacement, Empty, Point, displacement_service_client::DisplacementServiceClient,
    status_feed_client::StatusFeedClient, status_sink_client::StatusSinkClient,
};
use sprig_tonic_core::types::status_reports;
use tonic::transport::Channel;

#[derive(Parser, Debug)]
#[command(
    name = "sprig-tonic-client",
    version,
    about = "Example client for the sprig station services"
)]
struct CliArgs {
    /// Server endpoint to dial (unencrypted).
    ///
    /// Environment variable: `SERVER_ADDR`
    #[arg(long, env = "SERVER_ADDR", default_value_t = String::from("http://localhost:50051"))]
    server_addr: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Unary call: compute the distance between two points.
    Displacement {
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        start_x: i32,
        #[arg(long, default_value_t = 12, allow_hyphen_values = true)]
        start_y: i32,
        #[arg(long, default_value_t = 12, allow_hyphen_values = true)]
        end_x: i32,
        #[arg(long, default_value_t = 14, allow_hyphen_values = true)]
        end_y: i32,
    },
    /// Server streaming: print every status report the station emits.
    FetchStatus,
    /// Client streaming: send the canned report sequence and await the ack.
    StreamState,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load from .env
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();

    println!("calling server at {}...", args.server_addr);
    let channel = Channel::from_shared(args.server_addr.clone())?
        .connect()
        .await?;

    match args.command {
        Command::Displacement {
            start_x,
            start_y,
            end_x,
            end_y,
        } => {
            let mut client = DisplacementServiceClient::new(channel);
            let payload = Displacement {
                start: Some(Point {
                    x: start_x,
                    y: start_y,
                }),
                end: Some(Point { x: end_x, y: end_y }),
            };

            let response = client.compute_displacement(payload).await?.into_inner();
            println!("distance = {}", response.distance);
        }
        Command::FetchStatus => {
            let mut client = StatusFeedClient::new(channel);
            let mut stream = client.fetch_status(Empty {}).await?.into_inner();

            while let Some(report) = stream.message().await? {
                println!("status: {:?} | info: {:?}", report.status(), report.info);
            }
        }
        Command::StreamState => {
            let mut client = StatusSinkClient::new(channel);
            // The same shared sequence the server-streaming feed replays.
            client
                .stream_state(tokio_stream::iter(status_reports()))
                .await?;
            println!("state stream acknowledged");
        }
    }

    Ok(())
}
