mod serve;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use geoagent_core::{handle_message, ChannelSink, EvRequest, ParkingRequest};
use geoagent_evcharger::EvChargerAdaptor;
use geoagent_parking::ParkingAdaptor;
use tracing_subscriber::EnvFilter;

const CLI_SENDER: &str = "cli";

#[derive(Debug, Parser)]
#[command(name = "geoagent")]
#[command(about = "EV charger and car parking search adaptors")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search EV chargers around a point and print the reply as JSON.
    Ev {
        #[arg(long, allow_negative_numbers = true)]
        latitude: f64,
        #[arg(long, allow_negative_numbers = true)]
        longitude: f64,
        #[arg(long)]
        miles_radius: f64,
        #[arg(long, default_value = CLI_SENDER)]
        sender: String,
    },
    /// Search car parking around a point and print the reply as JSON.
    Parking {
        #[arg(long, allow_negative_numbers = true)]
        latitude: f64,
        #[arg(long, allow_negative_numbers = true)]
        longitude: f64,
        /// Search radius in miles.
        #[arg(long)]
        radius: f64,
        #[arg(long, default_value_t = 10)]
        max_result: u32,
        #[arg(long, default_value = CLI_SENDER)]
        sender: String,
    },
    /// Handle newline-delimited JSON requests from stdin; replies go to stdout.
    Serve,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = geoagent_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(?config, "configuration loaded");

    let (sink, mut replies) = ChannelSink::new();

    match cli.command {
        Commands::Ev {
            latitude,
            longitude,
            miles_radius,
            sender,
        } => {
            let adaptor = EvChargerAdaptor::from_config(&config)?;
            let request = EvRequest {
                latitude,
                longitude,
                miles_radius,
            };
            handle_message(&adaptor, &sink, &sender, request).await;
        }
        Commands::Parking {
            latitude,
            longitude,
            radius,
            max_result,
            sender,
        } => {
            let adaptor = ParkingAdaptor::from_config(&config)?;
            let request = ParkingRequest {
                latitude,
                longitude,
                radius,
                max_result,
            };
            handle_message(&adaptor, &sink, &sender, request).await;
        }
        Commands::Serve => {
            let adaptors = serve::Adaptors {
                ev: Arc::new(EvChargerAdaptor::from_config(&config)?),
                parking: Arc::new(ParkingAdaptor::from_config(&config)?),
            };
            return serve::run(adaptors, sink, replies).await;
        }
    }

    drop(sink);
    while let Some(outbound) = replies.recv().await {
        println!("{}", serde_json::to_string_pretty(&outbound.reply)?);
    }
    Ok(())
}
