//! `watchdock` CLI entry-point.
//!
//! Available sub-commands:
//! - `serve`   — start the device/application HTTP API.
//! - `ping`    — dial the backing store once and report reachability.
//! - `catalog` — print the supported command table.

use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing::info;

use db::mysql::{create_pool, MySqlConnector};
use db::{Connector, PoolConfig};

#[derive(Parser)]
#[command(
    name = "watchdock",
    about = "Wearable-device telemetry and command-dispatch backend",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the HTTP API server.
    Serve {
        #[arg(long, default_value = "0.0.0.0:8080")]
        bind: String,
        #[arg(long, env = "DATABASE_URL")]
        database_url: String,
        /// Maximum pooled backing-store sessions.
        #[arg(long, default_value_t = 8)]
        pool_size: usize,
        /// How long an acquire may wait for a free session, in milliseconds.
        #[arg(long, default_value_t = 5000)]
        acquire_timeout_ms: u64,
    },
    /// Dial the backing store once and report reachability.
    Ping {
        #[arg(long, env = "DATABASE_URL")]
        database_url: String,
    },
    /// Print the supported command catalog.
    Catalog,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve {
            bind,
            database_url,
            pool_size,
            acquire_timeout_ms,
        } => {
            info!("Starting API server on {bind}");
            let config = PoolConfig::default()
                .with_max_size(pool_size)
                .with_acquire_timeout(Duration::from_millis(acquire_timeout_ms));
            let pool = create_pool(&database_url, config);
            let executor = commands::CommandExecutor::new(pool);
            api::serve(&bind, executor).await.expect("server failed");
        }
        Command::Ping { database_url } => {
            match MySqlConnector::new(database_url.as_str()).connect().await {
                Ok(_) => println!("backing store reachable"),
                Err(e) => {
                    eprintln!("ping failed: {e}");
                    std::process::exit(1);
                }
            }
        }
        Command::Catalog => {
            for spec in commands::catalog::all() {
                let kinds: Vec<String> =
                    spec.params.iter().map(|kind| format!("{kind:?}")).collect();
                println!(
                    "{:<26} rows={:<5} params=[{}]",
                    spec.name,
                    spec.expects_rows,
                    kinds.join(", ")
                );
            }
        }
    }
}
