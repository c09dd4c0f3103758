//! # Checker Binary Entry Point
//!
//! Runs exactly one checker workflow against one gallery service target and
//! exits with the outcome's code.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --bin checker -- --host fd66:666:1::2 place --tick 5 --flag 'FLAG{...}'
//! cargo run --bin checker -- --host fd66:666:1::2 check
//! cargo run --bin checker -- --host fd66:666:1::2 verify --tick 5
//! ```
//!
//! Exit codes: 0 = OK, 1 = FAULTY, 2 = FLAG_NOT_FOUND, 3 = crashed
//! (transport or internal error).

use clap::{Parser, Subcommand};
use env_logger::Builder;
use log::{error, LevelFilter};
use std::io::Write;
use std::time::Duration;

use gallery_checker::common::config::{load_config, CheckerConfig};
use gallery_checker::{CheckResult, GalleryChecker, GalleryClient, StateStore};

/// Command-line arguments for the checker binary
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Address of the gallery service (IPv4, IPv6, or hostname)
    #[arg(long)]
    host: String,

    /// Service port (overrides the config file)
    #[arg(long)]
    port: Option<u16>,

    /// Path to the checker configuration file (TOML format)
    #[arg(short, long)]
    config: Option<String>,

    /// Directory for placement state (overrides the config file)
    #[arg(long)]
    state_dir: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Plant a flag for the given tick
    Place {
        /// Verification cycle the flag belongs to
        #[arg(long)]
        tick: u64,
        /// The flag value to hide
        #[arg(long)]
        flag: String,
    },
    /// Run the gallery CRUD consistency check
    Check,
    /// Verify the flag planted at the given tick
    Verify {
        /// Verification cycle to check
        #[arg(long)]
        tick: u64,
    },
}

/// Initialize the logging system with timestamp, level, and message formatting.
///
/// Logs are printed to stderr with INFO level by default (RUST_LOG overrides).
/// Format: `[HH:MM:SS] [LEVEL] message`
fn init_logger() {
    Builder::new()
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] [{}] {}",
                chrono::Local::now().format("%H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();
}

async fn run(args: Args) -> anyhow::Result<CheckResult> {
    let config: CheckerConfig = match &args.config {
        Some(path) => load_config(path)?,
        None => CheckerConfig::default(),
    };

    let port = args.port.unwrap_or(config.service_port);
    let state_dir = args.state_dir.unwrap_or(config.state_dir);
    let timeout = Duration::from_secs(config.http_timeout_secs);

    let client = GalleryClient::new(&args.host, port, timeout)?;
    let checker = GalleryChecker::new(client, StateStore::new(state_dir));

    match args.command {
        Command::Place { tick, flag } => checker.place_flag(tick, &flag).await,
        Command::Check => checker.check_service().await,
        Command::Verify { tick } => checker.check_flag(tick).await,
    }
}

#[tokio::main]
async fn main() {
    init_logger();
    let args = Args::parse();

    let result = match run(args).await {
        Ok(result) => result,
        Err(e) => {
            error!("❌ Checker crashed: {:#}", e);
            std::process::exit(3);
        }
    };

    println!("{}", result);
    std::process::exit(result.exit_code());
}
