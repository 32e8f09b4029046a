//! GPay Demo CLI
//!
//! Command-line interface for trying out the GPay payment portal without a
//! device: compose payment page URLs, decode bridge messages and replay
//! scripted portal sessions.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use gpay_demo_cli::commands;
use gpay_lib::config::DEFAULT_CHANNEL_NAME;
use gpay_lib::SdkEnvironment;

#[derive(Parser)]
#[command(name = "gpay-demo")]
#[command(about = "GPay Demo CLI - Compose, decode and simulate GPay payment portals", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log filter in RUST_LOG syntax (overrides --verbose)
    #[arg(long, global = true)]
    log: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compose the payment page URL for a request
    Url {
        /// Environment (staging, production)
        #[arg(long = "env", default_value = "production")]
        environment: SdkEnvironment,

        /// Amount to pay
        #[arg(long)]
        amount: f64,

        /// Requesting merchant's username
        #[arg(long)]
        requester: String,

        /// Merchant-side request identifier
        #[arg(long)]
        request_id: String,

        /// Merchant-side request timestamp
        #[arg(long)]
        request_time: String,

        /// The app's own URL scheme, sent as app_name
        #[arg(long)]
        app_scheme: Option<String>,

        /// Override the environment's payment page
        #[arg(long)]
        base_url: Option<String>,
    },

    /// Decode a bridge message posted by the payment page
    Bridge {
        /// Message body as JSON
        json: String,

        /// Channel the message arrived on
        #[arg(long, default_value = DEFAULT_CHANNEL_NAME)]
        channel: String,
    },

    /// Replay a scripted portal session
    Simulate {
        /// Script file (JSON)
        script: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = match (&cli.log, cli.verbose) {
        (Some(filter), _) => filter.clone(),
        (None, true) => "gpay_demo_cli=debug,gpay_demo=debug,gpay_lib=debug".to_string(),
        (None, false) => "gpay_demo_cli=info,gpay_lib=warn".to_string(),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Url {
            environment,
            amount,
            requester,
            request_id,
            request_time,
            app_scheme,
            base_url,
        } => {
            let args = commands::url::UrlArgs {
                environment,
                amount,
                requester,
                request_id,
                request_time,
                app_scheme,
                base_url,
            };
            commands::url::run(&args, cli.verbose)
        }
        Commands::Bridge { json, channel } => commands::bridge::run(&json, &channel),
        Commands::Simulate { script } => commands::simulate::run(&script),
    }
}
