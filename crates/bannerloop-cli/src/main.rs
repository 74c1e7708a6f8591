use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bannerloop_core::AppConfig;

mod commands;

use commands::demo::{parse_drag, DemoOptions, ScriptedDrag};

#[derive(Parser)]
#[command(name = "bannerloop")]
#[command(author, version, about = "Circular banner carousel engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the padded slot layout for a list of items
    Pad {
        /// Real items, in order (at least two)
        #[arg(required = true)]
        items: Vec<String>,
    },
    /// Run the carousel against a simulated viewport and print its events
    Demo {
        /// Comma separated real items
        #[arg(short, long, value_delimiter = ',', default_value = "a,b,c,d,e")]
        items: Vec<String>,
        /// How long to run
        #[arg(short, long, default_value_t = 10)]
        seconds: u64,
        /// Override the configured autoscroll interval (0 disables)
        #[arg(long)]
        autoscroll_ms: Option<u64>,
        /// Scripted drag as AT_MS:DISPLACEMENT (repeatable)
        #[arg(long = "drag", value_parser = parse_drag)]
        drags: Vec<ScriptedDrag>,
        /// Print events as JSON lines
        #[arg(long)]
        json: bool,
    },
    /// Show the effective configuration
    Config {
        /// Write it to the config file (refuses to overwrite)
        #[arg(long)]
        write: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = AppConfig::load()?;

    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| config.general.log_level.clone()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Pad { items } => commands::pad::run(&items),
        Commands::Demo {
            items,
            seconds,
            autoscroll_ms,
            drags,
            json,
        } => {
            let options = DemoOptions {
                items,
                seconds,
                autoscroll_ms,
                drags,
                json,
            };
            commands::demo::run(&config, options).await
        }
        Commands::Config { write } => commands::config::run(&config, write),
    }
}
