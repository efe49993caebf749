//! `simdist` - inspect the active SIMD tier and evaluate vector metrics.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use colored::Colorize;
use simdist_core::{init_global, ElementWidth, InstructionTier, MetricKind, SimdConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

/// simdist - runtime-dispatched SIMD vector similarity
#[derive(Parser, Debug)]
#[command(name = "simdist")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Highest instruction tier to use (baseline, sse4.1, avx, avx2, avx512f, neon)
    #[arg(long, global = true)]
    max_tier: Option<InstructionTier>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show the active tier, the tiers this CPU supports and the version
    Info {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Evaluate a metric on two text vectors
    Compute {
        /// Metric: dot, cosine, euclidean, euclidean_squared
        #[arg(short, long)]
        metric: MetricKind,

        /// Element width: f32 or f64
        #[arg(short, long, default_value = "f32")]
        width: ElementWidth,

        /// Number of leading values to use (default: all)
        #[arg(short, long)]
        dimensions: Option<usize>,

        /// First vector, e.g. "[1, 2, 3]"
        a: String,

        /// Second vector
        b: String,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Encode a text vector as a native-endian binary buffer
    Convert {
        /// Element width: f32 or f64
        #[arg(short, long, default_value = "f32")]
        width: ElementWidth,

        /// Number of values to read
        #[arg(short, long)]
        dimensions: usize,

        /// Vector text, e.g. "1, 2, 3"
        text: String,

        /// Write the buffer here instead of printing hex
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err:#}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = SimdConfig::load()?;
    if let Some(tier) = cli.max_tier {
        config = config.with_max_tier(tier);
    }
    let dispatcher = init_global(&config)?;
    tracing::debug!(tier = %dispatcher.tier(), "Dispatcher ready");

    match cli.command {
        Commands::Info { json } => commands::info(dispatcher, json),
        Commands::Compute {
            metric,
            width,
            dimensions,
            a,
            b,
            json,
        } => commands::compute(dispatcher, metric, width, dimensions, &a, &b, json),
        Commands::Convert {
            width,
            dimensions,
            text,
            output,
        } => commands::convert(width, dimensions, &text, output.as_deref()),
    }
}
