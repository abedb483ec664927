//! Command-line interface for columnar-datagen
//!
//! # Usage Examples
//!
//! ```bash
//! # Generate a 1 MiB table of six columns and print a text summary
//! columnar-datagen generate --types int32,string,bool --columns 6 --table-bytes 1048576
//!
//! # Reproduce a benchmark input from a spec file
//! columnar-datagen generate --spec-file bench.yaml --format json
//!
//! # Verbose logging
//! RUST_LOG=datagen_generator=debug columnar-datagen generate --types float64 --table-bytes 4096
//! ```

use clap::{Parser, Subcommand};
use columnar_datagen::{render_report, run_generate, GenerateArgs};

#[derive(Parser)]
#[command(name = "columnar-datagen")]
#[command(about = "Generate deterministic, realistically-shaped tables for columnar benchmarks")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a table and report its shape
    Generate(GenerateArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate(args) => {
            let report = run_generate(&args).await?;
            println!("{}", render_report(&report, args.format)?);
        }
    }

    Ok(())
}
