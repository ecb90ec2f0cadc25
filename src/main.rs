//! Command-line interface for bulk-query-gen
//!
//! # Usage Examples
//!
//! ```bash
//! # Mean temperature of one random home, InfluxQL
//! bulk-query-gen generate --db benchmark_db --query-type 1-home-12-hours
//!
//! # Same workload in Flux, 2 hour windows, bodies only
//! bulk-query-gen generate --db benchmark_db --dialect flux \
//!   --query-type 1-home-12-hours --query-interval 2h --format text
//!
//! # Everything from a run config, with debug logging
//! RUST_LOG=debug bulk-query-gen generate --config run.yaml
//! ```

use bulk_query_gen::{run_generate, GenerateArgs, RunSettings};
use clap::{Parser, Subcommand};
use comfy_table::{presets::UTF8_FULL, Table};
use query_gen::QUERY_TYPES;

#[derive(Parser)]
#[command(name = "bulk-query-gen")]
#[command(about = "Generate randomized InfluxQL/Flux benchmark queries")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate queries and write them to a file or stdout
    Generate(GenerateArgs),

    /// List the available query types
    List,
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
    // Logs go to stderr; stdout may carry the queries.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate(args) => {
            let settings = RunSettings::from_args(&args)?;
            run_generate(settings).await?;
        }
        Commands::List => {
            let mut table = Table::new();
            table.load_preset(UTF8_FULL);
            table.set_header(vec!["Query type", "Description"]);
            for query_type in QUERY_TYPES {
                table.add_row(vec![query_type.name, query_type.description]);
            }
            println!("{table}");
        }
    }

    Ok(())
}
