//! CLI entry point for the listing filter.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use listing_filter::{run, OpenAiClassifier, Outcome, DEFAULT_MODEL};

#[derive(Parser)]
#[command(
    name = "listing-filter",
    about = "Filter a saved marketplace search-results page by a relevance criterion"
)]
struct Args {
    /// Path to the saved search-results page
    input: PathBuf,

    /// Where to write the filtered page (overwritten if present)
    output: PathBuf,

    /// Free-text relevance criterion, e.g. "hard plastic and for adults"
    criterion: String,

    /// Chat model used for classification
    #[arg(long, default_value = DEFAULT_MODEL)]
    model: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let classifier = OpenAiClassifier::from_env()?.with_model(&args.model);

    match run(&classifier, &args.input, &args.output, &args.criterion).await? {
        Outcome::NoListings => {
            println!("No listings found. Check the saved page and its result markup.");
        }
        Outcome::Written {
            output,
            relevant,
            total,
        } => {
            println!(
                "Filtered results saved to {} ({} of {} listings kept)",
                output.display(),
                relevant,
                total
            );
        }
    }

    Ok(())
}
