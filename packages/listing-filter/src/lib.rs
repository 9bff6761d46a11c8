//! Filters a saved marketplace search-results page down to the listings an
//! LLM judges relevant to a free-text criterion.
//!
//! Three stages, strictly in sequence:
//!
//! 1. [`extract`] - parse the page and collect listing records
//! 2. [`classify`] - one batched structured-output call for verdicts
//! 3. [`filter`] - re-parse, prune non-relevant containers, write the result
//!
//! Each run is atomic from the caller's perspective: it either completes
//! all three stages or aborts before the output file is written. There is
//! no retry, no partial output, and no state across runs.
//!
//! # Example
//!
//! ```rust,ignore
//! use listing_filter::{run, OpenAiClassifier, Outcome};
//!
//! let classifier = OpenAiClassifier::from_env()?;
//! match run(&classifier, &input, &output, "hard plastic and for adults").await? {
//!     Outcome::NoListings => eprintln!("nothing to classify"),
//!     Outcome::Written { output, .. } => println!("wrote {}", output.display()),
//! }
//! ```

pub mod classify;
pub mod error;
pub mod extract;
pub mod filter;
pub mod prompts;
pub mod serialize;
pub mod testing;
pub mod types;

pub use classify::{classify_listings, Classifier, OpenAiClassifier, DEFAULT_MODEL, MAX_BATCH};
pub use error::{FilterError, Result};
pub use extract::extract_listings;
pub use filter::filter_document;
pub use types::{Listing, Verdict, VerdictList};

use std::path::{Path, PathBuf};

use tracing::info;

/// Terminal state of one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The page had no recognizable listings. Nothing was classified and no
    /// file was written; this is an expected condition, not an error.
    NoListings,

    /// The filtered page was written to `output`.
    Written {
        output: PathBuf,
        /// Names the classifier marked relevant
        relevant: usize,
        /// Listings extracted from the page
        total: usize,
    },
}

/// Run the full extract → classify → filter pipeline.
///
/// Classification completes before any mutation of the output document
/// starts, and the classifier sees at most [`MAX_BATCH`] listings.
pub async fn run<C: Classifier + ?Sized>(
    classifier: &C,
    input: &Path,
    output: &Path,
    criterion: &str,
) -> Result<Outcome> {
    let listings = extract_listings(input)?;
    info!(count = listings.len(), input = %input.display(), "Extracted listings");

    if listings.is_empty() {
        return Ok(Outcome::NoListings);
    }

    let verdicts = classify::classify_listings(classifier, &listings, criterion).await?;
    let relevant = verdicts.iter().filter(|v| v.relevant).count();
    info!(
        verdicts = verdicts.len(),
        relevant = relevant,
        "Classification complete"
    );

    filter::filter_document(input, &verdicts, output)?;
    info!(output = %output.display(), "Wrote filtered page");

    Ok(Outcome::Written {
        output: output.to_path_buf(),
        relevant,
        total: listings.len(),
    })
}
