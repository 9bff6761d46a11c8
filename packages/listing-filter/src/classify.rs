//! Relevance classification of listing names against a free-text criterion.
//!
//! The [`Classifier`] trait is the seam between the pipeline and the LLM
//! provider: the real implementation wraps OpenAI structured outputs, and
//! tests substitute a deterministic stand-in (see [`crate::testing`]).

use async_trait::async_trait;
use openai_client::OpenAIClient;
use tracing::debug;

use crate::error::Result;
use crate::prompts;
use crate::types::{Listing, Verdict, VerdictList};

/// Most listings submitted to the service in one run. Excess listings are
/// silently never classified, and therefore never marked relevant.
pub const MAX_BATCH: usize = 10;

/// Chat model used when no override is given.
pub const DEFAULT_MODEL: &str = "gpt-4o-2024-08-06";

/// Classifies listing names against a criterion.
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Return one verdict per classified name, in no guaranteed order.
    ///
    /// Implementations may omit verdicts; downstream, an omitted name is
    /// simply absent from the relevant set.
    async fn classify(&self, names: &[String], criterion: &str) -> Result<Vec<Verdict>>;
}

/// Classify a run's listings, applying the batch cap.
///
/// This is the pipeline's entry into classification: it truncates to the
/// first [`MAX_BATCH`] listings in document order, strips the records down
/// to their names, and delegates to the classifier.
pub async fn classify_listings<C: Classifier + ?Sized>(
    classifier: &C,
    listings: &[Listing],
    criterion: &str,
) -> Result<Vec<Verdict>> {
    let names: Vec<String> = listings
        .iter()
        .take(MAX_BATCH)
        .map(|listing| listing.name.clone())
        .collect();

    if names.len() < listings.len() {
        debug!(
            submitted = names.len(),
            total = listings.len(),
            "Truncated listing batch for classification"
        );
    }

    classifier.classify(&names, criterion).await
}

/// OpenAI-backed classifier using JSON-schema structured outputs.
#[derive(Clone)]
pub struct OpenAiClassifier {
    client: OpenAIClient,
    model: String,
}

impl OpenAiClassifier {
    /// Create a classifier over an existing client.
    pub fn new(client: OpenAIClient) -> Self {
        Self {
            client,
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Create from environment variable `OPENAI_API_KEY`.
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(OpenAIClient::from_env()?))
    }

    /// Set the chat model (default: `gpt-4o-2024-08-06`).
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Get the current model name.
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl Classifier for OpenAiClassifier {
    async fn classify(&self, names: &[String], criterion: &str) -> Result<Vec<Verdict>> {
        let system = prompts::system_prompt(criterion);
        let user = prompts::user_prompt(names)?;

        debug!(
            model = %self.model,
            candidates = names.len(),
            "Requesting relevance verdicts"
        );

        let response: VerdictList = self.client.extract(&self.model, system, user).await?;

        // Returned exactly as parsed: no check that every submitted name
        // received a verdict.
        Ok(response.listings)
    }
}
