//! Testing utilities including a mock classifier.
//!
//! Lets pipeline behavior be exercised without a network or a credential:
//! correctness of the extractor and filter never depends on the
//! classification service being reachable.

use std::collections::HashSet;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::classify::Classifier;
use crate::error::Result;
use crate::types::Verdict;

/// A deterministic, configurable [`Classifier`] for tests.
///
/// Unconfigured names come back `relevant: false`, mirroring the
/// conservative bias of the real prompt. Names marked omitted receive no
/// verdict at all, which is how a service response that skips a submitted
/// name looks to the pipeline.
#[derive(Default, Clone)]
pub struct MockClassifier {
    relevant: Arc<RwLock<HashSet<String>>>,
    omitted: Arc<RwLock<HashSet<String>>>,
    failure: Arc<RwLock<Option<String>>>,

    /// Name batches received, one entry per classify call
    calls: Arc<RwLock<Vec<Vec<String>>>>,
}

impl MockClassifier {
    /// Create a mock that marks everything not-relevant.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a name as relevant.
    pub fn with_relevant(self, name: impl Into<String>) -> Self {
        self.relevant.write().unwrap().insert(name.into());
        self
    }

    /// Leave a name out of the response entirely.
    pub fn with_omitted(self, name: impl Into<String>) -> Self {
        self.omitted.write().unwrap().insert(name.into());
        self
    }

    /// Make every classify call fail, as a service outage would.
    pub fn with_failure(self, message: impl Into<String>) -> Self {
        *self.failure.write().unwrap() = Some(message.into());
        self
    }

    /// Get the name batches this mock has been asked to classify.
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl Classifier for MockClassifier {
    async fn classify(&self, names: &[String], _criterion: &str) -> Result<Vec<Verdict>> {
        self.calls.write().unwrap().push(names.to_vec());

        if let Some(message) = self.failure.read().unwrap().clone() {
            return Err(openai_client::OpenAIError::Api(message).into());
        }

        let relevant = self.relevant.read().unwrap();
        let omitted = self.omitted.read().unwrap();

        Ok(names
            .iter()
            .filter(|name| !omitted.contains(*name))
            .map(|name| Verdict::new(name.clone(), relevant.contains(name)))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_defaults_to_not_relevant() {
        let mock = MockClassifier::new().with_relevant("Snow Sled");
        let names = vec!["Snow Sled".to_string(), "Tube".to_string()];

        let verdicts = mock.classify(&names, "criterion").await.unwrap();

        assert_eq!(verdicts.len(), 2);
        assert!(verdicts[0].relevant);
        assert!(!verdicts[1].relevant);
    }

    #[tokio::test]
    async fn test_mock_failure_surfaces_as_classify_error() {
        let mock = MockClassifier::new().with_failure("service down");
        let names = vec!["Sled".to_string()];

        let err = mock.classify(&names, "criterion").await.unwrap_err();

        assert!(matches!(err, crate::FilterError::Classify(_)));
    }

    #[tokio::test]
    async fn test_mock_omits_configured_names() {
        let mock = MockClassifier::new().with_omitted("Ghost");
        let names = vec!["Ghost".to_string(), "Seen".to_string()];

        let verdicts = mock.classify(&names, "criterion").await.unwrap();

        assert_eq!(verdicts.len(), 1);
        assert_eq!(verdicts[0].name, "Seen");
        assert_eq!(mock.calls(), vec![vec!["Ghost".to_string(), "Seen".to_string()]]);
    }
}
