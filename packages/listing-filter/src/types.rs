//! Core data types for the filtering pipeline.

use schemars::JsonSchema;
use ego_tree::NodeId;
use serde::{Deserialize, Serialize};

/// One product listing found on the search-results page.
#[derive(Debug, Clone)]
pub struct Listing {
    /// Trimmed visible text of the listing's title element
    pub name: String,

    /// Handle to the listing's result container.
    ///
    /// Only meaningful for the document tree it was extracted from; the
    /// filter stage re-parses the page and never dereferences this.
    pub node: NodeId,
}

/// The classifier's relevant/not-relevant decision for one listing name.
///
/// Matching back to a [`Listing`] is by exact string equality on `name`.
/// Duplicate listing names therefore collide: one verdict applies to every
/// container carrying that title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Verdict {
    /// The listing name, echoed back by the service
    pub name: String,

    /// Whether the listing satisfies every component of the criterion
    pub relevant: bool,
}

impl Verdict {
    /// Create a verdict.
    pub fn new(name: impl Into<String>, relevant: bool) -> Self {
        Self {
            name: name.into(),
            relevant,
        }
    }
}

/// Wire shape of the classification response.
///
/// OpenAI strict mode requires a top-level object, so the verdict array
/// rides inside a single-field wrapper.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct VerdictList {
    /// One verdict per classified listing, in no guaranteed order
    pub listings: Vec<Verdict>,
}
