//! LLM prompts for listing classification.
//!
//! The system prompt carries the decision policy: a listing is relevant only
//! when it unambiguously satisfies every component of the criterion, so the
//! classifier under-includes rather than over-includes. That wording is a
//! behavioral contract, not flavor text.

use crate::error::Result;

/// System prompt template. `{criterion}` is replaced per run.
pub const CLASSIFY_SYSTEM_PROMPT: &str = r#"You are a product filtering assistant. Your task is to evaluate the relevance of each product listing against the shopper's criteria: "{criterion}".

For each listing, carefully consider every detail its name reveals about the product.

Only mark a listing as 'relevant: true' if it satisfies **all criteria completely**. If there is any ambiguity or missing information about a criterion, mark the listing as 'relevant: false'.

Respond with a JSON object containing a 'listings' array where each item has:
- 'name': the listing name, copied exactly as given
- 'relevant': a boolean indicating whether the listing matches

Example Input:
Criteria: "hard plastic and for adults"
Listings:
[
    { "name": "Snow Sled for Kid and Adult Includes Resistant Handles and Ropes, plastic" },
    { "name": "Tube for Kids Sledding" },
    { "name": "Tube for Adults with Handles" }
]

Example Output:
{
    "listings": [
        { "name": "Snow Sled for Kid and Adult Includes Resistant Handles and Ropes, plastic", "relevant": true },
        { "name": "Tube for Kids Sledding", "relevant": false },
        { "name": "Tube for Adults with Handles", "relevant": false }
    ]
}"#;

/// Build the system prompt for a criterion.
pub fn system_prompt(criterion: &str) -> String {
    CLASSIFY_SYSTEM_PROMPT.replace("{criterion}", criterion)
}

/// Build the user prompt listing the candidate names as a JSON array.
///
/// Only names travel to the service; the markup nodes never leave the
/// process.
pub fn user_prompt(names: &[String]) -> Result<String> {
    let candidates: Vec<serde_json::Value> = names
        .iter()
        .map(|name| serde_json::json!({ "name": name }))
        .collect();

    Ok(format!(
        "Now, analyze the following listings:\nListings:\n{}",
        serde_json::to_string_pretty(&candidates)?
    ))
}
