//! Pruning non-relevant listings out of the page.
//!
//! The filter re-parses the original document rather than reusing the
//! extractor's tree, so extraction-time node handles are never dereferenced
//! here. Classification has fully completed by the time this runs.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use scraper::Html;
use tracing::debug;

use crate::error::{FilterError, Result};
use crate::extract::{parse_selector, RESULT_CONTAINER_SELECTOR, TITLE_SELECTOR};
use crate::serialize;
use crate::types::Verdict;

/// Remove every result container whose title is not in the relevant set,
/// then write the indented document to `output_path`.
///
/// Containers whose title cannot be located are left in place: the
/// extractor never submitted them, so no verdict can apply to them.
/// Overwrites `output_path` silently if it exists.
pub fn filter_document(path: &Path, verdicts: &[Verdict], output_path: &Path) -> Result<()> {
    let html = fs::read_to_string(path).map_err(|e| FilterError::io(path, e))?;
    let mut document = Html::parse_document(&html);

    let relevant: HashSet<&str> = verdicts
        .iter()
        .filter(|v| v.relevant)
        .map(|v| v.name.as_str())
        .collect();

    let container_selector = parse_selector(RESULT_CONTAINER_SELECTOR)?;
    let title_selector = parse_selector(TITLE_SELECTOR)?;

    let mut removals = Vec::new();
    for container in document.select(&container_selector) {
        let Some(title) = container.select(&title_selector).next() else {
            continue;
        };
        let name = title.text().collect::<String>();
        if !relevant.contains(name.trim()) {
            removals.push(container.id());
        }
    }

    for id in &removals {
        if let Some(mut node) = document.tree.get_mut(*id) {
            node.detach();
        }
    }

    debug!(
        removed = removals.len(),
        relevant = relevant.len(),
        output = %output_path.display(),
        "Pruned result containers"
    );

    write_output(&document, output_path)
}

/// Serialize and write via a sibling temp file, renaming on success, so a
/// failed write never leaves a truncated page at the output path.
fn write_output(document: &Html, output_path: &Path) -> Result<()> {
    let rendered = serialize::to_pretty_html(document);

    let tmp_path = tmp_sibling(output_path);
    fs::write(&tmp_path, rendered).map_err(|e| FilterError::io(&tmp_path, e))?;
    fs::rename(&tmp_path, output_path).map_err(|e| FilterError::io(output_path, e))?;

    Ok(())
}

fn tmp_sibling(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "filtered".into());
    name.push(".tmp");
    path.with_file_name(name)
}
