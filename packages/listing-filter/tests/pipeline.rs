//! End-to-end pipeline tests over fixture pages.
//!
//! These run the full extract → classify → filter sequence against a mock
//! classifier, so nothing here needs a network or a credential.

use std::fs;
use std::path::PathBuf;

use listing_filter::testing::MockClassifier;
use listing_filter::{run, Outcome, MAX_BATCH};
use scraper::{Html, Selector};

/// Build a results page with one marked container per title.
fn results_page(titles: &[&str]) -> String {
    let containers: String = titles
        .iter()
        .map(|title| {
            format!(
                concat!(
                    r#"<div class="s-result-item" data-component-type="s-search-result">"#,
                    "<h2><span>{}</span></h2>",
                    r#"<span class="a-price">$24.99</span>"#,
                    "</div>"
                ),
                title
            )
        })
        .collect();

    format!(
        concat!(
            "<!DOCTYPE html><html><head><title>results</title></head>",
            "<body><div class=\"s-main-slot\">{}</div></body></html>"
        ),
        containers
    )
}

/// Unique scratch directory per test.
fn scratch_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "listing-filter-pipeline-{}-{}",
        tag,
        std::process::id()
    ));
    fs::create_dir_all(&dir).unwrap();
    dir
}

/// Titles of the containers remaining in a rendered page.
fn remaining_titles(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let containers =
        Selector::parse("div.s-result-item[data-component-type='s-search-result']").unwrap();
    let title = Selector::parse("h2 span").unwrap();

    document
        .select(&containers)
        .filter_map(|c| c.select(&title).next())
        .map(|t| t.text().collect::<String>().trim().to_string())
        .collect()
}

#[tokio::test]
async fn test_three_listings_one_relevant() {
    let dir = scratch_dir("three");
    let input = dir.join("input.html");
    let output = dir.join("filtered.html");
    fs::write(
        &input,
        results_page(&[
            "Snow Sled for Kid and Adult Includes Resistant Handles and Ropes",
            "Tube for Kids Sledding",
            "Tube for Adults with Handles",
        ]),
    )
    .unwrap();

    let classifier = MockClassifier::new()
        .with_relevant("Snow Sled for Kid and Adult Includes Resistant Handles and Ropes");

    let outcome = run(
        &classifier,
        &input,
        &output,
        "hard plastic and for adults",
    )
    .await
    .unwrap();

    assert_eq!(
        outcome,
        Outcome::Written {
            output: output.clone(),
            relevant: 1,
            total: 3,
        }
    );

    let rendered = fs::read_to_string(&output).unwrap();
    assert_eq!(
        remaining_titles(&rendered),
        ["Snow Sled for Kid and Adult Includes Resistant Handles and Ropes"]
    );
    // Kept container retains its other markup
    assert!(rendered.contains("$24.99"));

    fs::remove_dir_all(&dir).unwrap();
}

#[tokio::test]
async fn test_empty_page_short_circuits() {
    let dir = scratch_dir("empty");
    let input = dir.join("input.html");
    let output = dir.join("filtered.html");
    fs::write(
        &input,
        "<html><body><div class=\"s-main-slot\">no results today</div></body></html>",
    )
    .unwrap();

    let classifier = MockClassifier::new();

    let outcome = run(&classifier, &input, &output, "anything").await.unwrap();

    assert_eq!(outcome, Outcome::NoListings);
    // The classifier was never invoked and no output was written
    assert!(classifier.calls().is_empty());
    assert!(!output.exists());

    fs::remove_dir_all(&dir).unwrap();
}

#[tokio::test]
async fn test_batch_cap_drops_trailing_listings() {
    let dir = scratch_dir("cap");
    let input = dir.join("input.html");
    let output = dir.join("filtered.html");

    let titles: Vec<String> = (1..=12).map(|i| format!("Listing {:02}", i)).collect();
    let title_refs: Vec<&str> = titles.iter().map(String::as_str).collect();
    fs::write(&input, results_page(&title_refs)).unwrap();

    // Everything submitted is relevant; the cap is the only limiter
    let mut classifier = MockClassifier::new();
    for title in &titles {
        classifier = classifier.with_relevant(title.clone());
    }

    let outcome = run(&classifier, &input, &output, "anything").await.unwrap();

    // Only the first ten, in document order, were ever submitted
    let calls = classifier.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].len(), MAX_BATCH);
    assert_eq!(calls[0][0], "Listing 01");
    assert_eq!(calls[0][9], "Listing 10");

    // Containers 11 and 12 were never marked relevant, so they are gone
    let rendered = fs::read_to_string(&output).unwrap();
    let remaining = remaining_titles(&rendered);
    assert_eq!(remaining.len(), 10);
    assert!(!remaining.iter().any(|t| t == "Listing 11"));
    assert!(!remaining.iter().any(|t| t == "Listing 12"));

    assert_eq!(
        outcome,
        Outcome::Written {
            output: output.clone(),
            relevant: 10,
            total: 12,
        }
    );

    fs::remove_dir_all(&dir).unwrap();
}

#[tokio::test]
async fn test_omitted_verdict_means_removed() {
    let dir = scratch_dir("omitted");
    let input = dir.join("input.html");
    let output = dir.join("filtered.html");
    fs::write(&input, results_page(&["Answered Sled", "Forgotten Sled"])).unwrap();

    // The service answers for only one of the two submitted names
    let classifier = MockClassifier::new()
        .with_relevant("Answered Sled")
        .with_omitted("Forgotten Sled");

    run(&classifier, &input, &output, "anything").await.unwrap();

    let rendered = fs::read_to_string(&output).unwrap();
    assert_eq!(remaining_titles(&rendered), ["Answered Sled"]);

    fs::remove_dir_all(&dir).unwrap();
}

#[tokio::test]
async fn test_unreadable_input_aborts_before_anything_else() {
    let dir = scratch_dir("unreadable");
    let input = dir.join("does-not-exist.html");
    let output = dir.join("filtered.html");

    let classifier = MockClassifier::new();

    let err = run(&classifier, &input, &output, "anything")
        .await
        .unwrap_err();

    assert!(matches!(err, listing_filter::FilterError::Io { .. }));
    assert!(classifier.calls().is_empty());
    assert!(!output.exists());

    fs::remove_dir_all(&dir).unwrap();
}

#[tokio::test]
async fn test_classifier_failure_writes_nothing() {
    let dir = scratch_dir("outage");
    let input = dir.join("input.html");
    let output = dir.join("filtered.html");
    fs::write(&input, results_page(&["Snow Sled"])).unwrap();

    let classifier = MockClassifier::new().with_failure("401 Unauthorized");

    let err = run(&classifier, &input, &output, "anything")
        .await
        .unwrap_err();

    assert!(matches!(err, listing_filter::FilterError::Classify(_)));
    assert!(!output.exists());

    fs::remove_dir_all(&dir).unwrap();
}

#[tokio::test]
async fn test_duplicate_names_share_one_verdict() {
    // Known gap preserved from the source behavior: verdicts match by
    // exact name, so duplicate titles collide.
    let dir = scratch_dir("dupes");
    let input = dir.join("input.html");
    let output = dir.join("filtered.html");
    fs::write(
        &input,
        results_page(&["Twin Sled", "Twin Sled", "Other Sled"]),
    )
    .unwrap();

    let classifier = MockClassifier::new().with_relevant("Twin Sled");

    run(&classifier, &input, &output, "anything").await.unwrap();

    let rendered = fs::read_to_string(&output).unwrap();
    assert_eq!(remaining_titles(&rendered), ["Twin Sled", "Twin Sled"]);

    fs::remove_dir_all(&dir).unwrap();
}
