//! Aggregation behaviour against an on-disk store.

use std::collections::HashMap;

use rstest::rstest;
use tally_core::{AggregateRow, NormalizedRecord};
use tally_db::MessageStore;

fn record(category: &str, sentiment: f64) -> NormalizedRecord {
    NormalizedRecord {
        category: Some(category.to_string()),
        sentiment,
        message_length: 10,
        ..NormalizedRecord::default()
    }
}

fn by_category(rows: &[AggregateRow]) -> HashMap<String, f64> {
    rows.iter()
        .map(|r| (r.label().to_string(), r.avg_sentiment))
        .collect()
}

async fn file_store() -> (tempfile::TempDir, MessageStore) {
    let dir = tempfile::tempdir().unwrap();
    let store = MessageStore::open_local(dir.path().join("buzz.sqlite"))
        .await
        .unwrap();
    (dir, store)
}

#[tokio::test]
async fn three_line_scenario() {
    let (_dir, store) = file_store().await;
    store.insert(&record("A", 0.5)).await.unwrap();
    store.insert(&record("A", 1.0)).await.unwrap();
    store.insert(&record("B", -0.5)).await.unwrap();

    let means = by_category(&store.compute_averages().await.unwrap());
    assert_eq!(means.len(), 2);
    assert!((means["A"] - 0.75).abs() < 1e-9);
    assert!((means["B"] + 0.5).abs() < 1e-9);
}

#[rstest]
#[case(&[("humor", 0.9), ("tech", 0.1), ("humor", 0.3), ("news", -0.2), ("tech", 0.5)])]
#[case(&[("solo", 0.123_456_789)])]
#[case(&[("x", 1.0), ("y", -1.0), ("z", 0.0), ("x", -1.0), ("y", 1.0), ("z", 0.0)])]
#[tokio::test]
async fn one_row_per_category_with_exact_mean(#[case] inputs: &[(&str, f64)]) {
    let (_dir, store) = file_store().await;
    for (category, sentiment) in inputs {
        store.insert(&record(category, *sentiment)).await.unwrap();
    }

    let mut expected: HashMap<&str, (f64, u32)> = HashMap::new();
    for (category, sentiment) in inputs {
        let entry = expected.entry(*category).or_insert((0.0, 0));
        entry.0 += sentiment;
        entry.1 += 1;
    }

    let rows = store.compute_averages().await.unwrap();
    assert_eq!(rows.len(), expected.len());
    let means = by_category(&rows);
    for (category, (sum, n)) in expected {
        let want = sum / f64::from(n);
        let got = means[category];
        assert!((got - want).abs() < 1e-9, "{category}: {got} != {want}");
    }
}

#[tokio::test]
async fn repeated_reads_are_identical() {
    let (_dir, store) = file_store().await;
    store.insert(&record("A", 0.2)).await.unwrap();
    store.insert(&record("B", 0.4)).await.unwrap();

    let first = store.compute_averages().await.unwrap();
    let second = store.compute_averages().await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn fresh_store_after_reset_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("buzz.sqlite");
    {
        let store = MessageStore::open_local(&path).await.unwrap();
        store.insert(&record("A", 0.5)).await.unwrap();
    }

    assert!(tally_db::remove_store_files(&path).unwrap());
    let store = MessageStore::open_local(&path).await.unwrap();
    assert!(store.compute_averages().await.unwrap().is_empty());
    assert_eq!(store.count().await.unwrap(), 0);
}
