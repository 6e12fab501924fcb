//! Tests for item selection and offered-path checks.

use crate::cli::commands::{ensure_offered, pick_item};
use handoff_core::media::{MediaItem, QualityTier};
use handoff_core::resolve::SubmissionPath;
use std::fs;

const ITEMS: &str = r#"[
    {"title": "Erste", "url_normal": "https://cdn.example.de/1.mp4"},
    {"title": "Zweite", "url_normal": "https://cdn.example.de/2.mp4"}
]"#;

#[test]
fn pick_item_by_index() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("items.json");
    fs::write(&path, ITEMS).unwrap();
    assert_eq!(pick_item(&path, 1).unwrap().title, "Zweite");
    assert_eq!(pick_item(&path, 0).unwrap().title, "Erste");
}

#[test]
fn pick_item_out_of_range() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("items.json");
    fs::write(&path, ITEMS).unwrap();
    let err = pick_item(&path, 2).unwrap_err();
    assert!(err.to_string().contains("out of range"));
}

#[test]
fn ensure_offered_rejects_missing_high_and_redundant_low() {
    let item = MediaItem::new("Erste", "https://cdn.example.de/1.mp4")
        .with_low("https://cdn.example.de/1.mp4");
    let err = ensure_offered(&item, SubmissionPath::Quality(QualityTier::High)).unwrap_err();
    assert!(err.to_string().contains("high is not offered"));
    assert!(ensure_offered(&item, SubmissionPath::Quality(QualityTier::Low)).is_err());
    assert!(ensure_offered(&item, SubmissionPath::Quality(QualityTier::Normal)).is_ok());
    assert!(ensure_offered(&item, SubmissionPath::Website).is_ok());
}

#[test]
fn ensure_offered_accepts_available_variants() {
    let item = MediaItem::new("Zweite", "https://cdn.example.de/2.mp4")
        .with_high("https://cdn.example.de/2_hd.mp4")
        .with_low("https://cdn.example.de/2_low.mp4");
    assert!(ensure_offered(&item, SubmissionPath::Quality(QualityTier::High)).is_ok());
    assert!(ensure_offered(&item, SubmissionPath::Quality(QualityTier::Low)).is_ok());
}
