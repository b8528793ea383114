use std::fs;

use ramp_dev_mcp_rs::error::LoadError;
use ramp_dev_mcp_rs::storage::DocumentStore;

#[test]
fn test_load_guides_recursively() {
    let temp_dir = tempfile::tempdir().unwrap();
    let root = temp_dir.path();
    fs::create_dir_all(root.join("guides")).unwrap();

    fs::write(
        root.join("authorization.mdx"),
        "---\ntitle: Authorization\npriority: 1\n---\n## Overview\n\nUse OAuth.",
    )
    .unwrap();
    fs::write(
        root.join("guides/bill-pay.mdx"),
        "## Overview\n\nPay <b>bills</b>.",
    )
    .unwrap();
    fs::write(root.join("guides/notes.txt"), "not a guide").unwrap();

    let (store, report) = DocumentStore::load(root).unwrap();

    assert_eq!(report.loaded, 2);
    assert!(report.skipped.is_empty());
    assert_eq!(store.len(), 2);

    let auth = store.get("authorization.mdx").unwrap();
    assert_eq!(auth.title, "Authorization");
    assert_eq!(auth.priority, Some(1));
    assert!(auth.raw.starts_with("## Overview"));

    let bills = store.get("guides/bill-pay.mdx").unwrap();
    assert_eq!(bills.title, "Bill Pay");
    assert!(bills.content.contains("Pay bills."));
    assert!(bills.raw.contains("<b>bills</b>"));
}

#[test]
fn test_bad_guide_is_skipped() {
    let temp_dir = tempfile::tempdir().unwrap();
    let root = temp_dir.path();

    fs::write(root.join("good.mdx"), "## Overview\n\nFine.").unwrap();
    fs::write(root.join("binary.md"), [0xff, 0xfe, 0x00, 0xc3]).unwrap();

    let (store, report) = DocumentStore::load(root).unwrap();

    assert_eq!(report.loaded, 1);
    assert_eq!(report.skipped.len(), 1);
    assert!(matches!(report.skipped[0], LoadError::Read { .. }));
    assert!(store.get("good.mdx").is_some());
}

#[test]
fn test_loose_front_matter_still_loads() {
    let temp_dir = tempfile::tempdir().unwrap();
    let root = temp_dir.path();

    fs::write(root.join("intro.mdx"), "---\n\n## Overview\n\nWelcome to the API.").unwrap();
    fs::write(
        root.join("p.mdx"),
        "---\ntitle: Spend Limits\npriority: 1.5\n---\n## Overview\n\nLimits.",
    )
    .unwrap();

    let (store, report) = DocumentStore::load(root).unwrap();

    assert_eq!(report.loaded, 2);
    assert!(report.skipped.is_empty());

    let intro = store.get("intro.mdx").unwrap();
    assert_eq!(intro.title, "Intro");
    assert!(intro.content.contains("Welcome to the API."));

    let limits = store.get("p.mdx").unwrap();
    assert_eq!(limits.title, "Spend Limits");
    assert_eq!(limits.priority, None);
}

#[test]
fn test_missing_root_fails() {
    let temp_dir = tempfile::tempdir().unwrap();
    assert!(DocumentStore::load(temp_dir.path().join("absent")).is_err());
}

#[test]
fn test_find_by_partial_filename() {
    let temp_dir = tempfile::tempdir().unwrap();
    let root = temp_dir.path();
    fs::create_dir_all(root.join("guides")).unwrap();
    fs::write(root.join("guides/accounting.mdx"), "## Overview\n\nSync.").unwrap();

    let (store, _) = DocumentStore::load(root).unwrap();

    assert!(store.get("accounting.mdx").is_none());
    let found = store.find("accounting.mdx").unwrap();
    assert_eq!(found.identifier, "guides/accounting.mdx");
    assert!(store.find("webhooks.mdx").is_none());
}
