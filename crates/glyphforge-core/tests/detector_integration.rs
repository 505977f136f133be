//! End-to-end detector behavior over a temp-dir font store.

use glyphforge_core::{
    rank_fonts, Adapter, FontDetector, Platform, UNRANKED_PRIORITY,
};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

/// A couple of megabytes of filler so the size heuristics see a plausible
/// CJK font.
fn write_font(dir: &PathBuf, name: &str, size: usize) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, vec![0x42u8; size]).unwrap();
    path
}

fn test_detector(dir: &TempDir) -> FontDetector {
    let adapter = Adapter::new(Platform::Linux)
        .unwrap()
        .with_font_directories(vec![dir.path().to_path_buf()])
        .without_tool_lookup();
    FontDetector::new(Arc::new(adapter), true)
}

#[test]
fn scan_discovers_and_scores_fonts() {
    let dir = TempDir::new().unwrap();
    let fonts = dir.path().to_path_buf();
    write_font(&fonts, "NotoSansCJK-Regular.ttf", 2 * 1024 * 1024);
    write_font(&fonts, "Plainfont.ttf", 64 * 1024);
    write_font(&fonts, "empty.ttf", 0);
    fs::write(fonts.join("readme.txt"), b"not a font").unwrap();

    let mut detector = test_detector(&dir);
    let records = detector.scan(false).unwrap();

    // The empty file and the non-font are dropped.
    assert_eq!(records.len(), 2);
    for record in &records {
        assert!((0.0..=1.0).contains(&record.quality_score));
    }

    let noto = records
        .iter()
        .find(|r| r.name == "NotoSansCJK")
        .expect("suffix-stripped name");
    assert!(noto.supports_cjk);
    assert_eq!(noto.platform_priority, UNRANKED_PRIORITY);
    assert_eq!(noto.file_size, 2 * 1024 * 1024);
}

#[test]
fn ranked_cjk_fonts_lead_with_the_best_candidate() {
    let dir = TempDir::new().unwrap();
    let fonts = dir.path().to_path_buf();
    write_font(&fonts, "NotoSansCJK-Regular.ttf", 2 * 1024 * 1024);
    write_font(&fonts, "Plainfont.ttf", 64 * 1024);

    let mut detector = test_detector(&dir);
    let ranked = detector.cjk_fonts(false).unwrap();
    assert!(!ranked.is_empty());
    assert_eq!(ranked[0].name, "NotoSansCJK");

    let all = detector.scan(false).unwrap();
    let ranked_all = rank_fonts(all);
    assert_eq!(ranked_all[0].name, "NotoSansCJK");
}

#[test]
fn repeated_scans_inside_the_freshness_window_do_no_io() {
    let dir = TempDir::new().unwrap();
    let fonts = dir.path().to_path_buf();
    write_font(&fonts, "NotoSansCJK-Regular.ttf", 2 * 1024 * 1024);

    let mut detector = test_detector(&dir);
    let first = detector.scan(false).unwrap();
    assert_eq!(detector.scan_count(), 1);

    // A font added after the first scan is invisible until the cache
    // expires or a rescan is forced.
    write_font(&fonts, "Latecomer.ttf", 64 * 1024);

    let second = detector.scan(false).unwrap();
    assert_eq!(detector.scan_count(), 1);
    assert_eq!(first, second);

    let forced = detector.scan(true).unwrap();
    assert_eq!(detector.scan_count(), 2);
    assert_eq!(forced.len(), 2);
}

#[test]
fn clear_cache_forces_a_fresh_pass() {
    let dir = TempDir::new().unwrap();
    let fonts = dir.path().to_path_buf();
    write_font(&fonts, "NotoSansCJK-Regular.ttf", 2 * 1024 * 1024);

    let mut detector = test_detector(&dir);
    detector.scan(false).unwrap();
    assert_eq!(detector.cache_size(), 1);
    assert!(detector.cache_age().is_some());

    detector.clear_cache();
    assert_eq!(detector.cache_size(), 0);
    assert!(detector.cache_age().is_none());

    detector.scan(false).unwrap();
    assert_eq!(detector.scan_count(), 2);
}

#[test]
fn find_by_name_matches_exact_then_substring() {
    let dir = TempDir::new().unwrap();
    let fonts = dir.path().to_path_buf();
    write_font(&fonts, "NotoSansCJK-Regular.ttf", 2 * 1024 * 1024);

    let mut detector = test_detector(&dir);
    let found = detector.find_by_name("notosanscjk").unwrap();
    assert_eq!(found.unwrap().name, "NotoSansCJK");

    let partial = detector.find_by_name("sanscjk").unwrap();
    assert_eq!(partial.unwrap().name, "NotoSansCJK");

    assert!(detector.find_by_name("Comic Sans").unwrap().is_none());
}

#[test]
fn missing_directories_are_skipped_not_fatal() {
    let dir = TempDir::new().unwrap();
    let fonts = dir.path().to_path_buf();
    write_font(&fonts, "NotoSansCJK-Regular.ttf", 2 * 1024 * 1024);

    let adapter = Adapter::new(Platform::Linux)
        .unwrap()
        .with_font_directories(vec![
            PathBuf::from("/nonexistent/glyphforge-fonts"),
            fonts,
        ])
        .without_tool_lookup();
    let mut detector = FontDetector::new(Arc::new(adapter), true);
    let records = detector.scan(false).unwrap();
    assert_eq!(records.len(), 1);
}

#[test]
fn empty_store_yields_an_empty_list_not_an_error() {
    let dir = TempDir::new().unwrap();
    let mut detector = test_detector(&dir);
    let records = detector.scan(false).unwrap();
    assert!(records.is_empty());
}
