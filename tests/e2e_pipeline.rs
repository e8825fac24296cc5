// LootSleuth - tests/e2e_pipeline.rs
//
// End-to-end tests for the extract -> CSV -> analyze pipeline.
//
// These tests exercise the real filesystem, real walkdir traversal, real
// CSV writing and reading: a raw log file on disk all the way to the chart
// layout. No mocks, no stubs.

use lootsleuth::app::analyze::{self, AnalyzeConfig};
use lootsleuth::app::extract::{run_extraction, run_extraction_with, ExtractConfig};
use lootsleuth::core::model::{Rarity, SkipReason};
use lootsleuth::util::constants;
use lootsleuth::util::error::{AnalyzeError, ExtractError};
use std::fs;
use std::path::{Path, PathBuf};

// =============================================================================
// Helpers
// =============================================================================

/// Absolute path to the on-disk fixture log directory.
fn fixture_logs() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("logs")
}

fn default_phrases() -> Vec<String> {
    constants::DEFAULT_PHRASES
        .iter()
        .map(|s| (*s).to_string())
        .collect()
}

fn config(log_dir: &Path, output_csv: &Path) -> ExtractConfig {
    ExtractConfig {
        log_dir: log_dir.to_path_buf(),
        output_csv: output_csv.to_path_buf(),
        phrases: default_phrases(),
    }
}

/// Parse the written CSV back into (character, date, line) tuples.
fn read_rows(path: &Path) -> Vec<(String, String, String)> {
    let mut reader = csv::Reader::from_path(path).unwrap();
    assert_eq!(
        reader.headers().unwrap().iter().collect::<Vec<_>>(),
        vec!["Character", "Date", "Line"]
    );
    reader
        .records()
        .map(|r| {
            let r = r.unwrap();
            (r[0].to_string(), r[1].to_string(), r[2].to_string())
        })
        .collect()
}

// =============================================================================
// Extraction E2E
// =============================================================================

/// The documented sample line yields exactly the documented CSV row.
#[test]
fn e2e_sample_line_yields_expected_row() {
    let logs = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    fs::write(
        logs.path().join("eqlog_Mintaka_thj.txt"),
        "[Mon Jan 27 01:11:14 2025] SomeGuy --You have looted a Abashi's Rod of Disempowerment.--\n",
    )
    .unwrap();
    let csv_path = out.path().join("matched_lines.csv");

    let report = run_extraction(&config(logs.path(), &csv_path)).unwrap();

    assert_eq!(report.total_count, 1);
    assert_eq!(report.rows_written, 1);
    assert_eq!(
        read_rows(&csv_path),
        vec![(
            "Mintaka".to_string(),
            "Mon Jan 27 01:11:14 2025".to_string(),
            "SomeGuy Abashi's Rod of Disempowerment".to_string()
        )]
    );
}

/// The fixture directory: one character file, one file without a Mint token.
#[test]
fn e2e_fixture_directory() {
    let out = tempfile::tempdir().unwrap();
    let csv_path = out.path().join("matched_lines.csv");

    let report = run_extraction(&config(&fixture_logs(), &csv_path)).unwrap();

    // Five matched lines, one of which has no timestamp.
    assert_eq!(report.total_count, 5);
    assert_eq!(report.rows_written, 4);
    assert_eq!(report.unwritten_count(), 1);

    assert_eq!(report.characters.len(), 1);
    let mintaka = &report.characters[0];
    assert_eq!(mintaka.name, "Mintaka");
    assert_eq!(mintaka.total_count, 5);
    assert_eq!(mintaka.files[0].file_name, "eqlog_Mintaka_thj.txt");
    assert!(mintaka.files[0]
        .lines
        .contains(&"--You have looted a Hobart's War Helmet.--".to_string()));

    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].file_name, "eqlog_Velious_thj.txt");
    assert_eq!(report.skipped[0].reason, SkipReason::NoCharacterName);

    let lines: Vec<_> = read_rows(&csv_path).into_iter().map(|r| r.2).collect();
    assert_eq!(
        lines,
        vec![
            "SomeGuy Abashi's Rod of Disempowerment",
            "Jaelen's Katana (Legendary)",
            "Prismatic Scale of Fire (Enchanted)",
            // The loot prefix is removed case-sensitively only.
            "--you have looted a jaelen's katana",
        ]
    );
}

/// Files without a `_Mint..._thj` token contribute nothing but a warning.
#[test]
fn e2e_unmatched_filenames_produce_no_records() {
    let logs = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let loot = "[Mon Jan 27 01:11:14 2025] --You have looted a Jaelen's Katana.--\n";
    for name in ["eqlog_Velious_thj.txt", "Mintaka.txt", "eqlog_Mintaka.txt"] {
        fs::write(logs.path().join(name), loot).unwrap();
    }
    let csv_path = out.path().join("out.csv");

    let report = run_extraction(&config(logs.path(), &csv_path)).unwrap();

    assert!(report.is_empty());
    assert_eq!(report.total_count, 0);
    assert_eq!(report.skipped.len(), 3);
    assert!(report
        .skipped
        .iter()
        .all(|s| s.reason == SkipReason::NoCharacterName));
    assert!(read_rows(&csv_path).is_empty(), "header-only CSV expected");
}

/// An undecodable file is skipped; the next file is still processed.
#[test]
fn e2e_invalid_utf8_file_is_isolated() {
    let logs = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let mut bad = b"[Mon Jan 27 01:11:14 2025] --You have looted a Jaelen's Katana.--\n".to_vec();
    bad.extend_from_slice(&[0xff, 0xfe, b'\n']);
    fs::write(logs.path().join("eqlog_Mintbad_thj.txt"), bad).unwrap();
    fs::write(
        logs.path().join("eqlog_Mintgood_thj.txt"),
        "[Mon Jan 27 01:11:14 2025] --You have looted a Hobart's War Helmet.--\n",
    )
    .unwrap();
    let csv_path = out.path().join("out.csv");

    let report = run_extraction(&config(logs.path(), &csv_path)).unwrap();

    assert_eq!(report.total_count, 1);
    assert_eq!(report.characters.len(), 1);
    assert_eq!(report.characters[0].name, "Mintgood");
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].reason, SkipReason::InvalidEncoding);

    let rows = read_rows(&csv_path);
    assert_eq!(rows.len(), 1, "no rows may leak from the undecodable file");
    assert_eq!(rows[0].2, "Hobart's War Helmet");
}

/// Each skip is reported through the callback, matching the report.
#[test]
fn e2e_skips_reported_as_they_happen() {
    let out = tempfile::tempdir().unwrap();
    let csv_path = out.path().join("matched_lines.csv");

    let mut warnings = Vec::new();
    let report = run_extraction_with(&config(&fixture_logs(), &csv_path), |skipped| {
        warnings.push(skipped.warning())
    })
    .unwrap();

    assert_eq!(warnings.len(), report.skipped.len());
    assert!(warnings[0].contains("'eqlog_Velious_thj.txt'"));
}

/// Files in subdirectories are not scanned.
#[test]
fn e2e_subdirectories_are_not_scanned() {
    let logs = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let nested = logs.path().join("archive");
    fs::create_dir(&nested).unwrap();
    fs::write(
        nested.join("eqlog_Mintaka_thj.txt"),
        "[t] --You have looted a Jaelen's Katana.--\n",
    )
    .unwrap();

    let report = run_extraction(&config(logs.path(), &out.path().join("out.csv"))).unwrap();
    assert!(report.is_empty());
    assert!(report.skipped.is_empty());
}

/// A missing log directory aborts before any CSV is created.
#[test]
fn e2e_missing_directory_writes_nothing() {
    let out = tempfile::tempdir().unwrap();
    let csv_path = out.path().join("out.csv");
    let result = run_extraction(&config(&out.path().join("no-such-dir"), &csv_path));

    assert!(
        matches!(result, Err(ExtractError::DirectoryNotFound { .. })),
        "expected DirectoryNotFound, got {result:?}"
    );
    assert!(!csv_path.exists());
}

/// An output path that cannot be created is a setup error.
#[test]
fn e2e_unwritable_output_is_setup_error() {
    let logs = tempfile::tempdir().unwrap();
    let csv_path = logs.path().join("missing-parent").join("out.csv");
    let result = run_extraction(&config(logs.path(), &csv_path));
    assert!(
        matches!(result, Err(ExtractError::OutputCreate { .. })),
        "expected OutputCreate, got {result:?}"
    );
}

/// A phrase that is not a valid regex aborts before the CSV is created.
#[test]
fn e2e_invalid_phrase_is_setup_error() {
    let logs = tempfile::tempdir().unwrap();
    let csv_path = logs.path().join("out.csv");
    let mut cfg = config(logs.path(), &csv_path);
    cfg.phrases = vec!["Katana (".to_string()];

    let result = run_extraction(&cfg);
    assert!(matches!(result, Err(ExtractError::InvalidPhrase { .. })));
    assert!(!csv_path.exists());
}

// =============================================================================
// Full pipeline
// =============================================================================

/// Extract into a CSV, then analyse that CSV.
#[test]
fn e2e_extract_then_analyze() {
    let logs = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    fs::write(
        logs.path().join("eqlog_Mintaka_thj.txt"),
        "\
[Mon Jan 27 01:00:00 2025] --You have looted a Jaelen's Katana (Legendary).--
[Mon Jan 27 01:01:00 2025] --You have looted a Jaelen's Katana.--
[Mon Jan 27 01:02:00 2025] --You have looted a Jaelen's Katana (Enchanted).--
[Mon Jan 27 01:03:00 2025] --You have looted a Hobart's War Helmet.--
",
    )
    .unwrap();
    fs::write(
        logs.path().join("eqlog_Mintbar_thj.txt"),
        "[Mon Jan 27 02:00:00 2025] --You have looted a Hobart's War Helmet (Legendary).--\n\
         [Mon Jan 27 02:05:00 2025] --You have looted a Crystasia's Crystal Ring.--\n",
    )
    .unwrap();
    let csv_path = out.path().join("matched_lines.csv");

    let report = run_extraction(&config(logs.path(), &csv_path)).unwrap();
    assert_eq!(report.rows_written, 6);

    let table = analyze::load_table(&csv_path).unwrap();
    assert_eq!(
        table.item_names(),
        vec!["Jaelen's Katana", "Hobart's War Helmet", "Crystasia's Crystal Ring"]
    );
    let katana = table.get("Jaelen's Katana").unwrap();
    assert_eq!(katana.count(Rarity::Normal), 1);
    assert_eq!(katana.count(Rarity::Enchanted), 1);
    assert_eq!(katana.count(Rarity::Legendary), 1);
    assert_eq!(table.total(), report.rows_written);

    let layout = analyze::run_analysis(&AnalyzeConfig {
        input_csv: csv_path,
    })
    .unwrap();
    assert_eq!(layout.items.len(), 3);
    assert_eq!(layout.max_total(), 3.0);
}

/// The analyzer reports a CSV without a `Line` column as a data error.
#[test]
fn e2e_analyze_missing_line_column() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("loot.csv");
    fs::write(&path, "Character,Date\nMintaka,x\n").unwrap();

    let err = analyze::run_analysis(&AnalyzeConfig { input_csv: path }).unwrap_err();
    assert!(matches!(err, AnalyzeError::MissingColumn { .. }));
}
