// LootSleuth - app/extract.rs
//
// Extraction run: walks the log directory, matches loot lines per file and
// writes the `Character,Date,Line` CSV.
//
// Error model:
//   - Setup problems (missing directory, bad phrase, output CSV cannot be
//     created) abort the run with `ExtractError` before any file is read.
//   - Per-file problems (no character name, bad encoding, read failure) are
//     non-fatal: the file is recorded in `ExtractReport::skipped`, reported
//     to the caller's skip callback at once, and the run continues.

use crate::core::export::MatchCsvWriter;
use crate::core::matcher::{self, PhraseMatcher};
use crate::core::model::{ExtractReport, FileSummary, MatchRecord, SkipReason, SkippedFile};
use crate::platform::config::AppConfig;
use crate::platform::fs::{self, TextRead};
use crate::util::error::ExtractError;
use std::fmt::Write as _;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Inputs of one extraction run.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractConfig {
    /// Directory whose files (depth 1 only) are scanned.
    pub log_dir: PathBuf,
    /// CSV to create, overwriting any previous run.
    pub output_csv: PathBuf,
    /// Target phrases, tested in order against every line.
    pub phrases: Vec<String>,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for ExtractConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            log_dir: config.log_dir.clone(),
            output_csv: config.output_csv.clone(),
            phrases: config.phrases.clone(),
        }
    }
}

/// Run the extractor end to end.
pub fn run_extraction(config: &ExtractConfig) -> Result<ExtractReport, ExtractError> {
    run_extraction_with(config, |_| {})
}

/// Run the extractor, calling `on_skip` as each file is passed over.
///
/// Skips already reported through `on_skip` stay reported even when the run
/// later fails writing the CSV.
pub fn run_extraction_with<F>(
    config: &ExtractConfig,
    mut on_skip: F,
) -> Result<ExtractReport, ExtractError>
where
    F: FnMut(&SkippedFile),
{
    check_log_dir(&config.log_dir)?;
    let matcher = PhraseMatcher::new(&config.phrases)?;

    let output = fs::create_output(&config.output_csv).map_err(|e| ExtractError::OutputCreate {
        path: config.output_csv.clone(),
        source: e,
    })?;
    extract_into(config, &matcher, output, &mut on_skip)
}

fn extract_into<W, F>(
    config: &ExtractConfig,
    matcher: &PhraseMatcher,
    output: W,
    on_skip: &mut F,
) -> Result<ExtractReport, ExtractError>
where
    W: Write,
    F: FnMut(&SkippedFile),
{
    let started = Instant::now();
    let mut csv = MatchCsvWriter::new(output, &config.output_csv)?;

    tracing::info!(
        dir = %config.log_dir.display(),
        output = %config.output_csv.display(),
        phrases = matcher.phrase_count(),
        "Extraction started"
    );

    let mut report = ExtractReport {
        output_csv: config.output_csv.clone(),
        ..ExtractReport::default()
    };

    for path in fs::list_files(&config.log_dir) {
        let file_name = display_name(&path);

        let Some(character) = matcher::character_name(&file_name) else {
            skip(&mut report, on_skip, file_name, SkipReason::NoCharacterName);
            continue;
        };

        let text = match fs::read_text_strict(&path) {
            Ok(TextRead::Text(text)) => text,
            Ok(TextRead::InvalidEncoding) => {
                skip(&mut report, on_skip, file_name, SkipReason::InvalidEncoding);
                continue;
            }
            Err(e) => {
                skip(&mut report, on_skip, file_name, SkipReason::Unreadable(e.to_string()));
                continue;
            }
        };

        let (summary, records) = scan_text(matcher, character, &file_name, &text);
        for record in &records {
            csv.write(record)?;
        }
        tracing::debug!(
            file = %file_name,
            character,
            matches = summary.count,
            rows = records.len(),
            "File scanned"
        );
        report.add_file(character, summary);
    }

    report.rows_written = csv.finish()?;

    tracing::info!(
        matches = report.total_count,
        rows = report.rows_written,
        unwritten = report.unwritten_count(),
        skipped = report.skipped.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Extraction complete"
    );
    Ok(report)
}

/// Match every line of one file's text.
///
/// Returns the file's summary (every matched line counts) and the CSV
/// records (only matched lines with a bracketed timestamp).
pub fn scan_text(
    matcher: &PhraseMatcher,
    character: &str,
    file_name: &str,
    text: &str,
) -> (FileSummary, Vec<MatchRecord>) {
    let mut summary = FileSummary {
        file_name: file_name.to_string(),
        count: 0,
        lines: Vec::new(),
    };
    let mut records = Vec::new();

    for line in log_lines(text) {
        let Some(m) = matcher.match_line(line) else {
            continue;
        };
        summary.count += 1;
        summary.lines.push(m.stripped);
        if let Some(date) = m.timestamp {
            records.push(MatchRecord {
                character: character.to_string(),
                date,
                line: m.cleaned,
            });
        }
    }
    (summary, records)
}

/// Split file text into lines on `\n`, `\r\n` or a lone `\r`.
pub fn log_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines().flat_map(|line| {
        let line = line.strip_suffix('\r').unwrap_or(line);
        line.split('\r')
    })
}

/// Render the grouped console summary for a finished run.
///
/// Skip warnings are not included; they go out through the skip callback of
/// `run_extraction_with` while the run is in progress.
pub fn format_summary(report: &ExtractReport) -> String {
    let mut out = String::new();

    if report.is_empty() {
        let _ = writeln!(out, "No files found with matching lines, or folder not found.");
    } else {
        for character in &report.characters {
            let _ = writeln!(
                out,
                "Character: {} (Total: {})",
                character.name, character.total_count
            );
            for file in &character.files {
                let _ = writeln!(out, "  File: {}, Count: {}", file.file_name, file.count);
                for line in &file.lines {
                    let _ = writeln!(out, "    Matched Line: {line}");
                }
            }
        }
        let _ = writeln!(out, "\nTotal count across all files: {}", report.total_count);
    }

    let _ = writeln!(
        out,
        "Matched lines written to {}",
        report.output_csv.display()
    );
    out
}

fn check_log_dir(dir: &Path) -> Result<(), ExtractError> {
    match std::fs::metadata(dir) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(ExtractError::NotADirectory {
            path: dir.to_path_buf(),
        }),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(ExtractError::DirectoryNotFound {
                path: dir.to_path_buf(),
            })
        }
        Err(e) => Err(ExtractError::Io {
            path: dir.to_path_buf(),
            source: e,
        }),
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn skip<F: FnMut(&SkippedFile)>(
    report: &mut ExtractReport,
    on_skip: &mut F,
    file_name: String,
    reason: SkipReason,
) {
    let skipped = SkippedFile { file_name, reason };
    tracing::warn!(file = %skipped.file_name, reason = ?skipped.reason, "Skipping file");
    on_skip(&skipped);
    report.skipped.push(skipped);
}
