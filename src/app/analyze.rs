// LootSleuth - app/analyze.rs
//
// Analysis run: loads the loot CSV, aggregates item x rarity counts and
// prepares the chart layout. Rendering is left to the caller (viewer window
// or plain-text table).

use crate::core::analysis;
use crate::core::chart::ChartLayout;
use crate::core::export::read_loot_lines;
use crate::core::model::{AggregateTable, Rarity};
use crate::platform::config::AppConfig;
use crate::util::error::AnalyzeError;
use std::fmt::Write as _;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Inputs of one analysis run.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzeConfig {
    /// CSV with a `Line` column, normally the extractor's output.
    pub input_csv: PathBuf,
}

impl Default for AnalyzeConfig {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for AnalyzeConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            input_csv: config.analyze_input_csv.clone(),
        }
    }
}

/// Load `path` and aggregate its `Line` values.
pub fn load_table(path: &Path) -> Result<AggregateTable, AnalyzeError> {
    let file = File::open(path).map_err(|e| AnalyzeError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let lines = read_loot_lines(BufReader::new(file), path)?;
    let table = analysis::aggregate_lines(lines.iter().map(String::as_str));

    tracing::info!(
        path = %path.display(),
        rows = lines.len(),
        items = table.items.len(),
        "Loot CSV aggregated"
    );
    Ok(table)
}

/// Load, aggregate and lay out the chart. An empty CSV is a data error.
pub fn run_analysis(config: &AnalyzeConfig) -> Result<ChartLayout, AnalyzeError> {
    let table = load_table(&config.input_csv)?;
    if table.is_empty() {
        return Err(AnalyzeError::NoData {
            path: config.input_csv.clone(),
        });
    }
    Ok(ChartLayout::from_table(&table))
}

/// Plain-text rendering of the chart data, one row per bar.
pub fn format_layout(layout: &ChartLayout) -> String {
    let name_width = layout
        .items
        .iter()
        .map(|i| i.chars().count())
        .chain(std::iter::once(layout.x_label.len()))
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    let _ = writeln!(out, "{}", layout.title);
    let _ = write!(out, "{:<name_width$}", layout.x_label);
    for rarity in Rarity::all() {
        let _ = write!(out, " {:>10}", rarity.label());
    }
    let _ = writeln!(out, " {:>10}", "Total");

    for (x, item) in layout.items.iter().enumerate() {
        let _ = write!(out, "{item:<name_width$}");
        let mut total = 0.0;
        for series in &layout.series {
            let value = series.values[x];
            total += value;
            let _ = write!(out, " {:>10}", value as usize);
        }
        let _ = writeln!(out, " {:>10}", total as usize);
    }
    out
}
