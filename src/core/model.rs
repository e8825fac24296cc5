// LootSleuth - core/model.rs
//
// Core data model types. Pure data definitions with no I/O, no UI,
// no platform dependencies.
//
// These types are the shared vocabulary across all layers.

use serde::Serialize;
use std::path::PathBuf;

// =============================================================================
// Extraction records
// =============================================================================

/// One CSV row: a loot line attributed to a character at a timestamp.
///
/// Only created for matched lines that carry a bracketed timestamp, and only
/// for files whose name yielded a non-empty character name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchRecord {
    #[serde(rename = "Character")]
    pub character: String,

    /// Raw text inside the first `[...]` of the line, e.g.
    /// `Mon Jan 27 01:11:14 2025`. Kept verbatim, never reparsed.
    #[serde(rename = "Date")]
    pub date: String,

    /// Cleaned item description.
    #[serde(rename = "Line")]
    pub line: String,
}

/// Matches found in a single log file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSummary {
    /// File name only (no directory component).
    pub file_name: String,

    /// Number of lines that matched a phrase, with or without a timestamp.
    pub count: usize,

    /// Matched lines, whitespace-stripped but otherwise uncleaned.
    pub lines: Vec<String>,
}

/// All matching files that belong to one character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterSummary {
    pub name: String,
    pub total_count: usize,
    /// Files in the order they were scanned.
    pub files: Vec<FileSummary>,
}

/// Why a file in the log directory contributed nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The file name has no `_Mint..._thj` token.
    NoCharacterName,
    /// The file is not valid UTF-8.
    InvalidEncoding,
    /// Any other read failure.
    Unreadable(String),
}

/// A file the extractor passed over, with the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    pub file_name: String,
    pub reason: SkipReason,
}

impl SkippedFile {
    /// Human-readable console warning, printed as the file is skipped.
    pub fn warning(&self) -> String {
        match &self.reason {
            SkipReason::NoCharacterName => format!(
                "Warning: Could not extract character name (starting with 'Mint') \
                 from filename '{}'. Skipping.",
                self.file_name
            ),
            SkipReason::InvalidEncoding => {
                format!("Warning: Could not decode file '{}'. Skipping.", self.file_name)
            }
            SkipReason::Unreadable(reason) => {
                format!("Error reading file '{}': {reason}. Skipping.", self.file_name)
            }
        }
    }
}

/// Outcome of one extraction run.
///
/// `total_count` and `rows_written` are deliberately independent: a matched
/// line without a bracketed timestamp is counted but never written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractReport {
    /// Characters in order of their first matching file.
    pub characters: Vec<CharacterSummary>,
    /// Matched lines across all files.
    pub total_count: usize,
    /// Data rows written to the CSV (header excluded).
    pub rows_written: usize,
    /// Files skipped, in scan order.
    pub skipped: Vec<SkippedFile>,
    /// Path of the CSV that was written.
    pub output_csv: PathBuf,
}

impl ExtractReport {
    /// Attach a file's matches to its character, creating the character
    /// entry on first sight. Files with no matches are ignored.
    pub fn add_file(&mut self, character: &str, file: FileSummary) {
        if file.count == 0 {
            return;
        }
        self.total_count += file.count;

        let idx = match self.characters.iter().position(|c| c.name == character) {
            Some(idx) => idx,
            None => {
                self.characters.push(CharacterSummary {
                    name: character.to_string(),
                    total_count: 0,
                    files: Vec::new(),
                });
                self.characters.len() - 1
            }
        };

        let summary = &mut self.characters[idx];
        summary.total_count += file.count;
        summary.files.push(file);
    }

    /// True when no file produced a single match.
    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    /// Matched lines that were counted but had no timestamp to write.
    pub fn unwritten_count(&self) -> usize {
        self.total_count.saturating_sub(self.rows_written)
    }
}

// =============================================================================
// Rarity
// =============================================================================

/// Item rarity tier, ordered by stacking position in the chart.
///
/// The derived `Ord` IS the stacking order: `Normal` at the bottom,
/// `Legendary` on top. It says nothing about frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Rarity {
    #[default]
    Normal,
    Enchanted,
    Legendary,
}

impl Rarity {
    /// All variants in stacking order (bottom first).
    pub fn all() -> &'static [Rarity] {
        &[Rarity::Normal, Rarity::Enchanted, Rarity::Legendary]
    }

    /// Human-readable label, as it appears in the `(...)` suffix.
    pub fn label(&self) -> &'static str {
        match self {
            Rarity::Normal => "Normal",
            Rarity::Enchanted => "Enchanted",
            Rarity::Legendary => "Legendary",
        }
    }

    /// Position in `all()`, used to index per-rarity count arrays.
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Parse a suffix label (case-insensitive, surrounding whitespace ignored).
    pub fn from_label(label: &str) -> Option<Rarity> {
        let label = label.trim();
        Rarity::all()
            .iter()
            .copied()
            .find(|r| r.label().eq_ignore_ascii_case(label))
    }
}

impl std::fmt::Display for Rarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Analysis
// =============================================================================

/// A CSV `Line` value split into item and rarity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LootEntry {
    pub item_name: String,
    pub rarity: Rarity,
}

/// Per-rarity loot counts for one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemCounts {
    pub item_name: String,
    /// Indexed by `Rarity::index()`.
    pub counts: [usize; 3],
}

impl ItemCounts {
    pub fn new(item_name: impl Into<String>) -> Self {
        Self {
            item_name: item_name.into(),
            counts: [0; 3],
        }
    }

    pub fn count(&self, rarity: Rarity) -> usize {
        self.counts[rarity.index()]
    }

    /// Occurrences of this item across all rarities.
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

/// Item x rarity count table, rows already in chart order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregateTable {
    pub items: Vec<ItemCounts>,
}

impl AggregateTable {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of every count in the table (= number of loot rows aggregated).
    pub fn total(&self) -> usize {
        self.items.iter().map(ItemCounts::total).sum()
    }

    pub fn get(&self, item_name: &str) -> Option<&ItemCounts> {
        self.items.iter().find(|i| i.item_name == item_name)
    }

    /// Item names in chart order.
    pub fn item_names(&self) -> Vec<&str> {
        self.items.iter().map(|i| i.item_name.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str, count: usize) -> FileSummary {
        FileSummary {
            file_name: name.to_string(),
            count,
            lines: vec!["x".to_string(); count],
        }
    }

    #[test]
    fn test_add_file_groups_by_character_in_first_seen_order() {
        let mut report = ExtractReport::default();
        report.add_file("Mintaka", file("eqlog_Mintaka_thj.txt", 2));
        report.add_file("Mintbar", file("eqlog_Mintbar_thj.txt", 1));
        report.add_file("Mintaka", file("eqlog_Mintaka_thj.bak.txt", 3));

        assert_eq!(report.total_count, 6);
        let names: Vec<_> = report.characters.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Mintaka", "Mintbar"]);
        assert_eq!(report.characters[0].total_count, 5);
        assert_eq!(report.characters[0].files.len(), 2);
    }

    #[test]
    fn test_add_file_ignores_files_without_matches() {
        let mut report = ExtractReport::default();
        report.add_file("Mintaka", file("eqlog_Mintaka_thj.txt", 0));
        assert!(report.is_empty());
        assert_eq!(report.total_count, 0);
    }

    #[test]
    fn test_rarity_stacking_order() {
        let mut rarities = vec![Rarity::Legendary, Rarity::Normal, Rarity::Enchanted];
        rarities.sort();
        assert_eq!(rarities, Rarity::all());
        assert_eq!(Rarity::Legendary.index(), 2);
    }

    #[test]
    fn test_rarity_from_label() {
        assert_eq!(Rarity::from_label("Legendary"), Some(Rarity::Legendary));
        assert_eq!(Rarity::from_label(" enchanted "), Some(Rarity::Enchanted));
        assert_eq!(Rarity::from_label("Tattered"), None);
    }

    #[test]
    fn test_skip_warning_names_file() {
        let skipped = SkippedFile {
            file_name: "notes.txt".to_string(),
            reason: SkipReason::NoCharacterName,
        };
        assert!(skipped.warning().contains("'notes.txt'"));
        assert!(skipped.warning().starts_with("Warning:"));
    }
}
