// LootSleuth - core/matcher.rs
//
// Line-level loot detection: phrase matching, character-name and timestamp
// extraction, and cleaning of the saved item text.
// Core layer: operates on &str only, never touches the filesystem.

use crate::util::constants;
use crate::util::error::ExtractError;
use regex::{Regex, RegexBuilder};
use std::sync::OnceLock;

// =============================================================================
// Phrase matching
// =============================================================================

/// Ordered, case-insensitive set of target phrases.
///
/// Phrases are regular expressions (plain loot messages are valid regexes as
/// they stand). Order matters: the first phrase that matches a line wins and
/// no further phrases are tested, so a line is counted at most once.
#[derive(Debug, Clone)]
pub struct PhraseMatcher {
    patterns: Vec<Regex>,
}

impl PhraseMatcher {
    /// Compile `phrases` in order. Fails on the first invalid pattern.
    pub fn new<S: AsRef<str>>(phrases: &[S]) -> Result<Self, ExtractError> {
        if phrases.is_empty() {
            return Err(ExtractError::NoPhrases);
        }

        let mut patterns = Vec::with_capacity(phrases.len());
        for phrase in phrases {
            let phrase = phrase.as_ref();
            if phrase.len() > constants::MAX_PHRASE_PATTERN_LENGTH {
                return Err(ExtractError::PhraseTooLong {
                    length: phrase.len(),
                    max_length: constants::MAX_PHRASE_PATTERN_LENGTH,
                });
            }
            let regex = RegexBuilder::new(phrase)
                .case_insensitive(true)
                .build()
                .map_err(|e| ExtractError::InvalidPhrase {
                    pattern: phrase.to_string(),
                    source: e,
                })?;
            patterns.push(regex);
        }
        Ok(Self { patterns })
    }

    /// Index of the first phrase (in list order) found anywhere in `line`.
    pub fn first_match(&self, line: &str) -> Option<usize> {
        self.patterns.iter().position(|re| re.is_match(line))
    }

    /// Number of compiled phrases.
    pub fn phrase_count(&self) -> usize {
        self.patterns.len()
    }

    /// Test `line` and, on a match, derive everything the extractor records.
    pub fn match_line(&self, line: &str) -> Option<LineMatch> {
        let phrase_index = self.first_match(line)?;
        Some(LineMatch {
            phrase_index,
            stripped: line.trim().to_string(),
            timestamp: extract_timestamp(line).map(str::to_string),
            cleaned: clean_line(line),
        })
    }
}

/// A matched line, split into the pieces the extractor keeps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineMatch {
    /// Which phrase matched.
    pub phrase_index: usize,
    /// The raw line with surrounding whitespace removed (console output).
    pub stripped: String,
    /// Contents of the first `[...]`; `None` means no CSV row for this line.
    pub timestamp: Option<String>,
    /// Item text for the CSV `Line` column.
    pub cleaned: String,
}

// =============================================================================
// Field extraction
// =============================================================================

fn character_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(constants::CHARACTER_NAME_PATTERN).expect("character-name regex is valid")
    })
}

fn timestamp_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(constants::TIMESTAMP_PATTERN).expect("timestamp regex is valid"))
}

fn trailing_marker_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r".--$").expect("trailing-marker regex is valid"))
}

/// Character name from a log file name, e.g. `eqlog_Mintaka_thj.txt` -> `Mintaka`.
///
/// The token must start with `Mint` (case-sensitive) and sit between an
/// underscore and `_thj`. Returns `None` when the name has no such token.
pub fn character_name(file_name: &str) -> Option<&str> {
    character_regex()
        .captures(file_name)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|name| !name.is_empty())
}

/// Contents of the first bracketed segment, e.g. `Mon Jan 27 01:11:14 2025`.
///
/// An empty first segment (`[]`) counts as no timestamp.
pub fn extract_timestamp(line: &str) -> Option<&str> {
    timestamp_regex()
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|ts| !ts.is_empty())
}

/// Reduce a loot line to its item description.
///
/// One pass: strip whitespace; drop every `[...]` segment; drop the first
/// `--You have looted a `; drop one character plus a trailing `--`; strip
/// whitespace again. Passes repeat until the text stops changing, so
/// applying it to its own output changes nothing.
pub fn clean_line(line: &str) -> String {
    let mut text = clean_pass(line);
    loop {
        // Every pass that changes the text shortens it.
        let next = clean_pass(&text);
        if next == text {
            return text;
        }
        text = next;
    }
}

fn clean_pass(line: &str) -> String {
    let text = line.trim();
    let text = timestamp_regex().replace_all(text, "");
    let text = text.replacen(constants::LOOT_PREFIX, "", 1);
    let text = trailing_marker_regex().replace(&text, "");
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "[Mon Jan 27 01:11:14 2025] SomeGuy --You have looted a Abashi's Rod of Disempowerment.--";

    fn default_matcher() -> PhraseMatcher {
        PhraseMatcher::new(constants::DEFAULT_PHRASES).unwrap()
    }

    #[test]
    fn test_character_name_from_filename() {
        assert_eq!(character_name("eqlog_Mintaka_thj.txt"), Some("Mintaka"));
        assert_eq!(character_name("eqlog_Mint_thj.txt"), None);
        assert_eq!(character_name("eqlog_Velious_thj.txt"), None);
        assert_eq!(character_name("eqlog_mintaka_thj.txt"), None);
        assert_eq!(character_name("Mintaka_thj.txt"), None);
    }

    #[test]
    fn test_character_name_is_searched_not_anchored() {
        assert_eq!(
            character_name("backup_eqlog_Mintyfresh_thj_2025.txt"),
            Some("Mintyfresh")
        );
    }

    #[test]
    fn test_extract_timestamp_takes_first_bracket() {
        assert_eq!(extract_timestamp(SAMPLE), Some("Mon Jan 27 01:11:14 2025"));
        assert_eq!(extract_timestamp("[a] then [b]"), Some("a"));
        assert_eq!(extract_timestamp("no brackets here"), None);
        assert_eq!(extract_timestamp("[] --You have looted a Jaelen's Katana.--"), None);
    }

    #[test]
    fn test_clean_line_end_to_end_sample() {
        assert_eq!(clean_line(SAMPLE), "SomeGuy Abashi's Rod of Disempowerment");
    }

    #[test]
    fn test_clean_line_without_speaker() {
        let line = "[Tue Feb 04 20:00:01 2025] --You have looted a Jaelen's Katana (Legendary).--\r\n";
        assert_eq!(clean_line(line), "Jaelen's Katana (Legendary)");
    }

    #[test]
    fn test_clean_line_removes_every_bracket_segment() {
        assert_eq!(clean_line("[a] Item [b] Name"), "Item  Name");
    }

    #[test]
    fn test_clean_line_prefix_is_case_sensitive() {
        let line = "[t] --YOU HAVE LOOTED A Hobart's War Helmet.--";
        assert_eq!(clean_line(line), "--YOU HAVE LOOTED A Hobart's War Helmet");
    }

    #[test]
    fn test_clean_line_is_idempotent() {
        let lines = [
            SAMPLE,
            "[Mon Jan 27 01:11:14 2025] --You have looted a Prismatic Scale of Fire (Enchanted).--",
            "plain text with no markers",
            "[x] Viik's Pauldrons of Pain!--",
            "[t] --You have looted a Jaelen's Katana.-- --",
            "[t] --You have looted a --You have looted a Jaelen's Katana.--",
        ];
        for line in lines {
            let once = clean_line(line);
            assert_eq!(clean_line(&once), once, "not idempotent for {line:?}");
        }
    }

    #[test]
    fn test_clean_line_repeats_until_stable() {
        assert_eq!(
            clean_line("[t] --You have looted a Jaelen's Katana.-- --"),
            "Jaelen's Katana"
        );
        assert_eq!(
            clean_line("[t] --You have looted a --You have looted a Jaelen's Katana.--"),
            "Jaelen's Katana"
        );
    }

    #[test]
    fn test_phrase_match_is_case_insensitive() {
        let matcher = default_matcher();
        let line = "[t] --you have looted a CAMII'S BRACER OF VIGOR.--";
        assert_eq!(matcher.first_match(line), Some(1));
    }

    #[test]
    fn test_first_phrase_in_list_order_wins() {
        let matcher = PhraseMatcher::new(&["looted a Prismatic", "Prismatic Scale of"]).unwrap();
        let line = "[t] --You have looted a Prismatic Scale of Ice.--";
        assert_eq!(matcher.first_match(line), Some(0));

        let reversed = PhraseMatcher::new(&["Prismatic Scale of", "looted a Prismatic"]).unwrap();
        assert_eq!(reversed.first_match(line), Some(0));
    }

    #[test]
    fn test_match_line_without_timestamp() {
        let matcher = default_matcher();
        let m = matcher
            .match_line("  --You have looted a Jaelen's Katana.--  ")
            .unwrap();
        assert_eq!(m.timestamp, None);
        assert_eq!(m.stripped, "--You have looted a Jaelen's Katana.--");
        assert_eq!(m.cleaned, "Jaelen's Katana");
    }

    #[test]
    fn test_non_loot_line_does_not_match() {
        let matcher = default_matcher();
        assert!(matcher
            .match_line("[Mon Jan 27 01:11:14 2025] You say, 'Hail, Guard'")
            .is_none());
    }

    #[test]
    fn test_invalid_phrase_is_rejected() {
        let err = PhraseMatcher::new(&["ok", "(unclosed"]).unwrap_err();
        assert!(
            matches!(err, ExtractError::InvalidPhrase { ref pattern, .. } if pattern == "(unclosed"),
            "got {err:?}"
        );
    }

    #[test]
    fn test_empty_phrase_list_is_rejected() {
        let phrases: [&str; 0] = [];
        assert!(matches!(
            PhraseMatcher::new(&phrases),
            Err(ExtractError::NoPhrases)
        ));
    }
}
