// LootSleuth - core/analysis.rs
//
// Splits loot lines into item name + rarity and aggregates them into the
// item x rarity table that drives the chart.
// Core layer: pure functions over strings, no I/O.

use crate::core::model::{AggregateTable, ItemCounts, LootEntry, Rarity};
use regex::Regex;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Trailing ` (…)` segment, e.g. `Sword of Fire (Legendary)`.
fn suffix_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?P<item>.*?)\s+\((?P<label>[^()]*)\)\s*$")
            .expect("suffix regex is valid")
    })
}

/// Split a CSV `Line` value into item name and rarity.
///
/// A trailing parenthesised segment is always removed from the name. Its
/// text selects the rarity; no segment, or one that names no rarity (e.g.
/// `(Tattered)`), means `Normal`.
pub fn parse_loot_entry(line: &str) -> LootEntry {
    match suffix_regex().captures(line) {
        Some(caps) => LootEntry {
            item_name: caps["item"].trim().to_string(),
            rarity: Rarity::from_label(&caps["label"]).unwrap_or_default(),
        },
        None => LootEntry {
            item_name: line.trim().to_string(),
            rarity: Rarity::Normal,
        },
    }
}

/// Chart ordering of items: larger total first.
///
/// `a` and `b` are `(total, first_seen)` pairs; ties fall back to the order
/// in which the items first appeared in the CSV, so output is deterministic.
pub fn item_order(a: (usize, usize), b: (usize, usize)) -> Ordering {
    b.0.cmp(&a.0).then(a.1.cmp(&b.1))
}

/// Aggregate loot entries into a table sorted by `item_order`.
///
/// Every item gets a count for every rarity (zero where absent), and each
/// item's counts sum to its number of occurrences in `entries`.
pub fn aggregate<I>(entries: I) -> AggregateTable
where
    I: IntoIterator<Item = LootEntry>,
{
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut items: Vec<ItemCounts> = Vec::new();

    for entry in entries {
        let idx = match index.get(&entry.item_name) {
            Some(&idx) => idx,
            None => {
                items.push(ItemCounts::new(entry.item_name.clone()));
                index.insert(entry.item_name, items.len() - 1);
                items.len() - 1
            }
        };
        items[idx].counts[entry.rarity.index()] += 1;
    }

    // `items` is in first-seen order, so the position is the tie-breaker.
    let mut ranked: Vec<(usize, ItemCounts)> = items.into_iter().enumerate().collect();
    ranked.sort_by(|(ia, a), (ib, b)| item_order((a.total(), *ia), (b.total(), *ib)));

    AggregateTable {
        items: ranked.into_iter().map(|(_, item)| item).collect(),
    }
}

/// Convenience: parse and aggregate raw `Line` values in one step.
pub fn aggregate_lines<'a, I>(lines: I) -> AggregateTable
where
    I: IntoIterator<Item = &'a str>,
{
    aggregate(lines.into_iter().map(parse_loot_entry))
}
