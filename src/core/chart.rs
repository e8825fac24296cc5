// LootSleuth - core/chart.rs
//
// Backend-independent description of the stacked loot chart.
// The UI layer only draws what this layout says; all ordering, stacking and
// label placement decisions are made (and tested) here.

use crate::core::model::{AggregateTable, Rarity};
use crate::util::constants;

/// One stacked series: the segment heights of a single rarity across all bars.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub rarity: Rarity,
    /// Segment height per bar, indexed like `ChartLayout::items`.
    pub values: Vec<f64>,
    /// Height of the stack below this series' segment, per bar.
    pub bases: Vec<f64>,
}

/// A count label centred inside a non-zero segment.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentLabel {
    pub x: f64,
    pub y: f64,
    pub text: String,
}

/// Complete stacked bar chart: bars at x = 0, 1, 2, ...
#[derive(Debug, Clone, PartialEq)]
pub struct ChartLayout {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// Item names, left to right.
    pub items: Vec<String>,
    /// One series per rarity, bottom of the stack first.
    pub series: Vec<ChartSeries>,
    pub labels: Vec<SegmentLabel>,
    pub bar_width: f64,
}

impl ChartLayout {
    /// Lay out `table` as a stacked bar chart.
    pub fn from_table(table: &AggregateTable) -> Self {
        let bar_count = table.items.len();
        let mut running = vec![0.0_f64; bar_count];
        let mut series = Vec::with_capacity(Rarity::all().len());
        let mut labels = Vec::new();

        for &rarity in Rarity::all() {
            let values: Vec<f64> = table
                .items
                .iter()
                .map(|item| item.count(rarity) as f64)
                .collect();
            let bases = running.clone();

            for (x, (&value, &base)) in values.iter().zip(bases.iter()).enumerate() {
                if value > 0.0 {
                    labels.push(SegmentLabel {
                        x: x as f64,
                        y: base + value / 2.0,
                        text: format!("{}", value as usize),
                    });
                }
            }

            for (total, value) in running.iter_mut().zip(values.iter()) {
                *total += value;
            }
            series.push(ChartSeries {
                rarity,
                values,
                bases,
            });
        }

        Self {
            title: constants::CHART_TITLE.to_string(),
            x_label: constants::CHART_X_LABEL.to_string(),
            y_label: constants::CHART_Y_LABEL.to_string(),
            items: table.items.iter().map(|i| i.item_name.clone()).collect(),
            series,
            labels,
            bar_width: constants::CHART_BAR_WIDTH,
        }
    }

    /// Tallest stack, for sizing the y axis.
    pub fn max_total(&self) -> f64 {
        (0..self.items.len())
            .map(|x| self.series.iter().map(|s| s.values[x]).sum::<f64>())
            .fold(0.0, f64::max)
    }

    /// Item name under tick `x`, if `x` sits on a bar.
    pub fn item_at(&self, x: f64) -> Option<&str> {
        let rounded = x.round();
        if (x - rounded).abs() > 1e-6 || rounded < 0.0 {
            return None;
        }
        self.items.get(rounded as usize).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::analysis::aggregate_lines;

    fn layout(lines: &[&str]) -> ChartLayout {
        ChartLayout::from_table(&aggregate_lines(lines.iter().copied()))
    }

    #[test]
    fn test_series_follow_stacking_order() {
        let chart = layout(&["Axe (Legendary)", "Axe"]);
        let order: Vec<_> = chart.series.iter().map(|s| s.rarity).collect();
        assert_eq!(order, vec![Rarity::Normal, Rarity::Enchanted, Rarity::Legendary]);
    }

    #[test]
    fn test_bars_follow_item_order() {
        let mut lines = vec!["Five"; 5];
        lines.extend(vec!["Three"; 3]);
        lines.extend(vec!["Nine"; 9]);
        let chart = layout(&lines);
        assert_eq!(chart.items, vec!["Nine", "Five", "Three"]);
        assert_eq!(chart.item_at(0.0), Some("Nine"));
        assert_eq!(chart.item_at(2.0), Some("Three"));
        assert_eq!(chart.item_at(0.5), None);
        assert_eq!(chart.item_at(3.0), None);
    }

    #[test]
    fn test_segments_stack_on_each_other() {
        let chart = layout(&["Axe", "Axe", "Axe (Enchanted)", "Axe (Legendary)"]);
        let legendary = &chart.series[Rarity::Legendary.index()];
        assert_eq!(legendary.bases, vec![3.0]);
        assert_eq!(legendary.values, vec![1.0]);
        assert_eq!(chart.max_total(), 4.0);
    }

    #[test]
    fn test_labels_only_for_non_zero_segments_at_centre() {
        let chart = layout(&["Axe", "Axe", "Axe (Legendary)", "Ring (Enchanted)"]);
        // Axe: Normal 2 + Legendary 1, Ring: Enchanted 1 -> three labels.
        assert_eq!(chart.labels.len(), 3);
        assert!(chart.labels.contains(&SegmentLabel {
            x: 0.0,
            y: 1.0,
            text: "2".to_string()
        }));
        assert!(chart.labels.contains(&SegmentLabel {
            x: 0.0,
            y: 2.5,
            text: "1".to_string()
        }));
        assert!(chart.labels.contains(&SegmentLabel {
            x: 1.0,
            y: 0.5,
            text: "1".to_string()
        }));
    }

    #[test]
    fn test_titles() {
        let chart = layout(&["Axe"]);
        assert_eq!(chart.title, "Distribution of Looted Items by Rarity");
        assert_eq!(chart.x_label, "Item Name");
        assert_eq!(chart.y_label, "Number of Loots");
    }
}
