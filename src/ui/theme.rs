// LootSleuth - ui/theme.rs
//
// Colour scheme, rarity colour mapping, and layout constants.
// No dependencies on app state or business logic.

use crate::core::model::Rarity;
use egui::Color32;

/// Fill colour for a rarity's chart segments.
pub fn rarity_colour(rarity: Rarity) -> Color32 {
    match rarity {
        Rarity::Normal => Color32::from_rgb(31, 119, 180),    // Tableau blue
        Rarity::Enchanted => Color32::from_rgb(255, 127, 14), // Tableau orange
        Rarity::Legendary => Color32::from_rgb(44, 160, 44),  // Tableau green
    }
}

/// Segment count labels: dark on the mid-tone fills in either theme.
pub const SEGMENT_LABEL_COLOUR: Color32 = Color32::from_rgb(17, 24, 39); // Gray 900

/// Layout constants.
pub const TICK_LABEL_FONT_SIZE: f32 = 12.0;
pub const SEGMENT_LABEL_FONT_SIZE: f32 = 13.0;
pub const AXIS_LABEL_FONT_SIZE: f32 = 14.0;
pub const MIN_PLOT_HEIGHT: f32 = 200.0;
/// Largest share of the panel height the rotated tick labels may take.
pub const MAX_TICK_BAND_FRACTION: f32 = 0.4;
pub const TICK_LABEL_GAP: f32 = 4.0;
