// LootSleuth - ui/mod.rs
//
// UI layer: presentation only.
// Dependencies: core (read-only models), egui, egui_plot.
// Must NOT depend on: app, platform, direct I/O.

pub mod chart;
pub mod theme;
