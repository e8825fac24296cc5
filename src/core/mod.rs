// LootSleuth - core/mod.rs
//
// Core business logic layer.
// Dependencies: util, regex, csv, serde.
// Must NOT depend on: ui, platform, app, or open files itself.

pub mod analysis;
pub mod chart;
pub mod export;
pub mod matcher;
pub mod model;
