// LootSleuth - app/mod.rs
//
// Application layer: orchestrates one extraction or analysis run.
// Dependencies: core layer, platform (filesystem, config).
// Must NOT depend on: ui.

pub mod analyze;
pub mod extract;
