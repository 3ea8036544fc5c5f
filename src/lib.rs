//! Script Engine — traversal, search and navigation over theatrical scripts.
//!
//! Projects a hierarchical script (scenes of dialogue and stage directions)
//! into linear, filterable, navigable sequences that back a reading view
//! with search, a per-character rehearsal view, and a full-screen
//! projection view.

pub mod config;
pub mod core;
pub mod schema;
pub mod stage;
