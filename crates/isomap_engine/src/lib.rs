//! Isometric terrain editing engine
//!
//! This crate drives edits over a scenario map's isom grid:
//! - `ScenarioMap` - tiles, authoring tiles and the isom rectangle grid
//! - `IsomCache` - per-operation scratch state bound to a loaded dataset
//! - `place_isom_terrain` / `copy_isom_from` / `resize_isom` /
//!   `update_tiles_from_isom` - the editing primitives
//! - `IsomUndoSink` - injected receiver for undo records
//!
//! A typical edit creates a cache for the map's tileset and dimensions,
//! mutates the isom grid, then projects the changed area onto tiles:
//!
//! ```rust,ignore
//! let mut cache = IsomCache::new(map.tileset, width, height, &dataset);
//! map.place_isom_terrain(diamond, terrain_type, brush, &mut cache);
//! map.update_tiles_from_isom(&mut cache);
//! cache.finalize_undoable_operation();
//! ```

pub mod cache;
pub mod map;
mod propagate;
mod project;
mod resize;
pub mod testing;

pub use cache::{IsomCache, IsomRectUndo, IsomUndoSink, NoUndo};
pub use map::{MapError, ScenarioMap};
