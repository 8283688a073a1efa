//! Per-edit scratch state
//!
//! An `IsomCache` is created for one editing operation on one map and holds
//! everything that is not part of the scenario itself: the changed-area box,
//! the per-position undo map, a handle to the loaded dataset and the subtile
//! PRNG. It must be recreated whenever the tileset or the map dimensions
//! change.

use isomap_core::{BoundingBox, IsomDiamond, IsomRect};
use isomap_tileset::{TilesetData, TilesetId};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// The old and new value of one isom rectangle within an undoable operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IsomRectUndo {
    pub diamond: IsomDiamond,
    pub old_value: IsomRect,
    pub new_value: IsomRect,
}

impl IsomRectUndo {
    /// Opens a record snapshotting the current value; editor flags are
    /// masked out of both captured values.
    pub fn new(diamond: IsomDiamond, old_value: &IsomRect) -> IsomRectUndo {
        IsomRectUndo {
            diamond,
            old_value: old_value.without_editor_flags(),
            new_value: IsomRect::default(),
        }
    }

    pub fn set_new_value(&mut self, new_value: &IsomRect) {
        self.new_value = new_value.without_editor_flags();
    }
}

/// Receives undo records as an edit opens them.
///
/// The engine opens at most one record per rectangle per atomic operation;
/// the record's new value keeps updating in the cache until the operation is
/// finalized.
pub trait IsomUndoSink {
    fn add_isom_undo(&mut self, undo: &IsomRectUndo);
}

/// Discards every record.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoUndo;

impl IsomUndoSink for NoUndo {
    fn add_isom_undo(&mut self, _undo: &IsomRectUndo) {}
}

/// Scratch state for one editing operation.
pub struct IsomCache<'a> {
    pub tileset: TilesetId,
    pub isom_width: usize,
    pub isom_height: usize,
    /// Bounding box of rectangles touched by the current operation. Starts
    /// inverted (left/top past the far corner) so the first expansion snaps
    /// to the touched cell.
    pub changed_area: BoundingBox,
    pub(crate) undo_map: Vec<Option<IsomRectUndo>>,
    pub data: &'a TilesetData,
    rng: SmallRng,
    sink: Box<dyn IsomUndoSink + 'a>,
}

impl<'a> IsomCache<'a> {
    pub fn new(
        tileset: TilesetId,
        tile_width: usize,
        tile_height: usize,
        data: &'a TilesetData,
    ) -> IsomCache<'a> {
        let isom_width = tile_width / 2 + 1;
        let isom_height = tile_height + 1;
        let mut cache = IsomCache {
            tileset,
            isom_width,
            isom_height,
            changed_area: BoundingBox::default(),
            undo_map: vec![None; isom_width * isom_height],
            data,
            rng: SmallRng::seed_from_u64(0),
            sink: Box::new(NoUndo),
        };
        cache.reset_changed_area();
        cache
    }

    /// Reseeds the subtile PRNG; useful for deterministic tile output.
    pub fn with_seed(mut self, seed: u64) -> IsomCache<'a> {
        self.rng = SmallRng::seed_from_u64(seed);
        self
    }

    /// Installs an undo sink replacing the discarding default.
    pub fn with_undo_sink(mut self, sink: impl IsomUndoSink + 'a) -> IsomCache<'a> {
        self.sink = Box::new(sink);
        self
    }

    pub fn reset_changed_area(&mut self) {
        self.changed_area.left = self.isom_width;
        self.changed_area.right = 0;
        self.changed_area.top = self.isom_height;
        self.changed_area.bottom = 0;
    }

    pub fn set_all_changed(&mut self) {
        self.changed_area.left = 0;
        self.changed_area.right = self.isom_width - 1;
        self.changed_area.top = 0;
        self.changed_area.bottom = self.isom_height - 1;
    }

    /// The isom value of a terrain type, or zero for unknown types.
    pub fn terrain_type_isom_value(&self, terrain_type: usize) -> u16 {
        self.data
            .terrain_types
            .get(terrain_type)
            .map(|info| info.isom_value)
            .unwrap_or(0)
    }

    /// Picks a tile within a group: a rare slot 1 time in 20 when the group
    /// has any, otherwise a uniform common slot, otherwise subtile zero.
    pub fn random_subtile(&mut self, tile_group: u16) -> u16 {
        if let Some(group) = self.data.tile_groups.get(usize::from(tile_group)) {
            let mut total_common = 0usize;
            while total_common < 16 && group.mega_tile_index[total_common] != 0 {
                total_common += 1;
            }
            let mut total_rare = 0usize;
            while total_common + total_rare + 1 < 16
                && group.mega_tile_index[total_common + total_rare + 1] != 0
            {
                total_rare += 1;
            }

            if total_rare != 0 && self.rng.gen_ratio(1, 20) {
                return 16 * tile_group
                    + (total_common + 1 + self.rng.gen_range(0..total_rare)) as u16;
            } else if total_common != 0 {
                return 16 * tile_group + self.rng.gen_range(0..total_common) as u16;
            }
        }
        16 * tile_group
    }

    pub(crate) fn push_undo(&mut self, undo: &IsomRectUndo) {
        self.sink.add_isom_undo(undo);
    }

    /// Ends one atomic operation: clears the undo map so later operations
    /// open fresh records for the same positions.
    pub fn finalize_undoable_operation(&mut self) {
        self.undo_map.iter_mut().for_each(|slot| *slot = None);
    }
}
