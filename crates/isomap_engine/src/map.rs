//! The scenario map and its editing primitives
//!
//! The map owns the game-visible tiles, the authoring tile copy and the isom
//! rectangle grid. Editing goes through an [`IsomCache`] so one operation's
//! scratch state (changed area, undo records, PRNG) stays separate from the
//! scenario.

use crate::cache::{IsomCache, IsomRectUndo};
use isomap_core::{
    BoundingBox, IsomDiamond, IsomRect, ProjectedQuadrant, Quadrant, RectPoint, NEIGHBORS,
};
use isomap_tileset::TilesetId;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use thiserror::Error;

/// Errors raised by direct grid accessors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MapError {
    #[error("isom rect index {index} is past the end of the {len}-entry grid")]
    OutOfRange { index: usize, len: usize },
}

/// A width x height tile scenario with its isom grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioMap {
    pub tile_width: u16,
    pub tile_height: u16,
    pub tileset: TilesetId,
    /// Game-visible tiles.
    pub tiles: Vec<u16>,
    /// Authoring copy of the tiles.
    pub editor_tiles: Vec<u16>,
    /// Row-major `(tile_width / 2 + 1) x (tile_height + 1)` grid.
    pub isom_rects: Vec<IsomRect>,
}

impl ScenarioMap {
    /// An empty map of the given tile dimensions.
    pub fn new(tileset: TilesetId, tile_width: u16, tile_height: u16) -> ScenarioMap {
        let tile_count = usize::from(tile_width) * usize::from(tile_height);
        let isom_count =
            (usize::from(tile_width) / 2 + 1) * (usize::from(tile_height) + 1);
        ScenarioMap {
            tile_width,
            tile_height,
            tileset,
            tiles: vec![0; tile_count],
            editor_tiles: vec![0; tile_count],
            isom_rects: vec![IsomRect::default(); isom_count],
        }
    }

    /// A map uniformly filled with one terrain type, already projected to
    /// tiles.
    pub fn new_map(
        tileset: TilesetId,
        tile_width: u16,
        tile_height: u16,
        terrain_type: usize,
        cache: &mut IsomCache,
    ) -> ScenarioMap {
        let mut map = ScenarioMap::new(tileset, tile_width, tile_height);
        let isom_value = (cache.terrain_type_isom_value(terrain_type) << 4) | IsomRect::MODIFIED;
        map.isom_rects = vec![IsomRect::uniform(isom_value); map.isom_width() * map.isom_height()];
        cache.set_all_changed();
        map.update_tiles_from_isom(cache);
        map
    }

    #[inline]
    pub fn isom_width(&self) -> usize {
        usize::from(self.tile_width) / 2 + 1
    }

    #[inline]
    pub fn isom_height(&self) -> usize {
        usize::from(self.tile_height) + 1
    }

    /// Direct rectangle access by flat index.
    pub fn isom_rect(&self, index: usize) -> Result<&IsomRect, MapError> {
        self.isom_rects.get(index).ok_or(MapError::OutOfRange {
            index,
            len: self.isom_rects.len(),
        })
    }

    #[inline]
    pub(crate) fn is_in_bounds(&self, point: RectPoint) -> bool {
        point.x < self.isom_width() && point.y < self.isom_height()
    }

    #[inline]
    pub(crate) fn isom_rect_at(&self, point: RectPoint) -> &IsomRect {
        &self.isom_rects[point.y * self.isom_width() + point.x]
    }

    #[inline]
    pub(crate) fn isom_rect_mut(&mut self, point: RectPoint) -> &mut IsomRect {
        let width = self.isom_width();
        &mut self.isom_rects[point.y * width + point.x]
    }

    /// The link-table row stored in the top-left quadrant at this coordinate.
    #[inline]
    pub(crate) fn central_isom_value(&self, point: RectPoint) -> u16 {
        self.isom_rect_at(point).left >> 4
    }

    #[inline]
    pub(crate) fn central_isom_value_modified(&self, point: RectPoint) -> bool {
        self.isom_rect_at(point).is_left_modified()
    }

    #[inline]
    pub(crate) fn tile_value(&self, tile_x: usize, tile_y: usize) -> u16 {
        self.editor_tiles[tile_y * usize::from(self.tile_width) + tile_x]
    }

    pub(crate) fn set_tile_value(&mut self, tile_x: usize, tile_y: usize, tile_value: u16) {
        let index = tile_y * usize::from(self.tile_width) + tile_x;
        self.editor_tiles[index] = tile_value;
        self.tiles[index] = tile_value;
    }

    /// A diamond participates in radial updates while it is in bounds, its
    /// central value is unmodified and non-zero.
    pub(crate) fn diamond_needs_update(&self, diamond: IsomDiamond) -> bool {
        self.is_in_bounds(diamond.into())
            && !self.central_isom_value_modified(diamond.into())
            && self.central_isom_value(diamond.into()) != 0
    }

    /// Opens an undo record for this position unless one exists already.
    pub(crate) fn open_undo(&self, point: RectPoint, cache: &mut IsomCache) {
        let index = point.y * cache.isom_width + point.x;
        if cache.undo_map[index].is_none() {
            let undo = IsomRectUndo::new(
                IsomDiamond::new(point.x, point.y),
                self.isom_rect_at(point),
            );
            cache.undo_map[index] = Some(undo);
            cache.push_undo(&undo);
        }
    }

    /// Writes one quadrant's row into the rectangle at `point`, stamps it
    /// modified, grows the changed area and keeps any open undo record's new
    /// value current.
    pub(crate) fn set_isom_value(
        &mut self,
        point: RectPoint,
        quadrant: Quadrant,
        isom_value: u16,
        undoable: bool,
        cache: &mut IsomCache,
    ) {
        if !self.is_in_bounds(point) {
            return;
        }

        let index = point.y * cache.isom_width + point.x;
        let mut update_undo = false;
        if undoable && index < cache.undo_map.len() {
            self.open_undo(point, cache);
            update_undo = cache.undo_map[index].is_some();
        }

        let projected = ProjectedQuadrant::of(quadrant);
        let rect = self.isom_rect_mut(point);
        rect.set_quadrant(projected, isom_value);
        rect.set_modified(projected);
        let rect = *rect;
        cache.changed_area.expand_to_include(point.x, point.y);

        if update_undo {
            if let Some(undo) = &mut cache.undo_map[index] {
                undo.set_new_value(&rect);
            }
        }
    }

    /// Writes the same row into all four quadrants of a diamond.
    pub(crate) fn set_diamond_isom_values(
        &mut self,
        diamond: IsomDiamond,
        isom_value: u16,
        undoable: bool,
        cache: &mut IsomCache,
    ) {
        for quadrant in isomap_core::QUADRANTS {
            self.set_isom_value(
                diamond.rect_coords(quadrant),
                quadrant,
                isom_value,
                undoable,
                cache,
            );
        }
    }

    /// Paints a terrain brush centered on a diamond and repropagates the
    /// surroundings. Returns `false` for an invalid diamond or a terrain
    /// type without a usable link-table row.
    pub fn place_isom_terrain(
        &mut self,
        diamond: IsomDiamond,
        terrain_type: usize,
        brush_extent: usize,
        cache: &mut IsomCache,
    ) -> bool {
        let isom_value = cache.terrain_type_isom_value(terrain_type);
        if isom_value == 0
            || !diamond.is_valid()
            || usize::from(isom_value) >= cache.data.isom_links.len()
            || cache.data.isom_links[usize::from(isom_value)].terrain_type == 0
        {
            return false;
        }

        let mut brush_min = brush_extent as i32 / -2;
        let mut brush_max = brush_min + brush_extent as i32;
        if brush_extent % 2 == 0 {
            brush_min += 1;
            brush_max += 1;
        }

        cache.reset_changed_area();

        let mut to_update: VecDeque<IsomDiamond> = VecDeque::new();
        for brush_offset_x in brush_min..brush_max {
            for brush_offset_y in brush_min..brush_max {
                let placed = IsomDiamond::new(
                    (diamond.x as i64 + i64::from(brush_offset_x) - i64::from(brush_offset_y))
                        as usize,
                    (diamond.y as i64 + i64::from(brush_offset_x) + i64::from(brush_offset_y))
                        as usize,
                );
                if !self.is_in_bounds(placed.into()) {
                    continue;
                }

                self.set_diamond_isom_values(placed, isom_value, true, cache);

                // Diamonds on the brush edge queue their neighbors for
                // radial updates.
                if brush_offset_x == brush_min
                    || brush_offset_x == brush_max - 1
                    || brush_offset_y == brush_min
                    || brush_offset_y == brush_max - 1
                {
                    for direction in NEIGHBORS {
                        let neighbor = placed.neighbor(direction);
                        if self.diamond_needs_update(neighbor) {
                            to_update.push_back(neighbor);
                        }
                    }
                }
            }
        }

        self.radially_update_terrain(true, &mut to_update, cache);
        true
    }

    /// Bulk-copies the overlapping isom span from another map, shifted by a
    /// tile offset, clearing whatever the source cannot cover.
    pub fn copy_isom_from(
        &mut self,
        source: &ScenarioMap,
        x_tile_offset: i32,
        y_tile_offset: i32,
        undoable: bool,
        cache: &mut IsomCache,
    ) {
        let source_isom_width = usize::from(source.tile_width) / 2 + 1;
        let source_isom_height = usize::from(source.tile_height) + 1;

        if undoable {
            for y in 0..cache.isom_height {
                for x in 0..cache.isom_width {
                    self.open_undo(RectPoint { x, y }, cache);
                }
            }
        }

        let diamond_x = x_tile_offset / 2;
        let diamond_y = y_tile_offset;

        let source_rc = BoundingBox::intersect(
            source_isom_width,
            source_isom_height,
            cache.isom_width,
            cache.isom_height,
            diamond_x,
            diamond_y,
        );

        for y in source_rc.top..source_rc.bottom {
            let dest_y = (y as i64 + i64::from(diamond_y)) as usize;
            let dest_x = (source_rc.left as i64 + i64::from(diamond_x)) as usize;
            let source_row = y * source_isom_width + source_rc.left;
            let dest_row = dest_y * cache.isom_width + dest_x;
            let span = source_rc.right - source_rc.left;
            self.isom_rects[dest_row..dest_row + span]
                .copy_from_slice(&source.isom_rects[source_row..source_row + span]);
        }

        if undoable {
            // Clear the strips the source cannot cover when growing: the
            // bottom band below the source frame, then the right band beside
            // it. The non-undoable resize flow pre-seeds these cells with
            // fill terrain instead and must keep them.
            for y in source_isom_height..cache.isom_height {
                for x in 0..cache.isom_width {
                    self.isom_rect_mut(RectPoint { x, y }).clear();
                }
            }
            if source_isom_width < cache.isom_width {
                for y in 0..cache.isom_height {
                    for x in source_isom_width..cache.isom_width {
                        self.isom_rect_mut(RectPoint { x, y }).clear();
                    }
                }
            }

            for y in 0..cache.isom_height {
                for x in 0..cache.isom_width {
                    let rect = *self.isom_rect_at(RectPoint { x, y });
                    if let Some(undo) = &mut cache.undo_map[y * cache.isom_width + x] {
                        undo.set_new_value(&rect);
                    }
                }
            }
        }
    }

    /// Bulk-copies the overlapping tile rectangle from another map, shifted
    /// by a tile offset. Companion to [`ScenarioMap::copy_isom_from`] when
    /// resizing.
    pub fn copy_tiles_from(&mut self, source: &ScenarioMap, x_tile_offset: i32, y_tile_offset: i32) {
        let tile_rect = BoundingBox::intersect(
            usize::from(source.tile_width),
            usize::from(source.tile_height),
            usize::from(self.tile_width),
            usize::from(self.tile_height),
            x_tile_offset,
            y_tile_offset,
        );
        let dest_start_x = if x_tile_offset < 0 { 0 } else { x_tile_offset as usize };
        let dest_start_y = if y_tile_offset < 0 { 0 } else { y_tile_offset as usize };
        let copy_width = tile_rect.right - tile_rect.left;
        let copy_height = tile_rect.bottom - tile_rect.top;

        for y in 0..copy_height {
            for x in 0..copy_width {
                let source_index = (y + tile_rect.top) * usize::from(source.tile_width)
                    + x
                    + tile_rect.left;
                let dest_index =
                    (y + dest_start_y) * usize::from(self.tile_width) + x + dest_start_x;
                self.editor_tiles[dest_index] = source.editor_tiles[source_index];
                self.tiles[dest_index] = source.tiles[source_index];
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::cliff_dataset;

    #[test]
    fn isom_grid_dimensions_follow_tile_dimensions() {
        let map = ScenarioMap::new(TilesetId::Jungle, 128, 96);
        assert_eq!(map.isom_width(), 65);
        assert_eq!(map.isom_height(), 97);
        assert_eq!(map.isom_rects.len(), 65 * 97);
        assert_eq!(map.tiles.len(), 128 * 96);
    }

    #[test]
    fn direct_rect_access_checks_bounds() {
        let map = ScenarioMap::new(TilesetId::Badlands, 8, 8);
        assert!(map.isom_rect(0).is_ok());
        assert_eq!(
            map.isom_rect(10_000),
            Err(MapError::OutOfRange {
                index: 10_000,
                len: 5 * 9,
            })
        );
    }

    #[test]
    fn place_rejects_invalid_inputs() {
        let data = cliff_dataset();
        let mut cache = IsomCache::new(TilesetId::Badlands, 16, 16, &data);
        let mut map = ScenarioMap::new(TilesetId::Badlands, 16, 16);

        // Diamond off parity.
        assert!(!map.place_isom_terrain(IsomDiamond::new(3, 2), 2, 1, &mut cache));
        // Terrain type without an isom value.
        assert!(!map.place_isom_terrain(IsomDiamond::new(4, 4), 0, 1, &mut cache));
        // Terrain type past the descriptor table.
        assert!(!map.place_isom_terrain(IsomDiamond::new(4, 4), 99, 1, &mut cache));
    }

    #[test]
    fn copy_round_trips_at_zero_offset() {
        let data = cliff_dataset();
        let mut cache = IsomCache::new(TilesetId::Badlands, 16, 16, &data);
        let source = ScenarioMap::new_map(TilesetId::Badlands, 16, 16, 2, &mut cache);

        let mut dest = ScenarioMap::new(TilesetId::Badlands, 16, 16);
        let mut dest_cache = IsomCache::new(TilesetId::Badlands, 16, 16, &data);
        dest.copy_isom_from(&source, 0, 0, false, &mut dest_cache);
        assert_eq!(dest.isom_rects, source.isom_rects);
    }

    #[test]
    fn copy_clears_the_grown_strips() {
        let data = cliff_dataset();
        let mut cache = IsomCache::new(TilesetId::Badlands, 8, 8, &data);
        let source = ScenarioMap::new_map(TilesetId::Badlands, 8, 8, 2, &mut cache);

        let mut dest = ScenarioMap::new(TilesetId::Badlands, 16, 16);
        // Poison the destination so cleared cells are observable.
        dest.isom_rects.fill(IsomRect::uniform(0x7FFE));
        let mut dest_cache = IsomCache::new(TilesetId::Badlands, 16, 16, &data);
        dest.copy_isom_from(&source, 0, 0, true, &mut dest_cache);

        let source_w = source.isom_width();
        let source_h = source.isom_height();
        for y in 0..dest.isom_height() {
            for x in 0..dest.isom_width() {
                let rect = *dest.isom_rect_at(RectPoint { x, y });
                if x >= source_w || y >= source_h {
                    assert_eq!(rect, IsomRect::default(), "at {x},{y}");
                } else {
                    assert_eq!(rect, source.isom_rects[y * source_w + x]);
                }
            }
        }
    }

    #[test]
    fn copy_records_undo_old_and_new_values() {
        let data = cliff_dataset();
        let mut cache = IsomCache::new(TilesetId::Badlands, 8, 8, &data);
        let source = ScenarioMap::new_map(TilesetId::Badlands, 8, 8, 2, &mut cache);

        let mut dest_cache = IsomCache::new(TilesetId::Badlands, 8, 8, &data);
        let mut dest = ScenarioMap::new_map(TilesetId::Badlands, 8, 8, 3, &mut dest_cache);
        let before = dest.isom_rects.clone();

        dest.copy_isom_from(&source, 0, 0, true, &mut dest_cache);

        for y in 0..dest.isom_height() {
            for x in 0..dest.isom_width() {
                let index = y * dest.isom_width() + x;
                let undo = dest_cache.undo_map[index].expect("undo opened everywhere");
                assert_eq!(undo.old_value, before[index].without_editor_flags());
                assert_eq!(undo.new_value, dest.isom_rects[index].without_editor_flags());
            }
        }
        dest_cache.finalize_undoable_operation();
        assert!(dest_cache.undo_map.iter().all(Option::is_none));
    }

    #[test]
    fn map_serde_round_trip() {
        let data = cliff_dataset();
        let mut cache = IsomCache::new(TilesetId::Badlands, 8, 8, &data);
        let map = ScenarioMap::new_map(TilesetId::Badlands, 8, 8, 2, &mut cache);
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(serde_json::from_str::<ScenarioMap>(&json).unwrap(), map);
    }

    #[test]
    fn tile_copy_moves_the_overlap() {
        let data = cliff_dataset();
        let mut cache = IsomCache::new(TilesetId::Badlands, 8, 8, &data);
        let mut source = ScenarioMap::new_map(TilesetId::Badlands, 8, 8, 2, &mut cache);
        for (i, tile) in source.editor_tiles.iter_mut().enumerate() {
            *tile = i as u16;
        }
        source.tiles = source.editor_tiles.clone();

        let mut dest = ScenarioMap::new(TilesetId::Badlands, 8, 8);
        dest.copy_tiles_from(&source, 2, 3);
        // Source (0,0) lands at destination (2,3).
        assert_eq!(dest.editor_tiles[3 * 8 + 2], source.editor_tiles[0]);
        // Cells left of the shifted region stay empty.
        assert_eq!(dest.editor_tiles[0], 0);
    }
}
