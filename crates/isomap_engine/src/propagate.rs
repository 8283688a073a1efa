//! Radial terrain propagation
//!
//! After an edit seeds new link-table rows, the propagator re-solves every
//! reachable diamond outward from the modified area: it snapshots the four
//! neighbors, scores candidate rows by how many neighbor link ids they
//! match, and rewrites the diamond when a better row exists. Each rectangle
//! is visited at most once per operation, so the FIFO drains in one pass
//! over the affected area.

use crate::cache::IsomCache;
use crate::map::ScenarioMap;
use isomap_core::{IsomDiamond, LinkId, Quadrant, ShapeLinks, NEIGHBORS, QUADRANTS};
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, Default)]
struct BestMatch {
    isom_value: u16,
    match_count: u16,
}

#[derive(Debug, Clone, Copy, Default)]
struct NeighborQuadrant {
    link_id: LinkId,
    isom_value: u16,
    modified: bool,
}

/// Snapshot of the four diamonds adjacent to the one being re-solved.
///
/// Entry `i` describes the neighbor overlapping quadrant `i`; its link id is
/// read from the neighbor's opposite quadrant so candidate rows compare
/// across the shared edge.
#[derive(Debug, Clone, Copy, Default)]
struct IsomNeighbors {
    quadrants: [NeighborQuadrant; 4],
    /// Highest terrain type among neighbors whose central value is modified.
    max_modified_of_four: u8,
    best_match: BestMatch,
}

/// Scores one candidate row against the neighbor snapshot.
///
/// Reserved link ids only count when the candidate's terrain type equals the
/// neighbor's. A mismatch against an already-modified neighbor disqualifies
/// the row outright.
fn count_neighbor_matches(
    row: &ShapeLinks,
    neighbors: &IsomNeighbors,
    isom_links: &[ShapeLinks],
) -> u16 {
    let mut total_matches = 0;
    for quadrant in QUADRANTS {
        let neighbor = &neighbors.quadrants[quadrant as usize];
        let neighbor_terrain_type = isom_links
            .get(usize::from(neighbor.isom_value))
            .map(|neighbor_row| neighbor_row.terrain_type)
            .unwrap_or(0);
        let quadrant_link_id = row.link_id(quadrant);

        if neighbor.link_id == quadrant_link_id
            && (!quadrant_link_id.is_same_type_only()
                || row.terrain_type == neighbor_terrain_type)
        {
            total_matches += 1;
        } else if neighbor.modified {
            return 0;
        }
    }
    total_matches
}

/// Scans link-table rows from a terrain type's first row, keeping the best
/// match seen so far.
///
/// Starting from type zero scans to the end of the table; starting from the
/// type just past the solid-brush half scans until a strictly higher type
/// appears; any other start stops at the first row of a different type.
fn search_for_best_match(
    starting_terrain_type: u16,
    neighbors: &mut IsomNeighbors,
    cache: &IsomCache,
) {
    let isom_links = &cache.data.isom_links;
    let search_until_higher_type =
        usize::from(starting_terrain_type) == cache.data.terrain_types.len() / 2 + 1;
    let search_until_end = starting_terrain_type == 0;

    let mut isom_value = cache.terrain_type_isom_value(usize::from(starting_terrain_type));
    while usize::from(isom_value) < isom_links.len() {
        let row = &isom_links[usize::from(isom_value)];
        let terrain_type = u16::from(row.terrain_type);
        if !search_until_end
            && terrain_type != starting_terrain_type
            && (!search_until_higher_type || terrain_type > starting_terrain_type)
        {
            break;
        }

        let match_count = count_neighbor_matches(row, neighbors, isom_links);
        if match_count > neighbors.best_match.match_count {
            neighbors.best_match = BestMatch {
                isom_value,
                match_count,
            };
        }
        isom_value += 1;
    }
}

impl ScenarioMap {
    fn load_neighbor_info(&self, diamond: IsomDiamond, neighbors: &mut IsomNeighbors, cache: &IsomCache) {
        let isom_links = &cache.data.isom_links;
        for (i, direction) in NEIGHBORS.into_iter().enumerate() {
            let neighbor = diamond.neighbor(direction);
            if !self.is_in_bounds(neighbor.into()) {
                continue;
            }

            let isom_value = self.central_isom_value(neighbor.into());
            let quadrant = &mut neighbors.quadrants[i];
            quadrant.modified = self.central_isom_value_modified(neighbor.into());
            quadrant.isom_value = isom_value;
            if let Some(row) = isom_links.get(usize::from(isom_value)) {
                quadrant.link_id = row.link_id(Quadrant::from_index(i).opposite());
                if quadrant.modified && row.terrain_type > neighbors.max_modified_of_four {
                    neighbors.max_modified_of_four = row.terrain_type;
                }
            }
        }
    }

    /// Finds the best-matching row for a diamond, or `None` when the current
    /// row already is the best possible value.
    fn find_best_match_isom_value(&self, diamond: IsomDiamond, cache: &IsomCache) -> Option<u16> {
        let mut neighbors = IsomNeighbors::default();
        self.load_neighbor_info(diamond, &mut neighbors, cache);

        let prev_isom_value = self.central_isom_value(diamond.into());
        if usize::from(prev_isom_value) < cache.data.isom_links.len() {
            let prev_terrain_type =
                cache.data.isom_links[usize::from(prev_isom_value)].terrain_type;
            let mapped_terrain_type = cache
                .data
                .terrain_type_map
                .get(
                    usize::from(neighbors.max_modified_of_four) * cache.data.terrain_types.len()
                        + usize::from(prev_terrain_type),
                )
                .copied()
                .unwrap_or(0);
            search_for_best_match(mapped_terrain_type, &mut neighbors, cache);
        }
        search_for_best_match(u16::from(neighbors.max_modified_of_four), &mut neighbors, cache);
        search_for_best_match((cache.data.terrain_types.len() / 2 + 1) as u16, &mut neighbors, cache);

        if neighbors.best_match.isom_value == prev_isom_value {
            None
        } else {
            Some(neighbors.best_match.isom_value)
        }
    }

    /// Drains the FIFO of diamonds to re-solve, expanding it with neighbors
    /// of every diamond that changed.
    pub(crate) fn radially_update_terrain(
        &mut self,
        undoable: bool,
        to_update: &mut VecDeque<IsomDiamond>,
        cache: &mut IsomCache,
    ) {
        while let Some(diamond) = to_update.pop_front() {
            if !self.diamond_needs_update(diamond) || self.isom_rect_at(diamond.into()).is_visited()
            {
                continue;
            }

            self.isom_rect_mut(diamond.into()).set_visited();
            cache.changed_area.expand_to_include(diamond.x, diamond.y);

            if let Some(best_match) = self.find_best_match_isom_value(diamond, cache) {
                if best_match != 0 {
                    self.set_diamond_isom_values(diamond, best_match, undoable, cache);
                }

                for direction in NEIGHBORS {
                    let neighbor = diamond.neighbor(direction);
                    if self.diamond_needs_update(neighbor) {
                        to_update.push_back(neighbor);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{cliff_dataset, CLIFF_BLOCK_START, HIGH_GROUND, LOW_GROUND};
    use isomap_core::{RectPoint, ShapeId};
    use isomap_tileset::TilesetId;

    fn low_map(data: &isomap_tileset::TilesetData) -> ScenarioMap {
        let mut cache = IsomCache::new(TilesetId::Badlands, 16, 16, data);
        ScenarioMap::new_map(TilesetId::Badlands, 16, 16, LOW_GROUND, &mut cache)
    }

    fn central(map: &ScenarioMap, x: usize, y: usize) -> u16 {
        map.central_isom_value(RectPoint { x, y })
    }

    #[test]
    fn placing_the_same_terrain_changes_nothing() {
        let data = cliff_dataset();
        let mut map = low_map(&data);
        let mut cache = IsomCache::new(TilesetId::Badlands, 16, 16, &data);

        let before = map.isom_rects.clone();
        assert!(map.place_isom_terrain(IsomDiamond::new(8, 8), LOW_GROUND, 1, &mut cache));
        map.update_tiles_from_isom(&mut cache);
        assert_eq!(map.isom_rects, before);
    }

    #[test]
    fn placing_high_ground_grows_an_edge_ring() {
        let data = cliff_dataset();
        let mut map = low_map(&data);
        let mut cache = IsomCache::new(TilesetId::Badlands, 16, 16, &data);

        assert!(map.place_isom_terrain(IsomDiamond::new(8, 8), HIGH_GROUND, 1, &mut cache));

        // The placed diamond carries the solid high-ground row.
        assert_eq!(central(&map, 8, 8), 2);

        // Diagonal neighbors resolve to the four edge shapes.
        let block = CLIFF_BLOCK_START;
        assert_eq!(central(&map, 7, 7), block + ShapeId::EdgeNorthWest as u16);
        assert_eq!(central(&map, 9, 7), block + ShapeId::EdgeNorthEast as u16);
        assert_eq!(central(&map, 9, 9), block + ShapeId::EdgeSouthEast as u16);
        assert_eq!(central(&map, 7, 9), block + ShapeId::EdgeSouthWest as u16);

        // The axis-aligned ring resolves to the four jut-out shapes.
        assert_eq!(central(&map, 8, 6), block + ShapeId::JutOutNorth as u16);
        assert_eq!(central(&map, 10, 8), block + ShapeId::JutOutEast as u16);
        assert_eq!(central(&map, 8, 10), block + ShapeId::JutOutSouth as u16);
        assert_eq!(central(&map, 6, 8), block + ShapeId::JutOutWest as u16);

        // Two diamonds out, low ground already is the best match.
        assert_eq!(central(&map, 6, 6), 1);
        assert_eq!(central(&map, 10, 10), 1);

        // The changed area covers the ring.
        assert!(cache.changed_area.left <= 6 && cache.changed_area.right >= 10);
        assert!(cache.changed_area.top <= 6 && cache.changed_area.bottom >= 10);
    }

    #[test]
    fn propagation_is_deterministic() {
        let data = cliff_dataset();
        let run = || {
            let mut map = low_map(&data);
            let mut cache = IsomCache::new(TilesetId::Badlands, 16, 16, &data).with_seed(11);
            map.place_isom_terrain(IsomDiamond::new(6, 6), HIGH_GROUND, 4, &mut cache);
            map.update_tiles_from_isom(&mut cache);
            cache.finalize_undoable_operation();
            let mut cache = IsomCache::new(TilesetId::Badlands, 16, 16, &data).with_seed(11);
            map.place_isom_terrain(IsomDiamond::new(10, 10), HIGH_GROUND, 1, &mut cache);
            map.update_tiles_from_isom(&mut cache);
            map
        };
        let first = run();
        let second = run();
        assert_eq!(first.isom_rects, second.isom_rects);
        assert_eq!(first.editor_tiles, second.editor_tiles);
    }

    #[test]
    fn propagation_visits_each_rectangle_at_most_once() {
        let data = cliff_dataset();
        let mut map = low_map(&data);
        let mut cache = IsomCache::new(TilesetId::Badlands, 16, 16, &data);

        map.place_isom_terrain(IsomDiamond::new(8, 8), HIGH_GROUND, 6, &mut cache);

        // No visited flag survives outside the changed area, and the update
        // walk clears the rest.
        map.update_tiles_from_isom(&mut cache);
        for rect in &map.isom_rects {
            assert!(!rect.is_visited());
            assert!(!rect.is_left_or_right_modified());
        }
    }

    #[test]
    fn every_diamond_decodes_to_a_single_row_after_an_edit() {
        let data = cliff_dataset();
        let mut map = low_map(&data);
        let mut cache = IsomCache::new(TilesetId::Badlands, 16, 16, &data);
        map.place_isom_terrain(IsomDiamond::new(8, 8), HIGH_GROUND, 2, &mut cache);
        map.update_tiles_from_isom(&mut cache);

        for y in 0..map.isom_height() {
            for x in 0..map.isom_width() {
                let diamond = IsomDiamond::new(x, y);
                if !diamond.is_valid() {
                    continue;
                }
                let mut rows = Vec::new();
                for quadrant in QUADRANTS {
                    let point = diamond.rect_coords(quadrant);
                    if map.is_in_bounds(point) {
                        let projected = isomap_core::ProjectedQuadrant::of(quadrant);
                        let rect = map.isom_rect_at(point);
                        rows.push(rect.isom_value(projected.first_side) >> 4);
                        rows.push(rect.isom_value(projected.second_side) >> 4);
                    }
                }
                assert!(
                    rows.windows(2).all(|pair| pair[0] == pair[1]),
                    "diamond ({x},{y}) decodes to {rows:?}"
                );
            }
        }
    }
}
