//! Map resizing over the isom grid
//!
//! Resizing re-frames the diamond grid around an offset copy of the old
//! map: diamonds straddling the border of the moved region get their
//! outside quadrants rewritten to the prevailing inside row, border
//! neighbors optionally re-propagate, and everything at least partially
//! outside the moved region is left marked for re-projection.

use crate::cache::IsomCache;
use crate::map::ScenarioMap;
use isomap_core::{
    BoundingBox, IsomDiamond, ProjectedQuadrant, RectPoint, NEIGHBORS, QUADRANTS,
};
use std::collections::VecDeque;

#[inline]
fn offset(base: usize, delta: i32) -> usize {
    (base as i64 + i64::from(delta)) as usize
}

impl ScenarioMap {
    /// Re-frames the isom grid after the map was resized from
    /// `old_map_width` x `old_map_height` tiles with the given tile offset.
    ///
    /// The caller has already copied the overlapping isom span (see
    /// [`ScenarioMap::copy_isom_from`]) and seeded the uncovered cells with
    /// fill terrain. `fix_borders` additionally queues in-bounds neighbors
    /// just outside the moved region for radial propagation.
    pub fn resize_isom(
        &mut self,
        x_tile_offset: i32,
        y_tile_offset: i32,
        old_map_width: usize,
        old_map_height: usize,
        fix_borders: bool,
        cache: &mut IsomCache,
    ) -> bool {
        let x_diamond_offset = x_tile_offset / 2;
        let y_diamond_offset = y_tile_offset;
        let old_isom_width = old_map_width / 2 + 1;
        let old_isom_height = old_map_height + 1;

        let source_rc = BoundingBox::intersect(
            old_isom_width,
            old_isom_height,
            cache.isom_width,
            cache.isom_height,
            x_diamond_offset,
            y_diamond_offset,
        );
        let inner = BoundingBox::new(
            offset(source_rc.left, x_diamond_offset),
            offset(source_rc.top, y_diamond_offset),
            offset(source_rc.right, x_diamond_offset).wrapping_sub(1),
            offset(source_rc.bottom, y_diamond_offset).wrapping_sub(1),
        );

        let inside = |point: RectPoint| {
            point.x >= inner.left
                && point.x < inner.right
                && point.y >= inner.top
                && point.y < inner.bottom
        };

        let mut edges: Vec<IsomDiamond> = Vec::new();
        for y in inner.top..=inner.bottom {
            let mut x = inner.left + (inner.left + y) % 2;
            while x <= inner.right {
                if (x + y) % 2 != 0 {
                    x += 2;
                    continue;
                }
                let diamond = IsomDiamond::new(x, y);

                let mut fully_inside = true;
                let mut fully_outside = true;
                let mut isom_value = 0u16;
                for quadrant in QUADRANTS {
                    let rect_coords = diamond.rect_coords(quadrant);
                    if self.is_in_bounds(rect_coords) {
                        if inside(rect_coords) {
                            isom_value = self
                                .isom_rect_at(rect_coords)
                                .isom_value(ProjectedQuadrant::of(quadrant).first_side)
                                >> 4;
                            fully_outside = false;
                        } else {
                            fully_inside = false;
                        }
                    }
                }

                // Diamonds completely outside the moved region keep their
                // fill value.
                if fully_outside {
                    x += 2;
                    continue;
                }

                if !fully_inside {
                    // Rewrite the outside quadrants to the prevailing
                    // inside row and remember the border for propagation.
                    for quadrant in QUADRANTS {
                        let rect_coords = diamond.rect_coords(quadrant);
                        if !inside(rect_coords) {
                            self.set_isom_value(rect_coords, quadrant, isom_value, false, cache);
                        }
                    }

                    if fix_borders {
                        for direction in NEIGHBORS {
                            let neighbor = diamond.neighbor(direction);
                            if self.is_in_bounds(neighbor.into())
                                && (neighbor.x < inner.left
                                    || neighbor.x > inner.right
                                    || neighbor.y < inner.top
                                    || neighbor.y > inner.bottom)
                            {
                                edges.push(neighbor);
                            }
                        }
                    }
                }

                for quadrant in QUADRANTS {
                    let rect_coords = diamond.rect_coords(quadrant);
                    if self.is_in_bounds(rect_coords) {
                        self.isom_rect_mut(rect_coords)
                            .set_modified(ProjectedQuadrant::of(quadrant));
                    }
                }
                x += 2;
            }
        }

        // Propagate from the top-left corner outward: by distance from the
        // corner, then by |x - y|, then by x.
        edges.sort_by(|l, r| {
            let l_distance = l.x + l.y;
            let r_distance = r.x + r.y;
            if l_distance != r_distance {
                return l_distance.cmp(&r_distance);
            }
            let l_distance = l.x.max(l.y) - l.x.min(l.y);
            let r_distance = r.x.max(r.y) - r.x.min(r.y);
            if l_distance != r_distance {
                l_distance.cmp(&r_distance)
            } else {
                l.x.cmp(&r.x)
            }
        });

        let mut to_update: VecDeque<IsomDiamond> = VecDeque::new();
        for edge in &edges {
            if self.diamond_needs_update(*edge) {
                to_update.push_back(*edge);
            }
        }
        self.radially_update_terrain(false, &mut to_update, cache);

        for y in cache.changed_area.top..=cache.changed_area.bottom {
            for x in cache.changed_area.left..=cache.changed_area.right {
                self.isom_rect_mut(RectPoint { x, y }).clear_editor_flags();
            }
        }

        // Re-mark everything at least partially inside the moved region.
        for y in inner.top..=inner.bottom {
            let mut x = inner.left + (inner.left + y) % 2;
            while x <= inner.right {
                if (x + y) % 2 != 0 {
                    x += 2;
                    continue;
                }
                let diamond = IsomDiamond::new(x, y);

                let fully_outside = QUADRANTS.iter().all(|&quadrant| {
                    let rect_coords = diamond.rect_coords(quadrant);
                    !(self.is_in_bounds(rect_coords) && inside(rect_coords))
                });

                if !fully_outside {
                    for quadrant in QUADRANTS {
                        let rect_coords = diamond.rect_coords(quadrant);
                        if self.is_in_bounds(rect_coords) {
                            self.isom_rect_mut(rect_coords)
                                .set_modified(ProjectedQuadrant::of(quadrant));
                        }
                    }
                }
                x += 2;
            }
        }

        cache.set_all_changed();

        // The interior of the moved region does not need re-projection.
        for y in inner.top..inner.bottom {
            for x in inner.left..inner.right {
                self.isom_rect_mut(RectPoint { x, y }).clear_editor_flags();
            }
        }

        for y in 0..cache.isom_height {
            let mut x = y % 2;
            while x < cache.isom_width {
                if (x + y) % 2 != 0 {
                    x += 2;
                    continue;
                }
                let diamond = IsomDiamond::new(x, y);

                let mut fully_inside = true;
                for quadrant in QUADRANTS {
                    let rect_coords = diamond.rect_coords(quadrant);
                    // The final comparison is `< inner.bottom`, which
                    // classifies nearly every diamond as outside and
                    // re-marks it for projection.
                    if self.is_in_bounds(rect_coords)
                        && (rect_coords.x < inner.left
                            || rect_coords.x >= inner.right
                            || rect_coords.y < inner.top
                            || rect_coords.y < inner.bottom)
                    {
                        fully_inside = false;
                        break;
                    }
                }

                if !fully_inside {
                    for quadrant in QUADRANTS {
                        let rect_coords = diamond.rect_coords(quadrant);
                        if self.is_in_bounds(rect_coords) {
                            self.isom_rect_mut(rect_coords)
                                .set_modified(ProjectedQuadrant::of(quadrant));
                        }
                    }
                }
                x += 2;
            }
        }

        true
    }
}
