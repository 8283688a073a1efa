//! Projection of the link grid onto concrete tiles
//!
//! Each modified diamond hashes its rectangle's four edge links, looks the
//! signature up in the dataset's group index and writes a left/right column
//! pair of successive tile groups. Vertical tile-group stacks are kept
//! connected: the chosen subtile propagates to the top of the stack and the
//! rows below re-link where their connections no longer agree.

use crate::cache::IsomCache;
use crate::map::ScenarioMap;
use isomap_core::{group_index, IsomDiamond, RectPoint};

impl ScenarioMap {
    /// Projects every modified diamond inside the cache's changed area,
    /// clearing editor flags behind itself and resetting the changed area.
    pub fn update_tiles_from_isom(&mut self, cache: &mut IsomCache) {
        for y in cache.changed_area.top..=cache.changed_area.bottom {
            for x in cache.changed_area.left..=cache.changed_area.right {
                let point = RectPoint { x, y };
                if self.isom_rect_at(point).is_left_or_right_modified() {
                    self.update_tile_from_isom(IsomDiamond::new(x, y), cache);
                }
                self.isom_rect_mut(point).clear_editor_flags();
            }
        }
        cache.reset_changed_area();
    }

    fn update_tile_from_isom(&mut self, diamond: IsomDiamond, cache: &mut IsomCache) {
        if diamond.x + 1 >= cache.isom_width || diamond.y + 1 >= cache.isom_height {
            return;
        }

        let data = cache.data;
        let left_tile_x = 2 * diamond.x;
        let right_tile_x = left_tile_x + 1;
        let total_groups = data.tile_groups.len();

        let rect_hash = self.isom_rect_at(diamond.into()).hash(&data.isom_links);
        let Some(potential_groups) = data.hash_to_tile_group.get(&rect_hash) else {
            self.set_tile_value(left_tile_x, diamond.y, 0);
            self.set_tile_value(right_tile_x, diamond.y, 0);
            return;
        };

        // Prefer the candidate whose stack top matches the connection coming
        // down from the row above.
        let mut dest_group = potential_groups[0];
        if diamond.y > 0 {
            let above_group = usize::from(group_index(self.tile_value(left_tile_x, diamond.y - 1)));
            if above_group < total_groups {
                let above_bottom = data.tile_groups[above_group].stack.bottom;
                if let Some(&connected) = potential_groups
                    .iter()
                    .find(|&&group| data.tile_groups[usize::from(group)].stack.top == above_bottom)
                {
                    dest_group = connected;
                }
            }
        }

        let dest_subtile = cache.random_subtile(dest_group) % 16;
        self.set_tile_value(left_tile_x, diamond.y, 16 * dest_group + dest_subtile);
        self.set_tile_value(right_tile_x, diamond.y, 16 * (dest_group + 1) + dest_subtile);

        // Find the top of the connected stack.
        let mut stack_top_y = diamond.y;
        let mut current = usize::from(group_index(self.tile_value(left_tile_x, stack_top_y)));
        while stack_top_y > 0
            && current < total_groups
            && data.tile_groups[current].stack.top != 0
        {
            let above = usize::from(group_index(self.tile_value(left_tile_x, stack_top_y - 1)));
            if above >= total_groups
                || data.tile_groups[current].stack.top != data.tile_groups[above].stack.bottom
            {
                break;
            }
            current = above;
            stack_top_y -= 1;
        }

        // A stack shares one subtile index from its top row down.
        let top_left_group = group_index(self.tile_value(left_tile_x, stack_top_y));
        let top_right_group = group_index(self.tile_value(right_tile_x, stack_top_y));
        self.set_tile_value(left_tile_x, stack_top_y, 16 * top_left_group + dest_subtile);
        self.set_tile_value(right_tile_x, stack_top_y, 16 * top_right_group + dest_subtile);

        for y in stack_top_y + 1..usize::from(self.tile_height) {
            let group_above = usize::from(group_index(self.tile_value(left_tile_x, y - 1)));
            let next_group = usize::from(group_index(self.tile_value(left_tile_x, y)));
            if group_above >= total_groups
                || next_group >= total_groups
                || data.tile_groups[group_above].stack.bottom == 0
                || data.tile_groups[next_group].stack.top == 0
            {
                break;
            }

            let bottom_connection = data.tile_groups[group_above].stack.bottom;
            let mut left_group = group_index(self.tile_value(left_tile_x, y));
            let mut right_group = group_index(self.tile_value(right_tile_x, y));
            if bottom_connection != data.tile_groups[next_group].stack.top {
                // The stack broke here; re-resolve this row's group from its
                // own rectangle.
                let row_hash = self
                    .isom_rect_at(RectPoint { x: diamond.x, y })
                    .hash(&data.isom_links);
                if let Some(candidates) = data.hash_to_tile_group.get(&row_hash) {
                    if let Some(&connected) = candidates.iter().find(|&&group| {
                        data.tile_groups[usize::from(group)].stack.top == bottom_connection
                    }) {
                        left_group = connected;
                        right_group = connected + 1;
                    }
                }
            }

            self.set_tile_value(left_tile_x, y, 16 * left_group + dest_subtile);
            self.set_tile_value(right_tile_x, y, 16 * right_group + dest_subtile);
        }
    }
}
