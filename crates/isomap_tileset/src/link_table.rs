//! Link-shape table generation and terrain adjacency expansion
//!
//! The link table is assembled from the tile-group table and the tileset's
//! terrain-type descriptors: one synthesized row per solid brush, then one
//! 14-row shape block per remaining terrain type, populated by matching
//! every even tile group against the shape templates and post-processed in a
//! fixed order.

use crate::cv5::MAX_TILE_GROUPS;
use crate::terrain_types::TerrainTypeInfo;
use isomap_core::{
    BottomLeftLinks, BottomRightLinks, Link, LinkId, Quadrant, ShapeId, ShapeLinks, TileGroup,
    TopLeftLinks, TopRightLinks, SHAPES, SHAPE_COUNT,
};
use std::collections::VecDeque;

const EDGE_NW: usize = ShapeId::EdgeNorthWest as usize;
const EDGE_NE: usize = ShapeId::EdgeNorthEast as usize;
const EDGE_SE: usize = ShapeId::EdgeSouthEast as usize;
const EDGE_SW: usize = ShapeId::EdgeSouthWest as usize;
const JUT_OUT_N: usize = ShapeId::JutOutNorth as usize;
const JUT_OUT_E: usize = ShapeId::JutOutEast as usize;
const JUT_OUT_S: usize = ShapeId::JutOutSouth as usize;
const JUT_OUT_W: usize = ShapeId::JutOutWest as usize;
const JUT_IN_E: usize = ShapeId::JutInEast as usize;
const JUT_IN_W: usize = ShapeId::JutInWest as usize;
const JUT_IN_N: usize = ShapeId::JutInNorth as usize;
const JUT_IN_S: usize = ShapeId::JutInSouth as usize;

/// Tile-group indices recorded per shape while its quadrants are populated.
#[derive(Debug, Clone, Copy, Default)]
struct ShapeTileGroups {
    top_left: Option<u16>,
    top_right: Option<u16>,
    bottom_right: Option<u16>,
    bottom_left: Option<u16>,
}

/// Builds the link table from a tile-group table and terrain descriptors.
pub fn generate_isom_links(
    tile_groups: &[TileGroup],
    terrain_types: &[TerrainTypeInfo],
) -> Vec<ShapeLinks> {
    let total = tile_groups.len().min(MAX_TILE_GROUPS);
    let groups = &tile_groups[..total];

    if terrain_types.len() < 2 {
        return Vec::new();
    }

    // Even group indices bucketed by terrain type.
    let mut type_groups: Vec<Vec<u16>> = vec![Vec::new(); terrain_types.len()];
    for i in (0..total).step_by(2) {
        let terrain_type = groups[i].terrain_type as usize;
        if terrain_type > 0 {
            if let Some(bucket) = type_groups.get_mut(terrain_type) {
                bucket.push(i as u16);
            }
        }
    }

    // Descriptors in the lower half of the table are solid brushes, the rest
    // own 14-row shape blocks. Both are laid out ascending by isom value.
    let half = terrain_types.len() / 2;
    let mut solid_brushes: Vec<&TerrainTypeInfo> = terrain_types[1..=half]
        .iter()
        .filter(|info| info.isom_value != 0)
        .collect();
    let mut shape_types: Vec<(u16, u16)> = terrain_types[half + 1..]
        .iter()
        .filter(|info| info.isom_value != 0)
        .map(|info| (info.index, info.isom_value))
        .collect();
    solid_brushes.sort_by_key(|info| info.isom_value);
    shape_types.sort_by_key(|&(_, isom_value)| isom_value);

    let mut isom_links: Vec<ShapeLinks> = Vec::new();
    for brush in &solid_brushes {
        while isom_links.len() < brush.isom_value as usize {
            isom_links.push(ShapeLinks::default());
        }
        let links = type_groups
            .get(brush.index as usize)
            .and_then(|bucket| bucket.first())
            .map(|&group| groups[group as usize].links)
            .unwrap_or_default();
        isom_links.push(ShapeLinks {
            terrain_type: brush.index as u8,
            top_left: TopLeftLinks {
                right: links.right,
                bottom: links.bottom,
                link_id: brush.link_id,
            },
            top_right: TopRightLinks {
                left: links.left,
                bottom: links.bottom,
                link_id: brush.link_id,
            },
            bottom_right: BottomRightLinks {
                left: links.left,
                top: links.top,
                link_id: brush.link_id,
            },
            bottom_left: BottomLeftLinks {
                top: links.top,
                right: links.right,
                link_id: brush.link_id,
            },
        });
    }

    let total_solid_brush_rows = isom_links.len();
    let Some(&(_, first_shape_isom)) = shape_types.first() else {
        return isom_links;
    };
    while isom_links.len() < first_shape_isom as usize {
        isom_links.push(ShapeLinks::default());
    }

    for &(type_index, _) in &shape_types {
        let start = isom_links.len();
        for _ in 0..SHAPE_COUNT {
            isom_links.push(ShapeLinks {
                terrain_type: type_index as u8,
                ..ShapeLinks::default()
            });
        }

        let (head, block) = isom_links.split_at_mut(start);
        let mut shape_groups = [ShapeTileGroups::default(); SHAPE_COUNT];

        if let Some(bucket) = type_groups.get(type_index as usize) {
            for &group_index in bucket {
                let group = &groups[group_index as usize];
                if !group.links.is_shape_quadrant() {
                    continue;
                }
                let no_stack_above = group.stack.top == 0;
                for (shape_index, shape) in SHAPES.iter().enumerate() {
                    if shape.matches(Quadrant::TopLeft, &group.links, no_stack_above) {
                        block[shape_index].top_left.right = group.links.right;
                        block[shape_index].top_left.bottom = group.links.bottom;
                        shape_groups[shape_index].top_left = Some(group_index);
                    }
                    if shape.matches(Quadrant::TopRight, &group.links, no_stack_above) {
                        block[shape_index].top_right.left = group.links.left;
                        block[shape_index].top_right.bottom = group.links.bottom;
                        shape_groups[shape_index].top_right = Some(group_index);
                    }
                    if shape.matches(Quadrant::BottomRight, &group.links, no_stack_above) {
                        block[shape_index].bottom_right.left = group.links.left;
                        block[shape_index].bottom_right.top = group.links.top;
                        shape_groups[shape_index].bottom_right = Some(group_index);
                    }
                    if shape.matches(Quadrant::BottomLeft, &group.links, no_stack_above) {
                        block[shape_index].bottom_left.top = group.links.top;
                        block[shape_index].bottom_left.right = group.links.right;
                        shape_groups[shape_index].bottom_left = Some(group_index);
                    }
                }
            }
        }

        populate_jut_in_east_west(block, groups, &shape_groups);
        populate_empty_quadrant_links(block);
        populate_hardcoded_link_ids(block);
        populate_solid_brush_link_ids(
            block,
            groups,
            &shape_groups,
            &head[..total_solid_brush_rows],
        );
    }

    isom_links
}

/// Fills the jut-in east/west quadrants that have no tile group of their own
/// from the matching edge shapes.
fn populate_jut_in_east_west(
    block: &mut [ShapeLinks],
    groups: &[TileGroup],
    shape_groups: &[ShapeTileGroups; SHAPE_COUNT],
) {
    // The right sides of JutInEast are not always present in the group
    // table; when missing they are a merge of EdgeNE/EdgeSE.
    if block[JUT_IN_E].top_right.left == Link::NONE {
        if let (Some(ne), Some(se)) = (
            shape_groups[EDGE_NE].bottom_left,
            shape_groups[EDGE_SE].top_left,
        ) {
            let ne = &groups[ne as usize].links;
            let se = &groups[se as usize].links;
            block[JUT_IN_E].top_right.left = ne.left;
            block[JUT_IN_E].top_right.bottom = ne.bottom;
            block[JUT_IN_E].bottom_right.left = se.left;
            block[JUT_IN_E].bottom_right.top = se.top;
        }
    }

    // Symmetrically, the left sides of JutInWest merge EdgeNW/EdgeSW.
    if block[JUT_IN_W].top_left.right == Link::NONE {
        if let (Some(nw), Some(sw)) = (
            shape_groups[EDGE_NW].bottom_right,
            shape_groups[EDGE_SW].top_right,
        ) {
            let nw = &groups[nw as usize].links;
            let sw = &groups[sw as usize].links;
            block[JUT_IN_W].top_left.right = nw.right;
            block[JUT_IN_W].top_left.bottom = nw.bottom;
            block[JUT_IN_W].bottom_left.top = sw.top;
            block[JUT_IN_W].bottom_left.right = sw.right;
        }
    }
}

/// Populates the quadrants that are not part of a shape's primary pattern
/// from adjacent link values within the same shape.
fn populate_empty_quadrant_links(block: &mut [ShapeLinks]) {
    block[EDGE_NW].top_left.right = block[EDGE_NW].top_right.left;
    block[EDGE_NW].top_left.bottom = block[EDGE_NW].bottom_left.top;

    block[EDGE_NE].top_right.left = block[EDGE_NE].top_left.right;
    block[EDGE_NE].top_right.bottom = block[EDGE_NE].bottom_right.top;

    block[EDGE_SE].bottom_right.left = block[EDGE_SE].bottom_left.right;
    block[EDGE_SE].bottom_right.top = block[EDGE_SE].top_right.bottom;

    block[EDGE_SW].bottom_left.top = block[EDGE_SW].top_left.bottom;
    block[EDGE_SW].bottom_left.right = block[EDGE_SW].bottom_right.left;

    block[JUT_OUT_N].top_left.bottom = block[JUT_OUT_N].bottom_left.top;
    block[JUT_OUT_N].top_left.right = block[JUT_OUT_N].top_left.bottom;
    block[JUT_OUT_N].top_right.bottom = block[JUT_OUT_N].bottom_right.top;
    block[JUT_OUT_N].top_right.left = block[JUT_OUT_N].top_right.bottom;

    let fill = block[JUT_OUT_E].top_left.right;
    block[JUT_OUT_E].top_right.left = fill;
    block[JUT_OUT_E].top_right.bottom = fill;
    block[JUT_OUT_E].bottom_right.left = fill;
    block[JUT_OUT_E].bottom_right.top = fill;

    block[JUT_OUT_S].bottom_right.top = block[JUT_OUT_S].top_right.bottom;
    block[JUT_OUT_S].bottom_right.left = block[JUT_OUT_S].bottom_right.top;
    block[JUT_OUT_S].bottom_left.top = block[JUT_OUT_S].top_left.bottom;
    block[JUT_OUT_S].bottom_left.right = block[JUT_OUT_S].bottom_left.top;

    let fill = block[JUT_OUT_W].top_right.left;
    block[JUT_OUT_W].top_left.right = fill;
    block[JUT_OUT_W].top_left.bottom = fill;
    block[JUT_OUT_W].bottom_left.right = fill;
    block[JUT_OUT_W].bottom_left.top = fill;
}

/// Copies the reserved same-type-only link ids from the shape templates.
fn populate_hardcoded_link_ids(block: &mut [ShapeLinks]) {
    for (shape_index, shape) in SHAPES.iter().enumerate() {
        if shape.top_left.link_id.is_same_type_only() {
            block[shape_index].top_left.link_id = shape.top_left.link_id;
        }
        if shape.top_right.link_id.is_same_type_only() {
            block[shape_index].top_right.link_id = shape.top_right.link_id;
        }
        if shape.bottom_right.link_id.is_same_type_only() {
            block[shape_index].bottom_right.link_id = shape.bottom_right.link_id;
        }
        if shape.bottom_left.link_id.is_same_type_only() {
            block[shape_index].bottom_left.link_id = shape.bottom_left.link_id;
        }
    }
}

/// Resolves which solid brushes sit outside and inside this terrain type and
/// stamps their link ids into the block's outer/inner slots.
fn populate_solid_brush_link_ids(
    block: &mut [ShapeLinks],
    groups: &[TileGroup],
    shape_groups: &[ShapeTileGroups; SHAPE_COUNT],
    solid_brush_rows: &[ShapeLinks],
) {
    let outer_link = shape_groups[EDGE_NW]
        .top_right
        .map(|group| groups[group as usize].links.left);
    let inner_link = shape_groups[EDGE_NW]
        .bottom_right
        .map(|group| groups[group as usize].links.right);

    for row in solid_brush_rows {
        // Any quadrant/direction works here; links and ids are uniform
        // across a solid brush row.
        let brush_link = row.top_left.right;
        let brush_link_id = row.top_left.link_id;

        if outer_link == Some(brush_link) {
            fill_outer_link_ids(block, brush_link_id);
        }
        if inner_link == Some(brush_link) {
            fill_inner_link_ids(block, brush_link_id);
        }
    }
}

fn fill_outer_link_ids(block: &mut [ShapeLinks], link_id: LinkId) {
    block[EDGE_NW].top_left.link_id = link_id;

    block[EDGE_NE].top_right.link_id = link_id;

    block[EDGE_SE].bottom_right.link_id = link_id;

    block[EDGE_SW].bottom_left.link_id = link_id;

    block[JUT_OUT_N].top_left.link_id = link_id;
    block[JUT_OUT_N].top_right.link_id = link_id;

    block[JUT_OUT_E].top_right.link_id = link_id;
    block[JUT_OUT_E].bottom_right.link_id = link_id;

    block[JUT_OUT_W].top_left.link_id = link_id;
    block[JUT_OUT_W].bottom_left.link_id = link_id;

    block[JUT_OUT_S].bottom_right.link_id = link_id;
    block[JUT_OUT_S].bottom_left.link_id = link_id;
}

fn fill_inner_link_ids(block: &mut [ShapeLinks], link_id: LinkId) {
    block[EDGE_NW].bottom_right.link_id = link_id;

    block[EDGE_NE].bottom_left.link_id = link_id;

    block[EDGE_SE].top_left.link_id = link_id;

    block[EDGE_SW].top_right.link_id = link_id;

    block[JUT_IN_E].top_right.link_id = link_id;
    block[JUT_IN_E].bottom_right.link_id = link_id;

    block[JUT_IN_W].top_left.link_id = link_id;
    block[JUT_IN_W].bottom_left.link_id = link_id;

    block[JUT_IN_N].bottom_right.link_id = link_id;
    block[JUT_IN_N].bottom_left.link_id = link_id;

    block[JUT_IN_S].top_left.link_id = link_id;
    block[JUT_IN_S].top_right.link_id = link_id;
}

/// Expands a compressed adjacency sequence into a square search-start matrix.
///
/// The sequence holds, per source type, `t, a1, a2, ..., 0`, terminated by a
/// trailing zero. The expansion floods breadth-first from each row down to
/// zero: `map[i * n + t]` becomes the adjacency intermediary closest to `i`
/// on the way to `t`, and `map[i * n + i] = i`.
pub fn expand_terrain_type_map(compressed: &[u16], total_types: usize) -> Vec<u16> {
    let n = total_types;
    let mut map = vec![0u16; n * n];
    let mut temp = vec![0u16; n * n];

    // Decompress: each list is stored flush-left in its source type's row.
    let mut i = 0;
    while i < compressed.len() && compressed[i] != 0 {
        let mut j = n * compressed[i] as usize;
        i += 1;
        while i < compressed.len() && compressed[i] != 0 {
            if j < temp.len() {
                temp[j] = compressed[i];
            }
            i += 1;
            j += 1;
        }
        i += 1;
    }

    for i in (0..n).rev() {
        let mut row_data = vec![0u16; n];
        let mut queue: VecDeque<u16> = VecDeque::from([i as u16]);
        map[n * i + i] = i as u16;

        while let Some(dest_row) = queue.pop_front() {
            let start = i * n;
            let mut j = dest_row as usize * n;
            while j < temp.len() && temp[j] != 0 {
                let path = temp[j] as usize;
                if path < n && map[start + path] == 0 {
                    let next_value = if row_data[dest_row as usize] == 0 {
                        temp[j]
                    } else {
                        row_data[dest_row as usize]
                    };
                    queue.push_back(temp[j]);
                    map[start + path] = next_value;
                    row_data[path] = next_value;
                }
                j += 1;
            }
        }
    }

    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain_types::{BADLANDS_ADJACENCY, BADLANDS_TERRAIN_TYPES};

    #[test]
    fn badlands_adjacency_fixed_points() {
        let n = BADLANDS_TERRAIN_TYPES.len();
        let map = expand_terrain_type_map(BADLANDS_ADJACENCY, n);
        for i in 0..n {
            assert_eq!(map[n * i + i], i as u16);
        }
    }

    #[test]
    fn badlands_adjacency_first_hops() {
        let n = BADLANDS_TERRAIN_TYPES.len();
        let map = expand_terrain_type_map(BADLANDS_ADJACENCY, n);

        // From Dirt (2): direct neighbors map to themselves, transitive
        // targets map to the intermediary closest to Dirt.
        assert_eq!(map[n * 2 + 34], 34);
        assert_eq!(map[n * 2 + 3], 34); // High Dirt via the dirt cliff edges
        assert_eq!(map[n * 2 + 5], 35); // Water via the water edges
        assert_eq!(map[n * 2 + 14], 27); // Asphalt via the asphalt edges
        assert_eq!(map[n * 2 + 18], 27); // Structure two hops behind asphalt

        // Types that never appear in the sequence stay unreachable.
        assert_eq!(map[n * 2 + 1], 0);
        assert_eq!(map[n * 2], 0);
    }

    #[test]
    fn shape_block_layout_is_contiguous() {
        use isomap_core::{DirectionalLinks, TileGroup};

        // Two solid brushes at isom values 1 and 2 and one shape family at 4;
        // half the descriptor table is brushes per the partition rule.
        let terrain_types = vec![
            TerrainTypeInfo::unused(0),
            TerrainTypeInfo::unused(1),
            TerrainTypeInfo::brush(2, 1, 0, 1, "Low"),
            TerrainTypeInfo::brush(3, 2, 1, 2, "High"),
            TerrainTypeInfo::shapes(4, 4),
            TerrainTypeInfo::unused(5),
        ];

        let plain = |terrain_type: u16, soft: u16| TileGroup {
            terrain_type,
            links: DirectionalLinks {
                left: Link(soft),
                top: Link(soft),
                right: Link(soft),
                bottom: Link(soft),
            },
            ..TileGroup::default()
        };
        // Even indices participate; odd indices are the right-hand partners.
        let tile_groups = vec![
            plain(0, 0),
            plain(0, 0),
            plain(2, 1),
            plain(2, 1),
            plain(3, 2),
            plain(3, 2),
        ];

        let links = generate_isom_links(&tile_groups, &terrain_types);

        // Row 0 pads, rows 1-2 are the brushes, row 3 pads, rows 4..18 are
        // the shape block.
        assert_eq!(links.len(), 4 + SHAPE_COUNT);
        assert_eq!(links[0], ShapeLinks::default());
        assert_eq!(links[1].terrain_type, 2);
        assert_eq!(links[1].top_left.right, Link(1));
        assert_eq!(links[1].top_left.link_id, LinkId(1));
        assert_eq!(links[2].terrain_type, 3);
        assert_eq!(links[2].bottom_right.left, Link(2));
        assert_eq!(links[3], ShapeLinks::default());
        for row in &links[4..] {
            assert_eq!(row.terrain_type, 4);
        }

        // With no groups for type 4, the reserved ids still come from the
        // shape templates.
        assert_eq!(links[4 + EDGE_NW].top_right.link_id, LinkId::TRBL_NW);
    }
}
