//! Test fixtures for the editing engine
//!
//! Real tileset assets are large game data; the fixture here builds a
//! miniature but complete dataset through the real generator instead: two
//! solid brushes ("low ground" and "high ground") and one cliff terrain
//! family whose tile groups are synthesized from the shape catalog, one
//! group per distinct hard-link pattern.
//!
//! Import from `#[cfg(test)]` modules in this crate or from integration
//! tests:
//!
//! ```rust,ignore
//! use isomap_engine::testing::{cliff_dataset, HIGH_GROUND, LOW_GROUND};
//! ```

use isomap_core::{DirectionalLinks, Link, ShapeQuadrant, StackConnection, TileGroup, SHAPES};
use isomap_tileset::{TerrainTypeInfo, TilesetData};

/// Terrain type of the outer solid brush.
pub const LOW_GROUND: usize = 2;
/// Terrain type of the inner solid brush.
pub const HIGH_GROUND: usize = 3;
/// Terrain type owning the cliff shape block.
pub const CLIFF: usize = 4;

/// Link-table row of the low-ground solid brush.
pub const LOW_GROUND_ROW: u16 = 1;
/// Link-table row of the high-ground solid brush.
pub const HIGH_GROUND_ROW: u16 = 2;
/// First row of the cliff shape block; add a `ShapeId` to address a shape.
pub const CLIFF_BLOCK_START: u16 = 4;

/// Soft link code of low ground.
pub const LOW_LINK: u16 = 1;
/// Soft link code of high ground.
pub const HIGH_LINK: u16 = 2;
/// Soft link code used for unclassified cliff-group sides.
pub const BLEND_LINK: u16 = 3;

fn terrain_types() -> Vec<TerrainTypeInfo> {
    vec![
        TerrainTypeInfo::unused(0),
        TerrainTypeInfo::unused(1),
        TerrainTypeInfo::brush(LOW_GROUND as u16, LOW_GROUND_ROW, 0, 1, "Low Ground"),
        TerrainTypeInfo::brush(HIGH_GROUND as u16, HIGH_GROUND_ROW, 1, 2, "High Ground"),
        TerrainTypeInfo::shapes(CLIFF as u16, CLIFF_BLOCK_START),
        TerrainTypeInfo::unused(5),
    ]
}

/// Adjacency: both brushes border the cliff family.
const CLIFF_ADJACENCY: &[u16] = &[
    2, 4, 0, //
    4, 2, 3, 0, //
    3, 4, 0, //
    0,
];

fn solid_group(terrain_type: u16, soft: u16) -> TileGroup {
    let mut mega_tile_index = [0u16; 16];
    for slot in mega_tile_index.iter_mut().take(4) {
        *slot = 1;
    }
    TileGroup {
        terrain_type,
        buildability: 0,
        ground_height: 0,
        links: DirectionalLinks {
            left: Link(soft),
            top: Link(soft),
            right: Link(soft),
            bottom: Link(soft),
        },
        stack: StackConnection::default(),
        mega_tile_index,
    }
}

/// Links for one cliff group: hard positions come from the template, soft
/// positions default to the blend code. The pattern shared by the
/// north-west-facing quadrants exposes low ground to its upper-left; the
/// pattern shared by the inner corner exposes high ground to its lower-right.
/// Those two are what resolves the family's outer and inner solid brushes.
fn cliff_links(quadrant: &ShapeQuadrant) -> DirectionalLinks {
    let soft = |link: Link, fallback: u16| {
        if link.is_hard() {
            link
        } else {
            Link(fallback)
        }
    };

    if quadrant.right == Link::BR && quadrant.bottom == Link::BR {
        DirectionalLinks {
            left: Link(LOW_LINK),
            top: Link(LOW_LINK),
            right: Link::BR,
            bottom: Link::BR,
        }
    } else if quadrant.left == Link::BR && quadrant.top == Link::BR {
        DirectionalLinks {
            left: Link::BR,
            top: Link::BR,
            right: Link(HIGH_LINK),
            bottom: Link(HIGH_LINK),
        }
    } else {
        DirectionalLinks {
            left: soft(quadrant.left, BLEND_LINK),
            top: soft(quadrant.top, BLEND_LINK),
            right: soft(quadrant.right, BLEND_LINK),
            bottom: soft(quadrant.bottom, BLEND_LINK),
        }
    }
}

fn cliff_group(links: DirectionalLinks) -> TileGroup {
    let mut mega_tile_index = [0u16; 16];
    mega_tile_index[0] = 1;
    TileGroup {
        terrain_type: CLIFF as u16,
        buildability: 0,
        ground_height: 0,
        links,
        stack: StackConnection::default(),
        mega_tile_index,
    }
}

/// A dataset with a two-level cliff terrain family, built through the real
/// link-table generator.
pub fn cliff_dataset() -> TilesetData {
    let mut tile_groups = vec![TileGroup::default(), TileGroup::default()];
    let mut push_pair = |tile_groups: &mut Vec<TileGroup>, group: TileGroup| {
        tile_groups.push(group);
        tile_groups.push(group);
    };

    push_pair(&mut tile_groups, solid_group(LOW_GROUND as u16, LOW_LINK));
    push_pair(&mut tile_groups, solid_group(HIGH_GROUND as u16, HIGH_LINK));

    // One cliff group per distinct hard-link pattern in the shape catalog;
    // templates sharing a pattern share the group, as real tile groups do.
    let mut seen_patterns = Vec::new();
    for shape in &SHAPES {
        for quadrant in [
            &shape.top_left,
            &shape.top_right,
            &shape.bottom_right,
            &shape.bottom_left,
        ] {
            let has_hard_link = quadrant.left.is_hard()
                || quadrant.top.is_hard()
                || quadrant.right.is_hard()
                || quadrant.bottom.is_hard();
            if !has_hard_link {
                continue;
            }
            let pattern = (quadrant.left, quadrant.top, quadrant.right, quadrant.bottom);
            if seen_patterns.contains(&pattern) {
                continue;
            }
            seen_patterns.push(pattern);
            push_pair(&mut tile_groups, cliff_group(cliff_links(quadrant)));
        }
    }

    TilesetData::build(
        tile_groups,
        terrain_types(),
        CLIFF_ADJACENCY,
        LOW_GROUND,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use isomap_core::{LinkId, ShapeId};

    #[test]
    fn fixture_rows_land_where_the_constants_say() {
        let data = cliff_dataset();
        assert_eq!(data.isom_links.len(), CLIFF_BLOCK_START as usize + 14);
        assert_eq!(data.isom_links[LOW_GROUND_ROW as usize].terrain_type, 2);
        assert_eq!(data.isom_links[HIGH_GROUND_ROW as usize].terrain_type, 3);
        for row in &data.isom_links[CLIFF_BLOCK_START as usize..] {
            assert_eq!(row.terrain_type, CLIFF as u8);
        }
        assert_eq!(data.default_brush.name, "Low Ground");
    }

    #[test]
    fn outer_and_inner_brushes_resolve_onto_the_cliff_block() {
        let data = cliff_dataset();
        let edge_nw = &data.isom_links[CLIFF_BLOCK_START as usize + ShapeId::EdgeNorthWest as usize];
        // Outer = low ground's link id, inner = high ground's.
        assert_eq!(edge_nw.top_left.link_id, LinkId(1));
        assert_eq!(edge_nw.bottom_right.link_id, LinkId(2));
        // Reserved ids come from the templates.
        assert_eq!(edge_nw.top_right.link_id, LinkId::TRBL_NW);
        assert_eq!(edge_nw.bottom_left.link_id, LinkId::TRBL_NW);
    }

    #[test]
    fn adjacency_routes_between_the_brushes_through_the_cliff() {
        let data = cliff_dataset();
        let n = data.terrain_types.len();
        assert_eq!(data.terrain_type_map[n * LOW_GROUND + HIGH_GROUND], CLIFF as u16);
        assert_eq!(data.terrain_type_map[n * HIGH_GROUND + LOW_GROUND], CLIFF as u16);
        assert_eq!(data.terrain_type_map[n * LOW_GROUND + LOW_GROUND], LOW_GROUND as u16);
    }
}
