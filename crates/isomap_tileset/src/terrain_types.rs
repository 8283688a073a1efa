//! Per-tileset terrain-type descriptor tables
//!
//! One descriptor table and one compressed adjacency sequence per tileset.
//! The descriptor index doubles as the terrain-type number carried by tile
//! groups; `isom_value` is both the value placed into the isom grid and an
//! index into the generated link table. Desert, Arctic and Twilight reuse
//! Jungle's adjacency sequence.

use crate::TilesetId;
use isomap_core::LinkId;

/// A terrain-type descriptor.
///
/// `brush_sort_order` below zero means the type is not a user-facing brush.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerrainTypeInfo {
    pub index: u16,
    pub isom_value: u16,
    pub brush_sort_order: i16,
    pub link_id: LinkId,
    pub name: &'static str,
}

impl Default for TerrainTypeInfo {
    fn default() -> TerrainTypeInfo {
        TerrainTypeInfo::unused(0)
    }
}

impl TerrainTypeInfo {
    /// A placeholder entry with no isom value.
    pub const fn unused(index: u16) -> TerrainTypeInfo {
        TerrainTypeInfo {
            index,
            isom_value: 0,
            brush_sort_order: -1,
            link_id: LinkId::NONE,
            name: "",
        }
    }

    /// An entry owning a 14-row shape block in the link table.
    pub const fn shapes(index: u16, isom_value: u16) -> TerrainTypeInfo {
        TerrainTypeInfo {
            index,
            isom_value,
            brush_sort_order: -1,
            link_id: LinkId::NONE,
            name: "",
        }
    }

    /// A solid-brush entry.
    pub const fn brush(
        index: u16,
        isom_value: u16,
        brush_sort_order: i16,
        link_id: u16,
        name: &'static str,
    ) -> TerrainTypeInfo {
        TerrainTypeInfo {
            index,
            isom_value,
            brush_sort_order,
            link_id: LinkId(link_id),
            name,
        }
    }
}

use TerrainTypeInfo as T;

pub const BADLANDS_TERRAIN_TYPES: &[TerrainTypeInfo] = &[
    T::shapes(0, 10),
    T::unused(1),
    T::brush(2, 1, 0, 1, "Dirt"),
    T::brush(3, 2, 2, 2, "High Dirt"),
    T::brush(4, 9, 1, 4, "Mud"),
    T::brush(5, 3, 3, 3, "Water"),
    T::brush(6, 4, 4, 5, "Grass"),
    T::brush(7, 7, 5, 6, "High Grass"),
    T::unused(8),
    T::unused(9),
    T::unused(10),
    T::unused(11),
    T::unused(12),
    T::unused(13),
    T::brush(14, 5, 7, 9, "Asphalt"),
    T::brush(15, 6, 8, 10, "Rocky Ground"),
    T::unused(16),
    T::unused(17),
    T::brush(18, 8, 6, 7, "Structure"),
    T::unused(19),
    T::shapes(20, 41),
    T::shapes(21, 69),
    T::shapes(22, 111),
    T::unused(23),
    T::unused(24),
    T::unused(25),
    T::unused(26),
    T::shapes(27, 83),
    T::shapes(28, 55),
    T::unused(29),
    T::unused(30),
    T::shapes(31, 97),
    T::unused(32),
    T::unused(33),
    T::shapes(34, 13),
    T::shapes(35, 27),
];

pub const BADLANDS_ADJACENCY: &[u16] = &[
    5, 35, 0, //
    35, 5, 2, 20, 27, 28, 34, 22, 0, //
    2, 34, 35, 20, 27, 28, 22, 0, //
    34, 2, 3, 20, 21, 27, 28, 35, 22, 0, //
    3, 34, 21, 0, //
    6, 20, 0, //
    20, 6, 2, 35, 34, 27, 28, 22, 0, //
    14, 27, 31, 0, //
    27, 14, 20, 2, 35, 34, 28, 22, 0, //
    15, 28, 0, //
    28, 15, 2, 34, 35, 20, 27, 22, 0, //
    7, 21, 0, //
    21, 7, 3, 34, 0, //
    18, 31, 0, //
    31, 18, 14, 0, //
    4, 22, 0, //
    22, 4, 2, 34, 35, 20, 27, 28, 0, //
    0,
];

pub const SPACE_TERRAIN_TYPES: &[TerrainTypeInfo] = &[
    T::shapes(0, 3),
    T::unused(1),
    T::brush(2, 1, 0, 1, "Space"),
    T::brush(3, 2, 3, 3, "Platform"),
    T::brush(4, 11, 5, 4, "Plating"),
    T::brush(5, 4, 7, 5, "High Platform"),
    T::brush(6, 12, 8, 6, "High Plating"),
    T::brush(7, 8, 6, 7, "Solar Array"),
    T::brush(8, 9, 1, 8, "Low Platform"),
    T::brush(9, 10, 2, 9, "Rusty Pit"),
    T::brush(10, 13, 9, 10, "Elevated Catwalk"),
    T::brush(11, 14, 4, 2, "Dark Platform"),
    T::unused(12),
    T::shapes(13, 136),
    T::shapes(14, 94),
    T::shapes(15, 108),
    T::shapes(16, 52),
    T::shapes(17, 66),
    T::shapes(18, 80),
    T::shapes(19, 122),
    T::shapes(20, 24),
    T::shapes(21, 38),
];

pub const SPACE_ADJACENCY: &[u16] = &[
    2, 20, 0, //
    20, 2, 3, 16, 14, 21, 13, 0, //
    3, 20, 21, 16, 17, 18, 14, 19, 13, 0, //
    21, 3, 5, 14, 16, 15, 19, 20, 17, 13, 0, //
    5, 21, 15, 0, //
    7, 16, 0, //
    16, 7, 3, 20, 21, 17, 18, 14, 19, 13, 0, //
    8, 17, 0, //
    17, 8, 3, 16, 14, 21, 13, 0, //
    9, 18, 0, //
    18, 9, 3, 16, 14, 13, 0, //
    4, 14, 0, //
    14, 4, 3, 20, 21, 16, 17, 18, 19, 13, 0, //
    6, 15, 0, //
    15, 6, 5, 21, 0, //
    10, 19, 0, //
    19, 10, 3, 16, 14, 21, 13, 0, //
    11, 13, 0, //
    13, 11, 3, 20, 21, 16, 17, 18, 14, 19, 0, //
    0,
];

pub const INSTALLATION_TERRAIN_TYPES: &[TerrainTypeInfo] = &[
    T::shapes(0, 8),
    T::unused(1),
    T::brush(2, 1, 0, 1, "Substructure"),
    T::brush(3, 2, 1, 2, "Floor"),
    T::brush(4, 4, 3, 4, "Substructure Plating"),
    T::brush(5, 5, 4, 5, "Plating"),
    T::brush(6, 3, 2, 3, "Roof"),
    T::brush(7, 7, 6, 7, "Bottomless Pit"),
    T::brush(8, 6, 5, 6, "Substructure Panels"),
    T::unused(9),
    T::shapes(10, 50),
    T::shapes(11, 64),
    T::shapes(12, 22),
    T::shapes(13, 36),
    T::shapes(14, 78),
    T::shapes(15, 92),
];

pub const INSTALLATION_ADJACENCY: &[u16] = &[
    2, 12, 10, 14, 15, 0, //
    12, 2, 3, 10, 11, 13, 14, 15, 0, //
    3, 12, 13, 11, 0, //
    13, 6, 3, 11, 12, 0, //
    6, 13, 0, //
    4, 10, 0, //
    10, 4, 2, 12, 14, 15, 0, //
    5, 11, 0, //
    11, 5, 3, 12, 13, 0, //
    8, 14, 0, //
    14, 8, 2, 12, 10, 15, 0, //
    7, 15, 0, //
    15, 7, 2, 12, 10, 14, 0, //
    0,
];

pub const ASHWORLD_TERRAIN_TYPES: &[TerrainTypeInfo] = &[
    T::shapes(0, 9),
    T::unused(1),
    T::brush(2, 2, 1, 2, "Dirt"),
    T::brush(3, 3, 2, 3, "Lava"),
    T::brush(4, 5, 5, 5, "High Dirt"),
    T::brush(5, 6, 6, 6, "High Lava"),
    T::brush(6, 4, 3, 4, "Shale"),
    T::brush(7, 7, 7, 7, "High Shale"),
    T::brush(8, 1, 0, 1, "Magma"),
    T::brush(9, 8, 4, 8, "Broken Rock"),
    T::unused(10),
    T::shapes(11, 55),
    T::shapes(12, 69),
    T::shapes(13, 83),
    T::shapes(14, 97),
    T::shapes(15, 111),
    T::shapes(16, 41),
    T::shapes(17, 27),
];

pub const ASHWORLD_ADJACENCY: &[u16] = &[
    8, 17, 0, //
    17, 8, 2, 11, 13, 16, 15, 0, //
    2, 17, 16, 11, 13, 15, 0, //
    3, 11, 0, //
    11, 3, 2, 17, 16, 13, 15, 0, //
    6, 13, 0, //
    13, 6, 2, 17, 16, 11, 15, 0, //
    9, 15, 0, //
    15, 9, 13, 2, 17, 16, 11, 0, //
    16, 2, 4, 11, 13, 12, 14, 17, 15, 0, //
    4, 16, 12, 14, 0, //
    5, 12, 0, //
    12, 5, 4, 16, 14, 0, //
    7, 14, 0, //
    14, 7, 4, 16, 12, 0, //
    0,
];

pub const JUNGLE_TERRAIN_TYPES: &[TerrainTypeInfo] = &[
    T::shapes(0, 14),
    T::unused(1),
    T::brush(2, 1, 1, 1, "Dirt"),
    T::brush(3, 2, 8, 2, "High Dirt"),
    T::brush(4, 13, 2, 4, "Mud"),
    T::brush(5, 3, 0, 3, "Water"),
    T::unused(6),
    T::unused(7),
    T::brush(8, 4, 3, 8, "Jungle"),
    T::brush(9, 5, 6, 11, "Raised Jungle"),
    T::brush(10, 9, 9, 14, "High Jungle"),
    T::brush(11, 7, 5, 12, "Ruins"),
    T::brush(12, 10, 10, 15, "High Ruins"),
    T::brush(13, 11, 11, 16, "High Raised Jungle"),
    T::unused(14),
    T::brush(15, 6, 4, 10, "Rocky Ground"),
    T::brush(16, 8, 7, 13, "Temple"),
    T::brush(17, 12, 12, 17, "High Temple"),
    T::unused(18),
    T::unused(19),
    T::unused(20),
    T::unused(21),
    T::shapes(22, 171),
    T::shapes(23, 45),
    T::shapes(24, 115),
    T::shapes(25, 87),
    T::shapes(26, 129),
    T::unused(27),
    T::shapes(28, 59),
    T::shapes(29, 73),
    T::shapes(30, 143),
    T::unused(31),
    T::shapes(32, 101),
    T::shapes(33, 157),
    T::shapes(34, 17),
    T::shapes(35, 31),
];

pub const JUNGLE_ADJACENCY: &[u16] = &[
    5, 35, 0, //
    35, 5, 2, 23, 28, 34, 22, 0, //
    2, 34, 35, 23, 28, 22, 0, //
    34, 2, 3, 24, 23, 28, 35, 22, 0, //
    3, 34, 24, 0, //
    8, 23, 29, 25, 32, 0, //
    4, 22, 0, //
    22, 4, 2, 34, 35, 23, 28, 0, //
    23, 8, 2, 35, 34, 28, 25, 29, 22, 0, //
    15, 28, 0, //
    28, 15, 2, 34, 35, 23, 22, 0, //
    9, 29, 0, //
    29, 9, 8, 25, 32, 23, 0, //
    11, 25, 0, //
    25, 11, 8, 23, 29, 32, 0, //
    16, 32, 0, //
    32, 16, 8, 25, 29, 0, //
    10, 24, 26, 30, 33, 0, //
    24, 10, 3, 34, 26, 30, 0, //
    12, 26, 0, //
    26, 12, 10, 24, 30, 33, 0, //
    13, 30, 0, //
    30, 13, 10, 26, 24, 33, 0, //
    17, 33, 0, //
    33, 17, 10, 26, 30, 0, //
    0,
];

pub const DESERT_TERRAIN_TYPES: &[TerrainTypeInfo] = &[
    T::shapes(0, 14),
    T::unused(1),
    T::brush(2, 1, 1, 1, "Dirt"),
    T::brush(3, 2, 8, 2, "High Dirt"),
    T::brush(4, 13, 2, 4, "Dried Mud"),
    T::brush(5, 3, 0, 3, "Tar"),
    T::unused(6),
    T::unused(7),
    T::brush(8, 4, 3, 8, "Sand Dunes"),
    T::brush(9, 5, 6, 11, "Sandy Sunken Pit"),
    T::brush(10, 9, 9, 14, "High Sand Dunes"),
    T::brush(11, 7, 5, 12, "Crags"),
    T::brush(12, 10, 10, 15, "High Crags"),
    T::brush(13, 11, 11, 16, "High Sandy Sunken Pit"),
    T::unused(14),
    T::brush(15, 6, 4, 10, "Rocky Ground"),
    T::brush(16, 8, 7, 13, "Compound"),
    T::brush(17, 12, 12, 17, "High Compound"),
    T::unused(18),
    T::unused(19),
    T::unused(20),
    T::unused(21),
    T::shapes(22, 171),
    T::shapes(23, 45),
    T::shapes(24, 115),
    T::shapes(25, 87),
    T::shapes(26, 129),
    T::unused(27),
    T::shapes(28, 59),
    T::shapes(29, 73),
    T::shapes(30, 143),
    T::unused(31),
    T::shapes(32, 101),
    T::shapes(33, 157),
    T::shapes(34, 17),
    T::shapes(35, 31),
];

pub const ARCTIC_TERRAIN_TYPES: &[TerrainTypeInfo] = &[
    T::shapes(0, 14),
    T::unused(1),
    T::brush(2, 1, 1, 1, "Snow"),
    T::brush(3, 2, 8, 2, "High Snow"),
    T::brush(4, 13, 2, 4, "Moguls"),
    T::brush(5, 3, 0, 3, "Ice"),
    T::unused(6),
    T::unused(7),
    T::brush(8, 4, 3, 8, "Dirt"),
    T::brush(9, 5, 6, 11, "Water"),
    T::brush(10, 9, 9, 14, "High Dirt"),
    T::brush(11, 7, 5, 12, "Grass"),
    T::brush(12, 10, 10, 15, "High Grass"),
    T::brush(13, 11, 11, 16, "High Water"),
    T::unused(14),
    T::brush(15, 6, 4, 10, "Rocky Snow"),
    T::brush(16, 8, 7, 13, "Outpost"),
    T::brush(17, 12, 12, 17, "High Outpost"),
    T::unused(18),
    T::unused(19),
    T::unused(20),
    T::unused(21),
    T::shapes(22, 171),
    T::shapes(23, 45),
    T::shapes(24, 115),
    T::shapes(25, 87),
    T::shapes(26, 129),
    T::unused(27),
    T::shapes(28, 59),
    T::shapes(29, 73),
    T::shapes(30, 143),
    T::unused(31),
    T::shapes(32, 101),
    T::shapes(33, 157),
    T::shapes(34, 17),
    T::shapes(35, 31),
];

pub const TWILIGHT_TERRAIN_TYPES: &[TerrainTypeInfo] = &[
    T::shapes(0, 14),
    T::unused(1),
    T::brush(2, 1, 1, 1, "Dirt"),
    T::brush(3, 2, 8, 2, "High Dirt"),
    T::brush(4, 13, 2, 4, "Mud"),
    T::brush(5, 3, 0, 3, "Water"),
    T::unused(6),
    T::unused(7),
    T::brush(8, 4, 3, 8, "Crushed Rock"),
    T::brush(9, 5, 6, 11, "Sunken Ground"),
    T::brush(10, 9, 9, 14, "High Crushed Rock"),
    T::brush(11, 7, 5, 12, "Flagstones"),
    T::brush(12, 10, 10, 15, "High Flagstones"),
    T::brush(13, 11, 11, 16, "High Sunken Ground"),
    T::unused(14),
    T::brush(15, 6, 4, 10, "Crevices"),
    T::brush(16, 8, 7, 13, "Basilica"),
    T::brush(17, 12, 12, 17, "High Basilica"),
    T::unused(18),
    T::unused(19),
    T::unused(20),
    T::unused(21),
    T::shapes(22, 171),
    T::shapes(23, 45),
    T::shapes(24, 115),
    T::shapes(25, 87),
    T::shapes(26, 129),
    T::unused(27),
    T::shapes(28, 59),
    T::shapes(29, 73),
    T::shapes(30, 143),
    T::unused(31),
    T::shapes(32, 101),
    T::shapes(33, 157),
    T::shapes(34, 17),
    T::shapes(35, 31),
];

/// The descriptor table for a tileset.
pub const fn tileset_terrain_types(tileset: TilesetId) -> &'static [TerrainTypeInfo] {
    match tileset {
        TilesetId::Badlands => BADLANDS_TERRAIN_TYPES,
        TilesetId::SpacePlatform => SPACE_TERRAIN_TYPES,
        TilesetId::Installation => INSTALLATION_TERRAIN_TYPES,
        TilesetId::Ashworld => ASHWORLD_TERRAIN_TYPES,
        TilesetId::Jungle => JUNGLE_TERRAIN_TYPES,
        TilesetId::Desert => DESERT_TERRAIN_TYPES,
        TilesetId::Arctic => ARCTIC_TERRAIN_TYPES,
        TilesetId::Twilight => TWILIGHT_TERRAIN_TYPES,
    }
}

/// The compressed adjacency sequence for a tileset.
///
/// Desert, Arctic and Twilight share Jungle's sequence; their descriptor
/// tables carry the same indices and isom values.
pub const fn tileset_adjacency(tileset: TilesetId) -> &'static [u16] {
    match tileset {
        TilesetId::Badlands => BADLANDS_ADJACENCY,
        TilesetId::SpacePlatform => SPACE_ADJACENCY,
        TilesetId::Installation => INSTALLATION_ADJACENCY,
        TilesetId::Ashworld => ASHWORLD_ADJACENCY,
        TilesetId::Jungle | TilesetId::Desert | TilesetId::Arctic | TilesetId::Twilight => {
            JUNGLE_ADJACENCY
        }
    }
}

/// The descriptor index of a tileset's default brush.
pub const fn default_brush_index(tileset: TilesetId) -> usize {
    match tileset {
        TilesetId::Badlands => 2,        // Dirt
        TilesetId::SpacePlatform => 3,   // Platform
        TilesetId::Installation => 3,    // Floor
        TilesetId::Ashworld => 2,        // Dirt
        TilesetId::Jungle => 8,          // Jungle
        TilesetId::Desert => 8,          // Sand Dunes
        TilesetId::Arctic => 2,          // Snow
        TilesetId::Twilight => 2,        // Dirt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_indices_are_positional() {
        for tileset in TilesetId::ALL {
            for (i, info) in tileset_terrain_types(tileset).iter().enumerate() {
                assert_eq!(info.index as usize, i);
            }
        }
    }

    #[test]
    fn brushes_have_isom_values_and_link_ids() {
        for tileset in TilesetId::ALL {
            for info in tileset_terrain_types(tileset) {
                if info.brush_sort_order >= 0 {
                    assert_ne!(info.isom_value, 0, "{}: {}", info.index, info.name);
                    assert_ne!(info.link_id, LinkId::NONE);
                    assert!(!info.name.is_empty());
                }
            }
        }
    }

    #[test]
    fn default_brush_is_a_brush() {
        for tileset in TilesetId::ALL {
            let info = tileset_terrain_types(tileset)[default_brush_index(tileset)];
            assert!(info.brush_sort_order >= 0);
        }
    }

    #[test]
    fn adjacency_sequences_terminate() {
        for tileset in TilesetId::ALL {
            let seq = tileset_adjacency(tileset);
            assert_eq!(seq.last(), Some(&0));
            let types = tileset_terrain_types(tileset).len() as u16;
            assert!(seq.iter().all(|&t| t < types));
        }
    }
}
