//! Tile groups and tile-value packing
//!
//! A concrete tile value packs a 12-bit group index with a 4-bit subtile
//! index; `0` is the unset/void sentinel. Groups chain vertically through
//! their stack connections.

use crate::links::DirectionalLinks;
use serde::{Deserialize, Serialize};

/// Vertical adjacency channel between tile groups.
///
/// A group with a non-zero `top` expects the group above it to carry the
/// same code in `bottom`, and vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StackConnection {
    pub top: u16,
    pub bottom: u16,
}

/// One tile group: sixteen concrete tiles sharing links, terrain type and
/// stack connections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileGroup {
    pub terrain_type: u16,
    pub buildability: u8,
    pub ground_height: u8,
    pub links: DirectionalLinks,
    pub stack: StackConnection,
    pub mega_tile_index: [u16; 16],
}

impl Default for TileGroup {
    fn default() -> Self {
        TileGroup {
            terrain_type: 0,
            buildability: 0,
            ground_height: 0,
            links: DirectionalLinks::default(),
            stack: StackConnection::default(),
            mega_tile_index: [0; 16],
        }
    }
}

/// The group index of a packed tile value.
#[inline]
pub const fn group_index(tile_value: u16) -> u16 {
    tile_value / 16
}

/// The subtile index of a packed tile value.
#[inline]
pub const fn subtile_index(tile_value: u16) -> u16 {
    tile_value % 16
}

/// Packs a group and subtile back into a tile value.
#[inline]
pub const fn tile_value(group: u16, subtile: u16) -> u16 {
    group * 16 + subtile
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tile_value_packing_round_trips() {
        let value = tile_value(0x123, 0xB);
        assert_eq!(group_index(value), 0x123);
        assert_eq!(subtile_index(value), 0xB);
        assert_eq!(group_index(0), 0);
        assert_eq!(subtile_index(0), 0);
    }
}
