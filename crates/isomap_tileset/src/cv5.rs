//! CV5 tile-group record parsing
//!
//! One 52-byte little-endian record per tile group: terrain type,
//! buildability, ground height, four directional links, a four-field stack
//! connection block (of which the second field is the top connection and the
//! fourth the bottom), then sixteen mega-tile indices.

use crate::TilesetError;
use isomap_core::{DirectionalLinks, Link, StackConnection, TileGroup};

/// Size of one tile-group record in bytes.
pub const TILE_GROUP_RECORD_SIZE: usize = 52;

/// Tile groups past this count do not participate in link-table generation.
pub const MAX_TILE_GROUPS: usize = 1024;

#[inline]
fn read_u16(bytes: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([bytes[offset], bytes[offset + 1]])
}

fn parse_tile_group(record: &[u8]) -> TileGroup {
    let mut mega_tile_index = [0u16; 16];
    for (i, slot) in mega_tile_index.iter_mut().enumerate() {
        *slot = read_u16(record, 20 + 2 * i);
    }
    TileGroup {
        terrain_type: read_u16(record, 0),
        buildability: record[2],
        ground_height: record[3],
        links: DirectionalLinks {
            left: Link(read_u16(record, 4)),
            top: Link(read_u16(record, 6)),
            right: Link(read_u16(record, 8)),
            bottom: Link(read_u16(record, 10)),
        },
        stack: StackConnection {
            top: read_u16(record, 14),
            bottom: read_u16(record, 18),
        },
        mega_tile_index,
    }
}

/// Parses a whole CV5 payload into tile groups.
///
/// The payload must be a non-empty multiple of the record size.
pub fn parse_tile_groups(bytes: &[u8]) -> Result<Vec<TileGroup>, TilesetError> {
    if bytes.len() % TILE_GROUP_RECORD_SIZE != 0 {
        return Err(TilesetError::CorruptAsset {
            size: bytes.len(),
            record: TILE_GROUP_RECORD_SIZE,
        });
    }
    if bytes.is_empty() {
        return Err(TilesetError::EmptyAsset);
    }
    Ok(bytes
        .chunks_exact(TILE_GROUP_RECORD_SIZE)
        .map(parse_tile_group)
        .collect())
}

/// Encodes tile groups back into the CV5 record layout.
///
/// Round-trips everything `parse_tile_groups` reads; the unused stack-block
/// fields encode as zero.
pub fn encode_tile_groups(groups: &[TileGroup]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(groups.len() * TILE_GROUP_RECORD_SIZE);
    for group in groups {
        bytes.extend_from_slice(&group.terrain_type.to_le_bytes());
        bytes.push(group.buildability);
        bytes.push(group.ground_height);
        for link in [
            group.links.left,
            group.links.top,
            group.links.right,
            group.links.bottom,
        ] {
            bytes.extend_from_slice(&link.0.to_le_bytes());
        }
        bytes.extend_from_slice(&0u16.to_le_bytes());
        bytes.extend_from_slice(&group.stack.top.to_le_bytes());
        bytes.extend_from_slice(&0u16.to_le_bytes());
        bytes.extend_from_slice(&group.stack.bottom.to_le_bytes());
        for index in group.mega_tile_index {
            bytes.extend_from_slice(&index.to_le_bytes());
        }
    }
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_group() -> TileGroup {
        TileGroup {
            terrain_type: 7,
            buildability: 1,
            ground_height: 2,
            links: DirectionalLinks {
                left: Link(3),
                top: Link(4),
                right: Link::BR,
                bottom: Link(6),
            },
            stack: StackConnection { top: 9, bottom: 11 },
            mega_tile_index: [5; 16],
        }
    }

    #[test]
    fn record_round_trip() {
        let groups = vec![sample_group(), TileGroup::default()];
        let bytes = encode_tile_groups(&groups);
        assert_eq!(bytes.len(), 2 * TILE_GROUP_RECORD_SIZE);
        assert_eq!(parse_tile_groups(&bytes).unwrap(), groups);
    }

    #[test]
    fn misaligned_payload_is_corrupt() {
        let mut bytes = encode_tile_groups(&[sample_group()]);
        bytes.pop();
        assert!(matches!(
            parse_tile_groups(&bytes),
            Err(TilesetError::CorruptAsset { .. })
        ));
    }

    #[test]
    fn empty_payload_is_rejected() {
        assert!(matches!(
            parse_tile_groups(&[]),
            Err(TilesetError::EmptyAsset)
        ));
    }
}
