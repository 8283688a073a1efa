//! The 8-byte isom rectangle record
//!
//! Each field packs a 12-bit link-table row index (upper bits) with a 4-bit
//! edge-flag nibble. Two bits double as in-memory editor flags while an edit
//! is in flight: `MODIFIED` rides the low bit, `VISITED` the high bit of the
//! `right` field. Persisted values never carry editor flags.

use crate::geometry::{ProjectedQuadrant, Side};
use crate::links::Link;
use crate::shape::ShapeLinks;
use serde::{Deserialize, Serialize};

/// Link state for one quadrant of each of the four diamonds touching this
/// rectangle coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IsomRect {
    pub left: u16,
    pub top: u16,
    pub right: u16,
    pub bottom: u16,
}

impl IsomRect {
    /// Editor flag: the side was written during the current pass.
    pub const MODIFIED: u16 = 0x0001;
    /// Editor flag: the rectangle was visited by the radial propagator.
    pub const VISITED: u16 = 0x8000;
    /// Mask clearing both editor flags.
    pub const CLEAR_ALL: u16 = 0x7FFE;

    pub const fn new(left: u16, top: u16, right: u16, bottom: u16) -> IsomRect {
        IsomRect {
            left,
            top,
            right,
            bottom,
        }
    }

    /// A rectangle with all four fields set to the same raw value.
    pub const fn uniform(value: u16) -> IsomRect {
        IsomRect {
            left: value,
            top: value,
            right: value,
            bottom: value,
        }
    }

    #[inline]
    pub fn side(&self, side: Side) -> u16 {
        match side {
            Side::Left => self.left,
            Side::Top => self.top,
            Side::Right => self.right,
            Side::Bottom => self.bottom,
        }
    }

    #[inline]
    fn side_mut(&mut self, side: Side) -> &mut u16 {
        match side {
            Side::Left => &mut self.left,
            Side::Top => &mut self.top,
            Side::Right => &mut self.right,
            Side::Bottom => &mut self.bottom,
        }
    }

    /// The encoded value of one side with editor flags cleared.
    #[inline]
    pub fn isom_value(&self, side: Side) -> u16 {
        self.side(side) & Self::CLEAR_ALL
    }

    /// Writes a link-table row to both sides of the given quadrant.
    pub fn set_quadrant(&mut self, quadrant: ProjectedQuadrant, value: u16) {
        *self.side_mut(quadrant.first_side) = (value << 4) | quadrant.first_edge_flags;
        *self.side_mut(quadrant.second_side) = (value << 4) | quadrant.second_edge_flags;
    }

    #[inline]
    pub fn is_left_modified(&self) -> bool {
        self.left & Self::MODIFIED != 0
    }

    #[inline]
    pub fn is_left_or_right_modified(&self) -> bool {
        (self.left | self.right) & Self::MODIFIED != 0
    }

    pub fn set_modified(&mut self, quadrant: ProjectedQuadrant) {
        *self.side_mut(quadrant.first_side) |= Self::MODIFIED;
        *self.side_mut(quadrant.second_side) |= Self::MODIFIED;
    }

    #[inline]
    pub fn is_visited(&self) -> bool {
        self.right & Self::VISITED != 0
    }

    #[inline]
    pub fn set_visited(&mut self) {
        self.right |= Self::VISITED;
    }

    pub fn clear_editor_flags(&mut self) {
        self.left &= Self::CLEAR_ALL;
        self.top &= Self::CLEAR_ALL;
        self.right &= Self::CLEAR_ALL;
        self.bottom &= Self::CLEAR_ALL;
    }

    pub fn clear(&mut self) {
        *self = IsomRect::default();
    }

    /// A copy with editor flags cleared on every field.
    pub fn without_editor_flags(&self) -> IsomRect {
        IsomRect {
            left: self.left & Self::CLEAR_ALL,
            top: self.top & Self::CLEAR_ALL,
            right: self.right & Self::CLEAR_ALL,
            bottom: self.bottom & Self::CLEAR_ALL,
        }
    }

    /// The 6-bit-packed signature of this rectangle's four edge links.
    ///
    /// Each side contributes the edge link its row exposes under the side's
    /// edge-flag nibble; the final six bits carry the last terrain type seen
    /// on a side whose edge link was hard. Rows outside the link table
    /// contribute nothing.
    pub fn hash(&self, isom_links: &[ShapeLinks]) -> u32 {
        let mut hash = 0u32;
        let mut last_terrain_type = 0u16;
        for side in crate::geometry::SIDES {
            let isom_value = self.isom_value(side);
            let row = isom_links
                .get(usize::from(isom_value >> 4))
                .copied()
                .unwrap_or_default();
            let edge_link = row.edge_link(isom_value);
            hash = (hash | u32::from(edge_link.0)) << 6;

            if row.terrain_type != 0 && edge_link > Link::SOFT_MAX {
                last_terrain_type = u16::from(row.terrain_type);
            }
        }
        hash | u32::from(last_terrain_type)
    }

    /// Encodes the persisted little-endian layout.
    pub fn to_le_bytes(&self) -> [u8; 8] {
        let mut bytes = [0u8; 8];
        bytes[0..2].copy_from_slice(&self.left.to_le_bytes());
        bytes[2..4].copy_from_slice(&self.top.to_le_bytes());
        bytes[4..6].copy_from_slice(&self.right.to_le_bytes());
        bytes[6..8].copy_from_slice(&self.bottom.to_le_bytes());
        bytes
    }

    /// Decodes the persisted little-endian layout.
    pub fn from_le_bytes(bytes: [u8; 8]) -> IsomRect {
        IsomRect {
            left: u16::from_le_bytes([bytes[0], bytes[1]]),
            top: u16::from_le_bytes([bytes[2], bytes[3]]),
            right: u16::from_le_bytes([bytes[4], bytes[5]]),
            bottom: u16::from_le_bytes([bytes[6], bytes[7]]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Quadrant, QUADRANTS};

    #[test]
    fn quadrant_write_reads_back_through_both_sides() {
        for quadrant in QUADRANTS {
            let projected = ProjectedQuadrant::of(quadrant);
            let mut rect = IsomRect::default();
            rect.set_quadrant(projected, 0x123);
            assert_eq!(rect.isom_value(projected.first_side) >> 4, 0x123);
            assert_eq!(rect.isom_value(projected.second_side) >> 4, 0x123);
            assert_eq!(
                rect.side(projected.first_side) & 0xF,
                projected.first_edge_flags
            );
            assert_eq!(
                rect.side(projected.second_side) & 0xF,
                projected.second_edge_flags
            );
        }
    }

    #[test]
    fn editor_flags_overlay_and_clear() {
        let mut rect = IsomRect::default();
        rect.set_quadrant(ProjectedQuadrant::of(Quadrant::TopLeft), 5);
        rect.set_modified(ProjectedQuadrant::of(Quadrant::BottomRight));
        rect.set_visited();

        assert!(rect.is_left_modified());
        assert!(rect.is_left_or_right_modified());
        assert!(rect.is_visited());

        let value_before = rect.isom_value(Side::Left);
        rect.clear_editor_flags();
        assert!(!rect.is_left_modified());
        assert!(!rect.is_visited());
        assert_eq!(rect.isom_value(Side::Left), value_before);
    }

    #[test]
    fn visited_flag_survives_value_masking() {
        let mut rect = IsomRect::default();
        rect.set_visited();
        assert_eq!(rect.isom_value(Side::Right), 0);
        assert!(rect.is_visited());
    }

    #[test]
    fn le_byte_round_trip() {
        let rect = IsomRect::new(0x0123, 0x4567, 0x89AB, 0xCDEF);
        assert_eq!(IsomRect::from_le_bytes(rect.to_le_bytes()), rect);
        assert_eq!(rect.to_le_bytes()[0..2], [0x23, 0x01]);
    }

    #[test]
    fn serde_round_trip() {
        let rect = IsomRect::new(1, 2, 3, 4);
        let json = serde_json::to_string(&rect).unwrap();
        assert_eq!(serde_json::from_str::<IsomRect>(&json).unwrap(), rect);
    }

    #[test]
    fn hash_is_pure_and_ignores_editor_flags() {
        let links = vec![
            ShapeLinks::default(),
            ShapeLinks {
                terrain_type: 2,
                top_left: crate::shape::TopLeftLinks {
                    right: Link(3),
                    bottom: Link(4),
                    link_id: crate::links::LinkId(1),
                },
                top_right: crate::shape::TopRightLinks {
                    left: Link(3),
                    bottom: Link(4),
                    link_id: crate::links::LinkId(1),
                },
                bottom_right: crate::shape::BottomRightLinks {
                    left: Link(3),
                    top: Link(4),
                    link_id: crate::links::LinkId(1),
                },
                bottom_left: crate::shape::BottomLeftLinks {
                    top: Link(4),
                    right: Link(3),
                    link_id: crate::links::LinkId(1),
                },
            },
        ];

        let mut rect = IsomRect::default();
        for quadrant in QUADRANTS {
            // Writing row 1 into each quadrant of the surrounding rects puts
            // row 1 behind every nibble of this one too.
            rect.set_quadrant(ProjectedQuadrant::of(quadrant), 1);
        }
        let clean = rect.hash(&links);

        rect.set_modified(ProjectedQuadrant::of(Quadrant::TopLeft));
        rect.set_visited();
        assert_eq!(rect.hash(&links), clean);
        assert_eq!(rect.hash(&links), clean);
    }
}
