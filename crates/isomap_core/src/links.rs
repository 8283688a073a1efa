//! Directional link codes and whole-quadrant link ids

use crate::geometry::Side;
use serde::{Deserialize, Serialize};

/// Directional connection code between tile-group edges.
///
/// Codes 1..=48 are *soft* links: any two soft codes are treated as
/// compatible when matching shape quadrants. Codes above 48 are *hard* links
/// with a fixed directional meaning, used both to identify shape quadrants
/// and to chain entries within one terrain type. Zero means "no link".
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Link(pub u16);

impl Link {
    pub const NONE: Link = Link(0);
    /// Highest soft link code; everything above is a hard link.
    pub const SOFT_MAX: Link = Link(48);

    /// Bottom-left link
    pub const BL: Link = Link(49);
    /// Top-right link
    pub const TR: Link = Link(50);
    /// Bottom-right link
    pub const BR: Link = Link(51);
    /// Top-left link
    pub const TL: Link = Link(52);
    /// Far-right link
    pub const FR: Link = Link(53);
    /// Far-left link
    pub const FL: Link = Link(54);
    /// Left-hand side link
    pub const LH: Link = Link(55);
    /// Right-hand side link
    pub const RH: Link = Link(56);

    #[inline]
    pub const fn is_soft(self) -> bool {
        self.0 <= Self::SOFT_MAX.0
    }

    #[inline]
    pub const fn is_hard(self) -> bool {
        self.0 > Self::SOFT_MAX.0
    }
}

/// A single tag for comparing link-table quadrants as a whole, instead of
/// their four directional links.
///
/// Ids 1..=254 may match quadrants of any terrain type. The reserved ids
/// (255 and up) only match within the same terrain type. `NONE` in a shape
/// template marks an id that gets populated after the directional links are
/// calculated.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct LinkId(pub u16);

impl LinkId {
    pub const NONE: LinkId = LinkId(0);

    /// Top-right and/or bottom-left id on shapes towards the north-west of a terrain type
    pub const TRBL_NW: LinkId = LinkId(255);
    /// Top-right and/or bottom-left id on shapes towards the south-east of a terrain type
    pub const TRBL_SE: LinkId = LinkId(256);
    /// Top-left and/or bottom-right id on shapes towards the north-east of a terrain type
    pub const TLBR_NE: LinkId = LinkId(257);
    /// Top-left and/or bottom-right id on shapes towards the south-west of a terrain type
    pub const TLBR_SW: LinkId = LinkId(258);

    /// Ids at or above this value only match within the same terrain type.
    pub const ONLY_MATCH_SAME_TYPE: LinkId = Self::TRBL_NW;

    #[inline]
    pub const fn is_same_type_only(self) -> bool {
        self.0 >= Self::ONLY_MATCH_SAME_TYPE.0
    }
}

/// The four directional links of a tile group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DirectionalLinks {
    pub left: Link,
    pub top: Link,
    pub right: Link,
    pub bottom: Link,
}

impl DirectionalLinks {
    #[inline]
    pub fn side(&self, side: Side) -> Link {
        match side {
            Side::Left => self.left,
            Side::Top => self.top,
            Side::Right => self.right,
            Side::Bottom => self.bottom,
        }
    }

    /// A group with no hard links does not participate in link-table creation.
    pub const fn has_no_hard_links(&self) -> bool {
        self.left.is_soft() && self.top.is_soft() && self.right.is_soft() && self.bottom.is_soft()
    }

    /// A group that is all hard links does not participate either.
    pub const fn is_all_hard_links(&self) -> bool {
        self.left.is_hard() && self.top.is_hard() && self.right.is_hard() && self.bottom.is_hard()
    }

    /// Whether this group's links can populate a shape quadrant.
    pub const fn is_shape_quadrant(&self) -> bool {
        !self.is_all_hard_links() && !self.has_no_hard_links()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn soft_and_hard_split_at_48() {
        assert!(Link(48).is_soft());
        assert!(Link(49).is_hard());
        assert!(Link::NONE.is_soft());
        assert!(Link::RH.is_hard());
    }

    #[test]
    fn shape_quadrant_requires_mixed_links() {
        let all_soft = DirectionalLinks {
            left: Link(1),
            top: Link(2),
            right: Link(3),
            bottom: Link(4),
        };
        let all_hard = DirectionalLinks {
            left: Link::BL,
            top: Link::TR,
            right: Link::BR,
            bottom: Link::TL,
        };
        let mixed = DirectionalLinks {
            left: Link(1),
            top: Link::TR,
            right: Link(3),
            bottom: Link(4),
        };
        assert!(!all_soft.is_shape_quadrant());
        assert!(!all_hard.is_shape_quadrant());
        assert!(mixed.is_shape_quadrant());
    }

    #[test]
    fn reserved_link_ids_are_same_type_only() {
        assert!(!LinkId(254).is_same_type_only());
        assert!(LinkId::TRBL_NW.is_same_type_only());
        assert!(LinkId::TLBR_SW.is_same_type_only());
    }
}
