//! The 14 canonical terrain shapes and link-table rows
//!
//! Every terrain type that is not a solid brush owns one block of 14
//! link-table rows, one per shape. The shape templates below describe, per
//! quadrant, which hard links a tile group must carry to populate that
//! quadrant, plus the reserved same-type-only link ids.

use crate::geometry::{edge_flags, Quadrant};
use crate::links::{DirectionalLinks, Link, LinkId};
use serde::{Deserialize, Serialize};

/// One quadrant of a shape template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShapeQuadrant {
    pub left: Link,
    pub top: Link,
    pub right: Link,
    pub bottom: Link,
    pub link_id: LinkId,
    pub is_stack_top: bool,
}

impl ShapeQuadrant {
    const fn new() -> ShapeQuadrant {
        ShapeQuadrant {
            left: Link::NONE,
            top: Link::NONE,
            right: Link::NONE,
            bottom: Link::NONE,
            link_id: LinkId::NONE,
            is_stack_top: false,
        }
    }

    const fn left(mut self, left: Link) -> ShapeQuadrant {
        self.left = left;
        self
    }

    const fn top(mut self, top: Link) -> ShapeQuadrant {
        self.top = top;
        self
    }

    const fn right(mut self, right: Link) -> ShapeQuadrant {
        self.right = right;
        self
    }

    const fn bottom(mut self, bottom: Link) -> ShapeQuadrant {
        self.bottom = bottom;
        self
    }

    const fn link_id(mut self, link_id: LinkId) -> ShapeQuadrant {
        self.link_id = link_id;
        self
    }

    const fn stack_top(mut self) -> ShapeQuadrant {
        self.is_stack_top = true;
        self
    }

    /// Whether a tile group's links fit this quadrant.
    ///
    /// Hard links must match exactly; two soft links always agree. A
    /// stack-top quadrant only accepts groups with nothing stacked above.
    pub fn matches(&self, links: &DirectionalLinks, no_stack_above: bool) -> bool {
        (links.left == self.left || (links.left.is_soft() && self.left.is_soft()))
            && (links.top == self.top || (links.top.is_soft() && self.top.is_soft()))
            && (links.right == self.right || (links.right.is_soft() && self.right.is_soft()))
            && (links.bottom == self.bottom || (links.bottom.is_soft() && self.bottom.is_soft()))
            && (no_stack_above || !self.is_stack_top)
    }
}

/// A shape template: four quadrant patterns over a 2x2 diamond neighborhood.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Shape {
    pub top_left: ShapeQuadrant,
    pub top_right: ShapeQuadrant,
    pub bottom_right: ShapeQuadrant,
    pub bottom_left: ShapeQuadrant,
}

impl Shape {
    const fn new() -> Shape {
        Shape {
            top_left: ShapeQuadrant::new(),
            top_right: ShapeQuadrant::new(),
            bottom_right: ShapeQuadrant::new(),
            bottom_left: ShapeQuadrant::new(),
        }
    }

    const fn top_left(mut self, q: ShapeQuadrant) -> Shape {
        self.top_left = q;
        self
    }

    const fn top_right(mut self, q: ShapeQuadrant) -> Shape {
        self.top_right = q;
        self
    }

    const fn bottom_right(mut self, q: ShapeQuadrant) -> Shape {
        self.bottom_right = q;
        self
    }

    const fn bottom_left(mut self, q: ShapeQuadrant) -> Shape {
        self.bottom_left = q;
        self
    }

    #[inline]
    pub fn quadrant(&self, quadrant: Quadrant) -> &ShapeQuadrant {
        match quadrant {
            Quadrant::TopLeft => &self.top_left,
            Quadrant::TopRight => &self.top_right,
            Quadrant::BottomRight => &self.bottom_right,
            Quadrant::BottomLeft => &self.bottom_left,
        }
    }

    pub fn matches(&self, quadrant: Quadrant, links: &DirectionalLinks, no_stack_above: bool) -> bool {
        self.quadrant(quadrant).matches(links, no_stack_above)
    }
}

/// Identifies one of the 14 shapes in a terrain type's link-table block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum ShapeId {
    EdgeNorthWest = 0,
    EdgeNorthEast = 1,
    EdgeSouthEast = 2,
    EdgeSouthWest = 3,
    JutOutNorth = 4,
    JutOutEast = 5,
    JutOutSouth = 6,
    JutOutWest = 7,
    JutInEast = 8,
    JutInWest = 9,
    JutInNorth = 10,
    JutInSouth = 11,
    Horizontal = 12,
    Vertical = 13,
}

pub const SHAPE_COUNT: usize = 14;

/// The canonical shape templates, indexed by [`ShapeId`].
pub const SHAPES: [Shape; SHAPE_COUNT] = [
    // EdgeNorthWest
    Shape::new()
        .top_right(
            ShapeQuadrant::new()
                .right(Link::BR)
                .bottom(Link::BR)
                .link_id(LinkId::TRBL_NW)
                .stack_top(),
        )
        .bottom_right(ShapeQuadrant::new().left(Link::BR).top(Link::BR))
        .bottom_left(
            ShapeQuadrant::new()
                .right(Link::BR)
                .bottom(Link::FR)
                .link_id(LinkId::TRBL_NW)
                .stack_top(),
        ),
    // EdgeNorthEast
    Shape::new()
        .top_left(
            ShapeQuadrant::new()
                .left(Link::BL)
                .bottom(Link::BL)
                .link_id(LinkId::TLBR_NE)
                .stack_top(),
        )
        .bottom_right(
            ShapeQuadrant::new()
                .left(Link::BL)
                .bottom(Link::FL)
                .link_id(LinkId::TLBR_NE)
                .stack_top(),
        )
        .bottom_left(ShapeQuadrant::new().top(Link::BL).right(Link::BL)),
    // EdgeSouthEast
    Shape::new()
        .top_left(ShapeQuadrant::new().right(Link::TL).bottom(Link::TL))
        .top_right(
            ShapeQuadrant::new()
                .left(Link::TL)
                .top(Link::FL)
                .link_id(LinkId::TRBL_SE),
        )
        .bottom_left(
            ShapeQuadrant::new()
                .left(Link::TL)
                .top(Link::TL)
                .link_id(LinkId::TRBL_SE),
        ),
    // EdgeSouthWest
    Shape::new()
        .top_left(
            ShapeQuadrant::new()
                .top(Link::FR)
                .right(Link::TR)
                .link_id(LinkId::TLBR_SW),
        )
        .top_right(ShapeQuadrant::new().left(Link::TR).bottom(Link::TR))
        .bottom_right(
            ShapeQuadrant::new()
                .top(Link::TR)
                .right(Link::TR)
                .link_id(LinkId::TLBR_SW),
        ),
    // JutOutNorth
    Shape::new()
        .bottom_right(
            ShapeQuadrant::new()
                .left(Link::BL)
                .bottom(Link::BL)
                .link_id(LinkId::TLBR_NE)
                .stack_top(),
        )
        .bottom_left(
            ShapeQuadrant::new()
                .right(Link::BR)
                .bottom(Link::BR)
                .link_id(LinkId::TRBL_NW)
                .stack_top(),
        ),
    // JutOutEast
    Shape::new()
        .top_left(
            ShapeQuadrant::new()
                .left(Link::BL)
                .bottom(Link::FL)
                .link_id(LinkId::TLBR_NE)
                .stack_top(),
        )
        .bottom_left(
            ShapeQuadrant::new()
                .left(Link::TL)
                .top(Link::FL)
                .link_id(LinkId::TRBL_SE),
        ),
    // JutOutSouth
    Shape::new()
        .top_left(
            ShapeQuadrant::new()
                .top(Link::TR)
                .right(Link::TR)
                .link_id(LinkId::TLBR_SW),
        )
        .top_right(
            ShapeQuadrant::new()
                .left(Link::TL)
                .top(Link::TL)
                .link_id(LinkId::TRBL_SE),
        ),
    // JutOutWest
    Shape::new()
        .top_right(
            ShapeQuadrant::new()
                .right(Link::BR)
                .bottom(Link::FR)
                .link_id(LinkId::TRBL_NW)
                .stack_top(),
        )
        .bottom_right(
            ShapeQuadrant::new()
                .top(Link::FR)
                .right(Link::TR)
                .link_id(LinkId::TLBR_SW),
        ),
    // JutInEast
    Shape::new()
        .top_left(
            ShapeQuadrant::new()
                .top(Link::FR)
                .right(Link::TR)
                .link_id(LinkId::TLBR_SW),
        )
        .top_right(ShapeQuadrant::new().left(Link::RH).bottom(Link::RH))
        .bottom_right(ShapeQuadrant::new().left(Link::RH).top(Link::RH))
        .bottom_left(
            ShapeQuadrant::new()
                .right(Link::BR)
                .bottom(Link::FR)
                .link_id(LinkId::TRBL_NW),
        ),
    // JutInWest
    Shape::new()
        .top_left(ShapeQuadrant::new().right(Link::LH).bottom(Link::LH))
        .top_right(
            ShapeQuadrant::new()
                .left(Link::TL)
                .top(Link::FL)
                .link_id(LinkId::TRBL_SE),
        )
        .bottom_right(
            ShapeQuadrant::new()
                .left(Link::BL)
                .bottom(Link::FL)
                .link_id(LinkId::TLBR_NE),
        )
        .bottom_left(ShapeQuadrant::new().top(Link::LH).right(Link::LH)),
    // JutInNorth
    Shape::new()
        .top_left(
            ShapeQuadrant::new()
                .left(Link::BL)
                .bottom(Link::BL)
                .link_id(LinkId::TLBR_NE)
                .stack_top(),
        )
        .top_right(
            ShapeQuadrant::new()
                .right(Link::BR)
                .bottom(Link::BR)
                .link_id(LinkId::TRBL_NW)
                .stack_top(),
        )
        .bottom_right(ShapeQuadrant::new().left(Link::BR).top(Link::BR))
        .bottom_left(ShapeQuadrant::new().top(Link::BL).right(Link::BL)),
    // JutInSouth
    Shape::new()
        .top_left(ShapeQuadrant::new().right(Link::TL).bottom(Link::TL))
        .top_right(ShapeQuadrant::new().left(Link::TR).bottom(Link::TR))
        .bottom_right(
            ShapeQuadrant::new()
                .top(Link::TR)
                .right(Link::TR)
                .link_id(LinkId::TLBR_SW),
        )
        .bottom_left(
            ShapeQuadrant::new()
                .left(Link::TL)
                .top(Link::TL)
                .link_id(LinkId::TRBL_SE),
        ),
    // Horizontal
    Shape::new()
        .top_left(
            ShapeQuadrant::new()
                .top(Link::TR)
                .right(Link::TR)
                .link_id(LinkId::TLBR_SW),
        )
        .top_right(
            ShapeQuadrant::new()
                .left(Link::TL)
                .top(Link::TL)
                .link_id(LinkId::TRBL_SE),
        )
        .bottom_right(
            ShapeQuadrant::new()
                .left(Link::BL)
                .bottom(Link::BL)
                .link_id(LinkId::TLBR_NE),
        )
        .bottom_left(
            ShapeQuadrant::new()
                .right(Link::BR)
                .bottom(Link::BR)
                .link_id(LinkId::TRBL_NW),
        ),
    // Vertical
    Shape::new()
        .top_left(
            ShapeQuadrant::new()
                .left(Link::BL)
                .bottom(Link::FL)
                .link_id(LinkId::TLBR_NE),
        )
        .top_right(
            ShapeQuadrant::new()
                .right(Link::BR)
                .bottom(Link::FR)
                .link_id(LinkId::TRBL_NW),
        )
        .bottom_right(
            ShapeQuadrant::new()
                .top(Link::FR)
                .right(Link::TR)
                .link_id(LinkId::TLBR_SW),
        )
        .bottom_left(
            ShapeQuadrant::new()
                .left(Link::TL)
                .top(Link::FL)
                .link_id(LinkId::TRBL_SE),
        ),
];

/// Top-left quadrant of a link-table row: outward sides are right and bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TopLeftLinks {
    pub right: Link,
    pub bottom: Link,
    pub link_id: LinkId,
}

/// Top-right quadrant of a link-table row: outward sides are left and bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TopRightLinks {
    pub left: Link,
    pub bottom: Link,
    pub link_id: LinkId,
}

/// Bottom-right quadrant of a link-table row: outward sides are left and top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BottomRightLinks {
    pub left: Link,
    pub top: Link,
    pub link_id: LinkId,
}

/// Bottom-left quadrant of a link-table row: outward sides are top and right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BottomLeftLinks {
    pub top: Link,
    pub right: Link,
    pub link_id: LinkId,
}

/// One row of the link table, addressed as `isom_value >> 4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ShapeLinks {
    pub terrain_type: u8,
    pub top_left: TopLeftLinks,
    pub top_right: TopRightLinks,
    pub bottom_right: BottomRightLinks,
    pub bottom_left: BottomLeftLinks,
}

impl ShapeLinks {
    #[inline]
    pub fn link_id(&self, quadrant: Quadrant) -> LinkId {
        match quadrant {
            Quadrant::TopLeft => self.top_left.link_id,
            Quadrant::TopRight => self.top_right.link_id,
            Quadrant::BottomRight => self.bottom_right.link_id,
            Quadrant::BottomLeft => self.bottom_left.link_id,
        }
    }

    /// Selects one of the row's eight named edges by an encoded field's
    /// edge-flag nibble.
    #[inline]
    pub fn edge_link(&self, isom_value: u16) -> Link {
        match isom_value & edge_flags::MASK {
            edge_flags::TOP_LEFT_RIGHT => self.top_left.right,
            edge_flags::TOP_LEFT_BOTTOM => self.top_left.bottom,
            edge_flags::TOP_RIGHT_LEFT => self.top_right.left,
            edge_flags::TOP_RIGHT_BOTTOM => self.top_right.bottom,
            edge_flags::BOTTOM_RIGHT_LEFT => self.bottom_right.left,
            edge_flags::BOTTOM_RIGHT_TOP => self.bottom_right.top,
            edge_flags::BOTTOM_LEFT_TOP => self.bottom_left.top,
            _ => self.bottom_left.right,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn soft_links_match_any_soft_template_position() {
        let q = SHAPES[ShapeId::EdgeNorthWest as usize].top_right;
        let links = DirectionalLinks {
            left: Link(7),
            top: Link(3),
            right: Link::BR,
            bottom: Link::BR,
        };
        assert!(q.matches(&links, true));

        // A stacked group cannot take a stack-top quadrant.
        assert!(!q.matches(&links, false));

        // A hard-link mismatch rejects the quadrant.
        let wrong = DirectionalLinks {
            left: Link(7),
            top: Link(3),
            right: Link::BL,
            bottom: Link::BR,
        };
        assert!(!q.matches(&wrong, true));
    }

    #[test]
    fn every_shape_has_some_hard_link() {
        for shape in &SHAPES {
            let quadrants = [
                shape.top_left,
                shape.top_right,
                shape.bottom_right,
                shape.bottom_left,
            ];
            assert!(quadrants.iter().any(|q| q.left.is_hard()
                || q.top.is_hard()
                || q.right.is_hard()
                || q.bottom.is_hard()));
        }
    }

    #[test]
    fn edge_link_selection_covers_all_nibbles() {
        let row = ShapeLinks {
            terrain_type: 1,
            top_left: TopLeftLinks {
                right: Link(1),
                bottom: Link(2),
                link_id: LinkId(9),
            },
            top_right: TopRightLinks {
                left: Link(3),
                bottom: Link(4),
                link_id: LinkId(9),
            },
            bottom_right: BottomRightLinks {
                left: Link(5),
                top: Link(6),
                link_id: LinkId(9),
            },
            bottom_left: BottomLeftLinks {
                top: Link(7),
                right: Link(8),
                link_id: LinkId(9),
            },
        };
        let expected = [
            (edge_flags::TOP_LEFT_RIGHT, Link(1)),
            (edge_flags::TOP_LEFT_BOTTOM, Link(2)),
            (edge_flags::TOP_RIGHT_LEFT, Link(3)),
            (edge_flags::TOP_RIGHT_BOTTOM, Link(4)),
            (edge_flags::BOTTOM_RIGHT_LEFT, Link(5)),
            (edge_flags::BOTTOM_RIGHT_TOP, Link(6)),
            (edge_flags::BOTTOM_LEFT_TOP, Link(7)),
            (edge_flags::BOTTOM_LEFT_RIGHT, Link(8)),
        ];
        for (nibble, link) in expected {
            assert_eq!(row.edge_link((37 << 4) | nibble), link);
        }
    }
}
