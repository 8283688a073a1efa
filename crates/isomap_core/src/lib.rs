//! Core data model for the isomap isometric terrain engine
//!
//! This crate provides the fundamental types shared by the tileset loader
//! and the editing engine:
//! - `Link` / `LinkId` - directional link codes and whole-quadrant tags
//! - `IsomDiamond` / `Quadrant` / `ProjectedQuadrant` - the diamond and
//!   rectangle coordinate space with its edge-flag encoding
//! - `IsomRect` - the packed 8-byte rectangle record with editor flags
//! - `Shape` / `SHAPES` / `ShapeLinks` - the 14-shape catalog and link-table
//!   rows
//! - `TileGroup` - parsed tile-group records and tile-value packing

pub mod geometry;
pub mod links;
pub mod rect;
pub mod shape;
pub mod tile;

pub use geometry::{
    edge_flags, BoundingBox, IsomDiamond, Neighbor, ProjectedQuadrant, Quadrant, RectPoint, Side,
    NEIGHBORS, QUADRANTS, SIDES,
};
pub use links::{DirectionalLinks, Link, LinkId};
pub use rect::IsomRect;
pub use shape::{
    BottomLeftLinks, BottomRightLinks, Shape, ShapeId, ShapeLinks, ShapeQuadrant, TopLeftLinks,
    TopRightLinks, SHAPES, SHAPE_COUNT,
};
pub use tile::{group_index, subtile_index, tile_value, StackConnection, TileGroup};
