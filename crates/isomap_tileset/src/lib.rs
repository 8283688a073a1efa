//! Tileset dataset loading for the isomap terrain engine
//!
//! This crate turns a tileset's read-only metadata into the dataset the
//! editing engine consumes:
//! - the parsed CV5 tile-group table
//! - the generated link-shape table (`isom_links`)
//! - the expanded terrain-type adjacency matrix
//! - a signature index from directional-link hashes to tile groups
//! - the user-visible brush list
//!
//! A dataset is built once per tileset and is immutable afterwards; any
//! number of editing caches may borrow it.

pub mod cv5;
pub mod link_table;
pub mod terrain_types;

pub use cv5::{encode_tile_groups, parse_tile_groups, MAX_TILE_GROUPS, TILE_GROUP_RECORD_SIZE};
pub use link_table::{expand_terrain_type_map, generate_isom_links};
pub use terrain_types::{
    default_brush_index, tileset_adjacency, tileset_terrain_types, TerrainTypeInfo,
};

use isomap_core::{ShapeLinks, TileGroup};
use log::{debug, warn};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading tileset assets.
#[derive(Debug, Error)]
pub enum TilesetError {
    #[error("tileset asset missing: {0}")]
    MissingAsset(PathBuf),
    #[error("tileset asset size {size} is not a multiple of the {record}-byte group record")]
    CorruptAsset { size: usize, record: usize },
    #[error("tileset asset contains no tile groups")]
    EmptyAsset,
    #[error("failed to read tileset asset: {0}")]
    Io(#[from] std::io::Error),
}

/// The eight named tileset environments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[repr(usize)]
pub enum TilesetId {
    Badlands = 0,
    SpacePlatform = 1,
    Installation = 2,
    Ashworld = 3,
    Jungle = 4,
    Desert = 5,
    Arctic = 6,
    Twilight = 7,
}

impl TilesetId {
    pub const COUNT: usize = 8;

    pub const ALL: [TilesetId; TilesetId::COUNT] = [
        TilesetId::Badlands,
        TilesetId::SpacePlatform,
        TilesetId::Installation,
        TilesetId::Ashworld,
        TilesetId::Jungle,
        TilesetId::Desert,
        TilesetId::Arctic,
        TilesetId::Twilight,
    ];

    /// Resolves an arbitrary tileset number modulo the tileset count.
    pub const fn from_index(index: usize) -> TilesetId {
        Self::ALL[index % TilesetId::COUNT]
    }

    /// The asset base name of this tileset.
    pub const fn name(self) -> &'static str {
        match self {
            TilesetId::Badlands => "badlands",
            TilesetId::SpacePlatform => "platform",
            TilesetId::Installation => "install",
            TilesetId::Ashworld => "ashworld",
            TilesetId::Jungle => "jungle",
            TilesetId::Desert => "desert",
            TilesetId::Arctic => "ice",
            TilesetId::Twilight => "twilight",
        }
    }
}

/// Everything the editing engine needs to know about one tileset.
#[derive(Debug, Clone, Default)]
pub struct TilesetData {
    pub tile_groups: Vec<TileGroup>,
    pub isom_links: Vec<ShapeLinks>,
    pub terrain_types: Vec<TerrainTypeInfo>,
    pub terrain_type_map: Vec<u16>,
    pub hash_to_tile_group: HashMap<u32, Vec<u16>>,
    /// Brush descriptors in user-visible order.
    pub brushes: Vec<TerrainTypeInfo>,
    pub default_brush: TerrainTypeInfo,
}

impl TilesetData {
    /// Assembles a dataset from a tile-group table and terrain descriptors.
    ///
    /// This is the core constructor; the `load` variants parse CV5 payloads
    /// and delegate here.
    pub fn build(
        tile_groups: Vec<TileGroup>,
        terrain_types: Vec<TerrainTypeInfo>,
        compressed_adjacency: &[u16],
        default_brush: usize,
    ) -> TilesetData {
        let terrain_type_map = expand_terrain_type_map(compressed_adjacency, terrain_types.len());

        let mut hash_to_tile_group: HashMap<u32, Vec<u16>> = HashMap::new();
        for i in (0..tile_groups.len()).step_by(2) {
            hash_to_tile_group
                .entry(group_signature(&tile_groups[i]))
                .or_default()
                .push(i as u16);
        }

        let isom_links = generate_isom_links(&tile_groups, &terrain_types);

        let mut brushes: Vec<TerrainTypeInfo> = terrain_types
            .iter()
            .filter(|info| info.brush_sort_order >= 0)
            .copied()
            .collect();
        brushes.sort_by_key(|info| info.brush_sort_order);
        let default_brush = terrain_types
            .get(default_brush)
            .copied()
            .unwrap_or(TerrainTypeInfo::unused(0));

        debug!(
            "tileset dataset built: {} groups, {} link rows, {} signatures",
            tile_groups.len(),
            isom_links.len(),
            hash_to_tile_group.len()
        );

        TilesetData {
            tile_groups,
            isom_links,
            terrain_types,
            terrain_type_map,
            hash_to_tile_group,
            brushes,
            default_brush,
        }
    }

    /// Builds the dataset for a tileset from its raw CV5 payload.
    pub fn from_cv5_bytes(tileset: TilesetId, bytes: &[u8]) -> Result<TilesetData, TilesetError> {
        let tile_groups = parse_tile_groups(bytes)?;
        Ok(TilesetData::build(
            tile_groups,
            tileset_terrain_types(tileset).to_vec(),
            tileset_adjacency(tileset),
            default_brush_index(tileset),
        ))
    }

    /// Loads and builds the dataset for a tileset from a CV5 file.
    pub fn load_from_path(tileset: TilesetId, path: &Path) -> Result<TilesetData, TilesetError> {
        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                warn!("tileset asset missing: {}", path.display());
                return Err(TilesetError::MissingAsset(path.to_path_buf()));
            }
            Err(err) => return Err(err.into()),
        };
        Self::from_cv5_bytes(tileset, &bytes).map_err(|err| {
            warn!("failed to load tileset {}: {err}", tileset.name());
            err
        })
    }
}

/// The packed directional-link signature of a tile group.
///
/// Six bits per link code; the low six bits carry the terrain type when any
/// of the four links reaches the hard range.
pub fn group_signature(group: &TileGroup) -> u32 {
    let left = u32::from(group.links.left.0);
    let top = u32::from(group.links.top.0);
    let right = u32::from(group.links.right.0);
    let bottom = u32::from(group.links.bottom.0);

    let mut signature = (((left << 6 | top) << 6 | right) << 6 | bottom) << 6;
    if left >= 48 || top >= 48 || right >= 48 || bottom >= 48 {
        signature |= u32::from(group.terrain_type);
    }
    signature
}

/// The datasets for all eight tilesets.
#[derive(Debug)]
pub struct Terrain {
    tilesets: Vec<TilesetData>,
}

impl Terrain {
    /// Loads every tileset from `<dir>/<name>.cv5`.
    pub fn load_from_dir(dir: &Path) -> Result<Terrain, TilesetError> {
        let mut tilesets = Vec::with_capacity(TilesetId::COUNT);
        for tileset in TilesetId::ALL {
            let path = dir.join(format!("{}.cv5", tileset.name()));
            tilesets.push(TilesetData::load_from_path(tileset, &path)?);
        }
        Ok(Terrain { tilesets })
    }

    pub fn from_datasets(tilesets: Vec<TilesetData>) -> Terrain {
        Terrain { tilesets }
    }

    /// The dataset for a tileset, resolving indices modulo the table size.
    pub fn get(&self, tileset: TilesetId) -> &TilesetData {
        &self.tilesets[tileset as usize % self.tilesets.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use isomap_core::{DirectionalLinks, Link};

    fn soft_group(terrain_type: u16, soft: u16) -> TileGroup {
        TileGroup {
            terrain_type,
            links: DirectionalLinks {
                left: Link(soft),
                top: Link(soft),
                right: Link(soft),
                bottom: Link(soft),
            },
            ..TileGroup::default()
        }
    }

    #[test]
    fn signature_packs_links_and_terrain_type() {
        let group = soft_group(3, 5);
        assert_eq!(group_signature(&group), (((5 << 6 | 5) << 6 | 5) << 6 | 5) << 6);

        let mut hard = soft_group(3, 5);
        hard.links.right = Link::BR;
        assert_eq!(
            group_signature(&hard),
            ((((5 << 6 | 5) << 6 | 51) << 6 | 5) << 6) | 3
        );
    }

    #[test]
    fn signature_index_collects_even_groups() {
        let groups = vec![
            soft_group(2, 1),
            soft_group(2, 1),
            soft_group(2, 1),
            soft_group(2, 1),
        ];
        let terrain_types = vec![
            TerrainTypeInfo::unused(0),
            TerrainTypeInfo::unused(1),
            TerrainTypeInfo::brush(2, 1, 0, 1, "Low"),
        ];
        let data = TilesetData::build(groups.clone(), terrain_types, &[0], 2);
        let bucket = &data.hash_to_tile_group[&group_signature(&groups[0])];
        assert_eq!(bucket, &vec![0, 2]);
    }

    #[test]
    fn tileset_id_wraps_modulo_eight() {
        assert_eq!(TilesetId::from_index(0), TilesetId::Badlands);
        assert_eq!(TilesetId::from_index(12), TilesetId::Jungle);
    }

    #[test]
    fn brushes_sort_by_brush_order() {
        let data = TilesetData::build(
            vec![soft_group(0, 0); 2],
            tileset_terrain_types(TilesetId::Badlands).to_vec(),
            tileset_adjacency(TilesetId::Badlands),
            default_brush_index(TilesetId::Badlands),
        );
        let names: Vec<&str> = data.brushes.iter().map(|b| b.name).collect();
        assert_eq!(
            names,
            vec![
                "Dirt",
                "Mud",
                "High Dirt",
                "Water",
                "Grass",
                "High Grass",
                "Structure",
                "Asphalt",
                "Rocky Ground",
            ]
        );
        assert_eq!(data.default_brush.name, "Dirt");
    }

    #[test]
    fn missing_asset_error_carries_the_path() {
        let result =
            TilesetData::load_from_path(TilesetId::Badlands, Path::new("/nonexistent/badlands.cv5"));
        assert!(matches!(result, Err(TilesetError::MissingAsset(_))));
    }
}
