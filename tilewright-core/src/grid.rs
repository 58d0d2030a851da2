//! Tile grid calculation.
//!
//! Tiles are fixed-size cells aligned to multiples of the tile size. A tile is
//! identified by its south-west corner rounded to three decimal places so file
//! names stay stable across runs.

use crate::bounds::{GeoBounds, InvalidBounds};

/// Tile edge length used by the reference deployment (roughly 1 km).
pub const DEFAULT_TILE_SIZE_DEGREES: f64 = 0.01;

/// Largest grid [`tile_grid`] will enumerate, about 10° square at the
/// default tile size.
pub const MAX_GRID_TILES: u64 = 1_000_000;

/// Quotients closer than this to an integer are treated as exact multiples so
/// that `0.07 / 0.01` does not round up into an extra column.
const INDEX_SNAP_EPSILON: f64 = 1.0e-9;

/// South-west corner of a tile, rounded to three decimal places.
///
/// # Examples
/// ```
/// use tilewright_core::TileCoordinate;
///
/// let tile = TileCoordinate::new(43.64, -79.38);
/// assert_eq!(tile.key(), "43.640_-79.380");
/// assert_eq!(tile.file_name(), "43.640_-79.380.svg.gz");
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileCoordinate {
    lat: f64,
    lng: f64,
}

impl TileCoordinate {
    /// Build a coordinate, rounding both components to three decimals.
    pub fn new(lat: f64, lng: f64) -> Self {
        Self {
            lat: round3(lat),
            lng: round3(lng),
        }
    }

    /// Latitude of the southern edge.
    pub const fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude of the western edge.
    pub const fn lng(&self) -> f64 {
        self.lng
    }

    /// `<lat>_<lng>` with both components formatted to three decimals.
    pub fn key(&self) -> String {
        format!("{:.3}_{:.3}", self.lat, self.lng)
    }

    /// File name of the persisted, compressed tile.
    pub fn file_name(&self) -> String {
        format!("{}.svg.gz", self.key())
    }

    /// Parse a key or tile file name produced by [`TileCoordinate::key`] or
    /// [`TileCoordinate::file_name`].
    ///
    /// ```
    /// use tilewright_core::TileCoordinate;
    ///
    /// let tile = TileCoordinate::parse("43.640_-79.380.svg.gz").expect("valid name");
    /// assert_eq!(tile, TileCoordinate::new(43.64, -79.38));
    /// assert!(TileCoordinate::parse("metadata.json").is_none());
    /// ```
    pub fn parse(name: &str) -> Option<Self> {
        let stem = name.strip_suffix(".svg.gz").unwrap_or(name);
        let (lat, lng) = stem.split_once('_')?;
        let lat: f64 = lat.parse().ok()?;
        let lng: f64 = lng.parse().ok()?;
        (lat.is_finite() && lng.is_finite()).then(|| Self::new(lat, lng))
    }

    /// Geographic window covered by this tile.
    pub fn bounds(&self, tile_size: f64) -> Result<GeoBounds, InvalidBounds> {
        validate_tile_size(tile_size)?;
        GeoBounds::with_spans(
            self.lat + tile_size,
            self.lat,
            self.lng + tile_size,
            self.lng,
        )
    }
}

/// Enumerate the tiles covering `bounds`, row-major from the south-west.
///
/// Rows run from the rounded-down southern edge to the rounded-up northern
/// edge (exclusive), columns likewise from west to east. Indices are computed
/// in integer tile units so repeated additions never drift.
///
/// # Errors
/// Returns [`InvalidBounds::TileSize`] for a non-positive tile size and
/// [`InvalidBounds::TooManyTiles`] when the grid would exceed
/// [`MAX_GRID_TILES`].
///
/// # Examples
/// ```
/// use tilewright_core::{GeoBounds, TileCoordinate, tile_grid};
///
/// # fn main() -> Result<(), tilewright_core::InvalidBounds> {
/// let bounds = GeoBounds::new(43.641, 43.640, -79.379, -79.380)?;
/// let tiles = tile_grid(&bounds, 0.01)?;
/// assert_eq!(tiles, vec![TileCoordinate::new(43.640, -79.380)]);
/// # Ok(())
/// # }
/// ```
pub fn tile_grid(bounds: &GeoBounds, tile_size: f64) -> Result<Vec<TileCoordinate>, InvalidBounds> {
    validate_tile_size(tile_size)?;
    let south = floor_index(bounds.south(), tile_size);
    let north = ceil_index(bounds.north(), tile_size).max(south + 1);
    let west = floor_index(bounds.west(), tile_size);
    let east = ceil_index(bounds.east(), tile_size).max(west + 1);

    let rows = u64::try_from(north - south).unwrap_or(u64::MAX);
    let columns = u64::try_from(east - west).unwrap_or(u64::MAX);
    let count = rows.saturating_mul(columns);
    if count > MAX_GRID_TILES {
        return Err(InvalidBounds::TooManyTiles {
            count,
            limit: MAX_GRID_TILES,
        });
    }

    let mut tiles = Vec::with_capacity(usize::try_from(count).unwrap_or_default());
    for row in south..north {
        for column in west..east {
            tiles.push(TileCoordinate::new(
                row as f64 * tile_size,
                column as f64 * tile_size,
            ));
        }
    }
    Ok(tiles)
}

fn validate_tile_size(tile_size: f64) -> Result<(), InvalidBounds> {
    if tile_size.is_finite() && tile_size > 0.0 {
        Ok(())
    } else {
        Err(InvalidBounds::TileSize { size: tile_size })
    }
}

fn snapped_quotient(value: f64, tile_size: f64) -> f64 {
    let quotient = value / tile_size;
    let nearest = quotient.round();
    if (quotient - nearest).abs() < INDEX_SNAP_EPSILON {
        nearest
    } else {
        quotient
    }
}

fn floor_index(value: f64, tile_size: f64) -> i64 {
    snapped_quotient(value, tile_size).floor() as i64
}

fn ceil_index(value: f64, tile_size: f64) -> i64 {
    snapped_quotient(value, tile_size).ceil() as i64
}

fn round3(value: f64) -> f64 {
    let rounded = (value * 1000.0).round() / 1000.0;
    // Normalise negative zero so keys never read "-0.000".
    if rounded == 0.0 { 0.0 } else { rounded }
}
