//! Geographic rectangles expressed in decimal degrees.
//!
//! [`GeoBounds`] is used both for region requests and for individual tile
//! windows. Construction validates the rectangle so downstream code can rely
//! on `north > south` and `east > west`.

use geo::{Coord, Rect};
use thiserror::Error;

/// Errors returned when a geographic rectangle is malformed.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum InvalidBounds {
    /// One of the edges was NaN or infinite.
    #[error("bounds must be finite numbers")]
    NonFinite,
    /// The latitude span was zero or negative.
    #[error("north ({north}) must be greater than south ({south})")]
    LatitudeSpan {
        /// Northern edge as supplied.
        north: f64,
        /// Southern edge as supplied.
        south: f64,
    },
    /// The longitude span was zero or negative.
    #[error("east ({east}) must be greater than west ({west})")]
    LongitudeSpan {
        /// Eastern edge as supplied.
        east: f64,
        /// Western edge as supplied.
        west: f64,
    },
    /// A latitude fell outside `[-90, 90]`.
    #[error("latitude {value} lies outside [-90, 90]")]
    LatitudeRange {
        /// Offending latitude.
        value: f64,
    },
    /// A longitude fell outside `[-180, 180]`.
    #[error("longitude {value} lies outside [-180, 180]")]
    LongitudeRange {
        /// Offending longitude.
        value: f64,
    },
    /// The tile size was not a positive, finite number of degrees.
    #[error("tile size {size} must be a positive number of degrees")]
    TileSize {
        /// Offending tile size.
        size: f64,
    },
    /// The grid covering the rectangle would exceed the tile limit.
    #[error("region needs {count} tiles, more than the limit of {limit}")]
    TooManyTiles {
        /// Tiles the grid would contain.
        count: u64,
        /// Largest grid accepted.
        limit: u64,
    },
}

/// A validated `{north, south, east, west}` rectangle in WGS84 degrees.
///
/// # Examples
/// ```
/// use tilewright_core::GeoBounds;
///
/// # fn main() -> Result<(), tilewright_core::InvalidBounds> {
/// let bounds = GeoBounds::new(43.641, 43.640, -79.379, -79.380)?;
/// assert!(bounds.contains(43.6405, -79.3795));
/// assert!(GeoBounds::new(43.0, 43.0, -79.0, -80.0).is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawBounds", into = "RawBounds")
)]
pub struct GeoBounds {
    north: f64,
    south: f64,
    east: f64,
    west: f64,
}

impl GeoBounds {
    /// Validate and construct a rectangle.
    pub fn new(north: f64, south: f64, east: f64, west: f64) -> Result<Self, InvalidBounds> {
        if ![north, south, east, west].iter().all(|edge| edge.is_finite()) {
            return Err(InvalidBounds::NonFinite);
        }
        for value in [north, south] {
            if !(-90.0..=90.0).contains(&value) {
                return Err(InvalidBounds::LatitudeRange { value });
            }
        }
        for value in [east, west] {
            if !(-180.0..=180.0).contains(&value) {
                return Err(InvalidBounds::LongitudeRange { value });
            }
        }
        Self::with_spans(north, south, east, west)
    }

    /// Construct a tile window. Only the spans are checked because tile
    /// edges derived from rounded coordinates may sit a hair outside the
    /// WGS84 range.
    pub(crate) fn with_spans(
        north: f64,
        south: f64,
        east: f64,
        west: f64,
    ) -> Result<Self, InvalidBounds> {
        if north <= south {
            return Err(InvalidBounds::LatitudeSpan { north, south });
        }
        if east <= west {
            return Err(InvalidBounds::LongitudeSpan { east, west });
        }
        Ok(Self {
            north,
            south,
            east,
            west,
        })
    }

    /// Northern edge.
    pub const fn north(&self) -> f64 {
        self.north
    }

    /// Southern edge.
    pub const fn south(&self) -> f64 {
        self.south
    }

    /// Eastern edge.
    pub const fn east(&self) -> f64 {
        self.east
    }

    /// Western edge.
    pub const fn west(&self) -> f64 {
        self.west
    }

    /// Longitude span in degrees.
    pub fn width(&self) -> f64 {
        self.east - self.west
    }

    /// Latitude span in degrees.
    pub fn height(&self) -> f64 {
        self.north - self.south
    }

    /// Closed-interval point test: edges count as inside.
    pub fn contains(&self, lat: f64, lng: f64) -> bool {
        (self.south..=self.north).contains(&lat) && (self.west..=self.east).contains(&lng)
    }

    /// Closed-interval overlap test against an axis-aligned rectangle whose
    /// `x` is longitude and `y` is latitude. Touching edges overlap.
    pub fn overlaps_rect(&self, rect: &Rect<f64>) -> bool {
        let min = rect.min();
        let max = rect.max();
        min.x <= self.east && max.x >= self.west && min.y <= self.north && max.y >= self.south
    }

    /// Whether two rectangles share any point, edges included.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.overlaps_rect(&other.to_rect())
    }

    /// The rectangle as a `geo` type with `x = longitude`, `y = latitude`.
    pub fn to_rect(&self) -> Rect<f64> {
        Rect::new(
            Coord {
                x: self.west,
                y: self.south,
            },
            Coord {
                x: self.east,
                y: self.north,
            },
        )
    }

    /// Grow every edge by `buffer` degrees, clamped to the WGS84 range.
    ///
    /// # Examples
    /// ```
    /// use tilewright_core::GeoBounds;
    ///
    /// # fn main() -> Result<(), tilewright_core::InvalidBounds> {
    /// let grown = GeoBounds::new(89.999, 89.0, 10.0, 9.0)?.expanded(0.005);
    /// assert_eq!(grown.north(), 90.0);
    /// assert!(grown.west() < 9.0);
    /// # Ok(())
    /// # }
    /// ```
    pub fn expanded(&self, buffer: f64) -> Self {
        let buffer = if buffer.is_finite() { buffer.max(0.0) } else { 0.0 };
        Self {
            north: (self.north + buffer).min(90.0),
            south: (self.south - buffer).max(-90.0),
            east: (self.east + buffer).min(180.0),
            west: (self.west - buffer).max(-180.0),
        }
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy)]
struct RawBounds {
    north: f64,
    south: f64,
    east: f64,
    west: f64,
}

impl TryFrom<RawBounds> for GeoBounds {
    type Error = InvalidBounds;

    fn try_from(raw: RawBounds) -> Result<Self, Self::Error> {
        Self::new(raw.north, raw.south, raw.east, raw.west)
    }
}

impl From<GeoBounds> for RawBounds {
    fn from(bounds: GeoBounds) -> Self {
        Self {
            north: bounds.north,
            south: bounds.south,
            east: bounds.east,
            west: bounds.west,
        }
    }
}
