//! Linear projection from a tile's geographic bounds to square image space.

use crate::bounds::GeoBounds;

/// Default rendered tile edge length in image units.
pub const DEFAULT_SVG_SIZE: u32 = 1000;

/// Maps `(lat, lng)` inside a tile to `(x, y)` in `[0, size]`.
///
/// The north-west corner maps to the origin and y grows southward. Points
/// outside the bounds extrapolate linearly.
///
/// # Examples
/// ```
/// use tilewright_core::{GeoBounds, Projector};
///
/// let bounds = GeoBounds::new(1.0, 0.0, 1.0, 0.0)?;
/// let projector = Projector::new(bounds, 1000);
/// assert_eq!(projector.project(1.0, 0.0), (0.0, 0.0));
/// assert_eq!(projector.project(0.0, 1.0), (1000.0, 1000.0));
/// # Ok::<(), tilewright_core::InvalidBounds>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projector {
    bounds: GeoBounds,
    size: f64,
}

impl Projector {
    /// Build a projector for `bounds` onto a `size` x `size` square.
    pub fn new(bounds: GeoBounds, size: u32) -> Self {
        Self {
            bounds,
            size: f64::from(size),
        }
    }

    /// Image edge length.
    pub const fn size(&self) -> f64 {
        self.size
    }

    /// Geographic bounds being projected.
    pub const fn bounds(&self) -> &GeoBounds {
        &self.bounds
    }

    /// Project a geographic position to image coordinates.
    pub fn project(&self, lat: f64, lng: f64) -> (f64, f64) {
        let b = &self.bounds;
        let x = (lng - b.west()) / b.width() * self.size;
        let y = (b.north() - lat) / b.height() * self.size;
        (x, y)
    }

    /// Inverse of [`Projector::project`].
    pub fn unproject(&self, x: f64, y: f64) -> (f64, f64) {
        let b = &self.bounds;
        let lng = b.west() + x / self.size * b.width();
        let lat = b.north() - y / self.size * b.height();
        (lat, lng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn projector() -> Projector {
        let bounds = GeoBounds::new(43.65, 43.64, -79.38, -79.39).expect("valid bounds");
        Projector::new(bounds, DEFAULT_SVG_SIZE)
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-6,
            "expected {expected}, got {actual}"
        );
    }

    #[rstest]
    fn corners_map_to_image_corners(projector: Projector) {
        let (x, y) = projector.project(43.65, -79.39);
        assert_close(x, 0.0);
        assert_close(y, 0.0);
        let (x, y) = projector.project(43.64, -79.38);
        assert_close(x, 1000.0);
        assert_close(y, 1000.0);
    }

    #[rstest]
    fn centre_maps_to_image_centre(projector: Projector) {
        let (x, y) = projector.project(43.645, -79.385);
        assert_close(x, 500.0);
        assert_close(y, 500.0);
    }

    #[rstest]
    fn unproject_inverts_project(projector: Projector) {
        let (x, y) = projector.project(43.6431, -79.3812);
        let (lat, lng) = projector.unproject(x, y);
        assert_close(lat, 43.6431);
        assert_close(lng, -79.3812);
    }
}
