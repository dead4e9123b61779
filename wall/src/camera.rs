#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

/// A point in either page or wall space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Linear interpolation towards `other` by `ratio` (0 = self, 1 = other).
    #[must_use]
    pub fn lerp(self, other: Point, ratio: f64) -> Point {
        Point {
            x: self.x + (other.x - self.x) * ratio,
            y: self.y + (other.y - self.y) * ratio,
        }
    }
}

/// Pan/zoom frame relating page coordinates to wall coordinates.
///
/// `origin_x` / `origin_y` are the wall coordinates shown at the page origin.
/// `zoom` is a scale factor (1.0 = one wall unit per CSS pixel).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub origin_x: f64,
    pub origin_y: f64,
    pub zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self { origin_x: 0.0, origin_y: 0.0, zoom: 1.0 }
    }
}

impl Camera {
    /// Convert a page-relative pointer position to a wall point.
    ///
    /// Each axis maps to `origin + floor(raw / zoom)`, so wall points are
    /// always whole units.
    #[must_use]
    pub fn to_wall_point(&self, raw: Point) -> Point {
        Point {
            x: self.origin_x + (raw.x / self.zoom).floor(),
            y: self.origin_y + (raw.y / self.zoom).floor(),
        }
    }

    /// Convert a page-space distance to a wall-space distance.
    #[must_use]
    pub fn page_dist_to_wall(&self, page_dist: f64) -> f64 {
        page_dist / self.zoom
    }
}
