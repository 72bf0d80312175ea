//! Fundamental geometric types for planar structures.

use nalgebra::Vector2;

use crate::errors::StructureError;

/// Position in the plane measured in metres.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    /// Distance along the horizontal axis.
    pub x: f64,
    /// Distance along the vertical axis.
    pub y: f64,
}

impl Point {
    /// Create a [`Point`] with explicit coordinates.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Convert the point into an algebraic vector.
    #[must_use]
    pub fn to_vector(self) -> Vector2<f64> {
        Vector2::new(self.x, self.y)
    }

    /// Euclidean distance between two points.
    ///
    /// # Examples
    /// ```
    /// use trussreact::point;
    ///
    /// assert_eq!(point(0.0, 0.0).distance_to(point(3.0, 4.0)), 5.0);
    /// ```
    #[must_use]
    pub fn distance_to(self, other: Point) -> f64 {
        (other.to_vector() - self.to_vector()).norm()
    }

    /// Point halfway between `self` and `other`.
    #[must_use]
    pub fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

impl From<Vector2<f64>> for Point {
    fn from(value: Vector2<f64>) -> Self {
        Self::new(value.x, value.y)
    }
}

impl From<Point> for Vector2<f64> {
    fn from(value: Point) -> Self {
        value.to_vector()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl TryFrom<&[f64]> for Point {
    type Error = StructureError;

    /// Accept a coordinate slice only when it holds exactly two finite values.
    fn try_from(values: &[f64]) -> Result<Self, Self::Error> {
        match values {
            [x, y] if x.is_finite() && y.is_finite() => Ok(Self::new(*x, *y)),
            _ => Err(StructureError::TypeMismatch { len: values.len() }),
        }
    }
}

/// Convenience helper for creating [`Point`] instances.
///
/// # Examples
/// ```
/// use trussreact::point;
///
/// let origin = point(0.0, 0.0);
/// assert_eq!(origin.x, 0.0);
/// ```
#[must_use]
pub const fn point(x: f64, y: f64) -> Point {
    Point::new(x, y)
}
