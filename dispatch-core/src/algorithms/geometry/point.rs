#[cfg(test)]
#[path = "../../../tests/unit/algorithms/geometry/point_test.rs"]
mod point_test;

use crate::utils::Float;

/// Represents a point in 2D space. When used for geographic coordinates, `x` keeps latitude and `y`
/// keeps longitude: no projection is applied, which is acceptable at city scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    /// X value.
    pub x: Float,
    /// Y value.
    pub y: Float,
}

impl Point {
    /// Creates a new instance of `Point`.
    pub fn new(x: Float, y: Float) -> Self {
        Self { x, y }
    }

    /// Computes distance from given point to `other`
    pub fn distance_to_point(&self, other: &Point) -> Float {
        self.squared_distance_to_point(other).sqrt()
    }

    /// Computes squared distance from given point to `other`.
    pub fn squared_distance_to_point(&self, other: &Point) -> Float {
        let delta_x = self.x - other.x;
        let delta_y = self.y - other.y;

        delta_x * delta_x + delta_y * delta_y
    }

    /// Computes the arithmetic mean of points. Returns `None` for an empty input.
    pub fn centroid<'a>(points: impl IntoIterator<Item = &'a Point>) -> Option<Point> {
        let (sum_x, sum_y, count) =
            points.into_iter().fold((0., 0., 0_usize), |(sum_x, sum_y, count), point| {
                (sum_x + point.x, sum_y + point.y, count + 1)
            });

        (count > 0).then(|| Point::new(sum_x / count as Float, sum_y / count as Float))
    }
}
