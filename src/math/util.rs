use super::{Point2d, Vector2d};
use cgmath::prelude::*;

/// Projects a point onto a local coordinate system.
///
/// # Parameters
/// * `point` - The point to project
/// * `origin` - The origin of the coordinate system
/// * `x_axis` - The basis vector pointing in the positive x-axis.
/// * `y_axis` - The basis vector pointing in the positive y-axis.
pub fn project_local(
    point: Point2d,
    origin: Point2d,
    x_axis: Vector2d,
    y_axis: Vector2d,
) -> Point2d {
    let point = point - origin;
    Point2d::new(point.dot(x_axis), point.dot(y_axis))
}

/// Rotates a vector 90 degrees anti-clockwise, so that it points to the left.
pub fn rot90(vec: Vector2d) -> Vector2d {
    Vector2d::new(-vec.y, vec.x)
}

/// The unit vector pointing along the given heading, in radians.
pub fn heading_vector(heading: f64) -> Vector2d {
    Vector2d::new(heading.cos(), heading.sin())
}

/// Computes the signed perpendicular distance of `point` to the line through `start` and `end`.
///
/// Points to the left of the line, looking from `start` towards `end`, are positive.
pub fn perpendicular_distance(point: Point2d, start: Point2d, end: Point2d) -> f64 {
    let dir = end - start;
    let x_axis = dir.normalize();
    let local = project_local(point, start, x_axis, rot90(x_axis));
    local.y
}

/// Linearly interpolates between two points.
pub fn lerp_point(a: Point2d, b: Point2d, t: f64) -> Point2d {
    a + (b - a) * t
}

#[cfg(test)]
mod test {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn perpendicular_distance_is_left_positive() {
        let start = Point2d::new(0.0, 0.0);
        let end = Point2d::new(10.0, 0.0);
        assert_approx_eq!(perpendicular_distance(Point2d::new(5.0, 3.0), start, end), 3.0);
        assert_approx_eq!(perpendicular_distance(Point2d::new(-5.0, -2.0), start, end), -2.0);
        assert_approx_eq!(perpendicular_distance(Point2d::new(5.0, 2.0), end, start), -2.0);
    }
}
