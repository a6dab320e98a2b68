//! Geometric value types and the boundary algebra used by every layouter.
//!
//! All coordinates live in a single canvas space whose origin is the top-left
//! corner of the outermost layout. `y` grows downwards.
//!
//! # Overview
//!
//! - [`Point`] - An `(x, y)` coordinate pair.
//! - [`Boundary`] - A rectangle size plus the axis point where incoming connectors attach.
//! - [`Anchor`] - A named attachment point on a [`Boundary`].
//! - [`BoundRect`] - An absolute rectangle given by its four edges.
//!
//! The free functions [`branch_interval`], [`distribute_horizontally`] and
//! [`stack_vertically`] compose child boundaries into parent boundaries.

use serde::{Deserialize, Serialize};

/// A coordinate pair in canvas space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Checks if both x and y coordinates are zero
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Adds another point to this point, returning a new point
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Subtracts another point from this point, returning a new point
    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

/// A named attachment point on a [`Boundary`].
///
/// The `*Center` anchors are aligned to the boundary's axis rather than to the
/// geometric center, so a chain of nodes keeps a single straight spine even
/// when their widths differ.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Anchor {
    /// `(axis_x, 0)`
    TopCenter,
    /// `(axis_x, height)`
    BottomCenter,
    /// `(0, axis_y)`
    LeftCenter,
    /// `(width, axis_y)`
    RightCenter,
    /// A free junction point relative to the boundary's top-left corner.
    At(Point),
}

/// The size of a laid-out element together with its connector axis.
///
/// `axis_x`/`axis_y` mark the point where a parent attaches an incoming
/// connector. The axis always lies inside the rectangle:
/// `0 <= axis_x <= width` and `0 <= axis_y <= height`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Boundary {
    width: f32,
    height: f32,
    axis_x: f32,
    axis_y: f32,
}

impl Boundary {
    /// Creates a new boundary, clamping the axis into the rectangle.
    ///
    /// Negative sizes are treated as zero.
    pub fn new(width: f32, height: f32, axis_x: f32, axis_y: f32) -> Self {
        let width = width.max(0.0);
        let height = height.max(0.0);
        Self {
            width,
            height,
            axis_x: axis_x.clamp(0.0, width),
            axis_y: axis_y.clamp(0.0, height),
        }
    }

    /// Creates a boundary whose axis sits at the geometric center.
    pub fn centered(width: f32, height: f32) -> Self {
        Self::new(width, height, width / 2.0, height / 2.0)
    }

    /// The neutral boundary `{0, 0, 0, 0}`.
    ///
    /// Layouters return this whenever their input is incomplete.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn width(self) -> f32 {
        self.width
    }

    pub fn height(self) -> f32 {
        self.height
    }

    pub fn axis_x(self) -> f32 {
        self.axis_x
    }

    pub fn axis_y(self) -> f32 {
        self.axis_y
    }

    /// Returns true if the boundary occupies no area and has its axis at the origin.
    pub fn is_empty(self) -> bool {
        self == Self::empty()
    }

    /// Width to the left of the axis.
    pub fn left_half_width(self) -> f32 {
        self.axis_x
    }

    /// Width to the right of the axis.
    pub fn right_half_width(self) -> f32 {
        self.width - self.axis_x
    }

    /// Resolves an [`Anchor`] to a point relative to this boundary's top-left corner.
    pub fn anchor(self, anchor: Anchor) -> Point {
        match anchor {
            Anchor::TopCenter => Point::new(self.axis_x, 0.0),
            Anchor::BottomCenter => Point::new(self.axis_x, self.height),
            Anchor::LeftCenter => Point::new(0.0, self.axis_y),
            Anchor::RightCenter => Point::new(self.width, self.axis_y),
            Anchor::At(point) => point,
        }
    }

    /// Converts this boundary into an absolute rectangle with its top-left corner at `origin`.
    pub fn to_rect(self, origin: Point) -> BoundRect {
        BoundRect::new(
            origin.y(),
            origin.x(),
            origin.y() + self.height,
            origin.x() + self.width,
        )
    }
}

/// Horizontal gap between two branches placed side by side.
///
/// The gap is at least `min_gap`, and large enough that the two connector
/// axes end up at least `axis_min_separation` apart, whichever is larger.
pub fn branch_interval(
    left: Boundary,
    right: Boundary,
    min_gap: f32,
    axis_min_separation: f32,
) -> f32 {
    min_gap.max(axis_min_separation - left.right_half_width() - right.left_half_width())
}

/// Places boundaries in a row from left to right.
///
/// Adjacent boundaries are separated by [`branch_interval`].
///
/// # Returns
/// The x offset of each boundary's left edge, the first one at `0`.
pub fn distribute_horizontally(
    boundaries: &[Boundary],
    min_gap: f32,
    axis_min_separation: f32,
) -> Vec<f32> {
    let mut offsets = Vec::with_capacity(boundaries.len());
    let mut x_position = 0.0;

    for (i, boundary) in boundaries.iter().enumerate() {
        if i > 0 {
            let prev = boundaries[i - 1];
            x_position += prev.width()
                + branch_interval(prev, *boundary, min_gap, axis_min_separation);
        }
        offsets.push(x_position);
    }

    offsets
}

/// Stacks boundaries top to bottom on a shared vertical spine.
///
/// Every boundary's axis is aligned to the column axis, which sits at the
/// widest left half. Children are separated by `spacing`.
///
/// # Returns
/// The composite boundary and the top-left offset of each child. An empty
/// slice yields [`Boundary::empty`].
pub fn stack_vertically(boundaries: &[Boundary], spacing: f32) -> (Boundary, Vec<Point>) {
    let Some(first) = boundaries.first() else {
        return (Boundary::empty(), Vec::new());
    };

    let axis_x = boundaries
        .iter()
        .map(|b| b.left_half_width())
        .fold(0.0, f32::max);
    let right = boundaries
        .iter()
        .map(|b| b.right_half_width())
        .fold(0.0, f32::max);

    let mut offsets = Vec::with_capacity(boundaries.len());
    let mut y_position = 0.0;
    for (i, boundary) in boundaries.iter().enumerate() {
        if i > 0 {
            y_position += spacing;
        }
        offsets.push(Point::new(axis_x - boundary.axis_x(), y_position));
        y_position += boundary.height();
    }

    let boundary = Boundary::new(axis_x + right, y_position, axis_x, first.axis_y());
    (boundary, offsets)
}

/// An absolute rectangle in canvas space, given by its four edges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundRect {
    top: f32,
    left: f32,
    bottom: f32,
    right: f32,
}

impl BoundRect {
    /// Creates a new rectangle from its edges.
    pub fn new(top: f32, left: f32, bottom: f32, right: f32) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    pub fn top(self) -> f32 {
        self.top
    }

    pub fn left(self) -> f32 {
        self.left
    }

    pub fn bottom(self) -> f32 {
        self.bottom
    }

    pub fn right(self) -> f32 {
        self.right
    }

    pub fn width(self) -> f32 {
        self.right - self.left
    }

    pub fn height(self) -> f32 {
        self.bottom - self.top
    }

    /// Horizontal center of the rectangle
    pub fn center_x(self) -> f32 {
        (self.left + self.right) / 2.0
    }

    /// Vertical center of the rectangle
    pub fn center_y(self) -> f32 {
        (self.top + self.bottom) / 2.0
    }

    /// Moves the rectangle by the specified offset
    pub fn translate(self, offset: Point) -> Self {
        Self {
            top: self.top + offset.y(),
            left: self.left + offset.x(),
            bottom: self.bottom + offset.y(),
            right: self.right + offset.x(),
        }
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_point_add_sub() {
        let p1 = Point::new(5.0, 8.0);
        let p2 = Point::new(2.0, 3.0);
        assert_eq!(p1.add_point(p2), Point::new(7.0, 11.0));
        assert_eq!(p1.sub_point(p2), Point::new(3.0, 5.0));
        assert!(Point::default().is_zero());
    }

    #[test]
    fn test_boundary_empty() {
        let empty = Boundary::empty();
        assert_eq!(empty.width(), 0.0);
        assert_eq!(empty.height(), 0.0);
        assert_eq!(empty.axis_x(), 0.0);
        assert_eq!(empty.axis_y(), 0.0);
        assert!(empty.is_empty());
        assert!(!Boundary::centered(10.0, 10.0).is_empty());
    }

    #[test]
    fn test_boundary_clamps_axis() {
        let boundary = Boundary::new(100.0, 40.0, 150.0, -5.0);
        assert_eq!(boundary.axis_x(), 100.0);
        assert_eq!(boundary.axis_y(), 0.0);

        let negative = Boundary::new(-10.0, -10.0, 3.0, 3.0);
        assert!(negative.is_empty());
    }

    #[test]
    fn test_boundary_half_widths() {
        let boundary = Boundary::new(180.0, 50.0, 60.0, 25.0);
        assert_approx_eq!(f32, boundary.left_half_width(), 60.0);
        assert_approx_eq!(f32, boundary.right_half_width(), 120.0);
    }

    #[test]
    fn test_boundary_anchors() {
        let boundary = Boundary::new(100.0, 40.0, 30.0, 10.0);
        assert_eq!(boundary.anchor(Anchor::TopCenter), Point::new(30.0, 0.0));
        assert_eq!(boundary.anchor(Anchor::BottomCenter), Point::new(30.0, 40.0));
        assert_eq!(boundary.anchor(Anchor::LeftCenter), Point::new(0.0, 10.0));
        assert_eq!(boundary.anchor(Anchor::RightCenter), Point::new(100.0, 10.0));
        assert_eq!(
            boundary.anchor(Anchor::At(Point::new(1.0, 2.0))),
            Point::new(1.0, 2.0)
        );
    }

    #[test]
    fn test_boundary_to_rect() {
        let rect = Boundary::centered(100.0, 40.0).to_rect(Point::new(10.0, 20.0));
        assert_approx_eq!(f32, rect.left(), 10.0);
        assert_approx_eq!(f32, rect.top(), 20.0);
        assert_approx_eq!(f32, rect.right(), 110.0);
        assert_approx_eq!(f32, rect.bottom(), 60.0);
        assert_approx_eq!(f32, rect.center_x(), 60.0);
        assert_approx_eq!(f32, rect.center_y(), 40.0);
    }

    #[test]
    fn test_branch_interval_min_gap_wins_for_wide_boxes() {
        let wide = Boundary::centered(180.0, 50.0);
        // 200 - 90 - 90 = 20 < 40
        assert_approx_eq!(f32, branch_interval(wide, wide, 40.0, 200.0), 40.0);
    }

    #[test]
    fn test_branch_interval_axis_separation_wins_for_narrow_boxes() {
        let narrow = Boundary::centered(50.0, 20.0);
        // 200 - 25 - 25 = 150 > 40
        assert_approx_eq!(f32, branch_interval(narrow, narrow, 40.0, 200.0), 150.0);
    }

    #[test]
    fn test_branch_interval_uses_off_center_axes() {
        let left = Boundary::new(100.0, 20.0, 90.0, 10.0);
        let right = Boundary::new(100.0, 20.0, 5.0, 10.0);
        // 200 - 10 - 5 = 185
        assert_approx_eq!(f32, branch_interval(left, right, 40.0, 200.0), 185.0);
    }

    #[test]
    fn test_distribute_horizontally() {
        let boxes = [
            Boundary::centered(180.0, 50.0),
            Boundary::centered(50.0, 20.0),
            Boundary::centered(180.0, 50.0),
        ];
        let offsets = distribute_horizontally(&boxes, 40.0, 200.0);
        assert_eq!(offsets.len(), 3);
        assert_approx_eq!(f32, offsets[0], 0.0);
        // 200 - 90 - 25 = 85
        assert_approx_eq!(f32, offsets[1], 180.0 + 85.0);
        assert_approx_eq!(f32, offsets[2], 180.0 + 85.0 + 50.0 + 85.0);
        assert!(distribute_horizontally(&[], 40.0, 200.0).is_empty());
    }

    #[test]
    fn test_stack_vertically_empty() {
        let (boundary, offsets) = stack_vertically(&[], 40.0);
        assert!(boundary.is_empty());
        assert!(offsets.is_empty());
    }

    #[test]
    fn test_stack_vertically_shared_spine() {
        let boxes = [Boundary::centered(180.0, 50.0), Boundary::centered(180.0, 30.0)];
        let (boundary, offsets) = stack_vertically(&boxes, 40.0);

        assert_approx_eq!(f32, boundary.width(), 180.0);
        assert_approx_eq!(f32, boundary.height(), 50.0 + 40.0 + 30.0);
        assert_approx_eq!(f32, boundary.axis_x(), boxes[0].axis_x());
        assert_approx_eq!(f32, boundary.axis_y(), boxes[0].axis_y());
        assert_eq!(offsets, vec![Point::new(0.0, 0.0), Point::new(0.0, 90.0)]);
    }

    #[test]
    fn test_stack_vertically_aligns_axes() {
        let boxes = [
            Boundary::centered(100.0, 50.0),
            Boundary::new(300.0, 50.0, 200.0, 25.0),
        ];
        let (boundary, offsets) = stack_vertically(&boxes, 10.0);

        assert_approx_eq!(f32, boundary.axis_x(), 200.0);
        assert_approx_eq!(f32, boundary.width(), 300.0);
        assert_approx_eq!(f32, offsets[0].x() + boxes[0].axis_x(), 200.0);
        assert_approx_eq!(f32, offsets[1].x() + boxes[1].axis_x(), 200.0);
    }

    #[test]
    fn test_bound_rect_translate() {
        let rect = BoundRect::new(0.0, 0.0, 10.0, 20.0).translate(Point::new(5.0, 7.0));
        assert_eq!(rect, BoundRect::new(7.0, 5.0, 17.0, 25.0));
        assert_approx_eq!(f32, rect.width(), 20.0);
        assert_approx_eq!(f32, rect.height(), 10.0);
    }

    #[test]
    fn test_boundary_serializes_camel_case() {
        let json = serde_json::to_value(Boundary::new(10.0, 20.0, 5.0, 0.0)).unwrap();
        assert_eq!(json["axisX"], 5.0);
        assert_eq!(json["axisY"], 0.0);
    }
}
