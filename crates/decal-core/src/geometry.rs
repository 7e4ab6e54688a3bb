#![forbid(unsafe_code)]

//! Geometric primitives.
//!
//! Overlay transforms are continuous, so everything here is `f32`:
//! canvas coordinates are 0-indexed with the origin at the top-left,
//! x growing right and y growing down.

use serde::{Deserialize, Serialize};

/// A 2D vector for offsets, deltas, and positions.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    /// The zero vector.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Create a new vector.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Create a vector with both components set to `v`.
    #[inline]
    pub const fn splat(v: f32) -> Self {
        Self { x: v, y: v }
    }
}

impl core::ops::Add for Vec2 {
    type Output = Vec2;

    #[inline]
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl core::ops::AddAssign for Vec2 {
    #[inline]
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl core::ops::Sub for Vec2 {
    type Output = Vec2;

    #[inline]
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl core::ops::Mul<f32> for Vec2 {
    type Output = Vec2;

    #[inline]
    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl From<(f32, f32)> for Vec2 {
    fn from((x, y): (f32, f32)) -> Self {
        Self::new(x, y)
    }
}

/// A 2D extent in canvas units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    /// Create a new size.
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Create a square size.
    #[inline]
    pub const fn square(side: f32) -> Self {
        Self::new(side, side)
    }

    /// Uniformly scaled copy.
    #[inline]
    pub fn scaled(self, factor: f32) -> Self {
        Self::new(self.width * factor, self.height * factor)
    }
}

impl From<(f32, f32)> for Size {
    fn from((width, height): (f32, f32)) -> Self {
        Self::new(width, height)
    }
}

/// An axis-aligned rectangle for overlay bounds and hit testing.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle from its top-left corner and size.
    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle centered on `center`.
    #[inline]
    pub fn from_center(center: Vec2, size: Size) -> Self {
        Self::new(
            center.x - size.width / 2.0,
            center.y - size.height / 2.0,
            size.width,
            size.height,
        )
    }

    /// Right edge.
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge.
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Center point.
    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Extent of the rectangle.
    #[inline]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Check if a point is inside the rectangle.
    ///
    /// The left and top edges are inclusive, the right and bottom edges
    /// exclusive, matching integer hit grids.
    #[inline]
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }
}

/// The canvas corner that overlay cascade placement is measured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    /// Top-left position of a box of `size` inset by `inset` from this
    /// corner of a `canvas`.
    ///
    /// The inset is measured toward the canvas interior on both axes, so
    /// a larger inset always moves the box away from the corner.
    pub fn anchor_origin(self, canvas: Size, inset: Vec2, size: Size) -> Vec2 {
        let x = match self {
            Corner::TopLeft | Corner::BottomLeft => inset.x,
            Corner::TopRight | Corner::BottomRight => canvas.width - inset.x - size.width,
        };
        let y = match self {
            Corner::TopLeft | Corner::TopRight => inset.y,
            Corner::BottomLeft | Corner::BottomRight => canvas.height - inset.y - size.height,
        };
        Vec2::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::{Corner, Rect, Size, Vec2};

    #[test]
    fn vec2_ops() {
        let a = Vec2::new(1.0, 2.0);
        let b = Vec2::new(3.0, -4.0);
        assert_eq!(a + b, Vec2::new(4.0, -2.0));
        assert_eq!(b - a, Vec2::new(2.0, -6.0));
        assert_eq!(a * 2.0, Vec2::new(2.0, 4.0));

        let mut c = a;
        c += b;
        assert_eq!(c, Vec2::new(4.0, -2.0));
    }

    #[test]
    fn rect_contains_edges() {
        let rect = Rect::new(2.0, 3.0, 4.0, 5.0);
        assert!(rect.contains(Vec2::new(2.0, 3.0)));
        assert!(rect.contains(Vec2::new(5.9, 7.9)));
        assert!(!rect.contains(Vec2::new(6.0, 3.0)));
        assert!(!rect.contains(Vec2::new(2.0, 8.0)));
    }

    #[test]
    fn rect_from_center_round_trips() {
        let rect = Rect::from_center(Vec2::new(50.0, 40.0), Size::new(20.0, 10.0));
        assert_eq!(rect, Rect::new(40.0, 35.0, 20.0, 10.0));
        assert_eq!(rect.center(), Vec2::new(50.0, 40.0));
    }

    #[test]
    fn corner_anchor_origin_bottom_right() {
        let canvas = Size::new(320.0, 440.0);
        let origin = Corner::BottomRight.anchor_origin(
            canvas,
            Vec2::new(20.0, 20.0),
            Size::square(100.0),
        );
        assert_eq!(origin, Vec2::new(200.0, 320.0));
    }

    #[test]
    fn corner_anchor_origin_all_corners() {
        let canvas = Size::new(100.0, 100.0);
        let inset = Vec2::new(10.0, 10.0);
        let size = Size::square(20.0);
        assert_eq!(
            Corner::TopLeft.anchor_origin(canvas, inset, size),
            Vec2::new(10.0, 10.0)
        );
        assert_eq!(
            Corner::TopRight.anchor_origin(canvas, inset, size),
            Vec2::new(70.0, 10.0)
        );
        assert_eq!(
            Corner::BottomLeft.anchor_origin(canvas, inset, size),
            Vec2::new(10.0, 70.0)
        );
        assert_eq!(
            Corner::BottomRight.anchor_origin(canvas, inset, size),
            Vec2::new(70.0, 70.0)
        );
    }

    #[test]
    fn larger_inset_moves_inward() {
        let canvas = Size::new(320.0, 440.0);
        let size = Size::square(100.0);
        let near = Corner::BottomRight.anchor_origin(canvas, Vec2::splat(20.0), size);
        let far = Corner::BottomRight.anchor_origin(canvas, Vec2::splat(30.0), size);
        assert_eq!(near - far, Vec2::new(10.0, 10.0));
    }
}
