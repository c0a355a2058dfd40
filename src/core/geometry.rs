//=========================================================================
// Geometry
//=========================================================================
//
// Minimal 2-D value types shared by scenes and the card core.
//
// Coordinates are screen space: pixels, top-left origin, y grows down.
//
//=========================================================================

//=== Vec2 ================================================================

/// A point or offset in screen space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance between two points.
    pub fn distance(self, other: Self) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Linear interpolation; `t` is not clamped.
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }

    /// Returns this point shifted down by `dy`.
    pub fn offset_y(self, dy: f32) -> Self {
        Self { x: self.x, y: self.y + dy }
    }
}

//=== Size ================================================================

/// Width × height of a viewport or footprint.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Both dimensions finite and strictly positive.
    pub fn is_positive(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// Length of the diagonal.
    pub fn diagonal(&self) -> f32 {
        (self.width * self.width + self.height * self.height).sqrt()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn distance_is_symmetric() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(3.0, 4.0);
        assert_relative_eq!(a.distance(b), 5.0);
        assert_relative_eq!(b.distance(a), 5.0);
    }

    #[test]
    fn lerp_hits_endpoints_and_midpoint() {
        let a = Vec2::new(10.0, 20.0);
        let b = Vec2::new(30.0, -20.0);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), Vec2::new(20.0, 0.0));
    }

    #[test]
    fn size_positivity() {
        assert!(Size::new(1.0, 1.0).is_positive());
        assert!(!Size::new(0.0, 1.0).is_positive());
        assert!(!Size::new(1.0, -3.0).is_positive());
        assert!(!Size::new(f32::NAN, 1.0).is_positive());
    }
}
