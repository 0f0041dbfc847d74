use core::ops::{Add, Mul, Sub};

use serde::{Deserialize, Serialize};

/// Sub-pixel position in pixel-center coordinates (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2f {
    pub x: f32,
    pub y: f32,
}

impl Point2f {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2f {
    pub x: f32,
    pub y: f32,
}

impl Vec2f {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Unit vector at `theta` radians, measured from +x toward +y.
    pub fn from_angle(theta: f32) -> Self {
        let (s, c) = theta.sin_cos();
        Self { x: c, y: s }
    }

    pub fn dot(self, rhs: Self) -> f32 {
        self.x * rhs.x + self.y * rhs.y
    }

    pub fn norm(self) -> f32 {
        self.dot(self).sqrt()
    }

    pub fn angle(self) -> f32 {
        self.y.atan2(self.x)
    }
}

impl Add<Vec2f> for Point2f {
    type Output = Point2f;

    fn add(self, rhs: Vec2f) -> Self::Output {
        Point2f {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl Sub<Point2f> for Point2f {
    type Output = Vec2f;

    fn sub(self, rhs: Point2f) -> Self::Output {
        Vec2f {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

impl Mul<f32> for Vec2f {
    type Output = Vec2f;

    fn mul(self, rhs: f32) -> Self::Output {
        Vec2f {
            x: self.x * rhs,
            y: self.y * rhs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Point2f, Vec2f};

    #[test]
    fn angle_round_trips_through_unit_vector() {
        let v = Vec2f::from_angle(0.75);
        assert!((v.norm() - 1.0).abs() < 1e-6);
        assert!((v.angle() - 0.75).abs() < 1e-6);

        let down = Vec2f::from_angle(core::f32::consts::FRAC_PI_2);
        assert!(down.x.abs() < 1e-6);
        assert!((down.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn point_offsets_and_distance() {
        let p = Point2f::new(2.0, 3.0);
        let q = p + Vec2f::new(3.0, 4.0) * 0.5;

        assert_eq!(q, Point2f::new(3.5, 5.0));
        assert!(((q - p).norm() - 2.5).abs() < 1e-6);
        assert_eq!(q - p, Vec2f::new(1.5, 2.0));
    }
}
