//! Minimal geometry types shared by the world, mesher, and simulation crates.
#![forbid(unsafe_code)]

use core::f32::consts::{PI, TAU};
use core::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

/// Squared lengths below this are treated as zero when normalizing steering vectors.
pub const EPS_SQ: f32 = 1e-6;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };
    pub const UP: Vec3 = Vec3 {
        x: 0.0,
        y: 1.0,
        z: 0.0,
    };

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn dot(self, rhs: Vec3) -> f32 {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
    }

    #[inline]
    pub fn cross(self, rhs: Vec3) -> Vec3 {
        Vec3 {
            x: self.y * rhs.z - self.z * rhs.y,
            y: self.z * rhs.x - self.x * rhs.z,
            z: self.x * rhs.y - self.y * rhs.x,
        }
    }

    #[inline]
    pub fn length_sq(self) -> f32 {
        self.dot(self)
    }

    #[inline]
    pub fn length(self) -> f32 {
        self.length_sq().sqrt()
    }

    #[inline]
    pub fn normalized(self) -> Vec3 {
        let len = self.length();
        if len > 0.0 { self / len } else { self }
    }

    #[inline]
    pub fn distance_sq(self, rhs: Vec3) -> f32 {
        (self - rhs).length_sq()
    }

    /// Component-wise `self + (rhs - self) * t`; `t` is not clamped.
    #[inline]
    pub fn lerp(self, rhs: Vec3, t: f32) -> Vec3 {
        self + (rhs - self) * t
    }

    /// Projection onto the XZ plane (Y zeroed).
    #[inline]
    pub fn horizontal(self) -> Vec3 {
        Vec3::new(self.x, 0.0, self.z)
    }

    #[inline]
    pub fn with_y(self, y: f32) -> Vec3 {
        Vec3 { y, ..self }
    }

    #[inline]
    pub fn horizontal_length_sq(self) -> f32 {
        self.x * self.x + self.z * self.z
    }

    #[inline]
    pub fn horizontal_distance_sq(self, rhs: Vec3) -> f32 {
        (self - rhs).horizontal_length_sq()
    }

    /// Unit vector on the XZ plane pointing along `heading` radians
    /// (0 points to +X, π/2 to +Z).
    #[inline]
    pub fn from_heading(heading: f32) -> Vec3 {
        Vec3::new(heading.cos(), 0.0, heading.sin())
    }

    /// Unit facing vector for a yaw measured from +Z toward +X, the convention
    /// used for entity orientation.
    #[inline]
    pub fn from_yaw(yaw: f32) -> Vec3 {
        Vec3::new(yaw.sin(), 0.0, yaw.cos())
    }

    /// Yaw (from +Z toward +X) of the horizontal part of this vector.
    #[inline]
    pub fn yaw(self) -> f32 {
        self.x.atan2(self.z)
    }

    /// Rotates the horizontal components around the Y axis by `angle` radians.
    #[inline]
    pub fn rotate_y(self, angle: f32) -> Vec3 {
        let (sin, cos) = angle.sin_cos();
        Vec3::new(
            self.x * cos - self.z * sin,
            self.y,
            self.x * sin + self.z * cos,
        )
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    #[inline]
    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Vec3 {
    #[inline]
    fn add_assign(&mut self, rhs: Vec3) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    #[inline]
    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl SubAssign for Vec3 {
    #[inline]
    fn sub_assign(&mut self, rhs: Vec3) {
        self.x -= rhs.x;
        self.y -= rhs.y;
        self.z -= rhs.z;
    }
}

impl Mul<f32> for Vec3 {
    type Output = Vec3;
    #[inline]
    fn mul(self, rhs: f32) -> Vec3 {
        Vec3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Div<f32> for Vec3 {
    type Output = Vec3;
    #[inline]
    fn div(self, rhs: f32) -> Vec3 {
        Vec3::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

impl Neg for Vec3 {
    type Output = Vec3;
    #[inline]
    fn neg(self) -> Vec3 {
        Vec3::new(-self.x, -self.y, -self.z)
    }
}

/// Squared distance from `p` to the segment `a..b`, projecting onto the
/// segment with the parameter clamped to `[0, 1]`. A degenerate segment
/// collapses to the distance to `a`.
pub fn point_segment_distance_sq(p: Vec3, a: Vec3, b: Vec3) -> f32 {
    let ab = b - a;
    let ap = p - a;
    let ab2 = ab.length_sq();
    if ab2 == 0.0 {
        return ap.length_sq();
    }
    let t = (ap.dot(ab) / ab2).clamp(0.0, 1.0);
    let proj = a + ab * t;
    proj.distance_sq(p)
}

/// Wraps an angle into `[-π, π]`.
#[inline]
pub fn wrap_angle(mut a: f32) -> f32 {
    a %= TAU;
    if a > PI {
        a -= TAU;
    } else if a < -PI {
        a += TAU;
    }
    a
}

/// Moves `current` toward `target` along the shortest arc by fraction `t`.
#[inline]
pub fn lerp_angle(current: f32, target: f32, t: f32) -> f32 {
    current + wrap_angle(target - current) * t
}
