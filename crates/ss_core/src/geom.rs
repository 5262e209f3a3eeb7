//! 2D vector math and angle helpers shared by the actuator models and
//! serializers.
//!
//! Angles are radians, measured counter-clockwise from the positive x axis
//! and kept in `(-PI, PI]` by [`normalize_angle`].

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::ops::{Add, AddAssign, Mul, Neg, Sub};

/// Position, velocity or acceleration on the pitch plane.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Vec2 { x, y }
    }

    /// Vector of length `r` pointing in direction `theta`.
    pub fn from_polar(r: f64, theta: f64) -> Self {
        Vec2 { x: r * theta.cos(), y: r * theta.sin() }
    }

    /// Euclidean length.
    pub fn norm(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Direction of this vector. Zero vectors report 0.0.
    pub fn th(&self) -> f64 {
        if self.x == 0.0 && self.y == 0.0 {
            0.0
        } else {
            self.y.atan2(self.x)
        }
    }

    pub fn distance(&self, other: Vec2) -> f64 {
        (*self - other).norm()
    }

    /// Rotate around the origin by `angle` radians.
    pub fn rotated(&self, angle: f64) -> Vec2 {
        let (s, c) = angle.sin_cos();
        Vec2 {
            x: self.x * c - self.y * s,
            y: self.x * s + self.y * c,
        }
    }

    /// Same direction, length `len`. Zero vectors stay zero.
    pub fn normalized_to(&self, len: f64) -> Vec2 {
        let r = self.norm();
        if r < 1.0e-10 {
            Vec2::ZERO
        } else {
            *self * (len / r)
        }
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;
    fn mul(self, rhs: f64) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;
    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

/// Wrap an angle into `(-PI, PI]`.
pub fn normalize_angle(mut angle: f64) -> f64 {
    while angle > PI {
        angle -= 2.0 * PI;
    }
    while angle <= -PI {
        angle += 2.0 * PI;
    }
    angle
}

pub fn deg_to_rad(deg: f64) -> f64 {
    deg * PI / 180.0
}

pub fn rad_to_deg(rad: f64) -> f64 {
    rad * 180.0 / PI
}

/// Clamp `value` into `[lo, hi]`.
pub fn bound(lo: f64, value: f64, hi: f64) -> f64 {
    value.clamp(lo, hi)
}

/// Axis-aligned rectangle given by center and full extents, used for the
/// goalie catch areas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    center: Vec2,
    size: Vec2,
}

impl Rect {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Rect { center, size }
    }

    pub fn contains(&self, p: Vec2) -> bool {
        (p.x - self.center.x).abs() <= self.size.x * 0.5
            && (p.y - self.center.y).abs() <= self.size.y * 0.5
    }
}
