/*
MIT License
Copyright (c)  Germán Molina
Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the "Software"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:
The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.
THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.
*/

use crate::{Float, Point3D};
use serde::{Deserialize, Serialize};

/// A direction in space.
///
/// Multiplying two [`Vector3D`] (i.e., `a * b`) returns their dot
/// product, while multiplying by a [`Float`] scales them.
///
/// ```
/// use geometry::Vector3D;
/// let a = Vector3D::new(1., 0., 0.);
/// let b = Vector3D::new(0., 1., 0.);
/// assert!((a * b).abs() < 1e-9);
/// assert!(a.cross(b).compare(Vector3D::new(0., 0., 1.)));
/// ```
#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vector3D {
    /// The X component
    pub x: Float,
    /// The Y component
    pub y: Float,
    /// The Z component
    pub z: Float,
}

impl std::fmt::Display for Vector3D {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "Vector3D({}, {}, {})", self.x, self.y, self.z)
    }
}

impl std::convert::From<Point3D> for Vector3D {
    fn from(p: Point3D) -> Self {
        Vector3D::new(p.x, p.y, p.z)
    }
}

impl Vector3D {
    /// Creates a new [`Vector3D`]
    pub const fn new(x: Float, y: Float, z: Float) -> Vector3D {
        Vector3D { x, y, z }
    }

    /// The squared length of the [`Vector3D`]
    pub fn length_squared(&self) -> Float {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// The length of the [`Vector3D`]
    pub fn length(&self) -> Float {
        self.length_squared().sqrt()
    }

    /// Checks whether all the components are (almost) zero
    pub fn is_zero(&self) -> bool {
        const TINY: Float = 1e-12;
        self.length_squared() < TINY
    }

    /// Scales the [`Vector3D`] so that it has a length of 1. Zero
    /// vectors are left untouched.
    pub fn normalize(&mut self) {
        let l = self.length();
        if l > 0. {
            self.x /= l;
            self.y /= l;
            self.z /= l;
        }
    }

    /// Returns a normalized copy of the [`Vector3D`]
    pub fn get_normalized(&self) -> Vector3D {
        let mut ret = *self;
        ret.normalize();
        ret
    }

    /// The cross product between `self` and `other`
    pub fn cross(&self, other: Vector3D) -> Vector3D {
        Vector3D::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Checks whether two [`Vector3D`] are parallel, pointing
    /// in the same or in opposite directions
    pub fn is_parallel(&self, other: Vector3D) -> bool {
        let a = self.get_normalized();
        let b = other.get_normalized();
        a.cross(b).length() < 1e-7
    }

    /// Checks whether two [`Vector3D`] point towards the same side
    /// (i.e., their dot product is positive)
    pub fn is_same_direction(&self, other: Vector3D) -> bool {
        *self * other > 0.
    }

    /// Compares two [`Vector3D`] using a very small tolerance
    pub fn compare(&self, other: Vector3D) -> bool {
        const TINY: Float = 1e-6;
        (self.x - other.x).abs() <= TINY
            && (self.y - other.y).abs() <= TINY
            && (self.z - other.z).abs() <= TINY
    }
}

impl std::ops::Add for Vector3D {
    type Output = Vector3D;

    fn add(self, other: Vector3D) -> Vector3D {
        Vector3D::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl std::ops::AddAssign for Vector3D {
    fn add_assign(&mut self, other: Vector3D) {
        self.x += other.x;
        self.y += other.y;
        self.z += other.z;
    }
}

impl std::ops::Sub for Vector3D {
    type Output = Vector3D;

    fn sub(self, other: Vector3D) -> Vector3D {
        Vector3D::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl std::ops::Neg for Vector3D {
    type Output = Vector3D;

    fn neg(self) -> Vector3D {
        Vector3D::new(-self.x, -self.y, -self.z)
    }
}

/// Dot product
impl std::ops::Mul<Vector3D> for Vector3D {
    type Output = Float;

    fn mul(self, other: Vector3D) -> Float {
        self.x * other.x + self.y * other.y + self.z * other.z
    }
}

impl std::ops::Mul<Float> for Vector3D {
    type Output = Vector3D;

    fn mul(self, s: Float) -> Vector3D {
        Vector3D::new(self.x * s, self.y * s, self.z * s)
    }
}

impl std::ops::MulAssign<Float> for Vector3D {
    fn mul_assign(&mut self, s: Float) {
        self.x *= s;
        self.y *= s;
        self.z *= s;
    }
}

impl std::ops::Div<Float> for Vector3D {
    type Output = Vector3D;

    fn div(self, s: Float) -> Vector3D {
        Vector3D::new(self.x / s, self.y / s, self.z / s)
    }
}

/***********/
/* TESTING */
/***********/

#[cfg(test)]
mod testing {
    use super::*;

    #[test]
    fn test_normalize() {
        let mut v = Vector3D::new(3., 4., 0.);
        assert!((v.length() - 5.).abs() < 1e-9);
        v.normalize();
        assert!((v.length() - 1.).abs() < 1e-9);

        let mut zero = Vector3D::new(0., 0., 0.);
        zero.normalize();
        assert!(zero.is_zero());
    }

    #[test]
    fn test_parallel() {
        let a = Vector3D::new(1., 1., 0.);
        assert!(a.is_parallel(Vector3D::new(2., 2., 0.)));
        assert!(a.is_parallel(Vector3D::new(-2., -2., 0.)));
        assert!(!a.is_parallel(Vector3D::new(2., 1., 0.)));

        assert!(a.is_same_direction(Vector3D::new(2., 2., 0.)));
        assert!(!a.is_same_direction(Vector3D::new(-2., -2., 0.)));
    }

    #[test]
    fn test_cross_and_dot() {
        let x = Vector3D::new(1., 0., 0.);
        let y = Vector3D::new(0., 1., 0.);
        let z = Vector3D::new(0., 0., 1.);
        assert!(x.cross(y).compare(z));
        assert!(y.cross(x).compare(-z));
        assert!((x * y).abs() < 1e-12);
        assert!(((x * 3.) * x - 3.).abs() < 1e-12);
    }
}
