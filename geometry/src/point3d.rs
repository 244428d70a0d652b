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

use crate::{Float, Vector3D};
use serde::{Deserialize, Serialize};

/// A point in space.
///
/// ```
/// use geometry::Point3D;
/// let a = Point3D::new(1., 0., 0.);
/// let b = Point3D::new(4., 4., 0.);
/// assert!((a.distance(b) - 5.).abs() < 1e-9);
/// ```
#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point3D {
    /// The X component
    pub x: Float,
    /// The Y component
    pub y: Float,
    /// The Z component
    pub z: Float,
}

impl std::fmt::Display for Point3D {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "Point3D({}, {}, {})", self.x, self.y, self.z)
    }
}

impl Point3D {
    /// Creates a new [`Point3D`]
    pub const fn new(x: Float, y: Float, z: Float) -> Point3D {
        Point3D { x, y, z }
    }

    /// Gets the squared distance to another [`Point3D`]
    pub fn squared_distance(&self, other: Point3D) -> Float {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        dx * dx + dy * dy + dz * dz
    }

    /// Gets the distance to another [`Point3D`]
    pub fn distance(&self, other: Point3D) -> Float {
        self.squared_distance(other).sqrt()
    }

    /// Compares two [`Point3D`] using a very small tolerance
    pub fn compare(&self, other: Point3D) -> bool {
        const TINY: Float = 1e-6;
        self.compare_by(other, TINY)
    }

    /// Checks whether every component of two [`Point3D`] is
    /// within `eps` of each other
    pub fn compare_by(&self, other: Point3D, eps: Float) -> bool {
        (self.x - other.x).abs() <= eps
            && (self.y - other.y).abs() <= eps
            && (self.z - other.z).abs() <= eps
    }

    /// Checks whether `self`, `b` and `c` are collinear.
    ///
    /// Returns an error if two of them are the same point, as
    /// collinearity is not defined in that case.
    pub fn is_collinear(self, b: Point3D, c: Point3D) -> Result<bool, String> {
        if self.compare(b) || self.compare(c) || b.compare(c) {
            return Err(format!(
                "Checking collinearity of repeated points: {}, {} and {}",
                self, b, c
            ));
        }
        let ab = b - self;
        let bc = c - b;
        Ok(ab.is_parallel(bc))
    }

    /// Returns this point as a [`Vector3D`] going from the origin
    pub fn as_vector3d(&self) -> Vector3D {
        Vector3D::new(self.x, self.y, self.z)
    }
}

impl std::ops::Add<Vector3D> for Point3D {
    type Output = Point3D;

    fn add(self, other: Vector3D) -> Point3D {
        Point3D::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl std::ops::Add<Point3D> for Point3D {
    type Output = Point3D;

    fn add(self, other: Point3D) -> Point3D {
        Point3D::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl std::ops::AddAssign<Point3D> for Point3D {
    fn add_assign(&mut self, other: Point3D) {
        self.x += other.x;
        self.y += other.y;
        self.z += other.z;
    }
}

impl std::ops::AddAssign<Vector3D> for Point3D {
    fn add_assign(&mut self, other: Vector3D) {
        self.x += other.x;
        self.y += other.y;
        self.z += other.z;
    }
}

impl std::ops::Sub<Point3D> for Point3D {
    type Output = Vector3D;

    fn sub(self, other: Point3D) -> Vector3D {
        Vector3D::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl std::ops::Sub<Vector3D> for Point3D {
    type Output = Point3D;

    fn sub(self, other: Vector3D) -> Point3D {
        Point3D::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl std::ops::Mul<Float> for Point3D {
    type Output = Point3D;

    fn mul(self, s: Float) -> Point3D {
        Point3D::new(self.x * s, self.y * s, self.z * s)
    }
}

impl std::ops::Div<Float> for Point3D {
    type Output = Point3D;

    fn div(self, s: Float) -> Point3D {
        Point3D::new(self.x / s, self.y / s, self.z / s)
    }
}

/***********/
/* TESTING */
/***********/
