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

/// An axis-aligned bounding box
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BBox3D {
    /// The corner with the smallest coordinates
    pub min: Point3D,

    /// The corner with the largest coordinates
    pub max: Point3D,
}

impl BBox3D {
    /// Creates a [`BBox3D`] containing a single [`Point3D`]
    pub fn from_point(p: Point3D) -> Self {
        Self { min: p, max: p }
    }

    /// Creates a [`BBox3D`] containing `bbox` and a [`Point3D`]
    pub fn from_union_point(bbox: &BBox3D, p: Point3D) -> Self {
        let min = Point3D::new(bbox.min.x.min(p.x), bbox.min.y.min(p.y), bbox.min.z.min(p.z));
        let max = Point3D::new(bbox.max.x.max(p.x), bbox.max.y.max(p.y), bbox.max.z.max(p.z));
        Self { min, max }
    }

    /// Creates a [`BBox3D`] containing two [`BBox3D`]
    pub fn from_union(a: &BBox3D, b: &BBox3D) -> Self {
        let ret = Self::from_union_point(a, b.min);
        Self::from_union_point(&ret, b.max)
    }

    /// Checks whether two [`BBox3D`] overlap or touch, within a tolerance.
    ///
    /// ```
    /// use geometry::{BBox3D, Point3D};
    ///
    /// let a = BBox3D::from_union_point(&BBox3D::from_point(Point3D::new(0., 0., 0.)), Point3D::new(1., 1., 1.));
    /// let b = BBox3D::from_union_point(&BBox3D::from_point(Point3D::new(1., 0., 0.)), Point3D::new(2., 1., 1.));
    /// let c = BBox3D::from_union_point(&BBox3D::from_point(Point3D::new(3., 0., 0.)), Point3D::new(4., 1., 1.));
    ///
    /// // touching counts
    /// assert!(a.intersects(&b, 1e-3));
    /// assert!(!a.intersects(&c, 1e-3));
    /// ```
    pub fn intersects(&self, other: &BBox3D, tol: Float) -> bool {
        self.min.x <= other.max.x + tol
            && other.min.x <= self.max.x + tol
            && self.min.y <= other.max.y + tol
            && other.min.y <= self.max.y + tol
            && self.min.z <= other.max.z + tol
            && other.min.z <= self.max.z + tol
    }
}
