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

use crate::{BBox3D, Float};
use crate::{Point3D, Segment3D, Vector3D};

/// A set of [`Point3D`] in sequence, forming a closed loop.
///
/// ```
/// use geometry::{Loop3D, Point3D};
/// let mut the_loop = Loop3D::new();
/// assert!(the_loop.is_empty());
/// let l = 0.5;
///
/// assert!(the_loop.push(Point3D::new(-l, -l, 0.)).is_ok());
/// assert!(the_loop.push(Point3D::new(l, -l, 0.)).is_ok());
/// assert!(the_loop.push(Point3D::new(l, l, 0.)).is_ok());
/// assert!(the_loop.push(Point3D::new(-l, l, 0.)).is_ok());
///
/// assert!(the_loop.area().is_err());
/// assert!(the_loop.close().is_ok());
///
/// let a = the_loop.area().expect("no area?");
/// assert!((4. * l * l - a).abs() < 0.0001);
/// ```
///
/// Pushing a [`Point3D`] that is collinear with the last two
/// replaces the last vertex instead of extending the [`Loop3D`].
///
/// ```
/// use geometry::{Loop3D, Point3D};
/// let mut the_loop = Loop3D::new();
///
/// assert!(the_loop.push(Point3D::new(0., 0., 0.)).is_ok());
/// assert!(the_loop.push(Point3D::new(1., 1., 0.)).is_ok());
///
/// let collinear = Point3D::new(2., 2., 0.);
/// assert!(the_loop.push(collinear).is_ok());
/// assert_eq!(2, the_loop.len());
/// assert_eq!(the_loop[1], collinear);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Loop3D {
    vertices: Vec<Point3D>,

    /// Right-hand-side normal. Provisional until closed.
    normal: Vector3D,

    closed: bool,

    area: Float,

    perimeter: Float,
}

impl std::ops::Index<usize> for Loop3D {
    type Output = Point3D;

    fn index(&self, index: usize) -> &Self::Output {
        &self.vertices[index]
    }
}

impl std::fmt::Display for Loop3D {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let strs: Vec<String> = self
            .vertices
            .iter()
            .map(|p| format!("{},{},{}", p.x, p.y, p.z))
            .collect();
        write!(f, "{}", strs.join(",\n"))
    }
}

impl Loop3D {
    /// Creates a new and empty [`Loop3D`]
    pub fn new() -> Loop3D {
        Self::with_capacity(0)
    }

    /// Creates a new and empty [`Loop3D`] with a specific `capacity`.
    pub fn with_capacity(capacity: usize) -> Loop3D {
        Loop3D {
            vertices: Vec::with_capacity(capacity),
            normal: Vector3D::new(0., 0., 0.),
            closed: false,
            area: -1.0,
            perimeter: -1.0,
        }
    }

    /// Builds a closed [`Loop3D`] from a list of [`Point3D`],
    /// keeping collinear vertices.
    pub fn from_points(points: &[Point3D]) -> Result<Loop3D, String> {
        let mut ret = Self::with_capacity(points.len());
        for p in points {
            ret.push_collinear(*p, false)?;
        }
        ret.close()?;
        Ok(ret)
    }

    /// The number of vertices
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Has no vertices?
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Borrows the vertices
    pub fn vertices(&self) -> &[Point3D] {
        &self.vertices
    }

    /// Has been closed?
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// The normal. It is only guaranteed to be right after closing.
    pub fn normal(&self) -> Vector3D {
        self.normal
    }

    /// The area of a closed [`Loop3D`]
    pub fn area(&self) -> Result<Float, String> {
        if !self.closed {
            return Err("Trying to get the area of an open Loop3D".to_string());
        }
        Ok(self.area)
    }

    /// The perimeter of a closed [`Loop3D`]
    pub fn perimeter(&self) -> Result<Float, String> {
        if !self.closed {
            return Err("Trying to get the perimeter of an open Loop3D".to_string());
        }
        Ok(self.perimeter)
    }

    /// Checks whether a point is in the plane of the [`Loop3D`]
    pub fn is_coplanar(&self, p: Point3D) -> Result<bool, String> {
        if self.vertices.is_empty() {
            return Err(
                "Trying to check whether point is coplanar in a Loop3D without any vertices"
                    .to_string(),
            );
        }
        if self.normal.is_zero() {
            return Err(
                "Trying to check whether point is coplanar in a Loop3D without normal".to_string(),
            );
        }
        let d = self.vertices[0] - p;
        Ok((self.normal * d).abs() < 1e-4)
    }

    fn valid_to_add(&self, point: Point3D) -> Result<(), String> {
        if self.closed {
            return Err("Trying to add a point to a closed Loop3D".to_string());
        }

        if !self.normal.is_zero() && !self.is_coplanar(point)? {
            return Err(format!(
                "Trying to add a non-coplanar point {} to Loop3D",
                point
            ));
        }

        let n = self.vertices.len();
        if n >= 3 {
            let new_edge = Segment3D::new(self.vertices[n - 1], point);
            for i in 0..n - 2 {
                let this_s = Segment3D::new(self.vertices[i], self.vertices[i + 1]);
                if new_edge.intersect(&this_s).is_some() {
                    return Err(
                        "Trying to push a point that would make the Loop3D intersect with itself"
                            .to_string(),
                    );
                }
            }
        }
        Ok(())
    }

    /// Adds a [`Point3D`]. If `avoid_collinear` is `true`, a point
    /// collinear with the last two replaces the last one.
    pub fn push_collinear(&mut self, point: Point3D, avoid_collinear: bool) -> Result<(), String> {
        self.valid_to_add(point)?;

        if let Some(last) = self.vertices.last() {
            if last.compare(point) {
                return Ok(());
            }
        }

        let n = self.vertices.len();
        if avoid_collinear && n >= 2 && self.vertices[n - 2].is_collinear(self.vertices[n - 1], point)? {
            self.vertices[n - 1] = point;
        } else {
            self.vertices.push(point);
        }

        if self.normal.is_zero() && self.vertices.len() >= 3 {
            self.normal = self.newell_vector();
            self.normal.normalize();
        }
        Ok(())
    }

    /// Adds a [`Point3D`], dropping collinear vertices
    pub fn push(&mut self, point: Point3D) -> Result<(), String> {
        self.push_collinear(point, true)
    }

    /// Sum of the cross products of consecutive vertices. Its length is
    /// twice the area and its direction the right-hand normal.
    fn newell_vector(&self) -> Vector3D {
        let n = self.vertices.len();
        let mut rhs = Vector3D::new(0., 0., 0.);
        for i in 0..n {
            let v: Vector3D = self.vertices[i].into();
            let v_p1: Vector3D = self.vertices[(i + 1) % n].into();
            rhs += v.cross(v_p1);
        }
        rhs
    }

    /// Closes the [`Loop3D`], calculating its normal, area and perimeter.
    pub fn close(&mut self) -> Result<(), String> {
        if self.closed {
            return Ok(());
        }

        // a repeated first vertex at the end is not a vertex
        if self.vertices.len() > 1 {
            let n = self.vertices.len();
            if self.vertices[0].compare(self.vertices[n - 1]) {
                self.vertices.pop();
            }
        }

        if self.vertices.len() < 3 {
            return Err("Loops need at least 3 vertices".to_string());
        }

        let n = self.vertices.len();
        let closing = Segment3D::new(self.vertices[n - 1], self.vertices[0]);
        for i in 1..n - 2 {
            let this_s = Segment3D::new(self.vertices[i], self.vertices[i + 1]);
            if closing.intersect(&this_s).is_some() {
                return Err("Closing the Loop3D would make it intersect with itself".to_string());
            }
        }

        let rhs = self.newell_vector();
        let double_area = rhs.length();
        if double_area < 1e-12 {
            return Err("Trying to close a Loop3D with zero area".to_string());
        }
        self.normal = rhs / double_area;
        self.area = double_area / 2.;

        let mut per = 0.0;
        for i in 0..n {
            per += self.vertices[i].distance(self.vertices[(i + 1) % n]);
        }
        self.perimeter = per;

        self.closed = true;
        self.vertices.shrink_to_fit();
        Ok(())
    }

    /// Check if two [`Loop3D`] have the same vertices (i.e., same shape and position),
    /// ignoring their starting point. If their normals are opposed, the
    /// vertices of `other` are walked backwards.
    ///
    /// ```
    /// use geometry::{Loop3D, Point3D};
    ///
    /// let a = Point3D::new(0., 0., 0.);
    /// let b = Point3D::new(1., 1., 0.);
    /// let c = Point3D::new(0., 1., 0.);
    ///
    /// let l = Loop3D::from_points(&[a, b, c]).unwrap();
    /// let l2 = Loop3D::from_points(&[b, c, a]).unwrap();
    /// assert!(l.is_equal(&l2, 0.001).unwrap());
    ///
    /// // reversed, but still the same loop
    /// let l3 = Loop3D::from_points(&[c, b, a]).unwrap();
    /// assert!(l.is_equal(&l3, 0.001).unwrap());
    /// ```
    pub fn is_equal(&self, other: &Loop3D, eps: Float) -> Result<bool, String> {
        if !self.closed || !other.closed {
            return Err("Trying to compare two Loop3D that might not be closed".into());
        }
        if self.len() != other.len() {
            return Ok(false);
        }
        // area tolerance grows with the perimeter
        if (self.area - other.area).abs() > eps * (self.perimeter + other.perimeter) {
            return Ok(false);
        }

        let anchor = match other
            .vertices
            .iter()
            .position(|p| p.compare_by(self.vertices[0], eps))
        {
            Some(i) => i,
            None => return Ok(false),
        };

        let is_reversed = self.normal * other.normal < 0.0;
        let n = self.len();

        let mut other_i = anchor;
        for this_pt in self.vertices.iter() {
            if !this_pt.compare_by(other.vertices[other_i], eps) {
                return Ok(false);
            }
            other_i = if is_reversed {
                (other_i + n - 1) % n
            } else {
                (other_i + 1) % n
            };
        }

        Ok(true)
    }

    /// Reverses the order of the vertices and the normal
    pub fn reverse(&mut self) {
        self.normal *= -1.0;
        self.vertices.reverse();
    }

    /// Returns a reversed clone of the [`Loop3D`]
    pub fn get_reversed(&self) -> Self {
        let mut ret = self.clone();
        ret.reverse();
        ret
    }

    /// Moves every vertex by `v`
    pub fn translate(&mut self, v: Vector3D) {
        for p in self.vertices.iter_mut() {
            *p += v;
        }
    }

    /// Returns a translated clone
    pub fn get_translated(&self, v: Vector3D) -> Self {
        let mut ret = self.clone();
        ret.translate(v);
        ret
    }

    /// Gets a [`BBox3D`] containing the `Loop3D`
    pub fn bbox(&self) -> Result<BBox3D, String> {
        let first = self
            .vertices
            .first()
            .ok_or_else(|| "Trying to get a BBox3D of an empty Loop3D".to_string())?;
        let mut ret = BBox3D::from_point(*first);
        for v in self.vertices.iter().skip(1) {
            ret = BBox3D::from_union_point(&ret, *v);
        }
        Ok(ret)
    }

    /// The average of the vertices of a closed loop
    pub fn centroid(&self) -> Result<Point3D, String> {
        if !self.closed {
            return Err("Trying to get the centroid of an open Loop3D".to_string());
        }
        let n = self.vertices.len() as Float;
        let mut sum = Point3D::new(0., 0., 0.);
        for v in &self.vertices {
            sum += *v;
        }
        Ok(sum / n)
    }

    /// Creates a clone of `self` without collinear vertices,
    /// including the ones around the first vertex.
    ///
    /// ```
    /// use geometry::{Loop3D, Point3D};
    ///
    /// let l = Loop3D::from_points(&[
    ///     Point3D::new(0., 0., 0.),
    ///     Point3D::new(0.5, 0., 0.),
    ///     Point3D::new(1., 0., 0.),
    ///     Point3D::new(1., 1., 0.),
    ///     Point3D::new(0., 1., 0.),
    ///     Point3D::new(0., 0.5, 0.),
    /// ]).unwrap();
    /// assert_eq!(l.len(), 6);
    ///
    /// let clean = l.sanitize().unwrap();
    /// assert_eq!(clean.len(), 4);
    /// ```
    pub fn sanitize(&self) -> Result<Self, String> {
        let n = self.vertices.len();
        let mut kept = Vec::with_capacity(n);
        for i in 0..n {
            let prev = self.vertices[(i + n - 1) % n];
            let this = self.vertices[i];
            let next = self.vertices[(i + 1) % n];
            if !prev.is_collinear(this, next)? {
                kept.push(this);
            }
        }
        let mut new = Self::with_capacity(kept.len());
        for v in kept {
            new.push_collinear(v, false)?;
        }
        if self.closed {
            new.close()?;
        }
        Ok(new)
    }
}

/***********/
/* TESTING */
/***********/

#[cfg(test)]
mod testing {
    use super::*;
    use rand::Rng;

    fn square(l: Float, z: Float) -> Result<Loop3D, String> {
        Loop3D::from_points(&[
            Point3D::new(0., 0., z),
            Point3D::new(l, 0., z),
            Point3D::new(l, l, z),
            Point3D::new(0., l, z),
        ])
    }

    #[test]
    fn test_close() -> Result<(), String> {
        let l = square(2., 1.)?;
        assert!(l.is_closed());
        assert!((l.area()? - 4.).abs() < 1e-9);
        assert!((l.perimeter()? - 8.).abs() < 1e-9);
        assert!(l.normal().compare(Vector3D::new(0., 0., 1.)));
        assert!(l.centroid()?.compare(Point3D::new(1., 1., 1.)));

        // Too few points
        let mut l = Loop3D::new();
        l.push(Point3D::new(0., 0., 0.))?;
        l.push(Point3D::new(1., 0., 0.))?;
        assert!(l.close().is_err());

        // Repeated start
        let l = Loop3D::from_points(&[
            Point3D::new(0., 0., 0.),
            Point3D::new(1., 0., 0.),
            Point3D::new(1., 1., 0.),
            Point3D::new(0., 0., 0.),
        ])?;
        assert_eq!(l.len(), 3);
        Ok(())
    }

    #[test]
    fn test_invalid_points() -> Result<(), String> {
        let mut l = Loop3D::new();
        l.push(Point3D::new(0., 0., 0.))?;
        l.push(Point3D::new(2., 0., 0.))?;
        l.push(Point3D::new(2., 1., 0.))?;
        // not coplanar
        assert!(l.push(Point3D::new(0., 1., 1.)).is_err());

        // self intersecting
        l.push(Point3D::new(1., 1., 0.))?;
        assert!(l.push(Point3D::new(1., -1., 0.)).is_err());
        assert_eq!(l.len(), 4);
        Ok(())
    }

    #[test]
    fn test_is_equal() -> Result<(), String> {
        let a = square(1., 0.)?;
        let b = a.get_reversed();
        assert!(a.is_equal(&b, 0.01)?);

        // a tiny displacement is within tolerance
        let c = a.get_translated(Vector3D::new(0.001, 0., 0.));
        assert!(a.is_equal(&c, 0.01)?);

        let d = a.get_translated(Vector3D::new(0.1, 0., 0.));
        assert!(!a.is_equal(&d, 0.01)?);

        let e = square(1.1, 0.)?;
        assert!(!a.is_equal(&e, 0.01)?);

        assert!(a.is_equal(&Loop3D::new(), 0.01).is_err());
        Ok(())
    }

    #[test]
    fn test_is_equal_random_start() -> Result<(), String> {
        let mut rng = rand::thread_rng();
        let pts = [
            Point3D::new(0., 0., 0.),
            Point3D::new(3., 0., 0.),
            Point3D::new(3., 0., 2.),
            Point3D::new(1., 0., 3.),
            Point3D::new(0., 0., 2.),
        ];
        let base = Loop3D::from_points(&pts)?;
        for _ in 0..20 {
            let start: usize = rng.gen_range(0..pts.len());
            let mut rotated: Vec<Point3D> = pts[start..].to_vec();
            rotated.extend_from_slice(&pts[..start]);
            let mut other = Loop3D::from_points(&rotated)?;
            if rng.gen::<bool>() {
                other.reverse();
            }
            assert!(base.is_equal(&other, 0.01)?);
        }
        Ok(())
    }

    #[test]
    fn test_reverse() -> Result<(), String> {
        let l = square(1., 0.)?;
        let r = l.get_reversed();
        assert!((l.normal() * -1.).compare(r.normal()));
        let n = l.len();
        for i in 0..n {
            assert!(l[i].compare(r[n - 1 - i]));
        }
        Ok(())
    }

    #[test]
    fn test_bbox_translate() -> Result<(), String> {
        let mut l = square(2., 0.)?;
        l.translate(Vector3D::new(1., 1., 1.));
        let bbox = l.bbox()?;
        assert!(bbox.min.compare(Point3D::new(1., 1., 1.)));
        assert!(bbox.max.compare(Point3D::new(3., 3., 1.)));
        assert!(Loop3D::new().bbox().is_err());
        Ok(())
    }
}
