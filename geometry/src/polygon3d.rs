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

use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize};

use crate::{BBox3D, Float};
use crate::{Loop3D, Point3D, Vector3D};

/// A 3-dimensional polygon bounded by one closed [`Loop3D`].
///
/// It (de)serializes as a flat array of coordinates.
///
/// ```
/// use geometry::Polygon3D;
///
/// let p: Polygon3D = serde_json::from_str("[0,0,0, 4,0,0, 4,3,0, 0,3,0]").unwrap();
/// assert!((p.area() - 12.).abs() < 1e-9);
/// assert!(p.normal().compare(geometry::Vector3D::new(0., 0., 1.)));
/// ```
#[derive(Debug, Clone)]
pub struct Polygon3D {
    outer: Loop3D,

    area: Float,

    /// Right-hand-side normal
    normal: Vector3D,
}

impl<'de> Deserialize<'de> for Polygon3D {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let data: Vec<Float> = Deserialize::deserialize(deserializer)?;
        if data.len() % 3 != 0 {
            return Err(serde::de::Error::custom(format!(
                "Expecting Polygon3D to be an array of coordinates whose length is a multiple of 3... found {} numbers",
                data.len()
            )));
        }
        let points: Vec<Point3D> = data
            .chunks(3)
            .map(|c| Point3D::new(c[0], c[1], c[2]))
            .collect();
        let outer = Loop3D::from_points(&points).map_err(serde::de::Error::custom)?;
        Polygon3D::new(outer).map_err(serde::de::Error::custom)
    }
}

impl Serialize for Polygon3D {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let vertices = self.outer.vertices();
        let mut seq = serializer.serialize_seq(Some(3 * vertices.len()))?;
        for Point3D { x, y, z } in vertices.iter() {
            seq.serialize_element(x)?;
            seq.serialize_element(y)?;
            seq.serialize_element(z)?;
        }
        seq.end()
    }
}

impl Polygon3D {
    /// Creates a new [`Polygon3D`] from a closed [`Loop3D`]
    pub fn new(outer: Loop3D) -> Result<Polygon3D, String> {
        if !outer.is_closed() {
            return Err("Trying to create a Polygon3D from a loop that is not closed".to_string());
        }
        let area = outer.area()?;
        let normal = outer.normal();
        Ok(Polygon3D {
            outer,
            area,
            normal,
        })
    }

    /// Builds a [`Polygon3D`] from a list of vertices
    pub fn from_points(points: &[Point3D]) -> Result<Polygon3D, String> {
        Self::new(Loop3D::from_points(points)?)
    }

    /// Reverses the order of the vertices and the normal
    pub fn reverse(&mut self) {
        self.outer.reverse();
        self.normal = self.outer.normal();
    }

    /// Returns a clone of this [`Polygon3D`], reversed.
    pub fn get_reversed(&self) -> Self {
        let mut ret = self.clone();
        ret.reverse();
        ret
    }

    /// Moves the whole [`Polygon3D`]
    pub fn translate(&mut self, v: Vector3D) {
        self.outer.translate(v);
    }

    /// Returns a clone moved by `v`
    pub fn get_translated(&self, v: Vector3D) -> Self {
        let mut ret = self.clone();
        ret.translate(v);
        ret
    }

    /// The normal
    pub fn normal(&self) -> Vector3D {
        self.normal
    }

    /// The area
    pub fn area(&self) -> Float {
        self.area
    }

    /// Average of the vertices
    pub fn outer_centroid(&self) -> Point3D {
        let v = self.outer.vertices();
        let mut centroid = Point3D::new(0., 0., 0.);
        for p in v {
            centroid += *p;
        }
        centroid / v.len() as Float
    }

    /// Borrows the outer [`Loop3D`]
    pub fn outer(&self) -> &Loop3D {
        &self.outer
    }

    /// The bounding box
    pub fn bbox(&self) -> Result<BBox3D, String> {
        self.outer.bbox()
    }
}

/***********/
/* TESTING */
/***********/

#[cfg(test)]
mod testing {
    use super::*;

    #[test]
    fn test_serde() -> Result<(), String> {
        let p: Polygon3D =
            serde_json::from_str("[0,0,0, 0,0,3, 10,0,3, 10,0,0]").map_err(|e| e.to_string())?;
        assert!((p.area() - 30.).abs() < 1e-9);
        // Facing South
        assert!(p.normal().compare(Vector3D::new(0., -1., 0.)));

        let s = serde_json::to_string(&p).map_err(|e| e.to_string())?;
        let p2: Polygon3D = serde_json::from_str(&s).map_err(|e| e.to_string())?;
        assert!(p.outer().is_equal(p2.outer(), 1e-6)?);

        // json5 is what we use for writing models by hand
        let p3: Polygon3D = json5::from_str("[0,0,0, 1,0,0, 1,1,0,]").map_err(|e| e.to_string())?;
        assert_eq!(p3.outer().len(), 3);

        let bad: Result<Polygon3D, _> = serde_json::from_str("[0,0,0, 1,0,0, 1,1]");
        assert!(bad.is_err());
        Ok(())
    }

    #[test]
    fn test_reverse_translate() -> Result<(), String> {
        let p = Polygon3D::from_points(&[
            Point3D::new(0., 0., 0.),
            Point3D::new(1., 0., 0.),
            Point3D::new(1., 1., 0.),
            Point3D::new(0., 1., 0.),
        ])?;
        let r = p.get_reversed();
        assert!(r.normal().compare(Vector3D::new(0., 0., -1.)));
        assert!((r.area() - p.area()).abs() < 1e-12);

        let t = p.get_translated(Vector3D::new(0., 0., 3.));
        assert!(t.outer_centroid().compare(Point3D::new(0.5, 0.5, 3.)));
        let bbox = t.bbox()?;
        assert!((bbox.min.z - 3.).abs() < 1e-12);
        Ok(())
    }
}
