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

use crate::Float;
use geometry::{Point3D, Polygon3D, Vector3D};

/// The azimuth of a [`Vector3D`] (generally the outward normal of a surface),
/// in degrees measured clockwise from the true North. `north_axis` is the
/// angle between the building's Y axis and the true North.
///
/// Vectors pointing straight up or down have an azimuth of zero.
///
/// ```
/// use model::azimuth;
/// use geometry::Vector3D;
///
/// let east = Vector3D::new(1., 0., 0.);
/// assert!((azimuth(east, 0.) - 90.).abs() < 1e-9);
/// // Rotating the building rotates its walls
/// assert!((azimuth(east, 90.) - 180.).abs() < 1e-9);
/// ```
pub fn azimuth(normal: Vector3D, north_axis: Float) -> Float {
    const TINY: Float = 1e-9;
    if normal.x.abs() < TINY && normal.y.abs() < TINY {
        return 0.0;
    }
    let az = normal.x.atan2(normal.y).to_degrees() + north_axis;
    let az = az.rem_euclid(360.);
    // rem_euclid can round up to exactly 360
    if az >= 360. {
        0.0
    } else {
        az
    }
}

/// The tilt of a [`Vector3D`] (generally the outward normal of a surface),
/// in degrees from the zenith. Roofs are at 0, walls at 90 and floors at 180.
pub fn tilt(normal: Vector3D) -> Float {
    let n = normal.get_normalized();
    n.z.clamp(-1., 1.).acos().to_degrees()
}

/// Behaviour shared by surfaces and sub-surfaces, both of which are
/// planar polygons expressed in the coordinates of a `Space`.
pub trait SurfaceTrait {
    /// Returns a reference to the name of the surface
    fn name(&self) -> &String;

    /// Borrows the [`Polygon3D`] describing this surface, in
    /// space coordinates
    fn vertices(&self) -> &Polygon3D;

    /// The area of the polygon, in m2
    fn gross_area(&self) -> Float {
        self.vertices().area()
    }

    /// The normal pointing away from the space that owns the surface
    fn outward_normal(&self) -> Vector3D {
        self.vertices().normal()
    }

    /// Degrees clockwise from the true North
    fn azimuth(&self, north_axis: Float) -> Float {
        azimuth(self.outward_normal(), north_axis)
    }

    /// Degrees from the zenith
    fn tilt(&self) -> Float {
        tilt(self.outward_normal())
    }

    /// The polygon translated into building coordinates
    fn vertices_in_building(&self, space_origin: Point3D) -> Polygon3D {
        self.vertices()
            .get_translated(space_origin.as_vector3d())
    }

    /// Average height of the vertices, in building coordinates
    fn average_z(&self, space_origin: Point3D) -> Float {
        self.vertices().outer_centroid().z + space_origin.z
    }
}

/***********/
/* TESTING */
/***********/

#[cfg(test)]
mod testing {
    use super::*;

    #[test]
    fn test_azimuth() {
        let north = Vector3D::new(0., 1., 0.);
        let south = Vector3D::new(0., -1., 0.);
        let west = Vector3D::new(-1., 0., 0.);
        let up = Vector3D::new(0., 0., 1.);

        assert!(azimuth(north, 0.).abs() < 1e-9);
        assert!((azimuth(south, 0.) - 180.).abs() < 1e-9);
        assert!((azimuth(west, 0.) - 270.).abs() < 1e-9);
        assert!(azimuth(up, 45.).abs() < 1e-9);

        // wraps
        assert!((azimuth(west, 100.) - 10.).abs() < 1e-9);
        assert!((azimuth(north, -30.) - 330.).abs() < 1e-9);
    }

    #[test]
    fn test_tilt() {
        assert!(tilt(Vector3D::new(0., 0., 1.)).abs() < 1e-9);
        assert!((tilt(Vector3D::new(0., 0., -1.)) - 180.).abs() < 1e-9);
        assert!((tilt(Vector3D::new(1., 0., 0.)) - 90.).abs() < 1e-9);
        assert!((tilt(Vector3D::new(0., 1., 1.)) - 45.).abs() < 1e-6);
    }
}
