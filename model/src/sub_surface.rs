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

use crate::SurfaceTrait;
use geometry::Polygon3D;
use serde::{Deserialize, Serialize};

/// The kind of [`SubSurface`]
#[derive(Debug, Default, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum SubSurfaceType {
    /// A window that cannot be opened
    #[default]
    FixedWindow,
    /// A window that can be opened
    OperableWindow,
    /// An opaque door
    Door,
    /// A glazed door
    GlassDoor,
    /// A large door, for vehicles
    OverheadDoor,
    /// A window on a roof
    Skylight,
}

/// A window, door or similar element contained in a [`Surface`](crate::Surface).
///
/// Its vertices are in the coordinates of the space that owns its
/// parent surface.
///
/// ```
/// use model::{SubSurface, SubSurfaceType};
///
/// let door: SubSurface = json5::from_str("{
///     name: 'Front Door',
///     surface: 'Space 1 Wall 4',
///     sub_surface_type: 'Door',
///     vertices: [2,0,2, 2,0,0, 4,0,0, 4,0,2]
/// }").unwrap();
/// assert_eq!(door.sub_surface_type, SubSurfaceType::Door);
/// assert!(door.adjacent_sub_surface.is_none());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SubSurface {
    /// The name of the sub-surface
    pub name: String,

    /// The name of the parent [`Surface`](crate::Surface)
    pub surface: String,

    /// The kind of sub-surface
    #[serde(default)]
    pub sub_surface_type: SubSurfaceType,

    /// The vertices, in space coordinates
    pub vertices: Polygon3D,

    /// The sub-surface on the other side, set when matching surfaces
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub adjacent_sub_surface: Option<String>,
}

impl SurfaceTrait for SubSurface {
    fn name(&self) -> &String {
        &self.name
    }

    fn vertices(&self) -> &Polygon3D {
        &self.vertices
    }
}

impl SubSurface {
    /// Creates a new [`SubSurface`] within `surface`
    pub fn new<S: Into<String>, T: Into<String>>(
        name: S,
        surface: T,
        sub_surface_type: SubSurfaceType,
        vertices: Polygon3D,
    ) -> Self {
        Self {
            name: name.into(),
            surface: surface.into(),
            sub_surface_type,
            vertices,
            adjacent_sub_surface: None,
        }
    }
}

/***********/
/* TESTING */
/***********/

#[cfg(test)]
mod testing {
    use super::*;
    use geometry::Point3D;

    #[test]
    fn test_window() -> Result<(), String> {
        let vertices = Polygon3D::from_points(&[
            Point3D::new(10., 2., 2.),
            Point3D::new(10., 2., 1.),
            Point3D::new(10., 8., 1.),
            Point3D::new(10., 8., 2.),
        ])?;
        let window = SubSurface::new("Window", "Space 2 Wall 3", SubSurfaceType::FixedWindow, vertices);
        assert!((window.gross_area() - 6.).abs() < 1e-9);
        assert!((window.azimuth(0.) - 90.).abs() < 1e-9);
        assert!((window.tilt() - 90.).abs() < 1e-9);
        assert!((window.average_z(Point3D::new(0., 0., 3.)) - 4.5).abs() < 1e-9);

        let json = serde_json::to_string(&window).map_err(|e| e.to_string())?;
        assert!(!json.contains("adjacent_sub_surface"));
        let back: SubSurface = serde_json::from_str(&json).map_err(|e| e.to_string())?;
        assert_eq!(back.sub_surface_type, SubSurfaceType::FixedWindow);
        assert_eq!(back.surface, "Space 2 Wall 3");
        Ok(())
    }

    #[test]
    fn test_unknown_type() {
        let r: Result<SubSurface, _> = json5::from_str(
            "{ name: 'a', surface: 'b', sub_surface_type: 'Portal', vertices: [0,0,0, 1,0,0, 1,1,0] }",
        );
        assert!(r.is_err());
    }
}
