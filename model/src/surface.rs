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

use crate::{Boundary, SurfaceTrait};
use geometry::Polygon3D;
use serde::{Deserialize, Serialize};

/// The kind of surface.
///
/// Unlike the boundary, which is the result of matching surfaces,
/// this is part of the input and decides which leakage element is
/// used for a surface in the airflow network.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceType {
    /// A horizontal surface at the bottom of a space
    Floor,

    /// A vertical(ish) surface
    Wall,

    /// The top of a space. It can be a roof or the ceiling
    /// below another space.
    RoofCeiling,
}

impl std::fmt::Display for SurfaceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Floor => "Floor",
            Self::Wall => "Wall",
            Self::RoofCeiling => "RoofCeiling",
        };
        write!(f, "{}", s)
    }
}

/// A surface enclosing a [`Space`](crate::Space).
///
/// Its vertices are in the coordinates of its space, and ordered
/// counterclockwise when seen from outside the space (i.e., the normal
/// points outwards).
///
/// ## Examples
///
/// ```
/// use model::{Surface, SurfaceType, SurfaceTrait, Boundary};
///
/// let s: Surface = json5::from_str("{
///     name: 'South Wall',
///     space: 'Office',
///     surface_type: 'Wall',
///     vertices: [
///         0, 0, 3,
///         0, 0, 0,
///         10, 0, 0,
///         10, 0, 3,
///     ]
/// }").unwrap();
/// assert_eq!(s.boundary, Boundary::Outdoors);
/// assert!((s.gross_area() - 30.).abs() < 1e-9);
/// assert!((s.azimuth(0.) - 180.).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Surface {
    /// The name of the surface
    pub name: String,

    /// The name of the [`Space`](crate::Space) enclosed by this surface
    pub space: String,

    /// The kind of surface
    pub surface_type: SurfaceType,

    /// An array of Numbers representing the vertices of the
    /// surface. The length of this array must be divisible by 3.
    pub vertices: Polygon3D,

    /// What is on the other side of the surface
    #[serde(default)]
    pub boundary: Boundary,
}

impl SurfaceTrait for Surface {
    fn name(&self) -> &String {
        &self.name
    }

    fn vertices(&self) -> &Polygon3D {
        &self.vertices
    }
}

impl Surface {
    /// Creates a new [`Surface`] leading outdoors
    pub fn new<S: Into<String>, T: Into<String>>(
        name: S,
        space: T,
        surface_type: SurfaceType,
        vertices: Polygon3D,
    ) -> Self {
        Self {
            name: name.into(),
            space: space.into(),
            surface_type,
            vertices,
            boundary: Boundary::Outdoors,
        }
    }

    /// The name of the surface on the other side, if this surface has been matched
    pub fn adjacent_surface(&self) -> Option<&String> {
        self.boundary.adjacent_surface()
    }
}

/***********/
/* TESTING */
/***********/
