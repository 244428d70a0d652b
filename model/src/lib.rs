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

#![deny(missing_docs)]

//! This crate contains the data structure utilized for describing
//! a building whose airflow network is to be built.
//!
//! A [`Model`] is a flat collection of objects (stories, thermal zones,
//! spaces, surfaces, sub-surfaces and air loops) that reference each other
//! by name. Surfaces are expressed in the coordinates of their [`Space`],
//! which has an origin in building coordinates.
//!
//! Beyond reading and writing models, this crate knows how to tell which
//! surfaces are shared by two spaces ([`Model::match_surfaces`]) and how to
//! find surfaces by orientation ([`Model::find_surfaces`]).
//!
//! # Example
//!
//! ```
//! use model::{Model, Space, Boundary};
//! use geometry::Point3D;
//!
//! let mut model = Model::default();
//! let floor_print = [
//!     Point3D::new(0., 0., 0.),
//!     Point3D::new(0., 10., 0.),
//!     Point3D::new(10., 10., 0.),
//!     Point3D::new(10., 0., 0.),
//! ];
//!
//! // Two boxes, side by side
//! model.add_space_from_floor_print(Space::new("West"), &floor_print, 3.).unwrap();
//! let east = Space::new("East").with_origin(Point3D::new(10., 0., 0.));
//! model.add_space_from_floor_print(east, &floor_print, 3.).unwrap();
//!
//! // They share a single wall
//! assert_eq!(model.match_surfaces().unwrap(), 1);
//! let shared = model
//!     .surfaces
//!     .iter()
//!     .filter(|s| matches!(s.boundary, Boundary::Surface { .. }))
//!     .count();
//! assert_eq!(shared, 2);
//! ```

/// The kind of Floating point number used in the
/// library... the `"float"` feature means it becomes `f32`
/// and `f64` is used otherwise.
#[cfg(feature = "float")]
type Float = f32;

#[cfg(not(feature = "float"))]
type Float = f64;

/// The model itself
mod model;
pub use crate::model::Model;

/// Matching the surfaces shared by spaces
mod matching;

/// Finding surfaces by orientation
mod search;

/// A Building Object and the stories in it
mod building;
pub use building::{Building, BuildingStory};

/// Represents the boundary of a [`Surface`] (e.g. it can lead to the ground, outdoors or a space)
mod boundary;
pub use boundary::Boundary;

/// A fixed surface enclosing a space
mod surface;
pub use surface::{Surface, SurfaceType};

/// Windows and doors
mod sub_surface;
pub use sub_surface::{SubSurface, SubSurfaceType};

/// Represents a space within a building. This will
/// often be a room, but it might also be half a room
mod space;
pub use space::{Space, ThermalZone};

/// Air handling systems
mod air_loop;
pub use air_loop::AirLoop;

/// The period of the year to simulate
mod run_period;
pub use run_period::RunPeriod;

/// For printing warning and error messages to the user
pub mod error_msgs;
pub use error_msgs::{print_error, print_warning};

/// Geometric behaviour shared by surfaces and sub-surfaces
pub mod surface_trait;
pub use surface_trait::{azimuth, tilt, SurfaceTrait};
