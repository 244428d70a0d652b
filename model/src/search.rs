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
use crate::{Model, Surface, SurfaceTrait};
use std::sync::Arc;

/// Checks whether an azimuth falls within `[min, max]`, widened by `tol`.
/// Ranges with `min > max` go through North (e.g., from 350 to 10).
fn azimuth_in_range(az: Float, min: Option<Float>, max: Option<Float>, tol: Float) -> bool {
    let min = min.unwrap_or(0.0);
    let mut max = max.unwrap_or(360.0);
    if min > max {
        max += 360.;
    }
    [az - 360., az, az + 360.]
        .iter()
        .any(|a| *a >= min - tol && *a <= max + tol)
}

fn tilt_in_range(tilt: Float, min: Option<Float>, max: Option<Float>, tol: Float) -> bool {
    if let Some(min) = min {
        if tilt < min - tol {
            return false;
        }
    }
    if let Some(max) = max {
        if tilt > max + tol {
            return false;
        }
    }
    true
}

impl Model {
    /// Finds the surfaces of a space whose orientation is within a range. Azimuths
    /// are in degrees clockwise from the North (including the building's north axis)
    /// and tilts are in degrees from the zenith. Bounds that are `None` are not checked,
    /// and all of them are widened by `tol` degrees.
    ///
    /// Horizontal surfaces (i.e., floors and flat roofs, whose tilt is within `tol`
    /// of 0 or 180 degrees) have no azimuth, so they pass any azimuth bounds. Use
    /// the tilt bounds to leave them out.
    ///
    /// ```
    /// use model::{Model, Space};
    /// use geometry::Point3D;
    ///
    /// let mut model = Model::default();
    /// let floor_print = [
    ///     Point3D::new(0., 0., 0.),
    ///     Point3D::new(0., 10., 0.),
    ///     Point3D::new(10., 10., 0.),
    ///     Point3D::new(10., 0., 0.),
    /// ];
    /// model.add_space_from_floor_print(Space::new("Room"), &floor_print, 3.).unwrap();
    ///
    /// // The south wall
    /// let south = model.find_surfaces("Room", Some(180.), Some(180.), Some(90.), Some(90.), 1.).unwrap();
    /// assert_eq!(south.len(), 1);
    ///
    /// // All the walls
    /// let walls = model.find_surfaces("Room", None, None, Some(90.), Some(90.), 1.).unwrap();
    /// assert_eq!(walls.len(), 4);
    /// ```
    pub fn find_surfaces<S: AsRef<str>>(
        &self,
        space: S,
        min_azimuth: Option<Float>,
        max_azimuth: Option<Float>,
        min_tilt: Option<Float>,
        max_tilt: Option<Float>,
        tol: Float,
    ) -> Result<Vec<Arc<Surface>>, String> {
        let space = self.get_space(space)?;
        let north_axis = self.north_axis();
        let check_azimuth = min_azimuth.is_some() || max_azimuth.is_some();

        let ret = self
            .surfaces_in_space(&space.name)
            .into_iter()
            .filter(|s| {
                let tilt = s.tilt();
                // Horizontal surfaces have no meaningful azimuth
                let horizontal = tilt.abs() < tol || (tilt - 180.).abs() < tol;
                let az_ok = !check_azimuth
                    || horizontal
                    || azimuth_in_range(s.azimuth(north_axis), min_azimuth, max_azimuth, tol);
                az_ok && tilt_in_range(tilt, min_tilt, max_tilt, tol)
            })
            .collect();
        Ok(ret)
    }
}

/***********/
/* TESTING */
/***********/
