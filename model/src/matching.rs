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

use crate::error_msgs::print_warning_no_module;
use crate::Float;
use crate::{Boundary, Model, Space, SurfaceTrait};
use geometry::{BBox3D, Loop3D, Point3D, Polygon3D};
use std::collections::HashMap;
use std::sync::Arc;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Distance, in metres, under which two vertices are the same
const TOLERANCE: Float = 0.01;

/// Surfaces whose normals have a dot product above this are
/// not considered to be facing each other
const MAX_DOT: Float = -0.98;

/// The geometry of a space, in building coordinates
struct SpaceGeometry {
    bbox: Option<BBox3D>,
    surfaces: Vec<(usize, Polygon3D)>,
}

impl Model {
    /// Builds the geometry of each space in building coordinates.
    fn space_geometries(&self) -> Vec<SpaceGeometry> {
        let mut by_space: Vec<Vec<usize>> = vec![Vec::new(); self.spaces.len()];
        let space_index: HashMap<&str, usize> = self
            .spaces
            .iter()
            .enumerate()
            .map(|(i, s)| (s.name.as_str(), i))
            .collect();
        for (i, s) in self.surfaces.iter().enumerate() {
            match space_index.get(s.space.as_str()) {
                Some(&sp) => by_space[sp].push(i),
                None => print_warning_no_module(format!(
                    "Surface '{}' belongs to space '{}', which does not exist... it will not be matched",
                    s.name, s.space
                )),
            }
        }

        let build = |(space, indices): (&Arc<Space>, &Vec<usize>)| {
            let surfaces: Vec<(usize, Polygon3D)> = indices
                .iter()
                .map(|&i| (i, self.surfaces[i].vertices_in_building(space.origin)))
                .collect();
            let bbox = surfaces
                .iter()
                .filter_map(|(_, p)| p.bbox().ok())
                .reduce(|a, b| BBox3D::from_union(&a, &b));
            SpaceGeometry { bbox, surfaces }
        };

        #[cfg(not(feature = "parallel"))]
        return self.spaces.iter().zip(by_space.iter()).map(build).collect();

        #[cfg(feature = "parallel")]
        return self
            .spaces
            .par_iter()
            .zip(by_space.par_iter())
            .map(build)
            .collect();
    }

    /// Finds the pairs of surfaces that are shared by two different spaces and
    /// sets their [`Boundary`] so that they point to each other. The windows and
    /// doors within matched surfaces are matched as well.
    ///
    /// Two surfaces match when they face each other and their vertices coincide
    /// in building coordinates. Surfaces that already lead to another surface are
    /// left as they are.
    ///
    /// Returns the number of pairs of surfaces matched.
    pub fn match_surfaces(&mut self) -> Result<usize, String> {
        let geometries = self.space_geometries();
        let mut matched: Vec<bool> = self
            .surfaces
            .iter()
            .map(|s| matches!(s.boundary, Boundary::Surface { .. }))
            .collect();

        let mut pairs: Vec<(usize, usize)> = Vec::new();
        for i in 0..geometries.len() {
            let gi = &geometries[i];
            let bbox_i = match &gi.bbox {
                Some(b) => b,
                None => continue,
            };
            for gj in geometries.iter().skip(i + 1) {
                match &gj.bbox {
                    Some(b) if b.intersects(bbox_i, TOLERANCE) => {}
                    _ => continue,
                }

                for (a, poly_a) in gi.surfaces.iter() {
                    if matched[*a] {
                        continue;
                    }
                    for (b, poly_b) in gj.surfaces.iter() {
                        if matched[*b] {
                            continue;
                        }
                        if poly_a.normal() * poly_b.normal() > MAX_DOT {
                            continue;
                        }
                        let reversed = poly_b.outer().get_reversed();
                        if poly_a.outer().is_equal(&reversed, TOLERANCE)? {
                            matched[*a] = true;
                            matched[*b] = true;
                            pairs.push((*a, *b));
                            break;
                        }
                    }
                }
            }
        }

        for (a, b) in pairs.iter() {
            let name_a = self.surfaces[*a].name.clone();
            let name_b = self.surfaces[*b].name.clone();
            Arc::make_mut(&mut self.surfaces[*a]).boundary = Boundary::Surface {
                surface: name_b.clone(),
            };
            Arc::make_mut(&mut self.surfaces[*b]).boundary = Boundary::Surface {
                surface: name_a.clone(),
            };
            self.match_sub_surfaces(*a, *b)?;
        }

        Ok(pairs.len())
    }

    /// Matches the sub-surfaces of two surfaces that have been matched.
    fn match_sub_surfaces(&mut self, a: usize, b: usize) -> Result<(), String> {
        let origin_a = self.space_of_surface(&self.surfaces[a])?.origin;
        let origin_b = self.space_of_surface(&self.surfaces[b])?.origin;
        let name_a = &self.surfaces[a].name;
        let name_b = &self.surfaces[b].name;

        let collect = |parent: &String, origin: Point3D| -> Result<Vec<(usize, Loop3D)>, String> {
            let mut ret = Vec::new();
            for (i, sub) in self.sub_surfaces.iter().enumerate() {
                if &sub.surface == parent && sub.adjacent_sub_surface.is_none() {
                    let l = sub.vertices_in_building(origin).outer().sanitize()?;
                    ret.push((i, l));
                }
            }
            Ok(ret)
        };
        let subs_a = collect(name_a, origin_a)?;
        let subs_b = collect(name_b, origin_b)?;

        let mut used = vec![false; subs_b.len()];
        let mut pairs = Vec::new();
        for (i, loop_a) in subs_a.iter() {
            for (k, (j, loop_b)) in subs_b.iter().enumerate() {
                if used[k] || loop_a.normal() * loop_b.normal() > MAX_DOT {
                    continue;
                }
                if loop_a.is_equal(&loop_b.get_reversed(), TOLERANCE)? {
                    used[k] = true;
                    pairs.push((*i, *j));
                    break;
                }
            }
        }

        for (i, j) in pairs {
            let name_i = self.sub_surfaces[i].name.clone();
            let name_j = self.sub_surfaces[j].name.clone();
            Arc::make_mut(&mut self.sub_surfaces[i]).adjacent_sub_surface = Some(name_j);
            Arc::make_mut(&mut self.sub_surfaces[j]).adjacent_sub_surface = Some(name_i);
        }
        Ok(())
    }

    /// Sets the boundary of every surface leading to another surface
    /// back to [`Boundary::Outdoors`], and forgets the adjacency of
    /// every sub-surface.
    pub fn unmatch_surfaces(&mut self) {
        for s in self.surfaces.iter_mut() {
            if matches!(s.boundary, Boundary::Surface { .. }) {
                Arc::make_mut(s).boundary = Boundary::Outdoors;
            }
        }
        for s in self.sub_surfaces.iter_mut() {
            if s.adjacent_sub_surface.is_some() {
                Arc::make_mut(s).adjacent_sub_surface = None;
            }
        }
    }
}

/***********/
/* TESTING */
/***********/

#[cfg(test)]
mod testing {
    use crate::*;
    use geometry::{Point3D, Polygon3D};

    fn floor_print(l: crate::Float) -> Vec<Point3D> {
        vec![
            Point3D::new(0., 0., 0.),
            Point3D::new(0., l, 0.),
            Point3D::new(l, l, 0.),
            Point3D::new(l, 0., 0.),
        ]
    }

    fn count_interior(model: &Model) -> usize {
        model
            .surfaces
            .iter()
            .filter(|s| s.adjacent_surface().is_some())
            .count()
    }

    #[test]
    fn test_side_by_side() -> Result<(), String> {
        let mut model = Model::default();
        model.add_space_from_floor_print(Space::new("A"), &floor_print(10.), 3.)?;
        let b = Space::new("B").with_origin(Point3D::new(10., 0., 0.));
        model.add_space_from_floor_print(b, &floor_print(10.), 3.)?;

        assert_eq!(model.match_surfaces()?, 1);
        assert_eq!(count_interior(&model), 2);

        // A's east wall and B's west wall
        let a_east = model
            .surfaces_in_space("A")
            .into_iter()
            .find(|s| s.adjacent_surface().is_some())
            .ok_or("A should have a matched surface")?;
        let partner = model.get_surface(a_east.adjacent_surface().ok_or("no partner")?)?;
        assert_eq!(partner.space, "B");
        assert_eq!(partner.adjacent_surface(), Some(&a_east.name));
        assert!((model.surface_azimuth(a_east.as_ref()) - 90.).abs() < 1e-6);

        // Running again matches nothing new
        assert_eq!(model.match_surfaces()?, 0);
        assert_eq!(count_interior(&model), 2);

        model.unmatch_surfaces();
        assert_eq!(count_interior(&model), 0);
        assert_eq!(model.match_surfaces()?, 1);
        Ok(())
    }

    #[test]
    fn test_stacked_and_apart() -> Result<(), String> {
        let mut model = Model::default();
        model.add_space_from_floor_print(Space::new("Ground"), &floor_print(10.), 3.)?;
        let up = Space::new("First").with_origin(Point3D::new(0., 0., 3.));
        model.add_space_from_floor_print(up, &floor_print(10.), 3.)?;
        let far = Space::new("Far").with_origin(Point3D::new(100., 0., 0.));
        model.add_space_from_floor_print(far, &floor_print(10.), 3.)?;

        assert_eq!(model.match_surfaces()?, 1);
        let roof = model.get_surface("Ground Roof")?;
        assert_eq!(roof.adjacent_surface(), Some(&"First Floor".to_string()));
        assert!(model
            .surfaces_in_space("Far")
            .iter()
            .all(|s| s.boundary == Boundary::Outdoors));
        Ok(())
    }

    #[test]
    fn test_partial_overlap_does_not_match() -> Result<(), String> {
        let mut model = Model::default();
        model.add_space_from_floor_print(Space::new("A"), &floor_print(10.), 3.)?;
        // Touches A, but is shifted so walls only partially overlap
        let b = Space::new("B").with_origin(Point3D::new(10., 5., 0.));
        model.add_space_from_floor_print(b, &floor_print(10.), 3.)?;
        assert_eq!(model.match_surfaces()?, 0);
        Ok(())
    }

    #[test]
    fn test_sub_surfaces() -> Result<(), String> {
        let mut model = Model::default();
        model.add_space_from_floor_print(Space::new("A"), &floor_print(10.), 3.)?;
        let b = Space::new("B").with_origin(Point3D::new(10., 0., 0.));
        model.add_space_from_floor_print(b, &floor_print(10.), 3.)?;

        // Find the shared walls through their orientation
        let a_east = model.find_surfaces("A", Some(90.), Some(90.), Some(90.), Some(90.), 1.)?;
        let b_west = model.find_surfaces("B", Some(270.), Some(270.), Some(90.), Some(90.), 1.)?;
        assert_eq!(a_east.len(), 1);
        assert_eq!(b_west.len(), 1);

        // A door, seen from both sides. The one in B has a redundant
        // vertex in the middle of an edge
        let door_a = Polygon3D::from_points(&[
            Point3D::new(10., 2., 2.),
            Point3D::new(10., 2., 0.),
            Point3D::new(10., 4., 0.),
            Point3D::new(10., 4., 2.),
        ])?;
        model.add_sub_surface(SubSurface::new(
            "Door A",
            &a_east[0].name,
            SubSurfaceType::Door,
            door_a,
        ));
        let mut door_b = geometry::Loop3D::new();
        for p in [
            Point3D::new(0., 4., 2.),
            Point3D::new(0., 4., 0.),
            Point3D::new(0., 3., 0.),
            Point3D::new(0., 2., 0.),
            Point3D::new(0., 2., 2.),
        ] {
            door_b.push_collinear(p, false)?;
        }
        door_b.close()?;
        model.add_sub_surface(SubSurface::new(
            "Door B",
            &b_west[0].name,
            SubSurfaceType::Door,
            Polygon3D::new(door_b)?,
        ));

        assert_eq!(model.match_surfaces()?, 1);
        let a = model.get_sub_surface("Door A")?;
        let b = model.get_sub_surface("Door B")?;
        assert_eq!(a.adjacent_sub_surface, Some("Door B".to_string()));
        assert_eq!(b.adjacent_sub_surface, Some("Door A".to_string()));

        model.unmatch_surfaces();
        assert!(model.get_sub_surface("Door A")?.adjacent_sub_surface.is_none());
        Ok(())
    }
}
