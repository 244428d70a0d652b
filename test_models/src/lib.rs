/*
MIT License
Copyright (c) 2021 Germán Molina
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

//! Functions for creating small building models, used for testing
//! surface matching and airflow network generation.

/// The kind of Floating point number used in the
/// library... the `"float"` feature means it becomes `f32`
/// and `f64` is used otherwise.
#[cfg(feature = "float")]
type Float = f32;

#[cfg(not(feature = "float"))]
type Float = f64;

use geometry::{Point3D, Polygon3D};

use model::{
    AirLoop, Boundary, Building, BuildingStory, Model, RunPeriod, Space, SubSurface,
    SubSurfaceType, SurfaceType, ThermalZone,
};

/// Characteristics of a building made of a grid of square spaces,
/// stacked in one or more stories
pub struct GridBuildingOptions {
    /// Number of spaces along the X axis
    pub nx: usize,

    /// Number of spaces along the Y axis
    pub ny: usize,

    /// Number of stories
    pub n_stories: usize,

    /// The side of each space, in m
    pub space_width: Float,

    /// The height of the stories, in m
    pub story_height: Float,

    /// Put each space in its own thermal zone. Otherwise, all
    /// spaces share a single zone.
    pub zone_per_space: bool,

    /// Serve all zones with a single air loop
    pub air_loop: bool,

    /// Match the surfaces of neighbouring spaces
    pub match_surfaces: bool,
}

impl std::default::Default for GridBuildingOptions {
    fn default() -> Self {
        Self {
            nx: 2,
            ny: 2,
            n_stories: 1,
            space_width: 10.,
            story_height: 3.,
            zone_per_space: false,
            air_loop: true,
            match_surfaces: true,
        }
    }
}

/// The name of the `n`th space (counting from 1)
pub fn space_name(n: usize) -> String {
    format!("Space {}", n)
}

/// The name of the `n`th thermal zone (counting from 1)
pub fn zone_name(n: usize) -> String {
    format!("Thermal Zone {}", n)
}

/// The name of the node through which air is supplied to a zone
pub fn supply_node_name(zone: &str) -> String {
    format!("{} Supply Inlet", zone)
}

/// The name of the node through which air is returned from a zone
pub fn return_node_name(zone: &str) -> String {
    format!("{} Return Outlet", zone)
}

/// Builds a grid of square spaces. Spaces are numbered by story,
/// then along Y, then along X. Floors touching the ground have a
/// [`Boundary::Ground`].
pub fn get_grid_building(options: &GridBuildingOptions) -> Result<Model, String> {
    let mut model = Model::default();
    model.name = Some("Grid Building".into());
    model.set_building(Building::new("Demo Building"));
    model.run_period = Some(RunPeriod::default());

    let w = options.space_width;
    let h = options.story_height;
    let floor_print = [
        Point3D::new(0., 0., 0.),
        Point3D::new(0., w, 0.),
        Point3D::new(w, w, 0.),
        Point3D::new(w, 0., 0.),
    ];

    let mut air_loop = AirLoop::new("Air Loop 1");
    let mut n = 0;
    for s in 0..options.n_stories {
        let story_name = format!("Story {}", s + 1);
        let mut story = BuildingStory::new(&story_name);
        story.nominal_z_coordinate = Some(s as Float * h);
        story.nominal_floor_to_floor_height = Some(h);
        model.add_building_story(story);

        for iy in 0..options.ny {
            for ix in 0..options.nx {
                n += 1;
                let zone = if options.zone_per_space || n == 1 {
                    let name = zone_name(n);
                    let mut zone = ThermalZone::new(&name);
                    zone.supply_air_node = Some(supply_node_name(&name));
                    zone.return_air_node = Some(return_node_name(&name));
                    model.add_thermal_zone(zone);
                    air_loop.add_thermal_zone(&name);
                    name
                } else {
                    zone_name(1)
                };

                let mut space = Space::new(space_name(n)).with_origin(Point3D::new(
                    ix as Float * w,
                    iy as Float * w,
                    s as Float * h,
                ));
                space.building_story = Some(story_name.clone());
                space.thermal_zone = Some(zone);
                let space = model.add_space_from_floor_print(space, &floor_print, h)?;
                if s == 0 {
                    model.set_surface_boundary(format!("{} Floor", space.name), Boundary::Ground)?;
                }
            }
        }
    }

    if options.air_loop {
        model.add_air_loop(air_loop);
    }
    if options.match_surfaces {
        model.match_surfaces()?;
    }
    Ok(model)
}

/// Adds a sub-surface to the first surface of `space` facing `azimuth`
fn add_to_wall(
    model: &mut Model,
    space: &str,
    azimuth: Float,
    name: &str,
    sub_surface_type: SubSurfaceType,
    vertices: &[Point3D],
) -> Result<(), String> {
    let walls = model.find_surfaces(
        space,
        Some(azimuth),
        Some(azimuth),
        Some(90.),
        Some(90.),
        1.,
    )?;
    let wall = walls
        .iter()
        .find(|w| w.surface_type == SurfaceType::Wall)
        .ok_or_else(|| format!("Space '{}' has no wall facing {} degrees", space, azimuth))?;
    let vertices = Polygon3D::from_points(vertices)?;
    model.add_sub_surface(SubSurface::new(name, &wall.name, sub_surface_type, vertices));
    Ok(())
}

/// Four 10x10x3 m spaces in a single thermal zone and a single story,
/// arranged in a square and served by one air loop:
///
/// ```text
///   y (=North)
///   ▲
/// 20├────────┬────────┐
///   │ Space 3│ Space 4│
/// 10├────────┼────────┤
///   │ Space 1│ Space 2├◄─── window
///   └──┬─┬───┴────────┴──────► x
///   0   ▲    10       20
///       └─ door
/// ```
///
/// Surfaces are matched.
pub fn four_space_demo() -> Result<Model, String> {
    four_space_model(false)
}

/// Same as [`four_space_demo`], but each space is a thermal zone and
/// Spaces 1 and 2 are connected through an interior door
pub fn four_zone_demo() -> Result<Model, String> {
    four_space_model(true)
}

fn four_space_model(zone_per_space: bool) -> Result<Model, String> {
    let options = GridBuildingOptions {
        zone_per_space,
        match_surfaces: false,
        ..GridBuildingOptions::default()
    };
    let mut model = get_grid_building(&options)?;
    model.name = Some("Four Space Demo".into());

    add_to_wall(
        &mut model,
        "Space 1",
        180.,
        "Door 1",
        SubSurfaceType::Door,
        &[
            Point3D::new(2., 0., 2.),
            Point3D::new(2., 0., 0.),
            Point3D::new(4., 0., 0.),
            Point3D::new(4., 0., 2.),
        ],
    )?;
    add_to_wall(
        &mut model,
        "Space 2",
        90.,
        "Window 1",
        SubSurfaceType::FixedWindow,
        &[
            Point3D::new(10., 2., 2.),
            Point3D::new(10., 2., 1.),
            Point3D::new(10., 8., 1.),
            Point3D::new(10., 8., 2.),
        ],
    )?;

    if zone_per_space {
        add_to_wall(
            &mut model,
            "Space 1",
            90.,
            "Interior Door 1",
            SubSurfaceType::Door,
            &[
                Point3D::new(10., 4., 2.),
                Point3D::new(10., 4., 0.),
                Point3D::new(10., 6., 0.),
                Point3D::new(10., 6., 2.),
            ],
        )?;
        add_to_wall(
            &mut model,
            "Space 2",
            270.,
            "Interior Door 2",
            SubSurfaceType::Door,
            &[
                Point3D::new(0., 6., 2.),
                Point3D::new(0., 6., 0.),
                Point3D::new(0., 4., 0.),
                Point3D::new(0., 4., 2.),
            ],
        )?;
    }

    model.match_surfaces()?;
    Ok(model)
}

/// Two stories with two 10x10x3 m spaces each. Every space is a
/// thermal zone, and all zones are served by one air loop.
pub fn two_story_demo() -> Result<Model, String> {
    let options = GridBuildingOptions {
        nx: 2,
        ny: 1,
        n_stories: 2,
        zone_per_space: true,
        ..GridBuildingOptions::default()
    };
    let mut model = get_grid_building(&options)?;
    model.name = Some("Two Story Demo".into());
    Ok(model)
}

/***********/
/* TESTING */
/***********/

#[cfg(test)]
mod testing {
    use super::*;

    #[test]
    fn test_four_space_demo() -> Result<(), String> {
        let model = four_space_demo()?;
        assert_eq!(model.spaces.len(), 4);
        assert_eq!(model.thermal_zones.len(), 1);
        assert_eq!(model.surfaces.len(), 24);
        assert_eq!(model.sub_surfaces.len(), 2);
        assert_eq!(model.air_loops.len(), 1);

        // 4 shared walls
        let interior = model
            .surfaces
            .iter()
            .filter(|s| s.adjacent_surface().is_some())
            .count();
        assert_eq!(interior, 8);
        let ground = model
            .surfaces
            .iter()
            .filter(|s| s.boundary == Boundary::Ground)
            .count();
        assert_eq!(ground, 4);
        Ok(())
    }

    #[test]
    fn test_four_zone_demo() -> Result<(), String> {
        let model = four_zone_demo()?;
        assert_eq!(model.thermal_zones.len(), 4);
        assert_eq!(model.sub_surfaces.len(), 4);
        let door = model.get_sub_surface("Interior Door 1")?;
        assert_eq!(door.adjacent_sub_surface, Some("Interior Door 2".to_string()));
        let door = model.get_sub_surface("Door 1")?;
        assert!(door.adjacent_sub_surface.is_none());
        Ok(())
    }

    #[test]
    fn test_two_story_demo() -> Result<(), String> {
        let model = two_story_demo()?;
        assert_eq!(model.building_stories.len(), 2);
        assert_eq!(model.spaces.len(), 4);
        // 1 shared wall per story, and 2 floor/ceiling pairs
        let interior = model
            .surfaces
            .iter()
            .filter(|s| s.adjacent_surface().is_some())
            .count();
        assert_eq!(interior, 8);
        let upper = model.get_space(space_name(3))?;
        assert_eq!(upper.building_story, Some("Story 2".to_string()));
        assert_eq!(model.air_loops[0].thermal_zones.len(), 4);
        Ok(())
    }
}
