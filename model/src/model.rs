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
use crate::{
    AirLoop, Boundary, Building, BuildingStory, RunPeriod, Space, SubSurface, Surface,
    SurfaceTrait, SurfaceType, ThermalZone,
};
use geometry::{BBox3D, Point3D, Polygon3D, Vector3D};
use serde::{self, de::Visitor};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// A structure describing a building: its stories, thermal zones,
/// spaces, surfaces and air loops.
///
/// Objects reference each other by name (e.g., a [`Surface`] knows the
/// name of its [`Space`]).
#[derive(Debug, Clone, Default, Serialize)]
pub struct Model {
    /// The name of the model.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// The [`Building`]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub building: Option<Building>,

    /// The [`BuildingStory`]s in the model
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub building_stories: Vec<Arc<BuildingStory>>,

    /// The [`ThermalZone`]s in the model
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub thermal_zones: Vec<Arc<ThermalZone>>,

    /// The [`Space`]s in the model
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub spaces: Vec<Arc<Space>>,

    /// The [`Surface`]s in the model
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub surfaces: Vec<Arc<Surface>>,

    /// The windows and doors in the model
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sub_surfaces: Vec<Arc<SubSurface>>,

    /// The [`AirLoop`]s in the model
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub air_loops: Vec<Arc<AirLoop>>,

    /// The period to simulate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_period: Option<RunPeriod>,
}

struct ModelVisitor {}

impl<'de> Visitor<'de> for ModelVisitor {
    type Value = Model;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("a Model object")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::MapAccess<'de>,
    {
        let mut model = Model::default();

        while let Some(key) = map.next_key::<String>()? {
            match key.as_str() {
                "name" => {
                    model.name = map.next_value()?;
                }
                "building" => {
                    model.building = map.next_value()?;
                }
                "building_stories" => {
                    let objs: Vec<BuildingStory> = map.next_value()?;
                    for o in objs.into_iter() {
                        model.add_building_story(o);
                    }
                }
                "thermal_zones" => {
                    let objs: Vec<ThermalZone> = map.next_value()?;
                    for o in objs.into_iter() {
                        model.add_thermal_zone(o);
                    }
                }
                "spaces" => {
                    let objs: Vec<Space> = map.next_value()?;
                    for o in objs.into_iter() {
                        model.add_space(o);
                    }
                }
                "surfaces" => {
                    let objs: Vec<Surface> = map.next_value()?;
                    for o in objs.into_iter() {
                        model.add_surface(o);
                    }
                }
                "sub_surfaces" => {
                    let objs: Vec<SubSurface> = map.next_value()?;
                    for o in objs.into_iter() {
                        model.add_sub_surface(o);
                    }
                }
                "air_loops" => {
                    let objs: Vec<AirLoop> = map.next_value()?;
                    for o in objs.into_iter() {
                        model.add_air_loop(o);
                    }
                }
                "run_period" => {
                    let p: Option<RunPeriod> = map.next_value()?;
                    if let Some(p) = &p {
                        p.validate().map_err(serde::de::Error::custom)?;
                    }
                    model.run_period = p;
                }
                _ => {
                    return Err(serde::de::Error::custom(format!(
                        "Unknown field '{}' in Model",
                        key
                    )));
                }
            }
        }

        Ok(model)
    }
}

impl<'de> Deserialize<'de> for Model {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_map(ModelVisitor {})
    }
}

impl Model {
    /// Parses a model from JSON
    ///
    /// ```rust
    /// use model::Model;
    ///
    /// let json_str = r#"{
    ///     "building": { "name": "The Building" },
    ///     "spaces": [{ "name": "Kitchen" }]
    /// }"#;
    ///
    /// let model = Model::from_json(&json_str).unwrap();
    /// assert_eq!(model.spaces.len(), 1);
    /// assert!(Model::from_json(r#"{"buildings": []}"#).is_err());
    /// ```
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| e.to_string())
    }

    /// Parses a model from JSON5, which allows for comments,
    /// trailing commas and unquoted keys
    ///
    /// ```rust
    /// use model::Model;
    ///
    /// let model = Model::from_json5("{
    ///     // this is a comment
    ///     spaces: [{ name: 'Kitchen' }],
    /// }").unwrap();
    /// assert_eq!(model.spaces.len(), 1);
    /// ```
    pub fn from_json5(json: &str) -> Result<Self, String> {
        json5::from_str(json).map_err(|e| e.to_string())
    }

    /// Reads a model from a file. Files with a `.json` extension are
    /// parsed as JSON, and anything else as JSON5.
    pub fn from_file<P: AsRef<Path>>(filename: P) -> Result<Self, String> {
        let path = filename.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| format!("Could not read model file '{}': {}", path.display(), e))?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json(&content),
            _ => Self::from_json5(&content),
        }
    }

    /// Serializes the model into a JSON string
    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string_pretty(self).map_err(|e| e.to_string())
    }

    /// Sets the [`Building`]
    pub fn set_building(&mut self, building: Building) {
        self.building = Some(building)
    }

    /// The angle between the building's Y axis and the North, in degrees.
    /// Zero if there is no [`Building`].
    pub fn north_axis(&self) -> Float {
        self.building.as_ref().map(|b| b.north_axis).unwrap_or(0.0)
    }

    /// Adds a [`BuildingStory`] to the [`Model`]
    pub fn add_building_story(&mut self, add: BuildingStory) -> Arc<BuildingStory> {
        if self.get_building_story(&add.name).is_ok() {
            print_warning_no_module(format!(
                "There is already a BuildingStory called '{}'",
                add.name
            ))
        }
        let add = Arc::new(add);
        self.building_stories.push(Arc::clone(&add));
        add
    }

    /// Retrieves a reference (`Arc`) to a [`BuildingStory`] based on its name
    pub fn get_building_story<S: AsRef<str>>(&self, name: S) -> Result<Arc<BuildingStory>, String> {
        let name = name.as_ref();
        self.building_stories
            .iter()
            .find(|i| i.name == name)
            .cloned()
            .ok_or_else(|| format!("Could not find BuildingStory '{}' in model", name))
    }

    /// Adds a [`ThermalZone`] to the [`Model`]
    ///
    /// ```rust
    /// use model::{Model, ThermalZone};
    ///
    /// let mut model = Model::default();
    /// model.add_thermal_zone(ThermalZone::new("Office"));
    /// assert_eq!(model.thermal_zones.len(), 1);
    ///
    /// // Adding something with the same name will warn the user... but still adds it
    /// model.add_thermal_zone(ThermalZone::new("Office"));
    /// assert_eq!(model.thermal_zones.len(), 2);
    /// ```
    pub fn add_thermal_zone(&mut self, add: ThermalZone) -> Arc<ThermalZone> {
        if self.get_thermal_zone(&add.name).is_ok() {
            print_warning_no_module(format!(
                "There is already a ThermalZone called '{}'",
                add.name
            ))
        }
        let add = Arc::new(add);
        self.thermal_zones.push(Arc::clone(&add));
        add
    }

    /// Retrieves a reference (`Arc`) to a [`ThermalZone`] based on its name
    pub fn get_thermal_zone<S: AsRef<str>>(&self, name: S) -> Result<Arc<ThermalZone>, String> {
        let name = name.as_ref();
        self.thermal_zones
            .iter()
            .find(|i| i.name == name)
            .cloned()
            .ok_or_else(|| format!("Could not find ThermalZone '{}' in model", name))
    }

    /// Adds a [`Space`] to the [`Model`]
    ///
    /// ```rust
    /// use model::{Space, Model};
    ///
    /// let mut model = Model::default();
    /// model.add_space(Space::new("Bedroom"));
    /// assert!(model.get_space("Bedroom").is_ok());
    /// assert!(model.get_space("Walrus Enclosure").is_err());
    /// ```
    pub fn add_space(&mut self, add: Space) -> Arc<Space> {
        if self.get_space(&add.name).is_ok() {
            print_warning_no_module(format!("There is already a Space called '{}'", add.name))
        }
        let add = Arc::new(add);
        self.spaces.push(Arc::clone(&add));
        add
    }

    /// Retrieves a reference (`Arc`) to a [`Space`] based on its name
    pub fn get_space<S: AsRef<str>>(&self, name: S) -> Result<Arc<Space>, String> {
        let name = name.as_ref();
        self.spaces
            .iter()
            .find(|i| i.name == name)
            .cloned()
            .ok_or_else(|| format!("Could not find Space '{}' in model", name))
    }

    /// Adds a [`Surface`] to the [`Model`]
    pub fn add_surface(&mut self, add: Surface) -> Arc<Surface> {
        if self.get_surface(&add.name).is_ok() {
            print_warning_no_module(format!("There is already a Surface called '{}'", add.name))
        }
        let add = Arc::new(add);
        self.surfaces.push(Arc::clone(&add));
        add
    }

    /// Retrieves a reference (`Arc`) to a [`Surface`] based on its name
    pub fn get_surface<S: AsRef<str>>(&self, name: S) -> Result<Arc<Surface>, String> {
        let name = name.as_ref();
        self.surfaces
            .iter()
            .find(|i| i.name == name)
            .cloned()
            .ok_or_else(|| format!("Could not find Surface '{}' in model", name))
    }

    /// Adds a [`SubSurface`] to the [`Model`]
    pub fn add_sub_surface(&mut self, add: SubSurface) -> Arc<SubSurface> {
        if self.get_sub_surface(&add.name).is_ok() {
            print_warning_no_module(format!(
                "There is already a SubSurface called '{}'",
                add.name
            ))
        }
        if self.get_surface(&add.surface).is_err() {
            print_warning_no_module(format!(
                "SubSurface '{}' has been given parent surface '{}', which does not exist (yet?)",
                add.name, add.surface
            ))
        }
        let add = Arc::new(add);
        self.sub_surfaces.push(Arc::clone(&add));
        add
    }

    /// Retrieves a reference (`Arc`) to a [`SubSurface`] based on its name
    pub fn get_sub_surface<S: AsRef<str>>(&self, name: S) -> Result<Arc<SubSurface>, String> {
        let name = name.as_ref();
        self.sub_surfaces
            .iter()
            .find(|i| i.name == name)
            .cloned()
            .ok_or_else(|| format!("Could not find SubSurface '{}' in model", name))
    }

    /// Adds an [`AirLoop`] to the [`Model`]
    pub fn add_air_loop(&mut self, add: AirLoop) -> Arc<AirLoop> {
        if self.get_air_loop(&add.name).is_ok() {
            print_warning_no_module(format!("There is already an AirLoop called '{}'", add.name))
        }
        let add = Arc::new(add);
        self.air_loops.push(Arc::clone(&add));
        add
    }

    /// Retrieves a reference (`Arc`) to an [`AirLoop`] based on its name
    pub fn get_air_loop<S: AsRef<str>>(&self, name: S) -> Result<Arc<AirLoop>, String> {
        let name = name.as_ref();
        self.air_loops
            .iter()
            .find(|i| i.name == name)
            .cloned()
            .ok_or_else(|| format!("Could not find AirLoop '{}' in model", name))
    }

    /// The spaces whose thermal zone is `zone`
    pub fn spaces_in_zone<S: AsRef<str>>(&self, zone: S) -> Vec<Arc<Space>> {
        let zone = zone.as_ref();
        self.spaces
            .iter()
            .filter(|s| s.thermal_zone.as_deref() == Some(zone))
            .cloned()
            .collect()
    }

    /// The surfaces enclosing `space`
    pub fn surfaces_in_space<S: AsRef<str>>(&self, space: S) -> Vec<Arc<Surface>> {
        let space = space.as_ref();
        self.surfaces
            .iter()
            .filter(|s| s.space == space)
            .cloned()
            .collect()
    }

    /// The sub-surfaces contained in `surface`
    pub fn sub_surfaces_in_surface<S: AsRef<str>>(&self, surface: S) -> Vec<Arc<SubSurface>> {
        let surface = surface.as_ref();
        self.sub_surfaces
            .iter()
            .filter(|s| s.surface == surface)
            .cloned()
            .collect()
    }

    /// The space that owns a surface
    pub fn space_of_surface(&self, surface: &Surface) -> Result<Arc<Space>, String> {
        self.get_space(&surface.space).map_err(|e| {
            format!(
                "Surface '{}' belongs to a space that could not be found: {}",
                surface.name, e
            )
        })
    }

    /// The vertices of a [`Surface`] in building coordinates
    pub fn surface_vertices_in_building(&self, surface: &Surface) -> Result<Polygon3D, String> {
        let space = self.space_of_surface(surface)?;
        Ok(surface.vertices_in_building(space.origin))
    }

    /// The azimuth of the outward normal of a surface, in degrees
    /// clockwise from the true North
    pub fn surface_azimuth<T: SurfaceTrait>(&self, surface: &T) -> Float {
        surface.azimuth(self.north_axis())
    }

    /// The sum of the areas of the floors of a space
    pub fn space_floor_area<S: AsRef<str>>(&self, space: S) -> Float {
        self.surfaces_in_space(space)
            .iter()
            .filter(|s| s.surface_type == SurfaceType::Floor)
            .map(|s| s.gross_area())
            .sum()
    }

    /// The volume of a space. If it has not been set explicitly, it is calculated
    /// from its surfaces (which should enclose a volume and point outwards).
    ///
    /// ```rust
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
    /// model.add_space_from_floor_print(Space::new("Hall"), &floor_print, 3.).unwrap();
    /// let v = model.space_volume("Hall").unwrap();
    /// assert!((v - 300.).abs() < 1e-6);
    /// ```
    pub fn space_volume<S: AsRef<str>>(&self, space: S) -> Result<Float, String> {
        let space = self.get_space(space)?;
        if let Some(v) = space.volume {
            return Ok(v);
        }
        // Divergence theorem over the (planar) enclosing surfaces
        let mut vol = 0.0;
        for s in self.surfaces_in_space(&space.name) {
            let c = s.vertices.outer_centroid().as_vector3d();
            vol += (c * s.outward_normal()) * s.gross_area();
        }
        Ok(vol / 3.)
    }

    /// The bounding box of a space, in building coordinates
    pub fn space_bbox<S: AsRef<str>>(&self, space: S) -> Result<BBox3D, String> {
        let space = self.get_space(space)?;
        let mut ret: Option<BBox3D> = None;
        for s in self.surfaces_in_space(&space.name) {
            let b = s.vertices_in_building(space.origin).bbox()?;
            ret = Some(match ret {
                Some(r) => BBox3D::from_union(&r, &b),
                None => b,
            });
        }
        ret.ok_or_else(|| format!("Space '{}' has no surfaces", space.name))
    }

    /// The explicit volume of a thermal zone, if any
    pub fn thermal_zone_volume<S: AsRef<str>>(&self, zone: S) -> Result<Option<Float>, String> {
        Ok(self.get_thermal_zone(zone)?.volume)
    }

    /// Creates a box-like [`Space`] by extruding a floor print `height` metres
    /// up, adding the space, a floor, a roof and one wall per edge. The floor
    /// print is in space coordinates.
    ///
    /// Surfaces are called `<space> Floor`, `<space> Roof` and `<space> Wall <n>`
    pub fn add_space_from_floor_print(
        &mut self,
        space: Space,
        floor_print: &[Point3D],
        height: Float,
    ) -> Result<Arc<Space>, String> {
        if height <= 0.0 {
            return Err(format!(
                "Cannot extrude space '{}' with a non-positive height of {}",
                space.name, height
            ));
        }
        let mut floor = Polygon3D::from_points(floor_print)?;
        let up = Vector3D::new(0., 0., 1.);
        if !floor.normal().is_parallel(up) {
            return Err(format!(
                "The floor print of space '{}' is not horizontal",
                space.name
            ));
        }
        // Floors point down
        if floor.normal().is_same_direction(up) {
            floor.reverse();
        }
        let roof = floor.get_reversed().get_translated(up * height);

        let name = space.name.clone();
        let ring = floor.outer().vertices().to_vec();
        let n = ring.len();
        let mut walls = Vec::with_capacity(n);
        for i in 0..n {
            let a = ring[i];
            let b = ring[(i + 1) % n];
            walls.push(Polygon3D::from_points(&[
                b + up * height,
                b,
                a,
                a + up * height,
            ])?);
        }

        let space = self.add_space(space);
        self.add_surface(Surface::new(
            format!("{} Floor", name),
            &name,
            SurfaceType::Floor,
            floor,
        ));
        for (i, w) in walls.into_iter().enumerate() {
            self.add_surface(Surface::new(
                format!("{} Wall {}", name, i + 1),
                &name,
                SurfaceType::Wall,
                w,
            ));
        }
        self.add_surface(Surface::new(
            format!("{} Roof", name),
            &name,
            SurfaceType::RoofCeiling,
            roof,
        ));
        Ok(space)
    }

    /// Sets the [`Boundary`] of a surface. Returns an error if the surface
    /// does not exist
    pub fn set_surface_boundary<S: AsRef<str>>(
        &mut self,
        surface: S,
        boundary: Boundary,
    ) -> Result<(), String> {
        let surface = surface.as_ref();
        let s = self
            .surfaces
            .iter_mut()
            .find(|s| s.name == surface)
            .ok_or_else(|| format!("Could not find Surface '{}' in model", surface))?;
        Arc::make_mut(s).boundary = boundary;
        Ok(())
    }
}

/***********/
/* TESTING */
/***********/
