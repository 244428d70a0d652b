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
use geometry::Point3D;
use serde::{Deserialize, Serialize};

/// Represents a space within a building. This will
/// often be a room, but it might also be half a room.
///
/// The vertices of the surfaces of a [`Space`] are expressed
/// relative to its `origin`.
///
/// ## Examples
///
/// ```
/// use model::Space;
///
/// let s: Space = json5::from_str("{
///     name: 'Walrus Enclosure',
///     origin: {x: 10, y: 0, z: 0},
///     building_story: 'Ground Floor',
///     thermal_zone: 'Zoo',
/// }").unwrap();
/// assert_eq!(s.thermal_zone, Some("Zoo".to_string()));
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Space {
    /// The name of the space
    pub name: String,

    /// The origin of the space's coordinate system, in building coordinates
    #[serde(default)]
    pub origin: Point3D,

    /// The [`BuildingStory`](crate::BuildingStory) in which the space is located
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub building_story: Option<String>,

    /// The [`ThermalZone`](crate::ThermalZone) containing this space
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub thermal_zone: Option<String>,

    /// Volume of the space. If not given, it is calculated from its surfaces
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub volume: Option<Float>,
}

impl Space {
    /// Creates a new [`Space`] at the origin of the building
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sets the origin and returns `self`
    pub fn with_origin(mut self, origin: Point3D) -> Self {
        self.origin = origin;
        self
    }
}

/// A group of spaces sharing the same air (and, generally, the same
/// thermostat). These become the zones of the airflow network.
///
/// ```
/// use model::ThermalZone;
///
/// let z: ThermalZone = json5::from_str("{
///     name: 'Office',
///     supply_air_node: 'Office Supply Inlet',
/// }").unwrap();
/// assert!(z.volume.is_none());
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThermalZone {
    /// The name of the zone
    pub name: String,

    /// The air volume of the zone. If not given, the volume
    /// of its spaces is added up
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub volume: Option<Float>,

    /// The name of the node through which the air loop supplies air
    /// to this zone. Simulation results are keyed by this name.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub supply_air_node: Option<String>,

    /// The name of the node through which air returns to the air loop
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub return_air_node: Option<String>,
}

impl ThermalZone {
    /// Creates a new [`ThermalZone`]
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/***********/
/* TESTING */
/***********/
