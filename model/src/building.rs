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
use serde::{Deserialize, Serialize};

/// The building containing all the spaces of the model.
///
/// ## Examples
///
/// ```
/// use model::Building;
///
/// let b: Building = json5::from_str("{ name: 'Main Building', north_axis: 30 }").unwrap();
/// assert_eq!(b.name, "Main Building");
/// assert!((b.north_axis - 30.).abs() < 1e-9);
/// ```
#[derive(Default, Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Building {
    /// The name of the Building
    pub name: String,

    /// The angle between the Y axis of the building and the true North,
    /// in degrees, measured clockwise.
    #[serde(default)]
    pub north_axis: Float,
}

impl Building {
    /// Creates a new [`Building`] whose Y axis points North
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            north_axis: 0.,
        }
    }
}

/// A story of a building, used for setting the elevation of the
/// airflow network levels.
///
/// ```
/// use model::BuildingStory;
///
/// let s: BuildingStory = json5::from_str("{
///     name: 'Ground Floor',
///     nominal_z_coordinate: 0,
///     nominal_floor_to_floor_height: 3,
/// }").unwrap();
/// assert_eq!(s.nominal_floor_to_floor_height, Some(3.));
/// ```
#[derive(Default, Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildingStory {
    /// The name of the story
    pub name: String,

    /// The elevation of the floor of the story
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub nominal_z_coordinate: Option<Float>,

    /// The height of the story
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub nominal_floor_to_floor_height: Option<Float>,
}

impl BuildingStory {
    /// Creates a new [`BuildingStory`] with no elevation or height
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

#[cfg(test)]
mod testing {
    use super::*;

    #[test]
    fn serde_building() -> Result<(), String> {
        let hardcoded_ref = Building::new("Main Building");
        let from_hardcoded_json: Building =
            json5::from_str("{ name: 'Main Building' }").map_err(|e| e.to_string())?;
        assert_eq!(
            format!("{:?}", hardcoded_ref),
            format!("{:?}", from_hardcoded_json)
        );

        let rust_json = serde_json::to_string(&hardcoded_ref).map_err(|e| e.to_string())?;
        let from_serialized: Building =
            serde_json::from_str(&rust_json).map_err(|e| e.to_string())?;
        assert_eq!(
            format!("{:?}", hardcoded_ref),
            format!("{:?}", from_serialized)
        );
        Ok(())
    }

    #[test]
    fn serde_story() -> Result<(), String> {
        let mut hardcoded_ref = BuildingStory::new("Second Floor");
        hardcoded_ref.nominal_z_coordinate = Some(3.);
        let from_hardcoded_json: BuildingStory =
            json5::from_str("{ name: 'Second Floor', nominal_z_coordinate: 3 }")
                .map_err(|e| e.to_string())?;
        assert_eq!(
            format!("{:?}", hardcoded_ref),
            format!("{:?}", from_hardcoded_json)
        );
        assert!(from_hardcoded_json.nominal_floor_to_floor_height.is_none());

        let rust_json = serde_json::to_string(&hardcoded_ref).map_err(|e| e.to_string())?;
        assert!(!rust_json.contains("nominal_floor_to_floor_height"));
        Ok(())
    }
}
