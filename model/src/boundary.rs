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

use serde::{Deserialize, Serialize};

/// Represents what is on the other side of a `Surface`
///
/// By default (i.e., if no boundary is assigned to a `Surface`),
/// the boundary will be assumed to be outdoors.
///
/// > **Note**: This object cannot be declared by itself in a model. It is always
/// embedded on a `Surface`
///
/// ## Examples
///
/// ```
/// use model::Boundary;
///
/// let b: Boundary = json5::from_str("{ type: 'Surface', surface: 'Space 2 Wall 4' }").unwrap();
/// assert_eq!(b, Boundary::Surface { surface: "Space 2 Wall 4".into() });
///
/// let b: Boundary = json5::from_str("{ type: 'Ground' }").unwrap();
/// assert_eq!(b, Boundary::Ground);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(tag = "type")]
#[serde(deny_unknown_fields)]
pub enum Boundary {
    /// Leads Outdoors. This is also the default (i.e., when no
    /// Boundary is set)
    #[default]
    Outdoors,

    /// The Surface is in contact with the Ground
    Ground,

    /// Nothing flows through this surface
    Adiabatic,

    /// The Surface is shared with another space. This is the
    /// result of matching surfaces.
    Surface {
        /// The name of the surface on the other side
        surface: String,
    },
}

impl Boundary {
    /// Gets the name of the adjacent surface, if any
    pub fn adjacent_surface(&self) -> Option<&String> {
        match self {
            Self::Surface { surface } => Some(surface),
            _ => None,
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
    fn serde_outdoors() -> Result<(), String> {
        let hardcoded_ref = Boundary::Outdoors;
        let from_hardcoded_json: Boundary =
            json5::from_str("{ type: 'Outdoors' }").map_err(|e| e.to_string())?;
        assert_eq!(hardcoded_ref, from_hardcoded_json);

        let rust_json = serde_json::to_string(&hardcoded_ref).map_err(|e| e.to_string())?;
        let from_serialized: Boundary =
            serde_json::from_str(&rust_json).map_err(|e| e.to_string())?;
        assert_eq!(hardcoded_ref, from_serialized);
        assert!(from_serialized.adjacent_surface().is_none());
        Ok(())
    }

    #[test]
    fn serde_surface() -> Result<(), String> {
        let hardcoded_ref = Boundary::Surface {
            surface: "the other wall".into(),
        };
        let from_hardcoded_json: Boundary = json5::from_str(
            "{
            type: 'Surface',
            surface: 'the other wall',
        }",
        )
        .map_err(|e| e.to_string())?;
        assert_eq!(hardcoded_ref, from_hardcoded_json);
        assert_eq!(
            from_hardcoded_json.adjacent_surface(),
            Some(&"the other wall".to_string())
        );

        // unknown fields are not allowed
        let bad: Result<Boundary, _> =
            json5::from_str("{ type: 'Surface', surface: 'a', space: 'b' }");
        assert!(bad.is_err());
        Ok(())
    }
}
