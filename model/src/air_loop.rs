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

/// An air handling system serving a set of thermal zones
///
/// ```
/// use model::AirLoop;
///
/// let l: AirLoop = json5::from_str("{
///     name: 'VAV System',
///     thermal_zones: ['Office', 'Lobby'],
/// }").unwrap();
/// assert_eq!(l.thermal_zones.len(), 2);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AirLoop {
    /// The name of the air loop
    pub name: String,

    /// The names of the zones served by this loop
    #[serde(default)]
    pub thermal_zones: Vec<String>,
}

impl AirLoop {
    /// Creates an [`AirLoop`] that serves no zone
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            thermal_zones: Vec::new(),
        }
    }

    /// Adds a zone to the loop
    pub fn add_thermal_zone<S: Into<String>>(&mut self, zone: S) {
        self.thermal_zones.push(zone.into())
    }
}

/***********/
/* TESTING */
/***********/

#[cfg(test)]
mod testing {
    use super::*;

    #[test]
    fn test_air_loop() {
        let mut l = AirLoop::new("DOAS");
        assert!(l.thermal_zones.is_empty());
        l.add_thermal_zone("Zone 1");
        assert_eq!(l.thermal_zones, vec!["Zone 1".to_string()]);
    }
}
