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

use crate::leakage::RHO_AIR;
use crate::Float;
use serde::{Deserialize, Serialize};

/// Height of the anemometer of the weather station, in m
const MET_HEIGHT: Float = 10.0;

/// The roughness of the terrain around the building, which
/// modifies the wind speed reaching it.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Terrain {
    /// Flat, open country. This is also where weather stations are.
    #[default]
    Default,

    /// Suburbs, wooded areas and towns
    Suburban,

    /// Centres of large cities
    City,
}

impl Terrain {
    /// The exponent (`a`) and boundary layer thickness (`δ`, in m) of
    /// the power-law wind profile
    pub fn boundary_layer(&self) -> (Float, Float) {
        match self {
            Self::Default => (0.14, 270.),
            Self::Suburban => (0.22, 370.),
            Self::City => (0.33, 460.),
        }
    }

    /// The ratio between the wind speed at `height` on this terrain
    /// and the wind speed measured at the weather station.
    ///
    /// ```
    /// use contam::Terrain;
    ///
    /// assert!((Terrain::Default.wind_speed_modifier(10.) - 1.).abs() < 1e-9);
    /// assert!(Terrain::City.wind_speed_modifier(10.) < 1.);
    /// ```
    pub fn wind_speed_modifier(&self, height: Float) -> Float {
        let (a_met, delta_met) = Terrain::Default.boundary_layer();
        let (a, delta) = self.boundary_layer();
        (delta_met / MET_HEIGHT).powf(a_met) * (height.max(0.0) / delta).powf(a)
    }
}

/// Multiplies the square of the wind speed at the weather station to get
/// the dynamic pressure of the wind on a building `height` metres tall:
/// `½ρ(U_H/U_met)²`
pub fn pressure_modifier(terrain: Terrain, height: Float) -> Float {
    let r = terrain.wind_speed_modifier(height);
    0.5 * RHO_AIR * r * r
}

/***********/
/* TESTING */
/***********/

#[cfg(test)]
mod testing {
    use super::*;

    #[test]
    fn test_modifier() {
        // At the weather station, the dynamic pressure is ½ρU²
        let at_met = pressure_modifier(Terrain::Default, 10.);
        assert!((at_met - 0.5 * RHO_AIR).abs() < 1e-9);

        // Rougher terrain, slower wind
        let h = 6.;
        let open = pressure_modifier(Terrain::Default, h);
        let suburb = pressure_modifier(Terrain::Suburban, h);
        let city = pressure_modifier(Terrain::City, h);
        assert!(open > suburb);
        assert!(suburb > city);

        // Taller buildings, faster wind
        assert!(pressure_modifier(Terrain::City, 30.) > city);
        assert_eq!(pressure_modifier(Terrain::City, 0.), 0.);
    }

    #[test]
    fn serde() -> Result<(), String> {
        let t: Terrain = serde_json::from_str("\"Suburban\"").map_err(|e| e.to_string())?;
        assert_eq!(t, Terrain::Suburban);
        assert!(serde_json::from_str::<Terrain>("\"Ocean\"").is_err());
        Ok(())
    }
}
