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

use crate::error::{Result, TranslationError};
use crate::index_model::{AirflowElement, IndexModel};
use crate::log_sink::LogSink;
use crate::Float;
use serde::{Deserialize, Serialize};

/// Density of standard air, in kg/m3
pub const RHO_AIR: Float = 1.2041;

/// Square root of [`RHO_AIR`]
const SQRT_RHO_AIR: Float = 1.097315;

/// Viscosity of standard air, in kg/m.s
const MU_AIR: Float = 1.81625e-5;

/// Minimum pressure difference at the laminar/turbulent transition
const MIN_TRANSITION_DP: Float = 1.0e-10;

/// Reynolds number of the laminar/turbulent transition
const TRANSITION_RE: Float = 30.0;

/// How leaky the envelope and the interior partitions are.
///
/// Unknown names produce a warning and become [`AirtightnessLevel::Average`].
///
/// ```
/// use contam::AirtightnessLevel;
///
/// let l: AirtightnessLevel = serde_json::from_str("\"Tight\"").unwrap();
/// assert_eq!(l, AirtightnessLevel::Tight);
///
/// let l: AirtightnessLevel = serde_json::from_str("\"Drafty\"").unwrap();
/// assert_eq!(l, AirtightnessLevel::Average);
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AirtightnessLevel {
    /// Older or poorly sealed construction
    Leaky,
    /// Typical construction
    #[default]
    Average,
    /// Carefully sealed construction
    Tight,
}

impl AirtightnessLevel {
    /// Parses a level. Names are case sensitive.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "Leaky" => Some(Self::Leaky),
            "Average" => Some(Self::Average),
            "Tight" => Some(Self::Tight),
            _ => None,
        }
    }

    /// Parses a level, warning (through `log`) when the name is unknown
    pub fn from_name(name: &str) -> Self {
        Self::parse(name).unwrap_or_else(|| {
            log::warn!("{}", unknown_level_message(name));
            Self::Average
        })
    }

    /// The name of the level
    pub fn name(&self) -> &'static str {
        match self {
            Self::Leaky => "Leaky",
            Self::Average => "Average",
            Self::Tight => "Tight",
        }
    }

    /// The suffix used by the elements of the template library
    pub fn element_suffix(&self) -> &'static str {
        match self {
            Self::Leaky => "Leaky",
            Self::Average => "Avg",
            Self::Tight => "Tight",
        }
    }

    /// Flow through one square metre of exterior wall at 75 Pa, in m3/h
    pub fn exterior_flow(&self) -> Float {
        match self {
            Self::Leaky => 10.8,
            Self::Average => 5.4,
            Self::Tight => 2.7,
        }
    }
}

/// What is reported when an airtightness level is not recognised
pub(crate) fn unknown_level_message(name: &str) -> String {
    format!(
        "Unknown airtightness level '{}', defaulting to 'Average'",
        name
    )
}

impl From<String> for AirtightnessLevel {
    fn from(s: String) -> Self {
        Self::from_name(&s)
    }
}

impl From<AirtightnessLevel> for String {
    fn from(l: AirtightnessLevel) -> Self {
        l.name().to_string()
    }
}

impl std::fmt::Display for AirtightnessLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The numbers of the airflow elements used for each kind of surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementMap {
    /// Exterior walls (and floors exposed to the outside)
    pub exterior: i32,
    /// Interior walls
    pub interior: i32,
    /// Floors and ceilings between zones
    pub floor: i32,
    /// Roofs
    pub roof: i32,
}

/// Finds the template elements corresponding to an [`AirtightnessLevel`].
/// Fails if any of them is not in `model`.
pub fn apply_airtightness_level(model: &IndexModel, level: AirtightnessLevel) -> Result<ElementMap> {
    let suffix = level.element_suffix();
    let find = |prefix: &str| -> Result<i32> {
        let name = format!("{}{}", prefix, suffix);
        model
            .airflow_element_nr_by_name(&name)
            .ok_or_else(|| TranslationError::Airtightness(format!("missing airflow element '{}'", name)))
    };
    Ok(ElementMap {
        exterior: find("ExtWall")?,
        interior: find("IntWall")?,
        floor: find("Floor")?,
        roof: find("Roof")?,
    })
}

/// Adds custom elements, based on a flow rate through the exterior
/// walls. Interior walls and floors are assumed to be twice as leaky.
pub fn apply_exterior_flow_rate(
    model: &mut IndexModel,
    flow: Float,
    n: Float,
    delta_p: Float,
) -> Result<ElementMap> {
    if flow <= 0.0 || n <= 0.0 || delta_p <= 0.0 {
        return Err(TranslationError::ExteriorFlowRate(format!(
            "flow ({}), exponent ({}) and pressure difference ({}) must be positive",
            flow, n, delta_p
        )));
    }
    Ok(ElementMap {
        exterior: add_new_airflow_element(model, "CustomExterior", flow, n, delta_p),
        roof: add_new_airflow_element(model, "CustomRoof", flow, n, delta_p),
        interior: add_new_airflow_element(model, "CustomInterior", 2. * flow, n, delta_p),
        floor: add_new_airflow_element(model, "CustomFloor", 2. * flow, n, delta_p),
    })
}

/// Laminar flow coefficient of an element whose turbulent coefficient
/// is `ct` and its exponent is `x`.
pub fn laminar_coefficient(ct: Float, x: Float) -> Float {
    // flow area and hydraulic diameter
    let a = ct / (0.6 * (2.0 as Float).sqrt());
    let d = a.sqrt();

    // Mass flow and pressure difference at the transition
    let f = MU_AIR * TRANSITION_RE * a / d;
    let dp = (f / (ct * SQRT_RHO_AIR))
        .powf(1.0 / x)
        .max(MIN_TRANSITION_DP);

    (MU_AIR * f) / (RHO_AIR * dp)
}

/// Creates a one-point power-law test element that lets `flow` (m3/h)
/// through when the pressure difference is `delta_p` (Pa).
///
/// ```
/// use contam::{power_law_element, AirflowElement, RHO_AIR};
///
/// let e = power_law_element("Crack", 3.6, 0.65, 75.);
/// let AirflowElement::PowerLaw { flow, turb, expt, dp, .. } = e;
/// assert!((flow - RHO_AIR / 1000.).abs() < 1e-9);
/// // F = Ct * sqrt(rho) * dP^n
/// let f = turb * RHO_AIR.sqrt() * dp.powf(expt);
/// assert!((f - flow).abs() < 1e-5);
/// ```
pub fn power_law_element<S: Into<String>>(name: S, flow: Float, n: Float, delta_p: Float) -> AirflowElement {
    let mass_flow = RHO_AIR * flow / 3600.0;
    let turb = mass_flow / (SQRT_RHO_AIR * delta_p.powf(n));
    let lam = laminar_coefficient(turb, n);
    AirflowElement::PowerLaw {
        nr: 0,
        name: name.into(),
        desc: String::new(),
        lam,
        turb,
        expt: n,
        dp: delta_p,
        flow: mass_flow,
        u_p: 0,
        // display units are m3/h
        u_f: 1,
    }
}

/// Adds a [`power_law_element`] to a model, returning its number
pub fn add_new_airflow_element(
    model: &mut IndexModel,
    name: &str,
    flow: Float,
    n: Float,
    delta_p: Float,
) -> i32 {
    model.add_airflow_element(power_law_element(name, flow, n, delta_p))
}

/// Applies a level, recording failures in `log`
pub(crate) fn apply_level_logged(
    model: &IndexModel,
    level: AirtightnessLevel,
    log: &mut LogSink,
) -> Result<ElementMap> {
    apply_airtightness_level(model, level).map_err(|e| {
        log.error(&e);
        e
    })
}

/***********/
/* TESTING */
/***********/
