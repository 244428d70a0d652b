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

#![deny(missing_docs)]

//! Turns a building [`model::Model`] into a CONTAM airflow network.
//!
//! Each thermal zone becomes a zone of the network, and each surface
//! separating two thermal zones (or a thermal zone and the outside) becomes
//! an airflow path whose leakage is proportional to its area. Air loops become
//! simple air handling systems, with supply and return paths to the zones
//! they serve.
//!
//! The result is an [`IndexModel`] that can be written as a project file.
//! When simulation results are available, zone temperatures and system flows
//! are written into a continuous values file ([`CvFile`]).
//!
//! # Example
//!
//! ```
//! use contam::{ForwardTranslator, AirtightnessLevel};
//!
//! let model = test_models::four_zone_demo().unwrap();
//! let mut translator = ForwardTranslator::new();
//! translator.set_airtightness_level(AirtightnessLevel::Leaky);
//! translator.set_translate_hvac(false);
//!
//! let prj = translator.translate_model(&model, None).unwrap();
//! assert_eq!(prj.zones.len(), 4);
//! assert!(prj.to_prj_string().contains("ExtWallLeaky"));
//! ```

/// The kind of Floating point number used in the
/// library... the `"float"` feature means it becomes `f32`
/// and `f64` is used otherwise.
#[cfg(feature = "float")]
type Float = f32;

#[cfg(not(feature = "float"))]
type Float = f64;

mod error;
pub use error::{Result, TranslationError};

mod log_sink;
pub use log_sink::{LogLevel, LogMessage, LogSink};

/// The zones, paths and elements of a project
mod index_model;
pub use index_model::{
    Ahs, AirflowElement, AirflowPath, ControlNode, IndexModel, Level, RunControl,
    WindPressureProfile, Zone,
};

/// Leakage of surfaces
mod leakage;
pub use leakage::{
    add_new_airflow_element, apply_airtightness_level, apply_exterior_flow_rate,
    laminar_coefficient, power_law_element, AirtightnessLevel, ElementMap, RHO_AIR,
};

mod wind;
pub use wind::{pressure_modifier, Terrain};

/// Walking the surfaces of a model
mod network;
pub use network::{Link, LinkKind, NetworkReport, SurfaceNetworkBuilder};

mod results;
pub use results::{SimulationResults, TimeSeries, HOURS_IN_YEAR};

/// Continuous values files
mod cvf;
pub use cvf::CvFile;

mod translator;
pub use translator::{
    model_to_prj, reverse_lookup, table_lookup, ForwardTranslator, Leakage, NrMap,
    TranslatorOptions,
};
