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
use clap::Parser;
use contam::{
    AirtightnessLevel, ForwardTranslator, IndexModel, Leakage, NetworkReport, SimulationResults,
    TranslatorOptions,
};
use model::Model;
use std::io::Write;

/// The options we can pass to the translation
#[derive(Parser, Default, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct RunOptions {
    /// The input model file (JSON, or JSON5)
    #[clap(short = 'i')]
    pub input_file: String,

    /// Specifies the path to which to write the project file.
    /// If none is given, STDOUT is used
    #[clap(short = 'o')]
    pub output: Option<String>,

    /// Also write the project as JSON into this file
    #[clap(long = "json")]
    pub json: Option<String>,

    /// The airtightness level: Leaky, Average or Tight
    #[clap(short = 'l')]
    pub level: Option<String>,

    /// Flow through one m2 of exterior surface, in m3/h. Replaces
    /// the airtightness level
    #[clap(long = "flow")]
    pub flow: Option<Float>,

    /// The exponent of the leakage power law, used with `--flow`
    #[clap(long = "exponent", default_value_t = 0.65)]
    pub exponent: Float,

    /// The pressure difference at which `--flow` was measured, in Pa
    #[clap(long = "delta-p", default_value_t = 75.)]
    pub delta_p: Float,

    /// Do not translate air loops
    #[clap(long = "no-hvac")]
    pub no_hvac: bool,

    /// The return flow as a fraction of the supply flow
    #[clap(long = "ratio")]
    pub ratio: Option<Float>,

    /// Derive return flows from supply flows, even when
    /// return flows are available
    #[clap(long = "ratio-override")]
    pub ratio_override: bool,

    /// Simulation results (JSON) with zone temperatures and node flows
    #[clap(short = 'r')]
    pub results: Option<String>,

    /// Write the continuous values file into this path
    #[clap(long = "cvf")]
    pub cvf: Option<String>,

    /// Match the surfaces shared by spaces before translating
    #[clap(long = "match")]
    pub match_surfaces: bool,

    /// A JSON5 file with translator options. The other
    /// flags take precedence over it.
    #[clap(long = "options")]
    pub options_file: Option<String>,

    /// Write a list of the connections between zones
    #[clap(long = "report")]
    pub report: bool,

    /// Show progress bars while translating
    #[clap(long = "progress")]
    pub show_progress: bool,
}

impl RunOptions {
    /// Builds the [`TranslatorOptions`], starting from the options file (if any)
    /// and then applying the flags
    pub fn translator_options(&self) -> Result<TranslatorOptions, String> {
        let mut ret = match &self.options_file {
            Some(f) => TranslatorOptions::from_file(f)
                .map_err(|e| format!("Could not read options file '{}': {}", f, e))?,
            None => TranslatorOptions::default(),
        };
        if let Some(l) = &self.level {
            ret.leakage = Leakage::Level {
                level: AirtightnessLevel::parse(l).unwrap_or_default(),
            };
        }
        if let Some(flow) = self.flow {
            ret.leakage = Leakage::FlowRate {
                flow,
                exponent: self.exponent,
                delta_p: self.delta_p,
            };
        }
        if self.no_hvac {
            ret.translate_hvac = false;
        }
        if let Some(r) = self.ratio {
            ret.return_supply_ratio = r.abs();
        }
        if self.ratio_override {
            ret.ratio_override = true;
        }
        if self.show_progress {
            ret.show_progress = true;
        }
        Ok(ret)
    }

    /// Builds a [`ForwardTranslator`] with the [`TranslatorOptions`]. An
    /// unknown airtightness level is reported by each translation.
    pub fn translator(&self) -> Result<ForwardTranslator, String> {
        let mut ret = ForwardTranslator::with_options(self.translator_options()?);
        if let (Some(l), None) = (&self.level, self.flow) {
            ret.set_airtightness_level_by_name(l);
        }
        Ok(ret)
    }
}

/// Translates the model in `options.input_file`. The project goes into
/// `options.output` or, if there is none, into `out`. So does the network
/// report, if requested.
pub fn run<T: Write>(options: &RunOptions, mut out: T) -> Result<IndexModel, String> {
    let mut model = Model::from_file(&options.input_file)?;
    if options.match_surfaces {
        let n = model.match_surfaces()?;
        log::info!("Matched {} pairs of surfaces", n);
    }

    if options.report {
        let report = NetworkReport::new(&model);
        write!(out, "{}", report).map_err(|e| e.to_string())?;
    }

    let results = match &options.results {
        Some(f) => Some(
            SimulationResults::from_file(f)
                .map_err(|e| format!("Could not read results file '{}': {}", f, e))?,
        ),
        None => None,
    };

    let mut translator = options.translator()?;
    let prj = translator
        .translate_model(&model, results.as_ref())
        .map_err(|e| e.to_string())?;
    log::info!(
        "Translated {} zones and {} airflow paths, with {} warnings",
        prj.zones.len(),
        prj.airflow_paths.len(),
        translator.warnings().len()
    );

    let prj_str = prj.to_prj_string();
    match &options.output {
        Some(f) => std::fs::write(f, prj_str)
            .map_err(|e| format!("Could not write project file '{}': {}", f, e))?,
        None => out.write_all(prj_str.as_bytes()).map_err(|e| e.to_string())?,
    }
    if let Some(f) = &options.json {
        let json = prj.to_json().map_err(|e| e.to_string())?;
        std::fs::write(f, json).map_err(|e| format!("Could not write JSON file '{}': {}", f, e))?;
    }
    if let Some(f) = &options.cvf {
        translator.write_cv_file(f).map_err(|e| e.to_string())?;
    }
    Ok(prj)
}

/***********/
/* TESTING */
/***********/

#[cfg(test)]
mod testing {
    use super::*;

    #[test]
    fn test_translator_options() -> Result<(), String> {
        let options = RunOptions::parse_from([
            "airnet", "-i", "model.json", "-l", "Tight", "--no-hvac", "--ratio=-0.8",
        ]);
        let t = options.translator_options()?;
        assert_eq!(
            t.leakage,
            Leakage::Level {
                level: AirtightnessLevel::Tight
            }
        );
        assert!(!t.translate_hvac);
        assert_eq!(t.return_supply_ratio, 0.8);

        // A flow rate beats a level
        let options = RunOptions::parse_from([
            "airnet", "-i", "model.json", "-l", "Tight", "--flow", "3",
        ]);
        let t = options.translator_options()?;
        assert_eq!(
            t.leakage,
            Leakage::FlowRate {
                flow: 3.,
                exponent: 0.65,
                delta_p: 75.
            }
        );

        let options = RunOptions {
            options_file: Some("./not_there.json5".into()),
            ..RunOptions::default()
        };
        assert!(options.translator_options().is_err());
        Ok(())
    }

    #[test]
    fn test_unknown_level() -> Result<(), String> {
        let options = RunOptions::parse_from(["airnet", "-i", "model.json", "-l", "Drafty"]);
        let mut translator = options.translator()?;
        assert_eq!(translator.airtightness_level(), Some(AirtightnessLevel::Average));

        let model = test_models::four_space_demo()?;
        translator
            .translate_model(&model, None)
            .map_err(|e| e.to_string())?;
        assert!(translator
            .warnings()
            .contains(&"Unknown airtightness level 'Drafty', defaulting to 'Average'"));

        // The warning survives a second translation
        translator
            .translate_model(&model, None)
            .map_err(|e| e.to_string())?;
        assert_eq!(
            translator
                .warnings()
                .iter()
                .filter(|w| w.starts_with("Unknown airtightness level"))
                .count(),
            1
        );
        Ok(())
    }
}
