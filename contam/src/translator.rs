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

use crate::cvf::CvFile;
use crate::error::{Result, TranslationError};
use crate::index_model::{Ahs, AirflowPath, ControlNode, IndexModel, Level, Zone};
use crate::leakage::{
    apply_exterior_flow_rate, apply_level_logged, unknown_level_message, AirtightnessLevel,
    ElementMap, RHO_AIR,
};
use crate::log_sink::LogSink;
use crate::network::SurfaceNetworkBuilder;
use crate::results::SimulationResults;
use crate::wind::{pressure_modifier, Terrain};
use crate::Float;
use calendar::Date;
use model::{Model, Space, SubSurface, Surface, SurfaceTrait, SurfaceType, ThermalZone};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use utils::ProgressBar;

const MODULE_NAME: &str = "ForwardTranslator";

/// Initial temperature of every zone, in K
const T0: Float = 293.15;

/// 1 scfm/ft2, in m3/s per m2 of floor
const DEFAULT_SUPPLY_PER_AREA: Float = 0.00508;

const ZONE_TEMPERATURE: &str = "Zone Mean Air Temperature";
const NODE_MASS_FLOW: &str = "System Node MassFlowRate";

/// A lookup table from names to the number of an object in an [`IndexModel`]
pub type NrMap = BTreeMap<String, i32>;

/// Finds the number stored under `key`, warning if it is not there
pub fn table_lookup(map: &NrMap, key: &str, map_name: &str, log: &mut LogSink) -> Option<i32> {
    let ret = map.get(key).copied();
    if ret.is_none() {
        log.warn(format!("Unable to look up '{}' in {}", key, map_name));
    }
    ret
}

/// Finds the key under which `nr` is stored. Warns if there is none, or if
/// there are more than one (in which case the first is returned).
pub fn reverse_lookup(map: &NrMap, nr: i32, map_name: &str, log: &mut LogSink) -> Option<String> {
    let keys: Vec<&String> = map
        .iter()
        .filter(|(_, v)| **v == nr)
        .map(|(k, _)| k)
        .collect();
    match keys.len() {
        0 => {
            log.warn(format!("Unable to reverse look up '{}' in {}", nr, map_name));
            None
        }
        1 => Some(keys[0].clone()),
        _ => {
            log.warn(format!(
                "Lookup of '{}' in {} returned {} keys, using the first one",
                nr,
                map_name,
                keys.len()
            ));
            Some(keys[0].clone())
        }
    }
}

/// How the leakage of the building is described
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Leakage {
    /// One of the airtightness levels of the template library
    Level {
        /// The level
        level: AirtightnessLevel,
    },

    /// A flow through the exterior surfaces
    FlowRate {
        /// Flow through one m2 of exterior surface, in m3/h
        flow: Float,
        /// The exponent of the power law
        exponent: Float,
        /// The pressure difference at which `flow` was measured, in Pa
        delta_p: Float,
    },
}

impl std::default::Default for Leakage {
    fn default() -> Self {
        Self::Level {
            level: AirtightnessLevel::Average,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_ratio() -> Float {
    1.0
}

/// The options of a [`ForwardTranslator`]
///
/// ```
/// use contam::{TranslatorOptions, Leakage, AirtightnessLevel};
///
/// let options = TranslatorOptions::from_json5("{
///     leakage: { type: 'Level', level: 'Leaky' },
///     return_supply_ratio: 0.9,
/// }").unwrap();
/// assert_eq!(options.leakage, Leakage::Level { level: AirtightnessLevel::Leaky });
/// assert!(options.translate_hvac);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TranslatorOptions {
    /// The leakage of the surfaces
    #[serde(default)]
    pub leakage: Leakage,

    /// Whether air handling systems are translated
    #[serde(default = "default_true")]
    pub translate_hvac: bool,

    /// Return flow as a fraction of the supply flow
    #[serde(default = "default_ratio")]
    pub return_supply_ratio: Float,

    /// Derive the return flows from the supply flows (scaled by
    /// `return_supply_ratio`) even when return flows are available
    #[serde(default)]
    pub ratio_override: bool,

    /// The terrain around the building
    #[serde(default)]
    pub terrain: Terrain,

    /// Print a progress bar while translating
    #[serde(default)]
    pub show_progress: bool,
}

impl std::default::Default for TranslatorOptions {
    fn default() -> Self {
        Self {
            leakage: Leakage::default(),
            translate_hvac: true,
            return_supply_ratio: 1.0,
            ratio_override: false,
            terrain: Terrain::default(),
            show_progress: false,
        }
    }
}

impl TranslatorOptions {
    /// Parses options from a JSON5 string
    pub fn from_json5(s: &str) -> Result<Self> {
        let mut ret: Self = json5::from_str(s)?;
        ret.return_supply_ratio = ret.return_supply_ratio.abs();
        Ok(ret)
    }

    /// Reads options from a JSON5 file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let s = std::fs::read_to_string(path)?;
        Self::from_json5(&s)
    }
}

/// Turns a [`Model`] into an [`IndexModel`], in which each thermal zone is a
/// zone and each surface between zones (or leading outside) is an airflow path.
///
/// ```
/// use contam::ForwardTranslator;
///
/// let model = test_models::four_space_demo().unwrap();
/// let mut translator = ForwardTranslator::new();
/// let prj = translator.translate_model(&model, None).unwrap();
/// // One zone, plus the return and supply zones of the air loop
/// assert_eq!(prj.zones.len(), 3);
/// assert_eq!(prj.ahs.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct ForwardTranslator {
    options: TranslatorOptions,
    log: LogSink,
    level_map: NrMap,
    zone_map: NrMap,
    surface_map: NrMap,
    path_map: NrMap,
    ahs_map: NrMap,
    cvf: CvFile,
    start: Option<Date>,
    end: Option<Date>,
    unknown_level: Option<String>,
}

impl std::default::Default for ForwardTranslator {
    fn default() -> Self {
        Self::new()
    }
}

/// Shows progress if asked to
struct Progress(Option<ProgressBar>);

impl Progress {
    fn new(show: bool, label: &str, total: usize) -> Self {
        Self(if show {
            Some(ProgressBar::new(label, total))
        } else {
            None
        })
    }

    fn tic(&self) {
        if let Some(p) = &self.0 {
            p.tic()
        }
    }

    fn done(&self) {
        if let Some(p) = &self.0 {
            p.done()
        }
    }
}

impl ForwardTranslator {
    /// Creates a translator with the default [`TranslatorOptions`]
    pub fn new() -> Self {
        Self::with_options(TranslatorOptions::default())
    }

    /// Creates a translator with some [`TranslatorOptions`]
    pub fn with_options(mut options: TranslatorOptions) -> Self {
        options.return_supply_ratio = options.return_supply_ratio.abs();
        Self {
            options,
            log: LogSink::new(MODULE_NAME),
            level_map: NrMap::new(),
            zone_map: NrMap::new(),
            surface_map: NrMap::new(),
            path_map: NrMap::new(),
            ahs_map: NrMap::new(),
            cvf: CvFile::default(),
            start: None,
            end: None,
            unknown_level: None,
        }
    }

    /// Borrows the options
    pub fn options(&self) -> &TranslatorOptions {
        &self.options
    }

    /// The airtightness level in use, if the leakage is not a flow rate
    pub fn airtightness_level(&self) -> Option<AirtightnessLevel> {
        match self.options.leakage {
            Leakage::Level { level } => Some(level),
            Leakage::FlowRate { .. } => None,
        }
    }

    /// Uses one of the airtightness levels of the template library
    pub fn set_airtightness_level(&mut self, level: AirtightnessLevel) {
        self.unknown_level = None;
        self.options.leakage = Leakage::Level { level }
    }

    /// Uses the airtightness level called `name`. Unknown names become
    /// [`AirtightnessLevel::Average`], and each translation warns about them.
    pub fn set_airtightness_level_by_name(&mut self, name: &str) {
        let level = AirtightnessLevel::parse(name);
        self.set_airtightness_level(level.unwrap_or_default());
        if level.is_none() {
            self.unknown_level = Some(name.to_string());
        }
    }

    /// The flow, exponent and pressure difference in use, if the leakage
    /// is a flow rate
    pub fn exterior_flow_rate(&self) -> Option<(Float, Float, Float)> {
        match self.options.leakage {
            Leakage::FlowRate {
                flow,
                exponent,
                delta_p,
            } => Some((flow, exponent, delta_p)),
            Leakage::Level { .. } => None,
        }
    }

    /// Uses custom elements that let `flow` m3/h through each m2 of
    /// exterior surface at `delta_p` Pa. Returns `false` (and changes
    /// nothing) unless all values are positive.
    pub fn set_exterior_flow_rate(&mut self, flow: Float, exponent: Float, delta_p: Float) -> bool {
        if flow <= 0.0 || exponent <= 0.0 || delta_p <= 0.0 {
            return false;
        }
        self.unknown_level = None;
        self.options.leakage = Leakage::FlowRate {
            flow,
            exponent,
            delta_p,
        };
        true
    }

    /// Whether air handling systems are translated
    pub fn translate_hvac(&self) -> bool {
        self.options.translate_hvac
    }

    /// Sets whether air handling systems are translated
    pub fn set_translate_hvac(&mut self, v: bool) {
        self.options.translate_hvac = v
    }

    /// Return flow as a fraction of the supply flow
    pub fn return_supply_ratio(&self) -> Float {
        self.options.return_supply_ratio
    }

    /// Sets the return flow as a fraction of the supply flow. Negative
    /// values are made positive.
    pub fn set_return_supply_ratio(&mut self, v: Float) {
        self.options.return_supply_ratio = v.abs()
    }

    /// Whether return flows always derive from supply flows
    pub fn ratio_override(&self) -> bool {
        self.options.ratio_override
    }

    /// Sets whether return flows always derive from supply flows
    pub fn set_ratio_override(&mut self, v: bool) {
        self.options.ratio_override = v
    }

    /// Sets the terrain around the building
    pub fn set_terrain(&mut self, terrain: Terrain) {
        self.options.terrain = terrain
    }

    /// Sets whether a progress bar is printed
    pub fn set_show_progress(&mut self, v: bool) {
        self.options.show_progress = v
    }

    /// Story name → level number, from the last translation
    pub fn level_map(&self) -> &NrMap {
        &self.level_map
    }

    /// Thermal zone name → zone number, from the last translation
    pub fn zone_map(&self) -> &NrMap {
        &self.zone_map
    }

    /// Surface name → path number, from the last translation
    pub fn surface_map(&self) -> &NrMap {
        &self.surface_map
    }

    /// System path name (e.g., `<zone> supply` or `AHS_1 oa`) → path
    /// number, from the last translation
    pub fn path_map(&self) -> &NrMap {
        &self.path_map
    }

    /// Air loop name → air handling system number, from the last translation
    pub fn ahs_map(&self) -> &NrMap {
        &self.ahs_map
    }

    /// The surface translated into path `nr`, if any
    pub fn surface_of_path(&mut self, nr: i32) -> Option<String> {
        reverse_lookup(&self.surface_map, nr, "surfaceMap", &mut self.log)
    }

    /// The first day of the run period of the last translated model
    pub fn start_date(&self) -> Option<Date> {
        self.start
    }

    /// The last day of the run period of the last translated model
    pub fn end_date(&self) -> Option<Date> {
        self.end
    }

    /// The warnings of the last translation
    pub fn warnings(&self) -> Vec<&str> {
        self.log.warnings()
    }

    /// The errors of the last translation
    pub fn errors(&self) -> Vec<&str> {
        self.log.errors()
    }

    /// Forgets everything about previous translations
    pub fn clear(&mut self) {
        self.log.clear();
        self.level_map.clear();
        self.zone_map.clear();
        self.surface_map.clear();
        self.path_map.clear();
        self.ahs_map.clear();
        self.cvf.clear();
        self.start = None;
        self.end = None;
    }

    /// Writes the continuous values collected from the simulation
    /// results of the last translation. Fails if there are none.
    pub fn write_cv_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.cvf.write(path)
    }

    fn fail<T>(&mut self, e: TranslationError) -> Result<T> {
        self.log.error(&e);
        Err(e)
    }

    /// Translates `model`. Simulation `results`, when available, are used for
    /// setting zone temperatures and system flows through control nodes. Otherwise,
    /// system flows are approximated from the floor area of the zones.
    pub fn translate_model(
        &mut self,
        model: &Model,
        results: Option<&SimulationResults>,
    ) -> Result<IndexModel> {
        self.clear();
        if let Some(name) = &self.unknown_level {
            self.log.warn(unknown_level_message(name));
        }

        let mut prj = IndexModel::template();
        if !prj.valid() {
            return self.fail(TranslationError::Template(
                "the template project is not valid".into(),
            ));
        }
        // The template has one level, but the levels come from the stories
        prj.levels.clear();

        let leakage = self.options.leakage;
        let elements = match leakage {
            Leakage::Level { level } => apply_level_logged(&prj, level, &mut self.log)?,
            Leakage::FlowRate {
                flow,
                exponent,
                delta_p,
            } => match apply_exterior_flow_rate(&mut prj, flow, exponent, delta_p) {
                Ok(e) => e,
                Err(e) => return self.fail(e),
            },
        };

        prj.desc = match &model.building {
            Some(b) if !b.name.is_empty() => {
                format!("Automatically generated from \"{}\" OpenStudio model", b.name)
            }
            _ => "Automatically generated OpenStudio model".to_string(),
        };

        self.translate_run_period(model, &mut prj);
        self.translate_stories(model, &mut prj)?;
        self.translate_zones(model, &mut prj)?;

        // Surfaces
        let progress = Progress::new(
            self.options.show_progress,
            "Translating Surfaces",
            model.surfaces.len(),
        );
        let mut builder = PathBuilder {
            prj: &mut prj,
            zone_map: &self.zone_map,
            surface_map: &mut self.surface_map,
            log: &mut self.log,
            progress: &progress,
            elements,
            w_pmod: 0.0,
            north_axis: model.north_axis(),
        };
        builder.w_pmod = pressure_modifier(self.options.terrain, builder.prj.wind_h);
        if !builder.build(model) {
            self.log.warn("Some surfaces could not be translated into airflow paths");
        }
        progress.done();

        if self.options.translate_hvac {
            self.translate_air_loops(model, &mut prj);
            match results {
                Some(r) => self.apply_results(model, r, &mut prj),
                None => self.apply_default_flows(model, &mut prj),
            }
        }

        Ok(prj)
    }

    fn translate_run_period(&mut self, model: &Model, prj: &mut IndexModel) {
        let rp = match &model.run_period {
            Some(rp) => rp,
            None => return,
        };
        let dates = || -> std::result::Result<(Date, Date, String, String), String> {
            let start = Date::new(rp.begin_month, rp.begin_day, 0)?;
            let end = Date::new(rp.end_month, rp.end_day, 0)?;
            let d0 = start.prj_day()?;
            let d1 = end.prj_day()?;
            Ok((start, end, d0, d1))
        };
        match dates() {
            Ok((start, end, d0, d1)) => {
                prj.rc.sim_af = 1;
                prj.rc.date_0 = d0;
                prj.rc.time_0 = "00:00:00".to_string();
                prj.rc.date_1 = d1;
                prj.rc.time_1 = "24:00:00".to_string();
                // The CVF keeps covering the whole year
                self.start = Some(start);
                self.end = Some(end);
            }
            Err(e) => self.log.error(format!(
                "Failed to get usable start or end date from run period ({}), defaulting to steady state",
                e
            )),
        }
    }

    fn translate_stories(&mut self, model: &Model, prj: &mut IndexModel) -> Result<()> {
        let mut stories = Vec::with_capacity(model.building_stories.len());
        for story in model.building_stories.iter() {
            let z = match story.nominal_z_coordinate {
                Some(z) => z,
                None => {
                    return self.fail(TranslationError::MissingStoryData {
                        story: story.name.clone(),
                        field: "elevation",
                    })
                }
            };
            let h = match story.nominal_floor_to_floor_height {
                Some(h) => h,
                None => {
                    return self.fail(TranslationError::MissingStoryData {
                        story: story.name.clone(),
                        field: "nominal floor-to-floor height",
                    })
                }
            };
            stories.push((z, h, story.name.clone()));
        }
        stories.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut total_height = 0.0;
        for (z, h, name) in stories {
            let nr = prj.add_level(Level {
                nr: 0,
                refht: z,
                delht: h,
                name: format!("<{}>", prj.levels.len() + 1),
            });
            self.level_map.insert(name, nr);
            total_height += h;
        }
        prj.wind_h = total_height;

        if prj.levels.is_empty() {
            return self.fail(TranslationError::NoLevels);
        }
        Ok(())
    }

    fn translate_zones(&mut self, model: &Model, prj: &mut IndexModel) -> Result<()> {
        let progress = Progress::new(
            self.options.show_progress,
            "Translating Zones",
            model.thermal_zones.len(),
        );
        for thermal_zone in model.thermal_zones.iter() {
            let spaces = model.spaces_in_zone(&thermal_zone.name);
            let vol = match thermal_zone.volume {
                Some(v) => v,
                None => {
                    let mut vol = 0.0;
                    for space in spaces.iter() {
                        match model.space_volume(&space.name) {
                            Ok(v) => vol += v,
                            Err(e) => self.log.warn(e),
                        }
                    }
                    if vol == 0.0 {
                        self.log.warn(format!(
                            "Failed to compute volume for Zone '{}'",
                            thermal_zone.name
                        ));
                    }
                    vol
                }
            };

            let pl = match spaces.iter().find_map(|s| s.building_story.as_ref()) {
                Some(story) => table_lookup(&self.level_map, story, "levelMap", &mut self.log),
                None => None,
            };
            let pl = match pl {
                Some(pl) => pl,
                None => {
                    return self.fail(TranslationError::ZoneWithoutLevel(
                        thermal_zone.name.clone(),
                    ))
                }
            };

            let nr = prj.add_zone(Zone {
                flags: Zone::VAR_P | Zone::VAR_C,
                pl,
                vol,
                t0: T0,
                name: format!("Zone_{}", prj.zones.len() + 1),
                ..Zone::default()
            });
            self.zone_map.insert(thermal_zone.name.clone(), nr);
            progress.tic();
        }
        progress.done();
        Ok(())
    }

    fn translate_air_loops(&mut self, model: &Model, prj: &mut IndexModel) {
        let progress = Progress::new(
            self.options.show_progress,
            "Translating AirLoops",
            model.air_loops.len(),
        );
        for air_loop in model.air_loops.iter() {
            if air_loop.thermal_zones.is_empty() {
                progress.tic();
                continue;
            }
            let ahs_name = format!("AHS_{}", prj.ahs.len() + 1);
            let system_zone = |name: String| Zone {
                flags: Zone::SYS_N | Zone::VAR_C,
                pl: 1,
                t0: T0,
                name,
                ..Zone::default()
            };
            let zone_r = prj.add_zone(system_zone(format!("{}(Rec)", ahs_name)));
            let zone_s = prj.add_zone(system_zone(format!("{}(Sup)", ahs_name)));
            let ahs_nr = prj.add_ahs(Ahs {
                zone_r,
                zone_s,
                name: ahs_name,
                desc: air_loop.name.clone(),
                ..Ahs::default()
            });
            self.ahs_map.insert(air_loop.name.clone(), ahs_nr);

            for zone_name in air_loop.thermal_zones.iter() {
                let zone_nr = match table_lookup(&self.zone_map, zone_name, "zoneMap", &mut self.log) {
                    Some(nr) => nr,
                    None => continue,
                };
                let supply = prj.add_path(AirflowPath {
                    flags: AirflowPath::AHS_S,
                    pld: 1,
                    pzn: zone_s,
                    pzm: zone_nr,
                    pa: ahs_nr,
                    ..AirflowPath::default()
                });
                self.path_map.insert(format!("{} supply", zone_name), supply);
                let ret = prj.add_path(AirflowPath {
                    flags: AirflowPath::AHS_S,
                    pld: 1,
                    pzn: zone_nr,
                    pzm: zone_r,
                    pa: ahs_nr,
                    ..AirflowPath::default()
                });
                self.path_map.insert(format!("{} return", zone_name), ret);
            }
            progress.tic();
        }
        progress.done();

        // Connect the return and supply zones of each system to each other and to the outside
        let progress = Progress::new(
            self.options.show_progress,
            "Connecting AHS to zones",
            prj.ahs.len(),
        );
        for i in 0..prj.ahs.len() {
            let loop_name = format!("AHS_{}", i + 1);
            let (zone_r, zone_s) = (prj.ahs[i].zone_r, prj.ahs[i].zone_s);
            let recirculation = prj.add_path(AirflowPath {
                flags: AirflowPath::AHS_R,
                pld: 1,
                pzn: zone_r,
                pzm: zone_s,
                ..AirflowPath::default()
            });
            self.path_map.insert(format!("{} recirculation", loop_name), recirculation);
            let oa = prj.add_path(AirflowPath {
                flags: AirflowPath::AHS_O,
                pld: 1,
                pzn: -1,
                pzm: zone_s,
                ..AirflowPath::default()
            });
            self.path_map.insert(format!("{} oa", loop_name), oa);
            let exhaust = prj.add_path(AirflowPath {
                flags: AirflowPath::AHS_X,
                pld: 1,
                pzn: zone_r,
                pzm: -1,
                ..AirflowPath::default()
            });
            self.path_map.insert(format!("{} exhaust", loop_name), exhaust);

            let ahs = &mut prj.ahs[i];
            ahs.path_r = recirculation;
            ahs.path_s = oa;
            ahs.path_x = exhaust;
            progress.tic();
        }
        progress.done();
    }

    /// Drives path `nr` through a new control node reading `series`
    fn control_path(
        &mut self,
        prj: &mut IndexModel,
        nr: i32,
        value_prefix: &str,
        series: crate::results::TimeSeries,
    ) {
        let value_name = format!("{}_{}", value_prefix, nr);
        self.cvf.add_time_series(&value_name, series);
        let ctrl = prj.add_control_node(ControlNode::new(format!("ctrl_p_{}", nr), value_name));
        if let Some(path) = prj.path_mut(nr) {
            path.pc = ctrl;
        }
    }

    fn apply_results(&mut self, model: &Model, results: &SimulationResults, prj: &mut IndexModel) {
        if results.has_variable(ZONE_TEMPERATURE) {
            for thermal_zone in model.thermal_zones.iter() {
                let key = thermal_zone.name.to_uppercase();
                let series = match results.time_series(ZONE_TEMPERATURE, &key) {
                    Some(s) => s,
                    None => {
                        self.log.warn(format!(
                            "Zone '{}' has no {} time series",
                            thermal_zone.name, ZONE_TEMPERATURE
                        ));
                        continue;
                    }
                };
                let nr = match table_lookup(&self.zone_map, &thermal_zone.name, "zoneMap", &mut self.log) {
                    Some(nr) => nr,
                    None => continue,
                };
                let value_name = format!("temp_{}", nr);
                self.cvf.add_time_series(&value_name, series.clone());
                let ctrl = prj.add_control_node(ControlNode::new(format!("ctrl_z_{}", nr), value_name));
                if let Some(zone) = prj.zone_mut(nr) {
                    zone.pc = ctrl;
                }
            }
        } else {
            self.log.warn(
                "Activate \"Zone Mean Air Temperature\" output to set zone temperature controls.",
            );
        }

        if !results.has_variable(NODE_MASS_FLOW) {
            self.log.warn(
                "Activate \"System Node MassFlowRate\" output to set zone supply/return flows.",
            );
            return;
        }
        self.log.warn("Zone equipment not yet accounted for.");

        let ratio = self.options.return_supply_ratio;
        for thermal_zone in model.thermal_zones.iter() {
            let supply_series = thermal_zone
                .supply_air_node
                .as_ref()
                .and_then(|node| results.time_series(NODE_MASS_FLOW, &node.to_uppercase()));
            if let Some(series) = supply_series {
                let supply = match self.path_map.get(&format!("{} supply", thermal_zone.name)) {
                    Some(nr) => *nr,
                    None => {
                        self.log.error(format!(
                            "Supply node for zone '{}' has no associated CONTAM path",
                            thermal_zone.name
                        ));
                        continue;
                    }
                };
                self.control_path(prj, supply, "supply", series.clone());

                if self.options.ratio_override {
                    let ret = match self.path_map.get(&format!("{} return", thermal_zone.name)) {
                        Some(nr) => *nr,
                        None => {
                            self.log.error(format!(
                                "Failed to find return path for zone '{}'",
                                thermal_zone.name
                            ));
                            continue;
                        }
                    };
                    self.control_path(prj, ret, "return", series.scaled(ratio));
                }
            }

            if !self.options.ratio_override {
                let return_series = thermal_zone
                    .return_air_node
                    .as_ref()
                    .and_then(|node| results.time_series(NODE_MASS_FLOW, &node.to_uppercase()));
                if let Some(series) = return_series {
                    let ret = match self.path_map.get(&format!("{} return", thermal_zone.name)) {
                        Some(nr) => *nr,
                        None => {
                            self.log.error(format!(
                                "Return node for zone '{}' has no associated CONTAM path",
                                thermal_zone.name
                            ));
                            continue;
                        }
                    };
                    self.control_path(prj, ret, "return", series.clone());
                }
            }
        }
    }

    fn apply_default_flows(&mut self, model: &Model, prj: &mut IndexModel) {
        self.log
            .warn("Simulation results not available, using 1 scfm/ft^2 to set supply flows");
        let ratio = self.options.return_supply_ratio;
        for thermal_zone in model.thermal_zones.iter() {
            let area: Float = model
                .spaces_in_zone(&thermal_zone.name)
                .iter()
                .map(|s| model.space_floor_area(&s.name))
                .sum();
            if area == 0.0 {
                self.log.warn(format!(
                    "Failed to compute floor area for Zone '{}'",
                    thermal_zone.name
                ));
                continue;
            }
            let flow = area * DEFAULT_SUPPLY_PER_AREA * RHO_AIR;
            if let Some(nr) = self.path_map.get(&format!("{} supply", thermal_zone.name)) {
                if let Some(p) = prj.path_mut(*nr) {
                    p.fahs = flow;
                }
            }
            if let Some(nr) = self.path_map.get(&format!("{} return", thermal_zone.name)) {
                if let Some(p) = prj.path_mut(*nr) {
                    p.fahs = ratio * flow;
                }
            }
        }
    }
}

/// Turns the surfaces of a model into airflow paths
struct PathBuilder<'a> {
    prj: &'a mut IndexModel,
    zone_map: &'a NrMap,
    surface_map: &'a mut NrMap,
    log: &'a mut LogSink,
    progress: &'a Progress,
    elements: ElementMap,
    w_pmod: Float,
    north_axis: Float,
}

impl PathBuilder<'_> {
    /// The number of the zone of a thermal zone, and the number and
    /// elevation of its level
    fn zone_and_level(&mut self, zone: &ThermalZone) -> Option<(i32, i32, Float)> {
        let nr = table_lookup(self.zone_map, &zone.name, "zoneMap", self.log)?;
        let level = self.prj.zone(nr).and_then(|z| self.prj.level(z.pl));
        match level {
            Some(l) => Some((nr, l.nr, l.refht)),
            None => {
                self.log
                    .error(format!("Zone '{}' is not in a level", zone.name));
                None
            }
        }
    }
}

impl SurfaceNetworkBuilder for PathBuilder<'_> {
    fn link_exterior_surface(&mut self, zone: &ThermalZone, space: &Space, surface: &Surface) -> bool {
        let (zone_nr, pld, refht) = match self.zone_and_level(zone) {
            Some(v) => v,
            None => return false,
        };
        let (pe, pw) = match surface.surface_type {
            SurfaceType::RoofCeiling => (self.elements.roof, 5),
            _ => (self.elements.exterior, 4),
        };
        let nr = self.prj.add_path(AirflowPath {
            flags: AirflowPath::WIND,
            pzn: zone_nr,
            pzm: -1,
            pe,
            pw,
            pld,
            rel_ht: surface.average_z(space.origin) - refht,
            mult: surface.gross_area(),
            w_pmod: self.w_pmod,
            wazm: surface.azimuth(self.north_axis),
            ..AirflowPath::default()
        });
        self.surface_map.insert(surface.name.clone(), nr);
        true
    }

    fn link_interior_surface(
        &mut self,
        zone: &ThermalZone,
        space: &Space,
        surface: &Surface,
        adjacent_surface: &Surface,
        _adjacent_space: &Space,
        adjacent_zone: &ThermalZone,
    ) -> bool {
        let (zone_nr, pld, refht) = match self.zone_and_level(zone) {
            Some(v) => v,
            None => return false,
        };
        let adjacent_nr = match table_lookup(self.zone_map, &adjacent_zone.name, "zoneMap", self.log) {
            Some(nr) => nr,
            None => return false,
        };
        let pe = match surface.surface_type {
            SurfaceType::Floor | SurfaceType::RoofCeiling => self.elements.floor,
            SurfaceType::Wall => self.elements.interior,
        };
        let nr = self.prj.add_path(AirflowPath {
            pzn: zone_nr,
            pzm: adjacent_nr,
            pe,
            pld,
            rel_ht: surface.average_z(space.origin) - refht,
            mult: 0.5 * (surface.gross_area() + adjacent_surface.gross_area()),
            ..AirflowPath::default()
        });
        self.surface_map.insert(surface.name.clone(), nr);
        true
    }

    // Windows and doors are part of the leakage of their surfaces
    fn link_exterior_sub_surface(&mut self, _: &ThermalZone, _: &Space, _: &Surface, _: &SubSurface) -> bool {
        true
    }

    fn visit_surface(&mut self, _: &Surface) {
        self.progress.tic()
    }

    fn warn(&mut self, msg: &str) {
        self.log.warn(msg)
    }
}

/// Translates `model` with the default options (plus `translate_hvac` and
/// `level`) and writes it into `path`
pub fn model_to_prj<P: AsRef<Path>>(
    model: &Model,
    path: P,
    translate_hvac: bool,
    level: AirtightnessLevel,
) -> Result<()> {
    let mut translator = ForwardTranslator::new();
    translator.set_translate_hvac(translate_hvac);
    translator.set_airtightness_level(level);
    let prj = translator.translate_model(model, None)?;
    std::fs::write(path, prj.to_prj_string())?;
    Ok(())
}

/***********/
/* TESTING */
/***********/

#[cfg(test)]
mod testing {
    use super::*;
    use crate::results::TimeSeries;
    use model::{AirLoop, BuildingStory, RunPeriod};

    fn translate(model: &Model) -> std::result::Result<(ForwardTranslator, IndexModel), String> {
        let mut translator = ForwardTranslator::new();
        let prj = translator
            .translate_model(model, None)
            .map_err(|e| e.to_string())?;
        Ok((translator, prj))
    }

    #[test]
    fn test_lookups() {
        let mut log = LogSink::new("test");
        let mut map = NrMap::new();
        map.insert("a".into(), 1);
        map.insert("b".into(), 2);
        map.insert("c".into(), 2);

        assert_eq!(table_lookup(&map, "a", "map", &mut log), Some(1));
        assert!(log.warnings().is_empty());
        assert_eq!(table_lookup(&map, "d", "map", &mut log), None);
        assert_eq!(log.warnings(), vec!["Unable to look up 'd' in map"]);

        assert_eq!(reverse_lookup(&map, 1, "map", &mut log), Some("a".to_string()));
        assert_eq!(log.warnings().len(), 1);
        assert_eq!(reverse_lookup(&map, 2, "map", &mut log), Some("b".to_string()));
        assert_eq!(log.warnings().len(), 2);
        assert_eq!(reverse_lookup(&map, 3, "map", &mut log), None);
        assert_eq!(log.warnings().len(), 3);
    }

    #[test]
    fn test_options() {
        let mut t = ForwardTranslator::new();
        assert_eq!(t.airtightness_level(), Some(AirtightnessLevel::Average));
        assert!(t.translate_hvac());
        assert_eq!(t.return_supply_ratio(), 1.0);
        assert!(!t.ratio_override());

        t.set_return_supply_ratio(-0.9);
        assert_eq!(t.return_supply_ratio(), 0.9);

        assert!(!t.set_exterior_flow_rate(0., 0.65, 75.));
        assert!(t.airtightness_level().is_some());
        assert!(t.set_exterior_flow_rate(10., 0.65, 75.));
        assert!(t.airtightness_level().is_none());
        assert_eq!(t.exterior_flow_rate(), Some((10., 0.65, 75.)));

        t.set_airtightness_level(AirtightnessLevel::Tight);
        assert!(t.exterior_flow_rate().is_none());

        let o = TranslatorOptions::from_json5("{ return_supply_ratio: -0.5, ratio_override: true }");
        assert!(matches!(o, Ok(ref o) if o.return_supply_ratio == 0.5 && o.ratio_override));
        assert!(TranslatorOptions::from_json5("{ hvac: false }").is_err());
    }

    #[test]
    fn test_level_by_name() -> std::result::Result<(), String> {
        let model = test_models::four_space_demo()?;
        let message = "Unknown airtightness level 'Drafty', defaulting to 'Average'";

        let mut t = ForwardTranslator::new();
        t.set_airtightness_level_by_name("Tight");
        assert_eq!(t.airtightness_level(), Some(AirtightnessLevel::Tight));
        t.translate_model(&model, None).map_err(|e| e.to_string())?;
        assert!(!t.warnings().contains(&message));

        t.set_airtightness_level_by_name("Drafty");
        assert_eq!(t.airtightness_level(), Some(AirtightnessLevel::Average));
        t.translate_model(&model, None).map_err(|e| e.to_string())?;
        assert!(t.warnings().contains(&message));

        // Choosing a known level forgets the unknown one
        t.set_airtightness_level(AirtightnessLevel::Leaky);
        t.translate_model(&model, None).map_err(|e| e.to_string())?;
        assert!(!t.warnings().contains(&message));
        Ok(())
    }

    #[test]
    fn test_terrain() -> std::result::Result<(), String> {
        let model = test_models::four_space_demo()?;
        let mut modifiers = Vec::new();
        for terrain in [Terrain::Default, Terrain::Suburban, Terrain::City] {
            let mut t = ForwardTranslator::new();
            t.set_terrain(terrain);
            assert_eq!(t.options().terrain, terrain);
            let prj = t.translate_model(&model, None).map_err(|e| e.to_string())?;
            let expected = pressure_modifier(terrain, prj.wind_h);
            let exterior: Vec<&AirflowPath> = prj
                .airflow_paths
                .iter()
                .filter(|p| p.wind_pressure())
                .collect();
            assert_eq!(exterior.len(), 12);
            for p in exterior {
                assert!((p.w_pmod - expected).abs() < 1e-12);
            }
            modifiers.push(expected);
        }
        // Rougher terrain slows the wind down
        assert!(modifiers[0] > modifiers[1]);
        assert!(modifiers[1] > modifiers[2]);
        Ok(())
    }

    #[test]
    fn test_show_progress() -> std::result::Result<(), String> {
        let model = test_models::four_space_demo()?;
        let (_, quiet) = translate(&model)?;

        let mut t = ForwardTranslator::new();
        t.set_show_progress(true);
        let prj = t.translate_model(&model, None).map_err(|e| e.to_string())?;
        assert_eq!(prj.airflow_paths.len(), quiet.airflow_paths.len());
        assert_eq!(t.surface_map().len(), 12);
        Ok(())
    }

    #[test]
    fn test_four_space_demo() -> std::result::Result<(), String> {
        let model = test_models::four_space_demo()?;
        let (translator, prj) = translate(&model)?;

        assert_eq!(
            prj.desc,
            "Automatically generated from \"Demo Building\" OpenStudio model"
        );
        assert_eq!(prj.rc.sim_af, 1);
        assert_eq!(prj.rc.date_0, "Jan01");
        assert_eq!(prj.rc.date_1, "Dec31");
        assert_eq!(prj.rc.time_1, "24:00:00");

        assert_eq!(prj.levels.len(), 1);
        assert_eq!(prj.wind_h, 3.);

        let zone = prj.zone(1).ok_or("no zone 1")?;
        assert_eq!(zone.name, "Zone_1");
        assert!((zone.vol - 1200.).abs() < 1e-6);
        assert_eq!(zone.flags, Zone::VAR_P | Zone::VAR_C);
        assert_eq!(zone.pl, 1);

        // 12 exterior surfaces, then 2 system paths and the recirculation,
        // outside air and exhaust paths
        assert_eq!(prj.airflow_paths.len(), 12 + 2 + 3);
        let exterior: Vec<&AirflowPath> = prj
            .airflow_paths
            .iter()
            .filter(|p| p.wind_pressure())
            .collect();
        assert_eq!(exterior.len(), 12);
        let walls = exterior.iter().filter(|p| p.pw == 4).count();
        assert_eq!(walls, 8);
        let roof = exterior.iter().find(|p| p.pw == 5).ok_or("no roof")?;
        assert!((roof.mult - 100.).abs() < 1e-6);
        assert!((roof.rel_ht - 3.).abs() < 1e-6);
        assert!(roof.w_pmod > 0.);

        let avg = apply_level_logged(&IndexModel::template(), AirtightnessLevel::Average, &mut LogSink::default())
            .map_err(|e| e.to_string())?;
        assert_eq!(roof.pe, avg.roof);

        assert_eq!(translator.surface_map().len(), 12);
        assert_eq!(translator.zone_map().get("Thermal Zone 1"), Some(&1));
        assert_eq!(translator.level_map().get("Story 1"), Some(&1));
        assert!(translator
            .warnings()
            .contains(&"Simulation results not available, using 1 scfm/ft^2 to set supply flows"));
        assert!(translator.errors().is_empty());
        Ok(())
    }

    #[test]
    fn test_systems() -> std::result::Result<(), String> {
        let model = test_models::four_space_demo()?;
        let (translator, prj) = translate(&model)?;

        let ahs = &prj.ahs[0];
        assert_eq!(ahs.name, "AHS_1");
        assert_eq!(translator.ahs_map().get("Air Loop 1"), Some(&1));

        let rec = prj.zone(ahs.zone_r).ok_or("no rec zone")?;
        let sup = prj.zone(ahs.zone_s).ok_or("no sup zone")?;
        assert_eq!(rec.name, "AHS_1(Rec)");
        assert_eq!(sup.name, "AHS_1(Sup)");
        assert!(rec.is_system());
        assert!(!sup.variable_pressure());

        let supply = translator
            .path_map()
            .get("Thermal Zone 1 supply")
            .and_then(|nr| prj.path(*nr))
            .ok_or("no supply path")?;
        assert_eq!((supply.pzn, supply.pzm), (ahs.zone_s, 1));
        assert_eq!(supply.pa, 1);
        assert!(supply.is_system());
        // 1 scfm/ft2 over 400 m2
        assert!((supply.fahs - 400. * 0.00508 * RHO_AIR).abs() < 1e-9);

        let ret = translator
            .path_map()
            .get("Thermal Zone 1 return")
            .and_then(|nr| prj.path(*nr))
            .ok_or("no return path")?;
        assert_eq!((ret.pzn, ret.pzm), (1, ahs.zone_r));
        assert!((ret.fahs - supply.fahs).abs() < 1e-12);

        let recirc = prj.path(ahs.path_r).ok_or("no recirculation")?;
        assert_eq!((recirc.pzn, recirc.pzm), (ahs.zone_r, ahs.zone_s));
        assert_eq!(recirc.flags, AirflowPath::AHS_R);
        let oa = prj.path(ahs.path_s).ok_or("no oa")?;
        assert_eq!((oa.pzn, oa.pzm), (-1, ahs.zone_s));
        let exhaust = prj.path(ahs.path_x).ok_or("no exhaust")?;
        assert_eq!((exhaust.pzn, exhaust.pzm), (ahs.zone_r, -1));
        assert_eq!(translator.path_map().get("AHS_1 exhaust"), Some(&ahs.path_x));
        assert!(prj.valid());
        Ok(())
    }

    #[test]
    fn test_no_hvac() -> std::result::Result<(), String> {
        let model = test_models::four_space_demo()?;
        let mut translator = ForwardTranslator::new();
        translator.set_translate_hvac(false);
        let prj = translator
            .translate_model(&model, None)
            .map_err(|e| e.to_string())?;
        assert_eq!(prj.zones.len(), 1);
        assert!(prj.ahs.is_empty());
        assert_eq!(prj.airflow_paths.len(), 12);
        assert!(translator.warnings().is_empty());
        Ok(())
    }

    #[test]
    fn test_interior_paths() -> std::result::Result<(), String> {
        let model = test_models::two_story_demo()?;
        let (mut translator, prj) = translate(&model)?;
        assert_eq!(prj.levels.len(), 2);
        assert_eq!(prj.wind_h, 6.);
        assert_eq!(prj.levels[1].refht, 3.);

        // Zone 3 is upstairs
        assert_eq!(prj.zone(3).map(|z| z.pl), Some(2));

        let interior: Vec<&AirflowPath> = prj
            .airflow_paths
            .iter()
            .filter(|p| p.pzn > 0 && p.pzm > 0 && p.flags == 0)
            .collect();
        assert_eq!(interior.len(), 4);
        let elements = apply_level_logged(&prj, AirtightnessLevel::Average, &mut LogSink::default())
            .map_err(|e| e.to_string())?;
        let floors = interior.iter().filter(|p| p.pe == elements.floor).count();
        assert_eq!(floors, 2);
        let walls = interior.iter().filter(|p| p.pe == elements.interior).count();
        assert_eq!(walls, 2);
        for p in interior {
            assert!((p.mult - if p.pe == elements.floor { 100. } else { 30. }).abs() < 1e-6);
        }

        // Upper roofs are 3 m above their level
        let roof_nr = *translator
            .surface_map()
            .get("Space 3 Roof")
            .ok_or("no roof path")?;
        let roof = prj.path(roof_nr).ok_or("no roof")?;
        assert!((roof.rel_ht - 3.).abs() < 1e-6);
        assert_eq!(roof.pld, 2);
        assert_eq!(translator.surface_of_path(roof_nr), Some("Space 3 Roof".to_string()));
        Ok(())
    }

    #[test]
    fn test_flow_rate() -> std::result::Result<(), String> {
        let model = test_models::four_space_demo()?;
        let mut translator = ForwardTranslator::new();
        assert!(translator.set_exterior_flow_rate(8., 0.6, 50.));
        let prj = translator
            .translate_model(&model, None)
            .map_err(|e| e.to_string())?;
        let custom = prj
            .airflow_element_nr_by_name("CustomExterior")
            .ok_or("no custom element")?;
        assert_eq!(prj.airflow_elements.len(), 16);
        assert!(prj
            .airflow_paths
            .iter()
            .filter(|p| p.pw == 4)
            .all(|p| p.pe == custom));
        Ok(())
    }

    #[test]
    fn test_story_errors() -> std::result::Result<(), String> {
        let mut model = test_models::four_space_demo()?;
        model.add_building_story(BuildingStory::new("Attic"));
        let mut translator = ForwardTranslator::new();
        let r = translator.translate_model(&model, None);
        assert!(matches!(
            r,
            Err(TranslationError::MissingStoryData { field: "elevation", .. })
        ));
        assert_eq!(translator.errors(), vec!["Story 'Attic' has no elevation, translation aborted"]);

        model.building_stories.clear();
        let r = translator.translate_model(&model, None);
        assert!(matches!(r, Err(TranslationError::NoLevels)));
        // Errors are forgotten between translations
        assert_eq!(translator.errors().len(), 1);
        Ok(())
    }

    #[test]
    fn test_zone_without_level() -> std::result::Result<(), String> {
        let mut model = test_models::four_space_demo()?;
        for s in model.spaces.iter_mut() {
            std::sync::Arc::make_mut(s).building_story = None;
        }
        let mut translator = ForwardTranslator::new();
        let r = translator.translate_model(&model, None);
        assert!(matches!(r, Err(TranslationError::ZoneWithoutLevel(ref z)) if z == "Thermal Zone 1"));
        Ok(())
    }

    #[test]
    fn test_run_period() -> std::result::Result<(), String> {
        let mut model = test_models::four_space_demo()?;
        model.run_period = Some(RunPeriod {
            begin_month: 3,
            begin_day: 5,
            end_month: 4,
            end_day: 30,
        });
        let (translator, prj) = translate(&model)?;
        assert_eq!(prj.rc.date_0, "Mar05");
        assert_eq!(prj.rc.date_1, "Apr30");
        assert_eq!(translator.start_date().map(|d| (d.month, d.day)), Some((3, 5)));

        // Hourly values still start on January 1st
        let mut results = SimulationResults::default();
        results.add_time_series(
            ZONE_TEMPERATURE,
            "THERMAL ZONE 1",
            TimeSeries::new("C", vec![21.; 8760]),
        );
        let mut translator = ForwardTranslator::new();
        translator
            .translate_model(&model, Some(&results))
            .map_err(|e| e.to_string())?;
        let path = std::env::temp_dir().join("airnet_test_run_period.cvf");
        translator.write_cv_file(&path).map_err(|e| e.to_string())?;
        let cvf = std::fs::read_to_string(&path).map_err(|e| e.to_string())?;
        let lines: Vec<&str> = cvf.lines().collect();
        assert_eq!(lines[2], "1/1\t12/31");
        assert_eq!(lines[5], "01/01\t00:00:00\t294.15");
        assert_eq!(lines.len(), 4 + 1 + 1 + 8760);
        assert_eq!(*lines.last().ok_or("no lines")?, "12/31\t24:00:00\t294.15");

        model.run_period = None;
        let (translator, prj) = translate(&model)?;
        assert_eq!(prj.rc.sim_af, 0);
        assert!(translator.end_date().is_none());
        Ok(())
    }

    #[test]
    fn test_results() -> std::result::Result<(), String> {
        let model = test_models::four_space_demo()?;
        let mut results = SimulationResults::default();
        results.add_time_series(
            ZONE_TEMPERATURE,
            "THERMAL ZONE 1",
            TimeSeries::new("C", vec![21.; 8760]),
        );
        results.add_time_series(
            NODE_MASS_FLOW,
            "THERMAL ZONE 1 SUPPLY INLET",
            TimeSeries::new("kg/s", vec![1.; 8760]),
        );
        results.add_time_series(
            NODE_MASS_FLOW,
            "THERMAL ZONE 1 RETURN OUTLET",
            TimeSeries::new("kg/s", vec![0.8; 8760]),
        );

        let mut translator = ForwardTranslator::new();
        let prj = translator
            .translate_model(&model, Some(&results))
            .map_err(|e| e.to_string())?;
        assert_eq!(prj.control_nodes.len(), 3);
        assert_eq!(prj.control_nodes[0].name, "ctrl_z_1");
        assert_eq!(prj.control_nodes[0].value_name, "temp_1");
        assert_eq!(prj.zone(1).map(|z| z.pc), Some(1));

        let supply_nr = *translator
            .path_map()
            .get("Thermal Zone 1 supply")
            .ok_or("no supply")?;
        let supply = prj.path(supply_nr).ok_or("no supply path")?;
        assert_eq!(supply.pc, 2);
        assert_eq!(supply.fahs, 0.);
        assert_eq!(prj.control_nodes[1].value_name, format!("supply_{}", supply_nr));
        assert!(translator
            .warnings()
            .contains(&"Zone equipment not yet accounted for."));

        // The return is scaled from the supply
        translator.set_ratio_override(true);
        translator.set_return_supply_ratio(0.5);
        let prj = translator
            .translate_model(&model, Some(&results))
            .map_err(|e| e.to_string())?;
        assert_eq!(prj.control_nodes.len(), 3);
        assert!(prj.control_nodes[2].value_name.starts_with("return_"));

        let path = std::env::temp_dir().join("airnet_test_results.cvf");
        translator.write_cv_file(&path).map_err(|e| e.to_string())?;
        let cvf = std::fs::read_to_string(&path).map_err(|e| e.to_string())?;
        let first = cvf.lines().nth(7).ok_or("no first row")?;
        // temperature in K, supply, and half the supply as return
        assert_eq!(first, "01/01\t00:00:00\t294.15\t1\t0.5");
        Ok(())
    }

    #[test]
    fn test_missing_results() -> std::result::Result<(), String> {
        let model = test_models::four_space_demo()?;
        let results = SimulationResults::default();
        let mut translator = ForwardTranslator::new();
        let prj = translator
            .translate_model(&model, Some(&results))
            .map_err(|e| e.to_string())?;
        assert!(prj.control_nodes.is_empty());
        assert_eq!(translator.warnings().len(), 2);
        assert!(matches!(
            translator.write_cv_file("nothing.cvf"),
            Err(TranslationError::NoTimeSeries)
        ));
        Ok(())
    }

    #[test]
    fn test_unused_air_loop() -> std::result::Result<(), String> {
        let mut model = test_models::four_space_demo()?;
        model.air_loops.clear();
        model.add_air_loop(AirLoop::new("Empty Loop"));
        let mut served = AirLoop::new("Served Loop");
        served.add_thermal_zone("Thermal Zone 1");
        served.add_thermal_zone("Ghost Zone");
        model.add_air_loop(served);

        let (translator, prj) = translate(&model)?;
        assert_eq!(prj.ahs.len(), 1);
        assert_eq!(translator.ahs_map().get("Served Loop"), Some(&1));
        assert!(translator
            .warnings()
            .contains(&"Unable to look up 'Ghost Zone' in zoneMap"));
        Ok(())
    }

    #[test]
    fn test_model_to_prj() -> std::result::Result<(), String> {
        let model = test_models::four_zone_demo()?;
        let path = std::env::temp_dir().join("airnet_test_four_zones.prj");
        model_to_prj(&model, &path, false, AirtightnessLevel::Tight).map_err(|e| e.to_string())?;
        let prj = std::fs::read_to_string(&path).map_err(|e| e.to_string())?;
        assert!(prj.contains("4 ! zones"));
        // 12 exterior and 4 interior surfaces
        assert!(prj.contains("16 ! flow paths"));
        Ok(())
    }
}
