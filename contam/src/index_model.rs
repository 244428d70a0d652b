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

use crate::error::Result;
use crate::leakage::{power_law_element, AirtightnessLevel};
use crate::Float;
use serde::{Deserialize, Serialize};

/// Marks the end of each section of a project file
const SECTION_END: &str = "-999";

/// A level (i.e., a story) in the project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    /// The number of the level, starting from 1
    pub nr: i32,
    /// Elevation of the floor, in m
    pub refht: Float,
    /// Height of the level, in m
    pub delht: Float,
    /// The name of the level
    pub name: String,
}

impl Level {
    fn write(&self) -> String {
        format!("{} {} {} 0 0 0 {}\n", self.nr, self.refht, self.delht, self.name)
    }
}

/// A zone (i.e., a node) of the airflow network
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    /// The number of the zone, starting from 1
    pub nr: i32,
    /// A combination of [`Zone::VAR_P`], [`Zone::VAR_C`], [`Zone::VAR_T`] and [`Zone::SYS_N`]
    pub flags: u32,
    /// The control node setting the temperature, or 0
    pub pc: i32,
    /// The level in which the zone is
    pub pl: i32,
    /// The volume, in m3
    pub vol: Float,
    /// The initial temperature, in K
    pub t0: Float,
    /// The name of the zone
    pub name: String,
}

impl std::default::Default for Zone {
    fn default() -> Self {
        Self {
            nr: 0,
            flags: 0,
            pc: 0,
            pl: 0,
            vol: 0.0,
            t0: 293.15,
            name: String::new(),
        }
    }
}

impl Zone {
    /// Variable pressure
    pub const VAR_P: u32 = 0x1;
    /// Variable contaminants
    pub const VAR_C: u32 = 0x2;
    /// Variable temperature
    pub const VAR_T: u32 = 0x4;
    /// Part of an air handling system
    pub const SYS_N: u32 = 0x8;

    /// Whether the zone has variable pressure
    pub fn variable_pressure(&self) -> bool {
        self.flags & Self::VAR_P != 0
    }

    /// Whether the zone has variable contaminants
    pub fn variable_contaminants(&self) -> bool {
        self.flags & Self::VAR_C != 0
    }

    /// Whether the zone is part of an air handling system
    pub fn is_system(&self) -> bool {
        self.flags & Self::SYS_N != 0
    }

    fn write(&self) -> String {
        // nr flags ps pc pk pl relHt Vol T0 P0 name color u_Ht u_V u_T u_P cdaxis cfd
        format!(
            "{} {} 0 {} 0 {} 0 {} {} 0 {} -1 0 0 0 0 0 0\n",
            self.nr, self.flags, self.pc, self.pl, self.vol, self.t0, self.name
        )
    }
}

/// A path through which air can flow between two zones, or between a zone
/// and the outside (i.e., zone `-1`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirflowPath {
    /// The number of the path, starting from 1
    pub nr: i32,
    /// A combination of [`AirflowPath::WIND`], [`AirflowPath::AHS_S`],
    /// [`AirflowPath::AHS_R`], [`AirflowPath::AHS_O`] and [`AirflowPath::AHS_X`]
    pub flags: u32,
    /// The zone from which air flows (for positive flows)
    pub pzn: i32,
    /// The zone to which air flows (for positive flows)
    pub pzm: i32,
    /// The airflow element
    pub pe: i32,
    /// The wind pressure profile
    pub pw: i32,
    /// The air handling system
    pub pa: i32,
    /// The control node setting the flow, or 0
    pub pc: i32,
    /// The level
    pub pld: i32,
    /// Height relative to the level, in m
    pub rel_ht: Float,
    /// Multiplier of the element (e.g., the area of a wall)
    pub mult: Float,
    /// Wind pressure modifier
    pub w_pmod: Float,
    /// Azimuth of the surface, in degrees
    pub wazm: Float,
    /// Design flow of an air handling system path, in kg/s
    pub fahs: Float,
}

impl std::default::Default for AirflowPath {
    fn default() -> Self {
        Self {
            nr: 0,
            flags: 0,
            pzn: 0,
            pzm: 0,
            pe: 0,
            pw: 0,
            pa: 0,
            pc: 0,
            pld: 0,
            rel_ht: 0.0,
            mult: 1.0,
            w_pmod: 0.0,
            wazm: 0.0,
            fahs: 0.0,
        }
    }
}

impl AirflowPath {
    /// Wind pressure acts on this path
    pub const WIND: u32 = 0x01;
    /// Supply or return of an air handling system
    pub const AHS_S: u32 = 0x08;
    /// Recirculation of an air handling system
    pub const AHS_R: u32 = 0x10;
    /// Outside air intake of an air handling system
    pub const AHS_O: u32 = 0x20;
    /// Exhaust of an air handling system
    pub const AHS_X: u32 = 0x40;

    /// Whether wind pressure acts on this path
    pub fn wind_pressure(&self) -> bool {
        self.flags & Self::WIND != 0
    }

    /// Whether this is a supply or return path
    pub fn is_system(&self) -> bool {
        self.flags & Self::AHS_S != 0
    }

    /// Whether this path leads to or from the outside
    pub fn is_exterior(&self) -> bool {
        self.pzn == -1 || self.pzm == -1
    }

    fn write(&self) -> String {
        // nr flags pzn pzm pe pf pw pa ps pc pld X Y relHt mult wPset wPmod wazm Fahs Xmax Xmin icon dir u_Ht u_XY u_dP u_F cfd
        format!(
            "{} {} {} {} {} 0 {} {} 0 {} {} 0 0 {} {} 0 {} {} {} 0 0 0 0 0 0 0 0 0\n",
            self.nr,
            self.flags,
            self.pzn,
            self.pzm,
            self.pe,
            self.pw,
            self.pa,
            self.pc,
            self.pld,
            self.rel_ht,
            self.mult,
            self.w_pmod,
            self.wazm,
            self.fahs
        )
    }
}

/// An air handling system
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ahs {
    /// The number of the system, starting from 1
    pub nr: i32,
    /// The return (recirculation) zone
    pub zone_r: i32,
    /// The supply zone
    pub zone_s: i32,
    /// The recirculation path
    pub path_r: i32,
    /// The outside air path
    pub path_s: i32,
    /// The exhaust path
    pub path_x: i32,
    /// The name of the system
    pub name: String,
    /// A description
    #[serde(default)]
    pub desc: String,
}

impl Ahs {
    fn write(&self) -> String {
        format!(
            "{} {} {} {} {} {} {}\n{}\n",
            self.nr, self.zone_r, self.zone_s, self.path_r, self.path_s, self.path_x, self.name, self.desc
        )
    }
}

/// Describes how air flows through a path as a function of the
/// pressure difference across it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AirflowElement {
    /// A power law element defined by one test point: `F = C dP^n`
    PowerLaw {
        /// The number of the element, starting from 1
        nr: i32,
        /// The name of the element
        name: String,
        /// A description
        desc: String,
        /// Laminar flow coefficient
        lam: Float,
        /// Turbulent flow coefficient
        turb: Float,
        /// Exponent
        expt: Float,
        /// Pressure difference of the test point, in Pa
        dp: Float,
        /// Mass flow of the test point, in kg/s
        flow: Float,
        /// Display units of the pressure
        u_p: i32,
        /// Display units of the flow
        u_f: i32,
    },
}

impl AirflowElement {
    /// The number of the element
    pub fn nr(&self) -> i32 {
        match self {
            Self::PowerLaw { nr, .. } => *nr,
        }
    }

    /// The name of the element
    pub fn name(&self) -> &str {
        match self {
            Self::PowerLaw { name, .. } => name,
        }
    }

    fn set_nr(&mut self, new_nr: i32) {
        match self {
            Self::PowerLaw { nr, .. } => *nr = new_nr,
        }
    }

    fn write(&self) -> String {
        match self {
            Self::PowerLaw {
                nr,
                name,
                desc,
                lam,
                turb,
                expt,
                dp,
                flow,
                u_p,
                u_f,
            } => format!(
                "{} 0 plr_test1 {}\n{}\n{} {} {} {} {} {} {}\n",
                nr, name, desc, lam, turb, expt, dp, flow, u_p, u_f
            ),
        }
    }
}

/// Pressure coefficients as a function of the wind direction relative
/// to the surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindPressureProfile {
    /// The number of the profile, starting from 1
    pub nr: i32,
    /// The name of the profile
    pub name: String,
    /// A description
    pub desc: String,
    /// Pairs of relative azimuth (degrees) and pressure coefficient
    pub coefficients: Vec<(Float, Float)>,
}

impl WindPressureProfile {
    fn new(nr: i32, name: &str, desc: &str, cp: [Float; 5]) -> Self {
        // Symmetric around the normal of the surface
        let coefficients = [0., 45., 90., 135., 180., 225., 270., 315.]
            .iter()
            .zip([cp[0], cp[1], cp[2], cp[3], cp[4], cp[3], cp[2], cp[1]])
            .map(|(a, c)| (*a, c))
            .collect();
        Self {
            nr,
            name: name.to_string(),
            desc: desc.to_string(),
            coefficients,
        }
    }

    fn write(&self) -> String {
        let mut ret = format!(
            "{} {} 2 {}\n{}\n",
            self.nr,
            self.coefficients.len(),
            self.name,
            self.desc
        );
        for (az, cp) in self.coefficients.iter() {
            ret += &format!("{} {}\n", az, cp);
        }
        ret
    }
}

/// A control node whose values are read from a continuous values file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ControlNode {
    /// The number of the node, starting from 1
    pub nr: i32,
    /// The name of the node
    pub name: String,
    /// The name of the column in the continuous values file
    pub value_name: String,
}

impl ControlNode {
    /// Creates a node, to be numbered when added to an [`IndexModel`]
    pub fn new<S: Into<String>, T: Into<String>>(name: S, value_name: T) -> Self {
        Self {
            nr: 0,
            name: name.into(),
            value_name: value_name.into(),
        }
    }

    fn write(&self) -> String {
        format!("{} cdv\n0 0 0 0 0 {}\n\n{}\n", self.nr, self.name, self.value_name)
    }
}

/// What to simulate, and when
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunControl {
    /// 0 for steady state airflow, 1 for transient
    pub sim_af: i32,
    /// Start day (e.g., `Jan01`)
    pub date_0: String,
    /// Start time
    pub time_0: String,
    /// End day
    pub date_1: String,
    /// End time
    pub time_1: String,
}

impl std::default::Default for RunControl {
    fn default() -> Self {
        Self {
            sim_af: 0,
            date_0: "Jan01".to_string(),
            time_0: "00:00:00".to_string(),
            date_1: "Jan01".to_string(),
            time_1: "24:00:00".to_string(),
        }
    }
}

/// The data of a CONTAM project, with objects referencing each
/// other through their numbers
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexModel {
    /// Description of the project
    pub desc: String,
    /// Height of the building, used to scale the wind speed
    pub wind_h: Float,
    /// Simulation control
    pub rc: RunControl,
    /// The levels
    pub levels: Vec<Level>,
    /// The airflow elements
    pub airflow_elements: Vec<AirflowElement>,
    /// The wind pressure profiles
    pub wind_pressure_profiles: Vec<WindPressureProfile>,
    /// The control nodes
    pub control_nodes: Vec<ControlNode>,
    /// The air handling systems
    pub ahs: Vec<Ahs>,
    /// The zones
    pub zones: Vec<Zone>,
    /// The airflow paths
    pub airflow_paths: Vec<AirflowPath>,
}

impl IndexModel {
    /// The starting point of every translation: a project with one level,
    /// a library of leakage elements (`ExtWall`, `IntWall`, `Floor` and `Roof`,
    /// each of them `Leaky`, `Avg` and `Tight`) and five wind pressure profiles.
    /// Profiles 4 and 5 are for the walls and roofs of low-rise buildings.
    ///
    /// ```
    /// use contam::IndexModel;
    ///
    /// let t = IndexModel::template();
    /// assert_eq!(t.levels.len(), 1);
    /// assert_eq!(t.airflow_elements.len(), 12);
    /// assert_eq!(t.wind_pressure_profiles.len(), 5);
    /// assert!(t.airflow_element_nr_by_name("IntWallTight").is_some());
    /// ```
    pub fn template() -> Self {
        let mut ret = Self {
            desc: "Template".to_string(),
            wind_h: 3.0,
            ..Self::default()
        };
        ret.add_level(Level {
            nr: 0,
            refht: 0.0,
            delht: 3.0,
            name: "<1>".to_string(),
        });

        let levels = [
            AirtightnessLevel::Leaky,
            AirtightnessLevel::Average,
            AirtightnessLevel::Tight,
        ];
        // Interior partitions and floors are twice as leaky as the envelope
        for (prefix, factor) in [("ExtWall", 1.), ("IntWall", 2.), ("Floor", 2.), ("Roof", 1.)] {
            for level in levels.iter() {
                let name = format!("{}{}", prefix, level.element_suffix());
                let mut e = power_law_element(name, factor * level.exterior_flow(), 0.65, 75.);
                if let AirflowElement::PowerLaw { desc, .. } = &mut e {
                    *desc = format!("{} {}, per m2", level.name(), prefix);
                }
                ret.add_airflow_element(e);
            }
        }

        let profiles = [
            ("HighRiseLW1", "High-rise wall, L/W = 1", [0.60, 0.40, -0.55, -0.45, -0.30]),
            ("HighRiseLW1/4", "High-rise wide wall, L/W = 1/4", [0.60, 0.30, -0.70, -0.45, -0.25]),
            ("HighRiseLW4", "High-rise narrow wall, L/W = 4", [0.60, 0.50, -0.35, -0.35, -0.30]),
            ("LowRiseWall", "Low-rise wall", [0.70, 0.35, -0.50, -0.40, -0.20]),
            ("LowRiseRoof", "Low-rise flat roof", [-0.80, -0.70, -0.60, -0.55, -0.50]),
        ];
        for (i, (name, desc, cp)) in profiles.iter().enumerate() {
            ret.wind_pressure_profiles
                .push(WindPressureProfile::new(i as i32 + 1, name, desc, *cp));
        }
        ret
    }

    /// Checks that the objects are numbered sequentially from 1 and that
    /// there is at least one level
    pub fn valid(&self) -> bool {
        fn sequential<I: Iterator<Item = i32>>(nrs: I) -> bool {
            nrs.enumerate().all(|(i, nr)| nr == i as i32 + 1)
        }
        !self.levels.is_empty()
            && sequential(self.levels.iter().map(|x| x.nr))
            && sequential(self.zones.iter().map(|x| x.nr))
            && sequential(self.airflow_paths.iter().map(|x| x.nr))
            && sequential(self.airflow_elements.iter().map(|x| x.nr()))
            && sequential(self.wind_pressure_profiles.iter().map(|x| x.nr))
            && sequential(self.control_nodes.iter().map(|x| x.nr))
            && sequential(self.ahs.iter().map(|x| x.nr))
    }

    /// Adds a [`Level`], setting and returning its number
    pub fn add_level(&mut self, mut level: Level) -> i32 {
        level.nr = self.levels.len() as i32 + 1;
        self.levels.push(level);
        self.levels.len() as i32
    }

    /// Adds a [`Zone`], setting and returning its number
    pub fn add_zone(&mut self, mut zone: Zone) -> i32 {
        zone.nr = self.zones.len() as i32 + 1;
        self.zones.push(zone);
        self.zones.len() as i32
    }

    /// Adds an [`AirflowPath`], setting and returning its number
    pub fn add_path(&mut self, mut path: AirflowPath) -> i32 {
        path.nr = self.airflow_paths.len() as i32 + 1;
        self.airflow_paths.push(path);
        self.airflow_paths.len() as i32
    }

    /// Adds an [`Ahs`], setting and returning its number
    pub fn add_ahs(&mut self, mut ahs: Ahs) -> i32 {
        ahs.nr = self.ahs.len() as i32 + 1;
        self.ahs.push(ahs);
        self.ahs.len() as i32
    }

    /// Adds an [`AirflowElement`], setting and returning its number
    pub fn add_airflow_element(&mut self, mut element: AirflowElement) -> i32 {
        element.set_nr(self.airflow_elements.len() as i32 + 1);
        self.airflow_elements.push(element);
        self.airflow_elements.len() as i32
    }

    /// Adds a [`ControlNode`], setting and returning its number
    pub fn add_control_node(&mut self, mut node: ControlNode) -> i32 {
        node.nr = self.control_nodes.len() as i32 + 1;
        self.control_nodes.push(node);
        self.control_nodes.len() as i32
    }

    /// The number of the airflow element called `name`
    pub fn airflow_element_nr_by_name(&self, name: &str) -> Option<i32> {
        self.airflow_elements
            .iter()
            .find(|e| e.name() == name)
            .map(|e| e.nr())
    }

    fn index(nr: i32, len: usize) -> Option<usize> {
        if nr < 1 || nr as usize > len {
            None
        } else {
            Some(nr as usize - 1)
        }
    }

    /// Borrows the zone number `nr`
    pub fn zone(&self, nr: i32) -> Option<&Zone> {
        Self::index(nr, self.zones.len()).map(|i| &self.zones[i])
    }

    /// Borrows the zone number `nr` mutably
    pub fn zone_mut(&mut self, nr: i32) -> Option<&mut Zone> {
        Self::index(nr, self.zones.len()).map(move |i| &mut self.zones[i])
    }

    /// Borrows the path number `nr`
    pub fn path(&self, nr: i32) -> Option<&AirflowPath> {
        Self::index(nr, self.airflow_paths.len()).map(|i| &self.airflow_paths[i])
    }

    /// Borrows the path number `nr` mutably
    pub fn path_mut(&mut self, nr: i32) -> Option<&mut AirflowPath> {
        Self::index(nr, self.airflow_paths.len()).map(move |i| &mut self.airflow_paths[i])
    }

    /// Borrows the level number `nr`
    pub fn level(&self, nr: i32) -> Option<&Level> {
        Self::index(nr, self.levels.len()).map(|i| &self.levels[i])
    }

    /// Renders the project as text. Each section starts with the number of
    /// records in it and ends with `-999`.
    pub fn to_prj_string(&self) -> String {
        self.to_string()
    }

    /// Serializes the project as JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reads a project from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

fn write_section<T, F: Fn(&T) -> String>(
    f: &mut std::fmt::Formatter<'_>,
    title: &str,
    items: &[T],
    record: F,
) -> std::fmt::Result {
    writeln!(f, "{} ! {}", items.len(), title)?;
    for i in items {
        write!(f, "{}", record(i))?;
    }
    writeln!(f, "{}", SECTION_END)
}

impl std::fmt::Display for IndexModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "ContamW 3.4 0")?;
        writeln!(f, "{}", self.desc)?;
        writeln!(f, "{} ! wind_H", self.wind_h)?;
        writeln!(
            f,
            "{} {} {} {} {} ! sim_af date_0 time_0 date_1 time_1",
            self.rc.sim_af, self.rc.date_0, self.rc.time_0, self.rc.date_1, self.rc.time_1
        )?;

        write_section(f, "levels", &self.levels, Level::write)?;
        write_section(f, "wind pressure profiles", &self.wind_pressure_profiles, WindPressureProfile::write)?;
        write_section(f, "flow elements", &self.airflow_elements, AirflowElement::write)?;
        write_section(f, "control nodes", &self.control_nodes, ControlNode::write)?;
        write_section(f, "simple AHS", &self.ahs, Ahs::write)?;
        write_section(f, "zones", &self.zones, Zone::write)?;
        write_section(f, "flow paths", &self.airflow_paths, AirflowPath::write)?;
        writeln!(f, "* end project file.")
    }
}

/***********/
/* TESTING */
/***********/
