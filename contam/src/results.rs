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
use crate::Float;
use calendar::Date;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// The number of hours in a (non-leap) year
pub const HOURS_IN_YEAR: usize = 8760;

/// An hourly series of values, the first of which corresponds to
/// January 1st at 01:00 (i.e., the end of the first hour of the year)
///
/// ```
/// use contam::TimeSeries;
/// use calendar::Date;
///
/// let s = TimeSeries::new("C", (0..8760).map(|x| x as f64).collect());
/// // January 1st at 01:00 is the first value
/// assert_eq!(s.value(Date::new(1, 1, 1).unwrap()), Some(0.));
/// // ... and midnight is the last one
/// assert_eq!(s.value(Date::new(1, 1, 0).unwrap()), Some(8759.));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TimeSeries {
    /// The units of the values (e.g., `C` or `kg/s`)
    #[serde(default)]
    pub units: String,

    /// The values
    pub values: Vec<Float>,
}

impl TimeSeries {
    /// Creates a new [`TimeSeries`]
    pub fn new<S: Into<String>>(units: S, values: Vec<Float>) -> Self {
        Self {
            units: units.into(),
            values,
        }
    }

    /// The value at the end of the hour finishing at `date`. Dates beyond the
    /// end of a short series get its last value. Returns `None` if the series
    /// is empty or the date does not exist.
    pub fn value(&self, date: Date) -> Option<Float> {
        let last = self.values.len().checked_sub(1)?;
        let hour = date.hour_of_year().ok()?;
        let i = (hour + HOURS_IN_YEAR - 1) % HOURS_IN_YEAR;
        Some(self.values[i.min(last)])
    }

    /// A copy of this series, with all the values multiplied by `factor`
    pub fn scaled(&self, factor: Float) -> Self {
        Self {
            units: self.units.clone(),
            values: self.values.iter().map(|v| v * factor).collect(),
        }
    }

    /// The number of values
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether there are no values
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Results of an energy simulation, organized by variable name
/// (e.g., `Zone Mean Air Temperature`) and then by key (e.g., the
/// upper-cased name of a zone).
///
/// ```
/// use contam::SimulationResults;
///
/// let r = SimulationResults::from_json(r#"{
///     "env_period": "RUN PERIOD 1",
///     "series": {
///         "Zone Mean Air Temperature": {
///             "ZONE 1": { "units": "C", "values": [20, 21, 22] }
///         }
///     }
/// }"#).unwrap();
/// assert!(r.time_series("Zone Mean Air Temperature", "ZONE 1").is_some());
/// assert!(r.time_series("Zone Mean Air Temperature", "ZONE 2").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimulationResults {
    /// The environment period the results belong to
    #[serde(default)]
    pub env_period: String,

    /// Variable name -> key -> series
    #[serde(default)]
    pub series: BTreeMap<String, BTreeMap<String, TimeSeries>>,
}

impl SimulationResults {
    /// Parses results from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads results from a file. Files with a `.json` extension are
    /// parsed as JSON, and anything else as JSON5.
    pub fn from_file<P: AsRef<Path>>(filename: P) -> Result<Self> {
        let path = filename.as_ref();
        let content = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json(&content),
            _ => Ok(json5::from_str(&content)?),
        }
    }

    /// Registers a series
    pub fn add_time_series<S: Into<String>, T: Into<String>>(
        &mut self,
        variable: S,
        key: T,
        series: TimeSeries,
    ) {
        self.series
            .entry(variable.into())
            .or_default()
            .insert(key.into(), series);
    }

    /// The names of the variables with at least one series
    pub fn available_time_series(&self) -> Vec<&str> {
        self.series
            .iter()
            .filter(|(_, keys)| !keys.is_empty())
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Whether there is any series of `variable`
    pub fn has_variable(&self, variable: &str) -> bool {
        self.series
            .get(variable)
            .map(|keys| !keys.is_empty())
            .unwrap_or(false)
    }

    /// Borrows the series of `variable` for `key`
    pub fn time_series(&self, variable: &str, key: &str) -> Option<&TimeSeries> {
        self.series.get(variable)?.get(key)
    }
}

/***********/
/* TESTING */
/***********/

#[cfg(test)]
mod testing {
    use super::*;

    #[test]
    fn test_value() -> std::result::Result<(), String> {
        let s = TimeSeries::new("C", vec![1., 2., 3.]);
        assert_eq!(s.value(Date::new(1, 1, 1)?), Some(1.));
        assert_eq!(s.value(Date::new(1, 1, 3)?), Some(3.));
        // clamped
        assert_eq!(s.value(Date::new(6, 1, 12)?), Some(3.));
        assert_eq!(s.value(Date::new(1, 1, 0)?), Some(3.));

        let empty = TimeSeries::default();
        assert!(empty.is_empty());
        assert!(empty.value(Date::new(1, 1, 1)?).is_none());

        let full = TimeSeries::new("C", (0..HOURS_IN_YEAR).map(|x| x as Float).collect());
        assert_eq!(full.value(Date::new(12, 31, 23)?), Some(8758.));
        assert_eq!(full.value(Date::new(2, 1, 1)?), Some((31 * 24) as Float));
        Ok(())
    }

    #[test]
    fn test_scaled() {
        let s = TimeSeries::new("kg/s", vec![1., 2.]);
        let t = s.scaled(0.5);
        assert_eq!(t.units, "kg/s");
        assert_eq!(t.values, vec![0.5, 1.]);
        assert_eq!(s.len(), 2);
    }

    #[test]
    fn test_results() -> std::result::Result<(), String> {
        let mut r = SimulationResults::default();
        assert!(r.available_time_series().is_empty());
        r.add_time_series("System Node MassFlowRate", "NODE 1", TimeSeries::new("kg/s", vec![0.1]));
        r.series.insert("Empty".into(), BTreeMap::new());
        assert_eq!(r.available_time_series(), vec!["System Node MassFlowRate"]);
        assert!(r.has_variable("System Node MassFlowRate"));
        assert!(!r.has_variable("Empty"));

        let json = serde_json::to_string(&r).map_err(|e| e.to_string())?;
        let back = SimulationResults::from_json(&json).map_err(|e| e.to_string())?;
        assert_eq!(r, back);
        assert!(SimulationResults::from_json("{\"variables\": {}}").is_err());
        Ok(())
    }
}
