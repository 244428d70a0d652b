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
use crate::results::{TimeSeries, HOURS_IN_YEAR};
use crate::Float;
use calendar::Date;
use std::io::Write;
use std::path::Path;

/// Offset between Celsius and Kelvin
const C_TO_K: Float = 273.15;

/// A continuous values file: hourly values that drive the control
/// nodes of a CONTAM project.
#[derive(Debug, Clone, PartialEq)]
pub struct CvFile {
    /// The first day
    pub start: Date,
    /// The last day
    pub end: Date,
    names: Vec<String>,
    series: Vec<TimeSeries>,
}

impl std::default::Default for CvFile {
    fn default() -> Self {
        Self {
            start: Date {
                month: 1,
                day: 1,
                hour: 0,
            },
            end: Date {
                month: 12,
                day: 31,
                hour: 0,
            },
            names: Vec::new(),
            series: Vec::new(),
        }
    }
}

impl CvFile {
    /// Registers a series, under the name of the control node value
    pub fn add_time_series<S: Into<String>>(&mut self, name: S, series: TimeSeries) {
        self.names.push(name.into());
        self.series.push(series);
    }

    /// The names of the registered series
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Whether there is nothing to write
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Forgets all the series and resets the dates
    pub fn clear(&mut self) {
        *self = Self::default()
    }

    fn write_values<W: Write>(&self, w: &mut W, date: Date) -> std::io::Result<()> {
        for s in self.series.iter() {
            let mut v = s.value(date).unwrap_or(0.0);
            if s.units == "C" {
                v += C_TO_K;
            }
            write!(w, "\t{}", v)?;
        }
        writeln!(w)
    }

    /// Writes the file into `w`.
    ///
    /// ```
    /// use contam::{CvFile, TimeSeries};
    ///
    /// let mut cvf = CvFile::default();
    /// cvf.add_time_series("temp_1", TimeSeries::new("C", vec![20.; 8760]));
    /// let mut buf: Vec<u8> = Vec::new();
    /// cvf.write_to(&mut buf).unwrap();
    /// let txt = String::from_utf8(buf).unwrap();
    /// let lines: Vec<&str> = txt.lines().collect();
    /// assert_eq!(lines[2], "1/1\t12/31");
    /// assert_eq!(lines[5], "01/01\t00:00:00\t293.15");
    /// assert_eq!(lines[29], "01/01\t24:00:00\t293.15");
    /// ```
    pub fn write_to<W: Write>(&self, w: &mut W) -> std::io::Result<()> {
        writeln!(w, "ContinuousValuesFile ContamW 2.1")?;
        writeln!(w, "CVF file from E+ results")?;
        writeln!(
            w,
            "{}/{}\t{}/{}",
            self.start.month, self.start.day, self.end.month, self.end.day
        )?;
        writeln!(w, "{}", self.names.len())?;
        for name in self.names.iter() {
            writeln!(w, "{}", name)?;
        }

        let mut current = Date {
            hour: 0,
            ..self.start
        };
        let to_io = |e: String| std::io::Error::new(std::io::ErrorKind::InvalidData, e);

        // The first row is at midnight, and carries the value of the first hour
        write!(w, "{}", current.cvf_stamp())?;
        self.write_values(w, current.plus_hours(1).map_err(to_io)?)?;

        let mut last = current;
        for _ in 0..HOURS_IN_YEAR {
            current.add_hours(1).map_err(to_io)?;
            if current.hour == 0 {
                write!(w, "{:02}/{:02}\t24:00:00", last.month, last.day)?;
            } else {
                write!(w, "{}", current.cvf_stamp())?;
            }
            last = current;
            self.write_values(w, current)?;
        }
        Ok(())
    }

    /// Writes the file. Fails if there are no series.
    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        if self.is_empty() {
            return Err(TranslationError::NoTimeSeries);
        }
        let file = std::fs::File::create(path)?;
        let mut w = std::io::BufWriter::new(file);
        self.write_to(&mut w)?;
        w.flush()?;
        Ok(())
    }
}

/***********/
/* TESTING */
/***********/

#[cfg(test)]
mod testing {
    use super::*;

    #[test]
    fn test_write() -> std::result::Result<(), String> {
        let mut cvf = CvFile::default();
        assert!(cvf.is_empty());
        let values: Vec<Float> = (0..HOURS_IN_YEAR).map(|x| x as Float).collect();
        cvf.add_time_series("supply_1", TimeSeries::new("kg/s", values));
        cvf.add_time_series("temp_1", TimeSeries::new("C", vec![0.; HOURS_IN_YEAR]));
        assert_eq!(cvf.names(), &["supply_1".to_string(), "temp_1".to_string()]);

        let mut buf: Vec<u8> = Vec::new();
        cvf.write_to(&mut buf).map_err(|e| e.to_string())?;
        let txt = String::from_utf8(buf).map_err(|e| e.to_string())?;
        let lines: Vec<&str> = txt.lines().collect();

        // 4 header lines, 2 names, the first row and 8760 rows
        assert_eq!(lines.len(), 4 + 2 + 1 + HOURS_IN_YEAR);
        assert_eq!(lines[3], "2");
        assert_eq!(lines[4], "supply_1");
        assert_eq!(lines[6], "01/01\t00:00:00\t0\t273.15");
        assert_eq!(lines[7], "01/01\t01:00:00\t0\t273.15");
        assert_eq!(lines[8], "01/01\t02:00:00\t1\t273.15");
        assert_eq!(lines[30], "01/01\t24:00:00\t23\t273.15");
        assert_eq!(lines[31], "01/02\t01:00:00\t24\t273.15");
        assert_eq!(*lines.last().ok_or("no lines")?, "12/31\t24:00:00\t8759\t273.15");

        cvf.clear();
        assert!(cvf.is_empty());
        assert!(matches!(cvf.write("never.cvf"), Err(TranslationError::NoTimeSeries)));
        Ok(())
    }
}
