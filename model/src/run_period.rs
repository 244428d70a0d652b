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

/// The period of the year covered by a simulation
///
/// ```
/// use model::RunPeriod;
///
/// let p: RunPeriod = json5::from_str("{
///     begin_month: 1, begin_day: 1,
///     end_month: 12, end_day: 31,
/// }").unwrap();
/// assert!(p.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RunPeriod {
    /// Month in which the run period begins (January is 1)
    pub begin_month: u8,
    /// Day of the month in which the run period begins
    pub begin_day: u8,
    /// Month in which the run period ends
    pub end_month: u8,
    /// Day of the month in which the run period ends
    pub end_day: u8,
}

impl std::default::Default for RunPeriod {
    fn default() -> Self {
        Self {
            begin_month: 1,
            begin_day: 1,
            end_month: 12,
            end_day: 31,
        }
    }
}

impl RunPeriod {
    /// Checks that both ends of the period are real days of a non-leap year
    pub fn validate(&self) -> Result<(), String> {
        const DAYS: [u8; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
        for (m, d) in [
            (self.begin_month, self.begin_day),
            (self.end_month, self.end_day),
        ] {
            if !(1..=12).contains(&m) {
                return Err(format!("Run period month '{}' is out of range", m));
            }
            if d == 0 || d > DAYS[m as usize - 1] {
                return Err(format!("Run period day '{}' does not exist in month {}", d, m));
            }
        }
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
    fn test_run_period() {
        assert!(RunPeriod::default().validate().is_ok());
        let p = RunPeriod {
            begin_month: 2,
            begin_day: 29,
            end_month: 3,
            end_day: 1,
        };
        assert!(p.validate().is_err());
        let p = RunPeriod {
            begin_month: 13,
            ..RunPeriod::default()
        };
        assert!(p.validate().is_err());
    }
}
