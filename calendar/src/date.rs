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

use crate::MonthOfYear;
use std::cmp::Ordering;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An extremely simple Date object, with hourly resolution.
/// It does not consider years at all!
/// Days and Months are counted from 1
/// (e.g. January is 1, not 0)
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Date {
    /// Months of the year, from 1 to 12
    pub month: u8,

    /// Day of the month, from 1 to N
    pub day: u8,

    /// Hour of the day, from 0 to 23
    pub hour: u8,
}

impl Default for Date {
    fn default() -> Self {
        Self {
            month: 1,
            day: 1,
            hour: 0,
        }
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:02} - {:02}:00", self.month, self.day, self.hour)
    }
}

impl PartialOrd for Date {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Date {
    fn cmp(&self, other: &Self) -> Ordering {
        self.month
            .cmp(&other.month)
            .then(self.day.cmp(&other.day))
            .then(self.hour.cmp(&other.hour))
    }
}

impl Date {
    /// Creates a new [`Date`], checking that it exists.
    pub fn new(month: u8, day: u8, hour: u8) -> Result<Self, String> {
        let m = MonthOfYear::from_number(month)?;
        if day == 0 || day > m.days_in_month() {
            return Err(format!("{} does not have a day {}", m, day));
        }
        if hour > 23 {
            return Err(format!("Hour {} is out of range... expecting 0 to 23", hour));
        }
        Ok(Self { month, day, hour })
    }

    /// The [`MonthOfYear`] of this date
    pub fn month_of_year(&self) -> Result<MonthOfYear, String> {
        MonthOfYear::from_number(self.month)
    }

    /// Retrieves the day of the year corresponding
    /// to the date, starting from 0 on January 1st.
    pub fn day_of_year(&self) -> Result<u16, String> {
        let m = self.month_of_year()?;
        Ok(m.days_before() + self.day as u16 - 1)
    }

    /// The number of hours elapsed since January 1st at 00:00
    pub fn hour_of_year(&self) -> Result<usize, String> {
        Ok(self.day_of_year()? as usize * 24 + self.hour as usize)
    }

    /// Builds a date from the number of hours elapsed since January 1st
    /// at 00:00. Wraps around after 8760 hours.
    pub fn from_hour_of_year(n: usize) -> Self {
        let n = n % 8760;
        let mut day = (n / 24) as u16;
        let hour = (n % 24) as u8;
        let mut month = 1;
        while let Ok(m) = MonthOfYear::from_number(month) {
            let days = m.days_in_month() as u16;
            if day < days {
                break;
            }
            day -= days;
            month += 1;
        }
        Self {
            month,
            day: day as u8 + 1,
            hour,
        }
    }

    /// Adds (or, if negative, subtracts) a certain number of hours,
    /// rolling over days, months and years.
    pub fn add_hours(&mut self, n_hours: i64) -> Result<(), String> {
        let now = self.hour_of_year()? as i64;
        let then = (now + n_hours).rem_euclid(8760);
        *self = Self::from_hour_of_year(then as usize);
        Ok(())
    }

    /// Returns a clone with `n_hours` added
    pub fn plus_hours(&self, n_hours: i64) -> Result<Self, String> {
        let mut ret = *self;
        ret.add_hours(n_hours)?;
        Ok(ret)
    }

    /// Renders the day as a month name and a two-digit day (e.g., `Jan01`)
    pub fn prj_day(&self) -> Result<String, String> {
        let m = self.month_of_year()?;
        Ok(format!("{}{:02}", m.name(), self.day))
    }

    /// Renders the date as `MM/DD\tHH:MM:SS`
    pub fn cvf_stamp(&self) -> String {
        format!("{:02}/{:02}\t{:02}:00:00", self.month, self.day, self.hour)
    }
}

/***********/
/* TESTING */
/***********/

#[cfg(test)]
mod testing {
    use super::*;

    #[test]
    fn test_new() {
        assert!(Date::new(2, 28, 0).is_ok());
        assert!(Date::new(2, 29, 0).is_err());
        assert!(Date::new(4, 31, 0).is_err());
        assert!(Date::new(13, 1, 0).is_err());
        assert!(Date::new(1, 1, 24).is_err());
        assert!(Date::new(1, 0, 2).is_err());
    }

    #[test]
    fn test_day_of_year() -> Result<(), String> {
        assert_eq!(Date::new(1, 1, 0)?.day_of_year()?, 0);
        assert_eq!(Date::new(2, 1, 0)?.day_of_year()?, 31);
        assert_eq!(Date::new(12, 31, 23)?.day_of_year()?, 364);
        assert_eq!(Date::new(12, 31, 23)?.hour_of_year()?, 8759);
        Ok(())
    }

    #[test]
    fn test_add_hours() -> Result<(), String> {
        let mut d = Date::new(1, 31, 23)?;
        d.add_hours(1)?;
        assert_eq!(d, Date::new(2, 1, 0)?);

        // year roll-over
        let mut d = Date::new(12, 31, 22)?;
        d.add_hours(3)?;
        assert_eq!(d, Date::new(1, 1, 1)?);

        // backwards
        let mut d = Date::new(1, 1, 0)?;
        d.add_hours(-1)?;
        assert_eq!(d, Date::new(12, 31, 23)?);

        // a whole year
        let d = Date::new(6, 15, 12)?;
        assert_eq!(d.plus_hours(8760)?, d);
        Ok(())
    }

    #[test]
    fn test_round_trip_all_hours() -> Result<(), String> {
        for h in 0..8760 {
            let d = Date::from_hour_of_year(h);
            assert_eq!(d.hour_of_year()?, h);
        }
        Ok(())
    }

    #[test]
    fn test_formats() -> Result<(), String> {
        let d = Date::new(3, 5, 7)?;
        assert_eq!(d.prj_day()?, "Mar05");
        assert_eq!(d.cvf_stamp(), "03/05\t07:00:00");
        assert_eq!(format!("{}", d), "03/05 - 07:00");
        Ok(())
    }

    #[test]
    fn test_order() -> Result<(), String> {
        assert!(Date::new(1, 2, 0)? > Date::new(1, 1, 23)?);
        assert!(Date::new(2, 1, 0)? > Date::new(1, 31, 23)?);
        assert!(Date::new(2, 1, 5)? < Date::new(2, 1, 6)?);
        Ok(())
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde() -> Result<(), String> {
        let v = r#"{"month": 9,"day": 4, "hour": 21}"#;
        let d: Date = serde_json::from_str(v).map_err(|e| e.to_string())?;
        assert_eq!(d, Date::new(9, 4, 21)?);
        Ok(())
    }
}
