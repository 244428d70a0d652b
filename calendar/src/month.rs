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

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The months of a (non-leap) year
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum MonthOfYear {
    /// January
    Jan = 1,
    /// February
    Feb,
    /// March
    Mar,
    /// April
    Apr,
    /// May
    May,
    /// June
    Jun,
    /// July
    Jul,
    /// August
    Aug,
    /// September
    Sep,
    /// October
    Oct,
    /// November
    Nov,
    /// December
    Dec,
}

const ALL_MONTHS: [MonthOfYear; 12] = [
    MonthOfYear::Jan,
    MonthOfYear::Feb,
    MonthOfYear::Mar,
    MonthOfYear::Apr,
    MonthOfYear::May,
    MonthOfYear::Jun,
    MonthOfYear::Jul,
    MonthOfYear::Aug,
    MonthOfYear::Sep,
    MonthOfYear::Oct,
    MonthOfYear::Nov,
    MonthOfYear::Dec,
];

impl std::fmt::Display for MonthOfYear {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl MonthOfYear {
    /// Gets a month from its number (January is 1)
    pub fn from_number(month: u8) -> Result<Self, String> {
        if !(1..=12).contains(&month) {
            return Err(format!("Month number '{}' is out of range", month));
        }
        Ok(ALL_MONTHS[month as usize - 1])
    }

    /// The number of the month (January is 1)
    pub fn number(&self) -> u8 {
        *self as u8
    }

    /// Three-letter name (e.g., `Jan`)
    pub fn name(&self) -> &'static str {
        match self {
            Self::Jan => "Jan",
            Self::Feb => "Feb",
            Self::Mar => "Mar",
            Self::Apr => "Apr",
            Self::May => "May",
            Self::Jun => "Jun",
            Self::Jul => "Jul",
            Self::Aug => "Aug",
            Self::Sep => "Sep",
            Self::Oct => "Oct",
            Self::Nov => "Nov",
            Self::Dec => "Dec",
        }
    }

    /// Number of days of the month
    pub fn days_in_month(&self) -> u8 {
        match self {
            Self::Feb => 28,
            Self::Apr | Self::Jun | Self::Sep | Self::Nov => 30,
            _ => 31,
        }
    }

    /// Number of days in the year before the first day of this month
    pub fn days_before(&self) -> u16 {
        ALL_MONTHS
            .iter()
            .take_while(|m| *m < self)
            .map(|m| m.days_in_month() as u16)
            .sum()
    }
}

/***********/
/* TESTING */
/***********/

#[cfg(test)]
mod testing {
    use super::*;

    #[test]
    fn test_days() -> Result<(), String> {
        let total: u16 = (1..=12)
            .map(|m| MonthOfYear::from_number(m).map(|m| m.days_in_month() as u16))
            .sum::<Result<u16, String>>()?;
        assert_eq!(total, 365);
        assert_eq!(MonthOfYear::Jan.days_before(), 0);
        assert_eq!(MonthOfYear::Mar.days_before(), 59);
        assert_eq!(MonthOfYear::Dec.days_before(), 334);
        Ok(())
    }

    #[test]
    fn test_names() -> Result<(), String> {
        assert_eq!(MonthOfYear::from_number(7)?.name(), "Jul");
        assert_eq!(format!("{}", MonthOfYear::Dec), "Dec");
        assert_eq!(MonthOfYear::Sep.number(), 9);
        assert!(MonthOfYear::from_number(0).is_err());
        assert!(MonthOfYear::from_number(13).is_err());
        Ok(())
    }
}
