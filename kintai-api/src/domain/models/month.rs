use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A calendar month, keyed as year + month.
///
/// Month-scoped store queries use the half-open range
/// `[first_day(), next().first_day())`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// Create a year-month. Returns None for months outside 1..=12.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if (1..=12).contains(&month) {
            Some(Self { year, month })
        } else {
            None
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn from_date(date: NaiveDate) -> Self {
        use chrono::Datelike;
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn first_day(&self) -> NaiveDate {
        // Valid by construction: day 1 exists in every month.
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap()
    }

    /// The following month, rolling December into January.
    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.first_day() && date < self.next().first_day()
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| format!("invalid year-month: {}", s))?;
        let year: i32 = year
            .parse()
            .map_err(|_| format!("invalid year in year-month: {}", s))?;
        let month: u32 = month
            .parse()
            .map_err(|_| format!("invalid month in year-month: {}", s))?;
        Self::new(year, month).ok_or_else(|| format!("month out of range: {}", s))
    }
}

impl Serialize for YearMonth {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for YearMonth {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_year_month() {
        let ym: YearMonth = "2025-07".parse().unwrap();
        assert_eq!(ym.year(), 2025);
        assert_eq!(ym.month(), 7);
        assert_eq!(ym.to_string(), "2025-07");
    }

    #[test]
    fn rejects_out_of_range_months() {
        assert!("2025-00".parse::<YearMonth>().is_err());
        assert!("2025-13".parse::<YearMonth>().is_err());
        assert!("july".parse::<YearMonth>().is_err());
    }

    #[test]
    fn next_rolls_over_december() {
        let december = YearMonth::new(2024, 12).unwrap();
        let january = december.next();
        assert_eq!(january.year(), 2025);
        assert_eq!(january.month(), 1);
    }

    #[test]
    fn contains_is_half_open() {
        let ym = YearMonth::new(2025, 6).unwrap();
        assert!(ym.contains(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()));
        assert!(ym.contains(NaiveDate::from_ymd_opt(2025, 6, 30).unwrap()));
        assert!(!ym.contains(NaiveDate::from_ymd_opt(2025, 7, 1).unwrap()));
        assert!(!ym.contains(NaiveDate::from_ymd_opt(2025, 5, 31).unwrap()));
    }
}
