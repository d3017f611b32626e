//! Tabular (arithmetical) Islamic calendar
//!
//! Civil Hijri dates computed from a 30-year cycle of 11 leap years. Odd
//! months have 30 days, even months 29, and Dhu al-Hijjah gains a 30th day in
//! leap years. The epoch, 1 Muharram 1 AH, is 19 July 622 (proleptic
//! Gregorian).
//!
//! This is an approximation: it is not based on moon sighting and may differ
//! from local announcements by a day or two.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::NoorError;

/// Day number (counting 0001-01-01 as day 1) of 1 Muharram 1 AH
const EPOCH: i64 = 227_015;

/// Supported year range; keeps every date inside chrono's representable range
pub const MIN_YEAR: i32 = 1;
pub const MAX_YEAR: i32 = 9_666;

/// Islamic month names in English (index 0 = Muharram = month 1)
const MONTH_NAMES: [&str; 12] = [
    "Muharram",
    "Safar",
    "Rabi' al-Awwal",
    "Rabi' al-Thani",
    "Jumada al-Awwal",
    "Jumada al-Thani",
    "Rajab",
    "Sha'ban",
    "Ramadan",
    "Shawwal",
    "Dhu al-Qi'dah",
    "Dhu al-Hijjah",
];

/// A date in the tabular Hijri calendar
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct HijriDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

/// Whether `year` has 355 days
pub fn is_leap_year(year: i32) -> bool {
    (14 + 11 * i64::from(year)).rem_euclid(30) < 11
}

/// Number of days in a Hijri month
pub fn days_in_month(year: i32, month: u32) -> u32 {
    if month % 2 == 1 || (month == 12 && is_leap_year(year)) {
        30
    } else {
        29
    }
}

pub fn days_in_year(year: i32) -> u32 {
    if is_leap_year(year) {
        355
    } else {
        354
    }
}

/// English name of a Hijri month, or "Unknown" outside 1..=12
pub fn month_name(month: u32) -> &'static str {
    match month {
        1..=12 => MONTH_NAMES[(month - 1) as usize],
        _ => "Unknown",
    }
}

fn fixed_from_hijri(year: i32, month: u32, day: u32) -> i64 {
    let y = i64::from(year);
    let m = i64::from(month);
    EPOCH - 1
        + i64::from(day)
        + 29 * (m - 1)
        + (6 * m - 1).div_euclid(11)
        + (y - 1) * 354
        + (3 + 11 * y).div_euclid(30)
}

impl HijriDate {
    /// Create a date, returning `None` when any component is out of range
    pub fn new(year: i32, month: u32, day: u32) -> Option<Self> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) || !(1..=12).contains(&month) {
            return None;
        }
        if day == 0 || day > days_in_month(year, month) {
            return None;
        }
        Some(Self { year, month, day })
    }

    /// Create a date, clamping the month to 1..=12 and the day to the
    /// length of that month (day 30 of a 29-day month becomes day 29).
    pub fn clamped(year: i32, month: u32, day: u32) -> Self {
        let year = year.clamp(MIN_YEAR, MAX_YEAR);
        let month = month.clamp(1, 12);
        let day = day.clamp(1, days_in_month(year, month));
        Self { year, month, day }
    }

    /// Convert a Gregorian date
    pub fn from_gregorian(date: NaiveDate) -> Self {
        let fixed = i64::from(date.num_days_from_ce());
        let year = (30 * (fixed - EPOCH) + 10_646).div_euclid(10_631) as i32;
        let prior_days = fixed - fixed_from_hijri(year, 1, 1);
        let month = (11 * prior_days + 330).div_euclid(325) as u32;
        let day = (fixed - fixed_from_hijri(year, month, 1) + 1) as u32;
        Self { year, month, day }
    }

    /// Convert to a Gregorian date
    pub fn to_gregorian(&self) -> NaiveDate {
        let fixed = fixed_from_hijri(self.year, self.month, self.day);
        i32::try_from(fixed)
            .ok()
            .and_then(NaiveDate::from_num_days_from_ce_opt)
            .unwrap_or(if fixed < 1 { NaiveDate::MIN } else { NaiveDate::MAX })
    }

    pub fn month_name(&self) -> &'static str {
        month_name(self.month)
    }

    pub fn days_in_month(&self) -> u32 {
        days_in_month(self.year, self.month)
    }

    /// First day of this date's month
    pub fn start_of_month(&self) -> Self {
        Self { day: 1, ..*self }
    }

    /// Last day of this date's month
    pub fn end_of_month(&self) -> Self {
        Self {
            day: self.days_in_month(),
            ..*self
        }
    }

    /// Shift by a number of days (negative to go back). Saturates at
    /// chrono's date range.
    pub fn add_days(&self, days: i64) -> Self {
        let shifted = Duration::try_days(days).and_then(|delta| self.to_gregorian().checked_add_signed(delta));
        Self::from_gregorian(shifted.unwrap_or(if days < 0 { NaiveDate::MIN } else { NaiveDate::MAX }))
    }

    pub fn subtract_days(&self, days: i64) -> Self {
        self.add_days(days.saturating_neg())
    }

    /// Shift by whole months, clamping the day to the target month's length
    pub fn add_months(&self, months: i32) -> Self {
        let index = i64::from(self.year) * 12 + i64::from(self.month) - 1 + i64::from(months);
        let year = index.div_euclid(12) as i32;
        let month = (index.rem_euclid(12) + 1) as u32;
        Self::clamped(year, month, self.day)
    }

    pub fn subtract_months(&self, months: i32) -> Self {
        self.add_months(-months)
    }

    /// Shift by whole years, clamping 30 Dhu al-Hijjah in common years
    pub fn add_years(&self, years: i32) -> Self {
        Self::clamped(self.year + years, self.month, self.day)
    }

    pub fn subtract_years(&self, years: i32) -> Self {
        self.add_years(-years)
    }
}

impl fmt::Display for HijriDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} AH", self.day, self.month_name(), self.year)
    }
}

impl FromStr for HijriDate {
    type Err = NoorError;

    /// Parse `YYYY-MM-DD`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || NoorError::InvalidInput(format!("Invalid Hijri date '{}', expected YYYY-MM-DD", s));

        let mut parts = s.trim().splitn(3, '-');
        let year = parts.next().and_then(|p| p.parse::<i32>().ok()).ok_or_else(invalid)?;
        let month = parts.next().and_then(|p| p.parse::<u32>().ok()).ok_or_else(invalid)?;
        let day = parts.next().and_then(|p| p.parse::<u32>().ok()).ok_or_else(invalid)?;

        HijriDate::new(year, month, day).ok_or_else(invalid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_known_anchors() {
        assert_eq!(HijriDate::from_gregorian(ymd(622, 7, 19)), HijriDate::new(1, 1, 1).unwrap());
        assert_eq!(HijriDate::from_gregorian(ymd(2024, 3, 11)), HijriDate::new(1445, 9, 1).unwrap());
        assert_eq!(HijriDate::from_gregorian(ymd(2024, 3, 10)), HijriDate::new(1445, 8, 29).unwrap());
        assert_eq!(HijriDate::from_gregorian(ymd(2000, 1, 1)), HijriDate::new(1420, 9, 24).unwrap());
        assert_eq!(HijriDate::from_gregorian(ymd(2026, 10, 15)), HijriDate::new(1448, 5, 3).unwrap());
    }

    #[test]
    fn test_to_gregorian() {
        assert_eq!(HijriDate::new(1446, 1, 1).unwrap().to_gregorian(), ymd(2024, 7, 8));
        assert_eq!(HijriDate::new(1447, 9, 1).unwrap().to_gregorian(), ymd(2026, 2, 18));
        assert_eq!(HijriDate::new(1445, 12, 30).unwrap().to_gregorian(), ymd(2024, 7, 7));
    }

    #[test]
    fn test_round_trip_over_several_cycles() {
        let mut date = ymd(1990, 1, 1);
        let end = ymd(2090, 1, 1);
        let mut previous = HijriDate::from_gregorian(date - Duration::days(1));
        while date < end {
            let hijri = HijriDate::from_gregorian(date);
            assert_eq!(hijri.to_gregorian(), date);
            assert!(hijri > previous);
            assert!(hijri.day >= 1 && hijri.day <= hijri.days_in_month());
            previous = hijri;
            date += Duration::days(1);
        }
    }

    #[test]
    fn test_leap_years() {
        let leaps: Vec<i32> = (1440..1450).filter(|y| is_leap_year(*y)).collect();
        assert_eq!(leaps, vec![1442, 1445, 1447]);
        assert_eq!(days_in_year(1445), 355);
        assert_eq!(days_in_year(1446), 354);
        assert_eq!(days_in_month(1445, 12), 30);
        assert_eq!(days_in_month(1446, 12), 29);
        assert_eq!(days_in_month(1446, 9), 30);
        assert_eq!(days_in_month(1446, 8), 29);
    }

    #[test]
    fn test_new_rejects_out_of_range() {
        assert!(HijriDate::new(1446, 13, 1).is_none());
        assert!(HijriDate::new(1446, 0, 1).is_none());
        assert!(HijriDate::new(1446, 2, 30).is_none());
        assert!(HijriDate::new(1446, 12, 30).is_none());
        assert!(HijriDate::new(1445, 12, 30).is_some());
    }

    #[test]
    fn test_clamped() {
        assert_eq!(HijriDate::clamped(1446, 2, 30), HijriDate::new(1446, 2, 29).unwrap());
        assert_eq!(HijriDate::clamped(1446, 14, 0), HijriDate::new(1446, 12, 1).unwrap());
    }

    #[test]
    fn test_month_boundaries() {
        let date = HijriDate::new(1446, 9, 17).unwrap();
        assert_eq!(date.start_of_month(), HijriDate::new(1446, 9, 1).unwrap());
        assert_eq!(date.end_of_month(), HijriDate::new(1446, 9, 30).unwrap());
        assert_eq!(date.end_of_month().add_days(1), HijriDate::new(1446, 10, 1).unwrap());
        assert_eq!(date.start_of_month().subtract_days(1), HijriDate::new(1446, 8, 29).unwrap());
    }

    #[test]
    fn test_add_months_and_years() {
        let date = HijriDate::new(1445, 11, 30).unwrap();
        assert_eq!(date.add_months(1), HijriDate::new(1445, 12, 30).unwrap());
        assert_eq!(date.add_months(2), HijriDate::new(1446, 1, 30).unwrap());
        assert_eq!(date.add_months(3), HijriDate::new(1446, 2, 29).unwrap());
        assert_eq!(date.subtract_months(11), HijriDate::new(1444, 12, 29).unwrap());

        let last = HijriDate::new(1445, 12, 30).unwrap();
        assert_eq!(last.add_years(1), HijriDate::new(1446, 12, 29).unwrap());
        assert_eq!(last.subtract_years(3), HijriDate::new(1442, 12, 30).unwrap());
    }

    #[test]
    fn test_display_and_parse() {
        let date: HijriDate = "1448-05-03".parse().unwrap();
        assert_eq!(date, HijriDate::new(1448, 5, 3).unwrap());
        assert_eq!(date.to_string(), "3 Jumada al-Awwal 1448 AH");
        assert!("1448-13-01".parse::<HijriDate>().is_err());
        assert!("yesterday".parse::<HijriDate>().is_err());
    }
}
