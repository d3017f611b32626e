//! Calendar engine
//!
//! Answers "today"-relative questions: the current Hijri date, countdowns to
//! recurring observances, and the per-day details of a Hijri month.

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;
use std::sync::Arc;

use super::clock::{Clock, SystemClock};
use super::events::{events_on, IslamicEvent, UpcomingEvent, ISLAMIC_EVENTS};
use super::hijri::{HijriDate, MAX_YEAR, MIN_YEAR};
use super::observance::{is_sunnah_fasting_day, moon_phase, weekday_name, FastingStatus, MoonPhase};
use crate::config::CalendarConfig;

/// Summary of the current day
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodayInfo {
    pub gregorian: NaiveDate,
    pub hijri: HijriDate,
    pub hijri_formatted: String,
    pub weekday: &'static str,
    pub fasting: FastingStatus,
    pub moon_phase: MoonPhase,
    pub events: Vec<IslamicEvent>,
}

/// One cell of a Hijri month view
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    pub hijri: HijriDate,
    pub gregorian: NaiveDate,
    pub weekday: &'static str,
    pub fasting: FastingStatus,
    pub moon_phase: MoonPhase,
    pub events: Vec<&'static str>,
    pub is_today: bool,
}

/// Hijri calendar engine
pub struct CalendarEngine {
    clock: Arc<dyn Clock>,
    events: Vec<IslamicEvent>,
    offset_days: i64,
}

impl CalendarEngine {
    /// Create an engine with the built-in event catalog and no offset
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            events: ISLAMIC_EVENTS.to_vec(),
            offset_days: 0,
        }
    }

    /// Create an engine on the system clock using the given settings
    pub fn with_config(config: &CalendarConfig) -> Self {
        Self::new(Arc::new(SystemClock)).with_offset(config.hijri_offset_days)
    }

    /// Shift the Hijri reading of every Gregorian day by `days`
    pub fn with_offset(mut self, days: i64) -> Self {
        self.offset_days = days;
        self
    }

    /// Replace the event catalog
    pub fn with_events(mut self, events: Vec<IslamicEvent>) -> Self {
        self.events = events;
        self
    }

    /// Today's Gregorian date
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Hijri date of a Gregorian day, honoring the configured offset.
    /// `None` when the shifted day leaves chrono's range or the supported
    /// Hijri years.
    pub fn hijri_of(&self, date: NaiveDate) -> Option<HijriDate> {
        date.checked_add_signed(Duration::days(self.offset_days))
            .map(HijriDate::from_gregorian)
            .filter(|hijri| (MIN_YEAR..=MAX_YEAR).contains(&hijri.year))
    }

    /// Gregorian day of a Hijri date, honoring the configured offset
    pub fn gregorian_of(&self, date: HijriDate) -> Option<NaiveDate> {
        date.to_gregorian()
            .checked_sub_signed(Duration::days(self.offset_days))
    }

    // Clock readings and catalog dates stay far from chrono's bounds, so the
    // engine's own conversions saturate instead of failing.
    fn reading_of(&self, date: NaiveDate) -> HijriDate {
        HijriDate::from_gregorian(shifted(date, self.offset_days))
    }

    fn day_of(&self, date: HijriDate) -> NaiveDate {
        shifted(date.to_gregorian(), -self.offset_days)
    }

    pub fn current_hijri_date(&self) -> HijriDate {
        self.reading_of(self.today())
    }

    /// Gregorian date of the next (month, day) in the Hijri calendar,
    /// today included. Day 30 of a 29-day month is read as day 29.
    pub fn next_hijri_occurrence(&self, month: u32, day: u32) -> NaiveDate {
        let today = self.today();
        let current = self.reading_of(today);

        let this_year = self.day_of(HijriDate::clamped(current.year, month, day));
        if this_year >= today {
            return this_year;
        }

        self.day_of(HijriDate::clamped(current.year + 1, month, day))
    }

    /// Whole days from today until the next (month, day) in the Hijri
    /// calendar; 0 when that day is today
    pub fn days_until_hijri_date(&self, month: u32, day: u32) -> i64 {
        (self.next_hijri_occurrence(month, day) - self.today()).num_days()
    }

    /// Next (month, day) in the Gregorian calendar, today included.
    /// Out-of-range days are clamped, so 29 February is read as 28 February
    /// in common years.
    pub fn next_gregorian_occurrence(&self, month: u32, day: u32) -> NaiveDate {
        let today = self.today();

        let this_year = clamped_gregorian(today.year(), month, day);
        if this_year >= today {
            return this_year;
        }

        clamped_gregorian(today.year() + 1, month, day)
    }

    /// Whole days from today until the next (month, day) in the Gregorian
    /// calendar
    pub fn days_until_gregorian_date(&self, month: u32, day: u32) -> i64 {
        (self.next_gregorian_occurrence(month, day) - self.today()).num_days()
    }

    /// Every catalog event with its countdown, soonest first. Events on the
    /// same day keep catalog order.
    pub fn upcoming_events(&self) -> Vec<UpcomingEvent> {
        let today = self.today();

        let mut upcoming: Vec<UpcomingEvent> = self
            .events
            .iter()
            .map(|event| {
                let date = self.next_hijri_occurrence(event.hijri_month, event.hijri_day);
                UpcomingEvent {
                    event: event.clone(),
                    days_until: (date - today).num_days(),
                    date: format_gregorian(date),
                }
            })
            .collect();

        upcoming.sort_by_key(|e| e.days_until);
        upcoming
    }

    pub fn today_info(&self) -> TodayInfo {
        let gregorian = self.today();
        let hijri = self.reading_of(gregorian);

        TodayInfo {
            gregorian,
            hijri,
            hijri_formatted: hijri.to_string(),
            weekday: weekday_name(gregorian.weekday()),
            fasting: is_sunnah_fasting_day(hijri.day, gregorian.weekday(), Some(hijri.month)),
            moon_phase: moon_phase(hijri.day),
            events: events_on(&self.events, hijri.month, hijri.day).cloned().collect(),
        }
    }

    /// Every day of a Hijri month, first to last
    pub fn month_view(&self, year: i32, month: u32) -> Vec<CalendarDay> {
        let today = self.today();
        let first = HijriDate::clamped(year, month, 1);
        let last = first.end_of_month();

        (first.day..=last.day)
            .map(|day| {
                let hijri = HijriDate { day, ..first };
                let gregorian = self.day_of(hijri);
                CalendarDay {
                    hijri,
                    gregorian,
                    weekday: weekday_name(gregorian.weekday()),
                    fasting: is_sunnah_fasting_day(day, gregorian.weekday(), Some(hijri.month)),
                    moon_phase: moon_phase(day),
                    events: events_on(&self.events, hijri.month, day).map(|e| e.name).collect(),
                    is_today: gregorian == today,
                }
            })
            .collect()
    }
}

/// Format as "March 11, 2024"
pub fn format_gregorian(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

fn shifted(date: NaiveDate, days: i64) -> NaiveDate {
    date.checked_add_signed(Duration::days(days))
        .unwrap_or(if days < 0 { NaiveDate::MIN } else { NaiveDate::MAX })
}

fn clamped_gregorian(year: i32, month: u32, day: u32) -> NaiveDate {
    let month = month.clamp(1, 12);
    let first = NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(NaiveDate::MAX);
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    let last_day = next_first
        .map(|d| (d - Duration::days(1)).day())
        .unwrap_or(31);

    first
        .with_day(day.clamp(1, last_day))
        .unwrap_or(first)
}
