//! Day classification: recommended fasting and lunar phase

use chrono::Weekday;
use serde::Serialize;

/// Result of a Sunnah fasting check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FastingStatus {
    pub is_fasting: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<&'static str>,
}

impl FastingStatus {
    fn recommended(reason: &'static str) -> Self {
        Self {
            is_fasting: true,
            reason: Some(reason),
        }
    }

    fn not_recommended() -> Self {
        Self {
            is_fasting: false,
            reason: None,
        }
    }
}

/// Days of Tashreeq (11–13 Dhu al-Hijjah), on which fasting is prohibited
const TASHREEQ_DAYS: [u32; 3] = [11, 12, 13];

/// The "White Days" (13–15 of each lunar month)
const WHITE_DAYS: [u32; 3] = [13, 14, 15];

/// Classify a day for voluntary fasting.
///
/// Rules apply in order and the first match wins:
/// 1. 11–13 Dhu al-Hijjah: not fasting, whatever the weekday.
/// 2. Monday or Thursday: fasting, reason is the weekday.
/// 3. 13–15 of the month: fasting, reason "White Day".
///
/// `hijri_month` is optional; without it the Tashreeq rule cannot apply.
pub fn is_sunnah_fasting_day(hijri_day: u32, weekday: Weekday, hijri_month: Option<u32>) -> FastingStatus {
    if hijri_month == Some(12) && TASHREEQ_DAYS.contains(&hijri_day) {
        return FastingStatus::not_recommended();
    }

    match weekday {
        Weekday::Mon => return FastingStatus::recommended("Monday"),
        Weekday::Thu => return FastingStatus::recommended("Thursday"),
        _ => {}
    }

    if WHITE_DAYS.contains(&hijri_day) {
        return FastingStatus::recommended("White Day");
    }

    FastingStatus::not_recommended()
}

/// Lunar phase of a day of the Hijri month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MoonPhase {
    pub name: &'static str,
    pub icon: &'static str,
}

/// Map a Hijri day (1–30) to one of eight phases. Days past 30 read as
/// waning crescent and day 0 as new moon.
pub fn moon_phase(hijri_day: u32) -> MoonPhase {
    let (name, icon) = match hijri_day {
        0 | 1 => ("New Moon", "🌑"),
        2..=6 => ("Waxing Crescent", "🌒"),
        7..=8 => ("First Quarter", "🌓"),
        9..=13 => ("Waxing Gibbous", "🌔"),
        14..=15 => ("Full Moon", "🌕"),
        16..=21 => ("Waning Gibbous", "🌖"),
        22..=23 => ("Last Quarter", "🌗"),
        _ => ("Waning Crescent", "🌘"),
    };
    MoonPhase { name, icon }
}

/// English weekday name
pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}
