//! Integration tests for the Hijri calendar engine

use chrono::{Datelike, NaiveDate, Weekday};
use noor_rs::calendar::{CalendarEngine, FixedClock, HijriDate};
use std::sync::Arc;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Engine frozen on the given Gregorian day
fn engine_on(today: NaiveDate) -> CalendarEngine {
    CalendarEngine::new(Arc::new(FixedClock(today)))
}

#[test]
fn test_today_is_third_of_jumada_al_awwal() {
    let engine = engine_on(date(2026, 10, 15));
    let today = engine.today_info();

    assert_eq!(today.hijri, HijriDate::new(1448, 5, 3).unwrap());
    assert_eq!(today.hijri_formatted, "3 Jumada al-Awwal 1448 AH");
    assert_eq!(today.weekday, "Thursday");
    assert!(today.fasting.is_fasting);
    assert_eq!(today.fasting.reason, Some("Thursday"));
    assert_eq!(today.moon_phase.name, "Waxing Crescent");
    assert!(today.events.is_empty());
}

#[test]
fn test_first_of_ramadan_reports_event() {
    let engine = engine_on(date(2024, 3, 11));
    let today = engine.today_info();

    assert_eq!(today.hijri, HijriDate::new(1445, 9, 1).unwrap());
    assert_eq!(today.moon_phase.name, "New Moon");
    let names: Vec<_> = today.events.iter().map(|e| e.name).collect();
    assert_eq!(names, vec!["Start of Ramadan"]);
    assert_eq!(engine.days_until_hijri_date(9, 1), 0);
}

#[test]
fn test_upcoming_events_from_mid_jumada() {
    let engine = engine_on(date(2026, 10, 15));
    let upcoming = engine.upcoming_events();

    let summary: Vec<(&str, i64)> = upcoming.iter().map(|u| (u.event.name, u.days_until)).collect();
    assert_eq!(
        summary,
        vec![
            ("Isra and Mi'raj", 83),
            ("Mid-Sha'ban", 101),
            ("Start of Ramadan", 116),
            ("Laylat al-Qadr", 142),
            ("Eid al-Fitr", 146),
            ("Day of Arafah", 213),
            ("Eid al-Adha", 214),
            ("Islamic New Year", 234),
            ("Day of Ashura", 243),
            ("Mawlid an-Nabi", 304),
        ]
    );
    assert_eq!(upcoming[0].date, "January 6, 2027");
    assert_eq!(upcoming[7].date, "June 6, 2027");
}

#[test]
fn test_countdowns_never_negative() {
    let start = date(2024, 1, 1);
    for offset in (0..800).step_by(7) {
        let engine = engine_on(start + chrono::Duration::days(offset));
        for month in 1..=12 {
            for day in [1, 15, 29, 30] {
                let days = engine.days_until_hijri_date(month, day);
                assert!(days >= 0);
                assert!(days < 356, "{}/{} is {} days away", month, day, days);
            }
        }
    }
}

#[test]
fn test_gregorian_countdown_clamps_leap_day() {
    let engine = engine_on(date(2026, 10, 15));
    assert_eq!(engine.next_gregorian_occurrence(2, 29), date(2027, 2, 28));
    assert_eq!(engine.days_until_gregorian_date(2, 29), 136);
    assert_eq!(engine.days_until_gregorian_date(10, 15), 0);
    assert_eq!(engine.days_until_gregorian_date(10, 14), 364);
}

#[test]
fn test_offset_shifts_hijri_day() {
    let today = date(2024, 3, 11);
    let ahead = engine_on(today).with_offset(1);
    let behind = engine_on(today).with_offset(-1);

    assert_eq!(ahead.current_hijri_date(), HijriDate::new(1445, 9, 2).unwrap());
    assert_eq!(behind.current_hijri_date(), HijriDate::new(1445, 8, 29).unwrap());
    // Ramadan began yesterday for the +1 engine
    assert!(ahead.days_until_hijri_date(9, 1) > 300);
    assert_eq!(behind.days_until_hijri_date(9, 1), 1);
}

#[test]
fn test_month_view_of_ramadan_1445() {
    let engine = engine_on(date(2024, 3, 20));
    let days = engine.month_view(1445, 9);

    assert_eq!(days.len(), 30);
    assert_eq!(days[0].gregorian, date(2024, 3, 11));
    assert_eq!(days[0].weekday, "Monday");
    assert_eq!(days[0].events, vec!["Start of Ramadan"]);
    assert_eq!(days[29].gregorian, date(2024, 4, 9));
    assert_eq!(days[26].events, vec!["Laylat al-Qadr"]);

    let today: Vec<_> = days.iter().filter(|d| d.is_today).map(|d| d.hijri.day).collect();
    assert_eq!(today, vec![10]);

    for pair in days.windows(2) {
        assert_eq!(pair[1].gregorian - pair[0].gregorian, chrono::Duration::days(1));
    }
}

#[test]
fn test_month_view_skips_fasting_in_tashreeq() {
    let engine = engine_on(date(2024, 6, 1));
    let days = engine.month_view(1445, 12);

    let thirteenth = &days[12];
    assert_eq!(thirteenth.gregorian, date(2024, 6, 20));
    assert_eq!(thirteenth.gregorian.weekday(), Weekday::Thu);
    assert!(!thirteenth.fasting.is_fasting);

    let fourteenth = &days[13];
    assert_eq!(fourteenth.fasting.reason, Some("White Day"));
}

#[test]
fn test_round_trip_over_four_centuries() {
    let mut day = date(1900, 1, 1);
    let end = date(2300, 1, 1);
    while day < end {
        let hijri = HijriDate::from_gregorian(day);
        assert_eq!(hijri.to_gregorian(), day);
        day += chrono::Duration::days(13);
    }
}
