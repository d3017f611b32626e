//! Calendar API endpoints
//!
//! Provides REST API for Hijri dates, observance countdowns and month views.

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::api::server::{bad_request, ApiFailure, AppState};
use crate::calendar::engine::format_gregorian;
use crate::calendar::hijri::{month_name, MAX_YEAR, MIN_YEAR};
use crate::calendar::observance::weekday_name;
use crate::calendar::{is_sunnah_fasting_day, CalendarDay, FastingStatus, HijriDate, TodayInfo, UpcomingEvent};
use crate::error::NoorError;

/// Month view query parameters
#[derive(Debug, Deserialize)]
pub struct MonthParams {
    /// Hijri year (default: current)
    pub year: Option<i32>,
    /// Hijri month 1-12 (default: current)
    pub month: Option<u32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthResponse {
    pub year: i32,
    pub month: u32,
    pub month_name: &'static str,
    pub days: Vec<CalendarDay>,
}

/// Conversion query parameters: exactly one of `date` or `hijri`
#[derive(Debug, Deserialize)]
pub struct ConvertParams {
    /// Gregorian date, YYYY-MM-DD
    pub date: Option<String>,
    /// Hijri date, YYYY-MM-DD
    pub hijri: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertResponse {
    pub gregorian: NaiveDate,
    pub gregorian_formatted: String,
    pub hijri: HijriDate,
    pub hijri_formatted: String,
    pub weekday: &'static str,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CountdownCalendar {
    #[default]
    Hijri,
    Gregorian,
}

#[derive(Debug, Deserialize)]
pub struct CountdownParams {
    pub month: u32,
    pub day: u32,
    #[serde(default)]
    pub calendar: CountdownCalendar,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountdownResponse {
    pub days_until: i64,
    pub date: NaiveDate,
    pub date_formatted: String,
}

#[derive(Debug, Deserialize)]
pub struct FastingParams {
    /// Hijri day of month
    pub day: u32,
    /// Weekday name, e.g. "Monday" or "mon"
    pub weekday: String,
    /// Hijri month, enables the Tashreeq rule
    pub month: Option<u32>,
}

/// GET /api/calendar/today
pub async fn today(State(state): State<Arc<AppState>>) -> Json<TodayInfo> {
    Json(state.calendar.today_info())
}

/// GET /api/calendar/events
pub async fn events(State(state): State<Arc<AppState>>) -> Json<Vec<UpcomingEvent>> {
    Json(state.calendar.upcoming_events())
}

/// GET /api/calendar/month
pub async fn month(
    State(state): State<Arc<AppState>>,
    Query(params): Query<MonthParams>,
) -> Result<Json<MonthResponse>, ApiFailure> {
    let current = state.calendar.current_hijri_date();
    let year = params.year.unwrap_or(current.year);
    let month = params.month.unwrap_or(current.month);

    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(bad_request(format!("year must be between {} and {}", MIN_YEAR, MAX_YEAR)));
    }
    check_month(month)?;

    Ok(Json(MonthResponse {
        year,
        month,
        month_name: month_name(month),
        days: state.calendar.month_view(year, month),
    }))
}

/// GET /api/calendar/convert
pub async fn convert(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ConvertParams>,
) -> Result<Json<ConvertResponse>, ApiFailure> {
    let (gregorian, hijri) = match (params.date, params.hijri) {
        (Some(date), None) => {
            let gregorian = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
                .map_err(|_| bad_request(format!("invalid Gregorian date: {}", date)))?;
            let hijri = state
                .calendar
                .hijri_of(gregorian)
                .ok_or_else(|| bad_request(format!("date out of supported range: {}", date)))?;
            (gregorian, hijri)
        }
        (None, Some(hijri)) => {
            let parsed: HijriDate = hijri.parse().map_err(|e: NoorError| bad_request(e.to_string()))?;
            let gregorian = state
                .calendar
                .gregorian_of(parsed)
                .ok_or_else(|| bad_request(format!("date out of supported range: {}", hijri)))?;
            (gregorian, parsed)
        }
        _ => return Err(bad_request("provide exactly one of 'date' or 'hijri'")),
    };

    Ok(Json(ConvertResponse {
        gregorian,
        gregorian_formatted: format_gregorian(gregorian),
        hijri,
        hijri_formatted: hijri.to_string(),
        weekday: weekday_name(gregorian.weekday()),
    }))
}

/// GET /api/calendar/countdown
pub async fn countdown(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CountdownParams>,
) -> Result<Json<CountdownResponse>, ApiFailure> {
    check_month(params.month)?;

    let max_day = match params.calendar {
        CountdownCalendar::Hijri => 30,
        CountdownCalendar::Gregorian => 31,
    };
    if !(1..=max_day).contains(&params.day) {
        return Err(bad_request(format!("day must be between 1 and {}", max_day)));
    }

    let date = match params.calendar {
        CountdownCalendar::Hijri => state.calendar.next_hijri_occurrence(params.month, params.day),
        CountdownCalendar::Gregorian => state.calendar.next_gregorian_occurrence(params.month, params.day),
    };

    Ok(Json(CountdownResponse {
        days_until: (date - state.calendar.today()).num_days(),
        date,
        date_formatted: format_gregorian(date),
    }))
}

/// GET /api/calendar/fasting
pub async fn fasting(Query(params): Query<FastingParams>) -> Result<Json<FastingStatus>, ApiFailure> {
    if !(1..=30).contains(&params.day) {
        return Err(bad_request("day must be between 1 and 30"));
    }
    if let Some(month) = params.month {
        check_month(month)?;
    }

    let weekday: Weekday = params
        .weekday
        .trim()
        .parse()
        .map_err(|_| bad_request(format!("invalid weekday: {}", params.weekday)))?;

    Ok(Json(is_sunnah_fasting_day(params.day, weekday, params.month)))
}

fn check_month(month: u32) -> Result<(), ApiFailure> {
    if (1..=12).contains(&month) {
        Ok(())
    } else {
        Err(bad_request("month must be between 1 and 12"))
    }
}
