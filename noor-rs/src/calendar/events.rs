//! Catalog of annually recurring Islamic observances

use serde::Serialize;

/// An observance that recurs on a fixed Hijri month and day
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IslamicEvent {
    pub name: &'static str,
    pub hijri_month: u32,
    pub hijri_day: u32,
    pub description: &'static str,
    pub color: &'static str,
}

/// An event with its next occurrence relative to today
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingEvent {
    #[serde(flatten)]
    pub event: IslamicEvent,
    pub days_until: i64,
    /// Gregorian date of the occurrence, e.g. "March 11, 2024"
    pub date: String,
}

pub const ISLAMIC_EVENTS: &[IslamicEvent] = &[
    IslamicEvent {
        name: "Islamic New Year",
        hijri_month: 1,
        hijri_day: 1,
        description: "The first day of Muharram marks the start of the Hijri year.",
        color: "#10b981",
    },
    IslamicEvent {
        name: "Day of Ashura",
        hijri_month: 1,
        hijri_day: 10,
        description: "The tenth of Muharram, a recommended day of fasting.",
        color: "#6366f1",
    },
    IslamicEvent {
        name: "Mawlid an-Nabi",
        hijri_month: 3,
        hijri_day: 12,
        description: "Commemoration of the birth of the Prophet Muhammad.",
        color: "#22c55e",
    },
    IslamicEvent {
        name: "Isra and Mi'raj",
        hijri_month: 7,
        hijri_day: 27,
        description: "The Night Journey to Jerusalem and the ascension to the heavens.",
        color: "#8b5cf6",
    },
    IslamicEvent {
        name: "Mid-Sha'ban",
        hijri_month: 8,
        hijri_day: 15,
        description: "The night of the fifteenth of Sha'ban.",
        color: "#0ea5e9",
    },
    IslamicEvent {
        name: "Start of Ramadan",
        hijri_month: 9,
        hijri_day: 1,
        description: "The first day of the month of obligatory fasting.",
        color: "#f59e0b",
    },
    IslamicEvent {
        name: "Laylat al-Qadr",
        hijri_month: 9,
        hijri_day: 27,
        description: "The Night of Decree, sought in the last ten nights of Ramadan.",
        color: "#eab308",
    },
    IslamicEvent {
        name: "Eid al-Fitr",
        hijri_month: 10,
        hijri_day: 1,
        description: "Festival of breaking the fast at the end of Ramadan.",
        color: "#ef4444",
    },
    IslamicEvent {
        name: "Day of Arafah",
        hijri_month: 12,
        hijri_day: 9,
        description: "The day pilgrims stand at Arafah; fasting is recommended for non-pilgrims.",
        color: "#f97316",
    },
    IslamicEvent {
        name: "Eid al-Adha",
        hijri_month: 12,
        hijri_day: 10,
        description: "Festival of sacrifice during the Hajj season.",
        color: "#dc2626",
    },
];

/// Events falling on the given Hijri month and day
pub fn events_on<'a>(events: &'a [IslamicEvent], month: u32, day: u32) -> impl Iterator<Item = &'a IslamicEvent> {
    events
        .iter()
        .filter(move |e| e.hijri_month == month && e.hijri_day == day)
}
