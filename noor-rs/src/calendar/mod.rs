//! Hijri calendar module
//!
//! Tabular Hijri/Gregorian conversion, countdowns to recurring observances,
//! and day classification (recommended fasting, moon phase).

pub mod clock;
pub mod engine;
pub mod events;
pub mod hijri;
pub mod observance;

pub use clock::{Clock, FixedClock, SystemClock};
pub use engine::{CalendarDay, CalendarEngine, TodayInfo};
pub use events::{IslamicEvent, UpcomingEvent, ISLAMIC_EVENTS};
pub use hijri::HijriDate;
pub use observance::{is_sunnah_fasting_day, moon_phase, FastingStatus, MoonPhase};
