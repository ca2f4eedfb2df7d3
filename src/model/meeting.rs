//! Meeting times: the raw weekly pattern a Section's bitmap is derived from.

use bitflags::bitflags;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Which days of the week a meeting recurs on.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct MeetingDays: u8 {
        const MONDAY    = 0b0000_0001;
        const TUESDAY   = 0b0000_0010;
        const WEDNESDAY = 0b0000_0100;
        const THURSDAY  = 0b0000_1000;
        const FRIDAY    = 0b0001_0000;
        const SATURDAY  = 0b0010_0000;
        const SUNDAY    = 0b0100_0000;
    }
}

impl MeetingDays {
    /// Canonical day names in the order `TimeBitmap` indexes them.
    pub const ORDERED: [(MeetingDays, &'static str); 7] = [
        (MeetingDays::MONDAY, "monday"),
        (MeetingDays::TUESDAY, "tuesday"),
        (MeetingDays::WEDNESDAY, "wednesday"),
        (MeetingDays::THURSDAY, "thursday"),
        (MeetingDays::FRIDAY, "friday"),
        (MeetingDays::SATURDAY, "saturday"),
        (MeetingDays::SUNDAY, "sunday"),
    ];

    /// The canonical day names set on this meeting.
    pub fn names(self) -> impl Iterator<Item = &'static str> {
        Self::ORDERED
            .into_iter()
            .filter(move |(flag, _)| self.contains(*flag))
            .map(|(_, name)| name)
    }
}

/// The term dates a meeting pattern recurs within, e.g. for a short-session
/// course that only meets the first half of a term. Carried verbatim from
/// the upstream catalog; the scheduling core itself only reasons about the
/// weekly pattern, never about where in the term "today" falls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Parses a `MM/DD/YYYY` pair as the upstream catalog serves them.
    pub fn from_mm_dd_yyyy(start: &str, end: &str) -> Option<Self> {
        let start = NaiveDate::parse_from_str(start, "%m/%d/%Y").ok()?;
        let end = NaiveDate::parse_from_str(end, "%m/%d/%Y").ok()?;
        Some(DateRange { start, end })
    }
}

/// One weekly recurring meeting pattern for a Section.
///
/// `begin_time`/`end_time` are `HHMM` strings on the canonical slot grid, or
/// `None` for an asynchronous meeting with no weekly footprint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meeting {
    pub begin_time: Option<String>,
    pub end_time: Option<String>,
    pub days: MeetingDays,
    pub date_range: Option<DateRange>,
}

impl Meeting {
    pub fn new(begin_time: Option<String>, end_time: Option<String>, days: MeetingDays) -> Self {
        Meeting {
            begin_time,
            end_time,
            days,
            date_range: None,
        }
    }

    /// An asynchronous meeting: no begin/end time, no footprint.
    pub fn asynchronous() -> Self {
        Meeting {
            begin_time: None,
            end_time: None,
            days: MeetingDays::empty(),
            date_range: None,
        }
    }

    pub fn is_asynchronous(&self) -> bool {
        self.begin_time.is_none() || self.end_time.is_none()
    }
}
