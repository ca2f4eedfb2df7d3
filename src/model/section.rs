//! Sections: one offering of a course, the unit the solver reasons about.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::meeting::{DateRange, Meeting, MeetingDays};
use crate::time_bitmap::TimeBitmap;

/// A single offering within a course.
///
/// `time_bitmap` is a pure function of `meetings`: it is recomputed whenever
/// meetings are replaced via [`Section::set_meetings`], never stored
/// independently of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub course_reference_number: String,
    pub term: String,
    pub subject_course: String,
    pub schedule_type_description: String,
    pub link_identifier: Option<String>,
    pub is_section_linked: bool,
    pub is_primary_section: bool,
    pub campus_description: String,
    meetings: Vec<Meeting>,
    time_bitmap: TimeBitmap,
}

impl Section {
    /// Builds a Section, computing its `time_bitmap` from `meetings`.
    ///
    /// Fails if any meeting names an unrecognized time boundary or day.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        course_reference_number: impl Into<String>,
        term: impl Into<String>,
        subject_course: impl Into<String>,
        schedule_type_description: impl Into<String>,
        link_identifier: Option<String>,
        is_section_linked: bool,
        is_primary_section: bool,
        campus_description: impl Into<String>,
        meetings: Vec<Meeting>,
    ) -> Result<Self> {
        let time_bitmap = compute_time_bitmap(&meetings)?;
        Ok(Section {
            course_reference_number: course_reference_number.into(),
            term: term.into(),
            subject_course: subject_course.into(),
            schedule_type_description: schedule_type_description.into(),
            link_identifier,
            is_section_linked,
            is_primary_section,
            campus_description: campus_description.into(),
            meetings,
            time_bitmap,
        })
    }

    pub fn crn(&self) -> &str {
        &self.course_reference_number
    }

    pub fn meetings(&self) -> &[Meeting] {
        &self.meetings
    }

    pub fn time_bitmap(&self) -> TimeBitmap {
        self.time_bitmap
    }

    /// Replaces this section's meetings, recomputing `time_bitmap`.
    pub fn set_meetings(&mut self, meetings: Vec<Meeting>) -> Result<()> {
        self.time_bitmap = compute_time_bitmap(&meetings)?;
        self.meetings = meetings;
        Ok(())
    }

    pub fn is_online(&self) -> bool {
        self.campus_description == "OT-Online"
    }

    pub fn is_downtown(&self) -> bool {
        self.campus_description == "OT-Downtown Oshawa"
    }
}

/// The upstream catalog's wire shape for one meeting, nested under
/// `meetingsFaculty[].meetingTime`: a begin/end time plus one boolean per
/// weekday, rather than a bitflags set.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMeetingTime {
    pub begin_time: Option<String>,
    pub end_time: Option<String>,
    pub monday: bool,
    pub tuesday: bool,
    pub wednesday: bool,
    pub thursday: bool,
    pub friday: bool,
    pub saturday: bool,
    pub sunday: bool,
    pub start_date: String,
    pub end_date: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMeetingFaculty {
    pub meeting_time: RawMeetingTime,
}

impl From<RawMeetingTime> for Meeting {
    fn from(raw: RawMeetingTime) -> Self {
        let mut days = MeetingDays::empty();
        if raw.monday {
            days.insert(MeetingDays::MONDAY);
        }
        if raw.tuesday {
            days.insert(MeetingDays::TUESDAY);
        }
        if raw.wednesday {
            days.insert(MeetingDays::WEDNESDAY);
        }
        if raw.thursday {
            days.insert(MeetingDays::THURSDAY);
        }
        if raw.friday {
            days.insert(MeetingDays::FRIDAY);
        }
        if raw.saturday {
            days.insert(MeetingDays::SATURDAY);
        }
        if raw.sunday {
            days.insert(MeetingDays::SUNDAY);
        }
        let date_range = DateRange::from_mm_dd_yyyy(&raw.start_date, &raw.end_date);
        let mut meeting = Meeting::new(raw.begin_time, raw.end_time, days);
        meeting.date_range = date_range;
        meeting
    }
}

/// The upstream catalog's wire shape for a Section, as deserialized by the
/// ingestor. `is_primary_section` is deliberately
/// absent: it's derived by [`crate::model::compute_primary_sections`]
/// across a batch, not carried on the wire.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionWire {
    pub course_reference_number: String,
    pub term: String,
    pub subject_course: String,
    pub schedule_type_description: String,
    pub link_identifier: Option<String>,
    pub is_section_linked: bool,
    pub campus_description: String,
    pub meetings_faculty: Vec<RawMeetingFaculty>,
}

impl Section {
    /// Builds a Section from the upstream wire shape, given the
    /// ingest-time primary-section flag.
    pub fn from_wire(wire: SectionWire, is_primary_section: bool) -> Result<Self> {
        let meetings = wire
            .meetings_faculty
            .into_iter()
            .map(|faculty| Meeting::from(faculty.meeting_time))
            .collect();
        Section::new(
            wire.course_reference_number,
            wire.term,
            wire.subject_course,
            wire.schedule_type_description,
            wire.link_identifier,
            wire.is_section_linked,
            is_primary_section,
            wire.campus_description,
            meetings,
        )
    }
}

fn compute_time_bitmap(meetings: &[Meeting]) -> Result<TimeBitmap> {
    let mut bitmap = TimeBitmap::empty();
    for meeting in meetings {
        if meeting.is_asynchronous() {
            continue;
        }
        let begin = meeting.begin_time.as_deref().unwrap();
        let end = meeting.end_time.as_deref().unwrap();
        for day in meeting.days.names() {
            bitmap = bitmap.union(TimeBitmap::from_span(begin, end, day)?);
        }
    }
    Ok(bitmap)
}

/// Per-section enrollment availability, queried through `SectionStore`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct EnrollmentInfo {
    pub enrollment: Option<i64>,
    pub maximum_enrollment: Option<i64>,
    pub seats_available: Option<i64>,
    pub wait_capacity: Option<i64>,
    pub wait_count: Option<i64>,
    pub wait_available: Option<i64>,
}

impl EnrollmentInfo {
    /// True iff `seats_available` is null or non-positive.
    pub fn is_section_closed(&self) -> bool {
        match self.seats_available {
            None => true,
            Some(seats) => seats <= 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::meeting::MeetingDays;

    fn lecture(begin: &str, end: &str, days: MeetingDays) -> Meeting {
        Meeting::new(Some(begin.to_string()), Some(end.to_string()), days)
    }

    #[test]
    fn online_lecture_has_empty_bitmap() {
        let section = Section::new(
            "42750",
            "202309",
            "CSCI1030U",
            "LEC",
            None,
            false,
            true,
            "OT-Online",
            vec![Meeting::asynchronous()],
        )
        .unwrap();
        assert!(section.time_bitmap().is_empty());
    }

    #[test]
    fn meeting_bitmap_matches_from_span_union() {
        let section = Section::new(
            "40288",
            "202309",
            "MATH1010U",
            "LEC",
            Some("A1".to_string()),
            true,
            true,
            "OT-Main",
            vec![lecture(
                "1240",
                "1400",
                MeetingDays::TUESDAY | MeetingDays::FRIDAY,
            )],
        )
        .unwrap();

        let expected = TimeBitmap::from_span("1240", "1400", "tuesday")
            .unwrap()
            .union(TimeBitmap::from_span("1240", "1400", "friday").unwrap());
        assert_eq!(section.time_bitmap(), expected);
    }

    #[test]
    fn set_meetings_recomputes_bitmap() {
        let mut section = Section::new(
            "1",
            "202309",
            "X",
            "LEC",
            None,
            false,
            true,
            "OT-Main",
            vec![lecture("0810", "0830", MeetingDays::MONDAY)],
        )
        .unwrap();
        let before = section.time_bitmap();
        section
            .set_meetings(vec![lecture("1240", "1300", MeetingDays::FRIDAY)])
            .unwrap();
        assert_ne!(before, section.time_bitmap());
    }

    #[test]
    fn from_wire_converts_day_booleans_and_dates() {
        let wire = SectionWire {
            course_reference_number: "40288".to_string(),
            term: "202309".to_string(),
            subject_course: "MATH1010U".to_string(),
            schedule_type_description: "LEC".to_string(),
            link_identifier: Some("A1".to_string()),
            is_section_linked: true,
            campus_description: "OT-Main".to_string(),
            meetings_faculty: vec![RawMeetingFaculty {
                meeting_time: RawMeetingTime {
                    begin_time: Some("1240".to_string()),
                    end_time: Some("1400".to_string()),
                    monday: false,
                    tuesday: true,
                    wednesday: false,
                    thursday: false,
                    friday: true,
                    saturday: false,
                    sunday: false,
                    start_date: "09/04/2023".to_string(),
                    end_date: "12/15/2023".to_string(),
                },
            }],
        };

        let section = Section::from_wire(wire, true).unwrap();
        assert_eq!(section.meetings().len(), 1);
        let meeting = &section.meetings()[0];
        assert_eq!(
            meeting.days,
            MeetingDays::TUESDAY | MeetingDays::FRIDAY
        );
        assert!(meeting.date_range.is_some());

        let expected = TimeBitmap::from_span("1240", "1400", "tuesday")
            .unwrap()
            .union(TimeBitmap::from_span("1240", "1400", "friday").unwrap());
        assert_eq!(section.time_bitmap(), expected);
    }

    #[test]
    fn closed_section_detection() {
        let mut info = EnrollmentInfo::default();
        assert!(info.is_section_closed());
        info.seats_available = Some(0);
        assert!(info.is_section_closed());
        info.seats_available = Some(-1);
        assert!(info.is_section_closed());
        info.seats_available = Some(3);
        assert!(!info.is_section_closed());
    }
}
