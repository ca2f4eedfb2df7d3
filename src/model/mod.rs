//! Domain types the scheduling core operates on.

pub mod course;
pub mod meeting;
pub mod primary;
pub mod schedule;
pub mod section;
pub mod term;

pub use course::Course;
pub use meeting::{DateRange, Meeting, MeetingDays};
pub use primary::compute_primary_sections;
pub use schedule::Schedule;
pub use section::{EnrollmentInfo, RawMeetingFaculty, RawMeetingTime, Section, SectionWire};
pub use term::Term;
