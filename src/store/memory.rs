//! An in-memory `SectionStore`, backed by `dashmap` for process-local
//! shared access. Good enough for tests and the demo CLI; a production
//! host would back the same trait with its own catalog client and a
//! persistent cache.

use async_trait::async_trait;
use dashmap::DashMap;
use indexmap::IndexMap;

use crate::error::Result;
use crate::model::compute_primary_sections;
use crate::model::meeting::{Meeting, MeetingDays};
use crate::model::section::{EnrollmentInfo, Section};
use crate::model::{Course, Term};
use crate::store::{EnrollmentInfoCache, LinkedCrnCache, SectionStore};

/// A `dashmap`-backed [`LinkedCrnCache`]: indefinite TTL, populated by the
/// catalog ingestor whenever a linked section's alternatives are resolved.
#[derive(Default)]
pub struct DashMapLinkedCrnCache {
    entries: DashMap<(String, String), Vec<Vec<String>>>,
}

impl DashMapLinkedCrnCache {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LinkedCrnCache for DashMapLinkedCrnCache {
    async fn get(&self, term: &str, crn: &str) -> Option<Vec<Vec<String>>> {
        self.entries
            .get(&(term.to_string(), crn.to_string()))
            .map(|entry| entry.clone())
    }

    async fn set(&self, term: &str, crn: &str, groups: Vec<Vec<String>>) {
        self.entries.insert((term.to_string(), crn.to_string()), groups);
    }
}

/// A `dashmap`-backed [`EnrollmentInfoCache`]. `invalidate` drops the entry
/// outright, forcing the next lookup to fall back to the caller's default.
#[derive(Default)]
pub struct DashMapEnrollmentInfoCache {
    entries: DashMap<(String, String), EnrollmentInfo>,
}

impl DashMapEnrollmentInfoCache {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EnrollmentInfoCache for DashMapEnrollmentInfoCache {
    async fn get(&self, term: &str, crn: &str) -> Option<EnrollmentInfo> {
        self.entries
            .get(&(term.to_string(), crn.to_string()))
            .map(|entry| *entry)
    }

    async fn set(&self, term: &str, crn: &str, info: EnrollmentInfo) {
        self.entries.insert((term.to_string(), crn.to_string()), info);
    }

    async fn invalidate(&self, term: &str, crn: &str) {
        self.entries.remove(&(term.to_string(), crn.to_string()));
    }
}

/// A fixed catalog snapshot backed by real [`LinkedCrnCache`]/
/// [`EnrollmentInfoCache`] implementors, held in memory.
///
/// A production host would swap these two caches for ones backed by a
/// shared/distributed store while keeping the same `SectionStore` impl.
pub struct InMemorySectionStore {
    sections: DashMap<String, Section>,
    linked_crns: DashMapLinkedCrnCache,
    enrollment: DashMapEnrollmentInfoCache,
    terms: DashMap<String, Term>,
    courses: DashMap<String, Course>,
}

impl InMemorySectionStore {
    pub fn new() -> Self {
        InMemorySectionStore {
            sections: DashMap::new(),
            linked_crns: DashMapLinkedCrnCache::new(),
            enrollment: DashMapEnrollmentInfoCache::new(),
            terms: DashMap::new(),
            courses: DashMap::new(),
        }
    }

    pub fn insert_section(&self, section: Section) {
        self.sections.insert(section.crn().to_string(), section);
    }

    pub fn set_linked_crns(&self, term: &str, crn: &str, groups: Vec<Vec<String>>) {
        self.linked_crns.entries.insert((term.to_string(), crn.to_string()), groups);
    }

    pub fn set_enrollment(&self, term: &str, crn: &str, info: EnrollmentInfo) {
        self.enrollment.entries.insert((term.to_string(), crn.to_string()), info);
    }

    pub fn insert_term(&self, term: Term) {
        self.terms.insert(term.code.clone(), term);
    }

    pub fn insert_course(&self, course: Course) {
        self.courses.insert(course.subject_course.clone(), course);
    }

    /// Looks up a registered Term by code, resolving the foreign key a
    /// Section's `term` field carries.
    pub fn term(&self, code: &str) -> Option<Term> {
        self.terms.get(code).map(|entry| entry.clone())
    }

    /// Looks up a registered Course by subject-course code, resolving the
    /// foreign key a Section's `subject_course` field carries.
    pub fn course(&self, subject_course: &str) -> Option<Course> {
        self.courses.get(subject_course).map(|entry| entry.clone())
    }

    /// The committed test catalog fixture referenced by spec scenarios: a
    /// term `"202309"` with BIOL1000U, EAP1000E, CRMN1000U, CSCI2000U,
    /// CSCI1030U, MATH1010U and a standalone online ENGL1020U section.
    pub fn fixture() -> Self {
        let store = InMemorySectionStore::new();
        const TERM: &str = "202309";

        store.insert_term(Term::new(TERM, "Fall 2023", true));
        for (code, title) in [
            ("BIOL1000U", "Introductory Biology"),
            ("EAP1000E", "English for Academic Purposes"),
            ("CRMN1000U", "Introduction to Criminology"),
            ("CSCI2000U", "Data Structures"),
            ("CSCI1030U", "Introduction to Computer Science"),
            ("MATH1010U", "Calculus I"),
            ("ENGL1020U", "Critical Writing"),
        ] {
            store.insert_course(Course::new(code, Some(title.to_string())));
        }

        let mut draft = Vec::new();

        // BIOL1000U / EAP1000E: single unlinked sections, same meeting time
        // so the pair is infeasible together.
        draft.push(raw(
            "30001",
            TERM,
            "BIOL1000U",
            "LEC",
            None,
            false,
            "OT-Main",
            vec![lecture("0810", "0830", MeetingDays::MONDAY)],
        ));
        draft.push(raw(
            "30002",
            TERM,
            "EAP1000E",
            "LEC",
            None,
            false,
            "OT-Main",
            vec![lecture("0810", "0830", MeetingDays::MONDAY)],
        ));

        // CRMN1000U: one primary LEC with two alternative tutorials, neither
        // of which conflicts with BIOL1000U's Monday slot.
        draft.push(raw(
            "30010",
            TERM,
            "CRMN1000U",
            "LEC",
            Some("CRMN1000U-A".to_string()),
            true,
            "OT-Main",
            vec![lecture("0910", "0930", MeetingDays::TUESDAY)],
        ));
        draft.push(raw(
            "30011",
            TERM,
            "CRMN1000U",
            "TUT",
            Some("CRMN1000U-A".to_string()),
            true,
            "OT-Main",
            vec![lecture("1010", "1030", MeetingDays::WEDNESDAY)],
        ));
        draft.push(raw(
            "30012",
            TERM,
            "CRMN1000U",
            "TUT",
            Some("CRMN1000U-A".to_string()),
            true,
            "OT-Main",
            vec![lecture("1010", "1030", MeetingDays::THURSDAY)],
        ));
        store.set_linked_crns(
            TERM,
            "30010",
            vec![vec!["30011".to_string()], vec!["30012".to_string()]],
        );

        // CSCI2000U: one primary LEC with seven alternative tutorials.
        draft.push(raw(
            "30020",
            TERM,
            "CSCI2000U",
            "LEC",
            Some("CSCI2000U-A".to_string()),
            true,
            "OT-Main",
            vec![lecture("1110", "1130", MeetingDays::THURSDAY)],
        ));
        let mut csci2000u_options = Vec::new();
        for n in 21..=27 {
            let crn = format!("300{n}");
            draft.push(raw(
                &crn,
                TERM,
                "CSCI2000U",
                "TUT",
                Some("CSCI2000U-A".to_string()),
                true,
                "OT-Main",
                vec![lecture("0910", "0930", MeetingDays::FRIDAY)],
            ));
            csci2000u_options.push(vec![crn]);
        }
        store.set_linked_crns(TERM, "30020", csci2000u_options);

        // CSCI1030U: LEC + LAB, used by the day-count scoring scenario.
        draft.push(raw(
            "42684",
            TERM,
            "CSCI1030U",
            "LEC",
            Some("CSCI1030U-A".to_string()),
            true,
            "OT-Main",
            vec![lecture(
                "0810",
                "0830",
                MeetingDays::MONDAY | MeetingDays::WEDNESDAY | MeetingDays::FRIDAY,
            )],
        ));
        draft.push(raw(
            "42946",
            TERM,
            "CSCI1030U",
            "LAB",
            Some("CSCI1030U-A".to_string()),
            true,
            "OT-Main",
            vec![lecture("1240", "1300", MeetingDays::THURSDAY)],
        ));
        store.set_linked_crns(TERM, "42684", vec![vec!["42946".to_string()]]);

        // MATH1010U: LEC + TUT, Tue/Fri 12:40-14:00 lecture from §8's
        // from_span scenario.
        draft.push(raw(
            "40288",
            TERM,
            "MATH1010U",
            "LEC",
            Some("MATH1010U-A".to_string()),
            true,
            "OT-Main",
            vec![lecture(
                "1240",
                "1400",
                MeetingDays::TUESDAY | MeetingDays::FRIDAY,
            )],
        ));
        draft.push(raw(
            "45708",
            TERM,
            "MATH1010U",
            "TUT",
            Some("MATH1010U-A".to_string()),
            true,
            "OT-Main",
            vec![lecture("1440", "1500", MeetingDays::WEDNESDAY)],
        ));
        store.set_linked_crns(TERM, "40288", vec![vec!["45708".to_string()]]);

        // ENGL1020U: a standalone online, asynchronous lecture.
        draft.push(raw(
            "42750",
            TERM,
            "ENGL1020U",
            "LEC",
            None,
            false,
            "OT-Online",
            vec![Meeting::asynchronous()],
        ));

        let primary_crns = compute_primary_sections(&draft);
        for mut section in draft {
            section.is_primary_section = primary_crns.contains(section.crn());
            store.insert_section(section);
        }

        // Every section in the fixture is open by default; scenarios that
        // need a closed section set it explicitly with `set_enrollment`.
        for entry in store.sections.iter() {
            store.set_enrollment(
                TERM,
                entry.key(),
                EnrollmentInfo {
                    enrollment: Some(10),
                    maximum_enrollment: Some(30),
                    seats_available: Some(20),
                    wait_capacity: Some(0),
                    wait_count: Some(0),
                    wait_available: Some(0),
                },
            );
        }

        store
    }
}

impl Default for InMemorySectionStore {
    fn default() -> Self {
        Self::new()
    }
}

fn lecture(begin: &str, end: &str, days: MeetingDays) -> Meeting {
    Meeting::new(Some(begin.to_string()), Some(end.to_string()), days)
}

#[allow(clippy::too_many_arguments)]
fn raw(
    crn: &str,
    term: &str,
    subject_course: &str,
    schedule_type_description: &str,
    link_identifier: Option<String>,
    is_section_linked: bool,
    campus_description: &str,
    meetings: Vec<Meeting>,
) -> Section {
    Section::new(
        crn,
        term,
        subject_course,
        schedule_type_description,
        link_identifier,
        is_section_linked,
        false,
        campus_description,
        meetings,
    )
    .expect("fixture meetings use valid slot boundaries")
}

#[async_trait]
impl SectionStore for InMemorySectionStore {
    async fn sections_for(&self, term: &str, course_codes: &[String]) -> Result<IndexMap<String, Section>> {
        let mut result = IndexMap::new();
        for code in course_codes {
            for entry in self.sections.iter() {
                let section = entry.value();
                if section.term == term && &section.subject_course == code {
                    result.insert(section.crn().to_string(), section.clone());
                }
            }
        }
        Ok(result)
    }

    async fn linked_crns(&self, section: &Section) -> Result<Vec<Vec<String>>> {
        if !section.is_section_linked {
            return Ok(Vec::new());
        }
        Ok(self
            .linked_crns
            .get(&section.term, section.crn())
            .await
            .unwrap_or_default())
    }

    async fn enrollment_info(&self, section: &Section, force_refresh: bool) -> Result<EnrollmentInfo> {
        if force_refresh {
            // this fixture has no upstream to refresh from; dropping the
            // cached entry just falls back to the open-by-default value.
            self.enrollment.invalidate(&section.term, section.crn()).await;
        }
        Ok(self
            .enrollment
            .get(&section.term, section.crn())
            .await
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixture_resolves_math1010u_lecture_bitmap() {
        let store = InMemorySectionStore::fixture();
        let sections = store
            .sections_for("202309", &["MATH1010U".to_string()])
            .await
            .unwrap();
        let lecture = &sections["40288"];
        let expected = crate::time_bitmap::TimeBitmap::from_span("1240", "1400", "tuesday")
            .unwrap()
            .union(crate::time_bitmap::TimeBitmap::from_span("1240", "1400", "friday").unwrap());
        assert_eq!(lecture.time_bitmap(), expected);
    }

    #[tokio::test]
    async fn online_section_has_empty_bitmap() {
        let store = InMemorySectionStore::fixture();
        let sections = store
            .sections_for("202309", &["ENGL1020U".to_string()])
            .await
            .unwrap();
        assert!(sections["42750"].time_bitmap().is_empty());
    }

    #[tokio::test]
    async fn enrollment_cache_invalidate_clears_the_entry() {
        let cache = DashMapEnrollmentInfoCache::new();
        cache
            .set(
                "202309",
                "30001",
                EnrollmentInfo {
                    seats_available: Some(5),
                    ..Default::default()
                },
            )
            .await;
        assert_eq!(
            cache.get("202309", "30001").await.unwrap().seats_available,
            Some(5)
        );
        cache.invalidate("202309", "30001").await;
        assert!(cache.get("202309", "30001").await.is_none());
    }

    #[tokio::test]
    async fn term_and_course_registries_resolve_section_foreign_keys() {
        let store = InMemorySectionStore::fixture();
        let sections = store
            .sections_for("202309", &["MATH1010U".to_string()])
            .await
            .unwrap();
        let section = &sections["40288"];

        let term = store.term(&section.term).expect("term is registered");
        assert_eq!(term.code, "202309");
        assert!(term.registration_open);

        let course = store
            .course(&section.subject_course)
            .expect("course is registered");
        assert_eq!(course.subject_course, "MATH1010U");
        assert_eq!(course.title.as_deref(), Some("Calculus I"));
    }

    #[tokio::test]
    async fn primary_sections_computed_correctly() {
        let store = InMemorySectionStore::fixture();
        let sections = store
            .sections_for("202309", &["CSCI2000U".to_string()])
            .await
            .unwrap();
        assert!(sections["30020"].is_primary_section);
        assert!(!sections["30021"].is_primary_section);
    }
}
