//! Expansion of a course code into valid component-section tuples.

use indexmap::IndexMap;

use crate::error::{Result, SchedulerError};
use crate::model::Section;
use crate::store::SectionStore;

/// For one course code, produces every CRN tuple that jointly constitutes a
/// valid enrollment: one primary section plus, if that section is linked,
/// one alternative from its linked groups.
pub struct CombinationEnumerator;

impl CombinationEnumerator {
    pub async fn combinations(
        course_code: &str,
        sections: &IndexMap<String, Section>,
        store: &dyn SectionStore,
    ) -> Result<Vec<Vec<String>>> {
        let mut tuples = Vec::new();

        for section in sections.values() {
            if section.subject_course != course_code || !section.is_primary_section {
                continue;
            }
            if !section.is_section_linked {
                tuples.push(vec![section.crn().to_string()]);
                continue;
            }
            for option in store.linked_crns(section).await? {
                let mut tuple = vec![section.crn().to_string()];
                tuple.extend(option);
                tuples.push(tuple);
            }
        }

        if tuples.is_empty() {
            return Err(SchedulerError::NoValidCombinationsFor(course_code.to_string()));
        }
        Ok(tuples)
    }
}
