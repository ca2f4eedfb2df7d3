//! Primary-section derivation: the ingest-time algorithm that decides which
//! Section of a linked group drives link-group lookup.
//!
//! The core itself never calls this — `Section::is_primary_section` is
//! expected to already be set when a `SectionStore` hands sections to the
//! enumerator. It is exposed so that a catalog ingestor (and this crate's own
//! fixture data) can derive the flag the same way, rather than duplicating
//! the rule ad hoc.

use std::collections::HashSet;

use indexmap::IndexMap;

use crate::model::section::Section;

/// Computes the set of CRNs that are primary sections, following the
/// `schedule_type_description`-count rule: the fewest-sections schedule
/// type in a linked group is the one students register into directly,
/// so it drives link-group lookup rather than any single `link_identifier`
/// grouping winning by raw section count.
///
/// Any unlinked section is primary. Linked sections are grouped by course;
/// within a course, the `schedule_type_description` with the fewest linked
/// sections is the primary type, ties broken by first-encountered order.
pub fn compute_primary_sections(sections: &[Section]) -> HashSet<String> {
    let mut primary = HashSet::new();

    // course -> schedule_type -> crns, insertion-ordered so tie-breaks are
    // deterministic and reproducible across runs.
    let mut groups: IndexMap<&str, IndexMap<&str, Vec<&str>>> = IndexMap::new();

    for section in sections {
        if !section.is_section_linked {
            primary.insert(section.course_reference_number.clone());
            continue;
        }
        groups
            .entry(section.subject_course.as_str())
            .or_default()
            .entry(section.schedule_type_description.as_str())
            .or_default()
            .push(section.course_reference_number.as_str());
    }

    for by_type in groups.values() {
        let mut min_type: Option<&str> = None;
        let mut min_count = usize::MAX;
        for (schedule_type, crns) in by_type {
            if crns.len() < min_count {
                min_count = crns.len();
                min_type = Some(schedule_type);
            }
        }
        if let Some(schedule_type) = min_type {
            for crn in &by_type[schedule_type] {
                primary.insert((*crn).to_string());
            }
        }
    }

    primary
}
