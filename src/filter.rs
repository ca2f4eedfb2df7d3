//! Hard filters applied to candidate component tuples before compression.

use std::collections::HashMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::Section;
use crate::store::SectionStore;
use crate::time_bitmap::{TimeBitmap, DAYS};

/// The four recognized hard filters. Unset fields disable that filter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HardFilters {
    #[serde(default)]
    pub remove_downtown_classes: bool,
    #[serde(default)]
    pub remove_classes_before: Option<String>,
    #[serde(default)]
    pub remove_classes_after: Option<String>,
    #[serde(default)]
    pub remove_closed_sections: bool,
}

impl HardFilters {
    fn is_active(&self) -> bool {
        self.remove_downtown_classes
            || self.remove_classes_before.is_some()
            || self.remove_classes_after.is_some()
            || self.remove_closed_sections
    }
}

/// Per-CRN memo of filter verdicts, valid for a single `apply_filters` call.
type Memo = HashMap<String, bool>;

pub struct FilterPipeline;

impl FilterPipeline {
    /// Drops any tuple that contains a section matching an enabled filter.
    pub async fn apply_filters(
        tuples_per_course: IndexMap<String, Vec<Vec<String>>>,
        filters: &HardFilters,
        sections: &IndexMap<String, Section>,
        store: &dyn SectionStore,
    ) -> Result<IndexMap<String, Vec<Vec<String>>>> {
        if !filters.is_active() {
            return Ok(tuples_per_course);
        }

        let mut memo: Memo = HashMap::new();
        let mut result = IndexMap::new();

        for (course, tuples) in tuples_per_course {
            let mut surviving = Vec::new();
            for tuple in tuples {
                let mut filtered = false;
                for crn in &tuple {
                    if Self::is_section_filtered(crn, sections, filters, store, &mut memo).await? {
                        filtered = true;
                        break;
                    }
                }
                if !filtered {
                    surviving.push(tuple);
                }
            }
            result.insert(course, surviving);
        }

        Ok(result)
    }

    /// True if `crn` matches any enabled filter. Evaluated cheapest-first
    /// and short-circuits: `remove_closed_sections` is the only predicate
    /// needing an oracle round trip, so it runs last.
    async fn is_section_filtered(
        crn: &str,
        sections: &IndexMap<String, Section>,
        filters: &HardFilters,
        store: &dyn SectionStore,
        memo: &mut Memo,
    ) -> Result<bool> {
        if let Some(verdict) = memo.get(crn) {
            return Ok(*verdict);
        }

        let section = &sections[crn];
        let verdict = Self::evaluate(section, filters, store).await?;
        memo.insert(crn.to_string(), verdict);
        Ok(verdict)
    }

    async fn evaluate(section: &Section, filters: &HardFilters, store: &dyn SectionStore) -> Result<bool> {
        if filters.remove_downtown_classes && section.is_downtown() {
            return Ok(true);
        }
        if let Some(before) = &filters.remove_classes_before {
            if !section.time_bitmap().intersect(mask_before(before)?).is_empty() {
                return Ok(true);
            }
        }
        if let Some(after) = &filters.remove_classes_after {
            if !section.time_bitmap().intersect(mask_after(after)?).is_empty() {
                return Ok(true);
            }
        }
        if filters.remove_closed_sections {
            let info = store.enrollment_info(section, false).await?;
            if info.is_section_closed() {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

/// Bitmap covering every slot from the start of the day up to (and
/// including) `t`, across all days. `t` must equal a slot's end boundary.
fn mask_before(t: &str) -> Result<TimeBitmap> {
    let mut mask = TimeBitmap::empty();
    for day in DAYS {
        mask = mask.union(TimeBitmap::from_span(crate::time_bitmap::SLOTS[0].0, t, day)?);
    }
    Ok(mask)
}

/// Bitmap covering every slot from `t` to the end of the day, across all
/// days. `t` must equal a slot's begin boundary.
fn mask_after(t: &str) -> Result<TimeBitmap> {
    let mut mask = TimeBitmap::empty();
    let last_slot_end = crate::time_bitmap::SLOTS[crate::time_bitmap::SLOT_COUNT - 1].1;
    for day in DAYS {
        mask = mask.union(TimeBitmap::from_span(t, last_slot_end, day)?);
    }
    Ok(mask)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::InMemorySectionStore;

    #[tokio::test]
    async fn downtown_filter_removes_downtown_sections() {
        let store = InMemorySectionStore::fixture();
        store.insert_section(
            crate::model::Section::new(
                "90001",
                "202309",
                "TEST1000U",
                "LEC",
                None,
                false,
                true,
                "OT-Downtown Oshawa",
                vec![crate::model::Meeting::asynchronous()],
            )
            .unwrap(),
        );
        let sections = store
            .sections_for("202309", &["TEST1000U".to_string()])
            .await
            .unwrap();
        let mut tuples = IndexMap::new();
        tuples.insert("TEST1000U".to_string(), vec![vec!["90001".to_string()]]);

        let filters = HardFilters {
            remove_downtown_classes: true,
            ..Default::default()
        };
        let result = FilterPipeline::apply_filters(tuples, &filters, &sections, &store)
            .await
            .unwrap();
        assert!(result["TEST1000U"].is_empty());
    }

    #[tokio::test]
    async fn no_filters_is_a_no_op() {
        let store = InMemorySectionStore::fixture();
        let sections = store
            .sections_for("202309", &["BIOL1000U".to_string()])
            .await
            .unwrap();
        let mut tuples = IndexMap::new();
        tuples.insert("BIOL1000U".to_string(), vec![vec!["30001".to_string()]]);
        let result = FilterPipeline::apply_filters(tuples.clone(), &HardFilters::default(), &sections, &store)
            .await
            .unwrap();
        assert_eq!(result, tuples);
    }

    #[tokio::test]
    async fn remove_closed_sections_filters_zero_seats() {
        let store = InMemorySectionStore::fixture();
        store.set_enrollment(
            "202309",
            "30001",
            crate::model::EnrollmentInfo {
                seats_available: Some(0),
                ..Default::default()
            },
        );
        let sections = store
            .sections_for("202309", &["BIOL1000U".to_string()])
            .await
            .unwrap();
        let mut tuples = IndexMap::new();
        tuples.insert("BIOL1000U".to_string(), vec![vec!["30001".to_string()]]);
        let filters = HardFilters {
            remove_closed_sections: true,
            ..Default::default()
        };
        let result = FilterPipeline::apply_filters(tuples, &filters, &sections, &store)
            .await
            .unwrap();
        assert!(result["BIOL1000U"].is_empty());
    }
}
