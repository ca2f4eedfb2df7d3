//! Compresses component tuples down to time-bitmap options for the solver,
//! then expands solver assignments back into concrete CRN schedules.

use std::collections::HashMap;

use indexmap::{IndexMap, IndexSet};

use crate::model::{Schedule, Section};
use crate::time_bitmap::TimeBitmap;

/// The compressed view of a course's surviving tuples the solver reasons
/// over, plus the index needed to recover concrete tuples afterward.
pub struct BitmapIndex {
    options_per_course: IndexMap<String, IndexSet<TimeBitmap>>,
    bitmap_to_tuples: HashMap<(String, TimeBitmap), Vec<Vec<String>>>,
}

impl BitmapIndex {
    /// Compresses each course's tuples to a set of distinct union bitmaps,
    /// dropping any tuple whose own sections conflict with each other
    /// (possible when a linked group is ill-formed).
    pub fn build(tuples_per_course: &IndexMap<String, Vec<Vec<String>>>, sections: &IndexMap<String, Section>) -> Self {
        let mut options_per_course = IndexMap::new();
        let mut bitmap_to_tuples: HashMap<(String, TimeBitmap), Vec<Vec<String>>> = HashMap::new();

        for (course, tuples) in tuples_per_course {
            let mut options: IndexSet<TimeBitmap> = IndexSet::new();
            for tuple in tuples {
                let bitmaps: Vec<TimeBitmap> = tuple.iter().map(|crn| sections[crn].time_bitmap()).collect();
                if TimeBitmap::overlaps(bitmaps.iter().copied()) {
                    continue;
                }
                let union = bitmaps
                    .into_iter()
                    .fold(TimeBitmap::empty(), TimeBitmap::union);

                options.insert(union);
                bitmap_to_tuples
                    .entry((course.clone(), union))
                    .or_default()
                    .push(tuple.clone());
            }
            options_per_course.insert(course.clone(), options);
        }

        BitmapIndex {
            options_per_course,
            bitmap_to_tuples,
        }
    }

    pub fn options_per_course(&self) -> &IndexMap<String, IndexSet<TimeBitmap>> {
        &self.options_per_course
    }

    /// Expands one solver assignment (one bitmap per course) into every
    /// concrete Schedule it could have come from: the Cartesian product of
    /// the CRN tuples that produced each chosen bitmap.
    pub fn expand(&self, assignment: &IndexMap<String, TimeBitmap>) -> Vec<Schedule> {
        let mut schedules = vec![Schedule::new()];

        for (course, bitmap) in assignment {
            let tuples = self
                .bitmap_to_tuples
                .get(&(course.clone(), *bitmap))
                .map(Vec::as_slice)
                .unwrap_or(&[]);

            let mut next = Vec::with_capacity(schedules.len() * tuples.len().max(1));
            for schedule in &schedules {
                for tuple in tuples {
                    let mut extended = schedule.clone();
                    extended.insert(course.clone(), tuple.clone());
                    next.push(extended);
                }
            }
            schedules = next;
        }

        schedules
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::InMemorySectionStore;
    use crate::store::SectionStore;

    #[tokio::test]
    async fn identical_bitmaps_compress_to_one_option() {
        let store = InMemorySectionStore::fixture();
        let sections = store
            .sections_for("202309", &["CSCI2000U".to_string()])
            .await
            .unwrap();
        let mut tuples = IndexMap::new();
        tuples.insert(
            "CSCI2000U".to_string(),
            vec![
                vec!["30020".to_string(), "30021".to_string()],
                vec!["30020".to_string(), "30022".to_string()],
            ],
        );
        let index = BitmapIndex::build(&tuples, &sections);
        // both tutorials meet at the identical time, so they compress to one option
        assert_eq!(index.options_per_course()["CSCI2000U"].len(), 1);
    }

    #[tokio::test]
    async fn expand_recovers_every_contributing_tuple() {
        let store = InMemorySectionStore::fixture();
        let sections = store
            .sections_for("202309", &["CRMN1000U".to_string()])
            .await
            .unwrap();
        let mut tuples = IndexMap::new();
        tuples.insert(
            "CRMN1000U".to_string(),
            vec![
                vec!["30010".to_string(), "30011".to_string()],
                vec!["30010".to_string(), "30012".to_string()],
            ],
        );
        let index = BitmapIndex::build(&tuples, &sections);
        assert_eq!(index.options_per_course()["CRMN1000U"].len(), 2);

        let mut expanded = 0;
        for bitmap in &index.options_per_course()["CRMN1000U"] {
            let mut assignment = IndexMap::new();
            assignment.insert("CRMN1000U".to_string(), *bitmap);
            expanded += index.expand(&assignment).len();
        }
        assert_eq!(expanded, 2);
    }
}
