//! Preference scoring for ranking candidate Schedules.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::model::{Schedule, Section};
use crate::time_bitmap::TimeBitmap;

/// Recognized soft preferences. Unknown keys in the wire request are simply
/// dropped during deserialization rather than rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub more_free_days: bool,
    #[serde(default)]
    pub less_breaks_between_classes: bool,
    #[serde(default)]
    pub more_online_classes: bool,
}

pub struct Scorer;

impl Scorer {
    /// Computes a schedule's preference score. Higher is better. Determinism
    /// follows from the fact that every input here is an owned snapshot.
    pub fn score(schedule: &Schedule, preferences: &Preferences, sections: &IndexMap<String, Section>) -> i64 {
        let mut score = 0i64;
        let bitmap = schedule_bitmap(schedule, sections);

        if preferences.more_free_days {
            score -= count_days_with_scheduled_classes(bitmap) as i64;
        }
        if preferences.less_breaks_between_classes {
            score -= count_breaks_between_classes(bitmap) as i64;
        }
        if preferences.more_online_classes {
            score += count_online_classes(schedule, sections) as i64;
        }
        score
    }
}

fn schedule_bitmap(schedule: &Schedule, sections: &IndexMap<String, Section>) -> TimeBitmap {
    schedule
        .values()
        .flatten()
        .map(|crn| sections[crn].time_bitmap())
        .fold(TimeBitmap::empty(), TimeBitmap::union)
}

pub fn count_days_with_scheduled_classes(bitmap: TimeBitmap) -> u32 {
    crate::time_bitmap::DAYS
        .iter()
        .filter(|day| bitmap.occupies_day(day).unwrap_or(false))
        .count() as u32
}

pub fn count_breaks_between_classes(bitmap: TimeBitmap) -> u32 {
    bitmap.count_idle_gaps_per_day().iter().sum()
}

fn count_online_classes(schedule: &Schedule, sections: &IndexMap<String, Section>) -> usize {
    schedule
        .values()
        .flatten()
        .filter(|crn| sections[crn.as_str()].is_online())
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::InMemorySectionStore;
    use crate::store::SectionStore;

    #[tokio::test]
    async fn count_days_with_scheduled_classes_matches_scenario() {
        let store = InMemorySectionStore::fixture();
        let sections = store
            .sections_for("202309", &["CSCI1030U".to_string(), "MATH1010U".to_string()])
            .await
            .unwrap();

        let mut schedule = Schedule::new();
        schedule.insert(
            "CSCI1030U".to_string(),
            vec!["42684".to_string(), "42946".to_string()],
        );
        schedule.insert(
            "MATH1010U".to_string(),
            vec!["40288".to_string(), "45708".to_string()],
        );

        let bitmap = schedule_bitmap(&schedule, &sections);
        assert_eq!(count_days_with_scheduled_classes(bitmap), 5);
    }

    #[tokio::test]
    async fn score_is_deterministic() {
        let store = InMemorySectionStore::fixture();
        let sections = store
            .sections_for("202309", &["BIOL1000U".to_string()])
            .await
            .unwrap();
        let mut schedule = Schedule::new();
        schedule.insert("BIOL1000U".to_string(), vec!["30001".to_string()]);
        let preferences = Preferences {
            more_free_days: true,
            less_breaks_between_classes: true,
            more_online_classes: true,
        };
        let first = Scorer::score(&schedule, &preferences, &sections);
        let second = Scorer::score(&schedule, &preferences, &sections);
        assert_eq!(first, second);
    }

    #[test]
    fn unknown_preference_keys_are_ignored() {
        let value = serde_json::json!({
            "more_free_days": true,
            "color_scheme": "dark"
        });
        let preferences: Preferences = serde_json::from_value(value).unwrap();
        assert!(preferences.more_free_days);
        assert!(!preferences.more_online_classes);
    }
}
