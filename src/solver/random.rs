//! Random search: repeated independent draws, rejecting conflicts and
//! duplicates. No completeness guarantee, but every emitted assignment is
//! sound and never repeated.

use std::collections::HashSet;

use indexmap::{IndexMap, IndexSet};
use rand::seq::IteratorRandom;

use crate::solver::{Assignment, Budget};
use crate::time_bitmap::TimeBitmap;

pub fn solve(
    course_codes: &[String],
    options_per_course: &IndexMap<String, IndexSet<TimeBitmap>>,
    budget: Budget,
) -> Vec<Assignment> {
    let domains: Vec<&IndexSet<TimeBitmap>> = course_codes
        .iter()
        .map(|course| options_per_course.get(course))
        .collect::<Option<Vec<_>>>()
        .unwrap_or_default();

    if domains.len() != course_codes.len() || domains.iter().any(|options| options.is_empty()) {
        return Vec::new();
    }

    let mut rng = rand::rng();
    let mut seen: HashSet<Vec<TimeBitmap>> = HashSet::new();
    let mut results = Vec::new();

    while !budget.expired() && !budget.is_full(results.len()) {
        let mut draw = Vec::with_capacity(domains.len());
        for options in &domains {
            draw.push(*options.iter().choose(&mut rng).expect("non-empty domain"));
        }

        if TimeBitmap::overlaps(draw.iter().copied()) {
            continue;
        }
        if !seen.insert(draw.clone()) {
            continue;
        }

        let assignment = course_codes
            .iter()
            .cloned()
            .zip(draw)
            .collect::<Assignment>();
        results.push(assignment);
    }

    results
}
