//! Native backtracking search over the exactly-one/no-overlap constraint
//! model described in the component design: rather than wrapping an
//! external CP-SAT library, branch-and-bound directly over each course's
//! bitmap domain, pruning as soon as a partial assignment conflicts. This
//! still enumerates every feasible assignment within budget, which a
//! wrapped ILP solver tuned for a single optimum would not give us for
//! free.

use indexmap::{IndexMap, IndexSet};

use crate::solver::{Assignment, Budget};
use crate::time_bitmap::TimeBitmap;

pub fn solve(
    course_codes: &[String],
    options_per_course: &IndexMap<String, IndexSet<TimeBitmap>>,
    budget: Budget,
) -> Vec<Assignment> {
    let domains: Vec<(String, Vec<TimeBitmap>)> = course_codes
        .iter()
        .map(|course| {
            let options = options_per_course
                .get(course)
                .map(|set| set.iter().copied().collect())
                .unwrap_or_default();
            (course.clone(), options)
        })
        .collect();

    if domains.iter().any(|(_, options)| options.is_empty()) {
        return Vec::new();
    }

    let mut results = Vec::new();
    let mut partial = Assignment::new();
    backtrack(&domains, 0, TimeBitmap::empty(), &mut partial, &budget, &mut results);
    results
}

fn backtrack(
    domains: &[(String, Vec<TimeBitmap>)],
    index: usize,
    running: TimeBitmap,
    partial: &mut Assignment,
    budget: &Budget,
    results: &mut Vec<Assignment>,
) {
    if budget.expired() || budget.is_full(results.len()) {
        return;
    }
    if index == domains.len() {
        results.push(partial.clone());
        return;
    }

    let (course, options) = &domains[index];
    for &option in options {
        if budget.expired() || budget.is_full(results.len()) {
            return;
        }
        if !running.intersect(option).is_empty() {
            continue;
        }
        partial.insert(course.clone(), option);
        backtrack(domains, index + 1, running.union(option), partial, budget, results);
        partial.shift_remove(course);
    }
}
