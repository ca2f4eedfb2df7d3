//! Assignment of one time-bitmap option per course such that no two chosen
//! bitmaps overlap. Two interchangeable implementations behind a sum type
//! rather than a trait object: the solver kind is chosen once per request
//! and never needs open-ended extension.

pub mod cp;
pub mod random;

use std::time::{Duration, Instant};

use indexmap::{IndexMap, IndexSet};

use crate::error::{Result, SchedulerError};
use crate::time_bitmap::TimeBitmap;

/// Wall-clock deadline and solution-count cap a solver must honor.
#[derive(Debug, Clone, Copy)]
pub struct Budget {
    pub deadline: Option<Instant>,
    pub max_solutions: Option<usize>,
}

impl Budget {
    pub fn new(time_limit: Option<Duration>, max_solutions: Option<usize>) -> Self {
        Budget {
            deadline: time_limit.map(|limit| Instant::now() + limit),
            max_solutions,
        }
    }

    pub fn expired(&self) -> bool {
        matches!(self.deadline, Some(deadline) if Instant::now() >= deadline)
    }

    pub fn is_full(&self, found: usize) -> bool {
        matches!(self.max_solutions, Some(max) if found >= max)
    }
}

/// One bitmap chosen per course, pairwise non-overlapping.
pub type Assignment = IndexMap<String, TimeBitmap>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Solver {
    Random,
    Cp,
}

impl Solver {
    pub fn parse(kind: &str) -> Result<Self> {
        match kind {
            "random" => Ok(Solver::Random),
            "cp" => Ok(Solver::Cp),
            other => Err(SchedulerError::InvalidSolverKind(other.to_string())),
        }
    }

    pub fn solve(
        &self,
        course_codes: &[String],
        options_per_course: &IndexMap<String, IndexSet<TimeBitmap>>,
        time_limit: Option<Duration>,
        max_solutions: Option<usize>,
    ) -> Vec<Assignment> {
        let budget = Budget::new(time_limit, max_solutions);
        match self {
            Solver::Random => random::solve(course_codes, options_per_course, budget),
            Solver::Cp => cp::solve(course_codes, options_per_course, budget),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_rejects_unknown_kind() {
        assert!(matches!(
            Solver::parse("ilp"),
            Err(SchedulerError::InvalidSolverKind(_))
        ));
    }

    #[test]
    fn parse_accepts_known_kinds() {
        assert_eq!(Solver::parse("random").unwrap(), Solver::Random);
        assert_eq!(Solver::parse("cp").unwrap(), Solver::Cp);
    }
}
