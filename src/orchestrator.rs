//! Wires the pipeline end to end: SectionStore → CombinationEnumerator →
//! FilterPipeline → BitmapIndex → Solver → ScheduleExpander → Scorer.

use std::cmp::Reverse;
use std::time::Duration;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::config::SchedulerConfig;
use crate::enumerator::CombinationEnumerator;
use crate::error::{Result, SchedulerError};
use crate::expander::BitmapIndex;
use crate::filter::{FilterPipeline, HardFilters};
use crate::model::Schedule;
use crate::scorer::{Preferences, Scorer};
use crate::solver::Solver;
use crate::store::SectionStore;

/// A request named more courses than this is rejected outright: beyond this
/// the combinatorics make the CP solver impractical regardless of budget.
pub const MAX_COURSES: usize = 10;

#[derive(Debug, Clone, Deserialize)]
pub struct GenerateRequest {
    pub term: String,
    pub course_codes: Vec<String>,
    #[serde(default = "default_num_schedules")]
    pub num_schedules: usize,
    #[serde(default)]
    pub time_limit_seconds: Option<u64>,
    #[serde(default)]
    pub max_solutions: Option<usize>,
    #[serde(default)]
    pub filters: Option<HardFilters>,
    #[serde(default)]
    pub preferences: Option<Preferences>,
    #[serde(default = "default_solver")]
    pub solver: String,
}

fn default_num_schedules() -> usize {
    3
}

fn default_solver() -> String {
    "cp".to_string()
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerateResponse {
    pub schedules: Vec<Schedule>,
}

pub struct Orchestrator<'a> {
    store: &'a dyn SectionStore,
    config: SchedulerConfig,
}

impl<'a> Orchestrator<'a> {
    /// Builds an Orchestrator with process-level defaults loaded from
    /// `SchedulerConfig::load()`.
    pub fn new(store: &'a dyn SectionStore) -> Self {
        Orchestrator {
            store,
            config: SchedulerConfig::load().unwrap_or_default(),
        }
    }

    /// Builds an Orchestrator against an explicit config, bypassing the
    /// environment (used by callers that already loaded one, e.g. the CLI).
    pub fn with_config(store: &'a dyn SectionStore, config: SchedulerConfig) -> Self {
        Orchestrator { store, config }
    }

    #[instrument(skip(self, request), fields(term = %request.term, courses = request.course_codes.len()))]
    pub async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse> {
        if request.course_codes.len() > MAX_COURSES {
            return Err(SchedulerError::TooManyCourses(
                request.course_codes.len(),
                MAX_COURSES,
            ));
        }

        let sections = self
            .store
            .sections_for(&request.term, &request.course_codes)
            .await?;

        let mut tuples_per_course = IndexMap::new();
        for course_code in &request.course_codes {
            let tuples = CombinationEnumerator::combinations(course_code, &sections, self.store).await?;
            tuples_per_course.insert(course_code.clone(), tuples);
        }

        if let Some(filters) = &request.filters {
            tuples_per_course =
                FilterPipeline::apply_filters(tuples_per_course, filters, &sections, self.store).await?;
            for course_code in &request.course_codes {
                if tuples_per_course[course_code].is_empty() {
                    return Err(SchedulerError::NoValidCombinationsFor(course_code.clone()));
                }
            }
        }

        let bitmap_index = BitmapIndex::build(&tuples_per_course, &sections);

        let solver = Solver::parse(&request.solver)?;
        let time_limit = match (request.time_limit_seconds, request.max_solutions) {
            (Some(seconds), _) => Some(Duration::from_secs(seconds)),
            (None, Some(_)) => None,
            (None, None) => Some(Duration::from_secs(self.config.default_time_limit_seconds)),
        };

        let assignments = solver.solve(
            &request.course_codes,
            bitmap_index.options_per_course(),
            time_limit,
            request.max_solutions,
        );

        let mut schedules: Vec<Schedule> = assignments
            .iter()
            .flat_map(|assignment| bitmap_index.expand(assignment))
            .collect();

        match &request.preferences {
            Some(preferences) => {
                schedules.sort_by_key(|schedule| Reverse(Scorer::score(schedule, preferences, &sections)));
            }
            None => {}
        }
        schedules.truncate(request.num_schedules);

        Ok(GenerateResponse { schedules })
    }
}
