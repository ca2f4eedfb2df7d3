//! A Schedule: one concrete CRN tuple per requested course.

use indexmap::IndexMap;

/// Maps `course_code -> [crn, ...]`. Insertion order follows the order
/// courses were requested, which is what "insertion order" means in the
/// Orchestrator's response ordering contract.
pub type Schedule = IndexMap<String, Vec<String>>;
