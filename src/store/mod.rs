//! The read-only boundary between the scheduling core and the upstream
//! catalog. The core never mutates a Section; it only resolves sections,
//! their linked-CRN groups, and enrollment snapshots through this trait.

pub mod memory;

use async_trait::async_trait;
use indexmap::IndexMap;

use crate::error::Result;
use crate::model::{EnrollmentInfo, Section};

/// A single batch lookup of sections plus the two on-demand oracles
/// (`linked_crns`, `enrollment_info`) the enumerator and filter pipeline
/// call into during a request.
#[async_trait]
pub trait SectionStore: Send + Sync {
    /// All sections for the requested courses within `term`, keyed by CRN.
    async fn sections_for(&self, term: &str, course_codes: &[String]) -> Result<IndexMap<String, Section>>;

    /// Alternative CRN groups completing `section`'s course. `[]` if
    /// `section.is_section_linked` is false.
    async fn linked_crns(&self, section: &Section) -> Result<Vec<Vec<String>>>;

    /// Cached enrollment snapshot for `section`, refetched from upstream if
    /// `force_refresh` or the cached entry has expired.
    async fn enrollment_info(&self, section: &Section, force_refresh: bool) -> Result<EnrollmentInfo>;
}

/// Host-provided cache for `linked_crns` lookups. Indefinite TTL: link
/// groups only change on catalog refresh, which invalidates the whole cache
/// out of band.
#[async_trait]
pub trait LinkedCrnCache: Send + Sync {
    async fn get(&self, term: &str, crn: &str) -> Option<Vec<Vec<String>>>;
    async fn set(&self, term: &str, crn: &str, groups: Vec<Vec<String>>);
}

/// Host-provided cache for `enrollment_info` lookups, with a TTL the cache
/// itself enforces (the core only ever asks for the current cached value or
/// a forced refresh).
#[async_trait]
pub trait EnrollmentInfoCache: Send + Sync {
    async fn get(&self, term: &str, crn: &str) -> Option<EnrollmentInfo>;
    async fn set(&self, term: &str, crn: &str, info: EnrollmentInfo);
    async fn invalidate(&self, term: &str, crn: &str);
}
