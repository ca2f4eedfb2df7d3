//! Course-schedule generation core.
//!
//! Given a term, a list of course codes, optional hard filters and soft
//! preferences, produces up to N valid, conflict-free, top-scoring weekly
//! schedules. See [`orchestrator::Orchestrator`] for the entry point.

pub mod config;
pub mod enumerator;
pub mod error;
pub mod expander;
pub mod filter;
pub mod logging;
pub mod model;
pub mod orchestrator;
pub mod scorer;
pub mod solver;
pub mod store;
pub mod time_bitmap;

pub use error::{Result, SchedulerError};
pub use orchestrator::{GenerateRequest, GenerateResponse, Orchestrator};
