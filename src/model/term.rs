//! Academic term identifiers.

use serde::{Deserialize, Serialize};

/// A single academic term as known to the upstream catalog.
///
/// Unlike the richer season/year term types some catalogs expose, the core
/// only needs the term as an opaque key plus the two fields upstream APIs
/// actually consult: a human description and whether registration is open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    pub code: String,
    pub description: String,
    pub registration_open: bool,
}

impl Term {
    pub fn new(code: impl Into<String>, description: impl Into<String>, registration_open: bool) -> Self {
        Term {
            code: code.into(),
            description: description.into(),
            registration_open,
        }
    }
}
