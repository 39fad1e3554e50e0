//! Reference frame identity

use serde::{Deserialize, Serialize};
use std::fmt;

/// A named coordinate system
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReferenceFrame {
    /// Unique key used by conversions
    pub id: String,
    /// Human-readable label
    pub name: String,
}

impl ReferenceFrame {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for ReferenceFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.id, self.name)
    }
}
