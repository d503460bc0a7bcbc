//! Subject (department) listed in the registrar's search form.

use serde::{Deserialize, Serialize};

/// A subject option such as `COMP` / "Computer Science (COMP)".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    /// Subject code submitted with the search form
    pub code: String,

    /// Display name from the dropdown
    pub name: String,
}

impl Subject {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}
