// Employee roster records and the per-view employee filter.
//
// Purpose
// - Read-only domain records; the roster is owned and mutated elsewhere.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub employee_id: String,
    pub display_name: String,
    pub designation: Option<String>,
    pub department: Option<String>,
}

/// Restricts which roster rows a summary includes. `All` is the default view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EmployeeFilter {
    #[default]
    All,
    One(String),
}

impl EmployeeFilter {
    pub fn from_option(employee_id: Option<String>) -> Self {
        match employee_id {
            Some(id) => Self::One(id),
            None => Self::All,
        }
    }

    pub fn matches(&self, employee_id: &str) -> bool {
        match self {
            Self::All => true,
            Self::One(id) => id == employee_id,
        }
    }

    pub fn as_option(&self) -> Option<&str> {
        match self {
            Self::All => None,
            Self::One(id) => Some(id),
        }
    }
}
