// A TimeCardEntry is one logged block of hours: one employee, one calendar
// day, a non-negative amount of hours. Entries are owned by the backing
// store; this subsystem only reads and validates them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeCardEntry {
    pub entry_id: Uuid,
    pub employee_id: String,
    pub date: NaiveDate,
    pub hours: f64,
    pub task: Option<String>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("negative hours {hours} on {date}")]
    NegativeHours { hours: f64, date: NaiveDate },

    #[error("non-finite hours on {date}")]
    NonFiniteHours { date: NaiveDate },
}

impl TimeCardEntry {
    /// Upstream data can carry bad hour values. An invalid entry is excluded
    /// from aggregation, never allowed to abort it.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.hours.is_finite() {
            return Err(ValidationError::NonFiniteHours { date: self.date });
        }
        if self.hours < 0.0 {
            return Err(ValidationError::NegativeHours {
                hours: self.hours,
                date: self.date,
            });
        }
        Ok(())
    }
}
