// Pivot of dated hour entries into the dense employee x day matrix.
//
// Purpose
// - Pure projection: entries in, roster-ordered WeeklySummary rows out.
//
// Responsibilities
// - Sum duplicate same-day entries into one slot, never drop them.
// - Keep `total == sum(daily_hours)` on every row it produces.
// - Exclude invalid entries with a log line instead of failing the pivot.
//
// Boundaries
// - No input or output besides tracing. Fetching lives in the aggregator.

use std::collections::HashMap;

use serde::Serialize;

use crate::core::entry::TimeCardEntry;
use crate::core::roster::{Employee, EmployeeFilter};
use crate::core::week::{DAYS_PER_WEEK, Week};

/// One employee's row for one week: Monday..Sunday slots plus the row total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklySummary {
    pub employee: Employee,
    pub daily_hours: [f64; DAYS_PER_WEEK],
    pub total: f64,
}

/// Builds the dense matrix for `week`. Every roster employee passing the
/// filter gets a row, all-zero when no entries matched; rows keep roster
/// order. Entries outside the window, for unknown employees, or with invalid
/// hours are skipped.
pub fn pivot_week(
    week: Week,
    roster: &[Employee],
    entries: &[TimeCardEntry],
    filter: &EmployeeFilter,
) -> Vec<WeeklySummary> {
    let mut slots: HashMap<&str, [f64; DAYS_PER_WEEK]> = HashMap::new();

    for entry in entries {
        if let Err(reason) = entry.validate() {
            tracing::warn!(entry_id = %entry.entry_id, %reason, "excluding invalid entry");
            continue;
        }
        let Some(slot) = week.day_index(entry.date) else {
            tracing::debug!(entry_id = %entry.entry_id, date = %entry.date, "entry outside window");
            continue;
        };
        // Duplicate same-day entries sum into the slot.
        slots.entry(entry.employee_id.as_str()).or_default()[slot] += entry.hours;
    }

    roster
        .iter()
        .filter(|employee| filter.matches(&employee.employee_id))
        .map(|employee| {
            let daily_hours = slots
                .get(employee.employee_id.as_str())
                .copied()
                .unwrap_or_default();
            WeeklySummary {
                employee: employee.clone(),
                total: daily_hours.iter().sum(),
                daily_hours,
            }
        })
        .collect()
}
