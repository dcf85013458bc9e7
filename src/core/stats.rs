// Cross-employee statistics derived from a summary list. Always defined,
// even for an empty list.

use serde::Serialize;

use crate::core::summary::WeeklySummary;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct AggregateStats {
    pub total_hours: f64,
    pub active_count: usize,
    pub included_count: usize,
    pub avg_hours: f64,
}

impl AggregateStats {
    // Policy: the average denominator is every included employee, not only
    // the active ones. Zero-hour rows pull the average down.
    pub fn of(summaries: &[WeeklySummary]) -> Self {
        let total_hours: f64 = summaries.iter().map(|summary| summary.total).sum();
        let active_count = summaries.iter().filter(|summary| summary.total > 0.0).count();
        let included_count = summaries.len();
        let avg_hours = if active_count > 0 {
            total_hours / included_count as f64
        } else {
            0.0
        };
        Self {
            total_hours,
            active_count,
            included_count,
            avg_hours,
        }
    }
}
