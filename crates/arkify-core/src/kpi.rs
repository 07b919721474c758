use crate::duration::parse_days;
use crate::project::Project;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CURRENCY: &str = "€";
const HEADLINE_SEPARATOR: &str = " • ";

// ---------------------------------------------------------------------------
// TimelineComparison
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineComparison {
    pub expected: String,
    pub actual: String,
    pub expected_days: f64,
    pub actual_days: f64,
}

// ---------------------------------------------------------------------------
// Kpis
// ---------------------------------------------------------------------------

/// Headline numbers for a project, raw and display-formatted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kpis {
    pub total_hours: f64,
    pub total_cost: f64,
    pub cost_per_hour: f64,
    pub hours_display: String,
    pub cost_display: String,
    pub cost_per_hour_display: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub users: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signups: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revenue: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revenue_display: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeline_comparison: Option<TimelineComparison>,
    /// `"12h • €40 • 127 users"`, shown under the project name.
    pub headline: String,
}

impl Kpis {
    pub fn calculate(project: &Project, currency: &str) -> Self {
        let hours = project.hours.unwrap_or(0.0);
        let cost = project.cost.unwrap_or(0.0);
        let cost_per_hour = if hours > 0.0 {
            round_to(cost / hours, 2)
        } else {
            0.0
        };

        let (users, signups, revenue) = match &project.results {
            Some(r) => (
                Some(r.users.unwrap_or(0.0)),
                Some(r.signups.unwrap_or(0.0)),
                Some(r.revenue.unwrap_or(0.0)),
            ),
            None => (None, None, None),
        };

        let timeline_comparison = match (&project.expectations, &project.reality) {
            (Some(expected), Some(actual)) => Some(TimelineComparison {
                expected: expected
                    .timeline
                    .as_ref()
                    .map(|t| t.to_string())
                    .unwrap_or_default(),
                actual: actual
                    .timeline
                    .as_ref()
                    .map(|t| t.to_string())
                    .unwrap_or_default(),
                expected_days: parse_days(expected.timeline.as_ref()),
                actual_days: parse_days(actual.timeline.as_ref()),
            }),
            _ => None,
        };

        let hours_display = format_hours(hours);
        let cost_display = format_cost(cost, currency);

        let mut headline = vec![hours_display.clone(), cost_display.clone()];
        if let Some(u) = project.results.as_ref().and_then(|r| r.users) {
            headline.push(format!("{u} users"));
        }

        Self {
            total_hours: hours,
            total_cost: cost,
            cost_per_hour,
            hours_display,
            cost_display,
            cost_per_hour_display: format_cost(cost_per_hour, currency),
            users,
            signups,
            revenue,
            revenue_display: revenue.map(|r| format_cost(r, currency)),
            timeline_comparison,
            headline: headline.join(HEADLINE_SEPARATOR),
        }
    }
}

// ---------------------------------------------------------------------------
// Formatting
// ---------------------------------------------------------------------------

pub fn format_hours(hours: f64) -> String {
    if hours < 1.0 {
        format!("{}min", (hours * 60.0) as i64)
    } else if hours == 1.0 {
        "1 hour".to_string()
    } else if hours < 24.0 {
        format!("{}h", hours as i64)
    } else {
        format!("{:.1} days", hours / 24.0)
    }
}

pub fn format_cost(cost: f64, currency: &str) -> String {
    if cost == 0.0 {
        "Free".to_string()
    } else if cost < 1.0 {
        format!("{currency}{cost:.2}")
    } else {
        format!("{currency}{}", cost as i64)
    }
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
