//! # Wire contract
//!
//! Every JSON shape exchanged with the backend, in one module.
//!
//! Conventions:
//! - `*Request` → serialized into an outbound body
//! - everything else → deserialized from a response
//! - client-side validation is expressed via `validator` derive macros
//! - timestamps arrive as naive ISO strings (the backend stamps in its own
//!   clock without an offset), so they map to `NaiveDateTime`

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use validator::Validate;

// ============================================================================
// Habits
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Habit {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

/// Health status as the backend reports it. The four known buckets get
/// typed variants; anything new the server starts sending survives as
/// `Other` instead of failing deserialization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    Excellent,
    Good,
    NeedsImprovement,
    Critical,
    #[serde(untagged)]
    Other(String),
}

/// Server-computed health judgment: categorical status plus the display
/// accents (hex color, emoji icon) the backend picks for it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthIndicator {
    pub status: HealthStatus,
    #[serde(default)]
    pub color: Option<String>,
    pub icon: String,
}

/// The view-model the client actually holds: a habit together with its
/// server-computed statistics. Streaks, score, and health are opaque here —
/// the client never derives them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HabitStatistics {
    pub habit: Habit,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub consistency_score: f64,
    pub health: HealthIndicator,
    pub total_completions: u64,
}

/// POST /habits
#[derive(Debug, Clone, Serialize, Validate)]
pub struct CreateHabitRequest {
    #[validate(length(min = 1, max = 100, message = "Habit name must be 1-100 characters"))]
    pub name: String,
    pub description: String,
}

/// PUT /habits/{id} — partial update, absent fields are left untouched
#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct UpdateHabitRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 100, message = "Habit name must be 1-100 characters"))]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// POST /habits/{id}/toggle — `{}` toggles today, `{date}` a specific day
#[derive(Debug, Clone, Default, Serialize)]
pub struct ToggleRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

/// Response for POST /habits/{id}/toggle
#[derive(Debug, Clone, Deserialize)]
pub struct ToggleOutcome {
    /// true → the day is now completed, false → the completion was removed
    pub completed: bool,
    pub date: NaiveDate,
    pub stats: HabitStatistics,
}

/// One cell of the 30-day history calendar
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DayRecord {
    pub date: NaiveDate,
    pub completed: bool,
}

/// DELETE /habits/{id} confirmation
#[derive(Debug, Clone, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

// ============================================================================
// Dashboard & reports
// ============================================================================

/// GET /dashboard
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardSummary {
    pub habits: Vec<HabitStatistics>,
    pub overall_score: f64,
    pub overall_health: HealthIndicator,
    pub total_habits: u32,
    pub today_completions: u32,
    pub date: NaiveDate,
}

/// GET /reports, POST /reports/generate, GET /reports/latest
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeeklyReport {
    pub id: i64,
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub overall_score: f64,
    pub total_habits: u32,
    pub total_completions: u64,
    #[serde(default)]
    pub report_data: Option<serde_json::Value>,
    #[serde(default)]
    pub generated_at: Option<NaiveDateTime>,
}
