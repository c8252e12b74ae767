//! Display formatting and small UI helpers.
//!
//! Everything here is pure except [`Debouncer`] and [`Throttler`], which
//! retain private timer state for their own lifetime.

use std::time::Duration;

use chrono::{Datelike, Local, NaiveDate};
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::dto::HealthStatus;

// ============================================================================
// Dates
// ============================================================================

/// "Sat, Jun 1" — fixed en-US convention.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%a, %b %-d").to_string()
}

/// "Jun 1"
pub fn format_date_short(date: NaiveDate) -> String {
    date.format("%b %-d").to_string()
}

/// "Saturday, June 1, 2024"
pub fn format_date_full(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

/// Today as a calendar date in the *local* timezone.
///
/// The backend stamps its own dates with its own clock; near midnight the
/// two can disagree by a day depending on where the client runs. The
/// original system never reconciled this, and neither do we — callers
/// comparing against server dates inherit the risk.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Today in ISO 8601 date form, e.g. "2024-06-01".
pub fn today_iso() -> String {
    today().format("%Y-%m-%d").to_string()
}

pub fn is_today(date: NaiveDate) -> bool {
    date == today()
}

pub fn week_day_names() -> [&'static str; 7] {
    ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"]
}

// ============================================================================
// Status display mapping
// ============================================================================

/// CSS class tag for a health status. Unrecognized statuses degrade to the
/// "good" styling.
pub fn health_class(status: &HealthStatus) -> &'static str {
    match status {
        HealthStatus::Excellent => "health-excellent",
        HealthStatus::Good => "health-good",
        HealthStatus::NeedsImprovement => "health-needs_improvement",
        HealthStatus::Critical => "health-critical",
        HealthStatus::Other(_) => "health-good",
    }
}

/// Human label for a health status. Unrecognized statuses pass through
/// literally.
pub fn health_label(status: &HealthStatus) -> String {
    match status {
        HealthStatus::Excellent => "Excellent".into(),
        HealthStatus::Good => "Good".into(),
        HealthStatus::NeedsImprovement => "Needs Improvement".into(),
        HealthStatus::Critical => "Critical".into(),
        HealthStatus::Other(raw) => raw.clone(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreakTier {
    Hot,
    Warm,
    Cool,
}

impl StreakTier {
    pub fn class(self) -> &'static str {
        match self {
            StreakTier::Hot => "hot",
            StreakTier::Warm => "warm",
            StreakTier::Cool => "cool",
        }
    }
}

/// Badge tier for a current streak: ≥7 days burns hot, ≥3 warm, else cool.
pub fn streak_tier(streak: u32) -> StreakTier {
    if streak >= 7 {
        StreakTier::Hot
    } else if streak >= 3 {
        StreakTier::Warm
    } else {
        StreakTier::Cool
    }
}

/// CSS class bucket for a 0–100 score.
pub fn score_class(score: f64) -> &'static str {
    if score >= 75.0 {
        "score-75-100"
    } else if score >= 50.0 {
        "score-50-75"
    } else if score >= 25.0 {
        "score-25-50"
    } else {
        "score-0-25"
    }
}

// ============================================================================
// Value animation
// ============================================================================

/// Integer counter animation from `start` to `end` over `duration`, eased
/// with `1 - (1-p)^2`. The shell drives it from its frame callback by asking
/// for `value_at(elapsed)` until [`ValueAnimation::is_done`].
#[derive(Debug, Clone, Copy)]
pub struct ValueAnimation {
    pub start: i64,
    pub end: i64,
    pub duration: Duration,
}

impl ValueAnimation {
    pub fn new(start: i64, end: i64, duration: Duration) -> Self {
        Self {
            start,
            end,
            duration,
        }
    }

    /// Displayed integer after `elapsed`. Monotonic for monotonic input and
    /// clamped at `end` once the duration is reached.
    pub fn value_at(&self, elapsed: Duration) -> i64 {
        let progress = if self.duration.is_zero() {
            1.0
        } else {
            (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
        };
        let eased = 1.0 - (1.0 - progress) * (1.0 - progress);
        self.start + ((self.end - self.start) as f64 * eased).round() as i64
    }

    pub fn is_done(&self, elapsed: Duration) -> bool {
        elapsed >= self.duration
    }
}

// ============================================================================
// Debounce / throttle
// ============================================================================

/// Trailing-edge debounce: each call cancels the pending one and schedules
/// anew, so only the last call in any `wait`-length idle window fires.
#[derive(Debug)]
pub struct Debouncer {
    wait: Duration,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    pub fn new(wait: Duration) -> Self {
        Self {
            wait,
            pending: None,
        }
    }

    pub fn call<F>(&mut self, f: F)
    where
        F: FnOnce() + Send + 'static,
    {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
        let wait = self.wait;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(wait).await;
            f();
        }));
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

/// Leading-edge throttle: fires immediately, then suppresses calls until
/// `limit` has elapsed since the last fire.
#[derive(Debug)]
pub struct Throttler {
    limit: Duration,
    last_fired: Option<Instant>,
}

impl Throttler {
    pub fn new(limit: Duration) -> Self {
        Self {
            limit,
            last_fired: None,
        }
    }

    /// Returns whether `f` actually ran.
    pub fn call<F: FnOnce()>(&mut self, f: F) -> bool {
        let now = Instant::now();
        if let Some(last) = self.last_fired {
            if now.duration_since(last) < self.limit {
                return false;
            }
        }
        self.last_fired = Some(now);
        f();
        true
    }
}

// ============================================================================
// Markup escaping
// ============================================================================

/// Entity-escapes text bound for templated markup. Every user-supplied
/// string goes through here before interpolation.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Day-of-month for calendar cells.
pub fn day_of_month(date: NaiveDate) -> u32 {
    date.day()
}
