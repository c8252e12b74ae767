//! Pure view functions: typed state in, markup out.
//!
//! Each function regenerates the entire markup of its section; the shell
//! swaps the container's contents wholesale and re-wires listeners to the
//! `data-habit-id` hooks. No function here reads or mutates state — the
//! controller decides what to render and when.
//!
//! User-supplied strings (habit names, descriptions) are always routed
//! through [`util::escape_html`] before interpolation.

use chrono::NaiveDate;
use std::fmt::Write;

use crate::dto::{DayRecord, HabitStatistics, HealthIndicator, WeeklyReport};
use crate::util::{
    self, day_of_month, escape_html, format_date_full, format_date_short, health_class,
    health_label, score_class, streak_tier,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

impl ToastKind {
    pub fn class(self) -> &'static str {
        match self {
            ToastKind::Success => "success",
            ToastKind::Error => "error",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            ToastKind::Success => "✓",
            ToastKind::Error => "⚠",
        }
    }
}

pub fn render_toast(kind: ToastKind, message: &str) -> String {
    format!(
        r#"<div class="toast {}"><span>{}</span><span>{}</span></div>"#,
        kind.class(),
        kind.icon(),
        escape_html(message),
    )
}

pub fn render_health_badge(health: &HealthIndicator) -> String {
    format!(
        r#"<div class="health-badge {}"><span class="health-icon">{}</span><span class="health-text">{}</span></div>"#,
        health_class(&health.status),
        health.icon,
        escape_html(&health_label(&health.status)),
    )
}

/// The original derives "completed today" from the streak being alive; the
/// backend contract carries no per-day flag on the card, so this coarse
/// proxy is kept as-is.
pub fn is_completed_today(stats: &HabitStatistics) -> bool {
    stats.current_streak > 0
}

pub fn render_habit_grid(habits: &[HabitStatistics]) -> String {
    if habits.is_empty() {
        return r#"<div class="empty-state">
    <div class="empty-state-icon">📝</div>
    <h3>No habits yet</h3>
    <p>Start building better habits by adding your first one!</p>
</div>"#
            .to_owned();
    }

    let mut out = String::new();
    for (index, stats) in habits.iter().enumerate() {
        out.push_str(&render_habit_card(stats, index));
    }
    out
}

pub fn render_habit_card(stats: &HabitStatistics, index: usize) -> String {
    let habit = &stats.habit;
    let name = escape_html(&habit.name);
    let description = habit
        .description
        .as_deref()
        .filter(|d| !d.is_empty())
        .map(|d| format!("<p>{}</p>", escape_html(d)))
        .unwrap_or_default();

    let streak_badge = if stats.current_streak > 0 {
        let plural = if stats.current_streak > 1 { "s" } else { "" };
        format!(
            r#"<span class="streak-badge {}"><span class="streak-fire">🔥</span> {} day{}</span>"#,
            streak_tier(stats.current_streak).class(),
            stats.current_streak,
            plural,
        )
    } else {
        String::new()
    };

    let (toggle_class, toggle_label) = if is_completed_today(stats) {
        ("completed", "✓ Completed Today")
    } else {
        ("not-completed", "Mark as Complete")
    };

    format!(
        r#"<div class="habit-card" style="animation-delay: {delay:.2}s">
    <div class="habit-header">
        <div class="habit-info">
            <h3>{name}</h3>
            {description}
        </div>
        <div class="habit-actions">
            <button class="view-history" data-habit-id="{id}" title="View History">📅</button>
            <button class="edit-habit" data-habit-id="{id}" title="Edit">✏️</button>
            <button class="delete-habit" data-habit-id="{id}" title="Delete">🗑️</button>
        </div>
    </div>
    <div class="habit-stats">
        <div class="habit-stat">
            <span class="habit-stat-value">{current}</span>
            <span class="habit-stat-label">Current Streak</span>
        </div>
        <div class="habit-stat">
            <span class="habit-stat-value">{longest}</span>
            <span class="habit-stat-label">Best Streak</span>
        </div>
        <div class="habit-stat">
            <span class="habit-stat-value">{score}%</span>
            <span class="habit-stat-label">Consistency</span>
        </div>
    </div>
    <div class="habit-health {health}">
        <div class="health-info">
            <span>{icon}</span>
            <span>{label}</span>
        </div>
        {streak_badge}
    </div>
    <button class="habit-toggle {toggle_class}" data-habit-id="{id}">{toggle_label}</button>
</div>"#,
        delay = index as f64 * 0.05,
        id = habit.id,
        current = stats.current_streak,
        longest = stats.longest_streak,
        score = stats.consistency_score,
        health = health_class(&stats.health.status),
        icon = stats.health.icon,
        label = escape_html(&health_label(&stats.health.status)),
    )
}

pub fn render_reports(reports: &[WeeklyReport]) -> String {
    if reports.is_empty() {
        return r#"<div class="empty-state">
    <div class="empty-state-icon">📊</div>
    <h3>No reports yet</h3>
    <p>Weekly reports will appear here. Click "Generate Report" to create one now.</p>
</div>"#
            .to_owned();
    }

    let mut out = String::new();
    for report in reports {
        let generated = report
            .generated_at
            .map(|t| format_date_short(t.date()))
            .unwrap_or_else(|| "—".into());
        let _ = write!(
            out,
            r#"<div class="report-card slide-up">
    <div class="report-header">
        <span class="report-date">{start} - {end}</span>
        <span class="report-score {score_cls}">{score}%</span>
    </div>
    <div class="report-stats">
        <div class="report-stat">
            <span class="stat-value">{habits}</span>
            <span class="stat-label">Habits Tracked</span>
        </div>
        <div class="report-stat">
            <span class="stat-value">{completions}</span>
            <span class="stat-label">Completions</span>
        </div>
        <div class="report-stat">
            <span class="stat-value">{generated}</span>
            <span class="stat-label">Generated</span>
        </div>
    </div>
</div>"#,
            start = format_date_short(report.week_start),
            end = format_date_short(report.week_end),
            score_cls = score_class(report.overall_score),
            score = report.overall_score,
            habits = report.total_habits,
            completions = report.total_completions,
            generated = generated,
        );
    }
    out
}

/// One cell per returned day, completed/missed, with the cell matching
/// `today` flagged.
pub fn render_history_calendar(history: &[DayRecord], today: NaiveDate) -> String {
    let mut out = String::new();
    for day in history {
        let state = if day.completed { "completed" } else { "missed" };
        let today_class = if day.date == today { " today" } else { "" };
        let _ = write!(
            out,
            r#"<div class="calendar-day {state}{today_class}" title="{title}">{num}</div>"#,
            title = format_date_full(day.date),
            num = day_of_month(day.date),
        );
    }
    out
}

pub fn history_modal_title(habit_name: &str) -> String {
    format!("{} - Last 30 Days", escape_html(habit_name))
}

/// Habit create/edit form, pre-filled when editing.
pub fn render_habit_form(title: &str, name: &str, description: &str) -> String {
    format!(
        r#"<h2 id="modalTitle">{title}</h2>
<form id="habitForm">
    <label for="habitName">Name</label>
    <input id="habitName" name="name" type="text" value="{name}" autofocus>
    <label for="habitDescription">Description</label>
    <textarea id="habitDescription" name="description">{description}</textarea>
    <div class="form-actions">
        <button type="submit">Save</button>
        <button type="button" id="cancelBtn">Cancel</button>
    </div>
</form>"#,
        title = escape_html(title),
        name = escape_html(name),
        description = escape_html(description),
    )
}

pub fn render_week_day_header() -> String {
    util::week_day_names()
        .iter()
        .map(|d| format!(r#"<div class="calendar-weekday">{d}</div>"#))
        .collect()
}
