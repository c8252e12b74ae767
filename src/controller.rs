//! Application controller.
//!
//! Owns the in-memory view-model (the habit statistics list), the modal
//! state machine, and the toast tray. Every user flow lands here: the
//! embedding shell forwards events to these methods and applies whatever
//! the controller pushes back through its [`Surface`].
//!
//! Single-threaded by construction: flows take `&mut self`, so the habit
//! list is never touched concurrently. Each render region additionally
//! carries a sequence number bumped when a request is issued; a completion
//! whose sequence is no longer current is discarded instead of clobbering
//! newer state.

use std::time::{Duration, Instant};

use validator::Validate;

use crate::api::{ApiClient, DEFAULT_HISTORY_DAYS};
use crate::config::Config;
use crate::dto::{CreateHabitRequest, DashboardSummary, HabitStatistics, UpdateHabitRequest};
use crate::error::AppError;
use crate::render::{self, ToastKind};
use crate::settings::{SettingsStore, Theme};
use crate::util;

/// DOM regions the controller re-renders wholesale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    OverallScore,
    HealthBadge,
    TotalHabits,
    TodayCompletions,
    CurrentDate,
    HabitsGrid,
    ReportsList,
    HabitForm,
    HistoryTitle,
    HistoryCalendar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalKind {
    HabitForm,
    History,
}

/// The seam between the controller and whatever owns the actual screen.
/// A browser shell maps regions to containers and swaps `innerHTML`; tests
/// record the calls.
pub trait Surface {
    fn apply(&mut self, region: Region, markup: &str);

    /// Run an eased counter animation in `region` (see
    /// [`util::ValueAnimation`] for the curve the shell should drive).
    fn animate_value(&mut self, region: Region, start: i64, end: i64, duration: Duration);

    fn set_theme(&mut self, theme: Theme);
    fn show_modal(&mut self, modal: ModalKind);
    fn hide_modal(&mut self, modal: ModalKind);

    /// Blocking user confirmation, e.g. `window.confirm`.
    fn confirm(&mut self, prompt: &str) -> bool;

    fn toast(&mut self, kind: ToastKind, message: &str);
}

/// UI modes. Only one modal is meaningfully open at a time; dismissal
/// (close button, overlay click, Escape) collapses whatever is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Modal {
    #[default]
    None,
    HabitForm {
        /// `Some(id)` while editing, `None` while creating.
        editing: Option<i64>,
    },
    History {
        habit_id: i64,
    },
}

/// A notification with its own expiry. Entries expire independently;
/// multiple can be visible at once.
#[derive(Debug, Clone)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
    deadline: Instant,
}

pub struct App<S: Surface> {
    api: ApiClient,
    settings: SettingsStore,
    pub surface: S,

    habits: Vec<HabitStatistics>,
    modal: Modal,
    toasts: Vec<Toast>,

    // per-region request sequence numbers; stale completions are dropped
    seq_dashboard: u64,
    seq_reports: u64,
    seq_history: u64,

    toast_ttl: Duration,
    score_animation: Duration,
}

impl<S: Surface> App<S> {
    pub fn new(api: ApiClient, settings: SettingsStore, surface: S) -> Self {
        Self {
            api,
            settings,
            surface,
            habits: Vec::new(),
            modal: Modal::None,
            toasts: Vec::new(),
            seq_dashboard: 0,
            seq_reports: 0,
            seq_history: 0,
            toast_ttl: Duration::from_millis(3000),
            score_animation: Duration::from_millis(1000),
        }
    }

    pub fn from_config(config: &Config, surface: S) -> Self {
        let mut app = Self::new(
            ApiClient::new(config.api_base_url.clone()),
            SettingsStore::open(config.settings_path.clone()),
            surface,
        );
        app.toast_ttl = Duration::from_millis(config.toast_ttl_ms);
        app.score_animation = Duration::from_millis(config.score_animation_ms);
        app
    }

    pub fn habits(&self) -> &[HabitStatistics] {
        &self.habits
    }

    pub fn modal(&self) -> Modal {
        self.modal
    }

    /// Toasts still on screen; expired entries are pruned on read.
    pub fn active_toasts(&mut self) -> &[Toast] {
        let now = Instant::now();
        self.toasts.retain(|t| t.deadline > now);
        &self.toasts
    }

    fn toast(&mut self, kind: ToastKind, message: &str) {
        self.toasts.push(Toast {
            kind,
            message: message.to_owned(),
            deadline: Instant::now() + self.toast_ttl,
        });
        self.surface.toast(kind, message);
    }

    // ------------------------------------------------------------------
    // Startup
    // ------------------------------------------------------------------

    /// Startup sequence, in order: theme, dashboard, reports. A failed load
    /// toasts and moves on; neither load blocks the other.
    pub async fn init(&mut self) {
        self.surface.set_theme(self.settings.theme());
        self.load_dashboard().await;
        self.load_reports().await;
    }

    pub fn toggle_theme(&mut self) {
        let next = self.settings.theme().toggled();
        if let Err(e) = self.settings.set_theme(next) {
            tracing::warn!(error = %e, "failed to persist theme");
        }
        self.surface.set_theme(next);
    }

    // ------------------------------------------------------------------
    // Dashboard
    // ------------------------------------------------------------------

    /// Fetches the dashboard summary, replaces the habit list wholesale,
    /// and re-renders the summary header and the grid.
    pub async fn load_dashboard(&mut self) {
        self.seq_dashboard += 1;
        let seq = self.seq_dashboard;

        let summary = match self.api.dashboard().await {
            Ok(summary) => summary,
            Err(e) => {
                tracing::warn!(error = %e, "dashboard load failed");
                self.toast(ToastKind::Error, "Failed to load dashboard");
                return;
            }
        };
        if seq != self.seq_dashboard {
            tracing::debug!(region = "dashboard", "discarding stale response");
            return;
        }

        self.apply_summary(&summary);
        self.habits = summary.habits;
        self.render_grid();
    }

    fn apply_summary(&mut self, summary: &DashboardSummary) {
        self.surface.animate_value(
            Region::OverallScore,
            0,
            summary.overall_score.round() as i64,
            self.score_animation,
        );
        self.surface.apply(
            Region::HealthBadge,
            &render::render_health_badge(&summary.overall_health),
        );
        self.surface
            .apply(Region::TotalHabits, &summary.total_habits.to_string());
        self.surface.apply(
            Region::TodayCompletions,
            &summary.today_completions.to_string(),
        );
        self.surface.apply(
            Region::CurrentDate,
            &util::format_date_short(summary.date),
        );
    }

    fn render_grid(&mut self) {
        self.surface
            .apply(Region::HabitsGrid, &render::render_habit_grid(&self.habits));
    }

    // ------------------------------------------------------------------
    // Toggle
    // ------------------------------------------------------------------

    /// Toggles today's completion for a habit. On success the returned
    /// statistics are spliced into the list for fast visual feedback, then
    /// a full dashboard reload reconciles the aggregate fields. State is
    /// never mutated before the call completes, so failure needs no
    /// rollback.
    pub async fn toggle_habit(&mut self, habit_id: i64) {
        match self.api.toggle_habit(habit_id, None).await {
            Ok(outcome) => {
                if let Some(entry) = self.habits.iter_mut().find(|h| h.habit.id == habit_id) {
                    *entry = outcome.stats;
                }
                self.render_grid();
                self.load_dashboard().await;

                if outcome.completed {
                    self.toast(ToastKind::Success, "Habit completed! Keep it up! 🎉");
                } else {
                    self.toast(ToastKind::Success, "Habit marked as incomplete");
                }
            }
            Err(e) => {
                tracing::warn!(habit_id, error = %e, "toggle failed");
                self.toast(ToastKind::Error, "Failed to update habit");
            }
        }
    }

    // ------------------------------------------------------------------
    // Create / edit
    // ------------------------------------------------------------------

    pub fn open_habit_modal(&mut self) {
        self.modal = Modal::HabitForm { editing: None };
        self.surface.apply(
            Region::HabitForm,
            &render::render_habit_form("Add New Habit", "", ""),
        );
        self.surface.show_modal(ModalKind::HabitForm);
    }

    /// No-op when the id is not in the current list.
    pub fn open_edit_modal(&mut self, habit_id: i64) {
        let Some(stats) = self.habits.iter().find(|h| h.habit.id == habit_id) else {
            return;
        };
        let name = stats.habit.name.clone();
        let description = stats.habit.description.clone().unwrap_or_default();

        self.modal = Modal::HabitForm {
            editing: Some(habit_id),
        };
        self.surface.apply(
            Region::HabitForm,
            &render::render_habit_form("Edit Habit", &name, &description),
        );
        self.surface.show_modal(ModalKind::HabitForm);
    }

    /// Close button, overlay click, and Escape all land here.
    pub fn close_modals(&mut self) {
        self.modal = Modal::None;
        self.surface.hide_modal(ModalKind::HabitForm);
        self.surface.hide_modal(ModalKind::History);
    }

    /// Submits the create/edit form. An empty trimmed name is rejected
    /// before any request is issued.
    pub async fn submit_habit_form(&mut self, name: &str, description: &str) {
        let name = name.trim();
        let description = description.trim();

        if name.is_empty() {
            self.toast(ToastKind::Error, "Please enter a habit name");
            return;
        }

        let editing = match self.modal {
            Modal::HabitForm { editing } => editing,
            _ => None,
        };

        let result = match editing {
            Some(habit_id) => {
                let body = UpdateHabitRequest {
                    name: Some(name.to_owned()),
                    description: Some(description.to_owned()),
                    is_active: None,
                };
                if let Err(e) = body.validate() {
                    self.toast(ToastKind::Error, &validation_message(&e));
                    return;
                }
                self.api.update_habit(habit_id, &body).await.map(|_| true)
            }
            None => {
                let body = CreateHabitRequest {
                    name: name.to_owned(),
                    description: description.to_owned(),
                };
                if let Err(e) = body.validate() {
                    self.toast(ToastKind::Error, &validation_message(&e));
                    return;
                }
                self.api.create_habit(&body).await.map(|_| false)
            }
        };

        match result {
            Ok(was_edit) => {
                self.close_modals();
                if was_edit {
                    self.toast(ToastKind::Success, "Habit updated successfully!");
                } else {
                    self.toast(ToastKind::Success, "Habit created successfully!");
                }
                self.load_dashboard().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "save habit failed");
                self.toast(ToastKind::Error, "Failed to save habit");
            }
        }
    }

    // ------------------------------------------------------------------
    // Delete
    // ------------------------------------------------------------------

    /// Deletes a habit after explicit confirmation. Declining issues no
    /// request at all.
    pub async fn delete_habit(&mut self, habit_id: i64) {
        let confirmed = self.surface.confirm(
            "Are you sure you want to delete this habit? This action cannot be undone.",
        );
        if !confirmed {
            return;
        }

        match self.api.delete_habit(habit_id).await {
            Ok(_) => {
                self.toast(ToastKind::Success, "Habit deleted successfully");
                self.load_dashboard().await;
            }
            Err(e) => {
                tracing::warn!(habit_id, error = %e, "delete failed");
                self.toast(ToastKind::Error, "Failed to delete habit");
            }
        }
    }

    // ------------------------------------------------------------------
    // History
    // ------------------------------------------------------------------

    /// Opens the trailing-30-day calendar for a habit. No-op when the id is
    /// not in the current list.
    pub async fn show_history(&mut self, habit_id: i64) {
        let Some(stats) = self.habits.iter().find(|h| h.habit.id == habit_id) else {
            return;
        };
        let name = stats.habit.name.clone();

        self.seq_history += 1;
        let seq = self.seq_history;

        match self.api.habit_history(habit_id, DEFAULT_HISTORY_DAYS).await {
            Ok(history) => {
                if seq != self.seq_history {
                    tracing::debug!(region = "history", "discarding stale response");
                    return;
                }
                self.surface
                    .apply(Region::HistoryTitle, &render::history_modal_title(&name));
                self.surface.apply(
                    Region::HistoryCalendar,
                    &render::render_history_calendar(&history, util::today()),
                );
                self.modal = Modal::History { habit_id };
                self.surface.show_modal(ModalKind::History);
            }
            Err(e) => {
                tracing::warn!(habit_id, error = %e, "history load failed");
                self.toast(ToastKind::Error, "Failed to load history");
            }
        }
    }

    // ------------------------------------------------------------------
    // Reports
    // ------------------------------------------------------------------

    pub async fn load_reports(&mut self) {
        self.seq_reports += 1;
        let seq = self.seq_reports;

        match self.api.reports().await {
            Ok(reports) => {
                if seq != self.seq_reports {
                    tracing::debug!(region = "reports", "discarding stale response");
                    return;
                }
                self.surface
                    .apply(Region::ReportsList, &render::render_reports(&reports));
            }
            Err(e) => {
                tracing::warn!(error = %e, "reports load failed");
                self.toast(ToastKind::Error, "Failed to load reports");
            }
        }
    }

    /// Triggers weekly report generation. The server's own error message is
    /// surfaced when it provides one.
    pub async fn generate_report(&mut self) {
        match self.api.generate_report().await {
            Ok(report) => {
                tracing::info!(report_id = report.id, "weekly report generated");
                self.toast(ToastKind::Success, "Weekly report generated!");
                self.load_reports().await;
            }
            Err(AppError::Server { message, .. }) => {
                self.toast(ToastKind::Error, &message);
            }
            Err(e) => {
                tracing::warn!(error = %e, "report generation failed");
                self.toast(ToastKind::Error, "Failed to generate report");
            }
        }
    }
}

/// First message out of a `validator` error set, or a generic fallback.
fn validation_message(errors: &validator::ValidationErrors) -> String {
    errors
        .field_errors()
        .values()
        .flat_map(|errs| errs.iter())
        .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| "Invalid input".to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingSurface {
        applied: Vec<(Region, String)>,
        toasts: Vec<(ToastKind, String)>,
        shown: Vec<ModalKind>,
        hidden: Vec<ModalKind>,
        theme: Option<Theme>,
        confirm_answer: bool,
    }

    impl Surface for RecordingSurface {
        fn apply(&mut self, region: Region, markup: &str) {
            self.applied.push((region, markup.to_owned()));
        }
        fn animate_value(&mut self, _: Region, _: i64, _: i64, _: Duration) {}
        fn set_theme(&mut self, theme: Theme) {
            self.theme = Some(theme);
        }
        fn show_modal(&mut self, modal: ModalKind) {
            self.shown.push(modal);
        }
        fn hide_modal(&mut self, modal: ModalKind) {
            self.hidden.push(modal);
        }
        fn confirm(&mut self, _: &str) -> bool {
            self.confirm_answer
        }
        fn toast(&mut self, kind: ToastKind, message: &str) {
            self.toasts.push((kind, message.to_owned()));
        }
    }

    fn offline_app() -> App<RecordingSurface> {
        // base URL points nowhere; these tests never reach the network
        let mut path = std::env::temp_dir();
        path.push(format!(
            "habitdash_ctrl_{}_{}.json",
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ));
        App::new(
            ApiClient::new("http://127.0.0.1:9"),
            SettingsStore::open(path),
            RecordingSurface::default(),
        )
    }

    #[tokio::test]
    async fn empty_name_is_rejected_before_any_request() {
        let mut app = offline_app();
        app.open_habit_modal();
        app.submit_habit_form("   ", "whatever").await;

        assert_eq!(app.surface.toasts.len(), 1);
        assert_eq!(app.surface.toasts[0].0, ToastKind::Error);
        assert_eq!(app.surface.toasts[0].1, "Please enter a habit name");
        // modal stays open: no success path ran
        assert_eq!(app.modal(), Modal::HabitForm { editing: None });
    }

    #[test]
    fn modal_state_machine_opens_and_collapses() {
        let mut app = offline_app();
        app.open_habit_modal();
        assert_eq!(app.modal(), Modal::HabitForm { editing: None });
        assert_eq!(app.surface.shown, vec![ModalKind::HabitForm]);

        app.close_modals();
        assert_eq!(app.modal(), Modal::None);
        assert_eq!(
            app.surface.hidden,
            vec![ModalKind::HabitForm, ModalKind::History]
        );
    }

    #[test]
    fn edit_modal_for_unknown_id_is_a_noop() {
        let mut app = offline_app();
        app.open_edit_modal(42);
        assert_eq!(app.modal(), Modal::None);
        assert!(app.surface.shown.is_empty());
    }

    #[tokio::test]
    async fn declined_confirmation_issues_no_delete() {
        let mut app = offline_app();
        app.surface.confirm_answer = false;
        app.delete_habit(1).await;
        // no toast of any kind: the flow stopped at the prompt (a network
        // attempt against the dead endpoint would have toasted an error)
        assert!(app.surface.toasts.is_empty());
    }

    #[test]
    fn theme_toggle_persists_and_applies() {
        let mut app = offline_app();
        app.toggle_theme();
        assert_eq!(app.surface.theme, Some(Theme::Dark));
        app.toggle_theme();
        assert_eq!(app.surface.theme, Some(Theme::Light));
    }

    #[test]
    fn toast_tray_prunes_expired_entries() {
        let mut app = offline_app();
        app.toast_ttl = Duration::ZERO;
        app.toast(ToastKind::Success, "gone immediately");
        assert!(app.active_toasts().is_empty());

        app.toast_ttl = Duration::from_secs(60);
        app.toast(ToastKind::Success, "still here");
        assert_eq!(app.active_toasts().len(), 1);
    }
}
