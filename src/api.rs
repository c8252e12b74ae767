//! HTTP client for the backend JSON API.
//!
//! Every operation is a single attempt: no retry, no timeout, no backoff.
//! Failures are normalized into [`AppError`] and logged before being handed
//! back to the caller.

use chrono::NaiveDate;
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::dto::{
    CreateHabitRequest, DashboardSummary, DayRecord, HabitStatistics, MessageResponse,
    ToggleOutcome, ToggleRequest, UpdateHabitRequest, WeeklyReport,
};
use crate::error::{AppError, AppResult};

/// Trailing window the history calendar asks for when the caller does not
/// say otherwise.
pub const DEFAULT_HISTORY_DAYS: u32 = 30;

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// `base_url` is the API prefix, e.g. `http://localhost:5000/api`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Sends the request and normalizes the outcome. A non-2xx status turns
    /// into [`AppError::Server`] carrying the body's `error` field when one
    /// is present; transport failures surface as [`AppError::Transport`].
    async fn dispatch<T: DeserializeOwned>(&self, request: RequestBuilder) -> AppResult<T> {
        let response = request.send().await.map_err(|e| {
            tracing::error!(error = %e, "API transport failure");
            AppError::Transport(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.json::<Value>().await.ok();
            let err = AppError::from_response(status.as_u16(), body);
            tracing::error!(status = status.as_u16(), error = %err, "API error response");
            return Err(err);
        }

        response.json::<T>().await.map_err(|e| {
            tracing::error!(error = %e, "API response decode failure");
            AppError::Transport(e)
        })
    }

    pub async fn list_habits(&self) -> AppResult<Vec<HabitStatistics>> {
        self.dispatch(self.http.get(self.url("/habits"))).await
    }

    pub async fn create_habit(&self, body: &CreateHabitRequest) -> AppResult<HabitStatistics> {
        self.dispatch(self.http.post(self.url("/habits")).json(body))
            .await
    }

    pub async fn get_habit(&self, id: i64) -> AppResult<HabitStatistics> {
        self.dispatch(self.http.get(self.url(&format!("/habits/{id}"))))
            .await
    }

    pub async fn update_habit(
        &self,
        id: i64,
        body: &UpdateHabitRequest,
    ) -> AppResult<HabitStatistics> {
        self.dispatch(self.http.put(self.url(&format!("/habits/{id}"))).json(body))
            .await
    }

    pub async fn delete_habit(&self, id: i64) -> AppResult<MessageResponse> {
        self.dispatch(self.http.delete(self.url(&format!("/habits/{id}"))))
            .await
    }

    /// Toggles completion for today, or for `date` when supplied.
    pub async fn toggle_habit(&self, id: i64, date: Option<NaiveDate>) -> AppResult<ToggleOutcome> {
        let body = ToggleRequest { date };
        self.dispatch(
            self.http
                .post(self.url(&format!("/habits/{id}/toggle")))
                .json(&body),
        )
        .await
    }

    pub async fn habit_history(&self, id: i64, days: u32) -> AppResult<Vec<DayRecord>> {
        self.dispatch(
            self.http
                .get(self.url(&format!("/habits/{id}/history")))
                .query(&[("days", days)]),
        )
        .await
    }

    pub async fn dashboard(&self) -> AppResult<DashboardSummary> {
        self.dispatch(self.http.get(self.url("/dashboard"))).await
    }

    pub async fn reports(&self) -> AppResult<Vec<WeeklyReport>> {
        self.dispatch(self.http.get(self.url("/reports"))).await
    }

    pub async fn generate_report(&self) -> AppResult<WeeklyReport> {
        self.dispatch(self.http.post(self.url("/reports/generate")))
            .await
    }

    pub async fn latest_report(&self) -> AppResult<WeeklyReport> {
        self.dispatch(self.http.get(self.url("/reports/latest")))
            .await
    }
}
