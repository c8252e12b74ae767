use serde_json::Value;

/// Everything the client can observe going wrong, collapsed into the three
/// cases the UI treats identically: log, toast, carry on.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The transport itself failed before a status line arrived.
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx response. `message` comes from the body's `error` field when
    /// the backend supplied one, else a generic message.
    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// Rejected client-side before any request was issued.
    #[error("validation error: {0}")]
    Validation(String),
}

impl AppError {
    /// Builds the `Server` case from a status code and whatever the body
    /// happened to contain. The backend's error envelope is `{"error": "…"}`;
    /// anything else falls back to a generic message.
    pub fn from_response(status: u16, body: Option<Value>) -> Self {
        let message = body
            .as_ref()
            .and_then(|v| v.get("error"))
            .and_then(Value::as_str)
            .map(str::to_owned)
            .unwrap_or_else(|| "An error occurred".to_owned());
        AppError::Server { status, message }
    }

    /// The text shown to the user in a toast.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Server { message, .. } => message.clone(),
            AppError::Validation(msg) => msg.clone(),
            AppError::Transport(_) => "An error occurred".to_owned(),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
