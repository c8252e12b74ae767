//! # habitdash
//!
//! Client-side module for the habit-tracking dashboard. The embedding shell
//! (the thing that owns a real screen) constructs a [`controller::App`] with
//! an [`api::ApiClient`] and a [`settings::SettingsStore`], forwards user
//! events to the controller's handler methods, and applies the markup and
//! effects the controller pushes through its [`controller::Surface`].
//!
//! Layering, leaves first: `util` → `api` → `controller`. Rendering is pure
//! (`render(state) -> markup`); the controller owns the only mutable state:
//! the in-memory habit list, the modal state machine, and the toast tray.

pub mod api;
pub mod config;
pub mod controller;
pub mod dto;
pub mod error;
pub mod render;
pub mod settings;
pub mod telemetry;
pub mod util;

pub use api::ApiClient;
pub use config::Config;
pub use controller::{App, Surface};
pub use error::{AppError, AppResult};
