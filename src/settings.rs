//! Persisted client preferences.
//!
//! The only durable client-side state is the theme flag, kept under the
//! original `dhas-theme` key in a small JSON file whose path is injected by
//! [`crate::Config`]. Unset or unreadable state means "light".

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Settings {
    #[serde(rename = "dhas-theme", default)]
    theme: Theme,
}

#[derive(Debug)]
pub struct SettingsStore {
    path: PathBuf,
    settings: Settings,
}

impl SettingsStore {
    /// Loads the store from `path`. A missing or corrupt file yields
    /// defaults; corruption is logged, not fatal.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let settings = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), error = %e, "settings file unreadable, using defaults");
                Settings::default()
            }),
            Err(_) => Settings::default(),
        };
        Self { path, settings }
    }

    pub fn theme(&self) -> Theme {
        self.settings.theme
    }

    pub fn set_theme(&mut self, theme: Theme) -> anyhow::Result<()> {
        self.settings.theme = theme;
        self.persist()
    }

    fn persist(&self) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating {}", parent.display()))?;
            }
        }
        let raw = serde_json::to_string_pretty(&self.settings)?;
        fs::write(&self.path, raw).with_context(|| format!("writing {}", self.path.display()))?;
        Ok(())
    }
}
