use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    /// Base path of the backend JSON API, e.g. `http://localhost:5000/api`.
    pub api_base_url: String,

    /// Where the settings store keeps its JSON file (theme preference).
    pub settings_path: PathBuf,

    /// How long a toast stays on screen.
    pub toast_ttl_ms: u64,

    /// Overall-score animation duration.
    pub score_animation_ms: u64,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            api_base_url: env::var("HABITDASH_API_URL")
                .unwrap_or_else(|_| "http://localhost:5000/api".into()),
            settings_path: env::var("HABITDASH_SETTINGS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| {
                    let mut p = env::temp_dir();
                    p.push("habitdash-settings.json");
                    p
                }),
            toast_ttl_ms: env::var("HABITDASH_TOAST_TTL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            score_animation_ms: env::var("HABITDASH_SCORE_ANIMATION_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1000),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
