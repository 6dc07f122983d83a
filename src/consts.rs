//! Project-wide constants.

use std::path::PathBuf;

pub const AUTHOR: &str = env!("CARGO_PKG_AUTHORS");
pub const HOMEPAGE: &str = env!("CARGO_PKG_HOMEPAGE");
pub const REPO: &str = env!("CARGO_PKG_REPOSITORY");

/// Server used when neither `--base-url` nor the stored config names one.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

/// Endpoint that scores a prediction and hands back the next location.
pub const PREDICT_PATH: &str = "/predict/";

/// Content type of every prediction request.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Config key holding the server base URL.
pub const BASE_URL_KEY: &str = "base_url";

/// Default database path: `~/.realfake/realfake.db`.
/// Single DB for config and session history.
pub fn default_db_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(".realfake")
        .join("realfake.db")
}
