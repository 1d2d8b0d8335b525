pub mod paths;
pub mod settings;

pub use paths::PathManager;
pub use settings::{NavigationSettings, Settings};

/// Load environment variables from .env files.
/// First loads from ~/.env (home directory), then from ./.env (project directory).
/// Project directory values take precedence over home directory values.
/// Call this before parsing CLI args so `env`-backed flags can see them.
pub fn load_env_file() {
    // Load from home directory first (lower precedence)
    if let Some(home) = dirs::home_dir() {
        dotenv::from_path(home.join(".env")).ok();
    }

    // Project directory overrides home values
    dotenv::dotenv().ok();
}
