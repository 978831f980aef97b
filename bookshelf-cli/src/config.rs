//! Environment loading for the bookshelf CLI
//!
//! `.env` files never override variables that are already set.

use std::path::PathBuf;

use tracing::debug;

/// Get the bookshelf config directory path (~/.bookshelf)
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".bookshelf"))
}

/// Load environment variables from .env files
///
/// Priority order (highest to lowest):
/// 1. Environment variables already set
/// 2. Current directory .env
/// 3. ~/.bookshelf/.env
///
/// Returns the files that were loaded.
pub fn load_dotenv() -> Vec<PathBuf> {
    let mut loaded_from = Vec::new();

    if let Ok(path) = dotenvy::dotenv() {
        loaded_from.push(path);
    }

    if let Some(env_file) = config_dir().map(|dir| dir.join(".env")) {
        if env_file.exists() {
            match dotenvy::from_path(&env_file) {
                Ok(()) => loaded_from.push(env_file),
                Err(e) => debug!("Failed to load {}: {}", env_file.display(), e),
            }
        }
    }

    loaded_from
}
