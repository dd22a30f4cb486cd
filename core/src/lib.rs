use std::time::Duration;

pub mod config;
pub mod errors;
pub mod fragment;
pub mod logger;
pub mod render;
pub mod resolve;
pub mod source;
#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;

use errors::DirectoryError;

/// The platform config directory for ruichiji (e.g. `~/.config/ruichiji` on linux).
///
/// # Errors
///
/// Returns an error if the home directory of the current user cannot be determined.
#[inline]
pub fn get_config_dir() -> Result<std::path::PathBuf, DirectoryError> {
    directories::ProjectDirs::from("", "", "ruichiji")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or(DirectoryError::Config)
}

/// Formats a duration as `seconds.millis`, padded so log lines stay aligned.
#[must_use]
#[inline]
pub fn format_duration(duration: &Duration) -> String {
    format!("{: >4}.{:03}", duration.as_secs(), duration.subsec_millis())
}
