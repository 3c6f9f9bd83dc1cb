//! Destination folder resolution.

use std::path::{Path, PathBuf};

use crate::errors::{CreateError, OrCancelled};
use crate::prompt::{Prompter, absolutize};
use crate::ui::Notifier;

pub const PICKER_TITLE: &str = "Select a directory for the new Next.js project";

/// Check that a configured default location is an existing directory.
///
/// Returns the absolute path, or a [`CreateError::Path`] describing why it
/// can't be used.
pub fn check_default_location(location: &str) -> Result<PathBuf, CreateError> {
    let resolved = absolutize(Path::new(location));
    match std::fs::metadata(&resolved) {
        Ok(meta) if meta.is_dir() => Ok(resolved),
        Ok(_) => Err(CreateError::Path {
            path: resolved,
            reason: "Configured default location is not a folder".to_string(),
        }),
        Err(_) => Err(CreateError::Path {
            path: resolved,
            reason: "Configured default location not found".to_string(),
        }),
    }
}

/// Use the configured default location when it is valid, otherwise warn and
/// fall back to the interactive picker.
pub fn resolve_target_folder(
    default_location: Option<&str>,
    prompter: &mut dyn Prompter,
    notifier: &dyn Notifier,
) -> Result<PathBuf, CreateError> {
    if let Some(location) = default_location.map(str::trim).filter(|l| !l.is_empty()) {
        match check_default_location(location) {
            Ok(path) => {
                tracing::debug!(path = %path.display(), "using default location");
                return Ok(path);
            }
            Err(e) => {
                notifier.warning(&format!("{}. Please update your settings.", e));
            }
        }
    }

    let picked = prompter.pick_folder(PICKER_TITLE)?.or_cancelled()?;
    Ok(absolutize(&picked))
}
