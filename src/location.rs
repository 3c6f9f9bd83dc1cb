//! Default project location management.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::errors::CreateError;
use crate::prompt::{Choice, Prompter, absolutize};
use crate::settings::SettingsStore;
use crate::ui::Notifier;

pub const LOCATION_PICKER_TITLE: &str = "Select default Next.js project location";

/// What the interactive `location` command did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationChange {
    Set(PathBuf),
    Cleared,
    Unchanged,
}

/// Persist `path` as the default location. It must be an existing directory;
/// the stored value is canonicalized.
pub fn set_default_location(
    store: &SettingsStore,
    path: &Path,
    notifier: &dyn Notifier,
) -> Result<PathBuf> {
    let resolved = absolutize(path);
    if !resolved.is_dir() {
        return Err(CreateError::Path {
            path: resolved,
            reason: "Default location must be an existing folder".to_string(),
        }
        .into());
    }
    let canonical = resolved
        .canonicalize()
        .with_context(|| format!("Failed to resolve {}", resolved.display()))?;

    let stored = canonical.display().to_string();
    store.update(|settings| settings.default_location = stored)?;
    tracing::info!(path = %canonical.display(), "default location set");

    notifier.success(&format!(
        "Default project location set to: {}",
        canonical.display()
    ));
    Ok(canonical)
}

/// Persist an empty default location so every run uses the picker.
pub fn clear_default_location(store: &SettingsStore, notifier: &dyn Notifier) -> Result<()> {
    store.update(|settings| settings.default_location.clear())?;
    tracing::info!("default location cleared");
    notifier.success("Default project location cleared.");
    Ok(())
}

/// The stored default location, if any.
pub fn current_default_location(store: &SettingsStore) -> Result<Option<String>> {
    let settings = store.snapshot()?;
    Ok(settings.default_location().map(str::to_string))
}

/// Show the current value and offer to pick a new folder or clear it.
/// Dismissing either prompt leaves the settings untouched.
pub fn select_default_location(
    store: &SettingsStore,
    prompter: &mut dyn Prompter,
    notifier: &dyn Notifier,
) -> Result<LocationChange> {
    let current = match current_default_location(store)? {
        Some(location) => format!("Current default: {}", location),
        None => "No default project location set".to_string(),
    };

    let choices = [
        Choice::new("Select Folder…", "Pick a folder for new projects"),
        Choice::new("Clear Default Location", "Always ask where to create projects"),
    ];
    let Some(picked) = prompter.select(&current, &choices, 0)? else {
        return Ok(LocationChange::Unchanged);
    };

    match picked {
        0 => match prompter.pick_folder(LOCATION_PICKER_TITLE)? {
            Some(folder) => {
                let stored = set_default_location(store, &folder, notifier)?;
                Ok(LocationChange::Set(stored))
            }
            None => Ok(LocationChange::Unchanged),
        },
        _ => {
            clear_default_location(store, notifier)?;
            Ok(LocationChange::Cleared)
        }
    }
}
