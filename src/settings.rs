//! Persisted settings for nextplus.
//!
//! Settings live in a single TOML file, by default
//! `<config dir>/nextplus/settings.toml`. The file is read once per command
//! into a [`Settings`] snapshot that is passed explicitly to the components
//! that need it. Writes go through [`SettingsStore`].
//!
//! # Settings File Format
//!
//! ```toml
//! default_location = "/home/me/projects"
//! open_in_new_window = true
//!
//! [tools]
//! runner = "npx"
//! scaffolder = "create-next-app"
//! ui_library = "shadcn"
//! editor = "code"
//!
//! [options.typescript]
//! default = true
//! prompt = false
//!
//! [options.import_alias]
//! default = "@/*"
//! prompt = true
//! ```
//!
//! Any missing key falls back to its built-in default, so an empty or absent
//! file is a valid configuration.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable that overrides the settings file location.
pub const CONFIG_ENV: &str = "NEXTPLUS_CONFIG";

/// Environment variable that overrides `tools.runner`.
pub const RUNNER_ENV: &str = "NEXTPLUS_RUNNER";

/// A boolean option: stored default plus the "ask me" flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoolSetting {
    /// Stored default. `None` means the option's built-in default applies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<bool>,
    /// Whether to ask interactively instead of using the default silently.
    #[serde(default)]
    pub prompt: bool,
}

impl BoolSetting {
    pub fn new(default: bool, prompt: bool) -> Self {
        Self {
            default: Some(default),
            prompt,
        }
    }
}

/// A free-text option (the import alias).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextSetting {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(default)]
    pub prompt: bool,
}

impl TextSetting {
    pub fn new(default: impl Into<String>, prompt: bool) -> Self {
        Self {
            default: Some(default.into()),
            prompt,
        }
    }
}

/// Per-option defaults and prompt flags, one table per scaffold option.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OptionsSection {
    #[serde(default)]
    pub typescript: BoolSetting,
    #[serde(default)]
    pub tailwind: BoolSetting,
    #[serde(default)]
    pub eslint: BoolSetting,
    #[serde(default)]
    pub app_router: BoolSetting,
    #[serde(default)]
    pub src_dir: BoolSetting,
    #[serde(default)]
    pub experimental_app: BoolSetting,
    #[serde(default)]
    pub turbopack: BoolSetting,
    #[serde(default)]
    pub react_compiler: BoolSetting,
    #[serde(default)]
    pub import_alias: TextSetting,
    #[serde(default)]
    pub ui_init: BoolSetting,
    #[serde(default)]
    pub ui_install_all: BoolSetting,
}

/// External tools invoked by a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolsSection {
    /// Package runner used to launch both CLIs
    #[serde(default = "default_runner")]
    pub runner: String,
    /// Scaffolder package, invoked as `<scaffolder>@latest`
    #[serde(default = "default_scaffolder")]
    pub scaffolder: String,
    /// UI-library package, invoked as `<ui_library>@latest`
    #[serde(default = "default_ui_library")]
    pub ui_library: String,
    /// Editor CLI used to open the new project. Empty uses the OS handler.
    #[serde(default = "default_editor")]
    pub editor: String,
}

fn default_runner() -> String {
    "npx".to_string()
}

fn default_scaffolder() -> String {
    "create-next-app".to_string()
}

fn default_ui_library() -> String {
    "shadcn".to_string()
}

fn default_editor() -> String {
    "code".to_string()
}

fn default_open_in_new_window() -> bool {
    true
}

impl Default for ToolsSection {
    fn default() -> Self {
        Self {
            runner: default_runner(),
            scaffolder: default_scaffolder(),
            ui_library: default_ui_library(),
            editor: default_editor(),
        }
    }
}

/// The complete settings.toml structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Folder that skips the picker when set. Empty means "always ask".
    #[serde(default)]
    pub default_location: String,
    /// Open the new project in a new window without asking.
    #[serde(default = "default_open_in_new_window")]
    pub open_in_new_window: bool,
    #[serde(default)]
    pub tools: ToolsSection,
    #[serde(default)]
    pub options: OptionsSection,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_location: String::new(),
            open_in_new_window: default_open_in_new_window(),
            tools: ToolsSection::default(),
            options: OptionsSection::default(),
        }
    }
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;

        Self::parse(&content)
            .with_context(|| format!("Invalid settings file: {}", path.display()))
    }

    /// Parse settings from a TOML string.
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse settings.toml")
    }

    /// Load settings, returning defaults if the file doesn't exist.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save settings to a TOML file, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create settings directory: {}", parent.display())
            })?;
        }
        let content = toml::to_string_pretty(self).context("Failed to serialize settings")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write settings file: {}", path.display()))?;
        Ok(())
    }

    /// The configured default location, trimmed, or `None` when unset.
    pub fn default_location(&self) -> Option<&str> {
        let trimmed = self.default_location.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }

    /// Get the runner command, with the environment variable taking precedence.
    pub fn runner(&self) -> String {
        std::env::var(RUNNER_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| self.tools.runner.clone())
    }

    /// Validate the settings and return any warnings.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if let Some(alias) = &self.options.import_alias.default
            && alias.trim().is_empty()
        {
            warnings.push("options.import_alias.default is empty".to_string());
        }

        for (key, value) in [
            ("tools.runner", &self.tools.runner),
            ("tools.scaffolder", &self.tools.scaffolder),
            ("tools.ui_library", &self.tools.ui_library),
        ] {
            if value.trim().is_empty() {
                warnings.push(format!("{} is empty", key));
            }
        }

        if let Some(location) = self.default_location() {
            let path = Path::new(location);
            if !path.is_dir() {
                warnings.push(format!(
                    "default_location '{}' is not an existing folder",
                    location
                ));
            }
        }

        warnings
    }
}

/// Reads and writes the settings file at a fixed path.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Resolve the settings path from an explicit CLI path, the environment,
    /// or the platform config directory, in that order.
    pub fn locate(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Ok(Self::new(path));
        }
        if let Ok(path) = std::env::var(CONFIG_ENV)
            && !path.trim().is_empty()
        {
            return Ok(Self::new(path));
        }
        let config_dir =
            dirs::config_dir().context("Could not determine the user config directory")?;
        Ok(Self::new(config_dir.join("nextplus").join("settings.toml")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Read a snapshot of the current settings.
    pub fn snapshot(&self) -> Result<Settings> {
        Settings::load_or_default(&self.path)
    }

    /// Apply `change` to the stored settings and write them back.
    pub fn update(&self, change: impl FnOnce(&mut Settings)) -> Result<Settings> {
        let mut settings = self.snapshot()?;
        change(&mut settings);
        settings.save(&self.path)?;
        tracing::debug!(path = %self.path.display(), "settings saved");
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    // =========================================
    // parsing tests
    // =========================================

    #[test]
    fn test_parse_empty_uses_defaults() {
        let settings = Settings::parse("").unwrap();
        assert_eq!(settings, Settings::default());
        assert!(settings.open_in_new_window);
        assert_eq!(settings.tools.runner, "npx");
        assert_eq!(settings.tools.scaffolder, "create-next-app");
        assert_eq!(settings.tools.ui_library, "shadcn");
        assert_eq!(settings.default_location(), None);
    }

    #[test]
    fn test_parse_option_tables() {
        let settings = Settings::parse(
            r#"
default_location = "/tmp"
open_in_new_window = false

[options.src_dir]
default = true
prompt = true

[options.import_alias]
default = "~/*"
"#,
        )
        .unwrap();

        assert_eq!(settings.default_location(), Some("/tmp"));
        assert!(!settings.open_in_new_window);
        assert_eq!(settings.options.src_dir, BoolSetting::new(true, true));
        assert_eq!(settings.options.import_alias.default.as_deref(), Some("~/*"));
        assert!(!settings.options.import_alias.prompt);
        // Untouched options keep "no stored default"
        assert_eq!(settings.options.typescript.default, None);
    }

    #[test]
    fn test_parse_prompt_without_default() {
        let settings = Settings::parse("[options.typescript]\nprompt = true\n").unwrap();
        assert_eq!(settings.options.typescript.default, None);
        assert!(settings.options.typescript.prompt);
    }

    #[test]
    fn test_parse_invalid_toml_errors() {
        let result = Settings::parse("default_location = [");
        assert!(result.is_err());
    }

    #[test]
    fn test_default_location_is_trimmed() {
        let settings = Settings {
            default_location: "   ".to_string(),
            ..Settings::default()
        };
        assert_eq!(settings.default_location(), None);

        let settings = Settings {
            default_location: "  /srv/apps ".to_string(),
            ..Settings::default()
        };
        assert_eq!(settings.default_location(), Some("/srv/apps"));
    }

    // =========================================
    // load/save tests
    // =========================================

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempdir().unwrap();
        let settings = Settings::load_or_default(&dir.path().join("missing.toml")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/settings.toml");

        let mut settings = Settings::default();
        settings.default_location = "/work".to_string();
        settings.options.eslint = BoolSetting::new(false, true);
        settings.save(&path).unwrap();

        let loaded = Settings::load(&path).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_load_reports_path_on_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "open_in_new_window = \"yes\"").unwrap();

        let err = Settings::load(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("settings.toml"));
    }

    #[test]
    fn test_store_update_persists() {
        let dir = tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("settings.toml"));
        assert!(!store.exists());

        store
            .update(|s| s.default_location = "/projects".to_string())
            .unwrap();

        assert!(store.exists());
        assert_eq!(store.snapshot().unwrap().default_location, "/projects");
    }

    #[test]
    fn test_store_locate_prefers_explicit_path() {
        let store = SettingsStore::locate(Some(Path::new("/etc/np.toml"))).unwrap();
        assert_eq!(store.path(), Path::new("/etc/np.toml"));
    }

    // =========================================
    // validate tests
    // =========================================

    #[test]
    fn test_validate_defaults_clean() {
        assert!(Settings::default().validate().is_empty());
    }

    #[test]
    fn test_validate_flags_problems() {
        let mut settings = Settings::default();
        settings.options.import_alias = TextSetting::new("  ", false);
        settings.tools.runner = String::new();
        settings.default_location = "/definitely/not/here".to_string();

        let warnings = settings.validate();
        assert_eq!(warnings.len(), 3);
        assert!(warnings.iter().any(|w| w.contains("import_alias")));
        assert!(warnings.iter().any(|w| w.contains("tools.runner")));
        assert!(warnings.iter().any(|w| w.contains("/definitely/not/here")));
    }

    #[test]
    fn test_validate_accepts_existing_location() {
        let dir = tempdir().unwrap();
        let settings = Settings {
            default_location: dir.path().display().to_string(),
            ..Settings::default()
        };
        assert!(settings.validate().is_empty());
    }
}
