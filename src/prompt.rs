//! Interactive prompts.
//!
//! Every user interaction in a run goes through [`Prompter`]. Each method
//! returns `Ok(None)` when the user dismisses the prompt with Escape, which
//! callers turn into
//! [`CreateError::Cancelled`](crate::errors::CreateError::Cancelled). Text
//! fields can't be dismissed; Ctrl-C there ends the process.

use console::style;
use dialoguer::{Confirm, Input, Select, theme::ColorfulTheme};
use std::path::{Path, PathBuf};

use crate::errors::CreateError;
use crate::ui::icons::WARN;

/// One entry in a selection list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub label: String,
    pub description: String,
}

impl Choice {
    pub fn new(label: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            description: description.into(),
        }
    }
}

/// Text validator: `Err(message)` rejects the input and re-prompts.
pub type Validator<'a> = &'a dyn Fn(&str) -> Result<(), String>;

pub trait Prompter {
    /// Pick one of `choices`; returns its index.
    fn select(
        &mut self,
        prompt: &str,
        choices: &[Choice],
        default: usize,
    ) -> Result<Option<usize>, CreateError>;

    /// Free-text input, re-prompting until `validate` accepts it.
    fn input(
        &mut self,
        prompt: &str,
        initial: &str,
        validate: Validator<'_>,
    ) -> Result<Option<String>, CreateError>;

    fn confirm(&mut self, prompt: &str, default: bool) -> Result<Option<bool>, CreateError>;

    /// Choose an existing directory.
    fn pick_folder(&mut self, title: &str) -> Result<Option<PathBuf>, CreateError>;
}

/// Terminal prompts backed by `dialoguer`.
pub struct DialoguerPrompter {
    theme: ColorfulTheme,
    start_dir: PathBuf,
}

impl DialoguerPrompter {
    pub fn new(start_dir: impl Into<PathBuf>) -> Self {
        Self {
            theme: ColorfulTheme::default(),
            start_dir: start_dir.into(),
        }
    }

    fn render(choice: &Choice) -> String {
        if choice.description.is_empty() {
            choice.label.clone()
        } else {
            format!("{:<20} {}", choice.label, style(&choice.description).dim())
        }
    }
}

impl Prompter for DialoguerPrompter {
    fn select(
        &mut self,
        prompt: &str,
        choices: &[Choice],
        default: usize,
    ) -> Result<Option<usize>, CreateError> {
        let items: Vec<String> = choices.iter().map(Self::render).collect();
        let selection = Select::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(&items)
            .default(default)
            .interact_opt()?;
        Ok(selection)
    }

    fn input(
        &mut self,
        prompt: &str,
        initial: &str,
        validate: Validator<'_>,
    ) -> Result<Option<String>, CreateError> {
        let value = Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .with_initial_text(initial)
            .validate_with(|value: &String| validate(value))
            .interact_text()?;
        Ok(Some(value))
    }

    fn confirm(&mut self, prompt: &str, default: bool) -> Result<Option<bool>, CreateError> {
        let answer = Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(default)
            .interact_opt()?;
        Ok(answer)
    }

    fn pick_folder(&mut self, title: &str) -> Result<Option<PathBuf>, CreateError> {
        let mut current = self.start_dir.clone();
        let mut entries = list_subdirectories(&current)?;
        loop {
            let mut items = vec![format!(
                "{} {}",
                style("Use this folder").green(),
                style(current.display()).dim()
            )];
            let has_parent = current.parent().is_some();
            if has_parent {
                items.push("..".to_string());
            }
            items.extend(entries.iter().map(|name| format!("{}/", name)));
            items.push(style("Enter a path…").cyan().to_string());

            let Some(index) = Select::with_theme(&self.theme)
                .with_prompt(title)
                .items(&items)
                .default(0)
                .max_length(15)
                .interact_opt()?
            else {
                return Ok(None);
            };

            let offset = usize::from(has_parent);
            let next = if index == 0 {
                return Ok(Some(current));
            } else if has_parent && index == 1 {
                match current.parent() {
                    Some(parent) => parent.to_path_buf(),
                    None => continue,
                }
            } else if index == items.len() - 1 {
                let typed = self.input(
                    "Folder path",
                    &current.display().to_string(),
                    &validate_existing_dir,
                )?;
                match typed {
                    Some(path) => return Ok(Some(absolutize(Path::new(path.trim())))),
                    None => continue,
                }
            } else {
                current.join(&entries[index - 1 - offset])
            };

            if let Some(e) = browse(&mut current, &mut entries, next) {
                eprintln!("{}{}", WARN, style(e).yellow());
            }
        }
    }
}

/// Accepts only paths that exist and are directories.
pub fn validate_existing_dir(value: &str) -> Result<(), String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err("Folder path is required".to_string());
    }
    if Path::new(trimmed).is_dir() {
        Ok(())
    } else {
        Err(format!("Not an existing folder: {}", trimmed))
    }
}

/// Make `path` absolute against the current directory without touching the
/// filesystem.
pub fn absolutize(path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    }
}

/// Move the picker into `next`. A folder that can't be listed leaves the
/// picker where it was and returns the error to show.
fn browse(
    current: &mut PathBuf,
    entries: &mut Vec<String>,
    next: PathBuf,
) -> Option<CreateError> {
    match list_subdirectories(&next) {
        Ok(listed) => {
            *current = next;
            *entries = listed;
            None
        }
        Err(e) => Some(e),
    }
}

/// Visible subdirectory names of `dir`, sorted.
fn list_subdirectories(dir: &Path) -> Result<Vec<String>, CreateError> {
    let read = std::fs::read_dir(dir)
        .map_err(|e| CreateError::io(format!("Failed to list {}", dir.display()), e))?;
    let mut names: Vec<String> = read
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().map(|t| t.is_dir()).unwrap_or(false))
        .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
        .filter(|name| !name.starts_with('.'))
        .collect();
    names.sort();
    Ok(names)
}
