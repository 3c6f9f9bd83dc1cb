//! Project creation pipeline.
//!
//! A run moves through fixed stages:
//!
//! ```text
//! NameEntry -> OptionResolution -> FolderResolution -> ConflictCheck
//!   -> Scaffolding -> ComponentInstall (optional) -> PostCreateAction -> Done
//! ```
//!
//! Dismissing any prompt aborts the run at the current stage. Nothing touches
//! the filesystem before `ConflictCheck`, and a failed command stops the
//! pipeline without rolling back what it already produced.

use std::path::{Path, PathBuf};

use crate::errors::{CreateError, OrCancelled};
use crate::opener::{FolderOpener, OpenMode};
use crate::options::{ProjectOptions, resolve_project_options, validate_project_name};
use crate::prompt::{Choice, Prompter};
use crate::runner::{CommandInvocation, CommandRunner, LogSink};
use crate::settings::Settings;
use crate::target::resolve_target_folder;
use crate::ui::Notifier;

/// Stage of a project-creation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    NameEntry,
    OptionResolution,
    FolderResolution,
    ConflictCheck,
    Scaffolding,
    ComponentInstall,
    PostCreateAction,
    Done,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Stage::Idle => "idle",
            Stage::NameEntry => "name-entry",
            Stage::OptionResolution => "option-resolution",
            Stage::FolderResolution => "folder-resolution",
            Stage::ConflictCheck => "conflict-check",
            Stage::Scaffolding => "scaffolding",
            Stage::ComponentInstall => "component-install",
            Stage::PostCreateAction => "post-create",
            Stage::Done => "done",
        };
        write!(f, "{}", name)
    }
}

/// Explicit post-create choice from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OpenPreference {
    /// Open in the current editor window
    Here,
    /// Open in a new editor window
    NewWindow,
    /// Don't open the project
    None,
}

/// Inputs for one run.
#[derive(Debug, Clone, Default)]
pub struct CreateRequest {
    /// Project name; prompted for when absent.
    pub name: Option<String>,
    /// Overrides the `open_in_new_window` setting.
    pub open: Option<OpenPreference>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    Created {
        path: PathBuf,
        opened: Option<OpenMode>,
    },
    /// The user dismissed a prompt during `stage`.
    Aborted { stage: Stage },
}

/// `<runner> --yes <scaffolder>@latest <name> <flags...>`, run in the target folder.
pub fn scaffold_invocation(
    runner: &str,
    scaffolder: &str,
    name: &str,
    target: &Path,
    options: &ProjectOptions,
) -> CommandInvocation {
    let mut args = vec![
        "--yes".to_string(),
        format!("{}@latest", scaffolder),
        name.to_string(),
    ];
    args.extend(options.scaffold_flags());
    CommandInvocation::new(runner, args, target)
}

/// UI-library commands for the selected options, init always first.
pub fn ui_library_invocations(
    runner: &str,
    ui_library: &str,
    project_path: &Path,
    options: &ProjectOptions,
) -> Vec<CommandInvocation> {
    let package = format!("{}@latest", ui_library);
    let mut invocations = Vec::new();
    if options.init_ui_library {
        invocations.push(
            CommandInvocation::new(
                runner,
                [package.as_str(), "init", "-y", "--base-color=zinc"],
                project_path,
            )
            .with_label(format!("{} init", ui_library)),
        );
    }
    if options.install_all_components {
        invocations.push(
            CommandInvocation::new(runner, [package.as_str(), "add", "--all"], project_path)
                .with_label(format!("{} add --all", ui_library)),
        );
    }
    invocations
}

/// A valid project name that also names a new child of the target folder.
/// `.` and `..` would resolve to the target itself or its parent.
fn validate_folder_name(value: &str) -> Result<(), String> {
    validate_project_name(value)?;
    match value.trim() {
        "." | ".." => Err("Project name cannot be \".\" or \"..\"".to_string()),
        _ => Ok(()),
    }
}

/// Drives one project-creation run against its collaborators.
pub struct ProjectCreator<'a> {
    settings: &'a Settings,
    prompter: &'a mut dyn Prompter,
    runner: &'a dyn CommandRunner,
    opener: &'a dyn FolderOpener,
    notifier: &'a dyn Notifier,
    sink: &'a mut dyn LogSink,
    stage: Stage,
}

impl<'a> ProjectCreator<'a> {
    pub fn new(
        settings: &'a Settings,
        prompter: &'a mut dyn Prompter,
        runner: &'a dyn CommandRunner,
        opener: &'a dyn FolderOpener,
        notifier: &'a dyn Notifier,
        sink: &'a mut dyn LogSink,
    ) -> Self {
        Self {
            settings,
            prompter,
            runner,
            opener,
            notifier,
            sink,
            stage: Stage::Idle,
        }
    }

    /// Run the pipeline. Cancellation is reported as [`CreateOutcome::Aborted`];
    /// every other failure is returned as an error.
    pub async fn run(&mut self, request: CreateRequest) -> Result<CreateOutcome, CreateError> {
        match self.execute(request).await {
            Ok((path, opened)) => Ok(CreateOutcome::Created { path, opened }),
            Err(CreateError::Cancelled) => {
                tracing::info!(stage = %self.stage, "run cancelled by user");
                Ok(CreateOutcome::Aborted { stage: self.stage })
            }
            Err(e) => {
                tracing::error!(stage = %self.stage, error = %e, "run failed");
                Err(e)
            }
        }
    }

    fn enter(&mut self, stage: Stage) {
        tracing::debug!(from = %self.stage, to = %stage, "stage transition");
        self.stage = stage;
    }

    async fn execute(
        &mut self,
        request: CreateRequest,
    ) -> Result<(PathBuf, Option<OpenMode>), CreateError> {
        self.enter(Stage::NameEntry);
        let name = self.project_name(request.name.as_deref())?;

        self.enter(Stage::OptionResolution);
        let options = resolve_project_options(self.settings, &mut *self.prompter)?;

        self.enter(Stage::FolderResolution);
        let target = resolve_target_folder(
            self.settings.default_location(),
            &mut *self.prompter,
            self.notifier,
        )?;
        let project_path = target.join(&name);

        self.enter(Stage::ConflictCheck);
        self.clear_existing(&name, &project_path)?;

        self.notifier.summary(&name, &project_path, &options);

        let settings = self.settings;
        let runner = settings.runner();
        let tools = &settings.tools;

        self.enter(Stage::Scaffolding);
        self.notifier
            .step(&format!("Running {}...", tools.scaffolder));
        let scaffold = scaffold_invocation(&runner, &tools.scaffolder, &name, &target, &options);
        self.runner.run(&scaffold, &mut *self.sink).await?;

        if options.wants_ui_library() {
            self.enter(Stage::ComponentInstall);
            self.notifier
                .step(&format!("Setting up {}...", tools.ui_library));
            for invocation in
                ui_library_invocations(&runner, &tools.ui_library, &project_path, &options)
            {
                self.runner.run(&invocation, &mut *self.sink).await?;
            }
        }

        self.enter(Stage::PostCreateAction);
        let opened = self.post_create(&name, &project_path, request.open).await;

        self.enter(Stage::Done);
        Ok((project_path, opened))
    }

    fn project_name(&mut self, given: Option<&str>) -> Result<String, CreateError> {
        if let Some(name) = given {
            validate_folder_name(name).map_err(CreateError::Validation)?;
            return Ok(name.trim().to_string());
        }

        let name = self
            .prompter
            .input(
                "Enter a name for the new Next.js project",
                "",
                &validate_folder_name,
            )?
            .or_cancelled()?;
        Ok(name.trim().to_string())
    }

    /// Ask before replacing an existing path; declining cancels the run.
    fn clear_existing(&mut self, name: &str, project_path: &Path) -> Result<(), CreateError> {
        let Ok(meta) = std::fs::symlink_metadata(project_path) else {
            return Ok(());
        };

        let overwrite = self
            .prompter
            .confirm(
                &format!("Folder \"{}\" already exists. Overwrite?", name),
                false,
            )?
            .or_cancelled()?;
        if !overwrite {
            return Err(CreateError::Cancelled);
        }

        tracing::warn!(path = %project_path.display(), "removing existing project folder");
        let removed = if meta.is_dir() {
            std::fs::remove_dir_all(project_path)
        } else {
            std::fs::remove_file(project_path)
        };
        removed.map_err(|e| {
            CreateError::io(format!("Failed to remove {}", project_path.display()), e)
        })
    }

    /// Open the new project according to the CLI choice, the
    /// `open_in_new_window` setting, or an interactive pick, in that order.
    /// The project already exists at this point, so nothing here fails the run.
    async fn post_create(
        &mut self,
        name: &str,
        project_path: &Path,
        preference: Option<OpenPreference>,
    ) -> Option<OpenMode> {
        let created = format!("Next.js project \"{}\" created successfully.", name);

        let mode = match preference {
            Some(OpenPreference::Here) => Some(OpenMode::CurrentWindow),
            Some(OpenPreference::NewWindow) => Some(OpenMode::NewWindow),
            Some(OpenPreference::None) => None,
            None if self.settings.open_in_new_window => {
                self.notifier
                    .success(&format!("{} Opening in new window...", created));
                return self.open(project_path, OpenMode::NewWindow).await;
            }
            None => {
                self.notifier.success(&created);
                return match self.ask_open_mode() {
                    Some(mode) => self.open(project_path, mode).await,
                    None => None,
                };
            }
        };

        self.notifier.success(&created);
        match mode {
            Some(mode) => self.open(project_path, mode).await,
            None => None,
        }
    }

    fn ask_open_mode(&mut self) -> Option<OpenMode> {
        let choices = [
            Choice::new("Open Here", ""),
            Choice::new("Open in New Window", ""),
            Choice::new("Cancel", ""),
        ];
        match self.prompter.select("Open the new project?", &choices, 0) {
            Ok(Some(0)) => Some(OpenMode::CurrentWindow),
            Ok(Some(1)) => Some(OpenMode::NewWindow),
            Ok(_) => None,
            Err(e) => {
                self.notifier
                    .warning(&format!("Could not ask how to open the project: {}", e));
                None
            }
        }
    }

    async fn open(&self, project_path: &Path, mode: OpenMode) -> Option<OpenMode> {
        match self.opener.open(project_path, mode).await {
            Ok(()) => Some(mode),
            Err(e) => {
                self.notifier.warning(&format!(
                    "Could not open {}: {}",
                    project_path.display(),
                    e
                ));
                None
            }
        }
    }
}
