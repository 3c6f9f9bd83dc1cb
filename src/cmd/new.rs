//! Project creation command: `nextplus new`.

use anyhow::{Context, Result};

use nextplus::opener::EditorOpener;
use nextplus::project::{CreateOutcome, CreateRequest, OpenPreference, ProjectCreator};
use nextplus::prompt::DialoguerPrompter;
use nextplus::runner::{ProcessRunner, TerminalSink};
use nextplus::settings::SettingsStore;
use nextplus::ui::ConsoleNotifier;

pub async fn cmd_new(
    store: &SettingsStore,
    name: Option<String>,
    open: Option<OpenPreference>,
) -> Result<()> {
    let settings = store.snapshot()?;
    let start_dir = std::env::current_dir().context("Failed to get current directory")?;

    let mut prompter = DialoguerPrompter::new(start_dir);
    let opener = EditorOpener::new(&settings.tools.editor);
    let notifier = ConsoleNotifier;
    let mut sink = TerminalSink;

    let mut creator = ProjectCreator::new(
        &settings,
        &mut prompter,
        &ProcessRunner,
        &opener,
        &notifier,
        &mut sink,
    );

    match creator.run(CreateRequest { name, open }).await? {
        CreateOutcome::Created { path, opened } => {
            tracing::info!(path = %path.display(), opened = ?opened, "project created");
        }
        CreateOutcome::Aborted { stage } => {
            tracing::debug!(%stage, "aborted");
        }
    }

    Ok(())
}
