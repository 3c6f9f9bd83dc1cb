//! Default location commands: `nextplus location`.

use anyhow::{Context, Result};

use nextplus::location::{
    clear_default_location, current_default_location, select_default_location,
    set_default_location,
};
use nextplus::prompt::DialoguerPrompter;
use nextplus::settings::SettingsStore;
use nextplus::ui::ConsoleNotifier;

use super::super::LocationCommands;

pub fn cmd_location(store: &SettingsStore, command: Option<LocationCommands>) -> Result<()> {
    let notifier = ConsoleNotifier;

    match command {
        None => {
            let start_dir = std::env::current_dir().context("Failed to get current directory")?;
            let mut prompter = DialoguerPrompter::new(start_dir);
            let change = select_default_location(store, &mut prompter, &notifier)?;
            tracing::debug!(?change, "location command finished");
        }
        Some(LocationCommands::Show) => match current_default_location(store)? {
            Some(location) => println!("{}", location),
            None => println!("No default project location set"),
        },
        Some(LocationCommands::Set { path }) => {
            set_default_location(store, &path, &notifier)?;
        }
        Some(LocationCommands::Clear) => {
            clear_default_location(store, &notifier)?;
        }
    }

    Ok(())
}
