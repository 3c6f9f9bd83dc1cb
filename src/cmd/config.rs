//! Settings view and validation commands: `nextplus config`.

use anyhow::{Context, Result};

use nextplus::options::{
    APP_ROUTER, BoolOptionSpec, DEFAULT_IMPORT_ALIAS, ESLINT, EXPERIMENTAL_APP, REACT_COMPILER,
    SRC_DIR, TAILWIND, TURBOPACK, TYPESCRIPT, UI_INIT, UI_INSTALL_ALL,
};
use nextplus::settings::{Settings, SettingsStore};

use super::super::ConfigCommands;

const BOOL_OPTIONS: [BoolOptionSpec; 10] = [
    TYPESCRIPT,
    TAILWIND,
    ESLINT,
    APP_ROUTER,
    SRC_DIR,
    EXPERIMENTAL_APP,
    TURBOPACK,
    REACT_COMPILER,
    UI_INIT,
    UI_INSTALL_ALL,
];

pub fn cmd_config(store: &SettingsStore, command: Option<ConfigCommands>) -> Result<()> {
    let config_path = store.path();

    match command {
        None => show(store, false)?,
        Some(ConfigCommands::Show { json }) => show(store, json)?,
        Some(ConfigCommands::Path) => println!("{}", config_path.display()),
        Some(ConfigCommands::Validate) => {
            println!();
            println!("Validating settings...");
            println!();

            if !store.exists() {
                println!("No settings.toml found. Using defaults (valid).");
                return Ok(());
            }

            let settings = Settings::load(config_path)?;
            let warnings = settings.validate();

            if warnings.is_empty() {
                println!("Settings are valid.");
            } else {
                println!("Settings warnings:");
                for warning in warnings {
                    println!("  - {}", warning);
                }
            }
            println!();
        }
        Some(ConfigCommands::Init { force }) => {
            if store.exists() && !force {
                println!("settings.toml already exists at {}", config_path.display());
                println!("Use --force to overwrite it.");
                return Ok(());
            }

            Settings::default().save(config_path)?;

            println!("Created settings.toml at {}", config_path.display());
            println!();
            println!("You can now customize:");
            println!("  - default_location, open_in_new_window");
            println!("  - [tools] runner, scaffolder, ui_library, editor");
            println!("  - [options.<name>] default, prompt");
            println!();
        }
    }

    Ok(())
}

fn show(store: &SettingsStore, json: bool) -> Result<()> {
    let settings = store.snapshot()?;

    if json {
        let rendered =
            serde_json::to_string_pretty(&settings).context("Failed to serialize settings")?;
        println!("{}", rendered);
        return Ok(());
    }

    println!();
    println!("nextplus Settings");
    println!("=================");
    println!();
    if store.exists() {
        println!("Settings file: {}", store.path().display());
    } else {
        println!("No settings.toml found at {}", store.path().display());
        println!("Using default settings.");
    }
    println!();

    match settings.default_location() {
        Some(location) => println!("default_location = \"{}\"", location),
        None => println!("default_location = (not set)"),
    }
    println!("open_in_new_window = {}", settings.open_in_new_window);
    println!();

    println!("[tools]");
    println!("  runner = \"{}\"", settings.runner());
    println!("  scaffolder = \"{}\"", settings.tools.scaffolder);
    println!("  ui_library = \"{}\"", settings.tools.ui_library);
    println!("  editor = \"{}\"", settings.tools.editor);
    println!();

    println!("[options]");
    for spec in &BOOL_OPTIONS {
        let setting = (spec.setting)(&settings.options);
        println!(
            "  {:<17} default = {:<5}  prompt = {}",
            spec.key,
            setting.default.unwrap_or(spec.fallback),
            setting.prompt
        );
    }
    let alias = &settings.options.import_alias;
    println!(
        "  {:<17} default = {:<5}  prompt = {}",
        "import_alias",
        alias.default.as_deref().unwrap_or(DEFAULT_IMPORT_ALIAS),
        alias.prompt
    );
    println!();

    if !store.exists() {
        println!("Run 'nextplus config init' to create a settings.toml file.");
        println!();
    }

    Ok(())
}
