//! Project options: resolution from settings/prompts and scaffold flag assembly.
//!
//! Each option has a built-in default, an optional stored default, and a
//! prompt flag. Options are resolved in a fixed order; dismissing any prompt
//! cancels the whole sequence.

use regex::Regex;
use std::sync::LazyLock;

use crate::errors::{CreateError, OrCancelled};
use crate::prompt::{Choice, Prompter};
use crate::settings::{BoolSetting, OptionsSection, Settings, TextSetting};

static PROJECT_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9._-]+$").expect("static regex is valid"));

/// Fully resolved choices for one scaffold run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectOptions {
    pub use_typescript: bool,
    pub include_tailwind: bool,
    pub include_eslint: bool,
    pub use_app_router: bool,
    pub use_src_dir: bool,
    pub experimental_app: bool,
    pub turbopack: bool,
    pub react_compiler: bool,
    pub import_alias: String,
    pub init_ui_library: bool,
    pub install_all_components: bool,
}

impl ProjectOptions {
    /// Whether the UI-library CLI has anything to do.
    pub fn wants_ui_library(&self) -> bool {
        self.init_ui_library || self.install_all_components
    }

    /// Human-readable label and value of every boolean option.
    pub fn toggles(&self) -> [(&'static str, bool); 10] {
        [
            ("TypeScript", self.use_typescript),
            ("Tailwind CSS", self.include_tailwind),
            ("ESLint", self.include_eslint),
            ("App Router", self.use_app_router),
            ("src/ directory", self.use_src_dir),
            ("Experimental App", self.experimental_app),
            ("Turbopack", self.turbopack),
            ("React Compiler", self.react_compiler),
            ("UI library init", self.init_ui_library),
            ("Install all components", self.install_all_components),
        ]
    }

    /// Scaffolder flags in their fixed order.
    pub fn scaffold_flags(&self) -> Vec<String> {
        let mut flags = Vec::with_capacity(12);
        for (enabled, name) in [
            (self.use_typescript, "typescript"),
            (self.include_tailwind, "tailwind"),
            (self.include_eslint, "eslint"),
            (self.use_app_router, "app"),
            (self.use_src_dir, "src-dir"),
            (self.experimental_app, "experimental-app"),
            (self.turbopack, "turbopack"),
            (self.react_compiler, "react-compiler"),
        ] {
            flags.push(toggle_flag(enabled, name));
        }
        flags.push("--import-alias".to_string());
        flags.push(self.import_alias.trim().to_string());
        flags.push("--use-npm".to_string());
        flags
    }
}

fn toggle_flag(enabled: bool, name: &str) -> String {
    if enabled {
        format!("--{}", name)
    } else {
        format!("--no-{}", name)
    }
}

/// Static description of one boolean option.
pub struct BoolOptionSpec {
    pub key: &'static str,
    pub fallback: bool,
    /// Prompt text; `{ui_library}` is replaced with the configured UI library.
    pub message: &'static str,
    pub enable_description: &'static str,
    pub disable_description: &'static str,
    pub setting: fn(&OptionsSection) -> &BoolSetting,
}

impl BoolOptionSpec {
    pub fn prompt_message(&self, ui_library: &str) -> String {
        self.message.replace("{ui_library}", ui_library)
    }
}

pub const TYPESCRIPT: BoolOptionSpec = BoolOptionSpec {
    key: "typescript",
    fallback: true,
    message: "Enable TypeScript?",
    enable_description: "Adds TypeScript configuration and types.",
    disable_description: "Generates the project without TypeScript support.",
    setting: |o| &o.typescript,
};

pub const TAILWIND: BoolOptionSpec = BoolOptionSpec {
    key: "tailwind",
    fallback: true,
    message: "Include Tailwind CSS?",
    enable_description: "Installs Tailwind CSS and adds starter config.",
    disable_description: "Skips Tailwind CSS setup.",
    setting: |o| &o.tailwind,
};

pub const ESLINT: BoolOptionSpec = BoolOptionSpec {
    key: "eslint",
    fallback: true,
    message: "Add ESLint?",
    enable_description: "Configures ESLint with Next.js defaults.",
    disable_description: "Skips ESLint setup.",
    setting: |o| &o.eslint,
};

pub const APP_ROUTER: BoolOptionSpec = BoolOptionSpec {
    key: "app_router",
    fallback: true,
    message: "Use the App Router (`app/` directory)?",
    enable_description: "Generates the project using the App Router.",
    disable_description: "Generates the project using the Pages Router.",
    setting: |o| &o.app_router,
};

pub const SRC_DIR: BoolOptionSpec = BoolOptionSpec {
    key: "src_dir",
    fallback: false,
    message: "Create a `src/` directory?",
    enable_description: "Places application code inside `src/`.",
    disable_description: "Generates files at the project root (no `src/`).",
    setting: |o| &o.src_dir,
};

pub const EXPERIMENTAL_APP: BoolOptionSpec = BoolOptionSpec {
    key: "experimental_app",
    fallback: false,
    message: "Enable experimental App Router features?",
    enable_description: "Opt-in to experimental App Router capabilities.",
    disable_description: "Leaves experimental App Router features disabled.",
    setting: |o| &o.experimental_app,
};

pub const TURBOPACK: BoolOptionSpec = BoolOptionSpec {
    key: "turbopack",
    fallback: true,
    message: "Use Turbopack for the dev server?",
    enable_description: "Starts development using Turbopack.",
    disable_description: "Uses the traditional webpack-based dev server.",
    setting: |o| &o.turbopack,
};

pub const REACT_COMPILER: BoolOptionSpec = BoolOptionSpec {
    key: "react_compiler",
    fallback: false,
    message: "Enable the React Compiler?",
    enable_description: "Opt-in to the experimental React Compiler.",
    disable_description: "Keeps the React Compiler disabled.",
    setting: |o| &o.react_compiler,
};

pub const UI_INIT: BoolOptionSpec = BoolOptionSpec {
    key: "ui_init",
    fallback: true,
    message: "Run {ui_library} init?",
    enable_description: "Initializes the UI library after project creation.",
    disable_description: "Skips UI library initialization.",
    setting: |o| &o.ui_init,
};

pub const UI_INSTALL_ALL: BoolOptionSpec = BoolOptionSpec {
    key: "ui_install_all",
    fallback: false,
    message: "Install all {ui_library} components?",
    enable_description: "Adds every component after initialization.",
    disable_description: "Leaves component installation for later.",
    setting: |o| &o.ui_install_all,
};

pub const DEFAULT_IMPORT_ALIAS: &str = "@/*";

/// Resolve a boolean option: the stored default when prompting is off,
/// otherwise the user's pick.
pub fn resolve_bool_option(
    spec: &BoolOptionSpec,
    settings: &Settings,
    prompter: &mut dyn Prompter,
) -> Result<bool, CreateError> {
    let setting = (spec.setting)(&settings.options);
    let fallback = setting.default.unwrap_or(spec.fallback);
    if !setting.prompt {
        return Ok(fallback);
    }

    let choices = [
        Choice::new(
            if fallback { "Yes (default)" } else { "Yes" },
            spec.enable_description,
        ),
        Choice::new(
            if fallback { "No" } else { "No (default)" },
            spec.disable_description,
        ),
    ];
    let default_index = if fallback { 0 } else { 1 };
    let index = prompter
        .select(
            &spec.prompt_message(&settings.tools.ui_library),
            &choices,
            default_index,
        )?
        .or_cancelled()?;
    tracing::debug!(option = spec.key, value = index == 0, "option prompted");
    Ok(index == 0)
}

/// Resolve the import alias. Prompted input is trimmed and re-prompted when
/// empty; an empty stored default is a validation error.
pub fn resolve_import_alias(
    setting: &TextSetting,
    prompter: &mut dyn Prompter,
) -> Result<String, CreateError> {
    let fallback = setting
        .default
        .clone()
        .unwrap_or_else(|| DEFAULT_IMPORT_ALIAS.to_string());
    if !setting.prompt {
        validate_import_alias(&fallback).map_err(CreateError::Validation)?;
        return Ok(fallback.trim().to_string());
    }

    let value = prompter
        .input(
            "Set module import alias (--import-alias).",
            &fallback,
            &validate_import_alias,
        )?
        .or_cancelled()?;
    Ok(value.trim().to_string())
}

/// Resolve every option in order, stopping at the first dismissed prompt.
pub fn resolve_project_options(
    settings: &Settings,
    prompter: &mut dyn Prompter,
) -> Result<ProjectOptions, CreateError> {
    let use_typescript = resolve_bool_option(&TYPESCRIPT, settings, prompter)?;
    let include_tailwind = resolve_bool_option(&TAILWIND, settings, prompter)?;
    let include_eslint = resolve_bool_option(&ESLINT, settings, prompter)?;
    let use_app_router = resolve_bool_option(&APP_ROUTER, settings, prompter)?;
    let use_src_dir = resolve_bool_option(&SRC_DIR, settings, prompter)?;
    let experimental_app = resolve_bool_option(&EXPERIMENTAL_APP, settings, prompter)?;
    let turbopack = resolve_bool_option(&TURBOPACK, settings, prompter)?;
    let react_compiler = resolve_bool_option(&REACT_COMPILER, settings, prompter)?;
    let import_alias = resolve_import_alias(&settings.options.import_alias, prompter)?;
    let init_ui_library = resolve_bool_option(&UI_INIT, settings, prompter)?;
    let install_all_components = resolve_bool_option(&UI_INSTALL_ALL, settings, prompter)?;

    Ok(ProjectOptions {
        use_typescript,
        include_tailwind,
        include_eslint,
        use_app_router,
        use_src_dir,
        experimental_app,
        turbopack,
        react_compiler,
        import_alias,
        init_ui_library,
        install_all_components,
    })
}

/// Check a project name: non-empty after trimming, letters, digits, `.`, `_`, `-`.
pub fn validate_project_name(value: &str) -> Result<(), String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err("Project name is required".to_string());
    }
    if !PROJECT_NAME_RE.is_match(trimmed) {
        return Err("Use letters, numbers, dots, underscores or dashes".to_string());
    }
    Ok(())
}

pub fn validate_import_alias(value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err("Import alias cannot be empty".to_string())
    } else {
        Ok(())
    }
}
