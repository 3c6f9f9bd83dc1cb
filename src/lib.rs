//! nextplus: create Next.js projects with an optional UI library set up.
//!
//! A run collects a project name and scaffold options, resolves a target
//! folder, runs the scaffolder and UI-library CLIs through a package runner,
//! and finally opens the new project in an editor. See [`project`] for the
//! pipeline itself.

pub mod errors;
pub mod location;
pub mod opener;
pub mod options;
pub mod project;
pub mod prompt;
pub mod runner;
pub mod settings;
pub mod target;
pub mod ui;

#[cfg(test)]
mod testing;
