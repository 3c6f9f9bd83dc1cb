//! Shared UI icons.
//!
//! Each icon falls back to a plain ASCII tag on terminals without emoji
//! support.

use console::Emoji;

// Status indicators
pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "[OK]");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "[ERR]");
pub static WARN: Emoji<'_, '_> = Emoji("⚠️  ", "[WARN]");
pub static SPARKLE: Emoji<'_, '_> = Emoji("✨ ", "*");

// Pipeline indicators
pub static FOLDER: Emoji<'_, '_> = Emoji("📁 ", "");
pub static RUNNING: Emoji<'_, '_> = Emoji("▶️  ", "[>]");
