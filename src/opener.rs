//! Opening the generated project folder.

use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;

use crate::errors::CreateError;

/// Where a folder should be opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenMode {
    /// Replace the current editor window
    CurrentWindow,
    /// Open a fresh editor window
    NewWindow,
}

impl std::fmt::Display for OpenMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OpenMode::CurrentWindow => write!(f, "current window"),
            OpenMode::NewWindow => write!(f, "new window"),
        }
    }
}

#[async_trait]
pub trait FolderOpener: Send + Sync {
    async fn open(&self, path: &Path, mode: OpenMode) -> Result<(), CreateError>;
}

/// Opens folders with an editor CLI (`code` by default), or with the OS
/// default handler when no editor is configured.
#[derive(Debug, Clone)]
pub struct EditorOpener {
    editor: Option<String>,
}

impl EditorOpener {
    pub fn new(editor: &str) -> Self {
        let editor = editor.trim();
        Self {
            editor: (!editor.is_empty()).then(|| editor.to_string()),
        }
    }

    /// Arguments passed to the editor for `mode`.
    pub fn editor_args(path: &Path, mode: OpenMode) -> Vec<String> {
        let window_flag = match mode {
            OpenMode::CurrentWindow => "--reuse-window",
            OpenMode::NewWindow => "--new-window",
        };
        vec![window_flag.to_string(), path.display().to_string()]
    }
}

#[async_trait]
impl FolderOpener for EditorOpener {
    async fn open(&self, path: &Path, mode: OpenMode) -> Result<(), CreateError> {
        let Some(editor) = &self.editor else {
            tracing::debug!(path = %path.display(), "opening with system handler");
            return open::that(path).map_err(|e| {
                CreateError::io(format!("Failed to open {}", path.display()), e)
            });
        };

        tracing::debug!(editor = %editor, path = %path.display(), %mode, "opening in editor");
        let mut cmd = editor_command(editor);
        cmd.args(Self::editor_args(path, mode))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        // Editor launchers return once the window is handed off.
        let status = cmd
            .status()
            .await
            .map_err(|source| CreateError::ProcessLaunch {
                program: editor.clone(),
                source,
            })?;
        if status.success() {
            Ok(())
        } else {
            Err(CreateError::ProcessExit {
                label: editor.clone(),
                code: status.code(),
            })
        }
    }
}

#[cfg(not(windows))]
fn editor_command(editor: &str) -> tokio::process::Command {
    tokio::process::Command::new(editor)
}

#[cfg(windows)]
fn editor_command(editor: &str) -> tokio::process::Command {
    let mut cmd = tokio::process::Command::new("cmd");
    cmd.arg("/C").arg(editor);
    cmd
}
