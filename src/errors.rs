//! Typed error hierarchy for project creation.
//!
//! `CreateError` covers every way a `nextplus new` run can stop early.
//! `Cancelled` is the odd one out: it is how a dismissed prompt unwinds the
//! pipeline through `?`, and the top level reports it as a quiet abort rather
//! than as a failure.

use std::path::PathBuf;
use thiserror::Error;

/// Errors from the project-creation pipeline.
#[derive(Debug, Error)]
pub enum CreateError {
    #[error("{0}")]
    Validation(String),

    #[error("Cancelled by user")]
    Cancelled,

    #[error("{reason}: {}", .path.display())]
    Path { path: PathBuf, reason: String },

    #[error("Failed to start {program}: {source}")]
    ProcessLaunch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{label} exited with code {}", format_exit_code(.code))]
    ProcessExit { label: String, code: Option<i32> },

    #[error("Prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CreateError {
    /// True when the run stopped because the user dismissed a prompt.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, CreateError::Cancelled)
    }

    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        CreateError::Io {
            context: context.into(),
            source,
        }
    }
}

fn format_exit_code(code: &Option<i32>) -> String {
    code.map(|c| c.to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Converts a dismissed prompt (`None`) into [`CreateError::Cancelled`].
pub trait OrCancelled<T> {
    fn or_cancelled(self) -> Result<T, CreateError>;
}

impl<T> OrCancelled<T> for Option<T> {
    fn or_cancelled(self) -> Result<T, CreateError> {
        self.ok_or(CreateError::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn process_exit_reports_label_and_code() {
        let err = CreateError::ProcessExit {
            label: "shadcn init".to_string(),
            code: Some(2),
        };
        assert_eq!(err.to_string(), "shadcn init exited with code 2");
    }

    #[test]
    fn process_exit_without_code_reports_unknown() {
        let err = CreateError::ProcessExit {
            label: "npx".to_string(),
            code: None,
        };
        assert_eq!(err.to_string(), "npx exited with code unknown");
    }

    #[test]
    fn process_launch_carries_io_source() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = CreateError::ProcessLaunch {
            program: "npx".to_string(),
            source: io_err,
        };
        match &err {
            CreateError::ProcessLaunch { program, source } => {
                assert_eq!(program, "npx");
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            _ => panic!("Expected ProcessLaunch"),
        }
        assert!(err.to_string().starts_with("Failed to start npx"));
    }

    #[test]
    fn path_error_includes_reason_and_path() {
        let err = CreateError::Path {
            path: PathBuf::from("/missing/dir"),
            reason: "Configured default location not found".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Configured default location not found: /missing/dir"
        );
    }

    #[test]
    fn cancelled_is_distinguishable() {
        assert!(CreateError::Cancelled.is_cancelled());
        assert!(!CreateError::Validation("bad".into()).is_cancelled());
    }

    #[test]
    fn or_cancelled_maps_none() {
        let dismissed: Option<bool> = None;
        assert!(dismissed.or_cancelled().unwrap_err().is_cancelled());
        assert!(Some(true).or_cancelled().unwrap());
    }

    #[test]
    fn anyhow_errors_convert_transparently() {
        let err: CreateError = anyhow::anyhow!("settings unreadable").into();
        assert_eq!(err.to_string(), "settings unreadable");
    }
}
