//! External command execution with streamed output.
//!
//! [`ProcessRunner`] spawns a process, forwards stdout and stderr chunks to a
//! [`LogSink`] in arrival order, and succeeds only on exit code 0.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tokio::sync::mpsc;

use crate::errors::CreateError;

/// One external command: program, arguments, working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInvocation {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
    /// Short name used in logs and errors. Defaults to the program.
    pub label: Option<String>,
}

impl CommandInvocation {
    pub fn new(
        program: impl Into<String>,
        args: impl IntoIterator<Item = impl Into<String>>,
        cwd: impl AsRef<Path>,
    ) -> Self {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            cwd: cwd.as_ref().to_path_buf(),
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.program)
    }

    /// `program arg1 arg2 ...`
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Line written to the log sink before the process starts.
    pub fn header(&self) -> String {
        match &self.label {
            Some(label) => format!(
                "> ({}) {} (cwd: {})",
                label,
                self.command_line(),
                self.cwd.display()
            ),
            None => format!("> {} (cwd: {})", self.command_line(), self.cwd.display()),
        }
    }
}

/// Destination for subprocess output.
pub trait LogSink: Send {
    /// Receive a raw output chunk, exactly as read.
    fn write(&mut self, chunk: &[u8]);

    fn line(&mut self, line: &str) {
        self.write(line.as_bytes());
        self.write(b"\n");
    }
}

/// Collects output in memory.
impl LogSink for Vec<u8> {
    fn write(&mut self, chunk: &[u8]) {
        self.extend_from_slice(chunk);
    }
}

/// Writes output straight to the terminal, flushing after every chunk.
#[derive(Debug, Default)]
pub struct TerminalSink;

impl LogSink for TerminalSink {
    fn write(&mut self, chunk: &[u8]) {
        use std::io::Write;

        let mut stdout = std::io::stdout().lock();
        // A closed stdout must not abort the child; its output is simply lost.
        let _ = stdout.write_all(chunk);
        let _ = stdout.flush();
    }
}

#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(
        &self,
        invocation: &CommandInvocation,
        sink: &mut dyn LogSink,
    ) -> Result<(), CreateError>;
}

/// Runs invocations as real child processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessRunner;

#[async_trait]
impl CommandRunner for ProcessRunner {
    async fn run(
        &self,
        invocation: &CommandInvocation,
        sink: &mut dyn LogSink,
    ) -> Result<(), CreateError> {
        sink.line(&invocation.header());
        tracing::info!(
            command = %invocation.command_line(),
            cwd = %invocation.cwd.display(),
            "spawning process"
        );

        let mut child = build_command(invocation)
            .current_dir(&invocation.cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| CreateError::ProcessLaunch {
                program: invocation.program.clone(),
                source,
            })?;

        let (tx, mut rx) = mpsc::unbounded_channel::<Vec<u8>>();
        let mut readers = Vec::with_capacity(2);
        if let Some(stdout) = child.stdout.take() {
            readers.push(tokio::spawn(forward_chunks(stdout, tx.clone())));
        }
        if let Some(stderr) = child.stderr.take() {
            readers.push(tokio::spawn(forward_chunks(stderr, tx.clone())));
        }
        drop(tx);

        // Ends once both pipes are closed
        while let Some(chunk) = rx.recv().await {
            sink.write(&chunk);
        }
        for reader in readers {
            let _ = reader.await;
        }

        let status = child.wait().await.map_err(|e| {
            CreateError::io(
                format!("Failed to wait for {}", invocation.display_label()),
                e,
            )
        })?;

        tracing::info!(
            label = invocation.display_label(),
            code = ?status.code(),
            "process exited"
        );

        match status.code() {
            Some(0) => Ok(()),
            code => Err(CreateError::ProcessExit {
                label: invocation.display_label().to_string(),
                code,
            }),
        }
    }
}

#[cfg(not(windows))]
fn build_command(invocation: &CommandInvocation) -> Command {
    let mut cmd = Command::new(&invocation.program);
    cmd.args(&invocation.args);
    cmd
}

/// `npx` and friends are `.cmd` shims on Windows and need the shell.
#[cfg(windows)]
fn build_command(invocation: &CommandInvocation) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.arg("/C").arg(&invocation.program).args(&invocation.args);
    cmd
}

async fn forward_chunks<R>(mut reader: R, tx: mpsc::UnboundedSender<Vec<u8>>)
where
    R: AsyncRead + Unpin,
{
    let mut buf = [0u8; 8192];
    loop {
        match reader.read(&mut buf).await {
            Ok(0) | Err(_) => break,
            Ok(n) => {
                if tx.send(buf[..n].to_vec()).is_err() {
                    break;
                }
            }
        }
    }
}
