//! Scripted stand-ins for the interactive and external collaborators.

use async_trait::async_trait;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::errors::CreateError;
use crate::opener::{FolderOpener, OpenMode};
use crate::options::ProjectOptions;
use crate::prompt::{Choice, Prompter, Validator};
use crate::runner::{CommandInvocation, CommandRunner, LogSink};
use crate::ui::Notifier;

/// A pre-recorded answer to the next prompt.
#[derive(Debug, Clone)]
pub enum Answer {
    Select(usize),
    Text(String),
    Confirm(bool),
    Folder(PathBuf),
    Dismiss,
}

/// Answers prompts from a queue and records what was asked. Panics on a
/// prompt it has no answer for.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<Answer>,
    asked: Vec<String>,
    last_default: Option<usize>,
    rejections: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new(answers: Vec<Answer>) -> Self {
        Self {
            answers: answers.into(),
            ..Self::default()
        }
    }

    /// Prompts shown so far. Selects are recorded as `prompt | label | label`.
    pub fn asked(&self) -> Vec<String> {
        self.asked.clone()
    }

    pub fn last_default(&self) -> Option<usize> {
        self.last_default
    }

    /// Validation messages for rejected text answers.
    pub fn rejections(&self) -> Vec<String> {
        self.rejections.clone()
    }

    fn next(&mut self, prompt: &str) -> Answer {
        self.answers
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected prompt: {prompt}"))
    }
}

impl Prompter for ScriptedPrompter {
    fn select(
        &mut self,
        prompt: &str,
        choices: &[Choice],
        default: usize,
    ) -> Result<Option<usize>, CreateError> {
        let labels: Vec<&str> = choices.iter().map(|c| c.label.as_str()).collect();
        self.asked
            .push(format!("{} | {}", prompt, labels.join(" | ")));
        self.last_default = Some(default);
        match self.next(prompt) {
            Answer::Select(index) => Ok(Some(index)),
            Answer::Dismiss => Ok(None),
            other => panic!("expected a select answer for {prompt}, got {other:?}"),
        }
    }

    fn input(
        &mut self,
        prompt: &str,
        _initial: &str,
        validate: Validator<'_>,
    ) -> Result<Option<String>, CreateError> {
        self.asked.push(prompt.to_string());
        loop {
            match self.next(prompt) {
                Answer::Text(text) => match validate(&text) {
                    Ok(()) => return Ok(Some(text)),
                    Err(message) => self.rejections.push(message),
                },
                Answer::Dismiss => return Ok(None),
                other => panic!("expected a text answer for {prompt}, got {other:?}"),
            }
        }
    }

    fn confirm(&mut self, prompt: &str, _default: bool) -> Result<Option<bool>, CreateError> {
        self.asked.push(prompt.to_string());
        match self.next(prompt) {
            Answer::Confirm(value) => Ok(Some(value)),
            Answer::Dismiss => Ok(None),
            other => panic!("expected a confirm answer for {prompt}, got {other:?}"),
        }
    }

    fn pick_folder(&mut self, title: &str) -> Result<Option<PathBuf>, CreateError> {
        self.asked.push(title.to_string());
        match self.next(title) {
            Answer::Folder(path) => Ok(Some(path)),
            Answer::Dismiss => Ok(None),
            other => panic!("expected a folder answer for {title}, got {other:?}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Summary,
    Success,
    Warning,
    Error,
    Step,
}

#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: RefCell<Vec<(Level, String)>>,
}

impl RecordingNotifier {
    pub fn messages(&self, level: Level) -> Vec<String> {
        self.messages
            .borrow()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.messages(Level::Warning)
    }

    fn push(&self, level: Level, message: &str) {
        self.messages.borrow_mut().push((level, message.to_string()));
    }
}

impl Notifier for RecordingNotifier {
    fn success(&self, message: &str) {
        self.push(Level::Success, message);
    }

    fn warning(&self, message: &str) {
        self.push(Level::Warning, message);
    }

    fn error(&self, message: &str) {
        self.push(Level::Error, message);
    }

    fn step(&self, message: &str) {
        self.push(Level::Step, message);
    }

    fn summary(&self, name: &str, project_path: &Path, _options: &ProjectOptions) {
        self.push(
            Level::Summary,
            &format!("summary {} {}", name, project_path.display()),
        );
    }
}

type RunHook = Box<dyn Fn(&CommandInvocation) + Send + Sync>;

/// Records invocations instead of spawning processes.
#[derive(Default)]
pub struct RecordingRunner {
    calls: Mutex<Vec<CommandInvocation>>,
    /// Fail the call with this index (0-based) with the given exit code.
    fail_at: Option<(usize, i32)>,
    on_run: Option<RunHook>,
}

impl RecordingRunner {
    pub fn failing_at(index: usize, code: i32) -> Self {
        Self {
            fail_at: Some((index, code)),
            ..Self::default()
        }
    }

    pub fn with_hook(hook: impl Fn(&CommandInvocation) + Send + Sync + 'static) -> Self {
        Self {
            on_run: Some(Box::new(hook)),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<CommandInvocation> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommandRunner for RecordingRunner {
    async fn run(
        &self,
        invocation: &CommandInvocation,
        sink: &mut dyn LogSink,
    ) -> Result<(), CreateError> {
        sink.line(&invocation.header());
        if let Some(hook) = &self.on_run {
            hook(invocation);
        }
        let index = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(invocation.clone());
            calls.len() - 1
        };
        match self.fail_at {
            Some((at, code)) if at == index => Err(CreateError::ProcessExit {
                label: invocation.display_label().to_string(),
                code: Some(code),
            }),
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Default)]
pub struct RecordingOpener {
    opened: Mutex<Vec<(PathBuf, OpenMode)>>,
    fail: bool,
}

impl RecordingOpener {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn opened(&self) -> Vec<(PathBuf, OpenMode)> {
        self.opened.lock().unwrap().clone()
    }
}

#[async_trait]
impl FolderOpener for RecordingOpener {
    async fn open(&self, path: &Path, mode: OpenMode) -> Result<(), CreateError> {
        if self.fail {
            return Err(CreateError::ProcessExit {
                label: "code".to_string(),
                code: Some(1),
            });
        }
        self.opened.lock().unwrap().push((path.to_path_buf(), mode));
        Ok(())
    }
}
