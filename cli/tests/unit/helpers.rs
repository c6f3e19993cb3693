//! Shared test helpers: a scripted `RemoteShell`, a recording
//! `CommandRunner`, and output constructors.

#![allow(dead_code)]

use std::process::{ExitStatus, Output};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Result;
use povfab_cli::application::ports::{CommandRunner, RemoteShell};
use povfab_cli::domain::{Body, CommandOutput, RemoteCommand};

// ── Cross-platform ExitStatus construction ───────────────────────────────────

/// Build an `ExitStatus` from a logical exit code (0 = success, non-zero = failure).
///
/// On Unix the raw wait-status encodes the exit code in bits 8–15, so we shift.
/// On Windows `ExitStatusExt::from_raw` takes the exit code directly.
#[cfg(unix)]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::unix::process::ExitStatusExt;
    ExitStatus::from_raw(code << 8)
}

#[cfg(windows)]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::windows::process::ExitStatusExt;
    #[allow(clippy::cast_sign_loss)]
    ExitStatus::from_raw(code as u32)
}

// ── Output constructors ──────────────────────────────────────────────────────

pub fn ok_output(stdout: &[u8]) -> Output {
    Output {
        status: exit_status(0),
        stdout: stdout.to_vec(),
        stderr: Vec::new(),
    }
}

pub fn err_output(code: i32, stderr: &[u8]) -> Output {
    Output {
        status: exit_status(code),
        stdout: Vec::new(),
        stderr: stderr.to_vec(),
    }
}

// ── Command inspection ───────────────────────────────────────────────────────

/// The words of a command body: the argv, or the script split as a shell
/// would split it.
pub fn words(command: &RemoteCommand) -> Vec<String> {
    match command.body() {
        Body::Argv(argv) => argv.clone(),
        Body::Script(script) => shell_words::split(script).expect("script is valid shell"),
    }
}

/// First word of a command body.
pub fn program(command: &RemoteCommand) -> String {
    words(command).into_iter().next().unwrap_or_default()
}

/// Value of environment variable `key` on `command`.
pub fn env_of<'a>(command: &'a RemoteCommand, key: &str) -> Option<&'a str> {
    command
        .env_vars()
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

// ── FakeShell ────────────────────────────────────────────────────────────────

type Handler = dyn Fn(&RemoteCommand) -> CommandOutput + Send + Sync;

/// A `RemoteShell` that records every command and answers from a handler.
#[derive(Clone)]
pub struct FakeShell {
    calls: Arc<Mutex<Vec<RemoteCommand>>>,
    handler: Arc<Handler>,
}

impl FakeShell {
    /// Shell answering every command with `handler`.
    pub fn new(handler: impl Fn(&RemoteCommand) -> CommandOutput + Send + Sync + 'static) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            handler: Arc::new(handler),
        }
    }

    /// Shell on which every command succeeds with empty output.
    pub fn succeeding() -> Self {
        Self::new(|_| CommandOutput::ok(""))
    }

    /// Snapshot of all recorded commands in call order.
    pub fn calls(&self) -> Vec<RemoteCommand> {
        self.calls.lock().expect("mutex poisoned").clone()
    }

    /// Recorded commands that were not quiet probes.
    pub fn mutating(&self) -> Vec<RemoteCommand> {
        self.calls().into_iter().filter(|c| !c.is_quiet()).collect()
    }

    /// Programs of the recorded commands, in call order.
    pub fn programs(&self) -> Vec<String> {
        self.calls().iter().map(program).collect()
    }
}

impl RemoteShell for FakeShell {
    fn host(&self) -> &str {
        "root@test.example"
    }

    async fn execute(&self, command: &RemoteCommand) -> Result<CommandOutput> {
        self.calls
            .lock()
            .expect("mutex poisoned")
            .push(command.clone());
        Ok((self.handler)(command))
    }
}

/// A remote host with a single text file, supporting the `test -e`,
/// `grep -qxF` and `printf >>` commands the line-append operations use.
pub fn file_backed_shell(path: &'static str, initial: Option<&[&str]>) -> (FakeShell, Arc<Mutex<Option<Vec<String>>>>) {
    let file = Arc::new(Mutex::new(
        initial.map(|lines| lines.iter().map(|l| (*l).to_string()).collect::<Vec<_>>()),
    ));
    let state = Arc::clone(&file);
    let shell = FakeShell::new(move |command| {
        let w = words(command);
        let mut file = state.lock().expect("mutex poisoned");
        match w.first().map(String::as_str) {
            Some("test") if w[2] == path => {
                if file.is_some() {
                    CommandOutput::ok("")
                } else {
                    CommandOutput::failed(1, "")
                }
            }
            Some("test") => CommandOutput::ok(""),
            Some("touch") => {
                file.get_or_insert_with(Vec::new);
                CommandOutput::ok("")
            }
            Some("grep") => match file.as_ref() {
                Some(lines) if lines.contains(&w[3]) => CommandOutput::ok(""),
                _ => CommandOutput::failed(1, ""),
            },
            Some("printf") => match file.as_mut() {
                Some(lines) => {
                    lines.push(w[2].clone());
                    CommandOutput::ok("")
                }
                None => CommandOutput::failed(1, "No such file or directory"),
            },
            _ => CommandOutput::ok(""),
        }
    });
    (shell, file)
}

// ── MockCommandRunner ────────────────────────────────────────────────────────

/// A `CommandRunner` that records every `(program, args, timeout)` call and
/// returns a canned result.
#[derive(Clone)]
pub struct MockCommandRunner {
    calls: Arc<Mutex<Vec<(String, Vec<String>, Duration)>>>,
    result: Arc<dyn Fn() -> Result<Output> + Send + Sync>,
}

impl MockCommandRunner {
    pub fn returning(result: impl Fn() -> Result<Output> + Send + Sync + 'static) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            result: Arc::new(result),
        }
    }

    pub fn recorded_calls(&self) -> Vec<(String, Vec<String>, Duration)> {
        self.calls.lock().expect("mutex poisoned").clone()
    }
}

impl CommandRunner for MockCommandRunner {
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output> {
        self.run_with_timeout(program, args, Duration::ZERO).await
    }

    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<Output> {
        self.calls.lock().expect("mutex poisoned").push((
            program.to_owned(),
            args.iter().map(|s| (*s).to_string()).collect(),
            timeout,
        ));
        (self.result)()
    }
}
