//! Structured remote commands and their shell rendering.
//!
//! Commands are built from argument vectors (or small scripts assembled
//! from already-quoted pieces) and only turned into a shell line at the
//! rendering boundary, where every value is quoted with `shell-words`.

use std::fmt;

/// Who a remote command runs as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Privilege {
    /// The SSH login user.
    User,
    /// `sudo` to the default target (root).
    Superuser,
    /// `sudo -u <account>`.
    As(String),
}

/// What a remote command executes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    /// A program and its arguments, each quoted individually.
    Argv(Vec<String>),
    /// A script run through `sh -c`. Callers quote interpolated values.
    Script(String),
}

/// A single remote command invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteCommand {
    body: Body,
    env: Vec<(String, String)>,
    cwd: Option<String>,
    privilege: Privilege,
    quiet: bool,
}

impl RemoteCommand {
    /// Command from a program and its arguments.
    pub fn new<I, S>(argv: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_body(Body::Argv(argv.into_iter().map(Into::into).collect()))
    }

    /// Command executed by a command interpreter (`sh -c`).
    pub fn script(script: impl Into<String>) -> Self {
        Self::with_body(Body::Script(script.into()))
    }

    fn with_body(body: Body) -> Self {
        Self {
            body,
            env: Vec::new(),
            cwd: None,
            privilege: Privilege::User,
            quiet: false,
        }
    }

    /// Run as the superuser.
    #[must_use]
    pub fn sudo(mut self) -> Self {
        self.privilege = Privilege::Superuser;
        self
    }

    /// Run as a named account through `sudo -u`.
    #[must_use]
    pub fn sudo_as(mut self, account: impl Into<String>) -> Self {
        self.privilege = Privilege::As(account.into());
        self
    }

    /// Run as the superuser when `use_sudo` is set.
    #[must_use]
    pub fn sudo_if(self, use_sudo: bool) -> Self {
        if use_sudo { self.sudo() } else { self }
    }

    /// Export an environment variable for the command. Assignments are
    /// evaluated after privilege escalation, so they survive `sudo`.
    #[must_use]
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    /// Run inside `dir`.
    #[must_use]
    pub fn current_dir(mut self, dir: impl Into<String>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// Do not echo the command or its output.
    #[must_use]
    pub fn quiet(mut self) -> Self {
        self.quiet = true;
        self
    }

    #[must_use]
    pub fn body(&self) -> &Body {
        &self.body
    }

    #[must_use]
    pub fn privilege(&self) -> &Privilege {
        &self.privilege
    }

    #[must_use]
    pub fn env_vars(&self) -> &[(String, String)] {
        &self.env
    }

    #[must_use]
    pub fn working_dir(&self) -> Option<&str> {
        self.cwd.as_deref()
    }

    #[must_use]
    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// `"sudo"` for escalated commands, `"run"` otherwise.
    #[must_use]
    pub fn verb(&self) -> &'static str {
        match self.privilege {
            Privilege::User => "run",
            Privilege::Superuser | Privilege::As(_) => "sudo",
        }
    }

    /// The command as executed after privilege escalation.
    #[must_use]
    pub fn command_line(&self) -> String {
        let mut line = String::new();
        if let Some(dir) = &self.cwd {
            line.push_str("cd ");
            line.push_str(&shell_words::quote(dir));
            line.push_str(" && ");
        }
        for (key, value) in &self.env {
            line.push_str(key);
            line.push('=');
            line.push_str(&shell_words::quote(value));
            line.push(' ');
        }
        match &self.body {
            Body::Argv(argv) => line.push_str(&shell_words::join(argv)),
            Body::Script(script) => {
                line.push_str("sh -c ");
                line.push_str(&shell_words::quote(script));
            }
        }
        line
    }

    /// The full line handed to the remote login shell.
    #[must_use]
    pub fn render(&self) -> String {
        let inner = self.command_line();
        match &self.privilege {
            Privilege::User => inner,
            Privilege::Superuser => format!("sudo -H -- sh -c {}", shell_words::quote(&inner)),
            Privilege::As(account) => format!(
                "sudo -H -u {} -- sh -c {}",
                shell_words::quote(account),
                shell_words::quote(&inner)
            ),
        }
    }
}

impl fmt::Display for RemoteCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.command_line())
    }
}

/// Captured result of a remote command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code; `None` when the process was killed by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// Successful result with the given stdout.
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            code: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// Failed result with the given exit code and stderr.
    pub fn failed(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.code == Some(0)
    }

    /// Stdout with surrounding whitespace removed.
    #[must_use]
    pub fn stdout_trimmed(&self) -> &str {
        self.stdout.trim()
    }
}
