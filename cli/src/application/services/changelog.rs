//! Entries in the host's admin changelog.

use std::collections::BTreeMap;

use anyhow::Result;

use crate::application::ports::RemoteShell;
use crate::application::services::Outcome;
use crate::application::services::remote::{exists, run};
use crate::domain::RemoteCommand;
use crate::domain::message::format_message;

/// Helper installed on managed hosts that records changelog entries.
pub const CHANGELOG_TOOL: &str = "/usr/sbin/new-changelog-entry";

/// How a changelog entry is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangelogOptions {
    /// Add to the latest entry instead of starting a new one.
    pub append: bool,
    /// Silently skip hosts without [`CHANGELOG_TOOL`].
    pub optional: bool,
    /// Placeholder values; the message is used verbatim when `None`.
    pub values: Option<BTreeMap<String, String>>,
}

impl Default for ChangelogOptions {
    fn default() -> Self {
        Self {
            append: false,
            optional: true,
            values: None,
        }
    }
}

/// Record `message` in the changelog.
///
/// # Errors
///
/// Fails on a malformed template, or when the tool is missing and the entry
/// is not optional (the invocation itself fails).
pub async fn changelog(
    shell: &impl RemoteShell,
    message: &str,
    options: &ChangelogOptions,
) -> Result<Outcome> {
    if options.optional && !exists(shell, CHANGELOG_TOOL, false).await? {
        tracing::debug!(host = shell.host(), "no changelog tool, skipping entry");
        return Ok(Outcome::Skipped);
    }
    let message = match &options.values {
        Some(values) => format_message(message, values)?,
        None => message.to_string(),
    };
    let mut argv = vec![CHANGELOG_TOOL];
    if options.append {
        argv.push("-a");
    }
    argv.push(&message);
    run(shell, RemoteCommand::new(argv).sudo_as("root")).await?;
    Ok(Outcome::Changed)
}

/// Add `message` to the most recent changelog entry.
pub async fn changelog_append(shell: &impl RemoteShell, message: &str) -> Result<Outcome> {
    let options = ChangelogOptions {
        append: true,
        ..ChangelogOptions::default()
    };
    changelog(shell, message, &options).await
}
