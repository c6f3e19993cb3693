//! Package list normalization and install options.

use crate::domain::error::ConfigError;

/// Ordered, de-duplicated list of Debian package names.
///
/// Every call shape normalizes to the same list: one space-separated string,
/// several strings, or any sequence of strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageList(Vec<String>);

impl PackageList {
    /// Parse a space-separated package string.
    #[must_use]
    pub fn parse(spec: &str) -> Self {
        std::iter::once(spec).collect()
    }

    fn push(&mut self, name: &str) {
        if !self.0.iter().any(|existing| existing == name) {
            self.0.push(name.to_string());
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl<S: AsRef<str>> FromIterator<S> for PackageList {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        let mut list = Self::default();
        for entry in iter {
            for name in entry.as_ref().split_whitespace() {
                list.push(name);
            }
        }
        list
    }
}

impl From<&str> for PackageList {
    fn from(spec: &str) -> Self {
        Self::parse(spec)
    }
}

impl From<String> for PackageList {
    fn from(spec: String) -> Self {
        Self::parse(&spec)
    }
}

impl<S: AsRef<str>> From<&[S]> for PackageList {
    fn from(names: &[S]) -> Self {
        names.iter().collect()
    }
}

impl<S: AsRef<str>, const N: usize> From<[S; N]> for PackageList {
    fn from(names: [S; N]) -> Self {
        names.into_iter().collect()
    }
}

impl<S: AsRef<str>> From<Vec<S>> for PackageList {
    fn from(names: Vec<S>) -> Self {
        names.into_iter().collect()
    }
}

// ── Install options ──────────────────────────────────────────────────────────

pub const INSTALL_OPTION_KEYS: &[&str] = &["missing_only", "interactive"];

/// Options recognized by `install_packages`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstallOptions {
    /// Skip packages that are already installed.
    pub missing_only: bool,
    /// Let `apt-get` prompt (no `DEBIAN_FRONTEND=noninteractive`).
    pub interactive: bool,
}

impl Default for InstallOptions {
    fn default() -> Self {
        Self {
            missing_only: true,
            interactive: false,
        }
    }
}

impl InstallOptions {
    /// Build options from `(key, value)` pairs.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::UnknownOptions`] naming every unrecognized key, sorted.
    /// - [`ConfigError::InvalidOption`] when a value is not a boolean.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let pairs: Vec<(K, V)> = pairs.into_iter().collect();
        let mut unknown: Vec<String> = pairs
            .iter()
            .map(|(key, _)| key.as_ref())
            .filter(|key| !INSTALL_OPTION_KEYS.contains(key))
            .map(str::to_string)
            .collect();
        if !unknown.is_empty() {
            unknown.sort();
            unknown.dedup();
            return Err(ConfigError::UnknownOptions(unknown));
        }

        let mut options = Self::default();
        for (key, value) in &pairs {
            let (key, value) = (key.as_ref(), value.as_ref());
            let flag =
                parse_bool(value).ok_or_else(|| ConfigError::InvalidOption(format!("{key}={value}")))?;
            match key {
                "missing_only" => options.missing_only = flag,
                _ => options.interactive = flag,
            }
        }
        Ok(options)
    }

    /// Build options from `key=value` assignments as typed on the command line.
    ///
    /// # Errors
    ///
    /// Same as [`InstallOptions::from_pairs`]; an assignment without `=` is
    /// reported as [`ConfigError::InvalidOption`].
    pub fn parse_assignments<S: AsRef<str>>(assignments: &[S]) -> Result<Self, ConfigError> {
        let pairs = assignments
            .iter()
            .map(|raw| {
                raw.as_ref()
                    .split_once('=')
                    .ok_or_else(|| ConfigError::InvalidOption(raw.as_ref().to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_pairs(pairs)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Some(true),
        "false" | "no" | "0" => Some(false),
        _ => None,
    }
}
