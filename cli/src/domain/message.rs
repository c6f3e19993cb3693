//! Changelog message templating.
//!
//! Templates use `{name}` placeholders; `{{` and `}}` produce literal braces.

use std::collections::BTreeMap;

use crate::domain::error::ConfigError;

/// Substitute `{name}` placeholders in `template` with `values`.
///
/// # Errors
///
/// Returns [`ConfigError::Placeholder`] for unknown placeholders, empty or
/// unterminated placeholders, and stray closing braces.
pub fn format_message(
    template: &str,
    values: &BTreeMap<String, String>,
) -> Result<String, ConfigError> {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                out.push('{');
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                out.push('}');
            }
            '{' => {
                let mut name = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some(ch) => name.push(ch),
                        None => {
                            return Err(ConfigError::Placeholder(format!(
                                "unterminated placeholder '{{{name}'"
                            )));
                        }
                    }
                }
                if name.is_empty() {
                    return Err(ConfigError::Placeholder("empty placeholder '{}'".to_string()));
                }
                let value = values
                    .get(&name)
                    .ok_or_else(|| ConfigError::Placeholder(format!("no value for '{{{name}}}'")))?;
                out.push_str(value);
            }
            '}' => {
                return Err(ConfigError::Placeholder(
                    "single '}' encountered; use '}}' for a literal brace".to_string(),
                ));
            }
            other => out.push(other),
        }
    }
    Ok(out)
}

/// Parse `key=value` assignments into a substitution map.
///
/// # Errors
///
/// Returns [`ConfigError::Placeholder`] for an assignment without `=` or with
/// an empty key.
pub fn parse_values<S: AsRef<str>>(
    assignments: &[S],
) -> Result<BTreeMap<String, String>, ConfigError> {
    assignments
        .iter()
        .map(|raw| match raw.as_ref().split_once('=') {
            Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
            _ => Err(ConfigError::Placeholder(format!(
                "expected key=value, got '{}'",
                raw.as_ref()
            ))),
        })
        .collect()
}
