//! POSIX path helpers for paths on the remote host.
//!
//! Remote paths are always `/`-separated regardless of the local platform,
//! so `std::path` is not used here.

/// Directory part of `path`, like `dirname(1)`.
#[must_use]
pub fn dirname(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    match trimmed.rfind('/') {
        Some(0) => "/",
        Some(idx) => trimmed[..idx].trim_end_matches('/'),
        None if path.starts_with('/') => "/",
        None => ".",
    }
}

/// Join `base` and `name` with exactly one separator.
#[must_use]
pub fn join(base: &str, name: &str) -> String {
    if name.starts_with('/') {
        return name.to_string();
    }
    if base.ends_with('/') {
        format!("{base}{name}")
    } else {
        format!("{base}/{name}")
    }
}
