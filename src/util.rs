use crate::error::{BackdateError, Result};
use chrono::NaiveDateTime;

pub const DEFAULT_NAME_PREFIX: &str = "generated_repo_";

/// Directory name for a remote: last path segment with one extension stripped.
///
/// `https://example.com/user/repo.git` and `git@example.com:repo.git` both map to `repo`.
pub fn repo_name_from_remote(remote: &str) -> Result<String> {
    let trimmed = remote.trim().trim_end_matches('/');
    let segment = trimmed.rsplit(['/', ':']).next().unwrap_or(trimmed);
    let name = match segment.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => segment,
    };

    if name.is_empty() || name == "." || name == ".." {
        return Err(BackdateError::InvalidRemote(remote.to_string()));
    }
    Ok(name.to_string())
}

pub fn default_repo_name(now: NaiveDateTime) -> String {
    format!("{DEFAULT_NAME_PREFIX}{}", now.format("%Y_%m_%d_%H_%M_%S"))
}

pub fn repo_name(remote: Option<&str>, now: NaiveDateTime) -> Result<String> {
    match remote {
        Some(url) => repo_name_from_remote(url),
        None => Ok(default_repo_name(now)),
    }
}

pub fn commit_message(date: chrono::NaiveDate) -> String {
    format!("Auto-generated commit on {}", date.format("%Y-%m-%d"))
}
