use crate::error::{BackdateError, Result};
use crate::model::CommitInfo;
use chrono::{DateTime, Utc};
use gix::Repository;
use std::path::{Path, PathBuf};

/// Read-only view of a generated repository.
pub struct GitRepo {
    repo: Repository,
    path: PathBuf,
}

impl GitRepo {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = gix::open(path.as_ref())?;
        let path = repo.workdir().unwrap_or_else(|| repo.path()).to_path_buf();
        Ok(Self { repo, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Commits reachable from `HEAD` along first parents, newest first.
    pub fn history(&self) -> Result<Vec<CommitInfo>> {
        let mut head = self.repo.head()?;
        if head.is_unborn() {
            return Ok(Vec::new());
        }
        let head_commit = head.peel_to_commit_in_place()?;

        let mut commits = Vec::new();
        let mut next = Some(head_commit.id);

        while let Some(commit_id) = next {
            let commit = self.repo.find_commit(commit_id)?;
            let secs = commit
                .time()
                .map_err(|e| BackdateError::InvalidDate(format!("commit {commit_id}: {e}")))?
                .seconds;
            let timestamp = timestamp_from_secs(secs)?;
            let message = commit.message()?;

            commits.push(CommitInfo {
                id: commit_id.to_string(),
                message: message.title.to_string(),
                timestamp,
            });

            next = commit.parent_ids().next().map(|id| id.detach());
        }

        Ok(commits)
    }
}

fn timestamp_from_secs(secs: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0)
        .ok_or_else(|| BackdateError::InvalidDate(format!("Invalid timestamp: {secs}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_timestamp_is_an_invalid_date() {
        let err = timestamp_from_secs(i64::MAX).unwrap_err();
        assert!(matches!(err, BackdateError::InvalidDate(_)));
        assert_eq!(err.to_string(), format!("Invalid date: Invalid timestamp: {}", i64::MAX));
    }

    #[test]
    fn epoch_seconds_convert() {
        assert_eq!(timestamp_from_secs(0).unwrap().timestamp(), 0);
    }

}
