use assert_cmd::prelude::*;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::tempdir;

fn has_git() -> bool {
    Command::new("git").arg("--version").output().is_ok()
}

/// Isolate from the user's global git config (signing, hooks, templates).
fn isolated(mut cmd: Command) -> Command {
    cmd.env("GIT_CONFIG_NOSYSTEM", "1")
        .env("GIT_CONFIG_GLOBAL", "/dev/null")
        .env("NO_COLOR", "1");
    cmd
}

fn backdate() -> Command {
    isolated(Command::cargo_bin("backdate").unwrap())
}

fn git_output(dir: &Path, args: &[&str]) -> String {
    let out = isolated(Command::new("git"))
        .args(args)
        .current_dir(dir)
        .output()
        .unwrap();
    assert!(out.status.success(), "git {args:?} failed");
    String::from_utf8(out.stdout).unwrap()
}

fn only_child(dir: &Path) -> PathBuf {
    let entries: Vec<_> = fs::read_dir(dir).unwrap().map(|e| e.unwrap().path()).collect();
    assert_eq!(entries.len(), 1, "expected exactly one generated directory");
    entries.into_iter().next().unwrap()
}

#[test]
fn generates_one_commit_per_day_with_pinned_dates() {
    let dir = tempdir().unwrap();
    if !has_git() {
        return;
    }

    backdate()
        .arg("--output-dir")
        .arg(dir.path())
        .args(["--days-before", "2", "--frequency", "100", "--max-commits", "1"])
        .args(["--user-name", "A", "--user-email", "a@b.com"])
        .assert()
        .success();

    let repo = only_child(dir.path());
    let name = repo.file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("generated_repo_"), "unexpected name {name}");

    let readme = fs::read_to_string(repo.join("README.md")).unwrap();
    let lines: Vec<&str> = readme.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines.iter().all(|l| l.starts_with("Auto-generated commit on ")));

    assert_eq!(git_output(&repo, &["config", "--local", "user.name"]).trim(), "A");
    assert_eq!(git_output(&repo, &["config", "--local", "user.email"]).trim(), "a@b.com");
    assert_eq!(git_output(&repo, &["rev-list", "--count", "main"]).trim(), "3");

    let dates = git_output(
        &repo,
        &["log", "--reverse", "--format=%ad|%cd|%s", "--date=format:%Y-%m-%d %H:%M:%S"],
    );
    for (line, readme_line) in dates.lines().zip(&lines) {
        let parts: Vec<&str> = line.split('|').collect();
        assert_eq!(parts[0], parts[1], "author and committer dates differ");
        assert!(parts[0].ends_with(" 20:00:00"));
        assert_eq!(&parts[2], readme_line);
        assert!(readme_line.ends_with(&parts[0][..10]));
    }
}

#[test]
fn dry_run_json_plans_without_side_effects() {
    let dir = tempdir().unwrap();

    let out = backdate()
        .arg("--output-dir")
        .arg(dir.path())
        .args(["--dry-run", "--json", "--days-before", "13", "--no-weekends", "--frequency", "100"])
        .args(["--repository", "https://example.com/someone/history.git"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(v["dry_run"], serde_json::Value::Bool(true));
    assert!(v["repository_path"].as_str().unwrap().ends_with("history"));
    // Two full weeks always hold ten weekdays.
    assert_eq!(v["active_days"].as_u64().unwrap(), 10);
    let dates = v["dates"].as_array().unwrap();
    assert_eq!(dates.len() as u64, v["commit_count"].as_u64().unwrap());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn max_commits_out_of_range_is_a_usage_error() {
    let dir = tempdir().unwrap();

    backdate()
        .arg("--output-dir")
        .arg(dir.path())
        .args(["--max-commits", "21"])
        .assert()
        .code(2);

    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn failures_print_one_error_line() {
    let dir = tempdir().unwrap();
    let blocker = dir.path().join("not-a-dir");
    fs::write(&blocker, "").unwrap();

    let out = backdate()
        .arg("--output-dir")
        .arg(&blocker)
        .args(["--days-before", "1"])
        .assert()
        .code(1)
        .get_output()
        .stderr
        .clone();

    let stderr = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = stderr.lines().collect();
    assert_eq!(lines.len(), 1, "stderr: {stderr}");
    assert!(lines[0].starts_with("Error: Failed to initialize repository"));
}

#[test]
fn pushes_to_a_local_remote() {
    let dir = tempdir().unwrap();
    if !has_git() {
        return;
    }

    let remote = dir.path().join("upstream.git");
    let work = dir.path().join("work");
    fs::create_dir_all(&work).unwrap();
    git_output(dir.path(), &["init", "--quiet", "--bare", remote.to_str().unwrap()]);

    let out = backdate()
        .arg("--output-dir")
        .arg(&work)
        .arg("--repository")
        .arg(&remote)
        .args(["--days-before", "4", "--frequency", "100", "--max-commits", "2"])
        .args(["--user-name", "A", "--user-email", "a@b.com"])
        .args(["--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let summary: serde_json::Value = serde_json::from_slice(&out).unwrap();

    let local = work.join("upstream");
    let local_count = git_output(&local, &["rev-list", "--count", "main"]);
    let remote_count = git_output(&remote, &["rev-list", "--count", "main"]);
    assert_eq!(local_count, remote_count);
    assert_eq!(summary["commit_count"].as_u64().unwrap().to_string(), local_count.trim());
    assert_eq!(
        summary["head"].as_str().unwrap(),
        git_output(&local, &["rev-parse", "HEAD"]).trim()
    );
    assert_eq!(summary["pushed"], serde_json::Value::Bool(true));
    assert_eq!(
        git_output(&local, &["rev-parse", "--abbrev-ref", "main@{upstream}"]).trim(),
        "origin/main"
    );
}
