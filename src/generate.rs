use crate::git::{CommandRunner, GitDriver, GitRepo, SystemRunner};
use crate::model::{commit_time, Config, DateRange, RunSummary, SCHEMA_VERSION};
use crate::schedule::{self, Density, Entropy, RandomSource};
use crate::util;
use anyhow::Context;
use chrono::{Local, NaiveDateTime, Utc};
use indicatif::{ProgressBar, ProgressStyle};

/// Generate the repository described by `config` using real `git` and thread entropy.
pub fn exec(config: &Config) -> anyhow::Result<RunSummary> {
    let mut rng = Entropy::thread();
    run(config, Local::now().naive_local(), SystemRunner, &mut rng)
}

/// Same as [`exec`] with the clock, command runner and random source supplied.
pub fn run<R, G>(config: &Config, now: NaiveDateTime, runner: R, rng: &mut G) -> anyhow::Result<RunSummary>
where
    R: CommandRunner,
    G: RandomSource + ?Sized,
{
    let range = DateRange::around(now, commit_time(), config.days_before, config.days_after)
        .context("Failed to compute date range")?;

    let name = util::repo_name(config.remote_url.as_deref(), now)
        .context("Failed to derive repository name")?;
    let directory = config.output_dir.join(&name);

    let density = Density {
        frequency_percent: config.frequency_percent,
        exclude_weekends: config.no_weekends,
        max_commits_per_day: config.max_commits_per_day,
    };

    let mut summary = RunSummary {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        repository_path: directory.to_string_lossy().to_string(),
        remote: config.remote_url.clone(),
        start_date: range.start_date(),
        end_date: range.end_date(),
        commit_count: 0,
        active_days: 0,
        head: None,
        pushed: false,
        dry_run: config.dry_run,
        dates: Vec::new(),
    };

    if config.dry_run {
        let dates = schedule::generate(range.start_date(), range.end_date(), density, rng);
        summary.commit_count = dates.len();
        summary.active_days = schedule::active_days(&dates);
        summary.dates = dates;
        return Ok(summary);
    }

    let mut driver = GitDriver::new(&directory, config.identity(), runner)
        .with_branch(config.branch.as_str())
        .with_file(config.file.as_str());
    driver
        .initialize()
        .with_context(|| format!("Failed to initialize repository at {}", directory.display()))?;

    let dates = schedule::generate(range.start_date(), range.end_date(), density, rng);
    tracing::info!(
        commits = dates.len(),
        start = %range.start_date(),
        end = %range.end_date(),
        "commit plan ready"
    );

    let pb = if config.json {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(dates.len() as u64)
    };
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:30}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    pb.set_message("Creating commits...");

    let at = commit_time();
    for date in &dates {
        pb.set_message(date.format("%Y-%m-%d").to_string());
        driver
            .commit(&util::commit_message(*date), date.and_time(at))
            .with_context(|| format!("Failed to commit for {date}"))?;
        pb.inc(1);
    }
    pb.finish_and_clear();

    if let Some(url) = config.remote_url.as_deref() {
        driver.add_remote(url).context("Failed to add remote")?;
        driver.push().context("Failed to push")?;
        summary.pushed = true;
    }

    let verified = verify_history(&directory, dates.len())?;
    summary.commit_count = verified.as_ref().map_or(dates.len(), |v| v.count);
    summary.head = verified.and_then(|v| v.head);
    summary.active_days = schedule::active_days(&dates);
    summary.dates = dates;

    tracing::info!(path = %directory.display(), commits = summary.commit_count, "repository generated");
    Ok(summary)
}

struct Verified {
    count: usize,
    head: Option<String>,
}

/// Commit count and head as read back from disk; `None` when the tree isn't a readable repository.
fn verify_history(directory: &std::path::Path, expected: usize) -> anyhow::Result<Option<Verified>> {
    if expected == 0 {
        return Ok(None);
    }
    let repo = match GitRepo::open(directory) {
        Ok(repo) => repo,
        Err(e) => {
            tracing::warn!(error = %e, "could not open generated repository");
            return Ok(None);
        }
    };
    let history = repo
        .history()
        .with_context(|| format!("Failed to read history of {}", repo.path().display()))?;
    if history.len() != expected {
        tracing::warn!(expected, found = history.len(), "commit count mismatch");
    }
    Ok(Some(Verified {
        count: history.len(),
        head: history.first().map(|c| c.id.clone()),
    }))
}
