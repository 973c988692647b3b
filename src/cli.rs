use crate::model::{Config, RunSummary, DEFAULT_BRANCH, DEFAULT_FILE};
use anyhow::Result;
use clap::{ArgAction, Args, Parser};
use console::style;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "backdate")]
#[command(about = "Automatically generate a git repository with a customized commit history")]
#[command(version)]
pub struct Cli {
    #[clap(flatten)]
    pub history: HistoryArgs,

    #[clap(flatten)]
    pub output: OutputArgs,
}

#[derive(Args, Clone, Debug)]
pub struct HistoryArgs {
    #[arg(long, help = "Do not commit on weekends")]
    pub no_weekends: bool,

    #[arg(
        long,
        default_value_t = 10,
        value_parser = clap::value_parser!(u32).range(1..=20),
        help = "Maximum number of commits per day (1-20)"
    )]
    pub max_commits: u32,

    #[arg(long, default_value_t = 80, allow_negative_numbers = true, help = "Percentage of days that get commits")]
    pub frequency: i32,

    #[arg(long, help = "URL of the remote repository to push to")]
    pub repository: Option<String>,

    #[arg(long, help = "Git user name for the generated repository")]
    pub user_name: Option<String>,

    #[arg(long, help = "Git user email for the generated repository")]
    pub user_email: Option<String>,

    #[arg(long, default_value_t = 365, allow_negative_numbers = true, help = "Start generating commits N days before today")]
    pub days_before: i64,

    #[arg(long, default_value_t = 0, allow_negative_numbers = true, help = "Keep generating commits until N days after today")]
    pub days_after: i64,
}

#[derive(Args, Clone, Debug)]
pub struct OutputArgs {
    #[arg(long, default_value = ".", help = "Directory in which the repository is created")]
    pub output_dir: PathBuf,

    #[arg(long, default_value = DEFAULT_BRANCH, help = "Branch that receives the commits and is pushed")]
    pub branch: String,

    #[arg(long, default_value = DEFAULT_FILE, help = "Tracked file that accumulates one line per commit")]
    pub file: String,

    #[arg(long, help = "Print the commit plan without touching the filesystem")]
    pub dry_run: bool,

    #[arg(long, help = "Output a JSON summary")]
    pub json: bool,

    #[arg(short, long, action = ArgAction::Count, help = "Increase log verbosity (-v, -vv)")]
    pub verbose: u8,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn config(&self) -> Config {
        Config {
            no_weekends: self.history.no_weekends,
            max_commits_per_day: self.history.max_commits,
            frequency_percent: self.history.frequency,
            remote_url: self.history.repository.clone(),
            user_name: self.history.user_name.clone(),
            user_email: self.history.user_email.clone(),
            days_before: self.history.days_before,
            days_after: self.history.days_after,
            output_dir: self.output.output_dir.clone(),
            branch: self.output.branch.clone(),
            file: self.output.file.clone(),
            dry_run: self.output.dry_run,
            json: self.output.json,
        }
    }

    pub fn execute(self) -> Result<()> {
        crate::logging::init_tracing(self.output.verbose);
        let config = self.config();
        let summary = crate::generate::exec(&config)?;
        report(&summary, config.json)
    }
}

fn report(summary: &RunSummary, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(summary)?);
    } else if summary.dry_run {
        for date in &summary.dates {
            println!("{}", date.format("%Y-%m-%d"));
        }
        eprintln!(
            "{} commits over {} days planned for {}",
            style(summary.commit_count).bold(),
            style(summary.active_days).bold(),
            summary.repository_path
        );
    } else {
        println!("{}", style("Repository generation completed successfully!").green().bold());
    }
    Ok(())
}
