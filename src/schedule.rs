use chrono::{Datelike, NaiveDate, Weekday};
use rand::Rng;

/// Source of uniformly distributed integers.
pub trait RandomSource {
    /// Uniform draw from the inclusive range `[low, high]`.
    fn uniform(&mut self, low: u32, high: u32) -> u32;
}

/// Adapter that exposes any `rand` generator as a [`RandomSource`].
pub struct Entropy<R>(pub R);

impl Entropy<rand::rngs::ThreadRng> {
    pub fn thread() -> Self {
        Entropy(rand::rng())
    }
}

impl<R: Rng> RandomSource for Entropy<R> {
    fn uniform(&mut self, low: u32, high: u32) -> u32 {
        self.0.random_range(low..=high)
    }
}

/// Knobs for [`generate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Density {
    pub frequency_percent: i32,
    pub exclude_weekends: bool,
    pub max_commits_per_day: u32,
}

pub fn is_weekend(day: NaiveDate) -> bool {
    matches!(day.weekday(), Weekday::Sat | Weekday::Sun)
}

/// One entry per commit to create, in ascending day order.
///
/// Each day in `[start, end]` survives the weekend filter, then a 1..=100 draw
/// against `frequency_percent`, then repeats 1..=`max_commits_per_day` times.
/// An inverted range yields nothing.
pub fn generate<R: RandomSource + ?Sized>(
    start: NaiveDate,
    end: NaiveDate,
    density: Density,
    rng: &mut R,
) -> Vec<NaiveDate> {
    let max_commits = density.max_commits_per_day.max(1);
    let mut dates = Vec::new();

    for day in start.iter_days().take_while(|day| *day <= end) {
        if density.exclude_weekends && is_weekend(day) {
            continue;
        }
        if i64::from(rng.uniform(1, 100)) > i64::from(density.frequency_percent) {
            continue;
        }
        let count = rng.uniform(1, max_commits);
        dates.extend(std::iter::repeat(day).take(count as usize));
    }

    dates
}

/// Number of distinct days in an ordered commit plan.
pub fn active_days(dates: &[NaiveDate]) -> usize {
    let mut days = dates.to_vec();
    days.dedup();
    days.len()
}
