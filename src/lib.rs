//! Synthesize a git repository with a backdated commit history.
//!
//! The pieces are small: [`schedule::generate`] turns a date range and
//! density knobs into an ordered list of commit dates, [`git::GitDriver`]
//! replays that list against the `git` executable, and [`generate::run`]
//! wires both together for the command line.

pub mod cli;
pub mod error;
pub mod generate;
pub mod git;
pub mod logging;
pub mod model;
pub mod schedule;
pub mod util;

pub use error::{BackdateError, Result};
