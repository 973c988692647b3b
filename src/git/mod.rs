pub mod driver;
pub mod repo;
pub mod runner;

pub use driver::{DriverState, GitDriver};
pub use repo::GitRepo;
pub use runner::{CommandRunner, Invocation, SystemRunner};
