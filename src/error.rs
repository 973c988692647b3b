use std::process::ExitStatus;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, BackdateError>;

#[derive(Error, Debug)]
pub enum BackdateError {
    #[error("Command `{command}` failed with {status}")]
    CommandFailed { command: String, status: ExitStatus },
    #[error("Failed to run `{command}`: {source}")]
    CommandSpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Repository at {0} is not initialized")]
    NotInitialized(String),
    #[error("No remote configured for {0}")]
    NoRemote(String),
    #[error("Empty command")]
    EmptyCommand,
    #[error("Cannot derive a repository name from remote '{0}'")]
    InvalidRemote(String),
    #[error("Invalid date range: {0}")]
    InvalidRange(String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Git error: {0}")]
    Git(#[from] Box<gix::open::Error>),
    #[error("Reference find error: {0}")]
    RefFind(#[from] Box<gix::reference::find::existing::Error>),
    #[error("Head peel error: {0}")]
    HeadPeel(#[from] Box<gix::head::peel::to_commit::Error>),
    #[error("Object find with conversion error: {0}")]
    ObjectFindConv(#[from] Box<gix::object::find::existing::with_conversion::Error>),
    #[error("Object decode error: {0}")]
    ObjectDecode(#[from] Box<gix::objs::decode::Error>),
}

// Manual From implementations for unboxed to boxed conversions
impl From<gix::open::Error> for BackdateError {
    fn from(err: gix::open::Error) -> Self {
        BackdateError::Git(Box::new(err))
    }
}

impl From<gix::reference::find::existing::Error> for BackdateError {
    fn from(err: gix::reference::find::existing::Error) -> Self {
        BackdateError::RefFind(Box::new(err))
    }
}

impl From<gix::head::peel::to_commit::Error> for BackdateError {
    fn from(err: gix::head::peel::to_commit::Error) -> Self {
        BackdateError::HeadPeel(Box::new(err))
    }
}

impl From<gix::object::find::existing::with_conversion::Error> for BackdateError {
    fn from(err: gix::object::find::existing::with_conversion::Error) -> Self {
        BackdateError::ObjectFindConv(Box::new(err))
    }
}

impl From<gix::objs::decode::Error> for BackdateError {
    fn from(err: gix::objs::decode::Error) -> Self {
        BackdateError::ObjectDecode(Box::new(err))
    }
}
