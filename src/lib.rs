//! Small cli for logging work against Jira issues. Besides submitting worklogs it can run a single
//! timer, whose elapsed time can be logged directly, and keep a list of issues to focus on.
//!
//! All local state lives in a handful of JSON files next to the executable.

pub mod cli;
pub mod config;
pub mod focus;
pub mod jira;
pub mod state;
pub mod timer;
pub mod utils;
pub mod worklog;
