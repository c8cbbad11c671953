//! Assembling and submitting worklogs. A successful submission also ends the running timer.

pub mod payload;
pub mod submitter;

pub use submitter::{Prepared, PreparedWorklog, SubmitOutcome, WorklogOptions, WorklogSubmitter};
