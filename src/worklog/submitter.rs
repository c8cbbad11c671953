use anyhow::Result;
use chrono::{DateTime, Local, NaiveDate, Utc};
use reqwest::StatusCode;
use tracing::{info, warn};

use crate::{
    jira::IssueTracker,
    timer::{TimerReading, TimerState, TimerTracker},
    utils::{
        clock::Clock,
        time::{midnight_utc, to_jira_timestamp},
    },
};

use super::payload::{Document, WorklogPayload};

/// What the user asked for. Nothing is validated centrally, see [WorklogSubmitter::prepare].
#[derive(Debug, Clone, Default)]
pub struct WorklogOptions {
    pub id: Option<String>,
    pub text: Option<String>,
    pub use_timer: bool,
    pub spent: Option<String>,
    pub date: Option<NaiveDate>,
}

/// A worklog with every value resolved, ready to be sent.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedWorklog {
    pub issue_id: String,
    pub comment: String,
    pub time_spent: String,
    pub started: DateTime<Utc>,
    /// The timer the id and time spent were taken from.
    pub timer: Option<TimerReading>,
}

impl PreparedWorklog {
    /// `started` as Jira expects it, in the local timezone.
    pub fn started_timestamp(&self) -> String {
        to_jira_timestamp(&self.started.with_timezone(&Local))
    }

    pub fn payload(&self) -> WorklogPayload {
        WorklogPayload {
            comment: Document::paragraph(&self.comment),
            started: self.started_timestamp(),
            time_spent: self.time_spent.clone(),
            visibility: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Prepared {
    /// `--usetimer` was requested but there is no timer.
    NoTimer,
    Ready(PreparedWorklog),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Accepted {
        status: StatusCode,
        timer_cleared: bool,
    },
    /// The timer, if any, stays so the submission can be retried.
    Rejected {
        status: StatusCode,
        timer_kept: bool,
    },
}

impl SubmitOutcome {
    pub fn status(&self) -> StatusCode {
        match self {
            SubmitOutcome::Accepted { status, .. } | SubmitOutcome::Rejected { status, .. } => {
                *status
            }
        }
    }
}

pub struct WorklogSubmitter<'a> {
    timers: TimerTracker<'a>,
    tracker: &'a dyn IssueTracker,
    clock: &'a dyn Clock,
}

impl<'a> WorklogSubmitter<'a> {
    pub fn new(
        timers: TimerTracker<'a>,
        tracker: &'a dyn IssueTracker,
        clock: &'a dyn Clock,
    ) -> Self {
        Self {
            timers,
            tracker,
            clock,
        }
    }

    /// Resolves the values of a worklog. With `use_timer` the issue id and time spent come from the
    /// running timer and override whatever was passed explicitly.
    pub async fn prepare(&self, options: WorklogOptions) -> Result<Prepared> {
        let WorklogOptions {
            id,
            text,
            use_timer,
            spent,
            date,
        } = options;

        let started = match date {
            Some(date) => midnight_utc(date),
            None => self.clock.time(),
        };
        let comment = text.unwrap_or_default();

        if use_timer {
            let Some(reading) = self.timers.current().await? else {
                return Ok(Prepared::NoTimer);
            };
            return Ok(Prepared::Ready(PreparedWorklog {
                issue_id: reading.timer.id.clone(),
                comment,
                time_spent: reading.elapsed.to_time_spent(),
                started,
                timer: Some(reading),
            }));
        }

        let issue_id = id.unwrap_or_else(|| {
            warn!("Worklog has no issue id, the tracker will most likely reject it");
            String::new()
        });
        Ok(Prepared::Ready(PreparedWorklog {
            issue_id,
            comment,
            time_spent: spent.unwrap_or_default(),
            started,
            timer: None,
        }))
    }

    /// Sends a single request. On success whatever timer is running is cleared, on failure it is
    /// left alone.
    pub async fn submit(&self, worklog: &PreparedWorklog) -> Result<SubmitOutcome> {
        let status = self
            .tracker
            .add_worklog(&worklog.issue_id, &worklog.payload())
            .await?;

        if status.is_success() {
            let timer_cleared = self.timers.clear().await?;
            info!("Worklog for {} accepted with {status}", worklog.issue_id);
            Ok(SubmitOutcome::Accepted {
                status,
                timer_cleared,
            })
        } else {
            let timer_kept = matches!(self.timers.state().await, Ok(TimerState::Running(_)));
            warn!("Worklog for {} rejected with {status}", worklog.issue_id);
            Ok(SubmitOutcome::Rejected { status, timer_kept })
        }
    }
}
