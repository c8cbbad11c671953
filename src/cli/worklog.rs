use anyhow::Result;
use chrono::NaiveDate;
use clap::Parser;

use crate::{
    timer::TimerTracker,
    worklog::{Prepared, SubmitOutcome, WorklogOptions, WorklogSubmitter},
};

use super::{output::report_corrupt, AppContext};

#[derive(Debug, Parser)]
pub struct WorklogCommand {
    #[arg(long, help = "Jira issue ID")]
    id: Option<String>,
    #[arg(short, long, help = "Work log comment")]
    text: Option<String>,
    #[arg(
        long,
        visible_alias = "ut",
        help = "Use current timer's id and time spent"
    )]
    usetimer: bool,
    #[arg(
        long,
        help = "Time spent. It uses the same format as in Jira which means 8 hours are written as: 8h and so on"
    )]
    spent: Option<String>,
    #[arg(
        long,
        value_name = "YYYY-MM-DD",
        help = "Date for the work log in the format of yyyy-mm-dd"
    )]
    date: Option<NaiveDate>,
}

impl From<WorklogCommand> for WorklogOptions {
    fn from(
        WorklogCommand {
            id,
            text,
            usetimer,
            spent,
            date,
        }: WorklogCommand,
    ) -> Self {
        WorklogOptions {
            id,
            text,
            use_timer: usetimer,
            spent,
            date,
        }
    }
}

/// Command to process `worklog`. Makes at most one request to the tracker.
pub async fn process_worklog_command(command: WorklogCommand, context: &AppContext) -> Result<()> {
    let submitter = WorklogSubmitter::new(
        TimerTracker::new(&context.store, context.clock.as_ref()),
        context.tracker.as_ref(),
        context.clock.as_ref(),
    );

    let worklog = match submitter.prepare(command.into()).await {
        Ok(Prepared::Ready(worklog)) => worklog,
        Ok(Prepared::NoTimer) => {
            println!("No timer running");
            return Ok(());
        }
        Err(e) => return report_corrupt(e),
    };

    if let Some(reading) = &worklog.timer {
        println!(
            "Found timer with id {} and spent time {}",
            reading.timer.id, reading.elapsed
        );
        println!("Adding timelog to Jira");
    }

    println!("id: {}", worklog.issue_id);
    println!("text: {}", worklog.comment);
    println!("spent: {}", worklog.time_spent);
    println!("date: {}", worklog.started_timestamp());

    let outcome = submitter.submit(&worklog).await?;
    println!("Response: {}", outcome.status());
    if let SubmitOutcome::Rejected {
        status,
        timer_kept: true,
    } = outcome
    {
        println!(
            "Not unlinking file due to unsuccessful status code: {}",
            status.as_u16()
        );
    }
    Ok(())
}
