use anyhow::Result;
use clap::Parser;

use crate::{timer::TimerTracker, utils::time::to_local_display};

use super::{output::report_corrupt, AppContext};

#[derive(Debug, Parser)]
pub struct TimerCommand {
    #[arg(long, value_name = "ID", help = "Start timer for task")]
    start: Option<String>,
    #[arg(long, help = "Stop timer")]
    stop: bool,
    #[arg(short, long, help = "Get current timer")]
    current: bool,
}

/// Command to process `timer`. When several options are given `start` wins over `current`, and
/// `current` over `stop`.
pub async fn process_timer_command(
    TimerCommand {
        start,
        stop,
        current,
    }: TimerCommand,
    context: &AppContext,
) -> Result<()> {
    let timers = TimerTracker::new(&context.store, context.clock.as_ref());

    if let Some(id) = start {
        let timer = timers.start(&id).await?;
        println!(
            "Timer started {} with id {}",
            to_local_display(timer.start_time),
            timer.id
        );
    } else if current {
        match timers.current().await {
            Ok(Some(reading)) => println!(
                "Timer {} is at {}",
                reading.timer.id, reading.elapsed
            ),
            Ok(None) => println!("No timer running"),
            Err(e) => report_corrupt(e)?,
        }
    } else if stop {
        match timers.stop().await {
            Ok(Some(reading)) => println!(
                "Stopped timer {} with a total running time of {}",
                reading.timer.id, reading.elapsed
            ),
            Ok(None) => println!("No timer running"),
            Err(e) => report_corrupt(e)?,
        }
    } else {
        println!("use --start, --stop, or --current with the timer command");
    }
    Ok(())
}
