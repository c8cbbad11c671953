pub mod focus;
pub mod output;
pub mod timer;
pub mod worklog;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use focus::{process_focus_command, FocusCommand};
use timer::{process_timer_command, TimerCommand};
use tracing::{debug, level_filters::LevelFilter};
use worklog::{process_worklog_command, WorklogCommand};

use crate::{
    config::{load_config, AppConfig},
    jira::{IssueTracker, JiraClient},
    state::StateStore,
    utils::{
        clock::{Clock, DefaultClock},
        dir::resolve_state_dir,
        logging::{enable_logging, LOG_PREFIX},
    },
};

#[derive(Parser, Debug)]
#[command(name = "jiralog", version, long_about = None)]
#[command(about = "Log work to Jira, time it and keep track of what to focus on", long_about = None)]
struct Args {
    #[command(subcommand)]
    commands: Commands,
    #[arg(
        long,
        global = true,
        help = "Directory with config.json, secret and state files. By default the directory of the executable"
    )]
    dir: Option<PathBuf>,
    #[arg(long, global = true, help = "Enable logging")]
    log: bool,
    #[arg(
        long,
        global = true,
        requires = "log",
        help = "Logging level. By default RUST_LOG or debug"
    )]
    log_level: Option<LevelFilter>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(about = "Log work to Jira")]
    Worklog {
        #[command(flatten)]
        command: WorklogCommand,
    },
    #[command(about = "Manage focus items")]
    Focus {
        #[command(flatten)]
        command: FocusCommand,
    },
    #[command(about = "Track time")]
    Timer {
        #[command(flatten)]
        command: TimerCommand,
    },
}

/// Everything a command needs, built once per invocation.
pub struct AppContext {
    pub config: AppConfig,
    pub store: StateStore,
    pub tracker: Box<dyn IssueTracker>,
    pub clock: Box<dyn Clock>,
}

impl AppContext {
    pub fn new(config: AppConfig, state_dir: PathBuf) -> Result<Self> {
        Ok(Self {
            tracker: Box::new(JiraClient::new(&config)?),
            store: StateStore::new(state_dir)?,
            clock: Box::new(DefaultClock),
            config,
        })
    }
}

pub async fn run_cli() -> Result<()> {
    let args = Args::parse();

    let state_dir = resolve_state_dir(args.dir)?;
    if args.log {
        enable_logging(LOG_PREFIX, &state_dir, args.log_level)?;
    }
    debug!("Using state directory {state_dir:?}");

    let config = load_config(&state_dir)?;
    let context = AppContext::new(config, state_dir)?;
    dispatch(args.commands, &context).await
}

async fn dispatch(commands: Commands, context: &AppContext) -> Result<()> {
    match commands {
        Commands::Worklog { command } => process_worklog_command(command, context).await,
        Commands::Focus { command } => process_focus_command(command, context).await,
        Commands::Timer { command } => process_timer_command(command, context).await,
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use chrono::{Duration, TimeZone, Utc};
    use clap::{error::ErrorKind, Parser};
    use reqwest::StatusCode;
    use tempfile::tempdir;

    use crate::{
        config::AppConfig,
        jira::MockIssueTracker,
        state::{
            entities::{FocusItemEntity, TimerEntity},
            StateKey, StateStore,
        },
        utils::{
            clock::{Clock, FixedClock},
            logging::TEST_LOGGING,
        },
    };

    use super::{dispatch, AppContext, Args, Commands};

    fn test_context(dir: &std::path::Path, tracker: MockIssueTracker) -> Result<AppContext> {
        Ok(AppContext {
            config: AppConfig::new("me", "acme", "token"),
            store: StateStore::new(dir.to_owned())?,
            tracker: Box::new(tracker),
            clock: Box::new(FixedClock(
                Utc.with_ymd_and_hms(2018, 7, 4, 12, 0, 0).unwrap(),
            )),
        })
    }

    fn parse(args: &[&str]) -> Commands {
        Args::try_parse_from(args).unwrap().commands
    }

    #[test]
    fn test_missing_command_is_usage_error() {
        let error = Args::try_parse_from(["jiralog"]).unwrap_err();
        assert!(matches!(
            error.kind(),
            ErrorKind::MissingSubcommand | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
        ));
    }

    #[test]
    fn test_unknown_command_is_usage_error() {
        let error = Args::try_parse_from(["jiralog", "sprint"]).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidSubcommand);
    }

    #[test]
    fn test_invalid_date_is_rejected() {
        let error =
            Args::try_parse_from(["jiralog", "worklog", "--id", "A-1", "--date", "2024-13-01"])
                .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::ValueValidation);
    }

    #[test]
    fn test_aliases() {
        let args = Args::try_parse_from(["jiralog", "worklog", "--ut", "-t", "notes"]).unwrap();
        assert!(matches!(args.commands, Commands::Worklog { .. }));
        let args = Args::try_parse_from(["jiralog", "focus", "-a", "ABC-1"]).unwrap();
        assert!(matches!(args.commands, Commands::Focus { .. }));
        let args = Args::try_parse_from(["jiralog", "timer", "-c", "--dir", "/tmp"]).unwrap();
        assert_eq!(args.dir, Some("/tmp".into()));
    }

    #[test]
    fn test_log_level_requires_log() {
        assert!(Args::try_parse_from(["jiralog", "--log-level", "info", "timer"]).is_err());
        let args =
            Args::try_parse_from(["jiralog", "--log", "--log-level", "info", "timer"]).unwrap();
        assert!(args.log);
    }

    #[tokio::test]
    async fn test_timer_start_and_stop() -> Result<()> {
        let dir = tempdir()?;
        let context = test_context(dir.path(), MockIssueTracker::new())?;

        dispatch(parse(&["jiralog", "timer", "--start", "ABC-1"]), &context).await?;
        let timer: Option<TimerEntity> = context.store.load(StateKey::Timer).await?;
        assert_eq!(timer.map(|v| v.id), Some("ABC-1".to_string()));

        dispatch(parse(&["jiralog", "timer", "--current"]), &context).await?;
        assert!(context.store.path_of(StateKey::Timer).exists());

        dispatch(parse(&["jiralog", "timer", "--stop"]), &context).await?;
        assert!(!context.store.path_of(StateKey::Timer).exists());

        dispatch(parse(&["jiralog", "timer", "--stop"]), &context).await?;
        dispatch(parse(&["jiralog", "timer"]), &context).await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_corrupt_timer_is_reported_not_failed() -> Result<()> {
        let dir = tempdir()?;
        let context = test_context(dir.path(), MockIssueTracker::new())?;
        std::fs::write(context.store.path_of(StateKey::Timer), "null")?;

        dispatch(parse(&["jiralog", "timer", "--stop"]), &context).await?;
        assert!(context.store.path_of(StateKey::Timer).exists());
        Ok(())
    }

    #[tokio::test]
    async fn test_focus_commands() -> Result<()> {
        let dir = tempdir()?;
        let mut tracker = MockIssueTracker::new();
        tracker
            .expect_issue_summary()
            .returning(|_| Ok(Some("Fix bug".into())));
        let context = test_context(dir.path(), tracker)?;

        dispatch(parse(&["jiralog", "focus", "--list"]), &context).await?;
        dispatch(parse(&["jiralog", "focus", "--add", "abc-1"]), &context).await?;
        dispatch(parse(&["jiralog", "focus", "--list"]), &context).await?;

        let items: Vec<FocusItemEntity> = context.store.load_or_init(StateKey::Focus).await?;
        assert_eq!(items.len(), 1);

        dispatch(parse(&["jiralog", "focus", "--remove", "ABC-1"]), &context).await?;
        dispatch(parse(&["jiralog", "focus", "--remove", "ABC-1"]), &context).await?;
        let items: Vec<FocusItemEntity> = context.store.load_or_init(StateKey::Focus).await?;
        assert!(items.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_worklog_with_timer() -> Result<()> {
        *TEST_LOGGING;
        let dir = tempdir()?;
        let mut tracker = MockIssueTracker::new();
        tracker
            .expect_add_worklog()
            .withf(|id, payload| id == "ABC-1" && payload.time_spent == "45m")
            .times(1)
            .returning(|_, _| Ok(StatusCode::CREATED));
        let context = test_context(dir.path(), tracker)?;
        let started = context.clock.time() - Duration::minutes(45);
        context
            .store
            .save(
                StateKey::Timer,
                &TimerEntity {
                    id: "ABC-1".into(),
                    start_time: started,
                },
            )
            .await?;

        dispatch(
            parse(&["jiralog", "worklog", "--usetimer", "--id", "IGNORED-1"]),
            &context,
        )
        .await?;
        assert!(!context.store.path_of(StateKey::Timer).exists());
        Ok(())
    }

    #[tokio::test]
    async fn test_worklog_without_timer_makes_no_calls() -> Result<()> {
        let dir = tempdir()?;
        let mut tracker = MockIssueTracker::new();
        tracker.expect_add_worklog().times(0);
        let context = test_context(dir.path(), tracker)?;

        dispatch(parse(&["jiralog", "worklog", "--usetimer"]), &context).await?;
        assert!(!context.store.path_of(StateKey::Timer).exists());
        assert!(!context.store.path_of(StateKey::Focus).exists());
        Ok(())
    }

    #[tokio::test]
    async fn test_worklog_network_fault_is_error() -> Result<()> {
        let dir = tempdir()?;
        let mut tracker = MockIssueTracker::new();
        tracker
            .expect_add_worklog()
            .returning(|_, _| Err(anyhow::anyhow!("connection refused")));
        let context = test_context(dir.path(), tracker)?;

        let result = dispatch(
            parse(&["jiralog", "worklog", "--id", "ABC-1", "--spent", "1h"]),
            &context,
        )
        .await;
        assert!(result.is_err());
        Ok(())
    }
}
