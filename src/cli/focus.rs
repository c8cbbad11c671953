use anyhow::Result;
use clap::Parser;

use crate::focus::{AddOutcome, FocusList};

use super::{
    output::{heading, render_focus_item, report_corrupt},
    AppContext,
};

#[derive(Debug, Parser)]
pub struct FocusCommand {
    #[arg(short, long, value_name = "ID", help = "Add a new focus item")]
    add: Option<String>,
    #[arg(short, long, help = "List all focus items")]
    list: bool,
    #[arg(short, long, value_name = "ID", help = "Remove a focus item by ID")]
    remove: Option<String>,
}

/// Command to process `focus`. When several options are given `add` wins over `list`, and `list`
/// over `remove`.
pub async fn process_focus_command(
    FocusCommand { add, list, remove }: FocusCommand,
    context: &AppContext,
) -> Result<()> {
    let focus = FocusList::new(
        &context.store,
        context.tracker.as_ref(),
        context.clock.as_ref(),
        &context.config,
    );

    if let Some(id) = add {
        match focus.add(&id).await {
            Ok(AddOutcome::Added(item)) => {
                println!("Added focus item {}: {}", item.id, item.summary)
            }
            Ok(AddOutcome::NotFound) => println!("Could not find issue with id {id}"),
            Err(e) => report_corrupt(e)?,
        }
    } else if list {
        match focus.list().await {
            Ok(items) if items.is_empty() => {
                println!("No focus items. Add one with \"focus --add <text>\"")
            }
            Ok(items) => {
                println!("{}", heading("Focus items:"));
                for item in items {
                    println!("{}", render_focus_item(&item));
                }
            }
            Err(e) => report_corrupt(e)?,
        }
    } else if let Some(id) = remove {
        match focus.remove(&id).await {
            Ok(Some(removed)) => {
                println!("Removed focus item {}: {}", removed.id, removed.summary)
            }
            Ok(None) => println!("No focus item with ID {id}"),
            Err(e) => report_corrupt(e)?,
        }
    } else {
        println!("use --add, --list, or --remove with the focus command");
    }
    Ok(())
}
