use std::error::Error;
use std::path::PathBuf;

use chrono::{Local, NaiveDate};

use crate::config::Resolved;
use crate::model::{NewTask, Priority, Status, TaskEdit, TaskStore};
use crate::ops::{self, FilterSet, Stats};
use crate::sync::cache::atomic_write;
use crate::sync::{Bridge, FlushOutcome, SessionLock};

use super::commands::{AddArgs, Commands, DoneArgs, ExportArgs, ListArgs, SearchArgs};
use super::output;

type CmdResult = Result<(), Box<dyn Error>>;

/// Dispatch a parsed subcommand
pub fn run(command: Commands, resolved: &Resolved, json: bool) -> CmdResult {
    match command {
        Commands::Add(args) => cmd_add(args, resolved, json),
        Commands::List(args) => cmd_list(args, resolved, json),
        Commands::Search(args) => cmd_search(args, resolved, json),
        Commands::Done(args) => cmd_done(args, resolved, json),
        Commands::Stats => cmd_stats(resolved, json),
        Commands::Export(args) => cmd_export(args, resolved),
    }
}

/// Load the current document for a read-only command
fn load_store(resolved: &Resolved) -> Result<TaskStore, Box<dyn Error>> {
    let bridge = Bridge::new(resolved.data_dir.clone(), resolved.api_url.as_deref())?;
    let outcome = bridge.load();
    if let Some(warning) = outcome.warning {
        eprintln!("warning: {warning}");
    }
    Ok(outcome.store)
}

/// Report how a mutation was persisted
fn report_flush(outcome: FlushOutcome) {
    match outcome {
        FlushOutcome::Synced { .. } => {}
        FlushOutcome::Offline => {}
        FlushOutcome::LocalOnly { error } => {
            eprintln!("warning: saved locally only, remote push failed: {error}");
        }
    }
}

fn parse_priority(s: &str) -> Result<Priority, Box<dyn Error>> {
    Priority::parse(s)
        .ok_or_else(|| format!("unknown priority '{s}' (expected: p0, p1, p2, p3)").into())
}

fn parse_status(s: &str) -> Result<Status, Box<dyn Error>> {
    Status::parse(s).ok_or_else(|| {
        format!("unknown status '{s}' (expected: backlog, todo, doing, review, done)").into()
    })
}

fn parse_deadline(s: &str) -> Result<NaiveDate, Box<dyn Error>> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| format!("invalid deadline '{s}' (expected YYYY-MM-DD)").into())
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

pub fn cmd_add(args: AddArgs, resolved: &Resolved, json: bool) -> CmdResult {
    let _lock = SessionLock::acquire_default(&resolved.data_dir)?;
    let mut bridge = Bridge::new(resolved.data_dir.clone(), resolved.api_url.as_deref())?;
    let outcome = bridge.load();
    if let Some(warning) = outcome.warning {
        eprintln!("warning: {warning}");
    }
    let mut store = outcome.store;

    let mut draft = NewTask::titled(args.title);
    draft.project = args.project.unwrap_or_default();
    draft.assignee = args.assignee.unwrap_or_default();
    draft.notes = args.notes.unwrap_or_default();
    if let Some(p) = args.priority.as_deref() {
        draft.priority = Some(parse_priority(p)?);
    }
    if let Some(s) = args.status.as_deref() {
        draft.status = Some(parse_status(s)?);
    }
    if let Some(d) = args.deadline.as_deref() {
        draft.deadline = Some(parse_deadline(d)?);
    }

    let task = store.add_task(draft).clone();
    // Register fresh references so the TUI filter bar can offer them
    if !task.project.is_empty() {
        store.add_project(task.project.clone());
    }
    if !task.assignee.is_empty() {
        store.add_assignee(task.assignee.clone());
    }
    report_flush(bridge.flush_blocking(&mut store));

    if json {
        println!("{}", serde_json::to_string_pretty(&task)?);
    } else {
        println!("added: {}", output::format_task_line(&task));
    }
    Ok(())
}

pub fn cmd_list(args: ListArgs, resolved: &Resolved, json: bool) -> CmdResult {
    let store = load_store(resolved)?;
    let filters = FilterSet {
        assignee: args.assignee,
        project: args.project,
        priority: args.priority.as_deref().map(parse_priority).transpose()?,
    };
    let visible = ops::apply_filters(&store, &filters);

    if json {
        let tasks: Vec<_> = visible.iter().map(|&i| &store.tasks[i]).collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&output::TaskListJson { tasks })?
        );
    } else {
        for idx in visible {
            println!("{}", output::format_task_line(&store.tasks[idx]));
        }
    }
    Ok(())
}

pub fn cmd_search(args: SearchArgs, resolved: &Resolved, json: bool) -> CmdResult {
    let store = load_store(resolved)?;
    let visible = ops::search(&store, &args.query);

    if json {
        let tasks: Vec<_> = visible.iter().map(|&i| &store.tasks[i]).collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&output::TaskListJson { tasks })?
        );
    } else {
        for idx in visible {
            println!("{}", output::format_task_line(&store.tasks[idx]));
        }
    }
    Ok(())
}

pub fn cmd_done(args: DoneArgs, resolved: &Resolved, json: bool) -> CmdResult {
    let _lock = SessionLock::acquire_default(&resolved.data_dir)?;
    let mut bridge = Bridge::new(resolved.data_dir.clone(), resolved.api_url.as_deref())?;
    let outcome = bridge.load();
    if let Some(warning) = outcome.warning {
        eprintln!("warning: {warning}");
    }
    let mut store = outcome.store;

    let task = store
        .update_task(&args.id, TaskEdit::Status(Status::Done))?
        .clone();
    report_flush(bridge.flush_blocking(&mut store));

    if json {
        println!("{}", serde_json::to_string_pretty(&task)?);
    } else {
        println!("done: {}", output::format_task_line(&task));
    }
    Ok(())
}

pub fn cmd_stats(resolved: &Resolved, json: bool) -> CmdResult {
    let store = load_store(resolved)?;
    let stats = Stats::compute(&store, Local::now().date_naive());

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&output::stats_to_json(&stats))?
        );
    } else {
        for line in output::format_stats(&stats) {
            println!("{line}");
        }
    }
    Ok(())
}

pub fn cmd_export(args: ExportArgs, resolved: &Resolved) -> CmdResult {
    let store = load_store(resolved)?;
    let path = args.path.unwrap_or_else(|| {
        PathBuf::from(format!(
            "taskdeck-export-{}.json",
            Local::now().format("%Y%m%d-%H%M%S")
        ))
    });
    let content = serde_json::to_string_pretty(&store)?;
    atomic_write(&path, content.as_bytes())?;
    println!("exported {} tasks to {}", store.tasks.len(), path.display());
    Ok(())
}
