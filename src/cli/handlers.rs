use std::path::{Path, PathBuf};

use crate::cli::commands::{AddArgs, Cli, ClearArgs, Commands, EditArgs, PathArg, SortArgs};
use crate::cli::output;
use crate::io::forest_io;
use crate::io::state::{self, SortState};
use crate::model::task::NodeRef;
use crate::ops::store::{TaskPatch, TaskStore};

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;
    let data_path = PathBuf::from(cli.file.as_deref().unwrap_or("todos.json"));
    let mut store = open_store(&data_path)?;

    match cli.command {
        Commands::List => cmd_list(&store, json),
        Commands::Add(args) => cmd_add(&data_path, &mut store, args),
        Commands::Edit(args) => cmd_edit(&data_path, &mut store, args),
        Commands::Done(args) => cmd_toggle(&data_path, &mut store, args, true),
        Commands::Undone(args) => cmd_toggle(&data_path, &mut store, args, false),
        Commands::Rm(args) => cmd_rm(&data_path, &mut store, args),
        Commands::Clear(args) => cmd_clear(&data_path, &mut store, args),
        Commands::Sort(args) => cmd_sort(&data_path, &mut store, args),
        Commands::Stats => cmd_stats(&store, json),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load the task file and sort preference into a store. Sort state that is
/// missing or unreadable falls back to created-ascending.
fn open_store(data_path: &Path) -> Result<TaskStore, forest_io::ForestIoError> {
    let prefs = state::read_sort_state(data_path).unwrap_or_default();
    let mut store = TaskStore::with_sort(prefs.sort_by, prefs.ascending);
    store.load_forest(forest_io::load_forest(data_path)?);
    Ok(store)
}

fn save(data_path: &Path, store: &TaskStore) -> Result<(), forest_io::ForestIoError> {
    forest_io::save_forest(data_path, store.roots())
}

/// Resolve a 1-based dotted display path ("2.1") against the current
/// ordering into a stable ref. View identity stops here — everything past
/// this point works on refs.
fn resolve_path(store: &TaskStore, path: &str) -> Result<NodeRef, String> {
    let mut nodes = store.roots();
    let mut found = None;
    for part in path.split('.') {
        let idx: usize = part
            .parse()
            .map_err(|_| format!("invalid task path '{}'", path))?;
        if idx == 0 || idx > nodes.len() {
            return Err(format!("no task at path '{}'", path));
        }
        let node = &nodes[idx - 1];
        found = Some(node.id);
        nodes = &node.children;
    }
    found.ok_or_else(|| format!("invalid task path '{}'", path))
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn cmd_list(store: &TaskStore, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(store.roots())?);
    } else {
        print!("{}", output::render_forest(store.roots()));
    }
    Ok(())
}

fn cmd_add(
    data_path: &Path,
    store: &mut TaskStore,
    args: AddArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let id = match &args.under {
        Some(path) => {
            let parent = resolve_path(store, path)?;
            store.add_child(parent, &args.text, args.priority, &args.due)?
        }
        None => store.add_root(&args.text, args.priority, &args.due)?,
    };
    save(data_path, store)?;
    // The text may have been trimmed on the way in
    println!("added: {}", store.find(id).map(|n| n.text.as_str()).unwrap_or(""));
    Ok(())
}

fn cmd_edit(
    data_path: &Path,
    store: &mut TaskStore,
    args: EditArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let target = resolve_path(store, &args.path)?;
    let patch = TaskPatch {
        text: args.text,
        priority: args.priority,
        due_date: args.due,
    };
    if patch.text.is_none() && patch.priority.is_none() && patch.due_date.is_none() {
        println!("nothing to change");
        return Ok(());
    }
    store.update_fields(target, patch)?;
    save(data_path, store)?;
    println!(
        "updated: {}",
        store.find(target).map(|n| n.text.as_str()).unwrap_or("")
    );
    Ok(())
}

fn cmd_toggle(
    data_path: &Path,
    store: &mut TaskStore,
    args: PathArg,
    value: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let target = resolve_path(store, &args.path)?;
    store.set_completed(target, value);
    save(data_path, store)?;
    let verb = if value { "done" } else { "not done" };
    println!(
        "{}: {}",
        verb,
        store.find(target).map(|n| n.text.as_str()).unwrap_or("")
    );
    Ok(())
}

fn cmd_rm(
    data_path: &Path,
    store: &mut TaskStore,
    args: PathArg,
) -> Result<(), Box<dyn std::error::Error>> {
    let target = resolve_path(store, &args.path)?;
    let text = store
        .find(target)
        .map(|n| n.text.clone())
        .unwrap_or_default();
    store.remove(target);
    save(data_path, store)?;
    println!("removed: {}", text);
    Ok(())
}

fn cmd_clear(
    data_path: &Path,
    store: &mut TaskStore,
    args: ClearArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    if args.all {
        store.clear_all();
        save(data_path, store)?;
        println!("cleared all tasks");
    } else {
        let removed = store.clear_completed_roots();
        save(data_path, store)?;
        if removed == 0 {
            println!("no completed top-level tasks to clear");
        } else {
            println!("cleared {} completed top-level task(s)", removed);
        }
    }
    Ok(())
}

fn cmd_sort(
    data_path: &Path,
    store: &mut TaskStore,
    args: SortArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    store.set_sort(args.key, !args.desc);
    state::write_sort_state(
        data_path,
        &SortState {
            sort_by: store.sort_key(),
            ascending: store.ascending(),
        },
    )?;
    save(data_path, store)?;
    println!(
        "sorted by {} ({})",
        store.sort_key(),
        if store.ascending() {
            "ascending"
        } else {
            "descending"
        }
    );
    Ok(())
}

fn cmd_stats(store: &TaskStore, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let stats = store.stats();
    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        print!("{}", output::render_stats(&stats));
    }
    Ok(())
}
