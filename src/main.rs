//! chatlist - Entry Point

use chatlist::config::ResolvedConfig;
use chatlist::dialogs::{ChatLists, ListMode};
use chatlist::model::{AppError, FolderId, InputError};
use chatlist::parser::parse_snapshots;
use chatlist::ranking::{Clock, ManualClock, PriorityClassifier, SoftPinRegistry, SystemClock};
use clap::Parser;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Arc};
use tracing::{debug, info};

/// chatlist - rank dialogs into ordered chat lists
#[derive(Parser, Debug)]
#[command(name = "chatlist")]
#[command(version)]
#[command(about = "Rank dialog snapshots (JSONL) into ordered chat lists")]
pub struct Args {
    /// Path to JSONL file of dialog snapshots
    pub file: PathBuf,

    /// List to print
    #[arg(short, long, default_value = "all")]
    pub mode: ListMode,

    /// Print the list of this folder instead of the root list
    #[arg(long)]
    pub folder: Option<u32>,

    /// Only print rows whose name matches this incremental search query
    #[arg(short, long)]
    pub search: Option<String>,

    /// Rank as if the current unix time were this
    #[arg(long)]
    pub now: Option<i64>,

    /// Path to soft-pin peer file
    #[arg(long)]
    pub soft_pins: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = chatlist::config::load_config_with_precedence(args.config.clone())?;
        let merged = chatlist::config::merge_config(config_file);
        let with_env = chatlist::config::apply_env_overrides(merged);
        chatlist::config::apply_cli_overrides(with_env, args.soft_pins.clone())
    };

    chatlist::logging::init(&config.log_file_path).map_err(AppError::from)?;

    info!(
        config = ?config,
        "Configuration loaded and resolved"
    );

    let input = read_input(&args.file).map_err(AppError::from)?;
    let clock: Box<dyn Clock> = match args.now {
        Some(now) => Box::new(ManualClock::new(now)),
        None => Box::new(SystemClock),
    };
    let lists = rank(&input, &config, clock);

    let folder = args.folder.map(FolderId::new);
    let query = args.search.as_deref().unwrap_or("");
    let mut out = io::stdout().lock();
    for line in render(&lists, folder, args.mode, query) {
        writeln!(out, "{}", line)?;
    }

    Ok(())
}

fn read_input(path: &Path) -> Result<String, InputError> {
    if !path.exists() {
        return Err(InputError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    Ok(std::fs::read_to_string(path)?)
}

/// Build chat lists from snapshot text.
fn rank(input: &str, config: &ResolvedConfig, clock: Box<dyn Clock>) -> ChatLists {
    let registry = Arc::new(SoftPinRegistry::new(&config.soft_pins_path));
    let classifier = PriorityClassifier::new(registry, config.old_message_secs);
    // Events only matter to an interactive UI.
    let (events, _) = mpsc::channel();
    let mut lists = ChatLists::new(classifier, clock, events);

    let parsed = parse_snapshots(input);
    for snapshot in &parsed.snapshots {
        snapshot.apply_to(&mut lists);
    }
    info!(
        dialogs = parsed.snapshots.len(),
        skipped = parsed.errors.len(),
        "snapshots ranked"
    );
    lists
}

/// One `position key category name` line per visible row.
fn render(lists: &ChatLists, folder: Option<FolderId>, mode: ListMode, query: &str) -> Vec<String> {
    lists
        .filtered(folder, mode, query)
        .into_iter()
        .filter_map(|id| {
            let entry = lists.entry(id)?;
            let position = lists.position(id, mode);
            debug!(key = %entry.key(), position, "row rendered");
            Some(format!(
                "{:>4} {:#018x} {:<11} {}",
                position,
                entry.cached_sort_key(),
                entry.category(),
                entry.name()
            ))
        })
        .collect()
}
