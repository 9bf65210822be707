//! # CLI Layer
//!
//! This module is **one possible UI client** for bonco, not the application itself.
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr, stdin for quizzes)
//! - Initializes the logger
//! - Handles argument parsing
//! - Formats output for human consumption
//!
//! ## Structure
//!
//! - `run()`: Main dispatch logic (called by `main.rs`)
//! - `init_context()`: Builds `AppContext` with API and configuration
//! - `handle_*()`: Per-command handlers that call the API and format output

use super::print::{print_groups, print_messages, print_stats, print_top};
use super::quiz::run_quiz;
use super::setup::{
    print_grouped_help, Cli, Commands, MiscCommands, ReviewCommands, StudyCommands,
};
use bonco::api::{BatchSize, BoncoApi};
use bonco::config::{resolve_data_dir, BoncoConfig};
use bonco::error::{BoncoError, Result};
use bonco::hangul::choseong;
use bonco::manifest::Manifest;
use bonco::store::fs::FileStore;
use clap::Parser;
use log::debug;
use std::io;
use std::path::PathBuf;

struct AppContext {
    api: BoncoApi<FileStore>,
    data_dir: PathBuf,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let Some(command) = cli.command else {
        print_grouped_help();
        return Ok(());
    };

    // Pure helpers, no store needed
    if let Commands::Study(StudyCommands::Choseong { labels }) = &command {
        return handle_choseong(labels);
    }

    let mut ctx = init_context(cli.home)?;

    match command {
        Commands::Study(cmd) => match cmd {
            StudyCommands::Quiz {
                manifest,
                set,
                initials,
                wrong_only,
                batch,
            } => handle_quiz(&mut ctx, manifest, set, initials, wrong_only, batch),
            StudyCommands::Groups { manifest } => handle_groups(&ctx, manifest),
            StudyCommands::Choseong { labels } => handle_choseong(&labels),
        },
        Commands::Review(cmd) => match cmd {
            ReviewCommands::Miss { set, card } => {
                print_messages(&ctx.api.add_wrong_answer(&set, &card).messages);
                Ok(())
            }
            ReviewCommands::Remove { set, card } => {
                print_messages(&ctx.api.remove_wrong_answer(&set, &card).messages);
                Ok(())
            }
            ReviewCommands::Clear { set } => {
                print_messages(&ctx.api.clear_wrong_answers(set.as_deref()).messages);
                Ok(())
            }
            ReviewCommands::Stats { set, json } => handle_stats(&ctx, set, json),
            ReviewCommands::Top { limit, json } => handle_top(&ctx, limit, json),
            ReviewCommands::Paths { set } => {
                for path in ctx.api.wrong_answer_paths(&set) {
                    println!("{}", path);
                }
                Ok(())
            }
        },
        Commands::Misc(MiscCommands::Config { key, value }) => handle_config(&ctx, key, value),
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

fn init_context(home: Option<PathBuf>) -> Result<AppContext> {
    let data_dir = resolve_data_dir(home)?;
    let config = BoncoConfig::load(&data_dir).unwrap_or_else(|e| {
        log::warn!("Ignoring unreadable config: {}", e);
        BoncoConfig::default()
    });
    debug!("Using data dir {}", data_dir.display());

    let store = FileStore::new(data_dir.clone());
    Ok(AppContext {
        api: BoncoApi::new(store, config),
        data_dir,
    })
}

fn handle_quiz(
    ctx: &mut AppContext,
    manifest: Option<PathBuf>,
    set: Option<String>,
    initials: Option<String>,
    wrong_only: bool,
    batch: BatchSize,
) -> Result<()> {
    let initials = parse_initials(initials.as_deref());

    let mut session = if wrong_only {
        let manifest = manifest.map(Manifest::load).transpose()?;
        let set = match (set, &manifest) {
            (Some(set), _) => set,
            (None, Some(manifest)) => manifest.set.clone(),
            (None, None) => {
                return Err(BoncoError::Api(
                    "--wrong-only needs --set or a manifest".to_string(),
                ))
            }
        };
        ctx.api.start_wrong_quiz(&set, manifest.as_ref())
    } else {
        let path = manifest
            .ok_or_else(|| BoncoError::Api("A manifest is required for a quiz".to_string()))?;
        let mut manifest = Manifest::load(path)?;
        if let Some(set) = set {
            manifest = manifest.with_set(set);
        }
        ctx.api.start_quiz(&manifest, &initials, batch)
    };

    if session.progress().1 == 0 {
        println!("No cards to quiz.");
        return Ok(());
    }

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout();
    run_quiz(&mut ctx.api, &mut session, &mut input, &mut out)
}

/// "ㄱㄴ", "ㄱ,ㄴ" and "ㄱ ㄴ" all name the same buckets.
fn parse_initials(raw: Option<&str>) -> Vec<char> {
    raw.map(|s| {
        s.chars()
            .filter(|c| !c.is_whitespace() && *c != ',')
            .collect()
    })
    .unwrap_or_default()
}

fn handle_groups(ctx: &AppContext, manifest: PathBuf) -> Result<()> {
    let manifest = Manifest::load(manifest)?;
    print_groups(&ctx.api.groups(&manifest));
    Ok(())
}

fn handle_choseong(labels: &[String]) -> Result<()> {
    for label in labels {
        match choseong(label) {
            Some(key) => println!("{}\t{}", key, label),
            None => println!("-\t{}", label),
        }
    }
    Ok(())
}

fn handle_stats(ctx: &AppContext, set: Option<String>, json: bool) -> Result<()> {
    let stats = ctx.api.wrong_answer_stats(set.as_deref());
    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        print_stats(&stats);
    }
    Ok(())
}

fn handle_top(ctx: &AppContext, limit: Option<usize>, json: bool) -> Result<()> {
    let top = ctx.api.top_wrong_answers(limit);
    if json {
        println!("{}", serde_json::to_string_pretty(&top)?);
    } else {
        print_top(&top);
    }
    Ok(())
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let mut config = ctx.api.config().clone();

    match (key, value) {
        (None, _) => {
            for key in BoncoConfig::keys() {
                println!("{} = {}", key, config.get(key).unwrap_or_default());
            }
        }
        (Some(key), None) => match config.get(&key) {
            Some(value) => println!("{} = {}", key, value),
            None => return Err(BoncoError::Api(format!("Unknown config key: {}", key))),
        },
        (Some(key), Some(value)) => {
            config.set(&key, &value)?;
            config.save(&ctx.data_dir)?;
            println!("{} = {}", key, value);
        }
    }
    Ok(())
}
