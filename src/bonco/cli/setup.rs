use bonco::api::BatchSize;
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "bonco", bin_name = "bonco", version)]
#[command(about = "Flashcard drills for herbal medicine names", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Data directory (defaults to $BONCO_HOME, then the platform data dir)
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub home: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

/// Command group definitions for help output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandGroup {
    Study,
    Review,
    Misc,
}

impl CommandGroup {
    pub fn heading(&self) -> &'static str {
        match self {
            CommandGroup::Study => "Study Commands:",
            CommandGroup::Review => "Wrong-Answer Commands:",
            CommandGroup::Misc => "Miscellaneous:",
        }
    }

    /// Returns the group for a given command name
    pub fn for_command(name: &str) -> Option<Self> {
        match name {
            "quiz" | "groups" | "choseong" => Some(CommandGroup::Study),
            "miss" | "remove" | "clear" | "stats" | "top" | "paths" => Some(CommandGroup::Review),
            "config" => Some(CommandGroup::Misc),
            _ => None,
        }
    }

    /// Returns all groups in display order
    pub fn all() -> &'static [CommandGroup] {
        &[CommandGroup::Study, CommandGroup::Review, CommandGroup::Misc]
    }
}

/// Returns the grouped help output as a string
pub fn get_grouped_help() -> String {
    let cmd = Cli::command();
    let version = cmd.get_version().unwrap_or("unknown");

    let mut output = String::new();
    output.push_str(&format!("bonco {version}\n"));
    output.push_str("Flashcard drills for herbal medicine names\n");
    output.push('\n');
    output.push_str("Usage: bonco [OPTIONS] [COMMAND]\n");

    let subcommands: Vec<_> = cmd.get_subcommands().collect();

    for group in CommandGroup::all() {
        let group_cmds: Vec<_> = subcommands
            .iter()
            .filter(|sc| {
                !sc.is_hide_set() && CommandGroup::for_command(sc.get_name()) == Some(*group)
            })
            .collect();

        if !group_cmds.is_empty() {
            output.push('\n');
            output.push_str(&format!("{}\n", group.heading()));
            for sc in group_cmds {
                let name = sc.get_name();
                let about = sc.get_about().map(|s| s.to_string()).unwrap_or_default();
                output.push_str(&format!("  {:<12} {}\n", name, about));
            }
        }
    }

    output.push('\n');
    output.push_str("Options:\n");
    output.push_str("      --home <DIR>  Data directory\n");
    output.push_str("  -v, --verbose     Verbose output\n");
    output.push_str("  -h, --help        Print help\n");
    output.push_str("  -V, --version     Print version\n");

    output
}

pub fn print_grouped_help() {
    print!("{}", get_grouped_help());
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(flatten)]
    Study(StudyCommands),

    #[command(flatten)]
    Review(ReviewCommands),

    #[command(flatten)]
    Misc(MiscCommands),
}

#[derive(Subcommand, Debug)]
pub enum StudyCommands {
    /// Run an interactive quiz
    #[command(alias = "q", display_order = 1)]
    Quiz {
        /// Manifest listing the set's cards (not needed with --wrong-only)
        manifest: Option<PathBuf>,

        /// Set id (defaults to the one in the manifest file name)
        #[arg(short, long)]
        set: Option<String>,

        /// Only cards under these initials, e.g. ㄱㄴ or "ㄱ,ㅎ"
        #[arg(short, long)]
        initials: Option<String>,

        /// Quiz the cards recorded as wrong for the set
        #[arg(short, long)]
        wrong_only: bool,

        /// Cards per batch: 10, 20, 30, 40, 50 or all
        #[arg(short, long, value_name = "N|all", default_value = "all")]
        batch: BatchSize,
    },

    /// Show a manifest's cards grouped by initial consonant
    #[command(display_order = 2)]
    Groups {
        /// Manifest listing the set's cards
        manifest: PathBuf,
    },

    /// Print the initial-consonant bucket of labels
    #[command(display_order = 3)]
    Choseong {
        #[arg(required = true, num_args = 1..)]
        labels: Vec<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ReviewCommands {
    /// Record a wrong answer
    #[command(display_order = 10)]
    Miss { set: String, card: String },

    /// Forget one wrong answer
    #[command(alias = "rm", display_order = 11)]
    Remove { set: String, card: String },

    /// Forget the wrong answers of a set, or all of them
    #[command(display_order = 12)]
    Clear {
        /// Only clear this set
        #[arg(short, long)]
        set: Option<String>,
    },

    /// Wrong answers per set, most missed first
    #[command(alias = "st", display_order = 13)]
    Stats {
        /// Only this set
        #[arg(short, long)]
        set: Option<String>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// The most missed cards across all sets
    #[command(display_order = 14)]
    Top {
        /// How many cards (defaults to the top-limit setting)
        #[arg(short = 'n', long)]
        limit: Option<usize>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Print the card paths recorded as wrong for a set
    #[command(display_order = 15)]
    Paths { set: String },
}

#[derive(Subcommand, Debug)]
pub enum MiscCommands {
    /// Get or set configuration
    #[command(display_order = 20)]
    Config {
        /// Configuration key (top-limit, shuffle)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}
