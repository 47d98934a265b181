use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::demo_catalog::DEFAULT_DEFERRED_ATTEMPTS;

#[derive(Debug, Parser)]
#[command(
    name = "tutti",
    about = "Drive once-only onboarding hints and tutorials from the console",
    version
)]
pub(crate) struct Cli {
    #[arg(
        long,
        env = "TUTTI_STORE_PATH",
        global = true,
        help = "Display state file (defaults to .tutti/display-state.json)"
    )]
    pub(crate) store_path: Option<PathBuf>,

    #[arg(
        long,
        env = "TUTTI_USER_ID",
        global = true,
        help = "Scope display state to this user id"
    )]
    pub(crate) user_id: Option<String>,

    #[command(subcommand)]
    pub(crate) command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub(crate) enum CliCommand {
    /// Present a demo item unless it has already been displayed.
    Show {
        #[arg(value_enum)]
        item: CliDemoItem,
        #[arg(long, default_value = "console", help = "Anchor label printed with the item")]
        anchor: String,
    },
    /// Register a presentation attempt for the deferred demo hint.
    Attempt {
        #[arg(long, default_value_t = DEFAULT_DEFERRED_ATTEMPTS)]
        required: u32,
    },
    /// List display state for every demo item and demo user.
    Status,
    /// Mark every demo item as not displayed.
    Reset {
        #[arg(long, help = "Remove every Tutti entry from the store instead")]
        all: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum CliDemoItem {
    Hint,
    Tutorial,
    LocalizedTutorial,
}
