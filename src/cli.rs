use crate::entity::EntityKind;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Check, compile and inspect record filter expressions
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// TOML config file with filter and paging limits
    #[arg(long, global = true, env = "CALORIE_QUERY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short = 'F', long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse a filter and print its condition tree
    Check {
        /// Entity the filter applies to
        #[arg(short, long, value_enum)]
        entity: EntityKind,

        /// Filter expression, e.g. "(Calories gt 500) and (Text like '%egg%')"
        #[arg(default_value = "")]
        filter: String,
    },
    /// Compile a filter to a parameterized where clause
    Compile {
        #[arg(short, long, value_enum)]
        entity: EntityKind,

        /// Restrict results to rows owned by this user id
        #[arg(long)]
        owner: Option<i64>,

        #[arg(default_value = "")]
        filter: String,
    },
    /// Print the select and count statements for a filtered search
    Search {
        #[arg(short, long, value_enum)]
        entity: EntityKind,

        #[arg(long)]
        owner: Option<i64>,

        /// Index of the first row
        #[arg(long)]
        start: Option<u32>,

        /// Page size, capped by the configured maximum
        #[arg(long)]
        limit: Option<u32>,

        #[arg(default_value = "")]
        filter: String,
    },
    /// List the filterable fields of an entity
    Fields {
        #[arg(short, long, value_enum)]
        entity: EntityKind,
    },
}

pub fn cli_parse() -> Cli {
    Cli::parse()
}
