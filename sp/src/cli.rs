//! CLI command definitions and subcommands

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// sysprompt - render role-based system messages
#[derive(Parser)]
#[command(
    name = "sp",
    about = "Render role-based system messages from a template catalog",
    version
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Catalog file (YAML or JSON); overrides the configured catalog
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(
        short = 'l',
        long = "log-level",
        global = true,
        help = "Log level (TRACE, DEBUG, INFO, WARN, ERROR)"
    )]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Parameter sources shared by `render` and `prompt`
#[derive(Debug, clap::Args)]
pub struct ParamArgs {
    /// Set a parameter (repeatable), e.g. --set service="Accounts Payable"
    #[arg(short = 's', long = "set", value_name = "KEY=VALUE", value_parser = parse_key_val)]
    pub set: Vec<(String, String)>,

    /// YAML or JSON file with parameters; --set values win
    #[arg(short, long, value_name = "FILE")]
    pub params: Option<PathBuf>,
}

/// CLI subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List catalog roles
    Roles,

    /// List render keys (role.variant)
    Keys {
        /// Only keys for this role
        #[arg(short, long)]
        role: Option<String>,
    },

    /// Render a system message
    Render {
        /// Render key, e.g. sales.no_hallucinations.concise
        key: String,

        #[command(flatten)]
        params: ParamArgs,

        /// Fail on variants the role does not define
        #[arg(long)]
        strict: bool,

        /// Print the message as JSON ({role, content})
        #[arg(long)]
        json: bool,
    },

    /// Build a chat prompt around a rendered system message
    Prompt {
        /// Render key, e.g. customer_support.empathy_first
        key: String,

        #[command(flatten)]
        params: ParamArgs,

        /// Variable name for the human turn
        #[arg(long, value_name = "SLOT")]
        human: Option<String>,

        /// Leave out the history placeholder
        #[arg(long)]
        no_history: bool,

        /// Variable name for the history placeholder
        #[arg(long, value_name = "SLOT")]
        history_slot: Option<String>,

        /// Fill the human turn and print the resulting messages
        #[arg(short, long)]
        input: Option<String>,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Parse a `KEY=VALUE` pair
pub fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid KEY=VALUE: no '=' found in '{}'", s))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("invalid KEY=VALUE: empty key in '{}'", s));
    }
    Ok((key.to_string(), value.to_string()))
}
