use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{ConfigArgs, FormatArgs, RenderArgs, TagArgs, WatchArgs};

/// Render timestamps as short, locale-aware phrases
///
/// smartdate turns Unix timestamps into phrases such as "2 min ago",
/// "tomorrow at 3:00 pm" or "Jan 13, 2000". It can format timestamps directly,
/// produce and refresh markup elements stored in JSON documents, and run as an
/// MCP (Model Context Protocol) server.
#[derive(Parser)]
#[command(version, about, name = "smartdate")]
pub struct Args {
    /// JSON configuration file. Defaults to
    /// $XDG_CONFIG_HOME/smartdate/config.json when it exists
    #[arg(long, global = true)]
    pub config_file: Option<PathBuf>,

    /// Time zone that defines calendar days (e.g. UTC, Europe/Moscow).
    /// Defaults to the system time zone
    #[arg(long, global = true)]
    pub time_zone: Option<String>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for the smartdate CLI
#[derive(Subcommand)]
pub enum Commands {
    /// Format Unix timestamps as phrases
    #[command(alias = "f")]
    Format(FormatArgs),
    /// Print a managed markup element for a timestamp
    Tag(TagArgs),
    /// Render every managed element of a JSON document once
    Render(RenderArgs),
    /// Re-render a JSON document periodically until interrupted
    Watch(WatchArgs),
    /// List registered locales and their modes
    Locales,
    /// Print the effective configuration as JSON
    Config(ConfigArgs),
    /// Start the MCP server
    Serve,
}
