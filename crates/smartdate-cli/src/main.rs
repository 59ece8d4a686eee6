//! smartdate CLI Application
//!
//! Command-line interface for rendering timestamps as short phrases.

mod args;
mod cli;
mod mcp;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use jiff::tz::TimeZone;
use log::info;
use mcp::{run_stdio_server, SmartdateMcpServer};
use renderer::TerminalRenderer;
use smartdate_core::EngineBuilder;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        config_file,
        time_zone,
        no_color,
        command,
    } = Args::parse();

    let mut builder = EngineBuilder::new()
        .with_config_file(config_file)
        .discover_config_file();
    if let Some(name) = time_zone {
        builder = builder.with_time_zone(parse_time_zone(&name)?);
    }
    let engine = builder.build().context("Failed to initialize engine")?;

    let renderer = TerminalRenderer::new(!no_color);

    info!("smartdate started");

    match command {
        Format(args) => Cli::new(engine, renderer).format(args),
        Tag(args) => Cli::new(engine, renderer).tag(args),
        Render(args) => Cli::new(engine, renderer).render(args),
        Watch(args) => Cli::new(engine, renderer).watch(args).await,
        Locales => Cli::new(engine, renderer).locales(),
        Config(args) => Cli::new(engine, renderer).config(args),
        Serve => {
            info!("Starting smartdate MCP server");
            run_stdio_server(SmartdateMcpServer::new(engine))
                .await
                .context("MCP server failed")
        }
    }
}

fn parse_time_zone(name: &str) -> Result<TimeZone> {
    if name.eq_ignore_ascii_case("utc") {
        return Ok(TimeZone::UTC);
    }
    TimeZone::get(name).with_context(|| format!("Unknown time zone '{name}'"))
}
