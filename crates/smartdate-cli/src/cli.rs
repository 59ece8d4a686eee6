//! Command-line argument wrappers and command handlers
//!
//! Argument structs carry clap derives and convert into core types through
//! `From` impls, so `smartdate-core` stays free of CLI concerns:
//!
//! ```text
//! User Input → clap Args → Overrides → EngineContext
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, Result};
use clap::Args;
use log::{debug, info};
use smartdate_core::{Config, Document, EngineContext, Overrides};

use crate::renderer::TerminalRenderer;

/// Per-call formatting options shared by several commands
#[derive(Args, Debug, Default)]
pub struct OverrideArgs {
    /// Locale name (e.g. en, ru); unknown names fall back to en
    #[arg(short, long)]
    pub locale: Option<String>,
    /// auto, past, future, date, time, datetime, or a custom mode
    #[arg(short, long)]
    pub mode: Option<String>,
    /// Spell month names out in full
    #[arg(long)]
    pub full_month_names: bool,
    /// Uppercase the first character of the phrase
    #[arg(long)]
    pub capitalize: bool,
    /// Do not attach an absolute-time title to elements
    #[arg(long)]
    pub no_title: bool,
}

impl From<OverrideArgs> for Overrides {
    /// Flags only override when given, so configuration file values survive
    fn from(val: OverrideArgs) -> Self {
        Overrides {
            locale: val.locale,
            mode: val.mode,
            full_month_names: val.full_month_names.then_some(true),
            capitalize: val.capitalize.then_some(true),
            add_title: val.no_title.then_some(false),
            ..Default::default()
        }
    }
}

/// Format one or more timestamps
#[derive(Args)]
pub struct FormatArgs {
    /// Unix seconds, e.g. 947769193, -10000 or +100000
    #[arg(required = true, allow_negative_numbers = true)]
    pub inputs: Vec<String>,
    #[command(flatten)]
    pub overrides: OverrideArgs,
}

/// Print a markup element for a timestamp
#[derive(Args)]
pub struct TagArgs {
    /// Unix seconds
    #[arg(allow_negative_numbers = true)]
    pub input: String,
    #[command(flatten)]
    pub overrides: OverrideArgs,
}

/// Render a JSON document once
#[derive(Args)]
pub struct RenderArgs {
    /// Path to the JSON document
    pub document: PathBuf,
    /// Write the rendered document back instead of printing it
    #[arg(long)]
    pub write: bool,
    /// Stop managing elements once they show an absolute date
    #[arg(long)]
    pub retire_absolute: bool,
}

/// Re-render a JSON document periodically
#[derive(Args)]
pub struct WatchArgs {
    /// Path to the JSON document
    pub document: PathBuf,
    /// Refresh period in milliseconds; 0 renders once. Defaults to the
    /// configured updateInterval
    #[arg(long)]
    pub interval: Option<u64>,
    /// Write the rendered document back instead of printing it
    #[arg(long)]
    pub write: bool,
    /// Stop managing elements once they show an absolute date
    #[arg(long)]
    pub retire_absolute: bool,
}

/// Show or save the effective configuration
#[derive(Args)]
pub struct ConfigArgs {
    #[command(flatten)]
    pub overrides: OverrideArgs,
    /// Save to $XDG_CONFIG_HOME/smartdate/config.json instead of printing
    #[arg(long)]
    pub save: bool,
}

/// Command handlers bound to one engine and one output renderer
pub struct Cli {
    engine: EngineContext,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(engine: EngineContext, renderer: TerminalRenderer) -> Self {
        Self { engine, renderer }
    }

    pub fn format(&self, args: FormatArgs) -> Result<()> {
        let overrides = Overrides::from(args.overrides);
        let mut output = String::new();
        for input in &args.inputs {
            let phrase = self
                .engine
                .try_format(input.as_str(), Some(&overrides))
                .with_context(|| format!("Cannot format '{input}'"))?;
            output.push_str(&phrase);
            output.push('\n');
        }
        self.renderer.render(&output)
    }

    pub fn tag(&self, args: TagArgs) -> Result<()> {
        let overrides = Overrides::from(args.overrides);
        let element = self
            .engine
            .create_element(args.input.as_str(), Some(&overrides))
            .with_context(|| format!("Invalid timestamp: {}", args.input))?;
        println!("{element}");
        Ok(())
    }

    pub fn render(&mut self, args: RenderArgs) -> Result<()> {
        self.retire_absolute(args.retire_absolute);
        let document = self.refresh(&args.document, args.write)?;
        if !args.write {
            print!("{document}");
        }
        Ok(())
    }

    /// Re-renders the document on every tick until Ctrl-C.
    pub async fn watch(&mut self, args: WatchArgs) -> Result<()> {
        self.retire_absolute(args.retire_absolute);
        let period = match args.interval {
            Some(ms) => (ms > 0).then(|| Duration::from_millis(ms)),
            None => self.engine.config().refresh_interval(),
        };
        let Some(period) = period else {
            debug!("Refresh disabled, rendering once");
            return self.render(RenderArgs {
                document: args.document,
                write: args.write,
                retire_absolute: args.retire_absolute,
            });
        };

        info!("Refreshing {} every {period:?}", args.document.display());
        let mut ticker = tokio::time::interval(period);
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let document = self.refresh(&args.document, args.write)?;
                    if !args.write {
                        print!("{document}");
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    info!("Refresh loop stopped");
                    return Ok(());
                }
            }
        }
    }

    pub fn locales(&self) -> Result<()> {
        let mut output = String::from("# Locales\n\n");
        for (index, locale) in self.engine.locales().iter().enumerate() {
            let modes = locale.mode_names().collect::<Vec<_>>().join(", ");
            let marker = if index == 0 { " (default)" } else { "" };
            output.push_str(&format!("- **{}**{marker}: {modes}\n", locale.name()));
        }
        self.renderer.render(&output)
    }

    pub fn config(&self, args: ConfigArgs) -> Result<()> {
        let config = self
            .engine
            .effective_options(Some(&Overrides::from(args.overrides)));
        let json =
            serde_json::to_string_pretty(&config).context("Failed to serialize configuration")?;

        if args.save {
            let path = Config::default_path().context("Failed to locate configuration directory")?;
            fs::write(&path, json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            self.renderer
                .render(&format!("Saved configuration to {}\n", path.display()))
        } else {
            println!("{json}");
            Ok(())
        }
    }

    /// The flag only switches retirement on; a configured `retireAbsolute`
    /// stays in effect without it.
    fn retire_absolute(&mut self, enabled: bool) {
        if enabled {
            self.engine.setup(&Overrides {
                retire_absolute: Some(true),
                ..Default::default()
            });
        }
    }

    fn refresh(&self, path: &Path, write: bool) -> Result<Document> {
        let mut document = Document::from_file(path)
            .with_context(|| format!("Failed to load document {}", path.display()))?;
        let rendered = self.engine.render_all(&mut document);
        debug!("Rendered {rendered} elements from {}", path.display());
        if write {
            document
                .save(path)
                .with_context(|| format!("Failed to save document {}", path.display()))?;
            self.renderer.render(&format!(
                "Rendered {rendered} of {} elements in {}\n",
                document.elements.len(),
                path.display()
            ))?;
        }
        Ok(document)
    }
}
