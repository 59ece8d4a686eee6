//! Terminal output with optional termimad styling.

use anyhow::Result;
use termimad::{crossterm::style::Color, MadSkin};

/// Writes command output, styled through termimad unless `--no-color` is set
pub struct TerminalRenderer {
    skin: Option<MadSkin>,
}

impl TerminalRenderer {
    pub fn new(rich_enabled: bool) -> Self {
        Self {
            skin: rich_enabled.then(phrase_skin),
        }
    }

    /// Prints `markdown` as is, or laid out by the skin.
    pub fn render(&self, markdown: &str) -> Result<()> {
        match &self.skin {
            Some(skin) => skin.print_text(markdown),
            None => print!("{markdown}"),
        }
        Ok(())
    }
}

/// Locale names in bold yellow, headers in cyan.
fn phrase_skin() -> MadSkin {
    let mut skin = MadSkin::default();
    skin.set_headers_fg(Color::Cyan);
    skin.bold.set_fg(Color::Yellow);
    skin
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}
