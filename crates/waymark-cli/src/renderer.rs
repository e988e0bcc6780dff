//! Markdown output for the terminal.
//!
//! Everything the core renders is markdown. With color enabled, headings are
//! tinted by depth and the remaining lines go through termimad's inline
//! styling; with `--no-color` the markdown is written untouched so it can be
//! piped or asserted on.

use anyhow::Result;
use termimad::{crossterm::style::Color, MadSkin};

const TITLE_COLOR: &str = "\x1b[1;34m";
const SECTION_COLOR: &str = "\x1b[36m";
const RESET: &str = "\x1b[0m";

pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
}

impl TerminalRenderer {
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();
        skin.set_headers_fg(Color::Blue);
        skin.bold.set_fg(Color::Yellow);
        skin.italic.set_fg(Color::DarkGrey);
        skin.inline_code.set_bg(Color::AnsiValue(238));

        Self { rich_enabled, skin }
    }

    pub fn render(&self, markdown: &str) -> Result<()> {
        if !self.rich_enabled {
            print!("{markdown}");
            return Ok(());
        }

        for line in markdown.lines() {
            match heading_color(line) {
                Some(color) => println!("{color}{line}{RESET}"),
                None => {
                    self.skin.print_inline(line);
                    println!();
                }
            }
        }
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}

/// Top-level headings stand out more than section headings.
fn heading_color(line: &str) -> Option<&'static str> {
    if line.starts_with("# ") {
        Some(TITLE_COLOR)
    } else if line.starts_with('#') {
        Some(SECTION_COLOR)
    } else {
        None
    }
}
