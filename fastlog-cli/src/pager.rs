//! Interactive paging for the per-alert view.

use std::io::{IsTerminal, Write};

use tokio::io::{AsyncBufReadExt, BufReader};

use crate::theme::{Style, Theme};

/// Pauses the detailed view every `page_size` records.
///
/// Only prompts when both stdin and stdout are terminals.
#[derive(Debug, Clone, Copy)]
pub struct Pager {
    page_size: usize,
    interactive: bool,
}

impl Pager {
    /// Build a pager for the current process streams.
    pub fn for_terminal(page_size: usize, enabled: bool) -> Self {
        let interactive =
            enabled && std::io::stdin().is_terminal() && std::io::stdout().is_terminal();
        Self {
            page_size,
            interactive,
        }
    }

    #[cfg(test)]
    fn interactive(page_size: usize) -> Self {
        Self {
            page_size,
            interactive: true,
        }
    }

    /// Whether to prompt after `shown` of `total` records.
    pub fn should_pause(&self, shown: usize, total: usize) -> bool {
        self.interactive && self.page_size > 0 && shown % self.page_size == 0 && shown < total
    }

    /// Prompt and wait for Enter when a page boundary is reached.
    pub async fn pause(
        &self,
        shown: usize,
        total: usize,
        w: &mut dyn Write,
        theme: &Theme,
    ) -> std::io::Result<()> {
        if !self.should_pause(shown, total) {
            return Ok(());
        }

        writeln!(w)?;
        write!(w, "{}", theme.paint("Press Enter to continue...", Style::Warning))?;
        w.flush()?;

        let mut line = String::new();
        BufReader::new(tokio::io::stdin()).read_line(&mut line).await?;
        Ok(())
    }
}
