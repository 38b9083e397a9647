//! Human-readable output formatter.

use super::OutputFormatter;
use anyhow::Result;
use console::Term;
use console::style;
use std::path::Path;

pub struct HumanFormatter {
    use_colors: bool,
    term: Term,
}

impl HumanFormatter {
    pub fn new() -> Self {
        Self {
            use_colors: console::colors_enabled(),
            term: Term::stdout(),
        }
    }

    fn unexpected_header(&self, apex: &Path) -> String {
        let header = format!("{} contains following unexpected entries:", apex.display());
        if self.use_colors {
            style(header).yellow().bold().to_string()
        } else {
            header
        }
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_contents(&self, contents: &[String]) -> Result<()> {
        for path in contents {
            self.term.write_line(path)?;
        }
        Ok(())
    }

    fn format_unexpected(&self, apex: &Path, unexpected: &[String]) -> Result<()> {
        self.term.write_line(&self.unexpected_header(apex))?;
        for path in unexpected {
            self.term.write_line(path)?;
        }
        Ok(())
    }
}
