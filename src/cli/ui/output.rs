use console::{StyledObject, style};

/// Styled terminal output for CLI commands
pub struct Output;

impl Output {
    pub fn new() -> Self {
        Self
    }

    pub fn success(&self, message: &str) {
        println!("{} {}", style("✓").green(), message);
    }

    pub fn warning(&self, message: &str) {
        println!("{} {}", style("⚠").yellow(), message);
    }

    pub fn header(&self, message: &str) {
        println!("\n{}", style(message).bold().underlined());
    }

    pub fn section(&self, message: &str) {
        println!("\n{}", style(message).bold());
        println!("{}", "─".repeat(40));
    }

    /// Aligned `label: value` line
    pub fn field(&self, label: &str, value: impl std::fmt::Display) {
        println!("  {:<18} {}", style(format!("{}:", label)).dim(), value);
    }

    /// `label: NN/100` colored by score band
    pub fn score(&self, label: &str, score: u8) {
        self.field(label, Self::styled_score(score));
    }

    pub fn styled_score(score: u8) -> StyledObject<String> {
        let text = format!("{}/100", score);
        match score {
            80.. => style(text).green(),
            60..=79 => style(text).yellow(),
            _ => style(text).red(),
        }
    }
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}
