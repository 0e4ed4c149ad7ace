//! Status display for user feedback
//!
//! Semantic status lines (success, failure, skipped, info) styled with
//! `console`. Styling follows `console`'s global color switch, which the
//! application sets from the resolved color intent.

use crate::graph::{ExecutionPlan, RunReport, TargetRegistry, TargetState};
use console::style;
use std::io::{self, Write};
use std::time::Duration;

const SUCCESS_SYMBOL: &str = "✓";
const ERROR_SYMBOL: &str = "✗";
const SKIPPED_SYMBOL: &str = "-";
const INFO_SYMBOL: &str = "·";

/// Status display manager for semantic user feedback
pub struct StatusDisplay<W: Write> {
    out: W,
}

impl<W: Write> StatusDisplay<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// `✓ item: details`
    pub fn success(&mut self, item: &str, details: &str) -> io::Result<()> {
        let line = join(item, details);
        writeln!(self.out, "{} {}", style(SUCCESS_SYMBOL).green(), line)
    }

    /// `✗ item: details`
    pub fn error(&mut self, item: &str, details: &str) -> io::Result<()> {
        let line = join(item, details);
        writeln!(self.out, "{} {}", style(ERROR_SYMBOL).red(), style(line).red())
    }

    /// `- item: details`
    pub fn skipped(&mut self, item: &str, details: &str) -> io::Result<()> {
        let line = join(item, details);
        writeln!(self.out, "{} {}", style(SKIPPED_SYMBOL).dim(), style(line).dim())
    }

    /// `· message`
    pub fn info(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.out, "{} {}", style(INFO_SYMBOL).cyan(), message)
    }

    pub fn message(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{}", text)
    }

    /// Display a header for a section of output
    pub fn section(&mut self, title: &str) -> io::Result<()> {
        writeln!(self.out, "{}", style(title).bold())
    }

    /// `[1/3] description`
    pub fn step(&mut self, current: usize, total: usize, description: &str) -> io::Result<()> {
        let prefix = format!("[{}/{}]", current, total);
        writeln!(self.out, "{} {}", style(prefix).dim(), description)
    }

    /// Numbered plan, one target per line
    pub fn plan(&mut self, plan: &ExecutionPlan) -> io::Result<()> {
        self.section(&format!("Execution plan ({} targets)", plan.len()))?;
        for (idx, name) in plan.iter().enumerate() {
            self.step(idx + 1, plan.len(), name)?;
        }
        Ok(())
    }

    /// Declared targets with descriptions and prerequisites, in registration order
    pub fn targets<C>(&mut self, registry: &TargetRegistry<C>) -> io::Result<()> {
        self.section("Targets")?;
        let width = registry.iter().map(|t| t.name().len()).max().unwrap_or(0);

        for target in registry.iter() {
            let mut line = format!(
                "  {:<width$}  {}",
                style(target.name()).bold(),
                target.about().unwrap_or(""),
                width = width
            );
            if !target.dependencies().is_empty() {
                line.push_str(&format!(
                    " {}",
                    style(format!("(depends on: {})", target.dependencies().join(", "))).dim()
                ));
            }
            writeln!(self.out, "{}", line.trim_end())?;
        }
        Ok(())
    }

    /// Per-target outcome lines followed by an overall verdict
    pub fn report(&mut self, report: &RunReport) -> io::Result<()> {
        self.section("Summary")?;
        for outcome in report.outcomes() {
            let elapsed = format_duration(outcome.duration);
            match outcome.state {
                TargetState::Succeeded => self.success(&outcome.name, &elapsed)?,
                TargetState::Failed => self.error(&outcome.name, &elapsed)?,
                TargetState::Skipped => self.skipped(&outcome.name, "skipped")?,
                TargetState::Pending | TargetState::Running => {
                    self.info(&format!("{}: {}", outcome.name, outcome.state))?
                }
            }
        }

        let total = format_duration(report.total_duration());
        match report.failed() {
            Some(failed) => writeln!(
                self.out,
                "{}",
                style(format!("Build failed at {} after {}", failed.name, total))
                    .red()
                    .bold()
            ),
            None => writeln!(
                self.out,
                "{}",
                style(format!("Build succeeded in {}", total)).green().bold()
            ),
        }
    }
}

fn join(item: &str, details: &str) -> String {
    if details.is_empty() {
        item.to_string()
    } else {
        format!("{}: {}", item, details)
    }
}

/// `0.42s`, or `1m 05s` past a minute
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs >= 60 {
        format!("{}m {:02}s", secs / 60, secs % 60)
    } else {
        format!("{:.2}s", duration.as_secs_f64())
    }
}

#[cfg(test)]
mod tests {
    include!("status.test.rs");
}
