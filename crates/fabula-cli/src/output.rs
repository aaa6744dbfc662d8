//! Output formatting for the CLI.

use crate::cli::CliFormat;
use crate::error::Result;
use colored::*;
use fabula_domain::{AllenRelation, Conflict, SolveResponse, SolveStatus};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable tables.
    Table,
    /// Machine-readable JSON.
    Json,
    /// One `event start end` line per position.
    Quiet,
}

impl From<CliFormat> for OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => OutputFormat::Table,
            CliFormat::Json => OutputFormat::Json,
            CliFormat::Quiet => OutputFormat::Quiet,
        }
    }
}

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format a solve response.
    pub fn format_response(&self, response: &SolveResponse) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(response)?),
            OutputFormat::Table => Ok(self.format_response_table(response)),
            OutputFormat::Quiet => Ok(self.format_response_quiet(response)),
        }
    }

    fn status_line(&self, status: SolveStatus) -> String {
        match status {
            SolveStatus::Satisfiable => self.colorize("✓ satisfiable", "green"),
            SolveStatus::Relaxed => self.colorize("⚠ relaxed", "yellow"),
            SolveStatus::Unsatisfiable => self.colorize("✗ unsatisfiable", "red"),
        }
    }

    fn format_response_table(&self, response: &SolveResponse) -> String {
        let mut sections = vec![format!(
            "{} ({} ms)",
            self.status_line(response.status),
            response.elapsed_ms
        )];

        if response.positions.is_empty() {
            sections.push(self.colorize("No events placed.", "yellow"));
        } else {
            let mut builder = Builder::default();
            builder.push_record(["Event", "Start", "End", "Width"]);
            for position in &response.positions {
                builder.push_record([
                    position.event_id.as_str().to_string(),
                    format!("{:.1}", position.start),
                    format!("{:.1}", position.end),
                    format!("{:.1}", position.width()),
                ]);
            }
            let mut table = builder.build();
            table
                .with(Style::rounded())
                .with(Modify::new(Rows::first()).with(Alignment::center()));
            sections.push(table.to_string());
        }

        if !response.violations.is_empty() {
            let mut lines = vec![self.colorize("Discarded assertions:", "yellow")];
            for violation in &response.violations {
                lines.push(format!(
                    "  {} [{}] {}",
                    violation.assertion_id,
                    match violation.severity {
                        fabula_domain::Severity::Soft => "soft",
                        fabula_domain::Severity::Hard => "hard",
                    },
                    violation.message
                ));
            }
            sections.push(lines.join("\n"));
        }

        if !response.conflicts.is_empty() {
            sections.push(self.format_conflict_lines(&response.conflicts));
        }

        sections.join("\n\n")
    }

    fn format_response_quiet(&self, response: &SolveResponse) -> String {
        response
            .positions
            .iter()
            .map(|p| format!("{} {} {}", p.event_id, p.start, p.end))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Format the result of a conflict scan.
    pub fn format_conflicts(&self, conflicts: &[Conflict]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(conflicts)?),
            OutputFormat::Table | OutputFormat::Quiet => {
                if conflicts.is_empty() {
                    Ok(self.colorize("No conflicts found.", "green"))
                } else {
                    Ok(self.format_conflict_lines(conflicts))
                }
            }
        }
    }

    fn format_conflict_lines(&self, conflicts: &[Conflict]) -> String {
        let mut lines = vec![self.colorize(
            &format!("{} conflict(s):", conflicts.len()),
            "red",
        )];
        for (i, conflict) in conflicts.iter().enumerate() {
            let ids: Vec<&str> = conflict.assertion_ids.iter().map(|id| id.as_str()).collect();
            lines.push(format!(
                "  {}. [{}] {}",
                i + 1,
                ids.join(", "),
                conflict.description
            ));
        }
        lines.join("\n")
    }

    /// Format the relation vocabulary listing.
    pub fn format_relations(&self) -> Result<String> {
        if self.format == OutputFormat::Json {
            let entries: Vec<serde_json::Value> = AllenRelation::ALL
                .iter()
                .map(|r| {
                    serde_json::json!({
                        "relation": r.as_str(),
                        "inverse": r.inverse().as_str(),
                        "meaning": r.describe(),
                    })
                })
                .collect();
            return Ok(serde_json::to_string_pretty(&entries)?);
        }

        let mut builder = Builder::default();
        builder.push_record(["Relation", "Inverse", "Meaning (source ... target)"]);
        for relation in AllenRelation::ALL {
            builder.push_record([
                relation.as_str(),
                relation.inverse().as_str(),
                relation.describe(),
            ]);
        }
        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        Ok(table.to_string())
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }
        match color {
            "green" => text.green().to_string(),
            "yellow" => text.yellow().to_string(),
            "red" => text.red().to_string(),
            _ => text.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fabula_domain::{EventId, Position};

    fn response() -> SolveResponse {
        SolveResponse {
            status: SolveStatus::Satisfiable,
            positions: vec![
                Position::new(EventId::new("a"), 50.0, 50.0),
                Position::new(EventId::new("b"), 100.0, 300.0),
            ],
            violations: vec![],
            conflicts: vec![],
            elapsed_ms: 2,
        }
    }

    #[test]
    fn test_quiet_output_is_one_line_per_position() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let output = formatter.format_response(&response()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "a 50 50");
        assert_eq!(lines[1], "b 100 300");
    }

    #[test]
    fn test_json_output_round_trips() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_response(&response()).unwrap();
        let back: SolveResponse = serde_json::from_str(&output).unwrap();
        assert_eq!(back, response());
    }

    #[test]
    fn test_table_output_names_every_event() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_response(&response()).unwrap();
        assert!(output.contains("satisfiable"));
        assert!(output.contains('a'));
        assert!(output.contains('b'));
    }

    #[test]
    fn test_relations_listing_is_complete() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_relations().unwrap();
        for relation in AllenRelation::ALL {
            assert!(output.contains(relation.as_str()));
        }
    }

    #[test]
    fn test_empty_conflicts_report() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_conflicts(&[]).unwrap();
        assert!(output.contains("No conflicts"));
    }
}
