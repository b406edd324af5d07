//! Table and JSON printing.

use serde::Serialize;

use crate::error::ApiError;
use crate::state::AppConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

impl OutputFormat {
    pub fn from_flag(json: bool) -> Self {
        if json {
            OutputFormat::Json
        } else {
            OutputFormat::Table
        }
    }
}

/// Human-readable rendering of a command result.
pub trait Render {
    fn render(&self, config: &AppConfig) -> String;
}

/// Renders `value` in the chosen format.
pub fn format<T>(value: &T, format: OutputFormat, config: &AppConfig) -> Result<String, ApiError>
where
    T: Serialize + Render,
{
    match format {
        OutputFormat::Table => Ok(value.render(config)),
        OutputFormat::Json => serde_json::to_string_pretty(value)
            .map_err(|e| ApiError::internal(format!("Failed to serialize output: {}", e))),
    }
}

/// Confirmation for commands that return no record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Ack {
    pub id: String,
    pub message: String,
}

impl Ack {
    pub fn new(id: impl Into<String>, message: impl Into<String>) -> Self {
        Ack {
            id: id.into(),
            message: message.into(),
        }
    }
}

impl Render for Ack {
    fn render(&self, _config: &AppConfig) -> String {
        self.message.clone()
    }
}

/// Left-aligned columns sized to the widest cell.
pub fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    if rows.is_empty() {
        return "(no records)".to_string();
    }

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, headers.iter().copied(), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_row(&mut out, rule.iter().map(String::as_str), &widths);
    for row in rows {
        push_row(&mut out, row.iter().map(String::as_str), &widths);
    }

    out.truncate(out.trim_end().len());
    out
}

fn push_row<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let line: Vec<String> = cells
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!("{}{}", cell, " ".repeat(pad))
        })
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}

/// `label: value` lines with the labels aligned.
pub fn fields(pairs: &[(&str, String)]) -> String {
    let width = pairs.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    pairs
        .iter()
        .map(|(label, value)| format!("{:<width$}  {}", format!("{}:", label), value, width = width + 1))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_aligns_columns() {
        let rows = vec![
            vec!["ID-CS-1-5".to_string(), "Budi".to_string()],
            vec!["ID-CS-10-5".to_string(), "Siti Aminah".to_string()],
        ];
        let out = table(&["ID", "Name"], &rows);
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines[0], "ID          Name");
        assert_eq!(lines[1], "----------  -----------");
        assert_eq!(lines[2], "ID-CS-1-5   Budi");
        assert_eq!(lines[3], "ID-CS-10-5  Siti Aminah");
    }

    #[test]
    fn test_empty_table() {
        assert_eq!(table(&["ID"], &[]), "(no records)");
    }

    #[test]
    fn test_fields() {
        let out = fields(&[("ID", "x".to_string()), ("Name", "Budi".to_string())]);
        assert_eq!(out, "ID:    x\nName:  Budi");
    }

    #[test]
    fn test_format_ack() {
        let config = AppConfig::default();
        let ack = Ack::new("ID-CS-1-1", "Deleted customer ID-CS-1-1");

        assert_eq!(
            format(&ack, OutputFormat::Table, &config).unwrap(),
            "Deleted customer ID-CS-1-1"
        );
        let json = format(&ack, OutputFormat::Json, &config).unwrap();
        assert!(json.contains("\"id\": \"ID-CS-1-1\""));
    }
}
