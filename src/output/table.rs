//
//  wpcom-kit
//  output/table.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Table Output Formatting
//!
//! Builder over `comfy_table` with UTF-8 borders and dynamic column widths,
//! plus status and boolean formatting helpers.
//!
//! ```rust
//! use wpcom_kit::output::TableBuilder;
//!
//! let table = TableBuilder::new()
//!     .color(false)
//!     .headers(["ID", "STATUS"])
//!     .rows([["42", "ready"]]);
//! assert!(table.to_string().contains("ready"));
//! ```

use std::fmt;

use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};

/// An empty table with UTF-8 borders that wraps to the terminal width.
fn styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// A builder for list tables.
///
/// Headers are rendered in cyan when color is enabled. Color support is
/// detected from the terminal on creation; use [`color`](TableBuilder::color)
/// to override it.
///
/// # Example
///
/// ```rust,no_run
/// use wpcom_kit::output::TableBuilder;
///
/// TableBuilder::new()
///     .headers(["SITE", "EDITOR"])
///     .rows([["1", "gutenberg"], ["2", "aztec"]])
///     .print();
/// ```
pub struct TableBuilder {
    table: Table,
    color: bool,
}

impl TableBuilder {
    /// Creates a builder with no headers and auto-detected color.
    pub fn new() -> Self {
        Self {
            table: styled_table(),
            color: console::colors_enabled(),
        }
    }

    /// Overrides color detection. Call before [`headers`](TableBuilder::headers).
    pub fn color(mut self, enabled: bool) -> Self {
        self.color = enabled;
        self
    }

    /// Sets the header row.
    pub fn headers<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let headers: Vec<String> = headers.into_iter().map(Into::into).collect();
        if self.color {
            let cells: Vec<Cell> = headers.iter().map(|h| Cell::new(h).fg(Color::Cyan)).collect();
            self.table.set_header(cells);
        } else {
            self.table.set_header(headers);
        }
        self
    }

    /// Appends one row per item.
    pub fn rows<I, R, S>(mut self, rows: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for row in rows {
            self.table
                .add_row(row.into_iter().map(Into::into).collect::<Vec<String>>());
        }
        self
    }

    /// Prints the table to stdout.
    pub fn print(self) {
        println!("{}", self);
    }
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TableBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.table)
    }
}

/// Colors a backup, scan, or threat status by meaning.
pub fn format_status(status: &str, color: bool) -> String {
    if !color {
        return status.to_string();
    }

    use console::style;
    match status.to_lowercase().as_str() {
        "ready" | "idle" | "fixed" => style(status).green().to_string(),
        "scanning" | "preparing" | "provisioning" => style(status).blue().to_string(),
        "current" | "unavailable" => style(status).red().to_string(),
        "queued" | "ignored" => style(status).yellow().to_string(),
        _ => status.to_string(),
    }
}

/// Renders a flag as `Yes` or `No`.
pub fn format_bool(value: bool, color: bool) -> String {
    if color {
        use console::style;
        if value {
            style("Yes").green().to_string()
        } else {
            style("No").dim().to_string()
        }
    } else if value {
        "Yes".to_string()
    } else {
        "No".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_status_is_unchanged() {
        assert_eq!(format_status("ready", false), "ready");
        assert_eq!(format_status("anything", true), "anything");
    }

    #[test]
    fn test_format_bool() {
        assert_eq!(format_bool(true, false), "Yes");
        assert_eq!(format_bool(false, false), "No");
    }

    #[test]
    fn test_builder_renders_rows() {
        let rendered = TableBuilder::new()
            .color(false)
            .headers(["SITE", "EDITOR"])
            .rows([["1", "gutenberg"], ["2", "aztec"]])
            .to_string();
        assert!(rendered.contains("SITE"));
        assert!(rendered.contains("aztec"));
    }
}
