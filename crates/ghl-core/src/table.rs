//! Table formatting for CLI output.

use comfy_table::{Cell, ContentArrangement, Table as ComfyTable};

use crate::iostreams::IOStreams;

/// Table printer that adapts output based on TTY/non-TTY mode.
///
/// TTY output is arranged into padded columns; non-TTY output is plain
/// tab-separated rows suitable for piping into other tools.
#[derive(Debug)]
pub struct TablePrinter {
    is_tty: bool,
    rows: Vec<Vec<String>>,
}

impl TablePrinter {
    /// Create a new table printer.
    pub fn new(ios: &IOStreams) -> Self {
        Self {
            is_tty: ios.is_stdout_tty(),
            rows: Vec::new(),
        }
    }

    /// Add a row of values.
    pub fn add_row(&mut self, fields: Vec<String>) {
        self.rows.push(fields);
    }

    /// Render the table to a string.
    pub fn render(&self) -> String {
        if self.is_tty {
            self.render_tty()
        } else {
            self.render_plain()
        }
    }

    fn render_tty(&self) -> String {
        let mut table = ComfyTable::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.load_preset(comfy_table::presets::NOTHING);

        for row in &self.rows {
            let cells: Vec<Cell> = row.iter().map(Cell::new).collect();
            table.add_row(cells);
        }

        table.to_string()
    }

    fn render_plain(&self) -> String {
        self.rows
            .iter()
            .map(|row| row.join("\t"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }
}
