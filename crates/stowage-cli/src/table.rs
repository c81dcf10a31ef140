use std::fmt::Display;
use std::io::IsTerminal;

use comfy_table::{presets::NOTHING, Attribute, Cell, Table};

/// Styling for the `field  value` listings the CLI prints.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct CliTableTheme {
    pub bold_fields: bool,
}

impl CliTableTheme {
    /// Bold field names only on an interactive terminal without `NO_COLOR`.
    pub(crate) fn detect() -> Self {
        Self::for_output(
            std::io::stdout().is_terminal(),
            std::env::var_os("NO_COLOR").is_some(),
        )
    }

    fn for_output(is_tty: bool, no_color: bool) -> Self {
        Self {
            bold_fields: is_tty && !no_color,
        }
    }

    pub(crate) fn new_kv_table(self) -> Table {
        let mut table = Table::new();
        table.load_preset(NOTHING);
        table
    }
}

pub(crate) fn add_kv_row(table: &mut Table, theme: CliTableTheme, field: &str, value: impl Display) {
    let mut field_cell = Cell::new(field);
    if theme.bold_fields {
        field_cell = field_cell.add_attribute(Attribute::Bold);
    }
    table.add_row(vec![field_cell, Cell::new(value)]);
}
