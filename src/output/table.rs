//! Table output formatting

use tabled::{
    Table, Tabled,
    settings::{
        Alignment, Modify, Style, Width,
        object::{Columns, Rows},
    },
};

/// Width past which value cells wrap
const MAX_CELL_WIDTH: usize = 100;

/// Format rows as a rounded table, or `empty` when there are none
pub fn format_table<T: Tabled>(data: &[T], empty: &str) -> String {
    if data.is_empty() {
        return empty.to_string();
    }

    let mut table = Table::new(data);
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()))
        .with(Modify::new(Columns::new(1..)).with(Width::wrap(MAX_CELL_WIDTH)));

    table.to_string()
}
