//! Text rendering of a layout on a physical keyboard.

use super::types::Layout;

/// The three letter rows of a QWERTY keyboard, top to bottom.
pub const QWERTY_ROWS: [&str; 3] = ["qwertyuiop", "asdfghjkl", "zxcvbnm"];

/// Placeholder for a physical key that no symbol is assigned to.
pub const UNASSIGNED: char = '_';

/// Renders `layout` on the given physical rows.
///
/// Each position shows the symbol whose assigned value is that key,
/// i.e. the inverse mapping.
pub fn render_rows(layout: &Layout, rows: &[&str]) -> String {
    let inverse = layout.inverse();
    rows.iter()
        .map(|row| {
            row.chars()
                .map(|key| inverse.get(key).unwrap_or(UNASSIGNED))
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Renders `layout` on the QWERTY letter rows.
pub fn render_qwerty(layout: &Layout) -> String {
    render_rows(layout, &QWERTY_ROWS)
}
