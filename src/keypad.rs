//! Keypad model: the button grid and its on-screen geometry.
//!
//! The grid is shared data between the renderer (which paints each
//! button) and the input path (cursor movement and mouse hit tests),
//! so it lives outside `ui`.

use ratatui::layout::{Position, Rect};

use crate::engine::{Key, Operator};

/// Buttons in a full keypad row.
pub const COLS: u16 = 4;

/// Gap between buttons, in terminal cells.
const GAP: u16 = 1;

/// Shortest button that still fits a bordered label.
const MIN_CELL_HEIGHT: u16 = 3;

/// Tallest button before the pad starts looking stretched.
const MAX_CELL_HEIGHT: u16 = 5;

/// The button rows, top to bottom. The zero button spans two columns,
/// so the last row holds three keys.
pub const ROWS: [&[Key]; 5] = [
    &[
        Key::Clear,
        Key::SignToggle,
        Key::Op(Operator::Percent),
        Key::Op(Operator::Divide),
    ],
    &[
        Key::Digit(9),
        Key::Digit(8),
        Key::Digit(7),
        Key::Op(Operator::Multiply),
    ],
    &[
        Key::Digit(4),
        Key::Digit(5),
        Key::Digit(6),
        Key::Op(Operator::Subtract),
    ],
    &[
        Key::Digit(1),
        Key::Digit(2),
        Key::Digit(3),
        Key::Op(Operator::Add),
    ],
    &[Key::Digit(0), Key::Dot, Key::Equals],
];

/// Button color classes. A key is styled by its class, not its
/// position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// Digits and the decimal point.
    Digit,
    /// The four arithmetic operators and equals.
    Operator,
    /// AC, sign toggle, and percent.
    Function,
}

pub fn category(key: Key) -> Category {
    match key {
        Key::Digit(_) | Key::Dot => Category::Digit,
        Key::Op(Operator::Percent) => Category::Function,
        Key::Op(_) | Key::Equals => Category::Operator,
        Key::Clear | Key::SignToggle => Category::Function,
    }
}

/// Number of buttons in a row, 0 for rows that do not exist.
pub fn row_len(row: usize) -> usize {
    ROWS.get(row).map_or(0, |r| r.len())
}

/// The key under a cursor position, if any.
pub fn key_at(row: usize, col: usize) -> Option<Key> {
    ROWS.get(row)?.get(col).copied()
}

/// Compute the button rectangles for a keypad area.
///
/// Buttons are uniform cells on a four-column grid with a one-cell gap
/// on either side, centered horizontally; the zero button spans two
/// columns plus the gap between them. Returns an empty layout when the
/// area cannot fit the grid.
pub fn layout(area: Rect) -> Vec<(Rect, Key)> {
    let rows = ROWS.len() as u16;
    let cell_w = area.width.saturating_sub(GAP * (COLS + 1)) / COLS;
    let cell_h = (area.height / rows).clamp(MIN_CELL_HEIGHT, MAX_CELL_HEIGHT);
    if cell_w < 4 || area.height < rows * MIN_CELL_HEIGHT {
        return Vec::new();
    }

    let used_w = COLS * cell_w + GAP * (COLS + 1);
    let x0 = area.x + (area.width - used_w) / 2 + GAP;

    let mut buttons = Vec::new();
    for (r, row) in ROWS.iter().enumerate() {
        let y = area.y + r as u16 * cell_h;
        let mut col: u16 = 0;
        for &key in row.iter() {
            let span: u16 = if key == Key::Digit(0) { 2 } else { 1 };
            let width = cell_w * span + GAP * (span - 1);
            let x = x0 + col * (cell_w + GAP);
            buttons.push((Rect::new(x, y, width, cell_h), key));
            col += span;
        }
    }
    buttons
}

/// The key under an absolute screen position, if it is on a button.
pub fn hit_test(area: Rect, x: u16, y: u16) -> Option<Key> {
    layout(area)
        .into_iter()
        .find(|(rect, _)| rect.contains(Position::new(x, y)))
        .map(|(_, key)| key)
}
