//! Presentation surfaces display rendered grids to an audience.

use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

use crate::grid::RenderedGrid;

/// Slots per row in a chest-style container.
pub const ROW_WIDTH: usize = 9;

/// Who a grid is being shown to (for example a player session).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Audience {
    /// Session or player name.
    pub name: String,
}

impl Audience {
    /// Create an audience handle.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Displays a rendered grid.
pub trait PresentationSurface {
    /// Show `grid` titled `title` to `audience`.
    fn present(&self, audience: &Audience, title: &str, grid: &RenderedGrid) -> io::Result<()>;
}

/// Writes grids as plain text rows.
#[derive(Debug)]
pub struct TextSurface<W: Write> {
    writer: Mutex<W>,
    columns: usize,
}

impl<W: Write> TextSurface<W> {
    /// Surface writing rows of [`ROW_WIDTH`] cells to `writer`.
    pub fn new(writer: W) -> Self {
        Self::with_columns(writer, ROW_WIDTH)
    }

    /// Surface writing rows of `columns` cells (at least one).
    pub fn with_columns(writer: W, columns: usize) -> Self {
        Self {
            writer: Mutex::new(writer),
            columns: columns.max(1),
        }
    }

    /// Recover the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W: Write> PresentationSurface for TextSurface<W> {
    fn present(&self, audience: &Audience, title: &str, grid: &RenderedGrid) -> io::Result<()> {
        let mut out = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        writeln!(out, "== {title} ({}) ==", audience.name)?;
        for (row, cells) in grid.rows(self.columns).enumerate() {
            let line: Vec<String> = cells
                .iter()
                .enumerate()
                .map(|(col, cell)| {
                    let slot = row * self.columns + col;
                    match cell {
                        Some(item) => format!("{slot:>2}:{} x{}", item.plain_name(), item.amount()),
                        None => format!("{slot:>2}:-"),
                    }
                })
                .collect();
            writeln!(out, "{}", line.join(" | "))?;
        }
        out.flush()
    }
}
