//! Opaque textual art blocks
//!
//! The engine never interprets sprite content; it only stores rows and
//! hands them back to the presentation layer and the save writer.

/// A fixed block of art rows attached to an entity
///
/// Spaces carry [`Sprite::SPACE_ROWS`] rows on the wire; objects,
/// characters and players carry a single row.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Sprite {
    rows: Vec<String>,
}

impl Sprite {
    /// Rows in a space art block on the wire
    pub const SPACE_ROWS: usize = 5;

    pub fn new(rows: Vec<String>) -> Self {
        Self { rows }
    }

    /// Single-row art, the form used by objects, characters and players
    pub fn single(row: impl Into<String>) -> Self {
        Self {
            rows: vec![row.into()],
        }
    }

    pub fn empty() -> Self {
        Self { rows: Vec::new() }
    }

    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    /// The first row, or "" for an empty sprite (single-field wire form)
    pub fn first_row(&self) -> &str {
        self.rows.first().map(String::as_str).unwrap_or("")
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
