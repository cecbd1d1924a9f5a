//! In-memory worksheet grid
//!
//! The document writers own a [`Grid`] and hand `&mut` access to the row
//! renderer. Serialization to XLSX happens only once the grid is complete
//! (see [`crate::xlsx`]).

use gridreport_core::{CellStyle, CellValue, RenderError};
use std::collections::BTreeMap;

/// A written cell
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Cell {
    pub value: CellValue,
    pub style: CellStyle,
}

/// Rectangular merged region, inclusive on both ends
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MergeRange {
    pub first_row: u32,
    pub first_col: u16,
    pub last_row: u32,
    pub last_col: u16,
}

impl MergeRange {
    pub fn new(first_row: u32, first_col: u16, last_row: u32, last_col: u16) -> Self {
        Self {
            first_row,
            first_col,
            last_row,
            last_col,
        }
    }

    /// Region inside a single row
    pub fn in_row(row: u32, first_col: u16, last_col: u16) -> Self {
        Self::new(row, first_col, row, last_col)
    }

    pub fn contains(&self, row: u32, col: u16) -> bool {
        (self.first_row..=self.last_row).contains(&row)
            && (self.first_col..=self.last_col).contains(&col)
    }

    pub fn overlaps(&self, other: &MergeRange) -> bool {
        self.first_row <= other.last_row
            && other.first_row <= self.last_row
            && self.first_col <= other.last_col
            && other.first_col <= self.last_col
    }

    /// A1-style reference, e.g. `A1:F1`
    pub fn a1(&self) -> String {
        format!(
            "{}{}:{}{}",
            col_to_letter(self.first_col),
            self.first_row + 1,
            col_to_letter(self.last_col),
            self.last_row + 1
        )
    }
}

/// Cells, merges and sheet-level formatting of one worksheet
#[derive(Clone, Debug, Default)]
pub struct Grid {
    name: String,
    cells: BTreeMap<(u32, u16), Cell>,
    merges: Vec<MergeRange>,
    column_widths: BTreeMap<u16, f64>,
    row_heights: BTreeMap<u32, f64>,
    freeze: Option<(u32, u16)>,
}

impl Grid {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Write a value and its style; the last write wins
    pub fn write(&mut self, row: u32, col: u16, value: CellValue, style: CellStyle) {
        self.cells.insert((row, col), Cell { value, style });
    }

    pub fn cell(&self, row: u32, col: u16) -> Option<&Cell> {
        self.cells.get(&(row, col))
    }

    pub fn value(&self, row: u32, col: u16) -> Option<&CellValue> {
        self.cell(row, col).map(|c| &c.value)
    }

    pub fn style(&self, row: u32, col: u16) -> Option<&CellStyle> {
        self.cell(row, col).map(|c| &c.style)
    }

    /// Cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = ((u32, u16), &Cell)> {
        self.cells.iter().map(|(pos, cell)| (*pos, cell))
    }

    /// Cells of one row, left to right
    pub fn row(&self, row: u32) -> impl Iterator<Item = (u16, &Cell)> {
        self.cells
            .range((row, 0)..=(row, u16::MAX))
            .map(|((_, col), cell)| (*col, cell))
    }

    /// Number of rows up to the last written one
    pub fn row_count(&self) -> u32 {
        self.cells.keys().next_back().map_or(0, |(row, _)| row + 1)
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Register a merged region.
    ///
    /// Merging the exact same region again is a no-op; a partial overlap
    /// with an existing region is an error.
    pub fn merge(&mut self, range: MergeRange) -> Result<(), RenderError> {
        if range.first_row > range.last_row || range.first_col > range.last_col {
            return Err(RenderError::InvalidData(format!(
                "Inverted merge range {}",
                range.a1()
            )));
        }
        for existing in &self.merges {
            if *existing == range {
                return Ok(());
            }
            if existing.overlaps(&range) {
                return Err(RenderError::InvalidData(format!(
                    "Merge {} overlaps {}",
                    range.a1(),
                    existing.a1()
                )));
            }
        }
        self.merges.push(range);
        Ok(())
    }

    pub fn merges(&self) -> &[MergeRange] {
        &self.merges
    }

    /// Inside a merged region but not its top-left anchor
    pub fn is_merged_interior(&self, row: u32, col: u16) -> bool {
        self.merges.iter().any(|m| {
            m.contains(row, col) && !(m.first_row == row && m.first_col == col)
        })
    }

    pub fn set_column_width(&mut self, col: u16, width: f64) {
        self.column_widths.insert(col, width);
    }

    pub fn column_width(&self, col: u16) -> Option<f64> {
        self.column_widths.get(&col).copied()
    }

    pub fn column_widths(&self) -> impl Iterator<Item = (u16, f64)> + '_ {
        self.column_widths.iter().map(|(c, w)| (*c, *w))
    }

    pub fn set_row_height(&mut self, row: u32, height: f64) {
        self.row_heights.insert(row, height);
    }

    pub fn row_height(&self, row: u32) -> Option<f64> {
        self.row_heights.get(&row).copied()
    }

    pub fn row_heights(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        self.row_heights.iter().map(|(r, h)| (*r, *h))
    }

    /// Keep rows above `row` and columns left of `col` visible
    pub fn freeze_panes(&mut self, row: u32, col: u16) {
        self.freeze = Some((row, col));
    }

    pub fn frozen(&self) -> Option<(u32, u16)> {
        self.freeze
    }
}

/// Convert column number to Excel letter (0 -> A, 25 -> Z, 26 -> AA)
pub fn col_to_letter(col: u16) -> String {
    let mut result = String::new();
    let mut n = col as u32;
    loop {
        result.insert(0, (b'A' + (n % 26) as u8) as char);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    result
}
