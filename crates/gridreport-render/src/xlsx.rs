//! XLSX serialization of a finished grid
//!
//! A single-sheet workbook is built from the grid in one pass: column
//! widths, row heights, merged regions, cells, then the frozen panes.
//! Any writer error aborts the whole run; there is no partial output.

use crate::grid::{Cell, Grid};
use gridreport_core::{Border, CellStyle, CellValue, HAlign, RenderError, VAlign};
use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook, Worksheet, XlsxError};
use std::path::Path;
use tracing::info;

/// Black border lines
const BORDER_COLOR: u32 = 0x000000;

/// Serializes a [`Grid`] to an XLSX workbook
#[derive(Clone, Copy, Debug, Default)]
pub struct XlsxWriter;

impl XlsxWriter {
    pub fn new() -> Self {
        Self
    }

    /// Generate Excel workbook bytes
    pub fn to_bytes(&self, grid: &Grid) -> Result<Vec<u8>, RenderError> {
        let mut workbook = self.workbook(grid)?;
        workbook
            .save_to_buffer()
            .map_err(|e| RenderError::Format(format!("Failed to create Excel: {e}")))
    }

    /// Write the workbook to `path`
    pub fn save(&self, grid: &Grid, path: impl AsRef<Path>) -> Result<(), RenderError> {
        let path = path.as_ref();
        let bytes = self.to_bytes(grid)?;
        std::fs::write(path, &bytes)?;
        info!(path = %path.display(), bytes = bytes.len(), sheet = grid.name(), "workbook saved");
        Ok(())
    }

    fn workbook(&self, grid: &Grid) -> Result<Workbook, RenderError> {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.set_name(grid.name()).map_err(format_error)?;

        for (col, width) in grid.column_widths() {
            sheet.set_column_width(col, width).map_err(format_error)?;
        }
        for (row, height) in grid.row_heights() {
            sheet.set_row_height(row, height).map_err(format_error)?;
        }

        for range in grid.merges() {
            let format = grid
                .style(range.first_row, range.first_col)
                .map(to_format)
                .unwrap_or_default();
            sheet
                .merge_range(
                    range.first_row,
                    range.first_col,
                    range.last_row,
                    range.last_col,
                    "",
                    &format,
                )
                .map_err(format_error)?;
        }

        for ((row, col), cell) in grid.cells() {
            if grid.is_merged_interior(row, col) {
                continue;
            }
            write_cell(sheet, row, col, cell).map_err(format_error)?;
        }

        if let Some((row, col)) = grid.frozen() {
            sheet.set_freeze_panes(row, col).map_err(format_error)?;
        }

        Ok(workbook)
    }
}

fn write_cell(sheet: &mut Worksheet, row: u32, col: u16, cell: &Cell) -> Result<(), XlsxError> {
    let format = to_format(&cell.style);
    match &cell.value {
        CellValue::Empty => sheet.write_blank(row, col, &format)?,
        CellValue::Number(n) => sheet.write_number_with_format(row, col, *n, &format)?,
        CellValue::Text(s) => sheet.write_string_with_format(row, col, s, &format)?,
    };
    Ok(())
}

/// Convert a cell style into a writer format
pub fn to_format(style: &CellStyle) -> Format {
    let mut format = Format::new().set_font_size(style.font.size);

    if style.font.bold {
        format = format.set_bold();
    }
    if let Some(color) = style.font.color {
        format = format.set_font_color(color);
    }
    if let Some(fill) = style.fill {
        format = format.set_background_color(fill);
    }
    if style.border == Border::Thin {
        format = format
            .set_border(FormatBorder::Thin)
            .set_border_color(BORDER_COLOR);
    }

    format = match style.align.horizontal {
        HAlign::General => format,
        HAlign::Left => format.set_align(FormatAlign::Left),
        HAlign::Center => format.set_align(FormatAlign::Center),
        HAlign::Right => format.set_align(FormatAlign::Right),
    };
    if style.align.vertical == VAlign::Center {
        format = format.set_align(FormatAlign::VerticalCenter);
    }
    if style.align.indent > 0 {
        format = format.set_indent(style.align.indent);
    }
    if style.align.rotation != 0 {
        format = format.set_rotation(style.align.rotation);
    }

    format
}

fn format_error(e: XlsxError) -> RenderError {
    RenderError::Format(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::MergeRange;
    use gridreport_core::{Category, StyleRegistry};

    fn sample() -> Grid {
        let registry = StyleRegistry::default();
        let mut grid = Grid::new("Sample");
        grid.write(0, 0, CellValue::from("Title"), registry.style_for(Category::Title));
        grid.merge(MergeRange::in_row(0, 0, 3)).unwrap();
        grid.write(1, 0, CellValue::from(42), registry.style_for(Category::Data));
        grid.write(1, 1, CellValue::Empty, registry.style_for(Category::Bar));
        grid.set_column_width(0, 20.0);
        grid.set_row_height(0, 25.0);
        grid.freeze_panes(1, 0);
        grid
    }

    #[test]
    fn produces_zip_container() {
        let bytes = XlsxWriter::new().to_bytes(&sample()).unwrap();
        assert!(bytes.len() > 100);
        assert_eq!(&bytes[0..2], b"PK");
    }

    #[test]
    fn saves_to_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.xlsx");
        XlsxWriter::new().save(&sample(), &path).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[0..2], b"PK");
    }

    #[test]
    fn unwritable_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("sample.xlsx");
        let err = XlsxWriter::new().save(&sample(), &path).unwrap_err();
        assert!(matches!(err, RenderError::Io(_)));
    }

    #[test]
    fn invalid_sheet_name_is_a_format_error() {
        let grid = Grid::new("bad[name]");
        let err = XlsxWriter::new().to_bytes(&grid).unwrap_err();
        assert!(matches!(err, RenderError::Format(_)));
    }
}
