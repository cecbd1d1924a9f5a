//! Row renderer: writes row descriptors into a grid

use crate::grid::{Grid, MergeRange};
use gridreport_core::{Category, CellStyle, RenderError, Row, StyleRegistry};

/// Writes [`Row`]s into a [`Grid`] using a [`StyleRegistry`]
#[derive(Clone, Copy, Debug)]
pub struct RowRenderer<'a> {
    registry: &'a StyleRegistry,
}

impl<'a> RowRenderer<'a> {
    pub fn new(registry: &'a StyleRegistry) -> Self {
        Self { registry }
    }

    /// Style applied to every cell of a row of `category`.
    ///
    /// Task rows keep the task font on the light background fill.
    pub fn style(&self, category: Category) -> CellStyle {
        let mut style = self.registry.style_for(category);
        if category == Category::Task {
            style.fill = Some(self.registry.background());
        }
        style
    }

    /// Write `row` at `row_index` starting at `column_start`.
    ///
    /// Returns the first column after the row.
    pub fn render(
        &self,
        grid: &mut Grid,
        row: &Row,
        row_index: u32,
        column_start: u16,
    ) -> Result<u16, RenderError> {
        self.render_with(grid, row, row_index, column_start, self.style(row.category))
    }

    /// Same as [`RowRenderer::render`] with an explicit base style
    pub fn render_with(
        &self,
        grid: &mut Grid,
        row: &Row,
        row_index: u32,
        column_start: u16,
        base: CellStyle,
    ) -> Result<u16, RenderError> {
        let mut col = column_start;

        for field in &row.fields {
            let mut style = base;
            if let Some(align) = field.align {
                style.align = align;
            }

            grid.write(row_index, col, field.value.clone(), style);

            let last = col
                .checked_add(field.span.max(1) - 1)
                .ok_or_else(|| RenderError::InvalidData(format!("Row {row_index} runs past the last column")))?;
            if last > col {
                grid.merge(MergeRange::in_row(row_index, col, last))?;
            }
            col = last.saturating_add(1);
        }

        if let Some(height) = row.height {
            grid.set_row_height(row_index, height);
        }

        Ok(col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridreport_core::{Alignment, CellValue, Field};
    use pretty_assertions::assert_eq;

    #[test]
    fn fields_fill_successive_columns() {
        let registry = StyleRegistry::default();
        let renderer = RowRenderer::new(&registry);
        let mut grid = Grid::new("Sheet");

        let row = Row::new(Category::Phase)
            .field(Field::new("1"))
            .field(Field::new("ANÁLISIS"))
            .field(Field::new(3));
        let next = renderer.render(&mut grid, &row, 4, 0).unwrap();

        assert_eq!(next, 3);
        assert_eq!(grid.value(4, 1), Some(&CellValue::from("ANÁLISIS")));
        assert_eq!(grid.style(4, 2), Some(&registry.style_for(Category::Phase)));
    }

    #[test]
    fn task_rows_use_background_fill_and_task_font() {
        let registry = StyleRegistry::default();
        let renderer = RowRenderer::new(&registry);
        let mut grid = Grid::new("Sheet");

        renderer
            .render(&mut grid, &Row::new(Category::Task).field(Field::new("1.1")), 0, 0)
            .unwrap();

        let style = grid.style(0, 0).unwrap();
        assert_eq!(style.fill, Some(registry.background()));
        assert_eq!(style.font, registry.style_for(Category::Task).font);
    }

    #[test]
    fn spans_are_merged() {
        let registry = StyleRegistry::default();
        let renderer = RowRenderer::new(&registry);
        let mut grid = Grid::new("Sheet");

        let row = Row::new(Category::Subtotal)
            .field(Field::new("SUBTOTAL").span(6))
            .field(Field::new("74.400 €"));
        let next = renderer.render(&mut grid, &row, 9, 0).unwrap();

        assert_eq!(next, 7);
        assert_eq!(grid.merges(), &[MergeRange::in_row(9, 0, 5)]);
        assert_eq!(grid.value(9, 6), Some(&CellValue::from("74.400 €")));
        assert!(grid.cell(9, 3).is_none());
    }

    #[test]
    fn alignment_override_applies_per_field() {
        let registry = StyleRegistry::default();
        let renderer = RowRenderer::new(&registry);
        let mut grid = Grid::new("Sheet");

        let row = Row::new(Category::Data)
            .field(Field::new("Portátil"))
            .field(Field::new("1.200 €").align(Alignment::right()));
        renderer.render(&mut grid, &row, 0, 0).unwrap();

        assert_eq!(grid.style(0, 0).unwrap().align, Alignment::left());
        assert_eq!(grid.style(0, 1).unwrap().align, Alignment::right());
    }

    #[test]
    fn rendering_twice_is_idempotent() {
        let registry = StyleRegistry::default();
        let renderer = RowRenderer::new(&registry);
        let mut grid = Grid::new("Sheet");

        let row = Row::new(Category::Section)
            .field(Field::new("7.3.2 HARDWARE").span(7))
            .height(25.0);
        renderer.render(&mut grid, &row, 3, 0).unwrap();
        let first: Vec<_> = grid.cells().map(|(p, c)| (p, c.clone())).collect();
        renderer.render(&mut grid, &row, 3, 0).unwrap();
        let second: Vec<_> = grid.cells().map(|(p, c)| (p, c.clone())).collect();

        assert_eq!(first, second);
        assert_eq!(grid.merges().len(), 1);
        assert_eq!(grid.row_height(3), Some(25.0));
    }

    #[test]
    fn row_height_is_applied() {
        let registry = StyleRegistry::default();
        let renderer = RowRenderer::new(&registry);
        let mut grid = Grid::new("Sheet");
        renderer
            .render(&mut grid, &Row::new(Category::Title).field(Field::new("T")).height(30.0), 0, 0)
            .unwrap();
        assert_eq!(grid.row_height(0), Some(30.0));
    }
}
