//! Resources and logistics document writer
//!
//! Title and subtitle across the full sheet width, one blank row, then the
//! rows of the tabular layout: sections, grand total and summary table.
//! Panes are frozen at A6.

use crate::grid::Grid;
use crate::row::RowRenderer;
use gridreport_core::{
    Category, Field, RenderError, Renderer, ResourceSheet, Row, StyleRegistry, Theme,
};
use gridreport_layout::tabular::{RowKind, TabularLayout};
use tracing::debug;

/// First row of the first section
pub const FIRST_SECTION_ROW: u32 = 3;

/// Everything that goes into the resources sheet
#[derive(Clone, Debug)]
pub struct ResourcesReport {
    pub sheet_name: String,
    pub title: String,
    pub subtitle: String,
    pub column_widths: Vec<f64>,
    pub sheet: ResourceSheet,
}

impl ResourcesReport {
    pub fn new(sheet: ResourceSheet) -> Self {
        Self {
            sheet_name: "Recursos".into(),
            title: String::new(),
            subtitle: String::new(),
            column_widths: vec![35.0, 12.0, 30.0, 18.0, 15.0, 15.0, 18.0],
            sheet,
        }
    }

    pub fn sheet_name(mut self, name: impl Into<String>) -> Self {
        self.sheet_name = name.into();
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = subtitle.into();
        self
    }
}

/// Writes a [`ResourcesReport`] into a grid
#[derive(Clone, Debug)]
pub struct ResourcesWriter {
    pub theme: Theme,
    pub layout: TabularLayout,
}

impl Default for ResourcesWriter {
    fn default() -> Self {
        Self {
            theme: Theme::default().title_size(16.0).subtitle_size(11.0),
            layout: TabularLayout::new(),
        }
    }
}

impl ResourcesWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repair malformed records instead of failing
    pub fn lenient(mut self) -> Self {
        self.layout = TabularLayout::lenient();
        self
    }

    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }
}

impl Renderer for ResourcesWriter {
    type Input = ResourcesReport;
    type Output = Grid;

    fn render(&self, report: &ResourcesReport) -> Result<Grid, RenderError> {
        if report.sheet.sections.is_empty() {
            return Err(RenderError::InvalidData("No sections to render".into()));
        }

        let registry = StyleRegistry::new(self.theme);
        let rows = RowRenderer::new(&registry);
        let laid = self.layout.layout(&report.sheet)?;
        let width = report.sheet.width();

        let mut grid = Grid::new(report.sheet_name.as_str());

        for (col, w) in report.column_widths.iter().enumerate() {
            grid.set_column_width(col as u16, *w);
        }

        let title = Row::new(Category::Title)
            .field(Field::new(report.title.as_str()).span(width))
            .height(30.0);
        rows.render(&mut grid, &title, 0, 0)?;

        let subtitle = Row::new(Category::Subtitle).field(Field::new(report.subtitle.as_str()).span(width));
        rows.render(&mut grid, &subtitle, 1, 0)?;

        let mut row_index = FIRST_SECTION_ROW;
        for laid_row in &laid {
            if laid_row.kind != RowKind::Spacer {
                rows.render(&mut grid, &laid_row.row, row_index, 0)?;
            }
            row_index += 1;
        }

        grid.freeze_panes(5, 0);

        debug!(rows = laid.len(), sections = report.sheet.sections.len(), "resources sheet written");
        Ok(grid)
    }
}
