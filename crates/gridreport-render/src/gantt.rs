//! Gantt chart document writer
//!
//! Lays out the activities on the timeline and writes the chart sheet:
//!
//! ```text
//! | PROYECTO ACEX - DIAGRAMA DE GANTT (A1:F1)        |
//! | Duración: 16 semanas | ...        (A2:F2)        |
//! | ID | ACTIVIDAD | INICIO | FIN | DURACIÓN | RECURSOS | S1 | S2 | ...
//! |    |           |        |     |          |          |01/09|08/09| ...
//! | 1  | ■ ANÁLISIS| 01/09/24 | 22/09/24 | 3 sem | ... | ██ | ██ | ...
//! | H1 | HITO 1    | 22/09/24 | 22/09/24 | Hito  | ... |    |    | ◆
//!
//! LEYENDA:
//! | ■ | Fase principal
//! | ■ | Tarea
//! | ◆ | Hito del proyecto
//! ```
//!
//! Panes are frozen at G4 so the identity columns and headers stay visible.

use crate::grid::Grid;
use crate::row::RowRenderer;
use chrono::NaiveDate;
use gridreport_core::{
    Activity, ActivityKind, Alignment, Category, CellValue, Field, RenderError, Renderer, Row,
    StyleRegistry, Theme,
};
use gridreport_layout::timeline::{TimelineLayout, TimelineRow, DEFAULT_WEEKS};
use tracing::{debug, warn};

/// First week column (G)
pub const WEEK_COLUMN_OFFSET: u16 = 6;

/// Columns available on a worksheet
pub const MAX_COLUMNS: u32 = 16_384;

/// Row holding the column and week headers
pub const HEADER_ROW: u32 = 2;

/// Row holding the week start dates
pub const WEEK_DATE_ROW: u32 = 3;

/// First activity row
pub const FIRST_ACTIVITY_ROW: u32 = 4;

/// Glyph painted in the milestone week
pub const MILESTONE_GLYPH: &str = "◆";

/// Glyph used for phase and task legend swatches
pub const BLOCK_GLYPH: &str = "■";

/// Legend line: swatch category, glyph and description
#[derive(Clone, Debug, PartialEq)]
pub struct LegendEntry {
    pub category: Category,
    pub glyph: String,
    pub label: String,
}

impl LegendEntry {
    pub fn new(category: Category, glyph: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            category,
            glyph: glyph.into(),
            label: label.into(),
        }
    }
}

/// Everything that goes into the Gantt sheet
#[derive(Clone, Debug)]
pub struct GanttReport {
    pub sheet_name: String,
    pub title: String,
    pub subtitle: String,
    /// Identity column headers (A..F)
    pub headers: Vec<String>,
    /// Widths of the identity columns
    pub column_widths: Vec<f64>,
    /// Width of every week column
    pub week_width: f64,
    pub start: NaiveDate,
    pub weeks: u32,
    pub activities: Vec<Activity>,
    pub legend_title: String,
    pub legend: Vec<LegendEntry>,
}

impl GanttReport {
    pub fn new(start: NaiveDate) -> Self {
        Self {
            sheet_name: "Gantt".into(),
            title: String::new(),
            subtitle: String::new(),
            headers: ["ID", "ACTIVIDAD", "INICIO", "FIN", "DURACIÓN", "RECURSOS"]
                .into_iter()
                .map(String::from)
                .collect(),
            column_widths: vec![8.0, 40.0, 12.0, 12.0, 12.0, 25.0],
            week_width: 3.5,
            start,
            weeks: DEFAULT_WEEKS,
            activities: Vec::new(),
            legend_title: "LEYENDA:".into(),
            legend: vec![
                LegendEntry::new(Category::Phase, BLOCK_GLYPH, "Fase principal"),
                LegendEntry::new(Category::Task, BLOCK_GLYPH, "Tarea"),
                LegendEntry::new(Category::Milestone, MILESTONE_GLYPH, "Hito del proyecto"),
            ],
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

    /// Set number of week columns
    pub fn weeks(mut self, weeks: u32) -> Self {
        self.weeks = weeks;
        self
    }

    pub fn activities(mut self, activities: Vec<Activity>) -> Self {
        self.activities = activities;
        self
    }

    pub fn milestone_count(&self) -> usize {
        self.activities
            .iter()
            .filter(|a| a.kind == ActivityKind::Milestone)
            .count()
    }

    fn identity_width(&self) -> u16 {
        self.headers.len() as u16
    }
}

/// Writes a [`GanttReport`] into a grid
#[derive(Clone, Debug, Default)]
pub struct GanttWriter {
    pub theme: Theme,
}

impl GanttWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    fn write_headers(
        &self,
        grid: &mut Grid,
        rows: &RowRenderer<'_>,
        report: &GanttReport,
        layout: &TimelineLayout,
    ) -> Result<(), RenderError> {
        let span = report.identity_width();

        let title = Row::new(Category::Title)
            .field(Field::new(report.title.as_str()).span(span))
            .height(25.0);
        rows.render(grid, &title, 0, 0)?;

        let subtitle = Row::new(Category::Subtitle).field(Field::new(report.subtitle.as_str()).span(span));
        rows.render(grid, &subtitle, 1, 0)?;

        let headers = report
            .headers
            .iter()
            .fold(Row::new(Category::Header), |row, h| row.field(Field::new(h.as_str())));
        rows.render(grid, &headers, HEADER_ROW, 0)?;

        let weeks = layout.week_columns();
        let labels = weeks
            .iter()
            .fold(Row::new(Category::WeekHeader), |row, w| row.field(Field::new(w.label.as_str())));
        rows.render(grid, &labels, HEADER_ROW, WEEK_COLUMN_OFFSET)?;

        let dates = weeks.iter().fold(Row::new(Category::WeekDate), |row, w| {
            row.field(Field::new(w.date.format("%d/%m").to_string()))
        });
        rows.render(grid, &dates, WEEK_DATE_ROW, WEEK_COLUMN_OFFSET)?;

        for (col, width) in report.column_widths.iter().enumerate() {
            grid.set_column_width(col as u16, *width);
        }
        for week in 0..layout.weeks {
            grid.set_column_width(week_column(week)?, report.week_width);
        }

        Ok(())
    }

    fn write_activity(
        &self,
        grid: &mut Grid,
        rows: &RowRenderer<'_>,
        placed: &TimelineRow,
        row_index: u32,
    ) -> Result<(), RenderError> {
        rows.render(grid, &activity_row(placed), row_index, 0)?;

        if let (Some(&first), Some(&last)) = (placed.bar.first(), placed.bar.last()) {
            let bar = (first..=last).fold(Row::new(Category::Bar), |row, _| row.field(Field::blank()));
            rows.render(grid, &bar, row_index, week_column(first)?)?;
        }

        if let Some(week) = placed.marker {
            let marker = Row::new(Category::MilestoneMarker).field(Field::new(MILESTONE_GLYPH));
            rows.render(grid, &marker, row_index, week_column(week)?)?;
        }

        if placed.clipped {
            warn!(id = %placed.id, "activity extends past the last week column, clipped");
        }

        Ok(())
    }

    fn write_legend(
        &self,
        grid: &mut Grid,
        rows: &RowRenderer<'_>,
        registry: &StyleRegistry,
        report: &GanttReport,
        first_row: u32,
    ) -> Result<(), RenderError> {
        let title = Row::new(Category::LegendTitle).field(Field::new(report.legend_title.as_str()));
        rows.render(grid, &title, first_row, 0)?;

        for (i, entry) in report.legend.iter().enumerate() {
            let row_index = first_row + 1 + i as u32;
            let swatch = Row::new(entry.category).field(Field::new(entry.glyph.as_str()));
            rows.render_with(grid, &swatch, row_index, 0, registry.swatch(entry.category))?;

            let label = Row::new(Category::Plain).field(Field::new(entry.label.as_str()));
            rows.render(grid, &label, row_index, 1)?;
        }

        Ok(())
    }
}

impl Renderer for GanttWriter {
    type Input = GanttReport;
    type Output = Grid;

    fn render(&self, report: &GanttReport) -> Result<Grid, RenderError> {
        if report.activities.is_empty() {
            return Err(RenderError::InvalidData("No activities to render".into()));
        }
        if report.weeks > MAX_COLUMNS - u32::from(WEEK_COLUMN_OFFSET) {
            return Err(RenderError::InvalidData(format!(
                "{} week columns do not fit in {MAX_COLUMNS} sheet columns",
                report.weeks
            )));
        }

        let registry = StyleRegistry::new(self.theme);
        let rows = RowRenderer::new(&registry);
        let layout = TimelineLayout::new(report.start).weeks(report.weeks);
        let placed = layout.layout(&report.activities)?;

        let mut grid = Grid::new(report.sheet_name.as_str());
        self.write_headers(&mut grid, &rows, report, &layout)?;

        let mut row_index = FIRST_ACTIVITY_ROW;
        for activity in &placed {
            self.write_activity(&mut grid, &rows, activity, row_index)?;
            row_index += 1;
        }

        self.write_legend(&mut grid, &rows, &registry, report, row_index + 2)?;

        grid.freeze_panes(WEEK_DATE_ROW, WEEK_COLUMN_OFFSET);

        debug!(
            activities = placed.len(),
            rows = grid.row_count(),
            "gantt sheet written"
        );
        Ok(grid)
    }
}

/// Grid column of a week
fn week_column(week: u32) -> Result<u16, RenderError> {
    u16::try_from(week)
        .ok()
        .and_then(|w| WEEK_COLUMN_OFFSET.checked_add(w))
        .ok_or_else(|| RenderError::InvalidData(format!("Week {week} has no sheet column")))
}

/// Identity columns of an activity row
fn activity_row(placed: &TimelineRow) -> Row {
    let indent = u8::from(matches!(placed.kind, ActivityKind::Task | ActivityKind::Subtask));

    Row::new(placed.kind.category())
        .field(Field::new(placed.id.as_str()))
        .field(Field::new(placed.label.as_str()).align(Alignment::left().indent(indent)))
        .field(Field::new(date_cell(placed.start)))
        .field(Field::new(date_cell(placed.end)))
        .field(Field::new(placed.duration_label.as_str()))
        .field(Field::new(placed.resource.as_str()))
}

fn date_cell(date: NaiveDate) -> CellValue {
    CellValue::Text(date.format("%d/%m/%y").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn report() -> GanttReport {
        GanttReport::new(date(2024, 9, 1))
            .sheet_name("Diagrama de Gantt")
            .title("PROYECTO - DIAGRAMA DE GANTT")
            .subtitle("Duración: 16 semanas")
            .activities(vec![
                Activity::new("1", "■ ANÁLISIS Y DISEÑO")
                    .lasts(3.0)
                    .resource("Analista/Arquitecto")
                    .kind(ActivityKind::Phase),
                Activity::new("1.1", "Análisis de requisitos")
                    .lasts(1.0)
                    .resource("Analista + Cliente")
                    .kind(ActivityKind::Task),
                Activity::new("H1", "HITO 1: Diseño Completado")
                    .starts_at(3.0)
                    .resource("22/09/2024")
                    .kind(ActivityKind::Milestone),
            ])
    }

    fn grid() -> Grid {
        GanttWriter::new().render(&report()).unwrap()
    }

    #[test]
    fn headers_and_week_columns() {
        let grid = grid();
        assert_eq!(grid.value(HEADER_ROW, 0), Some(&CellValue::from("ID")));
        assert_eq!(grid.value(HEADER_ROW, 5), Some(&CellValue::from("RECURSOS")));
        assert_eq!(grid.value(HEADER_ROW, 6), Some(&CellValue::from("S1")));
        assert_eq!(grid.value(HEADER_ROW, 21), Some(&CellValue::from("S16")));
        assert_eq!(grid.value(WEEK_DATE_ROW, 7), Some(&CellValue::from("08/09")));
        assert_eq!(grid.style(HEADER_ROW, 6).unwrap().align.rotation, 90);
        assert_eq!(grid.column_width(1), Some(40.0));
        assert_eq!(grid.column_width(21), Some(3.5));
    }

    #[test]
    fn title_rows_are_merged() {
        let grid = grid();
        let refs: Vec<String> = grid.merges().iter().map(|m| m.a1()).collect();
        assert_eq!(refs, vec!["A1:F1", "A2:F2"]);
        assert_eq!(grid.row_height(0), Some(25.0));
    }

    #[test]
    fn activity_fields_and_dates() {
        let grid = grid();
        let row = FIRST_ACTIVITY_ROW;
        assert_eq!(grid.value(row, 2), Some(&CellValue::from("01/09/24")));
        assert_eq!(grid.value(row, 3), Some(&CellValue::from("22/09/24")));
        assert_eq!(grid.value(row, 4), Some(&CellValue::from("3 sem")));
    }

    #[test]
    fn task_label_is_indented() {
        let grid = grid();
        let label = grid.style(FIRST_ACTIVITY_ROW + 1, 1).unwrap();
        assert_eq!(label.align, Alignment::left().indent(1));
        let phase_label = grid.style(FIRST_ACTIVITY_ROW, 1).unwrap();
        assert_eq!(phase_label.align, Alignment::left());
    }

    #[test]
    fn bars_are_painted() {
        let grid = grid();
        let registry = StyleRegistry::default();
        // Phase: weeks 0..=12
        for week in 0..=12 {
            let style = grid.style(FIRST_ACTIVITY_ROW, WEEK_COLUMN_OFFSET + week).unwrap();
            assert_eq!(style, &registry.style_for(Category::Bar));
        }
        assert!(grid.cell(FIRST_ACTIVITY_ROW, WEEK_COLUMN_OFFSET + 13).is_none());
    }

    #[test]
    fn milestone_marker_in_its_week() {
        let grid = grid();
        let row = FIRST_ACTIVITY_ROW + 2;
        assert_eq!(
            grid.value(row, WEEK_COLUMN_OFFSET + 3),
            Some(&CellValue::from(MILESTONE_GLYPH))
        );
        assert_eq!(grid.value(row, 4), Some(&CellValue::from("Hito")));
        let painted = grid.row(row).filter(|(c, _)| *c >= WEEK_COLUMN_OFFSET).count();
        assert_eq!(painted, 1);
    }

    #[test]
    fn legend_follows_activities() {
        let grid = grid();
        let legend = FIRST_ACTIVITY_ROW + 3 + 2;
        assert_eq!(grid.value(legend, 0), Some(&CellValue::from("LEYENDA:")));
        assert_eq!(grid.value(legend + 3, 0), Some(&CellValue::from("◆")));
        assert_eq!(grid.value(legend + 3, 1), Some(&CellValue::from("Hito del proyecto")));
        assert_eq!(grid.style(legend + 1, 0).unwrap().fill, Some(0x1565C0));
    }

    #[test]
    fn panes_frozen_below_week_dates() {
        assert_eq!(grid().frozen(), Some((3, 6)));
    }

    #[test]
    fn empty_report_fails() {
        let report = GanttReport::new(date(2024, 9, 1));
        assert!(GanttWriter::new().render(&report).is_err());
    }

    #[test]
    fn week_count_is_bounded_by_sheet_columns() {
        let err = GanttWriter::new().render(&report().weeks(70_000)).unwrap_err();
        assert!(matches!(err, RenderError::InvalidData(_)));

        let widest = MAX_COLUMNS - u32::from(WEEK_COLUMN_OFFSET);
        assert!(GanttWriter::new().render(&report().weeks(widest + 1)).is_err());
        let grid = GanttWriter::new().render(&report().weeks(widest)).unwrap();
        assert_eq!(grid.column_width(16_383), Some(3.5));
    }

    #[test]
    fn counts_milestones() {
        assert_eq!(report().milestone_count(), 1);
    }
}
