//! Tabular layout: sections to a flat, tagged row sequence
//!
//! Each section becomes a section header, a column header, one data row
//! per record, a subtotal and a single blank spacer. The sheet then closes
//! with the grand total, two spacers and the percentage summary table.
//!
//! Subtotals, the total and the summary percentages are literals carried
//! by the sheet; nothing is summed here.

use gridreport_core::{
    Alignment, Category, CellValue, Field, LayoutError, ResourceSheet, Row, Section,
};
use serde::Serialize;
use tracing::{debug, warn};

/// Height of section header rows, in points
pub const SECTION_HEIGHT: f64 = 25.0;

/// Height of the grand total row, in points
pub const TOTAL_HEIGHT: f64 = 30.0;

/// Allowed drift of the summary percentages from 100
pub const PERCENTAGE_TOLERANCE: f64 = 0.05;

/// Role of a laid-out row
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RowKind {
    SectionHeader,
    ColumnHeader,
    Data,
    Subtotal,
    Spacer,
    GrandTotal,
    SummaryTitle,
    SummaryHeader,
    SummaryData,
}

/// A row descriptor tagged with its role in the sheet
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LaidRow {
    pub kind: RowKind,
    pub row: Row,
}

impl LaidRow {
    fn new(kind: RowKind, row: Row) -> Self {
        Self { kind, row }
    }

    fn spacer() -> Self {
        Self::new(RowKind::Spacer, Row::new(Category::Plain))
    }
}

/// Lays out a [`ResourceSheet`]
#[derive(Clone, Debug)]
pub struct TabularLayout {
    /// Reject malformed records and percentage sums instead of repairing them
    pub strict: bool,
}

impl Default for TabularLayout {
    fn default() -> Self {
        Self { strict: true }
    }
}

impl TabularLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pad short records, truncate long ones and skip the percentage check
    pub fn lenient() -> Self {
        Self { strict: false }
    }

    /// Lay out the whole sheet
    pub fn layout(&self, sheet: &ResourceSheet) -> Result<Vec<LaidRow>, LayoutError> {
        let width = sheet.width();
        let mut rows = Vec::new();

        for section in &sheet.sections {
            rows.extend(self.layout_section(section, width)?);
        }

        rows.push(LaidRow::new(
            RowKind::GrandTotal,
            closing_row(Category::Total, &sheet.total_label, &sheet.total, width)
                .height(TOTAL_HEIGHT),
        ));
        rows.push(LaidRow::spacer());
        rows.push(LaidRow::spacer());

        rows.extend(self.layout_summary(sheet, width)?);

        debug!(rows = rows.len(), sections = sheet.sections.len(), "laid out sheet");
        Ok(rows)
    }

    /// Rows of one section, ending with its spacer
    pub fn layout_section(&self, section: &Section, width: u16) -> Result<Vec<LaidRow>, LayoutError> {
        let mut rows = Vec::with_capacity(section.records.len() + 4);

        rows.push(LaidRow::new(
            RowKind::SectionHeader,
            Row::new(Category::Section)
                .field(
                    Field::new(section.title.as_str())
                        .span(width)
                        .align(Alignment::left()),
                )
                .height(SECTION_HEIGHT),
        ));

        let mut header = Row::new(Category::Header);
        for (i, column) in section.columns.iter().enumerate() {
            let mut field = Field::new(column.label.as_str()).span(column.span);
            if i == 0 {
                field = field.align(Alignment::left());
            }
            header = header.field(field);
        }
        rows.push(LaidRow::new(RowKind::ColumnHeader, header));

        let expected = section.columns.len();
        for (index, record) in section.records.iter().enumerate() {
            if record.len() != expected {
                if self.strict {
                    return Err(LayoutError::ColumnCount {
                        section: section.title.clone(),
                        record: index,
                        expected,
                        found: record.len(),
                    });
                }
                warn!(
                    section = %section.title,
                    record = index,
                    expected,
                    found = record.len(),
                    "record does not match header, padding or truncating"
                );
            }

            let mut row = Row::new(Category::Data);
            for (i, column) in section.columns.iter().enumerate() {
                let value = record.values.get(i).cloned().unwrap_or(CellValue::Empty);
                let align = if column.numeric {
                    Alignment::right()
                } else {
                    Alignment::left()
                };
                row = row.field(Field::new(value).span(column.span).align(align));
            }
            rows.push(LaidRow::new(RowKind::Data, row));
        }

        rows.push(LaidRow::new(
            RowKind::Subtotal,
            closing_row(
                Category::Subtotal,
                &section.subtotal_label,
                &section.subtotal,
                width,
            ),
        ));
        rows.push(LaidRow::spacer());

        Ok(rows)
    }

    fn layout_summary(&self, sheet: &ResourceSheet, width: u16) -> Result<Vec<LaidRow>, LayoutError> {
        if self.strict && !sheet.summary.is_empty() {
            let sum: f64 = sheet.summary.iter().map(|e| e.percentage).sum();
            if (sum - 100.0).abs() > PERCENTAGE_TOLERANCE {
                return Err(LayoutError::PercentageSum { sum });
            }
        }

        let rest = width.saturating_sub(2);
        let [category, amount, percentage] = &sheet.summary_headers;

        let mut rows = vec![
            LaidRow::new(
                RowKind::SummaryTitle,
                Row::new(Category::SummaryTitle).field(
                    Field::new(sheet.summary_title.as_str())
                        .span(width)
                        .align(Alignment::left()),
                ),
            ),
            LaidRow::new(
                RowKind::SummaryHeader,
                Row::new(Category::Header)
                    .field(Field::new(category.as_str()).align(Alignment::left()))
                    .field(Field::new(amount.as_str()))
                    .field(Field::new(percentage.as_str()).span(rest)),
            ),
        ];

        for entry in &sheet.summary {
            rows.push(LaidRow::new(
                RowKind::SummaryData,
                Row::new(Category::Data)
                    .field(Field::new(entry.category.as_str()))
                    .field(Field::new(entry.amount.as_str()))
                    .field(Field::new(format!("{:.1}%", entry.percentage)).span(rest)),
            ));
        }

        Ok(rows)
    }
}

/// Label across all but the last column, amount in the last one
fn closing_row(category: Category, label: &str, amount: &str, width: u16) -> Row {
    Row::new(category)
        .field(
            Field::new(label)
                .span(width.saturating_sub(1))
                .align(Alignment::left()),
        )
        .field(Field::new(amount))
}
