//! # gridreport-core
//!
//! Core report model and traits for the gridreport spreadsheet generator.
//!
//! This crate provides:
//! - Timeline types: `Activity`, `ActivityKind`
//! - Tabular types: `Section`, `ColumnSpec`, `Record`, `ResourceSheet`
//! - Row descriptors consumed by the renderer: `Row`, `Field`, `CellValue`
//! - The category style registry (see [`style`])
//! - Error types and the `Renderer` trait
//!
//! ## Example
//!
//! ```rust
//! use gridreport_core::{Activity, ActivityKind};
//!
//! let design = Activity::new("1.1", "Análisis de requisitos")
//!     .starts_at(0.0)
//!     .lasts(1.0)
//!     .resource("Analista + Cliente")
//!     .kind(ActivityKind::Task);
//! assert!(!design.is_milestone());
//!
//! let gate = Activity::new("H1", "Diseño completado")
//!     .starts_at(3.0)
//!     .kind(ActivityKind::Milestone);
//! assert!(gate.is_milestone());
//! ```

pub mod style;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use style::{Alignment, Border, CellStyle, Category, Font, HAlign, StyleRegistry, Theme, VAlign};

// ============================================================================
// Timeline
// ============================================================================

/// Kind of a timeline activity
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Phase,
    Task,
    #[default]
    Subtask,
    Milestone,
}

impl ActivityKind {
    /// Resolve a textual tag (`phase`/`fase`, `task`/`tarea`, ...).
    /// Anything unrecognized is a subtask.
    pub fn from_tag(tag: &str) -> Self {
        match Category::from_tag(tag) {
            Category::Phase => Self::Phase,
            Category::Task => Self::Task,
            Category::Milestone => Self::Milestone,
            _ => Self::Subtask,
        }
    }

    /// Style category of rows of this kind
    pub fn category(self) -> Category {
        match self {
            Self::Phase => Category::Phase,
            Self::Task => Category::Task,
            Self::Subtask => Category::Subtask,
            Self::Milestone => Category::Milestone,
        }
    }
}

/// One row of the project timeline
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: String,
    pub label: String,
    /// Start offset in weeks from the timeline start
    pub offset_weeks: f64,
    /// Duration in weeks, zero for milestones
    pub duration_weeks: f64,
    /// Free-form resource description
    pub resource: String,
    pub kind: ActivityKind,
}

impl Activity {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            offset_weeks: 0.0,
            duration_weeks: 0.0,
            resource: String::new(),
            kind: ActivityKind::default(),
        }
    }

    pub fn starts_at(mut self, weeks: f64) -> Self {
        self.offset_weeks = weeks;
        self
    }

    pub fn lasts(mut self, weeks: f64) -> Self {
        self.duration_weeks = weeks;
        self
    }

    pub fn resource(mut self, resource: impl Into<String>) -> Self {
        self.resource = resource.into();
        self
    }

    pub fn kind(mut self, kind: ActivityKind) -> Self {
        self.kind = kind;
        self
    }

    /// Zero-duration activity tagged as milestone
    pub fn is_milestone(&self) -> bool {
        self.kind == ActivityKind::Milestone && self.duration_weeks == 0.0
    }

    /// Reject negative or non-finite offsets and durations
    pub fn validate(&self) -> Result<(), LayoutError> {
        let check = |what: &str, value: f64| {
            if value.is_finite() && value >= 0.0 {
                Ok(())
            } else {
                Err(LayoutError::InvalidActivity {
                    id: self.id.clone(),
                    reason: format!("{what} must be a non-negative number, got {value}"),
                })
            }
        };
        check("start offset", self.offset_weeks)?;
        check("duration", self.duration_weeks)
    }
}

// ============================================================================
// Cells & Rows
// ============================================================================

/// Literal value written into a cell
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    #[default]
    Empty,
    Number(f64),
    Text(String),
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for CellValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// One field of a row: a value spanning one or more grid columns
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub value: CellValue,
    /// Number of grid columns the field covers (merged when > 1)
    pub span: u16,
    /// Alignment override on top of the category style
    pub align: Option<Alignment>,
}

impl Field {
    pub fn new(value: impl Into<CellValue>) -> Self {
        Self {
            value: value.into(),
            span: 1,
            align: None,
        }
    }

    pub fn blank() -> Self {
        Self::new(CellValue::Empty)
    }

    pub fn span(mut self, columns: u16) -> Self {
        self.span = columns.max(1);
        self
    }

    pub fn align(mut self, align: Alignment) -> Self {
        self.align = Some(align);
        self
    }
}

/// Row descriptor: a category and the fields written left to right
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub category: Category,
    pub fields: Vec<Field>,
    /// Row height in points
    pub height: Option<f64>,
}

impl Row {
    pub fn new(category: Category) -> Self {
        Self {
            category,
            fields: Vec::new(),
            height: None,
        }
    }

    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn height(mut self, points: f64) -> Self {
        self.height = Some(points);
        self
    }

    /// Total number of grid columns covered by the fields
    pub fn width(&self) -> u16 {
        self.fields.iter().map(|f| f.span).sum()
    }
}

// ============================================================================
// Tabular Sheets
// ============================================================================

/// Column of a section header
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub label: String,
    /// Grid columns covered by this column
    pub span: u16,
    /// Numeric columns are right aligned in data rows
    pub numeric: bool,
}

impl ColumnSpec {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            span: 1,
            numeric: false,
        }
    }

    pub fn span(mut self, columns: u16) -> Self {
        self.span = columns.max(1);
        self
    }

    pub fn numeric(mut self) -> Self {
        self.numeric = true;
        self
    }
}

/// One literal record of a section, one value per column
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub values: Vec<CellValue>,
}

impl Record {
    pub fn new(values: Vec<CellValue>) -> Self {
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Named group of records with its own header row and subtotal
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    pub columns: Vec<ColumnSpec>,
    pub records: Vec<Record>,
    pub subtotal_label: String,
    /// Literal subtotal amount, not summed from the records
    pub subtotal: String,
}

impl Section {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn column(mut self, column: ColumnSpec) -> Self {
        self.columns.push(column);
        self
    }

    pub fn record(mut self, record: Record) -> Self {
        self.records.push(record);
        self
    }

    pub fn subtotal(mut self, label: impl Into<String>, amount: impl Into<String>) -> Self {
        self.subtotal_label = label.into();
        self.subtotal = amount.into();
        self
    }

    /// Grid columns covered by the header
    pub fn width(&self) -> u16 {
        self.columns.iter().map(|c| c.span).sum()
    }
}

/// One row of the closing summary table
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SummaryEntry {
    pub category: String,
    /// Literal amount
    pub amount: String,
    /// Literal share of the total, in percent
    pub percentage: f64,
}

impl SummaryEntry {
    pub fn new(category: impl Into<String>, amount: impl Into<String>, percentage: f64) -> Self {
        Self {
            category: category.into(),
            amount: amount.into(),
            percentage,
        }
    }
}

/// Sections, grand total and summary of a resources report
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceSheet {
    pub sections: Vec<Section>,
    pub total_label: String,
    /// Literal grand total
    pub total: String,
    pub summary_title: String,
    /// Labels of the summary header: category, amount, percentage
    pub summary_headers: [String; 3],
    pub summary: Vec<SummaryEntry>,
}

impl ResourceSheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }

    pub fn total(mut self, label: impl Into<String>, amount: impl Into<String>) -> Self {
        self.total_label = label.into();
        self.total = amount.into();
        self
    }

    pub fn summary_title(mut self, title: impl Into<String>) -> Self {
        self.summary_title = title.into();
        self
    }

    pub fn summary_headers(
        mut self,
        category: impl Into<String>,
        amount: impl Into<String>,
        percentage: impl Into<String>,
    ) -> Self {
        self.summary_headers = [category.into(), amount.into(), percentage.into()];
        self
    }

    pub fn summary_entry(mut self, entry: SummaryEntry) -> Self {
        self.summary.push(entry);
        self
    }

    /// Widest section header, in grid columns
    pub fn width(&self) -> u16 {
        self.sections.iter().map(Section::width).max().unwrap_or(0)
    }
}

// ============================================================================
// Traits
// ============================================================================

/// Turns a report definition into an output artifact
pub trait Renderer {
    type Input;
    type Output;

    fn render(&self, input: &Self::Input) -> Result<Self::Output, RenderError>;
}

// ============================================================================
// Errors
// ============================================================================

/// Malformed report data detected during layout
#[derive(Debug, Error, PartialEq)]
pub enum LayoutError {
    #[error("Invalid activity {id}: {reason}")]
    InvalidActivity { id: String, reason: String },

    #[error(
        "Section '{section}', record {record}: expected {expected} fields, found {found}"
    )]
    ColumnCount {
        section: String,
        record: usize,
        expected: usize,
        found: usize,
    },

    #[error("Summary percentages sum to {sum:.1}%, expected 100%")]
    PercentageSum { sum: f64 },
}

/// Rendering error
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Format error: {0}")]
    Format(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),
}

// ============================================================================
// Tests
// ============================================================================
