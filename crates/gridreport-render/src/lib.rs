//! # gridreport-render
//!
//! Rendering backends for gridreport documents.
//!
//! This crate provides:
//! - An in-memory worksheet [`Grid`] owned by the document writers
//! - The [`RowRenderer`], the only component writing cells
//! - Document writers for the Gantt chart and the resources breakdown
//! - XLSX serialization of a finished grid
//!
//! ## Example
//!
//! ```rust,ignore
//! use gridreport_core::Renderer;
//! use gridreport_render::{GanttReport, GanttWriter, XlsxWriter};
//!
//! let report = GanttReport::new(start).title("PROYECTO").activities(activities);
//! let grid = GanttWriter::new().render(&report)?;
//! XlsxWriter::new().save(&grid, "GANTT.xlsx")?;
//! ```

pub mod gantt;
pub mod grid;
pub mod resources;
pub mod row;
pub mod xlsx;

pub use gantt::{GanttReport, GanttWriter, LegendEntry};
pub use grid::{Cell, Grid, MergeRange};
pub use resources::{ResourcesReport, ResourcesWriter};
pub use row::RowRenderer;
pub use xlsx::XlsxWriter;
