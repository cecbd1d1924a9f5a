//! # gridreport-layout
//!
//! Turns report data into pure row descriptors. Nothing in this crate
//! touches a grid or a workbook.
//!
//! This crate provides:
//! - Timeline layout: absolute dates, duration labels, bar weeks and
//!   milestone markers for a list of activities
//! - Tabular layout: sections, subtotals, grand total and summary table
//!   flattened into tagged rows
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use gridreport_core::{Activity, ActivityKind};
//! use gridreport_layout::TimelineLayout;
//!
//! let start = NaiveDate::from_ymd_opt(2024, 9, 1).unwrap();
//! let layout = TimelineLayout::new(start).weeks(16);
//! let gate = Activity::new("H1", "Diseño completado")
//!     .starts_at(3.0)
//!     .kind(ActivityKind::Milestone);
//!
//! let row = layout.place(&gate).unwrap();
//! assert_eq!(row.start, NaiveDate::from_ymd_opt(2024, 9, 22).unwrap());
//! assert_eq!(row.marker, Some(3));
//! ```

pub mod tabular;
pub mod timeline;

pub use tabular::{LaidRow, RowKind, TabularLayout};
pub use timeline::{TimelineLayout, TimelineRow, WeekColumn};
