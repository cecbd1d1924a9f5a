//! Timeline layout: week offsets to dates, labels and bar cells
//!
//! Activities are placed in table order. No sorting, no dependency
//! resolution and no overlap detection happen here.
//!
//! Bars use the `offset + duration * 4` upper bound of the ACEX charts, so
//! a one-week task starting at week 0 paints weeks 0 through 4. Weeks at or
//! beyond the timeline length are dropped and the row is flagged as
//! `clipped`; that is never an error.

use chrono::{NaiveDate, TimeDelta};
use gridreport_core::{Activity, ActivityKind, LayoutError};
use serde::Serialize;
use tracing::debug;

/// Weeks shown when no explicit count is configured
pub const DEFAULT_WEEKS: u32 = 16;

/// Label used for zero-duration activities
pub const MILESTONE_LABEL: &str = "Hito";

/// Week header column
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct WeekColumn {
    /// Zero-based week number
    pub week: u32,
    /// `S1`, `S2`, ...
    pub label: String,
    /// First day of the week
    pub date: NaiveDate,
}

/// An activity placed on the timeline
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TimelineRow {
    pub id: String,
    pub label: String,
    pub resource: String,
    pub kind: ActivityKind,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub duration_label: String,
    /// Week indices painted as the activity bar
    pub bar: Vec<u32>,
    /// Week index holding the milestone glyph
    pub marker: Option<u32>,
    /// Some bar week or the marker fell outside the timeline
    pub clipped: bool,
}

/// Places activities on a fixed number of weeks from a start date
#[derive(Clone, Debug)]
pub struct TimelineLayout {
    pub start: NaiveDate,
    pub weeks: u32,
}

impl TimelineLayout {
    pub fn new(start: NaiveDate) -> Self {
        Self {
            start,
            weeks: DEFAULT_WEEKS,
        }
    }

    /// Set the number of week columns
    pub fn weeks(mut self, weeks: u32) -> Self {
        self.weeks = weeks;
        self
    }

    /// Header columns, one per week. Stops at the last representable date.
    pub fn week_columns(&self) -> Vec<WeekColumn> {
        (0..self.weeks)
            .map_while(|week| {
                add_weeks(self.start, f64::from(week)).map(|date| WeekColumn {
                    week,
                    label: format!("S{}", week + 1),
                    date,
                })
            })
            .collect()
    }

    /// Place every activity, in table order
    pub fn layout(&self, activities: &[Activity]) -> Result<Vec<TimelineRow>, LayoutError> {
        activities.iter().map(|a| self.place(a)).collect()
    }

    /// Place a single activity
    pub fn place(&self, activity: &Activity) -> Result<TimelineRow, LayoutError> {
        activity.validate()?;

        let offset = activity.offset_weeks;
        let duration = activity.duration_weeks;

        let out_of_range = || LayoutError::InvalidActivity {
            id: activity.id.clone(),
            reason: format!("dates beyond {} are not representable", NaiveDate::MAX),
        };
        let start = add_weeks(self.start, offset).ok_or_else(out_of_range)?;
        let end = if duration > 0.0 {
            add_weeks(self.start, offset + duration).ok_or_else(out_of_range)?
        } else {
            start
        };

        let mut clipped = false;
        let mut bar = Vec::new();
        let mut marker = None;

        if duration > 0.0 {
            (bar, clipped) = bar_weeks(offset, duration, self.weeks);
        } else if activity.kind == ActivityKind::Milestone {
            let week = offset.floor() as u32;
            if week < self.weeks {
                marker = Some(week);
            } else {
                clipped = true;
            }
        }

        debug!(
            id = %activity.id,
            %start,
            %end,
            bar_cells = bar.len(),
            clipped,
            "placed activity"
        );

        Ok(TimelineRow {
            id: activity.id.clone(),
            label: activity.label.clone(),
            resource: activity.resource.clone(),
            kind: activity.kind,
            start,
            end,
            duration_label: duration_label(duration),
            bar,
            marker,
            clipped,
        })
    }
}

/// Date `weeks` weeks after `date`; a fractional day is dropped.
/// `None` past the calendar range.
pub fn add_weeks(date: NaiveDate, weeks: f64) -> Option<NaiveDate> {
    let days = (weeks * 7.0).floor() as i64;
    date.checked_add_signed(TimeDelta::try_days(days)?)
}

/// `"3 sem"`, `"3 días"` for sub-week durations, `"Hito"` for zero
pub fn duration_label(duration_weeks: f64) -> String {
    if duration_weeks == 0.0 {
        MILESTONE_LABEL.to_string()
    } else if duration_weeks >= 1.0 {
        format!("{duration_weeks} sem")
    } else {
        format!("{} días", (duration_weeks * 7.0).trunc() as u32)
    }
}

/// Bar weeks `floor(offset)..=floor(offset + duration * 4)` below `weeks`,
/// and whether any week was dropped
pub fn bar_weeks(offset: f64, duration: f64, weeks: u32) -> (Vec<u32>, bool) {
    let first = offset.floor();
    let last = (offset + duration * 4.0).floor();
    let end = last.min(f64::from(weeks) - 1.0);

    let inside = if first <= end {
        (first as u32..=end as u32).collect()
    } else {
        Vec::new()
    };
    (inside, last >= f64::from(weeks))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn layout() -> TimelineLayout {
        TimelineLayout::new(date(2024, 9, 1))
    }

    #[test]
    fn end_date_adds_offset_and_duration() {
        let row = layout()
            .place(&Activity::new("2", "Backend").starts_at(2.0).lasts(5.0))
            .unwrap();
        assert_eq!(row.start, date(2024, 9, 15));
        assert_eq!(row.end, date(2024, 10, 20));
        assert_eq!(row.duration_label, "5 sem");
    }

    #[test]
    fn milestone_scenario() {
        let gate = Activity::new("H1", "HITO 1: Diseño Completado")
            .starts_at(3.0)
            .kind(ActivityKind::Milestone);
        let row = layout().place(&gate).unwrap();

        assert_eq!(row.start, date(2024, 9, 22));
        assert_eq!(row.end, row.start);
        assert_eq!(row.duration_label, "Hito");
        assert_eq!(row.marker, Some(3));
        assert!(row.bar.is_empty());
        assert!(!row.clipped);
    }

    #[test]
    fn one_week_bar_spans_five_weeks() {
        let row = layout()
            .place(&Activity::new("1.1", "Requisitos").lasts(1.0).kind(ActivityKind::Task))
            .unwrap();
        assert_eq!(row.bar, vec![0, 1, 2, 3, 4]);
        assert_eq!(row.marker, None);
    }

    #[test]
    fn bar_is_clipped_at_week_count() {
        let row = layout()
            .place(&Activity::new("6.3", "Entrega").starts_at(14.0).lasts(1.0))
            .unwrap();
        assert_eq!(row.bar, vec![14, 15]);
        assert!(row.clipped);
    }

    #[test]
    fn milestone_out_of_range_has_no_marker() {
        let gate = Activity::new("late", "Late gate")
            .starts_at(20.0)
            .kind(ActivityKind::Milestone);
        let row = layout().place(&gate).unwrap();
        assert_eq!(row.marker, None);
        assert!(row.bar.is_empty());
        assert!(row.clipped);
    }

    #[test]
    fn zero_duration_non_milestone_paints_nothing() {
        let row = layout()
            .place(&Activity::new("x", "Empty").starts_at(2.0).kind(ActivityKind::Task))
            .unwrap();
        assert!(row.bar.is_empty());
        assert_eq!(row.marker, None);
        assert_eq!(row.duration_label, "Hito");
    }

    #[test]
    fn half_week_is_labelled_in_days() {
        let row = layout()
            .place(&Activity::new("5.2", "Compilación").starts_at(12.0).lasts(0.5))
            .unwrap();
        assert_eq!(row.duration_label, "3 días");
        assert_eq!(row.start, date(2024, 11, 24));
        assert_eq!(row.end, date(2024, 11, 27));
        assert_eq!(row.bar, vec![12, 13, 14]);
    }

    #[test]
    fn fractional_week_label_keeps_decimals() {
        assert_eq!(duration_label(1.5), "1.5 sem");
        assert_eq!(duration_label(2.0), "2 sem");
    }

    #[test]
    fn week_columns_are_contiguous() {
        let columns = layout().weeks(4).week_columns();
        let labels: Vec<_> = columns.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, ["S1", "S2", "S3", "S4"]);
        assert_eq!(columns[1].date, date(2024, 9, 8));
        assert_eq!(columns[3].week, 3);
    }

    #[test]
    fn rows_keep_table_order() {
        let activities = vec![
            Activity::new("b", "Second").starts_at(5.0).lasts(1.0),
            Activity::new("a", "First").lasts(1.0),
        ];
        let rows = layout().layout(&activities).unwrap();
        let ids: Vec<_> = rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["b", "a"]);
    }

    #[test]
    fn bar_stops_at_last_week_for_huge_durations() {
        let (bar, clipped) = bar_weeks(0.0, 2.0e9, 16);
        assert_eq!(bar, (0..16).collect::<Vec<u32>>());
        assert!(clipped);
    }

    #[test]
    fn bar_past_the_timeline_is_empty() {
        let (bar, clipped) = bar_weeks(20.0, 1.0, 16);
        assert!(bar.is_empty());
        assert!(clipped);
    }

    #[test]
    fn unrepresentable_dates_are_rejected() {
        let far = Activity::new("far", "Far")
            .starts_at(1.0e8)
            .kind(ActivityKind::Milestone);
        assert!(matches!(
            layout().place(&far),
            Err(LayoutError::InvalidActivity { ref id, .. }) if id == "far"
        ));

        let long = Activity::new("long", "Long").lasts(1.0e12);
        assert!(layout().place(&long).is_err());
        assert_eq!(add_weeks(date(2024, 9, 1), 1.0e8), None);
    }

    #[test]
    fn invalid_activity_fails_layout() {
        let activities = vec![Activity::new("bad", "Bad").starts_at(-1.0)];
        assert!(matches!(
            layout().layout(&activities),
            Err(LayoutError::InvalidActivity { .. })
        ));
    }
}
