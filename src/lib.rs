//! Converts a university timetable export into a weekly-grouped editable
//! form and an iCalendar file with per-class reminders.
//!
//! The pipeline: raw rows → [`CourseSession`]s (period codes resolved
//! against the fixed schedule table) → weekly [`SheetRow`] buckets for
//! editing → VEVENT emission and VCALENDAR assembly. Tabular file I/O is
//! the caller's concern; this crate works on in-memory records and bytes.

mod error;
mod structs;

pub mod ics;
pub mod parser;
pub mod schedule;
pub mod sheet;

pub use error::SkipReason;
pub use structs::{CourseSession, PeriodRange, RawRow, SheetRow};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_row_flows_through_to_calendar_bytes() {
        let row = RawRow {
            date: "2024-03-04".into(),
            week: "3".into(),
            periods: "0102".into(),
            course_name: "Algorithms".into(),
            location: "教1-101".into(),
            teacher: "王老师".into(),
            class_name: "计算机2101".into(),
            summary: None,
        };

        let (sessions, skipped) = parser::collect_sessions(&[row]);
        assert!(skipped.is_empty());
        assert_eq!(sessions[0].periods, PeriodRange { start: 1, end: 2 });

        let weeks = sheet::group_by_week(&sessions);
        let rows = &weeks[&3];
        assert_eq!(rows[0].time, "08:30-10:05");

        let opts = ics::CalendarOptions::default();
        let bytes = ics::build_calendar(weeks.values().map(Vec::as_slice), &opts);
        let text = String::from_utf8(bytes).unwrap();

        assert!(text.contains("DTSTART:20240304T083000"));
        assert!(text.contains("DTEND:20240304T100500"));
        assert!(text.contains("SUMMARY:Algorithms"));
        assert!(text.contains("TRIGGER:-PT10M"));
    }
}
