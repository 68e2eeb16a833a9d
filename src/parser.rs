use chrono::NaiveDate;
use log::warn;

use crate::schedule::resolve_period_code;
use crate::{CourseSession, RawRow, SkipReason};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Builds the canonical session record from one raw export row.
///
/// A row that fails any required-field parse is dropped, not propagated:
/// the caller collects the reason and keeps going.
pub fn build_session(row: &RawRow) -> Result<CourseSession, SkipReason> {
    let date_str = row.date.trim();
    let date = NaiveDate::parse_from_str(date_str, DATE_FORMAT)
        .map_err(|_| SkipReason::BadDate(date_str.to_string()))?;

    let week_str = row.week.trim();
    let week = week_str
        .parse::<u32>()
        .map_err(|_| SkipReason::BadWeek(week_str.to_string()))?;

    let periods = resolve_period_code(Some(&row.periods));

    Ok(CourseSession {
        date,
        week,
        periods,
        course_name: row.course_name.trim().to_string(),
        location: row.location.trim().to_string(),
        teacher: row.teacher.trim().to_string(),
        class_name: row.class_name.trim().to_string(),
        summary: row
            .summary
            .as_deref()
            .map(str::trim)
            .unwrap_or_default()
            .to_string(),
    })
}

/// Parses a whole export, collecting sessions and `(row_index, reason)`
/// diagnostics for the rows that were skipped. Indices are 0-based into
/// `rows`; one bad row never blocks the rest of the batch.
pub fn collect_sessions(rows: &[RawRow]) -> (Vec<CourseSession>, Vec<(usize, SkipReason)>) {
    let mut sessions = Vec::with_capacity(rows.len());
    let mut skipped = Vec::new();

    for (idx, row) in rows.iter().enumerate() {
        match build_session(row) {
            Ok(session) => sessions.push(session),
            Err(reason) => {
                warn!("skipping row {idx}: {reason}");
                skipped.push((idx, reason));
            }
        }
    }

    (sessions, skipped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PeriodRange;

    fn raw_row() -> RawRow {
        RawRow {
            date: "2024-03-04".into(),
            week: "3".into(),
            periods: "0102".into(),
            course_name: "Algorithms".into(),
            location: "教1-101".into(),
            teacher: "王老师".into(),
            class_name: "计算机2101".into(),
            summary: None,
        }
    }

    #[test]
    fn builds_session_from_raw_row() {
        let session = build_session(&raw_row()).unwrap();
        assert_eq!(session.date, NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
        assert_eq!(session.week, 3);
        assert_eq!(session.periods, PeriodRange { start: 1, end: 2 });
        assert_eq!(session.course_name, "Algorithms");
        assert_eq!(session.summary, "");
    }

    #[test]
    fn bad_date_is_skipped_without_aborting() {
        let mut bad = raw_row();
        bad.date = "03/04/2024".into();

        let (sessions, skipped) = collect_sessions(&[bad, raw_row()]);
        assert_eq!(sessions.len(), 1);
        assert_eq!(skipped.len(), 1);
        assert_eq!(skipped[0].0, 0);
        assert!(matches!(skipped[0].1, SkipReason::BadDate(_)));
    }

    #[test]
    fn bad_week_is_skipped() {
        let mut bad = raw_row();
        bad.week = "three".into();

        let err = build_session(&bad).unwrap_err();
        assert_eq!(err, SkipReason::BadWeek("three".into()));
    }

    #[test]
    fn fields_are_trimmed_and_summary_defaults_empty() {
        let mut row = raw_row();
        row.course_name = "  Algorithms ".into();
        row.summary = Some(" 第一章 ".into());

        let session = build_session(&row).unwrap();
        assert_eq!(session.course_name, "Algorithms");
        assert_eq!(session.summary, "第一章");
    }
}
