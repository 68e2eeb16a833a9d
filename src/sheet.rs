use std::collections::BTreeMap;

use chrono::Datelike;

use crate::schedule::PeriodTimeTable;
use crate::{CourseSession, SheetRow};

/// Sheet name for one academic week in the editable spreadsheet.
pub fn sheet_name(week: u32) -> String {
    format!("第{week}周")
}

impl SheetRow {
    pub fn from_session(session: &CourseSession) -> SheetRow {
        let table = PeriodTimeTable::get();

        SheetRow {
            date: session.date.format("%Y-%m-%d").to_string(),
            weekday: format!("星期{}", session.date.weekday().number_from_monday()),
            time: table.time_range(session.periods),
            course_name: session.course_name.clone(),
            classroom: session.location.clone(),
            teacher: session.teacher.clone(),
            class_name: session.class_name.clone(),
            content: session.summary.clone(),
            periods: format!("{}-{}", session.periods.start, session.periods.end),
        }
    }
}

/// Buckets sessions by week number and orders each bucket by date then time.
/// Both columns are zero-padded fixed-width, so the lexicographic sort is
/// chronological. Weeks come out in ascending numeric order.
pub fn group_by_week(sessions: &[CourseSession]) -> BTreeMap<u32, Vec<SheetRow>> {
    let mut weeks: BTreeMap<u32, Vec<SheetRow>> = BTreeMap::new();

    for session in sessions {
        weeks
            .entry(session.week)
            .or_default()
            .push(SheetRow::from_session(session));
    }

    for rows in weeks.values_mut() {
        rows.sort_by(|a, b| (&a.date, &a.time).cmp(&(&b.date, &b.time)));
    }

    weeks
}
