use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An inclusive run of teaching periods within one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodRange {
    pub start: u32,
    pub end: u32,
}

impl PeriodRange {
    pub const DEFAULT: PeriodRange = PeriodRange { start: 1, end: 1 };
}

impl Default for PeriodRange {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// One row of the raw tabular export, field names matching the exported
/// column headers so external readers can deserialize rows directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRow {
    #[serde(rename = "排课日期")]
    pub date: String,
    #[serde(rename = "周次")]
    pub week: String,
    #[serde(rename = "节次")]
    pub periods: String,
    #[serde(rename = "课程名称")]
    pub course_name: String,
    #[serde(rename = "上课地点")]
    pub location: String,
    #[serde(rename = "教师")]
    pub teacher: String,
    #[serde(rename = "班级名称")]
    pub class_name: String,
    #[serde(rename = "授课内容简介", default)]
    pub summary: Option<String>,
}

/// Canonical in-memory representation of one scheduled class session.
/// Built once from a raw row and never mutated; edits happen externally on
/// the intermediate spreadsheet and come back in as fresh [`SheetRow`]s.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseSession {
    pub date: NaiveDate,
    pub week: u32,
    pub periods: PeriodRange,
    pub course_name: String,
    pub location: String,
    pub teacher: String,
    pub class_name: String,
    pub summary: String,
}

/// One row of the human-editable weekly spreadsheet. This is both what the
/// grouper renders and what the calendar emitter consumes after editing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetRow {
    #[serde(rename = "日期")]
    pub date: String,
    #[serde(rename = "星期")]
    pub weekday: String,
    #[serde(rename = "时间")]
    pub time: String,
    #[serde(rename = "课程名称")]
    pub course_name: String,
    #[serde(rename = "教室")]
    pub classroom: String,
    #[serde(rename = "教师")]
    pub teacher: String,
    #[serde(rename = "班级")]
    pub class_name: String,
    #[serde(rename = "授课内容", default)]
    pub content: String,
    #[serde(rename = "原始节次")]
    pub periods: String,
}
