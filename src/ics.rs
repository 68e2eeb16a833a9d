//! iCalendar emission: text escaping, 75-byte line folding, VEVENT blocks
//! with an optional VALARM reminder, and the VCALENDAR envelope.

use chrono::{Local, NaiveDateTime};
use log::warn;
use uuid::Uuid;

use crate::{SheetRow, SkipReason};

pub const PRODID: &str = "-//JicoHe//ClassTable//CN";
pub const CALENDAR_NAME: &str = "广工课程表";
pub const TIMEZONE: &str = "Asia/Shanghai";
pub const REMINDER_MINUTES: u32 = 10;

const ALARM_TEXT: &str = "该上课了";
const TIMESTAMP_FORMAT: &str = "%Y%m%dT%H%M%S";
const CLOCK_FORMAT: &str = "%Y-%m-%d %H:%M";

/// RFC 5545 line length limit in bytes, excluding the terminator.
const FOLD_LIMIT: usize = 75;

#[derive(Debug, Clone)]
pub struct CalendarOptions {
    pub prod_id: String,
    pub calendar_name: String,
    pub timezone: String,
    /// Minutes before start for the display reminder; 0 disables alarms.
    pub reminder_minutes: u32,
}

impl Default for CalendarOptions {
    fn default() -> Self {
        Self {
            prod_id: PRODID.to_string(),
            calendar_name: CALENDAR_NAME.to_string(),
            timezone: TIMEZONE.to_string(),
            reminder_minutes: REMINDER_MINUTES,
        }
    }
}

/// Escapes text for use as a property value. Backslash substitution must run
/// first so the later ones are not double-escaped.
pub fn escape_text(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace(';', "\\;")
        .replace(',', "\\,")
        .replace('\n', "\\n")
}

/// Inverse of [`escape_text`]. A single left-to-right scan rather than a
/// replace chain: replacing `\n` textually would corrupt an escaped
/// backslash followed by a literal `n`.
pub fn unescape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') | Some('N') => out.push('\n'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }

    out
}

/// Folds one logical line into segments of at most 75 UTF-8 bytes each.
/// Continuation segments begin with a single space that counts toward
/// their limit; characters are never split at the boundary.
pub fn fold_line(line: &str) -> Vec<String> {
    if line.len() <= FOLD_LIMIT {
        return vec![line.to_string()];
    }

    let mut segments = Vec::new();
    let mut current = String::new();

    for ch in line.chars() {
        if current.len() + ch.len_utf8() > FOLD_LIMIT {
            segments.push(std::mem::take(&mut current));
            current.push(' ');
        }
        current.push(ch);
    }
    segments.push(current);

    segments
}

fn parse_timestamp(date: &str, clock: &str) -> Result<NaiveDateTime, SkipReason> {
    let stamp = format!("{date} {clock}");
    NaiveDateTime::parse_from_str(&stamp, CLOCK_FORMAT).map_err(|_| SkipReason::BadTimestamp(stamp))
}

/// Emits the logical lines of one VEVENT from an edited spreadsheet row.
pub fn event_lines(row: &SheetRow, opts: &CalendarOptions) -> Result<Vec<String>, SkipReason> {
    let time_range = row.time.trim();
    let Some((start_clock, end_clock)) = time_range.split_once('-') else {
        return Err(SkipReason::MissingTimeSeparator(time_range.to_string()));
    };

    // Spreadsheet date cells may render as "2024-03-04 00:00:00"; only the
    // date token matters.
    let date = row.date.split_whitespace().next().unwrap_or_default();

    let start = parse_timestamp(date, start_clock.trim())?;
    let end = parse_timestamp(date, end_clock.trim())?;

    let teacher = escape_text(&row.teacher);
    let class_name = escape_text(&row.class_name);
    let summary = escape_text(&row.content);

    // The separators here are the literal two-character `\n` escape; the
    // fields themselves are already escaped.
    let mut description = format!("教师: {teacher}\\n班级: {class_name}");
    if !summary.is_empty() {
        description.push_str(&format!("\\n内容: {summary}"));
    }

    let mut lines = vec![
        "BEGIN:VEVENT".to_string(),
        format!("UID:{}", Uuid::new_v4()),
        format!("DTSTAMP:{}", Local::now().format(TIMESTAMP_FORMAT)),
        format!("DTSTART:{}", start.format(TIMESTAMP_FORMAT)),
        format!("DTEND:{}", end.format(TIMESTAMP_FORMAT)),
        format!("SUMMARY:{}", escape_text(&row.course_name)),
        format!("LOCATION:{}", escape_text(&row.classroom)),
        format!("DESCRIPTION:{description}"),
    ];

    if opts.reminder_minutes > 0 {
        lines.push("BEGIN:VALARM".to_string());
        lines.push("ACTION:DISPLAY".to_string());
        lines.push(format!("DESCRIPTION:{ALARM_TEXT}"));
        lines.push(format!("TRIGGER:-PT{}M", opts.reminder_minutes));
        lines.push("END:VALARM".to_string());
    }

    lines.push("END:VEVENT".to_string());

    Ok(lines)
}

/// Emits every row of one sheet, collecting `(position, reason)` for the
/// rows that were skipped. Positions are 1-based and offset by the header
/// row, matching what the user sees in the spreadsheet.
pub fn emit_sheet(
    rows: &[SheetRow],
    opts: &CalendarOptions,
) -> (Vec<Vec<String>>, Vec<(usize, SkipReason)>) {
    let mut blocks = Vec::with_capacity(rows.len());
    let mut skipped = Vec::new();

    for (idx, row) in rows.iter().enumerate() {
        let position = idx + 2;
        match event_lines(row, opts) {
            Ok(lines) => blocks.push(lines),
            Err(reason) => {
                warn!("skipping sheet row {position}: {reason}");
                skipped.push((position, reason));
            }
        }
    }

    (blocks, skipped)
}

/// Wraps event blocks in the VCALENDAR envelope and serializes to bytes:
/// every logical line folded, CRLF between every line, no trailing
/// terminator. Events keep the given iteration order.
pub fn assemble(event_blocks: &[Vec<String>], opts: &CalendarOptions) -> Vec<u8> {
    let mut lines = vec![
        "BEGIN:VCALENDAR".to_string(),
        "VERSION:2.0".to_string(),
        format!("PRODID:{}", opts.prod_id),
        "METHOD:PUBLISH".to_string(),
        format!("X-WR-CALNAME:{}", opts.calendar_name),
        format!("X-WR-TIMEZONE:{}", opts.timezone),
    ];

    for block in event_blocks {
        lines.extend_from_slice(block);
    }
    lines.push("END:VCALENDAR".to_string());

    let segments = lines
        .iter()
        .flat_map(|line| fold_line(line))
        .collect::<Vec<String>>();

    segments.join("\r\n").into_bytes()
}

/// Full emitter pass over every week's sheet, in sheet order. Skipped rows
/// are logged per sheet; the output aggregates whatever emitted cleanly.
pub fn build_calendar<'a, I>(sheets: I, opts: &CalendarOptions) -> Vec<u8>
where
    I: IntoIterator<Item = &'a [SheetRow]>,
{
    let mut blocks = Vec::new();
    for rows in sheets {
        let (mut events, _skipped) = emit_sheet(rows, opts);
        blocks.append(&mut events);
    }

    assemble(&blocks, opts)
}
