use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::PeriodRange;

/// Clock times for the twelve daily teaching periods, 08:30 through 20:55.
pub const PERIOD_TIMES: [(u32, (&str, &str)); 12] = [
    (1, ("08:30", "09:15")),
    (2, ("09:20", "10:05")),
    (3, ("10:25", "11:10")),
    (4, ("11:15", "12:00")),
    (5, ("13:50", "14:35")),
    (6, ("14:40", "15:25")),
    (7, ("15:30", "16:15")),
    (8, ("16:30", "17:15")),
    (9, ("17:20", "18:05")),
    (10, ("18:30", "19:15")),
    (11, ("19:20", "20:05")),
    (12, ("20:10", "20:55")),
];

/// Fallback used for period numbers outside the table.
pub const DEFAULT_PERIOD_TIME: (&str, &str) = ("08:30", "09:15");

static TABLE: Lazy<PeriodTimeTable> = Lazy::new(PeriodTimeTable::default);

/// Immutable period → clock-time lookup, loaded once at first use.
#[derive(Debug)]
pub struct PeriodTimeTable {
    entries: HashMap<u32, (&'static str, &'static str)>,
}

impl Default for PeriodTimeTable {
    fn default() -> Self {
        Self {
            entries: PERIOD_TIMES.iter().copied().collect(),
        }
    }
}

impl PeriodTimeTable {
    pub fn get() -> &'static PeriodTimeTable {
        &TABLE
    }

    pub fn start_of(&self, period: u32) -> &'static str {
        self.entries.get(&period).unwrap_or(&DEFAULT_PERIOD_TIME).0
    }

    pub fn end_of(&self, period: u32) -> &'static str {
        self.entries.get(&period).unwrap_or(&DEFAULT_PERIOD_TIME).1
    }

    /// Display time range for a session, e.g. `08:30-10:05` for periods 1-2.
    pub fn time_range(&self, range: PeriodRange) -> String {
        format!("{}-{}", self.start_of(range.start), self.end_of(range.end))
    }
}

enum CodeShape<'a> {
    Empty,
    SingleDigit(&'a str),
    MultiSegment(&'a str),
}

fn classify(code: Option<&str>) -> CodeShape<'_> {
    match code.map(str::trim) {
        None | Some("") => CodeShape::Empty,
        Some(s) if s.chars().count() == 1 => CodeShape::SingleDigit(s),
        Some(s) => CodeShape::MultiSegment(s),
    }
}

/// Resolves a concatenated two-digit period code (`"0102"` = periods 1-2,
/// `"101112"` = periods 10-12) into an inclusive range.
///
/// Odd-length codes are a known upstream formatting slip and get left-padded
/// with one `'0'` before segmentation, except a bare single digit, which is
/// taken as one period number directly. Segments that fail to parse are
/// dropped. Malformed input degrades to the default range, never an error.
pub fn resolve_period_code(code: Option<&str>) -> PeriodRange {
    match classify(code) {
        CodeShape::Empty => PeriodRange::DEFAULT,
        CodeShape::SingleDigit(s) => match s.parse::<u32>() {
            Ok(p) => PeriodRange { start: p, end: p },
            Err(_) => PeriodRange::DEFAULT,
        },
        CodeShape::MultiSegment(s) => {
            let padded;
            let s = if s.len() % 2 != 0 {
                padded = format!("0{s}");
                padded.as_str()
            } else {
                s
            };

            let segments = s
                .as_bytes()
                .chunks(2)
                .filter_map(|pair| std::str::from_utf8(pair).ok())
                .filter_map(|pair| pair.parse::<u32>().ok())
                .collect::<Vec<u32>>();

            match (segments.iter().min(), segments.iter().max()) {
                (Some(&start), Some(&end)) => PeriodRange { start, end },
                _ => PeriodRange::DEFAULT,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_missing_codes_default() {
        assert_eq!(resolve_period_code(None), PeriodRange { start: 1, end: 1 });
        assert_eq!(
            resolve_period_code(Some("")),
            PeriodRange { start: 1, end: 1 }
        );
        assert_eq!(
            resolve_period_code(Some("  ")),
            PeriodRange { start: 1, end: 1 }
        );
    }

    #[test]
    fn two_digit_segments() {
        assert_eq!(
            resolve_period_code(Some("0102")),
            PeriodRange { start: 1, end: 2 }
        );
        assert_eq!(
            resolve_period_code(Some("101112")),
            PeriodRange { start: 10, end: 12 }
        );
    }

    #[test]
    fn single_digit_bypasses_segmentation() {
        assert_eq!(
            resolve_period_code(Some("5")),
            PeriodRange { start: 5, end: 5 }
        );
    }

    #[test]
    fn odd_length_is_left_padded() {
        // "102" -> "0102" -> periods 1-2
        assert_eq!(
            resolve_period_code(Some("102")),
            PeriodRange { start: 1, end: 2 }
        );
    }

    #[test]
    fn unparseable_segments_are_dropped() {
        assert_eq!(
            resolve_period_code(Some("abcd")),
            PeriodRange { start: 1, end: 1 }
        );
        // One good segment among garbage still resolves.
        assert_eq!(
            resolve_period_code(Some("ab03")),
            PeriodRange { start: 3, end: 3 }
        );
    }

    #[test]
    fn unknown_periods_fall_back() {
        let table = PeriodTimeTable::get();
        assert_eq!(table.start_of(99), "08:30");
        assert_eq!(table.end_of(99), "09:15");
    }

    #[test]
    fn time_range_spans_start_and_end_periods() {
        let table = PeriodTimeTable::get();
        assert_eq!(
            table.time_range(PeriodRange { start: 1, end: 2 }),
            "08:30-10:05"
        );
        assert_eq!(
            table.time_range(PeriodRange { start: 10, end: 12 }),
            "18:30-20:55"
        );
    }
}
