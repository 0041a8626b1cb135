//! History index: saved labels grouped by local calendar date.
//!
//! Rebuilt from a fresh directory scan on every request; nothing is cached.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use chrono_tz::Tz;

use super::label_store::{FILE_EXT, FILE_PREFIX, StoredLabel, TIMESTAMP_FORMAT};

const DATE_FORMAT: &str = "%B %d, %Y";
const TIME_FORMAT: &str = "%I:%M:%S %p";

/// Where a capture time came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampSource {
    FileName,
    FileDate,
    Modified,
}

impl TimestampSource {
    /// Qualifier shown next to times that were not read from a full timestamp.
    pub fn note(self) -> Option<&'static str> {
        match self {
            Self::FileName => None,
            Self::FileDate => Some("from file date"),
            Self::Modified => Some("from file modification time"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub name: String,
    pub source: TimestampSource,
    /// Local capture time, e.g. `03:00:15 PM`.
    pub time_label: String,
}

#[derive(Debug, Clone)]
pub struct HistoryDay {
    pub date: NaiveDate,
    /// Local date, e.g. `August 01, 2024`.
    pub date_label: String,
    pub entries: Vec<HistoryEntry>,
}

/// Determine the capture time of a label file.
///
/// Tries the full `YYYYMMDD_HHMMSS` timestamp in the name (a trailing
/// `_N` collision suffix is allowed), then a `YYYYMMDD` date prefix, then
/// the modification time. Never fails.
pub fn parse_capture_time(
    name: &str,
    modified: Option<DateTime<Utc>>,
) -> (DateTime<Utc>, TimestampSource) {
    let stem = name.strip_suffix(FILE_EXT).unwrap_or(name);
    let segment = stem.strip_prefix(FILE_PREFIX).unwrap_or(stem);

    if let Some(dt) = parse_full_timestamp(segment) {
        return (dt.and_utc(), TimestampSource::FileName);
    }

    if let Some(date) = segment
        .get(..8)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y%m%d").ok())
    {
        return (date.and_time(NaiveTime::MIN).and_utc(), TimestampSource::FileDate);
    }

    (
        modified.unwrap_or(DateTime::<Utc>::UNIX_EPOCH),
        TimestampSource::Modified,
    )
}

fn parse_full_timestamp(segment: &str) -> Option<NaiveDateTime> {
    // YYYYMMDD_HHMMSS is 15 bytes; anything after must be a `_N` suffix.
    let head = segment.get(..15)?;
    let rest = &segment[15..];
    let suffix_ok = rest.is_empty()
        || rest
            .strip_prefix('_')
            .is_some_and(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()));
    if !suffix_ok || !head.bytes().all(|b| b.is_ascii_digit() || b == b'_') {
        return None;
    }
    NaiveDateTime::parse_from_str(head, TIMESTAMP_FORMAT).ok()
}

/// Group labels by local calendar date, newest day first, and within a day
/// by file name descending.
pub fn build_history(labels: Vec<StoredLabel>, tz: Tz) -> Vec<HistoryDay> {
    let mut days: Vec<HistoryDay> = Vec::new();

    for label in labels {
        let (captured_at, source) = parse_capture_time(&label.name, label.modified);
        let local = captured_at.with_timezone(&tz);
        let date = local.date_naive();
        let entry = HistoryEntry {
            name: label.name,
            source,
            time_label: local.format(TIME_FORMAT).to_string(),
        };

        match days.iter_mut().find(|d| d.date == date) {
            Some(day) => day.entries.push(entry),
            None => days.push(HistoryDay {
                date,
                date_label: local.format(DATE_FORMAT).to_string(),
                entries: vec![entry],
            }),
        }
    }

    days.sort_by(|a, b| b.date.cmp(&a.date));
    for day in &mut days {
        day.entries.sort_by(|a, b| b.name.cmp(&a.name));
    }
    days
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn stored(name: &str) -> StoredLabel {
        StoredLabel {
            name: name.to_string(),
            modified: None,
        }
    }

    #[test]
    fn full_timestamp_is_parsed_as_utc() {
        let (dt, source) = parse_capture_time("qr_20240801_093015.jpg", None);
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 8, 1, 9, 30, 15).unwrap());
        assert_eq!(source, TimestampSource::FileName);
    }

    #[test]
    fn collision_suffix_keeps_full_timestamp() {
        let (dt, source) = parse_capture_time("qr_20240801_093015_3.jpg", None);
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 8, 1, 9, 30, 15).unwrap());
        assert_eq!(source, TimestampSource::FileName);
    }

    #[test]
    fn date_only_prefix_gives_midnight() {
        let (dt, source) = parse_capture_time("qr_20240801_garbage.jpg", None);
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 8, 1, 0, 0, 0).unwrap());
        assert_eq!(source, TimestampSource::FileDate);
    }

    #[test]
    fn malformed_name_falls_back_to_modified_time() {
        let mtime = Utc.with_ymd_and_hms(2023, 1, 2, 3, 4, 5).unwrap();
        let (dt, source) = parse_capture_time("qr_abcdefgh_ijklmn.jpg", Some(mtime));
        assert_eq!(dt, mtime);
        assert_eq!(source, TimestampSource::Modified);
    }

    #[test]
    fn name_without_prefix_falls_back_to_modified_time() {
        let mtime = Utc.with_ymd_and_hms(2023, 1, 2, 3, 4, 5).unwrap();
        let (dt, source) = parse_capture_time("photo.jpg", Some(mtime));
        assert_eq!(dt, mtime);
        assert_eq!(source, TimestampSource::Modified);
    }

    #[test]
    fn multibyte_name_does_not_panic() {
        let (_, source) = parse_capture_time("qr_日付日付日付.jpg", None);
        assert_eq!(source, TimestampSource::Modified);
    }

    #[test]
    fn groups_by_date_newest_first() {
        let labels = vec![
            stored("qr_20240801_093015.jpg"),
            stored("qr_20240801_150000.jpg"),
            stored("qr_20240802_010000.jpg"),
        ];
        let days = build_history(labels, chrono_tz::UTC);

        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date_label, "August 02, 2024");
        assert_eq!(days[1].date_label, "August 01, 2024");
        let names: Vec<&str> = days[1].entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["qr_20240801_150000.jpg", "qr_20240801_093015.jpg"]);
    }

    #[test]
    fn times_are_displayed_in_ist() {
        let days = build_history(vec![stored("qr_20240801_093015.jpg")], chrono_tz::Asia::Kolkata);
        assert_eq!(days[0].date_label, "August 01, 2024");
        assert_eq!(days[0].entries[0].time_label, "03:00:15 PM");
    }

    #[test]
    fn ist_conversion_can_move_label_to_next_day() {
        let days = build_history(vec![stored("qr_20240801_200000.jpg")], chrono_tz::Asia::Kolkata);
        assert_eq!(days[0].date_label, "August 02, 2024");
        assert_eq!(days[0].entries[0].time_label, "01:30:00 AM");
    }

    #[test]
    fn days_sort_chronologically_not_alphabetically() {
        let labels = vec![
            stored("qr_20231215_120000.jpg"),
            stored("qr_20240105_120000.jpg"),
        ];
        let days = build_history(labels, chrono_tz::UTC);
        assert_eq!(days[0].date_label, "January 05, 2024");
        assert_eq!(days[1].date_label, "December 15, 2023");
    }

    #[test]
    fn entries_keep_timestamp_source() {
        let labels = vec![stored("qr_20240801_093015.jpg"), stored("qr_20240801_x.jpg")];
        let days = build_history(labels, chrono_tz::UTC);
        let sources: Vec<_> = days[0].entries.iter().map(|e| e.source).collect();
        assert_eq!(sources, [TimestampSource::FileDate, TimestampSource::FileName]);
        assert_eq!(TimestampSource::FileName.note(), None);
        assert_eq!(TimestampSource::FileDate.note(), Some("from file date"));
    }

    #[test]
    fn empty_listing_gives_no_days() {
        assert!(build_history(Vec::new(), chrono_tz::UTC).is_empty());
    }
}
