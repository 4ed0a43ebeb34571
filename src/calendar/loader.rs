//! Calendar exception table loading
//!
//! The source is a small comma-separated table whose first line is a header.
//! Columns are picked by header name, falling back to the first two columns.
//! Anything unreadable degrades to an empty table.

use chrono::NaiveDate;
use std::path::Path;
use tracing::{debug, info, warn};

use super::resolver::{CalendarException, CalendarResolver};
use crate::app::config::CalendarConfig;

const DATE_HEADER_ALIASES: &[&str] = &["date"];
const FLAG_HEADER_ALIASES: &[&str] = &["business_day", "is_business_day"];

/// Parses calendar tables with the configured column names
#[derive(Debug, Clone)]
pub struct CalendarLoader {
    date_column: String,
    flag_column: String,
}

impl CalendarLoader {
    pub fn new(date_column: impl Into<String>, flag_column: impl Into<String>) -> Self {
        Self {
            date_column: date_column.into(),
            flag_column: flag_column.into(),
        }
    }

    pub fn from_config(config: &CalendarConfig) -> Self {
        Self::new(&config.date_column, &config.flag_column)
    }

    /// Parse table text into exception records. Rows that do not parse are skipped.
    pub fn parse(&self, content: &str) -> Vec<CalendarException> {
        let mut lines = content
            .trim_start_matches('\u{feff}')
            .lines()
            .filter(|l| !l.trim().is_empty());

        let Some(header) = lines.next() else {
            return Vec::new();
        };
        let headers: Vec<&str> = header.split(',').map(str::trim).collect();

        let date_idx = find_column(&headers, &self.date_column, DATE_HEADER_ALIASES).unwrap_or(0);
        let flag_idx = find_column(&headers, &self.flag_column, FLAG_HEADER_ALIASES).unwrap_or(1);

        let mut records = Vec::new();
        for line in lines {
            let values: Vec<&str> = line.split(',').map(str::trim).collect();
            let (Some(date), Some(flag)) = (values.get(date_idx), values.get(flag_idx)) else {
                debug!("Skipping short calendar row: {}", line);
                continue;
            };

            match parse_date(date) {
                Some(date) => records.push(CalendarException {
                    date,
                    is_business_day: *flag == "1",
                }),
                None => debug!("Skipping calendar row with bad date: {}", line),
            }
        }

        records
    }

    /// Load a resolver from a file. A missing or unreadable file yields an
    /// empty table, which leaves only the weekday rule in effect.
    pub fn load(&self, path: &Path) -> CalendarResolver {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let records = self.parse(&content);
                info!("Calendar data loaded: {} records", records.len());
                CalendarResolver::new(records)
            }
            Err(e) => {
                warn!(
                    "Failed to load calendar data from {}: {}",
                    path.display(),
                    e
                );
                CalendarResolver::default()
            }
        }
    }
}

impl Default for CalendarLoader {
    fn default() -> Self {
        Self::from_config(&CalendarConfig::default())
    }
}

fn find_column(headers: &[&str], name: &str, aliases: &[&str]) -> Option<usize> {
    headers
        .iter()
        .position(|h| *h == name)
        .or_else(|| {
            headers
                .iter()
                .position(|h| aliases.iter().any(|a| h.eq_ignore_ascii_case(a)))
        })
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(s, "%Y/%m/%d"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_parse_default_headers() {
        let csv = "日付,曜日,稼働日\n2024-01-01,月,0\n2024-01-02,火,1\n";
        let records = CalendarLoader::default().parse(csv);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].date, date("2024-01-01"));
        assert!(!records[0].is_business_day);
        assert!(records[1].is_business_day);
    }

    #[test]
    fn test_parse_english_aliases() {
        let csv = "note,date,business_day\nnew year,2024-01-01,0\n";
        let records = CalendarLoader::default().parse(csv);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].date, date("2024-01-01"));
    }

    #[test]
    fn test_parse_positional_fallback() {
        let csv = "day,flag\n2024/01/01,0\n2024-01-06,1\n";
        let records = CalendarLoader::default().parse(csv);
        assert_eq!(records.len(), 2);
        assert!(records[1].is_business_day);
    }

    #[test]
    fn test_parse_skips_bad_rows() {
        let csv = "日付,稼働日\nnot-a-date,1\n2024-01-01\n\n2024-01-03,yes\n";
        let records = CalendarLoader::default().parse(csv);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].date, date("2024-01-03"));
        assert!(!records[0].is_business_day);
    }

    #[test]
    fn test_parse_empty() {
        assert!(CalendarLoader::default().parse("").is_empty());
        assert!(CalendarLoader::default().parse("日付,稼働日\n").is_empty());
    }

    #[test]
    fn test_load_missing_file_degrades() {
        let temp = tempfile::tempdir().unwrap();
        let cal = CalendarLoader::default().load(&temp.path().join("missing.csv"));
        assert!(cal.is_empty());
        assert!(cal.is_business_day(date("2024-06-03")));
    }

    #[test]
    fn test_load_file() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("calendar.csv");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "日付,稼働日").unwrap();
        writeln!(f, "2024-01-01,0").unwrap();

        let cal = CalendarLoader::default().load(&path);
        assert_eq!(cal.len(), 1);
        assert!(!cal.is_business_day(date("2024-01-01")));
    }
}
