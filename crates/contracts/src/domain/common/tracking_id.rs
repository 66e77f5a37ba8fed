use chrono::{DateTime, Datelike, NaiveDate, TimeZone};

/// Parsed form of a tracking ID such as "(LV) 2025/03/07-005".
///
/// The sequence is `existing_count + 1` at creation time; nothing here checks
/// uniqueness, two creations reading the same count produce the same ID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackingId {
    pub prefix: String,
    pub date: NaiveDate,
    pub sequence: usize,
}

impl TrackingId {
    pub fn new(prefix: &str, existing_count: usize, date: NaiveDate) -> Self {
        Self {
            prefix: prefix.to_string(),
            date,
            sequence: existing_count + 1,
        }
    }

    /// Parse "(PREFIX) YYYY/MM/DD-NNN"
    pub fn parse(s: &str) -> Option<Self> {
        let rest = s.trim().strip_prefix('(')?;
        let (prefix, rest) = rest.split_once(") ")?;
        if prefix.is_empty() {
            return None;
        }
        let (date_part, seq_part) = rest.rsplit_once('-')?;
        if seq_part.len() < 3 || !seq_part.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        let date = NaiveDate::parse_from_str(date_part, "%Y/%m/%d").ok()?;
        let sequence = seq_part.parse().ok()?;
        Some(Self {
            prefix: prefix.to_string(),
            date,
            sequence,
        })
    }
}

impl std::fmt::Display for TrackingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({}) {:04}/{:02}/{:02}-{:03}",
            self.prefix,
            self.date.year(),
            self.date.month(),
            self.date.day(),
            self.sequence
        )
    }
}

/// Tracking ID for the next record of a type, given the current record count
pub fn generate(prefix: &str, existing_count: usize, date: NaiveDate) -> String {
    TrackingId::new(prefix, existing_count, date).to_string()
}

/// Same as [`generate`], taking the calendar date of `at` in its own time zone
pub fn generate_at<Tz: TimeZone>(prefix: &str, existing_count: usize, at: &DateTime<Tz>) -> String {
    generate(prefix, existing_count, at.date_naive())
}
