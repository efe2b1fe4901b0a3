use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::macros::format_description;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Log,
    Warn,
    Error,
    Info,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Log => "log",
            Self::Warn => "warn",
            Self::Error => "error",
            Self::Info => "info",
        }
    }

    pub fn parse(level: &str) -> Option<Self> {
        match level {
            "log" => Some(Self::Log),
            "warn" => Some(Self::Warn),
            "error" => Some(Self::Error),
            "info" => Some(Self::Info),
            _ => None,
        }
    }

    /// Short marker shown in front of each console row.
    pub fn marker(&self) -> String {
        format!("[{}]", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DiagnosticRecord {
    pub sequence: u64,
    pub severity: Severity,
    pub message: String,
    pub captured_at: OffsetDateTime,
}

impl DiagnosticRecord {
    /// Capture time as `HH:MM:SS`.
    pub fn time_label(&self) -> String {
        let fmt = format_description!("[hour]:[minute]:[second]");
        self.captured_at
            .format(&fmt)
            .unwrap_or_else(|_| String::from("--:--:--"))
    }
}

/// Append-only console history for one session.
///
/// Sequence numbers keep increasing across `clear()` so a record's identity
/// is never reused.
#[derive(Debug, Default)]
pub struct DiagnosticLog {
    records: Vec<DiagnosticRecord>,
    next_sequence: u64,
}

impl DiagnosticLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(
        &mut self,
        severity: Severity,
        message: impl Into<String>,
        captured_at: OffsetDateTime,
    ) -> &DiagnosticRecord {
        let record = DiagnosticRecord {
            sequence: self.next_sequence,
            severity,
            message: message.into(),
            captured_at,
        };
        self.next_sequence += 1;
        self.records.push(record);
        &self.records[self.records.len() - 1]
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn records(&self) -> &[DiagnosticRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Current wall-clock time, local if the offset can be determined.
pub fn capture_time() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    const AT: OffsetDateTime = datetime!(2024-05-01 13:04:05 UTC);

    #[test]
    fn test_sequence_is_strictly_increasing() {
        let mut log = DiagnosticLog::new();
        let a = log.append(Severity::Log, "a", AT).sequence;
        let b = log.append(Severity::Warn, "b", AT).sequence;
        let c = log.append(Severity::Error, "c", AT).sequence;
        assert!(a < b && b < c);
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn test_clear_then_append_yields_one_record() {
        let mut log = DiagnosticLog::new();
        log.append(Severity::Log, "first", AT);
        log.append(Severity::Info, "second", AT);
        log.clear();
        assert!(log.is_empty());

        let seq = log.append(Severity::Error, "third", AT).sequence;
        assert_eq!(log.len(), 1);
        assert_eq!(log.records()[0].message, "third");
        assert_eq!(seq, 2);
    }

    #[test]
    fn test_severity_parse() {
        for s in [Severity::Log, Severity::Warn, Severity::Error, Severity::Info] {
            assert_eq!(Severity::parse(s.as_str()), Some(s));
        }
        assert_eq!(Severity::parse("debug"), None);
    }

    #[test]
    fn test_time_label() {
        let mut log = DiagnosticLog::new();
        let record = log.append(Severity::Log, "x", AT);
        assert_eq!(record.time_label(), "13:04:05");
    }
}
