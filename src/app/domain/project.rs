use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::{OffsetDateTime, UtcOffset};
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;

use super::buffers::SourceSnapshot;
use crate::app::infrastructure::error::{AppError, Result};

pub const DEFAULT_PROJECT_FILE_NAME: &str = "playground-project.json";
pub const DEFAULT_EXPORT_FILE_NAME: &str = "project.html";

/// On-disk project format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectFile {
    #[serde(default)]
    pub html: String,
    #[serde(default)]
    pub css: String,
    #[serde(default)]
    pub js: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub name: String,
}

impl ProjectFile {
    /// Build the file for `saved_at`, taken in the user's local offset.
    ///
    /// `timestamp` is stored in UTC, `name` carries the local calendar date.
    pub fn from_snapshot(snapshot: &SourceSnapshot, saved_at: OffsetDateTime) -> Self {
        let timestamp = saved_at
            .to_offset(UtcOffset::UTC)
            .format(&Rfc3339)
            .unwrap_or_default();
        let date = saved_at
            .format(format_description!("[year]-[month]-[day]"))
            .unwrap_or_default();

        Self {
            html: snapshot.markup.clone(),
            css: snapshot.styles.clone(),
            js: snapshot.script.clone(),
            timestamp,
            name: format!("Project {}", date),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a project file.
    ///
    /// Any valid JSON is accepted. Fields that are missing or not strings
    /// become empty, unknown fields are ignored.
    pub fn parse(contents: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(contents)
            .map_err(|e| AppError::Project(format!("not a valid JSON file: {}", e)))?;

        let field = |name: &str| -> String {
            value
                .get(name)
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_default()
        };

        Ok(Self {
            html: field("html"),
            css: field("css"),
            js: field("js"),
            timestamp: field("timestamp"),
            name: field("name"),
        })
    }

    pub fn snapshot(&self) -> SourceSnapshot {
        SourceSnapshot::new(self.html.clone(), self.css.clone(), self.js.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn test_parse_defaults_missing_fields() {
        let project = ProjectFile::parse(r#"{"html":"<p>x</p>","css":"","js":"console.log('a')"}"#).unwrap();
        assert_eq!(project.html, "<p>x</p>");
        assert_eq!(project.css, "");
        assert_eq!(project.js, "console.log('a')");
        assert_eq!(project.name, "");
        assert_eq!(project.timestamp, "");
    }

    #[test]
    fn test_parse_accepts_superset() {
        let project = ProjectFile::parse(r#"{"js":"1","extra":{"nested":true},"version":3}"#).unwrap();
        assert_eq!(project.snapshot(), SourceSnapshot::new("", "", "1"));
    }

    #[test]
    fn test_parse_non_string_fields_become_empty() {
        let project = ProjectFile::parse(r#"{"html":5,"css":null,"js":["x"]}"#).unwrap();
        assert!(project.snapshot().is_empty());
    }

    #[test]
    fn test_parse_non_object_json_is_empty_project() {
        let project = ProjectFile::parse("42").unwrap();
        assert!(project.snapshot().is_empty());
    }

    #[test]
    fn test_parse_rejects_non_json() {
        let err = ProjectFile::parse("<html>not json</html>").unwrap_err();
        assert!(matches!(err, AppError::Project(_)));
    }

    #[test]
    fn test_export_shape() {
        let snap = SourceSnapshot::new("<h1>t</h1>", "h1{}", "go()");
        let project = ProjectFile::from_snapshot(&snap, datetime!(2024-03-09 10:30:00 UTC));
        assert_eq!(project.timestamp, "2024-03-09T10:30:00Z");
        assert_eq!(project.name, "Project 2024-03-09");

        let json: Value = serde_json::from_str(&project.to_json().unwrap()).unwrap();
        assert_eq!(json["html"], "<h1>t</h1>");
        assert_eq!(json["css"], "h1{}");
        assert_eq!(json["js"], "go()");
        assert_eq!(json["timestamp"], "2024-03-09T10:30:00Z");
    }

    #[test]
    fn test_name_uses_local_date_timestamp_stays_utc() {
        let snap = SourceSnapshot::new("", "", "");
        let project = ProjectFile::from_snapshot(&snap, datetime!(2024-03-09 23:30:00 -05:00));
        assert_eq!(project.timestamp, "2024-03-10T04:30:00Z");
        assert_eq!(project.name, "Project 2024-03-09");
    }

    #[test]
    fn test_export_then_parse_restores_buffers() {
        let snap = SourceSnapshot::new("a", "b", "c");
        let json = ProjectFile::from_snapshot(&snap, datetime!(2024-01-01 0:00 UTC)).to_json().unwrap();
        assert_eq!(ProjectFile::parse(&json).unwrap().snapshot(), snap);
    }
}
