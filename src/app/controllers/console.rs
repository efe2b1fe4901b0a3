use fltk::enums::Color;

use crate::app::domain::diagnostics::{DiagnosticLog, DiagnosticRecord, Severity};
use crate::app::domain::settings::Theme;

/// Rows shown while the log is empty.
pub const EMPTY_HINT: [&str; 2] = [
    "The console is empty",
    "Messages from console.log will appear here",
];

/// Console panel model: the diagnostic log plus panel visibility.
pub struct ConsoleController {
    log: DiagnosticLog,
    pub visible: bool,
}

impl ConsoleController {
    pub fn new() -> Self {
        Self {
            log: DiagnosticLog::new(),
            visible: false,
        }
    }

    pub fn log(&self) -> &DiagnosticLog {
        &self.log
    }

    pub fn log_mut(&mut self) -> &mut DiagnosticLog {
        &mut self.log
    }

    pub fn clear(&mut self) {
        self.log.clear();
    }

    /// Toggle visibility. Returns the new state.
    pub fn toggle(&mut self) -> bool {
        self.visible = !self.visible;
        self.visible
    }

    pub fn header_label(&self) -> String {
        format!("Console ({})", self.log.len())
    }

    /// Browser lines for the current log, or the centered empty hint.
    pub fn rows(&self, theme: Theme) -> Vec<String> {
        if self.log.is_empty() {
            let muted = muted_color(theme).bits();
            return EMPTY_HINT
                .iter()
                .map(|line| format!("@c@i@C{}@.{}", muted, line))
                .collect();
        }
        self.log
            .records()
            .iter()
            .map(|record| format_row(record, theme))
            .collect()
    }
}

impl Default for ConsoleController {
    fn default() -> Self {
        Self::new()
    }
}

/// One browser line: `@C<color>@.[level] message  HH:MM:SS`.
///
/// `@.` ends format parsing so messages starting with `@` print verbatim.
pub fn format_row(record: &DiagnosticRecord, theme: Theme) -> String {
    format!(
        "@C{}@.{} {}  {}",
        severity_color(record.severity, theme).bits(),
        record.severity.marker(),
        single_line(&record.message),
        record.time_label()
    )
}

pub fn severity_color(severity: Severity, theme: Theme) -> Color {
    match (severity, theme.is_dark()) {
        (Severity::Error, true) => Color::from_rgb(248, 113, 113),
        (Severity::Error, false) => Color::from_rgb(220, 38, 38),
        (Severity::Warn, true) => Color::from_rgb(250, 204, 21),
        (Severity::Warn, false) => Color::from_rgb(202, 138, 4),
        (Severity::Info, true) => Color::from_rgb(96, 165, 250),
        (Severity::Info, false) => Color::from_rgb(37, 99, 235),
        (Severity::Log, true) => Color::from_rgb(209, 213, 219),
        (Severity::Log, false) => Color::from_rgb(55, 65, 81),
    }
}

fn muted_color(theme: Theme) -> Color {
    if theme.is_dark() {
        Color::from_rgb(107, 114, 128)
    } else {
        Color::from_rgb(156, 163, 175)
    }
}

// Browser rows are single lines and tabs act as column separators.
fn single_line(message: &str) -> String {
    message.replace(['\n', '\r'], " ").replace('\t', "    ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn record(severity: Severity, message: &str) -> DiagnosticRecord {
        DiagnosticRecord {
            sequence: 0,
            severity,
            message: message.to_string(),
            captured_at: datetime!(2024-05-01 13:04:05 UTC),
        }
    }

    #[test]
    fn test_format_row_layout() {
        let row = format_row(&record(Severity::Warn, "careful"), Theme::Dark);
        let color = severity_color(Severity::Warn, Theme::Dark).bits();
        assert_eq!(row, format!("@C{}@.[warn] careful  13:04:05", color));
    }

    #[test]
    fn test_format_row_flattens_newlines() {
        let row = format_row(&record(Severity::Log, "a\nb\tc"), Theme::Light);
        assert!(row.contains("[log] a b    c"));
    }

    #[test]
    fn test_severity_colors_differ() {
        for theme in [Theme::Dark, Theme::Light] {
            let error = severity_color(Severity::Error, theme);
            let warn = severity_color(Severity::Warn, theme);
            let info = severity_color(Severity::Info, theme);
            let log = severity_color(Severity::Log, theme);
            assert_ne!(error, warn);
            assert_ne!(warn, info);
            assert_ne!(info, log);
        }
    }

    #[test]
    fn test_empty_log_shows_hint() {
        let console = ConsoleController::new();
        let rows = console.rows(Theme::Dark);
        assert_eq!(rows.len(), 2);
        assert!(rows[0].ends_with(EMPTY_HINT[0]));
        assert_eq!(console.header_label(), "Console (0)");
    }

    #[test]
    fn test_clear_then_append_single_row() {
        let mut console = ConsoleController::new();
        let at = datetime!(2024-05-01 9:00 UTC);
        console.log_mut().append(Severity::Log, "one", at);
        console.log_mut().append(Severity::Log, "two", at);
        console.clear();
        console.log_mut().append(Severity::Error, "three", at);

        let rows = console.rows(Theme::Light);
        assert_eq!(rows.len(), 1);
        assert!(rows[0].contains("[error] three"));
        assert_eq!(console.header_label(), "Console (1)");
    }

    #[test]
    fn test_toggle_visibility() {
        let mut console = ConsoleController::new();
        assert!(console.toggle());
        assert!(!console.toggle());
    }
}
