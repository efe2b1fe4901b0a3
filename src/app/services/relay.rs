//! One-way channel carrying console output from the preview to the shell.
//!
//! The publisher lives with the execution host (the webview IPC handler);
//! the subscriber is drained by the UI thread. There is no acknowledgment
//! and no backpressure: every published message is delivered.

use serde_json::Value;
use std::sync::mpsc::{self, Receiver, Sender};
use time::OffsetDateTime;

use crate::app::domain::diagnostics::{DiagnosticLog, Severity};

/// The only message type on the relay.
pub const CONSOLE_TYPE: &str = "console";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayMessage {
    pub level: Severity,
    pub message: String,
}

impl RelayMessage {
    pub fn new(level: Severity, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    /// Decode `{type: "console", level, message}`.
    ///
    /// Returns `None` for anything else: invalid JSON, another `type`, an
    /// unknown `level` or a non-string `message`. A missing `level` is `log`.
    pub fn from_wire(raw: &str) -> Option<Self> {
        let value: Value = serde_json::from_str(raw).ok()?;
        if value.get("type")?.as_str()? != CONSOLE_TYPE {
            return None;
        }

        let level = match value.get("level") {
            None | Some(Value::Null) => Severity::Log,
            Some(Value::String(level)) => Severity::parse(level)?,
            Some(_) => return None,
        };
        let message = value.get("message")?.as_str()?.to_string();

        Some(Self { level, message })
    }
}

#[derive(Clone)]
pub struct RelayPublisher {
    tx: Sender<RelayMessage>,
}

impl RelayPublisher {
    /// Returns false once the subscriber has been dropped.
    pub fn publish(&self, message: RelayMessage) -> bool {
        self.tx.send(message).is_ok()
    }

    /// Publish a raw wire payload. Payloads that do not match the schema are
    /// ignored and return false.
    pub fn publish_wire(&self, raw: &str) -> bool {
        match RelayMessage::from_wire(raw) {
            Some(message) => self.publish(message),
            None => {
                tracing::debug!(payload = raw, "Ignoring non-console relay payload");
                false
            }
        }
    }
}

pub struct RelaySubscriber {
    rx: Receiver<RelayMessage>,
}

impl RelaySubscriber {
    /// Append every pending message to `log`, stamping each with `now()`.
    /// Returns how many records were added.
    pub fn deliver_into(
        &self,
        log: &mut DiagnosticLog,
        mut now: impl FnMut() -> OffsetDateTime,
    ) -> usize {
        let mut delivered = 0;
        for message in self.rx.try_iter() {
            log.append(message.level, message.message, now());
            delivered += 1;
        }
        delivered
    }
}

pub fn channel() -> (RelayPublisher, RelaySubscriber) {
    let (tx, rx) = mpsc::channel();
    (RelayPublisher { tx }, RelaySubscriber { rx })
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    const AT: OffsetDateTime = datetime!(2024-05-01 9:00 UTC);

    #[test]
    fn test_from_wire_accepts_console_messages() {
        let msg = RelayMessage::from_wire(r#"{"type":"console","level":"warn","message":"careful 1"}"#).unwrap();
        assert_eq!(msg, RelayMessage::new(Severity::Warn, "careful 1"));
    }

    #[test]
    fn test_from_wire_defaults_missing_level() {
        let msg = RelayMessage::from_wire(r#"{"type":"console","message":"hi"}"#).unwrap();
        assert_eq!(msg.level, Severity::Log);
    }

    #[test]
    fn test_from_wire_ignores_other_shapes() {
        for raw in [
            "not json",
            "[]",
            r#"{"type":"resize","level":"log","message":"x"}"#,
            r#"{"level":"log","message":"x"}"#,
            r#"{"type":"console","level":"debug","message":"x"}"#,
            r#"{"type":"console","level":3,"message":"x"}"#,
            r#"{"type":"console","level":"log","message":{"a":1}}"#,
            r#"{"type":"console","level":"log"}"#,
        ] {
            assert_eq!(RelayMessage::from_wire(raw), None, "{raw}");
        }
    }

    #[test]
    fn test_from_wire_reads_serialized_level() {
        let wire = serde_json::json!({"type": CONSOLE_TYPE, "level": Severity::Error, "message": "boom"});
        let msg = RelayMessage::from_wire(&wire.to_string()).unwrap();
        assert_eq!(msg, RelayMessage::new(Severity::Error, "boom"));
    }

    #[test]
    fn test_publish_then_deliver_in_order() {
        let (publisher, subscriber) = channel();
        assert!(publisher.publish(RelayMessage::new(Severity::Log, "one")));
        assert!(publisher.publish_wire(r#"{"type":"console","level":"info","message":"two"}"#));
        assert!(!publisher.publish_wire(r#"{"type":"other"}"#));

        let mut log = DiagnosticLog::new();
        assert_eq!(subscriber.deliver_into(&mut log, || AT), 2);
        let messages: Vec<_> = log.records().iter().map(|r| r.message.as_str()).collect();
        assert_eq!(messages, vec!["one", "two"]);
        assert_eq!(log.records()[1].severity, Severity::Info);
        assert!(log.records()[0].sequence < log.records()[1].sequence);
    }

    #[test]
    fn test_flood_is_delivered_in_full() {
        let (publisher, subscriber) = channel();
        for i in 0..5_000 {
            publisher.publish(RelayMessage::new(Severity::Log, i.to_string()));
        }
        let mut log = DiagnosticLog::new();
        assert_eq!(subscriber.deliver_into(&mut log, || AT), 5_000);
        assert_eq!(log.records().last().unwrap().message, "4999");
        assert_eq!(subscriber.deliver_into(&mut log, || AT), 0);
    }

    #[test]
    fn test_publisher_from_other_thread() {
        let (publisher, subscriber) = channel();
        let handle = std::thread::spawn(move || {
            publisher.publish(RelayMessage::new(Severity::Warn, "from thread"))
        });
        assert!(handle.join().unwrap());
        let mut log = DiagnosticLog::new();
        assert_eq!(subscriber.deliver_into(&mut log, || AT), 1);
        assert_eq!(log.records()[0].severity, Severity::Warn);
        assert_eq!(log.records()[0].message, "from thread");
    }

    #[test]
    fn test_clear_then_single_arrival() {
        let (publisher, subscriber) = channel();
        let mut log = DiagnosticLog::new();
        publisher.publish(RelayMessage::new(Severity::Log, "a"));
        publisher.publish(RelayMessage::new(Severity::Log, "b"));
        subscriber.deliver_into(&mut log, || AT);
        log.clear();

        publisher.publish(RelayMessage::new(Severity::Error, "c"));
        subscriber.deliver_into(&mut log, || AT);
        assert_eq!(log.len(), 1);
        assert_eq!(log.records()[0].message, "c");
    }

    #[test]
    fn test_publish_after_subscriber_dropped() {
        let (publisher, subscriber) = channel();
        drop(subscriber);
        assert!(!publisher.publish(RelayMessage::new(Severity::Log, "lost")));
    }
}
