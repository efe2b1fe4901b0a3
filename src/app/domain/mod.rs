//! Domain layer - core data structures and types.
//!
//! - Source buffers and snapshots
//! - Preferences and templates
//! - Diagnostic records
//! - Project file format
//! - Keyboard bindings and the message type of the event system

pub mod buffers;
pub mod diagnostics;
pub mod messages;
pub mod project;
pub mod settings;
pub mod shortcuts;
pub mod template;

pub use buffers::{BufferKind, SourceSnapshot};
pub use diagnostics::{DiagnosticLog, DiagnosticRecord, Severity};
pub use messages::Message;
pub use project::ProjectFile;
pub use settings::{Preferences, Theme};
pub use template::{Template, TemplateId};
