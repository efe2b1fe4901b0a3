//! Application layer - organized by Clean Architecture principles.
//!
//! # Structure
//!
//! - `domain/` - Core data structures (buffers, templates, diagnostics, project file, messages)
//! - `controllers/` - Orchestration (preview runs, console model)
//! - `services/` - Playground operations (source store, composer, sandbox, relay, scheduler)
//! - `infrastructure/` - External integrations (FLTK buffer, storage, logging, error)
//! - `state.rs` - Main application coordinator

pub mod controllers;
pub mod domain;
pub mod infrastructure;
pub mod services;
pub mod state;

// Re-exports for convenient external access
pub use domain::{BufferKind, Message, Preferences, SourceSnapshot, TemplateId, Theme};
pub use infrastructure::error::{AppError, Result};
pub use services::source_store::SourceStore;
