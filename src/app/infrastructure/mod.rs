//! Infrastructure layer - external integrations.
//!
//! - FLTK buffer helpers
//! - Local key/value storage
//! - Error types
//! - Logging setup

pub mod buffer;
pub mod error;
pub mod logging;
pub mod storage;
