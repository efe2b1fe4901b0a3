//! Services layer - playground operations.
//!
//! - Source store (buffers and preferences, write-through)
//! - Document composition and the sandbox host page
//! - Diagnostic relay channel
//! - Auto-run scheduling
//! - File dialog filters

pub mod composer;
pub mod file_filters;
pub mod relay;
pub mod sandbox;
pub mod scheduler;
pub mod source_store;
