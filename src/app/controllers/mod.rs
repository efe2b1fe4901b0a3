//! Controllers layer - orchestration and coordination.
//!
//! Controllers sit between the services and the UI:
//! - Preview runs (manual and debounced) and the files they produce
//! - The console panel model

pub mod console;
pub mod preview;
