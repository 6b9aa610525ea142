//! Diagnostic engine and interview sessions
//!
//! # Shape
//!
//! - [`Engine`]: knowledge base and importance index, built once, shared via `Arc`
//! - [`Session`]: one interview's facts plus queued [`Warning`]s
//! - [`Interview`]: question queue driver over a session
//!
//! # Invariants
//!
//! 1. The engine is immutable after construction
//! 2. Sessions never share facts
//! 3. Derived views are recomputed from the current facts on every call
//! 4. Warnings never abort the flow

#[allow(clippy::module_inception)]
mod engine;
mod interview;
mod session;
mod warnings;

pub use engine::Engine;
pub use interview::{Interview, InterviewConfig, InterviewSummary};
pub use session::{FactUpdate, Progress, Session};
pub use warnings::Warning;
