//! Sitesmith Core
//!
//! Foundational error and progress types for the Sitesmith workspace. This
//! crate has zero dependencies on application-level code (LLM providers,
//! pipeline, storage).
//!
//! ## Module Organization
//!
//! - `error` - Core error types (`CoreError`, `CoreResult`)
//! - `progress` - Stage status and observer callback types
//!
//! ## Design Principles
//!
//! 1. **Zero external dependencies beyond serde/thiserror** - keeps build times minimal
//! 2. **Unidirectional dependency** - this crate depends on nothing else in the workspace

pub mod error;
pub mod progress;

// ── Error Types ────────────────────────────────────────────────────────
pub use error::{CoreError, CoreResult};

// ── Progress Types ─────────────────────────────────────────────────────
pub use progress::{AttemptObserver, StageCallback, StageStatus};
