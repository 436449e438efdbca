//! Services
//!
//! Single-agent operations that run outside the build pipeline.

pub mod refinement;

pub use refinement::RefinementService;
