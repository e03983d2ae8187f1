//! Score distribution visualization.
//!
//! # Responsibility
//! - Bucket persisted scores into fixed-width bins.
//! - Render a textual histogram to any writer.
//!
//! # Invariants
//! - Rendering never mutates stored state.

pub mod histogram;
