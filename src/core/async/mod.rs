//! Asynchronous implementations of core components
//!
//! This module provides the thread-safe counterparts of the preview engine
//! for batch fan-out:
//!
//! - **AsyncPreviewEngine**: shareable engine with DashMap revenue accounting
//! - **BatchProcessor**: contiguous-chunk fan-out preserving input order
//!
//! # Thread Safety
//!
//! Resolution and calculation are pure functions over an immutable
//! snapshot, so they parallelize with no locking; only revenue accounting
//! needs a concurrent map.

pub mod batch_processor;
pub mod engine;

pub use batch_processor::{BatchProcessor, ProcessingResult};
pub use engine::AsyncPreviewEngine;
