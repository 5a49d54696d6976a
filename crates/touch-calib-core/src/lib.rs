//! Core types for the touch-calib input pipeline.
//!
//! This crate holds the surfaces shared between pipeline stages and their
//! host: the pointer event model, the provider-registry snapshot, and a
//! minimal logger. It contains no calibration logic of its own.

mod event;
mod logger;
mod provider;

pub use event::{EventBatch, EventKind, EventPhase, EventRef, MotionEvent};
pub use provider::ProviderMap;

pub use logger::init_with_level;
