//! Per-device coordinate calibration for multi-device touch input.
//!
//! When several touch-capable displays are tiled into one logical surface,
//! every controller reports positions in its own 0-1 range and the ranges
//! collide downstream. This crate rewrites each event's normalized position
//! by a per-device affine transform (scale + offset) so that, say, touches
//! on the left of three side-by-side displays land in 0-0.3333 of the global
//! space and touches on the middle one in 0.3333-0.6666.
//!
//! ## Quickstart
//!
//! ```
//! use touch_calib::{CalibrationStage, CalibrationTable};
//! use touch_calib_core::{EventKind, EventPhase, MotionEvent, ProviderMap};
//!
//! // Normally fed from the host's configuration source.
//! let table = CalibrationTable::from_config([
//!     ("left", "xratio=0.3333"),
//!     ("middle", "xratio=0.3333,xoffset=0.3333"),
//! ]);
//! let providers = ProviderMap::from_registry([
//!     ("mtdev".to_string(), vec![EventKind::Touch]),
//! ]);
//!
//! let mut stage = CalibrationStage::new(table, &providers);
//!
//! let touch = MotionEvent::new(EventKind::Touch, 0.5, 0.5)
//!     .with_device("middle")
//!     .shared();
//! stage.process(vec![(EventPhase::Begin, touch.clone())]);
//!
//! assert!((touch.borrow().sx - 0.49995).abs() < 1e-9);
//! ```
//!
//! Keys are either literal device ids or parenthesized provider-type names
//! such as `"(mtdev)"`, which match any event that provider type can emit
//! and that has no explicit device entry of its own.

mod stage;
mod table;

pub use stage::CalibrationStage;
pub use table::{CalibrationEntry, CalibrationTable, ParamError};
