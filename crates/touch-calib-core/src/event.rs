//! Event surface shared across pipeline stages.
//!
//! Events are owned by the upstream pipeline and handed to stages as shared
//! mutable handles: a provider is free to emit the same object more than once
//! within a single frame (e.g. an update immediately followed by an
//! end-as-update), so stages that must act at most once per event rely on the
//! `calibrated_frame` marker rather than on batch positions.

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// Capability tag for the kind of pointer an event describes.
///
/// Providers declare which kinds they can emit; stages use the tag for
/// provider-type fallback when an event carries no matching device id.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    Touch,
    Stylus,
    Mouse,
}

/// Position of an event within a contact's lifecycle.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum EventPhase {
    Begin,
    Update,
    End,
}

impl EventPhase {
    /// `End` events are already finalized upstream and must not be reprocessed.
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, EventPhase::End)
    }
}

/// A pointer event with a normalized (0-1) position.
#[derive(Clone, Debug, PartialEq)]
pub struct MotionEvent {
    /// Identifier of the physical device that produced the event, if known.
    pub device: Option<String>,
    /// Kind of pointer this event describes.
    pub kind: EventKind,
    /// Normalized horizontal position.
    pub sx: f64,
    /// Normalized vertical position.
    pub sy: f64,
    /// Frame number at which calibration last touched this event.
    ///
    /// `None` until the calibration stage first applies a transform. Written
    /// only by the calibration stage; scoped to the event's own lifetime.
    pub calibrated_frame: Option<u64>,
}

impl MotionEvent {
    /// Create an event with no device id and no calibration marker.
    pub fn new(kind: EventKind, sx: f64, sy: f64) -> Self {
        Self {
            device: None,
            kind,
            sx,
            sy,
            calibrated_frame: None,
        }
    }

    /// Attach the id of the device that produced the event.
    pub fn with_device(mut self, device: impl Into<String>) -> Self {
        self.device = Some(device.into());
        self
    }

    /// Wrap the event into a shared handle for batch processing.
    pub fn shared(self) -> EventRef {
        Rc::new(RefCell::new(self))
    }
}

/// Shared mutable handle to an event owned by the upstream pipeline.
pub type EventRef = Rc<RefCell<MotionEvent>>;

/// One frame's worth of events, in emission order.
pub type EventBatch = Vec<(EventPhase, EventRef)>;
