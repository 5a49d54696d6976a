//! Per-frame calibration stage.

use touch_calib_core::{EventBatch, EventKind, MotionEvent, ProviderMap};

use crate::table::{CalibrationEntry, CalibrationTable};

/// Stateful pipeline stage that rewrites event positions once per frame.
///
/// One `process` call is one frame. For every non-terminal event in the
/// batch the stage resolves a calibration entry (explicit device id first,
/// then provider-type fallback) and applies it at most once, using the
/// event's `calibrated_frame` marker to dedup providers that emit the same
/// object twice within a frame.
pub struct CalibrationStage {
    table: CalibrationTable,
    fallbacks: Vec<ProviderFallback>,
    frame: u64,
}

/// A provider's parenthesized table key, precomputed so per-event
/// resolution does not allocate.
struct ProviderFallback {
    key: String,
    kinds: Vec<EventKind>,
}

impl CalibrationStage {
    /// Create a stage from a built table and a provider-registry snapshot.
    pub fn new(table: CalibrationTable, providers: &ProviderMap) -> Self {
        let fallbacks = providers
            .iter()
            .map(|(name, kinds)| ProviderFallback {
                key: format!("({name})"),
                kinds: kinds.to_vec(),
            })
            .collect();
        Self {
            table,
            fallbacks,
            frame: 0,
        }
    }

    /// Calibration table used by the stage.
    #[inline]
    pub fn table(&self) -> &CalibrationTable {
        &self.table
    }

    /// Number of frames processed so far.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Process one frame's batch, mutating event positions in place.
    ///
    /// The batch comes back with the same order and cardinality; events the
    /// stage cannot resolve pass through untouched, which is the expected
    /// steady state for devices without a calibration entry.
    pub fn process(&mut self, events: EventBatch) -> EventBatch {
        // With nothing configured the stage must cost nothing: no frame
        // increment, no marker writes.
        if self.table.is_empty() {
            return events;
        }

        self.frame += 1;
        let frame = self.frame;

        for (phase, event) in &events {
            // End events were already handled in an earlier pass and must
            // not be recalibrated.
            if phase.is_terminal() {
                continue;
            }

            let mut event = event.borrow_mut();
            let Some(entry) = self.resolve(&event) else {
                continue;
            };

            // Some providers emit the same object as update and end within
            // one frame; calibrate it only once.
            if event.calibrated_frame == Some(frame) {
                continue;
            }

            let (sx, sy) = entry.apply(event.sx, event.sy);
            event.sx = sx;
            event.sy = sy;
            event.calibrated_frame = Some(frame);
        }

        events
    }

    /// Find the calibration entry applying to an event, if any.
    ///
    /// Explicit device ids win over provider fallback; among providers the
    /// first registry-order match whose kind set contains the event's kind
    /// and whose `"(name)"` key is configured wins.
    fn resolve(&self, event: &MotionEvent) -> Option<&CalibrationEntry> {
        if let Some(device) = event.device.as_deref() {
            if let Some(entry) = self.table.lookup(device) {
                return Some(entry);
            }
        }
        self.fallbacks.iter().find_map(|fb| {
            if fb.kinds.contains(&event.kind) {
                self.table.lookup(&fb.key)
            } else {
                None
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use touch_calib_core::{EventKind, EventPhase};

    fn mtdev_providers() -> ProviderMap {
        ProviderMap::from_registry([("mtdev".to_string(), vec![EventKind::Touch])])
    }

    #[test]
    fn device_key_wins_over_provider_key() {
        let table = CalibrationTable::from_config([
            ("left", "xoffset=0.5"),
            ("(mtdev)", "xoffset=0.25"),
        ]);
        let mut stage = CalibrationStage::new(table, &mtdev_providers());

        let ev = MotionEvent::new(EventKind::Touch, 0.0, 0.0)
            .with_device("left")
            .shared();
        stage.process(vec![(EventPhase::Begin, ev.clone())]);
        assert_relative_eq!(ev.borrow().sx, 0.5);
    }

    #[test]
    fn first_matching_provider_wins() {
        let table = CalibrationTable::from_config([
            ("(hidinput)", "xoffset=0.1"),
            ("(mtdev)", "xoffset=0.9"),
        ]);
        let providers = ProviderMap::from_registry([
            ("hidinput".to_string(), vec![EventKind::Touch, EventKind::Stylus]),
            ("mtdev".to_string(), vec![EventKind::Touch]),
        ]);
        let mut stage = CalibrationStage::new(table, &providers);

        let ev = MotionEvent::new(EventKind::Touch, 0.0, 0.0).shared();
        stage.process(vec![(EventPhase::Update, ev.clone())]);
        assert_relative_eq!(ev.borrow().sx, 0.1);
    }

    #[test]
    fn provider_without_table_key_is_passed_over() {
        // hidinput matches the event kind first but has no table entry, so
        // resolution continues to mtdev.
        let table = CalibrationTable::from_config([("(mtdev)", "xoffset=0.9")]);
        let providers = ProviderMap::from_registry([
            ("hidinput".to_string(), vec![EventKind::Touch]),
            ("mtdev".to_string(), vec![EventKind::Touch]),
        ]);
        let mut stage = CalibrationStage::new(table, &providers);

        let ev = MotionEvent::new(EventKind::Touch, 0.0, 0.0).shared();
        stage.process(vec![(EventPhase::Update, ev.clone())]);
        assert_relative_eq!(ev.borrow().sx, 0.9);
    }

    #[test]
    fn unresolvable_event_passes_through() {
        let table = CalibrationTable::from_config([("(mtdev)", "xoffset=0.5")]);
        let mut stage = CalibrationStage::new(table, &mtdev_providers());

        let ev = MotionEvent::new(EventKind::Mouse, 0.4, 0.4)
            .with_device("unknown")
            .shared();
        stage.process(vec![(EventPhase::Update, ev.clone())]);
        assert_relative_eq!(ev.borrow().sx, 0.4);
        assert_eq!(ev.borrow().calibrated_frame, None);
        // The frame still advanced: the table is not empty.
        assert_eq!(stage.frame(), 1);
    }

    #[test]
    fn stage_exposes_its_table() {
        let table = CalibrationTable::from_config([
            ("left", "xoffset=0.5"),
            ("(mtdev)", "xoffset=0.25"),
        ]);
        let stage = CalibrationStage::new(table, &mtdev_providers());
        assert_eq!(stage.table().len(), 2);
        assert!(stage.table().lookup("(mtdev)").is_some());
    }

    #[test]
    fn empty_table_does_not_advance_the_frame() {
        let table = CalibrationTable::default();
        let mut stage = CalibrationStage::new(table, &mtdev_providers());
        let ev = MotionEvent::new(EventKind::Touch, 0.4, 0.3).shared();
        stage.process(vec![(EventPhase::Update, ev.clone())]);
        assert_eq!(stage.frame(), 0);
        assert_relative_eq!(ev.borrow().sx, 0.4);
    }
}
