//! Three 1080p displays tiled side by side; the left and middle ones are
//! multitouch. Each controller reports 0-1 coordinates over its own panel,
//! so without calibration a touch on the middle display collides with one on
//! the left. The calibration entries squeeze each panel into its third of
//! the global space.
//!
//! Run with `cargo run --example tiled_displays`.

use log::{info, LevelFilter};
use touch_calib::{CalibrationStage, CalibrationTable};
use touch_calib_core::{init_with_level, EventKind, EventPhase, MotionEvent, ProviderMap};

fn main() {
    init_with_level(LevelFilter::Info).expect("install logger");

    // Host configuration would normally provide these pairs; "bogus=1" shows
    // that a malformed field is logged and skipped, not fatal.
    let table = CalibrationTable::from_config([
        ("left", "xratio=0.3333"),
        ("middle", "xratio=0.3333,xoffset=0.3333,bogus=1"),
    ]);

    // Registry snapshot: which event kinds each provider type can emit.
    let providers = ProviderMap::from_registry([
        ("mtdev".to_string(), vec![EventKind::Touch]),
        ("mouse".to_string(), vec![EventKind::Mouse]),
    ]);

    let mut stage = CalibrationStage::new(table, &providers);
    info!("loaded {} calibration entries", stage.table().len());

    let touches = [
        ("left", 0.5, 0.5),
        ("middle", 0.5, 0.5),
        ("middle", 1.0, 0.25),
    ];

    for (device, sx, sy) in touches {
        let ev = MotionEvent::new(EventKind::Touch, sx, sy)
            .with_device(device)
            .shared();
        stage.process(vec![(EventPhase::Begin, ev.clone())]);
        let ev = ev.borrow();
        info!(
            "{device}: ({sx:.4}, {sy:.4}) -> ({:.4}, {:.4})",
            ev.sx, ev.sy
        );
    }

    info!("processed {} frames", stage.frame());
}
