//! Placement sinks.
//!
//! A sink is whatever turns placement commands into objects: an engine
//! bridge, a file writer, a test collector. [`apply_plan`] hands it a
//! [`LevelPlan`] in order, fixtures first.

use std::io::Write;

use crate::error::Result;
use crate::generate::LevelPlan;
use crate::types::Transform;

/// Receives one placement at a time.
pub trait PlacementSink {
    fn place(&mut self, object: &str, transform: &Transform) -> Result<()>;
}

/// Feed every fixture and placement of `plan` into `sink`.
///
/// Returns the number of objects placed. Stops at the first sink error.
pub fn apply_plan(plan: &LevelPlan, sink: &mut dyn PlacementSink) -> Result<usize> {
    let mut placed = 0;

    for fixture in &plan.fixtures {
        sink.place(&fixture.object, &fixture.transform)?;
        placed += 1;
    }

    for placement in &plan.placements {
        sink.place(&placement.object, &placement.transform)?;
        placed += 1;
    }

    Ok(placed)
}

/// Collects placements in memory.
#[derive(Debug, Default)]
pub struct CollectSink {
    pub placed: Vec<(String, Transform)>,
}

impl PlacementSink for CollectSink {
    fn place(&mut self, object: &str, transform: &Transform) -> Result<()> {
        self.placed.push((object.to_string(), *transform));
        Ok(())
    }
}

/// Writes one tab-separated line per placement:
/// `object  x  y  z  pitch  yaw  roll  sx  sy  sz`.
pub struct PrintSink<W: Write> {
    out: W,
}

impl<W: Write> PrintSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> PlacementSink for PrintSink<W> {
    fn place(&mut self, object: &str, transform: &Transform) -> Result<()> {
        let l = transform.location;
        let r = transform.rotation;
        let s = transform.scale;
        writeln!(
            self.out,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            object, l.x, l.y, l.z, r.pitch, r.yaw, r.roll, s.x, s.y, s.z
        )?;
        Ok(())
    }
}
