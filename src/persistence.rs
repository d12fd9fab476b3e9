//! End-to-end persistence computation with per-stage timing.

use crate::barcode::{extract_barcodes, Barcode};
use crate::filtration::Filtration;
use crate::matrix::{build_boundary_matrix, reduce_with_stats, ReduceStats};
use std::fmt;
use std::time::{Duration, Instant};

pub const STAGE_READ: &str = "read";
pub const STAGE_BOUNDARY: &str = "boundary";
pub const STAGE_REDUCE: &str = "reduce";
pub const STAGE_EXTRACT: &str = "extract";

/// Elapsed time per named stage, in the order the stages ran.
#[derive(Debug, Clone, Default)]
pub struct StageTimings {
    stages: Vec<(&'static str, Duration)>,
}

impl StageTimings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a stage. Recording the same stage again replaces its time.
    pub fn record(&mut self, stage: &'static str, elapsed: Duration) {
        match self.stages.iter_mut().find(|(name, _)| *name == stage) {
            Some(entry) => entry.1 = elapsed,
            None => self.stages.push((stage, elapsed)),
        }
    }

    pub fn get(&self, stage: &str) -> Option<Duration> {
        self.stages
            .iter()
            .find(|(name, _)| *name == stage)
            .map(|&(_, elapsed)| elapsed)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, Duration)> + '_ {
        self.stages.iter().copied()
    }

    pub fn total(&self) -> Duration {
        self.stages.iter().map(|&(_, elapsed)| elapsed).sum()
    }
}

impl fmt::Display for StageTimings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (stage, elapsed)) in self.stages.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {} ms", stage, elapsed.as_millis())?;
        }
        Ok(())
    }
}

/// Result of running the full pipeline on one filtration.
#[derive(Debug, Clone)]
pub struct Persistence {
    pub barcode: Barcode,
    pub reduce_stats: ReduceStats,
    pub timings: StageTimings,
}

/// Build, reduce, and extract the barcode of a filtration.
pub fn compute_persistence(filtration: &Filtration) -> Persistence {
    let mut timings = StageTimings::new();

    let start = Instant::now();
    let boundary = build_boundary_matrix(filtration);
    timings.record(STAGE_BOUNDARY, start.elapsed());

    let start = Instant::now();
    let (reduced, reduce_stats) = reduce_with_stats(boundary);
    timings.record(STAGE_REDUCE, start.elapsed());

    let start = Instant::now();
    let barcode = extract_barcodes(&reduced, filtration);
    timings.record(STAGE_EXTRACT, start.elapsed());

    Persistence {
        barcode,
        reduce_stats,
        timings,
    }
}
