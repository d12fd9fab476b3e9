//! Barcode command: load a filtration, compute and report its barcode.

use crate::filtration::{read_filtration_from, read_filtration_or_empty, Filtration, FiltrationError};
use crate::matrix::ReduceStats;
use crate::output::{BarcodeWriter, OutputFormat};
use crate::persistence::{compute_persistence, StageTimings, STAGE_READ};
use std::io::{self, Read, Write};
use std::path::Path;
use std::time::Instant;

/// Barcode command configuration.
#[derive(Debug, Clone, Default)]
pub struct PersistenceCommand {
    /// Line layout of the report
    pub format: OutputFormat,
    /// Leave zero-persistence bars out of the report
    pub skip_zero: bool,
}

/// Statistics from one barcode run.
#[derive(Debug, Clone, Default)]
pub struct PersistenceStats {
    pub simplices: usize,
    pub intervals: usize,
    pub intervals_written: usize,
    pub essential: usize,
    pub betti: Vec<usize>,
    pub reduce: ReduceStats,
    pub timings: StageTimings,
}

impl std::fmt::Display for PersistenceStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Simplices: {}, Intervals: {} ({} written, {} essential), Betti: {:?}\n{}\n{}",
            self.simplices,
            self.intervals,
            self.intervals_written,
            self.essential,
            self.betti,
            self.reduce,
            self.timings
        )
    }
}

impl PersistenceCommand {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the output format.
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Drop zero-persistence bars from the report.
    pub fn with_skip_zero(mut self, skip_zero: bool) -> Self {
        self.skip_zero = skip_zero;
        self
    }

    /// Run on a filtration file.
    ///
    /// A file that cannot be opened is reported on stderr and treated as an
    /// empty filtration.
    pub fn run<P: AsRef<Path>, W: Write>(
        &self,
        input_path: P,
        output: &mut W,
    ) -> Result<PersistenceStats, FiltrationError> {
        let start = Instant::now();
        let filtration = read_filtration_or_empty(input_path)?;
        self.run_filtration(&filtration, Some(start), output)
    }

    /// Run on a filtration read from stdin.
    pub fn run_stdin<W: Write>(&self, output: &mut W) -> Result<PersistenceStats, FiltrationError> {
        let stdin = io::stdin();
        self.run_reader(stdin.lock(), output)
    }

    /// Run on a filtration read from any source.
    pub fn run_reader<R: Read, W: Write>(
        &self,
        reader: R,
        output: &mut W,
    ) -> Result<PersistenceStats, FiltrationError> {
        let start = Instant::now();
        let filtration = read_filtration_from(reader)?;
        self.run_filtration(&filtration, Some(start), output)
    }

    /// Compute and write the barcode of an already loaded filtration.
    ///
    /// `read_start` marks when loading began, for the read stage timing.
    pub fn run_filtration<W: Write>(
        &self,
        filtration: &Filtration,
        read_start: Option<Instant>,
        output: &mut W,
    ) -> Result<PersistenceStats, FiltrationError> {
        let read_elapsed = read_start.map(|t| t.elapsed());
        let result = compute_persistence(filtration);

        let mut timings = StageTimings::new();
        if let Some(elapsed) = read_elapsed {
            timings.record(STAGE_READ, elapsed);
        }
        for (stage, elapsed) in result.timings.iter() {
            timings.record(stage, elapsed);
        }

        let mut writer = BarcodeWriter::new(output);
        let mut written = 0;
        for interval in &result.barcode {
            if self.skip_zero && interval.persistence() == 0.0 {
                continue;
            }
            writer.write_interval(interval, self.format)?;
            written += 1;
        }
        writer.flush()?;

        Ok(PersistenceStats {
            simplices: filtration.len(),
            intervals: result.barcode.len(),
            intervals_written: written,
            essential: result.barcode.essential_count(),
            betti: result.barcode.betti_numbers(),
            reduce: result.reduce_stats,
            timings,
        })
    }
}
