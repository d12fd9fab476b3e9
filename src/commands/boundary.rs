//! Boundary command: dump the boundary matrix of a filtration.
//!
//! Each output line is `j: r1 r2 ...`, the row indices of column `j`. With
//! `reduced` set, the matrix is reduced first.

use crate::filtration::{read_filtration_from, read_filtration_or_empty, Filtration, FiltrationError};
use crate::matrix::{build_boundary_matrix, reduce_with_stats, BoundaryMatrix};
use crate::output::BarcodeWriter;
use std::io::{self, Read, Write};
use std::path::Path;

/// Boundary dump configuration.
#[derive(Debug, Clone, Default)]
pub struct BoundaryCommand {
    /// Print the reduced matrix instead of the raw boundary matrix
    pub reduced: bool,
}

/// Statistics from one boundary dump.
#[derive(Debug, Clone, Default)]
pub struct BoundaryStats {
    pub columns: usize,
    pub nonzeros: usize,
    pub column_additions: usize,
}

impl std::fmt::Display for BoundaryStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Columns: {}, Nonzeros: {}, Additions: {}",
            self.columns, self.nonzeros, self.column_additions
        )
    }
}

impl BoundaryCommand {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reduce before printing.
    pub fn with_reduced(mut self, reduced: bool) -> Self {
        self.reduced = reduced;
        self
    }

    /// Run on a filtration file; an unopenable file is treated as empty.
    pub fn run<P: AsRef<Path>, W: Write>(
        &self,
        input_path: P,
        output: &mut W,
    ) -> Result<BoundaryStats, FiltrationError> {
        let filtration = read_filtration_or_empty(input_path)?;
        self.run_filtration(&filtration, output)
    }

    /// Run on a filtration read from stdin.
    pub fn run_stdin<W: Write>(&self, output: &mut W) -> Result<BoundaryStats, FiltrationError> {
        let stdin = io::stdin();
        self.run_reader(stdin.lock(), output)
    }

    pub fn run_reader<R: Read, W: Write>(
        &self,
        reader: R,
        output: &mut W,
    ) -> Result<BoundaryStats, FiltrationError> {
        let filtration = read_filtration_from(reader)?;
        self.run_filtration(&filtration, output)
    }

    pub fn run_filtration<W: Write>(
        &self,
        filtration: &Filtration,
        output: &mut W,
    ) -> Result<BoundaryStats, FiltrationError> {
        let mut stats = BoundaryStats::default();

        let mut matrix = build_boundary_matrix(filtration);
        if self.reduced {
            let (reduced, reduce_stats) = reduce_with_stats(matrix);
            stats.column_additions = reduce_stats.column_additions;
            matrix = reduced;
        }

        write_matrix(&matrix, output)?;

        stats.columns = matrix.len();
        stats.nonzeros = matrix.nnz();
        Ok(stats)
    }
}

/// Write every column of a matrix, one per line.
pub fn write_matrix<W: Write>(matrix: &BoundaryMatrix, output: &mut W) -> Result<(), FiltrationError> {
    let mut writer = BarcodeWriter::new(output);
    for (j, column) in matrix.iter().enumerate() {
        writer.write_column(j, column)?;
    }
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::set_strict_parsing;
    use serial_test::serial;

    const FILLED_TRIANGLE: &str = "\
0 0 0
0 0 1
0 0 2
1 1 0 1
1 1 1 2
1 1 0 2
2 2 0 1 2
";

    fn dump(cmd: &BoundaryCommand) -> (String, BoundaryStats) {
        let mut output = Vec::new();
        let stats = cmd.run_reader(FILLED_TRIANGLE.as_bytes(), &mut output).unwrap();
        (String::from_utf8(output).unwrap(), stats)
    }

    #[test]
    #[serial]
    fn test_boundary_dump() {
        set_strict_parsing(false);
        let (out, stats) = dump(&BoundaryCommand::new());

        assert_eq!(out, "0:\n1:\n2:\n3: 0 1\n4: 1 2\n5: 0 2\n6: 3 4 5\n");
        assert_eq!(stats.columns, 7);
        assert_eq!(stats.nonzeros, 9);
        assert_eq!(stats.column_additions, 0);
    }

    #[test]
    #[serial]
    fn test_reduced_dump() {
        set_strict_parsing(false);
        let (out, stats) = dump(&BoundaryCommand::new().with_reduced(true));

        assert_eq!(out, "0:\n1:\n2:\n3: 0 1\n4: 1 2\n5:\n6: 3 4 5\n");
        assert_eq!(stats.nonzeros, 7);
        assert_eq!(stats.column_additions, 2);
    }
}
