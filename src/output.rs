//! Efficient output formatting for barcodes, matrices and filtrations.
//!
//! Uses itoa for integer formatting and ryu for float formatting
//! to avoid allocation in the hot path.

use crate::barcode::BarcodeInterval;
use crate::filtration::FiltrationError;
use crate::matrix::SparseColumn;
use crate::simplex::Simplex;
use std::io::{BufWriter, Write};

/// Buffer size for BarcodeWriter (1MB default).
const DEFAULT_BUFFER_SIZE: usize = 1024 * 1024;

/// Layout of one barcode line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// `Dimension: 0, Birth: 0.0, Death: inf`
    #[default]
    Text,
    /// `0<TAB>0.0<TAB>inf`
    Tsv,
}

impl OutputFormat {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Some(Self::Text),
            "tsv" | "tab" => Some(Self::Tsv),
            _ => None,
        }
    }
}

/// Buffered writer for barcode reports.
pub struct BarcodeWriter<W: Write> {
    writer: BufWriter<W>,
    itoa_buf: itoa::Buffer,
    ryu_buf: ryu::Buffer,
}

impl<W: Write> BarcodeWriter<W> {
    /// Create a new BarcodeWriter with the default buffer.
    pub fn new(output: W) -> Self {
        Self::with_capacity(DEFAULT_BUFFER_SIZE, output)
    }

    /// Create a new BarcodeWriter with specified buffer size.
    pub fn with_capacity(capacity: usize, output: W) -> Self {
        Self {
            writer: BufWriter::with_capacity(capacity, output),
            itoa_buf: itoa::Buffer::new(),
            ryu_buf: ryu::Buffer::new(),
        }
    }

    /// Write one barcode interval followed by newline.
    pub fn write_interval(
        &mut self,
        interval: &BarcodeInterval,
        format: OutputFormat,
    ) -> Result<(), FiltrationError> {
        match format {
            OutputFormat::Text => {
                self.write_bytes(b"Dimension: ")?;
                self.write_int(interval.dimension)?;
                self.write_bytes(b", Birth: ")?;
                self.write_time(interval.birth)?;
                self.write_bytes(b", Death: ")?;
                self.write_time(interval.death)?;
            }
            OutputFormat::Tsv => {
                self.write_int(interval.dimension)?;
                self.write_bytes(b"\t")?;
                self.write_time(interval.birth)?;
                self.write_bytes(b"\t")?;
                self.write_time(interval.death)?;
            }
        }
        self.write_bytes(b"\n")
    }

    /// Write a matrix column as `j: r1 r2 ...` followed by newline.
    pub fn write_column(&mut self, j: usize, column: &SparseColumn) -> Result<(), FiltrationError> {
        self.write_int(j)?;
        self.write_bytes(b":")?;
        for &row in column.rows() {
            self.write_bytes(b" ")?;
            self.write_int(row)?;
        }
        self.write_bytes(b"\n")
    }

    /// Write a simplex in the filtration file layout: `time dimension v1 v2 ...`.
    pub fn write_simplex(&mut self, simplex: &Simplex) -> Result<(), FiltrationError> {
        self.write_float(simplex.time)?;
        self.write_bytes(b" ")?;
        self.write_int(simplex.dimension)?;
        for &v in &simplex.vertices {
            self.write_bytes(b" ")?;
            self.write_int(v)?;
        }
        self.write_bytes(b"\n")
    }

    /// Write a filtration time; positive infinity prints as `inf`.
    #[inline]
    pub fn write_time(&mut self, t: f64) -> Result<(), FiltrationError> {
        if t == f64::INFINITY {
            self.write_bytes(b"inf")
        } else {
            self.write_float(t)
        }
    }

    /// Write an integer using itoa.
    #[inline]
    pub fn write_int<I: itoa::Integer>(&mut self, n: I) -> Result<(), FiltrationError> {
        self.writer.write_all(self.itoa_buf.format(n).as_bytes())?;
        Ok(())
    }

    /// Write a float using ryu.
    #[inline]
    pub fn write_float(&mut self, f: f64) -> Result<(), FiltrationError> {
        self.writer.write_all(self.ryu_buf.format(f).as_bytes())?;
        Ok(())
    }

    /// Write raw bytes.
    #[inline]
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), FiltrationError> {
        self.writer.write_all(bytes)?;
        Ok(())
    }

    /// Flush the output buffer.
    pub fn flush(&mut self) -> Result<(), FiltrationError> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(intervals: &[BarcodeInterval], format: OutputFormat) -> String {
        let mut output = Vec::new();
        {
            let mut writer = BarcodeWriter::new(&mut output);
            for interval in intervals {
                writer.write_interval(interval, format).unwrap();
            }
            writer.flush().unwrap();
        }
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_text_format() {
        let out = render(
            &[
                BarcodeInterval::new(0, 0.0, 1.0),
                BarcodeInterval::new(0, 0.0, f64::INFINITY),
            ],
            OutputFormat::Text,
        );
        assert_eq!(
            out,
            "Dimension: 0, Birth: 0.0, Death: 1.0\nDimension: 0, Birth: 0.0, Death: inf\n"
        );
    }

    #[test]
    fn test_tsv_format() {
        let out = render(&[BarcodeInterval::new(1, 0.25, f64::INFINITY)], OutputFormat::Tsv);
        assert_eq!(out, "1\t0.25\tinf\n");
    }

    #[test]
    fn test_write_column() {
        let mut output = Vec::new();
        {
            let mut writer = BarcodeWriter::new(&mut output);
            writer.write_column(6, &SparseColumn::from_sorted(vec![3, 4, 5])).unwrap();
            writer.write_column(0, &SparseColumn::new()).unwrap();
            writer.flush().unwrap();
        }
        assert_eq!(output, b"6: 3 4 5\n0:\n");
    }

    #[test]
    fn test_write_simplex() {
        let mut output = Vec::new();
        {
            let mut writer = BarcodeWriter::new(&mut output);
            writer.write_simplex(&Simplex::new(0.5, 2, vec![3, 1, 2])).unwrap();
            writer.flush().unwrap();
        }
        assert_eq!(output, b"0.5 2 1 2 3\n");
    }

    #[test]
    fn test_parse_format() {
        assert_eq!(OutputFormat::parse("TSV"), Some(OutputFormat::Tsv));
        assert_eq!(OutputFormat::parse("text"), Some(OutputFormat::Text));
        assert_eq!(OutputFormat::parse("json"), None);
    }
}
