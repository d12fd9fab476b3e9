//! Filtration loading.
//!
//! A filtration file holds one simplex per line:
//!
//! ```text
//! time dimension v1 v2 ...
//! ```
//!
//! Fields are whitespace-separated, vertices may appear in any order, and
//! blank lines and `#` comments are ignored. The loaded simplices are stably
//! sorted by time; the resulting position is the filtration index used by
//! every later stage.

use crate::config::is_strict_parsing;
use crate::parsing::{find_lines, parse_time, parse_u32_fast, parse_usize_fast, tokens};
use crate::simplex::{Simplex, Vertex};
use memmap2::Mmap;
use rayon::prelude::*;
use std::fs::File;
use std::io::{self, Read};
use std::ops::Index;
use std::path::Path;
use std::slice;
use thiserror::Error;

/// Minimum file size to use mmap (smaller files use buffered I/O)
const MMAP_THRESHOLD: u64 = 64 * 1024;

/// Minimum simplex count before the time sort runs on the rayon pool.
pub const PARALLEL_THRESHOLD: usize = 10_000;

/// Errors that can occur while loading a filtration.
#[derive(Error, Debug)]
pub enum FiltrationError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Invalid filtration: {0}")]
    InvalidFormat(String),
}

pub type Result<T> = std::result::Result<T, FiltrationError>;

/// A time-sorted sequence of simplices.
#[derive(Debug, Clone, Default)]
pub struct Filtration {
    simplices: Vec<Simplex>,
}

impl Filtration {
    /// Create an empty filtration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a filtration from simplices in any order.
    ///
    /// The sort is stable, so simplices sharing a time keep their input
    /// order. Pairing can depend on that order when several simplices with
    /// the same time compete for one pivot row.
    pub fn from_simplices(mut simplices: Vec<Simplex>) -> Self {
        sort_by_time(&mut simplices);
        Self { simplices }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.simplices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.simplices.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Simplex> {
        self.simplices.get(index)
    }

    /// Filtration time of the simplex at `index`.
    #[inline]
    pub fn time(&self, index: usize) -> f64 {
        self.simplices[index].time
    }

    /// Dimension of the simplex at `index`.
    #[inline]
    pub fn dimension(&self, index: usize) -> usize {
        self.simplices[index].dimension
    }

    /// Largest simplex dimension, or None for an empty filtration.
    pub fn max_dimension(&self) -> Option<usize> {
        self.simplices.iter().map(|s| s.dimension).max()
    }

    pub fn iter(&self) -> slice::Iter<'_, Simplex> {
        self.simplices.iter()
    }

    pub fn as_slice(&self) -> &[Simplex] {
        &self.simplices
    }

    pub fn into_simplices(self) -> Vec<Simplex> {
        self.simplices
    }
}

impl Index<usize> for Filtration {
    type Output = Simplex;

    fn index(&self, index: usize) -> &Simplex {
        &self.simplices[index]
    }
}

impl<'a> IntoIterator for &'a Filtration {
    type Item = &'a Simplex;
    type IntoIter = slice::Iter<'a, Simplex>;

    fn into_iter(self) -> Self::IntoIter {
        self.simplices.iter()
    }
}

/// Stable sort by filtration time.
fn sort_by_time(simplices: &mut [Simplex]) {
    if simplices.len() >= PARALLEL_THRESHOLD {
        simplices.par_sort_by(|a, b| a.time.total_cmp(&b.time));
    } else {
        simplices.sort_by(|a, b| a.time.total_cmp(&b.time));
    }
}

/// Parse one content line into a simplex.
///
/// Returns `Ok(None)` when a permissive parse drops the line.
pub fn parse_simplex_line(line: &[u8], line_number: usize) -> Result<Option<Simplex>> {
    let strict = is_strict_parsing();
    let parse_error = |message: String| FiltrationError::Parse {
        line: line_number,
        message,
    };

    let mut fields = tokens(line);

    let time = match fields.next().and_then(parse_time) {
        Some(t) if t.is_finite() || !strict => t,
        Some(t) => return Err(parse_error(format!("Non-finite time: {}", t))),
        None if strict => return Err(parse_error("Missing or invalid time".to_string())),
        None => return Ok(None),
    };

    let dimension = match fields.next().and_then(parse_usize_fast) {
        Some(d) => d,
        None if strict => return Err(parse_error("Missing or invalid dimension".to_string())),
        None => return Ok(None),
    };

    let mut vertices: Vec<Vertex> = Vec::with_capacity(dimension.min(8) + 1);
    for field in fields {
        match parse_u32_fast(field) {
            Some(v) => vertices.push(v),
            None if strict => {
                return Err(parse_error(format!(
                    "Invalid vertex '{}'",
                    String::from_utf8_lossy(field)
                )))
            }
            None => break,
        }
    }

    if strict && vertices.len() != dimension.saturating_add(1) {
        return Err(parse_error(format!(
            "Dimension {} expects {} vertices, got {}",
            dimension,
            dimension.saturating_add(1),
            vertices.len()
        )));
    }

    let vertices_read = vertices.len();
    let simplex = Simplex::new(time, dimension, vertices);

    if strict && simplex.vertices.len() != vertices_read {
        return Err(parse_error("Duplicate vertex".to_string()));
    }

    Ok(Some(simplex))
}

/// Parse a filtration from raw bytes.
pub fn parse_filtration_bytes(data: &[u8]) -> Result<Filtration> {
    let spans = find_lines(data);
    let mut simplices = Vec::with_capacity(spans.len());

    for span in spans {
        if let Some(simplex) = parse_simplex_line(&data[span.start..span.end], span.number)? {
            simplices.push(simplex);
        }
    }

    Ok(Filtration::from_simplices(simplices))
}

/// Parse a filtration from a string (useful for testing).
pub fn parse_filtration(content: &str) -> Result<Filtration> {
    parse_filtration_bytes(content.as_bytes())
}

/// Read a filtration from any readable source.
pub fn read_filtration_from<R: Read>(mut reader: R) -> Result<Filtration> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    parse_filtration_bytes(&data)
}

/// Read a filtration file.
///
/// Large files are memory-mapped; small ones are read into a buffer.
pub fn read_filtration<P: AsRef<Path>>(path: P) -> Result<Filtration> {
    let file = File::open(path)?;
    let file_size = file.metadata()?.len();

    if file_size >= MMAP_THRESHOLD {
        // SAFETY: the map is read-only and dropped before this function returns.
        let mmap = unsafe { Mmap::map(&file)? };
        parse_filtration_bytes(&mmap)
    } else {
        read_filtration_from(file)
    }
}

/// Read a filtration file, treating an unopenable file as empty.
///
/// The open failure is reported on stderr and an empty filtration is
/// returned. Failures after the file is open (read errors, strict-mode
/// parse errors) are still returned as errors.
pub fn read_filtration_or_empty<P: AsRef<Path>>(path: P) -> Result<Filtration> {
    let path = path.as_ref();
    match File::open(path) {
        Ok(_) => read_filtration(path),
        Err(e) => {
            eprintln!("Error opening file {}: {}", path.display(), e);
            Ok(Filtration::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::set_strict_parsing;
    use serial_test::serial;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    #[serial]
    fn test_parse_sorts_by_time() {
        set_strict_parsing(false);
        let content = "1 1 0 1\n0 0 1\n0 0 0\n";
        let f = parse_filtration(content).unwrap();

        assert_eq!(f.len(), 3);
        assert_eq!(f[0].vertices, vec![1]);
        assert_eq!(f[1].vertices, vec![0]);
        assert_eq!(f[2].vertices, vec![0, 1]);
        assert_eq!(f.time(2), 1.0);
        assert_eq!(f.max_dimension(), Some(1));
    }

    #[test]
    #[serial]
    fn test_parse_sorts_vertices() {
        set_strict_parsing(false);
        let f = parse_filtration("2 2 5 1 3\n").unwrap();
        assert_eq!(f[0].vertices, vec![1, 3, 5]);
        assert_eq!(f.dimension(0), 2);
    }

    #[test]
    #[serial]
    fn test_ties_keep_input_order() {
        set_strict_parsing(false);
        let f = parse_filtration("0 0 3\n0 0 1\n0 0 2\n").unwrap();
        let order: Vec<_> = f.iter().map(|s| s.vertices[0]).collect();
        assert_eq!(order, vec![3, 1, 2]);
    }

    #[test]
    #[serial]
    fn test_skip_comments_and_blank_lines() {
        set_strict_parsing(false);
        let f = parse_filtration("# header\n\n0 0 0\n   \n0 0 1\n").unwrap();
        assert_eq!(f.len(), 2);
    }

    #[test]
    #[serial]
    fn test_empty_input() {
        set_strict_parsing(false);
        let f = parse_filtration("").unwrap();
        assert!(f.is_empty());
        assert_eq!(f.max_dimension(), None);
    }

    #[test]
    #[serial]
    fn test_permissive_drops_malformed_line() {
        set_strict_parsing(false);
        let f = parse_filtration("0 0 0\nbogus line\n0.5\n0 0 1\n").unwrap();
        assert_eq!(f.len(), 2);
    }

    #[test]
    #[serial]
    fn test_permissive_stops_at_bad_vertex() {
        set_strict_parsing(false);
        let f = parse_filtration("1 1 0 1 x 7\n").unwrap();
        assert_eq!(f[0].vertices, vec![0, 1]);
    }

    #[test]
    #[serial]
    fn test_strict_rejects_vertex_count_mismatch() {
        set_strict_parsing(true);
        let result = parse_filtration("0 0 0\n1 1 0\n");
        set_strict_parsing(false);

        match result {
            Err(FiltrationError::Parse { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    #[serial]
    fn test_strict_rejects_malformed_line() {
        set_strict_parsing(true);
        let bad_time = parse_filtration("abc 0 0\n");
        let bad_vertex = parse_filtration("0 0 v\n");
        let duplicate = parse_filtration("0 1 4 4\n");
        let nan_time = parse_filtration("nan 0 0\n");
        set_strict_parsing(false);

        assert!(bad_time.is_err());
        assert!(bad_vertex.is_err());
        assert!(duplicate.is_err());
        assert!(nan_time.is_err());
    }

    #[test]
    #[serial]
    fn test_read_filtration_file() {
        set_strict_parsing(false);
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "0 0 0\n0 0 1\n1 1 0 1\n").unwrap();
        file.flush().unwrap();

        let f = read_filtration(file.path()).unwrap();
        assert_eq!(f.len(), 3);
    }

    #[test]
    #[serial]
    fn test_read_large_file_uses_same_parse() {
        set_strict_parsing(false);
        let mut file = NamedTempFile::new().unwrap();
        for v in 0..20_000u32 {
            writeln!(file, "{} 0 {}", 20_000 - v, v).unwrap();
        }
        file.flush().unwrap();

        let f = read_filtration(file.path()).unwrap();
        assert_eq!(f.len(), 20_000);
        assert_eq!(f[0].vertices, vec![19_999]);
        assert!(f.iter().zip(f.iter().skip(1)).all(|(a, b)| a.time <= b.time));
    }

    #[test]
    fn test_missing_file_degrades_to_empty() {
        let f = read_filtration_or_empty("/nonexistent/filtration.txt").unwrap();
        assert!(f.is_empty());
    }

    #[test]
    fn test_missing_file_is_error_for_plain_read() {
        let result = read_filtration("/nonexistent/filtration.txt");
        assert!(matches!(result, Err(FiltrationError::Io(_))));
    }
}
