//! Generate synthetic filtrations for benchmarking.
//!
//! Produces the Vietoris–Rips filtration of random points in the unit
//! square: every point is a vertex at time 0, every pair closer than the
//! radius is an edge at their distance, and (up to `max_dimension` 2) every
//! triangle whose edges are all present appears at its longest edge.
//!
//! Output is deterministic for a given seed and is written atomically.

use crate::filtration::FiltrationError;
use crate::output::BarcodeWriter;
use crate::simplex::Simplex;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHashMap;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tempfile::NamedTempFile;

/// Largest simplex dimension the generator emits.
pub const MAX_GENERATED_DIMENSION: usize = 2;

/// Configuration for the generate command.
#[derive(Debug, Clone)]
pub struct GenerateConfig {
    pub output: PathBuf,
    pub points: usize,
    pub max_dimension: usize,
    pub radius: f64,
    pub seed: u64,
    pub force: bool,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from("filtration.txt"),
            points: 100,
            max_dimension: 2,
            radius: 0.25,
            seed: 42,
            force: false,
        }
    }
}

/// Statistics from generate operation.
#[derive(Debug, Default, Clone)]
pub struct GenerateStats {
    pub vertices: usize,
    pub edges: usize,
    pub triangles: usize,
    pub elapsed_secs: f64,
}

impl GenerateStats {
    pub fn total(&self) -> usize {
        self.vertices + self.edges + self.triangles
    }
}

impl std::fmt::Display for GenerateStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} simplices ({} vertices, {} edges, {} triangles) in {:.2}s",
            self.total(),
            self.vertices,
            self.edges,
            self.triangles,
            self.elapsed_secs
        )
    }
}

/// Generate command.
pub struct GenerateCommand {
    config: GenerateConfig,
}

impl GenerateCommand {
    /// Create a new generate command with the given config.
    pub fn new(config: GenerateConfig) -> Self {
        Self { config }
    }

    fn validate(&self) -> Result<(), FiltrationError> {
        if self.config.max_dimension > MAX_GENERATED_DIMENSION {
            return Err(FiltrationError::InvalidFormat(format!(
                "max dimension {} is above the supported {}",
                self.config.max_dimension, MAX_GENERATED_DIMENSION
            )));
        }
        if !(self.config.radius.is_finite() && self.config.radius > 0.0) {
            return Err(FiltrationError::InvalidFormat(format!(
                "radius must be positive and finite, got {}",
                self.config.radius
            )));
        }
        Ok(())
    }

    /// Build the filtration in memory, in generation order.
    ///
    /// Vertices come first, then edges, then triangles, so every face is
    /// listed before its cofaces.
    pub fn generate(&self) -> Result<(Vec<Simplex>, GenerateStats), FiltrationError> {
        self.validate()?;

        let mut rng = SmallRng::seed_from_u64(self.config.seed);
        let n = self.config.points;
        let points: Vec<(f64, f64)> = (0..n)
            .map(|_| (rng.gen::<f64>(), rng.gen::<f64>()))
            .collect();

        let mut stats = GenerateStats::default();
        let mut simplices = Vec::new();

        for v in 0..n {
            simplices.push(Simplex::from_vertices(0.0, vec![v as u32]));
        }
        stats.vertices = n;
        if self.config.max_dimension == 0 {
            return Ok((simplices, stats));
        }

        // Edge lengths within the radius, keyed by (low, high) vertex
        let mut edges: FxHashMap<(usize, usize), f64> = FxHashMap::default();
        let mut neighbors: Vec<Vec<usize>> = vec![Vec::new(); n];
        for i in 0..n {
            for j in (i + 1)..n {
                let (dx, dy) = (points[i].0 - points[j].0, points[i].1 - points[j].1);
                let d = (dx * dx + dy * dy).sqrt();
                if d <= self.config.radius {
                    edges.insert((i, j), d);
                    neighbors[i].push(j);
                    simplices.push(Simplex::from_vertices(d, vec![i as u32, j as u32]));
                    stats.edges += 1;
                }
            }
        }
        if self.config.max_dimension == 1 {
            return Ok((simplices, stats));
        }

        for i in 0..n {
            for (a, &j) in neighbors[i].iter().enumerate() {
                // Neighbor lists are ascending, so k > j
                for &k in &neighbors[i][a + 1..] {
                    if let Some(&jk) = edges.get(&(j, k)) {
                        let t = edges[&(i, j)].max(edges[&(i, k)]).max(jk);
                        simplices.push(Simplex::from_vertices(
                            t,
                            vec![i as u32, j as u32, k as u32],
                        ));
                        stats.triangles += 1;
                    }
                }
            }
        }

        Ok((simplices, stats))
    }

    /// Generate and write the filtration file.
    pub fn run(&self) -> Result<GenerateStats, FiltrationError> {
        let start = Instant::now();
        let path = &self.config.output;

        if !self.config.force && path.exists() {
            return Err(FiltrationError::InvalidFormat(format!(
                "{} exists, use --force to overwrite",
                path.display()
            )));
        }

        let (simplices, mut stats) = self.generate()?;
        write_filtration_atomic(path, &simplices)?;

        stats.elapsed_secs = start.elapsed().as_secs_f64();
        Ok(stats)
    }
}

/// Write simplices in the filtration file layout via a temp file and rename.
fn write_filtration_atomic(path: &Path, simplices: &[Simplex]) -> Result<(), FiltrationError> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    {
        let mut writer = BarcodeWriter::new(tmp.as_file_mut());
        for simplex in simplices {
            writer.write_simplex(simplex)?;
        }
        writer.flush()?;
    }
    tmp.persist(path).map_err(|e| FiltrationError::Io(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filtration::{read_filtration, Filtration};
    use crate::matrix::build_boundary_matrix;
    use crate::persistence::compute_persistence;
    use tempfile::tempdir;

    fn config(points: usize, max_dimension: usize) -> GenerateConfig {
        GenerateConfig {
            points,
            max_dimension,
            radius: 0.4,
            seed: 7,
            ..Default::default()
        }
    }

    #[test]
    fn test_deterministic_for_seed() {
        let a = GenerateCommand::new(config(30, 2)).generate().unwrap().0;
        let b = GenerateCommand::new(config(30, 2)).generate().unwrap().0;
        assert_eq!(a, b);
    }

    #[test]
    fn test_faces_precede_cofaces() {
        let (simplices, stats) = GenerateCommand::new(config(25, 2)).generate().unwrap();
        assert_eq!(simplices.len(), stats.total());

        let f = Filtration::from_simplices(simplices);
        let matrix = build_boundary_matrix(&f);
        for (j, column) in matrix.iter().enumerate() {
            assert_eq!(column.len(), f[j].face_count());
            assert!(column.low().map_or(true, |low| low < j));
        }

        let result = compute_persistence(&f);
        let finite = result.barcode.len() - result.barcode.essential_count();
        assert_eq!(2 * finite + result.barcode.essential_count(), f.len());
    }

    #[test]
    fn test_dimension_one_has_no_triangles() {
        let (_, stats) = GenerateCommand::new(config(20, 1)).generate().unwrap();
        assert_eq!(stats.vertices, 20);
        assert_eq!(stats.triangles, 0);
    }

    #[test]
    fn test_rejects_bad_config() {
        assert!(GenerateCommand::new(config(5, 3)).generate().is_err());
        let mut bad_radius = config(5, 1);
        bad_radius.radius = -1.0;
        assert!(GenerateCommand::new(bad_radius).generate().is_err());
    }

    #[test]
    fn test_run_writes_readable_file() {
        let dir = tempdir().unwrap();
        let mut cfg = config(15, 2);
        cfg.output = dir.path().join("f.txt");

        let stats = GenerateCommand::new(cfg.clone()).run().unwrap();
        let loaded = read_filtration(&cfg.output).unwrap();
        assert_eq!(loaded.len(), stats.total());

        // Second run without --force refuses to overwrite
        assert!(GenerateCommand::new(cfg.clone()).run().is_err());
        cfg.force = true;
        assert!(GenerateCommand::new(cfg).run().is_ok());
    }
}
