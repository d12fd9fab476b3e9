//! Command implementations for the barcodes CLI.

pub mod boundary;
pub mod generate;
pub mod persistence;

pub use boundary::{write_matrix, BoundaryCommand, BoundaryStats};
pub use generate::{GenerateCommand, GenerateConfig, GenerateStats, MAX_GENERATED_DIMENSION};
pub use persistence::{PersistenceCommand, PersistenceStats};
