// Clippy allows for the whole crate
#![allow(clippy::needless_range_loop)]

//! Persistent homology barcodes of simplicial filtrations.
//!
//! This library turns a time-ordered list of simplices into the
//! birth/death intervals of its topological features, using the standard
//! boundary-matrix reduction over GF(2).
//!
//! # Pipeline
//!
//! - **Loading**: parse `time dimension v1 v2 ...` lines and stably sort by time
//! - **Boundary matrix**: one sparse column of face indices per simplex
//! - **Reduction**: left-to-right column additions until every low is unique
//! - **Extraction**: pair lows with their columns, everything else is essential
//!
//! # Example
//!
//! ```rust,no_run
//! use persistence_barcodes::{filtration, persistence::compute_persistence};
//!
//! let f = filtration::read_filtration("filtration.txt").unwrap();
//! let result = compute_persistence(&f);
//! for bar in &result.barcode {
//!     println!("{}", bar);
//! }
//! ```

pub mod barcode;
pub mod commands;
pub mod config;
pub mod filtration;
pub mod matrix;
pub mod output;
pub mod parsing;
pub mod persistence;
pub mod simplex;

// Re-export commonly used types
pub use barcode::{extract_barcodes, persistence_pairs, Barcode, BarcodeInterval, PersistencePair};
pub use filtration::{parse_filtration, read_filtration, Filtration, FiltrationError};
pub use matrix::{build_boundary_matrix, reduce, BoundaryMatrix, SparseColumn};
pub use persistence::{compute_persistence, Persistence, StageTimings};
pub use simplex::Simplex;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::barcode::{extract_barcodes, Barcode, BarcodeInterval};
    pub use crate::commands::{BoundaryCommand, GenerateCommand, PersistenceCommand};
    pub use crate::filtration::{parse_filtration, read_filtration, Filtration};
    pub use crate::matrix::{build_boundary_matrix, reduce, BoundaryMatrix};
    pub use crate::persistence::compute_persistence;
    pub use crate::simplex::Simplex;
}
