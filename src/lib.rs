//! # Surfmatch
//!
//! Geometric correspondence between two tessellations of the same
//! physical surface: a fine, trusted CAD triangulation and a coarse
//! quadrilateral mesh. For every quad element, surfmatch finds the
//! reference triangle whose centroid is nearest in 3D and reports the
//! distance. The correspondence feeds later high-order mesh generation,
//! which attaches the reference surface's precise shape to the coarse
//! mesh.
//!
//! ## Pipeline
//!
//! 1. **Centroid extraction** — one centroid per element from the
//!    connectivity and coordinate arrays of each surface.
//! 2. **Index build** — a static k-d tree over the reference centroids.
//! 3. **Query** — an exact nearest-neighbor lookup per query centroid,
//!    optionally on parallel workers.
//!
//! ## Quick Start
//!
//! ```no_run
//! use surfmatch::prelude::*;
//!
//! let cad = surfmatch::io::load_surface("wing_cad.surf").unwrap();
//! let mesh = surfmatch::io::load_surface("wing_coarse.surf").unwrap();
//!
//! let result = match_surfaces(&cad, &mesh, &MatchOptions::default()).unwrap();
//! for record in &result.correspondences {
//!     println!(
//!         "Quad[{}] -> Tri[{}] at distance {}",
//!         record.query, record.reference, record.distance
//!     );
//! }
//! ```
//!
//! ## Building Surfaces Programmatically
//!
//! Surfaces carry 1-based connectivity on ingestion (the convention of
//! the originating mesh format) and are fully validated at construction:
//!
//! ```
//! use surfmatch::surface::{ElementType, Section, Surface};
//!
//! let section = Section::new("tris", ElementType::Tri3, &[1, 2, 3], 3).unwrap();
//! let cad = Surface::new(
//!     "cad",
//!     3,                        // declared vertex count
//!     1,                        // declared element count
//!     vec![0.0, 1.0, 0.5],
//!     vec![0.0, 0.0, 1.0],
//!     vec![0.0, 0.0, 0.0],
//!     vec![section],
//! )
//! .unwrap();
//! assert_eq!(cad.element_count(), 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod centroid;
pub mod correspond;
pub mod error;
pub mod io;
pub mod spatial;
pub mod surface;

/// Prelude module for convenient imports.
///
/// ```
/// use surfmatch::prelude::*;
/// ```
pub mod prelude {
    pub use crate::centroid::surface_centroids;
    pub use crate::correspond::{
        match_centroids, match_surfaces, Correspondence, MatchOptions, MatchResult,
    };
    pub use crate::error::{MatchError, Result};
    pub use crate::spatial::KdTree;
    pub use crate::surface::{ElementType, Section, Surface};
}

// Re-export nalgebra types for convenience
pub use nalgebra;
