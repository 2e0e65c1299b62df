//! Correspondence between a query surface and a reference surface.
//!
//! For every query element centroid, finds the nearest reference element
//! centroid through the spatial index and records the pair with its
//! Euclidean distance. The query stage is read-only against the built
//! index, so it parallelizes trivially; sequential and parallel
//! execution produce identical output.

use nalgebra::Point3;
use rayon::prelude::*;

use crate::centroid::surface_centroids;
use crate::error::Result;
use crate::spatial::KdTree;
use crate::surface::Surface;

/// One query-to-reference match.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Correspondence {
    /// Index of the query element.
    pub query: usize,
    /// Index of the matched reference element.
    pub reference: usize,
    /// Euclidean distance between the two centroids.
    pub distance: f64,
}

/// Options for the correspondence query stage.
#[derive(Debug, Clone)]
pub struct MatchOptions {
    /// Whether to run queries on parallel workers (default: true).
    pub parallel: bool,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self { parallel: true }
    }
}

impl MatchOptions {
    /// Set whether to use parallel execution.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Create options for single-threaded execution.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

/// Result of matching a query surface against a reference surface.
#[derive(Debug, Clone)]
pub struct MatchResult {
    /// One record per query element, in query element order.
    pub correspondences: Vec<Correspondence>,
    /// Centroids of the reference surface's elements, for downstream
    /// geometric interpolation.
    pub reference_centroids: Vec<Point3<f64>>,
}

/// Match each query centroid against an already-built reference index.
///
/// Returns one [`Correspondence`] per query centroid, in input order.
pub fn match_centroids(
    tree: &KdTree,
    queries: &[Point3<f64>],
    options: &MatchOptions,
) -> Vec<Correspondence> {
    let lookup = |(i, point): (usize, &Point3<f64>)| {
        let (reference, distance) = tree.nearest(point);
        Correspondence {
            query: i,
            reference,
            distance,
        }
    };

    if options.parallel {
        queries.par_iter().enumerate().map(lookup).collect()
    } else {
        queries.iter().enumerate().map(lookup).collect()
    }
}

/// Run the full correspondence pipeline.
///
/// Extracts centroids from both surfaces, builds the spatial index over
/// the reference centroids, and matches every query centroid. Fails if
/// the reference surface has no elements.
///
/// # Example
///
/// ```
/// use surfmatch::correspond::{match_surfaces, MatchOptions};
/// use surfmatch::surface::{ElementType, Section, Surface};
///
/// let tris = Section::new("tris", ElementType::Tri3, &[1, 2, 3], 3).unwrap();
/// let cad = Surface::new(
///     "cad", 3, 1,
///     vec![0.0, 3.0, 0.0],
///     vec![0.0, 0.0, 3.0],
///     vec![0.0, 0.0, 0.0],
///     vec![tris],
/// ).unwrap();
///
/// let quads = Section::new("quads", ElementType::Quad4, &[1, 2, 3, 4], 4).unwrap();
/// let mesh = Surface::new(
///     "mesh", 4, 1,
///     vec![0.0, 2.0, 2.0, 0.0],
///     vec![0.0, 0.0, 2.0, 2.0],
///     vec![0.0, 0.0, 0.0, 0.0],
///     vec![quads],
/// ).unwrap();
///
/// let result = match_surfaces(&cad, &mesh, &MatchOptions::default()).unwrap();
/// assert_eq!(result.correspondences.len(), 1);
/// assert_eq!(result.correspondences[0].reference, 0);
/// ```
pub fn match_surfaces(
    reference: &Surface,
    query: &Surface,
    options: &MatchOptions,
) -> Result<MatchResult> {
    let reference_centroids = surface_centroids(reference);
    let tree = KdTree::build(&reference_centroids)?;

    let query_centroids = surface_centroids(query);
    let correspondences = match_centroids(&tree, &query_centroids, options);

    Ok(MatchResult {
        correspondences,
        reference_centroids,
    })
}
