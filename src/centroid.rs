//! Centroid extraction.
//!
//! Reduces a surface's elements to their centroids: the unweighted
//! arithmetic mean of each element's vertex positions. Centroids are
//! produced in section concatenation order, which defines the element
//! indices used throughout the correspondence output.

use nalgebra::{Point3, Vector3};

use crate::surface::{Section, Surface};

/// Compute one centroid per element of `surface`.
///
/// The output length always equals [`Surface::element_count`]; ingestion
/// validation guarantees every connectivity entry is a valid vertex, so
/// extraction itself cannot fail.
///
/// # Example
///
/// ```
/// use surfmatch::surface::{ElementType, Section, Surface};
/// use surfmatch::centroid::surface_centroids;
///
/// let section = Section::new("tris", ElementType::Tri3, &[1, 2, 3], 3).unwrap();
/// let surface = Surface::new(
///     "cad",
///     3,
///     1,
///     vec![0.0, 3.0, 0.0],
///     vec![0.0, 0.0, 3.0],
///     vec![0.0, 0.0, 0.0],
///     vec![section],
/// )
/// .unwrap();
///
/// let centers = surface_centroids(&surface);
/// assert_eq!(centers.len(), 1);
/// assert_eq!(centers[0], nalgebra::Point3::new(1.0, 1.0, 0.0));
/// ```
pub fn surface_centroids(surface: &Surface) -> Vec<Point3<f64>> {
    let mut centroids = Vec::with_capacity(surface.element_count());
    for section in surface.sections() {
        section_centroids(surface, section, &mut centroids);
    }
    centroids
}

/// Append the centroids of one section's elements to `out`.
fn section_centroids(surface: &Surface, section: &Section, out: &mut Vec<Point3<f64>>) {
    let nodes = section.element_type().node_count();
    let divisor = nodes as f64;

    for element in section.connectivity().chunks_exact(nodes) {
        let sum: Vector3<f64> = element
            .iter()
            .map(|&v| surface.position(v).coords)
            .sum();
        out.push(Point3::from(sum / divisor));
    }
}
