//! Surface data model.
//!
//! A [`Surface`] is a tessellation of one physical surface: parallel x/y/z
//! coordinate arrays plus one or more element [`Section`]s, each a run of
//! same-shape elements described by a connectivity array.
//!
//! All ingestion validation lives here. Source connectivity is 1-based;
//! the shift to 0-based indices happens once, in [`Section::new`], so the
//! rest of the crate never carries `-1` adjustments. A constructed
//! `Surface` is immutable and guaranteed internally consistent: every
//! connectivity entry addresses a real vertex and the element total
//! matches the declared metadata count.

mod element;

pub use element::ElementType;

use nalgebra::Point3;

use crate::error::{MatchError, Result};

/// A named group of elements sharing one shape.
///
/// Holds the section's connectivity as 0-based vertex indices, converted
/// and range-checked at construction.
#[derive(Debug, Clone)]
pub struct Section {
    name: String,
    element_type: ElementType,
    connectivity: Vec<usize>,
}

impl Section {
    /// Create a section from raw 1-based connectivity.
    ///
    /// `vertex_count` is the number of vertices in the owning surface.
    /// Every raw index must lie in `1..=vertex_count`; anything else is
    /// rejected before a single element is accepted, reported with the
    /// offending element's position within the section.
    pub fn new(
        name: impl Into<String>,
        element_type: ElementType,
        raw_connectivity: &[i64],
        vertex_count: usize,
    ) -> Result<Section> {
        let name = name.into();
        let nodes = element_type.node_count();

        if raw_connectivity.len() % nodes != 0 {
            return Err(MatchError::RaggedConnectivity {
                section: name,
                len: raw_connectivity.len(),
                nodes,
            });
        }

        let mut connectivity = Vec::with_capacity(raw_connectivity.len());
        for (i, &raw) in raw_connectivity.iter().enumerate() {
            if raw < 1 || raw as usize > vertex_count {
                return Err(MatchError::InvalidVertexIndex {
                    section: name,
                    element: i / nodes,
                    vertex: raw,
                    vertex_count,
                });
            }
            connectivity.push(raw as usize - 1);
        }

        Ok(Section {
            name,
            element_type,
            connectivity,
        })
    }

    /// The section's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The section's element shape.
    pub fn element_type(&self) -> ElementType {
        self.element_type
    }

    /// The 0-based connectivity array.
    pub fn connectivity(&self) -> &[usize] {
        &self.connectivity
    }

    /// Number of elements in this section.
    pub fn element_count(&self) -> usize {
        self.connectivity.len() / self.element_type.node_count()
    }
}

/// An immutable, validated surface tessellation.
#[derive(Debug, Clone)]
pub struct Surface {
    name: String,
    x: Vec<f64>,
    y: Vec<f64>,
    z: Vec<f64>,
    sections: Vec<Section>,
}

impl Surface {
    /// Assemble a surface from coordinate arrays and element sections,
    /// checking everything against the declared metadata counts.
    ///
    /// Fails if any coordinate array length disagrees with
    /// `vertex_count`, if the sections' element total disagrees with
    /// `element_count`, or if the sections do not all share one element
    /// type. Connectivity range errors are caught earlier, in
    /// [`Section::new`].
    pub fn new(
        name: impl Into<String>,
        vertex_count: usize,
        element_count: usize,
        x: Vec<f64>,
        y: Vec<f64>,
        z: Vec<f64>,
        sections: Vec<Section>,
    ) -> Result<Surface> {
        let name = name.into();

        for coords in [&x, &y, &z] {
            if coords.len() != vertex_count {
                return Err(MatchError::CountMismatch {
                    surface: name,
                    kind: "vertices",
                    expected: vertex_count,
                    found: coords.len(),
                });
            }
        }

        if let Some(first) = sections.first() {
            for section in &sections[1..] {
                if section.element_type() != first.element_type() {
                    return Err(MatchError::MixedElementTypes {
                        surface: name,
                        first: first.element_type(),
                        second: section.element_type(),
                    });
                }
            }
        }

        let found: usize = sections.iter().map(Section::element_count).sum();
        if found != element_count {
            return Err(MatchError::CountMismatch {
                surface: name,
                kind: "elements",
                expected: element_count,
                found,
            });
        }

        Ok(Surface {
            name,
            x,
            y,
            z,
            sections,
        })
    }

    /// The surface's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.x.len()
    }

    /// Total number of elements across all sections.
    pub fn element_count(&self) -> usize {
        self.sections.iter().map(Section::element_count).sum()
    }

    /// The element shape shared by all sections, or `None` for a surface
    /// with no sections.
    pub fn element_type(&self) -> Option<ElementType> {
        self.sections.first().map(Section::element_type)
    }

    /// Position of vertex `i` (0-based).
    ///
    /// # Panics
    /// Panics if `i` is out of range; validated connectivity never is.
    pub fn position(&self, i: usize) -> Point3<f64> {
        Point3::new(self.x[i], self.y[i], self.z[i])
    }

    /// The element sections, in ingestion order.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// The x coordinate array.
    pub fn coords_x(&self) -> &[f64] {
        &self.x
    }

    /// The y coordinate array.
    pub fn coords_y(&self) -> &[f64] {
        &self.y
    }

    /// The z coordinate array.
    pub fn coords_z(&self) -> &[f64] {
        &self.z
    }
}
