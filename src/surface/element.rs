//! Supported element shapes.

use std::fmt;

/// The fixed element shapes this tool handles.
///
/// Tag values follow the CGNS element-type numbering used by the input
/// data: `TRI_3 = 5`, `QUAD_4 = 7`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementType {
    /// Linear triangle (3 vertices per element).
    Tri3,
    /// Linear quadrilateral (4 vertices per element).
    Quad4,
}

impl ElementType {
    /// Resolve an element-type tag, or `None` if the tag is not a
    /// supported surface shape.
    pub fn from_tag(tag: i64) -> Option<ElementType> {
        match tag {
            5 => Some(ElementType::Tri3),
            7 => Some(ElementType::Quad4),
            _ => None,
        }
    }

    /// The tag value for this shape.
    pub fn tag(self) -> i64 {
        match self {
            ElementType::Tri3 => 5,
            ElementType::Quad4 => 7,
        }
    }

    /// Number of vertices per element.
    pub fn node_count(self) -> usize {
        match self {
            ElementType::Tri3 => 3,
            ElementType::Quad4 => 4,
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementType::Tri3 => write!(f, "TRI_3"),
            ElementType::Quad4 => write!(f, "QUAD_4"),
        }
    }
}
