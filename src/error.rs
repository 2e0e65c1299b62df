//! Error types for surfmatch.
//!
//! Every error here indicates malformed input data, not a transient
//! condition; callers are expected to fail fast and produce no partial
//! output.

use std::path::PathBuf;
use thiserror::Error;

use crate::surface::ElementType;

/// Result type alias using [`MatchError`].
pub type Result<T> = std::result::Result<T, MatchError>;

/// Errors that can occur while ingesting surfaces or building the
/// correspondence.
#[derive(Error, Debug)]
pub enum MatchError {
    /// Declared metadata disagrees with the data actually found.
    #[error("surface {surface}: declared {expected} {kind}, found {found}")]
    CountMismatch {
        /// Name of the surface being ingested.
        surface: String,
        /// What was counted ("vertices" or "elements").
        kind: &'static str,
        /// The declared count.
        expected: usize,
        /// The count actually found.
        found: usize,
    },

    /// An element section carries a type tag this tool does not handle.
    #[error("section {section}: unsupported element type tag {tag}")]
    UnsupportedElementType {
        /// Name of the offending section.
        section: String,
        /// The unrecognized tag value.
        tag: i64,
    },

    /// A connectivity entry references a non-existent vertex.
    #[error(
        "section {section}: element {element} references vertex {vertex}, \
         valid range is 1..={vertex_count}"
    )]
    InvalidVertexIndex {
        /// Name of the offending section.
        section: String,
        /// Position of the offending element within the section.
        element: usize,
        /// The offending raw (1-based) vertex index.
        vertex: i64,
        /// Number of vertices in the owning surface.
        vertex_count: usize,
    },

    /// A section's connectivity length is not a whole number of elements.
    #[error(
        "section {section}: connectivity length {len} is not a multiple of \
         {nodes} nodes per element"
    )]
    RaggedConnectivity {
        /// Name of the offending section.
        section: String,
        /// Length of the connectivity array.
        len: usize,
        /// Nodes per element for the section's type.
        nodes: usize,
    },

    /// A surface mixes element types across its sections.
    #[error("surface {surface}: sections mix element types ({first} and {second})")]
    MixedElementTypes {
        /// Name of the surface being ingested.
        surface: String,
        /// Type of the first section.
        first: ElementType,
        /// The conflicting type.
        second: ElementType,
    },

    /// The reference surface has no elements, so no nearest-neighbor
    /// answer exists.
    #[error("reference surface has no elements")]
    EmptyReference,

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error loading a surface from a file.
    #[error("failed to load surface from {path}: {message}")]
    LoadError {
        /// The file path.
        path: PathBuf,
        /// Error message.
        message: String,
    },
}
