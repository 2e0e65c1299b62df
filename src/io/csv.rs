//! CSV report output.
//!
//! Writes the correspondence records as comma-separated values with a
//! `query,reference,distance` header, optionally preceded by `#`
//! comment lines recording where the inputs came from and the mesh
//! order requested for the downstream high-order generator.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::correspond::Correspondence;
use crate::error::Result;

/// Where a report's input surfaces came from, for the report header.
#[derive(Debug, Clone)]
pub struct Provenance {
    /// Path of the reference (CAD) surface file.
    pub cad: PathBuf,
    /// Path of the query (mesh) surface file.
    pub mesh: PathBuf,
    /// Target polynomial order for downstream high-order generation.
    pub order: u32,
}

/// Write correspondence records to any writer.
///
/// Distances are written with `f64`'s shortest round-trip formatting.
pub fn write_records<W: Write>(
    writer: &mut W,
    records: &[Correspondence],
    provenance: Option<&Provenance>,
) -> Result<()> {
    if let Some(p) = provenance {
        writeln!(writer, "# cad: {}", p.cad.display())?;
        writeln!(writer, "# mesh: {}", p.mesh.display())?;
        writeln!(writer, "# order: {}", p.order)?;
    }
    writeln!(writer, "query,reference,distance")?;
    for record in records {
        writeln!(
            writer,
            "{},{},{}",
            record.query, record.reference, record.distance
        )?;
    }
    Ok(())
}

/// Write correspondence records to a file.
pub fn save<P: AsRef<Path>>(
    path: P,
    records: &[Correspondence],
    provenance: Option<&Provenance>,
) -> Result<()> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    write_records(&mut writer, records, provenance)
}
