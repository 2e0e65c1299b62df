//! Surfmatch CLI - match a coarse quad mesh against a CAD triangulation.
//!
//! Usage: surfmatch --cad <CAD> --mesh <MESH> --output <OUTPUT> [OPTIONS]
//!
//! Run `surfmatch --help` for details.

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Parser;

use surfmatch::correspond::{match_surfaces, MatchOptions};
use surfmatch::io::{self, Provenance};
use surfmatch::surface::Surface;

#[derive(Parser)]
#[command(name = "surfmatch")]
#[command(author, version, about = "Centroid correspondence from a coarse quad mesh to a CAD triangulation", long_about = None)]
struct Cli {
    /// Reference CAD surface file (triangles)
    #[arg(long)]
    cad: PathBuf,

    /// Coarse linear mesh file (quadrilaterals)
    #[arg(long)]
    mesh: PathBuf,

    /// Output CSV report
    #[arg(long)]
    output: PathBuf,

    /// Polynomial order for the downstream high-order generator
    /// (recorded in the report, does not affect matching)
    #[arg(long, default_value = "2")]
    order: u32,

    /// Print per-surface and per-record diagnostics
    #[arg(long)]
    verbose: bool,

    /// Use single-threaded execution (for benchmarking)
    #[arg(long)]
    sequential: bool,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let cad = io::load_surface(&cli.cad)?;
    if cli.verbose {
        print_surface_info("CAD", &cli.cad, &cad);
    }

    let mesh = io::load_surface(&cli.mesh)?;
    if cli.verbose {
        print_surface_info("mesh", &cli.mesh, &mesh);
    }

    let options = MatchOptions::default().with_parallel(!cli.sequential);
    let mode = if cli.sequential { "sequential" } else { "parallel" };

    let start = Instant::now();
    let result = match_surfaces(&cad, &mesh, &options)?;
    let elapsed = start.elapsed();

    println!(
        "Matched {} quads against {} triangles ({}, {:.2?})",
        result.correspondences.len(),
        result.reference_centroids.len(),
        mode,
        elapsed
    );

    if cli.verbose {
        for record in &result.correspondences {
            println!(
                "Quad[{}] -> Tri[{}] at distance {}",
                record.query, record.reference, record.distance
            );
        }
    }

    let provenance = Provenance {
        cad: cli.cad,
        mesh: cli.mesh,
        order: cli.order,
    };
    io::save_report(&cli.output, &result.correspondences, Some(&provenance))?;
    println!("Saved: {}", cli.output.display());

    Ok(())
}

fn print_surface_info(label: &str, path: &Path, surface: &Surface) {
    println!("{}: {}", label, path.display());
    println!("  Surface: {}", surface.name());
    println!("  Vertices: {}", surface.vertex_count());
    println!("  Elements: {}", surface.element_count());
    match surface.element_type() {
        Some(t) => println!("  Element type: {}", t),
        None => println!("  Element type: (no sections)"),
    }
    println!("  Sections: {}", surface.sections().len());
}
