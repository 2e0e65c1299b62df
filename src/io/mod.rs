//! Surface file I/O and report output.
//!
//! The correspondence core consumes normalized in-memory surfaces; this
//! module is the boundary that produces them from files and writes the
//! results back out.
//!
//! | Format | Extension | Read | Write | Notes |
//! |--------|-----------|------|-------|-------|
//! | surf   | `.surf`   | ✓    | ✓     | ASCII surface tessellation |
//! | CSV    | `.csv`    | ✗    | ✓     | Correspondence report |
//!
//! # Usage
//!
//! ```no_run
//! use surfmatch::io;
//!
//! let cad = io::load_surface("wing.surf").unwrap();
//! println!("{} reference elements", cad.element_count());
//! ```

pub mod csv;
pub mod surf;

pub use csv::{save as save_report, Provenance};
pub use surf::{load as load_surface, save as save_surface};
