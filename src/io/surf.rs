//! The `.surf` ASCII surface format.
//!
//! A line-oriented serialization of the normalized surface contract:
//! declared counts, coordinate arrays, and element sections with 1-based
//! connectivity (as in the CGNS data this format is extracted from).
//! `#` starts a comment; blank lines are ignored; names are single
//! whitespace-free tokens.
//!
//! ```text
//! surface wing
//! vertices 4
//! elements 2
//! coords x
//! 0.0 1.0 1.0 0.0
//! coords y
//! 0.0 0.0 1.0 1.0
//! coords z
//! 0.0 0.0 0.0 0.0
//! section upper 5 2
//! 1 2 3
//! 1 3 4
//! ```
//!
//! Numbers may be split across lines arbitrarily; only token order
//! matters after the section/coords headers.

use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Lines, Write};
use std::path::Path;

use crate::error::{MatchError, Result};
use crate::surface::{ElementType, Section, Surface};

/// Load a surface from a `.surf` file.
///
/// # Example
///
/// ```no_run
/// use surfmatch::io::surf;
///
/// let surface = surf::load("wing.surf").unwrap();
/// println!("{} elements", surface.element_count());
/// ```
pub fn load<P: AsRef<Path>>(path: P) -> Result<Surface> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| MatchError::LoadError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    read_surface(BufReader::new(file), path)
}

/// Save a surface to a `.surf` file.
pub fn save<P: AsRef<Path>>(surface: &Surface, path: P) -> Result<()> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    write_surface(&mut writer, surface)
}

/// Read a surface from any buffered reader.
///
/// `origin` names the data source in error messages.
pub fn read_surface<R: BufRead>(reader: R, origin: &Path) -> Result<Surface> {
    let mut tokens = Tokens::new(reader);

    expect_keyword(&mut tokens, origin, "surface")?;
    let name = expect_token(&mut tokens, origin, "surface name")?;

    expect_keyword(&mut tokens, origin, "vertices")?;
    let vertex_count = expect_usize(&mut tokens, origin, "vertex count")?;

    expect_keyword(&mut tokens, origin, "elements")?;
    let element_count = expect_usize(&mut tokens, origin, "element count")?;

    let mut coords = Vec::with_capacity(3);
    for axis in ["x", "y", "z"] {
        expect_keyword(&mut tokens, origin, "coords")?;
        let got = expect_token(&mut tokens, origin, "axis name")?;
        if got != axis {
            return Err(parse_error(
                origin,
                tokens.line(),
                format!("expected coords {}, found coords {}", axis, got),
            ));
        }
        coords.push(read_floats(&mut tokens, origin, vertex_count, axis)?);
    }
    let z = coords.pop().unwrap();
    let y = coords.pop().unwrap();
    let x = coords.pop().unwrap();

    let mut sections = Vec::new();
    while let Some(keyword) = tokens.next()? {
        if keyword != "section" {
            return Err(parse_error(
                origin,
                tokens.line(),
                format!("expected section, found {}", keyword),
            ));
        }
        let section_name = expect_token(&mut tokens, origin, "section name")?;
        let tag = expect_i64(&mut tokens, origin, "element type tag")?;
        let count = expect_usize(&mut tokens, origin, "section element count")?;

        let element_type = ElementType::from_tag(tag).ok_or_else(|| {
            MatchError::UnsupportedElementType {
                section: section_name.clone(),
                tag,
            }
        })?;

        let raw = read_ints(
            &mut tokens,
            origin,
            count * element_type.node_count(),
            &section_name,
        )?;
        sections.push(Section::new(section_name, element_type, &raw, vertex_count)?);
    }

    Surface::new(name, vertex_count, element_count, x, y, z, sections)
}

/// Write a surface to any writer in `.surf` form.
///
/// Connectivity is written back 1-based, matching what [`read_surface`]
/// accepts.
pub fn write_surface<W: Write>(writer: &mut W, surface: &Surface) -> Result<()> {
    writeln!(writer, "surface {}", surface.name())?;
    writeln!(writer, "vertices {}", surface.vertex_count())?;
    writeln!(writer, "elements {}", surface.element_count())?;

    for (axis, coords) in [
        ("x", surface.coords_x()),
        ("y", surface.coords_y()),
        ("z", surface.coords_z()),
    ] {
        writeln!(writer, "coords {}", axis)?;
        write_block(writer, coords.iter())?;
    }

    for section in surface.sections() {
        let nodes = section.element_type().node_count();
        writeln!(
            writer,
            "section {} {} {}",
            section.name(),
            section.element_type().tag(),
            section.element_count()
        )?;
        for element in section.connectivity().chunks_exact(nodes) {
            write_block(writer, element.iter().map(|&v| v + 1))?;
        }
    }

    Ok(())
}

/// Write values space-separated on one line.
fn write_block<W: Write, T: std::fmt::Display>(
    writer: &mut W,
    values: impl Iterator<Item = T>,
) -> Result<()> {
    let mut first = true;
    for v in values {
        if first {
            write!(writer, "{}", v)?;
            first = false;
        } else {
            write!(writer, " {}", v)?;
        }
    }
    writeln!(writer)?;
    Ok(())
}

/// Whitespace tokenizer with `#` comments, tracking line numbers for
/// error reporting.
struct Tokens<R> {
    lines: Lines<R>,
    pending: VecDeque<String>,
    line: usize,
}

impl<R: BufRead> Tokens<R> {
    fn new(reader: R) -> Self {
        Tokens {
            lines: reader.lines(),
            pending: VecDeque::new(),
            line: 0,
        }
    }

    fn line(&self) -> usize {
        self.line
    }

    fn next(&mut self) -> Result<Option<String>> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Ok(Some(token));
            }
            match self.lines.next() {
                None => return Ok(None),
                Some(line) => {
                    let line = line?;
                    self.line += 1;
                    let content = line.split('#').next().unwrap_or("");
                    self.pending
                        .extend(content.split_whitespace().map(str::to_string));
                }
            }
        }
    }
}

fn parse_error(origin: &Path, line: usize, message: String) -> MatchError {
    MatchError::LoadError {
        path: origin.to_path_buf(),
        message: format!("line {}: {}", line, message),
    }
}

fn expect_token<R: BufRead>(tokens: &mut Tokens<R>, origin: &Path, what: &str) -> Result<String> {
    tokens.next()?.ok_or_else(|| {
        parse_error(
            origin,
            tokens.line(),
            format!("unexpected end of file, expected {}", what),
        )
    })
}

fn expect_keyword<R: BufRead>(tokens: &mut Tokens<R>, origin: &Path, keyword: &str) -> Result<()> {
    let token = expect_token(tokens, origin, keyword)?;
    if token != keyword {
        return Err(parse_error(
            origin,
            tokens.line(),
            format!("expected {}, found {}", keyword, token),
        ));
    }
    Ok(())
}

fn expect_usize<R: BufRead>(tokens: &mut Tokens<R>, origin: &Path, what: &str) -> Result<usize> {
    let token = expect_token(tokens, origin, what)?;
    token.parse().map_err(|_| {
        parse_error(
            origin,
            tokens.line(),
            format!("invalid {}: {}", what, token),
        )
    })
}

fn expect_i64<R: BufRead>(tokens: &mut Tokens<R>, origin: &Path, what: &str) -> Result<i64> {
    let token = expect_token(tokens, origin, what)?;
    token.parse().map_err(|_| {
        parse_error(
            origin,
            tokens.line(),
            format!("invalid {}: {}", what, token),
        )
    })
}

fn read_floats<R: BufRead>(
    tokens: &mut Tokens<R>,
    origin: &Path,
    n: usize,
    axis: &str,
) -> Result<Vec<f64>> {
    let mut out = Vec::with_capacity(n);
    for _ in 0..n {
        let token = expect_token(tokens, origin, &format!("{} coordinate", axis))?;
        let value = token.parse().map_err(|_| {
            parse_error(
                origin,
                tokens.line(),
                format!("invalid {} coordinate: {}", axis, token),
            )
        })?;
        out.push(value);
    }
    Ok(out)
}

fn read_ints<R: BufRead>(
    tokens: &mut Tokens<R>,
    origin: &Path,
    n: usize,
    section: &str,
) -> Result<Vec<i64>> {
    let mut out = Vec::with_capacity(n);
    for _ in 0..n {
        let token =
            expect_token(tokens, origin, &format!("connectivity of section {}", section))?;
        let value = token.parse().map_err(|_| {
            parse_error(
                origin,
                tokens.line(),
                format!("section {}: invalid vertex index: {}", section, token),
            )
        })?;
        out.push(value);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn origin() -> &'static Path {
        Path::new("<memory>")
    }

    fn parse(text: &str) -> Result<Surface> {
        read_surface(Cursor::new(text), origin())
    }

    const TWO_TRIS: &str = "\
# reference surface
surface wing
vertices 4
elements 2
coords x
0.0 1.0 1.0 0.0
coords y
0.0 0.0 1.0 1.0
coords z
0.0 0.0 0.0 0.0
section upper 5 2
1 2 3
1 3 4
";

    #[test]
    fn test_parse_two_triangles() {
        let surface = parse(TWO_TRIS).unwrap();
        assert_eq!(surface.name(), "wing");
        assert_eq!(surface.vertex_count(), 4);
        assert_eq!(surface.element_count(), 2);
        assert_eq!(surface.element_type(), Some(ElementType::Tri3));
        assert_eq!(surface.sections()[0].connectivity(), &[0, 1, 2, 0, 2, 3]);
    }

    #[test]
    fn test_parse_multiple_sections() {
        let text = "\
surface cad
vertices 4
elements 2
coords x
0 1 1 0
coords y
0 0 1 1
coords z
0 0 0 0
section a 5 1
1 2 3
section b 5 1
1 3 4
";
        let surface = parse(text).unwrap();
        assert_eq!(surface.sections().len(), 2);
        assert_eq!(surface.element_count(), 2);
    }

    #[test]
    fn test_unsupported_tag() {
        let text = "\
surface cad
vertices 4
elements 1
coords x
0 1 1 0
coords y
0 0 1 1
coords z
0 0 0 0
section solid 17 1
1 2 3 4
";
        let err = parse(text).unwrap_err();
        assert!(matches!(
            err,
            MatchError::UnsupportedElementType { tag: 17, .. }
        ));
    }

    #[test]
    fn test_declared_count_mismatch() {
        // Header claims 3 elements, section holds 2
        let text = TWO_TRIS.replace("elements 2", "elements 3");
        let err = parse(&text).unwrap_err();
        assert!(matches!(
            err,
            MatchError::CountMismatch { kind: "elements", expected: 3, found: 2, .. }
        ));
    }

    #[test]
    fn test_out_of_range_connectivity() {
        let text = TWO_TRIS.replace("1 3 4", "1 3 5");
        let err = parse(&text).unwrap_err();
        assert!(matches!(err, MatchError::InvalidVertexIndex { vertex: 5, .. }));
    }

    #[test]
    fn test_truncated_coords() {
        let text = "\
surface cad
vertices 4
elements 0
coords x
0 1 1
";
        let err = parse(text).unwrap_err();
        match err {
            MatchError::LoadError { message, .. } => {
                assert!(message.contains("end of file"), "message: {}", message);
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_bad_keyword() {
        let err = parse("zone wing\n").unwrap_err();
        assert!(matches!(err, MatchError::LoadError { .. }));
    }

    #[test]
    fn test_roundtrip() {
        let surface = parse(TWO_TRIS).unwrap();
        let mut buffer = Vec::new();
        write_surface(&mut buffer, &surface).unwrap();

        let reparsed = read_surface(Cursor::new(&buffer), origin()).unwrap();
        assert_eq!(reparsed.name(), surface.name());
        assert_eq!(reparsed.vertex_count(), surface.vertex_count());
        assert_eq!(reparsed.coords_x(), surface.coords_x());
        assert_eq!(
            reparsed.sections()[0].connectivity(),
            surface.sections()[0].connectivity()
        );
    }
}
