//! Wavefront OBJ geometry records
//!
//! Writes `o`/`usemtl`/`v`/`vn`/`vt`/`f` records per submesh. Submeshes
//! concatenated into one file share a single vertex index space, so every
//! face index carries the running offset of all previously written vertices
//! on top of OBJ's 1-based convention.

use std::io::{self, Write};

use meshport_assets::Submesh;

/// Write the advisory comment header and the material library reference
pub fn write_header<W: Write>(
    out: &mut W,
    model_name: &str,
    material_file: &str,
    vertex_count: usize,
    triangle_count: usize,
) -> io::Result<()> {
    writeln!(out, "# Exported by meshport")?;
    writeln!(out, "# Model: {}", model_name)?;
    writeln!(out, "# Vertices: {}", vertex_count)?;
    writeln!(out, "# Triangles: {}", triangle_count)?;
    writeln!(out)?;
    writeln!(out, "mtllib {}", material_file)?;
    Ok(())
}

/// Write one submesh's geometry records
///
/// `vertex_offset` is the number of vertices written before this submesh.
/// Returns the number of vertices written here, which the caller adds to
/// its offset before the next submesh; the offset is this explicit
/// accumulator and nothing else.
pub fn write_submesh<W: Write>(
    out: &mut W,
    submesh: &Submesh,
    vertex_offset: usize,
) -> io::Result<usize> {
    writeln!(out)?;
    writeln!(out, "o {}", submesh.name)?;
    writeln!(out, "usemtl {}", submesh.material.export_name())?;

    for vertex in &submesh.vertices {
        let [x, y, z] = vertex.position;
        writeln!(out, "v {} {} {}", x, y, z)?;
    }
    for vertex in &submesh.vertices {
        let [x, y, z] = vertex.normal;
        writeln!(out, "vn {} {} {}", x, y, z)?;
    }
    for vertex in &submesh.vertices {
        let [u, v] = vertex.uv;
        // OBJ texture space puts V at the bottom; flipped exactly once, here.
        writeln!(out, "vt {} {}", u, 1.0 - v)?;
    }

    // Same index for position/UV/normal: channels are written in lockstep.
    for triangle in submesh.indices.chunks_exact(3) {
        let a = vertex_offset + triangle[0] as usize + 1;
        let b = vertex_offset + triangle[1] as usize + 1;
        let c = vertex_offset + triangle[2] as usize + 1;
        writeln!(out, "f {}/{}/{} {}/{}/{} {}/{}/{}", a, a, a, b, b, b, c, c, c)?;
    }

    Ok(submesh.vertices.len())
}
