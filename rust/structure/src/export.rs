// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wavefront OBJ export
//!
//! World space is already Y-up, so positions and normals are written as-is.
//! Each floor, wall piece and inset becomes its own `o` object.

use crate::error::Result;
use crate::scene::SceneNode;
use crate::types::{BuiltStructure, InsetKind, WallPieceKind};
use plan_lite_geometry::Mesh;
use std::io::Write;

/// Streams meshes into one OBJ document, tracking the global vertex offset
struct ObjWriter<W: Write> {
    out: W,
    vertex_offset: u32,
}

impl<W: Write> ObjWriter<W> {
    fn new(out: W) -> Self {
        Self {
            out,
            vertex_offset: 0,
        }
    }

    fn comment(&mut self, text: &str) -> Result<()> {
        writeln!(self.out, "# {}", text)?;
        Ok(())
    }

    fn object(&mut self, name: &str, material: &str, mesh: &Mesh) -> Result<()> {
        if mesh.is_empty() {
            return Ok(());
        }
        writeln!(self.out, "o {}", name)?;
        writeln!(self.out, "usemtl {}", material)?;
        for p in mesh.positions.chunks_exact(3) {
            writeln!(self.out, "v {:.6} {:.6} {:.6}", p[0], p[1], p[2])?;
        }
        for n in mesh.normals.chunks_exact(3) {
            writeln!(self.out, "vn {:.6} {:.6} {:.6}", n[0], n[1], n[2])?;
        }
        for t in mesh.indices.chunks_exact(3) {
            let (a, b, c) = (
                t[0] + self.vertex_offset + 1,
                t[1] + self.vertex_offset + 1,
                t[2] + self.vertex_offset + 1,
            );
            writeln!(self.out, "f {}//{} {}//{} {}//{}", a, a, b, b, c, c)?;
        }
        self.vertex_offset += mesh.vertex_count() as u32;
        writeln!(self.out)?;
        Ok(())
    }
}

/// Write a generated structure as OBJ
pub fn write_structure_obj<W: Write>(out: W, structure: &BuiltStructure) -> Result<()> {
    let mut obj = ObjWriter::new(out);
    obj.comment("Generated by plan-to-obj (plan-lite)")?;
    obj.comment(&format!(
        "Footprint: {:.2}m x {:.2}m, ceiling {:.2}m",
        structure.extent.0, structure.extent.1, structure.ceiling_height
    ))?;
    obj.comment("Coordinate system: Y-up, meters")?;

    for (i, floor) in structure.floors.iter().enumerate() {
        let material = format!("floor_{:?}", floor.material).to_lowercase();
        obj.object(&format!("floor_{}_{}", i, sanitize(&floor.room_name)), &material, &floor.mesh)?;
    }

    for wall in &structure.walls {
        for (j, piece) in wall.pieces.iter().enumerate() {
            let role = match piece.kind {
                WallPieceKind::Solid => "solid",
                WallPieceKind::LeftPier => "left_pier",
                WallPieceKind::RightPier => "right_pier",
                WallPieceKind::Header => "header",
                WallPieceKind::Sill => "sill",
            };
            obj.object(&format!("wall_{}_{}_{}", wall.segment_index, j, role), "wall", &piece.mesh)?;
        }
        if let Some(inset) = &wall.inset {
            let material = match inset.kind {
                InsetKind::DoorLeaf => "door",
                InsetKind::Glazing => "glass",
            };
            obj.object(&format!("wall_{}_{}", wall.segment_index, material), material, &inset.mesh)?;
        }
    }
    Ok(())
}

/// Write a scene node (parts in world space) as OBJ
pub fn write_scene_obj<W: Write>(out: W, node: &SceneNode) -> Result<()> {
    let mut obj = ObjWriter::new(out);
    obj.comment(&format!("Scene: {}", node.name))?;
    for (i, (part, mesh)) in node.world_meshes().enumerate() {
        obj.object(
            &format!("{}_{}", i, sanitize(&part.name)),
            &sanitize(&part.material.name),
            &mesh,
        )?;
    }
    Ok(())
}

fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{build_structure, sample_plan};
    use crate::config::BuilderConfig;

    #[test]
    fn test_structure_obj() {
        let structure = build_structure(&sample_plan(), &BuilderConfig::default()).unwrap();
        let mut buf = Vec::new();
        write_structure_obj(&mut buf, &structure).unwrap();
        let text = String::from_utf8(buf).unwrap();

        let vertices = text.lines().filter(|l| l.starts_with("v ")).count();
        let faces = text.lines().filter(|l| l.starts_with("f ")).count();
        let expected_vertices: usize = structure.floors.iter().map(|f| f.mesh.vertex_count()).sum::<usize>()
            + structure
                .walls
                .iter()
                .map(|w| {
                    w.pieces.iter().map(|p| p.mesh.vertex_count()).sum::<usize>()
                        + w.inset.as_ref().map_or(0, |i| i.mesh.vertex_count())
                })
                .sum::<usize>();
        assert_eq!(vertices, expected_vertices);
        assert!(faces > 0);
        assert!(text.contains("o floor_0_Living"));
        assert!(text.contains("usemtl floor_wood"));
        assert!(text.contains("usemtl glass"));

        // Face indices are 1-based and never exceed the vertex count
        let max_index = text
            .lines()
            .filter(|l| l.starts_with("f "))
            .flat_map(|l| l[2..].split(' ').map(|v| v.split("//").next().unwrap_or("0").parse::<usize>().unwrap()))
            .max()
            .unwrap();
        assert_eq!(max_index, vertices);
    }

    #[test]
    fn test_sanitize() {
        assert_eq!(sanitize("Living Room #2"), "Living_Room__2");
    }
}
