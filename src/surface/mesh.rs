//! Triangle mesh for the plotted surface.

use bytemuck::{Pod, Zeroable};

use crate::colormap::Rgba;
use crate::error::MeshError;
use crate::grid::Field;

/// Vertex data for the surface mesh (position + RGBA color)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

/// Vertex and index data for an n×n sample grid
///
/// Vertices are laid out in the field's flattening order, so vertex `i * n + j`
/// is the sample at row `i`, column `j`.
#[derive(Debug, Clone)]
pub struct SurfaceMesh {
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
    resolution: usize,
    /// Bumped on every successful update
    revision: u64,
    /// Bumped whenever the index buffer is rebuilt
    topology: u64,
}

impl SurfaceMesh {
    /// Create a flat mesh for an n×n grid.
    pub fn new(resolution: usize) -> Self {
        Self {
            vertices: vec![Vertex::zeroed(); resolution * resolution],
            indices: grid_indices(resolution),
            resolution,
            revision: 0,
            topology: 0,
        }
    }

    /// Overwrite positions and colors from `field` and `colors`.
    ///
    /// The index buffer is rebuilt only when the field's resolution differs
    /// from the mesh's. On error nothing is modified.
    pub fn update(&mut self, field: &Field, colors: &[Rgba]) -> Result<(), MeshError> {
        let n = field.resolution();
        let expected = n * n;
        if field.zs().len() != expected {
            return Err(MeshError::ShapeMismatch {
                expected,
                got: field.zs().len(),
                what: "heights",
            });
        }
        if colors.len() != expected {
            return Err(MeshError::ShapeMismatch {
                expected,
                got: colors.len(),
                what: "colors",
            });
        }

        if n != self.resolution {
            self.indices = grid_indices(n);
            self.resolution = n;
            self.topology += 1;
        }
        self.vertices.resize(expected, Vertex::zeroed());

        let positions = field.xs().iter().zip(field.ys()).zip(field.zs());
        for ((vertex, ((&x, &y), &z)), &color) in self.vertices.iter_mut().zip(positions).zip(colors) {
            // Non-finite heights are drawn flat
            let z = if z.is_finite() { z as f32 } else { 0.0 };
            vertex.position = [x as f32, y as f32, z];
            vertex.color = color;
        }

        self.revision += 1;
        Ok(())
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn topology(&self) -> u64 {
        self.topology
    }
}

/// Two counter-clockwise (seen from +Z) triangles per grid cell.
fn grid_indices(n: usize) -> Vec<u32> {
    if n < 2 {
        return Vec::new();
    }
    let mut indices = Vec::with_capacity((n - 1) * (n - 1) * 6);
    for i in 0..n - 1 {
        for j in 0..n - 1 {
            let here = (i * n + j) as u32;
            let right = here + 1;
            let above = ((i + 1) * n + j) as u32;
            let above_right = above + 1;

            indices.extend_from_slice(&[here, right, above, right, above_right, above]);
        }
    }
    indices
}
