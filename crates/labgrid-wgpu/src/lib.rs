//! wgpu renderer for the labgrid cube grid.
//!
//! Draws every cell as an instanced cube and every axis label as a clickable
//! egui overlay pinned to its projected anchor.
//!
//! # Ownership
//! - The [`GridScene`](labgrid_model::GridScene) owns cells and selection.
//! - The [`Renderer`] owns GPU buffers. After every select/reset the app
//!   pushes cell state one way into the instance buffer
//!   ([`Renderer::upload_cells`]); the renderer never mutates the scene.
//! - Opaque cells and dimmed cells are drawn with separate pipelines so the
//!   dimmed ones can blend over the opaque ones without sorting.

pub mod camera;
pub mod error;
pub mod mesh_data;
pub mod overlay;
pub mod renderer;

pub use camera::OrbitCamera;
pub use error::{Error, Result};
pub use mesh_data::MeshData;
pub use overlay::LabelOverlay;
pub use renderer::Renderer;

use labgrid_model::{Cell, Rgb};

/// GPU instance data for a single cube.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CubeInstance {
    /// Cube center in world space
    pub position: [f32; 3],
    /// Packed RGBA color, alpha carries opacity
    pub color: u32,
}

impl CubeInstance {
    /// Create a new cube instance.
    pub fn new(position: [f32; 3], color: u32) -> Self {
        Self { position, color }
    }

    /// Instance for a cell in its current visibility state.
    pub fn from_cell(cell: &Cell) -> Self {
        Self::new(cell.position, pack_rgba(cell.color, cell.visibility.opacity))
    }
}

/// Pack a color and opacity for `unpack4x8unorm` (red in the low byte).
pub fn pack_rgba(color: Rgb, opacity: f32) -> u32 {
    let [r, g, b] = color.channels().map(u32::from);
    let a = (opacity.clamp(0.0, 1.0) * 255.0).round() as u32;

    (a << 24) | (b << 16) | (g << 8) | r
}

/// Unit cube vertex.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CubeVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// Vertices per cube (6 faces, 2 triangles each).
pub const CUBE_VERTEX_COUNT: u32 = 36;

/// Triangle list for a unit cube centered on the origin, counter-clockwise
/// when seen from outside.
pub fn cube_vertices() -> Vec<CubeVertex> {
    // (normal, u axis, v axis); u x v == normal keeps winding CCW
    const FACES: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
        ([1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]),
        ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
        ([0.0, 1.0, 0.0], [0.0, 0.0, 1.0], [1.0, 0.0, 0.0]),
        ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
        ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([0.0, 0.0, -1.0], [0.0, 1.0, 0.0], [1.0, 0.0, 0.0]),
    ];
    const CORNERS: [(f32, f32); 6] = [
        (-1.0, -1.0),
        (1.0, -1.0),
        (1.0, 1.0),
        (-1.0, -1.0),
        (1.0, 1.0),
        (-1.0, 1.0),
    ];

    let mut vertices = Vec::with_capacity(CUBE_VERTEX_COUNT as usize);
    for (normal, u, v) in FACES {
        for (su, sv) in CORNERS {
            let position =
                std::array::from_fn(|i| 0.5 * (normal[i] + su * u[i] + sv * v[i]));
            vertices.push(CubeVertex { position, normal });
        }
    }
    vertices
}
