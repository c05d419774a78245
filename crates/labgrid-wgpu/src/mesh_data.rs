//! GPU buffer management for the cube grid.

use crate::{cube_vertices, CubeInstance, CubeVertex, CUBE_VERTEX_COUNT};
use labgrid_model::{Cell, FilterController};
use wgpu::util::DeviceExt;

/// Order cells for drawing: full-opacity cells first, dimmed cells after.
///
/// Returns the instances and the number of full-opacity ones.
pub fn partition_instances(cells: &[Cell]) -> (Vec<CubeInstance>, u32) {
    let mut instances = Vec::with_capacity(cells.len());
    instances.extend(
        cells
            .iter()
            .filter(|c| c.visibility.is_full())
            .map(CubeInstance::from_cell),
    );
    let full = instances.len() as u32;
    instances.extend(
        cells
            .iter()
            .filter(|c| !c.visibility.is_full())
            .map(CubeInstance::from_cell),
    );
    (instances, full)
}

/// Cube geometry and per-cell instances on the GPU.
pub struct MeshData {
    /// Unit cube triangle list
    pub vertex_buffer: wgpu::Buffer,
    /// One instance per cell, full cells first
    pub instance_buffer: wgpu::Buffer,
    /// Total number of instances
    pub instance_count: u32,
    /// Instances drawn with the opaque pipeline
    pub opaque_count: u32,
    /// Controller revision currently on the GPU
    revision: u64,
}

impl MeshData {
    /// Create buffers sized for the controller's cells and upload them.
    pub fn generate(device: &wgpu::Device, controller: &FilterController) -> Self {
        let start = std::time::Instant::now();
        let (instances, opaque_count) = partition_instances(controller.cells());

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Cube Vertex Buffer"),
            contents: bytemuck::cast_slice(&cube_vertices()),
            usage: wgpu::BufferUsages::VERTEX,
        });

        // Cell count is fixed for the scene's lifetime, so later syncs rewrite
        // this buffer in place.
        let instance_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Cube Instance Buffer"),
            contents: bytemuck::cast_slice(&instances),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });

        tracing::info!(
            "Uploaded {} cube instances in {:?}",
            instances.len(),
            start.elapsed()
        );

        Self {
            vertex_buffer,
            instance_buffer,
            instance_count: instances.len() as u32,
            opaque_count,
            revision: controller.revision(),
        }
    }

    /// Push cell visibility to the GPU if the controller changed since the
    /// last upload. Returns whether anything was written.
    pub fn sync(&mut self, queue: &wgpu::Queue, controller: &FilterController) -> bool {
        if self.revision == controller.revision() {
            return false;
        }

        let (instances, opaque_count) = partition_instances(controller.cells());
        debug_assert_eq!(instances.len() as u32, self.instance_count);
        queue.write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&instances));

        self.opaque_count = opaque_count;
        self.revision = controller.revision();
        tracing::debug!(
            opaque = opaque_count,
            dimmed = self.dimmed_count(),
            "synced cube instances"
        );
        true
    }

    /// Instances drawn with the translucent pipeline.
    pub fn dimmed_count(&self) -> u32 {
        self.instance_count - self.opaque_count
    }

    /// Vertex buffer layout for the cube geometry.
    pub fn vertex_buffer_layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<CubeVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                // Position
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                // Normal
                wgpu::VertexAttribute {
                    offset: 12,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
            ],
        }
    }

    /// Get the vertex buffer layout for the instance data.
    pub fn instance_buffer_layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<CubeInstance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &[
                // Center
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x3,
                },
                // Color (packed u32)
                wgpu::VertexAttribute {
                    offset: 12,
                    shader_location: 3,
                    format: wgpu::VertexFormat::Uint32,
                },
            ],
        }
    }

    /// Vertices per instance.
    pub const fn vertices_per_instance() -> u32 {
        CUBE_VERTEX_COUNT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use labgrid_model::{build_grid, Axis, GridDims, Lattice, Palette};

    fn controller() -> FilterController {
        FilterController::new(build_grid(
            &GridDims::new(5, 5, 5),
            &Lattice::default(),
            &Palette::default(),
        ))
    }

    #[test]
    fn instance_layout_matches_struct() {
        let layout = MeshData::instance_buffer_layout();
        assert_eq!(
            layout.array_stride,
            std::mem::size_of::<CubeInstance>() as u64
        );
    }

    #[test]
    fn vertex_layout_matches_struct() {
        let layout = MeshData::vertex_buffer_layout();
        assert_eq!(layout.array_stride, std::mem::size_of::<CubeVertex>() as u64);
    }

    #[test]
    fn unfiltered_grid_is_all_opaque() {
        let (instances, full) = partition_instances(controller().cells());
        assert_eq!(instances.len(), 125);
        assert_eq!(full, 125);
    }

    #[test]
    fn full_cells_come_first() {
        let mut ctl = controller();
        ctl.select(Axis::Z, 2);
        let (instances, full) = partition_instances(ctl.cells());

        assert_eq!(instances.len(), 125);
        assert_eq!(full, 25);
        assert!(instances[..25].iter().all(|i| i.color >> 24 == 255));
        assert!(instances[25..].iter().all(|i| i.color >> 24 < 255));
    }

    #[test]
    fn nothing_matches_means_nothing_opaque() {
        let mut ctl = controller();
        ctl.select(Axis::X, 999);
        let (_, full) = partition_instances(ctl.cells());
        assert_eq!(full, 0);
    }
}
