use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

/// Vertex layout shared by every stage. Stages that draw flat color ignore
/// the color attribute.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

impl Vertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x3,
        1 => Float32x3,
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// CPU-side mesh. An empty index list means the vertices are drawn in order.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u16>,
}

impl MeshData {
    pub fn is_indexed(&self) -> bool {
        !self.indices.is_empty()
    }
}

const RED: [f32; 3] = [1.0, 0.0, 0.0];

/// The single triangle of the first two stages.
pub fn triangle_mesh() -> MeshData {
    MeshData {
        vertices: vec![
            Vertex { position: [-0.5, -1.0, 0.0], color: RED },
            Vertex { position: [1.0, 0.0, 0.0], color: RED },
            Vertex { position: [0.5, 1.0, 0.0], color: RED },
        ],
        indices: Vec::new(),
    }
}

/// Cube spanning [-1, 1] on every axis, eight shared corners.
///
/// Corner `i` has x/y/z set to +1 where bit 0/1/2 of `i` is set. Each
/// corner's color is its position remapped to [0, 1].
pub fn cube_mesh() -> MeshData {
    let vertices = (0..8u16)
        .map(|i| {
            let axis = |bit: u16| if i & bit != 0 { 1.0 } else { -1.0 };
            let position = [axis(1), axis(2), axis(4)];
            let color = position.map(|c| (c + 1.0) * 0.5);
            Vertex { position, color }
        })
        .collect();

    #[rustfmt::skip]
    let indices = vec![
        0, 2, 6, 6, 4, 0, // -X
        1, 5, 7, 7, 3, 1, // +X
        0, 4, 5, 5, 1, 0, // -Y
        2, 3, 7, 7, 6, 2, // +Y
        0, 1, 3, 3, 2, 0, // -Z
        4, 6, 7, 7, 5, 4, // +Z
    ];

    MeshData { vertices, indices }
}

/// GPU buffers for one mesh. Dropping this releases the buffers.
pub struct MeshBuffers {
    vertex_buffer: wgpu::Buffer,
    index_buffer: Option<wgpu::Buffer>,
    vertex_count: u32,
    index_count: u32,
}

impl MeshBuffers {
    pub fn upload(device: &wgpu::Device, label: &str, mesh: &MeshData) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label}_vertex_buffer")),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = mesh.is_indexed().then(|| {
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{label}_index_buffer")),
                contents: bytemuck::cast_slice(&mesh.indices),
                usage: wgpu::BufferUsages::INDEX,
            })
        });

        Self {
            vertex_buffer,
            index_buffer,
            vertex_count: mesh.vertices.len() as u32,
            index_count: mesh.indices.len() as u32,
        }
    }

    /// Record the draw call for this mesh into `pass`.
    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        match &self.index_buffer {
            Some(indices) => {
                pass.set_index_buffer(indices.slice(..), wgpu::IndexFormat::Uint16);
                pass.draw_indexed(0..self.index_count, 0, 0..1);
            }
            None => pass.draw(0..self.vertex_count, 0..1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn triangle_is_three_unindexed_vertices() {
        let mesh = triangle_mesh();
        assert_eq!(mesh.vertices.len(), 3);
        assert!(!mesh.is_indexed());
        assert_eq!(mesh.vertices[0].position, [-0.5, -1.0, 0.0]);
    }

    #[test]
    fn cube_has_twelve_triangles_over_eight_corners() {
        let mesh = cube_mesh();
        assert_eq!(mesh.vertices.len(), 8);
        assert_eq!(mesh.indices.len(), 36);
        assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.vertices.len()));
        let used: BTreeSet<u16> = mesh.indices.iter().copied().collect();
        assert_eq!(used.len(), 8);
    }

    #[test]
    fn cube_faces_are_planar() {
        let mesh = cube_mesh();
        for face in mesh.indices.chunks(6) {
            let corners: Vec<[f32; 3]> = face
                .iter()
                .map(|&i| mesh.vertices[i as usize].position)
                .collect();
            // Some axis is constant across all six references of a face.
            let planar = (0..3).any(|axis| corners.iter().all(|c| c[axis] == corners[0][axis]));
            assert!(planar, "face {face:?} is not axis-aligned");
        }
    }

    #[test]
    fn cube_corner_colors_are_distinct() {
        let mesh = cube_mesh();
        for (i, a) in mesh.vertices.iter().enumerate() {
            assert!(a.color.iter().all(|c| (0.0..=1.0).contains(c)));
            for b in &mesh.vertices[i + 1..] {
                assert_ne!(a.color, b.color);
            }
        }
    }

    #[test]
    fn vertex_layout_matches_struct() {
        let layout = Vertex::layout();
        assert_eq!(layout.array_stride, 24);
        assert_eq!(layout.attributes.len(), 2);
        assert_eq!(layout.attributes[1].offset, 12);
    }
}
