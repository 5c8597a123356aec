use glow::HasContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    Triangles,
    TriangleStrip,
}

impl Primitive {
    pub fn gl_mode(self) -> u32 {
        match self {
            Primitive::Triangles => glow::TRIANGLES,
            Primitive::TriangleStrip => glow::TRIANGLE_STRIP,
        }
    }
}

/// Vertex positions in model space, one `vec3` per vertex.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData {
    pub positions: Vec<[f32; 3]>,
    pub primitive: Primitive,
}

impl MeshData {
    pub fn triangle() -> Self {
        Self {
            positions: vec![[-1.0, -1.0, 0.0], [1.0, -1.0, 0.0], [0.0, 1.0, 0.0]],
            primitive: Primitive::Triangles,
        }
    }

    /// A ribbon of four triangles zig-zagging left to right.
    pub fn strip() -> Self {
        Self {
            positions: vec![
                [-1.0, -0.5, 0.0],
                [-1.0, 0.5, 0.0],
                [0.0, -0.5, 0.0],
                [0.0, 0.5, 0.0],
                [1.0, -0.5, 0.0],
                [1.0, 0.5, 0.0],
            ],
            primitive: Primitive::TriangleStrip,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        match self.primitive {
            Primitive::Triangles => self.positions.len() / 3,
            Primitive::TriangleStrip => self.positions.len().saturating_sub(2),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }
}

/// Vertex array + vertex buffer holding a `MeshData` on the GPU.
pub struct GpuMesh {
    vao: glow::VertexArray,
    vbo: glow::Buffer,
    primitive: Primitive,
    vertex_count: i32,
}

impl GpuMesh {
    pub fn upload(gl: &glow::Context, data: &MeshData) -> Result<Self, String> {
        unsafe {
            let vao = gl.create_vertex_array()?;
            let vbo = match gl.create_buffer() {
                Ok(vbo) => vbo,
                Err(err) => {
                    gl.delete_vertex_array(vao);
                    return Err(err);
                }
            };

            gl.bind_vertex_array(Some(vao));
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
            gl.buffer_data_u8_slice(glow::ARRAY_BUFFER, data.as_bytes(), glow::STATIC_DRAW);

            // attribute 0: position
            gl.enable_vertex_attrib_array(0);
            gl.vertex_attrib_pointer_f32(0, 3, glow::FLOAT, false, 0, 0);

            gl.bind_vertex_array(None);
            gl.bind_buffer(glow::ARRAY_BUFFER, None);

            Ok(Self {
                vao,
                vbo,
                primitive: data.primitive,
                vertex_count: data.vertex_count() as i32,
            })
        }
    }

    pub fn draw(&self, gl: &glow::Context) {
        unsafe {
            gl.bind_vertex_array(Some(self.vao));
            gl.draw_arrays(self.primitive.gl_mode(), 0, self.vertex_count);
            gl.bind_vertex_array(None);
        }
    }

    pub fn release(self, gl: &glow::Context) {
        unsafe {
            gl.delete_buffer(self.vbo);
            gl.delete_vertex_array(self.vao);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_triangle_layout() {
        let mesh = MeshData::triangle();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.primitive.gl_mode(), glow::TRIANGLES);
    }

    #[test]
    fn test_strip_shares_vertices() {
        let mesh = MeshData::strip();
        assert_eq!(mesh.vertex_count(), 6);
        assert_eq!(mesh.triangle_count(), 4);
        assert_eq!(mesh.primitive.gl_mode(), glow::TRIANGLE_STRIP);
    }

    #[test]
    fn test_bytes_are_tightly_packed_floats() {
        let mesh = MeshData::triangle();
        let bytes = mesh.as_bytes();
        assert_eq!(bytes.len(), 9 * std::mem::size_of::<f32>());
        assert_eq!(&bytes[..4], &(-1.0f32).to_ne_bytes());
    }
}
