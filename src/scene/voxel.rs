//! The unit-cube mesh primitive.

use anyhow::{Context, Result};
use cgmath::Vector3;

use crate::{
    render::{
        array::ArrayObject,
        buffer::BufferObject,
        device::{BufferTarget, BufferUsage, DataType, GlApi},
        shader::{ATTRIB_COLOR, ATTRIB_POSITION, ShaderProgram, UNIFORM_MODEL},
    },
    scene::transform::{TransformId, Transforms},
};

/// The 8 corners of a unit cube as homogeneous positions, shared by every
/// voxel instance.
pub const CUBE_VERTICES: [[f32; 4]; 8] = [
    [-0.5, 0.5, 0.5, 1.0],
    [-0.5, -0.5, 0.5, 1.0],
    [0.5, -0.5, 0.5, 1.0],
    [0.5, 0.5, 0.5, 1.0],
    [-0.5, 0.5, -0.5, 1.0],
    [-0.5, -0.5, -0.5, 1.0],
    [0.5, -0.5, -0.5, 1.0],
    [0.5, 0.5, -0.5, 1.0],
];

/// 12 triangles over [`CUBE_VERTICES`], two per face.
pub const CUBE_INDICES: [u32; 36] = [
    // front
    0, 1, 2, //
    0, 2, 3, //
    // up
    0, 3, 4, //
    3, 7, 4, //
    // down
    1, 5, 2, //
    5, 6, 2, //
    // right
    3, 2, 7, //
    2, 6, 7, //
    // left
    0, 4, 1, //
    4, 5, 1, //
    // back
    4, 6, 5, //
    4, 7, 6, //
];

/**
 * The interleaved per-vertex layout as it is stored in GPU memory:
 * homogeneous position followed by RGBA color, 8 floats per vertex.
 */
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct VoxelVertex {
    pub position: [f32; 4],
    pub color: [f32; 4],
}

const VERTEX_STRIDE: i32 = size_of::<VoxelVertex>() as i32;
const COLOR_OFFSET: i32 = size_of::<[f32; 4]>() as i32;

/// A single colored unit cube.
///
/// Geometry is fixed; only position, color and the owning transform vary per
/// instance. The vertex-array object is built exactly once at construction
/// and never rebuilt; disposing the voxel disposes the array object and,
/// through it, both GPU buffers.
#[derive(Debug)]
pub struct Voxel {
    transform: TransformId,
    color: [f32; 4],
    vertex_array: ArrayObject,
}

impl Voxel {
    /// Builds the voxel's GPU resources and parents its transform under
    /// `parent`, seeded with the parent's current rotation.
    pub fn new(
        gl: &dyn GlApi,
        transforms: &mut Transforms,
        parent: TransformId,
        position: Vector3<f32>,
        color: [f32; 4],
        program: &ShaderProgram,
    ) -> Result<Self> {
        let rotation = transforms.rotation(parent);
        let transform = transforms.insert(Some(parent), position, rotation);
        let vertex_array = build_vertex_array(gl, color, program)?;

        Ok(Self {
            transform,
            color,
            vertex_array,
        })
    }

    pub fn transform(&self) -> TransformId {
        self.transform
    }

    pub fn color(&self) -> [f32; 4] {
        self.color
    }

    /// Uploads this voxel's model matrix to the active program and draws the
    /// cube. The array object re-binds itself, so no binding state is
    /// assumed from the previous draw.
    pub fn render(
        &mut self,
        gl: &dyn GlApi,
        transforms: &Transforms,
        program: &ShaderProgram,
    ) -> Result<()> {
        program.set_uniform_matrix(gl, UNIFORM_MODEL, &transforms.model_matrix(self.transform))?;

        self.vertex_array.activate(gl);
        self.vertex_array
            .draw_elements(gl, 0, CUBE_INDICES.len() as i32, DataType::UnsignedInt);
        Ok(())
    }

    /// Releases the vertex-array object and its buffers.
    pub fn dispose(&mut self, gl: &dyn GlApi) {
        self.vertex_array.dispose(gl);
    }
}

fn interleave_vertex_color(color: [f32; 4]) -> Vec<VoxelVertex> {
    CUBE_VERTICES
        .iter()
        .map(|&position| VoxelVertex { position, color })
        .collect()
}

fn build_vertex_array(
    gl: &dyn GlApi,
    color: [f32; 4],
    program: &ShaderProgram,
) -> Result<ArrayObject> {
    let position_attrib = program
        .attribute_location(gl, ATTRIB_POSITION)
        .with_context(|| format!("shader program has no attribute \"{ATTRIB_POSITION}\""))?;
    let color_attrib = program
        .attribute_location(gl, ATTRIB_COLOR)
        .with_context(|| format!("shader program has no attribute \"{ATTRIB_COLOR}\""))?;

    let mut vertex_buffer = BufferObject::new(gl, BufferTarget::Array)?;
    vertex_buffer.set_data(gl, BufferUsage::StaticDraw, &interleave_vertex_color(color))?;
    let mut index_buffer = BufferObject::new(gl, BufferTarget::ElementArray)?;
    index_buffer.set_data(gl, BufferUsage::StaticDraw, &CUBE_INDICES)?;

    let mut vertex_array = ArrayObject::new(gl)?;
    vertex_array.activate(gl);

    vertex_array.attach_buffer(gl, index_buffer);
    vertex_array.attach_buffer(gl, vertex_buffer);

    vertex_array.attrib_pointer(gl, position_attrib, 4, DataType::Float, VERTEX_STRIDE, 0);
    vertex_array.attrib_pointer(
        gl,
        color_attrib,
        4,
        DataType::Float,
        VERTEX_STRIDE,
        COLOR_OFFSET,
    );

    // Leave binding state clean for whatever builds resources next.
    vertex_array.deactivate(gl);
    vertex_array.disable_attrib_all(gl);

    Ok(vertex_array)
}
