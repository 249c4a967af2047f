//! Owning wrapper for a GL vertex-array object and its attached buffers.

use anyhow::Result;

use crate::render::{
    buffer::BufferObject,
    device::{DataType, GlApi},
};

/// GL vertex-array state plus the buffers bound into it.
///
/// Attached [`BufferObject`]s are owned by value: disposing the array object
/// cascades into every buffer it holds, so the caller only ever tracks one
/// handle per mesh. Binding is global GL state, therefore [`ArrayObject::draw_elements`]
/// re-activates the array itself before issuing the draw instead of assuming
/// the previous component left a compatible binding behind.
#[derive(Debug)]
pub struct ArrayObject {
    id: u32,
    active: bool,
    buffers: Vec<BufferObject>,
    attribs: Vec<u32>,
}

impl ArrayObject {
    pub fn new(gl: &dyn GlApi) -> Result<Self> {
        let id = gl.create_vertex_array()?;
        Ok(Self {
            id,
            active: false,
            buffers: Vec::new(),
            attribs: Vec::new(),
        })
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn activate(&mut self, gl: &dyn GlApi) {
        self.active = true;
        gl.bind_vertex_array(self.id);
    }

    pub fn deactivate(&mut self, gl: &dyn GlApi) {
        self.active = false;
        gl.bind_vertex_array(0);
    }

    /// Binds `buffer` into this array's state and takes ownership of it.
    /// Activates itself first if the array is not currently bound.
    pub fn attach_buffer(&mut self, gl: &dyn GlApi, mut buffer: BufferObject) {
        if !self.active {
            self.activate(gl);
        }

        buffer.activate(gl);
        self.buffers.push(buffer);
    }

    /// Enables and describes one vertex attribute slot. `stride` and
    /// `offset` are in bytes. The slot is remembered so
    /// [`ArrayObject::disable_attrib_all`] can turn it off again.
    pub fn attrib_pointer(
        &mut self,
        gl: &dyn GlApi,
        index: u32,
        components: i32,
        ty: DataType,
        stride: i32,
        offset: i32,
    ) {
        self.attribs.push(index);
        gl.enable_vertex_attrib(index);
        gl.vertex_attrib_pointer(index, components, ty, stride, offset);
    }

    /// Disables every attribute slot this object previously enabled, so
    /// enabled-attribute state cannot leak into unrelated draws.
    pub fn disable_attrib_all(&self, gl: &dyn GlApi) {
        for &attrib in &self.attribs {
            gl.disable_vertex_attrib(attrib);
        }
    }

    /// Re-activates the array and issues a triangle-list draw of `count`
    /// indices starting at index `start`.
    pub fn draw_elements(&mut self, gl: &dyn GlApi, start: i32, count: i32, ty: DataType) {
        self.activate(gl);
        gl.draw_triangle_elements(count, ty, start);
    }

    /// Unbinds, deletes the GL array handle and disposes every attached
    /// buffer. Idempotent: once the handle is the null name this is a no-op.
    pub fn dispose(&mut self, gl: &dyn GlApi) {
        if self.id == 0 {
            return;
        }

        self.deactivate(gl);
        gl.delete_vertex_array(self.id);
        self.id = 0;

        for buffer in &mut self.buffers {
            buffer.dispose(gl);
        }
    }
}
