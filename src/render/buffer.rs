//! Owning wrapper for a single GL buffer object.

use anyhow::{Result, bail};

use crate::render::device::{BufferTarget, BufferUsage, GlApi};

/// One GPU memory buffer of a fixed target kind (vertex or index data).
///
/// The wrapper owns the underlying GL name and releases it exactly once;
/// after [`BufferObject::dispose`] the handle is the null name and further
/// deletes are no-ops. A disposed buffer must not be reused.
#[derive(Debug)]
pub struct BufferObject {
    id: u32,
    target: BufferTarget,
    active: bool,
}

impl BufferObject {
    pub fn new(gl: &dyn GlApi, target: BufferTarget) -> Result<Self> {
        let id = gl.create_buffer()?;
        Ok(Self {
            id,
            target,
            active: false,
        })
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn target(&self) -> BufferTarget {
        self.target
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn activate(&mut self, gl: &dyn GlApi) {
        self.active = true;
        gl.bind_buffer(self.target, self.id);
    }

    pub fn deactivate(&mut self, gl: &dyn GlApi) {
        self.active = false;
        gl.bind_buffer(self.target, 0);
    }

    /// Uploads the full contents of `data`, replacing whatever the buffer
    /// held before. Partial updates are not supported.
    ///
    /// An empty slice is rejected: uploading zero bytes would leave the
    /// buffer in a state every later draw call silently misreads.
    pub fn set_data<T: bytemuck::Pod>(
        &mut self,
        gl: &dyn GlApi,
        usage: BufferUsage,
        data: &[T],
    ) -> Result<()> {
        if data.is_empty() {
            bail!("cannot upload empty data to buffer object #{}", self.id);
        }

        self.activate(gl);
        gl.buffer_data(self.target, bytemuck::cast_slice(data), usage);
        Ok(())
    }

    /// Unbinds and deletes the GL buffer. No-op once the handle has been
    /// released.
    pub fn dispose(&mut self, gl: &dyn GlApi) {
        if self.id == 0 {
            return;
        }

        self.deactivate(gl);
        gl.delete_buffer(self.id);
        self.id = 0;
    }
}
