//! The GL capability surface the engine is written against.
//!
//! Rather than calling into an ambient GL binding, every wrapper in this
//! crate takes a `&dyn GlApi` argument. Handles are plain `u32` GL object
//! names with `0` as the null name, so the trait stays object safe and a
//! recording fake can stand in for a live context in tests. The one
//! production implementation lives here too: `glow::Context`, which is the
//! only place in the crate that contains `unsafe` code.

use std::num::NonZeroU32;

use anyhow::{Result, anyhow};
use glow::HasContext;

/// Which GL binding point a buffer lives on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BufferTarget {
    /// `GL_ARRAY_BUFFER`, vertex data.
    Array,
    /// `GL_ELEMENT_ARRAY_BUFFER`, index data.
    ElementArray,
}

/// Upload frequency hint passed through to `glBufferData`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BufferUsage {
    StaticDraw,
    DynamicDraw,
    StreamDraw,
}

/// Component type of an attribute stream or index buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataType {
    Float,
    UnsignedInt,
}

/// The two shader stages a program is linked from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    pub fn label(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Fragment => "fragment",
        }
    }
}

/// Everything the engine needs from a GL context.
///
/// All methods take `&self`: a GL context is free-threaded state from the
/// caller's point of view and glow follows the same convention. Creation
/// calls are fallible because the underlying driver call is; everything else
/// mirrors the fire-and-forget nature of the GL API.
///
/// Passing `0` to any `bind_*` or `use_program` call unbinds.
pub trait GlApi {
    fn create_buffer(&self) -> Result<u32>;
    fn bind_buffer(&self, target: BufferTarget, buffer: u32);
    fn buffer_data(&self, target: BufferTarget, data: &[u8], usage: BufferUsage);
    fn delete_buffer(&self, buffer: u32);

    fn create_vertex_array(&self) -> Result<u32>;
    fn bind_vertex_array(&self, array: u32);
    fn delete_vertex_array(&self, array: u32);

    fn enable_vertex_attrib(&self, index: u32);
    fn disable_vertex_attrib(&self, index: u32);
    fn vertex_attrib_pointer(
        &self,
        index: u32,
        components: i32,
        ty: DataType,
        stride: i32,
        offset: i32,
    );
    /// Issues an indexed triangle-list draw from the currently bound
    /// vertex-array state.
    fn draw_triangle_elements(&self, count: i32, ty: DataType, offset: i32);

    fn create_shader(&self, stage: ShaderStage) -> Result<u32>;
    fn shader_source(&self, shader: u32, source: &str);
    fn compile_shader(&self, shader: u32);
    fn shader_compile_ok(&self, shader: u32) -> bool;
    fn shader_info_log(&self, shader: u32) -> String;
    fn delete_shader(&self, shader: u32);

    fn create_program(&self) -> Result<u32>;
    fn attach_shader(&self, program: u32, shader: u32);
    fn detach_shader(&self, program: u32, shader: u32);
    fn link_program(&self, program: u32);
    fn program_link_ok(&self, program: u32) -> bool;
    fn program_info_log(&self, program: u32) -> String;
    fn use_program(&self, program: u32);
    fn delete_program(&self, program: u32);

    fn attribute_location(&self, program: u32, name: &str) -> Option<u32>;
    fn uniform_location(&self, program: u32, name: &str) -> Option<u32>;
    /// Uploads a 4x4 float matrix to a location of the currently used
    /// program, column-major unless `transpose` is set.
    fn set_uniform_matrix4(&self, location: u32, transpose: bool, value: &[f32; 16]);

    fn set_clear_color(&self, r: f32, g: f32, b: f32, a: f32);
    /// Clears both the color and the depth buffer.
    fn clear_frame(&self);
    fn set_viewport(&self, x: i32, y: i32, width: i32, height: i32);
}

impl BufferTarget {
    fn to_gl(self) -> u32 {
        match self {
            BufferTarget::Array => glow::ARRAY_BUFFER,
            BufferTarget::ElementArray => glow::ELEMENT_ARRAY_BUFFER,
        }
    }
}

impl BufferUsage {
    fn to_gl(self) -> u32 {
        match self {
            BufferUsage::StaticDraw => glow::STATIC_DRAW,
            BufferUsage::DynamicDraw => glow::DYNAMIC_DRAW,
            BufferUsage::StreamDraw => glow::STREAM_DRAW,
        }
    }
}

impl DataType {
    fn to_gl(self) -> u32 {
        match self {
            DataType::Float => glow::FLOAT,
            DataType::UnsignedInt => glow::UNSIGNED_INT,
        }
    }
}

impl ShaderStage {
    fn to_gl(self) -> u32 {
        match self {
            ShaderStage::Vertex => glow::VERTEX_SHADER,
            ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        }
    }
}

// u32 names <-> glow's non-zero handle types. `None` is the null name.
fn buf(id: u32) -> Option<glow::NativeBuffer> {
    NonZeroU32::new(id).map(glow::NativeBuffer)
}

fn vao(id: u32) -> Option<glow::NativeVertexArray> {
    NonZeroU32::new(id).map(glow::NativeVertexArray)
}

fn shader(id: u32) -> Option<glow::NativeShader> {
    NonZeroU32::new(id).map(glow::NativeShader)
}

fn program(id: u32) -> Option<glow::NativeProgram> {
    NonZeroU32::new(id).map(glow::NativeProgram)
}

impl GlApi for glow::Context {
    fn create_buffer(&self) -> Result<u32> {
        let buffer = unsafe { HasContext::create_buffer(self) }
            .map_err(|e| anyhow!("failed to create buffer object: {e}"))?;
        Ok(buffer.0.get())
    }

    fn bind_buffer(&self, target: BufferTarget, buffer: u32) {
        unsafe { HasContext::bind_buffer(self, target.to_gl(), buf(buffer)) }
    }

    fn buffer_data(&self, target: BufferTarget, data: &[u8], usage: BufferUsage) {
        unsafe { HasContext::buffer_data_u8_slice(self, target.to_gl(), data, usage.to_gl()) }
    }

    fn delete_buffer(&self, buffer: u32) {
        if let Some(buffer) = buf(buffer) {
            unsafe { HasContext::delete_buffer(self, buffer) }
        }
    }

    fn create_vertex_array(&self) -> Result<u32> {
        let array = unsafe { HasContext::create_vertex_array(self) }
            .map_err(|e| anyhow!("failed to create vertex array object: {e}"))?;
        Ok(array.0.get())
    }

    fn bind_vertex_array(&self, array: u32) {
        unsafe { HasContext::bind_vertex_array(self, vao(array)) }
    }

    fn delete_vertex_array(&self, array: u32) {
        if let Some(array) = vao(array) {
            unsafe { HasContext::delete_vertex_array(self, array) }
        }
    }

    fn enable_vertex_attrib(&self, index: u32) {
        unsafe { HasContext::enable_vertex_attrib_array(self, index) }
    }

    fn disable_vertex_attrib(&self, index: u32) {
        unsafe { HasContext::disable_vertex_attrib_array(self, index) }
    }

    fn vertex_attrib_pointer(
        &self,
        index: u32,
        components: i32,
        ty: DataType,
        stride: i32,
        offset: i32,
    ) {
        unsafe {
            HasContext::vertex_attrib_pointer_f32(
                self,
                index,
                components,
                ty.to_gl(),
                false,
                stride,
                offset,
            )
        }
    }

    fn draw_triangle_elements(&self, count: i32, ty: DataType, offset: i32) {
        unsafe { HasContext::draw_elements(self, glow::TRIANGLES, count, ty.to_gl(), offset) }
    }

    fn create_shader(&self, stage: ShaderStage) -> Result<u32> {
        let shader = unsafe { HasContext::create_shader(self, stage.to_gl()) }
            .map_err(|e| anyhow!("failed to create {} shader: {e}", stage.label()))?;
        Ok(shader.0.get())
    }

    fn shader_source(&self, id: u32, source: &str) {
        if let Some(id) = shader(id) {
            unsafe { HasContext::shader_source(self, id, source) }
        }
    }

    fn compile_shader(&self, id: u32) {
        if let Some(id) = shader(id) {
            unsafe { HasContext::compile_shader(self, id) }
        }
    }

    fn shader_compile_ok(&self, id: u32) -> bool {
        match shader(id) {
            Some(id) => unsafe { HasContext::get_shader_compile_status(self, id) },
            None => false,
        }
    }

    fn shader_info_log(&self, id: u32) -> String {
        match shader(id) {
            Some(id) => unsafe { HasContext::get_shader_info_log(self, id) },
            None => String::new(),
        }
    }

    fn delete_shader(&self, id: u32) {
        if let Some(id) = shader(id) {
            unsafe { HasContext::delete_shader(self, id) }
        }
    }

    fn create_program(&self) -> Result<u32> {
        let id = unsafe { HasContext::create_program(self) }
            .map_err(|e| anyhow!("failed to create shader program: {e}"))?;
        Ok(id.0.get())
    }

    fn attach_shader(&self, program_id: u32, shader_id: u32) {
        if let (Some(p), Some(s)) = (program(program_id), shader(shader_id)) {
            unsafe { HasContext::attach_shader(self, p, s) }
        }
    }

    fn detach_shader(&self, program_id: u32, shader_id: u32) {
        if let (Some(p), Some(s)) = (program(program_id), shader(shader_id)) {
            unsafe { HasContext::detach_shader(self, p, s) }
        }
    }

    fn link_program(&self, id: u32) {
        if let Some(id) = program(id) {
            unsafe { HasContext::link_program(self, id) }
        }
    }

    fn program_link_ok(&self, id: u32) -> bool {
        match program(id) {
            Some(id) => unsafe { HasContext::get_program_link_status(self, id) },
            None => false,
        }
    }

    fn program_info_log(&self, id: u32) -> String {
        match program(id) {
            Some(id) => unsafe { HasContext::get_program_info_log(self, id) },
            None => String::new(),
        }
    }

    fn use_program(&self, id: u32) {
        unsafe { HasContext::use_program(self, program(id)) }
    }

    fn delete_program(&self, id: u32) {
        if let Some(id) = program(id) {
            unsafe { HasContext::delete_program(self, id) }
        }
    }

    fn attribute_location(&self, program_id: u32, name: &str) -> Option<u32> {
        program(program_id)
            .and_then(|p| unsafe { HasContext::get_attrib_location(self, p, name) })
    }

    fn uniform_location(&self, program_id: u32, name: &str) -> Option<u32> {
        program(program_id)
            .and_then(|p| unsafe { HasContext::get_uniform_location(self, p, name) })
            .map(|location| location.0)
    }

    fn set_uniform_matrix4(&self, location: u32, transpose: bool, value: &[f32; 16]) {
        let location = glow::NativeUniformLocation(location);
        unsafe { HasContext::uniform_matrix_4_f32_slice(self, Some(&location), transpose, value) }
    }

    fn set_clear_color(&self, r: f32, g: f32, b: f32, a: f32) {
        unsafe { HasContext::clear_color(self, r, g, b, a) }
    }

    fn clear_frame(&self) {
        unsafe { HasContext::clear(self, glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT) }
    }

    fn set_viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        unsafe { HasContext::viewport(self, x, y, width, height) }
    }
}
