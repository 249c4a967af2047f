use std::{
    cell::{Cell, RefCell},
    collections::HashMap,
};

use anyhow::Result;
use cgmath::{Quaternion, Vector3};
use voxel_ngin::render::device::{BufferTarget, BufferUsage, DataType, GlApi, ShaderStage};

pub(crate) const EPSILON: f32 = 1e-5;

pub(crate) fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub(crate) fn assert_vec3_eq(actual: Vector3<f32>, expected: Vector3<f32>) {
    let delta = actual - expected;
    assert!(
        delta.x.abs() < EPSILON && delta.y.abs() < EPSILON && delta.z.abs() < EPSILON,
        "expected {expected:?}, got {actual:?}"
    );
}

pub(crate) fn assert_quat_eq(actual: Quaternion<f32>, expected: Quaternion<f32>) {
    let close = (actual.s - expected.s).abs() < EPSILON
        && (actual.v.x - expected.v.x).abs() < EPSILON
        && (actual.v.y - expected.v.y).abs() < EPSILON
        && (actual.v.z - expected.v.z).abs() < EPSILON;
    assert!(close, "expected {expected:?}, got {actual:?}");
}

/// A `GlApi` double that hands out sequential handles and records every call,
/// so resource lifecycles and call ordering can be asserted without a live GL
/// context.
pub(crate) struct RecordingGl {
    next_id: Cell<u32>,
    bound_array_buffer: Cell<u32>,
    bound_element_buffer: Cell<u32>,
    bound_vertex_array: Cell<u32>,
    shader_stages: RefCell<HashMap<u32, ShaderStage>>,
    pub calls: RefCell<Vec<String>>,
    /// (target, buffer bound on that target, uploaded bytes)
    pub buffer_uploads: RefCell<Vec<(BufferTarget, u32, Vec<u8>)>>,
    /// (uniform location, column-major matrix)
    pub uniform_uploads: RefCell<Vec<(u32, [f32; 16])>>,
    pub deleted_buffers: RefCell<Vec<u32>>,
    pub deleted_vertex_arrays: RefCell<Vec<u32>>,
    pub deleted_shaders: RefCell<Vec<u32>>,
    pub deleted_programs: RefCell<Vec<u32>>,
    pub attributes: HashMap<String, u32>,
    pub uniforms: HashMap<String, u32>,
    pub fail_compile: Cell<Option<ShaderStage>>,
    pub fail_link: Cell<bool>,
}

impl RecordingGl {
    pub fn new() -> Self {
        let attributes = HashMap::from([("inPosition".to_string(), 0), ("inColor".to_string(), 1)]);
        let uniforms = HashMap::from([
            ("model".to_string(), 0),
            ("view".to_string(), 1),
            ("projection".to_string(), 2),
        ]);

        Self {
            next_id: Cell::new(1),
            bound_array_buffer: Cell::new(0),
            bound_element_buffer: Cell::new(0),
            bound_vertex_array: Cell::new(0),
            shader_stages: RefCell::new(HashMap::new()),
            calls: RefCell::new(Vec::new()),
            buffer_uploads: RefCell::new(Vec::new()),
            uniform_uploads: RefCell::new(Vec::new()),
            deleted_buffers: RefCell::new(Vec::new()),
            deleted_vertex_arrays: RefCell::new(Vec::new()),
            deleted_shaders: RefCell::new(Vec::new()),
            deleted_programs: RefCell::new(Vec::new()),
            attributes,
            uniforms,
            fail_compile: Cell::new(None),
            fail_link: Cell::new(false),
        }
    }

    pub fn without_uniform(mut self, name: &str) -> Self {
        self.uniforms.remove(name);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }

    fn allocate(&self) -> u32 {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        id
    }

    fn bound_buffer(&self, target: BufferTarget) -> &Cell<u32> {
        match target {
            BufferTarget::Array => &self.bound_array_buffer,
            BufferTarget::ElementArray => &self.bound_element_buffer,
        }
    }
}

impl GlApi for RecordingGl {
    fn create_buffer(&self) -> Result<u32> {
        let id = self.allocate();
        self.record(format!("create_buffer {id}"));
        Ok(id)
    }

    fn bind_buffer(&self, target: BufferTarget, buffer: u32) {
        self.bound_buffer(target).set(buffer);
        self.record(format!("bind_buffer {target:?} {buffer}"));
    }

    fn buffer_data(&self, target: BufferTarget, data: &[u8], usage: BufferUsage) {
        let bound = self.bound_buffer(target).get();
        self.record(format!(
            "buffer_data {target:?} buffer={bound} bytes={} {usage:?}",
            data.len()
        ));
        self.buffer_uploads
            .borrow_mut()
            .push((target, bound, data.to_vec()));
    }

    fn delete_buffer(&self, buffer: u32) {
        self.record(format!("delete_buffer {buffer}"));
        self.deleted_buffers.borrow_mut().push(buffer);
    }

    fn create_vertex_array(&self) -> Result<u32> {
        let id = self.allocate();
        self.record(format!("create_vertex_array {id}"));
        Ok(id)
    }

    fn bind_vertex_array(&self, array: u32) {
        self.bound_vertex_array.set(array);
        self.record(format!("bind_vertex_array {array}"));
    }

    fn delete_vertex_array(&self, array: u32) {
        self.record(format!("delete_vertex_array {array}"));
        self.deleted_vertex_arrays.borrow_mut().push(array);
    }

    fn enable_vertex_attrib(&self, index: u32) {
        self.record(format!("enable_vertex_attrib {index}"));
    }

    fn disable_vertex_attrib(&self, index: u32) {
        self.record(format!("disable_vertex_attrib {index}"));
    }

    fn vertex_attrib_pointer(
        &self,
        index: u32,
        components: i32,
        ty: DataType,
        stride: i32,
        offset: i32,
    ) {
        self.record(format!(
            "vertex_attrib_pointer index={index} components={components} {ty:?} stride={stride} offset={offset}"
        ));
    }

    fn draw_triangle_elements(&self, count: i32, ty: DataType, offset: i32) {
        let vao = self.bound_vertex_array.get();
        self.record(format!(
            "draw_triangle_elements vao={vao} count={count} {ty:?} offset={offset}"
        ));
    }

    fn create_shader(&self, stage: ShaderStage) -> Result<u32> {
        let id = self.allocate();
        self.shader_stages.borrow_mut().insert(id, stage);
        self.record(format!("create_shader {stage:?} {id}"));
        Ok(id)
    }

    fn shader_source(&self, shader: u32, source: &str) {
        self.record(format!("shader_source {shader} len={}", source.len()));
    }

    fn compile_shader(&self, shader: u32) {
        self.record(format!("compile_shader {shader}"));
    }

    fn shader_compile_ok(&self, shader: u32) -> bool {
        let stage = self.shader_stages.borrow().get(&shader).copied();
        match (stage, self.fail_compile.get()) {
            (Some(stage), Some(failing)) => stage != failing,
            _ => true,
        }
    }

    fn shader_info_log(&self, shader: u32) -> String {
        format!("synthetic diagnostic for shader #{shader}")
    }

    fn delete_shader(&self, shader: u32) {
        self.record(format!("delete_shader {shader}"));
        self.deleted_shaders.borrow_mut().push(shader);
    }

    fn create_program(&self) -> Result<u32> {
        let id = self.allocate();
        self.record(format!("create_program {id}"));
        Ok(id)
    }

    fn attach_shader(&self, program: u32, shader: u32) {
        self.record(format!("attach_shader {program} {shader}"));
    }

    fn detach_shader(&self, program: u32, shader: u32) {
        self.record(format!("detach_shader {program} {shader}"));
    }

    fn link_program(&self, program: u32) {
        self.record(format!("link_program {program}"));
    }

    fn program_link_ok(&self, _program: u32) -> bool {
        !self.fail_link.get()
    }

    fn program_info_log(&self, program: u32) -> String {
        format!("synthetic diagnostic for program #{program}")
    }

    fn use_program(&self, program: u32) {
        self.record(format!("use_program {program}"));
    }

    fn delete_program(&self, program: u32) {
        self.record(format!("delete_program {program}"));
        self.deleted_programs.borrow_mut().push(program);
    }

    fn attribute_location(&self, _program: u32, name: &str) -> Option<u32> {
        self.attributes.get(name).copied()
    }

    fn uniform_location(&self, _program: u32, name: &str) -> Option<u32> {
        self.uniforms.get(name).copied()
    }

    fn set_uniform_matrix4(&self, location: u32, transpose: bool, value: &[f32; 16]) {
        self.record(format!(
            "set_uniform_matrix4 location={location} transpose={transpose}"
        ));
        self.uniform_uploads.borrow_mut().push((location, *value));
    }

    fn set_clear_color(&self, r: f32, g: f32, b: f32, a: f32) {
        self.record(format!("set_clear_color {r} {g} {b} {a}"));
    }

    fn clear_frame(&self) {
        self.record("clear_frame".to_string());
    }

    fn set_viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        self.record(format!("set_viewport {x} {y} {width} {height}"));
    }
}
