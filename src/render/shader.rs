//! Shader program wrapper: compile, link, locations, uniform upload.

use std::fs;

use anyhow::{Context, Result, bail};
use cgmath::Matrix4;

use crate::render::device::{GlApi, ShaderStage};

/// Attribute names the voxel vertex shader exposes.
pub const ATTRIB_POSITION: &str = "inPosition";
pub const ATTRIB_COLOR: &str = "inColor";

/// Uniform names the render loop uploads each frame / draw.
pub const UNIFORM_MODEL: &str = "model";
pub const UNIFORM_VIEW: &str = "view";
pub const UNIFORM_PROJECTION: &str = "projection";

/// Built-in GLSL pair implementing the attribute/uniform contract above.
pub const VOXEL_VERTEX_SHADER: &str = include_str!("voxel.vert");
pub const VOXEL_FRAGMENT_SHADER: &str = include_str!("voxel.frag");

/// A linked two-stage GL program.
///
/// Construction compiles and links eagerly and fails fast: a compile or link
/// error aborts with the driver's diagnostic log attached, there is no
/// half-built program state to observe. The intermediate stage objects are
/// detached and deleted as soon as the link succeeds.
///
/// The program is shared by reference across all draws in a frame; it owns
/// nothing besides its own GL handle.
#[derive(Debug)]
pub struct ShaderProgram {
    id: u32,
}

impl ShaderProgram {
    /// Reads, compiles and links a vertex + fragment shader pair from disk.
    pub fn from_files(gl: &dyn GlApi, vertex_path: &str, fragment_path: &str) -> Result<Self> {
        let vertex_source = fs::read_to_string(vertex_path)
            .with_context(|| format!("failed to read vertex shader {vertex_path}"))?;
        let fragment_source = fs::read_to_string(fragment_path)
            .with_context(|| format!("failed to read fragment shader {fragment_path}"))?;

        Self::from_sources(gl, &vertex_source, &fragment_source)
    }

    /// Compiles and links a vertex + fragment shader pair from in-memory
    /// sources.
    pub fn from_sources(gl: &dyn GlApi, vertex_source: &str, fragment_source: &str) -> Result<Self> {
        let vertex_shader = compile_stage(gl, ShaderStage::Vertex, vertex_source)?;
        let fragment_shader = compile_stage(gl, ShaderStage::Fragment, fragment_source)?;

        let id = gl.create_program()?;
        gl.attach_shader(id, vertex_shader);
        gl.attach_shader(id, fragment_shader);
        gl.link_program(id);

        if !gl.program_link_ok(id) {
            let log = gl.program_info_log(id);
            bail!("shader program #{id} failed to link:\n{log}");
        }

        // The linked binary is self-contained; the stage objects are only
        // link-time inputs.
        gl.detach_shader(id, vertex_shader);
        gl.delete_shader(vertex_shader);
        gl.detach_shader(id, fragment_shader);
        gl.delete_shader(fragment_shader);

        log::debug!("linked shader program #{id}");
        Ok(Self { id })
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn activate(&self, gl: &dyn GlApi) {
        gl.use_program(self.id);
    }

    pub fn deactivate(&self, gl: &dyn GlApi) {
        gl.use_program(0);
    }

    /// Resolves an attribute name to its slot. `None` means the name is not
    /// an active attribute of the linked program; callers must check.
    pub fn attribute_location(&self, gl: &dyn GlApi, name: &str) -> Option<u32> {
        gl.attribute_location(self.id, name)
    }

    /// Resolves a uniform name to its location. `None` means the name is not
    /// an active uniform of the linked program; callers must check.
    pub fn uniform_location(&self, gl: &dyn GlApi, name: &str) -> Option<u32> {
        gl.uniform_location(self.id, name)
    }

    /// Uploads a 4x4 matrix uniform by name. A name the program does not
    /// expose is an error here rather than undefined GL behavior at draw
    /// time; the program must be active when this is called.
    pub fn set_uniform_matrix(
        &self,
        gl: &dyn GlApi,
        name: &str,
        matrix: &Matrix4<f32>,
    ) -> Result<()> {
        let location = self
            .uniform_location(gl, name)
            .with_context(|| format!("shader program #{} has no uniform \"{name}\"", self.id))?;

        // cgmath matrices are column-major, which is what GL expects.
        gl.set_uniform_matrix4(location, false, matrix.as_ref());
        Ok(())
    }

    /// Deletes the GL program. The wrapper is not guarded against reuse
    /// after disposal.
    pub fn dispose(&mut self, gl: &dyn GlApi) {
        gl.delete_program(self.id);
        self.id = 0;
    }
}

fn compile_stage(gl: &dyn GlApi, stage: ShaderStage, source: &str) -> Result<u32> {
    let shader = gl.create_shader(stage)?;
    gl.shader_source(shader, source);
    gl.compile_shader(shader);

    if !gl.shader_compile_ok(shader) {
        let log = gl.shader_info_log(shader);
        bail!("{} shader #{shader} failed to compile:\n{log}", stage.label());
    }

    Ok(shader)
}
