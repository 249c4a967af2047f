//! Per-frame render composition.
//!
//! The external driver owns the window, the GL context and the swap chain;
//! this module encodes the fixed call order a frame must follow between
//! those driver-side boundaries. Presenting/swapping stays with the driver.

use anyhow::Result;

use crate::{
    render::{
        device::GlApi,
        shader::{ShaderProgram, UNIFORM_PROJECTION, UNIFORM_VIEW},
    },
    scene::{camera::Camera, game_object::GameObject, transform::Transforms},
};

/// Renders one frame: clear color+depth, activate the shared program, upload
/// the camera's view and projection, draw every root object in order, then
/// deactivate the program.
///
/// Camera uniforms are uploaded once per frame; each voxel uploads its own
/// model matrix during traversal.
pub fn render_frame(
    gl: &dyn GlApi,
    program: &ShaderProgram,
    camera: &Camera,
    transforms: &Transforms,
    roots: &mut [GameObject],
    clear_color: [f32; 4],
) -> Result<()> {
    gl.set_clear_color(clear_color[0], clear_color[1], clear_color[2], clear_color[3]);
    gl.clear_frame();

    program.activate(gl);
    program.set_uniform_matrix(gl, UNIFORM_VIEW, &camera.view_matrix(transforms))?;
    program.set_uniform_matrix(gl, UNIFORM_PROJECTION, &camera.projection_matrix())?;

    for root in roots.iter_mut() {
        root.render(gl, transforms, program)?;
    }

    program.deactivate(gl);
    Ok(())
}

/// Viewport-resize handling: updates the GL viewport and the camera's view
/// size so the next projection matrix uses the new aspect ratio.
pub fn resize(gl: &dyn GlApi, camera: &mut Camera, width: u32, height: u32) {
    camera.set_view_size(width as f32, height as f32);
    gl.set_viewport(0, 0, width as i32, height as i32);
}
