//! GPU resource wrappers and the capability trait they are written against.
//!
//! - `device` defines [`device::GlApi`], the small GL surface the engine
//!   needs, and implements it for `glow::Context`
//! - `buffer` owns a single GL buffer (vertex or index data)
//! - `array` owns a vertex-array object and the buffers attached to it
//! - `shader` owns a linked two-stage program plus location lookup
//!
//! Ownership is a strict tree: an [`array::ArrayObject`] owns its
//! [`buffer::BufferObject`]s and disposes them when it is disposed; the
//! [`shader::ShaderProgram`] is independent and shared by reference across
//! all draws in a frame.

pub mod array;
pub mod buffer;
pub mod device;
pub mod shader;
