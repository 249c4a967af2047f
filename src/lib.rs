//! voxel-ngin
//!
//! A minimal real-time 3D rendering library: hierarchical scenes of named
//! game objects composed of unit-cube primitives ("voxels"), viewed through a
//! movable camera and drawn via explicitly owned GPU resources. The crate
//! deliberately has no window, input or frame loop of its own; an external
//! driver owns the GL context and calls into the library once per frame.
//!
//! High-level modules
//! - `scene`: the transform arena, game objects, voxel primitives and camera
//! - `render`: GPU resource wrappers (buffers, vertex arrays, shader program)
//!   and the `GlApi` capability trait they are written against
//! - `frame`: per-frame render composition (clear, camera upload, traversal)
//!
//! Every GPU-touching call takes the GL context and the active shader program
//! as explicit arguments; there is no ambient "current program" state in the
//! library and no global context singleton.

pub mod frame;
pub mod render;
pub mod scene;

// Re-exports commonly used types for convenience in downstream code.
pub use cgmath::*;
pub use glow;
