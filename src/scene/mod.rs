//! Scene data model: transforms, game objects, voxel primitives, camera.
//!
//! - `transform` is the arena of position/rotation nodes every other scene
//!   type addresses through stable [`transform::TransformId`] handles
//! - `game_object` is the named hierarchy node owning meshes and children
//! - `voxel` is the unit-cube mesh primitive with its own GPU resources
//! - `camera` derives view/projection matrices from a transform

pub mod camera;
pub mod game_object;
pub mod transform;
pub mod voxel;
