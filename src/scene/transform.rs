//! Hierarchical transforms stored in an arena.
//!
//! A transform is local position + local rotation plus an optional parent
//! link. Nodes live in a [`Transforms`] arena and are addressed by stable
//! [`TransformId`] handles; the arena owns every node, parent links are plain
//! handles with no lifetime of their own. Slots are never removed or reused,
//! so a handle stays valid for the arena's whole lifetime.
//!
//! Parent chains are expected to be acyclic. That is a construction
//! discipline of the scene types, not something the arena checks per call.

use cgmath::{Euler, InnerSpace, Matrix4, One, Quaternion, Rad, Vector3};

/// Stable handle to one node in a [`Transforms`] arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TransformId(usize);

/// One node: local position, local rotation, optional parent.
#[derive(Clone, Debug)]
struct Node {
    position: Vector3<f32>,
    rotation: Quaternion<f32>,
    parent: Option<TransformId>,
}

/// Arena of transform nodes.
///
/// Rotations are kept as unit quaternions throughout: inputs are expected to
/// be unit (Euler input is converted exactly once at the call boundary) and
/// composition of unit quaternions stays unit.
#[derive(Debug, Default)]
pub struct Transforms {
    nodes: Vec<Node>,
}

impl Transforms {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates a node and returns its handle.
    pub fn insert(
        &mut self,
        parent: Option<TransformId>,
        position: Vector3<f32>,
        rotation: Quaternion<f32>,
    ) -> TransformId {
        self.nodes.push(Node {
            position,
            rotation,
            parent,
        });
        TransformId(self.nodes.len() - 1)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn parent(&self, id: TransformId) -> Option<TransformId> {
        self.nodes[id.0].parent
    }

    pub fn set_parent(&mut self, id: TransformId, parent: Option<TransformId>) {
        self.nodes[id.0].parent = parent;
    }

    pub fn position(&self, id: TransformId) -> Vector3<f32> {
        self.nodes[id.0].position
    }

    pub fn rotation(&self, id: TransformId) -> Quaternion<f32> {
        self.nodes[id.0].rotation
    }

    pub fn set_rotation(&mut self, id: TransformId, rotation: Quaternion<f32>) {
        self.nodes[id.0].rotation = rotation;
    }

    /// Composes `delta` into the node's local rotation (local-space
    /// post-multiply). Affects this node only; whether to propagate to
    /// children or meshes is the caller's decision.
    pub fn rotate(&mut self, id: TransformId, delta: Quaternion<f32>) {
        let node = &mut self.nodes[id.0];
        node.rotation = node.rotation * delta;
    }

    /// Replaces the node's local position. An absolute set, not a relative
    /// delta, to match direct-input camera control.
    pub fn translate(&mut self, id: TransformId, position: Vector3<f32>) {
        self.nodes[id.0].position = position;
    }

    /// Global-frame position: the parent's global position plus this node's
    /// local position rotated into the parent's global frame. A node without
    /// a parent is its own global frame.
    pub fn global_position(&self, id: TransformId) -> Vector3<f32> {
        let node = &self.nodes[id.0];
        match node.parent {
            Some(parent) => {
                self.global_position(parent) + self.global_rotation(parent) * node.position
            }
            None => node.position,
        }
    }

    /// Global-frame rotation, composed local-first up the whole parent
    /// chain: `local * parent_global`.
    pub fn global_rotation(&self, id: TransformId) -> Quaternion<f32> {
        let node = &self.nodes[id.0];
        match node.parent {
            Some(parent) => node.rotation * self.global_rotation(parent),
            None => node.rotation,
        }
    }

    /// Model matrix: rotate by the local rotation, then translate to the
    /// global position. Scale is not modeled.
    pub fn model_matrix(&self, id: TransformId) -> Matrix4<f32> {
        Matrix4::from_translation(self.global_position(id))
            * Matrix4::from(self.nodes[id.0].rotation)
    }

    /// Forward basis vector: local rotation applied to -Z.
    pub fn front(&self, id: TransformId) -> Vector3<f32> {
        self.nodes[id.0].rotation * -Vector3::unit_z()
    }

    /// Right basis vector. Undefined (zero-length cross, NaN after
    /// normalize) when `front` is parallel to world up.
    pub fn right(&self, id: TransformId) -> Vector3<f32> {
        self.front(id).cross(Vector3::unit_y()).normalize()
    }

    /// Up basis vector, orthogonal to `right` and `front`.
    pub fn up(&self, id: TransformId) -> Vector3<f32> {
        self.right(id).cross(self.front(id)).normalize()
    }
}

/// One-time conversion from Euler angles (radians, pitch/yaw/roll) to a unit
/// quaternion. Euler angles are an input convenience only and never stored.
pub fn quaternion_from_euler(angles: Vector3<f32>) -> Quaternion<f32> {
    Quaternion::from(Euler::new(Rad(angles.x), Rad(angles.y), Rad(angles.z)))
}

/// The identity rotation.
pub fn identity_rotation() -> Quaternion<f32> {
    Quaternion::one()
}
