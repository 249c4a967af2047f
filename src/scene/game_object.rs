//! Named hierarchy nodes owning meshes and children.

use anyhow::Result;
use cgmath::{Quaternion, Vector3};

use crate::{
    render::{device::GlApi, shader::ShaderProgram},
    scene::{
        transform::{TransformId, Transforms, quaternion_from_euler},
        voxel::Voxel,
    },
};

/// A named scene node: one owned transform, an ordered list of voxel
/// primitives and an ordered list of child objects.
///
/// Children are owned by value, so every non-root object lives in exactly one
/// parent's child list and the tree shape is the ownership shape. The node
/// owns its meshes' GPU resources transitively and must not outlive them:
/// [`GameObject::dispose`] releases the whole subtree depth-first and must be
/// called exactly once.
#[derive(Debug)]
pub struct GameObject {
    name: String,
    transform: TransformId,
    mesh: Vec<Voxel>,
    children: Vec<GameObject>,
}

impl GameObject {
    /// Creates a root object with its own transform in `transforms`. Attach
    /// it under another object with [`GameObject::add_child`] or build the
    /// hierarchy top-down with [`GameObject::spawn_child`].
    pub fn new(
        transforms: &mut Transforms,
        name: impl Into<String>,
        position: Vector3<f32>,
        rotation: Quaternion<f32>,
    ) -> Self {
        let transform = transforms.insert(None, position, rotation);
        Self {
            name: name.into(),
            transform,
            mesh: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Euler-angle convenience constructor; the angles (radians) are
    /// converted to a quaternion once, here.
    pub fn with_euler(
        transforms: &mut Transforms,
        name: impl Into<String>,
        position: Vector3<f32>,
        angles: Vector3<f32>,
    ) -> Self {
        Self::new(transforms, name, position, quaternion_from_euler(angles))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn transform(&self) -> TransformId {
        self.transform
    }

    pub fn mesh(&self) -> &[Voxel] {
        &self.mesh
    }

    pub fn children(&self) -> &[GameObject] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut [GameObject] {
        &mut self.children
    }

    /// Appends a primitive to this object's mesh list.
    pub fn add_voxel(&mut self, voxel: Voxel) {
        self.mesh.push(voxel);
    }

    /// Reparents `child` under this object. The child inherits this object's
    /// *current* rotation exactly once, at call time; later rotations only
    /// reach it through [`GameObject::rotate`].
    pub fn add_child(&mut self, transforms: &mut Transforms, mut child: GameObject) -> &mut GameObject {
        transforms.set_parent(child.transform, Some(self.transform));
        let rotation = transforms.rotation(self.transform);
        child.rotate(transforms, rotation);
        self.children.push(child);

        let last = self.children.len() - 1;
        &mut self.children[last]
    }

    /// Constructs a new object directly under this one and returns it for
    /// further population.
    pub fn spawn_child(
        &mut self,
        transforms: &mut Transforms,
        name: impl Into<String>,
        position: Vector3<f32>,
        rotation: Quaternion<f32>,
    ) -> &mut GameObject {
        let child = GameObject::new(transforms, name, position, rotation);
        self.add_child(transforms, child)
    }

    /// Rigid rotation of the whole subtree: composes `delta` into this
    /// object's transform, every owned voxel's transform and every child,
    /// recursively. Each node turns about its *own* local origin, not a
    /// shared pivot.
    pub fn rotate(&mut self, transforms: &mut Transforms, delta: Quaternion<f32>) {
        transforms.rotate(self.transform, delta);
        for voxel in &self.mesh {
            transforms.rotate(voxel.transform(), delta);
        }
        for child in &mut self.children {
            child.rotate(transforms, delta);
        }
    }

    /// Euler-angle convenience overload of [`GameObject::rotate`]; angles in
    /// radians, converted once.
    pub fn rotate_euler(&mut self, transforms: &mut Transforms, angles: Vector3<f32>) {
        self.rotate(transforms, quaternion_from_euler(angles));
    }

    /// Draws every owned voxel, then every child, in list order. No culling,
    /// no state sorting; traversal is deterministic.
    pub fn render(
        &mut self,
        gl: &dyn GlApi,
        transforms: &Transforms,
        program: &ShaderProgram,
    ) -> Result<()> {
        for voxel in &mut self.mesh {
            voxel.render(gl, transforms, program)?;
        }
        for child in &mut self.children {
            child.render(gl, transforms, program)?;
        }
        Ok(())
    }

    /// Releases the subtree's GPU resources depth-first: own voxels, then
    /// children. Must be called exactly once per object.
    pub fn dispose(&mut self, gl: &dyn GlApi) {
        for voxel in &mut self.mesh {
            voxel.dispose(gl);
        }
        for child in &mut self.children {
            child.dispose(gl);
        }
    }

    /// Deep copy: a new root object with the same name, local transform,
    /// voxels (fresh GPU resources) and children.
    ///
    /// Copied children are reparented without the add-time rotation
    /// broadcast: the subtree's local rotations already carry it, so
    /// re-broadcasting would apply it twice.
    pub fn duplicate(
        &self,
        gl: &dyn GlApi,
        transforms: &mut Transforms,
        program: &ShaderProgram,
    ) -> Result<GameObject> {
        let position = transforms.position(self.transform);
        let rotation = transforms.rotation(self.transform);
        let mut copy = GameObject::new(transforms, self.name.clone(), position, rotation);

        for voxel in &self.mesh {
            let position = transforms.position(voxel.transform());
            let copied = Voxel::new(gl, transforms, copy.transform, position, voxel.color(), program)?;
            copy.mesh.push(copied);
        }
        for child in &self.children {
            let copied = child.duplicate(gl, transforms, program)?;
            transforms.set_parent(copied.transform, Some(copy.transform));
            copy.children.push(copied);
        }

        Ok(copy)
    }
}
