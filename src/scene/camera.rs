//! Camera: view/projection derivation from a transform.

use cgmath::{Deg, EuclideanSpace, Matrix4, Point3, Rad, Vector2, Vector3, ortho, perspective};

use crate::scene::transform::{TransformId, Transforms, identity_rotation, quaternion_from_euler};

const MIN_FOV_DEG: f32 = 1.0;
const MAX_FOV_DEG: f32 = 120.0;
// Stop short of the poles so the look-at up vector stays well defined.
const MAX_PITCH_DEG: f32 = 89.0;

/// A named, transform-bearing viewpoint.
///
/// The camera owns a root transform (no parent) in the caller's arena and
/// derives its view matrix from that transform's global position and basis
/// vectors. Projection is either perspective (field of view + aspect ratio)
/// or orthographic (view size in world units), switchable at runtime.
///
/// Pitch and yaw are input conveniences: the setters rebuild the transform's
/// quaternion, which stays the single source of truth for orientation.
#[derive(Debug)]
pub struct Camera {
    name: String,
    transform: TransformId,
    view_size: Vector2<f32>,
    orthographic: bool,
    depth_near: f32,
    depth_far: f32,
    fov: Rad<f32>,
    pitch: Deg<f32>,
    yaw: Deg<f32>,
}

impl Camera {
    /// A perspective camera with the default planes (0.01 / 1000.0) and a
    /// 45 degree field of view.
    pub fn new(
        transforms: &mut Transforms,
        name: impl Into<String>,
        position: Vector3<f32>,
        view_size: Vector2<f32>,
    ) -> Self {
        Self::with_projection(transforms, name, position, view_size, false, 0.01, 1000.0, Deg(45.0))
    }

    pub fn with_projection(
        transforms: &mut Transforms,
        name: impl Into<String>,
        position: Vector3<f32>,
        view_size: Vector2<f32>,
        orthographic: bool,
        depth_near: f32,
        depth_far: f32,
        fov: Deg<f32>,
    ) -> Self {
        let transform = transforms.insert(None, position, identity_rotation());
        let mut camera = Self {
            name: name.into(),
            transform,
            view_size,
            orthographic,
            depth_near,
            depth_far,
            fov: Rad::from(Deg(45.0)),
            pitch: Deg(0.0),
            yaw: Deg(0.0),
        };
        camera.set_fov(fov);
        camera
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn transform(&self) -> TransformId {
        self.transform
    }

    pub fn view_size(&self) -> Vector2<f32> {
        self.view_size
    }

    /// Part of the resize contract: must be called (with the new dimensions)
    /// before the next [`Camera::projection_matrix`] after a viewport
    /// resize.
    pub fn set_view_size(&mut self, width: f32, height: f32) {
        self.view_size = Vector2::new(width, height);
    }

    pub fn is_orthographic(&self) -> bool {
        self.orthographic
    }

    pub fn set_orthographic(&mut self, orthographic: bool) {
        self.orthographic = orthographic;
    }

    pub fn depth_near(&self) -> f32 {
        self.depth_near
    }

    pub fn depth_far(&self) -> f32 {
        self.depth_far
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.view_size.x / self.view_size.y
    }

    pub fn fov(&self) -> Deg<f32> {
        Deg::from(self.fov)
    }

    /// Sets the field of view, clamped to [1°, 120°].
    pub fn set_fov(&mut self, fov: Deg<f32>) {
        let clamped = fov.0.clamp(MIN_FOV_DEG, MAX_FOV_DEG);
        if clamped != fov.0 {
            log::warn!("field of view {}° clamped to {clamped}°", fov.0);
        }
        self.fov = Rad::from(Deg(clamped));
    }

    pub fn pitch(&self) -> Deg<f32> {
        self.pitch
    }

    /// Sets the pitch angle, clamped to [-89°, 89°], and rebuilds the
    /// transform's rotation.
    pub fn set_pitch(&mut self, transforms: &mut Transforms, pitch: Deg<f32>) {
        let clamped = pitch.0.clamp(-MAX_PITCH_DEG, MAX_PITCH_DEG);
        if clamped != pitch.0 {
            log::warn!("pitch {}° clamped to {clamped}°", pitch.0);
        }
        self.pitch = Deg(clamped);
        self.update_rotation(transforms);
    }

    pub fn yaw(&self) -> Deg<f32> {
        self.yaw
    }

    /// Sets the yaw angle (unclamped) and rebuilds the transform's rotation.
    pub fn set_yaw(&mut self, transforms: &mut Transforms, yaw: Deg<f32>) {
        self.yaw = yaw;
        self.update_rotation(transforms);
    }

    /// Moves the camera to an absolute position.
    pub fn translate(&self, transforms: &mut Transforms, position: Vector3<f32>) {
        transforms.translate(self.transform, position);
    }

    /// Right-handed look-at from the transform's global position along its
    /// front vector.
    pub fn view_matrix(&self, transforms: &Transforms) -> Matrix4<f32> {
        let eye = Point3::from_vec(transforms.global_position(self.transform));
        let front = transforms.front(self.transform);
        let up = transforms.up(self.transform);

        Matrix4::look_at_rh(eye, eye + front, up)
    }

    /// Orthographic projection sized to the view size (world units), or
    /// perspective projection from field of view and aspect ratio.
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        if self.orthographic {
            let half_width = self.view_size.x / 2.0;
            let half_height = self.view_size.y / 2.0;
            ortho(
                -half_width,
                half_width,
                -half_height,
                half_height,
                self.depth_near,
                self.depth_far,
            )
        } else {
            perspective(self.fov, self.aspect_ratio(), self.depth_near, self.depth_far)
        }
    }

    fn update_rotation(&self, transforms: &mut Transforms) {
        let rotation = quaternion_from_euler(Vector3::new(
            Rad::from(self.pitch).0,
            Rad::from(self.yaw).0,
            0.0,
        ));
        transforms.set_rotation(self.transform, rotation);
    }
}
