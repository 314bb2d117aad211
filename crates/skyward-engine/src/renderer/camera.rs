use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2, Vec3};
use crate::systems::picking::Ray;

/// Where the camera sits and what it looks at.
/// `target` doubles as the orbit-controls pivot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub target: Vec3,
}

impl CameraPose {
    pub fn new(position: Vec3, target: Vec3) -> Self {
        Self { position, target }
    }

    /// Distance from the camera to its pivot.
    pub fn distance(&self) -> f32 {
        self.position.distance(self.target)
    }

    /// Translate both position and pivot.
    pub fn translated(self, delta: Vec3) -> Self {
        Self {
            position: self.position + delta,
            target: self.target + delta,
        }
    }
}

/// Perspective camera for 3D rendering and picking.
/// Produces view/projection matrices and unprojects screen points into rays.
#[derive(Debug, Clone)]
pub struct Camera3D {
    pub pose: CameraPose,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
    /// Viewport size in screen pixels.
    pub viewport: Vec2,
    /// Orbit distance limits.
    pub min_distance: f32,
    pub max_distance: f32,
}

/// GPU-side uniform data for the camera.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    /// World-space camera position, w = 1.
    pub position: [f32; 4],
}

impl Camera3D {
    const ORBIT_SENSITIVITY: f32 = 0.008;
    const MAX_ELEVATION: f32 = 1.4; // ~80 degrees

    pub fn new(viewport_width: f32, viewport_height: f32) -> Self {
        Self {
            pose: CameraPose::new(Vec3::new(0.0, 60.0, 120.0), Vec3::ZERO),
            fov_y: 50f32.to_radians(),
            near: 0.1,
            far: 20_000.0,
            viewport: Vec2::new(viewport_width.max(1.0), viewport_height.max(1.0)),
            min_distance: 0.5,
            max_distance: 2_000.0,
        }
    }

    pub fn aspect(&self) -> f32 {
        self.viewport.x / self.viewport.y
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.pose.position, self.pose.target, Vec3::Y)
    }

    /// Right-handed perspective, depth in [0, 1].
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect(), self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn uniform(&self) -> CameraUniform {
        CameraUniform {
            view_proj: self.view_projection().to_cols_array_2d(),
            position: self.pose.position.extend(1.0).to_array(),
        }
    }

    /// Resize the viewport (e.g. on window resize).
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Vec2::new(width.max(1.0), height.max(1.0));
    }

    /// Screen pixels (origin top-left, Y down) to normalized device coordinates.
    pub fn screen_to_ndc(&self, screen: Vec2) -> Vec2 {
        Vec2::new(
            2.0 * screen.x / self.viewport.x - 1.0,
            1.0 - 2.0 * screen.y / self.viewport.y,
        )
    }

    /// Ray from the camera through a screen point.
    pub fn screen_ray(&self, screen: Vec2) -> Ray {
        let ndc = self.screen_to_ndc(screen);
        let inv = self.view_projection().inverse();
        let far = inv.project_point3(Vec3::new(ndc.x, ndc.y, 1.0));
        Ray::new(self.pose.position, far - self.pose.position)
    }

    /// Project a world point to screen pixels. `None` when behind the camera.
    pub fn project(&self, world: Vec3) -> Option<Vec2> {
        let clip = self.view_projection() * world.extend(1.0);
        if clip.w <= 1e-6 {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        Some(Vec2::new(
            (ndc.x + 1.0) * 0.5 * self.viewport.x,
            (1.0 - ndc.y) * 0.5 * self.viewport.y,
        ))
    }

    /// Orbit the camera around its pivot by a pointer delta in pixels.
    pub fn orbit(&mut self, dx: f32, dy: f32) {
        let offset = self.pose.position - self.pose.target;
        let radius = offset.length();
        if radius <= f32::EPSILON {
            return;
        }
        let azimuth = offset.x.atan2(offset.z) - dx * Self::ORBIT_SENSITIVITY;
        let elevation = ((offset.y / radius).clamp(-1.0, 1.0).asin() + dy * Self::ORBIT_SENSITIVITY)
            .clamp(-Self::MAX_ELEVATION, Self::MAX_ELEVATION);

        let new_offset = Vec3::new(
            radius * elevation.cos() * azimuth.sin(),
            radius * elevation.sin(),
            radius * elevation.cos() * azimuth.cos(),
        );
        self.pose.position = self.pose.target + new_offset;
    }

    /// Turn the view direction in place by a pointer delta in pixels.
    /// Yaw 0 looks down -Z; positive yaw turns toward +X.
    pub fn look_around(&mut self, dx: f32, dy: f32) {
        let forward = self.pose.target - self.pose.position;
        let distance = forward.length();
        if distance <= f32::EPSILON {
            return;
        }
        let yaw = forward.x.atan2(-forward.z) - dx * Self::ORBIT_SENSITIVITY;
        let pitch = ((forward.y / distance).clamp(-1.0, 1.0).asin() + dy * Self::ORBIT_SENSITIVITY)
            .clamp(-Self::MAX_ELEVATION, Self::MAX_ELEVATION);

        let direction = Vec3::new(
            pitch.cos() * yaw.sin(),
            pitch.sin(),
            -pitch.cos() * yaw.cos(),
        );
        self.pose.target = self.pose.position + direction * distance;
    }

    /// Dolly toward (factor < 1) or away from (factor > 1) the pivot.
    pub fn zoom(&mut self, factor: f32) {
        let offset = self.pose.position - self.pose.target;
        let radius = offset.length();
        if radius <= f32::EPSILON || !factor.is_finite() || factor <= 0.0 {
            return;
        }
        let new_radius = (radius * factor).clamp(self.min_distance, self.max_distance);
        self.pose.position = self.pose.target + offset * (new_radius / radius);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn front_camera() -> Camera3D {
        let mut cam = Camera3D::new(800.0, 600.0);
        cam.pose = CameraPose::new(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO);
        cam
    }

    #[test]
    fn center_ray_points_at_target() {
        let cam = front_camera();
        let ray = cam.screen_ray(Vec2::new(400.0, 300.0));
        assert!((ray.origin - Vec3::new(0.0, 0.0, 10.0)).length() < 1e-4);
        assert!((ray.direction - Vec3::NEG_Z).length() < 1e-4, "dir = {:?}", ray.direction);
    }

    #[test]
    fn right_half_of_screen_rays_go_right() {
        let cam = front_camera();
        let ray = cam.screen_ray(Vec2::new(700.0, 300.0));
        assert!(ray.direction.x > 0.0);
        let ray = cam.screen_ray(Vec2::new(400.0, 50.0));
        assert!(ray.direction.y > 0.0, "top of screen should look up");
    }

    #[test]
    fn project_target_to_screen_center() {
        let cam = front_camera();
        let p = cam.project(Vec3::ZERO).unwrap();
        assert!((p - Vec2::new(400.0, 300.0)).length() < 1e-3);
        assert!(cam.project(Vec3::new(0.0, 0.0, 20.0)).is_none());
    }

    #[test]
    fn orbit_keeps_distance_and_clamps_elevation() {
        let mut cam = front_camera();
        cam.orbit(120.0, 0.0);
        assert!((cam.pose.distance() - 10.0).abs() < 1e-4);

        cam.orbit(0.0, 10_000.0);
        let elevation = (cam.pose.position.y / cam.pose.distance()).asin();
        assert!(elevation <= Camera3D::MAX_ELEVATION + 1e-4);
    }

    #[test]
    fn zoom_clamps_to_limits() {
        let mut cam = front_camera();
        cam.zoom(0.0001);
        assert!((cam.pose.distance() - cam.min_distance).abs() < 1e-4);
        cam.zoom(1.0e6);
        assert!((cam.pose.distance() - cam.max_distance).abs() < 1e-1);
    }

    #[test]
    fn look_around_turns_in_place() {
        let mut cam = Camera3D::new(800.0, 600.0);
        cam.pose = CameraPose::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -5.0));

        cam.look_around(0.0, 0.0);
        assert!((cam.pose.target - Vec3::new(0.0, 0.0, -5.0)).length() < 1e-4);

        // Quarter turn to the west
        cam.look_around(std::f32::consts::FRAC_PI_2 / Camera3D::ORBIT_SENSITIVITY, 0.0);
        assert_eq!(cam.pose.position, Vec3::ZERO);
        assert!((cam.pose.target - Vec3::new(-5.0, 0.0, 0.0)).length() < 1e-3);
        assert!((cam.pose.distance() - 5.0).abs() < 1e-4);
    }
}
