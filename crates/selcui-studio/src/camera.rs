use glam::{Mat4, Vec3};
use selcui_engine::coords::Vector3;

const FOVY_DEGREES: f32 = 70.0;
const NEAR: f32 = 0.05;
const FAR: f32 = 1000.0;
const MIN_DISTANCE: f32 = 2.0;
const MAX_DISTANCE: f32 = 400.0;
const PITCH_LIMIT: f32 = 1.5;

/// Camera circling a world-space focus point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    pub target: Vector3,
    pub distance: f32,
    pub yaw: f32,
    pub pitch: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self { target: Vector3::new(0.0, 64.0, 0.0), distance: 24.0, yaw: 0.6, pitch: 0.5 }
    }
}

impl OrbitCamera {
    /// Eye position relative to the target.
    fn offset(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        Vec3::new(cp * sy, sp, cp * cy) * self.distance
    }

    pub fn eye(&self) -> Vector3 {
        let o = self.offset();
        self.target + Vector3::new(o.x as f64, o.y as f64, o.z as f64)
    }

    /// Projection for camera-relative vertices; the eye sits at the origin.
    pub fn view_proj(&self, aspect: f32) -> Mat4 {
        let forward = (-self.offset()).normalize_or_zero();
        let view = Mat4::look_to_rh(Vec3::ZERO, forward, Vec3::Y);
        let proj = Mat4::perspective_rh(FOVY_DEGREES.to_radians(), aspect.max(0.01), NEAR, FAR);
        proj * view
    }

    pub fn orbit(&mut self, dx: f32, dy: f32) {
        self.yaw -= dx * 0.01;
        self.pitch = (self.pitch + dy * 0.01).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    pub fn zoom(&mut self, steps: f32) {
        self.distance = (self.distance * 0.9_f32.powf(steps)).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }
}
