use anyhow::Result;
use glam::{vec4, Mat4, Vec4};

use crate::{camera::OrbitCamera, particles::ParticleSystem, sphere::SphereMesh};

pub const PARTICLE_COUNT: usize = 1000;
pub const SPHERE_SEGMENTS: u32 = 32;

#[derive(Debug, Clone)]
pub struct Sphere {
    pub mesh: SphereMesh,
    pub color: Vec4,
    pub transform: Mat4,
}

/// Everything that changes from frame to frame, plus the static sphere geometry.
pub struct Scene {
    pub camera: OrbitCamera,
    pub particle_system: ParticleSystem,
    pub spheres: [Sphere; 2],
}

impl Scene {
    pub fn new(aspect_ratio: f32) -> Result<Self> {
        Self::with_particle_system(aspect_ratio, ParticleSystem::new(PARTICLE_COUNT))
    }

    pub fn with_particle_system(aspect_ratio: f32, particle_system: ParticleSystem) -> Result<Self> {
        let spheres = [
            Sphere {
                mesh: SphereMesh::new(5., SPHERE_SEGMENTS)?,
                color: vec4(0.2, 0.5, 1.0, 0.25),
                transform: Mat4::IDENTITY,
            },
            Sphere {
                mesh: SphereMesh::new(3., SPHERE_SEGMENTS)?,
                color: vec4(1.0, 0.45, 0.2, 0.35),
                transform: Mat4::IDENTITY,
            },
        ];

        let mut camera = OrbitCamera::new(aspect_ratio);
        camera.advance(0.);

        Ok(Self {
            camera,
            particle_system,
            spheres,
        })
    }

    /// Advances the simulation by one tick. `elapsed` is seconds since start, `delta`
    /// seconds since the previous tick.
    pub fn advance(&mut self, elapsed: f32, delta: f32) {
        self.particle_system.advance(delta);
        self.camera.advance(elapsed);
    }
}
