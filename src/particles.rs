use std::time::SystemTime;

use bytemuck::{Pod, Zeroable};
use glam::{vec3, vec4, Vec3, Vec4};
use log::{debug, info};
use rand::prelude::*;
use rand_pcg::Pcg64Mcg;

/// Life lost per second of frame time.
pub const LIFE_DECAY_RATE: f32 = 50.;

#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Particle {
    pub position: Vec3,
    /// Drift applied once per tick, not scaled by frame time.
    pub velocity: Vec3,
    pub color: Vec4,
    /// Point diameter in pixels.
    pub size: f32,
    pub life: f32,
}

/// One particle as uploaded to the GPU: position, color and size packed without padding.
#[derive(Debug, Copy, Clone, PartialEq, Default, Pod, Zeroable)]
#[repr(C)]
pub struct ParticleVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
    pub size: f32,
}

impl From<&Particle> for ParticleVertex {
    fn from(particle: &Particle) -> Self {
        Self {
            position: particle.position.to_array(),
            color: particle.color.to_array(),
            size: particle.size,
        }
    }
}

/// Fixed-size pool of particles. Expired particles are overwritten in place.
pub struct ParticleSystem {
    rng: Pcg64Mcg,
    particles: Vec<Particle>,
    vertices: Vec<ParticleVertex>,
}

impl ParticleSystem {
    pub fn new(count: usize) -> Self {
        let seed = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_default();
        info!("Seeded RNG with {}", seed);
        Self::with_seed(count, seed)
    }

    pub fn with_seed(count: usize, seed: u64) -> Self {
        let mut system = Self {
            rng: Pcg64Mcg::seed_from_u64(seed),
            particles: Vec::with_capacity(count),
            vertices: Vec::with_capacity(count),
        };
        system.initialize(count);
        system
    }

    fn initialize(&mut self, count: usize) {
        let particles = (0..count).map(|_| self.spawn()).collect();
        self.particles = particles;
        self.rebuild_vertices();
    }

    /// Samples a fresh particle.
    pub fn spawn(&mut self) -> Particle {
        let rng = &mut self.rng;
        Particle {
            position: vec3(
                rng.gen_range(-10.0..=10.0),
                rng.gen_range(-10.0..=10.0),
                rng.gen_range(-10.0..=10.0),
            ),
            velocity: vec3(
                rng.gen_range(-0.01..=0.01),
                rng.gen_range(-0.01..=0.01),
                rng.gen_range(-0.01..=0.01),
            ),
            color: vec4(
                rng.gen_range(0.0..=1.0),
                rng.gen_range(0.0..=1.0),
                rng.gen_range(0.0..=1.0),
                rng.gen_range(0.8..=1.0),
            ),
            size: rng.gen_range(5.0..=20.0),
            life: rng.gen_range(100.0..=1000.0),
        }
    }

    /// Steps every particle by one tick and rebuilds the vertex buffer.
    ///
    /// Position moves by one whole `velocity` regardless of `delta_time`; only life
    /// decay is scaled by it. A respawned particle is not moved in the tick it appears.
    pub fn advance(&mut self, delta_time: f32) {
        let mut respawned = 0;
        for i in 0..self.particles.len() {
            let particle = &mut self.particles[i];
            particle.position += particle.velocity;
            particle.life -= delta_time * LIFE_DECAY_RATE;
            if particle.life <= 0. {
                let fresh = self.spawn();
                self.particles[i] = fresh;
                respawned += 1;
            }
        }
        if respawned > 0 {
            debug!("Respawned {} particles", respawned);
        }
        self.rebuild_vertices();
    }

    fn rebuild_vertices(&mut self) {
        self.vertices.clear();
        self.vertices
            .extend(self.particles.iter().map(ParticleVertex::from));
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Mutable view of the pool. Fields may change, the pool size may not.
    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    /// Per-particle attributes in pool order, as of the last `advance`.
    pub fn vertices(&self) -> &[ParticleVertex] {
        &self.vertices
    }
}

#[cfg(test)]
mod tests {
    use std::mem::size_of;

    use super::*;

    fn in_range(v: f32, min: f32, max: f32) -> bool {
        (min..=max).contains(&v)
    }

    fn assert_fresh(p: &Particle) {
        for c in p.position.to_array() {
            assert!(in_range(c, -10., 10.), "position {:?}", p.position);
        }
        for c in p.velocity.to_array() {
            assert!(in_range(c, -0.01, 0.01), "velocity {:?}", p.velocity);
        }
        for c in p.color.truncate().to_array() {
            assert!(in_range(c, 0., 1.), "color {:?}", p.color);
        }
        assert!(in_range(p.color.w, 0.8, 1.), "alpha {}", p.color.w);
        assert!(in_range(p.size, 5., 20.), "size {}", p.size);
        assert!(in_range(p.life, 100., 1000.), "life {}", p.life);
    }

    #[test]
    fn vertex_is_tightly_packed() {
        assert_eq!(size_of::<ParticleVertex>(), 32);
    }

    #[test]
    fn spawned_particles_are_in_range() {
        let system = ParticleSystem::with_seed(500, 7);
        assert_eq!(system.len(), 500);
        system.particles().iter().for_each(assert_fresh);
    }

    #[test]
    fn pool_size_never_changes() {
        let mut system = ParticleSystem::with_seed(64, 1);
        for i in 0..500 {
            system.advance(if i % 3 == 0 { 1. } else { 0.016 });
            assert_eq!(system.len(), 64);
            assert_eq!(system.vertices().len(), 64);
        }
    }

    #[test]
    fn life_is_never_observed_non_positive() {
        let mut system = ParticleSystem::with_seed(200, 3);
        for _ in 0..300 {
            system.advance(0.5);
            assert!(system.particles().iter().all(|p| p.life > 0.));
        }
    }

    #[test]
    fn expiring_particle_is_respawned() {
        let mut system = ParticleSystem::with_seed(4, 11);
        system.particles_mut()[2].life = 0.1;
        let survivor = system.particles()[0];

        system.advance(1.);

        assert_fresh(&system.particles()[2]);
        assert_eq!(system.particles()[0].life, survivor.life - LIFE_DECAY_RATE);
    }

    #[test]
    fn drift_ignores_delta_time() {
        let mut system = ParticleSystem::with_seed(8, 5);
        for p in system.particles_mut() {
            p.life = 1000.;
        }
        let before = system.particles().to_vec();

        system.advance(0.001);
        system.advance(2.);

        for (now, then) in system.particles().iter().zip(&before) {
            let expected = then.position + then.velocity * 2.;
            assert!(now.position.abs_diff_eq(expected, 1e-5));
            assert!((now.life - (1000. - 2.001 * LIFE_DECAY_RATE)).abs() < 1e-3);
        }
    }

    #[test]
    fn vertices_mirror_pool_order() {
        let mut system = ParticleSystem::with_seed(16, 9);
        system.advance(0.016);
        for (vertex, particle) in system.vertices().iter().zip(system.particles()) {
            assert_eq!(vertex.position, particle.position.to_array());
            assert_eq!(vertex.color, particle.color.to_array());
            assert_eq!(vertex.size, particle.size);
        }
    }

    #[test]
    fn same_seed_gives_same_pool() {
        let a = ParticleSystem::with_seed(32, 42);
        let b = ParticleSystem::with_seed(32, 42);
        assert_eq!(a.particles(), b.particles());
    }

    #[test]
    fn empty_pool_is_allowed() {
        let mut system = ParticleSystem::with_seed(0, 0);
        system.advance(1.);
        assert!(system.is_empty());
        assert!(system.vertices().is_empty());
    }
}
