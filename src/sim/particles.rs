//! Short-lived particle bursts (dust, sparks, smoke)
//!
//! Purely visual: nothing here feeds back into the car.

use glam::Vec2;
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Burst category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleKind {
    /// Kicked up by wheels on the ground
    Dust,
    /// Metal on rock when a rollover hurts
    Spark,
    /// A wrecked engine
    Smoke,
}

impl ParticleKind {
    /// Nominal burst size; each burst spawns between `count - 5` and `count`
    pub fn count(self) -> u32 {
        match self {
            ParticleKind::Dust => 20,
            ParticleKind::Spark => 15,
            ParticleKind::Smoke => 10,
        }
    }

    /// Initial velocity envelope as (x range, y range). Kinds differ only in
    /// count and palette; every burst is thrown upward in the same spread.
    pub fn velocity_envelope(self) -> ((f32, f32), (f32, f32)) {
        ((-5.0, 5.0), (-6.0, -1.0))
    }

    pub fn palette(self) -> &'static [[u8; 3]; 3] {
        match self {
            ParticleKind::Dust => &[[139, 90, 43], [160, 110, 60], [180, 130, 80]],
            ParticleKind::Spark => &[[255, 215, 0], [255, 165, 0], [255, 200, 100]],
            ParticleKind::Smoke => &[[150, 150, 150], [180, 180, 180], [200, 200, 200]],
        }
    }
}

/// One point mass
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Ticks left
    pub lifetime: u32,
    pub max_lifetime: u32,
    pub size: f32,
    pub color: [u8; 3],
}

impl Particle {
    /// Remaining life in (0, 1]; renderers scale alpha and size by this
    pub fn fade(&self) -> f32 {
        if self.max_lifetime == 0 {
            0.0
        } else {
            self.lifetime as f32 / self.max_lifetime as f32
        }
    }
}

/// A burst of particles from one spawn event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticleBatch {
    pub kind: ParticleKind,
    pub particles: Vec<Particle>,
}

impl ParticleBatch {
    /// Spawn a burst at `origin`
    pub fn spawn<R: Rng + ?Sized>(origin: Vec2, kind: ParticleKind, rng: &mut R) -> Self {
        let nominal = kind.count();
        let count = rng.random_range(nominal - 5..=nominal);
        let ((vx_lo, vx_hi), (vy_lo, vy_hi)) = kind.velocity_envelope();
        let palette = kind.palette();

        let particles = (0..count)
            .map(|_| {
                let vel = Vec2::new(
                    rng.random_range(vx_lo..=vx_hi),
                    rng.random_range(vy_lo..=vy_hi),
                );
                let lifetime = rng.random_range(PARTICLE_MIN_LIFETIME..=PARTICLE_MAX_LIFETIME);
                let size = rng.random_range(3..=8u32) as f32;
                let color = *palette.choose(rng).unwrap_or(&palette[0]);
                Particle {
                    pos: origin,
                    vel,
                    lifetime,
                    max_lifetime: lifetime,
                    size,
                    color,
                }
            })
            .collect();

        Self { kind, particles }
    }

    /// Advance one tick and drop expired particles.
    /// Returns whether any particle is still alive.
    pub fn update(&mut self) -> bool {
        for particle in &mut self.particles {
            particle.pos += particle.vel;
            particle.vel.y += PARTICLE_GRAVITY;
            particle.lifetime = particle.lifetime.saturating_sub(1);
        }
        self.particles.retain(|p| p.lifetime > 0);
        self.is_alive()
    }

    pub fn is_alive(&self) -> bool {
        !self.particles.is_empty()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

/// Advance every batch and discard the empty ones
pub fn update_batches(batches: &mut Vec<ParticleBatch>) {
    batches.retain_mut(|batch| batch.update());
}

/// Total live particles across batches
pub fn particle_count(batches: &[ParticleBatch]) -> usize {
    batches.iter().map(ParticleBatch::len).sum()
}

/// Add a batch, evicting the oldest batches while the total would exceed
/// `cap`. A zero cap drops the batch.
pub fn push_capped(batches: &mut Vec<ParticleBatch>, batch: ParticleBatch, cap: usize) {
    if cap == 0 || batch.len() > cap {
        return;
    }
    let mut total = particle_count(batches) + batch.len();
    while total > cap && !batches.is_empty() {
        total -= batches.remove(0).len();
    }
    batches.push(batch);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_spawn_within_envelope() {
        let mut rng = Pcg32::seed_from_u64(1);
        for kind in [ParticleKind::Dust, ParticleKind::Spark, ParticleKind::Smoke] {
            for _ in 0..20 {
                let batch = ParticleBatch::spawn(Vec2::new(10.0, 20.0), kind, &mut rng);
                let n = batch.len() as u32;
                assert!(n >= kind.count() - 5 && n <= kind.count());

                let ((vx_lo, vx_hi), (vy_lo, vy_hi)) = kind.velocity_envelope();
                for p in &batch.particles {
                    assert_eq!(p.pos, Vec2::new(10.0, 20.0));
                    assert!(p.vel.x >= vx_lo && p.vel.x <= vx_hi);
                    assert!(p.vel.y >= vy_lo && p.vel.y <= vy_hi);
                    assert!(p.lifetime >= PARTICLE_MIN_LIFETIME && p.lifetime <= PARTICLE_MAX_LIFETIME);
                    assert_eq!(p.lifetime, p.max_lifetime);
                    assert!(p.size >= 3.0 && p.size <= 8.0);
                    assert!(kind.palette().contains(&p.color));
                    assert_eq!(p.fade(), 1.0);
                }
            }
        }
    }

    #[test]
    fn test_kinds_share_velocity_envelope() {
        let dust = ParticleKind::Dust.velocity_envelope();
        assert_eq!(dust, ((-5.0, 5.0), (-6.0, -1.0)));
        assert_eq!(ParticleKind::Spark.velocity_envelope(), dust);
        assert_eq!(ParticleKind::Smoke.velocity_envelope(), dust);
    }

    #[test]
    fn test_update_integrates_and_settles() {
        let mut batch = ParticleBatch {
            kind: ParticleKind::Dust,
            particles: vec![Particle {
                pos: Vec2::ZERO,
                vel: Vec2::new(2.0, -3.0),
                lifetime: 10,
                max_lifetime: 10,
                size: 4.0,
                color: [0, 0, 0],
            }],
        };
        assert!(batch.update());
        let p = batch.particles[0];
        assert_eq!(p.pos, Vec2::new(2.0, -3.0));
        assert_eq!(p.vel.y, -3.0 + PARTICLE_GRAVITY);
        assert_eq!(p.lifetime, 9);
        assert!((p.fade() - 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_batch_dies_when_all_expire() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut batches = vec![ParticleBatch::spawn(Vec2::ZERO, ParticleKind::Smoke, &mut rng)];
        for _ in 0..PARTICLE_MIN_LIFETIME - 1 {
            update_batches(&mut batches);
        }
        assert_eq!(batches.len(), 1);
        for _ in 0..=PARTICLE_MAX_LIFETIME - PARTICLE_MIN_LIFETIME {
            update_batches(&mut batches);
        }
        assert!(batches.is_empty());
    }

    #[test]
    fn test_push_capped_evicts_oldest() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut batches = Vec::new();
        let first = ParticleBatch::spawn(Vec2::ZERO, ParticleKind::Dust, &mut rng);
        let second = ParticleBatch::spawn(Vec2::ONE, ParticleKind::Dust, &mut rng);
        let cap = first.len().max(second.len()) + 1;

        push_capped(&mut batches, first, cap);
        push_capped(&mut batches, second.clone(), cap);
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0], second);
        assert!(particle_count(&batches) <= cap);

        let mut none = Vec::new();
        push_capped(&mut none, second, 0);
        assert!(none.is_empty());
    }
}
