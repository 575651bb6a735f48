//! Hill Climb - A 2D side-scrolling vehicle physics game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (terrain, vehicle physics, pickups, particles)
//! - `levels`: Level table (seed + difficulty per level)
//! - `profile`: Persistent player record (currency, upgrades, best distances)
//! - `settings`: Presentation-facing settings (particle caps)

pub mod levels;
pub mod profile;
pub mod settings;
pub mod sim;

pub use levels::{LEVELS, Level};
pub use profile::{Profile, ProfileError};
pub use settings::{QualityPreset, Settings};

use glam::Vec2;

/// Game configuration constants
///
/// All rates are per simulation tick; the simulation runs at a fixed 60 Hz.
pub mod consts {
    use std::f32::consts::PI;

    /// Fixed simulation timestep (60 Hz, constants below are tuned per tick)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Viewport the world is tuned against
    pub const SCREEN_WIDTH: f32 = 1400.0;
    pub const SCREEN_HEIGHT: f32 = 800.0;

    /// Terrain extent and sampling
    pub const TERRAIN_LENGTH: f32 = SCREEN_WIDTH * 12.0;
    pub const TERRAIN_STEP: f32 = 5.0;
    pub const TERRAIN_BASE_HEIGHT: f32 = 550.0;
    pub const TERRAIN_MIN_HEIGHT: f32 = 200.0;
    pub const TERRAIN_MAX_HEIGHT: f32 = 700.0;
    /// Weight of the new target height in the running average
    pub const TERRAIN_SMOOTHING: f32 = 0.2;
    /// Height returned when the terrain has no samples at all
    pub const FALLBACK_GROUND_HEIGHT: f32 = 600.0;

    /// Hill layers: (period, amplitude, seed phase multiplier)
    pub const HILL_LAYERS: [(f32, f32, f32); 3] =
        [(300.0, 80.0, 1.0), (600.0, 60.0, 2.0), (1200.0, 40.0, 3.0)];

    /// Bump noise
    pub const BUMP_CHANCE: f32 = 0.15;
    pub const BUMP_AMPLITUDE: f32 = 8.0;

    /// Hazards: chance per gated sample is `HAZARD_CHANCE * difficulty`
    pub const HAZARD_CHANCE: f32 = 0.03;
    pub const HAZARD_INTERVAL: u32 = 150;
    pub const HAZARD_BASE_DEPTH: f32 = 60.0;
    pub const HAZARD_BASE_WIDTH: f32 = 80.0;

    /// Pickups
    pub const COIN_CHANCE: f32 = 0.03;
    pub const COIN_FLATNESS: f32 = 5.0;
    pub const COIN_HOVER: f32 = 60.0;
    pub const COIN_VALUE: u32 = 1;
    pub const FUEL_CAN_CHANCE: f32 = 0.015;
    pub const FUEL_CAN_FLATNESS: f32 = 8.0;
    pub const FUEL_CAN_HOVER: f32 = 65.0;
    pub const FUEL_CAN_AMOUNT: f32 = 35.0;
    /// Samples that must exist before any pickup is placed
    pub const PICKUP_MIN_SAMPLES: usize = 5;
    pub const PICKUP_CAPTURE_RADIUS: f32 = 50.0;

    /// World physics
    pub const GRAVITY: f32 = 0.75;
    pub const FRICTION: f32 = 0.96;
    pub const AIR_RESISTANCE: f32 = 0.985;
    /// Fraction of gravity each suspension point removes
    pub const SUSPENSION_RELIEF: f32 = 0.1;
    pub const FALL_OUT_Y: f32 = SCREEN_HEIGHT + 300.0;

    /// Vehicle
    pub const CAR_WIDTH: f32 = 30.0;
    pub const CAR_HEIGHT: f32 = 50.0;
    pub const MAX_FUEL: f32 = 100.0;
    pub const MAX_HEALTH: f32 = 100.0;
    pub const THRUST: f32 = 0.8;
    pub const FUEL_BURN: f32 = 0.3;
    pub const BRAKE_POWER: f32 = 0.8;
    pub const BRAKE_COEFFICIENT: f32 = 0.1;
    /// Horizontal speed cap at baseline speed upgrade
    pub const BASE_TOP_SPEED: f32 = 25.0;
    pub const STEER_RATE: f32 = 0.08;
    pub const MAX_STEER_ANGLE: f32 = PI / 3.0;
    pub const STEER_DAMPING: f32 = 0.92;
    /// Per-tick blend toward the terrain angle while grounded
    pub const ALIGN_BLEND: f32 = 0.15;
    pub const STARVATION_DRAIN: f32 = 0.5;

    /// Rollover / flip damage
    pub const ROLLOVER_THRESHOLD: f32 = PI * 0.5;
    pub const FLIP_THRESHOLD: f32 = PI * 0.75;
    pub const ROLLOVER_DAMAGE_RATE: f32 = 5.0;
    pub const ROLLOVER_DAMAGE_CAP: f32 = 20.0;
    pub const ROLLOVER_COOLDOWN: u32 = 30;
    pub const FLIP_DAMAGE_RATE: f32 = 20.0;
    pub const FLIP_DAMAGE_CAP: f32 = 60.0;
    pub const FLIP_COOLDOWN: u32 = 60;

    /// Wheels
    pub const WHEEL_RADIUS: f32 = 8.0;
    pub const WHEEL_SPIN_FACTOR: f32 = 0.1;
    /// Wheel offset from chassis center as a fraction of width
    pub const WHEEL_OFFSET: f32 = 0.3;

    /// Particles
    pub const PARTICLE_GRAVITY: f32 = 0.25;
    pub const PARTICLE_MIN_LIFETIME: u32 = 40;
    pub const PARTICLE_MAX_LIFETIME: u32 = 70;

    /// Where a fresh run places the car
    pub const SPAWN_X: f32 = 100.0;
    pub const SPAWN_Y: f32 = 300.0;
}

/// Wrap an angle into [0, 2π)
#[inline]
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(std::f32::consts::TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= std::f32::consts::TAU {
        0.0
    } else {
        wrapped
    }
}

/// Unit heading vector for an orientation in screen space (y grows downward,
/// positive angle is nose-up)
#[inline]
pub fn heading(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), -angle.sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{PI, TAU};

    #[test]
    fn test_wrap_angle() {
        assert!((wrap_angle(TAU + 0.5) - 0.5).abs() < 1e-5);
        assert!((wrap_angle(-0.5) - (TAU - 0.5)).abs() < 1e-5);
        assert!(wrap_angle(-1e-9) < TAU);
        assert_eq!(wrap_angle(0.0), 0.0);
    }

    #[test]
    fn test_heading_nose_up_points_screen_up() {
        let h = heading(PI / 4.0);
        assert!(h.x > 0.0);
        assert!(h.y < 0.0);
        assert!((h.length() - 1.0).abs() < 1e-5);
    }
}
