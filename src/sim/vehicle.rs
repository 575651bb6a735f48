//! Vehicle physics
//!
//! The car is a single rigid chassis with a position, velocity and
//! orientation. Each tick it takes engine/brake/steer intents, falls under
//! gravity, snaps onto the ground when it touches it and takes damage when it
//! lands too far rotated. Orientation is never wrapped.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::terrain::Terrain;
use crate::consts::*;
use crate::{heading, wrap_angle};

/// Upgrade multipliers, each at least 1.0
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarStats {
    pub acceleration: f32,
    pub speed: f32,
    pub traction: f32,
    pub fuel_efficiency: f32,
    pub suspension: f32,
}

impl Default for CarStats {
    fn default() -> Self {
        Self {
            acceleration: 1.0,
            speed: 1.0,
            traction: 1.0,
            fuel_efficiency: 1.0,
            suspension: 1.0,
        }
    }
}

impl CarStats {
    /// Stat names accepted by `apply_upgrade`
    pub const STAT_NAMES: [&'static str; 5] =
        ["acceleration", "speed", "traction", "fuel_efficiency", "suspension"];

    /// Add `boost` to the named stat. Returns false for an unknown name.
    pub fn apply_upgrade(&mut self, stat: &str, boost: f32) -> bool {
        let slot = match stat {
            "acceleration" => &mut self.acceleration,
            "speed" => &mut self.speed,
            "traction" => &mut self.traction,
            "fuel_efficiency" => &mut self.fuel_efficiency,
            "suspension" => &mut self.suspension,
            _ => return false,
        };
        *slot = (*slot + boost).max(1.0);
        true
    }

    /// Clamp every multiplier to the 1.0 baseline (guards hand-edited saves)
    pub fn sanitized(self) -> Self {
        let floor = |v: f32| if v.is_finite() { v.max(1.0) } else { 1.0 };
        Self {
            acceleration: floor(self.acceleration),
            speed: floor(self.speed),
            traction: floor(self.traction),
            fuel_efficiency: floor(self.fuel_efficiency),
            suspension: floor(self.suspension),
        }
    }
}

/// Control intents for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Controls {
    pub throttle: bool,
    pub brake: bool,
    pub steer_left: bool,
    pub steer_right: bool,
}

/// A wheel's visual spin, derived from chassis speed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wheel {
    /// Offset from chassis center along the car's length
    pub x_offset: f32,
    pub radius: f32,
    /// Spin angle in [0, 2π)
    pub rotation: f32,
}

impl Wheel {
    pub fn new(x_offset: f32, radius: f32) -> Self {
        Self {
            x_offset,
            radius,
            rotation: 0.0,
        }
    }

    /// Advance spin for the given longitudinal velocity
    pub fn update(&mut self, velocity: f32) {
        if velocity != 0.0 {
            self.rotation = wrap_angle(self.rotation + velocity / self.radius * WHEEL_SPIN_FACTOR);
        }
    }
}

/// How bad a rotated landing was
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DamageSeverity {
    Rollover,
    Flip,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunEndCause {
    /// Health worn away by rollovers and flips
    Wrecked,
    /// Dropped below the world
    FellOut,
    /// Ran dry and stalled out
    OutOfFuel,
    /// Stopped by the player or the driver before the car was done
    Abandoned,
}

/// What happened to the car during one step
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StepReport {
    pub grounded: bool,
    /// Touched down this tick after being airborne
    pub landed: bool,
    /// Damage from a rotated landing, if any
    pub damage: Option<(f32, DamageSeverity)>,
    /// Set on the tick health reaches zero
    pub ended: Option<RunEndCause>,
}

/// The player's car
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Radians, positive is nose-up
    pub angle: f32,
    pub fuel: f32,
    pub max_fuel: f32,
    pub health: f32,
    pub max_health: f32,
    pub grounded: bool,
    pub distance_traveled: f32,
    pub last_x: f32,
    /// Ticks until rotation damage can land again
    pub damage_cooldown: u32,
    pub stats: CarStats,
    pub width: f32,
    pub height: f32,
    pub front_wheel: Wheel,
    pub rear_wheel: Wheel,
    /// Whether the engine pushed this tick
    #[serde(default)]
    pub engine_on: bool,
}

impl Vehicle {
    /// A fresh car at `pos` with full fuel and health
    pub fn new(pos: Vec2, stats: CarStats) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            angle: 0.0,
            fuel: MAX_FUEL,
            max_fuel: MAX_FUEL,
            health: MAX_HEALTH,
            max_health: MAX_HEALTH,
            grounded: false,
            distance_traveled: 0.0,
            last_x: pos.x,
            damage_cooldown: 0,
            stats: stats.sanitized(),
            width: CAR_WIDTH,
            height: CAR_HEIGHT,
            front_wheel: Wheel::new(CAR_WIDTH * WHEEL_OFFSET, WHEEL_RADIUS),
            rear_wheel: Wheel::new(-CAR_WIDTH * WHEEL_OFFSET, WHEEL_RADIUS),
            engine_on: false,
        }
    }

    /// A car resting on the ground at `x`
    pub fn on_ground(terrain: &Terrain, x: f32, stats: CarStats) -> Self {
        let mut car = Self::new(Vec2::new(x, terrain.height_at(x) - CAR_HEIGHT / 2.0), stats);
        car.angle = terrain.angle_at(x);
        car.grounded = true;
        car
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }

    /// Horizontal speed cap for the current speed upgrade
    pub fn top_speed(&self) -> f32 {
        BASE_TOP_SPEED * self.stats.speed
    }

    /// y of the chassis underside
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.height / 2.0
    }

    /// Advance one tick
    pub fn step(&mut self, controls: &Controls, terrain: &Terrain) -> StepReport {
        let mut report = StepReport::default();
        let was_grounded = self.grounded;

        if self.damage_cooldown > 0 {
            self.damage_cooldown -= 1;
        }

        self.apply_engine(controls);

        if controls.brake {
            self.vel *= 1.0 - BRAKE_POWER * BRAKE_COEFFICIENT;
        }

        self.steer(controls);

        // Relief bottoms out at weightless; gravity never reverses
        self.vel.y += GRAVITY * (1.0 - self.stats.suspension * SUSPENSION_RELIEF).max(0.0);
        self.vel *= AIR_RESISTANCE;

        let ground_y = terrain.height_at(self.pos.x);
        let terrain_angle = terrain.angle_at(self.pos.x);

        self.grounded = self.bottom() >= ground_y;
        if self.grounded {
            self.pos.y = ground_y - self.height / 2.0;
            self.vel.y = 0.0;
            self.vel.x *= 1.0 - (1.0 - FRICTION) / self.stats.traction;
            self.angle += (terrain_angle - self.angle) * ALIGN_BLEND;

            report.landed = !was_grounded;
            report.damage = self.apply_rotation_damage();
        }

        self.pos += self.vel;

        if self.pos.x < 0.0 {
            self.pos.x = 0.0;
            self.vel.x = 0.0;
        }

        self.distance_traveled += (self.pos.x - self.last_x).abs();
        self.last_x = self.pos.x;

        let mut fell_out = false;
        if self.pos.y > FALL_OUT_Y {
            fell_out = true;
            self.health = 0.0;
        }

        let mut starved = false;
        if self.fuel <= 0.0 && self.health > 0.0 {
            self.health = (self.health - STARVATION_DRAIN).max(0.0);
            starved = true;
        }

        report.grounded = self.grounded;
        if self.is_dead() {
            report.ended = Some(if fell_out {
                RunEndCause::FellOut
            } else if starved {
                RunEndCause::OutOfFuel
            } else {
                RunEndCause::Wrecked
            });
        }
        report
    }

    /// Thrust along the heading while there is fuel to burn
    fn apply_engine(&mut self, controls: &Controls) {
        self.engine_on = controls.throttle && self.fuel > 0.0;
        if !self.engine_on {
            return;
        }

        let power = self.stats.acceleration;
        self.vel += heading(self.angle) * power * THRUST;
        let top = self.top_speed();
        self.vel.x = self.vel.x.clamp(-top, top);

        self.fuel = (self.fuel - power * FUEL_BURN / self.stats.fuel_efficiency).max(0.0);
    }

    fn steer(&mut self, controls: &Controls) {
        if controls.steer_left {
            self.angle = (self.angle + STEER_RATE).min(MAX_STEER_ANGLE);
        }
        if controls.steer_right {
            self.angle = (self.angle - STEER_RATE).max(-MAX_STEER_ANGLE);
        }
        if !controls.steer_left && !controls.steer_right {
            self.angle *= STEER_DAMPING;
        }
    }

    /// Rotation damage for the current orientation, rate-limited by the
    /// cooldown. Health only goes down here.
    pub fn apply_rotation_damage(&mut self) -> Option<(f32, DamageSeverity)> {
        if self.damage_cooldown > 0 {
            return None;
        }

        let tilt = self.angle.abs();
        let (damage, severity, cooldown) = if tilt >= FLIP_THRESHOLD {
            (
                (tilt * FLIP_DAMAGE_RATE).min(FLIP_DAMAGE_CAP),
                DamageSeverity::Flip,
                FLIP_COOLDOWN,
            )
        } else if tilt > ROLLOVER_THRESHOLD {
            (
                (tilt * ROLLOVER_DAMAGE_RATE).min(ROLLOVER_DAMAGE_CAP),
                DamageSeverity::Rollover,
                ROLLOVER_COOLDOWN,
            )
        } else {
            return None;
        };

        self.health = (self.health - damage).max(0.0);
        self.damage_cooldown = cooldown;
        log::debug!("{:?} damage {:.1} at tilt {:.2}, health {:.1}", severity, damage, tilt, self.health);
        Some((damage, severity))
    }

    /// Top up fuel, clamped to the tank
    pub fn refuel(&mut self, amount: f32) {
        self.fuel = (self.fuel + amount).clamp(0.0, self.max_fuel);
    }

    /// Spin both wheels from chassis speed
    pub fn update_wheels(&mut self) {
        self.front_wheel.update(self.vel.x);
        self.rear_wheel.update(self.vel.x);
    }
}
