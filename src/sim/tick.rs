//! Fixed timestep simulation tick
//!
//! Per tick, in order: car physics, pickups, particles, wheel spin.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::particles::{ParticleBatch, ParticleKind, push_capped, update_batches};
use super::pickups::resolve_pickups;
use super::state::{GamePhase, GameState, RunSummary};
use super::terrain::PickupKind;
use super::vehicle::{Controls, DamageSeverity, RunEndCause};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub throttle: bool,
    pub brake: bool,
    pub steer_left: bool,
    pub steer_right: bool,
    /// Pause toggle
    pub pause: bool,
}

impl TickInput {
    pub fn controls(&self) -> Controls {
        Controls {
            throttle: self.throttle,
            brake: self.brake,
            steer_left: self.steer_left,
            steer_right: self.steer_right,
        }
    }
}

/// Things the front end may want to react to (sounds, HUD, saving)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Landed,
    Damaged { amount: f32, severity: DamageSeverity },
    CoinCollected { value: u32 },
    FuelCollected { amount: f32 },
    TargetReached,
    RunEnded { cause: RunEndCause },
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                return events;
            }
            GamePhase::Paused => state.phase = GamePhase::Playing,
            GamePhase::GameOver => {}
        }
    }

    match state.phase {
        GamePhase::Paused | GamePhase::GameOver => return events,
        GamePhase::Playing => {}
    }

    state.time_ticks += 1;

    let controls = input.controls();
    let report = state.vehicle.step(&controls, &state.terrain);

    if report.landed {
        events.push(GameEvent::Landed);
    }
    if let Some((amount, severity)) = report.damage {
        events.push(GameEvent::Damaged { amount, severity });
    }

    for kind in resolve_pickups(&mut state.terrain, state.vehicle.pos) {
        match kind {
            PickupKind::Coin { value } => {
                state.coins += value;
                events.push(GameEvent::CoinCollected { value });
            }
            PickupKind::FuelCan { fuel } => {
                state.vehicle.refuel(fuel);
                events.push(GameEvent::FuelCollected { amount: fuel });
            }
        }
    }

    emit_particles(state, &controls, report.grounded, report.damage.is_some(), report.ended.is_some());
    update_batches(&mut state.particles);

    state.vehicle.update_wheels();

    if !state.target_reached && state.vehicle.distance_traveled >= state.target_distance {
        state.target_reached = true;
        log::info!("Target distance {} reached at tick {}", state.target_distance, state.time_ticks);
        events.push(GameEvent::TargetReached);
    }

    if let Some(cause) = report.ended {
        end_run(state, cause);
        events.push(GameEvent::RunEnded { cause });
    }

    events
}

/// Spawn this tick's bursts: dust under a working car, sparks on damage,
/// smoke from a wreck
fn emit_particles(state: &mut GameState, controls: &Controls, grounded: bool, damaged: bool, ended: bool) {
    if state.max_particles == 0 {
        return;
    }

    let car = &state.vehicle;
    let base = Vec2::new(car.pos.x, car.bottom());
    let mut kinds = Vec::with_capacity(3);
    if grounded && (car.engine_on || controls.brake) {
        kinds.push((ParticleKind::Dust, base));
    }
    if damaged {
        kinds.push((ParticleKind::Spark, base));
    }
    if ended {
        kinds.push((ParticleKind::Smoke, car.pos));
    }

    for (kind, origin) in kinds {
        let batch = ParticleBatch::spawn(origin, kind, &mut state.effects_rng);
        push_capped(&mut state.particles, batch, state.max_particles);
    }
}

/// End a run that is still going (quit to menu, driver time limit) so its
/// distance and coins are still recorded. Returns false if it was already over.
pub fn abandon_run(state: &mut GameState) -> bool {
    if state.is_over() {
        return false;
    }
    end_run(state, RunEndCause::Abandoned);
    true
}

fn end_run(state: &mut GameState, cause: RunEndCause) {
    state.phase = GamePhase::GameOver;
    let summary = RunSummary {
        level_index: state.level_index,
        seed: state.seed,
        distance: state.vehicle.distance_traveled,
        coins: state.coins,
        cause,
        target_reached: state.target_reached,
        ticks: state.time_ticks,
    };
    log::info!(
        "Run over ({:?}) after {} ticks: distance {:.0}, coins {}",
        cause,
        summary.ticks,
        summary.distance,
        summary.coins
    );
    state.summary = Some(summary);
}
