//! Game state and core simulation types
//!
//! One `GameState` per run: it owns the level, the car, the particle pool and
//! the effects RNG. The caller drives it with `tick`.

use glam::Vec2;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::particles::ParticleBatch;
use super::terrain::Terrain;
use super::vehicle::{CarStats, RunEndCause, Vehicle};
use crate::consts::*;
use crate::levels::Level;
use crate::settings::Settings;

/// PCG stream for visual effects, kept apart from terrain generation so
/// particles never perturb level layout
const EFFECTS_STREAM: u64 = 0xda3e_39cb_94b9_5bdb;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active driving
    Playing,
    /// Stepping suspended; state is left untouched
    Paused,
    /// Run ended
    GameOver,
}

/// What a finished run hands back to the profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Index into the level table, if the run was a table level
    pub level_index: Option<usize>,
    pub seed: u64,
    pub distance: f32,
    pub coins: u32,
    pub cause: RunEndCause,
    pub target_reached: bool,
    pub ticks: u64,
}

impl RunSummary {
    /// Key used for per-level records
    pub fn level_key(&self) -> String {
        match self.level_index.and_then(Level::get) {
            Some(level) => level.name.to_string(),
            None => format!("seed-{}", self.seed),
        }
    }
}

/// Complete run state
#[derive(Debug, Clone)]
pub struct GameState {
    pub level_index: Option<usize>,
    pub seed: u64,
    pub terrain: Terrain,
    pub vehicle: Vehicle,
    /// Live particle bursts, oldest first
    pub particles: Vec<ParticleBatch>,
    pub phase: GamePhase,
    /// Coin value collected this run
    pub coins: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Distance that clears the level (infinite for free runs)
    pub target_distance: f32,
    pub target_reached: bool,
    /// Live particle cap, from settings
    pub max_particles: usize,
    /// Filled in when the run ends
    pub summary: Option<RunSummary>,
    pub(crate) effects_rng: Pcg32,
}

impl GameState {
    /// Start a run on generated terrain
    pub fn new(seed: u64, difficulty: f32, stats: CarStats, settings: &Settings) -> Self {
        let terrain = Terrain::generate(seed, difficulty);
        let vehicle = Vehicle::new(Vec2::new(SPAWN_X, SPAWN_Y), stats);
        Self::with_terrain(terrain, vehicle, settings)
    }

    /// Start a run on an entry of the level table
    pub fn for_level(index: usize, stats: CarStats, settings: &Settings) -> Option<Self> {
        let level = Level::get(index)?;
        log::info!(
            "Starting level {} '{}' ({}), seed {}",
            index + 1,
            level.name,
            level.difficulty_label,
            level.seed
        );
        let mut state = Self::new(level.seed, Level::difficulty(index), stats, settings);
        state.level_index = Some(index);
        state.target_distance = level.target_distance;
        Some(state)
    }

    /// Start a run with a prepared terrain and car
    pub fn with_terrain(terrain: Terrain, vehicle: Vehicle, settings: &Settings) -> Self {
        let seed = terrain.seed;
        Self {
            level_index: None,
            seed,
            terrain,
            vehicle,
            particles: Vec::new(),
            phase: GamePhase::Playing,
            coins: 0,
            time_ticks: 0,
            target_distance: f32::INFINITY,
            target_reached: false,
            max_particles: settings.max_particles(),
            summary: None,
            effects_rng: Pcg32::new(seed, EFFECTS_STREAM),
        }
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Fraction of the level target covered, clamped to [0, 1]
    pub fn progress(&self) -> f32 {
        if self.target_distance.is_finite() && self.target_distance > 0.0 {
            (self.vehicle.distance_traveled / self.target_distance).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_level() {
        let state = GameState::for_level(2, CarStats::default(), &Settings::default())
            .expect("level 3 exists");
        assert_eq!(state.seed, 456);
        assert_eq!(state.terrain.difficulty, 3.0);
        assert_eq!(state.target_distance, 12000.0);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.vehicle.pos, Vec2::new(SPAWN_X, SPAWN_Y));
        assert_eq!(state.max_particles, 500);
        assert!(GameState::for_level(9, CarStats::default(), &Settings::default()).is_none());
    }

    #[test]
    fn test_summary_level_key() {
        let mut summary = RunSummary {
            level_index: Some(0),
            seed: 42,
            distance: 10.0,
            coins: 0,
            cause: RunEndCause::Wrecked,
            target_reached: false,
            ticks: 1,
        };
        assert_eq!(summary.level_key(), "Mountain Valley");
        summary.level_index = None;
        assert_eq!(summary.level_key(), "seed-42");
    }

    #[test]
    fn test_progress() {
        let mut state = GameState::for_level(0, CarStats::default(), &Settings::default())
            .expect("level 1 exists");
        assert_eq!(state.progress(), 0.0);
        state.vehicle.distance_traveled = 2500.0;
        assert!((state.progress() - 0.5).abs() < 1e-6);
        state.vehicle.distance_traveled = 1e9;
        assert_eq!(state.progress(), 1.0);
    }
}
