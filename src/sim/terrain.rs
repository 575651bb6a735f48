//! Procedural terrain generation
//!
//! A level is a 1-D height field sampled every `TERRAIN_STEP` units, with
//! hazard notches baked into the samples and pickups hovering above flat
//! stretches. Generation is fully determined by `(seed, difficulty)`.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// One (x, height) sample of the ground profile. y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TerrainPoint {
    pub x: f32,
    pub y: f32,
}

impl TerrainPoint {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Where a notch was cut into the ground (metadata only)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HazardMarker {
    /// x of the notch bottom
    pub x: f32,
    pub depth: f32,
    pub width: f32,
}

/// What a pickup gives when collected
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PickupKind {
    Coin { value: u32 },
    FuelCan { fuel: f32 },
}

/// A coin or fuel can hovering above the ground
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PickupMarker {
    pub pos: Vec2,
    pub kind: PickupKind,
    /// Flips false -> true once, never back
    pub collected: bool,
}

impl PickupMarker {
    pub fn coin(pos: Vec2, value: u32) -> Self {
        Self {
            pos,
            kind: PickupKind::Coin { value },
            collected: false,
        }
    }

    pub fn fuel_can(pos: Vec2, fuel: f32) -> Self {
        Self {
            pos,
            kind: PickupKind::FuelCan { fuel },
            collected: false,
        }
    }
}

/// A generated level: ground samples, hazards and pickups
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Terrain {
    pub seed: u64,
    pub difficulty: f32,
    /// Ground samples, x non-decreasing
    pub points: Vec<TerrainPoint>,
    pub hazards: Vec<HazardMarker>,
    pub coins: Vec<PickupMarker>,
    pub fuel_cans: Vec<PickupMarker>,
}

impl Terrain {
    /// Generate the level for `seed` at the given difficulty
    pub fn generate(seed: u64, difficulty: f32) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let phase = seed_phases(seed);

        let sample_count = (TERRAIN_LENGTH / TERRAIN_STEP) as u32;
        let mut points = Vec::with_capacity(sample_count as usize + 16);
        let mut hazards = Vec::new();
        let mut coins = Vec::new();
        let mut fuel_cans = Vec::new();

        let hole_depth = (HAZARD_BASE_DEPTH * (0.5 + difficulty)).floor();
        let hole_width = (HAZARD_BASE_WIDTH * (0.5 + difficulty * 0.5)).floor();

        let mut y = TERRAIN_BASE_HEIGHT;
        // Regular samples are suppressed until the walk clears the last notch
        let mut notch_end = f32::NEG_INFINITY;

        for i in 0..sample_count {
            let xi = i * TERRAIN_STEP as u32;
            let x = xi as f32;

            let target = target_height(x, &phase);
            y += (target - y) * TERRAIN_SMOOTHING;
            y = y.clamp(TERRAIN_MIN_HEIGHT, TERRAIN_MAX_HEIGHT);

            if rng.random::<f32>() < BUMP_CHANCE {
                y += rng.random_range(-BUMP_AMPLITUDE..=BUMP_AMPLITUDE);
            }

            if x <= notch_end {
                continue;
            }

            points.push(TerrainPoint::new(x, y));

            let hazard_roll = rng.random::<f32>();
            if hazard_roll < HAZARD_CHANCE * difficulty
                && xi % HAZARD_INTERVAL == 0
                && x + hole_width < TERRAIN_LENGTH
            {
                let half = hole_width / 2.0;
                points.push(TerrainPoint::new(x + half, y + hole_depth));
                points.push(TerrainPoint::new(x + hole_width, y));
                hazards.push(HazardMarker {
                    x: x + half,
                    depth: hole_depth,
                    width: hole_width,
                });
                notch_end = x + hole_width;
            }

            let coin_roll = rng.random::<f32>();
            if coin_roll < COIN_CHANCE && is_flat(&points, y, COIN_FLATNESS) {
                coins.push(PickupMarker::coin(Vec2::new(x, y - COIN_HOVER), COIN_VALUE));
            }

            let fuel_roll = rng.random::<f32>();
            if fuel_roll < FUEL_CAN_CHANCE && is_flat(&points, y, FUEL_CAN_FLATNESS) {
                fuel_cans.push(PickupMarker::fuel_can(
                    Vec2::new(x, y - FUEL_CAN_HOVER),
                    FUEL_CAN_AMOUNT,
                ));
            }
        }

        log::debug!(
            "Terrain seed={} difficulty={}: {} points, {} hazards, {} coins, {} fuel cans",
            seed,
            difficulty,
            points.len(),
            hazards.len(),
            coins.len(),
            fuel_cans.len()
        );

        Self {
            seed,
            difficulty,
            points,
            hazards,
            coins,
            fuel_cans,
        }
    }

    /// Build a terrain directly from samples (no hazards or pickups).
    /// Samples are ordered by x so ground queries stay well defined.
    pub fn from_points(mut points: Vec<TerrainPoint>) -> Self {
        points.sort_by(|a, b| a.x.total_cmp(&b.x));
        Self {
            seed: 0,
            difficulty: 0.0,
            points,
            hazards: Vec::new(),
            coins: Vec::new(),
            fuel_cans: Vec::new(),
        }
    }

    /// Flat ground at height `y` spanning [0, length]
    pub fn flat(y: f32, length: f32) -> Self {
        let count = (length / TERRAIN_STEP) as u32;
        let points = (0..=count)
            .map(|i| TerrainPoint::new(i as f32 * TERRAIN_STEP, y))
            .collect();
        Self::from_points(points)
    }

    /// x of the last ground sample (0 when empty)
    pub fn length(&self) -> f32 {
        self.points.last().map(|p| p.x).unwrap_or(0.0)
    }

    /// Every pickup, coins first
    pub fn pickups(&self) -> impl Iterator<Item = &PickupMarker> {
        self.coins.iter().chain(self.fuel_cans.iter())
    }
}

/// Seed-derived phase per hill layer, wrapped into [0, 2π) in f64 so large
/// seeds keep full precision
fn seed_phases(seed: u64) -> [f32; 3] {
    HILL_LAYERS.map(|(_, _, mult)| ((seed as f64) * mult as f64).rem_euclid(std::f64::consts::TAU) as f32)
}

/// Sum of the hill sinusoids at `x`
fn target_height(x: f32, phase: &[f32; 3]) -> f32 {
    HILL_LAYERS
        .iter()
        .zip(phase)
        .fold(TERRAIN_BASE_HEIGHT, |acc, (&(period, amplitude, _), &p)| {
            acc + (x / period + p).sin() * amplitude
        })
}

/// Current sample sits within `threshold` of the one before it
fn is_flat(points: &[TerrainPoint], y: f32, threshold: f32) -> bool {
    if points.len() <= PICKUP_MIN_SAMPLES {
        return false;
    }
    let prev = points[points.len() - 2];
    (y - prev.y).abs() < threshold
}
