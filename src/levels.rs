//! Level table
//!
//! Each level is a fixed seed and difficulty, so every player drives the same
//! hills.

use serde::Serialize;

/// One entry of the level table
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Level {
    pub name: &'static str,
    /// Label shown in level select
    pub difficulty_label: &'static str,
    pub seed: u64,
    /// Distance that counts as clearing the level
    pub target_distance: f32,
}

pub const LEVELS: [Level; 5] = [
    Level {
        name: "Mountain Valley",
        difficulty_label: "Easy",
        seed: 42,
        target_distance: 5000.0,
    },
    Level {
        name: "Rocky Hills",
        difficulty_label: "Medium",
        seed: 123,
        target_distance: 8000.0,
    },
    Level {
        name: "Desert Dunes",
        difficulty_label: "Hard",
        seed: 456,
        target_distance: 12000.0,
    },
    Level {
        name: "Alpine Peak",
        difficulty_label: "Very Hard",
        seed: 789,
        target_distance: 15000.0,
    },
    Level {
        name: "Volcanic Crater",
        difficulty_label: "Extreme",
        seed: 999,
        target_distance: 20000.0,
    },
];

impl Level {
    /// Look up a level by table index
    pub fn get(index: usize) -> Option<&'static Level> {
        LEVELS.get(index)
    }

    /// Difficulty scalar for the generator: 1.0 for the first level, rising by one per level
    pub fn difficulty(index: usize) -> f32 {
        (index + 1) as f32
    }
}
