//! Player profile
//!
//! Currency, lifetime distance, car upgrades and best distance per level.
//! Stored as JSON; fields missing from older saves take their defaults.

use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::sim::{CarStats, RunSummary};

/// Why a profile could not be loaded or saved
#[derive(Debug)]
pub enum ProfileError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl Display for ProfileError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to access `{}`: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "failed to parse `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for ProfileError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
        }
    }
}

/// Persistent player record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub total_coins: u64,
    pub total_distance: f64,
    pub car_stats: CarStats,
    /// Best single-run distance keyed by level name
    pub best_distance: BTreeMap<String, f32>,
}

impl Profile {
    /// Default save file name
    pub const FILE_NAME: &'static str = "game_save.json";

    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a finished run in. Returns true if it set a new best for its level.
    pub fn record_run(&mut self, run: &RunSummary) -> bool {
        self.total_coins += u64::from(run.coins);
        self.total_distance += f64::from(run.distance);

        let best = self.best_distance.entry(run.level_key()).or_insert(0.0);
        if run.distance > *best {
            *best = run.distance;
            true
        } else {
            false
        }
    }

    /// Best distance for a level, if it has been driven
    pub fn best_for(&self, level_key: &str) -> Option<f32> {
        self.best_distance.get(level_key).copied()
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut profile: Self = serde_json::from_str(json)?;
        profile.car_stats = profile.car_stats.sanitized();
        Ok(profile)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load from `path`. A missing file is a fresh profile.
    pub fn load(path: &Path) -> Result<Self, ProfileError> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No profile at {}, starting fresh", path.display());
                return Ok(Self::new());
            }
            Err(source) => {
                return Err(ProfileError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let profile = Self::from_json(&raw).map_err(|source| ProfileError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!(
            "Loaded profile: {} coins, {:.0} total distance",
            profile.total_coins,
            profile.total_distance
        );
        Ok(profile)
    }

    /// Load from `path`, falling back to a fresh profile on any error
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_else(|err| {
            log::warn!("{err}; using a fresh profile");
            Self::new()
        })
    }

    /// Write to `path` through a temp file
    pub fn save(&self, path: &Path) -> Result<(), ProfileError> {
        let json = self.to_json().map_err(|source| ProfileError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        let tmp = path.with_extension("json.tmp");
        let io_err = |source| ProfileError::Io {
            path: path.to_path_buf(),
            source,
        };
        fs::write(&tmp, json).map_err(io_err)?;
        fs::rename(&tmp, path).map_err(io_err)?;
        log::info!("Profile saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::RunEndCause;

    fn run(level_index: Option<usize>, distance: f32, coins: u32) -> RunSummary {
        RunSummary {
            level_index,
            seed: 42,
            distance,
            coins,
            cause: RunEndCause::Wrecked,
            target_reached: false,
            ticks: 100,
        }
    }

    #[test]
    fn test_record_run() {
        let mut profile = Profile::new();
        assert!(profile.record_run(&run(Some(0), 1200.0, 7)));
        assert!(!profile.record_run(&run(Some(0), 800.0, 3)));
        assert!(profile.record_run(&run(None, 50.0, 0)));

        assert_eq!(profile.total_coins, 10);
        assert!((profile.total_distance - 2050.0).abs() < 1e-6);
        assert_eq!(profile.best_for("Mountain Valley"), Some(1200.0));
        assert_eq!(profile.best_for("seed-42"), Some(50.0));
        assert_eq!(profile.best_for("Rocky Hills"), None);
    }

    #[test]
    fn test_json_defaults_and_sanitizes() {
        let profile = Profile::from_json(
            r#"{"total_coins": 12, "car_stats": {"traction": 1.18, "speed": 0.2}}"#,
        )
        .unwrap();
        assert_eq!(profile.total_coins, 12);
        assert!((profile.car_stats.traction - 1.18).abs() < 1e-6);
        assert_eq!(profile.car_stats.speed, 1.0);
        assert_eq!(profile.car_stats.acceleration, 1.0);
        assert!(profile.best_distance.is_empty());

        assert!(Profile::from_json("not json").is_err());
    }

    #[test]
    fn test_save_and_load() {
        let dir = std::env::temp_dir().join(format!("hill-climb-profile-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(Profile::FILE_NAME);

        let fresh = Profile::load(&path).unwrap();
        assert_eq!(fresh, Profile::new());

        let mut profile = Profile::new();
        profile.record_run(&run(Some(2), 3000.0, 4));
        profile.car_stats.apply_upgrade("suspension", 0.25);
        profile.save(&path).unwrap();

        let loaded = Profile::load(&path).unwrap();
        assert_eq!(loaded, profile);

        fs::write(&path, "{ broken").unwrap();
        assert!(matches!(Profile::load(&path), Err(ProfileError::Parse { .. })));
        assert_eq!(Profile::load_or_default(&path), Profile::new());

        fs::remove_dir_all(&dir).unwrap();
    }
}
