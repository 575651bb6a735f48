//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only (terrain and effects on separate streams)
//! - Stable iteration order
//! - No rendering or platform dependencies

pub mod ground;
pub mod particles;
pub mod pickups;
pub mod state;
pub mod terrain;
pub mod tick;
pub mod vehicle;

pub use ground::{angle_at, height_at};
pub use particles::{Particle, ParticleBatch, ParticleKind};
pub use pickups::resolve_pickups;
pub use state::{GamePhase, GameState, RunSummary};
pub use terrain::{HazardMarker, PickupKind, PickupMarker, Terrain, TerrainPoint};
pub use tick::{GameEvent, TickInput, abandon_run, tick};
pub use vehicle::{CarStats, Controls, DamageSeverity, RunEndCause, StepReport, Vehicle, Wheel};
