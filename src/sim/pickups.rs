//! Pickup collection
//!
//! Coins and fuel cans are collected at most once: a marker flips to
//! `collected` the first time the car comes within the capture radius and is
//! skipped from then on.

use glam::Vec2;

use super::terrain::{PickupKind, PickupMarker, Terrain};
use crate::consts::PICKUP_CAPTURE_RADIUS;

/// Collect every uncollected marker within `radius` of `pos`, returning what
/// each one gave
pub fn collect_near(markers: &mut [PickupMarker], pos: Vec2, radius: f32) -> Vec<PickupKind> {
    let mut collected = Vec::new();
    for marker in markers.iter_mut().filter(|m| !m.collected) {
        if marker.pos.distance(pos) < radius {
            marker.collected = true;
            collected.push(marker.kind);
        }
    }
    collected
}

/// Scan the level's coins then fuel cans against the car position
pub fn resolve_pickups(terrain: &mut Terrain, pos: Vec2) -> Vec<PickupKind> {
    let mut collected = collect_near(&mut terrain.coins, pos, PICKUP_CAPTURE_RADIUS);
    collected.extend(collect_near(&mut terrain.fuel_cans, pos, PICKUP_CAPTURE_RADIUS));
    collected
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collects_within_radius_once() {
        let mut markers = vec![
            PickupMarker::coin(Vec2::new(100.0, 100.0), 1),
            PickupMarker::fuel_can(Vec2::new(300.0, 100.0), 35.0),
        ];

        let got = collect_near(&mut markers, Vec2::new(110.0, 120.0), PICKUP_CAPTURE_RADIUS);
        assert_eq!(got, vec![PickupKind::Coin { value: 1 }]);
        assert!(markers[0].collected);
        assert!(!markers[1].collected);

        // Same spot again: nothing new, nothing changes
        let snapshot = markers.clone();
        for _ in 0..5 {
            assert!(collect_near(&mut markers, Vec2::new(110.0, 120.0), PICKUP_CAPTURE_RADIUS).is_empty());
        }
        assert_eq!(markers, snapshot);
    }

    #[test]
    fn test_radius_is_exclusive() {
        let mut markers = vec![PickupMarker::coin(Vec2::new(50.0, 0.0), 1)];
        assert!(collect_near(&mut markers, Vec2::ZERO, 50.0).is_empty());
        assert_eq!(collect_near(&mut markers, Vec2::new(0.5, 0.0), 50.0).len(), 1);
    }

    #[test]
    fn test_resolve_scans_coins_then_fuel() {
        let mut terrain = Terrain::flat(500.0, 1000.0);
        terrain.fuel_cans.push(PickupMarker::fuel_can(Vec2::new(200.0, 440.0), 35.0));
        terrain.coins.push(PickupMarker::coin(Vec2::new(210.0, 440.0), 1));

        let got = resolve_pickups(&mut terrain, Vec2::new(205.0, 450.0));
        assert_eq!(
            got,
            vec![PickupKind::Coin { value: 1 }, PickupKind::FuelCan { fuel: 35.0 }]
        );
        assert!(terrain.pickups().all(|p| p.collected));
        assert!(resolve_pickups(&mut terrain, Vec2::new(205.0, 450.0)).is_empty());
    }
}
