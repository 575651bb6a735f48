//! Ground queries over the terrain samples
//!
//! Height and surface angle at any x, by linear interpolation over the first
//! segment `[x_i, x_i+1]` that brackets x. Samples are x-ordered, so the
//! bracketing segment is found by binary search.

use super::terrain::{Terrain, TerrainPoint};
use crate::consts::FALLBACK_GROUND_HEIGHT;

/// Index `i` of the first segment with `x_i <= x <= x_i+1`
pub fn bracketing_segment(points: &[TerrainPoint], x: f32) -> Option<usize> {
    if points.len() < 2 {
        return None;
    }
    // First i with x_{i+1} >= x; every earlier segment ends left of x
    let i = points[1..].partition_point(|p| p.x < x);
    if i + 1 < points.len() && points[i].x <= x {
        Some(i)
    } else {
        None
    }
}

/// Interpolated ground height at `x`. Outside the sampled range the nearest
/// boundary sample's height is used.
pub fn height_at(points: &[TerrainPoint], x: f32) -> f32 {
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return FALLBACK_GROUND_HEIGHT;
    };

    match bracketing_segment(points, x) {
        Some(i) => {
            let (a, b) = (points[i], points[i + 1]);
            let width = b.x - a.x;
            let t = if width != 0.0 { (x - a.x) / width } else { 0.0 };
            a.y * (1.0 - t) + b.y * t
        }
        None if x < first.x => first.y,
        None => last.y,
    }
}

/// Surface angle at `x` in radians, positive when the ground rises to the
/// right (y grows downward). Beyond the sampled range the ground continues
/// flat at the boundary height, so the angle there is 0.
pub fn angle_at(points: &[TerrainPoint], x: f32) -> f32 {
    match bracketing_segment(points, x) {
        Some(i) => {
            let (a, b) = (points[i], points[i + 1]);
            -(b.y - a.y).atan2(b.x - a.x)
        }
        None => 0.0,
    }
}

impl Terrain {
    /// Ground height at `x`
    pub fn height_at(&self, x: f32) -> f32 {
        height_at(&self.points, x)
    }

    /// Ground surface angle at `x`
    pub fn angle_at(&self, x: f32) -> f32 {
        angle_at(&self.points, x)
    }
}
