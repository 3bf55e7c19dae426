//! Item spawning
//!
//! A fixed-cadence timer plus a weighted kind draw. Randomness is passed in
//! so the state's seeded RNG stays the single source of draws.

use glam::Vec2;
use rand::Rng;

use super::state::{FallingItem, Field, ItemKind};
use crate::tuning::Tuning;

/// Spawn cadence accumulator
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Spawner {
    accumulator_ms: f64,
}

impl Spawner {
    pub fn reset(&mut self) {
        self.accumulator_ms = 0.0;
    }

    pub fn accumulator_ms(&self) -> f64 {
        self.accumulator_ms
    }

    /// Add inter-tick time; returns true (and resets) once the interval is reached
    pub fn advance(&mut self, elapsed_ms: f64, interval_ms: f64) -> bool {
        if elapsed_ms.is_finite() && elapsed_ms > 0.0 {
            self.accumulator_ms += elapsed_ms;
        }
        if self.accumulator_ms >= interval_ms {
            self.accumulator_ms = 0.0;
            true
        } else {
            false
        }
    }
}

/// Pick a kind from one uniform draw in [0, 1)
///
/// Buckets are half-open: a draw exactly on a cumulative boundary belongs to
/// the next kind. Falls back to the small coin when nothing matches.
pub fn choose_kind(draw: f64, weights: &[(ItemKind, f64)]) -> ItemKind {
    let mut cumulative = 0.0;
    for &(kind, weight) in weights {
        cumulative += weight;
        if draw < cumulative {
            return kind;
        }
    }
    ItemKind::SmallCoin
}

/// Build a new item at the top of the field
///
/// `x_draw` in [0, 1) places the left edge within `[0, width - item_width]`.
pub fn build_item(
    id: u32,
    kind: ItemKind,
    x_draw: f32,
    field: &Field,
    tuning: &Tuning,
    fall_speed: f32,
) -> FallingItem {
    let size = tuning.size_of(kind);
    let span = (field.width - size).max(0.0);
    let left = x_draw.clamp(0.0, 1.0) * span;
    FallingItem {
        id,
        kind,
        pos: Vec2::new(left + size / 2.0, -size),
        size: Vec2::splat(size),
        fall_speed,
        resolved: false,
    }
}

/// Draw kind and placement from `rng`
pub fn roll_item<R: Rng + ?Sized>(
    rng: &mut R,
    id: u32,
    field: &Field,
    tuning: &Tuning,
    fall_speed: f32,
) -> FallingItem {
    let kind = choose_kind(rng.random::<f64>(), &tuning.weights());
    let x_draw = rng.random::<f32>();
    build_item(id, kind, x_draw, field, tuning, fall_speed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_weighted_draw_boundaries() {
        let weights = Tuning::default().weights();
        let draws = [0.0, 0.24, 0.25, 0.69, 0.70, 0.99];
        let expected = [
            ItemKind::BigCoin,
            ItemKind::BigCoin,
            ItemKind::SmallCoin,
            ItemKind::SmallCoin,
            ItemKind::Stone,
            ItemKind::Stone,
        ];
        for (draw, kind) in draws.iter().zip(expected) {
            assert_eq!(choose_kind(*draw, &weights), kind, "draw {}", draw);
        }
    }

    #[test]
    fn test_unmatched_draw_defaults_to_small_coin() {
        let weights = [(ItemKind::BigCoin, 0.1), (ItemKind::Stone, 0.1)];
        assert_eq!(choose_kind(0.5, &weights), ItemKind::SmallCoin);
        assert_eq!(choose_kind(f64::NAN, &Tuning::default().weights()), ItemKind::SmallCoin);
    }

    #[test]
    fn test_spawner_cadence() {
        let mut spawner = Spawner::default();
        assert!(!spawner.advance(100.0, 300.0));
        assert!(!spawner.advance(199.0, 300.0));
        assert!(spawner.advance(1.0, 300.0));
        // Accumulator resets to zero, not to the overshoot
        assert_eq!(spawner.accumulator_ms(), 0.0);
        assert!(!spawner.advance(f64::NAN, 300.0));
        assert!(!spawner.advance(-50.0, 300.0));
        assert_eq!(spawner.accumulator_ms(), 0.0);
    }

    #[test]
    fn test_build_item_placement() {
        let field = Field::new(400.0, 600.0);
        let tuning = Tuning::default();

        let left_most = build_item(1, ItemKind::BigCoin, 0.0, &field, &tuning, 2.0);
        assert_eq!(left_most.pos, Vec2::new(20.0, -40.0));

        let right_most = build_item(2, ItemKind::BigCoin, 1.0, &field, &tuning, 2.0);
        assert_eq!(right_most.pos.x, 380.0);
        assert_eq!(right_most.size, Vec2::splat(40.0));
    }

    #[test]
    fn test_build_item_narrow_field() {
        let field = Field::new(10.0, 600.0);
        let item = build_item(1, ItemKind::Stone, 0.7, &field, &Tuning::default(), 2.0);
        assert_eq!(item.pos.x, 17.5);
        assert_eq!(item.pos.y, -35.0);
    }

    #[test]
    fn test_rolled_items_stay_in_field() {
        let mut rng = Pcg32::seed_from_u64(7);
        let field = Field::new(500.0, 600.0);
        let tuning = Tuning::default();
        for id in 0..500 {
            let item = roll_item(&mut rng, id, &field, &tuning, 2.0);
            let b = item.bounds();
            assert!(b.min.x >= 0.0 && b.max.x <= field.width);
            assert_eq!(item.top_y(), -item.size.y);
        }
    }

    #[test]
    fn test_roll_is_deterministic() {
        let field = Field::default();
        let tuning = Tuning::default();
        let mut a = Pcg32::seed_from_u64(99);
        let mut b = Pcg32::seed_from_u64(99);
        for id in 0..20 {
            assert_eq!(
                roll_item(&mut a, id, &field, &tuning, 2.0),
                roll_item(&mut b, id, &field, &tuning, 2.0)
            );
        }
    }
}
