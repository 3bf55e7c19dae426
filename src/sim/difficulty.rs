//! Difficulty curve
//!
//! One speed level per `minutes_per_level` of active play, capped. The level
//! only affects items spawned after it changes.

use crate::tuning::Tuning;

const MS_PER_MINUTE: f64 = 60_000.0;

/// Speed level for a given amount of active play time
pub fn speed_level_for(active_ms: f64, tuning: &Tuning) -> u8 {
    let minutes = (active_ms / MS_PER_MINUTE).max(0.0);
    let steps = (minutes / tuning.minutes_per_level).floor();
    if !steps.is_finite() || steps >= (tuning.max_speed_level as f64 - 1.0) {
        return tuning.max_speed_level;
    }
    (steps as u8 + 1).min(tuning.max_speed_level)
}

/// Fall speed (pixels per tick) assigned to items spawned at `level`
pub fn fall_speed_for(level: u8, tuning: &Tuning) -> f32 {
    let exponent = level.saturating_sub(1) as i32;
    tuning.base_fall_speed * tuning.fall_speed_growth.powi(exponent)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minutes(m: f64) -> f64 {
        m * MS_PER_MINUTE
    }

    #[test]
    fn test_level_curve() {
        let t = Tuning::default();
        assert_eq!(speed_level_for(minutes(0.0), &t), 1);
        assert_eq!(speed_level_for(minutes(2.49), &t), 1);
        assert_eq!(speed_level_for(minutes(2.5), &t), 2);
        assert_eq!(speed_level_for(minutes(7.5), &t), 4);
        assert_eq!(speed_level_for(minutes(12.5), &t), 5);
        assert_eq!(speed_level_for(minutes(100.0), &t), 5);
        assert_eq!(speed_level_for(f64::INFINITY, &t), 5);
    }

    #[test]
    fn test_fall_speeds() {
        let t = Tuning::default();
        let expected = [2.0, 2.6, 3.38, 4.394, 5.7122];
        for (level, want) in (1..=5).zip(expected) {
            let got = fall_speed_for(level, &t);
            assert!((got - want).abs() < 1e-3, "level {}: {} != {}", level, got, want);
        }
    }

    #[test]
    fn test_custom_cap() {
        let t = Tuning {
            max_speed_level: 1,
            ..Tuning::default()
        };
        assert_eq!(speed_level_for(minutes(30.0), &t), 1);
    }
}
