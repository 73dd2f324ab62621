use super::effects::PowerUpKind;
use crate::consts;
use std::time::Duration;

/// Tick interval before any power-up adjustment, in milliseconds: the base
/// speed minus one increment per speed step of `score`, floored at the
/// minimum speed.
pub(crate) fn base_interval_ms(score: u32) -> u64 {
    let steps = u64::from(score / consts::POINTS_PER_SPEED_STEP);
    consts::BASE_SPEED_MS
        .saturating_sub(steps.saturating_mul(consts::SPEED_INCREMENT_MS))
        .max(consts::MIN_SPEED_MS)
}

/// Return the interval between ticks for the given score and active effect.
///
/// A Speed effect scales the base interval by 0.6 (but never below 50 ms); a
/// Slow effect scales it by 1.5.  The arithmetic is done in whole
/// microseconds, which represents both factors exactly.
pub(crate) fn tick_interval(score: u32, effect: Option<PowerUpKind>) -> Duration {
    let base_us = base_interval_ms(score) * 1000;
    let micros = match effect {
        Some(PowerUpKind::Speed) => (base_us * 6 / 10).max(consts::BOOSTED_MIN_SPEED_MS * 1000),
        Some(PowerUpKind::Slow) => base_us * 3 / 2,
        Some(PowerUpKind::Invincible) | None => base_us,
    };
    Duration::from_micros(micros)
}
