use crate::consts;
use enum_map::Enum;
use ratatui::style::Style;
use std::time::{Duration, Instant};

/// The timed status effects granted by power-up food
#[derive(Clone, Copy, Debug, Enum, Eq, PartialEq)]
pub(crate) enum PowerUpKind {
    /// Shortens the tick interval
    Speed,

    /// Lengthens the tick interval
    Slow,

    /// Wall and self collisions freeze the snake instead of ending the game
    Invincible,
}

impl PowerUpKind {
    pub(crate) fn duration(self) -> Duration {
        match self {
            PowerUpKind::Speed => consts::SPEED_DURATION,
            PowerUpKind::Slow => consts::SLOW_DURATION,
            PowerUpKind::Invincible => consts::INVINCIBLE_DURATION,
        }
    }

    pub(crate) fn label(self) -> &'static str {
        match self {
            PowerUpKind::Speed => "Speed Boost",
            PowerUpKind::Slow => "Slow Motion",
            PowerUpKind::Invincible => "Invincible",
        }
    }

    pub(crate) fn symbol(self) -> char {
        match self {
            PowerUpKind::Speed => consts::SPEED_SYMBOL,
            PowerUpKind::Slow => consts::SLOW_SYMBOL,
            PowerUpKind::Invincible => consts::INVINCIBLE_SYMBOL,
        }
    }

    pub(crate) fn style(self) -> Style {
        match self {
            PowerUpKind::Speed => consts::SPEED_STYLE,
            PowerUpKind::Slow => consts::SLOW_STYLE,
            PowerUpKind::Invincible => consts::INVINCIBLE_STYLE,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct ActiveEffect {
    pub(crate) kind: PowerUpKind,
    pub(crate) expires_at: Instant,
}

impl ActiveEffect {
    pub(crate) fn remaining(&self, now: Instant) -> Duration {
        self.expires_at.saturating_duration_since(now)
    }

    /// Fraction of the effect's full duration still remaining, from 1.0 when
    /// freshly activated down to 0.0
    pub(crate) fn progress(&self, now: Instant) -> f64 {
        let full = self.kind.duration().as_secs_f64();
        (self.remaining(now).as_secs_f64() / full).clamp(0.0, 1.0)
    }
}

/// The visual warning shown after a power-up is eaten.  Runs on its own
/// clock, independently of the effect's duration.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct FlashState {
    ends_at: Option<Instant>,
}

impl FlashState {
    pub(crate) fn is_active(&self) -> bool {
        self.ends_at.is_some()
    }

    pub(crate) fn ends_at(&self) -> Option<Instant> {
        self.ends_at
    }

    /// Should the body (not the head) be drawn at `now`?  While flashing, the
    /// body blinks on and off every
    /// [`FLASH_BLINK_PERIOD`][consts::FLASH_BLINK_PERIOD], starting visible.
    pub(crate) fn body_visible(&self, now: Instant) -> bool {
        let Some(start) = self
            .ends_at()
            .and_then(|end| end.checked_sub(consts::FLASH_DURATION))
        else {
            return true;
        };
        let phase = now.saturating_duration_since(start).as_millis()
            / consts::FLASH_BLINK_PERIOD.as_millis();
        phase % 2 == 0
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct EffectManager {
    active: Option<ActiveEffect>,
    flash: FlashState,
}

impl EffectManager {
    pub(crate) fn active(&self) -> Option<ActiveEffect> {
        self.active
    }

    pub(crate) fn active_kind(&self) -> Option<PowerUpKind> {
        self.active.map(|e| e.kind)
    }

    pub(crate) fn flash(&self) -> FlashState {
        self.flash
    }

    pub(crate) fn is_invincible(&self) -> bool {
        self.active_kind() == Some(PowerUpKind::Invincible)
    }

    /// Replace any active effect with a fresh `kind` effect and restart the
    /// flash
    pub(crate) fn activate(&mut self, kind: PowerUpKind, now: Instant) {
        self.active = Some(ActiveEffect {
            kind,
            expires_at: now + kind.duration(),
        });
        self.flash = FlashState {
            ends_at: Some(now + consts::FLASH_DURATION),
        };
    }

    /// Clear the active effect, leaving the flash alone.  Returns the kind
    /// that was active.
    pub(crate) fn deactivate(&mut self) -> Option<PowerUpKind> {
        self.active.take().map(|e| e.kind)
    }

    /// Deactivate the effect if `now` is past its expiry time.  Returns the
    /// kind that expired.
    pub(crate) fn expire_effect(&mut self, now: Instant) -> Option<PowerUpKind> {
        if self.active.is_some_and(|e| now > e.expires_at) {
            self.deactivate()
        } else {
            None
        }
    }

    /// End the flash if `now` is past its end time.  Returns `true` if the
    /// flash ended.
    pub(crate) fn expire_flash(&mut self, now: Instant) -> bool {
        if self.flash.ends_at.is_some_and(|end| now > end) {
            self.flash = FlashState::default();
            true
        } else {
            false
        }
    }
}
