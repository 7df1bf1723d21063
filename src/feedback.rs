//! Audio/visual feedback for a finished attempt.
//!
//! Each result maps to a [`FeedbackPlan`]: which LED to light and the tone
//! sequence for the buzzer.  The embedded feedback task plays the plan on
//! PWM outputs; everything here is plain data so it can be checked on the
//! host.

use crate::auth::AuthResult;
use crate::config::PWM_CLOCK_HZ;

/// One buzzer note followed by a silent gap.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Tone {
    pub freq_hz: u32,
    pub duration_ms: u64,
    pub gap_ms: u64,
}

impl Tone {
    const fn new(freq_hz: u32, duration_ms: u64, gap_ms: u64) -> Self {
        Self {
            freq_hz,
            duration_ms,
            gap_ms,
        }
    }

    /// PWM top value for this note at the configured PWM clock.  `None`
    /// for a rest or a note too low to fit the 15-bit counter.
    pub fn pwm_top(&self) -> Option<u16> {
        if self.freq_hz == 0 {
            return None;
        }
        let top = PWM_CLOCK_HZ / self.freq_hz;
        u16::try_from(top).ok().filter(|&t| t > 1 && t <= 0x7FFF)
    }

    /// Duty value for a 50 % square wave.
    pub fn pwm_duty(&self) -> Option<u16> {
        self.pwm_top().map(|top| top / 2)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Led {
    Green,
    Red,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FeedbackPlan {
    pub led: Led,
    pub melody: &'static [Tone],
}

impl FeedbackPlan {
    /// Total time the plan keeps the buzzer busy (ms).
    pub fn duration_ms(&self) -> u64 {
        self.melody.iter().map(|t| t.duration_ms + t.gap_ms).sum()
    }
}

/// Rising C-major arpeggio.
pub const SUCCESS_MELODY: [Tone; 6] = [
    Tone::new(523, 250, 50),
    Tone::new(659, 250, 50),
    Tone::new(784, 250, 50),
    Tone::new(659, 250, 50),
    Tone::new(784, 500, 100),
    Tone::new(880, 500, 0),
];

/// Two falling notes.
pub const FAILURE_MELODY: [Tone; 2] = [Tone::new(392, 500, 50), Tone::new(330, 750, 0)];

pub fn plan_for(result: AuthResult) -> FeedbackPlan {
    if result.success {
        FeedbackPlan {
            led: Led::Green,
            melody: &SUCCESS_MELODY,
        }
    } else {
        FeedbackPlan {
            led: Led::Red,
            melody: &FAILURE_MELODY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_lights_green_and_plays_arpeggio() {
        let plan = plan_for(AuthResult { success: true });
        assert_eq!(plan.led, Led::Green);
        assert_eq!(plan.melody.len(), 6);
        assert_eq!(plan.melody.last().map(|t| t.freq_hz), Some(880));
        assert_eq!(plan.duration_ms(), 2000 + 300);
    }

    #[test]
    fn failure_lights_red_and_plays_two_notes() {
        let plan = plan_for(AuthResult { success: false });
        assert_eq!(plan.led, Led::Red);
        assert_eq!(plan.melody, &FAILURE_MELODY);
        assert_eq!(plan.duration_ms(), 1300);
    }

    #[test]
    fn pwm_top_matches_note_frequency() {
        let a5 = Tone::new(880, 100, 0);
        assert_eq!(a5.pwm_top(), Some(1136));
        assert_eq!(a5.pwm_duty(), Some(568));

        assert_eq!(Tone::new(0, 100, 0).pwm_top(), None);
        assert_eq!(Tone::new(10, 100, 0).pwm_top(), None);
        assert_eq!(Tone::new(900_000, 100, 0).pwm_top(), None);
    }
}
