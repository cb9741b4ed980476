//! Debounce for buttons and digital wall/line inputs.
//!
//! A level change is only accepted after it has been seen again at least
//! [`DEBOUNCE_MS`](crate::config::DEBOUNCE_MS) later. A press is reported
//! once, on the accepted transition into the active level.

/// Electrical level that means "pressed".
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActiveLevel {
    Low,
    High,
}

#[derive(Clone, Copy, Debug)]
pub struct Debouncer {
    window_ms: u32,
    active: ActiveLevel,
    stable: Option<bool>,
    pending: Option<(bool, u32)>,
}

impl Debouncer {
    pub const fn new(window_ms: u32, active: ActiveLevel) -> Self {
        Self {
            window_ms,
            active,
            stable: None,
            pending: None,
        }
    }

    /// Last accepted level, `None` before the first sample.
    pub fn stable_level(&self) -> Option<bool> {
        self.stable
    }

    /// Feed a pin sample taken at `now_ms`. Returns true exactly when a press
    /// is confirmed.
    ///
    /// The first sample only primes the filter, so a button held at power-up
    /// does not count as a press.
    pub fn update(&mut self, level_high: bool, now_ms: u32) -> bool {
        let Some(stable) = self.stable else {
            self.stable = Some(level_high);
            return false;
        };

        if level_high == stable {
            self.pending = None;
            return false;
        }

        match self.pending {
            Some((level, since)) if level == level_high => {
                if now_ms.wrapping_sub(since) < self.window_ms {
                    return false;
                }
                self.stable = Some(level_high);
                self.pending = None;
                self.is_active(level_high)
            }
            _ => {
                self.pending = Some((level_high, now_ms));
                false
            }
        }
    }

    fn is_active(&self, level_high: bool) -> bool {
        match self.active {
            ActiveLevel::High => level_high,
            ActiveLevel::Low => !level_high,
        }
    }
}
