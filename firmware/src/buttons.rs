//! Debounced digital inputs.
//!
//! - PA0: start button (active high, on-board user button)
//! - PE7: front wall detector (active low)
//! - PE8: floor line detector (active low)
//!
//! Each input runs its own task and raises a flag on a confirmed press. The
//! control loop consumes the flags.

use core::sync::atomic::{AtomicBool, Ordering};

use embassy_stm32::exti::ExtiInput;
use embassy_time::{Duration, Instant, with_timeout};

use micromouse::config::DEBOUNCE_MS;
use micromouse::debounce::{ActiveLevel, Debouncer};

pub static START_PRESSED: AtomicBool = AtomicBool::new(false);
pub static WALL_AHEAD: AtomicBool = AtomicBool::new(false);
pub static LINE_SEEN: AtomicBool = AtomicBool::new(false);

/// Clear `flag` and return whether it was set.
pub fn take(flag: &AtomicBool) -> bool {
    flag.swap(false, Ordering::AcqRel)
}

pub fn is_raised(flag: &AtomicBool) -> bool {
    flag.load(Ordering::Acquire)
}

fn now_ms() -> u32 {
    Instant::now().as_millis() as u32
}

#[embassy_executor::task(pool_size = 3)]
pub async fn watch_input(
    mut input: ExtiInput<'static>,
    active: ActiveLevel,
    flag: &'static AtomicBool,
) {
    let mut debouncer = Debouncer::new(DEBOUNCE_MS, active);
    debouncer.update(input.is_high(), now_ms());

    let window = Duration::from_millis(DEBOUNCE_MS as u64);

    loop {
        input.wait_for_any_edge().await;
        let mut pressed = debouncer.update(input.is_high(), now_ms());

        // Feed every bounce until the line stays quiet for a whole window.
        while with_timeout(window, input.wait_for_any_edge()).await.is_ok() {
            pressed |= debouncer.update(input.is_high(), now_ms());
        }
        pressed |= debouncer.update(input.is_high(), now_ms());

        if pressed {
            flag.store(true, Ordering::Release);
        }
    }
}
