//! Three-step side sensor calibration.
//!
//! The operator holds the robot in each position while its LED is lit:
//! orange = against the right wall, red = against the left wall,
//! blue = centered. All three flash together when done.

use defmt::info;
use embassy_stm32::gpio::Output;
use embassy_time::Timer;

use micromouse::sensors::{Calibration, CalibrationStep, Calibrator, SharedSensors};

/// Time to settle before the first step.
const LEAD_IN_MS: u64 = 1000;
/// Time the robot is held in each position before sampling.
const STEP_MS: u64 = 3000;
const DONE_FLASH_MS: u64 = 1000;

pub struct StepLeds<'d> {
    pub orange: Output<'d>,
    pub red: Output<'d>,
    pub blue: Output<'d>,
}

impl<'d> StepLeds<'d> {
    fn led(&mut self, step: CalibrationStep) -> &mut Output<'d> {
        match step {
            CalibrationStep::NearRight => &mut self.orange,
            CalibrationStep::NearLeft => &mut self.red,
            CalibrationStep::Centered => &mut self.blue,
        }
    }

    fn set_all(&mut self, on: bool) {
        for led in [&mut self.orange, &mut self.red, &mut self.blue] {
            if on {
                led.set_high();
            } else {
                led.set_low();
            }
        }
    }
}

pub async fn auto_calibrate(leds: &mut StepLeds<'_>, sensors: &SharedSensors) -> Calibration {
    let mut calibrator = Calibrator::new();
    Timer::after_millis(LEAD_IN_MS).await;

    for step in CalibrationStep::ALL {
        info!("Calibration: hold {}", step);
        leds.led(step).set_high();
        Timer::after_millis(STEP_MS).await;

        let reading = sensors.load();
        info!("Calibration: {} -> {}", step, reading);
        calibrator.record(step, reading);
        leds.led(step).set_low();
    }

    leds.set_all(true);
    Timer::after_millis(DONE_FLASH_MS).await;
    leds.set_all(false);

    // Every step was recorded above.
    calibrator.finish().unwrap_or_default()
}
