//! Side proximity sensors on ADC1.
//!
//! Pin Mapping (ADC1 channels):
//! - Right: PB0 (ADC1_IN8)
//! - Left:  PB1 (ADC1_IN9)
//!
//! Samples are read one conversion at a time, alternating (right, left),
//! into a half buffer of `pairs_per_half` pairs. Every filled half is
//! averaged and published to the shared readings. The control loop only
//! ever sees the latest published pair.

use embassy_stm32::adc::Adc;
use embassy_stm32::peripherals::{ADC1, PB0, PB1};
use embassy_time::Timer;

use micromouse::config::SensorConfig;
use micromouse::sensors::{HALF_BUFFER_LEN, SharedSensors, average_interleaved};

/// Side sensor pair controller using ADC.
pub struct SideSensors<'d> {
    adc: Adc<'d, ADC1>,
    pin_right: PB0,
    pin_left: PB1,
}

impl<'d> SideSensors<'d> {
    pub fn new(adc: Adc<'d, ADC1>, pb0: PB0, pb1: PB1) -> Self {
        Self {
            adc,
            pin_right: pb0,
            pin_left: pb1,
        }
    }

    /// Fill the first `pairs` (right, left) pairs of `half`.
    pub fn fill(&mut self, half: &mut [u16], pairs: usize) {
        for pair in half.chunks_exact_mut(2).take(pairs) {
            pair[0] = self.adc.blocking_read(&mut self.pin_right);
            pair[1] = self.adc.blocking_read(&mut self.pin_left);
        }
    }
}

#[embassy_executor::task]
pub async fn sample_task(mut sensors: SideSensors<'static>, shared: &'static SharedSensors) {
    let config = SensorConfig::default();
    let mut half = [0u16; HALF_BUFFER_LEN];

    loop {
        sensors.fill(&mut half, config.pairs_per_half);
        shared.store(average_interleaved(&half, config.pairs_per_half));
        Timer::after_millis(1).await;
    }
}
