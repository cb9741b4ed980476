//! Motor control module for the micromouse.
//!
//! Two DC motors on an H-bridge, each with one PWM input for speed and two
//! direction inputs (IN0/IN1). The direction table lives in
//! [`micromouse::drive`]; this module only maps it onto pins.

use embassy_stm32::gpio::{Level, Output, OutputType};
use embassy_stm32::peripherals::{PC8, PC9, TIM3};
use embassy_stm32::time::hz;
use embassy_stm32::timer::Channel;
use embassy_stm32::timer::low_level::CountingMode;
use embassy_stm32::timer::simple_pwm::{PwmPin, SimplePwm};
use embassy_time::Timer;
use embedded_hal::Pwm;

use micromouse::config::PWM_PERIOD;
use micromouse::drive::{Drive, DriveCommand, Motor, MotorCommand};

/// PWM frequency for motor control (20kHz - inaudible)
const PWM_FREQUENCY: u32 = 20_000;

/// Direction inputs of one bridge half.
pub struct DirectionPins<'d> {
    pub in0: Output<'d>,
    pub in1: Output<'d>,
}

impl DirectionPins<'_> {
    fn set(&mut self, (in0, in1): (bool, bool)) {
        self.in0.set_level(Level::from(in0));
        self.in1.set_level(Level::from(in1));
    }
}

/// Motor controller for the dual DC motors.
///
/// Uses TIM3 channels:
/// - CH3 (PC8): left motor speed
/// - CH4 (PC9): right motor speed
pub struct MotorController<'d> {
    pwm: SimplePwm<'d, TIM3>,
    max_duty: u32,
    left: DirectionPins<'d>,
    right: DirectionPins<'d>,
}

impl<'d> MotorController<'d> {
    /// Create a new motor controller with both motors braked.
    pub fn new(
        tim3: TIM3,
        pc8: PC8,
        pc9: PC9,
        left: DirectionPins<'d>,
        right: DirectionPins<'d>,
    ) -> Self {
        let pwm_left = PwmPin::new_ch3(pc8, OutputType::PushPull);
        let pwm_right = PwmPin::new_ch4(pc9, OutputType::PushPull);

        let mut pwm = SimplePwm::new(
            tim3,
            None,
            None,
            Some(pwm_left),
            Some(pwm_right),
            hz(PWM_FREQUENCY),
            CountingMode::EdgeAlignedUp,
        );

        let max_duty = pwm.get_max_duty();

        pwm.enable(Channel::Ch3);
        pwm.enable(Channel::Ch4);

        let mut controller = Self {
            pwm,
            max_duty,
            left,
            right,
        };
        controller.stop_all();
        controller
    }

    /// Set one motor's bridge direction and duty.
    pub fn set_motor(&mut self, motor: Motor, command: MotorCommand) {
        let duty = self.max_duty * command.duty.min(PWM_PERIOD) as u32 / PWM_PERIOD as u32;

        let (pins, channel) = match motor {
            Motor::Left => (&mut self.left, Channel::Ch3),
            Motor::Right => (&mut self.right, Channel::Ch4),
        };

        pins.set(command.pins());
        self.pwm.set_duty(channel, duty);
    }

    /// Brake both motors immediately.
    pub fn stop_all(&mut self) {
        self.set_motor(Motor::Left, MotorCommand::stop());
        self.set_motor(Motor::Right, MotorCommand::stop());
    }
}

impl Drive for MotorController<'_> {
    fn apply(&mut self, command: DriveCommand) {
        self.set_motor(Motor::Left, command.left);
        self.set_motor(Motor::Right, command.right);
    }

    async fn hold(&mut self, duration_ms: u32) {
        Timer::after_millis(duration_ms as u64).await;
    }
}
