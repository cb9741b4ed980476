#![no_std]
#![no_main]

mod buttons;
mod calibrate;
mod motors;
mod sensors;
mod uart;

use defmt::{info, warn};
use embassy_executor::Spawner;
use embassy_stm32::adc::Adc;
use embassy_stm32::exti::ExtiInput;
use embassy_stm32::gpio::{Level, Output, Pull, Speed};
use embassy_stm32::usart::{Config as UartConfig, UartTx};

use embassy_stm32::Config;
use embassy_time::Timer;
use {defmt_rtt as _, panic_probe as _};

use micromouse::config::{DriveConfig, SensorConfig};
use micromouse::debounce::ActiveLevel;
use micromouse::debug;
use micromouse::drive::{Drive, DriveCommand};
use micromouse::sensors::{Calibration, Correction, SharedSensors, correction};
use micromouse::{Navigator, Step, TurnExecutor};

use buttons::{LINE_SEEN, START_PRESSED, WALL_AHEAD};
use calibrate::StepLeds;
use motors::{DirectionPins, MotorController};
use sensors::SideSensors;
use uart::DebugLink;

defmt::timestamp!("{=u64}", { embassy_time::Instant::now().as_millis() });

/// Latest side sensor averages, written by `sensors::sample_task`.
static SENSORS: SharedSensors = SharedSensors::new();

/// Straight-line time to cross one cell at forward duty.
const CELL_TRAVEL_MS: u32 = 600;
/// Lateral correction update period while crossing a cell.
const CORRECTION_TICK_MS: u32 = 10;

#[embassy_executor::task]
async fn blink_task(mut led: Output<'static>) {
    loop {
        led.toggle();
        Timer::after_millis(500).await;
    }
}

#[derive(PartialEq)]
enum RobotMode {
    /// Waiting for the start button.
    Idle,
    Calibrating,
    Running,
    /// Goal reached or boxed in; start button resets.
    Finished,
}

type Executor = TurnExecutor<MotorController<'static>>;

/// How a cell crossing ended.
enum Crossing {
    /// Ran the full cell time or saw the floor line.
    Done,
    /// Front wall detector fired before the next cell was reached.
    Blocked,
}

/// Drive across the current cell, steering away from side walls.
async fn cross_cell(
    executor: &mut Executor,
    calibration: Option<&Calibration>,
    config: &SensorConfig,
) -> Crossing {
    let forward = executor.config().forward_duty;
    let inner = forward.saturating_sub(executor.config().steer_delta);
    let mut elapsed = 0;

    while elapsed < CELL_TRAVEL_MS {
        if buttons::is_raised(&WALL_AHEAD) {
            executor.stop();
            return Crossing::Blocked;
        }
        if buttons::take(&LINE_SEEN) {
            break;
        }

        let command = match correction(calibration, config, SENSORS.load()) {
            Correction::Forward => DriveCommand::forward(forward),
            Correction::SteerRight => DriveCommand::arc(forward, inner),
            Correction::SteerLeft => DriveCommand::arc(inner, forward),
        };
        executor.drive_mut().apply(command);

        Timer::after_millis(CORRECTION_TICK_MS as u64).await;
        elapsed += CORRECTION_TICK_MS;
    }

    Crossing::Done
}

/// Record a wall in front of the robot on its current cell.
async fn learn_wall_ahead(nav: &mut Navigator, link: &mut DebugLink<'_>) {
    let (pos, side) = (nav.position(), nav.heading());
    info!("Wall at {} facing {}", pos, side);
    if let Some(report) = nav.wall_ahead() {
        if !report.converged {
            warn!("Flood fill stopped after {} sweeps", report.sweeps);
        }
    }
    let _ = link.emit(&debug::wall_line(pos, side)).await;
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_stm32::init(Config::default());

    info!("=== Micromouse ===");

    // Heartbeat on the green LED
    let led = Output::new(p.PD12, Level::Low, Speed::Low);
    spawner.spawn(blink_task(led)).unwrap();

    // Motors: TIM3 CH3 (PC8) / CH4 (PC9), direction on PB12..PB15
    let left = DirectionPins {
        in0: Output::new(p.PB12, Level::Low, Speed::Low),
        in1: Output::new(p.PB13, Level::Low, Speed::Low),
    };
    let right = DirectionPins {
        in0: Output::new(p.PB14, Level::Low, Speed::Low),
        in1: Output::new(p.PB15, Level::Low, Speed::Low),
    };
    let motors = MotorController::new(p.TIM3, p.PC8, p.PC9, left, right);
    let drive_config = DriveConfig::default();
    let mut executor = TurnExecutor::new(motors, drive_config);
    info!("Motors initialized: {}", drive_config);

    // Side sensors via ADC1
    let adc = Adc::new(p.ADC1);
    spawner
        .spawn(sensors::sample_task(SideSensors::new(adc, p.PB0, p.PB1), &SENSORS))
        .unwrap();
    info!("Sensors initialized");

    // Debug UART (UART5, TX only)
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = 115_200;
    let tx = UartTx::new(p.UART5, p.PC12, p.DMA1_CH7, uart_config).unwrap();
    let mut link = DebugLink::new(tx);
    let _ = link.send_text("uart ready").await;
    info!("UART initialized (115200 baud)");

    // Digital inputs
    spawner
        .spawn(buttons::watch_input(
            ExtiInput::new(p.PA0, p.EXTI0, Pull::Down),
            ActiveLevel::High,
            &START_PRESSED,
        ))
        .unwrap();
    spawner
        .spawn(buttons::watch_input(
            ExtiInput::new(p.PE7, p.EXTI7, Pull::Up),
            ActiveLevel::Low,
            &WALL_AHEAD,
        ))
        .unwrap();
    spawner
        .spawn(buttons::watch_input(
            ExtiInput::new(p.PE8, p.EXTI8, Pull::Up),
            ActiveLevel::Low,
            &LINE_SEEN,
        ))
        .unwrap();

    let mut leds = StepLeds {
        orange: Output::new(p.PD13, Level::Low, Speed::Low),
        red: Output::new(p.PD14, Level::Low, Speed::Low),
        blue: Output::new(p.PD15, Level::Low, Speed::Low),
    };

    let sensor_config = SensorConfig::default();
    let mut calibration: Option<Calibration> = None;
    let mut nav = Navigator::default();
    let mut mode = RobotMode::Idle;

    info!("Ready! Press start to calibrate and run");

    loop {
        match mode {
            RobotMode::Idle => {
                if buttons::take(&START_PRESSED) {
                    info!("Starting calibration...");
                    mode = RobotMode::Calibrating;
                }
            }
            RobotMode::Calibrating => {
                let learned = calibrate::auto_calibrate(&mut leds, &SENSORS).await;
                info!("Calibration complete: {}", learned);
                calibration = Some(learned);
                let _ = link.send_text("calibrated").await;

                // Presses during calibration do not count.
                buttons::take(&START_PRESSED);
                buttons::take(&WALL_AHEAD);
                buttons::take(&LINE_SEEN);
                mode = RobotMode::Running;
            }
            RobotMode::Running => {
                if buttons::take(&WALL_AHEAD) {
                    learn_wall_ahead(&mut nav, &mut link).await;
                }

                let step = nav.face_next(&mut executor).await;
                let weight = match step {
                    Step::Moved { to, .. } => nav.grid().weight(to),
                    _ => nav.weight(),
                };
                let _ = link.emit(&debug::step_line(&step, weight)).await;

                match step {
                    Step::Moved { to, heading, .. } => {
                        info!("Moving to {} heading {}", to, heading);
                        match cross_cell(&mut executor, calibration.as_ref(), &sensor_config).await {
                            Crossing::Done => {
                                nav.advance();
                                info!("At {} (w={})", nav.position(), nav.weight());
                            }
                            Crossing::Blocked => {
                                buttons::take(&WALL_AHEAD);
                                learn_wall_ahead(&mut nav, &mut link).await;
                            }
                        }
                    }
                    Step::Arrived => {
                        info!("Goal reached!");
                        mode = RobotMode::Finished;
                    }
                    Step::Stuck => {
                        warn!("No open side at {}, stopping", nav.position());
                        mode = RobotMode::Finished;
                    }
                }
            }
            RobotMode::Finished => {
                if buttons::take(&START_PRESSED) {
                    info!("Reset, waiting for start");
                    executor.stop();
                    nav = Navigator::default();
                    mode = RobotMode::Idle;
                }
            }
        }

        Timer::after_millis(10).await;
    }
}
