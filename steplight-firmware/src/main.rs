//! Steplight - Motion-Activated Step Light Firmware
//!
//! Main firmware binary for RP2040-based step-light controllers. A PIR
//! motion sensor feeds the debounce machine; the admin flag register
//! drives the indicator outputs; everything periodic runs from one
//! cooperative poll loop.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_time::{Instant, Timer};
use {defmt_rtt as _, panic_probe as _};

use steplight_core::config::ControllerConfig;
use steplight_core::control::Controller;
use steplight_core::scheduler::Ticker;

use crate::board::{IndicatorPin, SensorPin};

mod board;
mod heartbeat;

/// Scheduler registry capacity
///
/// Two core tasks today; headroom for future periodic consumers
/// (lighting renderer, telemetry reporter).
const TASK_CAPACITY: usize = 8;

/// Main-loop poll interval; well under the shortest task period (250 ms)
const POLL_INTERVAL_MS: u64 = 10;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Steplight firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Pin map (Pico carrier board):
    //   GPIO16 - PIR motion sensor (blue wire)
    //   GPIO15 - motion indicator LED (green wire)
    //   GPIO12 - aux indicator LED (orange wire)
    //   GPIO0  - heartbeat LED
    let sensor = SensorPin::new(Input::new(p.PIN_16, Pull::Down));
    let motion_indicator = IndicatorPin::new(Output::new(p.PIN_15, Level::Low));
    let aux_indicator = IndicatorPin::new(Output::new(p.PIN_12, Level::Low));
    let heartbeat_led = Output::new(p.PIN_0, Level::Low);

    let config = ControllerConfig::default();
    info!(
        "Controller config: sensor_fitted={}, settle={}s",
        config.motion_sensor_fitted, config.settle_secs
    );

    let mut controller = Controller::new(config, sensor, motion_indicator, aux_indicator);

    let mut ticker: Ticker<Controller<SensorPin, IndicatorPin>, TASK_CAPACITY> = Ticker::new();
    let now = Instant::now().as_millis();
    unwrap!(controller.schedule_tasks(&mut ticker, now));
    info!("Scheduled {} periodic tasks", ticker.len());

    unwrap!(spawner.spawn(heartbeat::heartbeat_task(heartbeat_led)));

    info!("Init finished, entering poll loop");

    loop {
        ticker.poll(Instant::now().as_millis(), &mut controller);
        Timer::after_millis(POLL_INTERVAL_MS).await;
    }
}
