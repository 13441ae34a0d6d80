//! Heartbeat LED task
//!
//! Short on-pulse once per cycle so a glance at the board shows the
//! executor is alive. Runs as its own task; it consumes nothing from the
//! controller and the controller knows nothing about it.

use embassy_rp::gpio::Output;
use embassy_time::{Duration, Ticker};

const HEARTBEAT_TICK_MS: u64 = 100;
/// 32-tick cycle, LED on for the first 2 ticks (3.2 s period, short blip)
const CYCLE_MASK: u8 = 0b0001_1111;
const ON_TICKS: u8 = 2;

#[embassy_executor::task]
pub async fn heartbeat_task(mut led: Output<'static>) {
    let mut ticker = Ticker::every(Duration::from_millis(HEARTBEAT_TICK_MS));
    let mut count: u8 = 0;

    loop {
        ticker.next().await;
        if count < ON_TICKS {
            led.set_high();
        } else {
            led.set_low();
        }
        count = (count + 1) & CYCLE_MASK;
    }
}
