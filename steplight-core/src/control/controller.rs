//! Controller implementation
//!
//! All flag mutation is routed through this type so the change-triggered
//! output refresh can never be skipped: every mutating entry point
//! re-derives the indicator pins when the register reports a change (and
//! unconditionally for toggles). The motion monitor and the flag register
//! stay private; the module boundary is the concurrency discipline.

use crate::config::ControllerConfig;
use crate::flags::{Flag, FlagRegister};
use crate::motion::{MotionClock, MotionMonitor, MotionTick};
use crate::scheduler::{SchedulerFull, Ticker};
use crate::traits::{InputPin, OutputPin};

/// Top-level device state: flags, motion machine, pins
///
/// `I` is the motion sensor input, `O` the indicator output type. One
/// controller instance exists for the device's lifetime; there are no
/// concurrent execution contexts, so nothing here is synchronized.
#[derive(Debug)]
pub struct Controller<I: InputPin, O: OutputPin> {
    config: ControllerConfig,
    flags: FlagRegister,
    monitor: MotionMonitor,
    sensor: I,
    motion_indicator: O,
    aux_indicator: O,
    /// Alternator for the disable-blink, independent of the register
    blink_high: bool,
}

impl<I: InputPin, O: OutputPin> Controller<I, O> {
    /// Build the controller with everything in its powered-off default
    ///
    /// Outputs are driven to their off levels and the register starts at
    /// zero; the startup refresh runs once so pins and flags agree before
    /// the first poll.
    pub fn new(config: ControllerConfig, sensor: I, motion_indicator: O, aux_indicator: O) -> Self {
        let mut controller = Self {
            config,
            flags: FlagRegister::new(),
            monitor: MotionMonitor::new(config.settle_secs),
            sensor,
            motion_indicator,
            aux_indicator,
            blink_high: false,
        };
        controller.refresh_outputs();
        controller
    }

    /// Register the periodic tasks with the scheduler
    ///
    /// Runs one motion tick immediately (the settle window starts counting
    /// at startup, not at the first scheduled firing), then registers the
    /// motion machine and the disable-blink at their configured periods.
    pub fn schedule_tasks<const N: usize>(
        &mut self,
        ticker: &mut Ticker<Self, N>,
        now_ms: u64,
    ) -> Result<(), SchedulerFull> {
        self.motion_tick();
        ticker.schedule(now_ms, self.config.motion_tick_ms, Self::run_motion_task)?;
        ticker.schedule(now_ms, self.config.blink_tick_ms, Self::run_blink_task)?;
        Ok(())
    }

    fn run_motion_task(controller: &mut Self) {
        controller.motion_tick();
    }

    fn run_blink_task(controller: &mut Self) {
        controller.blink_tick();
    }

    // --- flag register surface -------------------------------------------

    /// Raw register byte (telemetry report)
    pub fn flags_raw(&self) -> u8 {
        self.flags.raw()
    }

    /// Read one flag bit; out-of-range indices read as `false`
    pub fn flag(&self, bit: u8) -> bool {
        self.flags.get(bit)
    }

    /// Set one flag bit; `true` iff the register changed
    pub fn set_flag(&mut self, bit: u8) -> bool {
        let changed = self.flags.set(bit);
        if changed {
            self.refresh_outputs();
        }
        changed
    }

    /// Clear one flag bit; `true` iff the register changed
    pub fn clear_flag(&mut self, bit: u8) -> bool {
        let changed = self.flags.clear(bit);
        if changed {
            self.refresh_outputs();
        }
        changed
    }

    /// Flip one flag bit; always refreshes outputs for a valid index
    pub fn toggle_flag(&mut self, bit: u8) -> bool {
        let flipped = self.flags.toggle(bit);
        if flipped {
            self.refresh_outputs();
        }
        flipped
    }

    /// Bulk-replace the register; refreshes outputs only on change
    pub fn replace_flags(&mut self, bits: u8) {
        if self.flags.replace_all(bits) {
            self.refresh_outputs();
        }
    }

    // --- named wrappers (call-site clarity only) -------------------------

    /// Debounced motion state on record
    pub fn motion_detected(&self) -> bool {
        self.flags.is_set(Flag::MotionDetected)
    }

    /// Motion state as the lighting chain should see it: detected and the
    /// sensor not administratively disabled
    pub fn motion_oper_state(&self) -> bool {
        self.motion_detected() && !self.motion_sensor_disabled()
    }

    /// Admin override: is motion input being ignored?
    pub fn motion_sensor_disabled(&self) -> bool {
        self.flags.is_set(Flag::MotionSensorDisabled)
    }

    /// Ignore motion input and blink the indicator instead
    pub fn set_motion_sensor_disabled(&mut self) -> bool {
        self.set_flag(Flag::MotionSensorDisabled.bit())
    }

    /// Resume tracking motion input
    pub fn clear_motion_sensor_disabled(&mut self) -> bool {
        self.clear_flag(Flag::MotionSensorDisabled.bit())
    }

    /// Flip the admin disable
    pub fn toggle_motion_sensor_disabled(&mut self) -> bool {
        self.toggle_flag(Flag::MotionSensorDisabled.bit())
    }

    /// Auxiliary indicator flag
    pub fn aux_indicator(&self) -> bool {
        self.flags.is_set(Flag::AuxIndicator)
    }

    /// Turn the auxiliary indicator on
    pub fn set_aux_indicator(&mut self) -> bool {
        self.set_flag(Flag::AuxIndicator.bit())
    }

    /// Turn the auxiliary indicator off
    pub fn clear_aux_indicator(&mut self) -> bool {
        self.clear_flag(Flag::AuxIndicator.bit())
    }

    /// Flip the auxiliary indicator
    pub fn toggle_aux_indicator(&mut self) -> bool {
        self.toggle_flag(Flag::AuxIndicator.bit())
    }

    // --- motion machine surface ------------------------------------------

    /// Time since the last debounced transition
    pub fn motion_clock(&self) -> MotionClock {
        self.monitor.clock()
    }

    /// True while the boot settle window is still running
    pub fn motion_settling(&self) -> bool {
        self.monitor.is_settling()
    }

    /// Force "motion detected" for the next `secs` seconds regardless of
    /// the physical reading (command-channel test trigger)
    pub fn override_motion_for(&mut self, secs: u16) {
        self.monitor.force_detection_for(secs);
    }

    /// One-second motion machine tick
    ///
    /// Reads the pin (never-high on boards without the sensor fitted),
    /// runs the monitor, and applies a reported flip through the register
    /// toggle so the outputs refresh on the same tick.
    pub fn motion_tick(&mut self) {
        let raw_high = self.config.motion_sensor_fitted && self.sensor.is_high();
        let disabled = self.motion_sensor_disabled();
        let current = self.motion_detected();

        if let MotionTick::Changed(_) = self.monitor.tick(raw_high, disabled, current) {
            // MotionDetected is written only here; a toggle is exact
            // because the monitor reported the opposite of `current`.
            self.toggle_flag(Flag::MotionDetected.bit());
        }
    }

    /// 250 ms blink tick for the disable indicator
    ///
    /// While the sensor is administratively disabled, the motion indicator
    /// blinks at 50% duty from this alternator instead of tracking the
    /// register. The next refresh snaps it back to flag state.
    pub fn blink_tick(&mut self) {
        if self.motion_sensor_disabled() {
            self.motion_indicator.set_state(self.blink_high);
            self.blink_high = !self.blink_high;
        }
    }

    /// Re-derive every output pin from current flag values
    ///
    /// Idempotent and cheap; the single point where flag state reaches the
    /// outside world.
    pub fn refresh_outputs(&mut self) {
        self.motion_indicator.set_state(self.flags.is_set(Flag::MotionDetected));
        self.aux_indicator.set_state(self.flags.is_set(Flag::AuxIndicator));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ControllerConfig;
    use core::cell::Cell;

    struct FakeInput<'a> {
        level: &'a Cell<bool>,
    }

    impl InputPin for FakeInput<'_> {
        fn is_high(&self) -> bool {
            self.level.get()
        }
    }

    struct FakeOutput<'a> {
        level: &'a Cell<bool>,
    }

    impl OutputPin for FakeOutput<'_> {
        fn set_high(&mut self) {
            self.level.set(true);
        }

        fn set_low(&mut self) {
            self.level.set(false);
        }

        fn is_set_high(&self) -> bool {
            self.level.get()
        }
    }

    struct Bench {
        sensor: Cell<bool>,
        motion_led: Cell<bool>,
        aux_led: Cell<bool>,
    }

    impl Bench {
        fn new() -> Self {
            Self {
                sensor: Cell::new(false),
                motion_led: Cell::new(true), // deliberately not at the off default
                aux_led: Cell::new(true),
            }
        }

        fn controller(&self, config: ControllerConfig) -> Controller<FakeInput<'_>, FakeOutput<'_>> {
            Controller::new(
                config,
                FakeInput { level: &self.sensor },
                FakeOutput { level: &self.motion_led },
                FakeOutput { level: &self.aux_led },
            )
        }
    }

    fn settled_config() -> ControllerConfig {
        ControllerConfig {
            settle_secs: 0,
            ..Default::default()
        }
    }

    #[test]
    fn test_startup_refresh_drives_outputs_off() {
        let bench = Bench::new();
        let controller = bench.controller(ControllerConfig::default());

        assert_eq!(controller.flags_raw(), 0);
        assert!(!bench.motion_led.get());
        assert!(!bench.aux_led.get());
    }

    #[test]
    fn test_motion_flip_reaches_indicator_same_tick() {
        let bench = Bench::new();
        let mut controller = bench.controller(settled_config());

        bench.sensor.set(true);
        controller.motion_tick();
        assert!(controller.motion_detected());
        assert!(bench.motion_led.get());

        bench.sensor.set(false);
        controller.motion_tick();
        assert!(!controller.motion_detected());
        assert!(!bench.motion_led.get());
    }

    #[test]
    fn test_settling_ignores_raw_input() {
        let bench = Bench::new();
        let mut controller = bench.controller(ControllerConfig {
            settle_secs: 4,
            ..Default::default()
        });

        bench.sensor.set(true);
        for _ in 0..4 {
            assert!(controller.motion_settling());
            controller.motion_tick();
            assert!(!controller.motion_detected());
        }
        assert_eq!(controller.motion_clock().hours, crate::motion::SETTLING_HOURS);

        // First settled tick picks the input up
        controller.motion_tick();
        assert!(controller.motion_detected());
    }

    #[test]
    fn test_disable_blocks_detection() {
        let bench = Bench::new();
        let mut controller = bench.controller(settled_config());

        assert!(controller.set_motion_sensor_disabled());
        assert!(controller.motion_sensor_disabled());

        bench.sensor.set(true);
        for _ in 0..5 {
            controller.motion_tick();
            assert!(!controller.motion_detected());
        }
    }

    #[test]
    fn test_oper_state_masks_disabled_sensor() {
        let bench = Bench::new();
        let mut controller = bench.controller(settled_config());

        bench.sensor.set(true);
        controller.motion_tick();
        assert!(controller.motion_oper_state());

        controller.set_motion_sensor_disabled();
        // Flag still set, oper state masked
        assert!(controller.motion_detected());
        assert!(!controller.motion_oper_state());
    }

    #[test]
    fn test_override_without_fitted_sensor() {
        let bench = Bench::new();
        let mut controller = bench.controller(ControllerConfig {
            motion_sensor_fitted: false,
            settle_secs: 0,
            ..Default::default()
        });

        bench.sensor.set(true); // must be ignored entirely
        controller.motion_tick();
        assert!(!controller.motion_detected());

        controller.override_motion_for(2);
        controller.motion_tick();
        assert!(controller.motion_detected());
        controller.motion_tick();
        assert!(controller.motion_detected());
        controller.motion_tick();
        assert!(!controller.motion_detected());
    }

    #[test]
    fn test_blink_only_while_disabled() {
        let bench = Bench::new();
        let mut controller = bench.controller(settled_config());

        // Enabled: blink tick must not touch the indicator
        controller.blink_tick();
        assert!(!bench.motion_led.get());

        controller.set_motion_sensor_disabled();
        controller.blink_tick();
        let first = bench.motion_led.get();
        controller.blink_tick();
        assert_ne!(first, bench.motion_led.get());
        controller.blink_tick();
        assert_eq!(first, bench.motion_led.get());
    }

    #[test]
    fn test_refresh_snaps_indicator_back_after_blink() {
        let bench = Bench::new();
        let mut controller = bench.controller(settled_config());

        bench.sensor.set(true);
        controller.motion_tick(); // detected -> LED on

        controller.set_motion_sensor_disabled();
        controller.blink_tick();
        controller.blink_tick(); // alternator leaves the LED high or low

        // Clearing the disable refreshes from flags: detected is still set
        controller.clear_motion_sensor_disabled();
        assert!(bench.motion_led.get());
    }

    #[test]
    fn test_aux_indicator_follows_flag() {
        let bench = Bench::new();
        let mut controller = bench.controller(settled_config());

        assert!(controller.set_aux_indicator());
        assert!(bench.aux_led.get());
        assert!(!controller.set_aux_indicator()); // no-op, still on
        assert!(controller.toggle_aux_indicator());
        assert!(!bench.aux_led.get());
    }

    #[test]
    fn test_raw_flag_surface_rejects_out_of_range() {
        let bench = Bench::new();
        let mut controller = bench.controller(settled_config());

        assert!(!controller.set_flag(8));
        assert!(!controller.toggle_flag(200));
        assert!(!controller.flag(8));
        assert_eq!(controller.flags_raw(), 0);
    }

    #[test]
    fn test_replace_flags_refreshes_on_change() {
        let bench = Bench::new();
        let mut controller = bench.controller(settled_config());

        controller.replace_flags(0b100);
        assert!(bench.aux_led.get());
        controller.replace_flags(0);
        assert!(!bench.aux_led.get());
    }

    #[test]
    fn test_scheduled_tasks_fire_through_ticker() {
        let bench = Bench::new();
        let mut controller = bench.controller(settled_config());
        let mut ticker: Ticker<_, 4> = Ticker::new();

        controller.schedule_tasks(&mut ticker, 0).unwrap();
        assert_eq!(ticker.len(), 2);

        bench.sensor.set(true);
        // Motion task due at 1000, blink task at 250/500/750/1000
        assert_eq!(ticker.poll(250, &mut controller), 1);
        assert!(!controller.motion_detected());
        assert_eq!(ticker.poll(1000, &mut controller), 2);
        assert!(controller.motion_detected());
    }
}
