//! Physical I/O boundary.
//!
//! The core never touches a register directly; the platform layer implements
//! [`Bench`] over whatever pins and timers the board wires up, and passes it
//! to the handlers. Pin directions, timer modes and converter reference
//! selection are the platform's job, done once before interrupts are enabled.

use crate::state::AdcChannel;
use crate::table::Channel;

/// Everything the handlers do to the outside world.
pub trait Bench {
    /// Installs the next compare interval of the rotation timer, in ticks.
    fn set_rotation_compare(&mut self, ticks: u16);

    /// Toggles one of the two HEP pickup outputs.
    fn toggle_hep(&mut self, channel: Channel);

    /// Publishes the TPS PWM duty for the next period.
    fn set_tps_duty(&mut self, duty: u8);

    /// Publishes the MAP PWM duty for the next period.
    fn set_map_duty(&mut self, duty: u8);

    /// Toggles the vehicle-speed pulse output.
    fn toggle_vss(&mut self);

    /// Starts the rotation clock if stopped, stops it if running.
    fn toggle_rotation_clock(&mut self);

    /// Reprograms the converter multiplexer to the given input.
    fn select_adc_input(&mut self, channel: AdcChannel);

    /// Requests the next conversion on the currently selected input.
    fn start_conversion(&mut self);
}
