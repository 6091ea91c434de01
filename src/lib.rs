#![cfg_attr(not(test), no_std)]
//! Bench signal generator core for exercising an engine ECU without an
//! engine: two phase-offset HEP pickup channels, a speed-proportional VSS
//! pulse train and PWM stand-ins for the MAP and TPS sensors, all modulated
//! by four pots and two control inputs.

pub mod bench;
pub mod position;
pub mod refresh;
pub mod sampler;
pub mod state;
pub mod table;
pub mod toggle;

pub use crate::bench::Bench;
pub use crate::position::PositionMachine;
pub use crate::refresh::{BaroRange, CycleRefresh};
pub use crate::sampler::Sampler;
pub use crate::state::{AdcChannel, Shared};
pub use crate::table::{Channel, Position, ROTATION};

/// Event sources, one per interrupt vector the platform wires up.
#[derive(Debug, Eq, PartialEq, Clone, Copy)]
pub enum Event {
    /// Compare match of the rotation timer.
    RotationCompare,
    /// Overflow of the PWM timer, once per period.
    PwmOverflow,
    /// A conversion finished with the given 8-bit result.
    ConversionDone(u8),
    /// Edge on the start/stop pushbutton.
    RunEdge,
    /// Edge on the baro-read line.
    BaroEdge,
}

/// The whole core: the shared arena plus the three stateful handlers. The
/// platform builds one of these before enabling interrupts (the rotation
/// clock starts disabled until the first run edge) and calls [`Core::dispatch`]
/// from each vector.
pub struct Core {
    shared: Shared,
    position: PositionMachine,
    refresh: CycleRefresh,
    sampler: Sampler,
}

impl Core {
    /// `range` comes from the 2-bar/3-bar jumper, read once at power-up.
    pub const fn new(range: BaroRange) -> Self {
        Core {
            shared: Shared::new(),
            position: PositionMachine::new(),
            refresh: CycleRefresh::new(range),
            sampler: Sampler::new(),
        }
    }

    pub fn shared(&self) -> &Shared {
        &self.shared
    }

    /// Compare value the platform pre-loads into the rotation timer before
    /// the clock is first enabled.
    pub fn initial_compare(&self) -> u16 {
        position::next_interval(self.shared.sample(AdcChannel::Hep), ROTATION[0].delta)
    }

    /// Routes one event to its handler. Handlers run to completion, never
    /// call each other and never block, so this is safe to call straight
    /// from interrupt context.
    pub fn dispatch(&mut self, event: Event, bench: &mut impl Bench) {
        match event {
            Event::RotationCompare => self.position.fire(&self.shared, bench),
            Event::PwmOverflow => self.refresh.fire(&self.shared, bench),
            Event::ConversionDone(sample) => self.sampler.fire(sample, &self.shared, bench),
            Event::RunEdge => toggle::on_run_edge(&self.shared, bench),
            Event::BaroEdge => toggle::on_baro_edge(&self.shared),
        }
    }
}
