//! Position state machine for the HEP outputs.
//!
//! Runs on every compare match of the rotation timer: toggles the pickup the
//! current table entry names, steps to the next edge and re-arms the timer
//! with the scaled delta of that edge.

use crate::bench::Bench;
use crate::state::{AdcChannel, Shared, BASE_ROTATION_TICKS};
use crate::table::Position;

/// Compare interval for an edge. The floor keeps the maximum rotation speed
/// bounded; the sample scales the whole rotation, so changing it stretches or
/// compresses every edge by the same factor.
pub(crate) fn next_interval(speed_sample: u8, delta: u16) -> u16 {
    (BASE_ROTATION_TICKS + speed_sample as u16) * delta
}

/// Owns the position in the rotation; nothing else reads or writes it.
pub struct PositionMachine {
    position: Position,
}

impl PositionMachine {
    pub const fn new() -> Self {
        PositionMachine {
            position: Position::start(),
        }
    }

    /// One compare match: toggle the current edge's pickup, advance, re-arm.
    /// A rotation-speed sample updated mid-firing is picked up one edge late,
    /// which only smooths the speed change.
    pub fn fire(&mut self, shared: &Shared, bench: &mut impl Bench) {
        bench.toggle_hep(self.position.entry().channel);
        self.position.advance();
        bench.set_rotation_compare(next_interval(
            shared.sample(AdcChannel::Hep),
            self.position.entry().delta,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bench::recorder::Recorder;
    use crate::table::{ROTATION, ROTATION_TICKS};
    use rstest::rstest;

    #[test]
    fn one_pickup_toggled_per_firing_in_table_order() {
        let shared = Shared::new();
        let mut machine = PositionMachine::new();
        let mut bench = Recorder::default();

        for _ in 0..ROTATION.len() {
            machine.fire(&shared, &mut bench);
        }

        assert_eq!(ROTATION.len(), bench.hep_toggles.len());
        for (toggled, entry) in bench.hep_toggles.iter().zip(ROTATION.iter()) {
            assert_eq!(entry.channel, *toggled);
        }
    }

    #[rstest(speed_sample, case(0x00), case(0x01), case(0x80), case(0xff))]
    fn full_cycle_interval_is_stable_across_cycles(speed_sample: u8) {
        let shared = Shared::new();
        shared.store_sample(AdcChannel::Hep, speed_sample);
        let mut machine = PositionMachine::new();
        let mut bench = Recorder::default();

        for _ in 0..3 * ROTATION.len() {
            machine.fire(&shared, &mut bench);
        }

        let expected =
            (BASE_ROTATION_TICKS + speed_sample as u16) as u32 * ROTATION_TICKS as u32;
        for cycle in bench.compares.chunks(ROTATION.len()) {
            let total: u32 = cycle.iter().map(|&c| c as u32).sum();
            assert_eq!(expected, total);
        }
    }

    #[test]
    fn compare_scales_with_the_speed_sample() {
        let shared = Shared::new();
        let mut machine = PositionMachine::new();
        let mut bench = Recorder::default();

        shared.store_sample(AdcChannel::Hep, 0x00);
        machine.fire(&shared, &mut bench);
        shared.store_sample(AdcChannel::Hep, 0x0a);
        machine.fire(&shared, &mut bench);

        // Both firings armed the timer for entries 1 and 2 respectively.
        assert_eq!(5 * ROTATION[1].delta, bench.compares[0]);
        assert_eq!(15 * ROTATION[2].delta, bench.compares[1]);
    }

    #[test]
    fn widest_interval_fits_the_compare_register() {
        let widest = ROTATION.iter().map(|e| e.delta).max().unwrap();
        // u16 arithmetic must not wrap even at full-scale speed input.
        assert!((BASE_ROTATION_TICKS as u32 + 0xff) * widest as u32 <= u16::MAX as u32);
    }
}
