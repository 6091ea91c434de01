//! Edge handlers for the two external control inputs.

use crate::bench::Bench;
use crate::state::Shared;

/// Edge on the start/stop pushbutton. The switch bounces, so once a genuine
/// edge is seen every further edge is dropped until the refresh handler has
/// burned the debounce window down to zero.
pub fn on_run_edge(shared: &Shared, bench: &mut impl Bench) {
    if shared.try_arm_debounce() {
        bench.toggle_rotation_clock();
    }
}

/// Edge on the baro-read line. Driven by ECU logic, not a mechanical contact,
/// so it is taken at face value with no debounce.
pub fn on_baro_edge(shared: &Shared) {
    shared.flip_baro();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bench::recorder::Recorder;
    use crate::state::DEBOUNCE_TICKS;

    #[test]
    fn first_edge_toggles_the_clock_and_arms_the_window() {
        let shared = Shared::new();
        let mut bench = Recorder::default();

        on_run_edge(&shared, &mut bench);

        assert_eq!(1, bench.clock_toggles);
        assert_eq!(DEBOUNCE_TICKS, shared.debounce_left());
    }

    #[test]
    fn edges_inside_the_window_are_dropped() {
        let shared = Shared::new();
        let mut bench = Recorder::default();

        on_run_edge(&shared, &mut bench);
        for _ in 0..5 {
            on_run_edge(&shared, &mut bench);
        }

        assert_eq!(1, bench.clock_toggles);
        // Dropped edges must not rewind the window either.
        assert_eq!(DEBOUNCE_TICKS, shared.debounce_left());
    }

    #[test]
    fn edge_after_the_window_expires_toggles_again() {
        let shared = Shared::new();
        let mut bench = Recorder::default();

        on_run_edge(&shared, &mut bench);
        for _ in 0..DEBOUNCE_TICKS {
            shared.tick_debounce();
        }
        on_run_edge(&shared, &mut bench);

        assert_eq!(2, bench.clock_toggles);
    }

    #[test]
    fn baro_edges_flip_the_flag_every_time() {
        let shared = Shared::new();

        assert!(!shared.reading_baro());
        on_baro_edge(&shared);
        assert!(shared.reading_baro());
        on_baro_edge(&shared);
        assert!(!shared.reading_baro());
    }
}
