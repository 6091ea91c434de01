//! Per-PWM-period refresh of the duty outputs and the timing counters.

use num::clamp;

use crate::bench::Bench;
use crate::state::{AdcChannel, Shared, BASE_VSS_TICKS, MAX_TPS, MIN_TPS};

/// Barometric calibration range, chosen by a jumper read once at power-up.
pub enum BaroRange {
    /// 2 bar, slightly above sea level.
    TwoBar,
    /// 3 bar.
    ThreeBar,
}

impl BaroRange {
    /// Fixed MAP duty published while the ECU holds the baro-read line.
    pub const fn duty(&self) -> u8 {
        match *self {
            BaroRange::TwoBar => 0x7c,
            BaroRange::ThreeBar => 0x52,
        }
    }
}

/// Runs once per PWM period, independently of the rotation timer.
pub struct CycleRefresh {
    baro_duty: u8,
}

impl CycleRefresh {
    pub const fn new(range: BaroRange) -> Self {
        CycleRefresh {
            baro_duty: range.duty(),
        }
    }

    /// One PWM period: republish both duty cycles, burn the debounce window
    /// down and step the VSS divider.
    pub fn fire(&self, shared: &Shared, bench: &mut impl Bench) {
        // The ECU rejects out-of-range TPS as a sensor fault, so the sample
        // is clamped rather than passed through raw.
        bench.set_tps_duty(clamp(shared.sample(AdcChannel::Tps), MIN_TPS, MAX_TPS));

        // Always publish the fixed baro duty while the ECU has the baro
        // relay grounded.
        if shared.reading_baro() {
            bench.set_map_duty(self.baro_duty);
        } else {
            bench.set_map_duty(shared.sample(AdcChannel::Map));
        }

        shared.tick_debounce();

        let reload = BASE_VSS_TICKS + shared.sample(AdcChannel::Vss) as u32;
        if shared.tick_vss_divider(reload) {
            bench.toggle_vss();
        }
    }
}
