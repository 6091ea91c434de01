//! Shared state arena, accessed concurrently by the event handlers.
//!
//! Analog samples and one-bit flags are single bytes and are read and written
//! atomically on their own. The two multi-byte counters are wider than one
//! bus cycle can update, so they live behind a critical section.

use core::cell::Cell;
use core::sync::atomic::{AtomicBool, AtomicU8, Ordering};

use critical_section::Mutex;

use crate::refresh::BaroRange;

/// Minimum TPS duty; the ECU rejects anything below this as out of range.
pub const MIN_TPS: u8 = 0x25;

/// Maximum TPS duty; the ECU rejects anything above this as out of range.
pub const MAX_TPS: u8 = 0xff - MIN_TPS;

/// Refresh periods during which edges on the run switch are ignored after a
/// genuine edge. At the refresh rate this is roughly a third of a second.
pub const DEBOUNCE_TICKS: u32 = 10_000;

/// Base refresh periods between VSS pulse edges; the vehicle-speed sample is
/// added on each divider reload.
pub const BASE_VSS_TICKS: u32 = 4;

/// Floor added to the rotation-speed sample when scaling the rotation timer,
/// so the compare interval can never collapse to zero.
pub const BASE_ROTATION_TICKS: u16 = 5;

/// Number of analog input channels in use.
pub const NUM_ADC: usize = 4;

/// Analog input channels, in conversion order.
#[derive(Debug, Eq, PartialEq, Clone, Copy)]
pub enum AdcChannel {
    /// Manifold pressure pot.
    Map,
    /// Rotation speed pot, scales the HEP timer.
    Hep,
    /// Vehicle speed pot, scales the VSS divider.
    Vss,
    /// Throttle position pot.
    Tps,
}

impl AdcChannel {
    /// Round-robin conversion order. The index-to-channel mapping is fixed;
    /// reordering it would silently relabel which pot drives which output.
    pub const ORDER: [AdcChannel; NUM_ADC] = [
        AdcChannel::Map,
        AdcChannel::Hep,
        AdcChannel::Vss,
        AdcChannel::Tps,
    ];

    /// Index of the channel in the sample table.
    pub const fn idx(&self) -> usize {
        match *self {
            AdcChannel::Map => 0,
            AdcChannel::Hep => 1,
            AdcChannel::Vss => 2,
            AdcChannel::Tps => 3,
        }
    }
}

/// The shared arena. One instance lives for the whole run; every handler gets
/// a reference to it.
pub struct Shared {
    /// Latest converted sample per channel. Written only by the sampler;
    /// readers tolerate a one-firing-stale value.
    samples: [AtomicU8; NUM_ADC],
    /// Set while the ECU holds the baro-read line.
    reading_baro: AtomicBool,
    /// Refresh periods left in the current debounce window.
    debounce: Mutex<Cell<u32>>,
    /// Refresh periods left until the next VSS pulse edge.
    vss_divider: Mutex<Cell<u32>>,
}

impl Shared {
    pub const fn new() -> Self {
        Shared {
            samples: [
                AtomicU8::new(BaroRange::ThreeBar.duty()),
                AtomicU8::new(0x00),
                AtomicU8::new(0x00),
                AtomicU8::new(MIN_TPS),
            ],
            reading_baro: AtomicBool::new(false),
            debounce: Mutex::new(Cell::new(0)),
            vss_divider: Mutex::new(Cell::new(BASE_VSS_TICKS)),
        }
    }

    /// Latest sample for the channel. Single-core target; `Relaxed` is enough
    /// to order against interrupt delivery.
    pub fn sample(&self, channel: AdcChannel) -> u8 {
        self.samples[channel.idx()].load(Ordering::Relaxed)
    }

    pub(crate) fn store_sample(&self, channel: AdcChannel, value: u8) {
        self.samples[channel.idx()].store(value, Ordering::Relaxed);
    }

    pub fn reading_baro(&self) -> bool {
        self.reading_baro.load(Ordering::Relaxed)
    }

    pub(crate) fn flip_baro(&self) {
        self.reading_baro.fetch_xor(true, Ordering::Relaxed);
    }

    /// Arms the debounce window if it is not already running. Returns whether
    /// the caller should treat the triggering edge as genuine.
    pub(crate) fn try_arm_debounce(&self) -> bool {
        critical_section::with(|cs| {
            let counter = self.debounce.borrow(cs);
            if counter.get() == 0 {
                counter.set(DEBOUNCE_TICKS);
                true
            } else {
                false
            }
        })
    }

    /// Burns one refresh period off the debounce window, if one is running.
    pub(crate) fn tick_debounce(&self) {
        critical_section::with(|cs| {
            let counter = self.debounce.borrow(cs);
            if counter.get() != 0 {
                counter.set(counter.get() - 1);
            }
        })
    }

    #[cfg(test)]
    pub(crate) fn debounce_left(&self) -> u32 {
        critical_section::with(|cs| self.debounce.borrow(cs).get())
    }

    /// Burns one refresh period off the VSS divider. On reaching zero the
    /// divider is reloaded and `true` is returned, meaning one pulse edge is
    /// due. The reload value must be non-zero.
    pub(crate) fn tick_vss_divider(&self, reload: u32) -> bool {
        critical_section::with(|cs| {
            let counter = self.vss_divider.borrow(cs);
            let left = counter.get();
            if left <= 1 {
                counter.set(reload);
                true
            } else {
                counter.set(left - 1);
                false
            }
        })
    }
}
