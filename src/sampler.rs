//! Round-robin analog sampling.
//!
//! Each completed conversion stores its result and immediately starts the
//! next channel's conversion, so the loop is free-running once the platform
//! kicks off the first conversion.

use crate::bench::Bench;
use crate::state::{AdcChannel, Shared};

/// Owns the rotating channel index; nothing else reads or writes it.
pub struct Sampler {
    current: usize,
}

impl Sampler {
    pub const fn new() -> Self {
        Sampler { current: 0 }
    }

    /// One completed conversion: store the 8-bit result for the channel that
    /// was converting, move to the next channel, reprogram the multiplexer
    /// and request the next conversion.
    pub fn fire(&mut self, sample: u8, shared: &Shared, bench: &mut impl Bench) {
        shared.store_sample(AdcChannel::ORDER[self.current], sample);
        self.current += 1;
        if self.current >= AdcChannel::ORDER.len() {
            self.current = 0;
        }
        bench.select_adc_input(AdcChannel::ORDER[self.current]);
        bench.start_conversion();
    }
}
