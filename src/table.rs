//! Rotation table for the two HEP pickup channels.
//!
//! Both pickups are driven from a single table of time deltas; which pickup
//! changes state at each step is given by the entry's channel. Only the
//! differences between successive edges are clocked. The deltas are based on
//! a total of [`ROTATION_TICKS`] per mechanical rotation and were computed
//! offline as (degrees of rotation for the edge / 360) * 1000.

/// Offset between the two pickups in ticks, as (degrees of offset / 360) * 1000.
/// Used to space the sync edges away from the reference edges.
pub const OFFSET: u16 = 20;

/// Ticks in one full rotation. The deltas in [`ROTATION`] sum to exactly this.
pub const ROTATION_TICKS: u16 = 1000;

/// HEP pickup channel selector.
#[derive(Debug, Eq, PartialEq, Clone, Copy)]
pub enum Channel {
    /// Reference pickup, runs behind the sync channel.
    Ref,
    /// Sync pickup.
    Sync,
}

impl Channel {
    /// Returns the pin-toggle mask for the channel.
    pub const fn mask(&self) -> u8 {
        match *self {
            Channel::Ref => 0x02,
            Channel::Sync => 0x08,
        }
    }
}

/// One edge of the rotation cycle: ticks to wait, and which pickup to toggle.
pub struct Entry {
    /// Ticks between the previous edge and this one, before speed scaling.
    pub delta: u16,
    /// Pickup that changes state at this edge.
    pub channel: Channel,
}

/// One full two-channel rotation cycle. Precomputed offline, never mutated.
pub static ROTATION: [Entry; 20] = [
    Entry { delta: OFFSET, channel: Channel::Ref },
    Entry { delta: 150 - OFFSET, channel: Channel::Sync },
    Entry { delta: OFFSET, channel: Channel::Ref },
    Entry { delta: 250 - (150 + OFFSET), channel: Channel::Sync },
    Entry { delta: OFFSET, channel: Channel::Ref },
    Entry { delta: 400 - (250 + OFFSET), channel: Channel::Sync },
    Entry { delta: OFFSET, channel: Channel::Ref },
    Entry { delta: 29, channel: Channel::Ref },
    Entry { delta: 42, channel: Channel::Ref },
    Entry { delta: 29 - OFFSET, channel: Channel::Sync },
    Entry { delta: OFFSET, channel: Channel::Ref },
    Entry { delta: 650 - (500 + OFFSET), channel: Channel::Sync },
    Entry { delta: OFFSET, channel: Channel::Ref },
    Entry { delta: 750 - (650 + OFFSET), channel: Channel::Sync },
    Entry { delta: OFFSET, channel: Channel::Ref },
    Entry { delta: 900 - (750 + OFFSET), channel: Channel::Sync },
    Entry { delta: OFFSET, channel: Channel::Ref },
    Entry { delta: 29 - OFFSET, channel: Channel::Sync },
    Entry { delta: 42, channel: Channel::Sync },
    Entry { delta: 29, channel: Channel::Sync },
];

/// Cyclic index into [`ROTATION`]. Wraps at the table length, so it can never
/// run off the end of the table.
#[derive(Debug, Eq, PartialEq, Clone, Copy)]
pub struct Position(u8);

impl Position {
    /// Position at the start of the rotation.
    pub const fn start() -> Self {
        Position(0)
    }

    /// Current index into the table.
    pub fn index(&self) -> usize {
        self.0 as usize
    }

    /// Table entry at the current position.
    pub fn entry(&self) -> &'static Entry {
        &ROTATION[self.0 as usize]
    }

    /// Moves to the next edge, wrapping back to the start of the rotation.
    pub fn advance(&mut self) {
        self.0 += 1;
        if self.0 as usize >= ROTATION.len() {
            self.0 = 0;
        }
    }
}
