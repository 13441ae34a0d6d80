//! 8-bit flag register with change reporting
//!
//! The register itself is pure bit storage; the controller that owns the
//! physical outputs watches the returned change reports and refreshes the
//! indicator pins whenever the byte actually changed.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of addressable bits in the register
pub const FLAG_BITS: u8 = 8;

/// Named flags used by the firmware
///
/// Bits 3..=7 are unassigned but still addressable through the raw
/// bit-index operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Flag {
    /// Operational state: debounced motion presence. Written only by the
    /// motion machine (via the controller); everyone else reads it.
    MotionDetected = 0,
    /// Admin override: motion input is ignored and the motion indicator
    /// blinks instead of tracking state.
    MotionSensorDisabled = 1,
    /// Independent admin toggle driving the auxiliary indicator output.
    AuxIndicator = 2,
}

impl Flag {
    /// Bit index of this flag within the register byte
    pub const fn bit(self) -> u8 {
        self as u8
    }
}

/// One byte of boolean flags, zero-initialized ("all powered off")
///
/// Bit indices outside `0..FLAG_BITS` are rejected silently: the operation
/// is a no-op and reports `false`. The device has no recovery path beyond
/// continuing to run, so an invalid index never raises a fault.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FlagRegister {
    bits: u8,
}

impl FlagRegister {
    /// Create a cleared register
    pub const fn new() -> Self {
        Self { bits: 0 }
    }

    /// Raw register byte
    pub const fn raw(&self) -> u8 {
        self.bits
    }

    /// Read one bit; out-of-range indices read as `false`
    pub fn get(&self, bit: u8) -> bool {
        if bit >= FLAG_BITS {
            return false;
        }
        self.bits & (1 << bit) != 0
    }

    /// Set one bit
    ///
    /// Returns `true` iff the byte actually changed (bit was clear and is
    /// in range).
    pub fn set(&mut self, bit: u8) -> bool {
        if bit >= FLAG_BITS {
            return false;
        }
        let prev = self.bits;
        self.bits |= 1 << bit;
        self.bits != prev
    }

    /// Clear one bit
    ///
    /// Returns `true` iff the byte actually changed.
    pub fn clear(&mut self, bit: u8) -> bool {
        if bit >= FLAG_BITS {
            return false;
        }
        let prev = self.bits;
        self.bits &= !(1 << bit);
        self.bits != prev
    }

    /// Flip one bit unconditionally
    ///
    /// Unlike [`set`](Self::set)/[`clear`](Self::clear) this always reports
    /// success for a valid index; a flip always changes the byte, and the
    /// caller must always refresh outputs afterwards.
    pub fn toggle(&mut self, bit: u8) -> bool {
        if bit >= FLAG_BITS {
            return false;
        }
        self.bits ^= 1 << bit;
        true
    }

    /// Replace the whole register byte
    ///
    /// Returns `true` iff the value differs from the old one.
    pub fn replace_all(&mut self, bits: u8) -> bool {
        if self.bits == bits {
            return false;
        }
        self.bits = bits;
        true
    }

    /// Read a named flag
    pub fn is_set(&self, flag: Flag) -> bool {
        self.get(flag.bit())
    }

    /// Set a named flag; `true` iff the byte changed
    pub fn set_flag(&mut self, flag: Flag) -> bool {
        self.set(flag.bit())
    }

    /// Clear a named flag; `true` iff the byte changed
    pub fn clear_flag(&mut self, flag: Flag) -> bool {
        self.clear(flag.bit())
    }

    /// Flip a named flag; always `true`
    pub fn toggle_flag(&mut self, flag: Flag) -> bool {
        self.toggle(flag.bit())
    }
}
