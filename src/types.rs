use crate::regs;

/// Number of status reads a polling loop performs before giving up.
pub const POLL_BUDGET: u16 = 0xFFFF;

/// Result of a fixed-budget polling loop.
///
/// A timeout is not an error: the device is left in whatever state it
/// reached, and the caller decides whether that matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// The self-clearing bit cleared after `polls` status reads.
    Completed { polls: u16 },
    /// The budget ran out with the bit still set.
    TimedOut,
}

impl PollOutcome {
    /// Returns true if the device cleared the bit.
    #[inline]
    pub fn is_completed(&self) -> bool {
        matches!(self, PollOutcome::Completed { .. })
    }
}

/// Power state of the chip or of the JESD204B transmit block.
///
/// `Reserved` is what the chip reports for the unused field encoding; it is
/// never accepted by a setter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum PowerMode {
    Normal = 0,
    PowerDown = 1,
    Standby = 2,
    Reserved = 3,
}

impl PowerMode {
    pub(crate) fn from_bits(bits: u32) -> Self {
        match bits & 0x3 {
            0 => PowerMode::Normal,
            1 => PowerMode::PowerDown,
            2 => PowerMode::Standby,
            _ => PowerMode::Reserved,
        }
    }
}

/// ADC channel(s) targeted by subsequent per-channel register writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Channel {
    A = 1,
    B = 2,
    Both = 3,
}

impl Channel {
    pub(crate) fn from_bits(bits: u32) -> Option<Self> {
        match bits & (regs::CH_INDEX_ADC_A | regs::CH_INDEX_ADC_B) {
            1 => Some(Channel::A),
            2 => Some(Channel::B),
            3 => Some(Channel::Both),
            _ => None,
        }
    }
}

/// Encoding of output samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum OutputFormat {
    OffsetBinary = 0,
    TwosComplement = 1,
}

impl OutputFormat {
    pub(crate) fn from_bits(bits: u32) -> Self {
        if bits & 0x1 == 0 {
            OutputFormat::OffsetBinary
        } else {
            OutputFormat::TwosComplement
        }
    }
}

/// Point in a lane's processing path where JESD204B test data is inserted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum InjectionPoint {
    /// 10-bit data at the 8B/10B encoder output.
    EncoderOutput = 1,
    /// 8-bit data at the scrambler input.
    ScramblerInput = 2,
}

impl InjectionPoint {
    pub(crate) fn from_bits(bits: u32) -> Option<Self> {
        match bits {
            1 => Some(InjectionPoint::EncoderOutput),
            2 => Some(InjectionPoint::ScramblerInput),
            _ => None,
        }
    }
}
