//! Power-on-reset values of the shadowed registers.

/// Number of shadow table slots, including the unused slot 0.
pub const SHADOW_REGISTER_COUNT: usize = 15;

/// Power-on-reset contents of the shadow table, indexed by shadow index.
///
/// Copied into every handle on creation; never written.
pub static SHADOW_DEFAULTS: [u32; SHADOW_REGISTER_COUNT] = [
    0x00, // unused
    0x01, // CLOCK
    0x00, // CLOCK_DIV
    0x00, // TEST
    0x00, // BIST
    0x00, // OFFSET
    0x01, // OUT_MODE
    0x00, // VREF
    0x00, // SYS_CTRL
    0x00, // DCC_CTRL
    0x00, // DCC_VAL
    0x00, // FAST_DETECT
    0x00, // FD_UPPER_THD
    0x00, // FD_LOWER_THD
    0x00, // FD_DWELL_TIME
];
