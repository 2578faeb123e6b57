//! Initial configuration applied by [`Ad9250::setup`](crate::Ad9250::setup).
//!
//! Defaults match the reference FMC board bring-up: duty-cycle stabilizer on,
//! full-scale adjust 31, two lanes in subclass 1 with K = 32 and scrambling,
//! fast detect disabled.

/// Complete setup parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub platform: PlatformConfig,
    pub jesd204b: Jesd204bConfig,
    pub fast_detect: FastDetectConfig,
}

impl Config {
    /// Returns true if every field lies in its documented range.
    ///
    /// Setup refuses an invalid configuration before touching the bus.
    pub fn is_valid(&self) -> bool {
        self.platform.is_valid() && self.jesd204b.is_valid()
    }
}

/// Clocking, reference and power-down pin options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformConfig {
    /// PDWN pin selects standby instead of full power-down.
    pub extern_pdwn_standby: bool,
    /// Enable the clock duty-cycle stabilizer.
    pub clock_duty_cycle_stabilizer: bool,
    /// Input clock selection, 0..=3.
    pub clock_selection: u8,
    /// Input clock divide ratio minus one, 0..=7.
    pub clock_div_ratio: u8,
    /// Input clock divider phase adjust, 0..=7.
    pub clock_div_phase: u8,
    /// Full-scale voltage reference adjust, 0..=31.
    pub vref_adjust: u8,
    /// PLL low encode rate mode, 0..=3.
    pub pll_low_encode: u8,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            extern_pdwn_standby: false,
            clock_duty_cycle_stabilizer: true,
            clock_selection: 0,
            clock_div_ratio: 0,
            clock_div_phase: 0,
            vref_adjust: 31,
            pll_low_encode: 0,
        }
    }
}

impl PlatformConfig {
    pub fn is_valid(&self) -> bool {
        self.clock_selection <= 3
            && self.clock_div_ratio <= 7
            && self.clock_div_phase <= 7
            && self.vref_adjust <= 31
            && self.pll_low_encode <= 3
    }
}

/// JESD204B link layer options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Jesd204bConfig {
    /// Keep the link transmitter powered while the chip is in standby.
    pub jtx_in_standby: bool,
    /// CML differential output drive level, 0..=7.
    pub cml_level: u8,
    /// Quick configuration option (L/M combination).
    pub quick_cfg_option: u8,
    /// JESD204B subclass, 0..=2.
    pub subclass: u8,
    /// Number of control bits (CS), 0..=3.
    pub ctrl_bits_no: u8,
    /// Control bit assignment, 0..=7.
    pub ctrl_bits_assign: u8,
    /// Fill unused tail bits with a PN sequence instead of zeros.
    pub tail_bits_mode: bool,
    /// Device identification.
    pub did: u8,
    /// Bank identification.
    pub bid: u8,
    /// Lane 0 identification.
    pub lid0: u8,
    /// Lane 1 identification.
    pub lid1: u8,
    /// Frames per multiframe, 0..=32, rounded to a multiple of 4.
    pub k: u8,
    pub scrambling: bool,
    /// Initial lane alignment sequence mode, 0..=3.
    pub ilas_mode: u8,
    pub en_ilas_test: bool,
    pub invert_logic_bits: bool,
    pub en_sys_ref: bool,
    pub en_sync_in_b: bool,
    pub sys_ref_mode: bool,
    pub align_sync_in_b: bool,
    pub align_sys_ref: bool,
    /// Converter assigned to lane 0, 0..=3.
    pub lane0_assign: u8,
    /// Converter assigned to lane 1, 0..=3.
    pub lane1_assign: u8,
}

impl Default for Jesd204bConfig {
    fn default() -> Self {
        Self {
            jtx_in_standby: false,
            cml_level: 3,
            quick_cfg_option: 0x22,
            subclass: 1,
            ctrl_bits_no: 0,
            ctrl_bits_assign: 0,
            tail_bits_mode: false,
            did: 0xF0,
            bid: 0x00,
            lid0: 0x00,
            lid1: 0x01,
            k: 32,
            scrambling: true,
            ilas_mode: 1,
            en_ilas_test: false,
            invert_logic_bits: false,
            en_sys_ref: false,
            en_sync_in_b: true,
            sys_ref_mode: false,
            align_sync_in_b: true,
            align_sys_ref: false,
            lane0_assign: 0,
            lane1_assign: 1,
        }
    }
}

impl Jesd204bConfig {
    pub fn is_valid(&self) -> bool {
        self.cml_level <= 7
            && self.subclass <= 2
            && self.ctrl_bits_no <= 3
            && self.ctrl_bits_assign <= 7
            && self.k <= 32
            && self.ilas_mode <= 3
            && self.lane0_assign <= 3
            && self.lane1_assign <= 3
    }
}

/// Fast-detect (overrange) options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FastDetectConfig {
    pub enable: bool,
    /// FD pins report fast detect instead of overrange.
    pub pin_function: bool,
    pub force_pins: bool,
    pub pin_force_value: bool,
    pub upper_threshold: u16,
    pub lower_threshold: u16,
    pub dwell_time: u16,
}
