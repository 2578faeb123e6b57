//! AD9250 register map and bit fields.
//!
//! Field helpers taking an argument mask it to the field width and shift it
//! into position; passing `!0` yields the field mask.

use crate::register::Register;

// Chip configuration
pub const SPI_CFG: Register = Register::new(0x00, 1);
pub const CHIP_ID: Register = Register::new(0x01, 1);
pub const CHIP_INFO: Register = Register::new(0x02, 1);

// Channel index and transfer
pub const CH_INDEX: Register = Register::new(0x05, 1);
pub const DEVICE_UPDATE: Register = Register::new(0xFF, 1);

// ADC functions
pub const PDWN: Register = Register::new(0x08, 1);
pub const CLOCK: Register = Register::shadowed(0x09, 1, 1);
pub const PLL_STAT: Register = Register::new(0x0A, 1);
pub const CLOCK_DIV: Register = Register::shadowed(0x0B, 1, 2);
pub const TEST: Register = Register::shadowed(0x0D, 1, 3);
pub const BIST: Register = Register::shadowed(0x0E, 1, 4);
pub const OFFSET: Register = Register::shadowed(0x10, 1, 5);
pub const OUT_MODE: Register = Register::shadowed(0x14, 1, 6);
pub const CML: Register = Register::new(0x15, 1);
pub const VREF: Register = Register::shadowed(0x18, 1, 7);
pub const USER_TEST1: Register = Register::new(0x1A, 2);
pub const USER_TEST2: Register = Register::new(0x1C, 2);
pub const USER_TEST3: Register = Register::new(0x1E, 2);
pub const USER_TEST4: Register = Register::new(0x20, 2);
pub const PLL_ENCODE: Register = Register::new(0x21, 1);
pub const BIST_MISR: Register = Register::new(0x25, 2);
pub const SYS_CTRL: Register = Register::shadowed(0x3A, 1, 8);
pub const DCC_CTRL: Register = Register::shadowed(0x40, 1, 9);
pub const DCC_VAL: Register = Register::shadowed(0x42, 2, 10);
pub const FAST_DETECT: Register = Register::shadowed(0x45, 1, 11);
pub const FD_UPPER_THD: Register = Register::shadowed(0x48, 2, 12);
pub const FD_LOWER_THD: Register = Register::shadowed(0x4A, 2, 13);
pub const FD_DWELL_TIME: Register = Register::shadowed(0x4C, 2, 14);

// JESD204B link
pub const JESD_QUICK_CFG: Register = Register::new(0x5E, 1);
pub const JESD_CTRL1: Register = Register::new(0x5F, 1);
pub const JESD_CTRL2: Register = Register::new(0x60, 1);
pub const JESD_CTRL3: Register = Register::new(0x61, 1);
pub const JESD_DID_CFG: Register = Register::new(0x64, 1);
pub const JESD_BID_CFG: Register = Register::new(0x65, 1);
pub const JESD_LID_CFG0: Register = Register::new(0x67, 1);
pub const JESD_LID_CFG1: Register = Register::new(0x68, 1);
pub const JESD_PARAM_SCR_L: Register = Register::new(0x6E, 1);
pub const JESD_PARAM_F: Register = Register::new(0x6F, 1);
pub const JESD_PARAM_K: Register = Register::new(0x70, 1);
pub const JESD_PARAM_M: Register = Register::new(0x71, 1);
pub const JESD_PARAM_CS_N: Register = Register::new(0x72, 1);
pub const JESD_PARAM_NP: Register = Register::new(0x73, 1);
pub const JESD_PARAM_S: Register = Register::new(0x74, 1);
pub const JESD_PARAM_HD_CF: Register = Register::new(0x75, 1);
pub const JESD_LANE_ASSGN1: Register = Register::new(0x82, 1);
pub const JESD_LANE_ASSGN2: Register = Register::new(0x83, 1);
pub const JESD_LMFC_OFFSET: Register = Register::new(0x8B, 1);
pub const JESD_PRE_EMPHASIS: Register = Register::new(0xA8, 1);

/// All shadowed registers, ordered by shadow index.
pub const SHADOWED: [Register; 14] = [
    CLOCK,
    CLOCK_DIV,
    TEST,
    BIST,
    OFFSET,
    OUT_MODE,
    VREF,
    SYS_CTRL,
    DCC_CTRL,
    DCC_VAL,
    FAST_DETECT,
    FD_UPPER_THD,
    FD_LOWER_THD,
    FD_DWELL_TIME,
];

// SPI_CFG
pub const SPI_CFG_LSB_FIRST: u32 = (1 << 6) | (1 << 1);
pub const SPI_CFG_SOFT_RST: u32 = (1 << 5) | (1 << 2);

// CHIP_ID
pub const CHIP_ID_AD9250: u8 = 0xB9;

// CH_INDEX
pub const CH_INDEX_ADC_A: u32 = 1 << 0;
pub const CH_INDEX_ADC_B: u32 = 1 << 1;

// DEVICE_UPDATE
pub const DEVICE_UPDATE_SW: u32 = 1 << 0;

// PDWN
pub const PDWN_EXTERN: u32 = 1 << 5;
pub const PDWN_JTX: u32 = 1 << 4;
pub const fn pdwn_jesd204b(x: u32) -> u32 {
    (x & 0x3) << 2
}
pub const fn pdwn_chip(x: u32) -> u32 {
    x & 0x3
}

// CLOCK
pub const fn clock_selection(x: u32) -> u32 {
    (x & 0x3) << 4
}
pub const CLOCK_DUTY_CYCLE: u32 = 1 << 0;

// PLL_STAT
pub const PLL_STAT_LOCKED: u32 = 1 << 7;
pub const PLL_STAT_LINK_RDY: u32 = 1 << 0;

// CLOCK_DIV
pub const fn clock_div_phase(x: u32) -> u32 {
    (x & 0x7) << 3
}
pub const fn clock_div_ratio(x: u32) -> u32 {
    x & 0x7
}

// TEST
pub const fn test_user_test_mode(x: u32) -> u32 {
    (x & 0x3) << 6
}
pub const TEST_RST_PN_LONG: u32 = 1 << 5;
pub const TEST_RST_PN_SHORT: u32 = 1 << 4;
pub const fn test_output_test(x: u32) -> u32 {
    x & 0xF
}

// BIST
pub const BIST_RESET: u32 = 1 << 2;
pub const BIST_ENABLE: u32 = 1 << 0;

// OFFSET
pub const fn offset_adjust(x: u32) -> u32 {
    x & 0x3F
}

// OUT_MODE
pub const fn out_mode_jtx_bit_assign(x: u32) -> u32 {
    (x & 0x7) << 5
}
pub const OUT_MODE_DISABLE: u32 = 1 << 4;
pub const OUT_MODE_INVERT_DATA: u32 = 1 << 3;
pub const fn out_mode_data_format(x: u32) -> u32 {
    x & 0x1
}

// CML
pub const fn cml_diff_out_level(x: u32) -> u32 {
    x & 0x7
}

// VREF
pub const fn vref_fs_adjust(x: u32) -> u32 {
    x & 0x1F
}

// PLL_ENCODE
pub const fn pll_encode(x: u32) -> u32 {
    (x & 0x3) << 3
}

// SYS_CTRL
pub const SYS_CTRL_REALIGN_ON_SYNCINB: u32 = 1 << 4;
pub const SYS_CTRL_REALIGN_ON_SYSREF: u32 = 1 << 3;
pub const SYS_CTRL_SYSREF_MODE: u32 = 1 << 2;
pub const SYS_CTRL_SYSREF_EN: u32 = 1 << 1;
pub const SYS_CTRL_SYNCINB_EN: u32 = 1 << 0;

// DCC_CTRL
pub const DCC_CTRL_FREEZE_DCC: u32 = 1 << 6;
pub const fn dcc_ctrl_dcc_bw(x: u32) -> u32 {
    (x & 0xF) << 2
}
pub const DCC_CTRL_DCC_EN: u32 = 1 << 1;

// FAST_DETECT
pub const FAST_DETECT_PIN_FCT: u32 = 1 << 4;
pub const FAST_DETECT_FORCE_FDA_FDB_PIN: u32 = 1 << 3;
pub const FAST_DETECT_FORCE_FDA_FDB_VAL: u32 = 1 << 2;
pub const FAST_DETECT_OUTPUT_ENABLE: u32 = 1 << 0;

// JESD_QUICK_CFG
pub const fn jesd_quick_cfg(x: u32) -> u32 {
    x & 0xFF
}

// JESD_CTRL1
pub const JESD_CTRL1_TAIL_BITS: u32 = 1 << 6;
pub const JESD_CTRL1_TEST_SAMPLE_EN: u32 = 1 << 5;
pub const fn jesd_ctrl1_ilas_mode(x: u32) -> u32 {
    (x & 0x3) << 2
}
pub const JESD_CTRL1_POWER_DOWN: u32 = 1 << 0;

// JESD_CTRL2
pub const JESD_CTRL2_INVERT_JESD_BITS: u32 = 1 << 1;

// JESD_CTRL3
pub const fn jesd_ctrl3_test_data_inj_pt(x: u32) -> u32 {
    (x & 0x3) << 4
}
pub const fn jesd_ctrl3_jesd_test_mode(x: u32) -> u32 {
    x & 0xF
}

// JESD_PARAM_SCR_L
pub const JESD_PARAM_SCR_L_SCRAMBLING: u32 = 1 << 7;
pub const JESD_PARAM_SCR_L_LANES: u32 = 1 << 0;

// JESD_PARAM_CS_N
pub const fn jesd_param_cs_n_nr_ctrl_bits(x: u32) -> u32 {
    (x & 0x3) << 6
}
pub const fn jesd_param_cs_n_adc_resolution(x: u32) -> u32 {
    x & 0xF
}

// JESD_PARAM_NP
pub const fn jesd_param_np_subclass(x: u32) -> u32 {
    (x & 0x3) << 5
}
pub const fn jesd_param_np_n_hat(x: u32) -> u32 {
    x & 0xF
}

// JESD_LANE_ASSGN1/2
pub const fn jesd_lane_assgn1(x: u32) -> u32 {
    (x & 0x3) << 4
}
pub const fn jesd_lane_assgn2(x: u32) -> u32 {
    x & 0x3
}
