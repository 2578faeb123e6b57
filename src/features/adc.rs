use embedded_hal::spi::SpiDevice;

use super::macros::{impl_field, impl_flag};
use crate::{
    Ad9250,
    error::Error,
    regs,
    types::{Channel, OutputFormat, PowerMode},
};

impl<SPI: SpiDevice> Ad9250<SPI> {
    /// Chip power mode.
    pub fn chip_power_mode(&mut self) -> Result<PowerMode, Error<SPI::Error>> {
        let bits = self.read(regs::PDWN)? & regs::pdwn_chip(!0);
        Ok(PowerMode::from_bits(bits))
    }

    pub fn set_chip_power_mode(&mut self, mode: PowerMode) -> Result<(), Error<SPI::Error>> {
        if mode == PowerMode::Reserved {
            return Err(Error::InvalidArgument);
        }
        self.set_bits(
            regs::PDWN,
            regs::pdwn_chip(mode as u32),
            regs::pdwn_chip(!0),
        )
    }

    /// Channel(s) that per-channel writes currently apply to, if any.
    pub fn selected_channel(&mut self) -> Result<Option<Channel>, Error<SPI::Error>> {
        Ok(Channel::from_bits(self.read(regs::CH_INDEX)?))
    }

    pub fn select_channel(&mut self, channel: Channel) -> Result<(), Error<SPI::Error>> {
        self.write(regs::CH_INDEX, channel as u32)
    }

    impl_field!(
        /// ADC test mode: 0 off, 1 midscale short, 2 +FS short, 3 -FS short,
        /// 4 checkerboard, 5 PN long, 6 PN 9 short, 7 one/zero toggle,
        /// 8 user test mode, 15 ramp. 9 to 14 are unused but accepted.
        test_mode: u8,
        regs::TEST,
        regs::test_output_test,
        0,
        0..=15
    );

    /// Offset adjustment in LSBs.
    pub fn offset_adjust(&mut self) -> Result<i8, Error<SPI::Error>> {
        let raw = (self.read(regs::OFFSET)? & regs::offset_adjust(!0)) as u8;
        // Sign-extend the 6-bit field
        Ok(((raw << 2) as i8) >> 2)
    }

    /// Sets the offset adjustment, -32..=31 LSBs.
    ///
    /// Shadowed: takes effect after a sync.
    pub fn set_offset_adjust(&mut self, adj: i8) -> Result<(), Error<SPI::Error>> {
        if !(-32..=31).contains(&adj) {
            return Err(Error::InvalidArgument);
        }
        self.write(regs::OFFSET, regs::offset_adjust(adj as u32))
    }

    impl_flag!(
        /// Data output disabled. Shadowed.
        output_disabled,
        regs::OUT_MODE,
        regs::OUT_MODE_DISABLE
    );

    impl_flag!(
        /// Output data inverted. Shadowed.
        output_inverted,
        regs::OUT_MODE,
        regs::OUT_MODE_INVERT_DATA
    );

    pub fn output_format(&mut self) -> Result<OutputFormat, Error<SPI::Error>> {
        Ok(OutputFormat::from_bits(self.read(regs::OUT_MODE)?))
    }

    /// Selects the output sample encoding. Shadowed.
    pub fn set_output_format(&mut self, format: OutputFormat) -> Result<(), Error<SPI::Error>> {
        self.set_bits(
            regs::OUT_MODE,
            regs::out_mode_data_format(format as u32),
            regs::out_mode_data_format(!0),
        )
    }

    impl_flag!(
        /// Short PN sequence (PN9) held in reset.
        pn9_reset,
        regs::TEST,
        regs::TEST_RST_PN_SHORT
    );

    impl_flag!(
        /// Long PN sequence (PN23) held in reset.
        pn23_reset,
        regs::TEST,
        regs::TEST_RST_PN_LONG
    );

    /// User test pattern `pattern_no`, 1..=4.
    pub fn user_pattern(&mut self, pattern_no: u8) -> Result<u16, Error<SPI::Error>> {
        let reg = user_test_register(pattern_no).ok_or(Error::InvalidArgument)?;
        Ok(self.read(reg)? as u16)
    }

    pub fn set_user_pattern(
        &mut self,
        pattern_no: u8,
        pattern: u16,
    ) -> Result<(), Error<SPI::Error>> {
        let reg = user_test_register(pattern_no).ok_or(Error::InvalidArgument)?;
        self.write(reg, pattern.into())
    }

    impl_flag!(
        /// Built-in self-test enabled.
        bist_enabled,
        regs::BIST,
        regs::BIST_ENABLE
    );

    impl_flag!(
        /// Built-in self-test held in reset.
        bist_reset,
        regs::BIST,
        regs::BIST_RESET
    );

    pub fn chip_id(&mut self) -> Result<u8, Error<SPI::Error>> {
        Ok(self.read(regs::CHIP_ID)? as u8)
    }

    pub fn pll_locked(&mut self) -> Result<bool, Error<SPI::Error>> {
        Ok(self.read(regs::PLL_STAT)? & regs::PLL_STAT_LOCKED != 0)
    }

    /// JESD204B link ready.
    pub fn link_ready(&mut self) -> Result<bool, Error<SPI::Error>> {
        Ok(self.read(regs::PLL_STAT)? & regs::PLL_STAT_LINK_RDY != 0)
    }
}

fn user_test_register(pattern_no: u8) -> Option<crate::Register> {
    match pattern_no {
        1 => Some(regs::USER_TEST1),
        2 => Some(regs::USER_TEST2),
        3 => Some(regs::USER_TEST3),
        4 => Some(regs::USER_TEST4),
        _ => None,
    }
}
