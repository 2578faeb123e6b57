use embedded_hal::spi::SpiDevice;

use super::macros::{impl_field, impl_flag};
use crate::{Ad9250, error::Error, regs};

// DC correction. All of it lives in shadowed registers.
impl<SPI: SpiDevice> Ad9250<SPI> {
    impl_flag!(
        /// DC correction applied to the output data path.
        dcc_enabled,
        regs::DCC_CTRL,
        regs::DCC_CTRL_DCC_EN
    );

    impl_field!(
        /// DC correction bandwidth: 0 is 1215.8 kHz, each step halves it,
        /// 13 is 0.15 kHz.
        dcc_bandwidth: u8,
        regs::DCC_CTRL,
        regs::dcc_ctrl_dcc_bw,
        2,
        0..=13
    );

    impl_flag!(
        /// Correction value held at its current level.
        dcc_frozen,
        regs::DCC_CTRL,
        regs::DCC_CTRL_FREEZE_DCC
    );

    /// Correction value currently applied by the chip.
    pub fn dcc_value(&mut self) -> Result<u16, Error<SPI::Error>> {
        Ok(self.read(regs::DCC_VAL)? as u16)
    }
}
