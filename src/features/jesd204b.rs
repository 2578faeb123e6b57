use embedded_hal::spi::SpiDevice;

use super::macros::{impl_field, impl_flag};
use crate::{
    Ad9250,
    config::Jesd204bConfig,
    error::Error,
    helpers::round_frames,
    regs,
    types::{InjectionPoint, PowerMode},
};

// Reserved bits the lane assignment registers must be written with
const LANE_ASSGN1_RESERVED: u32 = 0x02;
const LANE_ASSGN2_RESERVED: u32 = 0x30;

#[inline]
const fn bit(on: bool, mask: u32) -> u32 {
    if on { mask } else { 0 }
}

impl<SPI: SpiDevice> Ad9250<SPI> {
    /// Configures the JESD204B link from `cfg`.
    ///
    /// The lanes are powered down for the duration and re-enabled at the end.
    /// `OUT_MODE` and `SYS_CTRL` are shadowed, so each is followed by a sync
    /// before the steps that depend on it.
    ///
    /// # Errors
    /// [`Error::InvalidArgument`] without any bus traffic if a `cfg` field is
    /// out of range.
    pub fn jesd204b_setup(&mut self, cfg: &Jesd204bConfig) -> Result<(), Error<SPI::Error>> {
        if !cfg.is_valid() {
            return Err(Error::InvalidArgument);
        }

        self.set_bits(
            regs::JESD_CTRL1,
            regs::JESD_CTRL1_POWER_DOWN,
            regs::JESD_CTRL1_POWER_DOWN,
        )?;
        self.write(
            regs::JESD_QUICK_CFG,
            regs::jesd_quick_cfg(cfg.quick_cfg_option.into()),
        )?;
        self.write(regs::CML, regs::cml_diff_out_level(cfg.cml_level.into()))?;
        self.set_bits(
            regs::PDWN,
            bit(cfg.jtx_in_standby, regs::PDWN_JTX),
            regs::PDWN_JTX,
        )?;

        self.set_bits(
            regs::JESD_PARAM_NP,
            regs::jesd_param_np_subclass(cfg.subclass.into()),
            regs::jesd_param_np_subclass(!0),
        )?;
        self.set_bits(
            regs::JESD_PARAM_CS_N,
            regs::jesd_param_cs_n_nr_ctrl_bits(cfg.ctrl_bits_no.into()),
            regs::jesd_param_cs_n_nr_ctrl_bits(!0),
        )?;
        self.set_bits(
            regs::OUT_MODE,
            regs::out_mode_jtx_bit_assign(cfg.ctrl_bits_assign.into()),
            regs::out_mode_jtx_bit_assign(!0),
        )?;
        self.sync()?;

        // Tail bits only exist when no control bits are sent
        if cfg.ctrl_bits_no == 0 {
            self.set_bits(
                regs::JESD_CTRL1,
                bit(cfg.tail_bits_mode, regs::JESD_CTRL1_TAIL_BITS),
                regs::JESD_CTRL1_TAIL_BITS,
            )?;
        }

        self.write(regs::JESD_DID_CFG, cfg.did.into())?;
        self.write(regs::JESD_BID_CFG, cfg.bid.into())?;
        self.write(regs::JESD_LID_CFG0, cfg.lid0.into())?;
        self.write(regs::JESD_LID_CFG1, cfg.lid1.into())?;

        let k = self.set_jesd204b_frames(cfg.k)?;
        log::debug!("ad9250: K = {k} frames per multiframe");

        self.set_bits(
            regs::JESD_PARAM_SCR_L,
            bit(cfg.scrambling, regs::JESD_PARAM_SCR_L_SCRAMBLING),
            regs::JESD_PARAM_SCR_L_SCRAMBLING,
        )?;
        self.set_bits(
            regs::JESD_CTRL1,
            regs::jesd_ctrl1_ilas_mode(cfg.ilas_mode.into()),
            regs::jesd_ctrl1_ilas_mode(!0),
        )?;
        self.set_bits(
            regs::JESD_CTRL1,
            bit(cfg.en_ilas_test, regs::JESD_CTRL1_TEST_SAMPLE_EN),
            regs::JESD_CTRL1_TEST_SAMPLE_EN,
        )?;
        self.set_jesd204b_inverted(cfg.invert_logic_bits)?;

        self.write(
            regs::SYS_CTRL,
            bit(cfg.en_sync_in_b, regs::SYS_CTRL_SYNCINB_EN)
                | bit(cfg.en_sys_ref, regs::SYS_CTRL_SYSREF_EN)
                | bit(cfg.sys_ref_mode, regs::SYS_CTRL_SYSREF_MODE)
                | bit(cfg.align_sys_ref, regs::SYS_CTRL_REALIGN_ON_SYSREF)
                | bit(cfg.align_sync_in_b, regs::SYS_CTRL_REALIGN_ON_SYNCINB),
        )?;
        self.sync()?;

        self.write(
            regs::JESD_LANE_ASSGN1,
            regs::jesd_lane_assgn1(cfg.lane0_assign.into()) | LANE_ASSGN1_RESERVED,
        )?;
        self.write(
            regs::JESD_LANE_ASSGN2,
            regs::jesd_lane_assgn2(cfg.lane1_assign.into()) | LANE_ASSGN2_RESERVED,
        )?;

        self.set_bits(regs::JESD_CTRL1, 0, regs::JESD_CTRL1_POWER_DOWN)
    }

    /// Power mode of the JESD204B transmit block.
    pub fn jesd204b_power_mode(&mut self) -> Result<PowerMode, Error<SPI::Error>> {
        let bits = (self.read(regs::PDWN)? & regs::pdwn_jesd204b(!0)) >> 2;
        Ok(PowerMode::from_bits(bits))
    }

    pub fn set_jesd204b_power_mode(&mut self, mode: PowerMode) -> Result<(), Error<SPI::Error>> {
        if mode == PowerMode::Reserved {
            return Err(Error::InvalidArgument);
        }
        self.set_bits(
            regs::PDWN,
            regs::pdwn_jesd204b(mode as u32),
            regs::pdwn_jesd204b(!0),
        )
    }

    /// Sets K, the number of frames per multiframe.
    ///
    /// `k` must be in `0..=32` and is rounded to a multiple of four, never
    /// below four. Returns the value actually programmed.
    pub fn set_jesd204b_frames(&mut self, k: u8) -> Result<u8, Error<SPI::Error>> {
        if k > 32 {
            return Err(Error::InvalidArgument);
        }
        let k = round_frames(k);
        self.write(regs::JESD_PARAM_K, (k - 1).into())?;
        Ok(k)
    }

    /// Frames per multiframe currently programmed.
    pub fn jesd204b_frames(&mut self) -> Result<u8, Error<SPI::Error>> {
        Ok((self.read(regs::JESD_PARAM_K)? as u8).wrapping_add(1))
    }

    /// Where test data enters the lane, or `None` if the field holds an
    /// unused encoding.
    pub fn jesd204b_injection_point(
        &mut self,
    ) -> Result<Option<InjectionPoint>, Error<SPI::Error>> {
        let bits = (self.read(regs::JESD_CTRL3)? & regs::jesd_ctrl3_test_data_inj_pt(!0)) >> 4;
        Ok(InjectionPoint::from_bits(bits))
    }

    pub fn set_jesd204b_injection_point(
        &mut self,
        point: InjectionPoint,
    ) -> Result<(), Error<SPI::Error>> {
        self.set_bits(
            regs::JESD_CTRL3,
            regs::jesd_ctrl3_test_data_inj_pt(point as u32),
            regs::jesd_ctrl3_test_data_inj_pt(!0),
        )
    }

    impl_field!(
        /// JESD204B test mode: 0 off, 1 checkerboard, 2 word toggle, 3 PN23,
        /// 4 PN9, 5 repeated user pattern, 6 single user pattern, 8 modified
        /// RPAT, 12 PN7, 13 PN15.
        jesd204b_test_mode: u8,
        regs::JESD_CTRL3,
        regs::jesd_ctrl3_jesd_test_mode,
        0,
        0..=13
    );

    impl_flag!(
        /// Serial output bits inverted.
        jesd204b_inverted,
        regs::JESD_CTRL2,
        regs::JESD_CTRL2_INVERT_JESD_BITS
    );
}

#[cfg(test)]
mod tests {
    use crate::{
        Config, InjectionPoint, PowerMode, regs,
        test_support::{BusFault, SimulatedAd9250, assert_invalid, test_device},
        Ad9250, Error,
    };

    #[test]
    fn frames_are_rounded_and_stored_minus_one() {
        let mut dev = test_device();

        for (k, programmed) in [(0, 4), (5, 4), (6, 8), (7, 8), (16, 16), (32, 32)] {
            assert_eq!(dev.set_jesd204b_frames(k), Ok(programmed));
            assert_eq!(dev.spi().peek(regs::JESD_PARAM_K.addr()), programmed - 1);
            assert_eq!(dev.jesd204b_frames(), Ok(programmed));
        }
    }

    #[test]
    fn frames_out_of_range_touch_nothing() {
        let mut dev = test_device();
        assert_invalid(dev.set_jesd204b_frames(33));
        assert_eq!(dev.spi().writes, 0);
    }

    #[test]
    fn power_mode_uses_its_own_field() {
        let mut dev = test_device();
        dev.set_chip_power_mode(PowerMode::Standby).unwrap();

        dev.set_jesd204b_power_mode(PowerMode::PowerDown).unwrap();
        assert_eq!(dev.jesd204b_power_mode(), Ok(PowerMode::PowerDown));
        assert_eq!(dev.chip_power_mode(), Ok(PowerMode::Standby));

        assert_invalid(dev.set_jesd204b_power_mode(PowerMode::Reserved));
    }

    #[test]
    fn injection_point_and_test_mode_share_ctrl3() {
        let mut dev = test_device();
        assert_eq!(dev.jesd204b_injection_point(), Ok(None));

        dev.set_jesd204b_injection_point(InjectionPoint::ScramblerInput)
            .unwrap();
        dev.set_jesd204b_test_mode(13).unwrap();

        assert_eq!(
            dev.jesd204b_injection_point(),
            Ok(Some(InjectionPoint::ScramblerInput))
        );
        assert_eq!(dev.jesd204b_test_mode(), Ok(13));
        assert_eq!(dev.read(regs::JESD_CTRL3), Ok(0x2D));

        assert_invalid(dev.set_jesd204b_test_mode(14));
    }

    #[test]
    fn inversion_flag() {
        let mut dev = test_device();
        dev.set_jesd204b_inverted(true).unwrap();
        assert_eq!(dev.jesd204b_inverted(), Ok(true));
        dev.set_jesd204b_inverted(false).unwrap();
        assert_eq!(dev.read(regs::JESD_CTRL2), Ok(0));
    }

    #[test]
    fn setup_programs_link_parameters() {
        let mut dev = test_device();
        let mut cfg = Config::default().jesd204b;
        cfg.ctrl_bits_no = 2;
        cfg.ctrl_bits_assign = 5;
        cfg.tail_bits_mode = true;
        cfg.k = 17;
        cfg.lane0_assign = 1;
        cfg.lane1_assign = 0;

        dev.jesd204b_setup(&cfg).unwrap();

        assert!(!dev.has_pending());
        assert_eq!(dev.read(regs::OUT_MODE), Ok(0xA0 | 0x01));
        assert_eq!(dev.read(regs::JESD_PARAM_CS_N), Ok(0x80));
        assert_eq!(dev.read(regs::JESD_PARAM_NP), Ok(0x20));
        // Control bits in use, tail bits left alone
        assert_eq!(dev.read(regs::JESD_CTRL1), Ok(regs::jesd_ctrl1_ilas_mode(1)));
        assert_eq!(dev.jesd204b_frames(), Ok(16));
        assert_eq!(dev.read(regs::JESD_DID_CFG), Ok(0xF0));
        assert_eq!(dev.read(regs::JESD_LID_CFG1), Ok(0x01));
        assert_eq!(dev.read(regs::JESD_LANE_ASSGN1), Ok(0x12));
        assert_eq!(dev.read(regs::JESD_LANE_ASSGN2), Ok(0x30));
        assert_eq!(dev.read(regs::CML), Ok(3));
    }

    #[test]
    fn setup_rejects_out_of_range_fields_up_front() {
        let mut k = Config::default().jesd204b;
        k.k = 40;
        let mut lane = Config::default().jesd204b;
        lane.lane1_assign = 4;
        let mut ilas = Config::default().jesd204b;
        ilas.ilas_mode = 4;

        for cfg in [k, lane, ilas] {
            let mut dev = test_device();
            assert_invalid(dev.jesd204b_setup(&cfg));
            assert_eq!(dev.spi().writes, 0);
            // Lanes were never powered down
            assert_eq!(dev.read(regs::JESD_CTRL1), Ok(0));
        }
    }

    #[test]
    fn setup_propagates_transport_errors() {
        let mut spi = SimulatedAd9250::new();
        spi.fail_reads = true;
        let mut dev = Ad9250::new(spi);

        assert_eq!(
            dev.jesd204b_setup(&Config::default().jesd204b),
            Err(Error::Transport(BusFault))
        );
    }
}
