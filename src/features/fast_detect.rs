use embedded_hal::spi::SpiDevice;

use crate::{Ad9250, config::FastDetectConfig, error::Error, regs};

impl<SPI: SpiDevice> Ad9250<SPI> {
    /// Programs the fast-detect block and its thresholds.
    ///
    /// Every register involved is shadowed; nothing changes on the chip
    /// until the next [`sync`](Self::sync).
    pub fn fast_detect_setup(&mut self, cfg: &FastDetectConfig) -> Result<(), Error<SPI::Error>> {
        let mut ctrl = 0;
        if cfg.enable {
            ctrl |= regs::FAST_DETECT_OUTPUT_ENABLE;
        }
        if cfg.pin_force_value {
            ctrl |= regs::FAST_DETECT_FORCE_FDA_FDB_VAL;
        }
        if cfg.force_pins {
            ctrl |= regs::FAST_DETECT_FORCE_FDA_FDB_PIN;
        }
        if cfg.pin_function {
            ctrl |= regs::FAST_DETECT_PIN_FCT;
        }

        self.write(regs::FAST_DETECT, ctrl)?;
        self.write(regs::FD_UPPER_THD, cfg.upper_threshold.into())?;
        self.write(regs::FD_LOWER_THD, cfg.lower_threshold.into())?;
        self.write(regs::FD_DWELL_TIME, cfg.dwell_time.into())
    }
}

#[cfg(test)]
mod tests {
    use crate::{FastDetectConfig, regs, test_support::test_device};

    #[test]
    fn setup_buffers_until_sync() {
        let mut dev = test_device();
        let cfg = FastDetectConfig {
            enable: true,
            force_pins: true,
            upper_threshold: 0x1ABC,
            lower_threshold: 0x0123,
            dwell_time: 0x0400,
            ..Default::default()
        };

        dev.fast_detect_setup(&cfg).unwrap();
        assert_eq!(dev.pending().len(), 4);
        assert_eq!(dev.spi().register_value(regs::FD_UPPER_THD), 0);

        dev.sync().unwrap();
        assert_eq!(dev.read(regs::FAST_DETECT), Ok(0x09));
        assert_eq!(dev.read(regs::FD_UPPER_THD), Ok(0x1ABC));
        assert_eq!(dev.read(regs::FD_LOWER_THD), Ok(0x0123));
        assert_eq!(dev.read(regs::FD_DWELL_TIME), Ok(0x0400));
    }
}
