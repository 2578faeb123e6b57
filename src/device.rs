use embedded_hal::spi::SpiDevice;
use heapless::Vec;

use crate::{
    config::Config,
    defaults::{SHADOW_DEFAULTS, SHADOW_REGISTER_COUNT},
    error::Error,
    register::{Direction, Register},
    regs,
    table::ShadowTable,
    types::{POLL_BUDGET, PollOutcome},
};

/// AD9250 driver handle.
///
/// Owns the SPI device and the host-side mirror of the shadowed registers.
///
/// Writes to shadowed registers land in the mirror immediately but only take
/// effect on silicon after [`sync`](Self::sync). Until then
/// [`read_or_shadow`](Self::read_or_shadow) reports the mirror while
/// [`read`](Self::read) reports what the chip is actually running with.
pub struct Ad9250<SPI> {
    spi: SPI,
    shadow: ShadowTable<SHADOW_REGISTER_COUNT>,
}

impl<SPI> core::fmt::Debug for Ad9250<SPI> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Ad9250")
            .field("pending", &self.shadow.pending().as_slice())
            .finish_non_exhaustive()
    }
}

impl<SPI: SpiDevice> Ad9250<SPI> {
    /// Wraps `spi` without touching the bus.
    ///
    /// The shadow table starts out holding the power-on-reset defaults.
    pub fn new(spi: SPI) -> Self {
        Self {
            spi,
            shadow: ShadowTable::new(&SHADOW_DEFAULTS),
        }
    }

    /// Creates a handle and brings the chip up with `config`.
    ///
    /// On failure the SPI device is dropped; use [`new`](Self::new) and
    /// [`init`](Self::init) to keep it.
    pub fn setup(spi: SPI, config: &Config) -> Result<Self, Error<SPI::Error>> {
        let mut dev = Self::new(spi);
        dev.init(config)?;
        Ok(dev)
    }

    /// Resets the chip and applies `config`, finishing with a sync.
    ///
    /// # Errors
    /// [`Error::InvalidArgument`] without any bus traffic if a `config` field
    /// is out of range.
    pub fn init(&mut self, config: &Config) -> Result<(), Error<SPI::Error>> {
        if !config.is_valid() {
            return Err(Error::InvalidArgument);
        }

        let reset = self.soft_reset()?;
        log::debug!("ad9250: soft reset done, SPI_CFG={reset:#04x}");

        let p = &config.platform;
        self.set_bits(
            regs::PDWN,
            if p.extern_pdwn_standby {
                regs::PDWN_EXTERN
            } else {
                0
            },
            regs::PDWN_EXTERN,
        )?;
        self.write(
            regs::CLOCK,
            if p.clock_duty_cycle_stabilizer {
                regs::CLOCK_DUTY_CYCLE
            } else {
                0
            } | regs::clock_selection(p.clock_selection.into()),
        )?;
        self.write(
            regs::CLOCK_DIV,
            regs::clock_div_ratio(p.clock_div_ratio.into())
                | regs::clock_div_phase(p.clock_div_phase.into()),
        )?;
        self.write(regs::VREF, regs::vref_fs_adjust(p.vref_adjust.into()))?;
        self.write(regs::PLL_ENCODE, regs::pll_encode(p.pll_low_encode.into()))?;
        self.sync()?;
        log::debug!("ad9250: clocking configured");

        self.jesd204b_setup(&config.jesd204b)?;
        self.fast_detect_setup(&config.fast_detect)?;
        self.sync()?;
        log::debug!("ad9250: setup complete");

        Ok(())
    }

    /// Tears the handle down and hands the SPI device back.
    pub fn release(self) -> SPI {
        self.spi
    }

    /// Reads `reg` from the chip.
    ///
    /// Always goes to the bus, shadowed or not.
    pub fn read(&mut self, reg: Register) -> Result<u32, Error<SPI::Error>> {
        let mut value = 0u32;
        for byte in 0..reg.len() {
            let mut frame = reg.frame(Direction::Read, byte, 0);
            self.spi
                .transfer_in_place(&mut frame)
                .map_err(Error::Transport)?;
            log::trace!("ad9250: rd {frame:02x?}");
            value = value << 8 | frame[2] as u32;
        }
        Ok(value)
    }

    /// Writes `value` to `reg`, most significant byte first.
    ///
    /// Shadowed registers update the mirror before any bus traffic, so the
    /// mirror keeps the value even if the transfer fails. Such a register
    /// stays [unflushed](Self::unflushed) until a later write to it succeeds.
    pub fn write(&mut self, reg: Register, value: u32) -> Result<(), Error<SPI::Error>> {
        let index = reg.shadow_index();
        if let Some(index) = index {
            self.shadow.set(index, value)?;
        }

        let len = reg.len();
        for byte in 0..len {
            let data = (value >> (8 * (len - byte - 1))) as u8;
            let mut frame = reg.frame(Direction::Write, byte, data);
            log::trace!("ad9250: wr {frame:02x?}");
            self.spi
                .transfer_in_place(&mut frame)
                .map_err(Error::Transport)?;
        }

        if let Some(index) = index {
            self.shadow.mark_flushed(index)?;
        }
        Ok(())
    }

    /// Returns the mirror for shadowed registers, otherwise reads the chip.
    pub fn read_or_shadow(&mut self, reg: Register) -> Result<u32, Error<SPI::Error>> {
        match reg.shadow_index() {
            Some(index) => Ok(self.shadow.get(index)?),
            None => self.read(reg),
        }
    }

    /// Replaces the bits selected by `mask` with `bits`.
    ///
    /// `bits` must already be shifted into the field position.
    pub fn set_bits(&mut self, reg: Register, bits: u32, mask: u32) -> Result<(), Error<SPI::Error>> {
        let current = self.read_or_shadow(reg)?;
        self.write(reg, (current & !mask) | (bits & mask))
    }

    /// Applies all buffered shadow register writes on the chip.
    ///
    /// Requests a device update and polls until the chip clears the request
    /// bit or [`POLL_BUDGET`] reads have been spent. Running out of budget is
    /// not an error; the returned [`PollOutcome`] tells the two apart. The
    /// pending set is cleared only when the chip confirms the update, and
    /// even then registers whose last write failed on the bus stay pending.
    pub fn sync(&mut self) -> Result<PollOutcome, Error<SPI::Error>> {
        self.write(regs::DEVICE_UPDATE, regs::DEVICE_UPDATE_SW)?;

        let outcome = self.poll_until_clear(regs::DEVICE_UPDATE, regs::DEVICE_UPDATE_SW)?.0;
        match outcome {
            PollOutcome::Completed { polls } => {
                log::debug!("ad9250: device update completed after {polls} polls");
                self.shadow.clear_pending();
            }
            PollOutcome::TimedOut => {
                log::warn!("ad9250: device update still pending after {POLL_BUDGET} polls");
            }
        }
        Ok(outcome)
    }

    /// Resets the chip's registers to their defaults.
    ///
    /// Returns the last value read back from `SPI_CFG`, which still carries
    /// the reset bits if the chip never cleared them. The host mirror is not
    /// touched; see [`reload_shadow_defaults`](Self::reload_shadow_defaults).
    pub fn soft_reset(&mut self) -> Result<u32, Error<SPI::Error>> {
        self.write(regs::SPI_CFG, regs::SPI_CFG_SOFT_RST)?;

        let (outcome, last) = self.poll_until_clear(regs::SPI_CFG, regs::SPI_CFG_SOFT_RST)?;
        if outcome == PollOutcome::TimedOut {
            log::warn!("ad9250: soft reset still pending after {POLL_BUDGET} polls");
        }
        Ok(last)
    }

    fn poll_until_clear(
        &mut self,
        reg: Register,
        mask: u32,
    ) -> Result<(PollOutcome, u32), Error<SPI::Error>> {
        let mut polls = 0u16;
        loop {
            let value = self.read(reg)?;
            polls += 1;
            if value & mask == 0 {
                return Ok((PollOutcome::Completed { polls }, value));
            }
            if polls == POLL_BUDGET {
                return Ok((PollOutcome::TimedOut, value));
            }
        }
    }

    /// Cached value of a shadowed register.
    pub fn shadow_value(&self, reg: Register) -> Result<u32, Error<SPI::Error>> {
        let index = reg
            .shadow_index()
            .ok_or(crate::error::ShadowError::NotShadowed)?;
        Ok(self.shadow.get(index)?)
    }

    /// Shadow indices written since the last confirmed sync.
    ///
    /// Includes every [unflushed](Self::unflushed) index: a sync cannot apply
    /// a value the chip never received.
    pub fn pending(&self) -> Vec<u8, SHADOW_REGISTER_COUNT> {
        self.shadow.pending()
    }

    pub fn has_pending(&self) -> bool {
        self.shadow.any_pending()
    }

    /// Shadow indices whose cached value never reached the chip because the
    /// bus transfer failed.
    ///
    /// Rewrite the register (for example with the value from
    /// [`shadow_value`](Self::shadow_value)) to flush it.
    pub fn unflushed(&self) -> Vec<u8, SHADOW_REGISTER_COUNT> {
        self.shadow.unflushed()
    }

    pub fn has_unflushed(&self) -> bool {
        self.shadow.any_unflushed()
    }

    /// Resets the host mirror to the power-on-reset defaults.
    ///
    /// Call after [`soft_reset`](Self::soft_reset) to bring the mirror back in
    /// line with the chip.
    pub fn reload_shadow_defaults(&mut self) {
        self.shadow.reload(&SHADOW_DEFAULTS);
    }

    /// Direct access to the SPI device.
    pub fn spi(&mut self) -> &mut SPI {
        &mut self.spi
    }
}
