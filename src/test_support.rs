//! Test support utilities - only compiled in test builds.

use embedded_hal::spi::{ErrorKind, ErrorType, Operation, SpiDevice};
use heapless::Vec;

use crate::{Ad9250, register::Register, regs};

/// Error raised by the simulated bus when failure injection is enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusFault;

impl embedded_hal::spi::Error for BusFault {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// Byte-addressed model of the AD9250 SPI port.
///
/// Shadowed addresses accept writes into a buffered bank that only reaches
/// the readable bank when a device update completes. `DEVICE_UPDATE_SW` and
/// the soft reset bits clear after a configurable number of status reads,
/// or never when the latency is `None`.
pub struct SimulatedAd9250 {
    active: [u8; 256],
    buffered: [u8; 256],
    shadowed: [bool; 256],
    pub update_latency: Option<u32>,
    pub reset_latency: Option<u32>,
    update_remaining: Option<u32>,
    reset_remaining: Option<u32>,
    pub fail_reads: bool,
    pub fail_writes: bool,
    pub reads: usize,
    pub writes: usize,
    /// First frames seen on the bus, as sent by the driver.
    pub log: Vec<[u8; 3], 128>,
}

impl SimulatedAd9250 {
    pub fn new() -> Self {
        let mut shadowed = [false; 256];
        for reg in regs::SHADOWED {
            for byte in 0..reg.len() {
                shadowed[(reg.addr() - byte) as usize] = true;
            }
        }

        let mut sim = Self {
            active: [0; 256],
            buffered: [0; 256],
            shadowed,
            update_latency: Some(2),
            reset_latency: Some(2),
            update_remaining: None,
            reset_remaining: None,
            fail_reads: false,
            fail_writes: false,
            reads: 0,
            writes: 0,
            log: Vec::new(),
        };
        sim.power_on_reset();
        sim
    }

    /// Update bit never clears.
    pub fn stuck_update() -> Self {
        Self {
            update_latency: None,
            ..Self::new()
        }
    }

    /// Reset bits never clear.
    pub fn stuck_reset() -> Self {
        Self {
            reset_latency: None,
            ..Self::new()
        }
    }

    fn power_on_reset(&mut self) {
        self.active = [0; 256];
        self.active[regs::CHIP_ID.addr() as usize] = regs::CHIP_ID_AD9250;
        self.active[regs::CLOCK.addr() as usize] = 0x01;
        self.active[regs::OUT_MODE.addr() as usize] = 0x01;
        self.buffered = self.active;
    }

    /// Readable byte at `addr`.
    pub fn peek(&self, addr: u8) -> u8 {
        self.active[addr as usize]
    }

    /// Byte waiting in the buffered bank at `addr`.
    pub fn peek_buffered(&self, addr: u8) -> u8 {
        self.buffered[addr as usize]
    }

    /// Overwrites the readable byte at `addr`, bypassing the SPI port.
    pub fn poke(&mut self, addr: u8, value: u8) {
        self.active[addr as usize] = value;
        self.buffered[addr as usize] = value;
    }

    /// Readable value of `reg`, assembled most significant byte first.
    pub fn register_value(&self, reg: Register) -> u32 {
        (0..reg.len()).fold(0, |acc, byte| {
            acc << 8 | self.active[(reg.addr() - byte) as usize] as u32
        })
    }

    fn exchange(&mut self, frame: &mut [u8]) -> Result<(), BusFault> {
        assert_eq!(frame.len(), 3, "AD9250 frames are 3 bytes");
        let _ = self.log.push([frame[0], frame[1], frame[2]]);

        let instr = u16::from_be_bytes([frame[0], frame[1]]);
        let addr = (instr & 0xFF) as usize;

        if instr & crate::register::READ != 0 {
            if self.fail_reads {
                return Err(BusFault);
            }
            self.reads += 1;
            self.advance(addr);
            frame[2] = self.active[addr];
        } else {
            if self.fail_writes {
                return Err(BusFault);
            }
            self.writes += 1;
            self.store(addr, frame[2]);
        }
        Ok(())
    }

    fn store(&mut self, addr: usize, data: u8) {
        let update = regs::DEVICE_UPDATE.addr() as usize;
        let spi_cfg = regs::SPI_CFG.addr() as usize;
        let soft_rst = regs::SPI_CFG_SOFT_RST as u8;

        if addr == update {
            if data & regs::DEVICE_UPDATE_SW as u8 != 0 {
                self.active[update] |= regs::DEVICE_UPDATE_SW as u8;
                self.update_remaining = self.update_latency;
            }
        } else if addr == spi_cfg {
            self.active[spi_cfg] = data;
            if data & soft_rst != 0 {
                self.reset_remaining = self.reset_latency;
            }
        } else if self.shadowed[addr] {
            self.buffered[addr] = data;
        } else {
            self.active[addr] = data;
        }
    }

    fn advance(&mut self, addr: usize) {
        if addr == regs::DEVICE_UPDATE.addr() as usize {
            match self.update_remaining {
                Some(0) => {
                    for (i, shadowed) in self.shadowed.iter().enumerate() {
                        if *shadowed {
                            self.active[i] = self.buffered[i];
                        }
                    }
                    self.active[addr] &= !(regs::DEVICE_UPDATE_SW as u8);
                    self.update_remaining = None;
                }
                Some(n) => self.update_remaining = Some(n - 1),
                None => {}
            }
        } else if addr == regs::SPI_CFG.addr() as usize {
            match self.reset_remaining {
                Some(0) => {
                    let cfg = self.active[addr] & !(regs::SPI_CFG_SOFT_RST as u8);
                    self.power_on_reset();
                    self.active[addr] = cfg;
                    self.reset_remaining = None;
                }
                Some(n) => self.reset_remaining = Some(n - 1),
                None => {}
            }
        }
    }
}

impl Default for SimulatedAd9250 {
    fn default() -> Self {
        Self::new()
    }
}

impl ErrorType for SimulatedAd9250 {
    type Error = BusFault;
}

impl SpiDevice for SimulatedAd9250 {
    fn transaction(&mut self, operations: &mut [Operation<'_, u8>]) -> Result<(), BusFault> {
        for op in operations.iter_mut() {
            match op {
                Operation::TransferInPlace(buf) => self.exchange(buf)?,
                Operation::Write(buf) => {
                    let mut frame = [0u8; 3];
                    frame.copy_from_slice(buf);
                    self.exchange(&mut frame)?;
                }
                Operation::Transfer(read, write) => {
                    let mut frame = [0u8; 3];
                    frame.copy_from_slice(write);
                    self.exchange(&mut frame)?;
                    read.copy_from_slice(&frame);
                }
                Operation::Read(_) | Operation::DelayNs(_) => {}
            }
        }
        Ok(())
    }
}

pub type TestDevice = Ad9250<SimulatedAd9250>;

/// Handle over a freshly powered simulated chip, without running setup.
pub fn test_device() -> TestDevice {
    Ad9250::new(SimulatedAd9250::new())
}

/// Asserts that the result is an `InvalidArgument` error.
pub fn assert_invalid<T: core::fmt::Debug>(result: Result<T, crate::Error<BusFault>>) {
    assert_eq!(result.unwrap_err(), crate::Error::InvalidArgument);
}
