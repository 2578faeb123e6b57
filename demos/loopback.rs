//! Loopback example: bring-up against an in-memory register file
//!
//! This example demonstrates:
//! - Implementing `SpiDevice` for a stand-in bus
//! - Running the full setup sequence
//! - Buffered writes to shadowed registers and the sync that applies them
//! - Sharing the driver through a critical section

use ad9250::prelude::*;
use embedded_hal::spi::{ErrorKind, ErrorType, Operation, SpiDevice};

/// Register file that applies every write immediately and clears the
/// self-clearing bits on the next read.
struct RegisterFile {
    regs: [u8; 256],
}

#[derive(Debug)]
struct Never;

impl embedded_hal::spi::Error for Never {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

impl ErrorType for RegisterFile {
    type Error = Never;
}

impl SpiDevice for RegisterFile {
    fn transaction(&mut self, operations: &mut [Operation<'_, u8>]) -> Result<(), Never> {
        for op in operations.iter_mut() {
            if let Operation::TransferInPlace(frame) = op {
                let addr = frame[1] as usize;
                if frame[0] & 0x80 != 0 {
                    frame[2] = self.regs[addr];
                    // DEVICE_UPDATE and SPI_CFG reset bits self-clear
                    match addr {
                        0xFF => self.regs[addr] = 0,
                        0x00 => self.regs[addr] &= !0x24,
                        _ => {}
                    }
                } else {
                    self.regs[addr] = frame[2];
                }
            }
        }
        Ok(())
    }
}

fn main() -> Result<(), Error<Never>> {
    let spi = RegisterFile { regs: [0; 256] };
    let mut adc = Ad9250::setup(spi, &Config::default())?;

    println!("JESD204B K = {}", adc.jesd204b_frames()?);
    println!("lanes ready: {}", adc.link_ready()?);

    adc.set_test_mode(4)?;
    println!("pending after set_test_mode: {:?}", adc.pending());
    let outcome = adc.sync()?;
    println!("sync: {outcome:?}, test mode now {}", adc.test_mode()?);

    let shared = SharedAd9250::new(adc);
    shared.with_device(|adc| adc.set_offset_adjust(-5))?;
    shared.with_device(|adc| adc.sync())?;
    println!(
        "offset adjust: {}",
        shared.with_device(|adc| adc.offset_adjust())?
    );

    Ok(())
}
