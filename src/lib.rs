//! A `no_std`, no-alloc driver for the Analog Devices AD9250 dual ADC.
//!
//! The chip is configured over a 3-wire SPI port. Most configuration
//! registers are *shadowed*: a write lands in a buffer on the chip and only
//! takes effect when a device update is requested. This crate keeps a
//! host-side mirror of those registers so that read-modify-write sequences
//! see the values that will be applied, not the stale ones still running.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐  write()   ┌──────────────┐   SPI    ┌──────────────────┐
//! │   Application    │───────────▶│ ShadowTable  │─────────▶│ AD9250 buffered  │
//! │                  │            │ (mirror +    │          │ bank             │
//! │ read_or_shadow() │◀───────────│  pending)    │          │                  │
//! │                  │            └──────────────┘          │       │ update   │
//! │ sync()           │──── DEVICE_UPDATE + poll ───────────▶│       ▼          │
//! │                  │                                      │ active bank      │
//! │ read()           │◀─────────────────────────────────────│                  │
//! └──────────────────┘                                      └──────────────────┘
//! ```
//!
//! - **Writes** to shadowed registers update the mirror first, then the bus
//! - **`read_or_shadow`** answers shadowed registers from the mirror
//! - **`read`** always asks the chip, so it shows what is actually applied
//! - **`sync`** requests the update and polls a bounded number of times;
//!   running out of polls is reported, not treated as an error
//!
//! # Example
//!
//! ```rust,no_run
//! use ad9250::prelude::*;
//! # fn demo<SPI: embedded_hal::spi::SpiDevice>(spi: SPI) -> Result<(), ad9250::Error<SPI::Error>> {
//!
//! let mut adc = Ad9250::setup(spi, &Config::default())?;
//!
//! adc.set_test_mode(4)?;             // checkerboard, buffered
//! adc.set_output_format(OutputFormat::OffsetBinary)?;
//! if !adc.sync()?.is_completed() {
//!     // the chip never acknowledged the update
//! }
//! assert_eq!(adc.test_mode()?, 4);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![no_std]

pub mod config;
pub mod defaults;
mod device;
pub mod error;
mod features;
pub mod helpers;
pub mod register;
pub mod regs;
mod shared;
pub(crate) mod table;
pub mod types;

#[cfg(test)]
mod test_support;

pub use config::{Config, FastDetectConfig, Jesd204bConfig, PlatformConfig};
pub use defaults::{SHADOW_DEFAULTS, SHADOW_REGISTER_COUNT};
pub use device::Ad9250;
pub use error::{Error, ShadowError};
pub use register::Register;
pub use shared::SharedAd9250;
pub use table::ShadowTable;
pub use types::{Channel, InjectionPoint, OutputFormat, POLL_BUDGET, PollOutcome, PowerMode};

pub mod prelude {
    pub use super::{
        Ad9250, Channel, Config, Error, InjectionPoint, OutputFormat, PollOutcome, PowerMode,
        Register, ShadowError, SharedAd9250, regs,
    };
}
