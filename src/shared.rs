use core::cell::RefCell;

use critical_section::Mutex;
use embedded_hal::spi::SpiDevice;

use crate::Ad9250;

/// An [`Ad9250`] that can live in a `static` and be reached from both
/// thread and interrupt context.
///
/// Every access runs inside a critical section, so the shadow table and the
/// bus traffic of one closure are never interleaved with another's. Keep
/// closures short: a [`sync`](Ad9250::sync) that times out holds the
/// critical section for the whole polling budget.
pub struct SharedAd9250<SPI> {
    inner: Mutex<RefCell<Ad9250<SPI>>>,
}

impl<SPI: SpiDevice> SharedAd9250<SPI> {
    pub const fn new(dev: Ad9250<SPI>) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(dev)),
        }
    }

    /// Runs `f` with exclusive access to the driver.
    ///
    /// # Panics
    /// If called again from inside `f`.
    pub fn with_device<R>(&self, f: impl FnOnce(&mut Ad9250<SPI>) -> R) -> R {
        critical_section::with(|cs| f(&mut self.inner.borrow_ref_mut(cs)))
    }

    pub fn into_inner(self) -> Ad9250<SPI> {
        self.inner.into_inner().into_inner()
    }
}
