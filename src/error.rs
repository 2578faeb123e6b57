/// Errors raised by the shadow table and the register encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ShadowError {
    /// Shadow index exceeds the table size.
    #[error("shadow index exceeds table bounds")]
    OutOfBounds,
    /// Transfer length outside 1..=3 bytes.
    #[error("register transfer length must be 1 to 3 bytes")]
    InvalidLength,
    /// Multi-byte register would extend below address 0.
    #[error("register bytes extend below address 0")]
    AddressUnderflow,
    /// Register is not backed by a shadow slot.
    #[error("register is not shadowed")]
    NotShadowed,
}

/// Errors returned by driver operations.
///
/// `E` is the error type of the underlying SPI device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error<E> {
    /// The SPI exchange failed.
    #[error("SPI transport error: {0:?}")]
    Transport(E),
    /// A setter received a value outside its documented range.
    #[error("argument outside the documented range")]
    InvalidArgument,
    /// Malformed register word or shadow slot.
    #[error("shadow table error: {0}")]
    Shadow(#[from] ShadowError),
}
